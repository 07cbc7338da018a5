//! Default value functions for serde deserialization.

pub fn lane_width_m() -> f64 {
    0.3
}

pub fn obstacle_margin_m() -> f64 {
    0.0
}

pub fn mbb_orientation_offset_deg() -> f64 {
    0.0
}

pub fn start_corner() -> u8 {
    0
}
