//! Planner configuration, loadable from YAML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};

use super::defaults;

/// Configuration for a planning run.
///
/// Any change to these values (like any change to the boundary or
/// obstacles) invalidates all derived state; callers re-run
/// [`plan`](crate::plan) with a fresh snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Lane spacing in meters. Also the coverage-cell side length.
    #[serde(default = "defaults::lane_width_m")]
    pub lane_width_m: f64,

    /// Clearance to keep around obstacles in meters.
    ///
    /// Reserved: carried through the pipeline but consumed by no
    /// component yet.
    #[serde(default = "defaults::obstacle_margin_m")]
    pub obstacle_margin_m: f64,

    /// Extra rotation applied to the minimum bounding box, in degrees
    /// within [0, 180].
    #[serde(default = "defaults::mbb_orientation_offset_deg")]
    pub mbb_orientation_offset_deg: f64,

    /// Which corner of the bounding box the sweep starts from (0..=3).
    #[serde(default = "defaults::start_corner")]
    pub start_corner: u8,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            lane_width_m: defaults::lane_width_m(),
            obstacle_margin_m: defaults::obstacle_margin_m(),
            mbb_orientation_offset_deg: defaults::mbb_orientation_offset_deg(),
            start_corner: defaults::start_corner(),
        }
    }
}

impl PlanConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for lane width.
    pub fn with_lane_width_m(mut self, meters: f64) -> Self {
        self.lane_width_m = meters;
        self
    }

    /// Builder-style setter for the obstacle margin.
    pub fn with_obstacle_margin_m(mut self, meters: f64) -> Self {
        self.obstacle_margin_m = meters;
        self
    }

    /// Builder-style setter for the orientation offset.
    pub fn with_mbb_orientation_offset_deg(mut self, degrees: f64) -> Self {
        self.mbb_orientation_offset_deg = degrees;
        self
    }

    /// Builder-style setter for the start corner.
    pub fn with_start_corner(mut self, corner: u8) -> Self {
        self.start_corner = corner;
        self
    }

    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PlanError::InvalidConfig(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Parse from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| PlanError::InvalidConfig(e.to_string()))
    }

    /// Validate ranges before a planning run.
    pub fn validate(&self) -> Result<()> {
        if !(self.lane_width_m > 0.1) {
            return Err(PlanError::InvalidConfig(format!(
                "lane_width_m must be greater than 0.1 (got {})",
                self.lane_width_m
            )));
        }
        if self.obstacle_margin_m < 0.0 {
            return Err(PlanError::InvalidConfig(format!(
                "obstacle_margin_m must be non-negative (got {})",
                self.obstacle_margin_m
            )));
        }
        if !(0.0..=180.0).contains(&self.mbb_orientation_offset_deg) {
            return Err(PlanError::InvalidConfig(format!(
                "mbb_orientation_offset_deg must be within [0, 180] (got {})",
                self.mbb_orientation_offset_deg
            )));
        }
        if self.start_corner > 3 {
            return Err(PlanError::InvalidConfig(format!(
                "start_corner must be 0..=3 (got {})",
                self.start_corner
            )));
        }
        Ok(())
    }
}
