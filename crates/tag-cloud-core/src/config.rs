use serde::{Deserialize, Serialize};

/// Tuning knobs for the spiral search, compaction and overlap index.
/// Key notes:
///   - `angle_step` and `spiral_spacing` shape the spiral walk; a finer walk finds
///     tighter spots but tries more candidates per rectangle
///   - `compaction` pulls each placed rectangle toward the center afterwards
///   - `cell_size` only affects speed, never placements
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CloudConfig {
    /// Radians advanced per spiral step.
    #[serde(default = "default_angle_step")]
    pub angle_step: f64,
    /// Radial distance gained per full spiral revolution (pixels).
    #[serde(default = "default_spiral_spacing")]
    pub spiral_spacing: f64,
    /// Move each rectangle toward the center after the spiral search.
    #[serde(default = "default_compaction")]
    pub compaction: bool,
    /// Distance moved per compaction step (pixels).
    #[serde(default = "default_compaction_step")]
    pub compaction_step: f64,
    /// Edge of a spatial grid cell (pixels).
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            angle_step: default_angle_step(),
            spiral_spacing: default_spiral_spacing(),
            compaction: default_compaction(),
            compaction_step: default_compaction_step(),
            cell_size: default_cell_size(),
        }
    }
}

impl CloudConfig {
    /// Validates the configuration parameters.
    ///
    /// Returns an error if:
    /// - `angle_step` is not in `(0, π]`
    /// - `spiral_spacing` or `compaction_step` is not a positive finite number
    /// - `cell_size` is zero or does not fit the coordinate type
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::CloudError;

        if !self.angle_step.is_finite()
            || self.angle_step <= 0.0
            || self.angle_step > std::f64::consts::PI
        {
            return Err(CloudError::InvalidConfig(format!(
                "angle_step ({}) must be in (0, pi]",
                self.angle_step
            )));
        }
        if !self.spiral_spacing.is_finite() || self.spiral_spacing <= 0.0 {
            return Err(CloudError::InvalidConfig(format!(
                "spiral_spacing ({}) must be a positive number",
                self.spiral_spacing
            )));
        }
        if !self.compaction_step.is_finite() || self.compaction_step <= 0.0 {
            return Err(CloudError::InvalidConfig(format!(
                "compaction_step ({}) must be a positive number",
                self.compaction_step
            )));
        }
        if self.cell_size == 0 || self.cell_size > i32::MAX as u32 {
            return Err(CloudError::InvalidConfig(format!(
                "cell_size ({}) must be in 1..=i32::MAX",
                self.cell_size
            )));
        }
        Ok(())
    }
}

fn default_angle_step() -> f64 {
    crate::spiral::DEFAULT_ANGLE_STEP
}
fn default_spiral_spacing() -> f64 {
    crate::spiral::DEFAULT_SPACING
}
fn default_compaction() -> bool {
    true
}
fn default_compaction_step() -> f64 {
    1.0
}
fn default_cell_size() -> u32 {
    64
}

/// Builder for `CloudConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct CloudConfigBuilder {
    cfg: CloudConfig,
}

impl CloudConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: CloudConfig::default(),
        }
    }
    pub fn angle_step(mut self, v: f64) -> Self {
        self.cfg.angle_step = v;
        self
    }
    /// Angle step given in degrees.
    pub fn angle_step_degrees(mut self, v: f64) -> Self {
        self.cfg.angle_step = v.to_radians();
        self
    }
    pub fn spiral_spacing(mut self, v: f64) -> Self {
        self.cfg.spiral_spacing = v;
        self
    }
    pub fn compaction(mut self, v: bool) -> Self {
        self.cfg.compaction = v;
        self
    }
    pub fn compaction_step(mut self, v: f64) -> Self {
        self.cfg.compaction_step = v;
        self
    }
    pub fn cell_size(mut self, v: u32) -> Self {
        self.cfg.cell_size = v;
        self
    }
    pub fn build(self) -> CloudConfig {
        self.cfg
    }
}

impl CloudConfig {
    /// Create a fluent builder for `CloudConfig`.
    pub fn builder() -> CloudConfigBuilder {
        CloudConfigBuilder::new()
    }
}
