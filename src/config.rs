use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::{
    Kernel,
    algorithm::{ConnectionSettings, ConnectionType},
};

/// Largest number of smoothing passes accepted.
pub const MAX_SMOOTH_STEPS: usize = 5;

/// Largest accepted grid width or height.
pub const MAX_DIMENSION: usize = 8192;

/// Largest accepted corridor radius.
pub const MAX_CORRIDOR_RADIUS: usize = 64;

/// Cave generation parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaveConfig {
    /// Grid width in cells.
    pub width: usize,
    /// Grid height in cells.
    pub height: usize,
    /// Chance that an interior cell starts as a wall.
    pub fill_percent: f32,
    /// Number of smoothing passes.
    pub smooth_steps: usize,
    /// Weighted wall count above which a cell becomes wall, below which it becomes empty.
    pub smooth_threshold: i32,
    /// Weights used when counting neighbouring walls.
    pub kernel: Kernel,
    /// Wall regions smaller than this are opened up.
    pub wall_region_threshold: usize,
    /// Room regions smaller than this are filled in.
    pub room_region_threshold: usize,
    /// How rooms are ordered before corridors are carved.
    pub connection_type: ConnectionType,
    /// Chance that each consecutive room pair is considered.
    pub connection_probability: f32,
    /// Rooms whose closest edges are at least this far apart stay unlinked.
    pub max_room_distance: f32,
    /// Radius of carved corridors.
    pub corridor_radius: usize,
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            fill_percent: 0.45,
            smooth_steps: 5,
            smooth_threshold: 4,
            kernel: Kernel::moore(),
            wall_region_threshold: 50,
            room_region_threshold: 50,
            connection_type: ConnectionType::Nearest,
            connection_probability: 1.0,
            max_room_distance: 20.0,
            corridor_radius: 2,
        }
    }
}

impl CaveConfig {
    /// Parse and validate a YAML configuration.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).context("Failed to parse cave configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        Self::from_yaml(&yaml).with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Write the configuration as YAML.
    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Copy with every parameter clamped into its accepted range.
    pub fn sanitised(&self) -> Self {
        let clamp_unit = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        Self {
            width: self.width.clamp(1, MAX_DIMENSION),
            height: self.height.clamp(1, MAX_DIMENSION),
            fill_percent: clamp_unit(self.fill_percent),
            smooth_steps: self.smooth_steps.min(MAX_SMOOTH_STEPS),
            kernel: self.kernel.resized(self.kernel.size()),
            connection_probability: clamp_unit(self.connection_probability),
            max_room_distance: if self.max_room_distance.is_finite() {
                self.max_room_distance.max(0.0)
            } else {
                0.0
            },
            corridor_radius: self.corridor_radius.clamp(1, MAX_CORRIDOR_RADIUS),
            ..self.clone()
        }
    }

    /// Reject configurations the pipeline cannot run.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            bail!("Cave dimensions must be positive, got {}x{}", self.width, self.height);
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            bail!(
                "Cave dimensions must be at most {MAX_DIMENSION}, got {}x{}",
                self.width,
                self.height
            );
        }
        if !(0.0..=1.0).contains(&self.fill_percent) {
            bail!("fill_percent must lie in [0, 1], got {}", self.fill_percent);
        }
        if self.smooth_steps > MAX_SMOOTH_STEPS {
            bail!("smooth_steps must be at most {MAX_SMOOTH_STEPS}, got {}", self.smooth_steps);
        }
        if !self.kernel.is_valid() {
            bail!("Kernel must be square with an odd side, got size {}", self.kernel.size());
        }
        if !(0.0..=1.0).contains(&self.connection_probability) {
            bail!(
                "connection_probability must lie in [0, 1], got {}",
                self.connection_probability
            );
        }
        if !self.max_room_distance.is_finite() || self.max_room_distance < 0.0 {
            bail!("max_room_distance must be a non-negative number, got {}", self.max_room_distance);
        }
        if !(1..=MAX_CORRIDOR_RADIUS).contains(&self.corridor_radius) {
            bail!(
                "corridor_radius must lie in [1, {MAX_CORRIDOR_RADIUS}], got {}",
                self.corridor_radius
            );
        }
        Ok(())
    }

    /// Settings for the connection stage.
    pub fn connection_settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            connection_type: self.connection_type,
            probability: self.connection_probability,
            max_distance: self.max_room_distance,
            radius: i32::try_from(self.corridor_radius.min(MAX_CORRIDOR_RADIUS)).unwrap_or(1),
        }
    }
}
