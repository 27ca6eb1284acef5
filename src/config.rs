//! Field configuration.
//!
//! Configure with method chaining, or load from JSON:
//!
//! ```ignore
//! let config = FieldConfig::new()
//!     .with_star_count(300)
//!     .with_particle_spawn_interval(1.0, 2.5)
//!     .with_compact_width_threshold(640.0)
//!     .with_palette(Palette::aurora());
//!
//! let from_disk = FieldConfig::load("field.json")?;
//! ```
//!
//! Every field has a default, so a JSON file only needs the keys it changes.

use crate::color::{ColorStop, Palette, Rgba};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Pool sizes for one seeding pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolCounts {
    pub stars: usize,
    pub waves: usize,
    pub clouds: usize,
}

/// Configuration for the animated field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Stars on a wide viewport.
    pub star_count: usize,
    /// Energy waves on a wide viewport.
    pub wave_count: usize,
    /// Nebula clouds on a wide viewport.
    pub cloud_count: usize,
    /// Multiplier applied to every pool count in compact mode.
    pub compact_scale: f32,
    /// Viewports narrower than this (px) run in compact mode.
    pub compact_width_threshold: f32,
    /// Seconds between particle spawns, drawn uniformly from `(min, max)`.
    pub particle_spawn_interval: (f32, f32),
    /// Particle lifetime in ticks, drawn uniformly from `(min, max)`.
    pub particle_max_age: (u32, u32),
    /// Distance (px) past the left/right edge at which particles are dropped.
    pub particle_margin: f32,
    /// Star phase advance per tick (radians), drawn from `(min, max)`.
    pub twinkle_speed: (f32, f32),
    /// Opacity lost by an energy wave each tick.
    pub wave_decay: f32,
    /// Tints for waves, particles and clouds.
    pub palette: Palette,
    /// Vertical wash painted under everything, top to bottom.
    pub background: Vec<ColorStop>,
    /// Fixed RNG seed. `None` seeds from the system clock.
    pub seed: Option<u64>,
    /// Paint a single frame and stop rescheduling.
    pub reduced_motion: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            star_count: 220,
            wave_count: 6,
            cloud_count: 8,
            compact_scale: 0.5,
            compact_width_threshold: 768.0,
            particle_spawn_interval: (1.5, 3.5),
            particle_max_age: (240, 480),
            particle_margin: 60.0,
            twinkle_speed: (0.005, 0.03),
            wave_decay: 0.0015,
            palette: Palette::cosmic(),
            background: vec![
                ColorStop::new(0.0, Rgba::from_rgb8(5, 6, 20)),
                ColorStop::new(0.5, Rgba::from_rgb8(16, 10, 38)),
                ColorStop::new(1.0, Rgba::from_rgb8(4, 4, 14)),
            ],
            seed: None,
            reduced_motion: false,
        }
    }
}

impl FieldConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of stars on a wide viewport.
    pub fn with_star_count(mut self, count: usize) -> Self {
        self.star_count = count;
        self
    }

    /// Set the number of energy waves on a wide viewport.
    pub fn with_wave_count(mut self, count: usize) -> Self {
        self.wave_count = count;
        self
    }

    /// Set the number of nebula clouds on a wide viewport.
    pub fn with_cloud_count(mut self, count: usize) -> Self {
        self.cloud_count = count;
        self
    }

    /// Set the count multiplier used in compact mode.
    pub fn with_compact_scale(mut self, scale: f32) -> Self {
        self.compact_scale = scale;
        self
    }

    /// Set the viewport width (px) below which compact mode applies.
    pub fn with_compact_width_threshold(mut self, px: f32) -> Self {
        self.compact_width_threshold = px;
        self
    }

    /// Set the range of seconds between particle spawns.
    pub fn with_particle_spawn_interval(mut self, min: f32, max: f32) -> Self {
        self.particle_spawn_interval = (min, max);
        self
    }

    /// Set the range of particle lifetimes in ticks.
    pub fn with_particle_max_age(mut self, min: u32, max: u32) -> Self {
        self.particle_max_age = (min, max);
        self
    }

    /// Set the range of star phase advance per tick.
    pub fn with_twinkle_speed(mut self, min: f32, max: f32) -> Self {
        self.twinkle_speed = (min, max);
        self
    }

    /// Set the per-tick opacity decay of energy waves.
    pub fn with_wave_decay(mut self, decay: f32) -> Self {
        self.wave_decay = decay;
        self
    }

    /// Set the color palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Set the background wash stops.
    pub fn with_background(mut self, stops: Vec<ColorStop>) -> Self {
        self.background = stops;
        self
    }

    /// Use a fixed RNG seed for reproducible fields.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Paint one frame and stop.
    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }

    /// Whether a viewport of this width runs in compact mode.
    #[inline]
    pub fn is_compact(&self, viewport_width: f32) -> bool {
        viewport_width < self.compact_width_threshold
    }

    /// Pool sizes for the given mode.
    pub fn pool_counts(&self, compact: bool) -> PoolCounts {
        let scale = |count: usize| -> usize {
            if compact {
                (count as f32 * self.compact_scale).round() as usize
            } else {
                count
            }
        };
        PoolCounts {
            stars: scale(self.star_count),
            waves: scale(self.wave_count),
            clouds: scale(self.cloud_count),
        }
    }

    /// Check that every range is ordered and every value usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = self.particle_spawn_interval;
        if !(min > 0.0 && max >= min) {
            return Err(ConfigError::Invalid(format!(
                "particle_spawn_interval must satisfy 0 < min <= max, got ({}, {})",
                min, max
            )));
        }
        let (min_age, max_age) = self.particle_max_age;
        if min_age == 0 || max_age < min_age {
            return Err(ConfigError::Invalid(format!(
                "particle_max_age must satisfy 0 < min <= max, got ({}, {})",
                min_age, max_age
            )));
        }
        let (min, max) = self.twinkle_speed;
        if min < 0.0 || max < min {
            return Err(ConfigError::Invalid(format!(
                "twinkle_speed must satisfy 0 <= min <= max, got ({}, {})",
                min, max
            )));
        }
        if !(0.0..=1.0).contains(&self.compact_scale) {
            return Err(ConfigError::Invalid(format!(
                "compact_scale must be within 0..=1, got {}",
                self.compact_scale
            )));
        }
        if self.compact_width_threshold < 0.0 {
            return Err(ConfigError::Invalid("compact_width_threshold must not be negative".into()));
        }
        if self.particle_margin < 0.0 {
            return Err(ConfigError::Invalid("particle_margin must not be negative".into()));
        }
        if self.wave_decay < 0.0 {
            return Err(ConfigError::Invalid("wave_decay must not be negative".into()));
        }
        if self.palette.is_empty() {
            return Err(ConfigError::Invalid("palette must contain at least one color".into()));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: FieldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(FieldConfig::default().validate().is_ok());
    }

    #[test]
    fn test_compact_counts() {
        let config = FieldConfig::new()
            .with_star_count(200)
            .with_wave_count(6)
            .with_cloud_count(8);
        let wide = config.pool_counts(false);
        let compact = config.pool_counts(true);
        assert_eq!(wide, PoolCounts { stars: 200, waves: 6, clouds: 8 });
        assert_eq!(compact, PoolCounts { stars: 100, waves: 3, clouds: 4 });
    }

    #[test]
    fn test_is_compact_threshold() {
        let config = FieldConfig::new().with_compact_width_threshold(768.0);
        assert!(config.is_compact(767.0));
        assert!(!config.is_compact(768.0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = FieldConfig::from_json_str(r#"{ "star_count": 12, "seed": 7 }"#).unwrap();
        assert_eq!(config.star_count, 12);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.wave_count, FieldConfig::default().wave_count);
    }

    #[test]
    fn test_rejects_inverted_interval() {
        let result = FieldConfig::from_json_str(r#"{ "particle_spawn_interval": [3.0, 1.0] }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_empty_palette() {
        let config = FieldConfig::new().with_palette(Palette::new(Vec::new()));
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let result = FieldConfig::from_json_str("{ star_count: }");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
