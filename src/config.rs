//! Visualizer configuration.
//!
//! Constant for the lifetime of a visualizer. Build with chained `with_*`
//! calls and check with [`VisualizerConfig::validate`]:
//!
//! ```ignore
//! let config = VisualizerConfig::new()
//!     .with_particle_count(400)
//!     .with_animation_speed(1.5)
//!     .validate()?;
//! ```

use glam::Vec3;

use crate::error::ConfigError;

/// Default nominal particle count.
pub const DEFAULT_PARTICLE_COUNT: u32 = 100;

/// Default animation speed multiplier.
pub const DEFAULT_ANIMATION_SPEED: f32 = 1.0;

/// wgpu's default `max_buffer_size` (256 MiB).
const MAX_FIELD_BYTES: u64 = 256 << 20;

/// Largest nominal particle count. Clear skies hold `2 * N` positions in one
/// vertex buffer, which must fit [`MAX_FIELD_BYTES`].
pub const MAX_PARTICLE_COUNT: u32 = (MAX_FIELD_BYTES / (2 * std::mem::size_of::<Vec3>() as u64)) as u32;

/// Settings consumed by [`WeatherVisualizer`](crate::WeatherVisualizer).
#[derive(Debug, Clone, PartialEq)]
pub struct VisualizerConfig {
    /// When false, `init` does nothing and no renderer is ever created.
    pub enabled: bool,
    /// Nominal particle count `N`. Rain and snow use `N`, clouds `N / 2`,
    /// clear skies `2 * N`.
    pub particle_count: u32,
    /// Multiplier on per-frame fall and drift speeds.
    pub animation_speed: f32,
}

impl VisualizerConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self {
            enabled: true,
            particle_count: DEFAULT_PARTICLE_COUNT,
            animation_speed: DEFAULT_ANIMATION_SPEED,
        }
    }

    /// Turn the background on or off.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the nominal particle count.
    pub fn with_particle_count(mut self, count: u32) -> Self {
        self.particle_count = count;
        self
    }

    /// Set the animation speed multiplier.
    pub fn with_animation_speed(mut self, speed: f32) -> Self {
        self.animation_speed = speed;
        self
    }

    /// Check the settings, returning them unchanged if usable.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::ZeroParticleCount);
        }
        if self.particle_count > MAX_PARTICLE_COUNT {
            return Err(ConfigError::TooManyParticles(self.particle_count));
        }
        if !self.animation_speed.is_finite() || self.animation_speed < 0.0 {
            return Err(ConfigError::InvalidAnimationSpeed(self.animation_speed));
        }
        Ok(self)
    }
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VisualizerConfig::default();
        assert!(config.enabled);
        assert_eq!(config.particle_count, 100);
        assert_eq!(config.animation_speed, 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let config = VisualizerConfig::new()
            .with_enabled(false)
            .with_particle_count(7)
            .with_animation_speed(0.25);
        assert!(!config.enabled);
        assert_eq!(config.particle_count, 7);
        assert_eq!(config.animation_speed, 0.25);
    }

    #[test]
    fn test_zero_particles_rejected() {
        let result = VisualizerConfig::new().with_particle_count(0).validate();
        assert_eq!(result, Err(ConfigError::ZeroParticleCount));
    }

    #[test]
    fn test_too_many_particles_rejected() {
        let result = VisualizerConfig::new().with_particle_count(20_000_000).validate();
        assert_eq!(result, Err(ConfigError::TooManyParticles(20_000_000)));
        assert!(VisualizerConfig::new().with_particle_count(u32::MAX).validate().is_err());

        let largest = VisualizerConfig::new().with_particle_count(MAX_PARTICLE_COUNT);
        assert!(largest.validate().is_ok());
        assert!(VisualizerConfig::new()
            .with_particle_count(MAX_PARTICLE_COUNT + 1)
            .validate()
            .is_err());
    }

    #[test]
    fn test_largest_clear_field_fits_one_buffer() {
        let bytes = 2 * MAX_PARTICLE_COUNT as u64 * std::mem::size_of::<Vec3>() as u64;
        assert!(bytes <= MAX_FIELD_BYTES);
        assert!(bytes + 2 * std::mem::size_of::<Vec3>() as u64 > MAX_FIELD_BYTES);
        assert!(2 * (MAX_PARTICLE_COUNT as u64) < u32::MAX as u64);
    }

    #[test]
    fn test_bad_speed_rejected() {
        assert!(VisualizerConfig::new().with_animation_speed(-1.0).validate().is_err());
        assert!(VisualizerConfig::new().with_animation_speed(f32::NAN).validate().is_err());
        assert!(VisualizerConfig::new().with_animation_speed(f32::INFINITY).validate().is_err());
        // Zero speed freezes falling particles but is allowed
        assert!(VisualizerConfig::new().with_animation_speed(0.0).validate().is_ok());
    }
}
