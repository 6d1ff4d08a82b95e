//! Instanced grass system.
//!
//! Owns the grass configuration and the per-frame shading parameters for
//! the wind/color shader. Placement is a one-shot batch: once the terrain
//! surface and the blade geometry are both available, `placement` samples
//! the surface and builds the immutable instance transform table.

pub mod config;
pub mod params;
pub mod placement;
pub mod sampler;

pub use config::{GrassConfig, WindConfig};
pub use params::GrassParams;
pub use placement::{place_blades, GrassInstance};
pub use sampler::SurfaceSampler;

/// Manages grass configuration and builds per-frame GPU params.
pub struct GrassSystem {
    config: GrassConfig,
    time: f32,
}

impl GrassSystem {
    pub fn new(config: GrassConfig) -> Self {
        Self { config, time: 0.0 }
    }

    pub fn config(&self) -> &GrassConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut GrassConfig {
        &mut self.config
    }

    /// Per-frame update: advances the shared time value and nothing else.
    pub fn update(&mut self, time: f32) {
        self.time = time;
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Build GPU-ready params from current config and elapsed time.
    pub fn build_params(&self) -> GrassParams {
        let c = &self.config;
        GrassParams {
            base_color: c.base_color,
            time: self.time,
            tip_color1: c.tip_color1,
            noise_scale: c.noise_scale,
            tip_color2: c.tip_color2,
            light_intensity: c.light_intensity,
            wind_direction: c.wind.direction,
            wind_amplitude: c.wind.amplitude,
            wind_frequency: c.wind.frequency,
            wind_speed: c.wind.speed,
            noise_factor: c.wind.noise_factor,
            noise_speed: c.wind.noise_speed,
            terrain_size: c.terrain_size,
            enable_shadows: u32::from(c.enable_shadows),
            shadow_darkness: c.shadow_darkness,
            _pad: [0.0; 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = GrassConfig::default();
        assert_eq!(cfg.count, 8000);
        assert!(cfg.enable_shadows);
    }

    #[test]
    fn test_build_params() {
        let mut sys = GrassSystem::new(GrassConfig::default());
        sys.update(1.5);
        let params = sys.build_params();
        assert_eq!(params.time, 1.5);
        assert_eq!(params.enable_shadows, 1);
        assert_eq!(params.terrain_size, 100.0);
    }

    #[test]
    fn test_update_touches_only_time() {
        let mut sys = GrassSystem::new(GrassConfig::default());
        let before = sys.build_params();
        sys.update(7.0);
        let after = sys.build_params();
        assert_eq!(after.time, 7.0);
        assert_eq!(after.base_color, before.base_color);
        assert_eq!(after.wind_frequency, before.wind_frequency);
    }

    #[test]
    fn test_shadows_disabled() {
        let mut sys = GrassSystem::new(GrassConfig::default());
        sys.config_mut().enable_shadows = false;
        assert_eq!(sys.build_params().enable_shadows, 0);
    }
}
