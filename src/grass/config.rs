//! Grass configuration (user-facing settings).
//!
//! Wind and shading constants live here as named configuration rather
//! than shader literals, so a scene can tune them without editing WGSL.

/// Wind animation settings fed to the grass vertex stage.
#[derive(Clone, Debug)]
pub struct WindConfig {
    /// Horizontal wind direction (normalized in the shader)
    pub direction: [f32; 2],
    /// Maximum horizontal tip displacement in world units
    pub amplitude: f32,
    /// Spatial frequency of the sway wave across the field
    pub frequency: f32,
    /// Temporal speed of the sway wave
    pub speed: f32,
    /// How strongly the noise texture perturbs the wave phase
    pub noise_factor: f32,
    /// Scroll speed of the noise lookup
    pub noise_speed: f32,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            direction: [1.0, 1.0],
            amplitude: 0.1,
            frequency: 50.0,
            speed: 1.0,
            noise_factor: 5.5,
            noise_speed: 0.001,
        }
    }
}

/// User-facing grass configuration.
#[derive(Clone, Debug)]
pub struct GrassConfig {
    /// Number of blade instances placed on the terrain
    pub count: u32,
    /// Seed for surface sampling and yaw randomization
    pub seed: u64,
    /// Name marker selecting the highest-detail blade sub-mesh
    pub lod_marker: String,
    /// Uniform scale applied to the blade geometry after decode
    pub blade_scale: f32,
    /// Terrain extent used to derive the global noise UV
    pub terrain_size: f32,
    /// Whether the fragment stage accumulates shadow-map occlusion
    pub enable_shadows: bool,
    /// How dark fully-occluded grass gets (0 = black, 1 = unshadowed)
    pub shadow_darkness: f32,
    /// Flat light multiplier applied to the blade albedo
    pub light_intensity: f32,
    /// Tiling factor for the color-variation noise lookup
    pub noise_scale: f32,
    /// Color at the blade root (#313f1b)
    pub base_color: [f32; 3],
    /// First tip color (#9bd38d)
    pub tip_color1: [f32; 3],
    /// Second tip color (#1f352a)
    pub tip_color2: [f32; 3],
    /// Wind animation settings
    pub wind: WindConfig,
}

impl Default for GrassConfig {
    fn default() -> Self {
        Self {
            count: 8000,
            seed: 42,
            lod_marker: "LOD00".to_string(),
            blade_scale: 5.0,
            terrain_size: 100.0,
            enable_shadows: true,
            shadow_darkness: 0.5,
            light_intensity: 0.7,
            noise_scale: 2.4,
            base_color: [0.192, 0.247, 0.106],
            tip_color1: [0.608, 0.827, 0.553],
            tip_color2: [0.122, 0.208, 0.165],
            wind: WindConfig::default(),
        }
    }
}
