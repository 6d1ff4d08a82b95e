//! Scene configuration

use glam::Vec3;

use crate::assets::AssetUrls;
use crate::grass::GrassConfig;

/// Configuration for the grass field scene
#[derive(Clone, Debug)]
pub struct SceneConfig {
    /// Remote asset locations
    pub urls: AssetUrls,
    /// Initial camera position
    pub initial_camera_pos: Vec3,
    /// Point the orbit controls revolve around
    pub orbit_target: Vec3,
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    /// Background and fog color (#eeeeee)
    pub fog_color: [f32; 3],
    /// Exponential-squared fog density
    pub fog_density: f32,
    /// Flat terrain color (#5e875e)
    pub terrain_color: [f32; 3],
    /// Uniform scale applied to the terrain geometry after decode
    pub terrain_scale: f32,
    /// Grass settings
    pub grass: GrassConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            urls: AssetUrls::default(),
            initial_camera_pos: Vec3::new(21.43, 4.51, -7.31),
            orbit_target: Vec3::ZERO,
            fov_y_degrees: 75.0,
            fog_color: [0.933, 0.933, 0.933],
            fog_density: 0.045989,
            terrain_color: [0.369, 0.529, 0.369],
            terrain_scale: 3.0,
            grass: GrassConfig::default(),
        }
    }
}
