//! Scene lighting: one ambient light plus one shadow-casting sun

use glam::{Mat4, Vec3};

/// Uniform ambient fill light
#[derive(Clone, Debug)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            intensity: 0.5,
        }
    }
}

/// Shadow frustum settings for the directional light
#[derive(Clone, Debug)]
pub struct ShadowSettings {
    /// Half-extent of the orthographic frustum in world units
    pub extent: f32,
    /// Far plane distance of the shadow camera
    pub far: f32,
    /// Shadow map resolution (square)
    pub map_size: u32,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            extent: 50.0,
            far: 200.0,
            map_size: 2048,
        }
    }
}

/// Shadow-casting directional light
#[derive(Clone, Debug)]
pub struct DirectionalLight {
    pub color: [f32; 3],
    pub intensity: f32,
    /// Light position; the light looks toward the origin
    pub position: Vec3,
    pub shadow: ShadowSettings,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            intensity: 2.0,
            position: Vec3::new(100.0, 100.0, 100.0),
            shadow: ShadowSettings::default(),
        }
    }
}

impl DirectionalLight {
    /// Normalized direction the light shines along (toward the origin)
    pub fn direction(&self) -> Vec3 {
        (-self.position).normalize()
    }

    /// View-projection matrix of the shadow camera
    pub fn view_projection(&self) -> Mat4 {
        let e = self.shadow.extent;
        let proj = Mat4::orthographic_rh(-e, e, -e, e, 0.1, self.shadow.far);
        let view = Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y);
        proj * view
    }
}

/// The scene's complete light set
#[derive(Clone, Debug, Default)]
pub struct SceneLights {
    pub ambient: AmbientLight,
    pub sun: DirectionalLight,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sun_direction_normalized() {
        let sun = DirectionalLight::default();
        assert!((sun.direction().length() - 1.0).abs() < 1e-6);
        // Points down toward the scene
        assert!(sun.direction().y < 0.0);
    }

    #[test]
    fn test_shadow_frustum_contains_origin() {
        let sun = DirectionalLight::default();
        let clip = sun.view_projection().project_point3(Vec3::ZERO);
        assert!(clip.x.abs() <= 1.0 && clip.y.abs() <= 1.0);
        assert!((0.0..=1.0).contains(&clip.z));
    }

    #[test]
    fn test_shadow_frustum_excludes_far_points() {
        let sun = DirectionalLight::default();
        // A point well outside the +/-50 unit extent
        let clip = sun.view_projection().project_point3(Vec3::new(500.0, 0.0, -500.0));
        assert!(clip.x.abs() > 1.0 || clip.y.abs() > 1.0);
    }

    #[test]
    fn test_defaults() {
        let lights = SceneLights::default();
        assert_eq!(lights.ambient.intensity, 0.5);
        assert_eq!(lights.sun.intensity, 2.0);
        assert_eq!(lights.sun.shadow.map_size, 2048);
    }
}
