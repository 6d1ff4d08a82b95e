//! Procedural sky dome: a large inverted sphere with a vertical gradient

use bytemuck::{Pod, Zeroable};

/// Sky gradient parameters. Must match `SkyParams` in sky.wgsl.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SkyParams {
    /// Zenith color (#87CEEB)
    pub top_color: [f32; 3],
    /// Vertical offset applied before normalizing the view direction
    pub offset: f32,
    /// Horizon color (#E0F6FF)
    pub bottom_color: [f32; 3],
    /// Power-curve exponent shaping the gradient
    pub exponent: f32,
    // Total: 32 bytes
}

impl Default for SkyParams {
    fn default() -> Self {
        Self {
            top_color: [0.529, 0.808, 0.922],
            offset: 33.0,
            bottom_color: [0.878, 0.965, 1.0],
            exponent: 0.6,
        }
    }
}

/// The sky dome geometry plus its gradient parameters.
pub struct SkyDome {
    pub params: SkyParams,
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl SkyDome {
    /// Build the dome: a radius-500 UV sphere, 32 segments each way,
    /// wound so its inside faces the camera.
    pub fn new() -> Self {
        let (positions, indices) = generate_sphere(500.0, 32, 32);
        Self {
            params: SkyParams::default(),
            positions,
            indices,
        }
    }
}

impl Default for SkyDome {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a UV sphere. Triangles are wound counter-clockwise when seen
/// from inside the sphere, since the sky is viewed from within.
fn generate_sphere(radius: f32, segments: u32, rings: u32) -> (Vec<[f32; 3]>, Vec<u32>) {
    let mut positions = Vec::new();
    let mut indices = Vec::new();

    for ring in 0..=rings {
        let phi = std::f32::consts::PI * ring as f32 / rings as f32;
        let (sin_phi, cos_phi) = phi.sin_cos();
        for segment in 0..=segments {
            let theta = std::f32::consts::TAU * segment as f32 / segments as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            positions.push([
                radius * sin_phi * cos_theta,
                radius * cos_phi,
                radius * sin_phi * sin_theta,
            ]);
        }
    }

    let stride = segments + 1;
    for ring in 0..rings {
        for segment in 0..segments {
            let a = ring * stride + segment;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }

    (positions, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sky_params_size() {
        assert_eq!(std::mem::size_of::<SkyParams>(), 32);
        assert_eq!(std::mem::size_of::<SkyParams>() % 16, 0);
    }

    #[test]
    fn test_dome_vertices_on_sphere() {
        let dome = SkyDome::new();
        for p in &dome.positions {
            let r = glam::Vec3::from(*p).length();
            assert!((r - 500.0).abs() < 0.01, "vertex at radius {r}");
        }
    }

    #[test]
    fn test_dome_topology() {
        let dome = SkyDome::new();
        // (rings+1) * (segments+1) vertices, rings * segments quads
        assert_eq!(dome.positions.len(), 33 * 33);
        assert_eq!(dome.indices.len() as u32, 32 * 32 * 6);
        let max = *dome.indices.iter().max().unwrap();
        assert!((max as usize) < dome.positions.len());
    }

    #[test]
    fn test_dome_has_poles() {
        let dome = SkyDome::new();
        let top = dome.positions.iter().any(|p| (p[1] - 500.0).abs() < 0.01);
        let bottom = dome.positions.iter().any(|p| (p[1] + 500.0).abs() < 0.01);
        assert!(top && bottom);
    }
}
