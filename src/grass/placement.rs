//! One-shot grass instance placement.
//!
//! Each blade gets a rigid transform: position from a weighted surface
//! sample, orientation aligning blade-up (+Y) to the sampled surface
//! normal followed by a uniform-random yaw about the blade axis, and
//! unit scale (the blade geometry itself is pre-scaled at decode time).

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::grass::sampler::SurfaceSampler;

/// Per-instance data uploaded to the instance vertex buffer.
/// Must match the instance attributes in grass.wgsl.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct GrassInstance {
    /// Column-major model matrix
    pub model: [[f32; 4]; 4],
}

/// Compose a blade transform from a surface sample and a yaw angle.
///
/// The yaw is applied in blade-local space, so the rotated up-axis still
/// maps exactly onto the surface normal.
pub fn blade_transform(position: Vec3, normal: Vec3, yaw: f32) -> Mat4 {
    let align = Quat::from_rotation_arc(Vec3::Y, normal.normalize());
    let rotation = align * Quat::from_rotation_y(yaw);
    Mat4::from_rotation_translation(rotation, position)
}

/// Place `count` blades on the sampled surface.
///
/// Deterministic for a given seed; O(count).
pub fn place_blades(sampler: &SurfaceSampler, count: u32, seed: u64) -> Vec<GrassInstance> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut instances = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let (position, normal) = sampler.sample(&mut rng);
        let yaw = rng.random::<f32>() * std::f32::consts::TAU;
        instances.push(GrassInstance {
            model: blade_transform(position, normal, yaw).to_cols_array_2d(),
        });
    }
    instances
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::mesh::MeshData;

    fn slope_mesh() -> MeshData {
        // A tilted quad so sampled normals are not axis-aligned
        MeshData {
            name: "slope".into(),
            positions: vec![
                [0.0, 0.0, 0.0],
                [2.0, 1.0, 0.0],
                [2.0, 1.0, 2.0],
                [0.0, 0.0, 2.0],
            ],
            normals: vec![[-0.4472136, 0.8944272, 0.0]; 4],
            uvs: vec![],
            colors: vec![],
            indices: vec![0, 2, 1, 0, 3, 2],
        }
    }

    #[test]
    fn test_instance_count_exact() {
        let sampler = SurfaceSampler::new(&slope_mesh()).unwrap();
        let instances = place_blades(&sampler, 8000, 42);
        assert_eq!(instances.len(), 8000);
    }

    #[test]
    fn test_up_axis_maps_to_surface_normal() {
        let normal = Vec3::new(-0.4472136, 0.8944272, 0.0);
        for yaw in [0.0, 0.7, 2.9, 5.5] {
            let m = blade_transform(Vec3::new(1.0, 0.5, 1.0), normal, yaw);
            let up = m.transform_vector3(Vec3::Y);
            assert!(
                (up - normal).length() < 1e-5,
                "yaw {yaw}: up {up:?} != normal {normal:?}"
            );
        }
    }

    #[test]
    fn test_transform_preserves_position_and_scale() {
        let position = Vec3::new(3.0, -1.0, 2.5);
        let m = blade_transform(position, Vec3::Y, 1.2);
        assert!((m.transform_point3(Vec3::ZERO) - position).length() < 1e-6);
        // Rigid transform: unit vectors stay unit length
        assert!((m.transform_vector3(Vec3::X).length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_yaw_roughly_uniform() {
        // With up = +Y the blade's rotated X axis directly encodes the yaw.
        // Bucket 8000 draws into quadrants; a uniform yaw puts ~2000 in
        // each (fixed seed, so no flakiness).
        let flat = MeshData {
            name: "flat".into(),
            positions: vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 0.0, 1.0],
                [0.0, 0.0, 1.0],
            ],
            normals: vec![[0.0, 1.0, 0.0]; 4],
            uvs: vec![],
            colors: vec![],
            indices: vec![0, 2, 1, 0, 3, 2],
        };
        let sampler = SurfaceSampler::new(&flat).unwrap();
        let instances = place_blades(&sampler, 8000, 123);

        let mut buckets = [0u32; 4];
        for inst in &instances {
            let m = Mat4::from_cols_array_2d(&inst.model);
            let x_axis = m.transform_vector3(Vec3::X);
            let angle = x_axis.z.atan2(x_axis.x).rem_euclid(std::f32::consts::TAU);
            let quadrant = (angle / std::f32::consts::FRAC_PI_2) as usize % 4;
            buckets[quadrant] += 1;
        }
        for (i, &b) in buckets.iter().enumerate() {
            assert!(
                (1700..=2300).contains(&b),
                "quadrant {i} has {b} of 8000 samples"
            );
        }
    }
}
