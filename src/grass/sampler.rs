//! Weighted random sampling of points on a mesh surface.
//!
//! Triangles are weighted by area times the mesh's vertex-color red
//! channel (a painted density mask on the terrain), so grass follows the
//! mask. Meshes without vertex colors fall back to pure area weighting.

use glam::Vec3;
use rand::Rng;

use crate::assets::mesh::MeshData;
use crate::core::error::Error;

/// Draws random (position, normal) pairs from a triangle mesh surface.
pub struct SurfaceSampler {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
    /// Cumulative triangle weights for inverse-CDF selection
    cumulative: Vec<f32>,
    total_weight: f32,
}

impl SurfaceSampler {
    /// Build a sampler over the given mesh.
    ///
    /// Fails if the mesh has no triangles with positive weight (fully
    /// degenerate geometry, or a density mask that is zero everywhere).
    pub fn new(mesh: &MeshData) -> Result<Self, Error> {
        let positions: Vec<Vec3> = mesh.positions.iter().map(|p| Vec3::from(*p)).collect();
        let normals: Vec<Vec3> = mesh.normals.iter().map(|n| Vec3::from(*n)).collect();
        let use_colors = mesh.has_colors();

        let mut triangles = Vec::with_capacity(mesh.triangle_count());
        let mut cumulative = Vec::with_capacity(mesh.triangle_count());
        let mut total_weight = 0.0f32;

        for tri in mesh.indices.chunks_exact(3) {
            let [i0, i1, i2] = [tri[0], tri[1], tri[2]];
            let area = 0.5
                * (positions[i1 as usize] - positions[i0 as usize])
                    .cross(positions[i2 as usize] - positions[i0 as usize])
                    .length();

            let mut weight = area;
            if use_colors {
                let density = (mesh.colors[i0 as usize][0]
                    + mesh.colors[i1 as usize][0]
                    + mesh.colors[i2 as usize][0])
                    / 3.0;
                weight *= density;
            }

            total_weight += weight.max(0.0);
            triangles.push([i0, i1, i2]);
            cumulative.push(total_weight);
        }

        if total_weight <= 0.0 {
            return Err(Error::Asset(format!(
                "{}: no sampleable surface (zero total weight)",
                mesh.name
            )));
        }

        Ok(Self {
            positions,
            normals,
            triangles,
            cumulative,
            total_weight,
        })
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Draw one uniformly-weighted random sample from the surface.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> (Vec3, Vec3) {
        let r = rng.random::<f32>() * self.total_weight;
        let idx = self
            .cumulative
            .partition_point(|&c| c <= r)
            .min(self.triangles.len() - 1);
        let [i0, i1, i2] = self.triangles[idx];

        // Uniform barycentric point via the square-root trick
        let r1 = rng.random::<f32>().sqrt();
        let r2 = rng.random::<f32>();
        let (w0, w1, w2) = (1.0 - r1, r1 * (1.0 - r2), r1 * r2);

        let p = self.positions[i0 as usize] * w0
            + self.positions[i1 as usize] * w1
            + self.positions[i2 as usize] * w2;
        let n = (self.normals[i0 as usize] * w0
            + self.normals[i1 as usize] * w1
            + self.normals[i2 as usize] * w2)
            .normalize_or(self.face_normal(idx));

        (p, n)
    }

    fn face_normal(&self, idx: usize) -> Vec3 {
        let [i0, i1, i2] = self.triangles[idx];
        (self.positions[i1 as usize] - self.positions[i0 as usize])
            .cross(self.positions[i2 as usize] - self.positions[i0 as usize])
            .normalize_or(Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Two triangles in the XZ plane: x in [0,1] and x in [1,2].
    fn two_tri_mesh(colors: Option<[f32; 2]>) -> MeshData {
        let mut mesh = MeshData {
            name: "strip".into(),
            positions: vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0],
                [1.0, 0.0, 1.0],
                [2.0, 0.0, 0.0],
                [2.0, 0.0, 1.0],
            ],
            normals: vec![[0.0, 1.0, 0.0]; 6],
            uvs: vec![],
            colors: vec![],
            indices: vec![0, 2, 1, 1, 5, 4],
        };
        if let Some([w0, w1]) = colors {
            // First triangle uses vertices 0,2,1; second uses 1,5,4.
            // Vertex 1 is shared, so weighting the second triangle only
            // requires w0 on all of the first triangle's corners.
            mesh.colors = vec![
                [w0, 0.0, 0.0],
                [w0, 0.0, 0.0],
                [w0, 0.0, 0.0],
                [w1, 0.0, 0.0],
                [w1, 0.0, 0.0],
                [w1, 0.0, 0.0],
            ];
        }
        mesh
    }

    #[test]
    fn test_samples_lie_on_surface() {
        let sampler = SurfaceSampler::new(&two_tri_mesh(None)).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..200 {
            let (p, n) = sampler.sample(&mut rng);
            assert_eq!(p.y, 0.0);
            assert!((0.0..=2.0).contains(&p.x));
            assert!((0.0..=1.0).contains(&p.z));
            assert!((n - Vec3::Y).length() < 1e-5);
        }
    }

    #[test]
    fn test_zero_weight_triangle_never_sampled() {
        // First triangle painted to zero density: every sample must land
        // on the second (x >= 1).
        let mesh = two_tri_mesh(Some([0.0, 1.0]));
        let sampler = SurfaceSampler::new(&mesh).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..500 {
            let (p, _) = sampler.sample(&mut rng);
            assert!(p.x >= 1.0, "sampled zero-weight triangle at {p:?}");
        }
    }

    #[test]
    fn test_all_zero_mask_is_error() {
        let mesh = two_tri_mesh(Some([0.0, 0.0]));
        assert!(matches!(
            SurfaceSampler::new(&mesh),
            Err(Error::Asset(_))
        ));
    }

    #[test]
    fn test_deterministic_with_seed() {
        let sampler = SurfaceSampler::new(&two_tri_mesh(None)).unwrap();
        let mut a = ChaCha8Rng::seed_from_u64(7);
        let mut b = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            assert_eq!(sampler.sample(&mut a), sampler.sample(&mut b));
        }
    }
}
