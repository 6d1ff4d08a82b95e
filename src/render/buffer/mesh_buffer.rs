//! Vertex/index buffers built from decoded mesh data

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::assets::mesh::MeshData;

/// Terrain vertex: position + normal (flat color comes from a uniform)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl TerrainVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Grass blade vertex: position + normal + UV (V runs root=1 to tip=0)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct GrassVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl GrassVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Sky dome vertex: position only
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SkyVertex {
    pub position: [f32; 3],
}

impl SkyVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Uploaded vertex + index buffers for one mesh
pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl MeshBuffer {
    /// Build terrain buffers (position + normal)
    pub fn terrain(device: &wgpu::Device, mesh: &MeshData) -> Self {
        let vertices: Vec<TerrainVertex> = mesh
            .positions
            .iter()
            .zip(&mesh.normals)
            .map(|(p, n)| TerrainVertex {
                position: *p,
                normal: *n,
            })
            .collect();
        Self::upload(device, "terrain", bytemuck::cast_slice(&vertices), &mesh.indices)
    }

    /// Build grass blade buffers (position + normal + uv).
    /// Blades without UVs get a height-derived V so wind attenuation and
    /// the color ramp still work.
    pub fn grass_blade(device: &wgpu::Device, mesh: &MeshData) -> Self {
        let max_y = mesh
            .positions
            .iter()
            .map(|p| p[1])
            .fold(f32::EPSILON, f32::max);
        let vertices: Vec<GrassVertex> = mesh
            .positions
            .iter()
            .enumerate()
            .map(|(i, p)| GrassVertex {
                position: *p,
                normal: mesh.normals[i],
                uv: if mesh.has_uvs() {
                    mesh.uvs[i]
                } else {
                    [0.5, 1.0 - p[1] / max_y]
                },
            })
            .collect();
        Self::upload(device, "grass_blade", bytemuck::cast_slice(&vertices), &mesh.indices)
    }

    /// Build sky dome buffers (position only)
    pub fn sky(device: &wgpu::Device, positions: &[[f32; 3]], indices: &[u32]) -> Self {
        let vertices: Vec<SkyVertex> = positions
            .iter()
            .map(|p| SkyVertex { position: *p })
            .collect();
        Self::upload(device, "sky", bytemuck::cast_slice(&vertices), indices)
    }

    fn upload(device: &wgpu::Device, label: &str, vertex_data: &[u8], indices: &[u32]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_vertices")),
            contents: vertex_data,
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_indices")),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_sizes() {
        assert_eq!(std::mem::size_of::<TerrainVertex>(), 24);
        assert_eq!(std::mem::size_of::<GrassVertex>(), 32);
        assert_eq!(std::mem::size_of::<SkyVertex>(), 12);
    }

    #[test]
    fn test_layout_strides_match_struct_sizes() {
        assert_eq!(
            TerrainVertex::layout().array_stride as usize,
            std::mem::size_of::<TerrainVertex>()
        );
        assert_eq!(
            GrassVertex::layout().array_stride as usize,
            std::mem::size_of::<GrassVertex>()
        );
        assert_eq!(
            SkyVertex::layout().array_stride as usize,
            std::mem::size_of::<SkyVertex>()
        );
    }
}
