//! Flat-colored terrain pipeline with shadow-mapped sun lighting

use bytemuck::{Pod, Zeroable};

use crate::render::buffer::{MeshBuffer, TerrainVertex};
use crate::render::texture::DepthTexture;

/// Terrain material uniform. Must match `TerrainMaterial` in terrain.wgsl.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct TerrainMaterial {
    pub color: [f32; 3],
    pub _pad: f32,
    // Total: 16 bytes
}

impl TerrainMaterial {
    pub fn new(color: [f32; 3]) -> Self {
        Self { color, _pad: 0.0 }
    }
}

/// Renders the terrain mesh with its flat replacement material; the
/// terrain receives the sun's shadow map.
pub struct TerrainPipeline {
    pipeline: wgpu::RenderPipeline,
    material_buffer: wgpu::Buffer,
    material_bind_group: wgpu::BindGroup,
}

impl TerrainPipeline {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        globals_layout: &wgpu::BindGroupLayout,
        shadow_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("terrain_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../../../shaders/terrain.wgsl").into()),
        });

        let material_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("terrain_material"),
            size: std::mem::size_of::<TerrainMaterial>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let material_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("terrain_material_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let material_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("terrain_material_bg"),
            layout: &material_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: material_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("terrain_pipeline_layout"),
            bind_group_layouts: &[globals_layout, &material_layout, shadow_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("terrain_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[TerrainVertex::layout()],
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DepthTexture::FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            material_buffer,
            material_bind_group,
        }
    }

    /// Update the flat material color
    pub fn update_material(&self, queue: &wgpu::Queue, material: &TerrainMaterial) {
        queue.write_buffer(&self.material_buffer, 0, bytemuck::bytes_of(material));
    }

    /// Draw the terrain into the current forward pass
    pub fn draw(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        globals_bind_group: &wgpu::BindGroup,
        shadow_bind_group: &wgpu::BindGroup,
        terrain: &MeshBuffer,
    ) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, globals_bind_group, &[]);
        pass.set_bind_group(1, &self.material_bind_group, &[]);
        pass.set_bind_group(2, shadow_bind_group, &[]);
        pass.set_vertex_buffer(0, terrain.vertex_buffer.slice(..));
        pass.set_index_buffer(terrain.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..terrain.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_size() {
        assert_eq!(std::mem::size_of::<TerrainMaterial>(), 16);
    }
}
