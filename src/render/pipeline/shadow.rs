//! Depth-only shadow pass from the sun's point of view

use crate::render::buffer::{MeshBuffer, TerrainVertex};
use crate::render::texture::ShadowMap;

/// Renders shadow casters (the terrain) into the sun's depth map.
pub struct ShadowPipeline {
    pipeline: wgpu::RenderPipeline,
}

impl ShadowPipeline {
    pub fn new(device: &wgpu::Device, globals_layout: &wgpu::BindGroupLayout) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shadow_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../../../shaders/shadow.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("shadow_pipeline_layout"),
            bind_group_layouts: &[globals_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("shadow_pipeline"),
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
                format: ShadowMap::FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                // Bias pushes casters away to avoid self-shadow acne
                bias: wgpu::DepthBiasState {
                    constant: 2,
                    slope_scale: 2.0,
                    clamp: 0.0,
                },
            }),
            multisample: wgpu::MultisampleState::default(),
            // Depth-only: no fragment stage, no color targets
            fragment: None,
            multiview_mask: None,
            cache: None,
        });

        Self { pipeline }
    }

    /// Render the shadow map for this frame
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        shadow_map: &ShadowMap,
        globals_bind_group: &wgpu::BindGroup,
        casters: &[&MeshBuffer],
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("shadow_pass"),
            color_attachments: &[],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: shadow_map.view(),
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, globals_bind_group, &[]);
        for caster in casters {
            pass.set_vertex_buffer(0, caster.vertex_buffer.slice(..));
            pass.set_index_buffer(caster.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..caster.index_count, 0, 0..1);
        }
    }
}
