//! Scene-wide uniform buffer: camera, sun, ambient light, fog

use bytemuck::{Pod, Zeroable};

use crate::core::camera::Camera;
use crate::scene::lights::SceneLights;

/// Scene globals shared by every pipeline (must match WGSL struct layout;
/// WGSL vec3 has 16-byte alignment, so padding is explicit)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Globals {
    /// Camera view-projection matrix (64 bytes, offset 0)
    pub view_proj: [[f32; 4]; 4],
    /// Sun shadow-camera view-projection matrix (64 bytes, offset 64)
    pub sun_view_proj: [[f32; 4]; 4],
    /// Camera position in world space (offset 128)
    pub camera_pos: [f32; 3],
    pub _pad0: f32,
    /// Direction the sun shines along (offset 144)
    pub sun_direction: [f32; 3],
    pub sun_intensity: f32,
    /// Sun color (offset 160)
    pub sun_color: [f32; 3],
    pub ambient_intensity: f32,
    /// Ambient color (offset 176)
    pub ambient_color: [f32; 3],
    pub fog_density: f32,
    /// Fog color (offset 192)
    pub fog_color: [f32; 3],
    pub _pad1: f32,
    // Total: 208 bytes
}

impl Globals {
    /// Assemble globals from the scene's camera, lights, and fog settings
    pub fn new(camera: &Camera, lights: &SceneLights, fog_color: [f32; 3], fog_density: f32) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            sun_view_proj: lights.sun.view_projection().to_cols_array_2d(),
            camera_pos: camera.position.to_array(),
            _pad0: 0.0,
            sun_direction: lights.sun.direction().to_array(),
            sun_intensity: lights.sun.intensity,
            sun_color: lights.sun.color,
            ambient_intensity: lights.ambient.intensity,
            ambient_color: lights.ambient.color,
            fog_density,
            fog_color,
            _pad1: 0.0,
        }
    }
}

/// GPU buffer + bind group for the scene globals
pub struct GlobalsBuffer {
    buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl GlobalsBuffer {
    pub fn new(device: &wgpu::Device) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals_uniform"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            buffer,
            bind_group_layout,
            bind_group,
        }
    }

    /// Update buffer contents for the frame
    pub fn update(&self, queue: &wgpu::Queue, globals: &Globals) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(globals));
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::lights::SceneLights;

    #[test]
    fn test_globals_size() {
        assert_eq!(std::mem::size_of::<Globals>(), 208);
        assert_eq!(std::mem::size_of::<Globals>() % 16, 0);
    }

    #[test]
    fn test_globals_from_scene_state() {
        let camera = Camera::default();
        let lights = SceneLights::default();
        let globals = Globals::new(&camera, &lights, [0.9, 0.9, 0.9], 0.05);

        assert_eq!(globals.camera_pos, camera.position.to_array());
        assert_eq!(globals.fog_density, 0.05);
        assert_eq!(globals.sun_intensity, 2.0);
        // Direction is normalized
        let d = glam::Vec3::from(globals.sun_direction);
        assert!((d.length() - 1.0).abs() < 1e-6);
    }
}
