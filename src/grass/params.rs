//! GPU-ready grass uniform (96 bytes, 16-byte aligned).
//!
//! Time is the only field mutated per frame; everything else is fixed at
//! construction from `GrassConfig`.

use bytemuck::{Pod, Zeroable};

/// GPU uniform for the grass shader. Must match `GrassParams` in grass.wgsl.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct GrassParams {
    pub base_color: [f32; 3],
    pub time: f32,
    // -- 16 bytes --
    pub tip_color1: [f32; 3],
    pub noise_scale: f32,
    // -- 16 bytes --
    pub tip_color2: [f32; 3],
    pub light_intensity: f32,
    // -- 16 bytes --
    pub wind_direction: [f32; 2],
    pub wind_amplitude: f32,
    pub wind_frequency: f32,
    // -- 16 bytes --
    pub wind_speed: f32,
    pub noise_factor: f32,
    pub noise_speed: f32,
    pub terrain_size: f32,
    // -- 16 bytes --
    pub enable_shadows: u32,
    pub shadow_darkness: f32,
    pub _pad: [f32; 2],
    // -- 16 bytes --
    // Total: 96 bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grass_params_size() {
        assert_eq!(std::mem::size_of::<GrassParams>(), 96);
    }

    #[test]
    fn test_grass_params_alignment() {
        assert_eq!(std::mem::size_of::<GrassParams>() % 16, 0);
    }

    #[test]
    fn test_bytemuck_cast() {
        let p = GrassParams::zeroed();
        let bytes = bytemuck::bytes_of(&p);
        assert_eq!(bytes.len(), 96);
    }
}
