//! GPU buffers: scene-wide globals, mesh vertex/index data, grass instances

pub mod globals;
pub mod mesh_buffer;

pub use globals::{Globals, GlobalsBuffer};
pub use mesh_buffer::{GrassVertex, MeshBuffer, SkyVertex, TerrainVertex};
