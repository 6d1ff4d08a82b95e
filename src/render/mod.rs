//! GPU rendering: context, buffers, textures, pipelines

pub mod buffer;
pub mod context;
pub mod pipeline;
pub mod texture;
