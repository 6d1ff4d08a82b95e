//! Render pipelines: shadow pass, sky dome, terrain, instanced grass

pub mod grass;
pub mod shadow;
pub mod sky;
pub mod terrain;

pub use grass::{GrassDraw, GrassPipeline};
pub use shadow::ShadowPipeline;
pub use sky::SkyPipeline;
pub use terrain::{TerrainMaterial, TerrainPipeline};
