//! Remote asset pipeline: HTTP fetch, glTF/image decode, ordered loading

pub mod fetch;
pub mod loader;
pub mod mesh;
pub mod texture;

pub use fetch::AssetUrls;
pub use loader::{AssetLoader, LoadEvent, LoadStage};
pub use mesh::MeshData;
pub use texture::TextureData;
