//! GPU texture resources: depth buffer, shadow map, uploaded scene textures

pub mod depth;
pub mod scene_texture;
pub mod shadow_map;

pub use depth::DepthTexture;
pub use scene_texture::SceneTexture;
pub use shadow_map::ShadowMap;
