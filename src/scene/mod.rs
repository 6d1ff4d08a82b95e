//! Scene ownership: configuration, lights, sky dome, lifecycle manager

pub mod config;
pub mod lights;
pub mod manager;
pub mod sky;

pub use config::SceneConfig;
pub use manager::{LifecycleState, SceneManager, SceneUpdate};
