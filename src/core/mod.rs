//! Core utilities: errors, logging, frame timing, camera, input

pub mod camera;
pub mod camera_controller;
pub mod error;
pub mod input;
pub mod logging;
pub mod time;

pub use error::Error;
