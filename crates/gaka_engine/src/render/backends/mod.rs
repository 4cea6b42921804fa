//! Backend implementations for the render module
//!
//! The workspace ships a headless recording backend. Driver-backed devices
//! implement the same [`GraphicsDevice`](crate::render::api::GraphicsDevice)
//! trait outside this crate.

/// Headless backend that records every device call
pub mod recording;

pub use recording::{DeviceCommand, MeshKey, ProgramKey, RecordingDevice, TextureKey};
