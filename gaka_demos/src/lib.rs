//! Demo applications for the Gaka engine
//!
//! The binaries only pick a scene and a configuration file; the event loop,
//! the scenes and their procedural geometry live here so they can be tested.

pub mod application;
pub mod geometry;
pub mod scenes;

pub use application::{launch, Application, Demo, DemoError, WheelAction};
