//! Window management subsystem
//!
//! The renderer never talks to a windowing library directly. Applications drive
//! a [`Window`] implementation, react to the [`WindowEvent`]s it reports and
//! read its [`WindowState`] snapshot.
//!
//! # Module Organization
//!
//! - **`headless`**: scripted window used by tests and offscreen runs
//! - **`glfw_backend`**: native input-only window (`glfw-window` feature)

pub mod headless;
#[cfg(feature = "glfw-window")]
pub mod glfw_backend;

pub use headless::HeadlessWindow;
#[cfg(feature = "glfw-window")]
pub use glfw_backend::GlfwWindow;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::foundation::math::Vec2;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// The windowing library could not be initialized
    #[error("Window system initialization failed: {0}")]
    InitializationFailed(String),

    /// The native window could not be created
    #[error("Window creation failed")]
    CreationFailed,
}

/// Buffer swap synchronisation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VSyncMode {
    /// Present immediately
    Disabled,
    /// Wait for one vertical blank
    #[default]
    DoubleBuffering,
    /// Adaptive synchronisation where supported
    TripleBuffering,
}

/// Snapshot of the window's observable state
#[derive(Debug, Clone, PartialEq)]
pub struct WindowState {
    /// Framebuffer width in pixels
    pub width: u32,
    /// Framebuffer height in pixels
    pub height: u32,
    /// Whether the window covers a monitor
    pub fullscreen: bool,
    /// Presentation mode
    pub vsync: VSyncMode,
    /// Whether the cursor is captured for mouse-look
    pub mouse_locked: bool,
    /// Cursor motion reported by the last poll, y pointing up
    pub mouse_delta: Vec2,
}

impl WindowState {
    /// State for a freshly created window
    pub fn new(width: u32, height: u32, fullscreen: bool, vsync: VSyncMode) -> Self {
        Self {
            width,
            height,
            fullscreen,
            vsync,
            mouse_locked: false,
            mouse_delta: Vec2::zeros(),
        }
    }
}

/// Keys the demos react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Q
    Q,
    /// Escape
    Escape,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Page up
    PageUp,
    /// Page down
    PageDown,
    /// Any other key
    Other,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button
    Left,
    /// Secondary button
    Right,
    /// Wheel button
    Middle,
}

/// Input and window-system notifications
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    /// The user asked to close the window
    Quit,
    /// A key was pressed or auto-repeated
    KeyPressed(Key),
    /// A mouse button was pressed
    MouseButtonPressed(MouseButton),
    /// Vertical wheel motion
    Scrolled(f32),
    /// The framebuffer changed size
    Resized(u32, u32),
    /// Cursor motion in pixels, y pointing up
    MouseMoved(f32, f32),
}

/// Window collaborator driven once per frame by the application loop
pub trait Window {
    /// Current state snapshot
    fn state(&self) -> &WindowState;

    /// Window title
    fn title(&self) -> &str;

    /// Change the window title
    fn set_title(&mut self, title: &str);

    /// Capture or release the cursor
    fn toggle_mouse_lock(&mut self);

    /// Collect the events that happened since the last poll
    fn poll_events(&mut self) -> Vec<WindowEvent>;

    /// Present the frame
    fn update(&mut self);
}
