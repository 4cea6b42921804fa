//! # Unified Configuration System
//!
//! All configuration structures for the engine and its demo applications.
//!
//! ## Configuration Categories
//!
//! - **Engine Config**: logging
//! - **Window Config**: title, size, presentation mode
//! - **Renderer Config**: clear color and clip planes
//! - **Asset Config**: resource root directory

use serde::{Serialize, Deserialize};

pub use crate::config::{Config, ConfigError};
use crate::render::window::VSyncMode;

/// # Engine Configuration
///
/// Core engine behavior shared by every subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Window Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Initial framebuffer width in pixels
    pub width: u32,
    /// Initial framebuffer height in pixels
    pub height: u32,
    /// Start in fullscreen on the primary monitor
    pub fullscreen: bool,
    /// Presentation mode
    pub vsync: VSyncMode,
    /// Number of frames a headless window runs before requesting quit
    pub headless_frames: u32,
}

impl WindowConfig {
    /// Create a new window configuration
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: VSyncMode::DoubleBuffering,
            headless_frames: 240,
        }
    }

    /// Set the initial size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Enable or disable fullscreen
    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    /// Set the presentation mode
    pub fn with_vsync(mut self, vsync: VSyncMode) -> Self {
        self.vsync = vsync;
        self
    }

    /// Set how many frames a headless run lasts
    pub fn with_headless_frames(mut self, frames: u32) -> Self {
        self.headless_frames = frames;
        self
    }

    /// Width over height, as used for the projection matrix
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!("Window size must be non-zero, got {}x{}", self.width, self.height));
        }
        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new("Gaka")
    }
}

/// # Renderer Configuration
///
/// Frame clearing and projection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// RGBA color the color buffer is cleared to every frame
    pub clear_color: [f32; 4],
    /// Near clip plane distance
    pub near_plane: f32,
    /// Far clip plane distance
    pub far_plane: f32,
}

impl RendererConfig {
    /// Create a new renderer configuration
    pub fn new() -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.0, 1.0],
            near_plane: 0.5,
            far_plane: 1000.0,
        }
    }

    /// Set the clear color
    pub fn with_clear_color(mut self, color: [f32; 4]) -> Self {
        self.clear_color = color;
        self
    }

    /// Set the clip planes
    pub fn with_clip_planes(mut self, near: f32, far: f32) -> Self {
        self.near_plane = near;
        self.far_plane = far;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.near_plane <= 0.0 {
            return Err(format!("Near plane must be positive, got {}", self.near_plane));
        }
        if self.far_plane <= self.near_plane {
            return Err(format!(
                "Far plane ({}) must lie beyond the near plane ({})",
                self.far_plane, self.near_plane
            ));
        }
        Ok(())
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Asset Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Base directory for assets, relative to the working directory
    pub assets_dir: String,
}

impl AssetConfig {
    /// Create a new asset configuration
    pub fn new() -> Self {
        Self {
            assets_dir: "resources".to_string(),
        }
    }

    /// Set assets directory
    pub fn with_assets_dir(mut self, dir: impl Into<String>) -> Self {
        self.assets_dir = dir.into();
        self
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all engine subsystems.
/// This is the main configuration structure applications should use.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Window configuration
    pub window: WindowConfig,
    /// Rendering system configuration
    pub renderer: RendererConfig,
    /// Asset system configuration
    pub assets: AssetConfig,
}

impl ApplicationConfig {
    /// Create a new application configuration with defaults
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            window: WindowConfig::new(app_name),
            ..Self::default()
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), String> {
        self.window.validate()?;
        self.renderer.validate()?;
        Ok(())
    }
}

impl Config for ApplicationConfig {}
