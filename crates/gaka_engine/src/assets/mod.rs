//! Asset loading
//!
//! Everything the engine reads from disk (shader sources, textures) goes through
//! a [`ResourceManager`] rooted at the configured asset directory.

pub mod image_loader;
pub mod resource_manager;

pub use image_loader::ImageData;
pub use resource_manager::ResourceManager;

use thiserror::Error;

/// Asset loading errors
#[derive(Debug, Error)]
pub enum AssetError {
    /// No file exists at the resolved path
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// The file exists but could not be read or decoded
    #[error("IO error while reading {path}: {source}")]
    Io {
        /// Resolved path of the asset
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl AssetError {
    pub(crate) fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
