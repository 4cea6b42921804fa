//! Resource provider
//!
//! Resolves asset paths against a root directory (relative to the working
//! directory unless absolute) and reads them as text, bytes or images.

use std::path::{Path, PathBuf};

use crate::assets::{AssetError, ImageData};
use crate::core::AssetConfig;

/// Reads assets from a root directory
#[derive(Debug, Clone)]
pub struct ResourceManager {
    root: PathBuf,
}

impl ResourceManager {
    /// Create a resource manager rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        log::info!("Resource root: {}", root.display());
        Self { root }
    }

    /// Create a resource manager from the asset configuration
    pub fn from_config(config: &AssetConfig) -> Self {
        Self::new(&config.assets_dir)
    }

    /// Root directory assets are resolved against
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a relative asset path to a path on disk
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    fn existing(&self, path: &Path) -> Result<PathBuf, AssetError> {
        let resolved = self.resolve(path);
        if resolved.exists() {
            Ok(resolved)
        } else {
            log::warn!("Asset not found: {}", resolved.display());
            Err(AssetError::NotFound(resolved.display().to_string()))
        }
    }

    /// Read a text asset
    pub fn read_string(&self, path: impl AsRef<Path>) -> Result<String, AssetError> {
        let resolved = self.existing(path.as_ref())?;
        log::trace!("Reading text asset {}", resolved.display());
        std::fs::read_to_string(&resolved)
            .map_err(|e| AssetError::io(resolved.display().to_string(), e))
    }

    /// Read a binary asset
    pub fn read_binary(&self, path: impl AsRef<Path>) -> Result<Vec<u8>, AssetError> {
        let resolved = self.existing(path.as_ref())?;
        log::trace!("Reading binary asset {}", resolved.display());
        std::fs::read(&resolved).map_err(|e| AssetError::io(resolved.display().to_string(), e))
    }

    /// Read and decode an image asset to RGBA8
    pub fn read_image(&self, path: impl AsRef<Path>) -> Result<ImageData, AssetError> {
        let path = path.as_ref();
        let bytes = self.read_binary(path)?;
        ImageData::decode(&bytes, &self.resolve(path).display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gaka_assets_{}_{name}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_read_string() {
        let dir = scratch_dir("text");
        std::fs::write(dir.join("hello.txt"), "hello shader").unwrap();

        let resources = ResourceManager::new(&dir);
        assert_eq!(resources.read_string("hello.txt").unwrap(), "hello shader");
        assert_eq!(resources.read_binary("hello.txt").unwrap(), b"hello shader");
    }

    #[test]
    fn test_missing_asset_is_not_found() {
        let resources = ResourceManager::new(scratch_dir("missing"));
        let result = resources.read_string("shaders/nothing.vert");
        assert!(matches!(result, Err(AssetError::NotFound(ref p)) if p.ends_with("nothing.vert")));
    }

    #[test]
    fn test_directory_read_is_io_error() {
        let dir = scratch_dir("directory");
        std::fs::create_dir_all(dir.join("folder")).unwrap();

        let resources = ResourceManager::new(&dir);
        assert!(matches!(resources.read_binary("folder"), Err(AssetError::Io { .. })));
    }

    #[test]
    fn test_undecodable_image() {
        let dir = scratch_dir("image");
        std::fs::write(dir.join("broken.png"), [0u8, 1, 2, 3]).unwrap();

        let resources = ResourceManager::new(&dir);
        assert!(matches!(resources.read_image("broken.png"), Err(AssetError::Io { .. })));
    }
}
