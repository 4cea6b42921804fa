//! Image loading utilities for texture data
//!
//! Decodes PNG and JPEG images into tightly packed RGBA8 pixels.

use std::path::Path;

use crate::assets::AssetError;

/// Loaded image data ready for GPU upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Raw RGBA pixel data, rows top to bottom
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of color channels (always 4)
    pub channels: u8,
}

impl ImageData {
    /// Load an image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        if !path.exists() {
            return Err(AssetError::NotFound(origin));
        }

        let bytes = std::fs::read(path).map_err(|e| AssetError::io(origin.clone(), e))?;
        Self::decode(&bytes, &origin)
    }

    /// Load image from memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        Self::decode(bytes, "<memory>")
    }

    pub(crate) fn decode(bytes: &[u8], origin: &str) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes).map_err(|e| {
            AssetError::io(origin, std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::debug!("Decoded image {}x{} from {}", width, height, origin);

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
            channels: 4,
        })
    }

    /// Create a solid color image
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = width as usize * height as usize;
        let data = color.repeat(pixel_count);

        Self {
            data,
            width,
            height,
            channels: 4,
        }
    }

    /// Size of the pixel data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_color_image() {
        let img = ImageData::solid_color(4, 2, [255, 0, 0, 255]);
        assert_eq!(img.width, 4);
        assert_eq!(img.height, 2);
        assert_eq!(img.size_bytes(), 4 * 2 * 4);
        assert_eq!(&img.data[0..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let result = ImageData::from_bytes(b"definitely not a png");
        assert!(matches!(result, Err(AssetError::Io { .. })));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let result = ImageData::from_file("this/file/does/not/exist.png");
        assert!(matches!(result, Err(AssetError::NotFound(_))));
    }
}
