//! Image loading utilities for texture data
//!
//! Decodes PNG and JPEG files with the `image` crate while keeping the
//! source channel layout, so the texture registry can decide whether it
//! knows how to upload the result.

use std::path::{Path, PathBuf};

use super::{AssetError, ImageCodec};
use crate::config::AssetConfig;

/// Decoded image data ready for GPU upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Tightly packed 8-bit pixel rows
    pub pixels: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of color channels per pixel
    pub channels: u8,
}

impl DecodedImage {
    /// Create a solid color image (useful for testing and defaults)
    ///
    /// The number of channels is the length of `color`.
    pub fn solid_color(width: u32, height: u32, color: &[u8]) -> Self {
        let pixel_count = width as usize * height as usize;

        Self {
            pixels: color.repeat(pixel_count),
            width,
            height,
            channels: u8::try_from(color.len()).unwrap_or(u8::MAX),
        }
    }

    /// Get the size of the image data in bytes
    pub fn size_bytes(&self) -> usize {
        self.pixels.len()
    }
}

/// Codec that reads images from disk
///
/// Relative paths are looked up in each configured search path in order,
/// falling back to the path as given.
#[derive(Debug, Clone, Default)]
pub struct FileImageCodec {
    config: AssetConfig,
}

impl FileImageCodec {
    /// Create a codec using the given asset configuration
    pub const fn new(config: AssetConfig) -> Self {
        Self { config }
    }

    fn resolve_path(&self, path: &str) -> PathBuf {
        let requested = Path::new(path);
        if requested.is_absolute() {
            return requested.to_path_buf();
        }

        self.config
            .search_paths
            .iter()
            .map(|dir| Path::new(dir).join(requested))
            .find(|candidate| candidate.exists())
            .unwrap_or_else(|| requested.to_path_buf())
    }
}

impl ImageCodec for FileImageCodec {
    fn decode(&self, path: &str) -> Result<DecodedImage, AssetError> {
        let file_path = self.resolve_path(path);
        if !file_path.exists() {
            return Err(AssetError::NotFound(path.to_string()));
        }

        log::debug!("Loading image from: {:?}", file_path);

        let bytes = std::fs::read(&file_path)?;
        let mut img = image::load_from_memory(&bytes)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to load image {path}: {e}")))?;

        if self.config.flip_vertically {
            img = img.flipv();
        }

        let channels = img.color().channel_count();
        let (width, height) = (img.width(), img.height());

        // Keep the source layout; 16-bit and float images are narrowed to 8 bits
        let pixels = match channels {
            1 => img.into_luma8().into_raw(),
            2 => img.into_luma_alpha8().into_raw(),
            3 => img.into_rgb8().into_raw(),
            _ => img.into_rgba8().into_raw(),
        };

        log::info!(
            "Loaded image {}, width:{}, height:{}, channels:{}",
            path, width, height, channels
        );

        Ok(DecodedImage {
            pixels,
            width,
            height,
            channels,
        })
    }
}
