//! Asset loading
//!
//! The binding layer never touches file formats directly. Images come in
//! through an [`ImageCodec`], which turns a path into raw pixel rows plus the
//! dimensions and channel count needed to pick a GPU upload format.

pub mod image_loader;

pub use image_loader::{DecodedImage, FileImageCodec};

use thiserror::Error;

/// Image decoding collaborator
pub trait ImageCodec {
    /// Decode the image stored at `path`
    fn decode(&self, path: &str) -> Result<DecodedImage, AssetError>;
}

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// IO error during asset loading
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
