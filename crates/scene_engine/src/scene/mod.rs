//! Scene management
//!
//! A scene is a [`SceneDescription`] (usually read from a file) driven by a
//! [`SceneComposer`] that owns every resource the scene needs.

pub mod description;
pub mod scene_composer;

#[cfg(test)]
mod tests;

pub use description::{SceneDescription, SceneObject, TextureAsset};
pub use scene_composer::{FrameStats, PrepareStats, SceneComposer};

use thiserror::Error;

use crate::config::ConfigError;
use crate::render::DispatchError;

/// Scene setup errors
#[derive(Error, Debug)]
pub enum SceneError {
    /// The scene file could not be read or parsed
    #[error("Scene configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The scene cannot be expressed with the shader's uniforms
    #[error("Scene dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// `prepare` was called twice without a teardown in between
    #[error("Scene is already prepared")]
    AlreadyPrepared,
}
