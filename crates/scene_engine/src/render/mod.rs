//! Rendering module
//!
//! The binding layer between a scene description and the graphics context:
//! texture and material registries, uniform dispatch, lighting and the
//! collaborator traits a graphics backend implements.

pub mod backend;
pub mod mesh;
pub mod texture_registry;
pub mod material_registry;
pub mod uniforms;
pub mod lighting;

pub use backend::{
    GraphicsContext, MeshLibrary, ShaderProgram, TextureDevice,
    TextureId, TextureUpload, TextureParams, PixelFormat, FilterMode, WrapMode,
};
pub use mesh::{MeshShape, MeshParts};
pub use texture_registry::{TextureRegistry, TextureSlot, TextureError, MAX_TEXTURE_SLOTS};
pub use material_registry::{Material, MaterialRegistry, MaterialError};
pub use uniforms::{Appearance, DrawRequest, UniformDispatcher, DispatchError};
pub use lighting::{DirectionalLight, PointLight, SpotLight, LightRig, Attenuation, MAX_POINT_LIGHTS};

use thiserror::Error;

/// Rendering system errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// Resource creation or management failed
    ///
    /// Occurs when GPU resources (textures, mesh buffers) cannot be created,
    /// typically due to memory constraints or invalid data.
    #[error("Resource creation failed: {0}")]
    ResourceCreationFailed(String),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
