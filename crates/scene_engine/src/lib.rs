//! # Scene Engine
//!
//! Resource binding for static, shader-driven 3D scenes.
//!
//! ## Features
//!
//! - **Texture Registry**: Up to 16 tagged textures, slot index = texture unit
//! - **Material Registry**: Tagged Phong materials
//! - **Uniform Dispatch**: Per-object model matrix, color or texture, material
//! - **Lighting**: Directional, point and spot lights pushed once per scene
//! - **Scene Files**: Whole scenes described in TOML or RON
//! - **Headless Backend**: A recording context for dry runs and tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     scene_engine::foundation::logging::init_with_level("info");
//!
//!     let codec = FileImageCodec::new(AssetConfig::default());
//!     let mut scene = SceneComposer::from_file(HeadlessContext::new(), Box::new(codec), "scene.toml")?;
//!
//!     scene.prepare()?;
//!     scene.render();
//!     scene.teardown();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::unused_self
)]

pub mod foundation;
pub mod config;
pub mod assets;
pub mod render;
pub mod backend;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        foundation::math::{compose, Mat4, TransformParams, Vec2, Vec3, Vec4},
        config::{AssetConfig, Config, ConfigError},
        assets::{DecodedImage, FileImageCodec, ImageCodec},
        render::{
            Appearance, DrawRequest, GraphicsContext, LightRig, Material, MaterialRegistry,
            MeshParts, MeshShape, TextureRegistry, UniformDispatcher,
        },
        backend::{HeadlessContext, InMemoryCodec},
        scene::{SceneComposer, SceneDescription, SceneError},
    };
}
