//! Graphics backends
//!
//! Only a headless, recording backend ships with the engine; real GPU
//! contexts implement [`crate::render::GraphicsContext`] in the embedding
//! application.

pub mod headless;

pub use headless::{HeadlessContext, InMemoryCodec, DrawRecord, UniformValue, HeadlessTexture};
