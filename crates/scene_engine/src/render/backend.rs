//! Backend abstraction traits for the rendering system
//!
//! The binding layer only talks to the graphics context through these
//! traits: named uniform setters on the active shader program, texture
//! creation and unit binding, and opaque mesh draw calls.

use serde::{Deserialize, Serialize};

use super::{MeshParts, MeshShape, RenderResult};
use crate::foundation::math::{Mat4, Vec2, Vec3, Vec4};

/// Handle for a GPU texture resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Texture filtering modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterMode {
    /// Nearest neighbor filtering
    Nearest,
    /// Linear filtering
    Linear,
}

/// Texture wrapping modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WrapMode {
    /// Repeat the texture
    Repeat,
    /// Mirror the texture
    MirroredRepeat,
    /// Clamp to edge
    ClampToEdge,
}

/// Texture sampling parameters, applied to both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureParams {
    /// Minification and magnification filter
    pub filter_mode: FilterMode,
    /// Wrap mode for S and T
    pub wrap_mode: WrapMode,
    /// Generate mipmaps after upload
    pub generate_mipmaps: bool,
}

impl Default for TextureParams {
    fn default() -> Self {
        Self {
            filter_mode: FilterMode::Linear,
            wrap_mode: WrapMode::Repeat,
            generate_mipmaps: true,
        }
    }
}

/// Pixel layouts the registry knows how to upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 8-bit RGB
    Rgb8,
    /// 8-bit RGBA, supports transparency
    Rgba8,
}

impl PixelFormat {
    /// Pick the upload format for a decoded channel count
    pub const fn from_channels(channels: u8) -> Option<Self> {
        match channels {
            3 => Some(Self::Rgb8),
            4 => Some(Self::Rgba8),
            _ => None,
        }
    }

    /// Number of channels per pixel
    pub const fn channels(self) -> u8 {
        match self {
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }
}

/// Everything a backend needs to create one 2D texture
#[derive(Debug, Clone, Copy)]
pub struct TextureUpload<'a> {
    /// Pixel rows, `width * height * format.channels()` bytes
    pub pixels: &'a [u8],
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel layout
    pub format: PixelFormat,
    /// Sampling parameters
    pub params: TextureParams,
}

/// Named uniform setters of the currently bound shader program
///
/// Each call overwrites one uniform. Nothing is batched and the program keeps
/// whatever was written last until the next write to the same name.
pub trait ShaderProgram {
    /// Set a 4x4 matrix uniform
    fn set_mat4(&mut self, name: &str, value: &Mat4);

    /// Set a vec4 uniform
    fn set_vec4(&mut self, name: &str, value: Vec4);

    /// Set a vec3 uniform
    fn set_vec3(&mut self, name: &str, value: Vec3);

    /// Set a vec2 uniform
    fn set_vec2(&mut self, name: &str, value: Vec2);

    /// Set a float uniform
    fn set_float(&mut self, name: &str, value: f32);

    /// Set an int uniform
    fn set_int(&mut self, name: &str, value: i32);

    /// Set a bool uniform
    fn set_bool(&mut self, name: &str, value: bool);

    /// Point a sampler2D uniform at a texture unit
    fn set_sampler_2d(&mut self, name: &str, unit: i32);
}

/// Texture storage and unit binding
pub trait TextureDevice {
    /// Allocate a texture, upload the pixels and configure sampling
    fn create_texture(&mut self, upload: &TextureUpload<'_>) -> RenderResult<TextureId>;

    /// Bind a texture to a texture unit
    fn bind_texture_unit(&mut self, unit: u32, texture: TextureId);

    /// Release a texture
    fn delete_texture(&mut self, texture: TextureId);
}

/// Primitive mesh collaborator
///
/// Draw calls are immediate and opaque: whatever uniforms are set on the
/// shader at the time of the call are what the mesh is drawn with.
pub trait MeshLibrary {
    /// Create the GPU buffers for a shape; called once per shape
    fn load_mesh(&mut self, shape: MeshShape);

    /// Draw a previously loaded shape
    fn draw_mesh(&mut self, shape: MeshShape, parts: MeshParts);
}

/// A complete graphics context: shader, textures and meshes
pub trait GraphicsContext: ShaderProgram + TextureDevice + MeshLibrary {}

impl<T: ShaderProgram + TextureDevice + MeshLibrary + ?Sized> GraphicsContext for T {}

impl<T: ShaderProgram + ?Sized> ShaderProgram for &mut T {
    fn set_mat4(&mut self, name: &str, value: &Mat4) {
        (**self).set_mat4(name, value);
    }

    fn set_vec4(&mut self, name: &str, value: Vec4) {
        (**self).set_vec4(name, value);
    }

    fn set_vec3(&mut self, name: &str, value: Vec3) {
        (**self).set_vec3(name, value);
    }

    fn set_vec2(&mut self, name: &str, value: Vec2) {
        (**self).set_vec2(name, value);
    }

    fn set_float(&mut self, name: &str, value: f32) {
        (**self).set_float(name, value);
    }

    fn set_int(&mut self, name: &str, value: i32) {
        (**self).set_int(name, value);
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        (**self).set_bool(name, value);
    }

    fn set_sampler_2d(&mut self, name: &str, unit: i32) {
        (**self).set_sampler_2d(name, unit);
    }
}

impl<T: TextureDevice + ?Sized> TextureDevice for &mut T {
    fn create_texture(&mut self, upload: &TextureUpload<'_>) -> RenderResult<TextureId> {
        (**self).create_texture(upload)
    }

    fn bind_texture_unit(&mut self, unit: u32, texture: TextureId) {
        (**self).bind_texture_unit(unit, texture);
    }

    fn delete_texture(&mut self, texture: TextureId) {
        (**self).delete_texture(texture);
    }
}

impl<T: MeshLibrary + ?Sized> MeshLibrary for &mut T {
    fn load_mesh(&mut self, shape: MeshShape) {
        (**self).load_mesh(shape);
    }

    fn draw_mesh(&mut self, shape: MeshShape, parts: MeshParts) {
        (**self).draw_mesh(shape, parts);
    }
}
