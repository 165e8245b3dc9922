//! Headless graphics context
//!
//! Records every shader write, texture operation and draw call instead of
//! talking to a GPU. Used for dry runs of a scene and for tests, where the
//! recorded state stands in for "what the shader would have seen".

use std::collections::{BTreeMap, HashMap};

use crate::assets::{AssetError, DecodedImage, ImageCodec};
use crate::foundation::math::{Mat4, Vec2, Vec3, Vec4};
use crate::render::{
    MeshLibrary, MeshParts, MeshShape, PixelFormat, RenderError, RenderResult, ShaderProgram,
    TextureDevice, TextureId, TextureParams, TextureUpload,
};

/// A value written to a named uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// mat4
    Mat4(Mat4),
    /// vec4
    Vec4(Vec4),
    /// vec3
    Vec3(Vec3),
    /// vec2
    Vec2(Vec2),
    /// float
    Float(f32),
    /// int
    Int(i32),
    /// bool
    Bool(bool),
    /// sampler2D unit
    Sampler(i32),
}

/// A texture held by the headless context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessTexture {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Upload format
    pub format: PixelFormat,
    /// Sampling parameters
    pub params: TextureParams,
    /// Number of mip levels, including the base level
    pub mip_levels: u32,
}

/// One recorded draw call with the uniform state it was drawn with
#[derive(Debug, Clone)]
pub struct DrawRecord {
    /// Shape drawn
    pub shape: MeshShape,
    /// Sub-parts drawn
    pub parts: MeshParts,
    /// Uniform values live at the time of the draw
    pub uniforms: HashMap<String, UniformValue>,
}

impl DrawRecord {
    /// Uniform value at draw time
    pub fn uniform(&self, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(name)
    }
}

/// Recording graphics context
#[derive(Debug)]
pub struct HeadlessContext {
    uniforms: HashMap<String, UniformValue>,
    uniform_log: Vec<(String, UniformValue)>,
    textures: HashMap<TextureId, HeadlessTexture>,
    next_texture: u32,
    bound_units: BTreeMap<u32, TextureId>,
    deleted_textures: Vec<TextureId>,
    loaded_meshes: Vec<MeshShape>,
    draws: Vec<DrawRecord>,
}

impl Default for HeadlessContext {
    fn default() -> Self {
        Self {
            uniforms: HashMap::new(),
            uniform_log: Vec::new(),
            textures: HashMap::new(),
            // 0 is never a valid texture name
            next_texture: 1,
            bound_units: BTreeMap::new(),
            deleted_textures: Vec::new(),
            loaded_meshes: Vec::new(),
            draws: Vec::new(),
        }
    }
}

impl HeadlessContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    fn write(&mut self, name: &str, value: UniformValue) {
        log::trace!("uniform {} = {:?}", name, value);
        self.uniforms.insert(name.to_string(), value);
        self.uniform_log.push((name.to_string(), value));
    }

    /// Current value of a uniform
    pub fn uniform(&self, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(name)
    }

    /// Current value of a bool uniform
    pub fn bool_uniform(&self, name: &str) -> Option<bool> {
        match self.uniforms.get(name)? {
            UniformValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Current value of a float uniform
    pub fn float_uniform(&self, name: &str) -> Option<f32> {
        match self.uniforms.get(name)? {
            UniformValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Current unit of a sampler uniform
    pub fn sampler_uniform(&self, name: &str) -> Option<i32> {
        match self.uniforms.get(name)? {
            UniformValue::Sampler(unit) => Some(*unit),
            _ => None,
        }
    }

    /// Current value of a matrix uniform
    pub fn mat4_uniform(&self, name: &str) -> Option<Mat4> {
        match self.uniforms.get(name)? {
            UniformValue::Mat4(value) => Some(*value),
            _ => None,
        }
    }

    /// Current value of a vec3 uniform
    pub fn vec3_uniform(&self, name: &str) -> Option<Vec3> {
        match self.uniforms.get(name)? {
            UniformValue::Vec3(value) => Some(*value),
            _ => None,
        }
    }

    /// Every uniform write, in order
    pub fn uniform_log(&self) -> &[(String, UniformValue)] {
        &self.uniform_log
    }

    /// A live texture
    pub fn texture(&self, id: TextureId) -> Option<&HeadlessTexture> {
        self.textures.get(&id)
    }

    /// Number of textures created and not yet deleted
    pub fn live_texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Texture bound to a unit
    pub fn bound_texture(&self, unit: u32) -> Option<TextureId> {
        self.bound_units.get(&unit).copied()
    }

    /// Textures released so far
    pub fn deleted_textures(&self) -> &[TextureId] {
        &self.deleted_textures
    }

    /// Shapes loaded, in load order
    pub fn loaded_meshes(&self) -> &[MeshShape] {
        &self.loaded_meshes
    }

    /// Recorded draw calls
    pub fn draws(&self) -> &[DrawRecord] {
        &self.draws
    }
}

impl ShaderProgram for HeadlessContext {
    fn set_mat4(&mut self, name: &str, value: &Mat4) {
        self.write(name, UniformValue::Mat4(*value));
    }

    fn set_vec4(&mut self, name: &str, value: Vec4) {
        self.write(name, UniformValue::Vec4(value));
    }

    fn set_vec3(&mut self, name: &str, value: Vec3) {
        self.write(name, UniformValue::Vec3(value));
    }

    fn set_vec2(&mut self, name: &str, value: Vec2) {
        self.write(name, UniformValue::Vec2(value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.write(name, UniformValue::Float(value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.write(name, UniformValue::Int(value));
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.write(name, UniformValue::Bool(value));
    }

    fn set_sampler_2d(&mut self, name: &str, unit: i32) {
        self.write(name, UniformValue::Sampler(unit));
    }
}

impl TextureDevice for HeadlessContext {
    fn create_texture(&mut self, upload: &TextureUpload<'_>) -> RenderResult<TextureId> {
        let expected = upload.width as usize * upload.height as usize * upload.format.channels() as usize;
        if upload.width == 0 || upload.height == 0 || upload.pixels.len() != expected {
            return Err(RenderError::ResourceCreationFailed(format!(
                "texture data is {} bytes, expected {} for {}x{} {:?}",
                upload.pixels.len(),
                expected,
                upload.width,
                upload.height,
                upload.format
            )));
        }

        let mip_levels = if upload.params.generate_mipmaps {
            u32::BITS - upload.width.max(upload.height).leading_zeros()
        } else {
            1
        };

        let id = TextureId(self.next_texture);
        self.next_texture += 1;
        self.textures.insert(
            id,
            HeadlessTexture {
                width: upload.width,
                height: upload.height,
                format: upload.format,
                params: upload.params,
                mip_levels,
            },
        );
        Ok(id)
    }

    fn bind_texture_unit(&mut self, unit: u32, texture: TextureId) {
        self.bound_units.insert(unit, texture);
    }

    fn delete_texture(&mut self, texture: TextureId) {
        if self.textures.remove(&texture).is_some() {
            self.bound_units.retain(|_, bound| *bound != texture);
            self.deleted_textures.push(texture);
        }
    }
}

impl MeshLibrary for HeadlessContext {
    fn load_mesh(&mut self, shape: MeshShape) {
        self.loaded_meshes.push(shape);
    }

    fn draw_mesh(&mut self, shape: MeshShape, parts: MeshParts) {
        self.draws.push(DrawRecord {
            shape,
            parts,
            uniforms: self.uniforms.clone(),
        });
    }
}

/// Codec serving images registered in memory by path
#[derive(Debug, Clone, Default)]
pub struct InMemoryCodec {
    images: HashMap<String, DecodedImage>,
}

impl InMemoryCodec {
    /// Create an empty codec
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image under a path
    pub fn insert(&mut self, path: impl Into<String>, image: DecodedImage) {
        self.images.insert(path.into(), image);
    }

    /// Builder-style [`InMemoryCodec::insert`]
    #[must_use]
    pub fn with_image(mut self, path: impl Into<String>, image: DecodedImage) -> Self {
        self.insert(path, image);
        self
    }
}

impl ImageCodec for InMemoryCodec {
    fn decode(&self, path: &str) -> Result<DecodedImage, AssetError> {
        self.images
            .get(path)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }
}
