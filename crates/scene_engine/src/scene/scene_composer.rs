//! Scene composer
//!
//! Owns the graphics context, both registries and the scene description,
//! and turns the description into GPU resources once (`prepare`) and into
//! draw calls every frame (`render`).

use super::{SceneDescription, SceneError};
use crate::assets::ImageCodec;
use crate::config::Config;
use crate::render::{GraphicsContext, MaterialRegistry, TextureRegistry, UniformDispatcher};

/// Outcome of [`SceneComposer::prepare`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrepareStats {
    /// Textures loaded and bound
    pub textures_loaded: usize,
    /// Textures that failed to load
    pub texture_failures: usize,
    /// Materials registered
    pub materials_registered: usize,
    /// Distinct meshes loaded
    pub meshes_loaded: usize,
}

/// Outcome of one [`SceneComposer::render`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Objects drawn
    pub objects_drawn: usize,
    /// Objects drawn with at least one unresolved texture or material tag
    pub resolution_misses: usize,
}

/// Prepares and draws a static scene
pub struct SceneComposer<G: GraphicsContext> {
    context: G,
    codec: Box<dyn ImageCodec>,
    textures: TextureRegistry,
    materials: MaterialRegistry,
    dispatcher: UniformDispatcher,
    description: SceneDescription,
    prepared: bool,
}

impl<G: GraphicsContext> SceneComposer<G> {
    /// Create a composer; nothing touches the context until `prepare`
    pub fn new(context: G, codec: Box<dyn ImageCodec>, description: SceneDescription) -> Self {
        Self {
            context,
            codec,
            textures: TextureRegistry::new(),
            materials: MaterialRegistry::new(),
            dispatcher: UniformDispatcher::new(),
            description,
            prepared: false,
        }
    }

    /// Create a composer from a TOML or RON scene file
    pub fn from_file(context: G, codec: Box<dyn ImageCodec>, path: &str) -> Result<Self, SceneError> {
        let description = SceneDescription::load_from_file(path)?;
        log::info!(
            "Loaded scene {}: {} textures, {} materials, {} objects",
            path,
            description.textures.len(),
            description.materials.len(),
            description.objects.len()
        );
        Ok(Self::new(context, codec, description))
    }

    /// Push lights, load textures, register materials and load meshes
    ///
    /// A texture that fails to load is logged and skipped; objects using its
    /// tag are still drawn. Lighting that the shader cannot represent is an
    /// error and leaves the composer untouched.
    pub fn prepare(&mut self) -> Result<PrepareStats, SceneError> {
        if self.prepared {
            return Err(SceneError::AlreadyPrepared);
        }

        // Nothing is uploaded for a rig the shader cannot hold
        self.dispatcher
            .set_lighting(&mut self.context, &self.description.lights)?;

        let mut stats = PrepareStats::default();

        for asset in &self.description.textures {
            match self
                .textures
                .load(&mut self.context, self.codec.as_ref(), &asset.path, &asset.tag)
            {
                Ok(_) => stats.textures_loaded += 1,
                Err(e) => {
                    log::warn!("Skipping texture '{}': {}", asset.tag, e);
                    stats.texture_failures += 1;
                }
            }
        }
        self.textures.bind_all(&mut self.context);

        for material in &self.description.materials {
            self.materials.register_material(material.clone());
        }
        stats.materials_registered = self.materials.len();

        for shape in self.description.shapes() {
            self.context.load_mesh(shape);
            stats.meshes_loaded += 1;
        }

        self.prepared = true;
        log::info!(
            "Scene prepared: {} textures ({} failed), {} materials, {} meshes",
            stats.textures_loaded,
            stats.texture_failures,
            stats.materials_registered,
            stats.meshes_loaded
        );
        Ok(stats)
    }

    /// Draw every object once, in description order
    pub fn render(&mut self) -> FrameStats {
        if !self.prepared {
            log::warn!("Rendering a scene that has not been prepared");
        }

        let mut stats = FrameStats::default();
        for object in &self.description.objects {
            let request = object.draw_request();
            if let Err(e) = self.dispatcher.submit(
                &mut self.context,
                &self.textures,
                &self.materials,
                &request,
            ) {
                log::warn!("Object '{}': {}", object.name, e);
                stats.resolution_misses += 1;
            }
            stats.objects_drawn += 1;
        }

        log::debug!(
            "Frame: {} objects drawn, {} resolution misses",
            stats.objects_drawn, stats.resolution_misses
        );
        stats
    }

    /// Release every texture
    ///
    /// The composer can be prepared again afterwards.
    pub fn teardown(&mut self) {
        self.textures.release_all(&mut self.context);
        self.materials = MaterialRegistry::new();
        self.prepared = false;
        log::info!("Scene torn down");
    }

    /// Whether `prepare` has run since construction or the last teardown
    pub const fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Texture registry
    pub const fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    /// Material registry
    pub const fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    /// Scene description
    pub const fn description(&self) -> &SceneDescription {
        &self.description
    }

    /// Graphics context
    pub const fn context(&self) -> &G {
        &self.context
    }

    /// Mutable graphics context, e.g. for per-frame camera uniforms
    pub fn context_mut(&mut self) -> &mut G {
        &mut self.context
    }
}

impl<G: GraphicsContext> Drop for SceneComposer<G> {
    fn drop(&mut self) {
        if !self.textures.is_empty() {
            log::debug!("Releasing {} textures of a dropped scene", self.textures.len());
            self.textures.release_all(&mut self.context);
        }
    }
}
