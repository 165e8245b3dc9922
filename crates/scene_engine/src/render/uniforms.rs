//! Uniform dispatch
//!
//! Maps "draw this object with this look" onto writes to the shader's
//! well-known uniforms. Each setter touches only the uniforms it documents.
//! Color and texture share the `bUseTexture` flag, so whichever of the two
//! is set last decides how the next draw is shaded.
//!
//! [`UniformDispatcher::submit`] takes a whole [`DrawRequest`] and writes
//! transform, appearance, UV scale and material immediately before issuing
//! the draw, so no per-object state is left to whatever was set earlier.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    LightRig, MaterialError, MaterialRegistry, MeshLibrary, MeshParts, MeshShape, ShaderProgram,
    TextureRegistry, MAX_POINT_LIGHTS,
};
use crate::foundation::math::{Mat4, TransformParams, Vec2, Vec4};

/// Uniform names declared by the scene shader
pub mod names {
    /// Model matrix
    pub const MODEL: &str = "model";
    /// Flat RGBA color
    pub const OBJECT_COLOR: &str = "objectColor";
    /// Texture sampler
    pub const OBJECT_TEXTURE: &str = "objectTexture";
    /// Sample the texture instead of the flat color
    pub const USE_TEXTURE: &str = "bUseTexture";
    /// Apply the light rig
    pub const USE_LIGHTING: &str = "bUseLighting";
    /// Texture coordinate scale
    pub const UV_SCALE: &str = "UVscale";
    /// Material diffuse color
    pub const MATERIAL_DIFFUSE: &str = "material.diffuseColor";
    /// Material specular color
    pub const MATERIAL_SPECULAR: &str = "material.specularColor";
    /// Material specular exponent
    pub const MATERIAL_SHININESS: &str = "material.shininess";
    /// Directional light struct
    pub const DIRECTIONAL_LIGHT: &str = "directionalLight";
    /// Point light array
    pub const POINT_LIGHTS: &str = "pointLights";
    /// Spotlight struct
    pub const SPOT_LIGHT: &str = "spotLight";
}

/// Sampler unit written when a texture tag does not resolve
pub const TEXTURE_UNIT_NOT_FOUND: i32 = -1;

/// How an object's surface color is sourced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Appearance {
    /// Flat RGBA color
    Color(Vec4),
    /// Texture looked up by tag
    Texture(String),
}

/// Everything needed to draw one object
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRequest {
    /// Shape to draw
    pub shape: MeshShape,
    /// Sub-parts to draw
    pub parts: MeshParts,
    /// Placement
    pub transform: TransformParams,
    /// Color or texture
    pub appearance: Appearance,
    /// Texture coordinate scale
    pub uv_scale: Vec2,
    /// Material tag; `None` leaves the current material in place
    pub material: Option<String>,
}

impl DrawRequest {
    /// Create a request with unit UV scale, no material and all parts
    pub fn new(shape: MeshShape, transform: TransformParams, appearance: Appearance) -> Self {
        Self {
            shape,
            parts: MeshParts::default(),
            transform,
            appearance,
            uv_scale: Vec2::new(1.0, 1.0),
            material: None,
        }
    }

    /// Set the material tag
    #[must_use]
    pub fn with_material(mut self, tag: impl Into<String>) -> Self {
        self.material = Some(tag.into());
        self
    }

    /// Set the UV scale
    #[must_use]
    pub fn with_uv_scale(mut self, u: f32, v: f32) -> Self {
        self.uv_scale = Vec2::new(u, v);
        self
    }

    /// Set the sub-parts to draw
    #[must_use]
    pub const fn with_parts(mut self, parts: MeshParts) -> Self {
        self.parts = parts;
        self
    }
}

/// Uniform dispatch errors
///
/// None of these stop a draw. They report that the shader was left with a
/// sentinel or with stale state so the caller can log it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// Texture tag not registered; the sampler was pointed at unit -1
    #[error("Texture not found: {0}")]
    TextureNotFound(String),

    /// Material tag not registered; material uniforms were left unchanged
    #[error("Material not found: {0}")]
    MaterialNotFound(String),

    /// The rig has more point lights than the shader declares
    #[error("Scene has {count} point lights, shader supports {max}")]
    TooManyPointLights {
        /// Point lights in the rig
        count: usize,
        /// Point lights the shader declares
        max: usize,
    },
}

/// Writes per-object and per-scene values into the shader's uniforms
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformDispatcher;

impl UniformDispatcher {
    /// Create a dispatcher
    pub const fn new() -> Self {
        Self
    }

    /// Write the model matrix
    pub fn set_model<S: ShaderProgram + ?Sized>(&self, shader: &mut S, model: &Mat4) {
        shader.set_mat4(names::MODEL, model);
    }

    /// Compose and write the model matrix
    pub fn set_transform<S: ShaderProgram + ?Sized>(&self, shader: &mut S, transform: &TransformParams) {
        self.set_model(shader, &transform.to_matrix());
    }

    /// Shade the next draw with a flat color
    ///
    /// Clears `bUseTexture`.
    pub fn set_color<S: ShaderProgram + ?Sized>(&self, shader: &mut S, color: Vec4) {
        shader.set_bool(names::USE_TEXTURE, false);
        shader.set_vec4(names::OBJECT_COLOR, color);
    }

    /// Shade the next draw with the texture registered under `tag`
    ///
    /// Sets `bUseTexture` and points the sampler at the texture's unit. An
    /// unknown tag still sets the flag but writes [`TEXTURE_UNIT_NOT_FOUND`],
    /// and is reported as [`DispatchError::TextureNotFound`].
    pub fn set_texture<S: ShaderProgram + ?Sized>(
        &self,
        shader: &mut S,
        textures: &TextureRegistry,
        tag: &str,
    ) -> Result<usize, DispatchError> {
        shader.set_bool(names::USE_TEXTURE, true);

        let unit = textures.resolve_unit(tag);
        let sampler = unit
            .and_then(|unit| i32::try_from(unit).ok())
            .unwrap_or(TEXTURE_UNIT_NOT_FOUND);
        shader.set_sampler_2d(names::OBJECT_TEXTURE, sampler);

        unit.ok_or_else(|| DispatchError::TextureNotFound(tag.to_string()))
    }

    /// Write the texture coordinate scale
    pub fn set_uv_scale<S: ShaderProgram + ?Sized>(&self, shader: &mut S, u: f32, v: f32) {
        shader.set_vec2(names::UV_SCALE, Vec2::new(u, v));
    }

    /// Write the material registered under `tag`
    ///
    /// With no materials registered at all this does nothing and succeeds.
    /// An unknown tag writes nothing and is reported.
    pub fn set_material<S: ShaderProgram + ?Sized>(
        &self,
        shader: &mut S,
        materials: &MaterialRegistry,
        tag: &str,
    ) -> Result<(), DispatchError> {
        match materials.resolve(tag) {
            Ok(material) => {
                shader.set_vec3(names::MATERIAL_DIFFUSE, material.diffuse_color);
                shader.set_vec3(names::MATERIAL_SPECULAR, material.specular_color);
                shader.set_float(names::MATERIAL_SHININESS, material.shininess);
                Ok(())
            }
            Err(MaterialError::NotConfigured) => Ok(()),
            Err(MaterialError::NotFound(tag)) => Err(DispatchError::MaterialNotFound(tag)),
        }
    }

    /// Write every light in the rig and enable or disable lighting
    ///
    /// Unused point light slots, and a missing directional light or
    /// spotlight, are written as inactive. A rig with too many point lights is
    /// rejected before anything is written.
    pub fn set_lighting<S: ShaderProgram + ?Sized>(
        &self,
        shader: &mut S,
        rig: &LightRig,
    ) -> Result<(), DispatchError> {
        if rig.point_lights.len() > MAX_POINT_LIGHTS {
            return Err(DispatchError::TooManyPointLights {
                count: rig.point_lights.len(),
                max: MAX_POINT_LIGHTS,
            });
        }

        shader.set_bool(names::USE_LIGHTING, rig.has_lights());

        let dir = names::DIRECTIONAL_LIGHT;
        if let Some(light) = &rig.directional {
            shader.set_vec3(&format!("{dir}.direction"), light.direction);
            shader.set_vec3(&format!("{dir}.ambient"), light.ambient);
            shader.set_vec3(&format!("{dir}.diffuse"), light.diffuse);
            shader.set_vec3(&format!("{dir}.specular"), light.specular);
        }
        shader.set_bool(&format!("{dir}.bActive"), rig.directional.is_some());

        for index in 0..MAX_POINT_LIGHTS {
            let prefix = format!("{}[{index}]", names::POINT_LIGHTS);
            let light = rig.point_lights.get(index);
            if let Some(light) = light {
                shader.set_vec3(&format!("{prefix}.position"), light.position);
                shader.set_vec3(&format!("{prefix}.ambient"), light.ambient);
                shader.set_vec3(&format!("{prefix}.diffuse"), light.diffuse);
                shader.set_vec3(&format!("{prefix}.specular"), light.specular);
                shader.set_float(&format!("{prefix}.constant"), light.attenuation.constant);
                shader.set_float(&format!("{prefix}.linear"), light.attenuation.linear);
                shader.set_float(&format!("{prefix}.quadratic"), light.attenuation.quadratic);
            }
            shader.set_bool(&format!("{prefix}.bActive"), light.is_some());
        }

        let spot = names::SPOT_LIGHT;
        if let Some(light) = &rig.spot {
            if let Some(position) = light.position {
                shader.set_vec3(&format!("{spot}.position"), position);
            }
            if let Some(direction) = light.direction {
                shader.set_vec3(&format!("{spot}.direction"), direction);
            }
            shader.set_vec3(&format!("{spot}.ambient"), light.ambient);
            shader.set_vec3(&format!("{spot}.diffuse"), light.diffuse);
            shader.set_vec3(&format!("{spot}.specular"), light.specular);
            shader.set_float(&format!("{spot}.constant"), light.attenuation.constant);
            shader.set_float(&format!("{spot}.linear"), light.attenuation.linear);
            shader.set_float(&format!("{spot}.quadratic"), light.attenuation.quadratic);
            shader.set_float(&format!("{spot}.cutOff"), light.cut_off_cosine());
            shader.set_float(&format!("{spot}.outerCutOff"), light.outer_cut_off_cosine());
        }
        shader.set_bool(&format!("{spot}.bActive"), rig.spot.is_some());

        log::debug!(
            "Lighting: directional={}, point lights={}, spot={}",
            rig.directional.is_some(),
            rig.point_lights.len(),
            rig.spot.is_some()
        );
        Ok(())
    }

    /// Write all per-object state for `request` and draw it
    ///
    /// The draw is always issued. A texture or material that did not resolve
    /// is returned afterwards; the texture miss takes precedence when both
    /// happen.
    pub fn submit<C: ShaderProgram + MeshLibrary + ?Sized>(
        &self,
        ctx: &mut C,
        textures: &TextureRegistry,
        materials: &MaterialRegistry,
        request: &DrawRequest,
    ) -> Result<(), DispatchError> {
        self.set_transform(ctx, &request.transform);

        let appearance = match &request.appearance {
            Appearance::Color(color) => {
                self.set_color(ctx, *color);
                Ok(())
            }
            Appearance::Texture(tag) => self.set_texture(ctx, textures, tag).map(|_| ()),
        };

        self.set_uv_scale(ctx, request.uv_scale.x, request.uv_scale.y);

        let material = request
            .material
            .as_deref()
            .map_or(Ok(()), |tag| self.set_material(ctx, materials, tag));

        // Uncapped shapes are always drawn whole
        let parts = if request.shape.has_parts() {
            request.parts
        } else {
            MeshParts::all()
        };
        ctx.draw_mesh(request.shape, parts);

        appearance.and(material)
    }
}
