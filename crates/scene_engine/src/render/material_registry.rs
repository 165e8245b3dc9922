//! Material registry
//!
//! Named Phong-style material property sets. Materials are appended once at
//! scene setup and looked up by tag for every draw that uses one.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::foundation::math::Vec3;

/// Surface properties pushed to the shader's `material` uniform block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Material {
    /// Lookup tag
    pub tag: String,
    /// Diffuse reflectance color
    pub diffuse_color: Vec3,
    /// Specular highlight color
    pub specular_color: Vec3,
    /// Specular exponent
    pub shininess: f32,
}

impl Material {
    /// Create a material
    pub fn new(tag: impl Into<String>, diffuse_color: Vec3, specular_color: Vec3, shininess: f32) -> Self {
        Self {
            tag: tag.into(),
            diffuse_color,
            specular_color,
            shininess,
        }
    }
}

/// Material lookup errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaterialError {
    /// No materials have been registered at all
    ///
    /// Scenes without materials are valid; callers usually treat this as
    /// "leave the shader's material uniforms alone".
    #[error("No materials are configured")]
    NotConfigured,

    /// Materials exist but none has this tag
    #[error("Material not found: {0}")]
    NotFound(String),
}

/// Append-only list of materials with first-match lookup
#[derive(Debug, Default, Clone)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
}

impl MaterialRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material from its properties
    pub fn register(&mut self, tag: &str, diffuse_color: Vec3, specular_color: Vec3, shininess: f32) {
        self.register_material(Material::new(tag, diffuse_color, specular_color, shininess));
    }

    /// Register a built material
    ///
    /// Tags are not checked for uniqueness; a duplicate is stored but lookups
    /// keep returning the earlier entry.
    pub fn register_material(&mut self, material: Material) {
        if self.materials.iter().any(|m| m.tag == material.tag) {
            log::warn!("Material tag '{}' is already registered; new entry will be shadowed", material.tag);
        }
        log::debug!("Registered material '{}' (shininess {})", material.tag, material.shininess);
        self.materials.push(material);
    }

    /// Look up the first material registered under `tag`
    pub fn resolve(&self, tag: &str) -> Result<&Material, MaterialError> {
        if self.materials.is_empty() {
            return Err(MaterialError::NotConfigured);
        }

        self.materials
            .iter()
            .find(|m| m.tag == tag)
            .ok_or_else(|| MaterialError::NotFound(tag.to_string()))
    }

    /// Registered materials in registration order
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Get number of registered materials
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether no material is registered
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
