//! Scene description
//!
//! The literal content of a scene (which images to load, which materials
//! exist, where the lights are and what gets drawn in which order) lives in a
//! TOML or RON file rather than in code.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::foundation::math::{TransformParams, Vec2};
use crate::render::{Appearance, DrawRequest, LightRig, Material, MeshParts, MeshShape};

/// An image file to load under a tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextureAsset {
    /// Path handed to the image codec
    pub path: String,
    /// Lookup tag
    pub tag: String,
}

fn unit_uv_scale() -> Vec2 {
    Vec2::new(1.0, 1.0)
}

/// One drawable object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneObject {
    /// Name used in logs
    pub name: String,
    /// Primitive shape
    pub shape: MeshShape,
    /// Sub-parts of capped shapes
    #[serde(default)]
    pub parts: MeshParts,
    /// Placement
    pub transform: TransformParams,
    /// Color or texture
    pub appearance: Appearance,
    /// Texture coordinate scale
    #[serde(default = "unit_uv_scale")]
    pub uv_scale: Vec2,
    /// Material tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
}

impl SceneObject {
    /// Build the draw request for this object
    pub fn draw_request(&self) -> DrawRequest {
        DrawRequest {
            shape: self.shape,
            parts: self.parts,
            transform: self.transform,
            appearance: self.appearance.clone(),
            uv_scale: self.uv_scale,
            material: self.material.clone(),
        }
    }
}

/// Complete static scene
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneDescription {
    /// Images to load, in texture unit order
    pub textures: Vec<TextureAsset>,
    /// Materials to register
    pub materials: Vec<Material>,
    /// Lights
    pub lights: LightRig,
    /// Objects in draw order
    pub objects: Vec<SceneObject>,
}

impl Config for SceneDescription {}

impl SceneDescription {
    /// Distinct shapes used by the scene, in order of first use
    pub fn shapes(&self) -> Vec<MeshShape> {
        let mut shapes = Vec::new();
        for object in &self.objects {
            if !shapes.contains(&object.shape) {
                shapes.push(object.shape);
            }
        }
        shapes
    }
}
