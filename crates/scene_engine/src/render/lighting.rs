//! Scene lights
//!
//! The shader supports one directional light, up to five point lights and
//! one spotlight. Lights are static: they are pushed once while the scene is
//! prepared and stay in the shader for every frame after that.

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;

/// Number of point lights the shader declares
pub const MAX_POINT_LIGHTS: usize = 5;

/// Distance attenuation `1 / (constant + linear * d + quadratic * d^2)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Attenuation {
    /// Constant term
    pub constant: f32,
    /// Linear term
    pub linear: f32,
    /// Quadratic term
    pub quadratic: f32,
}

impl Default for Attenuation {
    /// Roughly a 50 unit range
    fn default() -> Self {
        Self {
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
        }
    }
}

/// Parallel light, like sunlight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectionalLight {
    /// Direction the light travels
    pub direction: Vec3,
    /// Ambient contribution
    pub ambient: Vec3,
    /// Diffuse contribution
    pub diffuse: Vec3,
    /// Specular contribution
    pub specular: Vec3,
}

/// Omnidirectional light at a position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PointLight {
    /// World position
    pub position: Vec3,
    /// Ambient contribution
    pub ambient: Vec3,
    /// Diffuse contribution
    pub diffuse: Vec3,
    /// Specular contribution
    pub specular: Vec3,
    /// Falloff with distance
    #[serde(default)]
    pub attenuation: Attenuation,
}

/// Cone of light
///
/// Position and direction are optional: when omitted they are left to
/// whoever drives the camera, which typically attaches the spotlight to the
/// viewer as a flashlight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpotLight {
    /// World position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec3>,
    /// Cone axis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Vec3>,
    /// Ambient contribution
    pub ambient: Vec3,
    /// Diffuse contribution
    pub diffuse: Vec3,
    /// Specular contribution
    pub specular: Vec3,
    /// Falloff with distance
    #[serde(default)]
    pub attenuation: Attenuation,
    /// Inner cone half-angle in degrees
    pub cut_off_degrees: f32,
    /// Outer cone half-angle in degrees; light fades to zero between the two
    pub outer_cut_off_degrees: f32,
}

impl SpotLight {
    /// Cosine of the inner cutoff, as compared against in the shader
    pub fn cut_off_cosine(&self) -> f32 {
        self.cut_off_degrees.to_radians().cos()
    }

    /// Cosine of the outer cutoff
    pub fn outer_cut_off_cosine(&self) -> f32 {
        self.outer_cut_off_degrees.to_radians().cos()
    }
}

/// Every light in the scene
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightRig {
    /// Optional directional light
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directional: Option<DirectionalLight>,
    /// Point lights, at most [`MAX_POINT_LIGHTS`]
    pub point_lights: Vec<PointLight>,
    /// Optional spotlight
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spot: Option<SpotLight>,
}

impl LightRig {
    /// Whether the rig contains any light at all
    pub fn has_lights(&self) -> bool {
        self.directional.is_some() || !self.point_lights.is_empty() || self.spot.is_some()
    }
}
