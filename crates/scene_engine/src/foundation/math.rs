//! Math utilities and types
//!
//! Provides the math types used by the binding layer and the model matrix
//! composition every scene object goes through before it is drawn.

use serde::{Deserialize, Serialize};

pub use nalgebra::{Matrix4, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Compose a model matrix from scale, per-axis rotation and translation.
///
/// The result is `T * Rz * Ry * Rx * S`: the mesh is scaled first, then
/// rotated about X, then Y, then Z, and translated last. Angles are in
/// degrees. Callers that build matrices by hand must use the same order or
/// objects will not line up with the rest of the scene.
pub fn compose(
    scale: Vec3,
    x_rotation_degrees: f32,
    y_rotation_degrees: f32,
    z_rotation_degrees: f32,
    translation: Vec3,
) -> Mat4 {
    let scale = Mat4::new_nonuniform_scaling(&scale);
    let rotation_x = Mat4::from_axis_angle(&Vec3::x_axis(), x_rotation_degrees.to_radians());
    let rotation_y = Mat4::from_axis_angle(&Vec3::y_axis(), y_rotation_degrees.to_radians());
    let rotation_z = Mat4::from_axis_angle(&Vec3::z_axis(), z_rotation_degrees.to_radians());
    let translation = Mat4::new_translation(&translation);

    translation * rotation_z * rotation_y * rotation_x * scale
}

/// Placement of a single mesh in world space
///
/// This is a throwaway value: it is turned into a matrix right before the
/// draw and never stored by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransformParams {
    /// Scale factors per axis
    pub scale: Vec3,

    /// Rotation about X, Y and Z in degrees
    #[serde(default = "zero_rotation")]
    pub rotation_degrees: Vec3,

    /// Position in world space
    pub translation: Vec3,
}

fn zero_rotation() -> Vec3 {
    Vec3::zeros()
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            scale: Vec3::new(1.0, 1.0, 1.0),
            rotation_degrees: Vec3::zeros(),
            translation: Vec3::zeros(),
        }
    }
}

impl TransformParams {
    /// Create transform parameters
    pub const fn new(scale: Vec3, rotation_degrees: Vec3, translation: Vec3) -> Self {
        Self {
            scale,
            rotation_degrees,
            translation,
        }
    }

    /// Convert to a model matrix
    pub fn to_matrix(&self) -> Mat4 {
        compose(
            self.scale,
            self.rotation_degrees.x,
            self.rotation_degrees.y,
            self.rotation_degrees.z,
            self.translation,
        )
    }
}
