//! Primitive mesh shapes and sub-part selection

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Primitive shapes provided by the mesh collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshShape {
    /// Unit cube
    Box,
    /// Flat square in the XZ plane
    Plane,
    /// Capped cylinder
    Cylinder,
    /// Cone with a circular base
    Cone,
    /// Triangular prism
    Prism,
    /// Four-sided pyramid
    Pyramid,
    /// Full sphere
    Sphere,
    /// Upper hemisphere
    HalfSphere,
    /// Cylinder whose top radius is smaller than the bottom
    TaperedCylinder,
    /// Torus
    Torus,
}

impl MeshShape {
    /// Whether the shape has separately drawable caps and sides
    pub const fn has_parts(self) -> bool {
        matches!(self, Self::Cylinder | Self::TaperedCylinder | Self::Cone)
    }
}

bitflags! {
    /// Sub-parts of capped shapes to draw
    ///
    /// Shapes without caps ignore these flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct MeshParts: u8 {
        /// Top cap
        const TOP = 0b001;
        /// Bottom cap
        const BOTTOM = 0b010;
        /// Side wall
        const SIDES = 0b100;
    }
}

impl Default for MeshParts {
    fn default() -> Self {
        Self::all()
    }
}
