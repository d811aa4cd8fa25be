//! Light sources.

use lumen_math::Vec3;

use crate::color::Color;

/// A point light. The color is linear and may exceed 1.0 to represent
/// intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Color,
}
