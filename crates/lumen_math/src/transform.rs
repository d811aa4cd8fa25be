//! Transform matrix constructors for camera and mesh placement.
//!
//! All matrices here multiply glam column vectors (`v' = m * v`). The
//! per-axis rotations follow the renderer's camera convention: pitch
//! turns about X, yaw about Y, roll about Z, and composing
//! `rotation3(Yaw, yaw) * rotation3(Pitch, pitch)` applies pitch first.

use crate::{Angle, Mat3, Mat4, Vec3, Vec4};

/// The rotation axis for constructing rotation matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationAxis {
    Pitch,
    Yaw,
    Roll,
}

/// Creates a 3x3 rotation matrix about the chosen axis.
pub fn rotation3(axis: RotationAxis, angle: Angle) -> Mat3 {
    let (s, c) = angle.sin_cos();
    match axis {
        RotationAxis::Pitch => Mat3::from_cols(
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, c, -s),
            Vec3::new(0.0, s, c),
        ),
        RotationAxis::Yaw => Mat3::from_cols(
            Vec3::new(c, 0.0, s),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(-s, 0.0, c),
        ),
        RotationAxis::Roll => Mat3::from_cols(
            Vec3::new(c, -s, 0.0),
            Vec3::new(s, c, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ),
    }
}

/// Creates a 4x4 rotation matrix about the chosen axis.
pub fn rotation4(axis: RotationAxis, angle: Angle) -> Mat4 {
    Mat4::from_mat3(rotation3(axis, angle))
}

/// Creates a translation matrix.
pub fn translation(offset: Vec3) -> Mat4 {
    Mat4::from_translation(offset)
}

/// Creates a scaling matrix.
pub fn scaling(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_scale(Vec3::new(x, y, z))
}

/// Creates a standard perspective projection matrix.
///
/// Present for completeness of the camera model; primary ray generation
/// derives directions from the field of view and aspect ratio directly.
pub fn projection(width: f32, height: f32, fov: Angle, near: f32, far: f32) -> Mat4 {
    let aspect = height / width;
    let q = far / (far - near);
    let f = 1.0 / (fov / 2.0).tan();
    Mat4::from_cols(
        Vec4::new(aspect * f, 0.0, 0.0, 0.0),
        Vec4::new(0.0, f, 0.0, 0.0),
        Vec4::new(0.0, 0.0, q, 1.0),
        Vec4::new(0.0, 0.0, -near * q, 0.0),
    )
}
