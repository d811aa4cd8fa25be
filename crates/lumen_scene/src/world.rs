//! The world: objects, the material pool, lights, camera and config.

use std::marker::PhantomData;

use lumen_math::{transform, Angle, Mat3, Ray, RotationAxis, Vec3};
use thiserror::Error;

use crate::color::Color;
use crate::light::PointLight;
use crate::material::{BsdfMode, GiMode, Material};
use crate::mesh::Mesh;
use crate::shapes::{Hit, Plane, Shape, Sphere};

/// Rejected scene input: NaN components, non-positive radius or scale.
#[derive(Debug, Error)]
#[error("invalid scene input: {0}")]
pub struct InvalidScene(String);

/// Shapes the world can store. Provides the variant plumbing that lets a
/// typed [`ObjectRef`] resolve back to the concrete shape.
pub trait WorldShape: Into<Shape> {
    fn from_shape(shape: &Shape) -> Option<&Self>;
    fn from_shape_mut(shape: &mut Shape) -> Option<&mut Self>;
    fn validate(&self) -> Result<(), InvalidScene>;
}

impl WorldShape for Sphere {
    fn from_shape(shape: &Shape) -> Option<&Self> {
        match shape {
            Shape::Sphere(sphere) => Some(sphere),
            _ => None,
        }
    }

    fn from_shape_mut(shape: &mut Shape) -> Option<&mut Self> {
        match shape {
            Shape::Sphere(sphere) => Some(sphere),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), InvalidScene> {
        if !self.position.is_finite() {
            return Err(InvalidScene("sphere position is not finite".into()));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(InvalidScene(format!(
                "sphere radius must be positive, got {}",
                self.radius
            )));
        }
        Ok(())
    }
}

impl WorldShape for Plane {
    fn from_shape(shape: &Shape) -> Option<&Self> {
        match shape {
            Shape::Plane(plane) => Some(plane),
            _ => None,
        }
    }

    fn from_shape_mut(shape: &mut Shape) -> Option<&mut Self> {
        match shape {
            Shape::Plane(plane) => Some(plane),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), InvalidScene> {
        if !self.position.is_finite() || !self.normal.is_finite() {
            return Err(InvalidScene("plane has non-finite components".into()));
        }
        Ok(())
    }
}

impl WorldShape for Mesh {
    fn from_shape(shape: &Shape) -> Option<&Self> {
        match shape {
            Shape::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    fn from_shape_mut(shape: &mut Shape) -> Option<&mut Self> {
        match shape {
            Shape::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), InvalidScene> {
        if !self.position.is_finite() {
            return Err(InvalidScene("mesh position is not finite".into()));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(InvalidScene(format!(
                "mesh scale must be positive, got {}",
                self.scale
            )));
        }
        if self.vertices.iter().any(|v| !v.is_finite()) {
            return Err(InvalidScene("mesh has non-finite vertices".into()));
        }
        Ok(())
    }
}

fn validate_material(material: &Material) -> Result<(), InvalidScene> {
    let finite = |c: &Color| c.r.is_finite() && c.g.is_finite() && c.b.is_finite();
    let ok = match material {
        Material::SolidColor { color } => finite(color),
        Material::Lambert {
            color,
            diffuse_reflectance,
        } => finite(color) && diffuse_reflectance.is_finite(),
        Material::Bsdf {
            color,
            emissive,
            roughness,
            metallic,
        } => finite(color) && finite(emissive) && roughness.is_finite() && metallic.is_finite(),
    };
    if ok {
        Ok(())
    } else {
        Err(InvalidScene("material has non-finite components".into()))
    }
}

/// A stable, typed handle to an object in the world.
///
/// Objects are stored by value in a growable table and have no stable
/// address, so a handle carries the table index instead; resolve it with
/// [`World::get`] or [`World::get_mut`]. Handles stay valid for the
/// world's lifetime because objects are never removed or reordered.
#[derive(Debug)]
pub struct ObjectRef<S> {
    index: usize,
    _shape: PhantomData<fn() -> S>,
}

impl<S> Clone for ObjectRef<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for ObjectRef<S> {}

/// The scene: an object table with bound materials, a structurally
/// de-duplicated material pool, point lights, the camera pose and the
/// render configuration.
///
/// Reads (in particular [`World::cast_ray`] and shading) are safe from
/// multiple threads concurrently; all mutation happens between frames.
#[derive(Debug)]
pub struct World {
    /// Shapes and the index of their bound material.
    objects: Vec<(Shape, usize)>,
    /// Materials, indices stable for the world's lifetime.
    materials: Vec<Material>,
    lights: Vec<PointLight>,

    camera_position: Vec3,
    camera_pitch: Angle,
    camera_yaw: Angle,
    camera_roll: Angle,

    background_color: Color,

    fov: Angle,
    checkerboard: bool,
    shadows: bool,
    bsdf_mode: BsdfMode,
    gi_mode: GiMode,
}

/// Fallback material bound by [`World::add_default`]; also occupies pool
/// slot 0 so an unset material index renders loudly.
fn fallback_material() -> Material {
    Material::SolidColor {
        color: Color::rgb(1.0, 0.0, 0.0),
    }
}

impl Default for World {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            materials: vec![fallback_material()],
            lights: Vec::new(),
            camera_position: Vec3::ZERO,
            camera_pitch: Angle::ZERO,
            camera_yaw: Angle::ZERO,
            camera_roll: Angle::ZERO,
            background_color: Color::BLACK,
            fov: lumen_math::deg(80.0),
            checkerboard: true,
            shadows: true,
            bsdf_mode: BsdfMode::Default,
            gi_mode: GiMode::None,
        }
    }
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object with a material.
    ///
    /// The material pool is scanned for a structurally equal entry first;
    /// shading cost is dominated by material evaluation, so keeping the
    /// live material count low pays for the linear scan.
    pub fn add<S: WorldShape>(
        &mut self,
        object: S,
        material: Material,
    ) -> Result<ObjectRef<S>, InvalidScene> {
        object.validate()?;
        validate_material(&material)?;

        let material_index = match self.materials.iter().position(|m| *m == material) {
            Some(index) => index,
            None => {
                self.materials.push(material);
                self.materials.len() - 1
            }
        };

        self.objects.push((object.into(), material_index));
        Ok(ObjectRef {
            index: self.objects.len() - 1,
            _shape: PhantomData,
        })
    }

    /// Add an object with the red fallback material.
    pub fn add_default<S: WorldShape>(&mut self, object: S) -> Result<ObjectRef<S>, InvalidScene> {
        self.add(object, fallback_material())
    }

    pub fn add_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    /// Resolve a handle to the concrete shape.
    pub fn get<S: WorldShape>(&self, handle: ObjectRef<S>) -> &S {
        S::from_shape(&self.objects[handle.index].0)
            .expect("object handle refers to a different shape variant")
    }

    /// Resolve a handle to the concrete shape, mutably.
    pub fn get_mut<S: WorldShape>(&mut self, handle: ObjectRef<S>) -> &mut S {
        S::from_shape_mut(&mut self.objects[handle.index].0)
            .expect("object handle refers to a different shape variant")
    }

    pub fn objects(&self) -> &[(Shape, usize)] {
        &self.objects
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn material(&self, index: usize) -> &Material {
        &self.materials[index]
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    /// Cast a ray against every object, returning the nearest hit with
    /// its material index stamped from the owning slot.
    ///
    /// Pure; safe to call from worker threads sharing the world.
    pub fn cast_ray(&self, ray: Ray) -> Option<Hit> {
        let mut best: Option<Hit> = None;

        for (shape, material_index) in &self.objects {
            if let Some(mut hit) = shape.intersect(&ray) {
                if best.map_or(true, |b| hit.distance < b.distance) {
                    hit.material_index = *material_index;
                    best = Some(hit);
                }
            }
        }

        best
    }

    // Camera ------------------------------------------------------------

    pub fn camera_position(&self) -> Vec3 {
        self.camera_position
    }

    /// Translate the camera in view-relative coordinates; the delta is
    /// rotated by the current yaw so forward follows the view.
    pub fn move_camera(&mut self, delta: Vec3) {
        self.camera_position += transform::rotation3(RotationAxis::Yaw, self.camera_yaw) * delta;
    }

    pub fn rotate_pitch(&mut self, angle: Angle) {
        self.camera_pitch += angle;
    }

    pub fn rotate_yaw(&mut self, angle: Angle) {
        self.camera_yaw += angle;
    }

    pub fn rotate_roll(&mut self, angle: Angle) {
        self.camera_roll += angle;
    }

    /// The camera's rotation matrix. Roll is stored but not applied to
    /// primary rays.
    pub fn camera_rotation(&self) -> Mat3 {
        transform::rotation3(RotationAxis::Yaw, self.camera_yaw)
            * transform::rotation3(RotationAxis::Pitch, self.camera_pitch)
    }

    pub fn view_direction(&self) -> Vec3 {
        self.camera_rotation() * Vec3::Z
    }

    // Render configuration ----------------------------------------------

    pub fn fov(&self) -> Angle {
        self.fov
    }

    pub fn set_fov(&mut self, angle: Angle) {
        self.fov = angle;
    }

    pub fn checkerboard(&self) -> bool {
        self.checkerboard
    }

    pub fn set_checkerboard(&mut self, value: bool) {
        self.checkerboard = value;
    }

    pub fn shadows(&self) -> bool {
        self.shadows
    }

    pub fn set_shadows(&mut self, value: bool) {
        self.shadows = value;
    }

    pub fn bsdf_mode(&self) -> BsdfMode {
        self.bsdf_mode
    }

    pub fn set_bsdf_mode(&mut self, mode: BsdfMode) {
        self.bsdf_mode = mode;
    }

    /// Step to the next Bsdf debug view, wrapping around.
    pub fn cycle_bsdf_mode(&mut self) {
        self.bsdf_mode = match self.bsdf_mode {
            BsdfMode::Default => BsdfMode::Diffuse,
            BsdfMode::Diffuse => BsdfMode::CookTorrance,
            BsdfMode::CookTorrance => BsdfMode::Fresnel,
            BsdfMode::Fresnel => BsdfMode::NormalDistribution,
            BsdfMode::NormalDistribution => BsdfMode::Microfacets,
            BsdfMode::Microfacets => BsdfMode::Default,
        };
    }

    pub fn gi_mode(&self) -> GiMode {
        self.gi_mode
    }

    pub fn set_gi_mode(&mut self, mode: GiMode) {
        self.gi_mode = mode;
    }

    pub fn cycle_gi_mode(&mut self) {
        self.gi_mode = match self.gi_mode {
            GiMode::None => GiMode::Simple,
            GiMode::Simple => GiMode::None,
        };
    }

    pub fn background_color(&self) -> Color {
        self.background_color
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.background_color = color;
    }
}
