//! Analytic primitives and the shape sum type.

use lumen_math::{Ray, Vec3};

use crate::mesh::Mesh;

/// The record of a ray-object intersection, in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Point of intersection
    pub origin: Vec3,
    /// Unit surface normal at the intersection
    pub normal: Vec3,
    /// Distance from the ray origin to the intersection
    pub distance: f32,
    /// Index into the world's material pool; stamped by
    /// [`crate::World::cast_ray`] from the object's slot
    pub material_index: usize,
}

/// A sphere given by center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub position: Vec3,
    pub radius: f32,
}

impl Sphere {
    /// Solve `|o + t*d - c|^2 = r^2` for the nearest positive t.
    pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let l = ray.origin - self.position;
        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * ray.direction.dot(l);
        let c = l.dot(l) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_discriminant = discriminant.sqrt();
        let t0 = (-b - sqrt_discriminant) / (2.0 * a);
        let t1 = (-b + sqrt_discriminant) / (2.0 * a);
        let distance = if t0 > 0.0 { t0 } else { t1 };
        if distance <= 0.0 {
            return None;
        }

        let point = ray.at(distance);
        Some(Hit {
            origin: point,
            normal: (point - self.position).normalize(),
            distance,
            material_index: 0,
        })
    }
}

/// An infinite plane given by a point on it and its normal.
///
/// Callers must provide a non-degenerate normal; it is normalized when
/// the hit is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub position: Vec3,
    pub normal: Vec3,
}

impl Plane {
    pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let denominator = ray.direction.dot(self.normal);
        if denominator.abs() <= 1e-6 {
            return None;
        }

        let distance = (self.position - ray.origin).dot(self.normal) / denominator;
        if distance <= 0.0 {
            return None;
        }

        Some(Hit {
            origin: ray.at(distance),
            normal: self.normal.normalize(),
            distance,
            material_index: 0,
        })
    }
}

/// Sum over every shape the world can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Mesh(Mesh),
}

impl Shape {
    /// Dispatch intersection to the concrete shape.
    pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
        match self {
            Shape::Sphere(sphere) => sphere.intersect(ray),
            Shape::Plane(plane) => plane.intersect(ray),
            Shape::Mesh(mesh) => mesh.intersect(ray),
        }
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<Plane> for Shape {
    fn from(plane: Plane) -> Self {
        Shape::Plane(plane)
    }
}

impl From<Mesh> for Shape {
    fn from(mesh: Mesh) -> Self {
        Shape::Mesh(mesh)
    }
}
