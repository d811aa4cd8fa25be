//! Lumen scene model - the world a ray gets cast into.
//!
//! This crate provides:
//!
//! - **Colors**: linear float [`Color`] with lossy 8-bit [`Color8`] conversion
//! - **Shapes**: [`Sphere`], [`Plane`], [`Mesh`] (BVH-accelerated) and the
//!   [`Shape`] sum over them
//! - **Materials**: the [`Material`] variants with physically-based shading
//! - **World**: object table, de-duplicated material pool, point lights,
//!   camera pose and render configuration, plus [`World::cast_ray`]
//! - **OBJ loading**: a minimal Wavefront OBJ parser behind an abstract
//!   [`FileLoader`] collaborator
//!
//! # Example
//!
//! ```
//! use lumen_scene::{Material, Color, Sphere, World};
//! use lumen_math::Vec3;
//!
//! let mut world = World::new();
//! world.add(
//!     Sphere { position: Vec3::new(0.0, 0.0, 5.0), radius: 1.0 },
//!     Material::SolidColor { color: Color::rgb(1.0, 0.0, 0.0) },
//! ).unwrap();
//!
//! let hit = world.cast_ray(lumen_math::Ray::new(Vec3::ZERO, Vec3::Z)).unwrap();
//! assert!((hit.distance - 4.0).abs() < 1e-4);
//! ```

pub mod bvh;
pub mod color;
pub mod light;
pub mod material;
pub mod mesh;
pub mod obj;
pub mod shapes;
pub mod world;

// Re-export commonly used types
pub use bvh::BvhNode;
pub use color::{Color, Color8};
pub use light::PointLight;
pub use material::{BsdfMode, GiMode, Material};
pub use mesh::{Mesh, Shading};
pub use obj::{load_mesh, parse_obj, DiskLoader, FileLoader, LoadError};
pub use shapes::{Hit, Plane, Shape, Sphere};
pub use world::{InvalidScene, ObjectRef, World};
