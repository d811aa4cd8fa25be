//! Lumen renderer - real-time CPU raytracing frame driver.
//!
//! Takes a [`lumen_scene::World`] and draws it into any [`PixelTarget`]
//! with one worker thread per CPU, optional temporal checkerboard
//! interlacing, and shading evaluated through the world's material pool.
//!
//! # Example
//!
//! ```
//! use lumen_renderer::{draw, ImageBuffer};
//! use lumen_scene::{Color, Material, Sphere, World};
//! use lumen_math::Vec3;
//!
//! let mut world = World::new();
//! world.set_checkerboard(false);
//! world.add(
//!     Sphere { position: Vec3::new(0.0, 0.0, 5.0), radius: 1.0 },
//!     Material::SolidColor { color: Color::rgb(1.0, 0.0, 0.0) },
//! ).unwrap();
//!
//! let mut target = ImageBuffer::new(64, 64);
//! draw(&world, 0, &mut target);
//! ```

mod render;
mod target;

pub use render::{draw, row_bands};
pub use target::{ImageBuffer, PixelTarget};

// Re-export the scene and math surface the driver is used with
pub use lumen_math::{deg, rad, Angle, Ray, Vec3};
pub use lumen_scene::{
    BsdfMode, Color, Color8, GiMode, Hit, Material, Mesh, Plane, PointLight, Shape, Sphere, World,
};
