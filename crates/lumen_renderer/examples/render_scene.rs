//! Renders the material gallery scene and saves a frame to PPM.
//!
//! A walled room with an emissive ceiling, a grid of spheres sweeping
//! roughness for dielectrics and metals, and a small OBJ mesh, lit by
//! three tinted point lights.

use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::Result;
use lumen_renderer::{
    deg, draw, Color, ImageBuffer, Material, Plane, PointLight, Sphere, Vec3, World,
};
use lumen_scene::parse_obj;

const WIDTH: u32 = 480;
const HEIGHT: u32 = 270;

const OCTAHEDRON_OBJ: &str = "\
v 1 0 0
v -1 0 0
v 0 1 0
v 0 -1 0
v 0 0 1
v 0 0 -1
f 1 3 5
f 3 2 5
f 2 4 5
f 4 1 5
f 3 1 6
f 2 3 6
f 4 2 6
f 1 4 6
";

fn build_scene() -> Result<World> {
    let mut world = World::new();

    let wall = Material::Bsdf {
        color: Color::splat(0.2),
        emissive: Color::BLACK,
        roughness: 1.0,
        metallic: 0.0,
    };
    let ceiling = Material::Bsdf {
        color: Color::WHITE,
        emissive: Color::splat(1000.0),
        roughness: 1.0,
        metallic: 0.0,
    };

    // The room
    world.add(
        Plane { position: Vec3::new(0.0, 0.0, 10.0), normal: Vec3::new(0.0, 0.0, -1.0) },
        wall.clone(),
    )?;
    world.add(
        Plane { position: Vec3::ZERO, normal: Vec3::Y },
        wall.clone(),
    )?;
    world.add(
        Plane { position: Vec3::new(0.0, 10.0, 0.0), normal: Vec3::new(0.0, -1.0, 0.0) },
        ceiling,
    )?;
    world.add(
        Plane { position: Vec3::new(5.0, 0.0, 0.0), normal: Vec3::new(-1.0, 0.0, 0.0) },
        wall.clone(),
    )?;
    world.add(
        Plane { position: Vec3::new(-5.0, 0.0, 0.0), normal: Vec3::X },
        wall,
    )?;

    // Roughness sweep: metals on the lower row, dielectrics above
    let gray = Color::splat(0.5);
    for (column, roughness) in [(-1.75f32, 1.0f32), (0.0, 0.6), (1.75, 0.1)] {
        world.add(
            Sphere { position: Vec3::new(column, 1.0, 0.0), radius: 0.75 },
            Material::Bsdf {
                color: Color::WHITE,
                emissive: Color::BLACK,
                roughness,
                metallic: 1.0,
            },
        )?;
        world.add(
            Sphere { position: Vec3::new(column, 3.0, 0.0), radius: 0.75 },
            Material::Bsdf {
                color: gray,
                emissive: Color::BLACK,
                roughness,
                metallic: 0.0,
            },
        )?;
    }

    // A light-emitting sphere and a red diffuse one
    world.add(
        Sphere { position: Vec3::new(3.25, 1.0, -2.0), radius: 0.75 },
        Material::Bsdf {
            color: Color::WHITE,
            emissive: Color::splat(1000.0),
            roughness: 1.0,
            metallic: 0.0,
        },
    )?;
    world.add(
        Sphere { position: Vec3::new(-3.25, 1.0, -2.0), radius: 0.75 },
        Material::Bsdf {
            color: Color::rgb(1.0, 0.0, 0.3),
            emissive: Color::BLACK,
            roughness: 1.0,
            metallic: 0.0,
        },
    )?;

    // A mesh between the sphere rows
    let mut octahedron = parse_obj(OCTAHEDRON_OBJ)?;
    octahedron.position = Vec3::new(0.0, 1.0, -3.0);
    octahedron.scale = 0.75;
    octahedron.yaw = deg(30.0);
    world.add(
        octahedron,
        Material::Bsdf {
            color: Color::WHITE,
            emissive: Color::BLACK,
            roughness: 0.6,
            metallic: 1.0,
        },
    )?;

    world.add_light(PointLight {
        position: Vec3::new(0.0, 5.0, 5.0),
        color: Color::rgb(1.0, 0.6, 0.45),
    });
    world.add_light(PointLight {
        position: Vec3::new(-2.5, 5.0, -5.0),
        color: Color::rgb(1.0, 0.8, 0.45),
    });
    world.add_light(PointLight {
        position: Vec3::new(2.5, 2.5, -5.0),
        color: Color::rgb(0.35, 0.45, 0.65),
    });

    world.move_camera(Vec3::new(0.0, 3.0, -9.0));

    Ok(world)
}

fn save_ppm(image: &ImageBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{WIDTH} {HEIGHT}")?;
    writeln!(writer, "255")?;

    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let pixel = image.get(x, y);
            writeln!(writer, "{} {} {}", pixel.r, pixel.g, pixel.b)?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    println!("Lumen - material gallery");

    let start = std::time::Instant::now();
    let world = build_scene()?;
    println!("Scene built in {:?}", start.elapsed());

    let mut target = ImageBuffer::new(WIDTH, HEIGHT);

    // Two interlaced frames complete the checkerboard
    let start = std::time::Instant::now();
    for frame in 0..2 {
        draw(&world, frame, &mut target);
    }
    println!("Rendered {WIDTH}x{HEIGHT} in {:?}", start.elapsed());

    save_ppm(&target, "output.ppm")?;
    println!("Saved to output.ppm");

    Ok(())
}
