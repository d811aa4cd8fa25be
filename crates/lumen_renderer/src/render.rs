//! The frame driver: camera rays, row-band parallelism, checkerboard
//! interlacing.

use std::ops::Range;
use std::thread;

use lumen_math::{Mat3, Ray, Vec3};
use lumen_scene::{Color8, World};

use crate::target::PixelTarget;

/// Partition `[0, height)` into up to `workers` contiguous row bands of
/// `ceil(height / workers)` rows. Bands are disjoint and cover every row
/// exactly once; trailing empty bands are dropped.
pub fn row_bands(height: u32, workers: usize) -> Vec<Range<u32>> {
    let workers = workers.max(1) as u32;
    let rows_per_band = height.div_ceil(workers);

    (0..workers)
        .map(|band| {
            let start = band * rows_per_band;
            let end = height.min(start.saturating_add(rows_per_band));
            start..end
        })
        .filter(|band| !band.is_empty())
        .collect()
}

/// A pixel write produced by a worker, applied after join.
type PixelWrite = (u32, u32, Color8);

/// Render one frame of the world into the target.
///
/// Pixels with no hit are left untouched; with checkerboarding enabled,
/// pixels on the `(x + y + frame) % 2 == 0` parity are skipped so two
/// consecutive frames interleave to a full image.
///
/// One worker thread per available CPU renders a contiguous row band;
/// all workers are joined before this returns, and each band's writes
/// are disjoint, so the output depends only on the world, the frame
/// counter and the target dimensions.
pub fn draw<T: PixelTarget + ?Sized>(world: &World, frame: u64, target: &mut T) {
    let width = target.width();
    let height = target.height();
    if width == 0 || height == 0 {
        return;
    }

    let aspect = width as f32 / height as f32;
    let half_fov_tan = (world.fov() / 2.0).tan();
    let rotation = world.camera_rotation();

    let workers = thread::available_parallelism().map_or(1, |n| n.get());
    let bands = row_bands(height, workers);
    log::trace!("drawing {width}x{height} frame {frame} on {} bands", bands.len());

    let results: Vec<Vec<PixelWrite>> = thread::scope(|scope| {
        let handles: Vec<_> = bands
            .into_iter()
            .map(|rows| {
                scope.spawn(move || {
                    render_band(world, frame, width, height, aspect, half_fov_tan, rotation, rows)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().expect("render worker panicked"))
            .collect()
    });

    for band in results {
        for (x, y, color) in band {
            target.set(x, y, color);
        }
    }
}

/// Shade every pixel of a row band, returning the writes to apply.
#[allow(clippy::too_many_arguments)]
fn render_band(
    world: &World,
    frame: u64,
    width: u32,
    height: u32,
    aspect: f32,
    half_fov_tan: f32,
    rotation: Mat3,
    rows: Range<u32>,
) -> Vec<PixelWrite> {
    let mut written = Vec::new();
    let camera_position = world.camera_position();

    for y in rows {
        for x in 0..width {
            if world.checkerboard() && (u64::from(x) + u64::from(y) + frame) % 2 == 0 {
                continue;
            }

            let ndc_x = (2.0 * (x as f32 + 0.5) / width as f32 - 1.0) * aspect;
            let ndc_y = 1.0 - 2.0 * (y as f32 + 0.5) / height as f32;

            let forward = Vec3::new(ndc_x * half_fov_tan, ndc_y * half_fov_tan, 1.0).normalize();
            let direction = rotation * forward;

            if let Some(hit) = world.cast_ray(Ray::new(camera_position, direction)) {
                let color = world.material(hit.material_index).shade(&hit, world, 0);
                written.push((x, y, color.to_8bit()));
            }
        }
    }

    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::ImageBuffer;
    use lumen_scene::{Color, Material, Plane, Sphere};

    fn solid(r: f32, g: f32, b: f32) -> Material {
        Material::SolidColor {
            color: Color::rgb(r, g, b),
        }
    }

    #[test]
    fn test_row_bands_partition_exactly() {
        for workers in 1..=8 {
            for height in [1u32, 2, 5, 17, 100] {
                let bands = row_bands(height, workers);

                let mut cursor = 0;
                for band in &bands {
                    assert_eq!(band.start, cursor, "workers={workers} height={height}");
                    assert!(band.end > band.start);
                    cursor = band.end;
                }
                assert_eq!(cursor, height, "workers={workers} height={height}");
            }
        }
    }

    #[test]
    fn test_row_bands_empty_height() {
        assert!(row_bands(0, 4).is_empty());
    }

    #[test]
    fn test_row_bands_more_workers_than_rows() {
        let bands = row_bands(3, 8);
        assert_eq!(bands.len(), 3);
        assert!(bands.iter().all(|b| b.len() == 1));
    }

    /// World from the axis-sphere scenario: one red sphere dead ahead.
    fn axis_sphere_world() -> World {
        let mut world = World::new();
        world.set_checkerboard(false);
        world.set_fov(lumen_math::deg(90.0));
        world
            .add(
                Sphere {
                    position: Vec3::new(0.0, 0.0, 5.0),
                    radius: 1.0,
                },
                solid(1.0, 0.0, 0.0),
            )
            .unwrap();
        world
    }

    #[test]
    fn test_axis_sphere_scenario() {
        let world = axis_sphere_world();

        // The exact center ray reports the analytic hit
        let hit = world.cast_ray(Ray::new(Vec3::ZERO, Vec3::Z)).unwrap();
        assert!((hit.origin - Vec3::new(0.0, 0.0, 4.0)).length() < 1e-4);
        assert!((hit.normal - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4);
        assert!((hit.distance - 4.0).abs() < 1e-4);

        // And the center pixel of a 100x100 frame comes out red
        let mut target = ImageBuffer::new(100, 100);
        draw(&world, 0, &mut target);
        assert_eq!(target.get(50, 50), Color8::rgb(255, 0, 0));

        // Pixels the sphere doesn't cover stay untouched
        assert_eq!(target.get(0, 0), Color8::default());
    }

    #[test]
    fn test_parallel_plane_leaves_center_pixel_unchanged() {
        let mut world = World::new();
        world.set_checkerboard(false);
        world
            .add(
                Plane {
                    position: Vec3::new(0.0, -1.0, 0.0),
                    normal: Vec3::Y,
                },
                solid(0.0, 1.0, 0.0),
            )
            .unwrap();

        // Looking straight down +Z at a floor plane: the center ray is
        // parallel to it and misses
        let center = world.cast_ray(Ray::new(Vec3::ZERO, Vec3::Z));
        assert!(center.is_none());

        let mut target = ImageBuffer::new(9, 9);
        draw(&world, 0, &mut target);
        assert_eq!(target.get(4, 4), Color8::default());
        // Lower half of the frame sees the floor
        assert_eq!(target.get(4, 8), Color8::rgb(0, 255, 0));
    }

    /// A wall that fills every pixel, for checkerboard coverage checks.
    fn wall_world() -> World {
        let mut world = World::new();
        world
            .add(
                Plane {
                    position: Vec3::new(0.0, 0.0, 5.0),
                    normal: Vec3::new(0.0, 0.0, -1.0),
                },
                solid(0.0, 0.0, 1.0),
            )
            .unwrap();
        world
    }

    #[test]
    fn test_checkerboard_skips_one_parity() {
        let world = wall_world();
        let mut target = ImageBuffer::new(8, 8);
        draw(&world, 0, &mut target);

        for y in 0..8u32 {
            for x in 0..8u32 {
                let written = target.get(x, y) != Color8::default();
                assert_eq!(written, (x + y) % 2 != 0, "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn test_checkerboard_union_over_consecutive_frames() {
        let world = wall_world();

        for counter in 0..3u64 {
            let mut target = ImageBuffer::new(16, 16);
            draw(&world, counter, &mut target);
            draw(&world, counter + 1, &mut target);

            assert!(
                target.pixels().iter().all(|p| *p == Color8::rgb(0, 0, 255)),
                "counter {counter}"
            );
        }
    }

    #[test]
    fn test_draw_is_deterministic() {
        let world = axis_sphere_world();

        let mut first = ImageBuffer::new(32, 32);
        let mut second = ImageBuffer::new(32, 32);
        draw(&world, 7, &mut first);
        draw(&world, 7, &mut second);

        assert_eq!(first.pixels(), second.pixels());
    }

    #[test]
    fn test_draw_empty_target_is_noop() {
        let world = axis_sphere_world();
        let mut target = ImageBuffer::new(0, 0);
        draw(&world, 0, &mut target);
        let mut target = ImageBuffer::new(5, 0);
        draw(&world, 0, &mut target);
    }

    #[test]
    fn test_camera_rotation_changes_view() {
        let mut world = axis_sphere_world();

        let mut ahead = ImageBuffer::new(32, 32);
        draw(&world, 0, &mut ahead);
        assert_eq!(ahead.get(16, 16), Color8::rgb(255, 0, 0));

        // Turn away; the sphere leaves the center of the frame
        world.rotate_yaw(lumen_math::deg(90.0));
        let mut turned = ImageBuffer::new(32, 32);
        draw(&world, 0, &mut turned);
        assert_eq!(turned.get(16, 16), Color8::default());
    }
}
