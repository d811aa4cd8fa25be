//! Surface materials and their shading models.
//!
//! Materials form a tagged variant so the world can pool them by value
//! and de-duplicate with plain structural equality. Shading is an
//! exhaustive match; the Bsdf arm implements GGX/Cook-Torrance with
//! Schlick's Fresnel and Smith's geometry term, an optional reflection
//! recursion, and deterministic hemisphere-sampled global illumination.

use std::f32::consts::PI;
use std::fmt;

use lumen_math::{Ray, Vec3};

use crate::color::Color;
use crate::shapes::Hit;
use crate::world::World;

/// Offset applied along the normal when spawning secondary rays, to
/// escape the surface that produced the hit.
const SURFACE_EPS: f32 = 1e-3;

/// Stratification of the global illumination hemisphere: rings x samples
/// per ring. The grid is closed-form, so shading stays deterministic.
const GI_RINGS: u32 = 32;
const GI_RING_SAMPLES: u32 = 32;

/// Debug views of the Bsdf terms; `Default` is the full model.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BsdfMode {
    #[default]
    Default,
    Diffuse,
    CookTorrance,
    Fresnel,
    NormalDistribution,
    Microfacets,
}

impl fmt::Display for BsdfMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BsdfMode::Default => "Default",
            BsdfMode::Diffuse => "Diffuse",
            BsdfMode::CookTorrance => "CookTorrance",
            BsdfMode::Fresnel => "Fresnel",
            BsdfMode::NormalDistribution => "NormalDistribution",
            BsdfMode::Microfacets => "Microfacets",
        };
        f.write_str(name)
    }
}

/// Global illumination mode for Bsdf materials.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum GiMode {
    #[default]
    None,
    Simple,
}

impl fmt::Display for GiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GiMode::None => "None",
            GiMode::Simple => "Simple",
        })
    }
}

/// A surface material.
///
/// Equality is structural over all fields and is what the world's
/// material pool de-duplicates on.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    /// Unlit; returns the stored color unconditionally.
    SolidColor { color: Color },
    /// Lambertian diffuse, lit per light with optional shadow rays.
    Lambert {
        color: Color,
        diffuse_reflectance: f32,
    },
    /// GGX/Cook-Torrance with Schlick Fresnel, reflection recursion and
    /// optional hemisphere GI.
    Bsdf {
        color: Color,
        emissive: Color,
        roughness: f32,
        metallic: f32,
    },
}

impl Material {
    /// Evaluate the material at a hit point. `depth` is the recursion
    /// depth, 0 for primary rays.
    pub fn shade(&self, hit: &Hit, world: &World, depth: u32) -> Color {
        match self {
            Material::SolidColor { color } => *color,
            Material::Lambert {
                color,
                diffuse_reflectance,
            } => shade_lambert(*color, *diffuse_reflectance, hit, world),
            Material::Bsdf {
                color,
                emissive,
                roughness,
                metallic,
            } => shade_bsdf(*color, *emissive, *roughness, *metallic, hit, world, depth),
        }
    }
}

fn shade_lambert(color: Color, diffuse_reflectance: f32, hit: &Hit, world: &World) -> Color {
    let base_color = Vec3::from(color);
    let mut out = Vec3::ZERO;

    for light in world.lights() {
        let to_light = light.position - hit.origin;
        let light_direction = to_light.normalize();
        let distance_to_light = to_light.length();

        if world.shadows() {
            let shadow_origin = hit.origin + hit.normal * SURFACE_EPS;
            if let Some(shadow_hit) = world.cast_ray(Ray::new(shadow_origin, light_direction)) {
                if shadow_hit.distance < distance_to_light {
                    continue;
                }
            }
        }

        let diffuse =
            Vec3::from(light.color) * base_color * hit.normal.dot(light_direction).max(0.0);
        out += diffuse * diffuse_reflectance;
    }

    out.into()
}

#[inline]
fn sq(value: f32) -> f32 {
    value * value
}

fn shade_bsdf(
    color: Color,
    emissive: Color,
    roughness: f32,
    metallic: f32,
    hit: &Hit,
    world: &World,
    depth: u32,
) -> Color {
    let base_color = Vec3::from(color);
    let alpha = roughness * roughness;

    let mut out = Vec3::ZERO;

    let base_reflectivity = Vec3::splat(0.04).lerp(base_color, metallic);
    let view_direction = (world.camera_position() - hit.origin).normalize();

    // Specular and diffuse pass.
    for light in world.lights() {
        let light_direction = (light.position - hit.origin).normalize();
        let half = (view_direction + light_direction).normalize();

        let ndoth = hit.normal.dot(half);
        let ndotv = hit.normal.dot(view_direction).clamp(0.0, 1.0);
        let ndotl = hit.normal.dot(light_direction).clamp(0.0, 1.0);
        let hdotv = half.dot(view_direction).clamp(0.0, 1.0);

        let normal_distribution = sq(alpha) / (PI * sq(sq(ndoth) * (sq(alpha) - 1.0) + 1.0));

        let fresnel =
            base_reflectivity + (Vec3::ONE - base_reflectivity) * (1.0 - hdotv).powi(5);

        let direct_k = sq(alpha + 1.0) / 8.0;
        let microfacets = (ndotv / (ndotv * (1.0 - direct_k) + direct_k).max(1e-3))
            * (ndotl / (ndotl * (1.0 - direct_k) + direct_k).max(1e-3));

        // Division may degenerate near grazing angles; the numerical
        // result is accepted as-is
        let cook_torrance = (fresnel * normal_distribution * microfacets)
            / (4.0 * view_direction.dot(hit.normal) * light_direction.dot(hit.normal));

        let light_color = Vec3::from(light.color);
        let lambert_diffuse =
            light_color * base_color * hit.normal.dot(light_direction).max(0.0);
        let diffuse_reflectance = (Vec3::ONE - fresnel) * (1.0 - metallic);

        out += match world.bsdf_mode() {
            BsdfMode::Default => {
                diffuse_reflectance * lambert_diffuse + cook_torrance * light_color * ndotl
            }
            BsdfMode::Diffuse => lambert_diffuse,
            BsdfMode::CookTorrance => cook_torrance,
            BsdfMode::Fresnel => fresnel,
            BsdfMode::NormalDistribution => Vec3::splat(normal_distribution),
            BsdfMode::Microfacets => Vec3::splat(microfacets),
        };
    }

    // Reflection pass.
    if depth < 4 && metallic > 0.0 && 1.0 - roughness > 1e-3 {
        let reflect_direction = (-view_direction
            + hit.normal * (2.0 * view_direction.dot(hit.normal)))
        .normalize();
        let reflect_origin = hit.origin + hit.normal * SURFACE_EPS;

        let reflected = match world.cast_ray(Ray::new(reflect_origin, reflect_direction)) {
            Some(next_hit) => {
                Vec3::from(world.material(next_hit.material_index).shade(&next_hit, world, depth + 1))
            }
            None => Vec3::from(world.background_color()),
        };

        let fresnel = base_reflectivity
            + (Vec3::ONE - base_reflectivity)
                * (1.0 - hit.normal.dot(view_direction).clamp(0.0, 1.0)).powi(5);
        let specular = reflected * fresnel * Vec3::ONE.lerp(base_color, metallic);

        out += specular * (metallic * (1.0 - roughness));
    }

    // Global illumination pass, primary hits only.
    if world.gi_mode() == GiMode::Simple && depth < 1 {
        out += gather_gi(base_color, alpha, hit, world, depth);
    }

    out += Vec3::from(emissive);
    out.into()
}

/// Deterministic stratified hemisphere gather around the hit normal.
fn gather_gi(base_color: Vec3, alpha: f32, hit: &Hit, world: &World, depth: u32) -> Vec3 {
    let normal = hit.normal;

    // Tangent frame from the dominant normal components
    let tangent = if normal.x.abs() > normal.z.abs() {
        Vec3::new(-normal.y, normal.x, 0.0).normalize()
    } else {
        Vec3::new(0.0, -normal.z, normal.y).normalize()
    };
    let bitangent = normal.cross(tangent);

    let gather_origin = hit.origin + normal * SURFACE_EPS;
    let mut sum = Vec3::ZERO;

    for ring in 0..GI_RINGS {
        let u1 = (ring as f32 + 0.5) / GI_RINGS as f32;
        let radius = u1.sqrt() * alpha;

        for sample in 0..GI_RING_SAMPLES {
            let u2 = sample as f32 / GI_RING_SAMPLES as f32;
            let phi = 2.0 * PI * u2;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let x = radius * cos_phi;
            let z = radius * sin_phi;
            let y = (1.0 - x * x - z * z).max(0.0).sqrt();

            let direction = tangent * x + normal * y + bitangent * z;

            let sample_color = match world.cast_ray(Ray::new(gather_origin, direction)) {
                Some(next_hit) => Vec3::from(
                    world
                        .material(next_hit.material_index)
                        .shade(&next_hit, world, depth + 1),
                ),
                None => Vec3::from(world.background_color()),
            };

            let contribution = base_color * sample_color * direction.dot(normal).max(0.0);
            sum += contribution.min(Vec3::ONE);
        }
    }

    sum / (GI_RINGS * GI_RING_SAMPLES) as f32
}
