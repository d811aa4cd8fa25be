//! Triangle mesh with a placement transform and a BVH accelerator.

use lumen_math::{transform, Angle, Mat4, Ray, RotationAxis, Vec3};

use crate::bvh::{self, BvhNode};
use crate::shapes::Hit;

/// How a mesh's normals should be interpreted.
///
/// `Smooth` is recognized in OBJ input but the renderer currently shades
/// with flat normals from the triangle edges.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    #[default]
    Flat,
    Smooth,
}

/// A triangle mesh in local space with a world placement.
///
/// `faces` index into `vertices` (0-based). Building the BVH permutes
/// `faces` in place; leaves of the tree reference contiguous ranges of
/// the permuted list.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub position: Vec3,
    pub vertices: Vec<Vec3>,
    pub faces: Vec<[u32; 3]>,
    pub scale: f32,
    pub pitch: Angle,
    pub yaw: Angle,
    pub roll: Angle,
    pub shading: Shading,
    pub bvh: Option<Box<BvhNode>>,
}

impl Default for Mesh {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            vertices: Vec::new(),
            faces: Vec::new(),
            scale: 1.0,
            pitch: Angle::ZERO,
            yaw: Angle::ZERO,
            roll: Angle::ZERO,
            shading: Shading::Flat,
            bvh: None,
        }
    }
}

impl Mesh {
    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// (Re)build the BVH over the current geometry. Must be called after
    /// mutating `vertices` or `faces` for intersection to see the change;
    /// an empty mesh gets no tree and never intersects.
    pub fn compute_bvh(&mut self) {
        if self.faces.is_empty() {
            self.bvh = None;
            return;
        }
        self.bvh = Some(bvh::build(&self.vertices, &mut self.faces, 0));
        log::debug!(
            "built mesh BVH over {} triangles ({} vertices)",
            self.faces.len(),
            self.vertices.len()
        );
    }

    /// Local-to-world placement: scale, then pitch/yaw/roll, then
    /// translation.
    pub fn local_to_world(&self) -> Mat4 {
        transform::translation(self.position)
            * transform::rotation4(RotationAxis::Roll, self.roll)
            * transform::rotation4(RotationAxis::Yaw, self.yaw)
            * transform::rotation4(RotationAxis::Pitch, self.pitch)
            * transform::scaling(self.scale, self.scale, self.scale)
    }

    pub fn world_to_local(&self) -> Mat4 {
        self.local_to_world().inverse()
    }

    /// Intersect a world-space ray against the mesh.
    ///
    /// The ray is taken to local space, traced through the BVH, and the
    /// winning hit is mapped back. The distance is recomputed between
    /// world-space points because a scaled placement distorts the local t.
    pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let bvh = self.bvh.as_deref()?;

        let world_to_local = self.world_to_local();
        let local_origin = world_to_local.transform_point3(ray.origin);
        let local_direction = world_to_local.transform_vector3(ray.direction).normalize();
        let dir_inv = local_direction.recip();

        let mut best: Option<Hit> = None;
        bvh::intersect(
            bvh,
            &self.vertices,
            &self.faces,
            local_origin,
            local_direction,
            dir_inv,
            &mut best,
        );

        let mut hit = best?;
        let local_to_world = self.local_to_world();
        hit.origin = local_to_world.transform_point3(hit.origin);
        hit.normal = local_to_world.transform_vector3(hit.normal).normalize();
        hit.distance = (hit.origin - ray.origin).length();
        Some(hit)
    }
}
