//! Bounding volume hierarchy over mesh triangles.
//!
//! The builder permutes the mesh's face list in place; every node covers
//! the contiguous range `[face_index, face_index + face_count)` of the
//! permuted list, so leaves reference triangles without indirection.

use lumen_math::{Aabb, Vec3};

use crate::shapes::Hit;

/// Maximum triangles per leaf before splitting.
pub const LEAF_SIZE: usize = 4;

/// Epsilon shared by the triangle determinant and minimum-t tests.
const EPS: f32 = 1e-6;

/// A BVH node. Leaves have no children and own a face range; interior
/// nodes keep the range too, covering both children.
#[derive(Debug, Clone, PartialEq)]
pub struct BvhNode {
    pub bounds: Aabb,
    pub face_index: usize,
    pub face_count: usize,
    pub left: Option<Box<BvhNode>>,
    pub right: Option<Box<BvhNode>>,
}

impl BvhNode {
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

fn compute_bounds(vertices: &[Vec3], faces: &[[u32; 3]]) -> Aabb {
    let mut bounds = Aabb::EMPTY;
    for face in faces {
        for &index in face {
            bounds.grow(vertices[index as usize]);
        }
    }
    bounds
}

fn centroid(vertices: &[Vec3], face: &[u32; 3]) -> Vec3 {
    (vertices[face[0] as usize] + vertices[face[1] as usize] + vertices[face[2] as usize]) / 3.0
}

/// Two-pointer in-place partition; faces whose centroid lies below the
/// split plane end up first. Returns the count of those faces.
fn partition_faces(vertices: &[Vec3], faces: &mut [[u32; 3]], axis: usize, split: f32) -> usize {
    let mut i = 0;
    let mut j = faces.len();

    while i < j {
        if centroid(vertices, &faces[i])[axis] < split {
            i += 1;
        } else {
            j -= 1;
            faces.swap(i, j);
        }
    }

    i
}

/// Recursively build a BVH over `faces`, which is a sub-range of the
/// mesh's face list starting at `face_offset`.
pub fn build(vertices: &[Vec3], faces: &mut [[u32; 3]], face_offset: usize) -> Box<BvhNode> {
    let mut node = Box::new(BvhNode {
        bounds: compute_bounds(vertices, faces),
        face_index: face_offset,
        face_count: faces.len(),
        left: None,
        right: None,
    });

    if faces.len() <= LEAF_SIZE {
        return node;
    }

    // Split at the midpoint of the largest extent
    let axis = node.bounds.longest_axis();
    let split = (node.bounds.min[axis] + node.bounds.max[axis]) * 0.5;

    let mid = partition_faces(vertices, faces, axis, split);

    // A degenerate partition (everything on one side) stays a leaf
    if mid == 0 || mid == faces.len() {
        return node;
    }

    let (left_faces, right_faces) = faces.split_at_mut(mid);
    node.left = Some(build(vertices, left_faces, face_offset));
    node.right = Some(build(vertices, right_faces, face_offset + mid));

    node
}

/// Möller-Trumbore ray-triangle intersection in the caller's space.
///
/// Degenerate triangles (determinant below epsilon) and intersections at
/// or behind the origin are misses.
pub fn intersect_triangle(origin: Vec3, direction: Vec3, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<Hit> {
    let e1 = v1 - v0;
    let e2 = v2 - v0;

    let pvec = direction.cross(e2);
    let det = e1.dot(pvec);
    if det.abs() < EPS {
        return None;
    }
    let inv_det = 1.0 / det;

    let tvec = origin - v0;
    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(e1);
    let v = direction.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = e2.dot(qvec) * inv_det;
    if t < EPS {
        return None;
    }

    Some(Hit {
        origin: origin + direction * t,
        normal: e1.cross(e2).normalize(),
        distance: t,
        material_index: 0,
    })
}

/// Walk the tree, keeping the nearest triangle hit in `best`.
///
/// `faces` is the mesh's full (permuted) face list; leaves index into it
/// absolutely. `dir_inv` is the componentwise inverse of `direction`.
pub(crate) fn intersect(
    node: &BvhNode,
    vertices: &[Vec3],
    faces: &[[u32; 3]],
    origin: Vec3,
    direction: Vec3,
    dir_inv: Vec3,
    best: &mut Option<Hit>,
) {
    if !node.bounds.hit(origin, dir_inv) {
        return;
    }

    if node.is_leaf() {
        for face in &faces[node.face_index..node.face_index + node.face_count] {
            let v0 = vertices[face[0] as usize];
            let v1 = vertices[face[1] as usize];
            let v2 = vertices[face[2] as usize];

            if let Some(hit) = intersect_triangle(origin, direction, v0, v1, v2) {
                if best.map_or(true, |b| hit.distance < b.distance) {
                    *best = Some(hit);
                }
            }
        }
    } else {
        if let Some(left) = &node.left {
            intersect(left, vertices, faces, origin, direction, dir_inv, best);
        }
        if let Some(right) = &node.right {
            intersect(right, vertices, faces, origin, direction, dir_inv, best);
        }
    }
}
