use crate::Vec3;

/// Axis-aligned bounding box used by the mesh BVH.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// An empty AABB (contains nothing); growing it by any point yields
    /// that point.
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Create an AABB from two corner points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(a: &Aabb, b: &Aabb) -> Self {
        Self {
            min: a.min.min(b.min),
            max: a.max.max(b.max),
        }
    }

    /// Extend the box to contain a point.
    pub fn grow(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Size of the box along each axis.
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Returns the index (0=X, 1=Y, 2=Z) of the axis with the largest
    /// extent. Ties go to the lower-indexed axis.
    pub fn longest_axis(&self) -> usize {
        let extent = self.extent();
        let mut axis = 0;
        if extent[1] > extent[axis] {
            axis = 1;
        }
        if extent[2] > extent[axis] {
            axis = 2;
        }
        axis
    }

    /// Slab test against a ray given the precomputed componentwise inverse
    /// of its direction.
    pub fn hit(&self, origin: Vec3, dir_inv: Vec3) -> bool {
        let mut tmin = f32::NEG_INFINITY;
        let mut tmax = f32::INFINITY;

        for axis in 0..3 {
            let mut t0 = (self.min[axis] - origin[axis]) * dir_inv[axis];
            let mut t1 = (self.max[axis] - origin[axis]) * dir_inv[axis];
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            tmin = tmin.max(t0);
            tmax = tmax.min(t1);

            if tmax < tmin {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_points() {
        let aabb = Aabb::from_points(Vec3::new(10.0, 0.0, 3.0), Vec3::new(0.0, 10.0, -3.0));

        assert_eq!(aabb.min, Vec3::new(0.0, 0.0, -3.0));
        assert_eq!(aabb.max, Vec3::new(10.0, 10.0, 3.0));
    }

    #[test]
    fn test_aabb_surrounding() {
        let box1 = Aabb::from_points(Vec3::ZERO, Vec3::new(5.0, 5.0, 5.0));
        let box2 = Aabb::from_points(Vec3::new(3.0, 3.0, 3.0), Vec3::new(10.0, 10.0, 10.0));
        let surrounding = Aabb::surrounding(&box1, &box2);

        assert_eq!(surrounding.min, Vec3::ZERO);
        assert_eq!(surrounding.max, Vec3::splat(10.0));
    }

    #[test]
    fn test_aabb_grow_from_empty() {
        let mut aabb = Aabb::EMPTY;
        aabb.grow(Vec3::new(1.0, -2.0, 3.0));
        aabb.grow(Vec3::new(-1.0, 2.0, 0.0));

        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_aabb_centroid() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::splat(10.0));
        assert_eq!(aabb.centroid(), Vec3::splat(5.0));
    }

    #[test]
    fn test_aabb_longest_axis() {
        let aabb_x = Aabb::from_points(Vec3::ZERO, Vec3::new(10.0, 1.0, 1.0));
        assert_eq!(aabb_x.longest_axis(), 0);

        let aabb_y = Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 10.0, 1.0));
        assert_eq!(aabb_y.longest_axis(), 1);

        let aabb_z = Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 1.0, 10.0));
        assert_eq!(aabb_z.longest_axis(), 2);
    }

    #[test]
    fn test_aabb_longest_axis_ties_prefer_lower() {
        let cube = Aabb::from_points(Vec3::ZERO, Vec3::splat(2.0));
        assert_eq!(cube.longest_axis(), 0);

        let yz = Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 4.0, 4.0));
        assert_eq!(yz.longest_axis(), 1);
    }

    #[test]
    fn test_aabb_slab_hit() {
        let aabb = Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0));

        // Ray pointing at center
        let dir = Vec3::new(0.0, 0.0, 1.0);
        assert!(aabb.hit(Vec3::new(0.0, 0.0, -5.0), dir.recip()));

        // Ray pointing away still intersects the slab line behind the
        // origin; the box is crossed by the infinite line
        let dir = Vec3::new(0.0, 0.0, -1.0);
        assert!(aabb.hit(Vec3::new(0.0, 0.0, -5.0), dir.recip()));

        // Ray missing the box sideways
        let dir = Vec3::new(0.0, 0.0, 1.0);
        assert!(!aabb.hit(Vec3::new(10.0, 0.0, 0.0), dir.recip()));
    }

    #[test]
    fn test_aabb_slab_axis_parallel_ray() {
        let aabb = Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0));

        // Direction has a zero component; inverse is infinite on that axis
        let dir = Vec3::new(0.0, 1.0, 0.0);
        assert!(aabb.hit(Vec3::new(0.5, -5.0, 0.5), dir.recip()));
        assert!(!aabb.hit(Vec3::new(2.0, -5.0, 0.5), dir.recip()));
    }
}
