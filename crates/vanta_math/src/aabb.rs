use crate::{Interval, Ray, Vec3};

/// Axis-aligned bounding box for spatial acceleration structures (BVH).
///
/// A box is defined by its two extreme corners. Constructors keep the
/// componentwise `min <= max` invariant; `surrounding` restores it from any
/// two input boxes by componentwise min/max.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from two corner points, in any order.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create an AABB that surrounds two other AABBs.
    ///
    /// The result is the tightest box containing both inputs. The operation
    /// is commutative and associative, so children's boxes can be folded
    /// upward in any order.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            min: box0.min.min(box1.min),
            max: box0.max.max(box1.max),
        }
    }

    /// Test if a ray intersects this AABB within the given t-window.
    ///
    /// Slab method: each axis independently narrows the running window to
    /// its slab's parametric interval, bailing out as soon as the window
    /// collapses. A zero direction component divides to +-infinity, which
    /// handles axis-parallel rays without any special casing.
    pub fn hit(&self, r: &Ray, mut ray_t: Interval) -> bool {
        for axis in 0..3 {
            let origin = r.origin[axis];
            let dir = r.direction[axis];

            let to_min = (self.min[axis] - origin) / dir;
            let to_max = (self.max[axis] - origin) / dir;

            // min/max of the pair orders the slab crossings for negative
            // direction components
            ray_t.min = to_min.min(to_max).max(ray_t.min);
            ray_t.max = to_min.max(to_max).min(ray_t.max);

            if ray_t.max <= ray_t.min {
                return false;
            }
        }
        true
    }

    /// Translate (move) the AABB by an offset vector.
    pub fn translate(&self, offset: Vec3) -> Aabb {
        Aabb {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// The 8 corner points of the box, all min/max combinations per axis.
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Returns true if the point lies within the closed box region.
    pub fn contains_point(&self, p: Vec3) -> bool {
        (0..3).all(|axis| self.min[axis] <= p[axis] && p[axis] <= self.max[axis])
    }

    /// A box that contains nothing; identity element of `surrounding`.
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_points() {
        let a = Vec3::new(10.0, 0.0, 3.0);
        let b = Vec3::new(0.0, 10.0, 7.0);
        let aabb = Aabb::from_points(a, b);

        assert_eq!(aabb.min, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(aabb.max, Vec3::new(10.0, 10.0, 7.0));
    }

    #[test]
    fn test_aabb_surrounding() {
        let box1 = Aabb::from_points(Vec3::ZERO, Vec3::new(5.0, 5.0, 5.0));
        let box2 = Aabb::from_points(Vec3::new(3.0, 3.0, 3.0), Vec3::new(10.0, 10.0, 10.0));
        let surrounding = Aabb::surrounding(&box1, &box2);

        // Contains both inputs
        for corner in box1.corners().into_iter().chain(box2.corners()) {
            assert!(surrounding.contains_point(corner));
        }

        // Tight: every face touches a corner of one of the inputs
        assert_eq!(surrounding.min, Vec3::ZERO);
        assert_eq!(surrounding.max, Vec3::new(10.0, 10.0, 10.0));
    }

    #[test]
    fn test_aabb_surrounding_commutative() {
        let box1 = Aabb::from_points(Vec3::new(-1.0, 2.0, -3.0), Vec3::new(4.0, 5.0, 6.0));
        let box2 = Aabb::from_points(Vec3::new(0.0, -2.0, 1.0), Vec3::new(2.0, 9.0, 2.0));

        assert_eq!(
            Aabb::surrounding(&box1, &box2),
            Aabb::surrounding(&box2, &box1)
        );
    }

    #[test]
    fn test_aabb_hit() {
        let aabb = Aabb::from_points(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));

        // Ray pointing at the box
        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Ray pointing away
        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(!aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Ray missing the box
        let ray = Ray::new_simple(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(!aabb.hit(&ray, Interval::new(0.0, 100.0)));
    }

    #[test]
    fn test_aabb_hit_unbounded_window() {
        let aabb = Aabb::from_points(Vec3::new(5.0, 5.0, 5.0), Vec3::new(10.0, 10.0, 10.0));

        // A ray whose line passes through the box hits over (-inf, inf) even
        // when the box is behind the origin
        let ray = Ray::new_simple(Vec3::new(20.0, 20.0, 20.0), Vec3::new(1.0, 1.0, 1.0));
        assert!(aabb.hit(&ray, Interval::UNIVERSE));

        // But not over a forward-only window
        assert!(!aabb.hit(&ray, Interval::new(0.0, f64::INFINITY)));
    }

    #[test]
    fn test_aabb_hit_axis_parallel() {
        let aabb = Aabb::from_points(Vec3::new(5.0, 5.0, 5.0), Vec3::new(10.0, 10.0, 10.0));

        // Parallel to Z, origin inside the X and Y slabs: relies on the
        // division producing infinities rather than a pre-check
        let ray = Ray::new_simple(Vec3::new(7.0, 7.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Parallel to Z but outside the X slab: must miss
        let ray = Ray::new_simple(Vec3::new(0.0, 7.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(!aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Parallel to Y, outside the Y slab, moving toward the box on X only
        let ray = Ray::new_simple(Vec3::new(0.0, 12.0, 7.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(!aabb.hit(&ray, Interval::new(0.0, 100.0)));
    }

    #[test]
    fn test_aabb_hit_negative_direction() {
        let aabb = Aabb::from_points(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));

        let ray = Ray::new_simple(Vec3::new(5.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0));
        assert!(aabb.hit(&ray, Interval::new(0.0, 100.0)));
    }

    #[test]
    fn test_aabb_translate() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0));
        let translated = aabb.translate(Vec3::new(5.0, 0.0, 0.0));

        assert_eq!(translated.min, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(translated.max, Vec3::new(6.0, 1.0, 1.0));
    }

    #[test]
    fn test_aabb_empty_is_surrounding_identity() {
        let aabb = Aabb::from_points(Vec3::new(-2.0, 0.0, 1.0), Vec3::new(3.0, 4.0, 5.0));
        assert_eq!(Aabb::surrounding(&Aabb::EMPTY, &aabb), aabb);
        assert_eq!(Aabb::surrounding(&aabb, &Aabb::EMPTY), aabb);
    }
}
