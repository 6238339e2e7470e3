//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree over the scene's hittables. Each node caches the box of its
//! subtree, so traversal can prune whole subtrees with one slab test. The
//! split heuristic is the classic randomized one: pick an axis at random,
//! sort the range by each object's minimum box corner on that axis, split at
//! the midpoint. Expected-balanced trees at O(n log n) build cost, without a
//! surface-area heuristic.

use crate::hittable::{HitRecord, Hittable};
use rand::{Rng, RngCore};
use std::cmp::Ordering;
use std::sync::Arc;
use thiserror::Error;
use vanta_math::{Aabb, Interval, Ray};

/// Errors from BVH construction.
///
/// Placing an unboxable object into a BVH is a scene-configuration error and
/// is rejected at build time rather than producing a degenerate tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BvhError {
    #[error("cannot build a BVH from an empty object list")]
    EmptyScene,
    #[error("object without a bounding box cannot be placed in a BVH")]
    UnboundedObject,
}

/// A node of the hierarchy; the root doubles as the whole tree.
///
/// Children are shared handles because a single-object range puts the same
/// object into both slots (the hit test runs twice on it, which is correct,
/// just redundant; such leaves are rare).
pub struct BvhNode {
    left: Arc<dyn Hittable>,
    right: Arc<dyn Hittable>,
    bbox: Aabb,
}

impl BvhNode {
    /// Build a BVH over the given objects.
    ///
    /// `time0..time1` is the interval bounding boxes are computed over
    /// (moving primitives may sweep during it). The axis choice at every
    /// node comes from `rng`; pass a seeded generator for a reproducible
    /// tree shape.
    pub fn new(
        objects: Vec<Arc<dyn Hittable>>,
        time0: f64,
        time1: f64,
        rng: &mut dyn RngCore,
    ) -> Result<Self, BvhError> {
        if objects.is_empty() {
            return Err(BvhError::EmptyScene);
        }

        log::debug!("building BVH over {} objects", objects.len());
        Self::build(objects, time0, time1, rng)
    }

    fn build(
        objects: Vec<Arc<dyn Hittable>>,
        time0: f64,
        time1: f64,
        rng: &mut dyn RngCore,
    ) -> Result<Self, BvhError> {
        let axis = rng.gen_range(0..3usize);

        let (left, right): (Arc<dyn Hittable>, Arc<dyn Hittable>) = match objects.len() {
            0 => return Err(BvhError::EmptyScene),
            1 => {
                // Degenerate leaf: the object fills both slots
                let object = objects.into_iter().next().ok_or(BvhError::EmptyScene)?;
                (object.clone(), object)
            }
            2 => {
                let key0 = min_corner_coord(objects[0].as_ref(), axis, time0, time1)?;
                let key1 = min_corner_coord(objects[1].as_ref(), axis, time0, time1)?;

                let mut iter = objects.into_iter();
                let (first, second) = match (iter.next(), iter.next()) {
                    (Some(a), Some(b)) => (a, b),
                    _ => return Err(BvhError::EmptyScene),
                };

                if key0 <= key1 {
                    (first, second)
                } else {
                    (second, first)
                }
            }
            len => {
                // Sort by the minimum box corner on the chosen axis, then
                // split the range at the midpoint
                let mut keyed = objects
                    .into_iter()
                    .map(|object| {
                        let key = min_corner_coord(object.as_ref(), axis, time0, time1)?;
                        Ok((key, object))
                    })
                    .collect::<Result<Vec<_>, BvhError>>()?;

                keyed.sort_unstable_by(|a, b| {
                    a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal)
                });

                let right_half = keyed.split_off(len / 2);
                let left_objects = keyed.into_iter().map(|(_, object)| object).collect();
                let right_objects = right_half.into_iter().map(|(_, object)| object).collect();

                let left = Self::build(left_objects, time0, time1, rng)?;
                let right = Self::build(right_objects, time0, time1, rng)?;
                (
                    Arc::new(left) as Arc<dyn Hittable>,
                    Arc::new(right) as Arc<dyn Hittable>,
                )
            }
        };

        // Both children of a freshly built node are boxable by construction,
        // but the error is kept constructive rather than panicking
        let left_box = left
            .bounding_box(time0, time1)
            .ok_or(BvhError::UnboundedObject)?;
        let right_box = right
            .bounding_box(time0, time1)
            .ok_or(BvhError::UnboundedObject)?;

        Ok(Self {
            left,
            right,
            bbox: Aabb::surrounding(&left_box, &right_box),
        })
    }

    #[cfg(test)]
    pub(crate) fn children(&self) -> (&Arc<dyn Hittable>, &Arc<dyn Hittable>) {
        (&self.left, &self.right)
    }
}

/// Comparator key: the minimum box corner coordinate on the given axis.
///
/// The minimum corner (not the centroid) is the sort key; this affects which
/// side of a split an object lands on and is kept deliberately.
fn min_corner_coord(
    object: &dyn Hittable,
    axis: usize,
    time0: f64,
    time1: f64,
) -> Result<f64, BvhError> {
    object
        .bounding_box(time0, time1)
        .map(|bbox| bbox.min[axis])
        .ok_or(BvhError::UnboundedObject)
}

impl Hittable for BvhNode {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        if !self.bbox.hit(ray, ray_t) {
            return None;
        }

        let hit_left = self.left.hit(ray, ray_t);

        // A left hit narrows the window for the right child, so the right
        // test can only find something strictly closer
        let upper = hit_left.as_ref().map_or(ray_t.max, |rec| rec.t);
        let hit_right = self.right.hit(ray, Interval::new(ray_t.min, upper));

        hit_right.or(hit_left)
    }

    fn bounding_box(&self, _time0: f64, _time1: f64) -> Option<Aabb> {
        // Cached at build time; always present by construction
        Some(self.bbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, HittableList, Lambertian, Plane, Sphere};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use vanta_math::Vec3;

    fn sphere(center: Vec3, radius: f64) -> Arc<dyn Hittable> {
        Arc::new(Sphere::new(
            center,
            radius,
            Lambertian::new(Color::new(0.5, 0.5, 0.5)),
        ))
    }

    #[test]
    fn test_bvh_empty_list_is_an_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = BvhNode::new(vec![], 0.0, 1.0, &mut rng);
        assert_eq!(result.err(), Some(BvhError::EmptyScene));
    }

    #[test]
    fn test_bvh_rejects_unbounded_object() {
        let mut rng = StdRng::seed_from_u64(1);
        let plane: Arc<dyn Hittable> =
            Arc::new(Plane::new(Vec3::ZERO, Vec3::Y, Lambertian::new(Color::ONE)));
        let objects = vec![sphere(Vec3::ZERO, 1.0), plane, sphere(Vec3::X * 5.0, 1.0)];

        let result = BvhNode::new(objects, 0.0, 1.0, &mut rng);
        assert_eq!(result.err(), Some(BvhError::UnboundedObject));
    }

    #[test]
    fn test_bvh_single_object() {
        let mut rng = StdRng::seed_from_u64(1);
        let object = sphere(Vec3::new(0.0, 0.0, -3.0), 0.5);
        let bvh = BvhNode::new(vec![object.clone()], 0.0, 1.0, &mut rng)
            .expect("single sphere builds");

        // Both children alias the one object, and the node box is its box
        let (left, right) = bvh.children();
        assert!(Arc::ptr_eq(left, right));
        assert_eq!(
            bvh.bounding_box(0.0, 1.0),
            object.bounding_box(0.0, 1.0)
        );

        let ray = Ray::new_simple(Vec3::ZERO, Vec3::NEG_Z);
        let rec = bvh
            .hit(&ray, Interval::new(0.001, f64::INFINITY))
            .expect("ray aimed at the sphere");
        assert!((rec.t - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_bvh_two_objects_ordered_by_min_corner() {
        // Separated identically on every axis, so the ordering is the same
        // whichever axis the builder picks
        let near = sphere(Vec3::new(-5.0, -5.0, -5.0), 1.0);
        let far = sphere(Vec3::new(5.0, 5.0, 5.0), 1.0);

        let mut rng = StdRng::seed_from_u64(3);
        let bvh = BvhNode::new(vec![far, near], 0.0, 1.0, &mut rng).expect("pair builds");

        let (left, right) = bvh.children();
        let left_box = left.bounding_box(0.0, 1.0).unwrap();
        let right_box = right.bounding_box(0.0, 1.0).unwrap();
        for axis in 0..3 {
            assert!(left_box.min[axis] < right_box.min[axis]);
        }
    }

    #[test]
    fn test_bvh_three_spheres_nearest_along_z() {
        let objects: Vec<Arc<dyn Hittable>> = vec![
            sphere(Vec3::new(-2.0, 0.0, 0.0), 1.0),
            sphere(Vec3::new(0.0, 0.0, 0.0), 1.0),
            sphere(Vec3::new(2.0, 0.0, 0.0), 1.0),
        ];

        let mut list = HittableList::new();
        list.add(Box::new(Sphere::new(
            Vec3::new(-2.0, 0.0, 0.0),
            1.0,
            Lambertian::new(Color::ONE),
        )));
        list.add(Box::new(Sphere::new(
            Vec3::ZERO,
            1.0,
            Lambertian::new(Color::ONE),
        )));
        list.add(Box::new(Sphere::new(
            Vec3::new(2.0, 0.0, 0.0),
            1.0,
            Lambertian::new(Color::ONE),
        )));

        let mut rng = StdRng::seed_from_u64(9);
        let bvh = BvhNode::new(objects, 0.0, 1.0, &mut rng).expect("spheres build");

        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        let window = Interval::new(0.001, f64::INFINITY);

        let bvh_rec = bvh.hit(&ray, window).expect("ray hits the center sphere");
        let list_rec = list.hit(&ray, window).expect("brute force agrees");

        assert!((bvh_rec.t - 9.0).abs() < 1e-6);
        assert!((bvh_rec.t - list_rec.t).abs() < 1e-6);
    }

    #[test]
    fn test_bvh_matches_brute_force_on_random_scenes() {
        let mut rng = StdRng::seed_from_u64(0xB41);

        for _ in 0..20 {
            let n = rng.gen_range(1..40);

            let mut objects: Vec<Arc<dyn Hittable>> = Vec::with_capacity(n);
            let mut list = HittableList::new();
            for _ in 0..n {
                let center = Vec3::new(
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                );
                let radius = rng.gen_range(0.1..2.0);
                objects.push(sphere(center, radius));
                list.add(Box::new(Sphere::new(
                    center,
                    radius,
                    Lambertian::new(Color::ONE),
                )));
            }

            let bvh = BvhNode::new(objects, 0.0, 1.0, &mut rng).expect("random scene builds");

            for _ in 0..200 {
                let origin = Vec3::new(
                    rng.gen_range(-15.0..15.0),
                    rng.gen_range(-15.0..15.0),
                    rng.gen_range(-15.0..15.0),
                );
                let direction = Vec3::new(
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                );
                if direction.length_squared() < 1e-6 {
                    continue;
                }
                let ray = Ray::new_simple(origin, direction);
                let window = Interval::new(0.001, f64::INFINITY);

                match (bvh.hit(&ray, window), list.hit(&ray, window)) {
                    (Some(a), Some(b)) => {
                        assert!(
                            (a.t - b.t).abs() < 1e-9,
                            "BVH t {} != brute force t {}",
                            a.t,
                            b.t
                        );
                        assert!((a.p - b.p).length() < 1e-9);
                        assert_eq!(a.front_face, b.front_face);
                    }
                    (None, None) => {}
                    (a, b) => panic!(
                        "BVH and brute force disagree: bvh hit = {}, list hit = {}",
                        a.is_some(),
                        b.is_some()
                    ),
                }
            }
        }
    }

    #[test]
    fn test_bvh_respects_narrow_window() {
        let objects: Vec<Arc<dyn Hittable>> = vec![
            sphere(Vec3::new(0.0, 0.0, -5.0), 1.0),
            sphere(Vec3::new(0.0, 0.0, -20.0), 1.0),
        ];
        let mut rng = StdRng::seed_from_u64(5);
        let bvh = BvhNode::new(objects, 0.0, 1.0, &mut rng).expect("pair builds");

        let ray = Ray::new_simple(Vec3::ZERO, Vec3::NEG_Z);

        // Window past the near sphere: only the far one is reachable
        let rec = bvh
            .hit(&ray, Interval::new(10.0, f64::INFINITY))
            .expect("far sphere is inside the window");
        assert!((rec.t - 19.0).abs() < 1e-9);

        // Window short of everything
        assert!(bvh.hit(&ray, Interval::new(0.001, 3.0)).is_none());
    }
}
