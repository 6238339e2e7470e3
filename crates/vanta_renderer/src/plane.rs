//! Infinite plane primitive.
//!
//! Planes have unbounded extent, so `bounding_box` returns `None`. They can
//! live in a `HittableList` but not in a BVH.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use vanta_math::{Aabb, Interval, Vec3};

/// An infinite plane through `point` with the given surface normal.
pub struct Plane<M: Material> {
    point: Vec3,
    normal: Vec3,
    material: M,
}

impl<M: Material> Plane<M> {
    /// Create a new plane. The normal is normalized on construction.
    pub fn new(point: Vec3, normal: Vec3, material: M) -> Self {
        Self {
            point,
            normal: normal.normalize(),
            material,
        }
    }
}

impl<M: Material> Hittable for Plane<M> {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let denom = ray.direction().dot(self.normal);
        if denom.abs() < 1e-12 {
            // Ray parallel to the plane
            return None;
        }

        let t = (self.point - ray.origin()).dot(self.normal) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }

        Some(HitRecord::new(
            ray,
            t,
            ray.at(t),
            self.normal,
            0.0,
            0.0,
            &self.material,
        ))
    }

    fn bounding_box(&self, _time0: f64, _time1: f64) -> Option<Aabb> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Lambertian};

    #[test]
    fn test_plane_hit() {
        let plane = Plane::new(Vec3::ZERO, Vec3::Y, Lambertian::new(Color::ONE));

        let ray = Ray::new_simple(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);
        let rec = plane
            .hit(&ray, Interval::new(0.001, f64::INFINITY))
            .expect("ray should hit the ground plane");

        assert!((rec.t - 5.0).abs() < 1e-12);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Y);
    }

    #[test]
    fn test_plane_parallel_ray_misses() {
        let plane = Plane::new(Vec3::ZERO, Vec3::Y, Lambertian::new(Color::ONE));

        let ray = Ray::new_simple(Vec3::new(0.0, 1.0, 0.0), Vec3::X);
        assert!(plane.hit(&ray, Interval::new(0.001, f64::INFINITY)).is_none());
    }

    #[test]
    fn test_plane_has_no_bounding_box() {
        let plane = Plane::new(Vec3::ZERO, Vec3::Y, Lambertian::new(Color::ONE));
        assert!(plane.bounding_box(0.0, 1.0).is_none());
    }
}
