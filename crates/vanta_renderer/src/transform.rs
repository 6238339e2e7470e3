//! Space-transform wrappers around hittables.
//!
//! Instead of transforming geometry, a wrapper transforms the incoming ray
//! into the wrapped object's local space, delegates, and maps the hit back
//! to world space. Both wrappers re-derive the front-face orientation from
//! the transformed ray so the normal sign convention stays consistent.

use crate::hittable::{HitRecord, Hittable};
use std::sync::Arc;
use vanta_math::{Aabb, Interval, Ray, Vec3};

/// Moves the wrapped object by a fixed offset.
pub struct Translate {
    object: Arc<dyn Hittable>,
    offset: Vec3,
}

impl Translate {
    /// Wrap an object, displacing it by `offset`.
    pub fn new(object: Arc<dyn Hittable>, offset: Vec3) -> Self {
        Self { object, offset }
    }
}

impl Hittable for Translate {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        // Move the ray into object space; direction and time are unchanged
        let moved = Ray::new(ray.origin() - self.offset, ray.direction(), ray.time());

        let mut rec = self.object.hit(&moved, ray_t)?;
        rec.p += self.offset;
        let outward = if rec.front_face { rec.normal } else { -rec.normal };
        rec.set_face_normal(&moved, outward);

        Some(rec)
    }

    fn bounding_box(&self, time0: f64, time1: f64) -> Option<Aabb> {
        self.object
            .bounding_box(time0, time1)
            .map(|bbox| bbox.translate(self.offset))
    }
}

/// Rotates the wrapped object about the Y axis by a fixed angle.
///
/// The world-space box is precomputed from the inner box over the reference
/// interval [0, 1] by rotating all 8 corners; rotation boxes are not
/// re-derived per query time window.
pub struct RotateY {
    object: Arc<dyn Hittable>,
    sin_theta: f64,
    cos_theta: f64,
    bbox: Option<Aabb>,
}

impl RotateY {
    /// Wrap an object, rotating it by `angle` degrees about the Y axis.
    pub fn new(object: Arc<dyn Hittable>, angle: f64) -> Self {
        let radians = angle.to_radians();
        let sin_theta = radians.sin();
        let cos_theta = radians.cos();

        let bbox = object.bounding_box(0.0, 1.0).map(|bbox| {
            let mut min = Vec3::INFINITY;
            let mut max = Vec3::NEG_INFINITY;

            for corner in bbox.corners() {
                let rotated = Vec3::new(
                    cos_theta * corner.x + sin_theta * corner.z,
                    corner.y,
                    -sin_theta * corner.x + cos_theta * corner.z,
                );
                min = min.min(rotated);
                max = max.max(rotated);
            }

            Aabb { min, max }
        });

        Self {
            object,
            sin_theta,
            cos_theta,
            bbox,
        }
    }

    /// World -> local: rotate by the inverse angle.
    fn to_local(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.cos_theta * v.x - self.sin_theta * v.z,
            v.y,
            self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }

    /// Local -> world: forward rotation.
    fn to_world(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.cos_theta * v.x + self.sin_theta * v.z,
            v.y,
            -self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }
}

impl Hittable for RotateY {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let rotated = Ray::new(
            self.to_local(ray.origin()),
            self.to_local(ray.direction()),
            ray.time(),
        );

        let mut rec = self.object.hit(&rotated, ray_t)?;
        rec.p = self.to_world(rec.p);
        let outward = if rec.front_face { rec.normal } else { -rec.normal };
        rec.set_face_normal(&rotated, self.to_world(outward));

        Some(rec)
    }

    fn bounding_box(&self, _time0: f64, _time1: f64) -> Option<Aabb> {
        self.bbox
    }
}
