//! Sphere primitives, static and moving.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use std::f64::consts::PI;
use vanta_math::{Aabb, Interval, Vec3};

/// A sphere with a fixed center.
pub struct Sphere<M: Material> {
    center: Vec3,
    radius: f64,
    material: M,
    bbox: Aabb,
}

impl<M: Material> Sphere<M> {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f64, material: M) -> Self {
        let radius = radius.max(0.0);
        let rvec = Vec3::splat(radius);
        let bbox = Aabb::from_points(center - rvec, center + rvec);

        Self {
            center,
            radius,
            material,
            bbox,
        }
    }
}

/// Get the UV coordinates for a point on the unit sphere.
fn sphere_uv(p: Vec3) -> (f64, f64) {
    // theta: angle down from +Y, phi: angle around Y axis from +X
    let theta = (-p.y).acos();
    let phi = (-p.z).atan2(p.x) + PI;

    (phi / (2.0 * PI), theta / PI)
}

/// Nearest quadratic root in the open window, shared by both sphere kinds.
fn hit_sphere_at<'a>(
    center: Vec3,
    radius: f64,
    material: &'a dyn Material,
    ray: &Ray,
    ray_t: Interval,
) -> Option<HitRecord<'a>> {
    let oc = center - ray.origin();
    let a = ray.direction().length_squared();
    let h = ray.direction().dot(oc);
    let c = oc.length_squared() - radius * radius;

    let discriminant = h * h - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();

    // Find the nearest root in the acceptable range
    let mut root = (h - sqrtd) / a;
    if !ray_t.surrounds(root) {
        root = (h + sqrtd) / a;
        if !ray_t.surrounds(root) {
            return None;
        }
    }

    let p = ray.at(root);
    let outward_normal = (p - center) / radius;
    let (u, v) = sphere_uv(outward_normal);

    Some(HitRecord::new(ray, root, p, outward_normal, u, v, material))
}

impl<M: Material> Hittable for Sphere<M> {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        hit_sphere_at(self.center, self.radius, &self.material, ray, ray_t)
    }

    fn bounding_box(&self, _time0: f64, _time1: f64) -> Option<Aabb> {
        Some(self.bbox)
    }
}

/// A sphere whose center moves linearly from `center0` at `time0` to
/// `center1` at `time1`.
pub struct MovingSphere<M: Material> {
    center0: Vec3,
    center1: Vec3,
    time0: f64,
    time1: f64,
    radius: f64,
    material: M,
}

impl<M: Material> MovingSphere<M> {
    /// Create a new moving sphere.
    pub fn new(
        center0: Vec3,
        center1: Vec3,
        time0: f64,
        time1: f64,
        radius: f64,
        material: M,
    ) -> Self {
        Self {
            center0,
            center1,
            time0,
            time1,
            radius: radius.max(0.0),
            material,
        }
    }

    /// Center position at the given time.
    fn center(&self, time: f64) -> Vec3 {
        self.center0
            + ((time - self.time0) / (self.time1 - self.time0)) * (self.center1 - self.center0)
    }

    fn box_at(&self, time: f64) -> Aabb {
        let rvec = Vec3::splat(self.radius);
        let center = self.center(time);
        Aabb::from_points(center - rvec, center + rvec)
    }
}

impl<M: Material> Hittable for MovingSphere<M> {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        hit_sphere_at(
            self.center(ray.time()),
            self.radius,
            &self.material,
            ray,
            ray_t,
        )
    }

    /// Union of the endpoint boxes. No finer time sampling: the box at the
    /// two endpoints already covers every linearly interpolated center.
    fn bounding_box(&self, time0: f64, time1: f64) -> Option<Aabb> {
        Some(Aabb::surrounding(
            &self.box_at(time0),
            &self.box_at(time1),
        ))
    }
}
