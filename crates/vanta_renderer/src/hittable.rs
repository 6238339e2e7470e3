//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Material, Ray};
use vanta_math::{Aabb, Interval, Vec3};

/// Record of a ray-object intersection.
#[derive(Clone)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal at intersection (always points against the ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a dyn Material,
    /// UV texture coordinates
    pub u: f64,
    pub v: f64,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record from an outward normal, orienting it against the ray.
    pub fn new(
        ray: &Ray,
        t: f64,
        p: Vec3,
        outward_normal: Vec3,
        u: f64,
        v: f64,
        material: &'a dyn Material,
    ) -> Self {
        let mut rec = Self {
            p,
            normal: outward_normal,
            material,
            u,
            v,
            t,
            front_face: false,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction, with
    /// `front_face` recording which side was hit. Transform wrappers call
    /// this again with the transformed ray to keep the convention
    /// self-consistent.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        // If the ray and normal point in the same direction, we're inside
        self.front_face = ray.direction().dot(outward_normal) < 0.0;

        // Normal always points against the ray
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test a ray against this object within the open t-window `ray_t`.
    ///
    /// Returns the closest intersection in the window, or `None`. Reporting
    /// the closest hit (not merely any hit) is load-bearing: composite
    /// objects narrow the window of nested calls using the returned t.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;

    /// The axis-aligned bounding box of this object over `[time0, time1]`.
    ///
    /// Returns `None` for objects with unbounded extent (infinite planes).
    fn bounding_box(&self, time0: f64, time1: f64) -> Option<Aabb>;
}

/// A flat list of hittable objects, intersected by linear scan.
#[derive(Default)]
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Clear all objects from the list.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord> = None;

        for object in &self.objects {
            let upper = closest.as_ref().map_or(ray_t.max, |rec| rec.t);
            if let Some(rec) = object.hit(ray, Interval::new(ray_t.min, upper)) {
                closest = Some(rec);
            }
        }

        closest
    }

    fn bounding_box(&self, time0: f64, time1: f64) -> Option<Aabb> {
        let mut bbox = Aabb::EMPTY;
        for object in &self.objects {
            bbox = Aabb::surrounding(&bbox, &object.bounding_box(time0, time1)?);
        }
        Some(bbox)
    }
}
