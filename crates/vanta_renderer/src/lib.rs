//! Vanta - CPU path tracer with a BVH acceleration core.
//!
//! The interesting part lives in [`bvh`], [`transform`], and the hittable
//! protocol in [`hittable`]: recursive tree construction over scene objects
//! with a randomized splitting heuristic, slab-test pruning, and nearest-hit
//! narrowing during traversal. The rest (camera, materials, render loop) is
//! the scaffolding needed to point rays at it.

mod bucket;
mod bvh;
mod camera;
mod hittable;
mod material;
mod plane;
mod renderer;
mod sphere;
mod transform;

pub use bucket::{
    generate_buckets, render_bucket, render_parallel, Bucket, DEFAULT_BUCKET_SIZE,
};
pub use bvh::{BvhError, BvhNode};
pub use camera::Camera;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Color, Dielectric, Lambertian, Material, Metal, Scatter};
pub use plane::Plane;
pub use renderer::{color_to_rgba, ray_color, render, render_pixel, ImageBuffer, RenderConfig};
pub use sphere::{MovingSphere, Sphere};
pub use transform::{RotateY, Translate};

/// Re-export the math value types.
pub use vanta_math::{Aabb, Interval, Ray, Vec3};

use rand::{Rng, RngCore};

/// Uniform f64 in [0, 1) from a type-erased RNG.
pub(crate) fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen()
}
