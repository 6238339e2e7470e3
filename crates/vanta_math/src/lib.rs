// Vanta math types
mod aabb;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;

/// All geometry math is done in f64. The slab test and the rotation
/// round-trips are sensitive to precision, and f64 keeps the tolerances
/// in the nanometer range for scene-scale coordinates.
pub type Vec3 = glam::DVec3;
