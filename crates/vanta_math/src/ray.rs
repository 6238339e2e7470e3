use crate::Vec3;

/// A ray in 3D space with origin, direction, and time.
///
/// Rays represent a line starting at `origin` and traveling in `direction`.
/// The `time` field is the instant the ray samples; moving primitives use it
/// to position themselves. A ray is immutable once constructed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub time: f64,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3, time: f64) -> Self {
        Self {
            origin,
            direction,
            time,
        }
    }

    /// Create a ray at time 0.
    pub fn new_simple(origin: Vec3, direction: Vec3) -> Self {
        Self::new(origin, direction, 0.0)
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray (not necessarily normalized).
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the time value of the ray.
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }
}
