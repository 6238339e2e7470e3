//! Pinhole camera for ray generation.

use crate::gen_f64;
use rand::RngCore;
use vanta_math::{Ray, Vec3};

/// Camera for generating rays into the scene.
#[derive(Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    /// Vertical field of view in degrees
    vfov: f64,

    /// Shutter interval; ray times are sampled uniformly from it
    shutter_open: f64,
    shutter_close: f64,

    // Cached computed values (set by initialize())
    center: Vec3,
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            image_width: 800,
            image_height: 450,
            look_from: Vec3::ZERO,
            look_at: Vec3::NEG_Z,
            vup: Vec3::Y,
            vfov: 90.0,
            shutter_open: 0.0,
            shutter_close: 0.0,
            center: Vec3::ZERO,
            pixel00_loc: Vec3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set the vertical field of view in degrees.
    pub fn with_vfov(mut self, vfov: f64) -> Self {
        self.vfov = vfov;
        self
    }

    /// Set the shutter interval for motion blur.
    pub fn with_shutter(mut self, open: f64, close: f64) -> Self {
        self.shutter_open = open;
        self.shutter_close = close;
        self
    }

    /// Initialize the camera (must be called before generating rays).
    pub fn initialize(&mut self) {
        self.center = self.look_from;

        // Viewport dimensions from the vertical fov
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = viewport_height * (self.image_width as f64 / self.image_height as f64);

        // Orthonormal camera basis
        let w = (self.look_from - self.look_at).normalize();
        let u = self.vup.cross(w).normalize();
        let v = w.cross(u);

        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;

        self.pixel_delta_u = viewport_u / self.image_width as f64;
        self.pixel_delta_v = viewport_v / self.image_height as f64;

        let viewport_upper_left = self.center - w - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);
    }

    /// Generate a ray for pixel (i, j) with random subpixel jitter.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset_x = gen_f64(rng) - 0.5;
        let offset_y = gen_f64(rng) - 0.5;

        let pixel_sample = self.pixel00_loc
            + ((i as f64) + offset_x) * self.pixel_delta_u
            + ((j as f64) + offset_y) * self.pixel_delta_v;

        let ray_time = if self.shutter_close > self.shutter_open {
            self.shutter_open + gen_f64(rng) * (self.shutter_close - self.shutter_open)
        } else {
            self.shutter_open
        };

        Ray::new(self.center, pixel_sample - self.center, ray_time)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
