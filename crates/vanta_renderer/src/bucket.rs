//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! and in parallel with rayon. The scene is built once and only read during
//! rendering, so worker threads share it without locking.

use crate::renderer::render_pixel;
use crate::{Camera, Color, Hittable, ImageBuffer, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate the grid of buckets covering an image.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let mut buckets = Vec::new();
    let mut index = 0;

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    buckets
}

/// Render a single bucket to a vector of colors.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut StdRng,
) -> Vec<Color> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let global_x = bucket.x + local_x;
            let global_y = bucket.y + local_y;
            pixels.push(render_pixel(camera, world, global_x, global_y, config, rng));
        }
    }

    pixels
}

/// Render the whole image in parallel, one rayon task per bucket.
///
/// Each bucket gets its own `StdRng` derived from `seed` and the bucket
/// index, so the output is reproducible regardless of scheduling order.
pub fn render_parallel(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    seed: u64,
) -> ImageBuffer {
    let buckets = generate_buckets(
        camera.image_width,
        camera.image_height,
        DEFAULT_BUCKET_SIZE,
    );
    log::info!(
        "rendering {}x{} in {} buckets, {} spp",
        camera.image_width,
        camera.image_height,
        buckets.len(),
        config.samples_per_pixel
    );

    let results: Vec<(Bucket, Vec<Color>)> = buckets
        .par_iter()
        .map(|bucket| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(bucket.index as u64));
            let pixels = render_bucket(bucket, camera, world, config, &mut rng);
            log::debug!("bucket {} done", bucket.index);
            (*bucket, pixels)
        })
        .collect();

    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
    for (bucket, pixels) in results {
        for local_y in 0..bucket.height {
            for local_x in 0..bucket.width {
                let color = pixels[(local_y * bucket.width + local_x) as usize];
                image.set(bucket.x + local_x, bucket.y + local_y, color);
            }
        }
    }

    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BvhNode, Lambertian, Sphere};
    use std::sync::Arc;
    use vanta_math::Vec3;

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 100, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid with partial buckets

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 100);
    }

    #[test]
    fn test_parallel_render_is_reproducible() {
        let mut rng = StdRng::seed_from_u64(11);
        let sphere: Arc<dyn Hittable> = Arc::new(Sphere::new(
            Vec3::new(0.0, 0.0, -2.0),
            0.5,
            Lambertian::new(Color::new(0.4, 0.4, 0.8)),
        ));
        let world = BvhNode::new(vec![sphere], 0.0, 1.0, &mut rng).expect("scene builds");

        let mut camera = Camera::new().with_resolution(96, 48);
        camera.initialize();

        let config = RenderConfig {
            samples_per_pixel: 2,
            max_depth: 3,
            ..Default::default()
        };

        let first = render_parallel(&camera, &world, &config, 99);
        let second = render_parallel(&camera, &world, &config, 99);
        assert_eq!(first.pixels, second.pixels);
    }
}
