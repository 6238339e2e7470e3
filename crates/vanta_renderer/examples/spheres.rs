//! Renders a small demo scene to spheres.png.
//!
//! Run with: cargo run --release --example spheres

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use vanta_renderer::{
    render_parallel, BvhNode, Camera, Color, Dielectric, Hittable, HittableList, Lambertian,
    Metal, MovingSphere, Plane, RenderConfig, RotateY, Sphere, Translate, Vec3,
};

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(2024);

    // Bounded objects go into the BVH
    let mut objects: Vec<Arc<dyn Hittable>> = vec![
        Arc::new(Sphere::new(
            Vec3::new(-2.2, 1.0, 0.0),
            1.0,
            Lambertian::new(Color::new(0.7, 0.3, 0.3)),
        )),
        Arc::new(Sphere::new(
            Vec3::new(0.0, 1.0, 0.0),
            1.0,
            Dielectric::new(1.5),
        )),
        Arc::new(Sphere::new(
            Vec3::new(2.2, 1.0, 0.0),
            1.0,
            Metal::new(Color::new(0.8, 0.8, 0.9), 0.05),
        )),
        Arc::new(MovingSphere::new(
            Vec3::new(-0.8, 0.3, 2.0),
            Vec3::new(0.8, 0.3, 2.0),
            0.0,
            1.0,
            0.3,
            Lambertian::new(Color::new(0.2, 0.6, 0.2)),
        )),
    ];

    // A small sphere swung around the origin by the transform wrappers
    let satellite: Arc<dyn Hittable> = Arc::new(Sphere::new(
        Vec3::new(3.5, 0.0, 0.0),
        0.4,
        Lambertian::new(Color::new(0.9, 0.7, 0.2)),
    ));
    let satellite = Arc::new(RotateY::new(satellite, 35.0));
    objects.push(Arc::new(Translate::new(satellite, Vec3::new(0.0, 0.4, 0.0))));

    let bvh = BvhNode::new(objects, 0.0, 1.0, &mut rng).context("building scene BVH")?;

    // The unbounded ground plane sits next to the BVH in a flat list
    let mut world = HittableList::new();
    world.add(Box::new(bvh));
    world.add(Box::new(Plane::new(
        Vec3::ZERO,
        Vec3::Y,
        Lambertian::new(Color::new(0.5, 0.5, 0.5)),
    )));

    let mut camera = Camera::new()
        .with_resolution(800, 450)
        .with_position(Vec3::new(0.0, 2.5, 9.0), Vec3::new(0.0, 1.0, 0.0), Vec3::Y)
        .with_vfov(35.0)
        .with_shutter(0.0, 1.0);
    camera.initialize();

    let config = RenderConfig {
        samples_per_pixel: 64,
        max_depth: 20,
        ..Default::default()
    };

    let image_buffer = render_parallel(&camera, &world, &config, 2024);

    let rgba = image::RgbaImage::from_raw(
        image_buffer.width,
        image_buffer.height,
        image_buffer.to_rgba(),
    )
    .context("image buffer size mismatch")?;
    rgba.save("spheres.png").context("writing spheres.png")?;

    log::info!("wrote spheres.png");
    Ok(())
}
