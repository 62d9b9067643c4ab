//! Three spheres over a checkerboard floor.
//!
//! Usage: `cargo run --release --example three_spheres -- [output] [config.json]`
//!
//! The output defaults to `render.ppm`; any extension the `image` crate
//! knows (e.g. `.png`) works too. The optional JSON file overrides
//! individual `RenderConfig` settings. Set `RUST_LOG=info` for progress.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use rt_core::{
    AtomicCounters, Camera, CheckerBoard, Colour, Image, Lens, Material, PerformanceReport, Scene,
    SoftLight, Sphere,
};
use rt_math::Vector;
use rt_renderer::{RenderConfig, Renderer};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let output = args.next().unwrap_or_else(|| "render.ppm".to_string());
    let config = match args.next() {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?
        }
        None => RenderConfig::default(),
    };

    let start = Instant::now();
    let scene = build_scene()?;
    log::info!("Scene built in {:?}", start.elapsed());

    let camera = Camera::new(
        Vector::new(0.0, 60.0, -300.0),
        Vector::new(0.0, 0.0, 0.0),
        50.0,
        50.0,
        Lens::new(50.0).with_aperture(0.5),
    )?;

    let counters = Arc::new(AtomicCounters::new());
    let renderer = Renderer::new(scene, camera, config)?.with_counters(counters.clone());
    let mut image = Image::new(512, 512)?.with_gamma(Colour::new(1.1, 1.1, 1.1));

    let start = Instant::now();
    let stats = renderer.render(&mut image);
    let elapsed = start.elapsed();

    image.save(&output)?;

    let report = PerformanceReport::new(&counters, image.size() as u64, elapsed);
    log::info!("{} pixels supersampled", stats.refined);
    log::info!("{report}");

    Ok(())
}

fn build_scene() -> anyhow::Result<Scene> {
    let red = Arc::new(Material::new(Colour::from_hex(0xff0000), 0.0, 1.0, 0.2, 10.0, 0.0)?);
    let green = Arc::new(Material::new(Colour::from_hex(0x00ff00), 0.0, 1.0, 0.2, 10.0, 0.0)?);
    let blue = Arc::new(Material::new(Colour::from_hex(0x0000ff), 0.0, 1.0, 0.2, 10.0, 0.0)?);
    let mirror = Arc::new(Material::new(Colour::from_hex(0xffffff), 0.0, 0.0, 1.0, 60.0, 0.9)?);
    let light_tile = Arc::new(Material::new(Colour::from_hex(0xeeeeee), 0.05, 0.8, 0.0, 1.0, 0.2)?);
    let dark_tile = Arc::new(Material::new(Colour::from_hex(0x333333), 0.05, 0.8, 0.0, 1.0, 0.2)?);

    let mut scene = Scene::new();
    scene.add_object(Sphere::new(Vector::new(0.0, 50.0, 0.0), 50.0, red)?);
    scene.add_object(Sphere::new(Vector::new(50.0, -50.0, 0.0), 50.0, green)?);
    scene.add_object(Sphere::new(Vector::new(-50.0, -50.0, 0.0), 50.0, blue)?);
    scene.add_object(Sphere::new(Vector::new(0.0, -70.0, -90.0), 30.0, mirror)?);
    scene.add_object(CheckerBoard::new(
        Vector::new(0.0, -100.0, 0.0),
        Vector::Y,
        30.0,
        light_tile,
        dark_tile,
    )?);

    scene.add_light(SoftLight::new(Vector::new(-300.0, 400.0, -400.0), Colour::from_hex(0xffffff), 6.0)?);
    scene.add_light(SoftLight::new(Vector::new(300.0, -50.0, 100.0), Colour::from_hex(0x505050), 6.0)?);

    Ok(scene)
}
