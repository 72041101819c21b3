use pathbounce::core::computation_node::ComputationNode;
use pathbounce::core::emitter::{Geom, GeomShape};
use pathbounce::core::interaction::SurfaceHit;
use pathbounce::core::material::Material;
use pathbounce::core::path::PathSegment;
use pathbounce::core::rng::LcgRng;
use pathbounce::core::settings::ShadingSettings;
use pathbounce::core::settings_loader::load_settings;
use pathbounce::integrators::surface_shader::SurfaceShader;
use pathbounce::math::constants::{Float, Vector3f};
use pathbounce::math::ray::Ray3f;
use pathbounce::shapes::rectangle::Rectangle;

use indicatif::{ProgressBar, ProgressStyle};
use std::env;

const BINS: usize = 10;

fn parse_vec3(value: &str) -> Option<Vector3f> {
    let parts: Vec<Float> = value.split(',').filter_map(|s| s.trim().parse::<Float>().ok()).collect();
    if parts.len() == 3 {
        Some(Vector3f::new(parts[0], parts[1], parts[2]))
    } else {
        None
    }
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut settings_path: Option<String> = None;
    let mut samples: usize = 100_000;
    let mut seed_override: Option<u64> = None;
    let mut albedo = Vector3f::new(0.5, 0.5, 0.5);
    let mut reflective: Float = 0.0;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--samples" => {
                i += 1;
                samples = args.get(i).and_then(|v| v.parse::<usize>().ok()).unwrap_or(samples);
            }
            "--seed" => {
                i += 1;
                seed_override = args.get(i).and_then(|v| v.parse::<u64>().ok());
            }
            "--albedo" => {
                i += 1;
                albedo = args.get(i).and_then(|v| parse_vec3(v)).unwrap_or(albedo);
            }
            "--reflective" => {
                i += 1;
                reflective = args.get(i).and_then(|v| v.parse::<Float>().ok()).unwrap_or(reflective);
            }
            "--help" | "-h" => {
                eprintln!("Usage: {} [settings.xml] [--samples N] [--seed N] [--albedo R,G,B] [--reflective W]", args[0]);
                return;
            }
            other => settings_path = Some(other.to_string()),
        }
        i += 1;
    }

    let mut settings = match settings_path {
        Some(path) => match load_settings(&path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Failed to load settings {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => ShadingSettings::default(),
    };
    if let Some(seed) = seed_override {
        settings.seed = seed;
    }

    let shader = SurfaceShader::from_settings(&settings);
    log::info!("Using {}", shader.describe());

    let mut material = Material::diffuse(albedo);
    material.has_reflective = reflective;
    material.specular.color = Vector3f::new(1.0, 1.0, 1.0);

    let normal = Vector3f::new(0.0, 1.0, 0.0);
    let hit = SurfaceHit::new(Vector3f::zeros(), normal, &material);
    let lights = [Geom::new(
        0,
        GeomShape::Rectangle(Rectangle::new(
            Vector3f::new(-0.5, 2.0, -0.5),
            Vector3f::new(1.0, 0.0, 0.0),
            Vector3f::new(0.0, 0.0, 1.0),
        )),
    )];
    let incoming = Ray3f::new(Vector3f::new(0.0, 1.0, 1.0), Vector3f::new(0.0, -1.0, -1.0));
    let iteration = settings.seed as u32;

    let progress = ProgressBar::new(samples as u64);
    progress.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} samples")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut histogram = [0usize; BINS];
    let mut diffuse_count = 0usize;
    let mut terminated = 0usize;
    let mut beta_sum = Vector3f::zeros();
    let mut light_beta_sum = Vector3f::zeros();
    let mut mis_sum: Float = 0.0;
    let mut light_terminated = 0usize;

    for pixel in 0..samples {
        let mut rng = LcgRng::for_path(pixel, iteration, 0);

        let mut path = PathSegment::new(incoming, pixel, settings.max_depth);
        let sample = shader.scatter_ray(&mut path, &hit, &mut rng);
        if path.is_terminated() {
            terminated += 1;
        } else {
            beta_sum += path.beta;
            if !sample.is_delta {
                let cos_theta = path.ray.dir().dot(&normal).max(0.0).min(1.0);
                histogram[((cos_theta * BINS as Float) as usize).min(BINS - 1)] += 1;
                diffuse_count += 1;
            }
        }

        let mut light_path = PathSegment::new(incoming, pixel, settings.max_depth);
        match shader.scatter_ray_to_light(&mut light_path, &hit, &lights, &mut rng) {
            Some(record) if !light_path.is_terminated() => {
                light_beta_sum += light_path.beta;
                mis_sum += record.mis_weight();
            }
            _ => light_terminated += 1,
        }

        if pixel % 1024 == 0 {
            progress.inc(1024u64.min((samples - pixel) as u64));
        }
    }
    progress.finish_and_clear();

    let n = samples.max(1) as Float;
    let mean_beta = beta_sum / n;
    println!("bsdf sampling: {} samples, {} terminated", samples, terminated);
    println!("  mean throughput R {:.6}, G {:.6}, B {:.6}", mean_beta.x, mean_beta.y, mean_beta.z);

    if diffuse_count > 0 {
        let mut chi2 = 0.0f64;
        for (b, &count) in histogram.iter().enumerate() {
            let lo = b as f64 / BINS as f64;
            let hi = (b + 1) as f64 / BINS as f64;
            let expected = (hi * hi - lo * lo) * diffuse_count as f64;
            let diff = count as f64 - expected;
            chi2 += diff * diff / expected;
            println!("  cos in [{:.1}, {:.1}): {:>8} (expected {:.1})", lo, hi, count, expected);
        }
        println!("  chi-squared vs cos/pi: {:.3} ({} dof)", chi2, BINS - 1);
    }

    let light_ok = samples - light_terminated;
    println!("light sampling: {} samples, {} terminated", samples, light_terminated);
    if light_ok > 0 {
        let mean_light_beta = light_beta_sum / light_ok as Float;
        println!("  mean throughput R {:.6}, G {:.6}, B {:.6}",
                 mean_light_beta.x, mean_light_beta.y, mean_light_beta.z);
        println!("  mean power-heuristic weight {:.6}", mis_sum / light_ok as Float);
    }
}
