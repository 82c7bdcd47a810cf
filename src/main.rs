use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use glam::Vec3A;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};

mod cli;
mod logger;
mod output;

use cli::Args;
use glint::camera::Camera;
use glint::geometry::Shape;
use glint::material::{Appearance, Material};
use glint::parallel::render_parallel;
use glint::pool::ThreadPool;
use glint::render::TraceSettings;
use glint::scene::{BasicScene, Object};
use glint::screen::SwScreen;
use logger::init_logger;
use output::save_screen_as_png;

/// Scene snapshot at `time`: reflective spheres bobbing over a mirror floor.
///
/// Rendering never observes mutation; every frame gets a fresh scene.
fn example_scene(time: f32) -> BasicScene {
    let bob = |phase: f32, amplitude: f32| amplitude * (time + phase).sin();

    let striped_center = Vec3A::new(5.0, 2.0 + bob(4.8, 0.3), -10.0);
    let floor = Appearance::Solid(Material {
        color: Vec3A::new(0.6, 0.6, 0.6),
        reflectivity: 0.8,
        roughness: 0.0,
    });

    BasicScene::with_objects(vec![
        Object {
            shape: Shape::Sphere {
                center: Vec3A::new(-5.0, 2.0 + bob(0.0, 0.6), -10.0),
                radius: 2.5,
            },
            appearance: Appearance::Solid(Material {
                color: Vec3A::new(0.8, 0.8, 0.8),
                reflectivity: 0.8,
                roughness: 0.0,
            }),
        },
        Object {
            shape: Shape::Sphere {
                center: striped_center,
                radius: 2.5,
            },
            appearance: Appearance::Stripes {
                origin: striped_center,
                frequency: 8.0 * std::f32::consts::PI,
                crest: Vec3A::new(1.0, 0.2, 0.2),
                trough: Vec3A::new(0.0, 0.2, 0.2),
                reflectivity: 0.8,
                roughness: 0.0,
            },
        },
        Object {
            shape: Shape::Sphere {
                center: Vec3A::new(0.0, 0.8 + bob(4.8, 0.2), -7.0),
                radius: 1.5,
            },
            appearance: Appearance::Solid(Material {
                color: Vec3A::new(0.8, 0.0, 0.0),
                reflectivity: 0.8,
                roughness: 0.0,
            }),
        },
        Object {
            shape: Shape::Sphere {
                center: Vec3A::new(2.0, 0.5, -5.0),
                radius: 0.8,
            },
            appearance: Appearance::Solid(Material {
                color: Vec3A::new(0.8, 0.8, 0.0),
                reflectivity: 0.8,
                roughness: 0.0,
            }),
        },
        Object {
            shape: Shape::Sphere {
                center: Vec3A::new(-2.0, 0.5, -5.0),
                radius: 0.8,
            },
            appearance: Appearance::Solid(Material {
                color: Vec3A::new(0.0, 0.8, 0.0),
                reflectivity: 0.8,
                roughness: 0.0,
            }),
        },
        Object {
            shape: Shape::Triangle {
                vertices: [
                    Vec3A::new(-16.0, -0.7, 16.0),
                    Vec3A::new(16.0, -0.7, 16.0),
                    Vec3A::new(-16.0, -0.7, -16.0),
                ],
            },
            appearance: floor.clone(),
        },
        Object {
            shape: Shape::Triangle {
                vertices: [
                    Vec3A::new(-16.0, -0.7, -16.0),
                    Vec3A::new(16.0, -0.7, 16.0),
                    Vec3A::new(16.0, -0.7, -16.0),
                ],
            },
            appearance: floor,
        },
    ])
}

fn main() -> ExitCode {
    let args = Args::parse();

    init_logger(args.debug_level.into());

    info!("Glint - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));
    info!(
        "Frame resolution: {}x{}, {} bands, depth {}, branch factor {}",
        args.width, args.height, args.regions, args.max_depth, args.branch_factor
    );

    let pool = match args.threads {
        Some(threads) => ThreadPool::new(threads),
        None => ThreadPool::default(),
    };
    info!("Rendering on {} worker threads", pool.thread_count());

    let camera = Camera::new(Vec3A::new(0.0, 4.0, 0.0), Vec3A::new(0.0, -0.55, -1.0), 1.0);
    let settings = TraceSettings {
        max_depth: args.max_depth,
        branch_factor: args.branch_factor,
    };
    let mut screen = SwScreen::new(args.width, args.height);

    // Static image
    if args.frames <= 1 {
        let scene = Arc::new(example_scene(0.0));

        let start = Instant::now();
        if let Err(e) = render_parallel(&scene, &mut screen, &camera, &pool, args.regions, None, settings) {
            error!("Render failed: {}", e);
            return ExitCode::FAILURE;
        }
        info!("Frame rendered in {:.2?}", start.elapsed());

        save_screen_as_png(&screen, &args.output);
        return ExitCode::SUCCESS;
    }

    // Animated sequence: a fresh immutable scene snapshot per frame,
    // numbered outputs next to the requested path.
    let pb = ProgressBar::new(args.frames as u64);
    pb.set_style(ProgressStyle::default_bar().template("{bar:40} {pos}/{len} ETA: {eta}").unwrap());

    let start = Instant::now();
    for frame in 0..args.frames {
        let scene = Arc::new(example_scene(frame as f32 * 0.1));

        screen.clear();
        if let Err(e) = render_parallel(&scene, &mut screen, &camera, &pool, args.regions, None, settings) {
            error!("Render failed on frame {}: {}", frame, e);
            return ExitCode::FAILURE;
        }

        save_screen_as_png(&screen, &frame_path(&args.output, frame));
        pb.inc(1);
    }
    pb.finish();
    info!("{} frames rendered in {:.2?}", args.frames, start.elapsed());

    ExitCode::SUCCESS
}

/// Numbered sibling of the output path: "render.png" -> "render_0003.png".
fn frame_path(output: &str, frame: u32) -> String {
    match output.rsplit_once('.') {
        Some((stem, extension)) => format!("{}_{:04}.{}", stem, frame, extension),
        None => format!("{}_{:04}", output, frame),
    }
}
