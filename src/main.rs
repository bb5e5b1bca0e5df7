use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use spinraster::config::{DEFAULT_FPS, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use spinraster::prelude::*;

fn command() -> Command {
    Command::new("spinraster")
        .about("Spins a triangle mesh through a CPU software rasterizer")
        .arg(
            Arg::new("mesh")
                .help("Mesh file with `v x y z` and `f i j k` lines")
                .value_parser(value_parser!(PathBuf))
                .default_value("teapot.obj"),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .value_parser(value_parser!(u32).range(1..))
                .default_value("800"),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .value_parser(value_parser!(u32).range(1..))
                .default_value("600"),
        )
        .arg(
            Arg::new("fps")
                .long("fps")
                .value_parser(value_parser!(u32).range(1..))
                .default_value("60"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Seed for triangle colours (random if omitted)")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("depth")
                .long("depth")
                .help("Per-pixel depth estimator")
                .value_parser(["plane", "barycentric"])
                .default_value("plane"),
        )
        .arg(
            Arg::new("headless")
                .long("headless")
                .help("Render without a window and write the last frame to --output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("frames")
                .long("frames")
                .value_parser(value_parser!(u32).range(1..))
                .default_value("1"),
        )
        .arg(
            Arg::new("tick")
                .long("tick")
                .help("Rotation tick (ms) of the first headless frame")
                .value_parser(value_parser!(u64))
                .default_value("0"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_parser(value_parser!(PathBuf))
                .default_value("frame.png"),
        )
}

/// Loads the mesh, treating an unreadable file as an empty scene.
fn load_mesh(path: &Path) -> Result<Mesh, MeshError> {
    match Mesh::load(path) {
        Ok(mesh) => Ok(mesh),
        Err(err @ MeshError::Io { .. }) => {
            log::error!("{err}; rendering an empty scene");
            Ok(Mesh::default())
        }
        Err(err) => Err(err),
    }
}

fn build_engine(matches: &ArgMatches, config: &RenderConfig) -> Result<Engine, Box<dyn Error>> {
    let mut engine = match matches.get_one::<u64>("seed") {
        Some(&seed) => Engine::seeded(config, seed),
        None => Engine::new(config),
    };

    let depth: DepthEstimatorKind = matches
        .get_one::<String>("depth")
        .map(String::as_str)
        .unwrap_or("plane")
        .parse()?;
    engine.set_depth_estimator(depth);

    if let Some(path) = matches.get_one::<PathBuf>("mesh") {
        engine.set_mesh(load_mesh(path)?);
    }
    log::info!(
        "{} triangles, {} depth, {}",
        engine.mesh().len(),
        engine.depth_estimator(),
        config.resolution
    );
    Ok(engine)
}

fn run_window(mut engine: Engine, config: &RenderConfig) -> Result<(), Box<dyn Error>> {
    let mut window = Window::new("spinraster", config.resolution)?;
    let mut limiter = FrameLimiter::new(config.frame_interval_ms());

    loop {
        limiter.start_frame();

        let flow = engine.handle_inputs(window.poll_inputs());

        let frame = engine.render_frame(window.ticks());
        window.present(frame)?;

        limiter.wait();

        if flow.is_quit() {
            log::info!("quit requested");
            break;
        }
    }

    Ok(())
}

fn run_headless(
    mut engine: Engine,
    matches: &ArgMatches,
    config: &RenderConfig,
) -> Result<(), Box<dyn Error>> {
    let frames = matches.get_one::<u32>("frames").copied().unwrap_or(1);
    let first_tick = matches.get_one::<u64>("tick").copied().unwrap_or(0);
    let output = matches
        .get_one::<PathBuf>("output")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("frame.png"));

    let mut stats = FrameStats::default();
    for frame in 0..u64::from(frames) {
        engine.begin_frame();
        stats = engine.draw_mesh(first_tick + frame * config.frame_interval_ms());
    }

    engine.end_frame().save_png(&output)?;
    log::info!(
        "wrote {} ({} of {} triangles drawn, {} samples)",
        output.display(),
        stats.triangles - stats.rejected,
        stats.triangles,
        stats.samples_written
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = command().get_matches();

    let width = matches.get_one::<u32>("width").copied().unwrap_or(DEFAULT_WIDTH);
    let height = matches.get_one::<u32>("height").copied().unwrap_or(DEFAULT_HEIGHT);
    let config = RenderConfig {
        resolution: Resolution::new(width, height),
        fps: matches.get_one::<u32>("fps").copied().unwrap_or(DEFAULT_FPS),
        ..RenderConfig::default()
    };

    let engine = build_engine(&matches, &config)?;

    if matches.get_flag("headless") {
        run_headless(engine, &matches, &config)
    } else {
        run_window(engine, &config)
    }
}
