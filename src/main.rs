mod camera;
mod color;
mod controller;
mod display;
mod distortion;
mod error;
mod math3d;
mod particles;
mod render;
mod session;
mod shapes;
mod util;

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use controller::{Controller, Flow};
use display::{Display, PixelBuffer, RenderTarget, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use error::AppError;
use session::SessionState;
use util::FrameClock;

/// Frames between FPS log lines
const FPS_LOG_INTERVAL: u64 = 300;
/// Frames between window title refreshes
const TITLE_INTERVAL: u64 = 15;

/// Command line options
struct Options {
    width: u32,
    height: u32,
    vsync: bool,
    seed: Option<u64>,
}

/// Parse command line arguments
fn parse_args() -> Options {
    let args: Vec<String> = std::env::args().collect();
    let mut opts = Options {
        width: DEFAULT_WIDTH,
        height: DEFAULT_HEIGHT,
        vsync: true,
        seed: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--no-vsync" => opts.vsync = false,
            "--width" | "-w" => {
                if i + 1 < args.len() {
                    if let Ok(w) = args[i + 1].parse::<u32>() {
                        opts.width = w.max(1);
                    }
                    i += 1;
                }
            },
            "--height" | "-h" => {
                if i + 1 < args.len() {
                    if let Ok(h) = args[i + 1].parse::<u32>() {
                        opts.height = h.max(1);
                    }
                    i += 1;
                }
            },
            "--resolution" | "-r" => {
                if i + 1 < args.len() {
                    // WxH, e.g. 1920x1080
                    if let Some((w, h)) = args[i + 1].split_once('x') {
                        if let (Ok(w), Ok(h)) = (w.parse::<u32>(), h.parse::<u32>()) {
                            opts.width = w.max(1);
                            opts.height = h.max(1);
                        }
                    }
                    i += 1;
                }
            },
            "--seed" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse::<u64>() {
                        Ok(seed) => opts.seed = Some(seed),
                        Err(_) => warn!("ignoring invalid seed {:?}", args[i + 1]),
                    }
                    i += 1;
                }
            },
            "--help" => {
                println!("Usage: particle-morph [OPTIONS]");
                println!();
                println!("Options:");
                println!(
                    "  --width W, -w W       Set window width (default: {})",
                    DEFAULT_WIDTH
                );
                println!(
                    "  --height H, -h H      Set window height (default: {})",
                    DEFAULT_HEIGHT
                );
                println!("  --resolution WxH, -r WxH  Set resolution (e.g., 1920x1080)");
                println!("  --no-vsync            Disable VSync for uncapped framerate");
                println!("  --seed N              Fix the random seed for reproducible shapes");
                println!("  --help                Show this help message");
                println!();
                println!("Set RUST_LOG=debug for frame timing and generation details.");
                std::process::exit(0);
            },
            other => warn!("ignoring unknown argument {:?}", other),
        }
        i += 1;
    }

    opts
}

fn print_controls() {
    println!("Controls:");
    println!("  Left drag          - Rotate camera");
    println!("  Shift + left drag  - Distort the shape");
    println!("  Mouse wheel        - Zoom");
    println!("  Shift + wheel      - Scale shape");
    println!("  PageUp / PageDown  - Scale shape");
    println!("  T or button        - Next shape");
    println!("  R                  - Reset view");
    println!("  Space              - Toggle auto-rotate");
    println!("  C                  - Toggle color cycling");
    println!("  + / -              - Grow / shrink particles");
    println!("  Escape             - Quit");
}

fn main() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = parse_args();
    let rng = match opts.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let (mut display, texture_creator) =
        Display::with_options("3D Particle Morph", opts.width, opts.height, opts.vsync)?;
    let mut target = RenderTarget::with_size(&texture_creator, opts.width, opts.height)?;
    let mut buffer = PixelBuffer::with_size(opts.width, opts.height);

    let mut session = SessionState::new(rng);
    let mut controller = Controller::new(display.width());
    let mut clock = FrameClock::new(60);

    info!(
        "{}x{}, vsync {}, seed {}",
        display.width(),
        display.height(),
        if opts.vsync { "on" } else { "off" },
        opts.seed.map_or_else(|| "random".to_string(), |s| s.to_string())
    );
    info!("shape: {}", session.shape().name());
    print_controls();

    // Quitting finishes the current frame before leaving
    let mut running = true;
    while running {
        let dt = clock.tick();

        for event in display.poll_events() {
            if controller.handle(&event, &mut session) == Flow::Quit {
                running = false;
            }
        }

        session.update(dt);
        render::render_frame(&mut buffer, &session, controller.button());
        display.present(&mut target, &buffer)?;

        let frame = clock.frames();
        if frame % TITLE_INTERVAL == 0 {
            if let Err(e) = display.set_title(&session.status_line()) {
                warn!("could not update window title: {}", e);
            }
        }
        if frame % FPS_LOG_INTERVAL == 0 {
            debug!(
                "{:.1} fps ({:.2} ms), {} particles, {} trails",
                clock.avg_fps(),
                clock.avg_frame_time_ms(),
                session.points().len(),
                session.trails().len()
            );
        }
    }

    info!("bye");
    Ok(())
}
