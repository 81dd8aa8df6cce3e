use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use winit::event::{Event, WindowEvent};

use engine::engine::{Engine, Flow};
use engine::input;
use engine::view::ViewEvent;

mod config;
mod engine;

#[derive(Parser)]
#[command(name = "wilk", about = "Real-time Mandelbrot viewer")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// TOML config file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Initial window width
    #[arg(long)]
    width: Option<u32>,

    /// Initial window height
    #[arg(long)]
    height: Option<u32>,

    /// Wait for vertical sync when presenting
    #[arg(long)]
    vsync: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = config::Config::load(cli.config.as_deref()).context("failed to load config")?;
    config.apply_overrides(cli.width, cli.height, cli.vsync);

    let (mut engine, event_loop) = Engine::new(&config).context("failed to set up the renderer")?;

    event_loop.run(move |event, _, control_flow| {
        control_flow.set_poll();

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    engine.push(ViewEvent::CloseRequested);
                }

                WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                    engine.resize();
                }

                WindowEvent::KeyboardInput { input: keyboard, .. } => {
                    if let Some(event) = input::key_event(&keyboard) {
                        engine.push(event);
                    }
                }

                WindowEvent::MouseWheel { delta, .. } => {
                    let ppl = engine.pixels_per_line();
                    engine.push(input::scroll_event(delta, ppl));
                }

                _ => (),
            },

            Event::RedrawEventsCleared => {
                if engine.frame(Instant::now()) == Flow::Exit {
                    info!("goodbye");
                    control_flow.set_exit();
                }
            }

            _ => (),
        }
    })
}
