use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use raylib::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod auto_rotate;
mod carousel;
mod constants;
mod counter;
mod deck;
mod demo;
mod dots;
mod engine;
mod layout;
mod progress;
mod slide;
mod slider_engine;
mod state;

use crate::auto_rotate::resolve_interval;
use crate::carousel::{CarouselOptions, SlideCarousel};
use crate::constants::*;
use crate::deck::{AttrValue, Deck};
use crate::engine::Engine;
use crate::slider_engine::SliderEngine;

/// Rotating KPI slider with animated counters and progress bars
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// TOML deck describing the slides. A random demo deck is shown when omitted
    deck: Option<PathBuf>,

    /// Auto-rotate period in milliseconds, overrides the deck; 0 disables rotation
    #[arg(long, value_name = "MS")]
    interval: Option<String>,

    /// Show final values immediately and never auto-rotate
    #[arg(long, env = "KPI_SLIDER_REDUCED_MOTION")]
    reduced_motion: bool,

    /// Number of slides in the demo deck
    #[arg(long, default_value_t = DEFAULT_DEMO_SLIDES)]
    demo_slides: usize,

    #[arg(long, default_value_t = RENDER_WIDTH)]
    width: i32,

    #[arg(long, default_value_t = RENDER_HEIGHT)]
    height: i32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let deck = match &args.deck {
        Some(path) => Deck::load(path).with_context(|| format!("could not open deck {}", path.display()))?,
        None => {
            info!(slides = args.demo_slides, "no deck given, generating demo deck");
            demo::generate(&mut rand::rng(), args.demo_slides)
        }
    };

    let interval_attr = args.interval.clone().map(AttrValue::Text).or_else(|| deck.interval.clone());
    let options = CarouselOptions {
        reduced_motion: args.reduced_motion,
        interval: resolve_interval(interval_attr.as_ref()),
    };
    info!(slides = deck.slides.len(), interval = ?options.interval, reduced_motion = options.reduced_motion, "starting slider");

    let title = deck.title.clone().unwrap_or_else(|| "KPI Slider".to_string());
    let (mut rl, thread) = raylib::init()
        .size(args.width, args.height)
        .title(&title)
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    if deck.slides.is_empty() {
        warn!("deck has no slides");
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        d.draw_text("Error: the deck has no slides.", 20, 20, 20, Color::RED);
        drop(d);
        std::thread::sleep(ERROR_SCREEN_DURATION);
        return Ok(());
    }

    let mut engine = SliderEngine::new(SlideCarousel::new(&deck, options));

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        if !engine.render_frame(dt, &mut rl, &thread) {
            break;
        }
    }

    Ok(())
}
