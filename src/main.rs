use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use raylib::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::filter::LevelFilter;

mod app;
mod config;
mod constants;
mod debounce;
mod error;
mod events;
mod particles;
mod preload;
mod renderer;
mod scheduler;
mod slideshow;
mod surface;
mod texture_loader;

use crate::app::App;
use crate::config::Args;
use crate::constants::*;
use crate::events::{EventSource, RaylibEvents, viewport_of};
use crate::preload::preload;
use crate::renderer::Canvas;
use crate::slideshow::Startup;
use crate::surface::{Detached, Painter};
use crate::texture_loader::{FileSource, load_sorted_image_names, upload_texture};

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).with_target(false).init();
}

fn clock(rl: &RaylibHandle) -> Duration {
    Duration::from_secs_f64(rl.get_time())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    let config = args.into_config().context("invalid configuration")?;

    let (mut rl, thread) = raylib::init()
        .size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .title("Backdrop")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    // --- Preload Images ---
    let names = if config.images.is_empty() {
        load_sorted_image_names(&config.base_path).unwrap_or_else(|e| {
            warn!("{e}");
            Vec::new()
        })
    } else {
        config.images.clone()
    };

    let mut textures: Vec<Texture2D> = Vec::new();
    let mut loaded = Vec::new();
    for result in preload(&FileSource, &config.base_path, &names) {
        let Ok(raw) = result.image else {
            continue; // already logged by preload
        };
        match upload_texture(&mut rl, &thread, &raw, &result.entry.url) {
            Ok(texture) => {
                textures.push(texture);
                loaded.push(result.entry);
            }
            Err(e) => warn!("skipping image: {e}"),
        }
    }
    info!(loaded = loaded.len(), requested = names.len(), "images ready");

    // --- Effects ---
    let viewport = viewport_of(&rl);
    let mut app = App::new(&config, viewport, clock(&rl));

    let mut canvas = if config.particles {
        match Canvas::new(&mut rl, &thread, viewport.surface_size()) {
            Ok(canvas) => Some(canvas),
            Err(e) => {
                warn!("{e:#}");
                None
            }
        }
    } else {
        None
    };
    if app.start(loaded, canvas.is_some()) == Startup::Fallback {
        canvas = None;
    }

    let mut events = RaylibEvents::new();
    app.subscribe(&mut events);

    // --- Main Loop ---
    while !rl.window_should_close() {
        events.pump(&rl);
        while let Some(event) = events.next_event() {
            app.handle_event(event);
        }

        if let Some(size) = app.take_canvas_resize() {
            if canvas.is_some() {
                match Canvas::new(&mut rl, &thread, size) {
                    Ok(resized) => canvas = Some(resized),
                    Err(e) => warn!("keeping previous particle canvas: {e:#}"),
                }
            }
        }

        // Advance timers and frame callbacks; particles draw into their canvas
        let now = clock(&rl);
        let scale = app.viewport().pixel_ratio;
        match canvas.as_mut() {
            Some(canvas) => {
                let mut target = rl.begin_texture_mode(&thread, &mut canvas.target);
                let mut painter = Painter::new(&mut target, scale);
                app.run_frame(now, &mut painter);
            }
            None => app.run_frame(now, &mut Detached),
        }

        // Layers first, then particles, then the foreground caption
        let mut d = rl.begin_drawing(&thread);
        let screen = Vector2::new(d.get_screen_width() as f32, d.get_screen_height() as f32);

        renderer::draw_layers(&mut d, app.slideshow(), &textures, screen);
        if let Some(canvas) = canvas.as_ref() {
            renderer::composite(&mut d, canvas, screen);
        }
        if config.show_status {
            renderer::draw_status(&mut d, app.slideshow());
        }
    }

    Ok(())
}
