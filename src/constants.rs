use raylib::prelude::Color;

pub const WINDOW_WIDTH: i32 = 1280;           // Initial window width
pub const WINDOW_HEIGHT: i32 = 720;           // Initial window height
pub const FPS: u32 = 60;                      // Frames per second

pub const INTERVAL_MS: u64 = 7000;            // Time between automatic advances
pub const TRANSITION_MS: u64 = 1000;          // Duration of a crossfade
pub const RESIZE_DEBOUNCE_MS: u64 = 120;      // Quiet period before a resize is handled

pub const FALLBACK_BACKGROUND: Color = Color::new(0x11, 0x11, 0x11, 255); // Shown when no image loads

pub const MIN_PARTICLES: usize = 10;
pub const MAX_PARTICLES: usize = 300;
pub const RECYCLE_MARGIN: f32 = 20.0;         // Distance above the top edge before a particle recycles
pub const SPAWN_DEPTH: f32 = 100.0;           // Recycled particles re-enter up to this far below the bottom

pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];
