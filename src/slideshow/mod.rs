pub mod controller;
pub mod layer;
pub mod state;

pub use controller::{SlideshowController, SlideshowSettings, Startup};
