use std::time::Duration;

use raylib::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Fade {
    from: f32,
    to: f32,
    started: Duration,
}

/// One of the two stacked image planes.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    image: Option<usize>, // Index into the loaded image list
    opacity: f32,
    fade: Option<Fade>,
}

impl Layer {
    pub fn new(opacity: f32) -> Self {
        Self { image: None, opacity, fade: None }
    }

    pub fn image(&self) -> Option<usize> {
        self.image
    }

    pub fn set_image(&mut self, image: usize) {
        self.image = Some(image);
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Jumps straight to `opacity`, dropping any fade in flight.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
        self.fade = None;
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Starts a fade from whatever the opacity is right now.
    pub fn fade_to(&mut self, target: f32, now: Duration) {
        self.fade = Some(Fade { from: self.opacity, to: target, started: now });
    }

    /// Updates the opacity for `now`; returns true while the fade is still running.
    pub fn sample(&mut self, now: Duration, duration: Duration) -> bool {
        let Some(fade) = self.fade else {
            return false;
        };

        let elapsed = now.saturating_sub(fade.started).as_secs_f32();
        let total = duration.as_secs_f32();
        if elapsed >= total {
            self.opacity = fade.to;
            self.fade = None;
            return false;
        }

        self.opacity = ease::sine_in_out(elapsed, fade.from, fade.to - fade.from, total);
        true
    }
}
