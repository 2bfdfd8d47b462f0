use rand::Rng;
use raylib::prelude::*;

use crate::constants::*;
use crate::surface::{Surface, Viewport};

/// A warm ember drifting up the screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vector2,
    pub size: f32,
    pub speed: f32,   // Pixels per frame, upwards
    pub opacity: f32,
    pub color: Color,
}

impl Particle {
    pub fn new<R: Rng>(viewport: &Viewport, rng: &mut R) -> Self {
        let mut particle = Self {
            position: Vector2::new(0.0, 0.0),
            size: 0.0,
            speed: 0.0,
            opacity: 0.0,
            color: Color::BLANK,
        };
        particle.reset(true, viewport, rng);
        particle
    }

    /// Randomizes every attribute. Initial particles land anywhere in the
    /// viewport, recycled ones start just below the bottom edge.
    pub fn reset<R: Rng>(&mut self, initial: bool, viewport: &Viewport, rng: &mut R) {
        let x = rng.random_range(0.0..viewport.width.max(1.0));
        let y = if initial {
            rng.random_range(0.0..viewport.height.max(1.0))
        } else {
            viewport.height + rng.random_range(1.0..SPAWN_DEPTH)
        };
        self.position = Vector2::new(x, y);
        self.size = rng.random_range(0.0..2.0) + 0.6;
        self.speed = rng.random_range(0.0..0.6) + 0.2;
        self.opacity = rng.random_range(0.0..0.6) + 0.2;

        let green: u8 = rng.random_range(0..120);
        let blue: u8 = rng.random_range(0..40);
        let alpha = (self.opacity * 255.0).round() as u8;
        self.color = Color::new(255, green, blue, alpha);
    }

    pub fn update<R: Rng>(&mut self, viewport: &Viewport, rng: &mut R) {
        self.position.y -= self.speed;
        if self.position.y < -RECYCLE_MARGIN {
            self.reset(false, viewport, rng);
        }
    }

    pub fn draw<S: Surface>(&self, surface: &mut S) {
        surface.fill_circle(self.position, self.size, self.color);
    }
}
