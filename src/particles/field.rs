use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::constants::*;
use crate::particles::particle::Particle;
use crate::scheduler::{FrameId, Scheduler};
use crate::surface::{Surface, Viewport};

/// Pool size for a viewport area in logical pixels.
pub fn adaptive_count(area: f32) -> usize {
    if area < 400_000.0 {
        40 // small screens
    } else if area < 1_000_000.0 {
        80
    } else {
        140 // desktops
    }
}

pub struct ParticleField {
    viewport: Viewport,
    particles: Vec<Particle>,
    rng: StdRng,
    frame: Option<FrameId>,
    hidden: bool,
}

impl ParticleField {
    pub fn new(viewport: Viewport) -> Self {
        Self::with_rng(viewport, StdRng::from_os_rng())
    }

    pub fn with_rng(viewport: Viewport, rng: StdRng) -> Self {
        let mut field = Self {
            viewport,
            particles: Vec::new(),
            rng,
            frame: None,
            hidden: false,
        };
        field.resize(viewport);
        field
    }

    /// Adopts a new viewport and rebuilds the pool. Returns the backing
    /// canvas size the host should allocate.
    pub fn resize(&mut self, viewport: Viewport) -> (i32, i32) {
        self.viewport = viewport;
        let count = adaptive_count(viewport.area()).clamp(MIN_PARTICLES, MAX_PARTICLES);
        let rng = &mut self.rng;
        self.particles = (0..count).map(|_| Particle::new(&viewport, rng)).collect();
        debug!(count, width = viewport.width, height = viewport.height, "particle pool rebuilt");
        viewport.surface_size()
    }

    /// Begins animating on the next frame unless hidden or already running.
    pub fn start<S: Scheduler>(&mut self, scheduler: &mut S) {
        if self.hidden || self.frame.is_some() {
            return;
        }
        self.frame = Some(scheduler.request_frame());
    }

    pub fn stop<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(frame) = self.frame.take() {
            scheduler.cancel_frame(frame);
        }
    }

    pub fn on_visibility<S: Scheduler>(&mut self, hidden: bool, scheduler: &mut S) {
        self.hidden = hidden;
        if hidden {
            self.stop(scheduler);
        } else {
            self.start(scheduler);
        }
    }

    pub fn on_frame<S: Scheduler, D: Surface>(&mut self, id: FrameId, surface: &mut D, scheduler: &mut S) -> bool {
        if self.frame != Some(id) {
            return false;
        }
        self.frame = None;
        self.animate(surface, scheduler);
        true
    }

    /// Clears the surface, moves and draws every particle, then asks for the next frame.
    pub fn animate<S: Scheduler, D: Surface>(&mut self, surface: &mut D, scheduler: &mut S) {
        surface.clear();
        for particle in self.particles.iter_mut() {
            particle.update(&self.viewport, &mut self.rng);
            particle.draw(surface);
        }
        if !self.hidden {
            self.frame = Some(scheduler.request_frame());
        }
    }

    #[cfg(test)]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[cfg(test)]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[cfg(test)]
    pub fn is_animating(&self) -> bool {
        self.frame.is_some()
    }
}
