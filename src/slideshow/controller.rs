use std::time::Duration;

use tracing::{debug, info, warn};

use crate::events::Key;
use crate::preload::ImageEntry;
use crate::scheduler::{FrameId, Scheduler, TimerId};
use crate::slideshow::layer::Layer;
use crate::slideshow::state::{LayerId, SlideState};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideshowSettings {
    pub interval: Duration,
    pub transition: Duration,
    pub reduced_motion: bool, // Read once at startup
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Startup {
    Showing { images: usize },
    Fallback,
}

pub struct SlideshowController {
    settings: SlideshowSettings,
    images: Vec<ImageEntry>,

    current: usize,
    running: bool,
    visible: LayerId,
    layers: [Layer; 2],
    state: SlideState,

    timer: Option<TimerId>,
    frame: Option<FrameId>,

    hidden: bool,
    fallback: bool,
}

impl SlideshowController {
    pub fn new(settings: SlideshowSettings) -> Self {
        Self {
            settings,
            images: Vec::new(),
            current: 0,
            running: false,
            visible: LayerId::A,
            layers: [Layer::new(1.0), Layer::new(0.0)],
            state: SlideState::Idle,
            timer: None,
            frame: None,
            hidden: false,
            fallback: false,
        }
    }

    /// Takes the successfully loaded images, shows the first one and starts
    /// auto-advance unless reduced motion is requested.
    pub fn init<S: Scheduler>(&mut self, images: Vec<ImageEntry>, scheduler: &mut S) -> Startup {
        self.stop_auto(scheduler);
        self.images = images;

        if self.images.is_empty() {
            warn!("No images loaded; check paths. Falling back to a plain background color.");
            self.fallback = true;
            return Startup::Fallback;
        }
        self.fallback = false;

        self.visible = LayerId::A;
        self.layers[LayerId::A.index()].set_image(0);
        self.layers[LayerId::A.index()].set_opacity(1.0);
        self.layers[LayerId::B.index()].set_opacity(0.0);
        self.current = 0;
        self.state = SlideState::Visible;
        info!(images = self.images.len(), "slideshow ready");

        if !self.settings.reduced_motion {
            self.start_auto(scheduler);
        }
        Startup::Showing { images: self.images.len() }
    }

    pub fn show_index<S: Scheduler>(&mut self, index: isize, scheduler: &mut S) {
        if self.images.is_empty() {
            return;
        }
        let count = self.images.len() as isize;
        let target = (((index % count) + count) % count) as usize;

        // Prepare the hidden layer; the flip happens on the next frame
        let hidden = self.visible.other();
        self.layers[hidden.index()].set_image(target);
        self.state = SlideState::TransitionPending;
        if self.frame.is_none() {
            self.frame = Some(scheduler.request_frame());
        }

        debug!(from = self.current, to = target, "show image");
        self.current = target;
    }

    pub fn next<S: Scheduler>(&mut self, scheduler: &mut S) {
        self.show_index(self.current as isize + 1, scheduler);
    }

    pub fn prev<S: Scheduler>(&mut self, scheduler: &mut S) {
        self.show_index(self.current as isize - 1, scheduler);
    }

    pub fn start_auto<S: Scheduler>(&mut self, scheduler: &mut S) {
        self.stop_auto(scheduler);
        if self.settings.reduced_motion || self.images.is_empty() {
            return;
        }
        self.running = true;
        self.timer = Some(scheduler.set_interval(self.settings.interval));
    }

    pub fn stop_auto<S: Scheduler>(&mut self, scheduler: &mut S) {
        self.running = false;
        if let Some(timer) = self.timer.take() {
            scheduler.clear_timer(timer);
        }
    }

    pub fn toggle_auto<S: Scheduler>(&mut self, scheduler: &mut S) {
        if self.running {
            self.stop_auto(scheduler);
        } else {
            self.start_auto(scheduler);
        }
    }

    /// Returns true when the key was consumed.
    pub fn handle_key<S: Scheduler>(&mut self, key: Key, scheduler: &mut S) -> bool {
        match key {
            Key::ArrowRight => self.next(scheduler),
            Key::ArrowLeft => self.prev(scheduler),
            Key::Space => self.toggle_auto(scheduler),
        }
        true
    }

    /// Pauses auto-advance while hidden and restarts it on show. `start_auto`
    /// still refuses under reduced motion or with no images.
    pub fn on_visibility<S: Scheduler>(&mut self, hidden: bool, scheduler: &mut S) {
        if hidden == self.hidden {
            return;
        }
        self.hidden = hidden;

        if hidden {
            self.stop_auto(scheduler);
        } else {
            self.start_auto(scheduler);
        }
    }

    pub fn on_timer<S: Scheduler>(&mut self, id: TimerId, scheduler: &mut S) -> bool {
        if self.timer != Some(id) {
            return false;
        }
        self.next(scheduler);
        true
    }

    pub fn on_frame<S: Scheduler>(&mut self, id: FrameId, scheduler: &mut S) -> bool {
        if self.frame != Some(id) {
            return false;
        }
        self.frame = None;

        let now = scheduler.now();
        for layer in self.layers.iter_mut() {
            layer.sample(now, self.settings.transition);
        }

        if self.state == SlideState::TransitionPending {
            let shown = self.visible;
            let hidden = shown.other();
            self.layers[hidden.index()].fade_to(1.0, now);
            self.layers[shown.index()].fade_to(0.0, now);
            self.visible = hidden;
            self.state = SlideState::Visible;
        }

        if self.layers.iter().any(Layer::is_fading) {
            self.frame = Some(scheduler.request_frame());
        }
        true
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn running(&self) -> bool {
        self.running
    }

    #[cfg(test)]
    pub fn state(&self) -> SlideState {
        self.state
    }

    #[cfg(test)]
    pub fn visible_layer(&self) -> LayerId {
        self.visible
    }

    #[cfg(test)]
    pub fn layer(&self, id: LayerId) -> &Layer {
        &self.layers[id.index()]
    }

    /// Layers in paint order.
    pub fn layers(&self) -> &[Layer; 2] {
        &self.layers
    }

    pub fn images(&self) -> &[ImageEntry] {
        &self.images
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}
