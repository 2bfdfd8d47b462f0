use std::time::Duration;

use tracing::{debug, info};

use crate::config::Config;
use crate::debounce::Debouncer;
use crate::events::{EventKind, EventSource, HostEvent};
use crate::particles::ParticleField;
use crate::preload::ImageEntry;
use crate::scheduler::{Timeline, Wakeup};
use crate::slideshow::{SlideshowController, SlideshowSettings, Startup};
use crate::surface::{Surface, Viewport};

/// Owns the timeline and both effects, and routes host events and wakeups to them.
pub struct App {
    timeline: Timeline,
    slideshow: SlideshowController,
    particles: Option<ParticleField>,
    resize: Debouncer<Viewport>,
    viewport: Viewport,
    canvas_resize: Option<(i32, i32)>,
}

impl App {
    pub fn new(config: &Config, viewport: Viewport, start: Duration) -> Self {
        let settings = SlideshowSettings {
            interval: config.interval(),
            transition: config.transition(),
            reduced_motion: config.reduced_motion,
        };
        Self {
            timeline: Timeline::new(start),
            slideshow: SlideshowController::new(settings),
            particles: None,
            resize: Debouncer::new(config.resize_debounce()),
            viewport,
            canvas_resize: None,
        }
    }

    pub fn subscribe<E: EventSource>(&self, events: &mut E) {
        events.subscribe(EventKind::Key);
        events.subscribe(EventKind::Visibility);
        events.subscribe(EventKind::Resize);
    }

    /// Starts the slideshow with the images that loaded, and the particle
    /// field when the host has a surface for it. The fallback backdrop gets
    /// no particles.
    pub fn start(&mut self, images: Vec<ImageEntry>, has_surface: bool) -> Startup {
        let startup = self.slideshow.init(images, &mut self.timeline);

        if startup == Startup::Fallback {
            info!("no images; particle field disabled");
        } else if has_surface {
            let mut field = ParticleField::new(self.viewport);
            field.start(&mut self.timeline);
            self.particles = Some(field);
        } else {
            info!("no particle surface; particle field disabled");
        }
        startup
    }

    /// Returns true when the event's default action should be suppressed.
    pub fn handle_event(&mut self, event: HostEvent) -> bool {
        match event {
            HostEvent::Key(key) => self.slideshow.handle_key(key, &mut self.timeline),
            HostEvent::VisibilityChanged { hidden } => {
                debug!(hidden, "visibility changed");
                self.slideshow.on_visibility(hidden, &mut self.timeline);
                if let Some(field) = self.particles.as_mut() {
                    field.on_visibility(hidden, &mut self.timeline);
                }
                false
            }
            HostEvent::Resized(viewport) => {
                self.resize.push(viewport, &mut self.timeline);
                false
            }
        }
    }

    /// Advances the timeline to `now` and runs everything that became due.
    pub fn run_frame<D: Surface>(&mut self, now: Duration, surface: &mut D) {
        for wakeup in self.timeline.advance(now) {
            match wakeup {
                Wakeup::Timer(id) => {
                    if let Some(viewport) = self.resize.on_timer(id) {
                        self.apply_resize(viewport);
                    } else {
                        self.slideshow.on_timer(id, &mut self.timeline);
                    }
                }
                Wakeup::Frame(id) => {
                    if self.slideshow.on_frame(id, &mut self.timeline) {
                        continue;
                    }
                    if let Some(field) = self.particles.as_mut() {
                        field.on_frame(id, surface, &mut self.timeline);
                    }
                }
            }
        }
    }

    fn apply_resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if let Some(field) = self.particles.as_mut() {
            self.canvas_resize = Some(field.resize(viewport));
        }
    }

    /// Canvas size to reallocate after a settled resize, if any.
    pub fn take_canvas_resize(&mut self) -> Option<(i32, i32)> {
        self.canvas_resize.take()
    }

    pub fn slideshow(&self) -> &SlideshowController {
        &self.slideshow
    }

    #[cfg(test)]
    pub fn particles(&self) -> Option<&ParticleField> {
        self.particles.as_ref()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Key, ScriptedEvents};
    use crate::surface::recording::RecordingSurface;
    use std::path::Path;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn images(count: usize) -> Vec<ImageEntry> {
        (0..count).map(|i| ImageEntry::resolve(Path::new("."), &format!("{i}.png"))).collect()
    }

    fn app(config: Config) -> App {
        App::new(&config, Viewport::new(800.0, 600.0, 1.0), Duration::ZERO)
    }

    fn drain(app: &mut App, events: &mut ScriptedEvents) -> Vec<bool> {
        let mut handled = Vec::new();
        while let Some(event) = events.next_event() {
            handled.push(app.handle_event(event));
        }
        handled
    }

    #[test]
    fn scripted_keys_drive_the_slideshow() {
        let mut app = app(Config::default());
        app.start(images(3), false);
        let mut events = ScriptedEvents::default();
        app.subscribe(&mut events);

        events.push(HostEvent::Key(Key::ArrowRight));
        events.push(HostEvent::Key(Key::ArrowRight));
        events.push(HostEvent::Key(Key::Space));
        assert_eq!(drain(&mut app, &mut events), vec![true, true, true]);
        assert_eq!(app.slideshow().current(), 2);
        assert!(!app.slideshow().running());
    }

    #[test]
    fn auto_advance_runs_from_the_frame_loop() {
        let mut app = app(Config::default());
        app.start(images(2), false);
        let mut surface = RecordingSurface::default();
        app.run_frame(ms(6999), &mut surface);
        assert_eq!(app.slideshow().current(), 0);
        app.run_frame(ms(7000), &mut surface);
        assert_eq!(app.slideshow().current(), 1);
    }

    #[test]
    fn reduced_motion_keeps_the_slideshow_still() {
        let config = Config { reduced_motion: true, ..Config::default() };
        let mut app = app(config);
        app.start(images(3), false);
        let mut surface = RecordingSurface::default();
        app.run_frame(ms(60_000), &mut surface);
        assert!(!app.slideshow().running());
        assert_eq!(app.slideshow().current(), 0);
    }

    #[test]
    fn particles_draw_only_with_a_surface() {
        let mut with = app(Config::default());
        with.start(images(1), true);
        let mut surface = RecordingSurface::default();
        with.run_frame(ms(16), &mut surface);
        assert_eq!(surface.circles(), 80);

        let mut without = app(Config::default());
        without.start(images(1), false);
        let mut surface = RecordingSurface::default();
        without.run_frame(ms(16), &mut surface);
        assert!(surface.ops.is_empty());
        assert!(without.particles().is_none());
    }

    #[test]
    fn hidden_window_pauses_both_effects() {
        let mut app = app(Config::default());
        app.start(images(3), true);
        let mut events = ScriptedEvents::default();
        app.subscribe(&mut events);
        let mut surface = RecordingSurface::default();

        events.push(HostEvent::VisibilityChanged { hidden: true });
        drain(&mut app, &mut events);
        app.run_frame(ms(20_000), &mut surface);
        assert!(surface.ops.is_empty());
        assert_eq!(app.slideshow().current(), 0);

        events.push(HostEvent::VisibilityChanged { hidden: false });
        drain(&mut app, &mut events);
        app.run_frame(ms(20_016), &mut surface);
        assert!(surface.circles() > 0);
        assert!(app.slideshow().running());
        app.run_frame(ms(27_016), &mut surface);
        assert_eq!(app.slideshow().current(), 1);
    }

    #[test]
    fn resize_bursts_rebuild_the_pool_once() {
        let mut app = app(Config::default());
        app.start(images(1), true);
        let mut events = ScriptedEvents::default();
        app.subscribe(&mut events);
        let mut surface = RecordingSurface::default();

        events.push(HostEvent::Resized(Viewport::new(900.0, 700.0, 1.0)));
        events.push(HostEvent::Resized(Viewport::new(1600.0, 900.0, 2.0)));
        assert_eq!(drain(&mut app, &mut events), vec![false, false]);

        app.run_frame(ms(100), &mut surface);
        assert_eq!(app.take_canvas_resize(), None);
        assert_eq!(app.particles().unwrap().particles().len(), 80);

        app.run_frame(ms(120), &mut surface);
        assert_eq!(app.take_canvas_resize(), Some((3200, 1800)));
        assert_eq!(app.take_canvas_resize(), None);
        assert_eq!(app.particles().unwrap().particles().len(), 140);
        assert_eq!(app.viewport().width, 1600.0);
    }

    #[test]
    fn empty_image_list_falls_back() {
        let mut app = app(Config::default());
        assert_eq!(app.start(Vec::new(), true), Startup::Fallback);
        assert!(app.slideshow().is_fallback());
        let mut surface = RecordingSurface::default();
        app.run_frame(ms(30_000), &mut surface);
        assert!(!app.slideshow().running());
        assert!(app.particles().is_none());
        assert!(surface.ops.is_empty());
    }
}
