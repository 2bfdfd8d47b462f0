use std::collections::VecDeque;

use raylib::prelude::*;

use crate::surface::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowRight,
    ArrowLeft,
    Space,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    Key(Key),
    VisibilityChanged { hidden: bool },
    Resized(Viewport),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Key,
    Visibility,
    Resize,
}

impl HostEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            HostEvent::Key(_) => EventKind::Key,
            HostEvent::VisibilityChanged { .. } => EventKind::Visibility,
            HostEvent::Resized(_) => EventKind::Resize,
        }
    }
}

/// A source of host events. Only kinds that were subscribed to are delivered.
pub trait EventSource {
    fn subscribe(&mut self, kind: EventKind);
    fn next_event(&mut self) -> Option<HostEvent>;
}

#[derive(Debug, Default)]
struct Subscriptions(Vec<EventKind>);

impl Subscriptions {
    fn add(&mut self, kind: EventKind) {
        if !self.0.contains(&kind) {
            self.0.push(kind);
        }
    }

    fn wants(&self, event: &HostEvent) -> bool {
        self.0.contains(&event.kind())
    }
}

/// Translates raylib window and keyboard state into host events.
#[derive(Debug, Default)]
pub struct RaylibEvents {
    subscriptions: Subscriptions,
    queue: VecDeque<HostEvent>,
    hidden: bool,
}

impl RaylibEvents {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, event: HostEvent) {
        if self.subscriptions.wants(&event) {
            self.queue.push_back(event);
        }
    }

    /// Polls the window once; call at the top of every frame.
    pub fn pump(&mut self, rl: &RaylibHandle) {
        let keys = [
            (KeyboardKey::KEY_RIGHT, Key::ArrowRight),
            (KeyboardKey::KEY_LEFT, Key::ArrowLeft),
            (KeyboardKey::KEY_SPACE, Key::Space),
        ];
        for (raylib_key, key) in keys {
            if rl.is_key_pressed(raylib_key) {
                self.push(HostEvent::Key(key));
            }
        }

        let hidden = rl.is_window_minimized() || rl.is_window_hidden();
        if hidden != self.hidden {
            self.hidden = hidden;
            self.push(HostEvent::VisibilityChanged { hidden });
        }

        if rl.is_window_resized() {
            self.push(HostEvent::Resized(viewport_of(rl)));
        }
    }
}

impl EventSource for RaylibEvents {
    fn subscribe(&mut self, kind: EventKind) {
        self.subscriptions.add(kind);
    }

    fn next_event(&mut self) -> Option<HostEvent> {
        self.queue.pop_front()
    }
}

pub fn viewport_of(rl: &RaylibHandle) -> Viewport {
    Viewport::new(
        rl.get_screen_width() as f32,
        rl.get_screen_height() as f32,
        rl.get_window_scale_dpi().x,
    )
}

/// Event source fed by hand.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    subscriptions: Subscriptions,
    queue: VecDeque<HostEvent>,
}

#[cfg(test)]
impl ScriptedEvents {
    pub fn push(&mut self, event: HostEvent) {
        if self.subscriptions.wants(&event) {
            self.queue.push_back(event);
        }
    }
}

#[cfg(test)]
impl EventSource for ScriptedEvents {
    fn subscribe(&mut self, kind: EventKind) {
        self.subscriptions.add(kind);
    }

    fn next_event(&mut self) -> Option<HostEvent> {
        self.queue.pop_front()
    }
}
