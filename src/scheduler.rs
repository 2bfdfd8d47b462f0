//! Frame and timer scheduling.
//!
//! Components never talk to the window clock directly: they ask a
//! [`Scheduler`] for frames and timers and get called back by id. The
//! [`Timeline`] is the only implementation; the window loop advances it to
//! the real time every frame, tests advance it by hand.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Something that became due during [`Timeline::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wakeup {
    Timer(TimerId),
    Frame(FrameId),
}

pub trait Scheduler {
    fn now(&self) -> Duration;
    /// One-shot callback on the next frame.
    fn request_frame(&mut self) -> FrameId;
    fn cancel_frame(&mut self, id: FrameId);
    /// Repeating timer; the first fire is one `period` from now.
    fn set_interval(&mut self, period: Duration) -> TimerId;
    fn set_timeout(&mut self, delay: Duration) -> TimerId;
    fn clear_timer(&mut self, id: TimerId);
}

#[derive(Debug)]
struct Timer {
    id: TimerId,
    due: Duration,
    period: Option<Duration>,
}

#[derive(Debug)]
pub struct Timeline {
    now: Duration,
    next_id: u64,
    frames: Vec<FrameId>,
    timers: Vec<Timer>,
}

impl Timeline {
    pub fn new(start: Duration) -> Self {
        Self {
            now: start,
            next_id: 0,
            frames: Vec::new(),
            timers: Vec::new(),
        }
    }

    fn fresh_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    #[cfg(test)]
    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    #[cfg(test)]
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    #[cfg(test)]
    pub fn has_timer(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Moves the clock to `now` (never backwards) and returns what became due:
    /// timers in due order first, then every frame requested before this call.
    pub fn advance(&mut self, now: Duration) -> Vec<Wakeup> {
        self.now = self.now.max(now);
        let now = self.now;

        let mut due: Vec<(Duration, TimerId)> = self
            .timers
            .iter()
            .filter(|t| t.due <= now)
            .map(|t| (t.due, t.id))
            .collect();
        due.sort_by_key(|(at, id)| (*at, id.0));

        // Late intervals fire once and resume one period after now
        self.timers.retain_mut(|timer| {
            if timer.due > now {
                return true;
            }
            match timer.period {
                Some(period) => {
                    timer.due += period;
                    if timer.due <= now {
                        timer.due = now + period;
                    }
                    true
                }
                None => false,
            }
        });

        let mut wakeups: Vec<Wakeup> = due.into_iter().map(|(_, id)| Wakeup::Timer(id)).collect();
        wakeups.extend(self.frames.drain(..).map(Wakeup::Frame));
        wakeups
    }
}

impl Scheduler for Timeline {
    fn now(&self) -> Duration {
        self.now
    }

    fn request_frame(&mut self) -> FrameId {
        let id = FrameId(self.fresh_id());
        self.frames.push(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.frames.retain(|f| *f != id);
    }

    fn set_interval(&mut self, period: Duration) -> TimerId {
        let id = TimerId(self.fresh_id());
        self.timers.push(Timer { id, due: self.now + period, period: Some(period) });
        id
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.fresh_id());
        self.timers.push(Timer { id, due: self.now + delay, period: None });
        id
    }

    fn clear_timer(&mut self, id: TimerId) {
        self.timers.retain(|t| t.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn frames_fire_once_on_the_next_advance() {
        let mut timeline = Timeline::new(Duration::ZERO);
        let frame = timeline.request_frame();
        assert_eq!(timeline.advance(ms(16)), vec![Wakeup::Frame(frame)]);
        assert!(timeline.advance(ms(32)).is_empty());
    }

    #[test]
    fn cancelled_frames_never_fire() {
        let mut timeline = Timeline::new(Duration::ZERO);
        let frame = timeline.request_frame();
        timeline.cancel_frame(frame);
        assert!(timeline.advance(ms(16)).is_empty());
    }

    #[test]
    fn interval_repeats_at_its_period() {
        let mut timeline = Timeline::new(Duration::ZERO);
        let timer = timeline.set_interval(ms(100));
        assert!(timeline.advance(ms(99)).is_empty());
        assert_eq!(timeline.advance(ms(100)), vec![Wakeup::Timer(timer)]);
        assert!(timeline.advance(ms(150)).is_empty());
        assert_eq!(timeline.advance(ms(200)), vec![Wakeup::Timer(timer)]);
        assert!(timeline.has_timer(timer));
    }

    #[test]
    fn late_interval_fires_once_without_catching_up() {
        let mut timeline = Timeline::new(Duration::ZERO);
        let timer = timeline.set_interval(ms(100));
        assert_eq!(timeline.advance(ms(450)), vec![Wakeup::Timer(timer)]);
        assert!(timeline.advance(ms(500)).is_empty());
        assert_eq!(timeline.advance(ms(550)), vec![Wakeup::Timer(timer)]);
    }

    #[test]
    fn timeout_fires_once_and_is_removed() {
        let mut timeline = Timeline::new(Duration::ZERO);
        let timer = timeline.set_timeout(ms(120));
        assert_eq!(timeline.advance(ms(120)), vec![Wakeup::Timer(timer)]);
        assert_eq!(timeline.active_timers(), 0);
        assert!(timeline.advance(ms(500)).is_empty());
    }

    #[test]
    fn timers_come_before_frames_in_due_order() {
        let mut timeline = Timeline::new(Duration::ZERO);
        let frame = timeline.request_frame();
        let late = timeline.set_timeout(ms(50));
        let early = timeline.set_timeout(ms(10));
        assert_eq!(
            timeline.advance(ms(60)),
            vec![Wakeup::Timer(early), Wakeup::Timer(late), Wakeup::Frame(frame)]
        );
    }

    #[test]
    fn clock_never_moves_backwards() {
        let mut timeline = Timeline::new(ms(500));
        timeline.advance(ms(100));
        assert_eq!(timeline.now(), ms(500));
    }
}
