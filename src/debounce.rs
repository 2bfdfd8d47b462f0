use std::time::Duration;

use crate::scheduler::{Scheduler, TimerId};

/// Collapses bursts of values into the last one, delivered after a quiet period.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    timer: Option<TimerId>,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self { delay, timer: None, pending: None }
    }

    pub fn push<S: Scheduler>(&mut self, value: T, scheduler: &mut S) {
        if let Some(timer) = self.timer.take() {
            scheduler.clear_timer(timer);
        }
        self.pending = Some(value);
        self.timer = Some(scheduler.set_timeout(self.delay));
    }

    /// Returns the settled value if `id` is this debouncer's timer.
    pub fn on_timer(&mut self, id: TimerId) -> Option<T> {
        if self.timer != Some(id) {
            return None;
        }
        self.timer = None;
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{Timeline, Wakeup};

    fn settle(timeline: &mut Timeline, debouncer: &mut Debouncer<u32>, at: u64) -> Vec<u32> {
        timeline
            .advance(Duration::from_millis(at))
            .into_iter()
            .filter_map(|wakeup| match wakeup {
                Wakeup::Timer(id) => debouncer.on_timer(id),
                Wakeup::Frame(_) => None,
            })
            .collect()
    }

    #[test]
    fn burst_collapses_to_last_value() {
        let mut timeline = Timeline::new(Duration::ZERO);
        let mut debouncer = Debouncer::new(Duration::from_millis(120));

        debouncer.push(1, &mut timeline);
        assert!(settle(&mut timeline, &mut debouncer, 50).is_empty());
        debouncer.push(2, &mut timeline);
        assert!(settle(&mut timeline, &mut debouncer, 150).is_empty());
        debouncer.push(3, &mut timeline);
        assert_eq!(settle(&mut timeline, &mut debouncer, 270), vec![3]);
        assert_eq!(timeline.active_timers(), 0);
    }

    #[test]
    fn foreign_timers_are_ignored() {
        let mut timeline = Timeline::new(Duration::ZERO);
        let mut debouncer: Debouncer<u32> = Debouncer::new(Duration::from_millis(120));
        let other = timeline.set_timeout(Duration::from_millis(10));
        debouncer.push(9, &mut timeline);
        assert_eq!(debouncer.on_timer(other), None);
        assert_eq!(settle(&mut timeline, &mut debouncer, 120), vec![9]);
    }
}
