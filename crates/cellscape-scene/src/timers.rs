//! Timeouts and intervals driven by the scene clock.
//!
//! Timers never fire on their own: [`Scheduler::poll`] is called with the
//! current scene time and returns every event that came due, in order.
//! Cancelling removes the timer outright, so a cancelled timer cannot fire.

use std::time::Duration;

/// Handle returned when registering a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// What a timer signals when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Fade-in delay elapsed.
    FadeStart,
    /// Next opacity increment.
    FadeStep,
    /// Next background gradient rotation.
    GradientStep,
}

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    due: Duration,
    /// `Some` for intervals.
    period: Option<Duration>,
    event: TimerEvent,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    timers: Vec<Timer>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `event` once, `delay` after `now`.
    pub fn set_timeout(&mut self, now: Duration, delay: Duration, event: TimerEvent) -> TimerId {
        self.insert(now + delay, None, event)
    }

    /// Fire `event` every `period` starting one period after `now`.
    pub fn set_interval(&mut self, now: Duration, period: Duration, event: TimerEvent) -> TimerId {
        let period = period.max(Duration::from_millis(1));
        self.insert(now + period, Some(period), event)
    }

    fn insert(&mut self, due: Duration, period: Option<Duration>, event: TimerEvent) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            due,
            period,
            event,
        });
        id
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.id != id);
        self.timers.len() != before
    }

    /// Cancel every timer, returning how many were pending.
    pub fn cancel_all(&mut self) -> usize {
        let pending = self.timers.len();
        self.timers.clear();
        pending
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Collect all events due at or before `now`, ordered by due time.
    ///
    /// Intervals that fell behind fire once per missed period.
    pub fn poll(&mut self, now: Duration) -> Vec<(TimerId, TimerEvent)> {
        let mut fired: Vec<(Duration, TimerId, TimerEvent)> = Vec::new();

        self.timers.retain_mut(|timer| {
            match timer.period {
                None => {
                    if timer.due <= now {
                        fired.push((timer.due, timer.id, timer.event));
                        return false;
                    }
                }
                Some(period) => {
                    while timer.due <= now {
                        fired.push((timer.due, timer.id, timer.event));
                        timer.due += period;
                    }
                }
            }
            true
        });

        fired.sort_by_key(|&(due, id, _)| (due, id.0));
        fired.into_iter().map(|(_, id, event)| (id, event)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_timeout_fires_once() {
        let mut scheduler = Scheduler::new();
        scheduler.set_timeout(ms(0), ms(300), TimerEvent::FadeStart);
        assert!(scheduler.poll(ms(299)).is_empty());
        assert_eq!(scheduler.poll(ms(300)).len(), 1);
        assert!(scheduler.poll(ms(1000)).is_empty());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_interval_catches_up() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.set_interval(ms(0), ms(100), TimerEvent::GradientStep);
        let events = scheduler.poll(ms(350));
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|&(fired, _)| fired == id));
        assert_eq!(scheduler.poll(ms(399)).len(), 0);
        assert_eq!(scheduler.poll(ms(400)).len(), 1);
    }

    #[test]
    fn test_events_ordered_by_due_time() {
        let mut scheduler = Scheduler::new();
        scheduler.set_interval(ms(0), ms(100), TimerEvent::GradientStep);
        scheduler.set_timeout(ms(0), ms(150), TimerEvent::FadeStart);
        let events: Vec<_> = scheduler.poll(ms(200)).into_iter().map(|(_, e)| e).collect();
        assert_eq!(
            events,
            vec![
                TimerEvent::GradientStep,
                TimerEvent::FadeStart,
                TimerEvent::GradientStep
            ]
        );
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.set_interval(ms(0), ms(50), TimerEvent::FadeStep);
        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert!(scheduler.poll(ms(10_000)).is_empty());
    }

    #[test]
    fn test_cancel_all() {
        let mut scheduler = Scheduler::new();
        scheduler.set_interval(ms(0), ms(50), TimerEvent::FadeStep);
        scheduler.set_timeout(ms(0), ms(50), TimerEvent::FadeStart);
        assert_eq!(scheduler.cancel_all(), 2);
        assert_eq!(scheduler.cancel_all(), 0);
        assert!(scheduler.poll(ms(100)).is_empty());
    }
}
