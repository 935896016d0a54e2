//! Cancellable repeating tick schedule
//!
//! The timer holds no task of its own. The owner asks for the next
//! [`deadline`](TickTimer::deadline), sleeps until it, and then calls
//! [`fire`](TickTimer::fire). Cancelling or rescheduling replaces the
//! deadline in place, so a superseded schedule has nothing left that could
//! fire.

use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Schedule {
    period: Duration,
    next: Instant,
}

/// A repeating timer that can be started, cancelled and re-armed
#[derive(Debug, Default)]
pub struct TickTimer {
    schedule: Option<Schedule>,
    armed: u64,
}

impl TickTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer with its first tick one `period` after `now`.
    /// Does nothing and returns `false` if the timer is already running.
    pub fn start(&mut self, period: Duration, now: Instant) -> bool {
        if self.schedule.is_some() {
            return false;
        }
        self.arm(period, now);
        true
    }

    /// Replace the current schedule, running or not
    pub fn reschedule(&mut self, period: Duration, now: Instant) {
        self.arm(period, now);
    }

    pub fn cancel(&mut self) {
        self.schedule = None;
    }

    pub fn is_active(&self) -> bool {
        self.schedule.is_some()
    }

    pub fn period(&self) -> Option<Duration> {
        self.schedule.map(|s| s.period)
    }

    /// When the next tick is due, if the timer is running
    pub fn deadline(&self) -> Option<Instant> {
        self.schedule.map(|s| s.next)
    }

    /// How many times the timer has been armed
    pub fn armed_count(&self) -> u64 {
        self.armed
    }

    /// Consume a due tick.
    ///
    /// Returns `true` and advances the deadline by one period if a tick was
    /// due at `now`. Ticks missed by more than a period are not replayed.
    pub fn fire(&mut self, now: Instant) -> bool {
        let Some(schedule) = self.schedule.as_mut() else {
            return false;
        };
        if now < schedule.next {
            return false;
        }

        schedule.next += schedule.period;
        if schedule.next <= now {
            schedule.next = now + schedule.period;
        }
        true
    }

    fn arm(&mut self, period: Duration, now: Instant) {
        self.schedule = Some(Schedule {
            period,
            next: now + period,
        });
        self.armed += 1;
    }
}

/// Sleep until `deadline`, or forever if there is none
pub async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(150);

    #[test]
    fn test_start_is_idempotent() {
        let now = Instant::now();
        let mut timer = TickTimer::new();

        assert!(timer.start(PERIOD, now));
        assert!(!timer.start(Duration::from_millis(10), now));

        assert_eq!(timer.armed_count(), 1);
        assert_eq!(timer.period(), Some(PERIOD));
        assert_eq!(timer.deadline(), Some(now + PERIOD));
    }

    #[test]
    fn test_fire_only_when_due() {
        let now = Instant::now();
        let mut timer = TickTimer::new();
        timer.start(PERIOD, now);

        assert!(!timer.fire(now));
        assert!(!timer.fire(now + Duration::from_millis(149)));
        assert!(timer.fire(now + PERIOD));
        assert!(!timer.fire(now + PERIOD));
        assert_eq!(timer.deadline(), Some(now + PERIOD * 2));
    }

    #[test]
    fn test_missed_ticks_not_replayed() {
        let now = Instant::now();
        let mut timer = TickTimer::new();
        timer.start(PERIOD, now);

        let late = now + PERIOD * 5;
        assert!(timer.fire(late));
        assert!(!timer.fire(late));
        assert_eq!(timer.deadline(), Some(late + PERIOD));
    }

    #[test]
    fn test_cancel_stops_firing() {
        let now = Instant::now();
        let mut timer = TickTimer::new();
        timer.start(PERIOD, now);
        timer.cancel();

        assert!(!timer.is_active());
        assert_eq!(timer.deadline(), None);
        assert!(!timer.fire(now + PERIOD * 3));
    }

    #[test]
    fn test_reschedule_replaces_deadline() {
        let now = Instant::now();
        let mut timer = TickTimer::new();
        timer.start(PERIOD, now);

        let later = now + Duration::from_millis(100);
        let faster = Duration::from_millis(148);
        timer.reschedule(faster, later);

        // The old deadline has been superseded
        assert!(!timer.fire(now + PERIOD));
        assert_eq!(timer.deadline(), Some(later + faster));
        assert_eq!(timer.period(), Some(faster));
        assert_eq!(timer.armed_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_deadline() {
        let start = Instant::now();
        let mut timer = TickTimer::new();
        timer.start(PERIOD, start);

        wait_for(timer.deadline()).await;

        assert!(Instant::now() >= start + PERIOD);
        assert!(timer.fire(Instant::now()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_without_deadline_never_completes() {
        let result = tokio::time::timeout(Duration::from_secs(5), wait_for(None)).await;
        assert!(result.is_err());
    }
}
