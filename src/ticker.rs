use std::time::{Duration, Instant};

/// Longest period a task accepts; longer requests are shortened to this
pub const MAX_PERIOD: Duration = Duration::from_secs(86_400);

/// Handle for a repeating task driven by the caller's event loop.
///
/// Nothing runs in the background: the owner polls it, and a poll reports
/// whether a period boundary has passed. Missed periods collapse into a
/// single firing. Dropping the handle or calling [`cancel`](Self::cancel)
/// ends it.
#[derive(Debug)]
pub struct RepeatingTask {
    period: Duration,
    next_due: Instant,
    cancelled: bool,
}

impl RepeatingTask {
    pub fn start(period: Duration, now: Instant) -> Self {
        let period = period.clamp(Duration::from_millis(1), MAX_PERIOD);
        Self { period, next_due: now + period, cancelled: false }
    }

    /// True once per elapsed period
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.cancelled || now < self.next_due {
            return false;
        }
        let behind = (now - self.next_due).as_nanos() % self.period.as_nanos();
        self.next_due = now + (self.period - Duration::from_nanos(behind as u64));
        true
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_active(&self) -> bool {
        !self.cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: Duration = Duration::from_secs(1);

    #[test]
    fn test_fires_once_per_period() {
        let t = Instant::now();
        let mut task = RepeatingTask::start(SEC, t);
        assert!(!task.poll(t));
        assert!(!task.poll(t + Duration::from_millis(999)));
        assert!(task.poll(t + SEC));
        assert!(!task.poll(t + Duration::from_millis(1500)));
        assert!(task.poll(t + 2 * SEC));
    }

    #[test]
    fn test_missed_periods_fire_once() {
        let t = Instant::now();
        let mut task = RepeatingTask::start(SEC, t);
        assert!(task.poll(t + Duration::from_millis(5_300)));
        assert!(!task.poll(t + Duration::from_millis(5_900)));
        assert!(task.poll(t + 6 * SEC));
    }

    #[test]
    fn test_huge_period_is_bounded() {
        let t = Instant::now();
        let mut task = RepeatingTask::start(Duration::from_secs(u64::MAX), t);
        assert!(!task.poll(t + SEC));
        assert!(task.poll(t + MAX_PERIOD));
    }

    #[test]
    fn test_cancel_stops_firing() {
        let t = Instant::now();
        let mut task = RepeatingTask::start(SEC, t);
        task.cancel();
        assert!(!task.is_active());
        assert!(!task.poll(t + 10 * SEC));
    }
}
