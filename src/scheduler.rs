use std::cell::Cell;
use std::time::Duration;

/// Monotonic time source, measured from an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Frame time as reported by macroquad.
#[derive(Debug, Default, Clone, Copy)]
pub struct MacroquadClock;

impl Clock for MacroquadClock {
    fn now(&self) -> Duration {
        Duration::from_secs_f64(macroquad::time::get_time().max(0.0))
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self { Self::default() }

    pub fn advance(&self, by: Duration) { self.now.set(self.now.get() + by); }

    pub fn advance_ms(&self, ms: u64) { self.advance(Duration::from_millis(ms)); }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration { self.now.get() }
}

/// Longest delay a tick can be pushed out to, whatever the level.
pub const MAX_INTERVAL: Duration = Duration::from_secs(1000);

/// Inter-tick delay for a speed level: `1000 / level` milliseconds, capped at
/// [`MAX_INTERVAL`] for tiny or non-positive levels.
pub fn interval_for(level: f64) -> Duration {
    Duration::try_from_secs_f64(1.0 / level)
        .map(|d| d.min(MAX_INTERVAL))
        .unwrap_or(MAX_INTERVAL)
}

/// Decides when the next tick fires. Deadlines are chained: each one is
/// counted from the previous deadline, not from the frame that noticed it,
/// so the tick rate does not snap to the frame rate.
#[derive(Debug, Default, Clone)]
pub struct TickScheduler {
    next_due: Option<Duration>,
}

impl TickScheduler {
    pub fn new() -> Self { Self::default() }

    /// Arm the scheduler so the first tick fires immediately.
    pub fn start(&mut self, now: Duration) { self.next_due = Some(now); }

    /// Stop for good; only [`TickScheduler::start`] brings it back.
    pub fn halt(&mut self) { self.next_due = None; }

    pub fn is_running(&self) -> bool { self.next_due.is_some() }

    pub fn due(&self, now: Duration) -> bool {
        matches!(self.next_due, Some(at) if now >= at)
    }

    pub fn next_due(&self) -> Option<Duration> { self.next_due }

    /// Re-arm one interval after the deadline that just fired.
    pub fn reschedule(&mut self, level: f64) {
        if let Some(at) = self.next_due {
            self.next_due = Some(at + interval_for(level));
        }
    }

    /// Drop any backlog and count the next interval from `now`.
    pub fn resync(&mut self, now: Duration, level: f64) {
        if self.is_running() {
            self.next_due = Some(now + interval_for(level));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_shrinks_with_level() {
        assert_eq!(interval_for(1.0), Duration::from_secs(1));
        assert_eq!(interval_for(4.0), Duration::from_millis(250));
        assert!(interval_for(4.5) < interval_for(3.0));
    }

    #[test]
    fn test_tiny_level_is_capped() {
        assert_eq!(interval_for(1e-30), MAX_INTERVAL);
        assert_eq!(interval_for(0.0), MAX_INTERVAL);
        assert_eq!(interval_for(-2.0), MAX_INTERVAL);
        assert_eq!(interval_for(f64::INFINITY), Duration::ZERO);
    }

    #[test]
    fn test_first_tick_is_immediate() {
        let clock = ManualClock::new();
        let mut sched = TickScheduler::new();
        assert!(!sched.due(clock.now()));
        sched.start(clock.now());
        assert!(sched.due(clock.now()));
    }

    #[test]
    fn test_reschedule_waits_one_interval() {
        let clock = ManualClock::new();
        let mut sched = TickScheduler::new();
        sched.start(clock.now());
        sched.reschedule(4.0);

        clock.advance_ms(249);
        assert!(!sched.due(clock.now()));
        clock.advance_ms(1);
        assert!(sched.due(clock.now()));
    }

    #[test]
    fn test_halt_is_sticky() {
        let clock = ManualClock::new();
        let mut sched = TickScheduler::new();
        sched.start(clock.now());
        sched.halt();
        sched.reschedule(3.0);
        sched.resync(clock.now(), 3.0);
        clock.advance_ms(10_000);
        assert!(!sched.is_running());
        assert!(!sched.due(clock.now()));
    }

    #[test]
    fn test_deadlines_chain_from_previous_deadline() {
        let clock = ManualClock::new();
        let mut sched = TickScheduler::new();
        sched.start(clock.now());

        // Noticed 5 ms late; the next deadline ignores the lateness.
        clock.advance_ms(25);
        sched.reschedule(50.0);
        assert_eq!(sched.next_due(), Some(Duration::from_millis(20)));
        assert!(sched.due(clock.now()));

        sched.resync(clock.now(), 50.0);
        assert_eq!(sched.next_due(), Some(Duration::from_millis(45)));
    }

    #[test]
    fn test_tick_rate_tracks_level_at_frame_rate() {
        // Poll like a 60 Hz frame loop for one second at each level.
        let frame = Duration::from_micros(16_700);
        let mut counts = Vec::new();
        for level in [4.5, 34.17, 51.26, 76.9, 115.3] {
            let clock = ManualClock::new();
            let mut sched = TickScheduler::new();
            sched.start(clock.now());
            let mut ticks = 0;
            while clock.now() <= Duration::from_secs(1) {
                while sched.due(clock.now()) {
                    ticks += 1;
                    sched.reschedule(level);
                }
                clock.advance(frame);
            }
            counts.push(ticks);
        }
        assert_eq!(counts[0], 5);
        assert!(counts.windows(2).all(|w| w[0] < w[1]), "{counts:?}");
    }
}
