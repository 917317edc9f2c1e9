use std::cmp::max;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::GameConfig;

/// Scheduling primitive behind the game clock. At most one tick is pending:
/// scheduling replaces whatever was scheduled before.
pub trait Timer {
    fn schedule(&mut self, interval: Duration);
    fn cancel(&mut self);
}

/// Repeating deadline timer polled by the event loop.
#[derive(Debug, Default)]
pub struct IntervalTimer {
    pending: Option<Pending>,
}

#[derive(Debug)]
struct Pending {
    interval: Duration,
    next_due: Instant,
}

impl IntervalTimer {
    pub fn new() -> Self {
        IntervalTimer { pending: None }
    }

    /// How long the loop may wait for input before the next tick is due.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.next_due.saturating_duration_since(now))
    }

    /// Consumes one due tick and arms the next one.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match &mut self.pending {
            Some(p) if p.next_due <= now => {
                p.next_due += p.interval;
                // Don't replay ticks missed while the loop was busy
                if p.next_due < now {
                    p.next_due = now + p.interval;
                }
                true
            }
            _ => false,
        }
    }
}

impl Timer for IntervalTimer {
    fn schedule(&mut self, interval: Duration) {
        self.pending = Some(Pending { interval, next_due: Instant::now() + interval });
    }

    fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Adaptive tick rate: every `budget / interval` ticks the interval shrinks by
/// one millisecond, down to the configured floor.
pub struct GameClock<T: Timer> {
    timer: T,
    initial_interval_ms: u64,
    min_interval_ms: u64,
    speedup_budget_ms: u64,
    interval_ms: u64,
    tick_count: u64,
    threshold: u64,
}

impl<T: Timer> GameClock<T> {
    pub fn new(timer: T, config: &GameConfig) -> Self {
        let min_interval_ms = max(config.min_interval_ms, 1);
        let interval_ms = max(config.initial_interval_ms, min_interval_ms);
        GameClock {
            timer,
            initial_interval_ms: interval_ms,
            min_interval_ms,
            speedup_budget_ms: config.speedup_budget_ms,
            interval_ms,
            tick_count: 0,
            threshold: config.speedup_budget_ms / interval_ms,
        }
    }

    pub fn start(&mut self) {
        self.timer.cancel();
        self.timer.schedule(Duration::from_millis(self.interval_ms));
    }

    pub fn stop(&mut self) {
        self.timer.cancel();
    }

    /// Stops the timer and restores the initial rate.
    pub fn reset(&mut self) {
        self.stop();
        self.interval_ms = self.initial_interval_ms;
        self.tick_count = 0;
        self.threshold = self.speedup_budget_ms / self.interval_ms;
    }

    /// Bookkeeping after a regular tick. Returns true when the rate increased.
    pub fn on_tick(&mut self) -> bool {
        self.tick_count += 1;
        if self.tick_count <= self.threshold {
            return false;
        }

        self.tick_count = 0;
        self.interval_ms = max(self.interval_ms.saturating_sub(1), self.min_interval_ms);
        self.threshold = self.speedup_budget_ms / self.interval_ms;
        self.timer.cancel();
        self.timer.schedule(Duration::from_millis(self.interval_ms));
        debug!(interval_ms = self.interval_ms, threshold = self.threshold, "speeding up");
        true
    }

    /// The next regular tick speeds the game up.
    pub fn food_eaten(&mut self) {
        self.tick_count = self.threshold;
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }
}

#[cfg(test)]
impl<T: Timer> GameClock<T> {
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Records every schedule/cancel call instead of keeping time.
    #[derive(Debug, Default)]
    pub struct ManualTimer {
        pub scheduled: Option<Duration>,
        pub schedules: Vec<Duration>,
        pub cancels: usize,
    }

    impl ManualTimer {
        pub fn is_scheduled(&self) -> bool {
            self.scheduled.is_some()
        }
    }

    impl Timer for ManualTimer {
        fn schedule(&mut self, interval: Duration) {
            self.scheduled = Some(interval);
            self.schedules.push(interval);
        }

        fn cancel(&mut self) {
            self.scheduled = None;
            self.cancels += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ManualTimer;
    use super::*;

    fn clock() -> GameClock<ManualTimer> {
        GameClock::new(ManualTimer::default(), &GameConfig::default())
    }

    #[test]
    fn starts_at_the_default_rate() {
        let mut clock = clock();
        clock.start();

        assert_eq!(clock.interval_ms(), 190);
        assert_eq!(clock.threshold(), 5000 / 190);
        assert_eq!(clock.timer().scheduled, Some(Duration::from_millis(190)));
    }

    #[test]
    fn speeds_up_after_threshold_ticks() {
        let mut clock = clock();
        clock.start();

        for _ in 0..clock.threshold() {
            assert!(!clock.on_tick());
        }
        assert!(clock.on_tick());
        assert_eq!(clock.interval_ms(), 189);
        assert_eq!(clock.tick_count(), 0);
        assert_eq!(clock.threshold(), 5000 / 189);
        assert_eq!(clock.timer().scheduled, Some(Duration::from_millis(189)));
    }

    #[test]
    fn eating_speeds_up_on_the_next_tick() {
        let mut clock = clock();
        clock.start();
        clock.on_tick();
        clock.food_eaten();

        assert!(clock.on_tick());
        assert_eq!(clock.interval_ms(), 189);
    }

    #[test]
    fn interval_never_drops_below_the_floor() {
        let config = GameConfig { initial_interval_ms: 3, ..GameConfig::default() };
        let mut clock = GameClock::new(ManualTimer::default(), &config);
        clock.start();

        for _ in 0..10 {
            clock.food_eaten();
            clock.on_tick();
        }
        assert_eq!(clock.interval_ms(), 1);
        assert_eq!(clock.threshold(), 5000);
        assert_eq!(clock.timer().scheduled, Some(Duration::from_millis(1)));
    }

    #[test]
    fn reset_restores_the_default_rate_and_cancels() {
        let mut clock = clock();
        clock.start();
        clock.food_eaten();
        clock.on_tick();
        clock.reset();

        assert_eq!(clock.interval_ms(), 190);
        assert_eq!(clock.tick_count(), 0);
        assert!(!clock.timer().is_scheduled());
    }

    #[test]
    fn interval_timer_fires_once_per_interval() {
        let mut timer = IntervalTimer::new();
        assert_eq!(timer.time_until_due(Instant::now()), None);
        assert!(!timer.take_due(Instant::now()));

        timer.schedule(Duration::from_millis(50));
        let start = Instant::now();
        assert!(!timer.take_due(start));
        assert!(timer.take_due(start + Duration::from_millis(60)));
        assert!(!timer.take_due(start + Duration::from_millis(61)));

        timer.cancel();
        assert_eq!(timer.time_until_due(start), None);
        assert!(!timer.take_due(start + Duration::from_secs(10)));
    }
}
