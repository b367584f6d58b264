use std::time::{Duration, Instant};

// Matches the host contract of one simulation tick per 20 ms.
pub const TICK_STEP: Duration = Duration::from_millis(20);

// A stalled frame stops queueing ticks past this backlog.
const MAX_ACCUMULATED: Duration = Duration::from_millis(250);

#[derive(Debug)]
pub struct Time {
    last_frame: Instant,
    accumulator: Duration,
    fixed_step: Duration,
}

impl Time {
    pub fn new(fixed_step: Duration) -> Self {
        Self {
            last_frame: Instant::now(),
            accumulator: Duration::ZERO,
            fixed_step,
        }
    }

    pub fn update(&mut self) {
        let delta = self.last_frame.elapsed();
        self.last_frame = Instant::now();

        self.accumulator = (self.accumulator + delta).min(MAX_ACCUMULATED);
    }

    /// Drains one fixed step from the accumulator if a whole one is
    /// available. Call in a loop to run every tick owed this frame.
    pub fn consume_tick(&mut self) -> bool {
        if self.accumulator >= self.fixed_step {
            self.accumulator -= self.fixed_step;
            true
        } else {
            false
        }
    }

    pub fn fixed_step(&self) -> Duration {
        self.fixed_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_drains_whole_steps_only() {
        let mut time = Time::new(Duration::from_millis(20));
        time.accumulator = Duration::from_millis(50);

        assert!(time.consume_tick());
        assert!(time.consume_tick());
        assert!(!time.consume_tick());
        assert_eq!(time.accumulator, Duration::from_millis(10));
    }

    #[test]
    fn backlog_is_capped() {
        let mut time = Time::new(Duration::from_millis(20));
        time.accumulator = Duration::from_secs(10).min(MAX_ACCUMULATED);

        let mut ticks = 0;
        while time.consume_tick() {
            ticks += 1;
        }

        assert_eq!(ticks, 12);
    }
}
