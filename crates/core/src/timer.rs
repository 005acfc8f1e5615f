use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimerTick {
    Idle,
    Running { remaining: u32 },
    Expired,
}

/// Countdown for one team turn. Pure state; the caller owns the clock and
/// feeds in one `tick` per elapsed second, so dropping the timer needs no
/// cleanup and tests need no waiting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnTimer {
    pub duration: u32,
    pub remaining: u32,
    pub running: bool,
}

impl TurnTimer {
    pub fn new(duration: u32) -> Self {
        Self {
            duration,
            remaining: duration,
            running: false,
        }
    }

    /// Always restarts from the full duration, even mid-countdown.
    pub fn start(&mut self) {
        self.remaining = self.duration;
        self.running = true;
    }

    /// Stops the countdown but keeps the remaining time on display.
    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.remaining = self.duration;
    }

    /// Advances one second. `Expired` is reported exactly once per
    /// countdown; after that the timer stays stopped and ticks are `Idle`.
    pub fn tick(&mut self) -> TimerTick {
        if !self.running {
            return TimerTick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            return TimerTick::Expired;
        }
        TimerTick::Running {
            remaining: self.remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_and_expires_once() {
        let mut timer = TurnTimer::new(3);
        timer.start();
        assert_eq!(timer.tick(), TimerTick::Running { remaining: 2 });
        assert_eq!(timer.tick(), TimerTick::Running { remaining: 1 });
        assert_eq!(timer.tick(), TimerTick::Expired);
        assert!(!timer.running);
        assert_eq!(timer.tick(), TimerTick::Idle);
        assert_eq!(timer.tick(), TimerTick::Idle);
    }

    #[test]
    fn pause_keeps_remaining_and_start_resets_it() {
        let mut timer = TurnTimer::new(10);
        timer.start();
        timer.tick();
        timer.tick();
        timer.pause();
        assert_eq!(timer.remaining, 8);
        assert_eq!(timer.tick(), TimerTick::Idle);
        assert_eq!(timer.remaining, 8);
        timer.start();
        assert_eq!(timer.remaining, 10);
        assert!(timer.running);
    }

    #[test]
    fn reset_restores_full_duration_stopped() {
        let mut timer = TurnTimer::new(5);
        timer.start();
        timer.tick();
        timer.reset();
        assert_eq!(timer.remaining, 5);
        assert!(!timer.running);
        assert_eq!(timer.tick(), TimerTick::Idle);
    }

    #[test]
    fn ticks_before_start_do_nothing() {
        let mut timer = TurnTimer::new(5);
        assert_eq!(timer.tick(), TimerTick::Idle);
        assert_eq!(timer.remaining, 5);
    }
}
