//! Pause-corrected time keeping
//!
//! Game time is host time minus the start time minus every paused interval.
//! Anything that must not advance while paused (invincibility, score ticks,
//! explosions) runs on game time.

use serde::Serialize;

/// Converts host timestamps (ms) into unpaused game time
#[derive(Debug, Clone, Serialize)]
pub struct GameClock {
    start_ms: f64,
    paused_at: Option<f64>,
    paused_total_ms: f64,
}

impl GameClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            start_ms,
            paused_at: None,
            paused_total_ms: 0.0,
        }
    }

    /// Game time at host time `now_ms`. Frozen while paused.
    pub fn game_time(&self, now_ms: f64) -> f64 {
        let paused_now = self.paused_at.map(|p| now_ms - p).unwrap_or(0.0);
        (now_ms - self.start_ms - self.paused_total_ms - paused_now).max(0.0)
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Total time spent paused so far (completed pauses only)
    #[inline]
    pub fn paused_total_ms(&self) -> f64 {
        self.paused_total_ms
    }

    /// Returns false if already paused
    pub fn pause(&mut self, now_ms: f64) -> bool {
        if self.paused_at.is_some() {
            return false;
        }
        self.paused_at = Some(now_ms);
        true
    }

    /// Returns false if not paused
    pub fn resume(&mut self, now_ms: f64) -> bool {
        match self.paused_at.take() {
            Some(at) => {
                self.paused_total_ms += (now_ms - at).max(0.0);
                true
            }
            None => false,
        }
    }
}

/// Fixed-interval timer driven by game time
#[derive(Debug, Clone, Serialize)]
pub struct IntervalTimer {
    interval_ms: f64,
    next_ms: f64,
    running: bool,
}

impl IntervalTimer {
    /// First fire lands one interval after `start_ms`
    pub fn new(interval_ms: f64, start_ms: f64) -> Self {
        Self {
            interval_ms,
            next_ms: start_ms + interval_ms,
            running: true,
        }
    }

    /// Number of intervals that elapsed up to `now_ms`
    pub fn poll(&mut self, now_ms: f64) -> u32 {
        if !self.running {
            return 0;
        }
        let mut fired = 0;
        while now_ms >= self.next_ms {
            fired += 1;
            self.next_ms += self.interval_ms;
        }
        fired
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn restart(&mut self, start_ms: f64) {
        self.next_ms = start_ms + self.interval_ms;
        self.running = true;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }
}
