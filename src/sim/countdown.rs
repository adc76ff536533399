//! Millisecond countdown timer
//!
//! Shared by the toast TTL, input lock, subtitle cooldown and event duration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    remaining_ms: f64,
}

impl Countdown {
    pub const fn new(ms: f64) -> Self {
        Self { remaining_ms: ms }
    }

    pub fn remaining_ms(&self) -> f64 {
        self.remaining_ms
    }

    pub fn is_active(&self) -> bool {
        self.remaining_ms > 0.0
    }

    pub fn set(&mut self, ms: f64) {
        self.remaining_ms = ms.max(0.0);
    }

    /// Extend to at least `ms`; never shortens a longer remaining time
    pub fn extend_to(&mut self, ms: f64) {
        self.remaining_ms = self.remaining_ms.max(ms);
    }

    /// Count down by `dt_ms`. Returns true on the tick that reaches zero.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        if !self.is_active() {
            return false;
        }
        self.remaining_ms = (self.remaining_ms - dt_ms).max(0.0);
        self.remaining_ms == 0.0
    }
}
