//! Seeded xorshift32 random source
//!
//! Every stochastic decision in the engine draws from one `ChatRng`, so a run
//! replays exactly from its seed.

use serde::{Deserialize, Serialize};

/// Substitute state for a zero seed (xorshift never leaves zero)
const ZERO_SEED_FALLBACK: u32 = 0x9E37_79B9;

/// Xorshift32 generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRng {
    state: u32,
}

impl ChatRng {
    /// Create a generator from an explicit seed
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 { ZERO_SEED_FALLBACK } else { seed };
        Self { state }
    }

    /// Create a generator seeded from the wall clock
    pub fn from_time() -> Self {
        Self::new(wall_clock_seed())
    }

    /// Advance and return the next full-range value
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform float in [0, 1]
    ///
    /// Divides by `u32::MAX`, so 1.0 is reachable on the single all-ones draw.
    pub fn next_unit_float(&mut self) -> f64 {
        self.next_u32() as f64 / u32::MAX as f64
    }

    /// Integer in the closed interval `[min, max]`
    pub fn int_in_range(&mut self, min: i64, max: i64) -> i64 {
        debug_assert!(min <= max, "int_in_range: min must not exceed max");
        let span = (max - min + 1) as f64;
        let offset = (self.next_unit_float() * span).floor() as i64;
        // The all-ones draw lands one past the end
        (min + offset).min(max)
    }

    /// Pick one element of a non-empty slice
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        assert!(!items.is_empty(), "pick: pool must not be empty");
        let idx = self.int_in_range(0, items.len() as i64 - 1) as usize;
        &items[idx]
    }

    /// Bernoulli draw: true with probability `p`
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_unit_float() < p
    }
}

/// Low 32 bits of the current Unix time in milliseconds
pub fn wall_clock_seed() -> u32 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u32)
        .unwrap_or(ZERO_SEED_FALLBACK)
}
