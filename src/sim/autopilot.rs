//! Demo-mode moderator
//!
//! Reads a snapshot and picks the next action. Has its own PCG stream so
//! turning it on never perturbs the engine's random sequence.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::judge::minimum_sanction;
use super::state::{MessageId, Sanction, Snapshot};

/// One decided action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub id: MessageId,
    pub sanction: Sanction,
}

/// Autopilot tuning
#[derive(Debug, Clone, Copy)]
pub struct AutopilotConfig {
    /// Minimum message age before reacting (ms)
    pub reaction_ms: f64,
    /// Probability of choosing a random sanction instead of the right one
    pub mistake_rate: f64,
}

impl Default for AutopilotConfig {
    fn default() -> Self {
        Self {
            reaction_ms: 250.0,
            mistake_rate: 0.05,
        }
    }
}

pub struct Autopilot {
    config: AutopilotConfig,
    rng: Pcg32,
}

impl Autopilot {
    pub fn new(seed: u64, config: AutopilotConfig) -> Self {
        let config = AutopilotConfig {
            reaction_ms: config.reaction_ms.max(0.0),
            mistake_rate: config.mistake_rate.clamp(0.0, 1.0),
        };
        Self {
            config,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Next action, if any. Targets the violation closest to the bottom that
    /// has been on screen for at least the reaction time.
    pub fn decide(&mut self, snap: &Snapshot) -> Option<Action> {
        if !snap.is_running() || snap.input_lock_ms > 0.0 {
            return None;
        }

        let target = snap
            .messages
            .iter()
            .filter(|m| m.is_violation)
            .filter(|m| snap.clock_ms - m.created_at_ms >= self.config.reaction_ms)
            .max_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))?;

        let sanction = if self.rng.random_bool(self.config.mistake_rate) {
            Sanction::ALL[self.rng.random_range(0..Sanction::ALL.len())]
        } else {
            minimum_sanction(target.category)
        };

        Some(Action {
            id: target.id,
            sanction,
        })
    }
}
