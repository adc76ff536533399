//! Stage table
//!
//! Five fixed difficulty tiers, consumed strictly in order.

use serde::{Deserialize, Serialize};

/// One difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    /// Ordinal id (1-based)
    pub id: u8,
    /// Audience size shown to the player
    pub viewers: u32,
    /// Stage length (ms)
    pub duration_ms: f64,
    /// Time between spawns (ms)
    pub spawn_interval_ms: f64,
    /// Probability that a spawned message is a violation
    pub violation_rate: f64,
    /// Base scroll speed (px/s)
    pub speed_px_per_sec: f64,
    /// Score multiplier for actions taken during this stage
    pub score_multiplier: f64,
}

impl StageConfig {
    /// Stage 4 and later mix in the escalation twists
    pub fn is_escalated(&self) -> bool {
        self.id >= 4
    }
}

pub const STAGES: [StageConfig; 5] = [
    StageConfig {
        id: 1,
        viewers: 100,
        duration_ms: 25_000.0,
        spawn_interval_ms: 900.0,
        violation_rate: 0.10,
        speed_px_per_sec: 30.0,
        score_multiplier: 1.0,
    },
    StageConfig {
        id: 2,
        viewers: 500,
        duration_ms: 25_000.0,
        spawn_interval_ms: 780.0,
        violation_rate: 0.15,
        speed_px_per_sec: 50.0,
        score_multiplier: 1.5,
    },
    StageConfig {
        id: 3,
        viewers: 1000,
        duration_ms: 25_000.0,
        spawn_interval_ms: 650.0,
        violation_rate: 0.20,
        speed_px_per_sec: 80.0,
        score_multiplier: 2.0,
    },
    StageConfig {
        id: 4,
        viewers: 5000,
        duration_ms: 25_000.0,
        spawn_interval_ms: 540.0,
        violation_rate: 0.25,
        speed_px_per_sec: 100.0,
        score_multiplier: 3.0,
    },
    StageConfig {
        id: 5,
        viewers: 10_000,
        duration_ms: 30_000.0,
        spawn_interval_ms: 470.0,
        violation_rate: 0.30,
        speed_px_per_sec: 120.0,
        score_multiplier: 5.0,
    },
];

pub const STAGE_COUNT: usize = STAGES.len();

/// Stage config by 0-based index (clamped to the last stage)
pub fn stage_at(index: usize) -> &'static StageConfig {
    &STAGES[index.min(STAGE_COUNT - 1)]
}
