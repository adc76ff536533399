//! Chat Patrol - A live-stream chat moderation arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, judging, scoring, run lifecycle)
//! - `settings`: Engine configuration
//! - `summary`: End-of-run results and title rank

pub mod settings;
pub mod sim;
pub mod summary;

pub use settings::EngineConfig;
pub use sim::{Engine, Snapshot};
pub use summary::RunSummary;

/// Game tuning constants
pub mod consts {
    /// Maximum number of live chat messages (oldest are dropped beyond this)
    pub const MAX_LIVE_MESSAGES: usize = 40;
    /// Vertical offset where new messages appear (px)
    pub const MESSAGE_START_Y: f64 = 6.0;
    /// Distance above the panel bottom at which a message is considered missed (px)
    pub const BOTTOM_MARGIN_PX: f64 = 34.0;

    /// Mental resource bounds
    pub const MENTAL_MAX: f64 = 100.0;
    pub const MENTAL_MIN: f64 = 0.0;
    /// Mental restored when a stage is cleared
    pub const STAGE_CLEAR_HEAL: f64 = 10.0;
    /// Mental restored when an ordinary message scrolls away untouched
    pub const IGNORE_HEAL: f64 = 0.1;
    /// Mental lost when a violation scrolls away unpunished
    pub const MISS_PENALTY: f64 = 10.0;
    /// Mental lost for sanctioning an innocent message
    pub const WRONG_TARGET_PENALTY: f64 = 15.0;
    /// Mental lost for an under-sanctioned or late violation
    pub const WEAK_SANCTION_PENALTY: f64 = 12.0;
    /// Mental lost for an under-sanctioned or late keyword violation
    pub const WEAK_KEYWORD_PENALTY: f64 = 20.0;
    /// Extra mental lost when a ban was the wrong call
    pub const BAN_MISFIRE_PENALTY: f64 = 10.0;

    /// Reaction latency thresholds (ms)
    pub const PERFECT_WINDOW_MS: f64 = 500.0;
    pub const GOOD_WINDOW_MS: f64 = 1000.0;

    /// Score multipliers
    pub const PERFECT_BONUS: f64 = 1.25;
    pub const OVER_PUNISH_FACTOR: f64 = 0.9;
    pub const COMBO_STEP: f64 = 0.03;
    pub const COMBO_AMP_CAP: f64 = 1.5;

    /// Timers (ms)
    pub const SUBTITLE_REFRESH_MS: f64 = 1400.0;
    pub const AD_INPUT_LOCK_MS: f64 = 250.0;
    pub const BAN_COOLDOWN_MS: f64 = 120.0;
    pub const SUCCESS_TOAST_MS: f64 = 900.0;
    pub const MISS_TOAST_MS: f64 = 900.0;
    pub const FAILURE_TOAST_MS: f64 = 1500.0;

    /// Scroll speed factor while a lag event is active
    pub const LAG_SPEED_FACTOR: f64 = 0.85;

    /// Mood thresholds on the mental value
    pub const TIRED_MENTAL: f64 = 30.0;
    pub const ANGRY_MENTAL: f64 = 70.0;
    /// Subtitle overrides
    pub const WARNING_MENTAL: f64 = 20.0;
    pub const PRAISE_COMBO: u32 = 5;
}
