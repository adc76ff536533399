//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time advances only through `Engine::update`
//! - Seeded RNG only (one `ChatRng` per engine)
//! - No rendering, input or audio dependencies

pub mod autopilot;
pub mod countdown;
pub mod engine;
pub mod event;
pub mod judge;
pub mod rng;
pub mod stage;
pub mod state;
pub mod text;

pub use autopilot::{Action, Autopilot, AutopilotConfig};
pub use countdown::Countdown;
pub use engine::{Engine, action_heal, action_reward, length_factor};
pub use event::{EventKind, RolledEvent, roll_event};
pub use judge::{Grade, Verdict, judge, minimum_sanction, tip_for};
pub use rng::ChatRng;
pub use stage::{STAGE_COUNT, STAGES, StageConfig};
pub use state::{
    Category, ChatMessage, Feedback, MessageId, Mood, Outcome, RemovalCounts, RunPhase, Sanction,
    Snapshot,
};
