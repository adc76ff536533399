//! Transient world events
//!
//! Rolled at most once per tick while no event is active; higher stages roll
//! more often and unlock harsher kinds.

use serde::{Deserialize, Serialize};

use super::rng::ChatRng;

/// World event kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EventKind {
    #[default]
    None,
    Donation,
    /// Mid-roll ad; locks input briefly
    Ad,
    /// Stream lag; slows the chat scroll
    Lag,
    Accident,
}

impl EventKind {
    pub fn is_active(&self) -> bool {
        *self != EventKind::None
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventKind::None => "",
            EventKind::Donation => "후원",
            EventKind::Ad => "광고",
            EventKind::Lag => "렉",
            EventKind::Accident => "방송사고",
        }
    }

    /// Duration range (ms, inclusive)
    fn duration_range(&self) -> (i64, i64) {
        match self {
            EventKind::None => (0, 0),
            EventKind::Donation => (1400, 2200),
            EventKind::Ad => (1800, 2800),
            EventKind::Lag => (1200, 2000),
            EventKind::Accident => (900, 1500),
        }
    }
}

/// Result of an event roll
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RolledEvent {
    pub kind: EventKind,
    pub duration_ms: f64,
}

impl RolledEvent {
    pub const NONE: RolledEvent = RolledEvent {
        kind: EventKind::None,
        duration_ms: 0.0,
    };
}

/// Per-tick event probability for a stage id
pub fn event_chance(stage_id: u8) -> f64 {
    match stage_id {
        0..=2 => 0.06,
        3 => 0.09,
        4 => 0.12,
        _ => 0.16,
    }
}

fn event_pool(stage_id: u8) -> &'static [EventKind] {
    match stage_id {
        0..=2 => &[EventKind::Donation, EventKind::Lag],
        3 => &[EventKind::Donation, EventKind::Lag, EventKind::Ad],
        _ => &[
            EventKind::Donation,
            EventKind::Lag,
            EventKind::Ad,
            EventKind::Accident,
        ],
    }
}

/// Roll for a new world event
pub fn roll_event(rng: &mut ChatRng, stage_id: u8) -> RolledEvent {
    if !rng.chance(event_chance(stage_id)) {
        return RolledEvent::NONE;
    }

    let kind = *rng.pick(event_pool(stage_id));
    let (min, max) = kind.duration_range();
    let duration_ms = rng.int_in_range(min, max) as f64;

    RolledEvent { kind, duration_ms }
}
