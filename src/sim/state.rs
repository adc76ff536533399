//! Run state and core simulation types
//!
//! Everything the engine mutates lives in `RunState`; external readers get a
//! `Snapshot` copy.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::countdown::Countdown;
use super::event::EventKind;
use super::stage::{StageConfig, stage_at};
use super::text::SUBTITLE_READY;
use crate::consts::*;

/// Message category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Regular chat; must be left alone
    Ordinary,
    /// Wall-of-text spam
    LongForm,
    /// Unsolicited backseat advice
    Advice,
    /// Dragging the chat off topic
    Deflection,
    /// Sensitive keywords (politics etc.)
    Keyword,
    /// Brigading from an outside community
    Brigade,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Ordinary,
        Category::LongForm,
        Category::Advice,
        Category::Deflection,
        Category::Keyword,
        Category::Brigade,
    ];

    /// Categories that count as rule violations
    pub const VIOLATIONS: [Category; 5] = [
        Category::LongForm,
        Category::Advice,
        Category::Deflection,
        Category::Keyword,
        Category::Brigade,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Ordinary => "정상",
            Category::LongForm => "장문형",
            Category::Advice => "훈수형",
            Category::Deflection => "물타기형",
            Category::Keyword => "키워드형",
            Category::Brigade => "커뮤니티형",
        }
    }
}

/// Player sanction, in escalating strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Sanction {
    /// Mild: chat mute
    #[default]
    Mute,
    /// Middle: kick from the stream
    Kick,
    /// Strong: permanent ban
    Ban,
}

impl Sanction {
    pub const ALL: [Sanction; 3] = [Sanction::Mute, Sanction::Kick, Sanction::Ban];

    /// Base score value before multipliers
    pub fn base_points(&self) -> f64 {
        match self {
            Sanction::Mute => 1.0,
            Sanction::Kick => 2.0,
            Sanction::Ban => 4.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sanction::Mute => "채금",
            Sanction::Kick => "강퇴",
            Sanction::Ban => "블랙",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sanction::Mute => "mute",
            Sanction::Kick => "kick",
            Sanction::Ban => "ban",
        }
    }

    /// Parse a sanction tag or hotkey digit
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mute" | "1" => Some(Sanction::Mute),
            "kick" | "2" => Some(Sanction::Kick),
            "ban" | "3" => Some(Sanction::Ban),
            _ => None,
        }
    }
}

/// Streamer mood, derived from mental
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Calm,
    Angry,
    Tired,
}

impl Mood {
    pub fn from_mental(mental: f64) -> Self {
        if mental <= TIRED_MENTAL {
            Mood::Tired
        } else if mental <= ANGRY_MENTAL {
            Mood::Angry
        } else {
            Mood::Calm
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Calm => "평온",
            Mood::Angry => "짜증",
            Mood::Tired => "지침",
        }
    }
}

/// Unique message id: spawn sequence in the high half, one RNG draw in the low half
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl MessageId {
    pub fn new(seq: u32, salt: u32) -> Self {
        Self(((seq as u64) << 32) | salt as u64)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}_{:08x}", self.0 >> 32, self.0 as u32)
    }
}

/// One chat line on screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub nick: String,
    pub text: String,
    pub category: Category,
    pub is_violation: bool,
    /// Vertical position (px from panel top)
    pub y: f64,
    /// Length-adjusted travel speed (px/s)
    pub speed: f64,
    /// Engine clock at spawn (ms)
    pub created_at_ms: f64,
}

/// Feedback toast shown after an action or a miss
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub visible: bool,
    pub ok: bool,
    pub title: String,
    pub tip: String,
    pub ttl: Countdown,
}

impl Feedback {
    pub fn show(ok: bool, title: String, tip: String, ttl_ms: f64) -> Self {
        Self {
            visible: true,
            ok,
            title,
            tip,
            ttl: Countdown::new(ttl_ms),
        }
    }
}

/// Removal counts per violating category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalCounts {
    pub long_form: u32,
    pub advice: u32,
    pub deflection: u32,
    pub keyword: u32,
    pub brigade: u32,
}

impl RemovalCounts {
    pub fn get(&self, category: Category) -> u32 {
        match category {
            Category::Ordinary => 0,
            Category::LongForm => self.long_form,
            Category::Advice => self.advice,
            Category::Deflection => self.deflection,
            Category::Keyword => self.keyword,
            Category::Brigade => self.brigade,
        }
    }

    pub fn record(&mut self, category: Category) {
        let slot = match category {
            Category::Ordinary => return,
            Category::LongForm => &mut self.long_form,
            Category::Advice => &mut self.advice,
            Category::Deflection => &mut self.deflection,
            Category::Keyword => &mut self.keyword,
            Category::Brigade => &mut self.brigade,
        };
        *slot = slot.saturating_add(1);
    }

    /// Aggregate removals (the only source for the reported total)
    pub fn total(&self) -> u32 {
        Category::VIOLATIONS.iter().map(|&c| self.get(c)).sum()
    }
}

/// How a finished run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Cleared,
    Failed,
}

/// Run lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    /// Constructed or reset; tutorial visible
    #[default]
    Idle,
    Running,
    Paused,
    Ended(Outcome),
}

/// Complete mutable state of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub phase: RunPhase,
    pub stage_index: usize,
    pub stage_left_ms: f64,
    pub spawn_acc_ms: f64,
    /// Simulated run clock (ms); used for message age
    pub clock_ms: f64,
    pub messages: Vec<ChatMessage>,
    pub mental: f64,
    pub score: f64,
    pub combo: u32,
    pub max_combo: u32,
    pub removed: RemovalCounts,
    pub armed: Sanction,
    pub event: EventKind,
    pub event_timer: Countdown,
    pub input_lock: Countdown,
    pub subtitle: String,
    pub subtitle_cooldown: Countdown,
    pub feedback: Feedback,
    /// Spawn sequence for message ids
    pub next_seq: u32,
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

impl RunState {
    pub fn new() -> Self {
        let stage = stage_at(0);
        Self {
            phase: RunPhase::Idle,
            stage_index: 0,
            stage_left_ms: stage.duration_ms,
            spawn_acc_ms: 0.0,
            clock_ms: 0.0,
            messages: Vec::new(),
            mental: MENTAL_MAX,
            score: 0.0,
            combo: 0,
            max_combo: 0,
            removed: RemovalCounts::default(),
            armed: Sanction::Mute,
            event: EventKind::None,
            event_timer: Countdown::default(),
            input_lock: Countdown::default(),
            subtitle: SUBTITLE_READY.to_string(),
            subtitle_cooldown: Countdown::default(),
            feedback: Feedback::default(),
            next_seq: 0,
        }
    }

    pub fn stage(&self) -> &'static StageConfig {
        stage_at(self.stage_index)
    }

    /// Add (or subtract) mental, saturating to [0, 100]
    pub fn adjust_mental(&mut self, delta: f64) {
        self.mental = (self.mental + delta).clamp(MENTAL_MIN, MENTAL_MAX);
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }
}

/// Immutable view of a run, safe to hand to presentation code
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: RunPhase,
    pub stage: StageConfig,
    pub stage_index: usize,
    pub stage_time_left_ms: f64,
    pub viewers: u32,
    pub mental: f64,
    pub score: f64,
    pub combo: u32,
    pub max_combo: u32,
    pub removed_by_category: RemovalCounts,
    pub removed_total: u32,
    pub armed_sanction: Sanction,
    pub event: EventKind,
    pub event_left_ms: f64,
    pub subtitle: String,
    pub messages: Vec<ChatMessage>,
    pub input_lock_ms: f64,
    pub feedback: Feedback,
    pub clock_ms: f64,
}

impl Snapshot {
    pub fn from_state(state: &RunState) -> Self {
        let stage = *state.stage();
        Self {
            phase: state.phase,
            stage,
            stage_index: state.stage_index,
            stage_time_left_ms: state.stage_left_ms,
            viewers: stage.viewers,
            mental: state.mental,
            score: state.score,
            combo: state.combo,
            max_combo: state.max_combo,
            removed_by_category: state.removed,
            removed_total: state.removed.total(),
            armed_sanction: state.armed,
            event: state.event,
            event_left_ms: state.event_timer.remaining_ms(),
            subtitle: state.subtitle.clone(),
            messages: state.messages.clone(),
            input_lock_ms: state.input_lock.remaining_ms(),
            feedback: state.feedback.clone(),
            clock_ms: state.clock_ms,
        }
    }

    pub fn show_tutorial(&self) -> bool {
        self.phase == RunPhase::Idle
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == RunPhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, RunPhase::Ended(_))
    }

    pub fn is_cleared(&self) -> bool {
        self.phase == RunPhase::Ended(Outcome::Cleared)
    }

    pub fn mood(&self) -> Mood {
        Mood::from_mental(self.mental)
    }

    /// Score rounded for display
    pub fn display_score(&self) -> u64 {
        self.score.round() as u64
    }
}
