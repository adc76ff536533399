//! Run orchestration
//!
//! `Engine` owns the run state and the random source. The driver calls
//! `update` once per frame and `act` on player input; presentation reads
//! `snapshot`.

use super::event::{EventKind, roll_event};
use super::judge::{Grade, Verdict, judge, tip_for};
use super::rng::{ChatRng, wall_clock_seed};
use super::stage::{STAGE_COUNT, StageConfig};
use super::state::{
    Category, ChatMessage, Feedback, MessageId, Mood, Outcome, RunPhase, RunState, Sanction,
    Snapshot,
};
use super::text::{
    ESCALATION_SUFFIX, NICKS, SUBTITLES_ANGRY, SUBTITLES_CALM, SUBTITLES_PRAISE, SUBTITLES_TIRED,
    SUBTITLES_WARNING, texts_for,
};
use crate::consts::*;
use crate::settings::EngineConfig;

/// Chance that a stage-four violation gets the escalation twist
const ESCALATION_CHANCE: f64 = 0.18;

const BASE_VIOLATION_POOL: &[Category] = &[
    Category::LongForm,
    Category::Advice,
    Category::Deflection,
    Category::Brigade,
    Category::Keyword,
];

// Long-form and keyword are doubled
const ESCALATED_VIOLATION_POOL: &[Category] = &[
    Category::LongForm,
    Category::Advice,
    Category::Deflection,
    Category::Brigade,
    Category::Keyword,
    Category::LongForm,
    Category::Keyword,
];

fn violation_pool(stage: &StageConfig) -> &'static [Category] {
    if stage.is_escalated() {
        ESCALATED_VIOLATION_POOL
    } else {
        BASE_VIOLATION_POOL
    }
}

/// Longer lines scroll slower: divisor in [0.85, 1.4]
pub fn length_factor(text: &str) -> f64 {
    (0.85 + text.chars().count() as f64 / 140.0).clamp(0.85, 1.4)
}

/// Score gained for an accepted action, `combo` being the post-action combo
pub fn action_reward(
    sanction: Sanction,
    stage_multiplier: f64,
    verdict: &Verdict,
    combo: u32,
) -> f64 {
    let timing = if verdict.grade == Grade::Perfect {
        PERFECT_BONUS
    } else {
        1.0
    };
    let over_punish = if verdict.over_punished {
        OVER_PUNISH_FACTOR
    } else {
        1.0
    };
    let combo_amp = 1.0 + (combo as f64 * COMBO_STEP).min(COMBO_AMP_CAP);

    sanction.base_points() * stage_multiplier * timing * over_punish * combo_amp
}

/// Mental restored by an accepted action
pub fn action_heal(verdict: &Verdict) -> f64 {
    let base: f64 = if verdict.grade == Grade::Perfect { 4.0 } else { 2.0 };
    let penalty = if verdict.over_punished { 1.0 } else { 0.0 };
    (base - penalty).max(1.0)
}

fn pick_subtitle(rng: &mut ChatRng, mental: f64, combo: u32) -> &'static str {
    if mental <= WARNING_MENTAL {
        return *rng.pick(SUBTITLES_WARNING);
    }
    if combo >= PRAISE_COMBO {
        return *rng.pick(SUBTITLES_PRAISE);
    }
    match Mood::from_mental(mental) {
        Mood::Calm => *rng.pick(SUBTITLES_CALM),
        Mood::Angry => *rng.pick(SUBTITLES_ANGRY),
        Mood::Tired => *rng.pick(SUBTITLES_TIRED),
    }
}

/// The simulation engine for one play session
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    seed: u32,
    rng: ChatRng,
    state: RunState,
}

impl Engine {
    /// Create an engine; without a seed one is taken from the wall clock
    pub fn new(config: EngineConfig, seed: Option<u32>) -> Self {
        let seed = seed.unwrap_or_else(wall_clock_seed);
        log::info!("Engine created with seed {seed}");
        Self {
            config,
            seed,
            rng: ChatRng::new(seed),
            state: RunState::new(),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Only affects where messages count as scrolled off
    pub fn set_display_panel_height(&mut self, px: f64) {
        self.config.display_panel_height = px;
    }

    /// Back to the tutorial with a fresh run. The random stream continues.
    pub fn reset(&mut self) {
        self.state = RunState::new();
        log::info!("Run reset");
    }

    pub fn start(&mut self) {
        if self.state.phase != RunPhase::Idle {
            return;
        }
        self.state.phase = RunPhase::Running;
        self.state.subtitle =
            pick_subtitle(&mut self.rng, self.state.mental, self.state.combo).to_string();
        log::info!("Run started (stage {})", self.state.stage().id);
    }

    pub fn toggle_pause(&mut self) {
        self.state.phase = match self.state.phase {
            RunPhase::Running => RunPhase::Paused,
            RunPhase::Paused => RunPhase::Running,
            other => other,
        };
    }

    pub fn set_armed_sanction(&mut self, sanction: Sanction) {
        self.state.armed = sanction;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_state(&self.state)
    }

    /// Advance the simulation by `dt_ms`
    pub fn update(&mut self, dt_ms: f64) {
        if !self.state.is_running() {
            return;
        }
        let dt = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        self.state.clock_ms += dt;

        // Timers
        self.state.input_lock.tick(dt);
        if self.state.feedback.visible {
            self.state.feedback.ttl.tick(dt);
            if !self.state.feedback.ttl.is_active() {
                self.state.feedback = Feedback::default();
            }
        }

        // World events
        if self.state.event_timer.is_active() {
            if self.state.event_timer.tick(dt) {
                self.state.event = EventKind::None;
            }
        } else {
            let rolled = roll_event(&mut self.rng, self.state.stage().id);
            if rolled.kind.is_active() {
                log::debug!("World event {:?} for {}ms", rolled.kind, rolled.duration_ms);
                self.state.event = rolled.kind;
                self.state.event_timer.set(rolled.duration_ms);
                if rolled.kind == EventKind::Ad {
                    self.state.input_lock.extend_to(AD_INPUT_LOCK_MS);
                }
            }
        }

        // Subtitle
        if self.state.subtitle_cooldown.is_active() {
            self.state.subtitle_cooldown.tick(dt);
        } else {
            self.state.subtitle =
                pick_subtitle(&mut self.rng, self.state.mental, self.state.combo).to_string();
            self.state.subtitle_cooldown.set(SUBTITLE_REFRESH_MS);
        }

        // Stage clock
        self.state.stage_left_ms -= dt;
        if self.state.stage_left_ms <= 0.0 {
            if self.state.stage_index >= STAGE_COUNT - 1 {
                self.state.phase = RunPhase::Ended(Outcome::Cleared);
                log::info!("All stages cleared, score {:.1}", self.state.score);
                return;
            }
            self.advance_stage();
        }

        // Spawning
        self.state.spawn_acc_ms += dt;
        let interval = self.state.stage().spawn_interval_ms;
        while self.state.spawn_acc_ms >= interval {
            self.state.spawn_acc_ms -= interval;
            self.spawn_message();
        }

        // Scrolling
        let lag = if self.state.event == EventKind::Lag {
            LAG_SPEED_FACTOR
        } else {
            1.0
        };
        let dy = self.state.stage().speed_px_per_sec * lag * dt / 1000.0;
        let bottom = self.config.display_panel_height - BOTTOM_MARGIN_PX;

        let messages = std::mem::take(&mut self.state.messages);
        let mut kept = Vec::with_capacity(messages.len());
        for mut msg in messages {
            msg.y += dy;
            if msg.y >= bottom {
                self.scrolled_off(&msg);
            } else {
                kept.push(msg);
            }
        }
        self.state.messages = kept;

        if self.state.mental <= MENTAL_MIN {
            self.state.phase = RunPhase::Ended(Outcome::Failed);
            log::info!(
                "Mental depleted at stage {}, score {:.1}",
                self.state.stage().id,
                self.state.score
            );
        }
    }

    fn advance_stage(&mut self) {
        self.state.stage_index += 1;
        self.state.stage_left_ms = self.state.stage().duration_ms;
        self.state.adjust_mental(STAGE_CLEAR_HEAL);
        self.state.combo = 0;
        log::info!(
            "Stage {} begins ({} viewers)",
            self.state.stage().id,
            self.state.stage().viewers
        );
    }

    /// A message reached the bottom of the panel untouched
    fn scrolled_off(&mut self, msg: &ChatMessage) {
        if msg.is_violation {
            self.state.adjust_mental(-MISS_PENALTY);
            self.state.combo = 0;
            self.state.feedback = Feedback::show(
                false,
                "MISS 놓쳤습니다".to_string(),
                format!("{}을 놓치면 멘탈이 깎입니다", msg.category.label()),
                MISS_TOAST_MS,
            );
        } else {
            self.state.adjust_mental(IGNORE_HEAL);
        }
    }

    fn spawn_message(&mut self) {
        let stage = *self.state.stage();
        let is_violation = self.rng.chance(stage.violation_rate);
        let mut category = if is_violation {
            *self.rng.pick(violation_pool(&stage))
        } else {
            Category::Ordinary
        };
        let mut text = self.rng.pick(texts_for(category)).to_string();
        let nick = self.rng.pick(NICKS).to_string();
        let id = MessageId::new(self.state.next_seq, self.rng.next_u32());
        self.state.next_seq = self.state.next_seq.wrapping_add(1);
        let speed = stage.speed_px_per_sec / length_factor(&text);

        if stage.is_escalated() && is_violation && self.rng.chance(ESCALATION_CHANCE) {
            text.push_str(ESCALATION_SUFFIX);
            if category == Category::Keyword {
                category = Category::Brigade;
            }
        }

        log::trace!("Spawn {id} {category:?}");
        self.push_message(ChatMessage {
            id,
            nick,
            text,
            category,
            is_violation,
            y: MESSAGE_START_Y,
            speed,
            created_at_ms: self.state.clock_ms,
        });
    }

    /// Newest at the head; the oldest fall off past the cap
    fn push_message(&mut self, msg: ChatMessage) {
        self.state.messages.insert(0, msg);
        self.state.messages.truncate(MAX_LIVE_MESSAGES);
    }

    /// Apply a sanction to a live message. Returns the verdict, or `None`
    /// when the action was ignored.
    pub fn act(&mut self, id: MessageId, sanction: Option<Sanction>) -> Option<Verdict> {
        if !self.state.is_running() || self.state.input_lock.is_active() {
            return None;
        }
        let sanction = sanction.unwrap_or(self.state.armed);
        let idx = self.state.messages.iter().position(|m| m.id == id)?;
        let msg = self.state.messages.remove(idx);
        let latency = self.state.clock_ms - msg.created_at_ms;
        let verdict = judge(msg.is_violation, msg.category, sanction, latency);

        if verdict.accepted {
            self.reward(&msg, sanction, &verdict);
        } else {
            self.penalize(&msg, sanction);
        }
        Some(verdict)
    }

    fn penalize(&mut self, msg: &ChatMessage, sanction: Sanction) {
        self.state.combo = 0;

        let penalty = if !msg.is_violation {
            WRONG_TARGET_PENALTY
        } else if msg.category == Category::Keyword {
            WEAK_KEYWORD_PENALTY
        } else {
            WEAK_SANCTION_PENALTY
        };
        self.state.adjust_mental(-penalty);
        if sanction == Sanction::Ban {
            self.state.adjust_mental(-BAN_MISFIRE_PENALTY);
        }

        log::debug!(
            "Rejected {:?} on {} ({:?}), mental {:.1}",
            sanction,
            msg.id,
            msg.category,
            self.state.mental
        );
        self.state.feedback = Feedback::show(
            false,
            format!("오답: {} ({})", sanction.label(), msg.category.label()),
            tip_for(msg.is_violation, msg.category, sanction),
            FAILURE_TOAST_MS,
        );
    }

    fn reward(&mut self, msg: &ChatMessage, sanction: Sanction, verdict: &Verdict) {
        self.state.combo += if verdict.grade == Grade::Perfect { 2 } else { 1 };
        self.state.max_combo = self.state.max_combo.max(self.state.combo);

        let multiplier = self.state.stage().score_multiplier;
        self.state.score += action_reward(sanction, multiplier, verdict, self.state.combo);
        self.state.removed.record(msg.category);
        self.state.adjust_mental(action_heal(verdict));

        self.state.feedback = Feedback::show(
            true,
            format!("{}: {} 성공", verdict.grade.label(), sanction.label()),
            tip_for(msg.is_violation, msg.category, sanction),
            SUCCESS_TOAST_MS,
        );

        if sanction == Sanction::Ban {
            self.state.input_lock.extend_to(BAN_COOLDOWN_MS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::judge::minimum_sanction;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn engine(seed: u32) -> Engine {
        Engine::new(EngineConfig::default(), Some(seed))
    }

    fn running(seed: u32) -> Engine {
        let mut e = engine(seed);
        e.start();
        e
    }

    fn test_message(seq: u32, category: Category, created_at_ms: f64) -> ChatMessage {
        ChatMessage {
            id: MessageId::new(seq, 0),
            nick: "tester".to_string(),
            text: "hello".to_string(),
            category,
            is_violation: category != Category::Ordinary,
            y: MESSAGE_START_Y,
            speed: 30.0,
            created_at_ms,
        }
    }

    /// Plant a message at the current clock and return its id
    fn plant(e: &mut Engine, seq: u32, category: Category) -> MessageId {
        let clock = e.state.clock_ms;
        let msg = test_message(seq, category, clock);
        let id = msg.id;
        e.push_message(msg);
        id
    }

    #[test]
    fn test_idle_until_started() {
        let mut e = engine(1);
        let before = e.snapshot();
        e.update(500.0);
        assert_eq!(e.snapshot(), before);
        assert!(before.show_tutorial());

        e.start();
        let snap = e.snapshot();
        assert!(snap.is_running());
        assert!(!snap.show_tutorial());
        assert_ne!(snap.subtitle, crate::sim::text::SUBTITLE_READY);
    }

    #[test]
    fn test_pause_toggle() {
        let mut e = engine(2);
        e.toggle_pause();
        assert!(e.snapshot().show_tutorial(), "pause before start is ignored");

        e.start();
        e.toggle_pause();
        assert!(e.snapshot().is_paused());
        let paused = e.snapshot();
        e.update(1000.0);
        assert_eq!(e.snapshot(), paused, "ticking while paused is a no-op");

        e.toggle_pause();
        assert!(e.snapshot().is_running());
    }

    #[test]
    fn test_reset_wipes_run() {
        let mut e = running(3);
        for _ in 0..300 {
            e.update(FRAME_MS);
        }
        assert!(!e.snapshot().messages.is_empty());
        e.reset();
        let snap = e.snapshot();
        assert!(snap.show_tutorial());
        assert!(snap.messages.is_empty());
        assert_eq!(snap.mental, 100.0);
        assert_eq!(snap.score, 0.0);
        assert_eq!(snap.stage_index, 0);
        assert_eq!(snap.stage_time_left_ms, 25_000.0);
    }

    #[test]
    fn test_spawn_interval_accumulates() {
        let mut e = running(4);
        e.update(899.0);
        assert_eq!(e.snapshot().messages.len(), 0);
        e.update(1.0);
        assert_eq!(e.snapshot().messages.len(), 1);
        // One large delta spawns several at once
        e.update(2700.0);
        assert_eq!(e.snapshot().messages.len(), 4);
    }

    #[test]
    fn test_message_cap_drops_oldest() {
        let mut e = running(5);
        for seq in 0..40 {
            plant(&mut e, seq, Category::Ordinary);
        }
        let oldest = e.snapshot().messages.last().unwrap().id;
        assert_eq!(oldest, MessageId::new(0, 0));

        e.spawn_message();
        let snap = e.snapshot();
        assert_eq!(snap.messages.len(), MAX_LIVE_MESSAGES);
        assert!(snap.messages.iter().all(|m| m.id != oldest));
        assert_eq!(snap.messages[0].created_at_ms, e.state.clock_ms);
        assert_ne!(snap.messages[0].id, MessageId::new(39, 0));
        assert_eq!(snap.messages[1].id, MessageId::new(39, 0));
    }

    #[test]
    fn test_spawned_messages_are_consistent() {
        let mut e = running(6);
        e.state.stage_index = 4;
        for _ in 0..400 {
            e.spawn_message();
            let m = e.snapshot().messages[0].clone();
            assert_eq!(m.is_violation, m.category != Category::Ordinary);
            assert_eq!(m.y, MESSAGE_START_Y);
            assert!(m.speed >= 120.0 / 1.4 - 1e-9 && m.speed <= 120.0 / 0.85 + 1e-9);
        }
    }

    /// Spawn `n` messages at `stage_index`, returning each as it lands
    fn spawn_at(seed: u32, stage_index: usize, n: usize) -> Vec<ChatMessage> {
        let mut e = running(seed);
        e.state.stage_index = stage_index;
        (0..n)
            .map(|_| {
                e.spawn_message();
                e.state.messages[0].clone()
            })
            .collect()
    }

    fn long_form_or_keyword_share(messages: &[ChatMessage]) -> f64 {
        let violations: Vec<_> = messages.iter().filter(|m| m.is_violation).collect();
        let weighted = violations
            .iter()
            .filter(|m| matches!(m.category, Category::LongForm | Category::Keyword))
            .count();
        weighted as f64 / violations.len() as f64
    }

    #[test]
    fn test_escalation_twist_at_stage_four() {
        let messages = spawn_at(77, 3, 10_000);
        let violations: Vec<_> = messages.iter().filter(|m| m.is_violation).collect();
        let suffixed: Vec<_> = violations
            .iter()
            .filter(|m| m.text.ends_with(ESCALATION_SUFFIX))
            .collect();
        let ratio = suffixed.len() as f64 / violations.len() as f64;
        assert!((0.15..0.21).contains(&ratio), "escalation ratio {ratio}");
        assert!(suffixed.iter().all(|m| m.category != Category::Keyword));
        assert!(
            messages
                .iter()
                .filter(|m| !m.is_violation)
                .all(|m| !m.text.ends_with(ESCALATION_SUFFIX))
        );
    }

    #[test]
    fn test_escalated_pool_weights_long_form_and_keyword() {
        let base = long_form_or_keyword_share(&spawn_at(78, 0, 20_000));
        let escalated = long_form_or_keyword_share(&spawn_at(78, 3, 20_000));
        // 2/5 of the base pool; 4/7 of the escalated one, ~0.52 after keyword twists
        assert!((0.35..0.45).contains(&base), "base share {base}");
        assert!((0.48..0.57).contains(&escalated), "escalated share {escalated}");
        assert!(escalated > base);
    }

    #[test]
    fn test_no_escalation_before_stage_four() {
        for stage_index in 0..=2 {
            let messages = spawn_at(79, stage_index, 3_000);
            assert!(messages.iter().any(|m| m.is_violation));
            assert!(messages.iter().all(|m| !m.text.ends_with(ESCALATION_SUFFIX)));
        }
    }

    #[test]
    fn test_stage_transition() {
        let mut e = running(7);
        e.state.mental = 95.0;
        e.state.combo = 7;
        e.state.stage_left_ms = 10.0;
        e.update(10.0);
        let snap = e.snapshot();
        assert_eq!(snap.stage_index, 1);
        assert_eq!(snap.stage.id, 2);
        assert_eq!(snap.mental, 100.0);
        assert_eq!(snap.combo, 0);
        assert_eq!(snap.stage_time_left_ms, 25_000.0);
        assert!(snap.is_running());
    }

    #[test]
    fn test_final_stage_clears_run() {
        let mut e = running(8);
        e.state.stage_index = STAGE_COUNT - 1;
        e.state.stage_left_ms = 5.0;
        e.update(FRAME_MS);
        let snap = e.snapshot();
        assert!(snap.is_game_over());
        assert!(snap.is_cleared());
        assert!(!snap.is_running());
    }

    #[test]
    fn test_missed_violation_costs_mental() {
        let mut e = running(9);
        plant(&mut e, 1, Category::Advice);
        e.state.messages[0].y = e.config.display_panel_height - BOTTOM_MARGIN_PX - 0.01;
        e.state.combo = 4;
        e.update(FRAME_MS);
        let snap = e.snapshot();
        assert_eq!(snap.mental, 90.0);
        assert_eq!(snap.combo, 0);
        assert!(snap.feedback.visible && !snap.feedback.ok);
        assert!(snap.messages.iter().all(|m| m.id != MessageId::new(1, 0)));
    }

    #[test]
    fn test_ignored_ordinary_heals() {
        let mut e = running(10);
        e.state.mental = 50.0;
        plant(&mut e, 1, Category::Ordinary);
        e.state.messages[0].y = 10_000.0;
        e.update(1.0);
        assert!((e.snapshot().mental - 50.1).abs() < 1e-9);
    }

    #[test]
    fn test_lag_slows_scroll() {
        let mut e = running(11);
        e.state.spawn_acc_ms = -1.0e9;
        plant(&mut e, 1, Category::Ordinary);
        e.state.event = EventKind::Lag;
        e.state.event_timer.set(5000.0);
        e.update(1000.0);
        let y = e.snapshot().messages[0].y;
        assert!((y - (MESSAGE_START_Y + 30.0 * LAG_SPEED_FACTOR)).abs() < 1e-9);
    }

    #[test]
    fn test_panel_height_moves_threshold() {
        let mut e = running(12);
        e.state.spawn_acc_ms = -1.0e9;
        plant(&mut e, 1, Category::Ordinary);
        e.state.messages[0].y = 200.0;
        e.set_display_panel_height(220.0);
        e.update(1.0);
        assert!(e.snapshot().messages.is_empty());
    }

    #[test]
    fn test_perfect_action_rewards() {
        let mut e = running(13);
        let id = plant(&mut e, 1, Category::LongForm);
        e.state.clock_ms += 200.0;
        let verdict = e.act(id, Some(Sanction::Mute)).unwrap();
        assert_eq!(verdict.grade, Grade::Perfect);

        let snap = e.snapshot();
        assert_eq!(snap.combo, 2);
        assert_eq!(snap.max_combo, 2);
        let expected = 1.0 * 1.0 * 1.25 * 1.0 * (1.0 + 2.0 * 0.03);
        assert!((snap.score - expected).abs() < 1e-9);
        assert_eq!(snap.removed_by_category.long_form, 1);
        assert_eq!(snap.removed_total, 1);
        assert!(snap.feedback.ok);
        assert!(snap.messages.is_empty());
    }

    #[test]
    fn test_armed_sanction_used_by_default() {
        let mut e = running(14);
        e.set_armed_sanction(Sanction::Kick);
        let id = plant(&mut e, 1, Category::Brigade);
        let verdict = e.act(id, None).unwrap();
        assert!(verdict.accepted && !verdict.over_punished);
        assert_eq!(e.snapshot().armed_sanction, Sanction::Kick);
    }

    #[test]
    fn test_wrong_target_penalty() {
        let mut e = running(15);
        e.state.combo = 6;
        let id = plant(&mut e, 1, Category::Ordinary);
        let verdict = e.act(id, Some(Sanction::Mute)).unwrap();
        assert!(!verdict.accepted);
        let snap = e.snapshot();
        assert_eq!(snap.mental, 85.0);
        assert_eq!(snap.combo, 0);
        assert!(!snap.feedback.ok);
        assert!(snap.feedback.title.contains("채금"));
        assert_eq!(snap.removed_total, 0);
    }

    #[test]
    fn test_ban_misfire_stacks_penalty() {
        let mut e = running(16);
        let id = plant(&mut e, 1, Category::Ordinary);
        e.act(id, Some(Sanction::Ban));
        assert_eq!(e.snapshot().mental, 75.0);
    }

    #[test]
    fn test_under_sanctioned_keyword_penalty() {
        let mut e = running(17);
        let id = plant(&mut e, 1, Category::Keyword);
        e.act(id, Some(Sanction::Mute));
        assert_eq!(e.snapshot().mental, 80.0);

        let id = plant(&mut e, 2, Category::Advice);
        e.state.clock_ms += 2000.0;
        e.act(id, Some(Sanction::Mute));
        assert_eq!(e.snapshot().mental, 68.0, "too slow counts as a miss");
    }

    #[test]
    fn test_ban_imposes_cooldown() {
        let mut e = running(18);
        let a = plant(&mut e, 1, Category::Keyword);
        let b = plant(&mut e, 2, Category::Keyword);
        assert!(e.act(a, Some(Sanction::Ban)).unwrap().accepted);
        assert_eq!(e.snapshot().input_lock_ms, BAN_COOLDOWN_MS);
        assert!(e.act(b, Some(Sanction::Ban)).is_none(), "locked input is ignored");

        e.state.spawn_acc_ms = -1.0e9;
        e.update(BAN_COOLDOWN_MS);
        assert!(e.act(b, Some(Sanction::Ban)).is_some());
    }

    #[test]
    fn test_ad_event_locks_input() {
        // Search for a seed/tick where an ad fires
        for seed in 1..200 {
            let mut e = running(seed);
            e.state.stage_index = 2;
            for _ in 0..200 {
                let before = e.snapshot().event;
                e.update(1.0);
                let snap = e.snapshot();
                if before == EventKind::None && snap.event == EventKind::Ad {
                    assert!(snap.input_lock_ms >= AD_INPUT_LOCK_MS - 1e-9);
                    return;
                }
            }
        }
        panic!("no ad event rolled");
    }

    #[test]
    fn test_event_expires() {
        let mut e = running(20);
        e.state.event = EventKind::Donation;
        e.state.event_timer.set(100.0);
        e.update(60.0);
        assert_eq!(e.snapshot().event, EventKind::Donation);
        e.update(60.0);
        let snap = e.snapshot();
        assert_eq!(snap.event, EventKind::None);
        assert_eq!(snap.event_left_ms, 0.0);
    }

    #[test]
    fn test_unknown_id_ignored() {
        let mut e = running(21);
        plant(&mut e, 1, Category::Advice);
        let before = e.snapshot();
        assert!(e.act(MessageId::new(999, 999), Some(Sanction::Mute)).is_none());
        assert_eq!(e.snapshot(), before);
    }

    #[test]
    fn test_act_ignored_when_not_running() {
        let mut e = engine(22);
        let id = plant(&mut e, 1, Category::Advice);
        assert!(e.act(id, Some(Sanction::Mute)).is_none());
        e.start();
        e.toggle_pause();
        assert!(e.act(id, Some(Sanction::Mute)).is_none());
        assert_eq!(e.snapshot().messages.len(), 1);
    }

    #[test]
    fn test_game_over_on_zero_mental() {
        let mut e = running(23);
        let mut seq = 0;
        while e.snapshot().mental > 0.0 {
            let id = plant(&mut e, seq, Category::Ordinary);
            e.act(id, Some(Sanction::Kick));
            seq += 1;
        }
        assert!(e.snapshot().is_running(), "game over waits for the next tick");
        e.update(FRAME_MS);
        let snap = e.snapshot();
        assert!(snap.is_game_over() && !snap.is_cleared() && !snap.is_running());

        let frozen = e.snapshot();
        for _ in 0..120 {
            e.update(FRAME_MS);
        }
        if let Some(m) = frozen.messages.first() {
            assert!(e.act(m.id, Some(Sanction::Ban)).is_none());
        }
        assert_eq!(e.snapshot(), frozen);
        e.toggle_pause();
        assert!(e.snapshot().is_game_over());
    }

    #[test]
    fn test_toast_expires() {
        let mut e = running(24);
        let id = plant(&mut e, 1, Category::Advice);
        e.act(id, Some(Sanction::Mute));
        assert!(e.snapshot().feedback.visible);
        e.update(SUCCESS_TOAST_MS);
        assert!(!e.snapshot().feedback.visible);
    }

    #[test]
    fn test_subtitle_overrides() {
        let mut rng = ChatRng::new(5);
        for _ in 0..50 {
            assert!(SUBTITLES_WARNING.contains(&pick_subtitle(&mut rng, 20.0, 10)));
            assert!(SUBTITLES_PRAISE.contains(&pick_subtitle(&mut rng, 90.0, 5)));
            assert!(SUBTITLES_TIRED.contains(&pick_subtitle(&mut rng, 25.0, 0)));
            assert!(SUBTITLES_ANGRY.contains(&pick_subtitle(&mut rng, 70.0, 0)));
            assert!(SUBTITLES_CALM.contains(&pick_subtitle(&mut rng, 71.0, 0)));
        }
    }

    #[test]
    fn test_snapshot_idempotent() {
        let mut e = running(25);
        for _ in 0..100 {
            e.update(FRAME_MS);
        }
        assert_eq!(e.snapshot(), e.snapshot());
    }

    #[test]
    fn test_determinism() {
        let run = |seed| {
            let mut e = running(seed);
            let mut snaps = Vec::new();
            for frame in 0..1500 {
                e.update(FRAME_MS);
                if frame % 7 == 0 {
                    let target = e.snapshot().messages.last().map(|m| (m.id, m.category));
                    if let Some((id, category)) = target {
                        e.act(id, Some(minimum_sanction(category)));
                    }
                }
                snaps.push(serde_json::to_string(&e.snapshot()).unwrap());
            }
            snaps
        };
        assert_eq!(run(99999), run(99999));
        assert_ne!(run(99999), run(11111));
    }

    #[test]
    fn test_reward_formula() {
        let perfect = Verdict {
            accepted: true,
            grade: Grade::Perfect,
            over_punished: false,
        };
        let r = action_reward(Sanction::Ban, 5.0, &perfect, 100);
        assert!((r - 4.0 * 5.0 * 1.25 * 2.5).abs() < 1e-9);

        let over = Verdict {
            over_punished: true,
            ..perfect
        };
        assert_eq!(action_heal(&perfect), 4.0);
        assert_eq!(action_heal(&over), 3.0);
        let good_over = Verdict {
            grade: Grade::Good,
            ..over
        };
        assert_eq!(action_heal(&good_over), 1.0);
    }

    #[test]
    fn test_length_factor_bounds() {
        assert_eq!(length_factor(""), 0.85);
        assert_eq!(length_factor(&"가".repeat(500)), 1.4);
        assert!((length_factor(&"a".repeat(14)) - 0.95).abs() < 1e-9);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Update(f64),
            ActHead(u8),
            ActTail(u8),
            Arm(u8),
            Pause,
        }

        fn sanction_of(n: u8) -> Sanction {
            Sanction::ALL[n as usize % 3]
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                4 => (0.0f64..120.0).prop_map(Op::Update),
                2 => any::<u8>().prop_map(Op::ActHead),
                2 => any::<u8>().prop_map(Op::ActTail),
                1 => any::<u8>().prop_map(Op::Arm),
                1 => Just(Op::Pause),
            ]
        }

        fn apply(e: &mut Engine, op: &Op) {
            match *op {
                Op::Update(dt) => e.update(dt),
                Op::ActHead(n) => {
                    if let Some(id) = e.snapshot().messages.first().map(|m| m.id) {
                        e.act(id, Some(sanction_of(n)));
                    }
                }
                Op::ActTail(n) => {
                    if let Some(id) = e.snapshot().messages.last().map(|m| m.id) {
                        e.act(id, Some(sanction_of(n)));
                    }
                }
                Op::Arm(n) => e.set_armed_sanction(sanction_of(n)),
                Op::Pause => e.toggle_pause(),
            }
        }

        proptest! {
            #[test]
            fn prop_invariants_hold(
                seed in any::<u32>(),
                ops in prop::collection::vec(op(), 1..200),
            ) {
                let mut e = running(seed);
                for op in &ops {
                    apply(&mut e, op);
                    let snap = e.snapshot();
                    prop_assert!((0.0..=100.0).contains(&snap.mental));
                    prop_assert!(snap.score >= 0.0);
                    prop_assert!(snap.stage_index < STAGE_COUNT);
                    prop_assert!(snap.messages.len() <= MAX_LIVE_MESSAGES);
                    prop_assert!(snap.max_combo >= snap.combo);
                    prop_assert_eq!(snap.removed_total, snap.removed_by_category.total());
                }
            }

            #[test]
            fn prop_replay_is_identical(
                seed in any::<u32>(),
                ops in prop::collection::vec(op(), 1..200),
            ) {
                let mut a = running(seed);
                let mut b = running(seed);
                for op in &ops {
                    apply(&mut a, op);
                    apply(&mut b, op);
                    prop_assert_eq!(a.snapshot(), b.snapshot());
                }
            }

            #[test]
            fn prop_reward_monotone_in_combo(
                combo in 0u32..200,
                sanction in 0u8..3,
                perfect in any::<bool>(),
                over in any::<bool>(),
            ) {
                let verdict = Verdict {
                    accepted: true,
                    grade: if perfect { Grade::Perfect } else { Grade::Good },
                    over_punished: over,
                };
                let s = sanction_of(sanction);
                let lo = action_reward(s, 2.0, &verdict, combo);
                let hi = action_reward(s, 2.0, &verdict, combo + 1);
                if combo as f64 * COMBO_STEP >= COMBO_AMP_CAP {
                    prop_assert_eq!(lo, hi);
                } else {
                    prop_assert!(hi > lo);
                }

                let clean = Verdict { over_punished: false, ..verdict };
                let punished = Verdict { over_punished: true, ..verdict };
                prop_assert!(
                    action_reward(s, 2.0, &punished, combo) < action_reward(s, 2.0, &clean, combo)
                );
            }
        }
    }
}
