//! End-of-run summary
//!
//! What the result screen shows once a run is over.

use serde::{Deserialize, Serialize};

use crate::sim::{RemovalCounts, Snapshot};

/// Score needed at stage 4+ for the second-best title
pub const VETERAN_SCORE: u64 = 6000;

/// Title awarded at the end of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunTitle {
    /// Cleared every stage
    ForestGuardian,
    /// Stage 4+ with a high score
    CertifiedModerator,
    /// Reached stage 3
    CommunityManager,
    Rookie,
}

impl RunTitle {
    pub fn for_run(cleared: bool, score: u64, stage_id: u8) -> Self {
        if cleared {
            RunTitle::ForestGuardian
        } else if stage_id >= 4 && score > VETERAN_SCORE {
            RunTitle::CertifiedModerator
        } else if stage_id >= 3 {
            RunTitle::CommunityManager
        } else {
            RunTitle::Rookie
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RunTitle::ForestGuardian => "숲의 수호자",
            RunTitle::CertifiedModerator => "완장 인증",
            RunTitle::CommunityManager => "커뮤니티 관리자",
            RunTitle::Rookie => "초보 매니저",
        }
    }
}

/// Result of a finished (or abandoned) run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub cleared: bool,
    pub score: u64,
    pub stage_id: u8,
    pub viewers: u32,
    pub removed_total: u32,
    pub removed_by_category: RemovalCounts,
    pub max_combo: u32,
    pub title: RunTitle,
    pub title_label: String,
}

impl RunSummary {
    pub fn from_snapshot(snap: &Snapshot) -> Self {
        let score = snap.display_score();
        let cleared = snap.is_cleared();
        let title = RunTitle::for_run(cleared, score, snap.stage.id);
        Self {
            cleared,
            score,
            stage_id: snap.stage.id,
            viewers: snap.viewers,
            removed_total: snap.removed_by_category.total(),
            removed_by_category: snap.removed_by_category,
            max_combo: snap.max_combo,
            title,
            title_label: title.label().to_string(),
        }
    }

    pub fn headline(&self) -> &'static str {
        if self.cleared { "클리어" } else { "방송 종료" }
    }
}
