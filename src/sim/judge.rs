//! Sanction judging
//!
//! Correctness (is the sanction strong enough for the category?) and speed
//! (how quickly did the player react?) are evaluated separately, then combined
//! into one verdict.

use serde::{Deserialize, Serialize};

use super::state::{Category, Sanction};
use crate::consts::{GOOD_WINDOW_MS, PERFECT_WINDOW_MS};

/// Timing grade of an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    Perfect,
    Good,
    Miss,
}

impl Grade {
    pub fn from_latency(latency_ms: f64) -> Self {
        if latency_ms <= PERFECT_WINDOW_MS {
            Grade::Perfect
        } else if latency_ms <= GOOD_WINDOW_MS {
            Grade::Good
        } else {
            Grade::Miss
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::Perfect => "PERFECT",
            Grade::Good => "GOOD",
            Grade::Miss => "MISS",
        }
    }
}

/// Outcome of judging one action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub accepted: bool,
    pub grade: Grade,
    pub over_punished: bool,
}

/// Weakest sanction that fully handles a category
pub fn minimum_sanction(category: Category) -> Sanction {
    match category {
        Category::Ordinary | Category::LongForm | Category::Advice => Sanction::Mute,
        Category::Deflection | Category::Brigade => Sanction::Kick,
        Category::Keyword => Sanction::Ban,
    }
}

/// Under-minimum sanctions that are still accepted (capped below Perfect)
pub fn is_lenient(category: Category, sanction: Sanction) -> bool {
    matches!(
        (category, sanction),
        (Category::Deflection, Sanction::Mute) | (Category::Keyword, Sanction::Kick)
    )
}

/// Judge a sanction applied to a message `latency_ms` after it appeared
pub fn judge(
    is_violation: bool,
    category: Category,
    sanction: Sanction,
    latency_ms: f64,
) -> Verdict {
    if !is_violation {
        return Verdict {
            accepted: false,
            grade: Grade::Miss,
            over_punished: true,
        };
    }

    let required = minimum_sanction(category);
    let lenient = is_lenient(category, sanction);
    let correct = sanction >= required || lenient;
    let over_punished = sanction > required;

    if !correct {
        return Verdict {
            accepted: false,
            grade: Grade::Miss,
            over_punished,
        };
    }

    let mut grade = Grade::from_latency(latency_ms);
    if lenient && grade == Grade::Perfect {
        grade = Grade::Good;
    }

    Verdict {
        accepted: grade != Grade::Miss,
        grade,
        over_punished,
    }
}

/// Player-facing guidance for an action
pub fn tip_for(is_violation: bool, category: Category, used: Sanction) -> String {
    if !is_violation {
        return "정상 채팅입니다 제재하지 말고 흘려보내면 됩니다".to_string();
    }

    let lenient = match (category, used) {
        (Category::Deflection, Sanction::Mute) => Some("물타기형은 기본 강퇴가 최적입니다"),
        (Category::Keyword, Sanction::Kick) => Some("키워드형은 기본 블랙이 최적입니다"),
        _ => None,
    };
    if let Some(best) = lenient {
        return format!("{best} {}도 정답이지만 점수는 낮습니다", used.label());
    }

    let required = minimum_sanction(category);
    if used < required {
        format!("{}은 {} 이상이 필요합니다", category.label(), required.label())
    } else if used > required {
        "과잉 제재입니다 정답은 맞지만 점수가 조금 깎입니다".to_string()
    } else {
        "정확한 제재입니다".to_string()
    }
}
