//! AttackOutcome - Classification of an attack roll against a goal

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum AttackOutcome {
    Critical,
    Advantage,
    Zero,
    Disadvantage,
}

impl AttackOutcome {
    /// Signed score: critical 2, advantage 1, zero 0, disadvantage -1
    pub fn score(&self) -> i8 {
        match self {
            AttackOutcome::Critical => 2,
            AttackOutcome::Advantage => 1,
            AttackOutcome::Zero => 0,
            AttackOutcome::Disadvantage => -1,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, AttackOutcome::Critical | AttackOutcome::Advantage)
    }
}

/// Classify a roll result against a positive target goal
///
/// `result / goal > critical_ratio` is critical, `result >= goal` advantage,
/// a zero result is zero, anything else disadvantage.
pub fn classify_attack(result: i32, target_goal: i32, critical_ratio: f64) -> Result<AttackOutcome> {
    if target_goal <= 0 {
        return Err(EngineError::InvalidGoal(target_goal));
    }
    let outcome = if result as f64 / target_goal as f64 > critical_ratio {
        AttackOutcome::Critical
    } else if result >= target_goal {
        AttackOutcome::Advantage
    } else if result == 0 {
        AttackOutcome::Zero
    } else {
        AttackOutcome::Disadvantage
    };
    Ok(outcome)
}
