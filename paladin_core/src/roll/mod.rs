//! Roll engine - Bounded random rolls modulated by an entity's attributes

mod engine;
mod outcome;

pub use engine::RollEngine;
pub use outcome::{classify_attack, AttackOutcome};

use crate::types::Check;

/// Anything a roll can be checked against
pub trait CheckSource {
    /// Current value of the checked attribute or resist
    fn check_value(&self, check: Check) -> i32;

    /// Point limit the check value is scaled against
    fn attribute_point_limit(&self) -> i32;
}
