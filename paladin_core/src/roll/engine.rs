//! RollEngine - Random range roller used for seeding, attacks and resists
//!
//! A roll draws uniformly from `[lower, upper)` where both bounds are scaled
//! by a check modifier:
//!
//! - modifier = `1 + value / point_limit` for a checked attribute or resist,
//!   or a flat 2.0 when nothing is checked
//! - upper = `floor(ub * max(2.0, modifier))`
//! - lower = 1 for initial seeding, else `floor(lb * modifier(luck))`
//!
//! The 2.0 floor keeps the range from collapsing for weak attributes. There is
//! no ceiling: strong attributes widen the range without limit.

use super::outcome::{classify_attack, AttackOutcome};
use super::CheckSource;
use crate::config::RollConstants;
use crate::error::{EngineError, Result};
use crate::types::{Attribute, Check, Resist};
use rand::Rng;

#[derive(Debug, Clone)]
pub struct RollEngine {
    upper_base: i32,
    lower_base: i32,
    constants: RollConstants,
}

impl RollEngine {
    /// Create a roller with the default lower-bound base
    pub fn new(upper_base: i32) -> Self {
        let constants = RollConstants::default();
        RollEngine {
            upper_base,
            lower_base: constants.default_lower_bound,
            constants,
        }
    }

    pub fn with_bounds(upper_base: i32, lower_base: i32) -> Self {
        RollEngine {
            upper_base,
            lower_base,
            constants: RollConstants::default(),
        }
    }

    /// Replace the tuning constants, keeping the configured bases
    pub fn with_constants(mut self, constants: RollConstants) -> Self {
        self.constants = constants;
        self
    }

    pub fn upper_base(&self) -> i32 {
        self.upper_base
    }

    pub fn lower_base(&self) -> i32 {
        self.lower_base
    }

    /// Multiplier derived from the checked value relative to the point limit
    pub fn check_modifier<S: CheckSource + ?Sized>(&self, source: &S, check: Option<Check>) -> f64 {
        let Some(check) = check else {
            return self.constants.unseeded_modifier;
        };
        let limit = source.attribute_point_limit();
        if limit <= 0 {
            tracing::warn!(limit, ?check, "non-positive point limit, using neutral modifier");
            return 1.0;
        }
        1.0 + source.check_value(check) as f64 / limit as f64
    }

    /// Exclusive upper bound for a roll checked against `check`
    pub fn upper_bound<S: CheckSource + ?Sized>(&self, source: &S, check: Option<Check>) -> i32 {
        let modifier = self
            .check_modifier(source, check)
            .max(self.constants.min_upper_modifier);
        (self.upper_base as f64 * modifier).floor() as i32
    }

    /// Inclusive lower bound; luck raises it outside of initial seeding
    pub fn lower_bound<S: CheckSource + ?Sized>(&self, source: &S, initial_seed: bool) -> i32 {
        if initial_seed {
            return 1;
        }
        let modifier = self.check_modifier(source, Some(Check::Attribute(Attribute::Luck)));
        (self.lower_base as f64 * modifier).floor() as i32
    }

    /// Draw uniformly from `[lower_bound, upper_bound)`
    pub fn roll<S, R>(&self, source: &S, check: Option<Check>, initial_seed: bool, rng: &mut R) -> Result<i32>
    where
        S: CheckSource + ?Sized,
        R: Rng,
    {
        let upper = self.upper_bound(source, check);
        let lower = self.lower_bound(source, initial_seed);
        if lower >= upper {
            return Err(EngineError::InvalidRange { lower, upper });
        }
        Ok(rng.gen_range(lower..upper))
    }

    /// Roll attack and classify it against the target's goal
    pub fn attack_roll<S, R>(&self, source: &S, target_goal: i32, rng: &mut R) -> Result<AttackOutcome>
    where
        S: CheckSource + ?Sized,
        R: Rng,
    {
        if target_goal <= 0 {
            return Err(EngineError::InvalidGoal(target_goal));
        }
        let result = self.roll(source, Some(Attribute::Attack.into()), false, rng)?;
        let outcome = classify_attack(result, target_goal, self.constants.critical_ratio)?;
        tracing::debug!(result, target_goal, %outcome, "attack roll");
        Ok(outcome)
    }

    /// Distance of a resist roll from its expected baseline
    ///
    /// Computes `|roll / upper_bound - modifier|`. Smaller deviations are
    /// better resist outcomes; pass/fail thresholds belong to the caller.
    pub fn resist_roll<S, R>(&self, source: &S, resist: Resist, rng: &mut R) -> Result<f64>
    where
        S: CheckSource + ?Sized,
        R: Rng,
    {
        let check = Some(Check::Resist(resist));
        let modifier = self.check_modifier(source, check);
        let max_value = self.upper_bound(source, check);
        let result = self.roll(source, check, false, rng)?;
        Ok((result as f64 / max_value as f64 - modifier).abs())
    }
}
