//! Derived stat formula table
//!
//! Every derived stat sums a fixed list of attributes (repeats count twice).
//! Resource stats scale the sum against the attribute point limit:
//! `floor(sum / limit * 10 + sum)`. Skill stats add the entity level:
//! `level + sum`.

use crate::types::Attribute;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Name of a derived stat
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StatName {
    Hitpoints,
    Magic,
    Evade,
    Carry,
    Dodge,
    Sneak,
    Kick,
    Bash,
    Alteration,
    Destruction,
    Conjuration,
    Block,
    Backstab,
    MaxDamage,
}

/// How a stat turns its attribute sum into a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulaMode {
    Resource,
    SkillPower,
}

/// Contributing attributes and computation mode for one stat
#[derive(Debug, Clone, Copy)]
pub struct StatFormula {
    pub attributes: &'static [Attribute],
    pub mode: FormulaMode,
}

impl StatFormula {
    const fn resource(attributes: &'static [Attribute]) -> Self {
        StatFormula {
            attributes,
            mode: FormulaMode::Resource,
        }
    }

    const fn skill(attributes: &'static [Attribute]) -> Self {
        StatFormula {
            attributes,
            mode: FormulaMode::SkillPower,
        }
    }

    /// Apply the formula to an attribute sum
    ///
    /// A non-positive point limit is a precondition violation; the resource
    /// scaling term is dropped rather than dividing by it.
    pub fn evaluate(&self, raw_sum: i32, level: u32, attribute_point_limit: i32) -> i32 {
        match self.mode {
            FormulaMode::SkillPower => level as i32 + raw_sum,
            FormulaMode::Resource => {
                if attribute_point_limit <= 0 {
                    tracing::warn!(attribute_point_limit, "non-positive point limit in stat formula");
                    return raw_sum;
                }
                let sum = raw_sum as f64;
                ((sum / attribute_point_limit as f64) * 10.0 + sum).floor() as i32
            }
        }
    }
}

impl StatName {
    /// Stats every entity has regardless of class
    pub const CORE: [StatName; 5] = [
        StatName::Carry,
        StatName::Hitpoints,
        StatName::Magic,
        StatName::Evade,
        StatName::MaxDamage,
    ];

    /// Value reported for a stat the entity has not unlocked
    pub const LOCKED_VALUE: i32 = 1;

    pub fn formula(&self) -> StatFormula {
        use Attribute::*;
        match self {
            StatName::Hitpoints => StatFormula::resource(&[Health, Health, Defense]),
            StatName::Magic => StatFormula::resource(&[Wisdom, Wisdom, Focus]),
            StatName::Evade => StatFormula::resource(&[Defense, Focus]),
            StatName::Carry => StatFormula::resource(&[Strength, Strength, Health]),
            StatName::Dodge => StatFormula::skill(&[Defense]),
            StatName::Sneak => StatFormula::skill(&[Focus]),
            StatName::Kick => StatFormula::skill(&[Strength]),
            StatName::Bash => StatFormula::skill(&[Strength]),
            StatName::Alteration => StatFormula::skill(&[Wisdom]),
            StatName::Destruction => StatFormula::skill(&[Wisdom]),
            StatName::Conjuration => StatFormula::skill(&[Wisdom]),
            StatName::Block => StatFormula::skill(&[Strength]),
            StatName::Backstab => StatFormula::skill(&[Focus]),
            StatName::MaxDamage => StatFormula::skill(&[Strength, Attack, Luck]),
        }
    }

    pub fn is_skill_stat(&self) -> bool {
        self.formula().mode == FormulaMode::SkillPower
    }
}
