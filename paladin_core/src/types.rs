//! Core enumerations shared by the entity, roll and class models

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Allocatable entity attribute
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
pub enum Attribute {
    Health,
    Attack,
    Defense,
    Focus,
    Strength,
    Wisdom,
    Luck,
}

impl Attribute {
    /// Attributes rolled during the seed phase (everything except luck)
    pub const BASE: [Attribute; 6] = [
        Attribute::Health,
        Attribute::Attack,
        Attribute::Defense,
        Attribute::Focus,
        Attribute::Strength,
        Attribute::Wisdom,
    ];

    /// Value every attribute starts at
    pub const DEFAULT_VALUE: i32 = 1;

    /// Player-facing help text
    pub fn description(&self) -> &'static str {
        match self {
            Attribute::Health => "Contributes to player hit points",
            Attribute::Attack => "Affects damage dealt by the player",
            Attribute::Defense => "Contributes to damage mitigation and dodging",
            Attribute::Focus => "Affects ranged damage, spell casting, and hit likelihood",
            Attribute::Strength => "Contributes to damage and carry capacity",
            Attribute::Wisdom => "Determines spell damage and mana",
            Attribute::Luck => "Increases critical hit potential and save roll baselines",
        }
    }
}

/// Resistance channel
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
pub enum Resist {
    Fire,
    Frost,
    Death,
    Detection,
}

/// Countdown status effect, decremented once per turn
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
pub enum StatusEffect {
    Blind,
    Paralyzed,
    Invincible,
    Fast,
}

/// What a roll is checked against: an attribute or a resist value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    Attribute(Attribute),
    Resist(Resist),
}

impl From<Attribute> for Check {
    fn from(attribute: Attribute) -> Self {
        Check::Attribute(attribute)
    }
}

impl From<Resist> for Check {
    fn from(resist: Resist) -> Self {
        Check::Resist(resist)
    }
}

/// Handle to an entity placed on a map tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Handle to an item lying on a map tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_base_excludes_luck() {
        assert_eq!(Attribute::BASE.len(), 6);
        assert!(!Attribute::BASE.contains(&Attribute::Luck));
        assert_eq!(Attribute::iter().count(), 7);
    }

    #[test]
    fn test_names_are_snake_case() {
        assert_eq!(Attribute::Health.to_string(), "health");
        assert_eq!(Resist::Detection.to_string(), "detection");
        assert_eq!(StatusEffect::Paralyzed.to_string(), "paralyzed");
        assert_eq!(Attribute::from_str("wisdom").unwrap(), Attribute::Wisdom);
        assert!(Resist::from_str("lightning").is_err());
    }

    #[test]
    fn test_check_from() {
        assert_eq!(Check::from(Attribute::Luck), Check::Attribute(Attribute::Luck));
        assert_eq!(Check::from(Resist::Fire), Check::Resist(Resist::Fire));
    }
}
