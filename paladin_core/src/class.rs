//! CharacterClass - The three playable archetypes
//!
//! A class biases the seed-phase point distribution towards its preferred
//! attributes, unlocks its skill stats, and grants a one-time resist bonus.

use crate::entity::StatName;
use crate::types::{Attribute, Resist};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
pub enum CharacterClass {
    Warrior,
    Mage,
    Rogue,
}

impl CharacterClass {
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Attributes favoured during remainder distribution
    pub fn preferred_attributes(&self) -> &'static [Attribute] {
        match self {
            CharacterClass::Warrior => &[Attribute::Strength, Attribute::Attack],
            CharacterClass::Mage => &[Attribute::Focus, Attribute::Wisdom],
            CharacterClass::Rogue => &[Attribute::Defense, Attribute::Focus],
        }
    }

    /// Skill stats unlocked by this class
    pub fn granted_skills(&self) -> &'static [StatName] {
        match self {
            CharacterClass::Warrior => &[StatName::Bash, StatName::Block, StatName::Kick],
            CharacterClass::Mage => &[
                StatName::Alteration,
                StatName::Destruction,
                StatName::Conjuration,
            ],
            CharacterClass::Rogue => &[StatName::Backstab, StatName::Sneak, StatName::Dodge],
        }
    }

    /// Resist bonuses applied once when the class is taken
    pub fn base_resists(&self) -> &'static [(Resist, i32)] {
        match self {
            CharacterClass::Warrior => &[(Resist::Death, 10)],
            CharacterClass::Mage => &[(Resist::Fire, 5), (Resist::Frost, 5)],
            CharacterClass::Rogue => &[(Resist::Detection, 10)],
        }
    }

    pub fn spellbook_enabled(&self) -> bool {
        matches!(self, CharacterClass::Mage)
    }

    pub fn sneak_enabled(&self) -> bool {
        matches!(self, CharacterClass::Rogue)
    }

    /// One-line skill summary for selection menus
    pub fn summary(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => "Warriors can use the Bash, Block, and Kick skills",
            CharacterClass::Mage => "Mage skills include Alteration, Destruction, and Conjuration",
            CharacterClass::Rogue => "Rogues have the Backstab, Sneak, and Dodge skills",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => {
                "Warriors are the typical melee class, equipped with Bash, Block, and Kick \
                 from the start. Bash temporarily stuns enemies, Block prevents some damage, \
                 and Kick provides extra damage while primary attacks recharge. Warriors may \
                 also throw weapons from their inventory, which sometimes breaks the item."
            }
            CharacterClass::Mage => {
                "Mages can use magic from the start of the game and do best dealing damage \
                 from a distance. Alteration picks locks, finds secrets and grants \
                 invisibility; Destruction deals damage from afar; Conjuration provides a \
                 damage shield or other helpful items."
            }
            CharacterClass::Rogue => {
                "Rogues do best approaching enemies from behind with Backstab, which deals \
                 extra damage while undetected. Rogues can sneak from the start and may use \
                 Dodge. They sometimes find poisons that add damage or inflict status \
                 effects when applied to weapons."
            }
        }
    }
}
