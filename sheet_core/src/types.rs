//! Closed enumerations shared by records and the stat engine
//!
//! Every enum serializes to the exact literal the stored documents use
//! (`"str"`, `"animal handling"`, `"lawful good"`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;

/// The six ability scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Ability {
    #[serde(rename = "str")]
    Strength,
    #[serde(rename = "dex")]
    Dexterity,
    #[serde(rename = "con")]
    Constitution,
    #[serde(rename = "int")]
    Intelligence,
    #[serde(rename = "wis")]
    Wisdom,
    #[serde(rename = "cha")]
    Charisma,
}

impl Ability {
    /// Get all abilities in sheet order
    pub fn all() -> &'static [Ability] {
        &[
            Ability::Strength,
            Ability::Dexterity,
            Ability::Constitution,
            Ability::Intelligence,
            Ability::Wisdom,
            Ability::Charisma,
        ]
    }

    /// Key used for this ability in stored documents
    pub fn key(&self) -> &'static str {
        match self {
            Ability::Strength => "str",
            Ability::Dexterity => "dex",
            Ability::Constitution => "con",
            Ability::Intelligence => "int",
            Ability::Wisdom => "wis",
            Ability::Charisma => "cha",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The eighteen skills, each governed by one ability
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    Acrobatics,
    #[serde(rename = "animal handling")]
    AnimalHandling,
    Arcana,
    Athletics,
    Deception,
    History,
    Insight,
    Intimidation,
    Investigation,
    Medicine,
    Nature,
    Perception,
    Performance,
    Persuasion,
    Religion,
    // Older documents capitalize "Hand"
    #[serde(rename = "sleight of hand", alias = "sleight of Hand")]
    SleightOfHand,
    Stealth,
    Survival,
}

impl Skill {
    /// Get all skills in sheet order
    pub fn all() -> &'static [Skill] {
        &[
            Skill::Acrobatics,
            Skill::AnimalHandling,
            Skill::Arcana,
            Skill::Athletics,
            Skill::Deception,
            Skill::History,
            Skill::Insight,
            Skill::Intimidation,
            Skill::Investigation,
            Skill::Medicine,
            Skill::Nature,
            Skill::Perception,
            Skill::Performance,
            Skill::Persuasion,
            Skill::Religion,
            Skill::SleightOfHand,
            Skill::Stealth,
            Skill::Survival,
        ]
    }

    /// The ability whose modifier the skill adds
    pub fn ability(&self) -> Ability {
        match self {
            Skill::Athletics => Ability::Strength,
            Skill::Acrobatics | Skill::SleightOfHand | Skill::Stealth => Ability::Dexterity,
            Skill::Arcana
            | Skill::History
            | Skill::Investigation
            | Skill::Nature
            | Skill::Religion => Ability::Intelligence,
            Skill::AnimalHandling
            | Skill::Insight
            | Skill::Medicine
            | Skill::Perception
            | Skill::Survival => Ability::Wisdom,
            Skill::Deception | Skill::Intimidation | Skill::Performance | Skill::Persuasion => {
                Ability::Charisma
            }
        }
    }

    /// Key used for this skill in stored documents
    pub fn key(&self) -> &'static str {
        match self {
            Skill::Acrobatics => "acrobatics",
            Skill::AnimalHandling => "animal handling",
            Skill::Arcana => "arcana",
            Skill::Athletics => "athletics",
            Skill::Deception => "deception",
            Skill::History => "history",
            Skill::Insight => "insight",
            Skill::Intimidation => "intimidation",
            Skill::Investigation => "investigation",
            Skill::Medicine => "medicine",
            Skill::Nature => "nature",
            Skill::Perception => "perception",
            Skill::Performance => "performance",
            Skill::Persuasion => "persuasion",
            Skill::Religion => "religion",
            Skill::SleightOfHand => "sleight of hand",
            Skill::Stealth => "stealth",
            Skill::Survival => "survival",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Creature size category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Tiny,
    Small,
    #[default]
    Medium,
    Large,
    Huge,
    Gargantuan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[serde(rename = "lawful good")]
    LawfulGood,
    #[serde(rename = "neutral good")]
    NeutralGood,
    #[serde(rename = "chaotic good")]
    ChaoticGood,
    #[serde(rename = "lawful neutral")]
    LawfulNeutral,
    #[serde(rename = "true neutral")]
    TrueNeutral,
    #[serde(rename = "chaotic neutral")]
    ChaoticNeutral,
    #[serde(rename = "lawful evil")]
    LawfulEvil,
    #[serde(rename = "neutral evil")]
    NeutralEvil,
    #[serde(rename = "chaotic evil")]
    ChaoticEvil,
}

/// Damage types for weapons, spells, resistances and immunities
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    Piercing,
    Slashing,
    Bludgeoning,
    Acid,
    Cold,
    Fire,
    Force,
    Lightning,
    Necrotic,
    // Accept the misspelling found in early documents
    #[serde(alias = "posion")]
    Poison,
    Psychic,
    Radiant,
    Thunder,
}

impl DamageType {
    /// Whether this is one of the weapon damage types
    pub fn is_physical(&self) -> bool {
        matches!(
            self,
            DamageType::Piercing | DamageType::Slashing | DamageType::Bludgeoning
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Blinded,
    Charmed,
    Deafened,
    Exhaustion,
    Frightened,
    Grappled,
    Incapacitated,
    Invisible,
    Paralyzed,
    Petrified,
    Poisoned,
    Prone,
    Restrained,
    Stunned,
    Unconscious,
}

/// Special senses measured in feet
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sense {
    Blindsight,
    Darkvision,
    Tremorsense,
    Truesight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    None,
    Common,
    Uncommon,
    Rare,
    #[serde(rename = "very rare")]
    VeryRare,
    Legendary,
    Artifact,
    Unknown,
    Varies,
}

/// Item type codes as used by the reference data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    /// Melee weapon
    #[serde(rename = "M")]
    Melee,
    /// Ranged weapon
    #[serde(rename = "R")]
    Ranged,
    /// Ammunition
    #[serde(rename = "A")]
    Ammunition,
    #[serde(rename = "LA")]
    LightArmor,
    #[serde(rename = "MA")]
    MediumArmor,
    #[serde(rename = "HA")]
    HeavyArmor,
    #[serde(rename = "S")]
    Shield,
    /// Adventuring gear
    #[serde(rename = "G")]
    Gear,
    /// Generic variant
    #[serde(rename = "GV")]
    GenericVariant,
    #[serde(rename = "P")]
    Potion,
    #[serde(rename = "RG")]
    Ring,
    #[serde(rename = "RD")]
    Rod,
    #[serde(rename = "WD")]
    Wand,
    #[serde(rename = "SC")]
    Scroll,
    #[serde(rename = "AT")]
    ArtisanTool,
    #[serde(rename = "T")]
    Tool,
    #[serde(rename = "INS")]
    Instrument,
    /// Vehicle
    #[serde(rename = "SHP")]
    Ship,
    #[serde(rename = "MNT")]
    Mount,
    /// Tack and harness
    #[serde(rename = "TAH")]
    TackAndHarness,
}

impl ItemType {
    pub fn is_weapon(&self) -> bool {
        matches!(self, ItemType::Melee | ItemType::Ranged)
    }

    pub fn is_armor(&self) -> bool {
        matches!(
            self,
            ItemType::LightArmor | ItemType::MediumArmor | ItemType::HeavyArmor | ItemType::Shield
        )
    }
}

/// Verbal, somatic and material spell components
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpellComponent {
    V,
    S,
    M,
}

/// How a check is rolled when its passive value is taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RollMode {
    #[default]
    Normal,
    Advantage,
    Disadvantage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_skill_has_a_governing_ability() {
        assert_eq!(Skill::all().len(), 18);
        assert_eq!(Skill::Perception.ability(), Ability::Wisdom);
        assert_eq!(Skill::Athletics.ability(), Ability::Strength);
        assert_eq!(Skill::SleightOfHand.ability(), Ability::Dexterity);
        assert_eq!(Skill::Persuasion.ability(), Ability::Charisma);
        assert_eq!(Skill::Arcana.ability(), Ability::Intelligence);
    }

    #[test]
    fn test_serialized_names_match_stored_literals() {
        assert_eq!(serde_json::to_string(&Ability::Wisdom).unwrap(), "\"wis\"");
        assert_eq!(
            serde_json::to_string(&Skill::AnimalHandling).unwrap(),
            "\"animal handling\""
        );
        assert_eq!(
            serde_json::to_string(&Alignment::ChaoticNeutral).unwrap(),
            "\"chaotic neutral\""
        );
        assert_eq!(serde_json::to_string(&Rarity::VeryRare).unwrap(), "\"very rare\"");
        assert_eq!(serde_json::to_string(&ItemType::HeavyArmor).unwrap(), "\"HA\"");
    }

    #[test]
    fn test_keys_agree_with_serde() {
        for skill in Skill::all() {
            let json = serde_json::to_string(skill).unwrap();
            assert_eq!(json, format!("\"{}\"", skill.key()));
        }
        for ability in Ability::all() {
            let json = serde_json::to_string(ability).unwrap();
            assert_eq!(json, format!("\"{}\"", ability.key()));
        }
    }

    #[test]
    fn test_legacy_spellings_are_accepted() {
        let skill: Skill = serde_json::from_str("\"sleight of Hand\"").unwrap();
        assert_eq!(skill, Skill::SleightOfHand);
        let damage: DamageType = serde_json::from_str("\"posion\"").unwrap();
        assert_eq!(damage, DamageType::Poison);
    }

    #[test]
    fn test_unknown_condition_is_rejected() {
        assert!(serde_json::from_str::<Condition>("\"sleepy\"").is_err());
    }
}
