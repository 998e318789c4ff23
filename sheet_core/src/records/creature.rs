//! Creatures and player characters

use super::item::{Equipment, Feat, Weapon};
use super::meta::{Entries, RecordMeta, Source};
use super::spell::Spell;
use crate::types::{Ability, Alignment, Condition, DamageType, Sense, Size, Skill};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Movement speeds in feet per round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Speed {
    /// The basic speed shown on the character sheet
    pub walking: u32,
    #[serde(default)]
    pub climbing: u32,
    #[serde(default)]
    pub swimming: u32,
    #[serde(default)]
    pub flying: u32,
    #[serde(default)]
    pub burrowing: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HitPoints {
    pub current: i32,
    #[serde(default)]
    pub temporary: i32,
    pub max: i32,
}

impl HitPoints {
    /// Current plus temporary hit points
    pub fn effective(&self) -> i32 {
        self.current.saturating_add(self.temporary.max(0))
    }
}

/// Proficiency flags for one skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillProficiency {
    #[serde(default)]
    pub is_proficient: bool,
    /// Expertise implies proficiency
    #[serde(default)]
    pub is_expertise: bool,
    /// Optional miscellaneous modifier to add/subtract
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub misc_modifier: Option<i32>,
}

impl SkillProficiency {
    pub fn proficient() -> Self {
        SkillProficiency {
            is_proficient: true,
            ..Default::default()
        }
    }

    pub fn expertise() -> Self {
        SkillProficiency {
            is_proficient: true,
            is_expertise: true,
            misc_modifier: None,
        }
    }

    pub fn with_misc(mut self, misc: i32) -> Self {
        self.misc_modifier = Some(misc);
        self
    }
}

/// Proficiency flag for one saving throw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingThrowProficiency {
    #[serde(default)]
    pub is_proficient: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub misc_modifier: Option<i32>,
}

impl SavingThrowProficiency {
    pub fn proficient() -> Self {
        SavingThrowProficiency {
            is_proficient: true,
            misc_modifier: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creature {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    pub name: String,
    #[serde(default)]
    pub size: Size,
    #[serde(default)]
    pub speed: Speed,
    /// Current initiative roll, only set during an encounter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initiative: Option<i32>,
    /// Raw scores, checked by the stat engine before use
    pub ability_scores: BTreeMap<Ability, f64>,
    pub hit_points: HitPoints,
    pub armor_class: i32,
    /// Last displayed passive perception; the stat engine recomputes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passive_perception: Option<i32>,
    /// Missing skills count as not proficient
    #[serde(default)]
    pub skills: BTreeMap<Skill, SkillProficiency>,
    #[serde(default)]
    pub saving_throws: BTreeMap<Ability, SavingThrowProficiency>,
    #[serde(default)]
    pub languages: Vec<String>,
    /// Special senses and their ranges in feet
    #[serde(default)]
    pub senses: BTreeMap<Sense, u32>,
    #[serde(default)]
    pub conditions: BTreeSet<Condition>,
    #[serde(default)]
    pub condition_immunities: BTreeSet<Condition>,
    #[serde(default)]
    pub damage_immunities: BTreeSet<DamageType>,
    #[serde(default)]
    pub damage_resistances: BTreeSet<DamageType>,
    #[serde(default)]
    pub damage_vulnerabilities: BTreeSet<DamageType>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Creature {
    /// A creature with every score at 10 and no proficiencies
    pub fn new(name: impl Into<String>) -> Self {
        Creature {
            meta: RecordMeta::default(),
            source: None,
            name: name.into(),
            size: Size::Medium,
            speed: Speed {
                walking: 30,
                ..Default::default()
            },
            initiative: None,
            ability_scores: Ability::all().iter().map(|a| (*a, 10.0)).collect(),
            hit_points: HitPoints {
                current: 1,
                temporary: 0,
                max: 1,
            },
            armor_class: 10,
            passive_perception: None,
            skills: BTreeMap::new(),
            saving_throws: BTreeMap::new(),
            languages: Vec::new(),
            senses: BTreeMap::new(),
            conditions: BTreeSet::new(),
            condition_immunities: BTreeSet::new(),
            damage_immunities: BTreeSet::new(),
            damage_resistances: BTreeSet::new(),
            damage_vulnerabilities: BTreeSet::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_score(mut self, ability: Ability, score: i32) -> Self {
        self.ability_scores.insert(ability, f64::from(score));
        self
    }

    pub fn has_condition(&self, condition: Condition) -> bool {
        self.conditions.contains(&condition)
    }

    /// Range of a special sense, if the creature has it
    pub fn sense_range(&self, sense: Sense) -> Option<u32> {
        self.senses.get(&sense).copied().filter(|range| *range > 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeathSaves {
    pub successes: u8,
    pub failures: u8,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Physical {
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub eyes: String,
    #[serde(default)]
    pub hair: String,
    #[serde(default)]
    pub skin: String,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Personality {
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub ideals: Vec<String>,
    #[serde(default)]
    pub bonds: Vec<String>,
    #[serde(default)]
    pub flaws: Vec<String>,
    #[serde(default)]
    pub backstory: String,
}

/// Coins carried by a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Treasure {
    #[serde(default)]
    pub platinum: u64,
    #[serde(default)]
    pub gold: u64,
    #[serde(default)]
    pub silver: u64,
    #[serde(default)]
    pub copper: u64,
}

impl Treasure {
    /// Total value in copper pieces
    pub fn value_in_copper(&self) -> u64 {
        self.platinum
            .saturating_mul(1000)
            .saturating_add(self.gold.saturating_mul(100))
            .saturating_add(self.silver.saturating_mul(10))
            .saturating_add(self.copper)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RaceSpeed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub walk: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fly: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Race {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<RaceSpeed>,
    #[serde(default)]
    pub entries: Entries,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
}

impl Race {
    pub fn new(name: impl Into<String>) -> Self {
        Race {
            name: name.into(),
            subtype: None,
            size: None,
            speed: None,
            entries: Vec::new(),
            source: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassFeature {
    pub name: String,
    pub level: u32,
    #[serde(default)]
    pub entries: Entries,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
}

/// Hit die sizes a class can use
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HitDie {
    D6,
    D8,
    D10,
    D12,
}

impl HitDie {
    pub fn sides(&self) -> u8 {
        match self {
            HitDie::D6 => 6,
            HitDie::D8 => 8,
            HitDie::D10 => 10,
            HitDie::D12 => 12,
        }
    }

    /// Hit die of a core class by name, d8 for anything unrecognized
    pub fn for_class_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "barbarian" => HitDie::D12,
            "fighter" | "paladin" | "ranger" => HitDie::D10,
            "sorcerer" | "wizard" => HitDie::D6,
            _ => HitDie::D8,
        }
    }
}

impl TryFrom<u8> for HitDie {
    type Error = String;

    fn try_from(sides: u8) -> Result<Self, Self::Error> {
        match sides {
            6 => Ok(HitDie::D6),
            8 => Ok(HitDie::D8),
            10 => Ok(HitDie::D10),
            12 => Ok(HitDie::D12),
            other => Err(format!("hit dice must have 6, 8, 10 or 12 sides, got {other}")),
        }
    }
}

impl From<HitDie> for u8 {
    fn from(die: HitDie) -> u8 {
        die.sides()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitDice {
    pub sides: HitDie,
    /// Remaining dice, out of the class level
    pub current: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spellcasting_ability: Option<Ability>,
    pub level: u32,
    pub hit_dice: HitDice,
    #[serde(default)]
    pub features: Vec<ClassFeature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
}

impl Class {
    pub fn new(name: impl Into<String>, level: u32, hit_die: HitDie) -> Self {
        Class {
            name: name.into(),
            spellcasting_ability: None,
            level,
            hit_dice: HitDice {
                sides: hit_die,
                current: level,
            },
            features: Vec::new(),
            source: None,
        }
    }

    pub fn with_spellcasting(mut self, ability: Ability) -> Self {
        self.spellcasting_ability = Some(ability);
        self
    }

    /// Features unlocked at or below the current level
    pub fn unlocked_features(&self) -> impl Iterator<Item = &ClassFeature> {
        self.features.iter().filter(move |f| f.level <= self.level)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    #[serde(flatten)]
    pub creature: Creature,
    /// A player has at most one active character per campaign
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default)]
    pub xp: u64,
    pub race: Race,
    pub classes: Vec<Class>,
    pub alignment: Alignment,
    pub proficiency_bonus: i32,
    #[serde(default)]
    pub has_inspiration: bool,
    /// Adds half the proficiency bonus to non-proficient skills
    #[serde(default)]
    pub is_jack_of_all_trades: bool,
    #[serde(default)]
    pub death_saves: DeathSaves,
    #[serde(default)]
    pub physical: Physical,
    #[serde(default)]
    pub personality: Personality,
    #[serde(default)]
    pub feats: Vec<Feat>,
    #[serde(default)]
    pub weapon_proficiencies: Vec<String>,
    #[serde(default)]
    pub armor_proficiencies: Vec<String>,
    #[serde(default)]
    pub tool_proficiencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spells: Option<Vec<Spell>>,
    #[serde(default)]
    pub weapons: Vec<Weapon>,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    #[serde(default)]
    pub treasure: Treasure,
}

impl Character {
    pub fn new(creature: Creature, race: Race, alignment: Alignment) -> Self {
        Character {
            creature,
            is_active: false,
            nickname: None,
            xp: 0,
            race,
            classes: Vec::new(),
            alignment,
            proficiency_bonus: 2,
            has_inspiration: false,
            is_jack_of_all_trades: false,
            death_saves: DeathSaves::default(),
            physical: Physical::default(),
            personality: Personality::default(),
            feats: Vec::new(),
            weapon_proficiencies: Vec::new(),
            armor_proficiencies: Vec::new(),
            tool_proficiencies: Vec::new(),
            spells: None,
            weapons: Vec::new(),
            equipment: Vec::new(),
            treasure: Treasure::default(),
        }
    }

    pub fn with_class(mut self, class: Class) -> Self {
        self.classes.push(class);
        self
    }

    /// Name shown on the sheet, preferring the nickname
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.creature.name)
    }

    /// Whether a weapon proficiency covers this category or weapon name
    pub fn is_proficient_with(&self, weapon: &Weapon) -> bool {
        self.weapon_proficiencies.iter().any(|p| {
            p.eq_ignore_ascii_case(&weapon.weapon_category) || p.eq_ignore_ascii_case(&weapon.item.name)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_treasure_value() {
        let treasure = Treasure {
            platinum: 1,
            gold: 12,
            silver: 3,
            copper: 7,
        };
        assert_eq!(treasure.value_in_copper(), 1000 + 1200 + 30 + 7);
    }

    #[test]
    fn test_treasure_value_saturates() {
        let treasure: Treasure =
            serde_json::from_str(r#"{"platinum":18446744073709551615,"gold":1}"#).unwrap();
        assert_eq!(treasure.value_in_copper(), u64::MAX);
    }

    #[test]
    fn test_effective_hit_points_saturate() {
        let hp = HitPoints {
            current: i32::MAX,
            temporary: 1,
            max: i32::MAX,
        };
        assert_eq!(hp.effective(), i32::MAX);
    }

    #[test]
    fn test_hit_die_serializes_as_number() {
        let dice = HitDice {
            sides: HitDie::D10,
            current: 3,
        };
        assert_eq!(
            serde_json::to_string(&dice).unwrap(),
            r#"{"sides":10,"current":3}"#
        );
        assert!(serde_json::from_str::<HitDice>(r#"{"sides":7,"current":1}"#).is_err());
    }

    #[test]
    fn test_effective_hit_points() {
        let hp = HitPoints {
            current: 12,
            temporary: 5,
            max: 20,
        };
        assert_eq!(hp.effective(), 17);
    }

    #[test]
    fn test_unlocked_features() {
        let mut class = Class::new("Bard", 2, HitDie::D8);
        for (name, level) in [("Bardic Inspiration", 1), ("Jack of All Trades", 2), ("Expertise", 3)] {
            class.features.push(ClassFeature {
                name: name.to_string(),
                level,
                entries: Vec::new(),
                source: None,
            });
        }
        let names: Vec<_> = class.unlocked_features().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Bardic Inspiration", "Jack of All Trades"]);
    }

    #[test]
    fn test_sense_range_ignores_zero() {
        let mut creature = Creature::new("Goblin");
        creature.senses.insert(Sense::Darkvision, 60);
        creature.senses.insert(Sense::Truesight, 0);
        assert_eq!(creature.sense_range(Sense::Darkvision), Some(60));
        assert_eq!(creature.sense_range(Sense::Truesight), None);
        assert_eq!(creature.sense_range(Sense::Blindsight), None);
    }
}
