//! Engine input and its validation

use crate::config::RulesConfig;
use crate::error::{ValidationError, ValidationReason};
use crate::records::{Creature, HitPoints, SavingThrowProficiency, SkillProficiency};
use crate::types::{Ability, RollMode, Skill};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything the stat engine reads about a creature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatureInput {
    /// Raw scores; every ability must be present, finite and whole
    pub ability_scores: BTreeMap<Ability, f64>,
    pub proficiency_bonus: i32,
    /// Missing skills count as not proficient
    #[serde(default)]
    pub skills: BTreeMap<Skill, SkillProficiency>,
    #[serde(default)]
    pub saving_throws: BTreeMap<Ability, SavingThrowProficiency>,
    /// Half proficiency on skills that are not otherwise proficient
    #[serde(default)]
    pub jack_of_all_trades: bool,
    /// Standing advantage or disadvantage on perception checks
    #[serde(default)]
    pub perception_mode: RollMode,
    /// Passed through unchanged
    pub armor_class: i32,
    /// Passed through unchanged
    #[serde(default)]
    pub hit_points: HitPoints,
}

impl CreatureInput {
    /// Input for a creature record; creatures store no proficiency bonus,
    /// so the caller supplies it
    pub fn from_creature(creature: &Creature, proficiency_bonus: i32) -> Self {
        CreatureInput {
            ability_scores: creature.ability_scores.clone(),
            proficiency_bonus,
            skills: creature.skills.clone(),
            saving_throws: creature.saving_throws.clone(),
            jack_of_all_trades: false,
            perception_mode: RollMode::Normal,
            armor_class: creature.armor_class,
            hit_points: creature.hit_points,
        }
    }

    pub fn with_jack_of_all_trades(mut self, enabled: bool) -> Self {
        self.jack_of_all_trades = enabled;
        self
    }

    pub fn with_perception_mode(mut self, mode: RollMode) -> Self {
        self.perception_mode = mode;
        self
    }

    /// Flags for a skill, defaulting to untrained
    pub fn skill(&self, skill: Skill) -> SkillProficiency {
        self.skills.get(&skill).copied().unwrap_or_default()
    }

    pub fn saving_throw(&self, ability: Ability) -> SavingThrowProficiency {
        self.saving_throws.get(&ability).copied().unwrap_or_default()
    }

    /// Check every raw value the engine depends on
    pub fn validate(&self, rules: &RulesConfig) -> Result<AbilityScores, ValidationError> {
        if self.proficiency_bonus < 0 {
            return Err(ValidationError::new(
                "proficiencyBonus",
                ValidationReason::Negative(i64::from(self.proficiency_bonus)),
            ));
        }
        let max_bonus = rules.proficiency.max_bonus;
        if self.proficiency_bonus > max_bonus {
            return Err(ValidationError::out_of_range(
                "proficiencyBonus",
                i64::from(self.proficiency_bonus),
                0,
                i64::from(max_bonus),
            ));
        }
        AbilityScores::from_raw(&self.ability_scores, rules)
    }
}

/// Validated whole-number ability scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    #[serde(rename = "str")]
    pub strength: i32,
    #[serde(rename = "dex")]
    pub dexterity: i32,
    #[serde(rename = "con")]
    pub constitution: i32,
    #[serde(rename = "int")]
    pub intelligence: i32,
    #[serde(rename = "wis")]
    pub wisdom: i32,
    #[serde(rename = "cha")]
    pub charisma: i32,
}

impl AbilityScores {
    pub fn new(str: i32, dex: i32, con: i32, int: i32, wis: i32, cha: i32) -> Self {
        AbilityScores {
            strength: str,
            dexterity: dex,
            constitution: con,
            intelligence: int,
            wisdom: wis,
            charisma: cha,
        }
    }

    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    fn set(&mut self, ability: Ability, score: i32) {
        match ability {
            Ability::Strength => self.strength = score,
            Ability::Dexterity => self.dexterity = score,
            Ability::Constitution => self.constitution = score,
            Ability::Intelligence => self.intelligence = score,
            Ability::Wisdom => self.wisdom = score,
            Ability::Charisma => self.charisma = score,
        }
    }

    /// Validate raw scores in sheet order, failing on the first bad one
    pub fn from_raw(raw: &BTreeMap<Ability, f64>, rules: &RulesConfig) -> Result<Self, ValidationError> {
        let bounds = &rules.ability_scores;
        let mut scores = AbilityScores::new(0, 0, 0, 0, 0, 0);

        for ability in Ability::all() {
            let field = format!("abilityScores.{}", ability.key());
            let score = *raw.get(ability).ok_or_else(|| ValidationError::missing(&field))?;

            if !score.is_finite() {
                return Err(ValidationError::new(field, ValidationReason::NotFinite));
            }
            if score.fract() != 0.0 {
                return Err(ValidationError::new(field, ValidationReason::NotWholeNumber(score)));
            }
            if score < f64::from(bounds.min) || score > f64::from(bounds.max) {
                return Err(ValidationError::out_of_range(
                    field,
                    score as i64,
                    i64::from(bounds.min),
                    i64::from(bounds.max),
                ));
            }

            scores.set(*ability, score as i32);
        }

        Ok(scores)
    }
}
