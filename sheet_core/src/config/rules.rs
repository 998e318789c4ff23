//! Tunable rule constants for the stat engine

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Rule constants the engine reads instead of hard-coding
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub ability_scores: AbilityScoreRules,
    #[serde(default)]
    pub passive: PassiveRules,
    #[serde(default)]
    pub spellcasting: SpellcastingRules,
    #[serde(default)]
    pub proficiency: ProficiencyRules,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityScoreRules {
    /// Lowest accepted ability score
    #[serde(default = "default_score_min")]
    pub min: i32,
    /// Highest accepted ability score
    #[serde(default = "default_score_max")]
    pub max: i32,
}

impl Default for AbilityScoreRules {
    fn default() -> Self {
        AbilityScoreRules {
            min: default_score_min(),
            max: default_score_max(),
        }
    }
}

fn default_score_min() -> i32 {
    1
}
fn default_score_max() -> i32 {
    30
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassiveRules {
    /// Passive score = base + check modifier
    #[serde(default = "default_passive_base")]
    pub base: i32,
    /// Added with advantage, subtracted with disadvantage
    #[serde(default = "default_advantage_adjustment")]
    pub advantage_adjustment: i32,
}

impl Default for PassiveRules {
    fn default() -> Self {
        PassiveRules {
            base: default_passive_base(),
            advantage_adjustment: default_advantage_adjustment(),
        }
    }
}

fn default_passive_base() -> i32 {
    10
}
fn default_advantage_adjustment() -> i32 {
    5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellcastingRules {
    /// Save DC = base + proficiency bonus + casting modifier
    #[serde(default = "default_save_dc_base")]
    pub save_dc_base: i32,
}

impl Default for SpellcastingRules {
    fn default() -> Self {
        SpellcastingRules {
            save_dc_base: default_save_dc_base(),
        }
    }
}

fn default_save_dc_base() -> i32 {
    8
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProficiencyRules {
    /// Bonus at level 1
    #[serde(default = "default_proficiency_base")]
    pub base: i32,
    /// Levels per +1 step
    #[serde(default = "default_levels_per_step")]
    pub levels_per_step: u32,
    /// Highest total character level
    #[serde(default = "default_max_level")]
    pub max_level: u32,
    /// Highest proficiency bonus the engine accepts
    #[serde(default = "default_max_bonus")]
    pub max_bonus: i32,
}

impl Default for ProficiencyRules {
    fn default() -> Self {
        ProficiencyRules {
            base: default_proficiency_base(),
            levels_per_step: default_levels_per_step(),
            max_level: default_max_level(),
            max_bonus: default_max_bonus(),
        }
    }
}

fn default_proficiency_base() -> i32 {
    2
}
fn default_levels_per_step() -> u32 {
    4
}
fn default_max_level() -> u32 {
    20
}
fn default_max_bonus() -> i32 {
    10
}

impl ProficiencyRules {
    /// Proficiency bonus expected at a total character level
    pub fn bonus_for_level(&self, level: u32) -> i32 {
        let steps = level.saturating_sub(1) / self.levels_per_step.max(1);
        self.base.saturating_add(i32::try_from(steps).unwrap_or(i32::MAX))
    }
}

impl RulesConfig {
    /// Reject tables the engine cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ability_scores.min > self.ability_scores.max {
            return Err(ConfigError::ValidationError(format!(
                "ability_scores.min ({}) is greater than ability_scores.max ({})",
                self.ability_scores.min, self.ability_scores.max
            )));
        }
        if self.proficiency.levels_per_step == 0 {
            return Err(ConfigError::ValidationError(
                "proficiency.levels_per_step must be at least 1".to_string(),
            ));
        }
        if self.proficiency.max_level == 0 {
            return Err(ConfigError::ValidationError(
                "proficiency.max_level must be at least 1".to_string(),
            ));
        }
        let top_bonus = self.proficiency.bonus_for_level(self.proficiency.max_level);
        if self.proficiency.max_bonus < top_bonus.max(0) {
            return Err(ConfigError::ValidationError(format!(
                "proficiency.max_bonus ({}) is below the bonus at max_level ({})",
                self.proficiency.max_bonus, top_bonus
            )));
        }
        Ok(())
    }
}

/// Load rules from a TOML file
pub fn load_rules(path: &Path) -> Result<RulesConfig, ConfigError> {
    let rules: RulesConfig = super::load_toml(path)?;
    rules.validate()?;
    tracing::debug!("Loaded rules from {}", path.display());
    Ok(rules)
}

/// Load rules from a TOML string
pub fn parse_rules(content: &str) -> Result<RulesConfig, ConfigError> {
    let rules: RulesConfig = super::parse_toml(content)?;
    rules.validate()?;
    Ok(rules)
}

/// Get the bundled rules table
pub fn default_rules() -> RulesConfig {
    let toml = include_str!("../../config/rules.toml");
    parse_rules(toml).unwrap_or_else(|err| {
        tracing::warn!("Bundled rules failed to load, using built-in defaults: {}", err);
        RulesConfig::default()
    })
}
