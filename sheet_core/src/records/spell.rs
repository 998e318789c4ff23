//! Spell reference data

use super::meta::{Entries, Source};
use crate::types::{Ability, Condition, DamageType, SpellComponent};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationKind {
    Timed,
    Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Round,
    Minute,
    Hour,
    Day,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedDuration {
    #[serde(rename = "type")]
    pub unit: DurationUnit,
    pub amount: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellDuration {
    #[serde(rename = "type")]
    pub kind: DurationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<TimedDuration>,
    /// When the spell ends
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concentration: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaShape {
    Point,
    Cone,
    Cube,
    Cylinder,
    Line,
    Sphere,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceKind {
    #[serde(rename = "self")]
    Caster,
    Feet,
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellDistance {
    #[serde(rename = "type")]
    pub kind: DistanceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellRange {
    #[serde(rename = "type")]
    pub shape: AreaShape,
    pub distance: SpellDistance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastingUnit {
    Action,
    Bonus,
    Reaction,
    Minute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastingTime {
    pub number: u32,
    pub unit: CastingUnit,
}

/// A component is either simply required or a costed material
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComponentRequirement {
    Required(bool),
    Material { text: String, cost: u64 },
}

impl ComponentRequirement {
    pub fn is_required(&self) -> bool {
        match self {
            ComponentRequirement::Required(required) => *required,
            ComponentRequirement::Material { .. } => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpellMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ritual: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spell {
    pub name: String,
    /// Description of spell and effects
    #[serde(default)]
    pub entries: Entries,
    /// Spell level where 0 means cantrip
    pub level: u8,
    pub time: Vec<CastingTime>,
    pub range: SpellRange,
    #[serde(default)]
    pub components: BTreeMap<SpellComponent, ComponentRequirement>,
    #[serde(default)]
    pub duration: Vec<SpellDuration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<SpellMeta>,
    pub school: String,
    #[serde(default)]
    pub damage_inflict: Vec<DamageType>,
    #[serde(default)]
    pub condition_inflict: Vec<Condition>,
    /// Saving throws the target has to roll
    #[serde(default)]
    pub saving_throw: Vec<Ability>,
    #[serde(default)]
    pub spell_attack: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
}

impl Spell {
    pub fn is_cantrip(&self) -> bool {
        self.level == 0
    }

    pub fn is_ritual(&self) -> bool {
        self.meta.and_then(|m| m.ritual).unwrap_or(false)
    }

    pub fn requires_concentration(&self) -> bool {
        self.duration
            .iter()
            .any(|d| d.concentration.unwrap_or(false))
    }

    pub fn requires(&self, component: SpellComponent) -> bool {
        self.components
            .get(&component)
            .map(ComponentRequirement::is_required)
            .unwrap_or(false)
    }

    /// Cost in copper of the material component, if it has one
    pub fn material_cost(&self) -> Option<u64> {
        match self.components.get(&SpellComponent::M) {
            Some(ComponentRequirement::Material { cost, .. }) => Some(*cost),
            _ => None,
        }
    }
}
