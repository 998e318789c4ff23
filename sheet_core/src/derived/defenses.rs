//! Damage immunity, resistance and vulnerability
//!
//! Immunity wins outright. Resistance halves (rounded down) and
//! vulnerability doubles; a creature with both takes normal damage.

use crate::records::Creature;
use crate::types::{Condition, DamageType};
use serde::{Deserialize, Serialize};

/// How a creature responds to one damage type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageResponse {
    Normal,
    Resistant,
    Vulnerable,
    Immune,
}

impl DamageResponse {
    pub fn for_creature(creature: &Creature, damage_type: DamageType) -> Self {
        if creature.damage_immunities.contains(&damage_type) {
            return DamageResponse::Immune;
        }
        let resistant = creature.damage_resistances.contains(&damage_type);
        let vulnerable = creature.damage_vulnerabilities.contains(&damage_type);
        match (resistant, vulnerable) {
            (true, false) => DamageResponse::Resistant,
            (false, true) => DamageResponse::Vulnerable,
            _ => DamageResponse::Normal,
        }
    }

    /// Damage actually taken from `amount` incoming
    pub fn apply(&self, amount: u32) -> u32 {
        match self {
            DamageResponse::Normal => amount,
            DamageResponse::Resistant => amount / 2,
            DamageResponse::Vulnerable => amount.saturating_mul(2),
            DamageResponse::Immune => 0,
        }
    }
}

impl Creature {
    pub fn damage_response(&self, damage_type: DamageType) -> DamageResponse {
        DamageResponse::for_creature(self, damage_type)
    }

    /// Whether a condition can be applied to this creature
    pub fn can_be_afflicted_by(&self, condition: Condition) -> bool {
        !self.condition_immunities.contains(&condition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skeleton() -> Creature {
        let mut creature = Creature::new("Skeleton");
        creature.damage_immunities.insert(DamageType::Poison);
        creature.damage_vulnerabilities.insert(DamageType::Bludgeoning);
        creature.damage_resistances.insert(DamageType::Cold);
        creature.damage_resistances.insert(DamageType::Fire);
        creature.damage_vulnerabilities.insert(DamageType::Fire);
        creature.condition_immunities.insert(Condition::Poisoned);
        creature
    }

    #[test]
    fn test_responses() {
        let creature = skeleton();
        assert_eq!(creature.damage_response(DamageType::Poison), DamageResponse::Immune);
        assert_eq!(
            creature.damage_response(DamageType::Bludgeoning),
            DamageResponse::Vulnerable
        );
        assert_eq!(creature.damage_response(DamageType::Cold), DamageResponse::Resistant);
        // Resistance and vulnerability cancel
        assert_eq!(creature.damage_response(DamageType::Fire), DamageResponse::Normal);
        assert_eq!(creature.damage_response(DamageType::Radiant), DamageResponse::Normal);
    }

    #[test]
    fn test_apply() {
        assert_eq!(DamageResponse::Resistant.apply(7), 3);
        assert_eq!(DamageResponse::Vulnerable.apply(7), 14);
        assert_eq!(DamageResponse::Immune.apply(7), 0);
        assert_eq!(DamageResponse::Normal.apply(7), 7);
    }

    #[test]
    fn test_condition_immunity() {
        let creature = skeleton();
        assert!(!creature.can_be_afflicted_by(Condition::Poisoned));
        assert!(creature.can_be_afflicted_by(Condition::Prone));
    }
}
