//! SourcedCreature - A creature record paired with an outside proficiency bonus

use crate::derived::CreatureInput;
use crate::records::Creature;
use crate::source::StatSource;
use crate::types::RollMode;

/// Creature records store no proficiency bonus (it usually comes from a
/// challenge rating kept elsewhere), so it is supplied alongside
pub struct SourcedCreature<'a> {
    pub creature: &'a Creature,
    pub proficiency_bonus: i32,
    pub perception_mode: RollMode,
}

impl<'a> SourcedCreature<'a> {
    pub fn new(creature: &'a Creature, proficiency_bonus: i32) -> Self {
        SourcedCreature {
            creature,
            proficiency_bonus,
            perception_mode: RollMode::Normal,
        }
    }

    pub fn with_perception_mode(mut self, mode: RollMode) -> Self {
        self.perception_mode = mode;
        self
    }
}

impl StatSource for SourcedCreature<'_> {
    fn id(&self) -> &str {
        &self.creature.name
    }

    fn creature_input(&self) -> CreatureInput {
        CreatureInput::from_creature(self.creature, self.proficiency_bonus)
            .with_perception_mode(self.perception_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulesConfig;
    use crate::records::SkillProficiency;
    use crate::source::compute_from_source;
    use crate::types::{Ability, Skill};

    #[test]
    fn test_sourced_creature() {
        let mut wolf = Creature::new("Wolf")
            .with_score(Ability::Dexterity, 15)
            .with_score(Ability::Wisdom, 12);
        wolf.skills.insert(Skill::Perception, SkillProficiency::proficient());
        wolf.skills.insert(Skill::Stealth, SkillProficiency::proficient());

        let source = SourcedCreature::new(&wolf, 2).with_perception_mode(RollMode::Advantage);
        assert_eq!(source.id(), "Wolf");

        let stats = compute_from_source(&source, &RulesConfig::default()).unwrap();
        assert_eq!(stats.skill(Skill::Perception), 3);
        assert_eq!(stats.skill(Skill::Stealth), 4);
        // 10 + 3 + 5
        assert_eq!(stats.passive_perception, 18);
    }

    #[test]
    fn test_invalid_creature_rejected() {
        let mut ooze = Creature::new("Ooze");
        ooze.ability_scores.remove(&Ability::Intelligence);
        let err = compute_from_source(&SourcedCreature::new(&ooze, 2), &RulesConfig::default())
            .unwrap_err();
        assert_eq!(err.field, "abilityScores.int");
    }
}
