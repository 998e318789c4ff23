//! CheckValue - The additive breakdown behind a d20 check total

use serde::{Deserialize, Serialize};

/// A check bonus split into its parts
///
/// Final value is `ability_modifier + proficiency + misc`:
///
/// - `ability_modifier`: from the governing ability score
/// - `proficiency`: the share of the proficiency bonus that applies
/// - `misc`: the stored miscellaneous modifier, zero when absent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckValue {
    pub ability_modifier: i32,
    pub proficiency: i32,
    pub misc: i32,
}

impl CheckValue {
    pub fn new(ability_modifier: i32, proficiency: i32, misc: i32) -> Self {
        CheckValue {
            ability_modifier,
            proficiency,
            misc,
        }
    }

    /// Sum of all parts, saturating at the i32 bounds
    pub fn total(&self) -> i32 {
        self.ability_modifier
            .saturating_add(self.proficiency)
            .saturating_add(self.misc)
    }

    /// Whether any proficiency applies
    pub fn is_trained(&self) -> bool {
        self.proficiency != 0
    }
}
