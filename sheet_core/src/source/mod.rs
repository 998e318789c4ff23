//! StatSource - Trait and implementations for engine input providers

mod character;
mod creature;

pub use creature::SourcedCreature;

use crate::config::RulesConfig;
use crate::derived::{compute_derived_stats_with_rules, CreatureInput, DerivedStats};
use crate::error::ValidationError;

/// Anything that can be turned into stat engine input
pub trait StatSource: Send + Sync {
    /// Identifier used in log output
    fn id(&self) -> &str;

    /// Raw input for the stat engine
    fn creature_input(&self) -> CreatureInput;
}

/// Run the stat engine on any source
pub fn compute_from_source(
    source: &dyn StatSource,
    rules: &RulesConfig,
) -> Result<DerivedStats, ValidationError> {
    compute_derived_stats_with_rules(&source.creature_input(), rules).map_err(|err| {
        tracing::debug!("Rejected input from {}: {}", source.id(), err);
        err
    })
}
