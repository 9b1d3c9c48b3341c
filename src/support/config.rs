//! Dominance configuration.

use serde::{Deserialize, Serialize};

/// Which payoff comparison counts as dominance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DominanceCriterion {
    /// Strictly better against every contingency of the opponents.
    #[default]
    Strict,
    /// At least as good against every contingency, strictly better against
    /// at least one.
    Weak,
}

/// Dominance parameters for the reducer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DominanceConfig {
    /// Payoff comparison used to decide dominance.
    pub criterion: DominanceCriterion,

    /// Allow dominators from outside the support (any strategy of the game).
    /// Only strategies inside the support are ever removed.
    pub external: bool,
}

impl DominanceConfig {
    /// Strict dominance by strategies in the support.
    #[must_use]
    pub fn strict() -> Self {
        Self::default()
    }

    /// Weak dominance by strategies in the support.
    #[must_use]
    pub fn weak() -> Self {
        Self::default().with_criterion(DominanceCriterion::Weak)
    }

    /// Set the dominance criterion.
    #[must_use]
    pub fn with_criterion(mut self, criterion: DominanceCriterion) -> Self {
        self.criterion = criterion;
        self
    }

    /// Allow or forbid dominators outside the support.
    #[must_use]
    pub fn with_external(mut self, external: bool) -> Self {
        self.external = external;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DominanceConfig::default();
        assert_eq!(config.criterion, DominanceCriterion::Strict);
        assert!(!config.external);
        assert_eq!(config, DominanceConfig::strict());
    }

    #[test]
    fn test_builder() {
        let config = DominanceConfig::weak().with_external(true);
        assert_eq!(config.criterion, DominanceCriterion::Weak);
        assert!(config.external);
    }

    #[test]
    fn test_serialization() {
        let config = DominanceConfig::weak();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: DominanceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
