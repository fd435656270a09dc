use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Structured entities pulled out of the query text. Each family is a set;
/// order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedEntities {
    pub policy_numbers: BTreeSet<String>,
    /// Canonical coverage keys (e.g. `property`, `general_liability`).
    pub coverage_types: BTreeSet<String>,
    pub names: BTreeSet<String>,
    pub dates: BTreeSet<String>,
    pub amounts: BTreeSet<String>,
    pub locations: BTreeSet<String>,
    /// Section types the query points at (validated against the allow-list later).
    pub section_hints: BTreeSet<String>,
    /// Entity types the query points at (validated against the allow-list later).
    pub entity_type_hints: BTreeSet<String>,
}

impl ExtractedEntities {
    pub fn is_empty(&self) -> bool {
        self.policy_numbers.is_empty()
            && self.coverage_types.is_empty()
            && self.names.is_empty()
            && self.dates.is_empty()
            && self.amounts.is_empty()
            && self.locations.is_empty()
            && self.section_hints.is_empty()
            && self.entity_type_hints.is_empty()
    }

    pub fn has_coverage_types(&self) -> bool {
        !self.coverage_types.is_empty()
    }
}
