//! Section and entity-type filter derivation.

use std::collections::BTreeSet;

use fathom_core::constants::{ENTITY_TYPES, SECTION_TYPES};
use fathom_core::intent::Intent;
use fathom_core::models::{ExtractedEntities, WorkflowContext};

/// Sections every query of this intent is filtered to, before hints.
pub fn default_section_filters(intent: Intent) -> &'static [&'static str] {
    match intent {
        Intent::Qa => &[],
        Intent::Analysis => &["coverages", "exclusions", "endorsements", "conditions"],
        Intent::Audit => &[
            "declarations",
            "coverages",
            "exclusions",
            "endorsements",
            "conditions",
            "definitions",
        ],
    }
}

/// Entity types every query of this intent is filtered to.
pub fn default_entity_filters(intent: Intent) -> &'static [&'static str] {
    match intent {
        Intent::Qa | Intent::Analysis => &[],
        Intent::Audit => &["coverage", "exclusion", "condition", "endorsement"],
    }
}

/// Hints then defaults, keeping only allow-listed values, first occurrence wins.
fn union_validated<'a>(
    hints: impl IntoIterator<Item = &'a String>,
    defaults: &[&'a str],
    allowed: &[&str],
) -> Vec<String> {
    let mut seen = BTreeSet::new();
    hints
        .into_iter()
        .map(String::as_str)
        .chain(defaults.iter().copied())
        .filter(|v| allowed.contains(v))
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// Derive `(section_filters, entity_filters)` for a plan.
///
/// Section filters are narrowed to the section types present in a non-empty
/// workflow context; if that would leave nothing, the validated list is kept.
///
/// Entity filters are the intent defaults only. They are a hard store
/// filter, so entity-type hints from the query feed the entity boost
/// instead of narrowing the search.
pub fn derive_filters(
    intent: Intent,
    entities: &ExtractedEntities,
    context: &WorkflowContext,
) -> (Vec<String>, Vec<String>) {
    let sections = union_validated(
        &entities.section_hints,
        default_section_filters(intent),
        SECTION_TYPES,
    );
    let sections = if context.sections.is_empty() {
        sections
    } else {
        let present = context.section_types();
        let narrowed: Vec<String> = sections
            .iter()
            .filter(|s| present.contains(s.as_str()))
            .cloned()
            .collect();
        if narrowed.is_empty() {
            sections
        } else {
            narrowed
        }
    };

    let entity_types = union_validated(None::<&String>, default_entity_filters(intent), ENTITY_TYPES);

    (sections, entity_types)
}
