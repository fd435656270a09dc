//! Regex and keyword-table entity extraction from query text.

use std::sync::LazyLock;

use fathom_core::constants::MAX_NAME_HINTS;
use fathom_core::models::ExtractedEntities;
use fathom_core::traits::IEntityExtractor;
use regex::Regex;

use super::text::{contains_phrase, padded_lowercase};

macro_rules! query_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// ── Policy numbers ─────────────────────────────────────────────────────────
query_pattern!(
    RE_POLICY_LABELLED,
    r"(?i)\bpolicy\s*(?:number|no\.?|#)\s*[:#]?\s*([A-Z0-9][A-Z0-9\-/]{4,})"
);
query_pattern!(
    RE_POLICY_SHAPE,
    r"\b([A-Z]{2,5}[-\s]?\d{4,12}(?:[-/]\d{1,6})?|\d{2,4}-[A-Z]{1,4}-\d{3,10})\b"
);

// ── Dates ──────────────────────────────────────────────────────────────────
query_pattern!(RE_DATE_ISO, r"\b\d{4}-\d{2}-\d{2}\b");
query_pattern!(RE_DATE_US, r"\b\d{1,2}/\d{1,2}/\d{2,4}\b");
query_pattern!(
    RE_DATE_LONG,
    r"(?i)\b(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+\d{1,2}(?:st|nd|rd|th)?,?\s+\d{4}\b"
);

// ── Amounts ────────────────────────────────────────────────────────────────
query_pattern!(
    RE_AMOUNT,
    r"(?i)\$\s?\d{1,3}(?:,\d{3})*(?:\.\d{2})?(?:\s?(?:million|thousand|mm|m|k)\b)?|\b\d+(?:\.\d+)?\s?(?:million|thousand)\s+dollars\b"
);

// ── Names ──────────────────────────────────────────────────────────────────
query_pattern!(
    RE_NAME,
    r"\b[A-Z][a-zA-Z'\-]+(?:\s+(?:&\s+)?[A-Z][a-zA-Z'\-]+)*(?:\s+(?:Inc|LLC|Corp|Co|Ltd|LLP)\b\.?)?"
);

// ── Locations ──────────────────────────────────────────────────────────────
query_pattern!(
    RE_STREET,
    r"\b\d{1,6}\s+(?:[A-Z][a-z]+\s+){1,4}(?:Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Drive|Dr|Lane|Ln|Way|Court|Ct|Place|Pl|Parkway|Pkwy)\b\.?"
);
query_pattern!(
    RE_CITY_STATE_ZIP,
    r"\b[A-Z][a-z]+(?:\s[A-Z][a-z]+)*,\s*[A-Z]{2}\s+\d{5}(?:-\d{4})?\b"
);

/// Coverage phrases mapped to canonical coverage keys.
const COVERAGE_SYNONYMS: &[(&str, &[&str])] = &[
    (
        "property",
        &[
            "property",
            "building",
            "commercial property",
            "business personal property",
            "bpp",
        ],
    ),
    (
        "general_liability",
        &[
            "general liability",
            "commercial general liability",
            "gl",
            "cgl",
        ],
    ),
    (
        "auto",
        &["auto", "automobile", "commercial auto", "auto liability", "vehicle"],
    ),
    (
        "workers_compensation",
        &[
            "workers compensation",
            "workers' compensation",
            "workers comp",
            "work comp",
            "wc",
        ],
    ),
    ("umbrella", &["umbrella", "excess liability"]),
    (
        "professional_liability",
        &[
            "professional liability",
            "errors and omissions",
            "errors & omissions",
            "e&o",
        ],
    ),
    ("directors_and_officers", &["directors and officers", "d&o"]),
    ("cyber", &["cyber", "cyber liability", "data breach"]),
    ("flood", &["flood"]),
    ("earthquake", &["earthquake", "quake"]),
    (
        "business_interruption",
        &["business interruption", "business income", "loss of income", "bi"],
    ),
];

/// Keywords hinting at a section type.
const SECTION_KEYWORDS: &[(&str, &[&str])] = &[
    ("declarations", &["declarations", "dec page", "policy period"]),
    ("coverages", &["coverage", "coverages", "covered"]),
    ("deductibles", &["deductible", "deductibles"]),
    ("limits", &["limit", "limits", "aggregate", "each occurrence"]),
    ("exclusions", &["exclusion", "exclusions", "excluded", "not covered"]),
    ("endorsements", &["endorsement", "endorsements", "rider"]),
    ("conditions", &["condition", "conditions"]),
    ("definitions", &["definition", "definitions", "defined"]),
    ("premium", &["premium", "premiums"]),
    ("insured_parties", &["named insured", "additional insured", "insured"]),
    ("locations", &["location", "locations", "address", "premises"]),
    ("loss_history", &["loss history", "claims history", "loss runs", "prior claims"]),
];

/// Keywords hinting at a graph/vector entity type.
const ENTITY_TYPE_KEYWORDS: &[(&str, &[&str])] = &[
    ("exclusion", &["exclusion", "exclusions", "excluded"]),
    ("endorsement", &["endorsement", "endorsements"]),
    ("condition", &["condition", "conditions"]),
    ("deductible", &["deductible", "deductibles"]),
    ("limit", &["limit", "limits"]),
];

/// Capitalized words that start sentences or questions, never names.
const NAME_STOPWORDS: &[&str] = &[
    "What", "Whats", "What's", "Which", "Who", "When", "Where", "Why", "How", "Is", "Are",
    "Does", "Do", "Did", "Can", "Could", "Should", "Would", "Will", "Show", "List", "Tell",
    "Give", "Find", "Compare", "Explain", "Please", "The", "A", "An", "My", "Our", "Their",
    "This", "That", "These", "Those", "I", "We", "Policy", "Audit", "Review",
];

/// Best-effort extractor built from regex families and keyword tables.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternExtractor;

impl PatternExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl IEntityExtractor for PatternExtractor {
    fn extract(&self, query: &str) -> ExtractedEntities {
        let padded = padded_lowercase(query);
        let mut entities = ExtractedEntities::default();

        extend_matches(&RE_DATE_ISO, query, &mut entities.dates);
        extend_matches(&RE_DATE_US, query, &mut entities.dates);
        extend_matches(&RE_DATE_LONG, query, &mut entities.dates);
        extend_matches(&RE_AMOUNT, query, &mut entities.amounts);
        extend_matches(&RE_STREET, query, &mut entities.locations);
        extend_matches(&RE_CITY_STATE_ZIP, query, &mut entities.locations);

        if let Some(re) = RE_POLICY_LABELLED.as_ref() {
            for caps in re.captures_iter(query) {
                if let Some(m) = caps.get(1) {
                    entities.policy_numbers.insert(m.as_str().to_uppercase());
                }
            }
        }
        if let Some(re) = RE_POLICY_SHAPE.as_ref() {
            for m in re.find_iter(query) {
                entities.policy_numbers.insert(m.as_str().replace(' ', "-"));
            }
        }

        for &(canonical, phrases) in COVERAGE_SYNONYMS {
            if phrases.iter().any(|p| contains_phrase(&padded, p)) {
                entities.coverage_types.insert(canonical.to_string());
            }
        }
        for &(section, keywords) in SECTION_KEYWORDS {
            if keywords.iter().any(|k| contains_phrase(&padded, k)) {
                entities.section_hints.insert(section.to_string());
            }
        }
        for &(entity_type, keywords) in ENTITY_TYPE_KEYWORDS {
            if keywords.iter().any(|k| contains_phrase(&padded, k)) {
                entities.entity_type_hints.insert(entity_type.to_string());
            }
        }

        for name in candidate_names(query) {
            if entities.names.len() >= MAX_NAME_HINTS {
                break;
            }
            let is_location = entities.locations.iter().any(|l| l.contains(&name));
            if !is_location {
                entities.names.insert(name);
            }
        }

        entities
    }
}

fn extend_matches(
    pattern: &LazyLock<Option<Regex>>,
    text: &str,
    into: &mut std::collections::BTreeSet<String>,
) {
    if let Some(re) = pattern.as_ref() {
        into.extend(re.find_iter(text).map(|m| m.as_str().trim().to_string()));
    }
}

/// Capitalized phrases with leading stopwords stripped. A phrase survives
/// when it keeps two or more words and is not itself a coverage phrase.
fn candidate_names(query: &str) -> Vec<String> {
    let Some(re) = RE_NAME.as_ref() else {
        return Vec::new();
    };
    re.find_iter(query)
        .filter_map(|m| {
            let words: Vec<&str> = m
                .as_str()
                .split_whitespace()
                .skip_while(|w| NAME_STOPWORDS.contains(w))
                .collect();
            if words.len() < 2 {
                return None;
            }
            let name = words.join(" ");
            let lower = name.to_lowercase();
            let is_coverage = COVERAGE_SYNONYMS
                .iter()
                .any(|(_, phrases)| phrases.contains(&lower.as_str()));
            (!is_coverage).then_some(name)
        })
        .collect()
}
