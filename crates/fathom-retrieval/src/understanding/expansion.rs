//! Domain abbreviation expansion.
//!
//! Each known abbreviation found in the query yields a variant with the
//! long form substituted, and each long form yields a variant with the
//! abbreviation. Variants are independent: one substitution per variant.

use std::sync::LazyLock;

use regex::Regex;

/// (abbreviation, long form)
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("GL", "general liability"),
    ("CGL", "commercial general liability"),
    ("WC", "workers compensation"),
    ("BI", "business interruption"),
    ("E&O", "errors and omissions"),
    ("D&O", "directors and officers"),
    ("UM", "uninsured motorist"),
    ("UIM", "underinsured motorist"),
    ("BOP", "business owners policy"),
    ("AL", "auto liability"),
    ("PD", "property damage"),
    ("BPP", "business personal property"),
    ("EPLI", "employment practices liability"),
    ("TRIA", "terrorism risk insurance"),
];

struct Rule {
    abbreviation: Regex,
    long_form: Regex,
    short: &'static str,
    long: &'static str,
}

/// Word-boundary match that also treats `&` as part of a word. The
/// boundary characters are captured so substitution can keep them.
/// Abbreviations match only in upper case so "um" or "Al" stay words.
fn boundary_pattern(term: &str, ignore_case: bool) -> Option<Regex> {
    let flags = if ignore_case { "(?i)" } else { "" };
    Regex::new(&format!(r"{flags}(^|[^\w&]){}($|[^\w&])", regex::escape(term))).ok()
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    ABBREVIATIONS
        .iter()
        .filter_map(|&(short, long)| {
            Some(Rule {
                abbreviation: boundary_pattern(short, false)?,
                long_form: boundary_pattern(long, true)?,
                short,
                long,
            })
        })
        .collect()
});

fn substitute(pattern: &Regex, query: &str, replacement: &str) -> Option<String> {
    let caps = pattern.captures(query)?;
    let whole = caps.get(0)?;
    let lead = caps.get(1).map_or("", |m| m.as_str());
    let trail = caps.get(2).map_or("", |m| m.as_str());
    let mut out = String::with_capacity(query.len() + replacement.len());
    out.push_str(&query[..whole.start()]);
    out.push_str(lead);
    out.push_str(replacement);
    out.push_str(trail);
    out.push_str(&query[whole.end()..]);
    Some(out)
}

/// The original query followed by abbreviation variants, deduplicated
/// case-insensitively and capped at `max_variants` (original included).
pub fn expand_query(query: &str, max_variants: usize) -> Vec<String> {
    let mut variants = vec![query.to_string()];
    let cap = max_variants.max(1);

    let push = |variant: String, variants: &mut Vec<String>| {
        if variants.len() < cap && !variants.iter().any(|v| v.eq_ignore_ascii_case(&variant)) {
            variants.push(variant);
        }
    };

    for rule in RULES.iter() {
        if let Some(v) = substitute(&rule.abbreviation, query, rule.long) {
            push(v, &mut variants);
        }
        if let Some(v) = substitute(&rule.long_form, query, rule.short) {
            push(v, &mut variants);
        }
        if variants.len() >= cap {
            break;
        }
    }

    variants
}
