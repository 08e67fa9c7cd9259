//! Corrosivity estimate from the free-text location an inspector types in.
//!
//! Keyword sets cover English and Italian yard vocabulary. Matching is a case-insensitive
//! substring search, so "Porto di Napoli" and "PORT OF GENOA" both hit the port set.

use std::sync::OnceLock;

use regex::Regex;

use super::domain::EnvironmentCategory;

/// Category assumed when nothing in the location text says otherwise.
pub const BASELINE_ENVIRONMENT: EnvironmentCategory = EnvironmentCategory::C4;

const PORT_PATTERN: &str = r"(?i)porto|port|marina|banchina|dock|harbou?r|quay";
const INDUSTRIAL_PATTERN: &str = r"(?i)zona industriale|industrial|raffineria|refinery|steel|shipyard|cantiere|impianto|plant|terminal";
const OFFSHORE_PATTERN: &str =
    r"(?i)offshore|piattaforma|platform|splash[ -]zone|frangiflutti|breakwater";

struct KeywordSets {
    port: Regex,
    industrial: Regex,
    offshore: Regex,
}

fn keyword_sets() -> &'static KeywordSets {
    static SETS: OnceLock<KeywordSets> = OnceLock::new();
    SETS.get_or_init(|| KeywordSets {
        port: compile(PORT_PATTERN),
        industrial: compile(INDUSTRIAL_PATTERN),
        offshore: compile(OFFSHORE_PATTERN),
    })
}

fn compile(pattern: &str) -> Regex {
    // Constant patterns; `keyword_patterns_compile` covers them.
    Regex::new(pattern).expect("environment keyword pattern is valid")
}

/// Estimate the corrosivity category for a location. Never fails; empty text yields the baseline.
pub fn estimate_environment(location: &str) -> EnvironmentCategory {
    let sets = keyword_sets();

    // Offshore exposure trumps every other signal.
    if sets.offshore.is_match(location) {
        return EnvironmentCategory::CX;
    }

    let mut category = BASELINE_ENVIRONMENT;
    if sets.port.is_match(location) {
        category = escalate_to(category, EnvironmentCategory::C5M);
    }
    if sets.industrial.is_match(location) {
        category = industrial_step(category);
    }
    category
}

/// One step worse, capped at C5I. Already-marine or extreme categories are left alone.
fn industrial_step(category: EnvironmentCategory) -> EnvironmentCategory {
    match category {
        EnvironmentCategory::C3 => EnvironmentCategory::C4,
        EnvironmentCategory::C4 => EnvironmentCategory::C5I,
        other => other,
    }
}

fn escalate_to(current: EnvironmentCategory, target: EnvironmentCategory) -> EnvironmentCategory {
    if target.rank() > current.rank() {
        target
    } else {
        current
    }
}
