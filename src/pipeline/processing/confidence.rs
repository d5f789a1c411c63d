//! Deterministic confidence scoring for a single KPI record.

use once_cell::sync::Lazy;
use regex::Regex;

/// Base score before any evidence bonuses.
const BASE_SCORE: u8 = 50;

/// Unit tokens that count as "appropriate units" evidence.
const RECOGNIZED_UNITS: &[&str] = &[
    "tons",
    "kg",
    "percentage",
    "%",
    "count",
    "number",
    "employees",
    "directors",
];

static ANY_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").unwrap());
static REPORTING_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"20\d{2}").unwrap());

/// Compute a 0-100 confidence score and its reasoning for one record.
///
/// Additive scoring from a base of 50: +20 for a numeric value, +15 for a
/// recognized unit token, +10 for a 20xx year in the reference, +5 for a
/// reference longer than five words. Each check contributes exactly one
/// reasoning fragment, positive or negative, joined with "; " in check order.
pub fn score(_name: &str, value: &str, metric_type: &str, reference: &str) -> (u8, String) {
    let mut score = BASE_SCORE;
    let mut reasoning = Vec::with_capacity(4);

    // Check for specific numbers
    if ANY_DIGIT.is_match(value) {
        score += 20;
        reasoning.push("Specific numeric value found");
    } else {
        reasoning.push("No specific numeric value");
    }

    // Check for units
    let unit_lower = metric_type.to_lowercase();
    if RECOGNIZED_UNITS.iter().any(|u| unit_lower.contains(u)) {
        score += 15;
        reasoning.push("Appropriate units specified");
    } else {
        reasoning.push("Units may be unclear");
    }

    // Check for year
    if REPORTING_YEAR.is_match(reference) {
        score += 10;
        reasoning.push("Year specified in reference");
    } else {
        reasoning.push("No year specified");
    }

    // Check for clarity
    if reference.split_whitespace().count() > 5 {
        score += 5;
        reasoning.push("Detailed reference provided");
    } else {
        reasoning.push("Brief reference");
    }

    (score.min(100), reasoning.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_evidence_scores_one_hundred() {
        let (score, reasoning) = score(
            "X",
            "50,000 tons",
            "metric tons",
            "Our CO2 emissions were 50,000 metric tons in 2023",
        );
        assert_eq!(score, 100);
        assert_eq!(
            reasoning,
            "Specific numeric value found; Appropriate units specified; \
             Year specified in reference; Detailed reference provided"
        );
    }

    #[test]
    fn no_evidence_scores_base_fifty() {
        let (score, reasoning) = score(
            "X",
            "significant",
            "qualitative",
            "We reduced emissions significantly",
        );
        assert_eq!(score, 50);
        assert_eq!(
            reasoning,
            "No specific numeric value; Units may be unclear; \
             No year specified; Brief reference"
        );
    }

    #[test]
    fn each_check_contributes_exactly_one_fragment() {
        let (_, reasoning) = score("X", "12", "widgets", "short note");
        assert_eq!(reasoning.split("; ").count(), 4);
    }

    #[test]
    fn numeric_value_alone_adds_twenty() {
        let (score, _) = score("X", "42", "qualitative", "note");
        assert_eq!(score, 70);
    }

    #[test]
    fn year_must_match_twenty_xx_pattern() {
        let (with_year, _) = score("X", "n/a", "qualitative", "reported in 2021");
        let (without_year, _) = score("X", "n/a", "qualitative", "reported in 1999");
        assert_eq!(with_year, 60);
        assert_eq!(without_year, 50);
    }

    #[test]
    fn reference_of_exactly_five_words_counts_as_brief() {
        let (score, reasoning) = score("X", "n/a", "qualitative", "one two three four five");
        assert_eq!(score, 50);
        assert!(reasoning.contains("Brief reference"));
    }

    #[test]
    fn score_never_exceeds_one_hundred() {
        let (score, _) = score(
            "X",
            "99%",
            "percentage of tons count",
            "a very long detailed reference sentence from 2024 describing everything",
        );
        assert_eq!(score, 100);
    }
}
