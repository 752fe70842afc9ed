//! Score computation: base value plus conditional bonuses and penalties
//! over the token set.

use super::tokens::TokenSet;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoreRule {
    #[serde(default)]
    pub base: i32,
    #[serde(default)]
    pub bonus_if: Vec<BonusEntry>,
    #[serde(default)]
    pub penalty_if: Vec<PenaltyEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BonusEntry {
    pub token: String,
    #[serde(default)]
    pub add: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PenaltyEntry {
    pub token: String,
    #[serde(default)]
    pub sub: i32,
}

/// `base + Σ add − Σ sub` over present tokens. Empty or malformed rule text
/// scores 0; it never aborts the batch.
pub fn compute_score(tokens: &TokenSet, raw: &str) -> i32 {
    if raw.is_empty() {
        return 0;
    }
    let Ok(rule) = serde_json::from_str::<ScoreRule>(raw) else {
        return 0;
    };
    let mut score = rule.base;
    for bonus in &rule.bonus_if {
        if tokens.contains(&bonus.token) {
            score += bonus.add;
        }
    }
    for penalty in &rule.penalty_if {
        if tokens.contains(&penalty.token) {
            score -= penalty.sub;
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(items: &[&str]) -> TokenSet {
        items.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn score_is_linear_in_matched_entries() {
        let set = tokens(&["ten-stems:direct-wealth", "ten-stems:direct-wealth@month-stem#H"]);
        let rule = r#"{"base":50,"bonus_if":[{"token":"ten-stems:direct-wealth@month-stem#H","add":20}],"penalty_if":[{"token":"relation:clash#H","sub":10}]}"#;
        assert_eq!(compute_score(&set, rule), 70);

        let with_clash = tokens(&[
            "ten-stems:direct-wealth@month-stem#H",
            "relation:clash#H",
        ]);
        assert_eq!(compute_score(&with_clash, rule), 60);
    }

    #[test]
    fn unmatched_entries_leave_the_base() {
        let rule = r#"{"base":40,"bonus_if":[{"token":"special-marker:romance","add":15}]}"#;
        assert_eq!(compute_score(&TokenSet::default(), rule), 40);
    }

    #[test]
    fn empty_or_malformed_rule_scores_zero() {
        let set = tokens(&["confidence:overall"]);
        assert_eq!(compute_score(&set, ""), 0);
        assert_eq!(compute_score(&set, "{not json"), 0);
        // An explicit empty object is a rule with base 0, not an error.
        assert_eq!(compute_score(&set, "{}"), 0);
    }

    #[test]
    fn penalties_can_push_the_score_negative() {
        let set = tokens(&["relation:clash"]);
        let rule = r#"{"base":5,"penalty_if":[{"token":"relation:clash","sub":20}]}"#;
        assert_eq!(compute_score(&set, rule), -15);
    }
}
