//! Trigger evaluation: does a card's boolean condition hold over the
//! compiled tokens?
//!
//! The stored trigger stays an opaque string on the card and is parsed into
//! a typed rule right here. A malformed rule makes the card fail evaluation;
//! it never aborts the batch.

use super::pair::PairTokenSets;
use super::tokens::TokenSet;
use serde::{Deserialize, Serialize};

/// Token-set selector for pair-scope entries. Untagged entries default to
/// the pair set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceTag {
    P,
    A,
    B,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TriggerEntry {
    pub token: String,
    #[serde(default)]
    pub src: Option<SourceTag>,
}

/// `all` / `any` / `not` lists over tokens. An empty rule always passes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TriggerRule {
    #[serde(default)]
    pub all: Vec<TriggerEntry>,
    #[serde(default)]
    pub any: Vec<TriggerEntry>,
    #[serde(default)]
    pub not: Vec<TriggerEntry>,
}

fn evaluate<F>(rule: &TriggerRule, present: F) -> Option<Vec<String>>
where
    F: Fn(&TriggerEntry) -> bool,
{
    for entry in &rule.not {
        if present(entry) {
            return None;
        }
    }
    let mut evidence = Vec::new();
    for entry in &rule.all {
        if !present(entry) {
            return None;
        }
        evidence.push(entry.token.clone());
    }
    if !rule.any.is_empty() {
        let mut matched = false;
        // Every present `any` token counts as evidence, not just the first.
        for entry in &rule.any {
            if present(entry) {
                matched = true;
                evidence.push(entry.token.clone());
            }
        }
        if !matched {
            return None;
        }
    }
    Some(evidence)
}

/// Single-profile evaluation. Returns the matched evidence on pass, `None`
/// on fail or malformed rule text.
pub fn evaluate_trigger(tokens: &TokenSet, raw: &str) -> Option<Vec<String>> {
    if raw.is_empty() {
        return Some(Vec::new());
    }
    let rule: TriggerRule = serde_json::from_str(raw).ok()?;
    evaluate(&rule, |entry| tokens.contains(&entry.token))
}

/// Pair evaluation: each entry consults the token set named by its source
/// tag (self A, self B, or the cross-profile set P).
pub fn evaluate_pair_trigger(sets: &PairTokenSets, raw: &str) -> Option<Vec<String>> {
    if raw.is_empty() {
        return Some(Vec::new());
    }
    let rule: TriggerRule = serde_json::from_str(raw).ok()?;
    evaluate(&rule, |entry| {
        sets.source(entry.src.unwrap_or(SourceTag::P))
            .contains(&entry.token)
    })
}
