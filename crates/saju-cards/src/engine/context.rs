//! Prompt-context assembly from a selected card list.
//!
//! Summaries, points, and questions are concatenated deduplicated up to a
//! character budget; guardrails are collected separately and appended as a
//! trailing instruction block regardless of the budget. A card whose content
//! payload does not parse is skipped, never the whole assembly.

use crate::catalog::Card;
use serde::Deserialize;
use std::collections::HashSet;
use tracing::debug;

/// Budget applied when the caller passes 0.
pub const DEFAULT_CONTEXT_BUDGET: usize = 8000;

/// Content payload shape carried by a card.
#[derive(Debug, Default, Deserialize)]
pub struct ContentShape {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub points: Vec<String>,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub guardrails: Vec<String>,
}

/// Flattens the cards' content into deduplicated, budgeted prose plus the
/// guardrail block.
pub fn build_context(cards: &[Card], max_chars: usize) -> String {
    let max_chars = if max_chars == 0 {
        DEFAULT_CONTEXT_BUDGET
    } else {
        max_chars
    };

    let mut seen: HashSet<String> = HashSet::new();
    let mut parts: Vec<String> = Vec::new();
    let mut guardrails: Vec<String> = Vec::new();
    let mut total = 0usize;

    let take = |line: String, seen: &mut HashSet<String>, parts: &mut Vec<String>,
                total: &mut usize| {
        if line.is_empty() || !seen.insert(line.clone()) {
            return;
        }
        if *total + line.len() + 1 <= max_chars {
            *total += line.len() + 1;
            parts.push(line);
        }
    };

    for card in cards {
        let content: ContentShape = match serde_json::from_str(&card.content) {
            Ok(content) => content,
            Err(err) => {
                debug!(card_id = %card.card_id, error = %err, "content payload unparseable; card skipped");
                continue;
            }
        };
        take(content.summary, &mut seen, &mut parts, &mut total);
        for point in content.points {
            take(
                point.trim().to_string(),
                &mut seen,
                &mut parts,
                &mut total,
            );
        }
        for question in content.questions {
            take(
                question.trim().to_string(),
                &mut seen,
                &mut parts,
                &mut total,
            );
        }
        for guardrail in content.guardrails {
            let guardrail = guardrail.trim();
            if !guardrail.is_empty() {
                guardrails.push(guardrail.to_string());
            }
        }
    }

    let mut out = parts.join("\n");
    if !guardrails.is_empty() {
        let mut unique = Vec::new();
        let mut dedup = HashSet::new();
        for guardrail in guardrails {
            if dedup.insert(guardrail.clone()) {
                unique.push(guardrail);
            }
        }
        out.push_str("\n\n[guardrails]\n");
        out.push_str(&unique.join("\n"));
    }
    out
}
