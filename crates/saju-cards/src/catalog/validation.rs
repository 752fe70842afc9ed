//! Author-facing payload validation for the catalog's write path.
//!
//! Selection never calls this; it exists so card authors get short,
//! path-qualified messages (e.g. `trigger.all[0]: missing token`) before a
//! card is stored. The shapes here deliberately parse `src` as a free string
//! so a wrong tag is reported as a rule violation, not a JSON error.

use super::CardScope;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("trigger: invalid JSON: {0}")]
    TriggerJson(#[source] serde_json::Error),
    #[error("score: invalid JSON: {0}")]
    ScoreJson(#[source] serde_json::Error),
    #[error("trigger.{section}[{index}]: missing token")]
    TriggerMissingToken { section: &'static str, index: usize },
    #[error("trigger.{section}[{index}]: pair trigger entry src must be P, A, or B")]
    TriggerBadSource { section: &'static str, index: usize },
    #[error("score.{section}[{index}]: missing token")]
    ScoreMissingToken { section: &'static str, index: usize },
    #[error("score.{section}[{index}]: pair score entry src must be P, A, or B")]
    ScoreBadSource { section: &'static str, index: usize },
}

#[derive(Debug, Default, Deserialize)]
struct TriggerShape {
    #[serde(default)]
    all: Vec<TriggerEntryShape>,
    #[serde(default)]
    any: Vec<TriggerEntryShape>,
    #[serde(default)]
    not: Vec<TriggerEntryShape>,
}

#[derive(Debug, Deserialize)]
struct TriggerEntryShape {
    #[serde(default)]
    token: String,
    #[serde(default)]
    src: String,
}

#[derive(Debug, Default, Deserialize)]
struct ScoreShape {
    #[serde(default)]
    bonus_if: Vec<ScoreEntryShape>,
    #[serde(default)]
    penalty_if: Vec<ScoreEntryShape>,
}

#[derive(Debug, Deserialize)]
struct ScoreEntryShape {
    #[serde(default)]
    token: String,
    #[serde(default)]
    src: String,
}

/// Structural validation of raw trigger/score text for the given scope.
/// Empty payloads (`""` / `"{}"`) are valid: they mean "always match" and
/// "no score rule" respectively.
pub fn validate_card_payload(
    scope: CardScope,
    trigger_json: &str,
    score_json: &str,
) -> Result<(), ValidationError> {
    validate_trigger(scope, trigger_json)?;
    if !score_json.is_empty() && score_json != "{}" {
        validate_score(scope, score_json)?;
    }
    Ok(())
}

fn validate_trigger(scope: CardScope, raw: &str) -> Result<(), ValidationError> {
    if raw.is_empty() || raw == "{}" {
        return Ok(());
    }
    let shape: TriggerShape =
        serde_json::from_str(raw).map_err(ValidationError::TriggerJson)?;
    for (section, entries) in [("all", &shape.all), ("any", &shape.any), ("not", &shape.not)] {
        for (index, entry) in entries.iter().enumerate() {
            if entry.token.trim().is_empty() {
                return Err(ValidationError::TriggerMissingToken { section, index });
            }
            if scope == CardScope::Pair && !is_source_tag(entry.src.trim()) {
                return Err(ValidationError::TriggerBadSource { section, index });
            }
        }
    }
    Ok(())
}

fn validate_score(scope: CardScope, raw: &str) -> Result<(), ValidationError> {
    let shape: ScoreShape = serde_json::from_str(raw).map_err(ValidationError::ScoreJson)?;
    for (section, entries) in [("bonus_if", &shape.bonus_if), ("penalty_if", &shape.penalty_if)] {
        for (index, entry) in entries.iter().enumerate() {
            if entry.token.trim().is_empty() {
                return Err(ValidationError::ScoreMissingToken { section, index });
            }
            // src is optional on score entries, but when present under pair
            // scope it must name one of the three token sets.
            if scope == CardScope::Pair
                && !entry.src.is_empty()
                && !is_source_tag(entry.src.trim())
            {
                return Err(ValidationError::ScoreBadSource { section, index });
            }
        }
    }
    Ok(())
}

fn is_source_tag(value: &str) -> bool {
    matches!(value, "P" | "A" | "B")
}
