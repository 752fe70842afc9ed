//! File-based card source for local and offline runs.
//!
//! One JSON object per file, `saju_*.json` / `pair_*.json` filename prefixes
//! select the scope. A file that fails to read or parse is skipped with a
//! warning; only a missing directory fails the whole load so a
//! [`FallbackCatalog`](super::FallbackCatalog) can take over.

use super::{Card, CardCatalog, CardScope, CardStatus, CatalogError, DEFAULT_RULE_SET};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub struct SeedCatalog {
    dir: PathBuf,
}

impl SeedCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> SeedCatalog {
        SeedCatalog { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn scope_prefix(scope: CardScope) -> &'static str {
        match scope {
            CardScope::Saju => "saju_",
            CardScope::Pair => "pair_",
        }
    }

    fn load_scope(&self, scope: CardScope) -> Result<Vec<Card>, CatalogError> {
        let entries = fs::read_dir(&self.dir).map_err(|source| CatalogError::SeedDirectory {
            path: self.dir.clone(),
            source,
        })?;

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.ends_with(".json") && name.starts_with(Self::scope_prefix(scope)))
            .collect();
        names.sort();

        let mut cards = Vec::with_capacity(names.len());
        for name in names {
            let path = self.dir.join(&name);
            let data = match fs::read_to_string(&path) {
                Ok(data) => data,
                Err(err) => {
                    warn!(file = %path.display(), error = %err, "seed file unreadable; skipped");
                    continue;
                }
            };
            let seed: SeedCard = match serde_json::from_str(&data) {
                Ok(seed) => seed,
                Err(err) => {
                    warn!(file = %path.display(), error = %err, "seed file invalid; skipped");
                    continue;
                }
            };
            if seed.card_id.is_empty() || seed.scope.is_empty() {
                warn!(file = %path.display(), "seed file missing card_id or scope; skipped");
                continue;
            }
            if seed.scope != scope.as_str() {
                continue;
            }
            cards.push(seed.into_card(scope));
        }
        Ok(cards)
    }
}

impl CardCatalog for SeedCatalog {
    fn list_published(&self, scope: CardScope) -> Result<Vec<Card>, CatalogError> {
        let cards = self.load_scope(scope)?;
        Ok(cards.into_iter().filter(Card::is_published).collect())
    }
}

/// Raw seed-file shape (snake_case author format). Trigger, score, and
/// content arrive as arbitrary JSON and are re-serialized into the opaque
/// strings the card record carries.
#[derive(Debug, Deserialize)]
struct SeedCard {
    #[serde(default)]
    card_id: String,
    #[serde(default)]
    scope: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    trigger: Option<Value>,
    #[serde(default)]
    score: Option<Value>,
    #[serde(default)]
    content: Option<Value>,
    #[serde(default)]
    status: String,
    #[serde(default)]
    rule_set: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    domains: Vec<String>,
    #[serde(default)]
    priority: i32,
    #[serde(default)]
    cooldown_group: String,
    #[serde(default)]
    max_per_user: u32,
    #[serde(default)]
    version: u32,
}

impl SeedCard {
    fn into_card(self, scope: CardScope) -> Card {
        let status = match self.status.as_str() {
            "draft" => CardStatus::Draft,
            "archived" => CardStatus::Archived,
            // Seed cards exist to be served; unlabeled ones count as published.
            _ => CardStatus::Published,
        };
        let rule_set = if self.rule_set.is_empty() {
            DEFAULT_RULE_SET.to_string()
        } else {
            self.rule_set
        };
        Card {
            uid: format!("seed-{}", self.card_id),
            card_id: self.card_id,
            version: if self.version == 0 { 1 } else { self.version },
            status,
            rule_set,
            scope,
            title: self.title,
            category: self.category,
            tags: self.tags,
            domains: self.domains,
            priority: self.priority,
            trigger: raw_text(self.trigger),
            score: score_text(self.score),
            content: raw_text(self.content),
            cooldown_group: self.cooldown_group,
            max_per_user: self.max_per_user,
            deleted_at: None,
            created_at: None,
            updated_at: None,
        }
    }
}

fn raw_text(value: Option<Value>) -> String {
    match value {
        Some(Value::Null) | None => "{}".to_string(),
        Some(value) => value.to_string(),
    }
}

/// Absent, null, or empty score objects mean "no rule": such cards rank by
/// their priority instead of a computed score.
fn score_text(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::Null) | None => None,
        Some(Value::Object(map)) if map.is_empty() => None,
        Some(value) => Some(value.to_string()),
    }
}
