//! Card records and the catalog boundary.
//!
//! Cards are owned and mutated elsewhere; the engine only reads published
//! ones through [`CardCatalog`]. Trigger, score, and content payloads stay
//! opaque strings on the record and are parsed into typed shapes at the
//! evaluation boundary, never inside it.

pub mod seed;
pub mod validation;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Ruleset stamped on cards that do not declare one.
pub const DEFAULT_RULE_SET: &str = "korean_standard_v1";

/// Which pipeline a card belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardScope {
    Saju,
    Pair,
}

impl CardScope {
    pub const fn as_str(self) -> &'static str {
        match self {
            CardScope::Saju => "saju",
            CardScope::Pair => "pair",
        }
    }

    pub fn from_str(value: &str) -> Option<CardScope> {
        match value {
            "saju" => Some(CardScope::Saju),
            "pair" => Some(CardScope::Pair),
            _ => None,
        }
    }
}

/// Lifecycle state of a card in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStatus {
    Draft,
    Published,
    Archived,
}

impl CardStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CardStatus::Draft => "draft",
            CardStatus::Published => "published",
            CardStatus::Archived => "archived",
        }
    }
}

/// One catalog record. `score` is `None` when the author supplied no score
/// rule at all, which is distinct from a rule that evaluates to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub uid: String,
    pub card_id: String,
    pub version: u32,
    pub status: CardStatus,
    pub rule_set: String,
    pub scope: CardScope,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "empty_object")]
    pub trigger: String,
    #[serde(default)]
    pub score: Option<String>,
    #[serde(default = "empty_object")]
    pub content: String,
    #[serde(default)]
    pub cooldown_group: String,
    #[serde(default)]
    pub max_per_user: u32,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn empty_object() -> String {
    "{}".to_string()
}

impl Card {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn is_published(&self) -> bool {
        self.status == CardStatus::Published && !self.is_deleted()
    }
}

/// Read side of the card store. Implementations must already apply the
/// published/non-deleted filter so every source honors the same contract.
pub trait CardCatalog: Send + Sync {
    fn list_published(&self, scope: CardScope) -> Result<Vec<Card>, CatalogError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
    #[error("seed directory {path}: {source}")]
    SeedDirectory {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

/// Prefers an alternate card source and falls back to the primary when the
/// alternate fails. A primary failure is surfaced, never masked.
pub struct FallbackCatalog<A, P> {
    preferred: A,
    primary: P,
}

impl<A, P> FallbackCatalog<A, P> {
    pub fn new(preferred: A, primary: P) -> FallbackCatalog<A, P> {
        FallbackCatalog { preferred, primary }
    }
}

impl<A: CardCatalog, P: CardCatalog> CardCatalog for FallbackCatalog<A, P> {
    fn list_published(&self, scope: CardScope) -> Result<Vec<Card>, CatalogError> {
        match self.preferred.list_published(scope) {
            Ok(cards) => Ok(cards),
            Err(err) => {
                warn!(scope = scope.as_str(), error = %err, "preferred catalog failed; falling back to primary");
                self.primary.list_published(scope)
            }
        }
    }
}
