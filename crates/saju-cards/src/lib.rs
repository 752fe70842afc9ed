//! Four-pillars compatibility card engine.
//!
//! A birth moment (or two, in pair mode) is turned into a deterministic set
//! of typed facts, compiled into canonical string tokens, matched against a
//! catalog of content cards via boolean trigger rules, ranked by a scoring
//! formula, and reduced to a capped, deduplicated final list — optionally
//! flattened into prompt context for a downstream language-model call.
//!
//! Storage and the astronomical pillar computation live behind the
//! [`catalog::CardCatalog`] and [`pillars::oracle::PillarOracle`] traits;
//! the engine itself is stateless and side-effect free apart from those two
//! reads and its fallback logging.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod pillars;
pub mod telemetry;

pub use catalog::{Card, CardCatalog, CardScope, CardStatus, CatalogError, FallbackCatalog};
pub use catalog::seed::SeedCatalog;
pub use catalog::validation::{validate_card_payload, ValidationError};
pub use config::{AppEnvironment, ConfigError, EngineConfig};
pub use engine::{
    build_context, derive_facts, derive_pair_facts, fortune_chart, select_pair_cards,
    select_saju_cards, Fact, FactCategory, PairTokenSets, Selection, SelectionError,
    SelectionLimits, SelectionService, TokenSet,
};
pub use pillars::oracle::{BirthInput, BirthInputError, OracleError, PillarOracle};
pub use pillars::{Branch, Chart, ChartError, Element, Gender, Pillar, Position, Stem};
