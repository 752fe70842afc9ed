use crate::engine::select::SelectionLimits;
use crate::engine::{DEFAULT_CONTEXT_BUDGET, DEFAULT_MAX_PER_DOMAIN};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub environment: AppEnvironment,
    pub selection: SelectionConfig,
    pub context: ContextConfig,
    /// Directory of the file-based seed catalog; `None` leaves the primary
    /// catalog as the only source.
    pub seed_dir: Option<PathBuf>,
    pub telemetry: TelemetryConfig,
}

impl EngineConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let max_per_domain = parse_usize("SELECT_MAX_PER_DOMAIN", DEFAULT_MAX_PER_DOMAIN)?;
        let max_per_tag = parse_usize("SELECT_MAX_PER_TAG", 0)?;
        let max_chars = parse_usize("CONTEXT_MAX_CHARS", DEFAULT_CONTEXT_BUDGET)?;

        let seed_dir = env::var("CARD_SEED_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            selection: SelectionConfig {
                max_per_domain,
                max_per_tag,
            },
            context: ContextConfig { max_chars },
            seed_dir,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn parse_usize(var: &'static str, default: usize) -> Result<usize, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidNumber { var }),
        Err(_) => Ok(default),
    }
}

/// Caps applied during candidate selection. 0 means unlimited.
#[derive(Debug, Clone, Copy)]
pub struct SelectionConfig {
    pub max_per_domain: usize,
    pub max_per_tag: usize,
}

impl SelectionConfig {
    pub const fn limits(&self) -> SelectionLimits {
        SelectionLimits {
            max_per_domain: self.max_per_domain,
            max_per_tag: self.max_per_tag,
        }
    }
}

/// Character budget for prompt-context assembly.
#[derive(Debug, Clone, Copy)]
pub struct ContextConfig {
    pub max_chars: usize,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber { var: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { var } => {
                write!(f, "{var} must be a non-negative integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
