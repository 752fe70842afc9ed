//! Boundary to the external chart source.
//!
//! The engine never computes pillars from a civil date itself; a
//! [`PillarOracle`] implementation (astronomical service, lookup table, test
//! fixture) owns that conversion and any error it produces is fatal for the
//! request that needed it.

use super::Chart;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TIMEZONE: &str = "Asia/Seoul";

/// Civil birth moment handed to the oracle. The time is optional; charts
/// derived without it have no hour pillar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthInput {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub timezone: String,
}

impl BirthInput {
    pub fn new(date: NaiveDate, time: Option<NaiveTime>) -> BirthInput {
        BirthInput {
            date,
            time,
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> BirthInput {
        let timezone = timezone.into();
        if !timezone.is_empty() {
            self.timezone = timezone;
        }
        self
    }

    /// Lenient request-side parse: `YYYY-MM-DD` plus an optional `HH:MM`
    /// time, where an empty string or `"unknown"` means no birth time.
    pub fn parse(date: &str, time: &str) -> Result<BirthInput, BirthInputError> {
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|_| BirthInputError::Date(date.to_string()))?;
        let time = match time.trim() {
            "" | "unknown" => None,
            raw => Some(
                NaiveTime::parse_from_str(raw, "%H:%M")
                    .map_err(|_| BirthInputError::Time(raw.to_string()))?,
            ),
        };
        Ok(BirthInput::new(date, time))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BirthInputError {
    #[error("invalid birth date {0:?} (expected YYYY-MM-DD)")]
    Date(String),
    #[error("invalid birth time {0:?} (expected HH:MM or \"unknown\")")]
    Time(String),
}

/// External source of the four pillars for a birth moment.
pub trait PillarOracle: Send + Sync {
    fn pillars_from_birth(&self, birth: &BirthInput) -> Result<Chart, OracleError>;
}

/// Failure at the chart-source boundary; the engine treats every variant as
/// fatal for the requesting call.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("invalid birth input: {0}")]
    InvalidBirth(String),
    #[error("pillar source unavailable: {0}")]
    Unavailable(String),
}
