//! uvs-schemas
//!
//! Shared identity types for the universe-selection workspace.
//!
//! This crate owns only the vocabulary every other crate speaks:
//! instrument identity (`InstrumentKey`) and data resolution
//! (`Resolution`). No registries, no engine logic, no IO.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Micros scale (1e-6) used for prices and currency where needed.
pub const MICROS_SCALE: i64 = 1_000_000;

/// Data delivery resolution for a subscription.
///
/// Canonical user-facing values:
/// - `tick`
/// - `second`
/// - `minute`
/// - `hour`
/// - `daily`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Tick,
    Second,
    Minute,
    Hour,
    Daily,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Tick => "tick",
            Resolution::Second => "second",
            Resolution::Minute => "minute",
            Resolution::Hour => "hour",
            Resolution::Daily => "daily",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tick" => Ok(Resolution::Tick),
            "second" | "1s" => Ok(Resolution::Second),
            "minute" | "1m" => Ok(Resolution::Minute),
            "hour" | "1h" => Ok(Resolution::Hour),
            "daily" | "1d" => Ok(Resolution::Daily),
            other => Err(anyhow!(
                "invalid resolution '{}'. expected one of: tick | second | minute | hour | daily",
                other
            )),
        }
    }
}

/// Unique identity of an instrument-in-market.
///
/// Two subscriptions with the same key are the same logical instrument;
/// identity is never by display name. `Ord` is derived so key-indexed
/// registries (`BTreeMap`) iterate deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstrumentKey {
    pub symbol: String,
    /// Lowercase market identifier (e.g. `"usa"`).
    pub market: String,
}

impl InstrumentKey {
    pub fn new(symbol: impl Into<String>, market: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            market: market.into().to_ascii_lowercase(),
        }
    }
}

impl std::fmt::Display for InstrumentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.symbol, self.market)
    }
}
