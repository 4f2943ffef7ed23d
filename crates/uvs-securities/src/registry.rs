use std::collections::BTreeMap;

use uvs_schemas::{InstrumentKey, Resolution};

use crate::cache::DataCache;
use crate::settings::UniverseSettings;

/// A tradable security known to the algorithm.
///
/// Created lazily on first admission to the universe and kept for the
/// life of the algorithm even if later deselected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Security {
    pub key: InstrumentKey,
    pub resolution: Resolution,
    /// Leverage in micros (2_000_000 = 2.0x).
    pub leverage_micros: i64,
    pub fill_forward: bool,
    pub extended_market_hours: bool,
    /// Signed held quantity. Nonzero means the security is pinned.
    holdings_qty: i64,
    /// Recent data window; reset only on full subscription teardown.
    pub cache: DataCache,
}

impl Security {
    pub fn new(key: InstrumentKey, settings: &UniverseSettings) -> Self {
        Self {
            key,
            resolution: settings.resolution,
            leverage_micros: settings.leverage_micros,
            fill_forward: settings.fill_forward,
            extended_market_hours: settings.extended_market_hours,
            holdings_qty: 0,
            cache: DataCache::default(),
        }
    }

    pub fn holdings_qty(&self) -> i64 {
        self.holdings_qty
    }

    /// True when the security currently holds a nonzero position.
    pub fn holds_position(&self) -> bool {
        self.holdings_qty != 0
    }

    pub fn set_holdings_qty(&mut self, qty_signed: i64) {
        self.holdings_qty = qty_signed;
    }
}

/// Registry errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    AlreadyRegistered { key: InstrumentKey },
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::AlreadyRegistered { key } => {
                write!(f, "security already registered: {key}")
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// The algorithm's registry of known securities, keyed by instrument.
///
/// Iteration order is key order (deterministic).
#[derive(Debug, Clone, Default)]
pub struct SecurityRegistry {
    securities: BTreeMap<InstrumentKey, Security>,
}

impl SecurityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_get(&self, key: &InstrumentKey) -> Option<&Security> {
        self.securities.get(key)
    }

    pub fn try_get_mut(&mut self, key: &InstrumentKey) -> Option<&mut Security> {
        self.securities.get_mut(key)
    }

    pub fn contains(&self, key: &InstrumentKey) -> bool {
        self.securities.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.securities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.securities.is_empty()
    }

    /// Count securities at `resolution` that currently hold a position.
    ///
    /// These occupy subscription capacity whether or not a new selection
    /// includes them, because they cannot be safely dropped.
    pub fn count_held_at_resolution(&self, resolution: Resolution) -> usize {
        self.securities
            .values()
            .filter(|s| s.resolution == resolution && s.holds_position())
            .count()
    }

    /// Factory entry point: construct and register a security with the
    /// universe-wide defaults. Fails if the key is already registered;
    /// callers are expected to `try_get` first and reuse.
    pub fn create_security(
        &mut self,
        key: InstrumentKey,
        settings: &UniverseSettings,
    ) -> Result<&mut Security, RegistryError> {
        if self.securities.contains_key(&key) {
            return Err(RegistryError::AlreadyRegistered { key });
        }
        let security = Security::new(key.clone(), settings);
        Ok(self.securities.entry(key).or_insert(security))
    }

    /// Reset a security's data cache. Returns false if the key is unknown.
    pub fn reset_cache(&mut self, key: &InstrumentKey) -> bool {
        match self.securities.get_mut(key) {
            Some(s) => {
                s.cache.reset();
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&InstrumentKey, &Security)> {
        self.securities.iter()
    }
}
