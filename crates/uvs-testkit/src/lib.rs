//! uvs-testkit
//!
//! Scenario-test fixtures for the universe-selection workspace: seeded
//! feeds and registries, stub order sources, a rejecting feed wrapper,
//! and coarse-store writers. Test support only; never a production
//! dependency.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use uvs_coarse::CoarseCandidate;
use uvs_feed::{DataFeed, FeedError, Subscription, SubscriptionSet};
use uvs_schemas::{InstrumentKey, MICROS_SCALE};
use uvs_securities::{SecurityRegistry, UniverseSettings};
use uvs_universe::{OpenOrderSource, OrderQueryError};

/// Key in the default test market.
pub fn usa_key(symbol: &str) -> InstrumentKey {
    InstrumentKey::new(symbol, "usa")
}

/// A coarse candidate with dollar volume derived from price * volume.
pub fn coarse(symbol: &str, price_micros: i64, volume: i64) -> CoarseCandidate {
    CoarseCandidate {
        key: usa_key(symbol),
        price_micros,
        volume,
        dollar_volume_micros: price_micros.saturating_mul(volume),
    }
}

/// Feed and registry pre-seeded with plain universe subscriptions for
/// `symbols`, all at the settings' resolution.
pub fn seeded_universe(
    symbols: &[&str],
    settings: &UniverseSettings,
    start_date: NaiveDate,
) -> (SubscriptionSet, SecurityRegistry) {
    let mut feed = SubscriptionSet::new();
    let mut registry = SecurityRegistry::new();
    for sym in symbols {
        registry
            .create_security(usa_key(sym), settings)
            .expect("unique test symbols");
        feed.add_subscription(Subscription::universe(
            usa_key(sym),
            settings.resolution,
            start_date,
            settings.end_date,
        ))
        .expect("unique test symbols");
    }
    (feed, registry)
}

/// Order source answering from a fixed set of keys with open orders.
#[derive(Debug, Clone, Default)]
pub struct StubOrders {
    open: BTreeSet<InstrumentKey>,
}

impl StubOrders {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_open(keys: impl IntoIterator<Item = InstrumentKey>) -> Self {
        Self {
            open: keys.into_iter().collect(),
        }
    }
}

impl OpenOrderSource for StubOrders {
    fn has_open_orders(&self, key: &InstrumentKey) -> Result<bool, OrderQueryError> {
        Ok(self.open.contains(key))
    }
}

/// Feed wrapper that rejects add requests for configured keys, for
/// exercising per-instrument failure paths.
#[derive(Debug, Default)]
pub struct RejectingFeed {
    inner: SubscriptionSet,
    reject_adds: BTreeSet<InstrumentKey>,
}

impl RejectingFeed {
    pub fn new(inner: SubscriptionSet) -> Self {
        Self {
            inner,
            reject_adds: BTreeSet::new(),
        }
    }

    pub fn reject_add_for(mut self, key: InstrumentKey) -> Self {
        self.reject_adds.insert(key);
        self
    }

    pub fn inner(&self) -> &SubscriptionSet {
        &self.inner
    }
}

impl DataFeed for RejectingFeed {
    fn active_subscriptions(&self) -> Vec<Subscription> {
        self.inner.active_subscriptions()
    }

    fn add_subscription(&mut self, subscription: Subscription) -> Result<(), FeedError> {
        if self.reject_adds.contains(&subscription.key) {
            return Err(FeedError::Rejected {
                key: subscription.key,
                reason: "injected test rejection".to_string(),
            });
        }
        self.inner.add_subscription(subscription)
    }

    fn remove_subscription(&mut self, key: &InstrumentKey) -> Result<Subscription, FeedError> {
        self.inner.remove_subscription(key)
    }
}

/// Write a coarse day file under `root` in the on-disk store layout.
/// Rows are (symbol, price, volume, dollar_volume) decimal strings.
pub fn write_coarse_day(
    root: &Path,
    market: &str,
    date: NaiveDate,
    rows: &[(&str, &str, i64, &str)],
) -> Result<()> {
    let dir = root.join(market.to_ascii_lowercase());
    fs::create_dir_all(&dir).with_context(|| format!("create market dir: {}", dir.display()))?;
    let mut body = String::new();
    for (symbol, price, volume, dollar_volume) in rows {
        body.push_str(&format!("{symbol},{price},{volume},{dollar_volume}\n"));
    }
    let path = dir.join(format!("{}.csv", date.format("%Y%m%d")));
    fs::write(&path, body).with_context(|| format!("write coarse csv: {}", path.display()))?;
    Ok(())
}

/// One whole dollar in micros, for readable test prices.
pub const DOLLAR: i64 = MICROS_SCALE;
