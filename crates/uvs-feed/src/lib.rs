//! uvs-feed
//!
//! The live subscription registry and the `DataFeed` boundary the
//! selection engine talks to.
//!
//! Architectural decisions:
//! - At most one active subscription per `InstrumentKey` (enforced here).
//! - Iteration over active subscriptions is key order (deterministic).
//! - The engine requests add/remove through the `DataFeed` trait; it
//!   never owns subscription storage.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uvs_schemas::{InstrumentKey, Resolution};

/// An active registration for market-data delivery for one instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub key: InstrumentKey,
    pub resolution: Resolution,
    /// Requested explicitly by the user; never removed by selection.
    pub user_defined: bool,
    /// Engine-internal feed (e.g. a benchmark); never removed by selection.
    pub internal: bool,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Subscription {
    /// A plain universe subscription (not user-defined, not internal).
    pub fn universe(
        key: InstrumentKey,
        resolution: Resolution,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            key,
            resolution,
            user_defined: false,
            internal: false,
            start_date,
            end_date,
        }
    }
}

/// Errors a data feed may return for add/remove requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// An active subscription for this key already exists.
    DuplicateSubscription { key: InstrumentKey },
    /// No active subscription for this key.
    UnknownSubscription { key: InstrumentKey },
    /// The feed refused the request (transport-specific reason).
    Rejected { key: InstrumentKey, reason: String },
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::DuplicateSubscription { key } => {
                write!(f, "duplicate subscription: {key}")
            }
            FeedError::UnknownSubscription { key } => {
                write!(f, "unknown subscription: {key}")
            }
            FeedError::Rejected { key, reason } => {
                write!(f, "feed rejected request for {key}: {reason}")
            }
        }
    }
}

impl std::error::Error for FeedError {}

/// Data-feed contract consumed by the selection engine.
///
/// Implementations must be object-safe so callers can hold a
/// `&mut dyn DataFeed` without knowing the concrete transport.
pub trait DataFeed {
    /// Snapshot of all active subscriptions, in deterministic order.
    fn active_subscriptions(&self) -> Vec<Subscription>;

    /// Register a new subscription. Fails on duplicate keys or transport
    /// rejection; the failure is per-instrument, never fatal to a pass.
    fn add_subscription(&mut self, subscription: Subscription) -> Result<(), FeedError>;

    /// Remove the subscription for `key`, returning it.
    fn remove_subscription(&mut self, key: &InstrumentKey) -> Result<Subscription, FeedError>;
}

/// In-memory subscription registry. The default feed for backtests and
/// the reference implementation of the `DataFeed` contract.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionSet {
    subscriptions: BTreeMap<InstrumentKey, Subscription>,
}

impl SubscriptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &InstrumentKey) -> bool {
        self.subscriptions.contains_key(key)
    }

    pub fn get(&self, key: &InstrumentKey) -> Option<&Subscription> {
        self.subscriptions.get(key)
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl DataFeed for SubscriptionSet {
    fn active_subscriptions(&self) -> Vec<Subscription> {
        self.subscriptions.values().cloned().collect()
    }

    fn add_subscription(&mut self, subscription: Subscription) -> Result<(), FeedError> {
        if self.subscriptions.contains_key(&subscription.key) {
            return Err(FeedError::DuplicateSubscription {
                key: subscription.key,
            });
        }
        self.subscriptions
            .insert(subscription.key.clone(), subscription);
        Ok(())
    }

    fn remove_subscription(&mut self, key: &InstrumentKey) -> Result<Subscription, FeedError> {
        self.subscriptions
            .remove(key)
            .ok_or_else(|| FeedError::UnknownSubscription { key: key.clone() })
    }
}
