use std::collections::BTreeSet;

use chrono::NaiveDate;
use uvs_coarse::CoarseCandidate;
use uvs_feed::{DataFeed, Subscription};
use uvs_schemas::InstrumentKey;
use uvs_securities::{SecurityRegistry, UniverseSettings};

use crate::limits::SubscriptionLimits;
use crate::report::{PassError, SecurityChanges, SelectionReport, SkipReason};
use crate::selection::SelectionFunction;

/// Error from the order subsystem while answering "has open orders".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderQueryError {
    pub message: String,
}

impl OrderQueryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for OrderQueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order query failed: {}", self.message)
    }
}

impl std::error::Error for OrderQueryError {}

/// Order-subsystem boundary: the engine only asks whether an instrument
/// has outstanding open orders. A query error is treated as "protected"
/// by the engine (fail-closed).
pub trait OpenOrderSource {
    fn has_open_orders(&self, key: &InstrumentKey) -> Result<bool, OrderQueryError>;
}

/// Order source for fresh state: reports no open orders for any key.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpenOrders;

impl OpenOrderSource for NoOpenOrders {
    fn has_open_orders(&self, _key: &InstrumentKey) -> Result<bool, OrderQueryError> {
        Ok(false)
    }
}

/// The universe-selection engine.
///
/// One pass: compute the admission limit, invoke the selection function,
/// diff its output against the live subscription set, tear down what can
/// safely go, admit what is new, and report the change-set.
pub struct SelectionEngine {
    settings: UniverseSettings,
    limits: SubscriptionLimits,
    selector: Option<Box<dyn SelectionFunction>>,
}

impl SelectionEngine {
    /// An engine with no selection function: every pass is a no-op until
    /// a selector is supplied.
    pub fn new(settings: UniverseSettings, limits: SubscriptionLimits) -> Self {
        Self {
            settings,
            limits,
            selector: None,
        }
    }

    pub fn with_selection_function(mut self, selector: Box<dyn SelectionFunction>) -> Self {
        self.selector = Some(selector);
        self
    }

    pub fn set_selection_function(&mut self, selector: Box<dyn SelectionFunction>) {
        self.selector = Some(selector);
    }

    pub fn settings(&self) -> &UniverseSettings {
        &self.settings
    }

    pub fn limits(&self) -> &SubscriptionLimits {
        &self.limits
    }

    /// Run one selection pass for `date` over `candidates`.
    ///
    /// Precondition: the caller must hold the engine's synchronization
    /// point — no data dispatch may be in flight against `feed` or
    /// `registry` for the duration of this call. The engine performs no
    /// internal locking.
    ///
    /// Individual add/remove failures are collected in the report and do
    /// not abort the remainder of the pass; there is no transactional
    /// rollback across the set.
    pub fn apply_universe_selection(
        &self,
        date: NaiveDate,
        candidates: &[CoarseCandidate],
        feed: &mut dyn DataFeed,
        registry: &mut SecurityRegistry,
        orders: &dyn OpenOrderSource,
    ) -> SelectionReport {
        let selector = match &self.selector {
            Some(s) => s,
            None => return SelectionReport::skipped(SkipReason::NoSelectionFunction),
        };

        let resolution = self.settings.resolution;
        let pinned = registry.count_held_at_resolution(resolution);
        let limit = self.limits.effective_limit(resolution, pinned);
        if limit == Some(0) {
            // Short-circuit before the selection function runs: no side
            // effects may occur when there is no capacity.
            return SelectionReport::skipped(SkipReason::NoCapacity { resolution, pinned });
        }

        let mut selected = selector.select(candidates);
        if let Some(limit) = limit {
            // Literal truncation-after-ranking: the selector owns the
            // ordering, the engine only takes a prefix.
            selected.truncate(limit);
        }

        let selected_keys: BTreeSet<&InstrumentKey> = selected.iter().collect();
        let active = feed.active_subscriptions();
        let existing_keys: BTreeSet<&InstrumentKey> = active.iter().map(|s| &s.key).collect();

        let mut errors: Vec<PassError> = Vec::new();

        // Removal candidates, in subscription-registry order.
        let mut removed: Vec<InstrumentKey> = Vec::new();
        for sub in &active {
            if sub.user_defined || sub.internal {
                continue;
            }
            if selected_keys.contains(&sub.key) {
                continue;
            }

            // No longer in universe, regardless of what happens
            // physically below.
            removed.push(sub.key.clone());

            if self.is_protected(&sub.key, registry, orders, &mut errors) {
                // Retained live: a position or open order without a
                // price feed is categorically worse than a stale
                // subscription.
                continue;
            }

            // The only path that destroys a subscription.
            registry.reset_cache(&sub.key);
            if let Err(e) = feed.remove_subscription(&sub.key) {
                errors.push(PassError::FeedRejectedRemove {
                    key: sub.key.clone(),
                    message: e.to_string(),
                });
            }
        }

        // Addition candidates, in selection-output order.
        let mut added: Vec<InstrumentKey> = Vec::new();
        let mut admitted: BTreeSet<&InstrumentKey> = BTreeSet::new();
        for key in &selected {
            if existing_keys.contains(key) || !admitted.insert(key) {
                continue;
            }

            if registry.try_get(key).is_none() {
                if let Err(e) = registry.create_security(key.clone(), &self.settings) {
                    errors.push(PassError::FactoryFailure {
                        key: key.clone(),
                        message: e.to_string(),
                    });
                    continue;
                }
            }

            added.push(key.clone());
            let subscription =
                Subscription::universe(key.clone(), resolution, date, self.settings.end_date);
            if let Err(e) = feed.add_subscription(subscription) {
                errors.push(PassError::FeedRejectedAdd {
                    key: key.clone(),
                    message: e.to_string(),
                });
            }
        }

        let changes = if added.is_empty() && removed.is_empty() {
            SecurityChanges::NONE
        } else {
            SecurityChanges { added, removed }
        };

        SelectionReport {
            changes,
            skipped: None,
            errors,
        }
    }

    /// True when the subscription for `key` must not be physically
    /// removed. Any failure to evaluate the check counts as protected:
    /// false negatives here would orphan live risk.
    fn is_protected(
        &self,
        key: &InstrumentKey,
        registry: &SecurityRegistry,
        orders: &dyn OpenOrderSource,
        errors: &mut Vec<PassError>,
    ) -> bool {
        match registry.try_get(key) {
            Some(security) if security.holds_position() => return true,
            Some(_) => {}
            None => {
                errors.push(PassError::ProtectionCheckFailed {
                    key: key.clone(),
                    message: "security not registered; cannot evaluate holdings".to_string(),
                });
                return true;
            }
        }

        match orders.has_open_orders(key) {
            Ok(open) => open,
            Err(e) => {
                errors.push(PassError::ProtectionCheckFailed {
                    key: key.clone(),
                    message: e.to_string(),
                });
                true
            }
        }
    }
}
