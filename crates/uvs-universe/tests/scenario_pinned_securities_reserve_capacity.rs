use chrono::NaiveDate;
use uvs_coarse::CoarseCandidate;
use uvs_feed::{DataFeed, Subscription, SubscriptionSet};
use uvs_schemas::{InstrumentKey, Resolution};
use uvs_securities::{SecurityRegistry, UniverseSettings};
use uvs_universe::{NoOpenOrders, SelectionEngine, SubscriptionLimits, TopDollarVolume};

fn key(sym: &str) -> InstrumentKey {
    InstrumentKey::new(sym, "usa")
}

fn candidate(sym: &str, dollar_volume_micros: i64) -> CoarseCandidate {
    CoarseCandidate {
        key: key(sym),
        price_micros: 100_000_000,
        volume: 1_000,
        dollar_volume_micros,
    }
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
}

/// Capacity 3 with 2 pinned securities leaves an effective limit of 1:
/// the selector's 5 ranked candidates collapse to exactly 1 admission,
/// and an existing non-held, non-selected subscription becomes a removal.
#[test]
fn pinned_securities_reserve_capacity_first() {
    let settings = UniverseSettings {
        resolution: Resolution::Tick,
        ..UniverseSettings::default()
    };
    let limits = SubscriptionLimits {
        tick: 3,
        ..SubscriptionLimits::default()
    };

    let mut registry = SecurityRegistry::new();
    let mut feed = SubscriptionSet::new();

    // Two held (pinned) securities, currently subscribed.
    for sym in ["AAPL", "MSFT"] {
        registry.create_security(key(sym), &settings).unwrap();
        registry.try_get_mut(&key(sym)).unwrap().set_holdings_qty(5);
        feed.add_subscription(Subscription::universe(
            key(sym),
            Resolution::Tick,
            date(),
            settings.end_date,
        ))
        .unwrap();
    }

    // One existing subscription with no position and no open orders.
    registry.create_security(key("IBM"), &settings).unwrap();
    feed.add_subscription(Subscription::universe(
        key("IBM"),
        Resolution::Tick,
        date(),
        settings.end_date,
    ))
    .unwrap();

    let engine = SelectionEngine::new(settings, limits)
        .with_selection_function(Box::new(TopDollarVolume::new(5)));

    let candidates = vec![
        candidate("NVDA", 9_000),
        candidate("GOOG", 8_000),
        candidate("AMZN", 7_000),
        candidate("META", 6_000),
        candidate("TSLA", 5_000),
    ];

    let report =
        engine.apply_universe_selection(date(), &candidates, &mut feed, &mut registry, &NoOpenOrders);

    // Effective limit 1: only the top-ranked candidate is admitted.
    assert_eq!(report.changes.added, vec![key("NVDA")]);

    // Held securities are protected; the unprotected non-selected
    // subscription is removed. All three are reported as out of universe.
    assert_eq!(
        report.changes.removed,
        vec![key("AAPL"), key("IBM"), key("MSFT")]
    );
    assert!(feed.contains(&key("AAPL")));
    assert!(feed.contains(&key("MSFT")));
    assert!(!feed.contains(&key("IBM")));
    assert!(feed.contains(&key("NVDA")));

    assert!(report.errors.is_empty());
}
