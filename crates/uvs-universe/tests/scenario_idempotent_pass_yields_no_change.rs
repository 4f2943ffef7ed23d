use chrono::NaiveDate;
use uvs_coarse::CoarseCandidate;
use uvs_feed::{Subscription, SubscriptionSet};
use uvs_feed::DataFeed;
use uvs_schemas::InstrumentKey;
use uvs_securities::{SecurityRegistry, UniverseSettings};
use uvs_universe::{NoOpenOrders, SecurityChanges, SelectionEngine, SubscriptionLimits};

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

fn select_all_engine() -> SelectionEngine {
    SelectionEngine::new(UniverseSettings::default(), SubscriptionLimits::default())
        .with_selection_function(Box::new(|cs: &[CoarseCandidate]| -> Vec<InstrumentKey> {
            cs.iter().map(|c| c.key.clone()).collect()
        }))
}

#[test]
fn second_identical_pass_is_the_canonical_no_change() {
    let engine = select_all_engine();
    let mut feed = SubscriptionSet::new();
    let mut registry = SecurityRegistry::new();
    let candidates = vec![candidate("AAPL", 9_000), candidate("MSFT", 8_000)];

    let first = engine.apply_universe_selection(
        date(),
        &candidates,
        &mut feed,
        &mut registry,
        &NoOpenOrders,
    );
    assert_eq!(first.changes.count(), 2);

    let second = engine.apply_universe_selection(
        date(),
        &candidates,
        &mut feed,
        &mut registry,
        &NoOpenOrders,
    );
    assert_eq!(second.changes, SecurityChanges::NONE);
    assert!(second.changes.is_none());
    assert!(second.skipped.is_none());
    assert!(second.errors.is_empty());
}

#[test]
fn selection_matching_current_subscriptions_is_no_change() {
    let engine = select_all_engine();
    let settings = UniverseSettings::default();
    let mut feed = SubscriptionSet::new();
    let mut registry = SecurityRegistry::new();

    for sym in ["AAPL", "MSFT"] {
        registry.create_security(key(sym), &settings).unwrap();
        feed.add_subscription(Subscription::universe(
            key(sym),
            settings.resolution,
            date(),
            settings.end_date,
        ))
        .unwrap();
    }

    let candidates = vec![candidate("AAPL", 9_000), candidate("MSFT", 8_000)];
    let report = engine.apply_universe_selection(
        date(),
        &candidates,
        &mut feed,
        &mut registry,
        &NoOpenOrders,
    );

    assert_eq!(report.changes, SecurityChanges::NONE);
    assert_eq!(feed.len(), 2);
}
