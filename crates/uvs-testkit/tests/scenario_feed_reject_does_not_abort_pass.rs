use chrono::NaiveDate;
use uvs_feed::SubscriptionSet;
use uvs_securities::{SecurityRegistry, UniverseSettings};
use uvs_testkit::{coarse, usa_key, RejectingFeed, StubOrders, DOLLAR};
use uvs_universe::{PassError, SelectionEngine, SubscriptionLimits, TopDollarVolume};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
}

/// A rejected add is surfaced as a per-instrument error; the other
/// candidates in the same pass are still admitted.
#[test]
fn rejected_add_is_reported_and_pass_continues() {
    let settings = UniverseSettings::default();
    let mut feed = RejectingFeed::new(SubscriptionSet::new()).reject_add_for(usa_key("MSFT"));
    let mut registry = SecurityRegistry::new();

    let engine = SelectionEngine::new(settings, SubscriptionLimits::default())
        .with_selection_function(Box::new(TopDollarVolume::new(3)));

    let candidates = vec![
        coarse("AAPL", 185 * DOLLAR, 50_000),
        coarse("MSFT", 370 * DOLLAR, 40_000),
        coarse("NVDA", 495 * DOLLAR, 30_000),
    ];

    let report = engine.apply_universe_selection(
        date(),
        &candidates,
        &mut feed,
        &mut registry,
        &StubOrders::none(),
    );

    // All three are in-universe; one add physically failed.
    assert_eq!(report.changes.added.len(), 3);
    assert_eq!(report.errors.len(), 1);
    assert!(matches!(
        &report.errors[0],
        PassError::FeedRejectedAdd { key, .. } if *key == usa_key("MSFT")
    ));

    assert!(feed.inner().contains(&usa_key("AAPL")));
    assert!(!feed.inner().contains(&usa_key("MSFT")));
    assert!(feed.inner().contains(&usa_key("NVDA")));
}
