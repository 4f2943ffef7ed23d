use chrono::NaiveDate;
use uvs_coarse::fetch_coarse;
use uvs_feed::SubscriptionSet;
use uvs_securities::{SecurityRegistry, UniverseSettings};
use uvs_testkit::{usa_key, write_coarse_day, StubOrders};
use uvs_universe::{SelectionEngine, SubscriptionLimits, TopDollarVolume};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
}

const TZ: chrono_tz::Tz = chrono_tz::America::New_York;

/// Full path: write a coarse day file, fetch the snapshot, run a
/// top-2-by-dollar-volume pass against a fresh feed.
#[test]
fn coarse_store_drives_a_selection_pass() {
    let dir = tempfile::tempdir().unwrap();
    write_coarse_day(
        dir.path(),
        "usa",
        date(),
        &[
            ("AAPL", "185.64", 58_414_500, "10843200000"),
            ("MSFT", "370.87", 25_258_600, "9370100000"),
            ("TINY", "2.05", 12_000, "24600"),
        ],
    )
    .unwrap();

    let candidates = fetch_coarse(dir.path(), "usa", TZ, date(), false).unwrap();
    assert_eq!(candidates.len(), 3);

    let engine = SelectionEngine::new(
        UniverseSettings::default(),
        SubscriptionLimits::default(),
    )
    .with_selection_function(Box::new(TopDollarVolume::new(2)));

    let mut feed = SubscriptionSet::new();
    let mut registry = SecurityRegistry::new();
    let report = engine.apply_universe_selection(
        date(),
        &candidates,
        &mut feed,
        &mut registry,
        &StubOrders::none(),
    );

    assert_eq!(
        report.changes.added,
        vec![usa_key("AAPL"), usa_key("MSFT")]
    );
    assert!(report.changes.removed.is_empty());
    assert!(!feed.contains(&usa_key("TINY")));

    // Missing next day degrades to no candidates and a no-change pass.
    let next_day = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
    let empty = fetch_coarse(dir.path(), "usa", TZ, next_day, false).unwrap();
    assert!(empty.is_empty());
    let report = engine.apply_universe_selection(
        next_day,
        &empty,
        &mut feed,
        &mut registry,
        &StubOrders::none(),
    );
    // Everything drops out of universe (nothing selected, nothing held).
    assert_eq!(report.changes.removed.len(), 2);
    assert!(feed.is_empty());
}
