//! uvs-coarse
//!
//! Dated coarse-snapshot retrieval: the candidate source for universe
//! selection.
//!
//! This crate owns only the on-disk decoding of daily candidate files.
//! It does **not** rank candidates, touch subscriptions, or know about
//! the selection engine.
//!
//! Storage layout: `<root>/<market>/<YYYYMMDD>.csv` with rows
//! `symbol,price,volume,dollar_volume`. Prices are decimal strings and
//! are converted to integer micros without floating point.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::warn;
use uvs_schemas::InstrumentKey;

mod micros;

pub use micros::{price_to_micros, MicrosError};

/// One candidate instrument from a coarse daily snapshot.
///
/// Ephemeral: valid only for the duration of one selection pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoarseCandidate {
    pub key: InstrumentKey,
    /// Last price in micros.
    pub price_micros: i64,
    /// Day volume (shares / contracts).
    pub volume: i64,
    /// Day dollar volume in micros.
    pub dollar_volume_micros: i64,
}

/// Fetch the full candidate snapshot recorded for `date` in `market`.
///
/// - In live mode the session date is today's date in the market timezone
///   and the `date` argument is ignored.
/// - A missing day file yields an empty snapshot, not an error: selection
///   degrades gracefully to "no candidates".
/// - Rows that fail to decode are skipped with a warning.
pub fn fetch_coarse(
    root: &Path,
    market: &str,
    tz: Tz,
    date: NaiveDate,
    live: bool,
) -> Result<Vec<CoarseCandidate>> {
    let session_date = if live {
        Utc::now().with_timezone(&tz).date_naive()
    } else {
        date
    };

    let market = market.to_ascii_lowercase();
    let path = root
        .join(&market)
        .join(format!("{}.csv", session_date.format("%Y%m%d")));

    if !path.exists() {
        warn!(
            market = market.as_str(),
            date = %session_date,
            path = %path.display(),
            "no coarse data for date; returning empty snapshot"
        );
        return Ok(Vec::new());
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(&path)
        .with_context(|| format!("open coarse csv: {}", path.display()))?;

    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec.with_context(|| format!("read coarse csv: {}", path.display()))?;
        match decode_row(&rec, &market) {
            Ok(candidate) => out.push(candidate),
            Err(e) => {
                warn!(
                    market = market.as_str(),
                    line = line + 1,
                    error = %e,
                    "skipping undecodable coarse row"
                );
            }
        }
    }

    Ok(out)
}

fn decode_row(rec: &csv::StringRecord, market: &str) -> Result<CoarseCandidate> {
    let symbol = rec
        .get(0)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .context("missing symbol")?;
    let price = rec.get(1).context("missing price")?;
    let volume = rec.get(2).context("missing volume")?;
    let dollar_volume = rec.get(3).context("missing dollar_volume")?;

    Ok(CoarseCandidate {
        key: InstrumentKey::new(symbol, market),
        price_micros: price_to_micros(price, "price")?,
        volume: volume
            .trim()
            .parse::<i64>()
            .with_context(|| format!("parse volume: '{volume}'"))?,
        dollar_volume_micros: price_to_micros(dollar_volume, "dollar_volume")?,
    })
}
