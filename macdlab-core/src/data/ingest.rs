//! Ingest pipeline: raw provider rows → validated PriceSeries.
//!
//! 1. Drop rows where every field is null (holidays, non-trading days)
//! 2. Require open/high/low/close on every remaining row
//! 3. Missing volume counts as zero
//! 4. Hand the bars to `PriceSeries::new`, which enforces non-empty,
//!    strictly increasing dates and finite non-negative prices
//!
//! Rows are never re-sorted or de-duplicated: an out-of-order provider
//! response is a malformed series, not something to silently repair.

use crate::domain::{Bar, PriceSeries, SeriesError};

use super::provider::RawBar;

pub fn ingest(symbol: &str, raw: Vec<RawBar>) -> Result<PriceSeries, SeriesError> {
    let bars = raw
        .into_iter()
        .filter(|r| !r.is_blank())
        .map(to_bar)
        .collect::<Result<Vec<_>, _>>()?;
    PriceSeries::new(symbol, bars)
}

fn to_bar(raw: RawBar) -> Result<Bar, SeriesError> {
    let date = raw.date;
    let close = raw.close.ok_or(SeriesError::MissingClose { date })?;
    let require = |value: Option<f64>, field: &'static str| {
        value.ok_or(SeriesError::MissingField { date, field })
    };
    Ok(Bar {
        date,
        open: require(raw.open, "open")?,
        high: require(raw.high, "high")?,
        low: require(raw.low, "low")?,
        close,
        volume: raw.volume.unwrap_or(0),
    })
}
