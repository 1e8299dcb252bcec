//! Derived per-bar views of a price series: returns, variation, candles.
//!
//! Every view has one entry per bar. The first bar has no predecessor, so
//! its day-over-day values are `None`.

use chrono::NaiveDate;
use serde::Serialize;

use macdlab_core::domain::PriceSeries;

/// A day-over-day change; `None` when there is no prior bar to compare to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyChange {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// Candlestick OHLC for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub bullish: bool,
}

fn day_over_day(series: &PriceSeries, f: impl Fn(f64, f64) -> Option<f64>) -> Vec<DailyChange> {
    let bars = series.bars();
    std::iter::once(DailyChange {
        date: bars[0].date,
        value: None,
    })
    .chain(bars.windows(2).map(|w| DailyChange {
        date: w[1].date,
        value: f(w[0].close, w[1].close),
    }))
    .collect()
}

/// Percentage change of the close, e.g. `2.5` for +2.5%.
///
/// A zero previous close has no defined return and yields `None`.
pub fn daily_returns(series: &PriceSeries) -> Vec<DailyChange> {
    day_over_day(series, |prev, cur| {
        (prev > 0.0).then(|| (cur - prev) / prev * 100.0)
    })
}

/// Absolute change of the close.
pub fn daily_variation(series: &PriceSeries) -> Vec<DailyChange> {
    day_over_day(series, |prev, cur| Some(cur - prev))
}

pub fn candles(series: &PriceSeries) -> Vec<Candle> {
    series
        .bars()
        .iter()
        .map(|b| Candle {
            date: b.date,
            open: b.open,
            high: b.high,
            low: b.low,
            close: b.close,
            bullish: b.is_bullish(),
        })
        .collect()
}
