//! Indicator implementations.
//!
//! Indicators are pure functions over a close series: same input, same
//! output, no hidden state. Output series are aligned index-for-index with
//! the input.

pub mod ewma;
pub mod macd;

pub use ewma::{alpha_for_span, ewma_of_series, Weighting};
pub use macd::{Macd, MacdLines, MacdParams, MacdParamsError};

/// Create a synthetic series from close prices for testing.
///
/// open = prev_close (or close for first bar), high = max(open,close) + 1.0,
/// low = max(min(open,close) - 1.0, 0.0), volume = 1000.
#[cfg(test)]
pub fn make_series(closes: &[f64]) -> crate::domain::PriceSeries {
    use crate::domain::{Bar, PriceSeries};
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: (open.min(close) - 1.0).max(0.0),
                close,
                volume: 1000,
            }
        })
        .collect();
    PriceSeries::new("TEST", bars).unwrap()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
