//! Bar and PriceSeries: the fundamental market data units.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// OHLCV bar for a single symbol on a single day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Bar {
    /// True if the bar closed at or above its open.
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

/// Reasons a sequence of bars cannot form a [`PriceSeries`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("series is empty")]
    Empty,

    #[error("dates not strictly increasing at index {index}: {date} follows {previous}")]
    NonIncreasingDates {
        index: usize,
        previous: NaiveDate,
        date: NaiveDate,
    },

    #[error("bar on {date} is missing its close price")]
    MissingClose { date: NaiveDate },

    #[error("bar on {date} is missing its {field} price")]
    MissingField { date: NaiveDate, field: &'static str },

    #[error("bar on {date} has invalid {field} value {value}")]
    InvalidValue {
        date: NaiveDate,
        field: &'static str,
        value: f64,
    },
}

/// Ordered daily bars for one symbol.
///
/// Only constructible through [`PriceSeries::new`], so every value holds at
/// least one bar and strictly increasing dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<Bar>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Result<Self, SeriesError> {
        if bars.is_empty() {
            return Err(SeriesError::Empty);
        }

        for bar in &bars {
            for (field, value) in [
                ("open", bar.open),
                ("high", bar.high),
                ("low", bar.low),
                ("close", bar.close),
            ] {
                if !value.is_finite() || value < 0.0 {
                    return Err(SeriesError::InvalidValue {
                        date: bar.date,
                        field,
                        value,
                    });
                }
            }
        }

        for (i, pair) in bars.windows(2).enumerate() {
            if pair[1].date <= pair[0].date {
                return Err(SeriesError::NonIncreasingDates {
                    index: i + 1,
                    previous: pair[0].date,
                    date: pair[1].date,
                });
            }
        }

        Ok(Self {
            symbol: symbol.into(),
            bars,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn last(&self) -> &Bar {
        &self.bars[self.bars.len() - 1]
    }
}
