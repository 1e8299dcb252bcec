//! Synthetic data provider for offline runs and tests.
//!
//! Produces a random walk from a starting price of 100.0, weekdays only. The
//! RNG is seeded from a BLAKE3 hash of the symbol, so the same symbol and
//! range always yield the same bars.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::provider::{DataError, DataProvider, DataSource, FetchResult, RawBar};

#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticProvider;

impl SyntheticProvider {
    pub fn new() -> Self {
        Self
    }

    /// Generate the walk for `symbol` between `start` and `end` inclusive.
    ///
    /// The walk always starts at 100.0 on `start`, so overlapping ranges with
    /// different starts are not continuations of each other.
    pub fn generate(symbol: &str, start: NaiveDate, end: NaiveDate) -> Vec<RawBar> {
        let seed: [u8; 32] = *blake3::hash(symbol.as_bytes()).as_bytes();
        let mut rng = StdRng::from_seed(seed);

        let mut bars = Vec::new();
        let mut price = 100.0_f64;

        for current in start.iter_days().take_while(|d| *d <= end) {
            if matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
                continue;
            }

            let daily_return: f64 = rng.gen_range(-0.03..0.03);
            let open = price;
            let close = price * (1.0 + daily_return);
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
            let volume = rng.gen_range(500_000..5_000_000u64);

            bars.push(RawBar::complete(current, open, high, low, close, volume));
            price = close;
        }

        bars
    }
}

impl DataProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        Ok(FetchResult {
            symbol: symbol.to_string(),
            name: Some(format!("{symbol} (synthetic)")),
            bars: Self::generate(symbol, start, end),
            source: DataSource::Synthetic,
        })
    }
}
