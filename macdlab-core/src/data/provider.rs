//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over data sources (Yahoo Finance, CSV
//! files, synthetic walks) so we can swap implementations and mock for tests.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raw daily bar from a data provider, before validation.
///
/// Price fields are optional because providers report gaps as nulls or blank
/// cells; validation decides what a gap means.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<u64>,
}

impl RawBar {
    /// Raw bar with every field present.
    pub fn complete(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            date,
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close: Some(close),
            volume: Some(volume),
        }
    }

    /// True when the provider reported nothing at all for the row.
    pub fn is_blank(&self) -> bool {
        self.open.is_none()
            && self.high.is_none()
            && self.low.is_none()
            && self.close.is_none()
            && self.volume.is_none()
    }
}

/// Structured error types for data operations.
///
/// These are designed to be displayable in both CLI output and logs.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("hard stop: data provider has blocked requests (circuit breaker tripped)")]
    CircuitBreakerTripped,

    #[error("no data file for symbol '{symbol}' at {path}")]
    NoDataFile { symbol: String, path: String },

    #[error("invalid symbol '{symbol}' for a data file name")]
    InvalidSymbol { symbol: String },

    #[error("csv error: {0}")]
    Csv(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("data error: {0}")]
    Other(String),
}

impl From<csv::Error> for DataError {
    fn from(e: csv::Error) -> Self {
        DataError::Csv(e.to_string())
    }
}

/// Result of a successful data fetch for a single symbol.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub symbol: String,
    /// Display name of the instrument, when the source knows it.
    pub name: Option<String>,
    pub bars: Vec<RawBar>,
    pub source: DataSource,
}

/// Where the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    YahooFinance,
    CsvImport,
    Synthetic,
}

/// Trait for data providers (Yahoo Finance, CSV import, etc).
///
/// Implementations handle the specifics of fetching data from a particular
/// source. A call may block; any timeout is the provider's own policy.
pub trait DataProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily OHLCV bars for a symbol over a date range (inclusive).
    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate)
        -> Result<FetchResult, DataError>;

    /// Check if the provider is currently available (not rate-limited, not blocked).
    fn is_available(&self) -> bool {
        true
    }
}

/// How far back from the end date to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Lookback {
    Days(u32),
    Months(u32),
}

impl Default for Lookback {
    fn default() -> Self {
        Lookback::Months(1)
    }
}

impl Lookback {
    /// First date of the window ending at `end`.
    pub fn start_for(&self, end: NaiveDate) -> NaiveDate {
        match *self {
            Lookback::Days(n) => end
                .checked_sub_signed(chrono::Duration::days(i64::from(n)))
                .unwrap_or(NaiveDate::MIN),
            Lookback::Months(n) => end
                .checked_sub_months(Months::new(n))
                .unwrap_or(NaiveDate::MIN),
        }
    }
}

/// A lookback string that is not `<n>d`, `<n>mo` or `<n>y`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid lookback '{0}' (expected e.g. 30d, 1mo, 1y)")]
pub struct LookbackParseError(pub String);

impl FromStr for Lookback {
    type Err = LookbackParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_ascii_lowercase();
        let split = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| LookbackParseError(s.to_string()))?;
        let (digits, unit) = trimmed.split_at(split);
        let n: u32 = digits
            .parse()
            .map_err(|_| LookbackParseError(s.to_string()))?;
        if n == 0 {
            return Err(LookbackParseError(s.to_string()));
        }
        match unit {
            "d" => Ok(Lookback::Days(n)),
            "mo" => Ok(Lookback::Months(n)),
            "y" => n
                .checked_mul(12)
                .map(Lookback::Months)
                .ok_or_else(|| LookbackParseError(s.to_string())),
            _ => Err(LookbackParseError(s.to_string())),
        }
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookback::Days(n) => write!(f, "{n}d"),
            Lookback::Months(n) => write!(f, "{n}mo"),
        }
    }
}

impl TryFrom<String> for Lookback {
    type Error = LookbackParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Lookback> for String {
    fn from(l: Lookback) -> Self {
        l.to_string()
    }
}
