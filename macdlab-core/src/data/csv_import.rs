//! CSV file provider.
//!
//! Reads `<dir>/<SYMBOL>.csv` with the usual provider export header:
//! `Date,Open,High,Low,Close,Volume`. Extra columns (Adj Close, Dividends,
//! Stock Splits) are ignored and blank cells are treated as missing. Dates
//! may be `YYYY-MM-DD` (optionally followed by a time) or `DD/MM/YYYY`.
//! A price cell that is not a number (`n/a`, `null`) is read as missing so
//! ingest can reject the bar.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use super::provider::{DataError, DataProvider, DataSource, FetchResult, RawBar};

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Open", deserialize_with = "csv::invalid_option")]
    open: Option<f64>,
    #[serde(rename = "High", deserialize_with = "csv::invalid_option")]
    high: Option<f64>,
    #[serde(rename = "Low", deserialize_with = "csv::invalid_option")]
    low: Option<f64>,
    #[serde(rename = "Close", deserialize_with = "csv::invalid_option")]
    close: Option<f64>,
    #[serde(rename = "Volume")]
    volume: Option<f64>,
}

/// Provider backed by a directory of per-symbol CSV files.
#[derive(Debug, Clone)]
pub struct CsvProvider {
    dir: PathBuf,
}

impl CsvProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File for `symbol`. Symbols that could escape `dir` are rejected.
    pub fn path_for(&self, symbol: &str) -> Result<PathBuf, DataError> {
        let escapes = symbol.is_empty()
            || symbol == "."
            || symbol == ".."
            || symbol.contains(['/', '\\'])
            || Path::new(symbol).is_absolute();
        if escapes {
            return Err(DataError::InvalidSymbol {
                symbol: symbol.to_string(),
            });
        }
        Ok(self.dir.join(format!("{symbol}.csv")))
    }

    /// Read every row of a CSV file, unfiltered.
    pub fn read_file(path: &Path) -> Result<Vec<RawBar>, DataError> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
        let mut bars = Vec::new();
        for (line, row) in reader.deserialize::<CsvRow>().enumerate() {
            let row = row?;
            bars.push(to_raw_bar(row, line + 2)?);
        }
        Ok(bars)
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let iso = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
        .ok()
}

fn to_raw_bar(row: CsvRow, line: usize) -> Result<RawBar, DataError> {
    let date = parse_date(&row.date)
        .ok_or_else(|| DataError::Csv(format!("line {line}: invalid date '{}'", row.date)))?;
    let volume = match row.volume {
        None => None,
        Some(v) if v.is_finite() && v >= 0.0 => Some(v.round() as u64),
        Some(v) => {
            return Err(DataError::Csv(format!("line {line}: invalid volume {v}")));
        }
    };
    Ok(RawBar {
        date,
        open: row.open,
        high: row.high,
        low: row.low,
        close: row.close,
        volume,
    })
}

impl DataProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        let path = self.path_for(symbol)?;
        if !path.is_file() {
            return Err(DataError::NoDataFile {
                symbol: symbol.to_string(),
                path: path.display().to_string(),
            });
        }

        let bars: Vec<RawBar> = Self::read_file(&path)?
            .into_iter()
            .filter(|b| b.date >= start && b.date <= end)
            .collect();
        debug!(symbol, path = %path.display(), bars = bars.len(), "loaded csv");

        Ok(FetchResult {
            symbol: symbol.to_string(),
            name: None,
            bars,
            source: DataSource::CsvImport,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn write_csv(dir: &Path, symbol: &str, body: &str) {
        std::fs::write(dir.join(format!("{symbol}.csv")), body).unwrap();
    }

    #[test]
    fn reads_and_filters_by_range() {
        let tmp = tempfile::tempdir().unwrap();
        write_csv(
            tmp.path(),
            "SPY",
            "Date,Open,High,Low,Close,Adj Close,Volume\n\
             2024-01-02,10,11,9,10.5,10.5,1000\n\
             2024-01-03,10.5,12,10,11.5,11.5,2000\n\
             2024-01-04,11.5,12,11,11.8,11.8,1500\n",
        );
        let provider = CsvProvider::new(tmp.path());
        let result = provider.fetch("SPY", date(1, 3), date(1, 31)).unwrap();
        assert_eq!(result.source, DataSource::CsvImport);
        assert_eq!(result.bars.len(), 2);
        assert_eq!(result.bars[0].date, date(1, 3));
        assert_eq!(result.bars[0].close, Some(11.5));
        assert_eq!(result.bars[1].volume, Some(1500));
    }

    #[test]
    fn blank_cells_are_missing() {
        let tmp = tempfile::tempdir().unwrap();
        write_csv(
            tmp.path(),
            "X",
            "Date,Open,High,Low,Close,Volume\n2024-01-02,10,11,9,,\n",
        );
        let bars = CsvProvider::read_file(&tmp.path().join("X.csv")).unwrap();
        assert_eq!(bars[0].close, None);
        assert_eq!(bars[0].volume, None);
        assert_eq!(bars[0].open, Some(10.0));
    }

    #[test]
    fn accepts_timestamped_and_day_first_dates() {
        assert_eq!(parse_date("2024-01-02 00:00:00-03:00"), Some(date(1, 2)));
        assert_eq!(parse_date("02/01/2024"), Some(date(1, 2)));
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn missing_file_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let provider = CsvProvider::new(tmp.path());
        let err = provider.fetch("NOPE", date(1, 1), date(1, 31)).unwrap_err();
        assert!(matches!(err, DataError::NoDataFile { symbol, .. } if symbol == "NOPE"));
    }

    #[test]
    fn non_numeric_price_is_missing() {
        let tmp = tempfile::tempdir().unwrap();
        write_csv(
            tmp.path(),
            "X",
            "Date,Open,High,Low,Close,Volume\n2024-01-02,10,11,9,n/a,100\n",
        );
        let bars = CsvProvider::read_file(&tmp.path().join("X.csv")).unwrap();
        assert_eq!(bars[0].close, None);
        assert_eq!(bars[0].open, Some(10.0));
        assert_eq!(bars[0].volume, Some(100));
    }

    #[test]
    fn symbols_with_path_components_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let provider = CsvProvider::new(tmp.path().join("data"));
        write_csv(tmp.path(), "outside", "Date,Open,High,Low,Close,Volume\n");
        for symbol in ["../outside", "a/b", "a\\b", "..", ""] {
            let err = provider.fetch(symbol, date(1, 1), date(1, 31)).unwrap_err();
            assert!(
                matches!(&err, DataError::InvalidSymbol { symbol: s } if s == symbol),
                "{symbol}: {err}"
            );
        }
        assert!(provider.path_for("PETR4.SA").is_ok());
    }

    #[test]
    fn bad_date_is_csv_error() {
        let tmp = tempfile::tempdir().unwrap();
        write_csv(
            tmp.path(),
            "X",
            "Date,Open,High,Low,Close,Volume\nnot-a-date,1,1,1,1,1\n",
        );
        let err = CsvProvider::read_file(&tmp.path().join("X.csv")).unwrap_err();
        assert!(matches!(err, DataError::Csv(msg) if msg.contains("line 2")));
    }
}
