//! Yahoo Finance data provider.
//!
//! Fetches daily OHLCV bars from Yahoo's v8 chart API. Handles rate limiting,
//! optional retries with exponential backoff, response parsing, and the
//! circuit breaker.
//!
//! Yahoo Finance has no official API and is subject to unannounced format
//! changes. The CSV provider is the fallback when Yahoo is unavailable.

use super::circuit_breaker::CircuitBreaker;
use super::provider::{DataError, DataProvider, DataSource, FetchResult, RawBar};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://query2.finance.yahoo.com";

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: Option<ChartMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    short_name: Option<String>,
    long_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

/// Client settings for [`YahooProvider`].
#[derive(Debug, Clone)]
pub struct YahooConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Extra attempts after the first; zero means one attempt per fetch.
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 0,
            base_delay: Duration::from_millis(500),
        }
    }
}

/// Yahoo Finance data provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
    circuit_breaker: Arc<CircuitBreaker>,
    config: YahooConfig,
}

impl YahooProvider {
    pub fn new(circuit_breaker: Arc<CircuitBreaker>, config: YahooConfig) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            circuit_breaker,
            config,
        })
    }

    /// Build the chart API URL for a symbol and date range.
    fn chart_url(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
        let start_ts = start.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
        let end_ts = (end + chrono::Duration::days(1))
            .and_time(chrono::NaiveTime::MIN)
            .and_utc()
            .timestamp()
            - 1;
        format!(
            "{}/v8/finance/chart/{symbol}?period1={start_ts}&period2={end_ts}&interval=1d",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Parse the chart API response into raw bars plus the display name.
    fn parse_response(
        symbol: &str,
        resp: ChartResponse,
    ) -> Result<(Option<String>, Vec<RawBar>), DataError> {
        let result = resp.chart.result.ok_or_else(|| match resp.chart.error {
            Some(err) if err.code == "Not Found" => DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            },
            Some(err) => {
                DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
            }
            None => DataError::ResponseFormatChanged("empty result with no error".into()),
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("result array is empty".into()))?;

        let name = data.meta.and_then(|m| m.short_name.or(m.long_name));

        // A valid symbol with no trading days in range has no timestamps.
        let timestamps = data.timestamp.unwrap_or_default();

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;

        let mut bars = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            let date = chrono::DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| {
                    DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
                })?;

            let bar = RawBar {
                date,
                open: quote.open.get(i).copied().flatten(),
                high: quote.high.get(i).copied().flatten(),
                low: quote.low.get(i).copied().flatten(),
                close: quote.close.get(i).copied().flatten(),
                volume: quote.volume.get(i).copied().flatten(),
            };

            // Holidays/non-trading days come back as all-null rows
            if bar.is_blank() {
                continue;
            }
            bars.push(bar);
        }

        Ok((name, bars))
    }

    /// Execute the HTTP request with retry and circuit breaker logic.
    fn fetch_with_retry(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<(Option<String>, Vec<RawBar>), DataError> {
        let url = self.chart_url(symbol, start, end);
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let delay = self.config.base_delay * 2u32.pow(attempt - 1);
                debug!(symbol, attempt, ?delay, "retrying Yahoo request");
                std::thread::sleep(delay);
            }

            if !self.circuit_breaker.is_allowed() {
                return Err(DataError::CircuitBreakerTripped);
            }

            let resp = match self.client.get(&url).send() {
                Ok(resp) => resp,
                Err(e) if e.is_connect() || e.is_timeout() => {
                    last_error = Some(DataError::NetworkUnreachable(e.to_string()));
                    continue;
                }
                Err(e) => return Err(DataError::NetworkUnreachable(e.to_string())),
            };

            let status = resp.status();

            if status == reqwest::StatusCode::FORBIDDEN {
                warn!(symbol, "Yahoo returned 403, tripping circuit breaker");
                self.circuit_breaker.trip();
                return Err(DataError::CircuitBreakerTripped);
            }

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                self.circuit_breaker.record_failure();
                let retry_after = resp
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                last_error = Some(DataError::RateLimited {
                    retry_after_secs: retry_after,
                });
                continue;
            }

            if status == reqwest::StatusCode::UNAUTHORIZED {
                return Err(DataError::AuthenticationRequired(
                    "Yahoo Finance requires authentication".into(),
                ));
            }

            if status == reqwest::StatusCode::NOT_FOUND {
                // The chart API still sends its error envelope with a 404.
                return match resp.json::<ChartResponse>() {
                    Ok(chart) => Self::parse_response(symbol, chart),
                    Err(_) => Err(DataError::SymbolNotFound {
                        symbol: symbol.to_string(),
                    }),
                };
            }

            if !status.is_success() {
                self.circuit_breaker.record_failure();
                last_error = Some(DataError::Other(format!("HTTP {status} for {symbol}")));
                continue;
            }

            let chart: ChartResponse = resp.json().map_err(|e| {
                DataError::ResponseFormatChanged(format!(
                    "failed to parse response for {symbol}: {e}"
                ))
            })?;

            let parsed = Self::parse_response(symbol, chart)?;
            self.circuit_breaker.record_success();
            return Ok(parsed);
        }

        Err(last_error.unwrap_or_else(|| DataError::Other("max retries exceeded".into())))
    }
}

impl DataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        let (name, bars) = self.fetch_with_retry(symbol, start, end)?;
        debug!(symbol, bars = bars.len(), "fetched from Yahoo");
        Ok(FetchResult {
            symbol: symbol.to_string(),
            name,
            bars,
            source: DataSource::YahooFinance,
        })
    }

    fn is_available(&self) -> bool {
        self.circuit_breaker.is_allowed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<(Option<String>, Vec<RawBar>), DataError> {
        let resp: ChartResponse = serde_json::from_str(json).unwrap();
        YahooProvider::parse_response("PETR4.SA", resp)
    }

    #[test]
    fn parses_quotes_and_name() {
        let json = r#"{"chart":{"result":[{
            "meta":{"symbol":"PETR4.SA","shortName":"PETROBRAS   PN"},
            "timestamp":[1704196800,1704283200],
            "indicators":{"quote":[{
                "open":[37.0,37.5],"high":[37.9,38.1],"low":[36.8,37.2],
                "close":[37.6,38.0],"volume":[1000,2000]}]}}],"error":null}}"#;
        let (name, bars) = parse(json).unwrap();
        assert_eq!(name.as_deref(), Some("PETROBRAS   PN"));
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(bars[1].close, Some(38.0));
        assert_eq!(bars[1].volume, Some(2000));
    }

    #[test]
    fn skips_all_null_rows_and_keeps_partial_rows() {
        let json = r#"{"chart":{"result":[{
            "timestamp":[1704196800,1704283200,1704369600],
            "indicators":{"quote":[{
                "open":[37.0,null,37.5],"high":[37.9,null,38.1],"low":[36.8,null,37.2],
                "close":[37.6,null,null],"volume":[1000,null,2000]}]}}],"error":null}}"#;
        let (name, bars) = parse(json).unwrap();
        assert!(name.is_none());
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].close, None);
    }

    #[test]
    fn not_found_error_maps_to_symbol_not_found() {
        let json = r#"{"chart":{"result":null,
            "error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        assert!(matches!(
            parse(json),
            Err(DataError::SymbolNotFound { symbol }) if symbol == "PETR4.SA"
        ));
    }

    #[test]
    fn other_error_maps_to_format_changed() {
        let json = r#"{"chart":{"result":null,
            "error":{"code":"Bad Request","description":"Invalid input"}}}"#;
        assert!(matches!(parse(json), Err(DataError::ResponseFormatChanged(_))));
    }

    #[test]
    fn missing_timestamps_give_no_bars() {
        let json = r#"{"chart":{"result":[{"indicators":{"quote":[{}]}}],"error":null}}"#;
        let (_, bars) = parse(json).unwrap();
        assert!(bars.is_empty());
    }

    #[test]
    fn chart_url_covers_whole_end_day() {
        let provider = YahooProvider::new(
            Arc::new(CircuitBreaker::default_provider()),
            YahooConfig::default(),
        )
        .unwrap();
        let url = provider.chart_url(
            "SPY",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );
        assert!(url.starts_with("https://query2.finance.yahoo.com/v8/finance/chart/SPY?"));
        assert!(url.contains("period1=1704067200"));
        assert!(url.contains("period2=1704153599"));
        assert!(url.contains("interval=1d"));
    }
}
