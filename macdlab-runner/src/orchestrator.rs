//! Multi-symbol orchestrator: fetch, validate, and signal each symbol in turn.
//!
//! Symbols are processed sequentially in input order. A failure for one
//! symbol becomes that symbol's `AnalysisResult` error and the batch moves
//! on; nothing escapes this module as an `Err`. Each symbol gets exactly one
//! fetch attempt.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use macdlab_core::data::{ingest, DataError, DataProvider, DataSource, Lookback};
use macdlab_core::domain::{PriceSeries, SeriesError};
use macdlab_core::indicators::MacdParams;
use macdlab_core::signals::{MacdSignal, SeriesSignals};

/// Per-symbol failure.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("data unavailable: {0}")]
    DataUnavailable(#[from] DataError),

    #[error("data unavailable: provider returned no bars")]
    EmptySeries,

    #[error("malformed series: {0}")]
    MalformedSeries(SeriesError),
}

impl From<SeriesError> for AnalysisError {
    fn from(e: SeriesError) -> Self {
        match e {
            SeriesError::Empty => AnalysisError::EmptySeries,
            other => AnalysisError::MalformedSeries(other),
        }
    }
}

/// Coarse classification of an [`AnalysisError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    DataUnavailable,
    MalformedSeries,
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::DataUnavailable(_) | AnalysisError::EmptySeries => {
                ErrorKind::DataUnavailable
            }
            AnalysisError::MalformedSeries(_) => ErrorKind::MalformedSeries,
        }
    }
}

/// Serializable description of a failed symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDescriptor {
    pub symbol: String,
    pub kind: ErrorKind,
    pub message: String,
}

/// A successfully analyzed symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// Display name reported by the provider, if any.
    pub name: Option<String>,
    pub source: DataSource,
    pub series: PriceSeries,
    pub signals: SeriesSignals,
}

/// Outcome for one requested symbol.
#[derive(Debug)]
pub struct AnalysisResult {
    pub symbol: String,
    pub outcome: Result<Analysis, AnalysisError>,
}

impl AnalysisResult {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<ErrorDescriptor> {
        self.outcome.as_ref().err().map(|e| ErrorDescriptor {
            symbol: self.symbol.clone(),
            kind: e.kind(),
            message: e.to_string(),
        })
    }
}

/// What to fetch and how to signal it.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisRequest {
    pub end: NaiveDate,
    pub lookback: Lookback,
    pub params: MacdParams,
}

impl AnalysisRequest {
    pub fn start(&self) -> NaiveDate {
        self.lookback.start_for(self.end)
    }
}

/// Progress callback for multi-symbol runs.
pub trait AnalysisProgress {
    /// Called when starting to process a symbol.
    fn on_start(&self, symbol: &str, index: usize, total: usize);

    /// Called when a symbol is done.
    fn on_complete(&self, result: &AnalysisResult, index: usize, total: usize);

    /// Called when the entire batch is done.
    fn on_batch_complete(&self, succeeded: usize, failed: usize, total: usize);
}

/// Progress reporter that prints to stderr, leaving stdout for reports.
pub struct StderrProgress;

impl AnalysisProgress for StderrProgress {
    fn on_start(&self, symbol: &str, index: usize, total: usize) {
        eprintln!("[{}/{}] Analyzing {symbol}...", index + 1, total);
    }

    fn on_complete(&self, result: &AnalysisResult, _index: usize, _total: usize) {
        match &result.outcome {
            Ok(_) => eprintln!("  OK: {}", result.symbol),
            Err(e) => eprintln!("  FAIL: {}: {e}", result.symbol),
        }
    }

    fn on_batch_complete(&self, succeeded: usize, failed: usize, total: usize) {
        eprintln!("Analysis complete: {succeeded}/{total} succeeded, {failed} failed");
    }
}

/// Analyze one symbol: fetch → ingest → MACD → labels.
pub fn analyze_symbol(
    provider: &dyn DataProvider,
    symbol: &str,
    request: &AnalysisRequest,
) -> AnalysisResult {
    AnalysisResult {
        symbol: symbol.to_string(),
        outcome: run_symbol(provider, symbol, request),
    }
}

fn run_symbol(
    provider: &dyn DataProvider,
    symbol: &str,
    request: &AnalysisRequest,
) -> Result<Analysis, AnalysisError> {
    // A tripped provider fails the symbol without another request.
    if !provider.is_available() {
        return Err(DataError::CircuitBreakerTripped.into());
    }

    let start = request.start();
    debug!(symbol, provider = provider.name(), %start, end = %request.end, "fetching");

    let fetched = provider.fetch(symbol, start, request.end)?;
    let series = ingest(symbol, fetched.bars)?;
    let signals = MacdSignal::new(request.params).evaluate(&series);

    Ok(Analysis {
        name: fetched.name,
        source: fetched.source,
        series,
        signals,
    })
}

/// Analyze every symbol in order, one result per symbol.
///
/// Callers de-duplicate `symbols`; repeats are analyzed again.
pub fn analyze_symbols(
    provider: &dyn DataProvider,
    symbols: &[String],
    request: &AnalysisRequest,
    progress: Option<&dyn AnalysisProgress>,
) -> Vec<AnalysisResult> {
    let total = symbols.len();
    info!(
        total,
        provider = provider.name(),
        lookback = %request.lookback,
        end = %request.end,
        "starting analysis"
    );

    let mut results = Vec::with_capacity(total);
    for (i, symbol) in symbols.iter().enumerate() {
        if let Some(p) = progress {
            p.on_start(symbol, i, total);
        }

        let result = analyze_symbol(provider, symbol, request);
        match &result.outcome {
            Ok(analysis) => info!(
                symbol = %symbol,
                bars = analysis.series.len(),
                entries = analysis.signals.transitions().count(),
                state = %analysis.signals.recommendation.state,
                "analyzed"
            ),
            Err(e) => warn!(symbol = %symbol, kind = ?e.kind(), error = %e, "analysis failed"),
        }

        if let Some(p) = progress {
            p.on_complete(&result, i, total);
        }
        results.push(result);
    }

    let failed = results.iter().filter(|r| !r.is_ok()).count();
    if let Some(p) = progress {
        p.on_batch_complete(total - failed, failed, total);
    }

    results
}
