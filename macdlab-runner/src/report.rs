//! Plain-text rendering of analysis results.

use chrono::NaiveDate;

use macdlab_core::domain::{PriceSeries, Recommendation};
use macdlab_core::signals::SeriesSignals;

use crate::orchestrator::{AnalysisResult, ErrorDescriptor};
use crate::views::{candles, daily_returns, daily_variation};

/// Which optional sections to include.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Show every labeled bar instead of only the entries.
    pub all_events: bool,
    /// Show returns, variation and candles.
    pub views: bool,
}

/// Dates are shown day-first.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.decimals$}"))
}

pub fn render_bars_table(series: &PriceSeries) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<10}  {:>10}  {:>10}  {:>10}  {:>10}  {:>12}\n",
        "Date", "Open", "High", "Low", "Close", "Volume"
    ));
    for b in series.bars() {
        out.push_str(&format!(
            "{:<10}  {:>10.2}  {:>10.2}  {:>10.2}  {:>10.2}  {:>12}\n",
            format_date(b.date),
            b.open,
            b.high,
            b.low,
            b.close,
            b.volume
        ));
    }
    out
}

/// Signal table: entries only, or every bar with `all_events`.
pub fn render_signals_table(signals: &SeriesSignals, all_events: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<10}  {:>10}  {:>10}  {:>10}  {:<5}  {:>10}\n",
        "Date", "MACD", "Signal", "Hist", "State", "Trigger"
    ));
    let mut rows = 0;
    for (point, event) in signals.oscillator.iter().zip(&signals.events) {
        if !all_events && !event.is_transition() {
            continue;
        }
        rows += 1;
        out.push_str(&format!(
            "{:<10}  {:>10.4}  {:>10.4}  {:>10.4}  {:<5}  {:>10}\n",
            format_date(event.date),
            point.macd,
            point.signal,
            point.histogram(),
            event.state,
            fmt_opt(event.trigger_price, 2)
        ));
    }
    if rows == 0 {
        out.push_str("(no entries in window)\n");
    }
    out
}

pub fn render_views(series: &PriceSeries) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<10}  {:>9}  {:>10}  {:>10}  {:>10}  {:>10}  {:>10}  {:<7}\n",
        "Date", "Return%", "Variation", "Open", "High", "Low", "Close", "Candle"
    ));
    let rows = daily_returns(series)
        .into_iter()
        .zip(daily_variation(series))
        .zip(candles(series));
    for ((ret, var), c) in rows {
        out.push_str(&format!(
            "{:<10}  {:>9}  {:>10}  {:>10.2}  {:>10.2}  {:>10.2}  {:>10.2}  {:<7}\n",
            format_date(c.date),
            fmt_opt(ret.value, 2),
            fmt_opt(var.value, 2),
            c.open,
            c.high,
            c.low,
            c.close,
            if c.bullish { "up" } else { "down" }
        ));
    }
    out
}

/// `SYMBOL, Operation: BUY - Close: 12.34`
pub fn status_line(symbol: &str, recommendation: &Recommendation) -> String {
    format!(
        "{symbol}, Operation: {} - Close: {:.2}",
        recommendation.state, recommendation.last_close
    )
}

pub fn error_line(error: &ErrorDescriptor) -> String {
    format!("error processing symbol {}: {}", error.symbol, error.message)
}

/// Full text block for one result.
pub fn render_result(result: &AnalysisResult, options: ReportOptions) -> String {
    let analysis = match &result.outcome {
        Ok(analysis) => analysis,
        Err(_) => {
            return result
                .error()
                .map(|e| format!("{}\n", error_line(&e)))
                .unwrap_or_default();
        }
    };

    let mut out = String::new();
    let title = match &analysis.name {
        Some(name) => format!("{} ({name})", result.symbol),
        None => result.symbol.clone(),
    };
    out.push_str(&format!("=== {title} ===\n\n"));
    out.push_str(&render_bars_table(&analysis.series));
    out.push('\n');
    out.push_str(&render_signals_table(&analysis.signals, options.all_events));
    if options.views {
        out.push('\n');
        out.push_str(&render_views(&analysis.series));
    }
    out.push('\n');
    let recommendation = &analysis.signals.recommendation;
    out.push_str(&status_line(&result.symbol, recommendation));
    out.push_str(&format!(" ({})\n", recommendation.state.action()));
    out
}
