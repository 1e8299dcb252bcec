//! Export: per-symbol signal CSV and whole-batch JSON.
//!
//! The JSON batch carries a `schema_version` and one record per requested
//! symbol, in input order, tagged `ok` or `error`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use macdlab_core::signals::SeriesSignals;

use crate::orchestrator::{Analysis, AnalysisResult, ErrorDescriptor};

pub const SCHEMA_VERSION: u32 = 1;

// ─── CSV export ─────────────────────────────────────────────────────

/// Export one symbol's oscillator and events as CSV.
///
/// Columns: date, close, macd, signal, histogram, state, trigger_price
pub fn export_signals_csv(analysis: &Analysis) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "date",
        "close",
        "macd",
        "signal",
        "histogram",
        "state",
        "trigger_price",
    ])?;

    let SeriesSignals {
        oscillator, events, ..
    } = &analysis.signals;
    for ((bar, point), event) in analysis.series.bars().iter().zip(oscillator).zip(events) {
        wtr.write_record([
            bar.date.to_string(),
            format!("{:.6}", bar.close),
            format!("{:.6}", point.macd),
            format!("{:.6}", point.signal),
            format!("{:.6}", point.histogram()),
            event.state.to_string(),
            event
                .trigger_price
                .map(|p| format!("{p:.6}"))
                .unwrap_or_default(),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── JSON export ────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum ResultRecord<'a> {
    Ok {
        symbol: &'a str,
        #[serde(flatten)]
        analysis: &'a Analysis,
    },
    Error(ErrorDescriptor),
}

#[derive(Serialize)]
struct BatchRecord<'a> {
    schema_version: u32,
    results: Vec<ResultRecord<'a>>,
}

/// Serialize the whole batch to pretty JSON.
pub fn export_batch_json(results: &[AnalysisResult]) -> Result<String> {
    let records = results
        .iter()
        .filter_map(|r| match r.analysis() {
            Some(analysis) => Some(ResultRecord::Ok {
                symbol: &r.symbol,
                analysis,
            }),
            None => r.error().map(ResultRecord::Error),
        })
        .collect();
    let batch = BatchRecord {
        schema_version: SCHEMA_VERSION,
        results: records,
    };
    serde_json::to_string_pretty(&batch).context("failed to serialize analysis batch to JSON")
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Symbols like `^BVSP` or `BRK/B` become safe file stems.
fn file_stem(symbol: &str) -> String {
    symbol
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// First of `stem`, `stem_<index>`, `stem_<index>_2`, ... not yet taken.
fn unique_stem(taken: &mut HashSet<String>, stem: String, index: usize) -> String {
    let mut candidate = stem.clone();
    let mut n = 1;
    while !taken.insert(candidate.clone()) {
        candidate = if n == 1 {
            format!("{stem}_{index}")
        } else {
            format!("{stem}_{index}_{n}")
        };
        n += 1;
    }
    candidate
}

/// Write `batch.json` plus one `<symbol>_signals.csv` per successful symbol
/// into `output_dir`, creating it if needed. Returns the written paths.
///
/// Symbols whose sanitized names clash get their input index appended, so
/// no export overwrites another.
pub fn save_exports(results: &[AnalysisResult], output_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output dir: {}", output_dir.display()))?;

    let mut written = Vec::new();

    let batch_path = output_dir.join("batch.json");
    std::fs::write(&batch_path, export_batch_json(results)?)
        .with_context(|| format!("failed to write {}", batch_path.display()))?;
    written.push(batch_path);

    let mut taken = HashSet::new();
    for (index, result) in results.iter().enumerate() {
        let Some(analysis) = result.analysis() else {
            continue;
        };
        let stem = unique_stem(&mut taken, file_stem(&result.symbol), index);
        let path = output_dir.join(format!("{stem}_signals.csv"));
        std::fs::write(&path, export_signals_csv(analysis)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_stem_replaces_unsafe_chars() {
        assert_eq!(file_stem("PETR4.SA"), "PETR4.SA");
        assert_eq!(file_stem("^BVSP"), "_BVSP");
        assert_eq!(file_stem("BRK/B"), "BRK_B");
    }

    #[test]
    fn clashing_stems_get_index_suffix() {
        let mut taken = HashSet::new();
        assert_eq!(unique_stem(&mut taken, "BRK_B".into(), 0), "BRK_B");
        assert_eq!(unique_stem(&mut taken, "BRK_B".into(), 1), "BRK_B_1");
        assert_eq!(unique_stem(&mut taken, "BRK_B_1".into(), 2), "BRK_B_1_2");
        assert_eq!(unique_stem(&mut taken, "BRK_B".into(), 1), "BRK_B_1_3");
    }
}
