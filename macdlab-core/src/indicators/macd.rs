//! Moving Average Convergence Divergence (MACD).
//!
//! MACD   = EWMA(close, fast) - EWMA(close, slow)
//! Signal = EWMA(MACD, signal)
//!
//! Every output series is aligned index-for-index with the closes; there is
//! no warmup gap because each EWMA is seeded with its first input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ewma::{ewma_of_series, Weighting};
use crate::domain::{OscillatorPoint, PriceSeries};

/// Invalid span combinations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MacdParamsError {
    #[error("{name} span must be >= 1")]
    ZeroSpan { name: &'static str },

    #[error("fast span ({fast}) must be shorter than slow span ({slow})")]
    FastNotFaster { fast: usize, slow: usize },
}

/// Spans and weighting for the oscillator. Defaults: 12 / 26 / 9, recursive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdParams {
    pub fast_span: usize,
    pub slow_span: usize,
    pub signal_span: usize,
    pub weighting: Weighting,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast_span: 12,
            slow_span: 26,
            signal_span: 9,
            weighting: Weighting::Recursive,
        }
    }
}

impl MacdParams {
    pub fn validate(&self) -> Result<(), MacdParamsError> {
        for (name, span) in [
            ("fast", self.fast_span),
            ("slow", self.slow_span),
            ("signal", self.signal_span),
        ] {
            if span == 0 {
                return Err(MacdParamsError::ZeroSpan { name });
            }
        }
        if self.fast_span >= self.slow_span {
            return Err(MacdParamsError::FastNotFaster {
                fast: self.fast_span,
                slow: self.slow_span,
            });
        }
        Ok(())
    }
}

/// Intermediate and final lines of one MACD computation.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdLines {
    pub fast: Vec<f64>,
    pub slow: Vec<f64>,
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
}

/// MACD oscillator with fixed parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Macd {
    params: MacdParams,
}

impl Macd {
    pub fn new(params: MacdParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &MacdParams {
        &self.params
    }

    /// Compute all lines from raw closes.
    pub fn lines(&self, closes: &[f64]) -> MacdLines {
        let p = &self.params;
        let fast = ewma_of_series(closes, p.fast_span, p.weighting);
        let slow = ewma_of_series(closes, p.slow_span, p.weighting);
        let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal = ewma_of_series(&macd, p.signal_span, p.weighting);
        MacdLines {
            fast,
            slow,
            macd,
            signal,
        }
    }

    /// One oscillator point per bar of the series.
    pub fn compute(&self, series: &PriceSeries) -> Vec<OscillatorPoint> {
        let lines = self.lines(&series.closes());
        series
            .bars()
            .iter()
            .zip(lines.macd.into_iter().zip(lines.signal))
            .map(|(bar, (macd, signal))| OscillatorPoint {
                date: bar.date,
                macd,
                signal,
            })
            .collect()
    }
}
