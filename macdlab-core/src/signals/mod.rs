//! Signal generation: MACD oscillator plus labeler, applied to one series.
//!
//! Signals are pure: a price series in, oscillator points and events out.
//! Nothing is carried between calls.

pub mod labeler;

pub use labeler::{candidate_state, label, label_series, SignalLabeler};

use serde::Serialize;

use crate::domain::{OscillatorPoint, PriceSeries, Recommendation, SignalEvent};
use crate::indicators::{Macd, MacdParams};

/// Oscillator, events and recommendation for one series.
///
/// `oscillator` and `events` have exactly one entry per bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSignals {
    pub oscillator: Vec<OscillatorPoint>,
    pub events: Vec<SignalEvent>,
    pub recommendation: Recommendation,
}

impl SeriesSignals {
    /// Events where a directional state was entered.
    pub fn transitions(&self) -> impl Iterator<Item = &SignalEvent> {
        self.events.iter().filter(|e| e.is_transition())
    }
}

/// MACD trend signal: oscillator followed by the labeler.
#[derive(Debug, Clone, Copy, Default)]
pub struct MacdSignal {
    macd: Macd,
}

impl MacdSignal {
    pub fn new(params: MacdParams) -> Self {
        Self {
            macd: Macd::new(params),
        }
    }

    pub fn params(&self) -> &MacdParams {
        self.macd.params()
    }

    pub fn evaluate(&self, series: &PriceSeries) -> SeriesSignals {
        let oscillator = self.macd.compute(series);
        let events = label_series(series, &oscillator);
        let recommendation = recommend(series, &events);
        SeriesSignals {
            oscillator,
            events,
            recommendation,
        }
    }
}

/// Final status: last event's state, last bar's close.
///
/// A series always has a last bar; with no events (never the case for
/// `label_series` output) the state is HOLD.
pub fn recommend(series: &PriceSeries, events: &[SignalEvent]) -> Recommendation {
    let last = series.last();
    Recommendation {
        date: last.date,
        state: events.last().map(|e| e.state).unwrap_or_default(),
        last_close: last.close,
    }
}
