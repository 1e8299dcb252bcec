//! MACD signal labeler: a forward scan from oscillator values to
//! de-duplicated BUY / SELL / HOLD events.
//!
//! Per bar:
//! - macd > signal → BUY, macd < signal → SELL, otherwise HOLD
//! - a directional state that differs from the previous bar's state is an
//!   entry; the event records that bar's close as its trigger price
//! - a repeated state, or HOLD, carries no trigger price
//!
//! The state before the first bar is HOLD, so the first bar is an entry
//! exactly when it is directional.

use chrono::NaiveDate;

use crate::domain::{OscillatorPoint, PriceSeries, SignalEvent, SignalState};

/// Candidate state from one MACD/signal pair.
///
/// Equal values, or any NaN, give HOLD.
pub fn candidate_state(macd: f64, signal: f64) -> SignalState {
    if macd > signal {
        SignalState::Buy
    } else if macd < signal {
        SignalState::Sell
    } else {
        SignalState::Hold
    }
}

/// Stateful labeler for one series. Feed bars in date order with [`step`].
///
/// [`step`]: SignalLabeler::step
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalLabeler {
    previous: SignalState,
}

impl SignalLabeler {
    pub fn new() -> Self {
        Self::default()
    }

    /// State of the last labeled bar (HOLD before the first bar).
    pub fn previous(&self) -> SignalState {
        self.previous
    }

    /// Label the next bar.
    pub fn step(&mut self, date: NaiveDate, close: f64, macd: f64, signal: f64) -> SignalEvent {
        let state = candidate_state(macd, signal);
        let is_entry = state.is_directional() && state != self.previous;
        self.previous = state;
        SignalEvent {
            date,
            state,
            trigger_price: is_entry.then_some(close),
        }
    }

    /// Start over as if no bar had been seen.
    pub fn reset(&mut self) {
        self.previous = SignalState::Hold;
    }
}

/// Label every bar of a series from its oscillator points.
///
/// `oscillator` must be aligned with `series` (as produced by
/// [`Macd::compute`](crate::indicators::Macd::compute)).
pub fn label_series(series: &PriceSeries, oscillator: &[OscillatorPoint]) -> Vec<SignalEvent> {
    debug_assert_eq!(series.len(), oscillator.len());
    let closes = series.bars().iter().map(|b| b.close);
    label(closes.zip(oscillator.iter().copied()))
}

/// Label (close, oscillator point) pairs in order.
pub fn label<I>(inputs: I) -> Vec<SignalEvent>
where
    I: IntoIterator<Item = (f64, OscillatorPoint)>,
{
    inputs
        .into_iter()
        .scan(SignalLabeler::new(), |labeler, (close, point)| {
            Some(labeler.step(point.date, close, point.macd, point.signal))
        })
        .collect()
}
