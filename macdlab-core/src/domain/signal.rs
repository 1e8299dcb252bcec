//! Oscillator points, labeled signal events and the final recommendation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// MACD and signal line values for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OscillatorPoint {
    pub date: NaiveDate,
    pub macd: f64,
    pub signal: f64,
}

impl OscillatorPoint {
    /// MACD minus signal.
    pub fn histogram(&self) -> f64 {
        self.macd - self.signal
    }
}

/// Discrete per-bar signal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalState {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl SignalState {
    /// BUY and SELL are directional; HOLD is not.
    pub fn is_directional(self) -> bool {
        !matches!(self, Self::Hold)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::Hold => "HOLD",
        }
    }

    /// Action wording shown next to the final status.
    pub fn action(self) -> &'static str {
        match self {
            Self::Buy => "accumulate",
            Self::Sell => "divest",
            Self::Hold => "no action",
        }
    }
}

impl fmt::Display for SignalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Labeled state for one bar.
///
/// `trigger_price` is `Some(close)` only on the bar where a directional state
/// was entered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalEvent {
    pub date: NaiveDate,
    pub state: SignalState,
    pub trigger_price: Option<f64>,
}

impl SignalEvent {
    pub fn is_transition(&self) -> bool {
        self.trigger_price.is_some()
    }
}

/// Overall recommendation for a symbol: the last event's state paired with
/// the last close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub date: NaiveDate,
    pub state: SignalState,
    pub last_close: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_serializes_uppercase() {
        let json = serde_json::to_string(&SignalState::Buy).unwrap();
        assert_eq!(json, "\"BUY\"");
        let back: SignalState = serde_json::from_str("\"HOLD\"").unwrap();
        assert_eq!(back, SignalState::Hold);
    }

    #[test]
    fn histogram_is_difference() {
        let p = OscillatorPoint {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            macd: 0.5,
            signal: 0.2,
        };
        assert!((p.histogram() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn hold_is_not_directional() {
        assert!(SignalState::Buy.is_directional());
        assert!(SignalState::Sell.is_directional());
        assert!(!SignalState::Hold.is_directional());
    }
}
