//! Domain types for MACDLab

pub mod bar;
pub mod signal;

pub use bar::{Bar, PriceSeries, SeriesError};
pub use signal::{OscillatorPoint, Recommendation, SignalEvent, SignalState};
