//! MACDLab Core: domain types, MACD oscillator, signal labeling, data providers.
//!
//! This crate contains the signal engine:
//! - Domain types (bars, price series, oscillator points, signal events)
//! - EWMA and MACD indicators
//! - Signal labeler: per-bar BUY / SELL / HOLD with entry trigger prices
//! - Data providers (Yahoo Finance, CSV, synthetic) and ingest validation

pub mod data;
pub mod domain;
pub mod indicators;
pub mod signals;
