//! MACDLab Runner: multi-symbol analysis, configuration, reports and export.
//!
//! This crate builds on `macdlab-core` to provide:
//! - TOML configuration and provider selection
//! - The multi-symbol orchestrator with per-symbol failure isolation
//! - Derived views (returns, variation, candles)
//! - Text reports and CSV/JSON export

pub mod config;
pub mod export;
pub mod orchestrator;
pub mod report;
pub mod views;

pub use config::{dedup_symbols, AnalysisConfig, ConfigError, ProviderConfig, ProviderKind};
pub use export::{export_batch_json, export_signals_csv, save_exports};
pub use orchestrator::{
    analyze_symbol, analyze_symbols, Analysis, AnalysisError, AnalysisProgress, AnalysisRequest,
    AnalysisResult, ErrorDescriptor, ErrorKind, StderrProgress,
};
pub use report::{render_result, ReportOptions};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn analysis_types_are_send_sync() {
        assert_send::<AnalysisResult>();
        assert_sync::<AnalysisResult>();
        assert_send::<Analysis>();
        assert_sync::<Analysis>();
    }

    #[test]
    fn config_types_are_send_sync() {
        assert_send::<AnalysisConfig>();
        assert_sync::<AnalysisConfig>();
        assert_send::<AnalysisRequest>();
        assert_sync::<AnalysisRequest>();
    }
}
