//! Data acquisition: providers, circuit breaker, and ingest validation.

pub mod circuit_breaker;
pub mod csv_import;
pub mod ingest;
pub mod provider;
pub mod synthetic;
pub mod yahoo;

pub use circuit_breaker::{BreakerState, CircuitBreaker};
pub use csv_import::CsvProvider;
pub use ingest::ingest;
pub use provider::{
    DataError, DataProvider, DataSource, FetchResult, Lookback, LookbackParseError, RawBar,
};
pub use synthetic::SyntheticProvider;
pub use yahoo::{YahooConfig, YahooProvider};
