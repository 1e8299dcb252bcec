//! Serializable analysis configuration.
//!
//! Loaded from TOML; every section is optional:
//!
//! ```toml
//! symbols = ["PETR4.SA", "VALE3.SA"]
//! lookback = "1mo"
//!
//! [macd]
//! fast_span = 12
//! slow_span = 26
//! signal_span = 9
//! weighting = "recursive"
//!
//! [provider]
//! kind = "yahoo"
//! csv_dir = "data"
//! timeout_secs = 30
//! max_retries = 0
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use macdlab_core::data::{
    CircuitBreaker, CsvProvider, DataError, DataProvider, Lookback, SyntheticProvider,
    YahooConfig, YahooProvider,
};
use macdlab_core::indicators::{MacdParams, MacdParamsError};

/// Errors from loading or validating a config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid macd parameters: {0}")]
    Macd(#[from] MacdParamsError),

    #[error("symbol list contains an empty symbol")]
    EmptySymbol,
}

/// Which data provider to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Yahoo,
    Csv,
    Synthetic,
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yahoo" => Ok(Self::Yahoo),
            "csv" => Ok(Self::Csv),
            "synthetic" => Ok(Self::Synthetic),
            other => Err(format!(
                "unknown provider '{other}'. Valid: yahoo, csv, synthetic"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    /// Directory of `<SYMBOL>.csv` files for the csv provider.
    pub csv_dir: PathBuf,
    /// HTTP timeout for the yahoo provider.
    pub timeout_secs: u64,
    /// Extra attempts per symbol for the yahoo provider.
    pub max_retries: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Yahoo,
            csv_dir: PathBuf::from("data"),
            timeout_secs: 30,
            max_retries: 0,
        }
    }
}

impl ProviderConfig {
    /// Construct the configured provider.
    pub fn build(&self) -> Result<Box<dyn DataProvider>, DataError> {
        Ok(match self.kind {
            ProviderKind::Yahoo => {
                let config = YahooConfig {
                    timeout: Duration::from_secs(self.timeout_secs),
                    max_retries: self.max_retries,
                    ..YahooConfig::default()
                };
                let breaker = Arc::new(CircuitBreaker::default_provider());
                Box::new(YahooProvider::new(breaker, config)?)
            }
            ProviderKind::Csv => Box::new(CsvProvider::new(&self.csv_dir)),
            ProviderKind::Synthetic => Box::new(SyntheticProvider::new()),
        })
    }
}

/// Complete configuration for one analysis run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub symbols: Vec<String>,
    pub lookback: Lookback,
    pub macd: MacdParams,
    pub provider: ProviderConfig,
}

impl AnalysisConfig {
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.macd.validate()?;
        if self.symbols.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::EmptySymbol);
        }
        Ok(())
    }
}

/// Trim symbols and drop repeats, keeping the first occurrence's position.
pub fn dedup_symbols<I, S>(symbols: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = std::collections::HashSet::new();
    symbols
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty() && seen.insert(s.clone()))
        .collect()
}
