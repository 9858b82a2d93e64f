//! Serializable analysis configuration.
//!
//! Loaded from TOML. Every field has a default, so a file only needs to name
//! the values it overrides:
//!
//! ```toml
//! [indicators]
//! ma_period = 50
//!
//! [forecast]
//! horizon = 14
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default number of days forecast when the caller does not specify one.
pub const DEFAULT_FORECAST_DAYS: usize = 7;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration for one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub indicators: IndicatorConfig,
    pub forecast: ForecastConfig,
}

/// Periods and thresholds for the indicator snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Simple moving average window used for the trend call.
    pub ma_period: usize,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    /// RSI strictly below this is oversold.
    pub rsi_oversold: f64,
    /// RSI strictly above this is overbought.
    pub rsi_overbought: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            ma_period: 20,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
        }
    }
}

/// Regression window and horizon for the forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Maximum number of trailing points fed to the regression.
    pub window: usize,
    /// Number of calendar days to forecast.
    pub horizon: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            window: 30,
            horizon: DEFAULT_FORECAST_DAYS,
        }
    }
}

impl AnalysisConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.indicators.validate()?;
        self.forecast.validate()
    }
}

impl IndicatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let periods = [
            ("ma_period", self.ma_period),
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
        ];
        for (name, value) in periods {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be >= 1")));
            }
        }
        if self.macd_fast >= self.macd_slow {
            return Err(ConfigError::Invalid(format!(
                "macd_fast ({}) must be less than macd_slow ({})",
                self.macd_fast, self.macd_slow
            )));
        }
        let thresholds_ok = (0.0..=100.0).contains(&self.rsi_oversold)
            && (0.0..=100.0).contains(&self.rsi_overbought)
            && self.rsi_oversold < self.rsi_overbought;
        if !thresholds_ok {
            return Err(ConfigError::Invalid(format!(
                "RSI thresholds must satisfy 0 <= oversold ({}) < overbought ({}) <= 100",
                self.rsi_oversold, self.rsi_overbought
            )));
        }
        Ok(())
    }
}

impl ForecastConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window == 0 {
            return Err(ConfigError::Invalid("forecast window must be >= 1".into()));
        }
        if self.horizon == 0 {
            return Err(ConfigError::Invalid("forecast horizon must be >= 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_classic_parameters() {
        let config = AnalysisConfig::default();
        assert_eq!(config.indicators.ma_period, 20);
        assert_eq!(config.indicators.rsi_period, 14);
        assert_eq!(
            (
                config.indicators.macd_fast,
                config.indicators.macd_slow,
                config.indicators.macd_signal
            ),
            (12, 26, 9)
        );
        assert_eq!(config.forecast.window, 30);
        assert_eq!(config.forecast.horizon, DEFAULT_FORECAST_DAYS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn example_file_spells_out_defaults() {
        let example = include_str!("../../marketsense.example.toml");
        assert_eq!(AnalysisConfig::from_toml(example).unwrap(), AnalysisConfig::default());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(AnalysisConfig::from_toml("").unwrap(), AnalysisConfig::default());
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let config = AnalysisConfig::from_toml(
            r#"
            [indicators]
            ma_period = 50

            [forecast]
            horizon = 14
            "#,
        )
        .unwrap();
        assert_eq!(config.indicators.ma_period, 50);
        assert_eq!(config.indicators.rsi_period, 14);
        assert_eq!(config.forecast.horizon, 14);
        assert_eq!(config.forecast.window, 30);
    }

    #[test]
    fn rejects_zero_period() {
        let err = AnalysisConfig::from_toml("[indicators]\nrsi_period = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("rsi_period"));
    }

    #[test]
    fn rejects_inverted_macd_spans() {
        let err =
            AnalysisConfig::from_toml("[indicators]\nmacd_fast = 26\nmacd_slow = 12\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_inverted_rsi_thresholds() {
        let err = AnalysisConfig::from_toml(
            "[indicators]\nrsi_oversold = 80.0\nrsi_overbought = 20.0\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_zero_horizon() {
        let err = AnalysisConfig::from_toml("[forecast]\nhorizon = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = AnalysisConfig::from_toml("[indicators\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[forecast]\nwindow = 10").unwrap();
        let config = AnalysisConfig::from_file(file.path()).unwrap();
        assert_eq!(config.forecast.window, 10);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = AnalysisConfig::from_file(Path::new("/nonexistent/marketsense.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
