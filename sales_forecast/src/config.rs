//! Pipeline configuration

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Nonseasonal ARIMA order `(p, d, q)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArimaOrder {
    pub p: usize,
    pub d: usize,
    pub q: usize,
}

impl Default for ArimaOrder {
    fn default() -> Self {
        Self { p: 1, d: 1, q: 1 }
    }
}

/// Seasonal order `(P, D, Q, s)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonalOrder {
    pub p: usize,
    pub d: usize,
    pub q: usize,
    pub period: usize,
}

impl SeasonalOrder {
    /// Whether any seasonal term is in use
    pub fn is_active(&self) -> bool {
        self.p + self.d + self.q > 0
    }
}

impl Default for SeasonalOrder {
    fn default() -> Self {
        Self {
            p: 1,
            d: 1,
            q: 1,
            period: 12,
        }
    }
}

/// Settings for one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Column holding the order date
    pub date_column: String,
    /// Column holding the sales amount
    pub value_column: String,
    /// Number of months to forecast
    pub forecast_horizon: usize,
    /// Coverage of the forecast interval, strictly between 0 and 1
    pub confidence_level: f64,
    /// Run the ADF test on the monthly series before modelling
    pub stationarity_check: bool,
    pub order: ArimaOrder,
    pub seasonal_order: SeasonalOrder,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            date_column: "Order Date".to_string(),
            value_column: "Sales".to_string(),
            order: ArimaOrder::default(),
            seasonal_order: SeasonalOrder::default(),
            forecast_horizon: 12,
            confidence_level: 0.95,
            stationarity_check: true,
        }
    }
}

impl PipelineConfig {
    /// Parse and validate a TOML document holding the pipeline fields
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the settings as a TOML document `from_toml_str` reads back
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| ForecastError::ConfigError(e.to_string()))
    }

    /// Load and validate a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ForecastError::ConfigError(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.date_column.trim().is_empty() || self.value_column.trim().is_empty() {
            return Err(ForecastError::ConfigError(
                "column names must not be empty".to_string(),
            ));
        }
        if self.forecast_horizon == 0 {
            return Err(ForecastError::ConfigError(
                "forecast_horizon must be at least 1".to_string(),
            ));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(ForecastError::ConfigError(format!(
                "confidence_level must be strictly between 0 and 1, got {}",
                self.confidence_level
            )));
        }
        if self.seasonal_order.is_active() && self.seasonal_order.period < 2 {
            return Err(ForecastError::ConfigError(format!(
                "seasonal period must be at least 2, got {}",
                self.seasonal_order.period
            )));
        }
        Ok(())
    }
}
