//! Forecasting models for monthly sales series

use crate::data::SalesSeries;
use crate::error::{ForecastError, Result};
use crate::utils;
use chrono::NaiveDate;
use std::fmt::Debug;

/// One forecast month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastPoint {
    /// Month-end label of the forecast month
    pub period: NaiveDate,
    /// Point forecast
    pub mean: f64,
    /// Lower bound of the interval
    pub lower: f64,
    /// Upper bound of the interval
    pub upper: f64,
}

/// Forecast result: contiguous future months with their intervals
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    points: Vec<ForecastPoint>,
    confidence_level: f64,
}

impl ForecastResult {
    /// Create a new forecast result
    ///
    /// Points must be consecutive months and satisfy `lower <= mean <= upper`.
    pub fn new(points: Vec<ForecastPoint>, confidence_level: f64) -> Result<Self> {
        for pair in points.windows(2) {
            if utils::month_index(pair[1].period) != utils::month_index(pair[0].period) + 1 {
                return Err(ForecastError::ForecastingError(format!(
                    "forecast months {} and {} are not consecutive",
                    pair[0].period, pair[1].period
                )));
            }
        }
        if let Some(bad) = points.iter().find(|p| {
            !(p.mean.is_finite() && p.lower <= p.mean && p.mean <= p.upper)
        }) {
            return Err(ForecastError::ForecastingError(format!(
                "invalid interval for {}: {} <= {} <= {} does not hold",
                bad.period, bad.lower, bad.mean, bad.upper
            )));
        }

        Ok(Self {
            points,
            confidence_level,
        })
    }

    /// Get the forecast points
    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    /// Number of months forecast
    pub fn horizon(&self) -> usize {
        self.points.len()
    }

    /// Coverage of the intervals
    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    pub fn periods(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.period).collect()
    }

    /// Get the point forecasts
    pub fn means(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.mean).collect()
    }

    /// Get the `(lower, upper)` intervals
    pub fn intervals(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.lower, p.upper)).collect()
    }
}

/// Trained forecast model
pub trait TrainedForecastModel: Debug {
    /// Forecast `horizon` months past the training data with intervals of the
    /// given coverage
    fn forecast(&self, horizon: usize, confidence_level: f64) -> Result<ForecastResult>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be trained on a monthly sales series
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model on a monthly series
    fn train(&self, data: &SalesSeries) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

pub mod sarima;
pub mod state_space;
