//! Seasonal ARIMA models estimated by exact maximum likelihood

use crate::config::{ArimaOrder, PipelineConfig, SeasonalOrder};
use crate::data::SalesSeries;
use crate::error::{ForecastError, Result};
use crate::models::state_space::{FilterOutput, StateSpace};
use crate::models::{ForecastModel, ForecastPoint, ForecastResult, TrainedForecastModel};
use crate::utils;
use chrono::NaiveDate;
use forecast_math::descriptive::{autocorrelation, mean, std_dev, variance};
use forecast_math::differencing::full_difference;
use forecast_math::optimization::{nelder_mead, NelderMeadConfig, OptimizationResult};
use forecast_math::polynomial;
use forecast_math::transforms::{constrain_stationary, unconstrain_stationary};
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::{debug, info};

/// Bound on each unconstrained parameter; partial autocorrelations stay within
/// about 0.992 of the unit circle.
const PARAM_BOUND: f64 = 8.0;

/// Largest starting MA coefficient
const START_MA_LIMIT: f64 = 0.5;

/// Seasonal ARIMA model `(p,d,q)(P,D,Q,s)`
#[derive(Debug, Clone)]
pub struct Sarima {
    name: String,
    order: ArimaOrder,
    seasonal: SeasonalOrder,
    optimizer: NelderMeadConfig,
}

/// Estimated coefficients, in the sign convention `phi(B) = 1 - phi_1 B - ...`
/// and `theta(B) = 1 + theta_1 B + ...`
#[derive(Debug, Clone, PartialEq)]
pub struct Coefficients {
    pub ar: Vec<f64>,
    pub ma: Vec<f64>,
    pub seasonal_ar: Vec<f64>,
    pub seasonal_ma: Vec<f64>,
}

/// Summary of a fitted model, in the units of the input series
#[derive(Debug, Clone, PartialEq)]
pub struct FitSummary {
    pub coefficients: Coefficients,
    /// Innovation variance
    pub sigma2: f64,
    pub log_likelihood: f64,
    pub aic: f64,
    pub bic: f64,
    /// Observations contributing to the likelihood
    pub nobs: usize,
    /// Optimiser iterations over all restarts
    pub iterations: usize,
    pub converged: bool,
}

/// A trained seasonal ARIMA model
#[derive(Debug, Clone)]
pub struct FittedSarima {
    name: String,
    summary: FitSummary,
    state_space: StateSpace,
    filtered: FilterOutput,
    /// Centre and scale applied to the series before filtering
    location: f64,
    scale: f64,
    last_period: NaiveDate,
}

impl Sarima {
    /// Create a new seasonal ARIMA model
    pub fn new(order: ArimaOrder, seasonal: SeasonalOrder) -> Result<Self> {
        let seasonal = if seasonal.is_active() {
            if seasonal.period < 2 {
                return Err(ForecastError::InvalidParameter(format!(
                    "seasonal period must be at least 2, got {}",
                    seasonal.period
                )));
            }
            seasonal
        } else {
            SeasonalOrder {
                p: 0,
                d: 0,
                q: 0,
                period: 0,
            }
        };

        let name = if seasonal.is_active() {
            format!(
                "SARIMA({},{},{})({},{},{},{})",
                order.p, order.d, order.q, seasonal.p, seasonal.d, seasonal.q, seasonal.period
            )
        } else {
            format!("ARIMA({},{},{})", order.p, order.d, order.q)
        };

        Ok(Self {
            name,
            order,
            seasonal,
            optimizer: NelderMeadConfig {
                max_iter: 2000,
                initial_step: 0.5,
                ..NelderMeadConfig::default()
            },
        })
    }

    /// Create the model named by a pipeline configuration
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        Self::new(config.order, config.seasonal_order)
    }

    /// Replace the optimiser settings
    pub fn with_optimizer(mut self, optimizer: NelderMeadConfig) -> Self {
        self.optimizer = optimizer;
        self
    }

    /// Number of levels removed by differencing
    pub fn integration_order(&self) -> usize {
        self.order.d + self.seasonal.d * self.seasonal.period
    }

    /// Number of ARMA coefficients
    pub fn num_coefficients(&self) -> usize {
        self.order.p + self.order.q + self.seasonal.p + self.seasonal.q
    }

    /// Fewest observed months the model can be fitted to
    pub fn min_observations(&self) -> usize {
        self.integration_order() + self.num_coefficients() + 1
    }

    /// Map unconstrained parameters to stationary and invertible coefficients
    fn coefficients(&self, params: &[f64]) -> Coefficients {
        let (ar, rest) = params.split_at(self.order.p);
        let (ma, rest) = rest.split_at(self.order.q);
        let (sar, sma) = rest.split_at(self.seasonal.p);
        let negate = |v: Vec<f64>| v.into_iter().map(|c| -c).collect::<Vec<_>>();

        Coefficients {
            ar: constrain_stationary(ar),
            ma: negate(constrain_stationary(ma)),
            seasonal_ar: constrain_stationary(sar),
            seasonal_ma: negate(constrain_stationary(sma)),
        }
    }

    fn state_space(&self, coefficients: &Coefficients) -> StateSpace {
        let period = self.seasonal.period;
        let ar_poly = polynomial::multiply(
            &polynomial::from_coefficients(&coefficients.ar, 1, -1.0),
            &polynomial::from_coefficients(&coefficients.seasonal_ar, period, -1.0),
        );
        let ma_poly = polynomial::multiply(
            &polynomial::from_coefficients(&coefficients.ma, 1, 1.0),
            &polynomial::from_coefficients(&coefficients.seasonal_ma, period, 1.0),
        );
        let diff_poly = polynomial::differencing(self.order.d, self.seasonal.d, period);
        StateSpace::new(&ar_poly, &ma_poly, &diff_poly)
    }

    /// Deterministic starting point: no autoregression, moving-average terms
    /// from the autocorrelations of the differenced series
    fn start_params(&self, differenced: &[f64]) -> Result<Vec<f64>> {
        let start_ma = |lag: usize, count: usize| -> Result<Vec<f64>> {
            if count == 0 {
                return Ok(Vec::new());
            }
            let mut theta = vec![0.0; count];
            theta[0] = autocorrelation(differenced, lag)
                .unwrap_or(0.0)
                .clamp(-START_MA_LIMIT, START_MA_LIMIT);
            let negated: Vec<f64> = theta.iter().map(|c| -c).collect();
            Ok(unconstrain_stationary(&negated)?)
        };

        let mut params = vec![0.0; self.order.p];
        params.extend(start_ma(1, self.order.q)?);
        params.extend(vec![0.0; self.seasonal.p]);
        params.extend(start_ma(self.seasonal.period.max(1), self.seasonal.q)?);
        Ok(params)
    }

    fn minimize<F>(&self, objective: F, start: &[f64]) -> OptimizationResult
    where
        F: Fn(&[f64]) -> f64,
    {
        let limits = vec![(-PARAM_BOUND, PARAM_BOUND); start.len()];
        let bounds = Some(limits.as_slice());
        let first = nelder_mead(&objective, start, bounds, &self.optimizer);
        // One restart from the optimum guards against a collapsed simplex
        let second = nelder_mead(&objective, &first.point, bounds, &self.optimizer);
        let iterations = first.iterations + second.iterations;
        let mut best = if second.value <= first.value { second } else { first };
        best.iterations = iterations;
        best
    }
}

impl ForecastModel for Sarima {
    type Trained = FittedSarima;

    fn train(&self, data: &SalesSeries) -> Result<Self::Trained> {
        let needed = self.min_observations();
        let got = data.observed_count();
        if got < needed {
            return Err(ForecastError::InsufficientData { needed, got });
        }
        let last_period = data.last_period().ok_or(ForecastError::InsufficientData {
            needed,
            got: 0,
        })?;

        let values = data.values_with_gaps();
        let (location, scale) = match (mean(&values), std_dev(&values)) {
            (Some(m), Some(s)) if s > f64::EPSILON * m.abs().max(1.0) => (m, s),
            _ => {
                return Err(ForecastError::DegenerateSeries(
                    "observed sales have no variation".to_string(),
                ))
            }
        };
        let scaled: Vec<f64> = values.iter().map(|v| (v - location) / scale).collect();

        let differenced = full_difference(
            &scaled,
            self.order.d,
            self.seasonal.d,
            self.seasonal.period,
        );
        if let Some(var) = variance(&differenced) {
            if var < 1e-12 {
                return Err(ForecastError::DegenerateSeries(
                    "differencing leaves no variation to model".to_string(),
                ));
            }
        }

        let objective = |params: &[f64]| {
            let model = self.state_space(&self.coefficients(params));
            match model.filter(&scaled) {
                Ok(out) => -out.log_likelihood,
                Err(_) => f64::INFINITY,
            }
        };
        let start = self.start_params(&differenced)?;
        let optimum = self.minimize(objective, &start);

        let coefficients = self.coefficients(&optimum.point);
        let state_space = self.state_space(&coefficients);
        let filtered = state_space.filter(&scaled)?;
        if !filtered.log_likelihood.is_finite() {
            return Err(ForecastError::ForecastingError(
                "log-likelihood at the optimum is not finite".to_string(),
            ));
        }

        // Undo the scaling: each observation's density shrinks by `scale`
        let nobs = filtered.nobs;
        let log_likelihood = filtered.log_likelihood - nobs as f64 * scale.ln();
        let k = (self.num_coefficients() + 1) as f64;
        let summary = FitSummary {
            coefficients,
            sigma2: filtered.sigma2 * scale * scale,
            log_likelihood,
            aic: -2.0 * log_likelihood + 2.0 * k,
            bic: -2.0 * log_likelihood + (nobs as f64).ln() * k,
            nobs,
            iterations: optimum.iterations,
            converged: optimum.converged,
        };

        info!(
            model = %self.name,
            nobs,
            iterations = summary.iterations,
            converged = summary.converged,
            "fitted model"
        );
        debug!(
            coefficients = ?summary.coefficients,
            sigma2 = summary.sigma2,
            aic = summary.aic,
            "fit summary"
        );

        Ok(FittedSarima {
            name: self.name.clone(),
            summary,
            state_space,
            filtered,
            location,
            scale,
            last_period,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FittedSarima {
    /// Estimates and fit statistics
    pub fn summary(&self) -> &FitSummary {
        &self.summary
    }

    /// Last month of the training data
    pub fn last_period(&self) -> NaiveDate {
        self.last_period
    }
}

impl TrainedForecastModel for FittedSarima {
    fn forecast(&self, horizon: usize, confidence_level: f64) -> Result<ForecastResult> {
        if horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "forecast horizon must be at least 1".to_string(),
            ));
        }
        if !(confidence_level > 0.0 && confidence_level < 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "confidence level must be strictly between 0 and 1, got {confidence_level}"
            )));
        }

        let normal = Normal::new(0.0, 1.0)
            .map_err(|e| ForecastError::ForecastingError(e.to_string()))?;
        let z = normal.inverse_cdf((1.0 + confidence_level) / 2.0);

        let predicted = self.state_space.forecast(&self.filtered, horizon);
        let periods = utils::future_month_ends(self.last_period, horizon);

        let points = periods
            .into_iter()
            .zip(predicted.mean.iter().zip(&predicted.variance))
            .map(|(period, (&m, &var))| {
                let mean = self.location + self.scale * m;
                let half_width = z * self.scale * var.sqrt();
                ForecastPoint {
                    period,
                    mean,
                    lower: mean - half_width,
                    upper: mean + half_width,
                }
            })
            .collect();

        ForecastResult::new(points, confidence_level)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
