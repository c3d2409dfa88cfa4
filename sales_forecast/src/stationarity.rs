//! Augmented Dickey-Fuller unit-root test
//!
//! Regression with a constant, lag length chosen by AIC. P-values follow
//! MacKinnon (1994) and critical values MacKinnon (2010).

use crate::error::{ForecastError, Result};
use forecast_math::linalg::Matrix;
use forecast_math::regression::{ols, OlsFit};
use statrs::distribution::{ContinuousCDF, Normal};

/// Response-surface bounds for the constant-only regression with one variable
const TAU_MAX: f64 = 2.74;
const TAU_MIN: f64 = -18.83;
const TAU_STAR: f64 = -1.61;
const TAU_SMALL_P: [f64; 3] = [2.1659, 1.4412, 0.038269];
const TAU_LARGE_P: [f64; 4] = [1.7339, 0.93202, -0.12745, -0.010368];

/// Critical value surfaces `b0 + b1/n + b2/n^2 + b3/n^3` at 1%, 5% and 10%
const CRITICAL_1: [f64; 4] = [-3.43035, -6.5393, -16.786, -79.433];
const CRITICAL_5: [f64; 4] = [-2.86154, -2.8903, -4.234, -40.04];
const CRITICAL_10: [f64; 4] = [-2.56677, -1.5384, -2.809, 0.0];

/// Critical values of the test statistic
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalValues {
    pub one_percent: f64,
    pub five_percent: f64,
    pub ten_percent: f64,
}

/// Outcome of an ADF test
#[derive(Debug, Clone, PartialEq)]
pub struct StationarityReport {
    /// t-value of the lagged level
    pub statistic: f64,
    /// Approximate p-value of `statistic`
    pub p_value: f64,
    /// Number of lagged differences in the chosen regression
    pub used_lag: usize,
    /// Observations in the chosen regression
    pub nobs: usize,
    pub critical_values: CriticalValues,
    /// AIC of the chosen regression on the common lag-search sample
    pub ic_best: f64,
}

impl StationarityReport {
    /// Whether the unit root is rejected at `significance`
    pub fn rejects_unit_root(&self, significance: f64) -> bool {
        self.p_value < significance
    }
}

/// Run the test on a gap-free series
///
/// `max_lag` defaults to `ceil(12 * (n / 100)^(1/4))`. Either way it is capped
/// at `n / 2 - 2`.
pub fn adf_test(values: &[f64], max_lag: Option<usize>) -> Result<StationarityReport> {
    let n = values.len();
    if values.iter().any(|v| !v.is_finite()) {
        return Err(ForecastError::InvalidValue(
            "stationarity test needs finite values".to_string(),
        ));
    }

    let cap = (n / 2) as i64 - 2;
    if cap < 0 {
        return Err(ForecastError::InsufficientData { needed: 4, got: n });
    }
    let default_lag = (12.0 * (n as f64 / 100.0).powf(0.25)).ceil() as usize;
    let max_lag = max_lag.unwrap_or(default_lag).min(cap as usize);

    let diffs: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();

    // Lag search on the sample the largest lag leaves
    let mut best: Option<(usize, f64)> = None;
    for lags in 0..=max_lag {
        let fit = regress(values, &diffs, lags, max_lag)?;
        let aic = fit.aic();
        if best.map_or(true, |(_, ic)| aic < ic) {
            best = Some((lags, aic));
        }
    }
    let (used_lag, ic_best) = best.ok_or_else(|| {
        ForecastError::ForecastingError("no lag length could be evaluated".to_string())
    })?;

    let fit = regress(values, &diffs, used_lag, used_lag)?;
    let statistic = fit.t_values()[0];
    if !statistic.is_finite() {
        return Err(ForecastError::DegenerateSeries(
            "test statistic is not finite; the series may be constant".to_string(),
        ));
    }

    Ok(StationarityReport {
        statistic,
        p_value: mackinnon_p_value(statistic)?,
        used_lag,
        nobs: fit.nobs,
        critical_values: mackinnon_critical_values(fit.nobs),
        ic_best,
    })
}

/// Regress `diff_t` on `[level_t, diff_{t-1} .. diff_{t-lags}, 1]` for `t >= start`
fn regress(levels: &[f64], diffs: &[f64], lags: usize, start: usize) -> Result<OlsFit> {
    let y: Vec<f64> = diffs[start..].to_vec();
    let x: Matrix = (start..diffs.len())
        .map(|t| {
            let mut row = Vec::with_capacity(lags + 2);
            row.push(levels[t]);
            row.extend((1..=lags).map(|j| diffs[t - j]));
            row.push(1.0);
            row
        })
        .collect();
    Ok(ols(&y, &x)?)
}

fn polyval(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// MacKinnon (1994) approximate p-value
pub fn mackinnon_p_value(statistic: f64) -> Result<f64> {
    if statistic > TAU_MAX {
        return Ok(1.0);
    }
    if statistic < TAU_MIN {
        return Ok(0.0);
    }
    let coefficients: &[f64] = if statistic <= TAU_STAR {
        &TAU_SMALL_P
    } else {
        &TAU_LARGE_P
    };
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| ForecastError::ForecastingError(e.to_string()))?;
    Ok(normal.cdf(polyval(coefficients, statistic)))
}

/// MacKinnon (2010) finite-sample critical values for `nobs` observations
pub fn mackinnon_critical_values(nobs: usize) -> CriticalValues {
    let inv = 1.0 / nobs as f64;
    CriticalValues {
        one_percent: polyval(&CRITICAL_1, inv),
        five_percent: polyval(&CRITICAL_5, inv),
        ten_percent: polyval(&CRITICAL_10, inv),
    }
}
