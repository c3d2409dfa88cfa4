//! Kalman filter for integrated ARMA processes
//!
//! The state stacks the `k` most recent levels removed by differencing on top
//! of the Harvey-form ARMA state of the differenced series:
//!
//! ```text
//! alpha_t = [y_{t-1}, ..., y_{t-k}, a_t]
//! y_t     = delta_1 y_{t-1} + ... + delta_k y_{t-k} + a_t[0]
//! ```
//!
//! The level block starts approximately diffuse and the ARMA block from its
//! stationary distribution. Covariances are in units of the innovation
//! variance, which is concentrated out of the likelihood.

use crate::error::{ForecastError, Result};
use forecast_math::linalg::{self, Matrix};
use std::f64::consts::PI;

/// Prior variance of the level block
const DIFFUSE_VARIANCE: f64 = 1e6;

/// Doublings allowed when solving for the stationary ARMA covariance
const LYAPUNOV_MAX_ITER: usize = 64;

/// Transition structure of an integrated ARMA model
#[derive(Debug, Clone)]
pub struct StateSpace {
    /// `delta_i`, the weights of past levels in the integrated series
    level_weights: Vec<f64>,
    /// AR coefficients of the ARMA block, padded to its dimension
    ar: Vec<f64>,
    /// Noise loading `[1, theta_1, ...]` of the ARMA block
    loading: Vec<f64>,
}

/// State of the filter after the last observation
#[derive(Debug, Clone)]
pub struct FilterOutput {
    /// Concentrated log-likelihood
    pub log_likelihood: f64,
    /// Estimated innovation variance
    pub sigma2: f64,
    /// Observations contributing to the likelihood
    pub nobs: usize,
    /// Predicted state for the period after the sample
    state: Vec<f64>,
    /// Predicted state covariance, innovation-variance units
    cov: Matrix,
}

/// Multi-step predictions of the observed series
#[derive(Debug, Clone, PartialEq)]
pub struct StateForecast {
    pub mean: Vec<f64>,
    pub variance: Vec<f64>,
}

impl StateSpace {
    /// Build the model from lag polynomials with unit leading coefficients
    ///
    /// `ar_poly` is `1 - phi_1 B - ...`, `ma_poly` is `1 + theta_1 B + ...` and
    /// `diff_poly` is the differencing polynomial `1 + c_1 B + ...`.
    pub fn new(ar_poly: &[f64], ma_poly: &[f64], diff_poly: &[f64]) -> Self {
        let phi: Vec<f64> = ar_poly.iter().skip(1).map(|c| -c).collect();
        let theta: Vec<f64> = ma_poly.iter().skip(1).copied().collect();
        let r = phi.len().max(theta.len() + 1);

        let mut ar = vec![0.0; r];
        ar[..phi.len()].copy_from_slice(&phi);
        let mut loading = vec![0.0; r];
        loading[0] = 1.0;
        loading[1..=theta.len()].copy_from_slice(&theta);

        Self {
            level_weights: diff_poly.iter().skip(1).map(|c| -c).collect(),
            ar,
            loading,
        }
    }

    /// Number of levels carried in the state
    pub fn integration_order(&self) -> usize {
        self.level_weights.len()
    }

    /// Dimension of the state vector
    pub fn dim(&self) -> usize {
        self.level_weights.len() + self.ar.len()
    }

    /// `Z x`
    fn observe(&self, x: &[f64]) -> f64 {
        let k = self.level_weights.len();
        linalg::dot(&self.level_weights, &x[..k]) + x[k]
    }

    /// `T x`, using the sparsity of the transition matrix
    fn transition(&self, x: &[f64]) -> Vec<f64> {
        let k = self.level_weights.len();
        let r = self.ar.len();
        let mut out = vec![0.0; k + r];
        if k > 0 {
            out[0] = self.observe(x);
            out[1..k].copy_from_slice(&x[..k - 1]);
        }
        let head = x[k];
        for i in 0..r {
            let next = if i + 1 < r { x[k + i + 1] } else { 0.0 };
            out[k + i] = self.ar[i] * head + next;
        }
        out
    }

    /// `T P T' + R R'` for a symmetric `P`
    fn propagate(&self, p: &Matrix) -> Matrix {
        let m = self.dim();
        let k = self.level_weights.len();

        // Columns of T P; P is symmetric so its rows are its columns
        let tp_cols: Vec<Vec<f64>> = p.iter().map(|row| self.transition(row)).collect();

        let mut out: Matrix = (0..m)
            .map(|i| {
                let row: Vec<f64> = tp_cols.iter().map(|col| col[i]).collect();
                self.transition(&row)
            })
            .collect();

        for (i, &ri) in self.loading.iter().enumerate() {
            for (j, &rj) in self.loading.iter().enumerate() {
                out[k + i][k + j] += ri * rj;
            }
        }
        linalg::symmetrize(out)
    }

    /// Prior mean and covariance of the first state
    fn initial_state(&self) -> Result<(Vec<f64>, Matrix)> {
        let k = self.level_weights.len();
        let r = self.ar.len();

        let mut companion = linalg::zeros(r, r);
        for i in 0..r {
            companion[i][0] = self.ar[i];
            if i + 1 < r {
                companion[i][i + 1] = 1.0;
            }
        }
        let noise = linalg::outer(&self.loading, &self.loading);
        let stationary = linalg::solve_discrete_lyapunov(&companion, &noise, LYAPUNOV_MAX_ITER)?;

        let mut cov = linalg::zeros(k + r, k + r);
        for (i, row) in cov.iter_mut().enumerate().take(k) {
            row[i] = DIFFUSE_VARIANCE;
        }
        for i in 0..r {
            cov[k + i][k..].copy_from_slice(&stationary[i]);
        }
        Ok((vec![0.0; k + r], cov))
    }

    /// Run the filter over `y`, where NaN marks a missing observation
    ///
    /// The first `k` periods are burned from the likelihood while the diffuse
    /// levels resolve. Missing periods are predicted but not updated.
    pub fn filter(&self, y: &[f64]) -> Result<FilterOutput> {
        let burn = self.level_weights.len();
        let (mut state, mut cov) = self.initial_state()?;

        let mut sum_sq = 0.0;
        let mut sum_log_f = 0.0;
        let mut nobs = 0;

        for (t, &obs) in y.iter().enumerate() {
            if obs.is_finite() {
                let pz: Vec<f64> = cov.iter().map(|row| self.observe(row)).collect();
                let f = self.observe(&pz);
                if !(f.is_finite() && f > 0.0) {
                    return Err(ForecastError::ForecastingError(format!(
                        "prediction variance {f} at period {t} is not positive"
                    )));
                }
                let v = obs - self.observe(&state);

                for (s, &g) in state.iter_mut().zip(&pz) {
                    *s += g * v / f;
                }
                for (row, &gi) in cov.iter_mut().zip(&pz) {
                    for (c, &gj) in row.iter_mut().zip(&pz) {
                        *c -= gi * gj / f;
                    }
                }

                if t >= burn {
                    sum_sq += v * v / f;
                    sum_log_f += f.ln();
                    nobs += 1;
                }
            }

            state = self.transition(&state);
            cov = self.propagate(&cov);
        }

        if nobs == 0 {
            return Err(ForecastError::InsufficientData {
                needed: burn + 1,
                got: y.iter().filter(|v| v.is_finite()).count(),
            });
        }
        let sigma2 = sum_sq / nobs as f64;
        if !(sigma2.is_finite() && sigma2 > 0.0) {
            return Err(ForecastError::ForecastingError(format!(
                "innovation variance {sigma2} is not positive"
            )));
        }

        let n = nobs as f64;
        let log_likelihood = -0.5 * n * ((2.0 * PI).ln() + sigma2.ln() + 1.0) - 0.5 * sum_log_f;

        Ok(FilterOutput {
            log_likelihood,
            sigma2,
            nobs,
            state,
            cov,
        })
    }

    /// Predict the `horizon` periods after the filtered sample
    pub fn forecast(&self, output: &FilterOutput, horizon: usize) -> StateForecast {
        let mut state = output.state.clone();
        let mut cov = output.cov.clone();
        let mut mean = Vec::with_capacity(horizon);
        let mut variance = Vec::with_capacity(horizon);

        for _ in 0..horizon {
            mean.push(self.observe(&state));
            let pz: Vec<f64> = cov.iter().map(|row| self.observe(row)).collect();
            variance.push(self.observe(&pz).max(0.0) * output.sigma2);

            state = self.transition(&state);
            cov = self.propagate(&cov);
        }

        StateForecast { mean, variance }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ar1_matches_exact_likelihood() {
        let phi: f64 = 0.6;
        let y = [0.3, -0.2, 0.5, 1.1, 0.4, -0.7, -0.1, 0.2];
        let model = StateSpace::new(&[1.0, -phi], &[1.0], &[1.0]);
        let out = model.filter(&y).unwrap();

        // Prediction errors and variances of the exact AR(1) likelihood
        let mut terms = vec![(y[0], 1.0 / (1.0 - phi * phi))];
        for t in 1..y.len() {
            terms.push((y[t] - phi * y[t - 1], 1.0));
        }
        let n = y.len() as f64;
        let sigma2 = terms.iter().map(|(v, f)| v * v / f).sum::<f64>() / n;
        let sum_log_f: f64 = terms.iter().map(|(_, f)| f.ln()).sum();
        let expected = -0.5 * n * ((2.0 * PI).ln() + sigma2.ln() + 1.0) - 0.5 * sum_log_f;

        assert_eq!(out.nobs, y.len());
        assert_relative_eq!(out.sigma2, sigma2, epsilon = 1e-10);
        assert_relative_eq!(out.log_likelihood, expected, epsilon = 1e-10);
    }

    #[test]
    fn test_random_walk_forecast() {
        let y = [1.0, 1.5, 1.2, 2.0, 2.4, 2.1, 2.9, 3.3];
        let model = StateSpace::new(&[1.0], &[1.0], &[1.0, -1.0]);
        assert_eq!(model.integration_order(), 1);
        assert_eq!(model.dim(), 2);

        let out = model.filter(&y).unwrap();
        let diffs: Vec<f64> = y.windows(2).map(|w| w[1] - w[0]).collect();
        let sigma2 = diffs.iter().map(|d| d * d).sum::<f64>() / diffs.len() as f64;
        assert_eq!(out.nobs, y.len() - 1);
        assert_relative_eq!(out.sigma2, sigma2, max_relative = 1e-6);

        let forecast = model.forecast(&out, 3);
        for (h, (&mean, &var)) in forecast.mean.iter().zip(&forecast.variance).enumerate() {
            assert_relative_eq!(mean, 3.3, epsilon = 1e-6);
            assert_relative_eq!(var, (h + 1) as f64 * sigma2, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_forecast_variance_matches_psi_weights() {
        let y: Vec<f64> = (0..40)
            .map(|t| {
                let t = t as f64;
                0.1 * t + (0.7 * t).sin() + 0.3 * (1.9 * t).cos()
            })
            .collect();
        let (ar, ma, diff) = ([1.0, -0.5], [1.0, 0.4], [1.0, -1.0]);
        let model = StateSpace::new(&ar, &ma, &diff);
        let out = model.filter(&y).unwrap();
        let forecast = model.forecast(&out, 6);

        // h-step variance is sigma2 times the sum of the first h squared psi weights
        let integrated = forecast_math::polynomial::multiply(&ar, &diff);
        let psi = forecast_math::polynomial::psi_weights(&integrated, &ma, 6);
        let mut cumulative = 0.0;
        for (h, &var) in forecast.variance.iter().enumerate() {
            cumulative += psi[h] * psi[h];
            assert_relative_eq!(var, out.sigma2 * cumulative, max_relative = 1e-4);
        }
    }

    #[test]
    fn test_missing_values_are_skipped() {
        let y = [1.0, 1.5, f64::NAN, 2.0, 2.4, 2.1];
        let model = StateSpace::new(&[1.0], &[1.0], &[1.0, -1.0]);
        let out = model.filter(&y).unwrap();
        assert_eq!(out.nobs, 4);
        assert!(out.log_likelihood.is_finite());
    }

    #[test]
    fn test_seasonal_state_dimension() {
        let diff = forecast_math::polynomial::differencing(1, 1, 12);
        let ar = forecast_math::polynomial::multiply(&[1.0, -0.3], &{
            let mut p = vec![0.0; 13];
            p[0] = 1.0;
            p[12] = -0.2;
            p
        });
        let ma = forecast_math::polynomial::multiply(&[1.0, 0.4], &{
            let mut p = vec![0.0; 13];
            p[0] = 1.0;
            p[12] = 0.1;
            p
        });
        let model = StateSpace::new(&ar, &ma, &diff);
        assert_eq!(model.integration_order(), 13);
        assert_eq!(model.dim(), 27);
    }
}
