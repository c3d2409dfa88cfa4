//! Ordinary least squares
//!
//! Solves the normal equations for a handful of regressors and reports the
//! quantities unit-root tests need: coefficient standard errors, t-values,
//! the Gaussian log-likelihood and information criteria.

use crate::linalg::{invert, Matrix};
use crate::{MathError, Result};
use std::f64::consts::PI;

/// A fitted linear regression `y = X b + e`
#[derive(Debug, Clone)]
pub struct OlsFit {
    /// Estimated coefficients, one per column of `X`
    pub coefficients: Vec<f64>,
    /// Standard errors of the coefficients
    pub standard_errors: Vec<f64>,
    /// Residuals `y - X b`
    pub residuals: Vec<f64>,
    /// Residual sum of squares
    pub ssr: f64,
    /// Number of observations
    pub nobs: usize,
}

impl OlsFit {
    /// Number of estimated coefficients
    pub fn num_params(&self) -> usize {
        self.coefficients.len()
    }

    /// t-statistic of each coefficient
    pub fn t_values(&self) -> Vec<f64> {
        self.coefficients
            .iter()
            .zip(&self.standard_errors)
            .map(|(b, se)| b / se)
            .collect()
    }

    /// Gaussian log-likelihood at the maximum-likelihood variance `ssr / n`
    pub fn log_likelihood(&self) -> f64 {
        let n = self.nobs as f64;
        -0.5 * n * ((2.0 * PI).ln() + (self.ssr / n).ln() + 1.0)
    }

    /// Akaike information criterion
    pub fn aic(&self) -> f64 {
        -2.0 * self.log_likelihood() + 2.0 * self.num_params() as f64
    }

    /// Bayesian information criterion
    pub fn bic(&self) -> f64 {
        -2.0 * self.log_likelihood() + (self.nobs as f64).ln() * self.num_params() as f64
    }
}

/// Fit `y` on the design matrix `x` (one row per observation)
pub fn ols(y: &[f64], x: &Matrix) -> Result<OlsFit> {
    let n = y.len();
    if x.len() != n {
        return Err(MathError::InvalidInput(format!(
            "Design matrix has {} rows but there are {} observations",
            x.len(),
            n
        )));
    }
    let k = x.first().map_or(0, |row| row.len());
    if k == 0 || x.iter().any(|row| row.len() != k) {
        return Err(MathError::InvalidInput(
            "Design matrix rows must be non-empty and of equal length".to_string(),
        ));
    }
    if n <= k {
        return Err(MathError::InsufficientData(format!(
            "Need more than {} observations for {} regressors, got {}",
            k, k, n
        )));
    }

    // Normal equations: (X'X) b = X'y
    let mut xtx = vec![vec![0.0; k]; k];
    let mut xty = vec![0.0; k];
    for (row, &yi) in x.iter().zip(y) {
        for i in 0..k {
            xty[i] += row[i] * yi;
            for j in i..k {
                xtx[i][j] += row[i] * row[j];
            }
        }
    }
    for i in 0..k {
        for j in 0..i {
            xtx[i][j] = xtx[j][i];
        }
    }

    let xtx_inv = invert(&xtx)?;
    let coefficients: Vec<f64> = xtx_inv
        .iter()
        .map(|row| row.iter().zip(&xty).map(|(a, b)| a * b).sum())
        .collect();

    let residuals: Vec<f64> = x
        .iter()
        .zip(y)
        .map(|(row, &yi)| {
            yi - row
                .iter()
                .zip(&coefficients)
                .map(|(a, b)| a * b)
                .sum::<f64>()
        })
        .collect();
    let ssr: f64 = residuals.iter().map(|e| e * e).sum();

    let sigma2 = ssr / (n - k) as f64;
    let standard_errors = (0..k).map(|i| (sigma2 * xtx_inv[i][i]).sqrt()).collect();

    Ok(OlsFit {
        coefficients,
        standard_errors,
        residuals,
        ssr,
        nobs: n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exact_line() {
        let y: Vec<f64> = (0..10).map(|i| 3.0 + 2.0 * i as f64).collect();
        let x: Matrix = (0..10).map(|i| vec![1.0, i as f64]).collect();
        let fit = ols(&y, &x).unwrap();
        assert_relative_eq!(fit.coefficients[0], 3.0, epsilon = 1e-10);
        assert_relative_eq!(fit.coefficients[1], 2.0, epsilon = 1e-10);
        assert!(fit.ssr < 1e-16);
    }

    #[test]
    fn test_standard_errors() {
        // Simple regression with known closed form
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [2.0, 4.1, 5.9, 8.2, 9.8];
        let x: Matrix = xs.iter().map(|&v| vec![1.0, v]).collect();
        let fit = ols(&ys, &x).unwrap();

        let mean_x = 3.0;
        let sxx: f64 = xs.iter().map(|v| (v - mean_x).powi(2)).sum();
        let sigma2 = fit.ssr / 3.0;
        assert_relative_eq!(fit.standard_errors[1], (sigma2 / sxx).sqrt(), epsilon = 1e-12);
        assert_relative_eq!(fit.t_values()[1], fit.coefficients[1] / fit.standard_errors[1]);
    }

    #[test]
    fn test_information_criteria() {
        let y = [1.0, 2.0, 1.5, 3.0, 2.5, 3.5, 3.2, 4.4, 4.1, 5.0];
        let x: Matrix = (0..10).map(|i| vec![1.0, i as f64]).collect();
        let fit = ols(&y, &x).unwrap();
        assert_relative_eq!(fit.aic(), -2.0 * fit.log_likelihood() + 4.0);
        // ln(10) > 2, so BIC penalises harder than AIC
        assert!(fit.bic() > fit.aic());
    }

    #[test]
    fn test_too_few_observations() {
        let x: Matrix = vec![vec![1.0, 0.0], vec![1.0, 1.0]];
        assert!(matches!(
            ols(&[1.0, 2.0], &x),
            Err(MathError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_collinear_design() {
        let x: Matrix = (0..5).map(|i| vec![i as f64, 2.0 * i as f64]).collect();
        let y = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(ols(&y, &x).unwrap_err(), MathError::SingularMatrix);
    }
}
