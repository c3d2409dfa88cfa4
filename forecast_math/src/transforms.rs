//! Reparameterisation of autoregressive polynomials
//!
//! Maps unconstrained real vectors one-to-one onto coefficient vectors whose
//! polynomial `1 - c_1 B - ... - c_n B^n` has every root outside the unit
//! circle, via partial autocorrelations (Jones 1980, Monahan 1984). Optimisers
//! can then search freely while every candidate stays stationary.

use crate::{MathError, Result};

/// Map an unconstrained vector to stationary autoregressive coefficients
pub fn constrain_stationary(unconstrained: &[f64]) -> Vec<f64> {
    let n = unconstrained.len();
    if n == 0 {
        return Vec::new();
    }

    // Partial autocorrelations in (-1, 1)
    let r: Vec<f64> = unconstrained
        .iter()
        .map(|&x| x / (1.0 + x * x).sqrt())
        .collect();

    // Durbin-Levinson recursion
    let mut y = vec![vec![0.0; n]; n];
    for k in 0..n {
        for i in 0..k {
            y[k][i] = y[k - 1][i] + r[k] * y[k - 1][k - i - 1];
        }
        y[k][k] = r[k];
    }

    y[n - 1].iter().map(|v| -v).collect()
}

/// Inverse of [`constrain_stationary`]
///
/// Fails when the coefficients are not strictly inside the stationary region.
pub fn unconstrain_stationary(constrained: &[f64]) -> Result<Vec<f64>> {
    let n = constrained.len();
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut y = vec![vec![0.0; n]; n];
    for (i, &c) in constrained.iter().enumerate() {
        y[n - 1][i] = -c;
    }

    for k in (1..n).rev() {
        let denom = 1.0 - y[k][k] * y[k][k];
        if denom <= 0.0 {
            return Err(MathError::InvalidInput(
                "Coefficients lie outside the stationary region".to_string(),
            ));
        }
        for i in 0..k {
            y[k - 1][i] = (y[k][i] - y[k][k] * y[k][k - i - 1]) / denom;
        }
    }

    (0..n)
        .map(|k| {
            let r = y[k][k];
            if r.abs() >= 1.0 {
                Err(MathError::InvalidInput(
                    "Coefficients lie outside the stationary region".to_string(),
                ))
            } else {
                Ok(r / (1.0 - r * r).sqrt())
            }
        })
        .collect()
}
