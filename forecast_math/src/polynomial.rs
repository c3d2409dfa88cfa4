//! Lag polynomials
//!
//! A lag polynomial `c(B) = c_0 + c_1 B + c_2 B^2 + ...` is stored as its
//! coefficient vector `[c_0, c_1, c_2, ...]`.

/// Multiply two lag polynomials
pub fn multiply(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, &ai) in a.iter().enumerate() {
        if ai == 0.0 {
            continue;
        }
        for (j, &bj) in b.iter().enumerate() {
            out[i + j] += ai * bj;
        }
    }
    out
}

/// Raise a lag polynomial to a non-negative integer power
pub fn power(base: &[f64], exponent: usize) -> Vec<f64> {
    let mut out = vec![1.0];
    for _ in 0..exponent {
        out = multiply(&out, base);
    }
    out
}

/// Build `1 + sign * (c_1 B^step + c_2 B^{2 step} + ...)`
///
/// With `sign = -1.0` this is the autoregressive form `1 - phi_1 B - ...`,
/// with `sign = 1.0` the moving-average form `1 + theta_1 B + ...`.
pub fn from_coefficients(coefficients: &[f64], step: usize, sign: f64) -> Vec<f64> {
    let step = step.max(1);
    let mut out = vec![0.0; coefficients.len() * step + 1];
    out[0] = 1.0;
    for (i, &c) in coefficients.iter().enumerate() {
        out[(i + 1) * step] = sign * c;
    }
    out
}

/// The differencing polynomial `(1 - B)^d (1 - B^period)^seasonal_d`
pub fn differencing(d: usize, seasonal_d: usize, period: usize) -> Vec<f64> {
    let nonseasonal = power(&[1.0, -1.0], d);
    let seasonal = if seasonal_d > 0 && period > 0 {
        power(&from_coefficients(&[1.0], period, -1.0), seasonal_d)
    } else {
        vec![1.0]
    };
    multiply(&nonseasonal, &seasonal)
}

/// Impulse-response (psi) weights of `ma(B) / ar(B)`
///
/// Both polynomials must have a leading coefficient of one. Returns the first
/// `count` weights, starting with `psi_0 = 1`.
pub fn psi_weights(ar: &[f64], ma: &[f64], count: usize) -> Vec<f64> {
    let mut psi = Vec::with_capacity(count);
    for j in 0..count {
        let mut value = ma.get(j).copied().unwrap_or(0.0);
        for (i, &a) in ar.iter().enumerate().skip(1).take(j) {
            value -= a * psi[j - i];
        }
        psi.push(value);
    }
    psi
}
