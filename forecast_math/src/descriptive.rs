//! Descriptive statistics that ignore missing (`NaN`) values

/// Arithmetic mean of the finite values, `None` when there are none
pub fn mean(values: &[f64]) -> Option<f64> {
    let (sum, count) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Population variance of the finite values
pub fn variance(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let (sum_sq, count) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(s, c), v| (s + (v - m).powi(2), c + 1));
    Some(sum_sq / count as f64)
}

/// Population standard deviation of the finite values
pub fn std_dev(values: &[f64]) -> Option<f64> {
    variance(values).map(f64::sqrt)
}

/// Sample autocorrelation at `lag`, using only pairs where both values are finite
pub fn autocorrelation(values: &[f64], lag: usize) -> Option<f64> {
    let m = mean(values)?;
    let denominator: f64 = values
        .iter()
        .filter(|v| v.is_finite())
        .map(|v| (v - m).powi(2))
        .sum();
    if denominator == 0.0 || lag >= values.len() {
        return None;
    }

    let numerator: f64 = values
        .iter()
        .skip(lag)
        .zip(values.iter())
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(a, b)| (a - m) * (b - m))
        .sum();

    Some(numerator / denominator)
}
