//! Differencing operators for integrated time series
//!
//! Missing observations are represented as `NaN` and propagate: a differenced
//! value is `NaN` whenever either of its inputs is.

/// Apply the first-difference operator `d` times
pub fn difference(series: &[f64], d: usize) -> Vec<f64> {
    let mut result = series.to_vec();
    for _ in 0..d {
        if result.len() <= 1 {
            return Vec::new();
        }
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }
    result
}

/// Apply the seasonal difference operator `(1 - B^period)` `d` times
pub fn seasonal_difference(series: &[f64], d: usize, period: usize) -> Vec<f64> {
    if period == 0 {
        return series.to_vec();
    }

    let mut result = series.to_vec();
    for _ in 0..d {
        if result.len() <= period {
            return Vec::new();
        }
        result = result
            .iter()
            .skip(period)
            .zip(result.iter())
            .map(|(current, lagged)| current - lagged)
            .collect();
    }
    result
}

/// Apply `(1 - B)^d (1 - B^period)^seasonal_d` to a series
pub fn full_difference(series: &[f64], d: usize, seasonal_d: usize, period: usize) -> Vec<f64> {
    let seasonal = seasonal_difference(series, seasonal_d, period);
    difference(&seasonal, d)
}
