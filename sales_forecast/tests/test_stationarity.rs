mod common;

use approx::assert_relative_eq;
use rstest::rstest;
use sales_forecast::stationarity::{adf_test, mackinnon_critical_values};

const SEEDS: std::ops::Range<u64> = 0..10;

#[test]
fn test_random_walk_keeps_unit_root() {
    let rejections = SEEDS
        .filter(|&seed| {
            let report = adf_test(&common::random_walk(200, seed), None).unwrap();
            report.rejects_unit_root(0.05)
        })
        .count();
    assert!(rejections <= 3, "{rejections} of 10 random walks rejected");
}

#[test]
fn test_white_noise_rejects_unit_root() {
    let rejections = SEEDS
        .filter(|&seed| {
            let report = adf_test(&common::white_noise(200, seed), None).unwrap();
            report.rejects_unit_root(0.05)
        })
        .count();
    assert!(rejections >= 9, "only {rejections} of 10 white noise series rejected");
}

#[test]
fn test_report_fields() {
    let values = common::white_noise(100, 42);
    let report = adf_test(&values, None).unwrap();

    // ceil(12 * (100 / 100)^(1/4)) = 12
    assert!(report.used_lag <= 12);
    assert_eq!(report.nobs, values.len() - 1 - report.used_lag);
    assert!(report.p_value >= 0.0 && report.p_value <= 1.0);
    assert!(report.ic_best.is_finite());
    assert_eq!(report.critical_values, mackinnon_critical_values(report.nobs));
    assert!(report.critical_values.one_percent < report.critical_values.five_percent);
}

#[rstest]
#[case(0)]
#[case(2)]
fn test_explicit_max_lag(#[case] max_lag: usize) {
    let values = common::seasonal_values(48, 6);
    let report = adf_test(&values, Some(max_lag)).unwrap();
    assert!(report.used_lag <= max_lag);
}

#[test]
fn test_max_lag_is_capped_for_short_series() {
    // 24 observations cap the lag search at 24 / 2 - 2 = 10
    let values = common::white_noise(24, 8);
    let report = adf_test(&values, Some(50)).unwrap();
    assert!(report.used_lag <= 10);
}

#[test]
fn test_critical_values_for_small_sample() {
    let cv = mackinnon_critical_values(100);
    assert_relative_eq!(
        cv.five_percent,
        -2.86154 - 2.8903 / 100.0 - 4.234 / 10_000.0 - 40.04 / 1_000_000.0,
        epsilon = 1e-12
    );
}

#[test]
fn test_rejects_non_finite_input() {
    assert!(adf_test(&[1.0, f64::NAN, 3.0, 4.0, 5.0, 6.0], None).is_err());
}

#[test]
fn test_constant_series_fails() {
    assert!(adf_test(&[5.0; 40], None).is_err());
}
