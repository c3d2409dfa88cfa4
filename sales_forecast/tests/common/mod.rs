#![allow(dead_code)]

use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;
use statrs::distribution::Normal;
use std::f64::consts::PI;

/// Trend plus a yearly cycle plus Gaussian noise
pub fn seasonal_values(months: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 8.0).unwrap();
    (0..months)
        .map(|i| {
            let t = i as f64;
            250.0 + 1.5 * t + 60.0 * (2.0 * PI * t / 12.0).sin() + noise.sample(&mut rng)
        })
        .collect()
}

/// A sales export with `rows_per_month` orders in each month from January 2018
pub fn sales_csv(months: usize, rows_per_month: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));
    let jitter = Normal::new(0.0, 5.0).unwrap();
    let base = seasonal_values(months, seed);

    let mut csv = String::from("Row ID,Order Date,Region,Sales\n");
    let mut row_id = 1;
    for (i, level) in base.iter().enumerate() {
        let year = 2018 + i / 12;
        let month = i % 12 + 1;
        for j in 0..rows_per_month {
            let day = 1 + (j * 9) % 28;
            let sales = level + jitter.sample(&mut rng);
            csv.push_str(&format!("{row_id},{month}/{day}/{year},West,{sales:.2}\n"));
            row_id += 1;
        }
    }
    csv
}

/// Standard normal draws
pub fn white_noise(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();
    (0..n).map(|_| normal.sample(&mut rng)).collect()
}

/// Cumulative sum of standard normal draws
pub fn random_walk(n: usize, seed: u64) -> Vec<f64> {
    white_noise(n, seed)
        .into_iter()
        .scan(0.0, |level, step| {
            *level += step;
            Some(*level)
        })
        .collect()
}
