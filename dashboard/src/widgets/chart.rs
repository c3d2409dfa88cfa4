//! Chart widgets for the monthly and forecast views.

use chrono::NaiveDate;
use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
};
use sales_forecast::presentation::{ForecastChart, LineChart, LineSeries};
use sales_forecast::utils;

/// Vertical dots per month in the shaded interval
const BAND_ROWS: usize = 16;
/// Horizontal dots per month in the shaded interval
const BAND_COLUMNS: usize = 4;

/// Chart points in owned buffers the datasets borrow from.
///
/// The x coordinate is the month index, so consecutive months are one apart.
#[derive(Debug, Clone, Default)]
pub struct ChartData {
    /// Runs of consecutive observed months
    observed: Vec<Vec<(f64, f64)>>,
    forecast: Vec<(f64, f64)>,
    band: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

fn month_x(period: NaiveDate) -> f64 {
    utils::month_index(period) as f64
}

fn month_label(x: f64) -> String {
    utils::month_end_from_index(x.round() as i32)
        .map(|d| d.format("%Y-%m").to_string())
        .unwrap_or_default()
}

/// Split a series into runs without missing months
fn segments(series: &LineSeries) -> Vec<Vec<(f64, f64)>> {
    let mut runs: Vec<Vec<(f64, f64)>> = Vec::new();
    for &(period, value) in &series.points {
        let point = (month_x(period), value);
        let continues = runs
            .last()
            .and_then(|run| run.last())
            .map_or(false, |&(x, _)| point.0 - x == 1.0);
        if continues {
            if let Some(run) = runs.last_mut() {
                run.push(point);
                continue;
            }
        }
        runs.push(vec![point]);
    }
    runs
}

fn padded_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return [0.0, 1.0];
    }
    let pad = ((hi - lo) * 0.05).max(1.0);
    [lo - pad, hi + pad]
}

impl ChartData {
    pub fn monthly(chart: &LineChart) -> Self {
        let observed = segments(&chart.series);
        let xs = observed.iter().flatten().map(|&(x, _)| x);
        let x_bounds = padded_x(xs);
        let y_bounds = padded_bounds(observed.iter().flatten().map(|&(_, y)| y));
        Self {
            observed,
            x_bounds,
            y_bounds,
            ..Self::default()
        }
    }

    pub fn forecast(chart: &ForecastChart) -> Self {
        let observed = segments(&chart.observed);
        let forecast: Vec<(f64, f64)> = chart
            .forecast
            .points
            .iter()
            .map(|&(period, value)| (month_x(period), value))
            .collect();

        // Shade the interval with a grid of dots, interpolating between months
        let mut band = Vec::new();
        for pair in chart.band.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            for col in 0..BAND_COLUMNS {
                let t = col as f64 / BAND_COLUMNS as f64;
                let x = month_x(a.period) + t;
                let lower = a.lower + t * (b.lower - a.lower);
                let upper = a.upper + t * (b.upper - a.upper);
                band.extend(column(x, lower, upper));
            }
        }
        if let Some(last) = chart.band.last() {
            band.extend(column(month_x(last.period), last.lower, last.upper));
        }

        let xs = observed
            .iter()
            .flatten()
            .chain(&forecast)
            .map(|&(x, _)| x);
        let x_bounds = padded_x(xs);
        let y_bounds = match chart.value_bounds() {
            Some((lo, hi)) => padded_bounds([lo, hi].into_iter()),
            None => [0.0, 1.0],
        };

        Self {
            observed,
            forecast,
            band,
            x_bounds,
            y_bounds,
        }
    }

    /// Build the chart widget borrowing these points.
    pub fn chart<'a>(&'a self, title: &str, x_label: &'a str, y_label: &'a str) -> Chart<'a> {
        let mut datasets = Vec::new();

        if !self.band.is_empty() {
            datasets.push(
                Dataset::default()
                    .marker(Marker::Dot)
                    .graph_type(GraphType::Scatter)
                    .style(Style::default().fg(Color::LightRed))
                    .data(&self.band),
            );
        }

        for (i, run) in self.observed.iter().enumerate() {
            let mut dataset = Dataset::default()
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Cyan))
                .data(run);
            if i == 0 {
                dataset = dataset.name(sales_forecast::presentation::OBSERVED_LABEL);
            }
            datasets.push(dataset);
        }

        if !self.forecast.is_empty() {
            datasets.push(
                Dataset::default()
                    .name(sales_forecast::presentation::FORECAST_LABEL)
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(Color::Red))
                    .data(&self.forecast),
            );
        }

        let [x_min, x_max] = self.x_bounds;
        let [y_min, y_max] = self.y_bounds;

        Chart::new(datasets)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {title} ")),
            )
            .x_axis(
                Axis::default()
                    .title(x_label)
                    .style(Style::default().fg(Color::Gray))
                    .bounds(self.x_bounds)
                    .labels(vec![
                        Span::raw(month_label(x_min)),
                        Span::raw(month_label((x_min + x_max) / 2.0)),
                        Span::raw(month_label(x_max)),
                    ]),
            )
            .y_axis(
                Axis::default()
                    .title(y_label)
                    .style(Style::default().fg(Color::Gray))
                    .bounds(self.y_bounds)
                    .labels(vec![
                        Span::raw(format!("{:.1}", y_min)),
                        Span::raw(format!("{:.1}", (y_min + y_max) / 2.0)),
                        Span::raw(format!("{:.1}", y_max)),
                    ]),
            )
    }
}

fn padded_x(xs: impl Iterator<Item = f64>) -> [f64; 2] {
    let (lo, hi) = xs.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
        (lo.min(x), hi.max(x))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return [0.0, 1.0];
    }
    [lo, hi.max(lo + 1.0)]
}

fn column(x: f64, lower: f64, upper: f64) -> impl Iterator<Item = (f64, f64)> {
    (0..=BAND_ROWS).map(move |row| {
        let t = row as f64 / BAND_ROWS as f64;
        (x, lower + t * (upper - lower))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sales_forecast::presentation::BandPoint;

    fn month(year: i32, month: u32) -> NaiveDate {
        utils::month_end(NaiveDate::from_ymd_opt(year, month, 1).unwrap()).unwrap()
    }

    #[test]
    fn test_segments_break_at_gaps() {
        let series = LineSeries {
            label: "Sales".to_string(),
            points: vec![
                (month(2021, 1), 1.0),
                (month(2021, 2), 2.0),
                (month(2021, 5), 5.0),
            ],
        };
        let runs = segments(&series);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].len(), 2);
        assert_eq!(runs[1].len(), 1);
    }

    #[test]
    fn test_forecast_band_is_filled() {
        let chart = ForecastChart {
            title: "Predicted Sales".to_string(),
            x_label: "Date".to_string(),
            y_label: "Sales".to_string(),
            observed: LineSeries {
                label: "Observed".to_string(),
                points: vec![(month(2021, 12), 10.0)],
            },
            forecast: LineSeries {
                label: "Forecast".to_string(),
                points: vec![(month(2022, 1), 11.0), (month(2022, 2), 12.0)],
            },
            band: vec![
                BandPoint {
                    period: month(2022, 1),
                    lower: 9.0,
                    upper: 13.0,
                },
                BandPoint {
                    period: month(2022, 2),
                    lower: 8.0,
                    upper: 16.0,
                },
            ],
            confidence_level: 0.95,
        };

        let data = ChartData::forecast(&chart);
        assert_eq!(data.band.len(), (BAND_COLUMNS + 1) * (BAND_ROWS + 1));
        assert!(data.y_bounds[0] < 8.0 && data.y_bounds[1] > 16.0);
        assert_eq!(data.x_bounds[1] - data.x_bounds[0], 2.0);
        assert!(data
            .band
            .iter()
            .all(|&(_, y)| (8.0..=16.0).contains(&y)));
    }

    #[test]
    fn test_month_labels() {
        assert_eq!(month_label(month_x(month(2020, 7))), "2020-07");
    }
}
