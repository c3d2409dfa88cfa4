//! Render-ready view of one pipeline run
//!
//! Nothing here draws; the host UI turns these values into widgets.

use crate::data::{RecordSet, SalesSeries};
use crate::error::Result;
use crate::models::sarima::FitSummary;
use crate::models::ForecastResult;
use chrono::NaiveDate;

/// Shown while no file has been uploaded
pub const UPLOAD_PROMPT: &str = "Please upload a CSV file to proceed.";

pub const DASHBOARD_TITLE: &str = "Sales Forecast Dashboard";
pub const DATA_VIEW_TITLE: &str = "Data View";
pub const MONTHLY_TITLE: &str = "Monthly Sales";
pub const FORECAST_TITLE: &str = "Predicted Sales";
pub const X_AXIS_LABEL: &str = "Date";
pub const Y_AXIS_LABEL: &str = "Sales";
pub const OBSERVED_LABEL: &str = "Observed";
pub const FORECAST_LABEL: &str = "Forecast";

/// The raw upload as a grid of text cells
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// A labelled line. Months without a value are left out, breaking the line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub label: String,
    pub points: Vec<(NaiveDate, f64)>,
}

/// Lower and upper bound for one month of the shaded interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandPoint {
    pub period: NaiveDate,
    pub lower: f64,
    pub upper: f64,
}

/// Line chart of the monthly series
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: LineSeries,
}

/// Observed series, forecast line and confidence band on shared axes
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub observed: LineSeries,
    pub forecast: LineSeries,
    pub band: Vec<BandPoint>,
    pub confidence_level: f64,
}

impl ForecastChart {
    /// Smallest and largest value drawn, band included
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        let values = self
            .observed
            .points
            .iter()
            .chain(&self.forecast.points)
            .map(|&(_, v)| v)
            .chain(self.band.iter().flat_map(|b| [b.lower, b.upper]));
        values.fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    /// First and last month on the x axis
    pub fn period_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.observed.points.first().or(self.forecast.points.first())?.0;
        let last = self.forecast.points.last().or(self.observed.points.last())?.0;
        Some((first, last))
    }
}

/// Everything the dashboard shows for one upload
#[derive(Debug, Clone, PartialEq)]
pub struct PresentationModel {
    pub table: DataTable,
    pub monthly: LineChart,
    pub forecast: ForecastChart,
    /// Monthly series behind both charts
    pub series: SalesSeries,
    pub forecast_result: ForecastResult,
    pub model_name: String,
    pub fit: FitSummary,
}

impl PresentationModel {
    /// Assemble the view of one run
    pub fn build(
        records: &RecordSet,
        series: SalesSeries,
        forecast_result: ForecastResult,
        model_name: &str,
        fit: FitSummary,
    ) -> Result<Self> {
        let table = DataTable {
            title: DATA_VIEW_TITLE.to_string(),
            columns: records.column_names(),
            rows: records.rows()?,
        };

        let observed = LineSeries {
            label: OBSERVED_LABEL.to_string(),
            points: series
                .iter()
                .filter_map(|(period, value)| value.map(|v| (period, v)))
                .collect(),
        };

        let monthly = LineChart {
            title: MONTHLY_TITLE.to_string(),
            x_label: X_AXIS_LABEL.to_string(),
            y_label: Y_AXIS_LABEL.to_string(),
            series: LineSeries {
                label: Y_AXIS_LABEL.to_string(),
                points: observed.points.clone(),
            },
        };

        let forecast = ForecastChart {
            title: FORECAST_TITLE.to_string(),
            x_label: X_AXIS_LABEL.to_string(),
            y_label: Y_AXIS_LABEL.to_string(),
            observed,
            forecast: LineSeries {
                label: FORECAST_LABEL.to_string(),
                points: forecast_result
                    .points()
                    .iter()
                    .map(|p| (p.period, p.mean))
                    .collect(),
            },
            band: forecast_result
                .points()
                .iter()
                .map(|p| BandPoint {
                    period: p.period,
                    lower: p.lower,
                    upper: p.upper,
                })
                .collect(),
            confidence_level: forecast_result.confidence_level(),
        };

        Ok(Self {
            table,
            monthly,
            forecast,
            series,
            forecast_result,
            model_name: model_name.to_string(),
            fit,
        })
    }
}

/// What the dashboard displays
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    /// No upload yet
    Prompt(String),
    Populated(Box<PresentationModel>),
}

impl DashboardView {
    pub fn prompt() -> Self {
        DashboardView::Prompt(UPLOAD_PROMPT.to_string())
    }

    pub fn is_prompt(&self) -> bool {
        matches!(self, DashboardView::Prompt(_))
    }
}
