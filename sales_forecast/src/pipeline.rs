//! The forecast pipeline: Ingest, Aggregate, Model, Present
//!
//! Each call runs every stage from scratch; nothing is kept between uploads.

use crate::config::PipelineConfig;
use crate::data::{MonthlyAggregator, RecordSet, SalesSeries};
use crate::error::{PipelineError, Stage, StageExt};
use crate::models::sarima::Sarima;
use crate::models::{ForecastModel, TrainedForecastModel};
use crate::presentation::{DashboardView, PresentationModel};
use crate::stationarity::adf_test;
use tracing::{debug, info, warn};

/// Run every stage on an uploaded CSV
pub fn run_pipeline(
    bytes: &[u8],
    config: &PipelineConfig,
) -> Result<PresentationModel, PipelineError> {
    config.validate().at_stage(Stage::Ingest)?;

    let records = RecordSet::from_bytes(bytes).at_stage(Stage::Ingest)?;
    info!(
        rows = records.len(),
        columns = records.column_names().len(),
        "ingested upload"
    );

    let series = MonthlyAggregator::new(&config.date_column, &config.value_column)
        .aggregate(&records)
        .at_stage(Stage::Aggregate)?;
    info!(
        months = series.len(),
        observed = series.observed_count(),
        "aggregated monthly sales"
    );

    if config.stationarity_check {
        check_stationarity(&series);
    }

    let model = Sarima::from_config(config).at_stage(Stage::Model)?;
    let fitted = model.train(&series).at_stage(Stage::Model)?;
    let forecast = fitted
        .forecast(config.forecast_horizon, config.confidence_level)
        .at_stage(Stage::Model)?;
    info!(
        model = fitted.name(),
        horizon = forecast.horizon(),
        "forecast complete"
    );

    PresentationModel::build(
        &records,
        series,
        forecast,
        fitted.name(),
        fitted.summary().clone(),
    )
    .at_stage(Stage::Present)
}

/// Show the prompt when nothing is uploaded, otherwise run the pipeline
pub fn render_dashboard(
    upload: Option<&[u8]>,
    config: &PipelineConfig,
) -> Result<DashboardView, PipelineError> {
    match upload {
        None => Ok(DashboardView::prompt()),
        Some(bytes) => {
            let model = run_pipeline(bytes, config)?;
            Ok(DashboardView::Populated(Box::new(model)))
        }
    }
}

/// ADF test on the observed months; the outcome is only logged
fn check_stationarity(series: &SalesSeries) {
    match adf_test(&series.observed_values(), None) {
        Ok(report) => debug!(
            statistic = report.statistic,
            p_value = report.p_value,
            used_lag = report.used_lag,
            nobs = report.nobs,
            "stationarity check"
        ),
        Err(e) => warn!(error = %e, "stationarity check failed"),
    }
}
