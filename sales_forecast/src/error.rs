//! Error types for the sales_forecast crate

use polars::prelude::PolarsError;
use std::fmt;
use thiserror::Error;

/// Custom error types for the sales_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The upload could not be read as delimited tabular data
    #[error("Ingestion error: {0}")]
    IngestError(String),

    /// A column the pipeline needs is absent from the upload
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    /// A date cell could not be parsed as a calendar date
    #[error("Could not parse date '{value}' in row {row}")]
    DateParse { row: usize, value: String },

    /// A cell holds a value of the wrong kind
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Not enough observations to fit the model
    #[error("Insufficient data: need at least {needed} observations, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// The series carries no information the model can use
    #[error("Degenerate series: {0}")]
    DegenerateSeries(String),

    /// Error related to forecasting operations
    #[error("Forecasting error: {0}")]
    ForecastingError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from loading or validating configuration
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Error from mathematical operations
    #[error("Math error: {0}")]
    MathError(#[from] forecast_math::MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}

impl From<toml::de::Error> for ForecastError {
    fn from(err: toml::de::Error) -> Self {
        ForecastError::ConfigError(err.to_string())
    }
}

/// The pipeline stage an error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Ingest,
    Aggregate,
    Model,
    Present,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Ingest => "ingest",
            Stage::Aggregate => "aggregate",
            Stage::Model => "model",
            Stage::Present => "present",
        };
        f.write_str(name)
    }
}

/// A pipeline failure tagged with the stage that raised it
#[derive(Debug, Error)]
#[error("{stage} stage failed: {source}")]
pub struct PipelineError {
    /// Stage that failed
    pub stage: Stage,
    /// Underlying error
    #[source]
    pub source: ForecastError,
}

impl PipelineError {
    /// Wrap an error with the stage it came from
    pub fn new(stage: Stage, source: ForecastError) -> Self {
        Self { stage, source }
    }
}

/// Attach a stage to a `Result`
pub(crate) trait StageExt<T> {
    fn at_stage(self, stage: Stage) -> std::result::Result<T, PipelineError>;
}

impl<T> StageExt<T> for Result<T> {
    fn at_stage(self, stage: Stage) -> std::result::Result<T, PipelineError> {
        self.map_err(|e| PipelineError::new(stage, e))
    }
}
