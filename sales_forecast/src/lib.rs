//! # Sales Forecast
//!
//! Turns an uploaded CSV of sales records into a monthly sales series and a
//! seasonal ARIMA forecast with confidence bands.
//!
//! ## Stages
//!
//! 1. **Ingest**: parse the upload into a [`RecordSet`]
//! 2. **Aggregate**: resample the "Order Date" / "Sales" columns to a monthly mean
//! 3. **Model**: fit SARIMA(1,1,1)(1,1,1,12) and forecast 12 months ahead
//! 4. **Present**: build the [`PresentationModel`] the dashboard draws
//!
//! An Augmented Dickey-Fuller test runs between aggregation and modelling. Its
//! result is logged and otherwise unused.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sales_forecast::{render_dashboard, DashboardView, PipelineConfig};
//!
//! let bytes = std::fs::read("sales.csv")?;
//! let config = PipelineConfig::default();
//!
//! match render_dashboard(Some(&bytes), &config)? {
//!     DashboardView::Prompt(message) => println!("{message}"),
//!     DashboardView::Populated(model) => {
//!         for point in model.forecast_result.points() {
//!             println!("{} {:.2} [{:.2}, {:.2}]", point.period, point.mean, point.lower, point.upper);
//!         }
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod presentation;
pub mod stationarity;
pub mod utils;

// Re-export commonly used types
pub use crate::config::{ArimaOrder, PipelineConfig, SeasonalOrder};
pub use crate::data::{MonthlyAggregator, RecordSet, SalesSeries};
pub use crate::error::{ForecastError, PipelineError, Stage};
pub use crate::models::sarima::{FitSummary, FittedSarima, Sarima};
pub use crate::models::{ForecastModel, ForecastPoint, ForecastResult, TrainedForecastModel};
pub use crate::pipeline::{render_dashboard, run_pipeline};
pub use crate::presentation::{DashboardView, PresentationModel, UPLOAD_PROMPT};
pub use crate::stationarity::{adf_test, StationarityReport};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
