//! # Sales Dashboard
//!
//! Umbrella crate for the sales forecast workspace. It re-exports the
//! numeric toolkit and the forecasting pipeline so both can be reached
//! through one dependency.
//!
//! ## Example
//!
//! ```no_run
//! use sales_dashboard_workspace::pipeline::{render_dashboard, PipelineConfig};
//!
//! let csv = std::fs::read("sales.csv")?;
//! let view = render_dashboard(Some(&csv), &PipelineConfig::default())?;
//! assert!(!view.is_prompt());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use forecast_math as math;

/// The forecasting pipeline and its building blocks.
pub mod pipeline {
    pub use sales_forecast::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_without_upload() {
        let view = pipeline::render_dashboard(None, &pipeline::PipelineConfig::default()).unwrap();
        assert_eq!(view, pipeline::DashboardView::prompt());
    }

    #[test]
    fn test_math_reexport() {
        let diffed = math::differencing::difference(&[1.0, 3.0, 6.0], 1);
        assert_eq!(diffed, vec![2.0, 3.0]);
    }
}
