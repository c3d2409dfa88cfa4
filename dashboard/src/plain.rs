//! Plain-text rendering of the dashboard for non-interactive use.

use sales_forecast::presentation::{DATA_VIEW_TITLE, FORECAST_TITLE, MONTHLY_TITLE};
use sales_forecast::{DashboardView, PresentationModel};
use std::fmt::Write;

/// Rows of the upload echoed before the table is elided
const PREVIEW_ROWS: usize = 10;

/// Render the view as a text report, one section per tab.
pub fn render_report(view: &DashboardView) -> String {
    match view {
        DashboardView::Prompt(message) => format!("{message}\n"),
        DashboardView::Populated(model) => render_model(model),
    }
}

fn render_model(model: &PresentationModel) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_data(&mut out, model);
    let _ = write_monthly(&mut out, model);
    let _ = write_forecast(&mut out, model);
    out
}

fn write_data(out: &mut String, model: &PresentationModel) -> std::fmt::Result {
    let table = &model.table;
    writeln!(out, "== {DATA_VIEW_TITLE} ({} rows) ==", table.rows.len())?;
    writeln!(out, "{}", table.columns.join(" | "))?;
    for row in table.rows.iter().take(PREVIEW_ROWS) {
        writeln!(out, "{}", row.join(" | "))?;
    }
    if table.rows.len() > PREVIEW_ROWS {
        writeln!(out, "... {} more rows", table.rows.len() - PREVIEW_ROWS)?;
    }
    writeln!(out)
}

fn write_monthly(out: &mut String, model: &PresentationModel) -> std::fmt::Result {
    writeln!(out, "== {MONTHLY_TITLE} ==")?;
    for (period, value) in model.series.iter() {
        match value {
            Some(v) => writeln!(out, "{}  {v:>12.2}", period.format("%Y-%m"))?,
            None => writeln!(out, "{}  {:>12}", period.format("%Y-%m"), "-")?,
        }
    }
    writeln!(out)
}

fn write_forecast(out: &mut String, model: &PresentationModel) -> std::fmt::Result {
    let result = &model.forecast_result;
    let fit = &model.fit;
    writeln!(out, "== {FORECAST_TITLE} ==")?;
    writeln!(
        out,
        "{}  sigma2={:.4}  loglik={:.2}  AIC={:.2}  BIC={:.2}",
        model.model_name, fit.sigma2, fit.log_likelihood, fit.aic, fit.bic
    )?;
    let pct = result.confidence_level() * 100.0;
    writeln!(
        out,
        "{:<7}  {:>12}  {:>12}  {:>12}",
        "Month",
        "Forecast",
        format!("Lower {pct:.0}%"),
        format!("Upper {pct:.0}%")
    )?;
    for point in result.points() {
        writeln!(
            out,
            "{:<7}  {:>12.2}  {:>12.2}  {:>12.2}",
            point.period.format("%Y-%m").to_string(),
            point.mean,
            point.lower,
            point.upper
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::sample_csv;
    use sales_forecast::{render_dashboard, PipelineConfig, UPLOAD_PROMPT};

    #[test]
    fn test_prompt_report() {
        let report = render_report(&DashboardView::prompt());
        assert_eq!(report, format!("{UPLOAD_PROMPT}\n"));
    }

    #[test]
    fn test_populated_report_sections() {
        let csv = sample_csv();
        let view = render_dashboard(Some(csv.as_bytes()), &PipelineConfig::default()).unwrap();
        let report = render_report(&view);

        assert!(report.contains("== Data View (72 rows) =="));
        assert!(report.contains("... 62 more rows"));
        assert!(report.contains("== Monthly Sales =="));
        assert!(report.contains("2019-01"));
        assert!(report.contains("2021-12"));
        assert!(report.contains("== Predicted Sales =="));
        assert!(report.contains("SARIMA(1,1,1)(1,1,1,12)"));
        assert!(report.contains("Lower 95%"));

        // The forecast section lists the twelve months after the data
        let forecast = report.split("== Predicted Sales ==").nth(1).unwrap();
        assert!(forecast.contains("2022-01"));
        assert!(forecast.contains("2022-12"));
        assert!(!forecast.contains("2023-01"));
    }
}
