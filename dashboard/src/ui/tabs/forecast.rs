//! Forecast tab UI.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use sales_forecast::presentation::FORECAST_TITLE;
use sales_forecast::{DashboardView, PresentationModel};

use super::{draw_prompt, with_error_panel};
use crate::app::App;
use crate::widgets::chart::ChartData;

/// Draw the Forecast tab: observed series, forecast and shaded interval.
pub fn draw_forecast_tab(frame: &mut Frame, area: Rect, app: &App) {
    let area = with_error_panel(frame, area, app);

    let model = match &app.view {
        DashboardView::Prompt(message) => {
            draw_prompt(frame, area, FORECAST_TITLE, message);
            return;
        }
        DashboardView::Populated(model) => model,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Chart
            Constraint::Length(3), // Model summary
        ])
        .split(area);

    let chart = &model.forecast;
    let data = ChartData::forecast(chart);
    frame.render_widget(
        data.chart(&chart.title, &chart.x_label, &chart.y_label),
        chunks[0],
    );

    draw_summary(frame, chunks[1], model);
}

fn draw_summary(frame: &mut Frame, area: Rect, model: &PresentationModel) {
    let fit = &model.fit;
    let text = format!(
        "{}  band={:.0}%  sigma2={:.2}  loglik={:.2}  AIC={:.2}  BIC={:.2}  n={}",
        model.model_name,
        model.forecast.confidence_level * 100.0,
        fit.sigma2,
        fit.log_likelihood,
        fit.aic,
        fit.bic,
        fit.nobs
    );

    let summary = Paragraph::new(text)
        .style(Style::default().fg(Color::Green))
        .block(Block::default().borders(Borders::ALL).title(" Model "));

    frame.render_widget(summary, area);
}
