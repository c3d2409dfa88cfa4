//! Monthly tab UI.

use ratatui::prelude::*;
use sales_forecast::presentation::MONTHLY_TITLE;
use sales_forecast::DashboardView;

use super::{draw_prompt, with_error_panel};
use crate::app::App;
use crate::widgets::chart::ChartData;

/// Draw the Monthly tab: the resampled series as a line chart.
pub fn draw_monthly_tab(frame: &mut Frame, area: Rect, app: &App) {
    let area = with_error_panel(frame, area, app);

    match &app.view {
        DashboardView::Prompt(message) => draw_prompt(frame, area, MONTHLY_TITLE, message),
        DashboardView::Populated(model) => {
            let chart = &model.monthly;
            let data = ChartData::monthly(chart);
            frame.render_widget(data.chart(&chart.title, &chart.x_label, &chart.y_label), area);
        }
    }
}
