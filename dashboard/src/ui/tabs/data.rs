//! Data tab UI.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Row, Table},
};
use sales_forecast::presentation::DATA_VIEW_TITLE;
use sales_forecast::DashboardView;

use super::{draw_prompt, with_error_panel};
use crate::app::App;

/// Draw the Data tab: the upload echoed as a table.
pub fn draw_data_tab(frame: &mut Frame, area: Rect, app: &App) {
    let area = with_error_panel(frame, area, app);

    let model = match &app.view {
        DashboardView::Prompt(message) => {
            draw_prompt(frame, area, DATA_VIEW_TITLE, message);
            return;
        }
        DashboardView::Populated(model) => model,
    };
    let table = &model.table;

    // Borders and header take three rows
    let visible = area.height.saturating_sub(3) as usize;
    let rows: Vec<Row> = table
        .rows
        .iter()
        .skip(app.table_offset)
        .take(visible)
        .map(|cells| Row::new(cells.iter().map(|c| Cell::from(c.as_str()))))
        .collect();

    let widths: Vec<Constraint> = table
        .columns
        .iter()
        .map(|_| Constraint::Ratio(1, table.columns.len().max(1) as u32))
        .collect();

    let header = Row::new(table.columns.iter().map(|c| Cell::from(c.as_str())))
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let last_row = (app.table_offset + visible).min(table.rows.len());
    let title = format!(
        " {} (rows {}-{} of {}) ",
        table.title,
        (app.table_offset + 1).min(last_row),
        last_row,
        table.rows.len()
    );

    let widget = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(widget, area);
}
