//! Header bar widget.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use sales_forecast::presentation::DASHBOARD_TITLE;

use crate::app::App;

/// Draw the header bar with the title and current file.
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let text = match &app.source {
        Some(path) => format!("{DASHBOARD_TITLE} - {}", path.display()),
        None => DASHBOARD_TITLE.to_string(),
    };
    let title = Paragraph::new(text)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));

    frame.render_widget(title, area);
}
