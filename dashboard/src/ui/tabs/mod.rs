//! Tab-specific UI modules.

mod data;
mod forecast;
mod monthly;

pub use data::draw_data_tab;
pub use forecast::draw_forecast_tab;
pub use monthly::draw_monthly_tab;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;

/// Carve the error panel off the bottom of `area` when the last upload
/// failed, returning what is left for the tab.
fn with_error_panel(frame: &mut Frame, area: Rect, app: &App) -> Rect {
    let Some(error) = &app.error else {
        return area;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(5)])
        .split(area);

    let panel = Paragraph::new(error.as_str())
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error "),
        );
    frame.render_widget(panel, chunks[1]);
    chunks[0]
}

/// Placeholder shown on every tab until a file is uploaded.
fn draw_prompt(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
        .style(Style::default().fg(Color::DarkGray));

    // Calculate inner area before rendering the block
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let centered = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(2),
            Constraint::Percentage(45),
        ])
        .split(inner);
    let msg = Paragraph::new(vec![
        Line::from(message.to_string()),
        Line::from("Press [u] to choose a file."),
    ])
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::White));
    frame.render_widget(msg, centered[1]);
}
