//! Main layout for the dashboard.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
};

use super::footer::draw_footer;
use super::header::draw_header;
use super::tabs::{draw_data_tab, draw_forecast_tab, draw_monthly_tab};
use crate::app::{App, InputMode, Tab};

/// Draw the main UI layout.
pub fn draw_ui(frame: &mut Frame, app: &App) {
    let size = frame.area();

    // Create main layout: header, tabs, content, footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Length(3), // Tab bar
            Constraint::Min(10),   // Content
            Constraint::Length(2), // Footer
        ])
        .split(size);

    draw_header(frame, chunks[0], app);
    draw_tab_bar(frame, chunks[1], app);

    let content_area = chunks[2];
    match app.current_tab {
        Tab::Data => draw_data_tab(frame, content_area, app),
        Tab::Monthly => draw_monthly_tab(frame, content_area, app),
        Tab::Forecast => draw_forecast_tab(frame, content_area, app),
    }

    draw_footer(frame, chunks[3], app);

    if app.input_mode == InputMode::FileDialog {
        draw_file_dialog(frame, size, app);
    }
}

/// Draw the tab bar.
fn draw_tab_bar(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let style = if *tab == app.current_tab {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(format!(" {} {} ", i + 1, tab.name())).style(style)
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" Tabs "))
        .select(app.current_tab.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Draw the upload dialog centred over the screen.
fn draw_file_dialog(frame: &mut Frame, area: Rect, app: &App) {
    let width = area.width.saturating_sub(4).min(80);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + area.height.saturating_sub(3) / 2,
        width,
        height: 3.min(area.height),
    };

    let input = Paragraph::new(format!("{}_", app.file_input))
        .style(Style::default().fg(Color::Yellow))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Upload CSV file (path) "),
        );

    frame.render_widget(Clear, popup);
    frame.render_widget(input, popup);
}
