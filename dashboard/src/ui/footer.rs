//! Footer bar widget with keyboard shortcuts.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, InputMode, Tab};

/// Draw the footer bar with context-sensitive help.
pub fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = match app.input_mode {
        InputMode::FileDialog => "Enter: Upload | Esc: Cancel".to_string(),
        InputMode::Normal => {
            let tab_help = match app.current_tab {
                Tab::Data => "[u] Upload  [↑↓/PgUp/PgDn] Scroll",
                Tab::Monthly | Tab::Forecast => "[u] Upload",
            };
            format!("{tab_help}  |  [1-3] Tab  [Tab/←→] Navigate  [q] Quit")
        }
    };

    // Errors stay in the status line until the next upload
    let (display_text, color) = match (&app.status_message, &app.error) {
        (Some((status, _)), _) => (format!("{status} | {help_text}"), Color::DarkGray),
        (None, Some(error)) => (format!("Error: {error} | {help_text}"), Color::Red),
        (None, None) => (help_text, Color::DarkGray),
    };

    let footer = Paragraph::new(display_text)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));

    frame.render_widget(footer, area);
}
