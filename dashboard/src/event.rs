//! Event handling for the dashboard.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::path::PathBuf;
use std::time::Duration;

use crate::app::{App, InputMode, Tab};

/// Rows moved by PageUp / PageDown
const PAGE_ROWS: usize = 20;

/// Handle keyboard events.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Global shortcuts (work in all modes)
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('q') if app.input_mode == InputMode::Normal => {
            app.should_quit = true;
            return;
        }
        _ => {}
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::FileDialog => handle_file_dialog_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        // Tab navigation
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => app.next_tab(),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => app.previous_tab(),
        KeyCode::Char('1') => app.goto_tab(1),
        KeyCode::Char('2') => app.goto_tab(2),
        KeyCode::Char('3') => app.goto_tab(3),

        // Upload from any tab
        KeyCode::Char('u') | KeyCode::Char('o') => open_file_dialog(app),

        _ => match app.current_tab {
            Tab::Data => handle_data_tab_keys(app, key),
            Tab::Monthly | Tab::Forecast => {}
        },
    }
}

fn open_file_dialog(app: &mut App) {
    app.input_mode = InputMode::FileDialog;
    app.file_input = app
        .source
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    app.set_status("Enter the path of a CSV file to upload...");
}

fn handle_data_tab_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => open_file_dialog(app),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(1),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(1),
        KeyCode::PageDown => app.scroll_down(PAGE_ROWS),
        KeyCode::PageUp => app.scroll_up(PAGE_ROWS),
        KeyCode::Home => app.table_offset = 0,
        _ => {}
    }
}

fn handle_file_dialog_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.set_status("Upload cancelled.");
        }
        KeyCode::Enter => {
            let path = app.file_input.trim().to_string();
            if path.is_empty() {
                app.set_status("No file path entered.");
                return;
            }
            app.input_mode = InputMode::Normal;
            app.set_status("Running forecast...");
            app.upload_file(&PathBuf::from(path));
        }
        KeyCode::Backspace => {
            app.file_input.pop();
        }
        KeyCode::Char(c) => app.file_input.push(c),
        _ => {}
    }
}

/// Poll for events with a timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}
