//! Application state management for the dashboard.

use sales_forecast::{render_dashboard, DashboardView, PipelineConfig, PresentationModel};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info};

/// Main application state.
pub struct App {
    /// Current active tab
    pub current_tab: Tab,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Text typed into the upload dialog
    pub file_input: String,
    /// Status message with the time it was set
    pub status_message: Option<(String, Instant)>,
    /// What the tabs show
    pub view: DashboardView,
    /// Last upload failure, shown in the error panel
    pub error: Option<String>,
    /// File behind the current view
    pub source: Option<PathBuf>,
    /// First data row shown in the table
    pub table_offset: usize,
    pub config: PipelineConfig,
}

impl App {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            current_tab: Tab::Data,
            should_quit: false,
            input_mode: InputMode::Normal,
            file_input: String::new(),
            status_message: None,
            view: DashboardView::prompt(),
            error: None,
            source: None,
            table_offset: 0,
            config,
        }
    }

    /// Set a status message that will be displayed temporarily.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Clear expired status messages (older than 5 seconds).
    pub fn clear_expired_status(&mut self) {
        if let Some((_, instant)) = &self.status_message {
            if instant.elapsed().as_secs() > 5 {
                self.status_message = None;
            }
        }
    }

    pub fn next_tab(&mut self) {
        self.current_tab = self.current_tab.next();
    }

    pub fn previous_tab(&mut self) {
        self.current_tab = self.current_tab.previous();
    }

    /// Jump to a specific tab by number (1-3).
    pub fn goto_tab(&mut self, num: u8) {
        self.current_tab = Tab::from_num(num);
    }

    /// The populated results, if an upload succeeded
    pub fn model(&self) -> Option<&PresentationModel> {
        match &self.view {
            DashboardView::Populated(model) => Some(model.as_ref()),
            DashboardView::Prompt(_) => None,
        }
    }

    /// Read a file from disk and run the pipeline on it.
    pub fn upload_file(&mut self, path: &Path) {
        match fs::read(path) {
            Ok(bytes) => self.upload(path.to_path_buf(), &bytes),
            Err(e) => {
                let message = format!("Failed to read '{}': {e}", path.display());
                error!(path = %path.display(), error = %e, "upload could not be read");
                self.set_status(message.clone());
                self.error = Some(message);
            }
        }
    }

    /// Replace everything shown with the results for `bytes`.
    pub fn upload(&mut self, source: PathBuf, bytes: &[u8]) {
        self.table_offset = 0;
        self.source = Some(source.clone());

        match render_dashboard(Some(bytes), &self.config) {
            Ok(view) => {
                info!(path = %source.display(), "upload processed");
                self.view = view;
                self.error = None;
                self.set_status(format!("Loaded {}", source.display()));
            }
            Err(e) => {
                error!(path = %source.display(), stage = %e.stage, error = %e.source, "upload failed");
                self.view = DashboardView::prompt();
                self.set_status(format!("Upload failed: {e}"));
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn scroll_down(&mut self, rows: usize) {
        let len = self.model().map_or(0, |m| m.table.rows.len());
        self.table_offset = (self.table_offset + rows).min(len.saturating_sub(1));
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.table_offset = self.table_offset.saturating_sub(rows);
    }
}

/// Available tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Data,
    Monthly,
    Forecast,
}

impl Tab {
    pub fn next(self) -> Self {
        match self {
            Tab::Data => Tab::Monthly,
            Tab::Monthly => Tab::Forecast,
            Tab::Forecast => Tab::Data,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Tab::Data => Tab::Forecast,
            Tab::Monthly => Tab::Data,
            Tab::Forecast => Tab::Monthly,
        }
    }

    pub fn from_num(num: u8) -> Self {
        match num {
            2 => Tab::Monthly,
            3 => Tab::Forecast,
            _ => Tab::Data,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Data => 0,
            Tab::Monthly => 1,
            Tab::Forecast => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tab::Data => "Data",
            Tab::Monthly => "Monthly",
            Tab::Forecast => "Forecast",
        }
    }

    pub fn all() -> &'static [Tab] {
        &[Tab::Data, Tab::Monthly, Tab::Forecast]
    }
}

/// Input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    FileDialog,
}
