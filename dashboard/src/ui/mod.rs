//! UI module for the dashboard.

mod footer;
mod header;
mod layout;
pub mod tabs;

pub use layout::draw_ui;
