//! Custom widgets for the dashboard.

pub mod chart;
