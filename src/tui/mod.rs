//! TUI module: Terminal User Interface using Ratatui.
//!
//! Four pages selected from a sidebar:
//! - About the app and the loaded model
//! - Heart disease prediction form
//! - Recommended exercises
//! - Recipe nutritional analysis

mod app;
mod styles;
mod ui;

pub use app::{App, AppContext, Page, View};
pub use styles::MedicalTheme;
