//! TUI module: Terminal User Interface using Ratatui.
//!
//! Six-step intake wizard, scoring progress and verdict screen.

mod app;
mod styles;
mod ui;
mod worker;

pub use app::{App, Screen};
pub use styles::MedicalTheme;
pub use worker::{ScoringProgress, ScoringWorker, ScoringWorkerHandle};
