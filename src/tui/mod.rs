//! Interactive terminal UI for the predictor page.
//!
//! ratatui + crossterm; requests run on worker threads and report back to
//! the UI thread over a channel.

mod app;
pub mod input;
pub mod state;
pub mod theme;
mod ui;

pub use app::App;
pub use input::{Action, InputHandler};
pub use state::{Focus, ServiceStatus, UiState};
pub use theme::Theme;
pub use ui::draw;
