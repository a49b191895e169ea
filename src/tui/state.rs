//! UI-only state: focus, overlays, quit flag and the service banner.

use crate::grade::{Clarity, ColorGrade, Cut, Grade};
use crate::model::ServiceInfo;

/// Focusable form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Carat text input.
    #[default]
    Carat,
    /// Cut selection.
    Cut,
    /// Color selection.
    Color,
    /// Clarity selection.
    Clarity,
}

impl Focus {
    /// All fields, top to bottom.
    pub const ALL: [Self; 4] = [Self::Carat, Self::Cut, Self::Color, Self::Clarity];

    fn index(self) -> usize {
        match self {
            Self::Carat => 0,
            Self::Cut => 1,
            Self::Color => 2,
            Self::Clarity => 3,
        }
    }

    /// Field label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Carat => "Carat",
            Self::Cut => "Cut",
            Self::Color => "Color",
            Self::Clarity => "Clarity",
        }
    }

    /// Prompt shown while the field is empty.
    #[must_use]
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Carat => "Enter carat (e.g., 0.5)",
            Self::Cut => "Select cut quality",
            Self::Color => "Select color grade",
            Self::Clarity => "Select clarity grade",
        }
    }
}

/// Service banner status.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ServiceStatus {
    /// Request in flight.
    #[default]
    Unknown,
    /// `GET /` answered.
    Online(ServiceInfo),
    /// `GET /` failed.
    Offline,
}

/// State of the terminal UI around the page view-model.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Focused form field.
    pub focus: Focus,
    /// Whether help is visible.
    pub show_help: bool,
    /// Whether the application should quit.
    pub should_quit: bool,
    /// Service banner.
    pub service: ServiceStatus,
}

impl UiState {
    /// Signals that the application should quit.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Toggles help visibility.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Focus the next field, wrapping.
    pub fn next_field(&mut self) {
        let i = (self.focus.index() + 1) % Focus::ALL.len();
        self.focus = Focus::ALL[i];
    }

    /// Focus the previous field, wrapping.
    pub fn prev_field(&mut self) {
        let i = self.focus.index().checked_sub(1).unwrap_or(Focus::ALL.len() - 1);
        self.focus = Focus::ALL[i];
    }
}

/// Next (or previous) label after `current` in `G`'s order, wrapping.
///
/// An empty or unknown `current` starts at the first label going forward
/// and at the last going backward.
#[must_use]
pub fn cycle_label<G: Grade>(current: &str, forward: bool) -> &'static str {
    let all = G::ALL;
    let len = all.len();
    let next = match all.iter().position(|g| g.label() == current) {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None if forward => 0,
        None => len - 1,
    };
    all[next].label()
}

/// [`cycle_label`] for the grade behind `focus`; `None` for the carat field.
#[must_use]
pub fn cycle_field(focus: Focus, current: &str, forward: bool) -> Option<&'static str> {
    match focus {
        Focus::Carat => None,
        Focus::Cut => Some(cycle_label::<Cut>(current, forward)),
        Focus::Color => Some(cycle_label::<ColorGrade>(current, forward)),
        Focus::Clarity => Some(cycle_label::<Clarity>(current, forward)),
    }
}
