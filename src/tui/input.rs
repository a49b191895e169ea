//! Key handling for the predictor UI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::Focus;

/// Input action resulting from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Focus the next field.
    NextField,
    /// Focus the previous field.
    PrevField,
    /// Previous option of the focused selection.
    CyclePrev,
    /// Next option of the focused selection.
    CycleNext,
    /// Append a character to the carat field.
    Type(char),
    /// Delete the last carat character.
    Backspace,
    /// Submit the prediction.
    Submit,
    /// Show or hide the insights panel.
    ToggleInsights,
    /// Toggle help.
    Help,
    /// No action.
    None,
}

/// Characters the carat field accepts.
fn is_carat_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '-' | 'e' | 'E')
}

/// Input handler with configurable vim keys.
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Enable vim-style keys (j/k between fields, h/l through options).
    pub vim_keys: bool,
}

impl InputHandler {
    /// Creates a new input handler.
    #[must_use]
    pub fn new(vim_keys: bool) -> Self {
        Self { vim_keys }
    }

    /// Handles a key event for the field in `focus`.
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent, focus: Focus) -> Action {
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            return match event.code {
                KeyCode::Char('c') | KeyCode::Char('q') => Action::Quit,
                _ => Action::None,
            };
        }

        // the carat field swallows its own characters before any shortcut
        if focus == Focus::Carat {
            match event.code {
                KeyCode::Char(c) if is_carat_char(c) => return Action::Type(c),
                KeyCode::Backspace => return Action::Backspace,
                _ => {}
            }
        }

        match event.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,

            KeyCode::Tab | KeyCode::Down => Action::NextField,
            KeyCode::BackTab | KeyCode::Up => Action::PrevField,
            KeyCode::Left => Action::CyclePrev,
            KeyCode::Right => Action::CycleNext,

            KeyCode::Char('j') if self.vim_keys => Action::NextField,
            KeyCode::Char('k') if self.vim_keys => Action::PrevField,
            KeyCode::Char('h') if self.vim_keys => Action::CyclePrev,
            KeyCode::Char('l') if self.vim_keys => Action::CycleNext,

            KeyCode::Enter => Action::Submit,
            KeyCode::Char('i') => Action::ToggleInsights,
            KeyCode::Char('?') | KeyCode::F(1) => Action::Help,

            _ => Action::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(true)
    }
}
