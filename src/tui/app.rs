//! Main application loop for the predictor UI.

use std::io::{self, stdout};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{debug, info};

use super::input::{Action, InputHandler};
use super::state::{cycle_field, Focus, ServiceStatus, UiState};
use super::theme::Theme;
use super::ui;
use crate::api::{ApiError, PriceApi};
use crate::config::Config;
use crate::error::Result;
use crate::form::FormEvent;
use crate::model::ServiceInfo;
use crate::page::{execute, Command, Page, PageEvent};

/// Completion of background work, delivered to the UI thread.
#[derive(Debug)]
enum Message {
    Page(PageEvent),
    Service(std::result::Result<ServiceInfo, ApiError>),
}

/// The interactive predictor application.
pub struct App {
    api: Arc<dyn PriceApi>,
    page: Page,
    state: UiState,
    input: InputHandler,
    theme: Theme,
    tx: Sender<Message>,
    rx: Receiver<Message>,
}

impl App {
    /// Creates a new application talking to `api`.
    #[must_use]
    pub fn new(config: &Config, api: Arc<dyn PriceApi>) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut app = Self {
            api,
            page: Page::new(config.insights.seed),
            state: UiState::default(),
            input: InputHandler::new(config.ui.vim_keys),
            theme: Theme::default(),
            tx,
            rx,
        };
        if config.insights.show_on_start {
            app.dispatch(PageEvent::ToggleInsights);
        }
        app.fetch_service_info();
        app
    }

    /// Runs the application main loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup or rendering fails.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        disable_raw_mode()?;
        stdout().execute(LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        let poll_timeout = Duration::from_millis(100);

        loop {
            terminal.draw(|frame| ui::draw(frame, &self.page, &self.state, &self.theme))?;

            if event::poll(poll_timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        let action = self.input.handle_key(key, self.state.focus);
                        self.handle_action(action);
                    }
                }
            }

            self.drain();

            if self.state.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Handles an input action.
    pub fn handle_action(&mut self, action: Action) {
        // help is modal: any key closes it, and quit still quits
        if self.state.show_help && !matches!(action, Action::Quit | Action::None) {
            self.state.toggle_help();
            return;
        }

        match action {
            Action::Quit => self.state.quit(),
            Action::Help => self.state.toggle_help(),
            Action::NextField => self.state.next_field(),
            Action::PrevField => self.state.prev_field(),
            Action::CyclePrev | Action::CycleNext => {
                let forward = action == Action::CycleNext;
                self.cycle_selection(forward);
            }
            Action::Type(c) => {
                let mut carat = self.page.form().fields().carat.clone();
                carat.push(c);
                self.dispatch(PageEvent::Form(FormEvent::EditCarat(carat)));
            }
            Action::Backspace => {
                let mut carat = self.page.form().fields().carat.clone();
                carat.pop();
                self.dispatch(PageEvent::Form(FormEvent::EditCarat(carat)));
            }
            Action::Submit => self.dispatch(PageEvent::Form(FormEvent::Submit)),
            Action::ToggleInsights => self.dispatch(PageEvent::ToggleInsights),
            Action::None => {}
        }
    }

    fn cycle_selection(&mut self, forward: bool) {
        let focus = self.state.focus;
        let fields = self.page.form().fields();
        let current = match focus {
            Focus::Carat => return,
            Focus::Cut => &fields.cut,
            Focus::Color => &fields.color,
            Focus::Clarity => &fields.clarity,
        };
        let Some(label) = cycle_field(focus, current, forward) else {
            return;
        };
        let label = label.to_string();
        let event = match focus {
            Focus::Cut => FormEvent::SelectCut(label),
            Focus::Color => FormEvent::SelectColor(label),
            _ => FormEvent::SelectClarity(label),
        };
        self.dispatch(PageEvent::Form(event));
    }

    /// Apply `event` and start whatever command it produces.
    fn dispatch(&mut self, event: PageEvent) {
        if let Some(command) = self.page.apply(event) {
            self.spawn(command);
        }
    }

    fn spawn(&self, command: Command) {
        debug!(?command, "starting request");
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let outcome = execute(api.as_ref(), &command);
            // the receiver is gone only after the UI has quit
            let _ = tx.send(Message::Page(outcome));
        });
    }

    fn fetch_service_info(&self) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let _ = tx.send(Message::Service(api.service_info()));
        });
    }

    fn handle_message(&mut self, message: Message) {
        match message {
            Message::Page(event) => self.dispatch(event),
            Message::Service(Ok(info)) => {
                info!(version = %info.version, "connected to prediction service");
                self.state.service = ServiceStatus::Online(info);
            }
            Message::Service(Err(error)) => {
                debug!(%error, "service banner unavailable");
                self.state.service = ServiceStatus::Offline;
            }
        }
    }

    /// Apply every completed request without blocking.
    pub fn drain(&mut self) {
        while let Ok(message) = self.rx.try_recv() {
            self.handle_message(message);
        }
    }

    /// Wait up to `timeout` for one completed request and apply it.
    ///
    /// Returns `false` on timeout.
    pub fn pump(&mut self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(message) => {
                self.handle_message(message);
                true
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => false,
        }
    }

    /// Page view-model.
    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// UI state.
    #[must_use]
    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Returns whether the app should quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.state.should_quit
    }
}
