//! Insights panel: aggregate price statistics with an offline fallback.
//!
//! The panel fetches once, on its first activation. If the fetch fails for
//! any reason the panel quietly switches to [`fallback::fallback_insights`]
//! data, so the charts always have something to draw.

pub mod copy;
pub mod fallback;

use tracing::{debug, warn};

use crate::api::ApiError;
use crate::model::{DataSource, InsightsData};

pub use fallback::fallback_insights;

/// Loading state of the panel's data.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelStatus {
    /// Never activated; nothing requested yet.
    Idle,
    /// Request in flight.
    Loading,
    /// Data available for the charts.
    Ready {
        /// Insight records.
        data: InsightsData,
        /// Live response or generated fallback.
        source: DataSource,
    },
}

/// Inputs to the panel.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    /// Make the panel visible.
    Show,
    /// Hide the panel.
    Hide,
    /// Flip visibility.
    Toggle,
    /// Outcome of the insights request.
    Loaded(Result<InsightsData, ApiError>),
}

/// Work the host must perform for the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelCommand {
    /// Issue `GET /api/insights` and feed the outcome back as [`PanelEvent::Loaded`].
    FetchInsights,
}

/// What the panel should draw right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelView<'a> {
    /// Not visible: draw nothing.
    Hidden,
    /// Visible and waiting for data.
    Loading,
    /// Visible with data.
    Ready {
        /// Insight records.
        data: &'a InsightsData,
        /// Where the records came from.
        source: DataSource,
    },
}

/// View-model of the insights panel.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightsPanel {
    visible: bool,
    status: PanelStatus,
    seed: u64,
}

impl InsightsPanel {
    /// A hidden, never-activated panel whose fallback uses `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            visible: false,
            status: PanelStatus::Idle,
            seed,
        }
    }

    /// Whether the panel is visible.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Current data state.
    #[must_use]
    pub fn status(&self) -> &PanelStatus {
        &self.status
    }

    /// Apply an event, returning the command the host must run, if any.
    pub fn apply(&mut self, event: PanelEvent) -> Option<PanelCommand> {
        match event {
            PanelEvent::Show => self.set_visible(true),
            PanelEvent::Hide => self.set_visible(false),
            PanelEvent::Toggle => self.set_visible(!self.visible),
            PanelEvent::Loaded(outcome) => {
                if self.status != PanelStatus::Loading {
                    debug!("ignoring insights response received while not loading");
                    return None;
                }
                self.status = match outcome {
                    Ok(data) => PanelStatus::Ready {
                        data,
                        source: DataSource::Live,
                    },
                    Err(error) => {
                        warn!(%error, seed = self.seed, "insights request failed, using fallback data");
                        PanelStatus::Ready {
                            data: fallback_insights(self.seed),
                            source: DataSource::Fallback,
                        }
                    }
                };
                None
            }
        }
    }

    fn set_visible(&mut self, visible: bool) -> Option<PanelCommand> {
        self.visible = visible;
        if visible && self.status == PanelStatus::Idle {
            debug!("insights panel activated, fetching");
            self.status = PanelStatus::Loading;
            return Some(PanelCommand::FetchInsights);
        }
        None
    }

    /// What to draw.
    #[must_use]
    pub fn view(&self) -> PanelView<'_> {
        if !self.visible {
            return PanelView::Hidden;
        }
        match &self.status {
            PanelStatus::Idle | PanelStatus::Loading => PanelView::Loading,
            PanelStatus::Ready { data, source } => PanelView::Ready {
                data,
                source: *source,
            },
        }
    }
}

impl Default for InsightsPanel {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Pure transition: `(state, event) -> (state, command)`.
#[must_use]
pub fn reduce(state: &InsightsPanel, event: PanelEvent) -> (InsightsPanel, Option<PanelCommand>) {
    let mut next = state.clone();
    let command = next.apply(event);
    (next, command)
}
