//! Page composition: the prediction form next to a toggleable insights panel.
//!
//! [`Page::apply`] is the single entry point for user input and request
//! outcomes. It returns at most one [`Command`]; the host runs it (usually
//! on a worker thread, via [`execute`]) and feeds the resulting event back.

use tracing::debug;

use crate::api::PriceApi;
use crate::form::{FormEvent, FormState, PredictRequest, RequestToken};
use crate::insights::{InsightsPanel, PanelCommand, PanelEvent};
use crate::model::DiamondAttributes;
use crate::validation::FormFields;

/// Inputs to the page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// Routed to the prediction form.
    Form(FormEvent),
    /// Routed to the insights panel.
    Insights(PanelEvent),
    /// The show/hide insights button.
    ToggleInsights,
}

/// Side effects the host must perform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// `GET /api/predict`, answered with a form prediction event.
    Predict {
        /// Token to echo back.
        token: RequestToken,
        /// Validated attributes.
        attributes: DiamondAttributes,
    },
    /// `GET /api/insights`, answered with [`PanelEvent::Loaded`].
    FetchInsights,
}

impl From<PredictRequest> for Command {
    fn from(request: PredictRequest) -> Self {
        Self::Predict {
            token: request.token,
            attributes: request.attributes,
        }
    }
}

impl From<PanelCommand> for Command {
    fn from(command: PanelCommand) -> Self {
        match command {
            PanelCommand::FetchInsights => Self::FetchInsights,
        }
    }
}

/// Whole-page state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    form: FormState,
    insights: InsightsPanel,
}

impl Page {
    /// Empty form, insights hidden; fallback data uses `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            form: FormState::new(),
            insights: InsightsPanel::new(seed),
        }
    }

    /// Page with a pre-filled form.
    #[must_use]
    pub fn with_fields(seed: u64, fields: FormFields) -> Self {
        Self {
            form: FormState::with_fields(fields),
            insights: InsightsPanel::new(seed),
        }
    }

    /// The prediction form.
    #[must_use]
    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// The insights panel.
    #[must_use]
    pub fn insights(&self) -> &InsightsPanel {
        &self.insights
    }

    /// Label of the show/hide button.
    #[must_use]
    pub fn toggle_label(&self) -> &'static str {
        if self.insights.is_visible() {
            "Hide Insights"
        } else {
            "Show Insights"
        }
    }

    /// Apply an event, returning the command to run, if any.
    pub fn apply(&mut self, event: PageEvent) -> Option<Command> {
        match event {
            PageEvent::Form(e) => self.form.apply(e).map(Command::from),
            PageEvent::Insights(e) => self.insights.apply(e).map(Command::from),
            PageEvent::ToggleInsights => {
                debug!(visible = !self.insights.is_visible(), "toggling insights");
                self.insights.apply(PanelEvent::Toggle).map(Command::from)
            }
        }
    }
}

/// Pure transition: `(state, event) -> (state, command)`.
#[must_use]
pub fn reduce(state: &Page, event: PageEvent) -> (Page, Option<Command>) {
    let mut next = state.clone();
    let command = next.apply(event);
    (next, command)
}

/// Run `command` against `api` (blocking) and return the event that reports
/// its outcome.
pub fn execute(api: &dyn PriceApi, command: &Command) -> PageEvent {
    match command {
        Command::Predict { token, attributes } => {
            let event = match api.predict(attributes) {
                Ok(result) => FormEvent::PredictionSucceeded {
                    token: *token,
                    result,
                },
                Err(error) => FormEvent::PredictionFailed {
                    token: *token,
                    error,
                },
            };
            PageEvent::Form(event)
        }
        Command::FetchInsights => PageEvent::Insights(PanelEvent::Loaded(api.insights())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::form::ResultView;
    use crate::insights::PanelView;
    use crate::model::{DataSource, InsightsData, PredictionResult, ServiceInfo};

    struct StubApi {
        price: Result<f64, ApiError>,
    }

    impl PriceApi for StubApi {
        fn predict(&self, _: &DiamondAttributes) -> Result<PredictionResult, ApiError> {
            self.price.clone().map(|predicted_price| PredictionResult { predicted_price })
        }

        fn insights(&self) -> Result<InsightsData, ApiError> {
            Err(ApiError::Http {
                status: 500,
                body: String::new(),
            })
        }

        fn service_info(&self) -> Result<ServiceInfo, ApiError> {
            Ok(ServiceInfo::default())
        }
    }

    fn drive(page: &mut Page, api: &dyn PriceApi, event: PageEvent) {
        if let Some(cmd) = page.apply(event) {
            let outcome = execute(api, &cmd);
            drive(page, api, outcome);
        }
    }

    #[test]
    fn test_toggle_shows_panel_and_fetches_once() {
        let mut page = Page::new(42);
        assert_eq!(page.toggle_label(), "Show Insights");
        assert_eq!(page.apply(PageEvent::ToggleInsights), Some(Command::FetchInsights));
        assert_eq!(page.toggle_label(), "Hide Insights");
        assert_eq!(page.apply(PageEvent::ToggleInsights), None);
        assert_eq!(page.apply(PageEvent::ToggleInsights), None);
    }

    #[test]
    fn test_prediction_flow() {
        let api = StubApi { price: Ok(8500.0) };
        let mut page = Page::with_fields(1, FormFields::new("1.5", "Ideal", "E", "VS1"));
        drive(&mut page, &api, PageEvent::Form(FormEvent::Submit));

        assert!(matches!(
            page.form().display(),
            ResultView::Price { ref text, .. } if text == "$8,500"
        ));
    }

    #[test]
    fn test_failed_prediction_sets_message() {
        let api = StubApi {
            price: Err(ApiError::Network("refused".into())),
        };
        let mut page = Page::with_fields(1, FormFields::new("1", "Good", "D", "IF"));
        drive(&mut page, &api, PageEvent::Form(FormEvent::Submit));
        assert_eq!(page.form().error(), Some(crate::form::PREDICTION_FAILED_MESSAGE));
    }

    #[test]
    fn test_insights_fall_back() {
        let api = StubApi { price: Ok(1.0) };
        let mut page = Page::new(42);
        drive(&mut page, &api, PageEvent::ToggleInsights);

        let PanelView::Ready { data, source } = page.insights().view() else {
            panic!("insights should be ready");
        };
        assert_eq!(source, DataSource::Fallback);
        assert_eq!(data.carat_data.len(), 100);
    }

    #[test]
    fn test_form_and_panel_are_independent() {
        let page = Page::new(1);
        let (page, cmd) = reduce(&page, PageEvent::Form(FormEvent::EditCarat("2".into())));
        assert_eq!(cmd, None);
        assert!(!page.insights().is_visible());
        assert_eq!(page.form().fields().carat, "2");
    }
}
