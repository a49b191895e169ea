//! Prediction form view-model.
//!
//! State machine per form: `Idle -> Submitting -> {Success | Failed}`, with
//! both outcomes going back to `Submitting` on the next valid submit. Every
//! submit is tagged with a fresh [`RequestToken`]; only the response to the
//! latest token is applied, so an older request that resolves late cannot
//! overwrite a newer result.

use tracing::{debug, info, warn};

use crate::api::ApiError;
use crate::format::{format_price, PriceSize};
use crate::model::{DiamondAttributes, PredictionResult};
use crate::validation::{validate, FormFields, Validation};

/// User-visible message for any failed prediction request.
pub const PREDICTION_FAILED_MESSAGE: &str = "Unable to predict a price right now. Please try again.";
/// Result slot text before the first prediction.
pub const PLACEHOLDER_TEXT: &str = "Enter diamond details and click predict to see the price";
/// Caption above a predicted price.
pub const RESULT_CAPTION: &str = "Predicted Diamond Price";

/// Sequence number of a prediction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Raw sequence number.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Request lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing submitted yet.
    Idle,
    /// A request is in flight.
    Submitting,
    /// The latest request returned a price.
    Success,
    /// The latest request failed.
    Failed,
}

/// Inputs to the form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// Carat text changed.
    EditCarat(String),
    /// Cut selection changed.
    SelectCut(String),
    /// Color selection changed.
    SelectColor(String),
    /// Clarity selection changed.
    SelectClarity(String),
    /// Predict button pressed.
    Submit,
    /// The request identified by `token` returned a price.
    PredictionSucceeded {
        /// Token of the answered request.
        token: RequestToken,
        /// Decoded response.
        result: PredictionResult,
    },
    /// The request identified by `token` failed.
    PredictionFailed {
        /// Token of the failed request.
        token: RequestToken,
        /// Underlying failure.
        error: ApiError,
    },
}

/// A prediction request the host must perform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictRequest {
    /// Token to echo back with the outcome.
    pub token: RequestToken,
    /// Validated attributes to send.
    pub attributes: DiamondAttributes,
}

/// Content of the result slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView {
    /// No prediction yet.
    Placeholder,
    /// Request in flight; takes precedence over a cached price.
    Loading,
    /// Formatted price.
    Price {
        /// e.g. `$8,500`.
        text: String,
        /// Font tier for the formatted price.
        size: PriceSize,
    },
}

/// Prediction form state.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    fields: FormFields,
    phase: Phase,
    price: Option<PredictionResult>,
    error: Option<String>,
    issued: u64,
}

impl FormState {
    /// Empty form in the `Idle` phase.
    #[must_use]
    pub fn new() -> Self {
        Self::with_fields(FormFields::default())
    }

    /// Form pre-filled with `fields`, still `Idle`.
    #[must_use]
    pub fn with_fields(fields: FormFields) -> Self {
        Self {
            fields,
            phase: Phase::Idle,
            price: None,
            error: None,
            issued: 0,
        }
    }

    /// Raw field values.
    #[must_use]
    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Last successful prediction, kept across later failures.
    #[must_use]
    pub fn price(&self) -> Option<PredictionResult> {
        self.price
    }

    /// User-visible error banner, if the latest request failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Token of the most recently issued request.
    #[must_use]
    pub fn latest_token(&self) -> Option<RequestToken> {
        (self.issued > 0).then_some(RequestToken(self.issued))
    }

    /// Validation of the current fields, recomputed on every call.
    #[must_use]
    pub fn validation(&self) -> Validation {
        validate(&self.fields)
    }

    /// Whether the predict action is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.validation().is_submittable()
    }

    /// What the result slot shows.
    #[must_use]
    pub fn display(&self) -> ResultView {
        if self.phase == Phase::Submitting {
            return ResultView::Loading;
        }
        match self.price {
            Some(result) => ResultView::Price {
                text: format_price(result.predicted_price),
                size: PriceSize::for_price(result.predicted_price),
            },
            None => ResultView::Placeholder,
        }
    }

    /// Apply an event, returning the request to perform, if any.
    pub fn apply(&mut self, event: FormEvent) -> Option<PredictRequest> {
        match event {
            FormEvent::EditCarat(v) => self.fields.carat = v,
            FormEvent::SelectCut(v) => self.fields.cut = v,
            FormEvent::SelectColor(v) => self.fields.color = v,
            FormEvent::SelectClarity(v) => self.fields.clarity = v,
            FormEvent::Submit => return self.submit(),
            FormEvent::PredictionSucceeded { token, result } => {
                if self.is_current(token) {
                    info!(token = token.get(), price = result.predicted_price, "prediction received");
                    self.phase = Phase::Success;
                    self.price = Some(result);
                    self.error = None;
                }
            }
            FormEvent::PredictionFailed { token, error } => {
                if self.is_current(token) {
                    warn!(token = token.get(), %error, detail = ?error.detail(), "prediction failed");
                    self.phase = Phase::Failed;
                    self.error = Some(PREDICTION_FAILED_MESSAGE.to_string());
                }
            }
        }
        None
    }

    fn submit(&mut self) -> Option<PredictRequest> {
        let Some(attributes) = self.validation().attributes() else {
            debug!("submit ignored: form has validation errors");
            return None;
        };
        self.issued += 1;
        self.phase = Phase::Submitting;
        self.error = None;
        let token = RequestToken(self.issued);
        debug!(token = token.get(), ?attributes, "submitting prediction");
        Some(PredictRequest { token, attributes })
    }

    fn is_current(&self, token: RequestToken) -> bool {
        let current = self.phase == Phase::Submitting && token.0 == self.issued;
        if !current {
            debug!(token = token.get(), latest = self.issued, "discarding stale prediction response");
        }
        current
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

/// Pure transition: `(state, event) -> (state, request)`.
#[must_use]
pub fn reduce(state: &FormState, event: FormEvent) -> (FormState, Option<PredictRequest>) {
    let mut next = state.clone();
    let request = next.apply(event);
    (next, request)
}
