//! # diamond-viz
//!
//! Client for a diamond price prediction service: a validated input form,
//! the price returned by the service, and four insight charts that fall
//! back to generated sample data when the service cannot provide them.
//!
//! ## Features
//!
//! - **View-models**: form, insights panel and page are plain structs with
//!   a pure `(state, event) -> (state, command)` transition
//! - **Stale-safe requests**: prediction responses carry a request token;
//!   superseded responses are dropped
//! - **Offline insights**: seedable fallback data with the live shape
//! - **Multiple outputs**: SVG charts, a standalone HTML page and an
//!   interactive terminal UI
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use diamond_viz::prelude::*;
//!
//! let api = HttpClient::new("http://localhost:5000", Duration::from_secs(10))?;
//! let mut page = Page::with_fields(42, FormFields::new("1.5", "Ideal", "E", "VS1"));
//!
//! if let Some(cmd) = page.apply(PageEvent::Form(FormEvent::Submit)) {
//!     let outcome = execute(&api, &cmd);
//!     page.apply(outcome);
//! }
//! println!("{:?}", page.form().display());
//! # Ok::<(), diamond_viz::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `tui` (default): interactive terminal front-end (ratatui + crossterm)

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in chart code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Domain
// ============================================================================

/// Cut, color and clarity grades.
pub mod grade;

/// Request and response records.
pub mod model;

/// Client-side form validation.
pub mod validation;

/// Price and tooltip formatting.
pub mod format;

// ============================================================================
// View-models
// ============================================================================

/// Prediction form state machine.
pub mod form;

/// Insights panel with offline fallback.
pub mod insights;

/// Page composition and command execution.
pub mod page;

// ============================================================================
// Service access and configuration
// ============================================================================

/// HTTP client for the prediction API.
pub mod api;

/// YAML configuration with environment overrides.
pub mod config;

// ============================================================================
// Rendering
// ============================================================================

/// Color type.
pub mod color;

/// Scale functions for data-to-visual mappings.
pub mod scale;

/// Insight chart renderers.
pub mod charts;

/// Output encoders (SVG, HTML).
pub mod output;

/// Interactive terminal UI.
#[cfg(feature = "tui")]
#[cfg_attr(docsrs, doc(cfg(feature = "tui")))]
pub mod tui;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for diamond-viz operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use diamond_viz::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{ApiError, HttpClient, PriceApi};
    pub use crate::charts::{CaratChart, GradeBarChart, InsightCharts};
    pub use crate::color::Rgba;
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::form::{FormEvent, FormState, Phase, ResultView};
    pub use crate::grade::{Clarity, ColorGrade, Cut, Grade};
    pub use crate::insights::{fallback_insights, InsightsPanel, PanelEvent, PanelView};
    pub use crate::model::{
        CaratPoint, DataSource, DiamondAttributes, GradeAggregate, InsightsData, PredictionResult,
        ServiceInfo,
    };
    pub use crate::output::{HtmlExporter, SvgEncoder};
    pub use crate::page::{execute, Command, Page, PageEvent};
    pub use crate::validation::{validate, FormFields, Validation};
}
