//! Client-side validation of the prediction form.
//!
//! Validation is a pure function of the raw field values. Nothing here is
//! stored: callers recompute it whenever a field changes.

use crate::grade::{Clarity, ColorGrade, Cut, Grade};
use crate::model::DiamondAttributes;

/// Raw, unvalidated form input.
///
/// Grade selections are kept as strings so a value outside the option list
/// can be represented and rejected instead of silently coerced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    /// Free-text carat weight.
    pub carat: String,
    /// Selected cut label.
    pub cut: String,
    /// Selected color label.
    pub color: String,
    /// Selected clarity label.
    pub clarity: String,
}

impl FormFields {
    /// Fields pre-filled with the given values.
    #[must_use]
    pub fn new(
        carat: impl Into<String>,
        cut: impl Into<String>,
        color: impl Into<String>,
        clarity: impl Into<String>,
    ) -> Self {
        Self {
            carat: carat.into(),
            cut: cut.into(),
            color: color.into(),
            clarity: clarity.into(),
        }
    }
}

/// Inline error for a single field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// Carat left empty.
    #[error("Carat is required")]
    CaratMissing,
    /// Carat is not a finite number.
    #[error("Carat must be a number")]
    CaratNotNumber,
    /// Carat is zero or negative.
    #[error("Carat must be greater than 0")]
    CaratNotPositive,
    /// No grade selected.
    #[error("Select a {field} grade")]
    GradeMissing {
        /// Grade dimension.
        field: &'static str,
    },
    /// Selected value is outside the option list.
    #[error("{title} must be one of: {allowed}")]
    GradeNotAllowed {
        /// Capitalized dimension name.
        title: &'static str,
        /// Allowed labels.
        allowed: String,
    },
}

/// Per-field validation outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    /// Parsed carat or its error.
    pub carat: Result<f64, FieldError>,
    /// Parsed cut or its error.
    pub cut: Result<Cut, FieldError>,
    /// Parsed color or its error.
    pub color: Result<ColorGrade, FieldError>,
    /// Parsed clarity or its error.
    pub clarity: Result<Clarity, FieldError>,
}

impl Validation {
    /// True iff every field is valid.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        self.attributes().is_some()
    }

    /// The validated attributes, if all four fields pass.
    #[must_use]
    pub fn attributes(&self) -> Option<DiamondAttributes> {
        Some(DiamondAttributes {
            carat: *self.carat.as_ref().ok()?,
            cut: *self.cut.as_ref().ok()?,
            color: *self.color.as_ref().ok()?,
            clarity: *self.clarity.as_ref().ok()?,
        })
    }

    /// Inline errors in field order (carat, cut, color, clarity).
    #[must_use]
    pub fn errors(&self) -> Vec<&FieldError> {
        [
            self.carat.as_ref().err(),
            self.cut.as_ref().err(),
            self.color.as_ref().err(),
            self.clarity.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Validate all four fields.
#[must_use]
pub fn validate(fields: &FormFields) -> Validation {
    Validation {
        carat: validate_carat(&fields.carat),
        cut: validate_grade(&fields.cut, "Cut"),
        color: validate_grade(&fields.color, "Color"),
        clarity: validate_grade(&fields.clarity, "Clarity"),
    }
}

/// Carat must parse to a finite number greater than zero.
pub fn validate_carat(raw: &str) -> Result<f64, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::CaratMissing);
    }
    let value: f64 = trimmed.parse().map_err(|_| FieldError::CaratNotNumber)?;
    if !value.is_finite() {
        return Err(FieldError::CaratNotNumber);
    }
    if value <= 0.0 {
        return Err(FieldError::CaratNotPositive);
    }
    Ok(value)
}

/// Grade must equal one of the fixed labels exactly.
pub fn validate_grade<G: Grade>(raw: &str, title: &'static str) -> Result<G, FieldError> {
    if raw.is_empty() {
        return Err(FieldError::GradeMissing { field: G::FIELD });
    }
    G::from_label(raw).ok_or_else(|| FieldError::GradeNotAllowed {
        title,
        allowed: G::label_list(),
    })
}
