//! Categorical diamond grades: cut, color and clarity.
//!
//! Every grade enum lists its values worst to best, which is also the order
//! the insight bar charts expect their records in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A fixed, ordered set of grade labels.
pub trait Grade: Copy + Eq + fmt::Debug + fmt::Display + 'static {
    /// All values, worst to best.
    const ALL: &'static [Self];

    /// Human name of the dimension ("cut", "color", "clarity").
    ///
    /// Also the JSON field that carries the grade in insight records.
    const FIELD: &'static str;

    /// Exact label used on the wire and in selections.
    fn label(self) -> &'static str;

    /// Parse an exact label; anything else is rejected.
    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|g| g.label() == label)
    }

    /// Comma-separated list of every label, worst to best.
    fn label_list() -> String {
        Self::ALL.iter().map(|g| g.label()).collect::<Vec<_>>().join(", ")
    }
}

/// Error returned when a label names no known grade.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {field} grade '{label}'")]
pub struct UnknownGrade {
    /// Grade dimension.
    pub field: &'static str,
    /// The rejected label.
    pub label: String,
}

macro_rules! grade_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal, [$($variant:ident => $label:literal),+ $(,)?]
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[allow(missing_docs)]
        pub enum $name {
            $($variant),+
        }

        impl Grade for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];
            const FIELD: &'static str = $field;

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = UnknownGrade;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_label(s).ok_or_else(|| UnknownGrade {
                    field: $field,
                    label: s.to_string(),
                })
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let label = String::deserialize(deserializer)?;
                label.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

grade_enum!(
    /// Cut quality.
    Cut, "cut", [
        Fair => "Fair",
        Good => "Good",
        VeryGood => "Very Good",
        Premium => "Premium",
        Ideal => "Ideal",
    ]
);

grade_enum!(
    /// Color grade, J (noticeable color) to D (colorless).
    ColorGrade, "color", [
        J => "J",
        I => "I",
        H => "H",
        G => "G",
        F => "F",
        E => "E",
        D => "D",
    ]
);

grade_enum!(
    /// Clarity grade, I1 (included) to IF (internally flawless).
    Clarity, "clarity", [
        I1 => "I1",
        Si2 => "SI2",
        Si1 => "SI1",
        Vs2 => "VS2",
        Vs1 => "VS1",
        Vvs2 => "VVS2",
        Vvs1 => "VVS1",
        If => "IF",
    ]
);
