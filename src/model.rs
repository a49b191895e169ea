//! Domain records exchanged with the prediction API and fed to the charts.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::grade::{Clarity, ColorGrade, Cut, Grade};

/// Validated attributes of one diamond, ready to send for prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiamondAttributes {
    /// Weight in carats, always finite and > 0.
    pub carat: f64,
    /// Cut quality.
    pub cut: Cut,
    /// Color grade.
    pub color: ColorGrade,
    /// Clarity grade.
    pub clarity: Clarity,
}

impl DiamondAttributes {
    /// Query parameters for `GET /api/predict`.
    #[must_use]
    pub fn query_pairs(&self) -> [(&'static str, String); 4] {
        [
            ("carat", self.carat.to_string()),
            ("cut", self.cut.label().to_string()),
            ("color", self.color.label().to_string()),
            ("clarity", self.clarity.label().to_string()),
        ]
    }
}

/// Price returned by the prediction endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted price in dollars, non-negative.
    pub predicted_price: f64,
}

/// One carat/price observation for the scatter chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaratPoint {
    /// Weight in carats.
    pub carat: f64,
    /// Price in dollars.
    pub price: f64,
}

/// Average price for one grade value.
///
/// On the wire the grade sits under the grade's own field name, e.g.
/// `{"cut": "Ideal", "avgPrice": 3458}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeAggregate<G> {
    /// The grade this average belongs to.
    pub grade: G,
    /// Average price in dollars, non-negative.
    pub avg_price: f64,
}

impl<G: Grade> GradeAggregate<G> {
    /// Create a record.
    #[must_use]
    pub const fn new(grade: G, avg_price: f64) -> Self {
        Self { grade, avg_price }
    }
}

impl<G: Grade> Serialize for GradeAggregate<G> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(G::FIELD, self.grade.label())?;
        map.serialize_entry("avgPrice", &self.avg_price)?;
        map.end()
    }
}

impl<'de, G: Grade> Deserialize<'de> for GradeAggregate<G> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(AggregateVisitor(PhantomData))
    }
}

struct AggregateVisitor<G>(PhantomData<G>);

impl<'de, G: Grade> Visitor<'de> for AggregateVisitor<G> {
    type Value = GradeAggregate<G>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an object with '{}' and 'avgPrice'", G::FIELD)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut grade = None;
        let mut avg_price = None;

        while let Some(key) = map.next_key::<String>()? {
            if key == G::FIELD {
                let label: String = map.next_value()?;
                let parsed = G::from_label(&label).ok_or_else(|| {
                    de::Error::custom(format!("unknown {} grade '{label}'", G::FIELD))
                })?;
                grade = Some(parsed);
            } else if key == "avgPrice" {
                avg_price = Some(map.next_value::<f64>()?);
            } else {
                map.next_value::<de::IgnoredAny>()?;
            }
        }

        let grade = grade.ok_or_else(|| de::Error::missing_field(G::FIELD))?;
        let avg_price = avg_price.ok_or_else(|| de::Error::missing_field("avgPrice"))?;
        if !avg_price.is_finite() || avg_price < 0.0 {
            return Err(de::Error::custom(format!("invalid avgPrice {avg_price}")));
        }

        Ok(GradeAggregate { grade, avg_price })
    }
}

/// Body of `GET /api/insights`, and the shape of the fallback data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsData {
    /// Carat/price pairs for the scatter chart.
    pub carat_data: Vec<CaratPoint>,
    /// Average price per cut.
    pub cut_data: Vec<GradeAggregate<Cut>>,
    /// Average price per color grade.
    pub color_data: Vec<GradeAggregate<ColorGrade>>,
    /// Average price per clarity grade.
    pub clarity_data: Vec<GradeAggregate<Clarity>>,
}

/// Where a set of insights came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Decoded from the insights endpoint.
    Live,
    /// Generated locally after the endpoint failed.
    Fallback,
}

/// Banner served at the API root.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Service name.
    #[serde(default)]
    pub message: String,
    /// Model description.
    #[serde(default)]
    pub model: String,
    /// API version.
    #[serde(default)]
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs() {
        let attrs = DiamondAttributes {
            carat: 1.5,
            cut: Cut::VeryGood,
            color: ColorGrade::E,
            clarity: Clarity::Vs1,
        };
        let pairs = attrs.query_pairs();
        assert_eq!(pairs[0], ("carat", "1.5".to_string()));
        assert_eq!(pairs[1], ("cut", "Very Good".to_string()));
        assert_eq!(pairs[2], ("color", "E".to_string()));
        assert_eq!(pairs[3], ("clarity", "VS1".to_string()));
    }

    #[test]
    fn test_aggregate_wire_shape() {
        let row = GradeAggregate::new(Cut::Ideal, 3458.0);
        let json = serde_json::to_value(row).unwrap();
        assert_eq!(json, serde_json::json!({"cut": "Ideal", "avgPrice": 3458.0}));
    }

    #[test]
    fn test_aggregate_decode_uses_grade_field() {
        let row: GradeAggregate<ColorGrade> =
            serde_json::from_str(r#"{"color": "E", "avgPrice": 3077}"#).unwrap();
        assert_eq!(row, GradeAggregate::new(ColorGrade::E, 3077.0));

        let wrong_field = serde_json::from_str::<GradeAggregate<ColorGrade>>(
            r#"{"cut": "E", "avgPrice": 3077}"#,
        );
        assert!(wrong_field.is_err());
    }

    #[test]
    fn test_aggregate_rejects_unknown_grade_and_negative_price() {
        assert!(serde_json::from_str::<GradeAggregate<Clarity>>(
            r#"{"clarity": "FL", "avgPrice": 1}"#
        )
        .is_err());
        assert!(serde_json::from_str::<GradeAggregate<Clarity>>(
            r#"{"clarity": "IF", "avgPrice": -1}"#
        )
        .is_err());
    }

    #[test]
    fn test_aggregate_ignores_extra_fields() {
        let row: GradeAggregate<Cut> =
            serde_json::from_str(r#"{"cut": "Good", "avgPrice": 10, "count": 4906}"#).unwrap();
        assert_eq!(row.grade, Cut::Good);
    }

    #[test]
    fn test_insights_decode() {
        let body = r#"{
            "caratData": [{"carat": 0.23, "price": 326}],
            "cutData": [{"cut": "Ideal", "avgPrice": 3457.54}],
            "colorData": [{"color": "D", "avgPrice": 3169.95}],
            "clarityData": [{"clarity": "SI2", "avgPrice": 5063.03}]
        }"#;
        let data: InsightsData = serde_json::from_str(body).unwrap();
        assert_eq!(data.carat_data, vec![CaratPoint { carat: 0.23, price: 326.0 }]);
        assert_eq!(data.cut_data[0].grade, Cut::Ideal);
        assert_eq!(data.color_data[0].grade, ColorGrade::D);
        assert_eq!(data.clarity_data[0].grade, Clarity::Si2);
    }

    #[test]
    fn test_insights_missing_array_is_error() {
        let body = r#"{"caratData": [], "cutData": [], "colorData": []}"#;
        assert!(serde_json::from_str::<InsightsData>(body).is_err());
    }

    #[test]
    fn test_service_info_defaults() {
        let info: ServiceInfo = serde_json::from_str(r#"{"message": "Diamond Price Predictor API"}"#).unwrap();
        assert_eq!(info.message, "Diamond Price Predictor API");
        assert!(info.version.is_empty());
    }
}
