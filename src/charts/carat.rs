//! Price vs. carat scatter.

use super::palette::DEFAULT_COLOR;
use super::{ChartText, Frame, CARAT_TEXT, CHART_HEIGHT, CHART_WIDTH, THEME_COLOR};
use crate::color::Rgba;
use crate::format::{format_number, format_tooltip};
use crate::model::CaratPoint;
use crate::output::{SvgEncoder, TextAnchor};
use crate::scale::{LinearScale, Scale};

/// Legend entry of the scatter series.
pub const LEGEND: &str = "Diamonds";
/// Point fill opacity.
pub const POINT_OPACITY: f32 = 0.6;

/// One plotted point.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterMark {
    /// Carat weight.
    pub carat: f64,
    /// Price in dollars.
    pub price: f64,
    /// Hover text, e.g. `Carat: 1.5` / `Price: $8,500`.
    pub tooltip: String,
}

/// Scatter of carat (x) against price (y).
#[derive(Debug, Clone)]
pub struct CaratChart {
    points: Vec<CaratPoint>,
    color: Rgba,
    radius: f32,
    width: u32,
    height: u32,
}

impl CaratChart {
    /// Chart over `points`, drawn in input order.
    #[must_use]
    pub fn new(points: &[CaratPoint]) -> Self {
        Self {
            points: points.to_vec(),
            color: DEFAULT_COLOR.with_opacity(POINT_OPACITY),
            radius: 3.5,
            width: CHART_WIDTH,
            height: CHART_HEIGHT,
        }
    }

    /// Set the output dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Headings and axis labels.
    #[must_use]
    pub fn text(&self) -> ChartText {
        CARAT_TEXT
    }

    /// Point fill, including opacity.
    #[must_use]
    pub fn color(&self) -> Rgba {
        self.color
    }

    /// Number of input points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Plottable points with tooltips. Non-finite records are skipped.
    #[must_use]
    pub fn marks(&self) -> Vec<ScatterMark> {
        self.points
            .iter()
            .filter(|p| p.carat.is_finite() && p.price.is_finite())
            .map(|p| ScatterMark {
                carat: p.carat,
                price: p.price,
                tooltip: format!(
                    "{}\n{}",
                    format_tooltip("Carat", p.carat, false),
                    format_tooltip("Price", p.price, true)
                ),
            })
            .collect()
    }

    /// Render to an SVG document.
    #[must_use]
    pub fn to_svg(&self) -> SvgEncoder {
        let frame = Frame::new(self.width, self.height);
        let marks = self.marks();

        let carats: Vec<f64> = marks.iter().map(|m| m.carat).collect();
        let prices: Vec<f64> = marks.iter().map(|m| m.price).collect();
        let x = LinearScale::from_data(&carats, frame.x_range())
            .or_else(|| LinearScale::new((0.0, 1.0), frame.x_range()).ok());
        let y = LinearScale::from_zero(&prices, frame.y_range())
            .or_else(|| LinearScale::new((0.0, 1.0), frame.y_range()).ok())
            .map(|s| s.nice(5));

        let mut svg = frame.canvas(&CARAT_TEXT);
        let (Some(x), Some(y)) = (x, y) else {
            return frame.axis_labels(svg, &CARAT_TEXT);
        };

        svg = frame.y_axis(svg, &y);
        for tick in x.ticks(6) {
            let px = x.scale(tick) as f32;
            svg = svg.text_anchored(
                px,
                frame.bottom() as f32 + 16.0,
                &format_number(tick),
                11.0,
                THEME_COLOR,
                TextAnchor::Middle,
            );
        }
        for mark in &marks {
            svg = svg.circle_with_tooltip(
                x.scale(mark.carat) as f32,
                y.scale(mark.price) as f32,
                self.radius,
                self.color,
                &mark.tooltip,
            );
        }
        svg = frame.axis_labels(svg, &CARAT_TEXT);
        frame.legend(svg, LEGEND, self.color)
    }
}
