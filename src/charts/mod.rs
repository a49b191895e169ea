//! Insight chart renderers.
//!
//! Each chart is a pure function of an ordered slice of records: it keeps
//! the input order, holds no state between calls and never fetches. Charts
//! render to SVG through [`SvgEncoder`]; the terminal UI draws the same
//! models with ratatui widgets.

pub mod bars;
pub mod carat;
pub mod palette;

use crate::color::Rgba;
use crate::format::format_number;
use crate::model::InsightsData;
use crate::output::{SvgEncoder, TextAnchor};
use crate::scale::{LinearScale, Scale};

pub use bars::{Bar, GradeBarChart};
pub use carat::{CaratChart, ScatterMark};
pub use palette::{color_for_label, GradeColor, DEFAULT_COLOR, THEME_COLOR};

/// Headings and axis labels of one chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartText {
    /// Card heading.
    pub title: &'static str,
    /// One-sentence explanation under the heading.
    pub subtitle: &'static str,
    /// Label under the x axis, if any.
    pub x_label: Option<&'static str>,
    /// Label along the y axis.
    pub y_label: &'static str,
}

/// Price vs. carat scatter.
pub const CARAT_TEXT: ChartText = ChartText {
    title: "Price vs Carat Weight",
    subtitle: "Carat weight is the strongest predictor of diamond price. \
               Larger diamonds are exponentially more expensive.",
    x_label: Some("Carat Weight"),
    y_label: "Price ($)",
};

/// Average price per cut.
pub const CUT_TEXT: ChartText = ChartText {
    title: "Average Price by Cut Quality",
    subtitle: "Better cut quality generally commands higher prices. \
               Ideal cuts maximize brilliance and sparkle.",
    x_label: None,
    y_label: "Avg Price ($)",
};

/// Average price per color grade.
pub const COLOR_TEXT: ChartText = ChartText {
    title: "Average Price by Color Grade",
    subtitle: "Color grades range from J (noticeable color) to D (colorless). \
               Colorless diamonds are rarer and more valuable.",
    x_label: Some("Color Grade (J=worst, D=best)"),
    y_label: "Avg Price ($)",
};

/// Average price per clarity grade.
pub const CLARITY_TEXT: ChartText = ChartText {
    title: "Average Price by Clarity Grade",
    subtitle: "Clarity measures internal and external flaws. \
               IF (Internally Flawless) diamonds are the most expensive.",
    x_label: Some("Clarity Grade (I1=worst, IF=best)"),
    y_label: "Avg Price ($)",
};

/// Default chart width in pixels.
pub const CHART_WIDTH: u32 = 640;
/// Default chart height in pixels.
pub const CHART_HEIGHT: u32 = 320;
const Y_TICKS: usize = 5;

/// The four insight charts built from one [`InsightsData`].
#[derive(Debug, Clone)]
pub struct InsightCharts {
    /// Price vs. carat.
    pub carat: CaratChart,
    /// Average price by cut.
    pub cut: GradeBarChart,
    /// Average price by color.
    pub color: GradeBarChart,
    /// Average price by clarity.
    pub clarity: GradeBarChart,
}

impl InsightCharts {
    /// Build all four charts.
    #[must_use]
    pub fn new(data: &InsightsData) -> Self {
        Self {
            carat: CaratChart::new(&data.carat_data),
            cut: GradeBarChart::new(&data.cut_data, CUT_TEXT),
            color: GradeBarChart::new(&data.color_data, COLOR_TEXT),
            clarity: GradeBarChart::new(&data.clarity_data, CLARITY_TEXT),
        }
    }

    /// `(text, svg)` per chart in page order.
    #[must_use]
    pub fn render_svg(&self) -> [(ChartText, String); 4] {
        [
            (self.carat.text(), self.carat.to_svg().render()),
            (self.cut.text(), self.cut.to_svg().render()),
            (self.color.text(), self.color.to_svg().render()),
            (self.clarity.text(), self.clarity.to_svg().render()),
        ]
    }
}

/// Plot area of a chart inside its SVG canvas.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame {
    width: u32,
    height: u32,
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl Frame {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            left: 72.0,
            right: f64::from(width) - 20.0,
            top: 44.0,
            bottom: f64::from(height) - 48.0,
        }
    }

    pub(crate) fn x_range(&self) -> (f64, f64) {
        (self.left, self.right)
    }

    /// Bottom to top, so larger values sit higher.
    pub(crate) fn y_range(&self) -> (f64, f64) {
        (self.bottom, self.top)
    }

    pub(crate) fn bottom(&self) -> f64 {
        self.bottom
    }

    pub(crate) fn canvas(&self, text: &ChartText) -> SvgEncoder {
        SvgEncoder::new(self.width, self.height).title(text.title)
    }

    /// Horizontal grid, y ticks and the y axis line.
    pub(crate) fn y_axis(&self, svg: SvgEncoder, y: &LinearScale) -> SvgEncoder {
        let mut svg = svg;
        for tick in y.ticks(Y_TICKS) {
            let py = y.scale(tick) as f32;
            svg = svg
                .dashed_line(self.left as f32, py, self.right as f32, py, palette::GRID_COLOR)
                .text_anchored(
                    self.left as f32 - 6.0,
                    py + 4.0,
                    &format_number(tick),
                    11.0,
                    THEME_COLOR,
                    TextAnchor::End,
                );
        }
        svg.line(
            self.left as f32,
            self.top as f32,
            self.left as f32,
            self.bottom as f32,
            THEME_COLOR,
            1.0,
        )
    }

    /// X axis line plus both axis labels.
    pub(crate) fn axis_labels(&self, svg: SvgEncoder, text: &ChartText) -> SvgEncoder {
        let mid_y = ((self.top + self.bottom) / 2.0) as f32;
        let mut svg = svg
            .line(
                self.left as f32,
                self.bottom as f32,
                self.right as f32,
                self.bottom as f32,
                THEME_COLOR,
                1.0,
            )
            .text_rotated(18.0, mid_y, text.y_label, 12.0, THEME_COLOR, -90.0);
        if let Some(x_label) = text.x_label {
            let mid_x = ((self.left + self.right) / 2.0) as f32;
            svg = svg.text_anchored(
                mid_x,
                self.height as f32 - 8.0,
                x_label,
                12.0,
                THEME_COLOR,
                TextAnchor::Middle,
            );
        }
        svg
    }

    /// Legend swatch and label centered above the plot.
    pub(crate) fn legend(&self, svg: SvgEncoder, label: &str, color: Rgba) -> SvgEncoder {
        let cx = ((self.left + self.right) / 2.0) as f32;
        svg.rect(cx - 50.0, 14.0, 10.0, 10.0, color).text(
            cx - 34.0,
            23.0,
            label,
            12.0,
            THEME_COLOR,
        )
    }
}
