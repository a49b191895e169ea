//! Average-price bar charts for the cut, color and clarity grades.

use super::palette::{color_for_label, GradeColor, DEFAULT_COLOR};
use super::{ChartText, Frame, CHART_HEIGHT, CHART_WIDTH, THEME_COLOR};
use crate::color::Rgba;
use crate::format::format_tooltip;
use crate::model::GradeAggregate;
use crate::output::{SvgEncoder, TextAnchor};
use crate::scale::{BandScale, LinearScale, Scale};

/// Legend entry of every bar series.
pub const LEGEND: &str = "Average Price";
const BAND_PADDING: f64 = 0.2;

/// One bar: grade label, height and fill.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Grade label on the x axis.
    pub label: &'static str,
    /// Average price in dollars.
    pub value: f64,
    /// Fill from the grade's color table.
    pub color: Rgba,
}

impl Bar {
    /// Bar for a `G` grade label, colored from the grade table.
    #[must_use]
    pub fn new<G: GradeColor>(label: &'static str, value: f64) -> Self {
        Self {
            label,
            value,
            color: color_for_label::<G>(label),
        }
    }

    /// Hover text, e.g. `Average Price: $3,458`.
    #[must_use]
    pub fn tooltip(&self) -> String {
        format_tooltip(LEGEND, self.value, true)
    }
}

/// Bar chart over grade aggregates, one bar per record in input order.
#[derive(Debug, Clone)]
pub struct GradeBarChart {
    text: ChartText,
    bars: Vec<Bar>,
    width: u32,
    height: u32,
}

impl GradeBarChart {
    /// Chart over `records`, colored by grade.
    #[must_use]
    pub fn new<G: GradeColor>(records: &[GradeAggregate<G>], text: ChartText) -> Self {
        let bars = records
            .iter()
            .map(|r| Bar::new::<G>(r.grade.label(), r.avg_price))
            .collect();
        Self {
            text,
            bars,
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
        self.text
    }

    /// Bars in input order.
    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Render to an SVG document.
    #[must_use]
    pub fn to_svg(&self) -> SvgEncoder {
        let frame = Frame::new(self.width, self.height);
        let mut svg = frame.canvas(&self.text);

        let values: Vec<f64> = self.bars.iter().map(|b| b.value).collect();
        let y = LinearScale::from_zero(&values, frame.y_range())
            .or_else(|| LinearScale::new((0.0, 1.0), frame.y_range()).ok())
            .map(|s| s.nice(5));
        if let Some(y) = &y {
            svg = frame.y_axis(svg, y);
        }

        if let (Some(y), Ok(x)) = (y, BandScale::new(self.bars.len(), frame.x_range(), BAND_PADDING)) {
            let baseline = frame.bottom();
            for (i, bar) in self.bars.iter().enumerate() {
                let value = if bar.value.is_finite() { bar.value.max(0.0) } else { 0.0 };
                let top = y.scale(value);
                svg = svg
                    .rect_with_tooltip(
                        x.scale(i) as f32,
                        top as f32,
                        x.bandwidth() as f32,
                        (baseline - top) as f32,
                        bar.color,
                        &bar.tooltip(),
                    )
                    .text_anchored(
                        x.center(i) as f32,
                        baseline as f32 + 16.0,
                        bar.label,
                        11.0,
                        THEME_COLOR,
                        TextAnchor::Middle,
                    );
            }
        }

        svg = frame.axis_labels(svg, &self.text);
        frame.legend(svg, LEGEND, DEFAULT_COLOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{CLARITY_TEXT, COLOR_TEXT, CUT_TEXT};
    use crate::grade::{Clarity, ColorGrade, Cut};
    use crate::insights::fallback::{CLARITY_AVERAGES, COLOR_AVERAGES, CUT_AVERAGES};
    use crate::output::SvgElement;

    fn bar_rects(svg: &SvgEncoder) -> Vec<(f32, f32, Rgba)> {
        svg.elements()
            .iter()
            .filter_map(|e| match e {
                SvgElement::Rect {
                    x,
                    height,
                    fill,
                    tooltip: Some(_),
                    ..
                } => Some((*x, *height, *fill)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_one_bar_per_record_in_input_order() {
        let chart = GradeBarChart::new(&CUT_AVERAGES, CUT_TEXT);
        let labels: Vec<_> = chart.bars().iter().map(|b| b.label).collect();
        assert_eq!(labels, ["Fair", "Good", "Very Good", "Premium", "Ideal"]);

        let rects = bar_rects(&chart.to_svg());
        assert_eq!(rects.len(), 5);
        assert!(rects.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_bar_colors_follow_table() {
        let chart = GradeBarChart::new(&COLOR_AVERAGES, COLOR_TEXT);
        assert_eq!(chart.bars()[0].color, ColorGrade::J.color());
        let chart = GradeBarChart::new(&CLARITY_AVERAGES, CLARITY_TEXT);
        assert_eq!(chart.bars()[7].color, Clarity::If.color());
    }

    #[test]
    fn test_unknown_label_gets_default_color() {
        let bar = Bar::new::<Cut>("Excellent", 5000.0);
        assert_eq!(bar.color, DEFAULT_COLOR);
        assert_eq!(Bar::new::<Cut>("Fair", 1.0).color, Cut::Fair.color());
    }

    #[test]
    fn test_heights_track_avg_price() {
        let records = [
            GradeAggregate::new(Cut::Fair, 1000.0),
            GradeAggregate::new(Cut::Ideal, 4000.0),
        ];
        let rects = bar_rects(&GradeBarChart::new(&records, CUT_TEXT).to_svg());
        assert!(rects[1].1 > rects[0].1 * 3.5);
    }

    #[test]
    fn test_input_order_not_resorted() {
        let records = [
            GradeAggregate::new(Cut::Ideal, 3458.0),
            GradeAggregate::new(Cut::Fair, 4358.0),
        ];
        let chart = GradeBarChart::new(&records, CUT_TEXT);
        assert_eq!(chart.bars()[0].label, "Ideal");
    }

    #[test]
    fn test_tooltip_and_legend() {
        let chart = GradeBarChart::new(&CUT_AVERAGES, CUT_TEXT);
        assert_eq!(chart.bars()[4].tooltip(), "Average Price: $3,458");
        let svg = chart.to_svg().render();
        assert!(svg.contains("<title>Average Price: $4,358</title>"));
        assert!(svg.contains(">Average Price</text>"));
        assert!(svg.contains(">Very Good</text>"));
    }

    #[test]
    fn test_empty_records() {
        let chart = GradeBarChart::new::<Cut>(&[], CUT_TEXT);
        let svg = chart.to_svg();
        assert!(bar_rects(&svg).is_empty());
        assert!(svg.render().contains("Avg Price ($)"));
    }
}
