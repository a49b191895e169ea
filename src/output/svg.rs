//! SVG output encoder.
//!
//! Builder over a flat list of vector elements. Marks may carry a tooltip,
//! written as a nested `<title>` so browsers show it on hover.

use crate::color::Rgba;
use std::fmt::Write as FmtWrite;

/// SVG document builder.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    /// SVG width
    width: u32,
    /// SVG height
    height: u32,
    /// Accessible title of the whole chart
    title: Option<String>,
    /// SVG elements
    elements: Vec<SvgElement>,
}

/// An SVG element.
///
/// Field names are self-documenting and match SVG attribute names.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Rectangle
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgba,
        tooltip: Option<String>,
    },
    /// Circle
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        fill: Rgba,
        tooltip: Option<String>,
    },
    /// Line
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Rgba,
        stroke_width: f32,
        dashed: bool,
    },
    /// Text
    Text {
        x: f32,
        y: f32,
        text: String,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
        rotate: Option<f32>,
    },
}

/// Text anchor position for SVG text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Align text start at position (left-aligned for LTR)
    #[default]
    Start,
    /// Center text at position
    Middle,
    /// Align text end at position (right-aligned for LTR)
    End,
}

impl TextAnchor {
    fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

impl SvgEncoder {
    /// Create a new SVG encoder with given dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            title: None,
            elements: Vec::new(),
        }
    }

    /// Elements added so far, in paint order.
    #[must_use]
    pub fn elements(&self) -> &[SvgElement] {
        &self.elements
    }

    /// Set the document title.
    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Add a rectangle.
    #[must_use]
    pub fn rect(self, x: f32, y: f32, width: f32, height: f32, fill: Rgba) -> Self {
        self.push(SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill,
            tooltip: None,
        })
    }

    /// Add a rectangle with a hover tooltip.
    #[must_use]
    pub fn rect_with_tooltip(
        self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgba,
        tooltip: &str,
    ) -> Self {
        self.push(SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill,
            tooltip: Some(tooltip.to_string()),
        })
    }

    /// Add a circle.
    #[must_use]
    pub fn circle(self, cx: f32, cy: f32, r: f32, fill: Rgba) -> Self {
        self.push(SvgElement::Circle {
            cx,
            cy,
            r,
            fill,
            tooltip: None,
        })
    }

    /// Add a circle with a hover tooltip.
    #[must_use]
    pub fn circle_with_tooltip(self, cx: f32, cy: f32, r: f32, fill: Rgba, tooltip: &str) -> Self {
        self.push(SvgElement::Circle {
            cx,
            cy,
            r,
            fill,
            tooltip: Some(tooltip.to_string()),
        })
    }

    /// Add a line.
    #[must_use]
    pub fn line(self, x1: f32, y1: f32, x2: f32, y2: f32, stroke: Rgba, stroke_width: f32) -> Self {
        self.push(SvgElement::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            stroke_width,
            dashed: false,
        })
    }

    /// Add a dashed line (grid lines).
    #[must_use]
    pub fn dashed_line(self, x1: f32, y1: f32, x2: f32, y2: f32, stroke: Rgba) -> Self {
        self.push(SvgElement::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            stroke_width: 1.0,
            dashed: true,
        })
    }

    /// Add text.
    #[must_use]
    pub fn text(self, x: f32, y: f32, text: &str, font_size: f32, fill: Rgba) -> Self {
        self.text_anchored(x, y, text, font_size, fill, TextAnchor::Start)
    }

    /// Add text with anchor.
    #[must_use]
    pub fn text_anchored(
        self,
        x: f32,
        y: f32,
        text: &str,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
    ) -> Self {
        self.push(SvgElement::Text {
            x,
            y,
            text: text.to_string(),
            font_size,
            fill,
            anchor,
            rotate: None,
        })
    }

    /// Add centered text rotated by `degrees` around its anchor (axis labels).
    #[must_use]
    pub fn text_rotated(self, x: f32, y: f32, text: &str, font_size: f32, fill: Rgba, degrees: f32) -> Self {
        self.push(SvgElement::Text {
            x,
            y,
            text: text.to_string(),
            font_size,
            fill,
            anchor: TextAnchor::Middle,
            rotate: Some(degrees),
        })
    }

    fn push(mut self, element: SvgElement) -> Self {
        self.elements.push(element);
        self
    }

    /// Render to SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(4096);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}" font-family="sans-serif">"#,
            self.width, self.height, self.width, self.height
        );

        if let Some(title) = &self.title {
            let _ = writeln!(svg, "  <title>{}</title>", escape_xml(title));
        }

        let _ = writeln!(
            svg,
            r#"  <rect width="100%" height="100%" fill="{}"/>"#,
            Rgba::WHITE.to_css()
        );

        for element in &self.elements {
            let _ = writeln!(svg, "  {}", element_to_svg(element));
        }

        svg.push_str("</svg>\n");
        svg
    }
}

/// Escape XML special characters for text content and attribute values.
#[must_use]
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Close a shape either as a self-closing tag or around a `<title>` tooltip.
fn close_shape(open: String, tag: &str, tooltip: Option<&String>) -> String {
    match tooltip {
        Some(t) => format!("{open}><title>{}</title></{tag}>", escape_xml(t)),
        None => format!("{open}/>"),
    }
}

fn element_to_svg(element: &SvgElement) -> String {
    match element {
        SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill,
            tooltip,
        } => {
            let open = format!(
                r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{}""#,
                fill.to_css()
            );
            close_shape(open, "rect", tooltip.as_ref())
        }
        SvgElement::Circle {
            cx,
            cy,
            r,
            fill,
            tooltip,
        } => {
            let open = format!(r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{}""#, fill.to_css());
            close_shape(open, "circle", tooltip.as_ref())
        }
        SvgElement::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            stroke_width,
            dashed,
        } => {
            let dash = if *dashed { r#" stroke-dasharray="3 3""# } else { "" };
            format!(
                r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}" stroke-width="{stroke_width}"{dash}/>"#,
                stroke.to_css()
            )
        }
        SvgElement::Text {
            x,
            y,
            text,
            font_size,
            fill,
            anchor,
            rotate,
        } => {
            let transform = rotate
                .map(|deg| format!(r#" transform="rotate({deg} {x} {y})""#))
                .unwrap_or_default();
            format!(
                r#"<text x="{x}" y="{y}" font-size="{font_size}" fill="{}" text-anchor="{}"{transform}>{}</text>"#,
                fill.to_css(),
                anchor.as_str(),
                escape_xml(text)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::from_u32(0xff0000);

    #[test]
    fn test_svg_encoder_new() {
        let svg = SvgEncoder::new(800, 600).render();

        assert!(svg.contains("width=\"800\""));
        assert!(svg.contains("height=\"600\""));
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_svg_rect() {
        let svg = SvgEncoder::new(100, 100)
            .rect(10.0, 20.0, 30.0, 40.0, RED)
            .render();

        assert!(svg.contains(r#"<rect x="10" y="20" width="30" height="40" fill="rgb(255,0,0)"/>"#));
    }

    #[test]
    fn test_svg_rect_tooltip() {
        let svg = SvgEncoder::new(100, 100)
            .rect_with_tooltip(0.0, 0.0, 5.0, 5.0, RED, "Ideal: $3,458")
            .render();

        assert!(svg.contains("<title>Ideal: $3,458</title></rect>"));
    }

    #[test]
    fn test_svg_circle_with_opacity() {
        let svg = SvgEncoder::new(100, 100)
            .circle(50.0, 50.0, 3.0, Rgba::from_u32(0x2a9d8f).with_opacity(0.6))
            .render();

        assert!(svg.contains(r#"<circle cx="50" cy="50" r="3" fill="rgba(42,157,143,0.600)"/>"#));
    }

    #[test]
    fn test_svg_circle_tooltip_escaped() {
        let svg = SvgEncoder::new(100, 100)
            .circle_with_tooltip(1.0, 1.0, 2.0, RED, "a < b")
            .render();

        assert!(svg.contains("<title>a &lt; b</title></circle>"));
    }

    #[test]
    fn test_svg_lines() {
        let svg = SvgEncoder::new(100, 100)
            .line(0.0, 0.0, 100.0, 100.0, Rgba::BLACK, 2.0)
            .dashed_line(0.0, 50.0, 100.0, 50.0, Rgba::BLACK)
            .render();

        assert!(svg.contains(r#"x2="100" y2="100" stroke="rgb(0,0,0)" stroke-width="2"/>"#));
        assert!(svg.contains("stroke-dasharray=\"3 3\""));
    }

    #[test]
    fn test_svg_text_escaping() {
        let svg = SvgEncoder::new(100, 100)
            .text(10.0, 50.0, "<script>alert('xss')</script>", 12.0, Rgba::BLACK)
            .render();

        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_svg_text_anchor_and_rotation() {
        let svg = SvgEncoder::new(100, 100)
            .text_anchored(50.0, 50.0, "Centered", 12.0, Rgba::BLACK, TextAnchor::Middle)
            .text_rotated(10.0, 50.0, "Price ($)", 12.0, Rgba::BLACK, -90.0)
            .render();

        assert!(svg.contains("text-anchor=\"middle\">Centered</text>"));
        assert!(svg.contains(r#"transform="rotate(-90 10 50)""#));
    }

    #[test]
    fn test_svg_title_and_white_background() {
        let svg = SvgEncoder::new(100, 100)
            .title("Price vs. Carat Weight")
            .render();

        assert_eq!(svg.matches("<rect").count(), 1);
        assert!(svg.contains(r#"<rect width="100%" height="100%" fill="rgb(255,255,255)"/>"#));
        assert!(svg.contains("<title>Price vs. Carat Weight</title>"));
    }

    #[test]
    fn test_svg_elements_in_paint_order() {
        let encoder = SvgEncoder::new(640, 360)
            .circle(50.0, 50.0, 10.0, RED)
            .rect(0.0, 0.0, 1.0, 1.0, RED);

        assert!(matches!(encoder.elements()[0], SvgElement::Circle { .. }));
        assert!(matches!(encoder.elements()[1], SvgElement::Rect { tooltip: None, .. }));
        assert!(encoder.render().contains(r#"width="640" height="360""#));
        assert_eq!(TextAnchor::default(), TextAnchor::Start);
    }
}
