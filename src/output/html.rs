//! Standalone HTML export of the predictor page.
//!
//! One self-contained document: result card, key insights, the four charts
//! as inline SVG, the 4 Cs section and a footer. No scripts, no external
//! assets.

use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::Path;

use super::svg::escape_xml;
use crate::charts::palette::{DEFAULT_COLOR, THEME_COLOR};
use crate::charts::InsightCharts;
use crate::error::Result;
use crate::form::{PLACEHOLDER_TEXT, RESULT_CAPTION};
use crate::format::{format_number, format_price, PriceSize};
use crate::insights::copy::{Blurb, FOUR_CS, FOUR_CS_TITLE, KEY_INSIGHTS, PANEL_SUBTITLE, PANEL_TITLE};
use crate::model::{DataSource, DiamondAttributes, InsightsData, PredictionResult};

/// Document title and page heading.
pub const PAGE_TITLE: &str = "Diamond Price Predictor";
/// Footer line.
pub const FOOTER_TEXT: &str = "Diamond Price Predictor. All rights reserved.";

/// Builder for the exported page.
#[derive(Debug, Clone, Default)]
pub struct HtmlExporter {
    prediction: Option<(DiamondAttributes, PredictionResult)>,
    error: Option<String>,
    insights: Option<(InsightsData, DataSource)>,
}

impl HtmlExporter {
    /// Page with the placeholder result and no insights.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a predicted price for `attributes`.
    #[must_use]
    pub fn prediction(mut self, attributes: DiamondAttributes, result: PredictionResult) -> Self {
        self.prediction = Some((attributes, result));
        self
    }

    /// Show an error banner in the result card.
    #[must_use]
    pub fn error(mut self, message: &str) -> Self {
        self.error = Some(message.to_string());
        self
    }

    /// Include the insights section.
    #[must_use]
    pub fn insights(mut self, data: InsightsData, source: DataSource) -> Self {
        self.insights = Some((data, source));
        self
    }

    /// Render the document.
    #[must_use]
    pub fn render(&self) -> String {
        let mut html = String::with_capacity(64 * 1024);

        let _ = writeln!(html, "<!DOCTYPE html>");
        let _ = writeln!(html, r#"<html lang="en">"#);
        let _ = writeln!(html, "<head>");
        let _ = writeln!(html, r#"<meta charset="utf-8">"#);
        let _ = writeln!(html, "<title>{PAGE_TITLE}</title>");
        let _ = writeln!(html, "<style>{}</style>", stylesheet());
        let _ = writeln!(html, "</head>");
        let _ = writeln!(html, "<body>");
        let _ = writeln!(html, "<h1>{PAGE_TITLE}</h1>");

        self.write_result(&mut html);
        if let Some((data, source)) = &self.insights {
            write_insights(&mut html, data, *source);
        }

        let _ = writeln!(html, "<footer><p>&copy; {FOOTER_TEXT}</p></footer>");
        let _ = writeln!(html, "</body>");
        let _ = writeln!(html, "</html>");
        html
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.render())?;
        Ok(())
    }

    fn write_result(&self, html: &mut String) {
        let _ = writeln!(html, r#"<section class="result">"#);
        let _ = writeln!(html, "<h2>Prediction Result</h2>");
        match &self.prediction {
            Some((attrs, result)) => {
                let size = PriceSize::for_price(result.predicted_price);
                let _ = writeln!(html, "<p>{RESULT_CAPTION}</p>");
                let _ = writeln!(
                    html,
                    r#"<p class="price" style="font-size:{}px">{}</p>"#,
                    size.font_px(),
                    escape_xml(&format_price(result.predicted_price))
                );
                let _ = writeln!(
                    html,
                    r#"<p class="attributes">{} ct &middot; {} &middot; {} &middot; {}</p>"#,
                    format_number(attrs.carat),
                    escape_xml(attrs.cut.to_string().as_str()),
                    attrs.color,
                    attrs.clarity
                );
            }
            None => {
                let _ = writeln!(html, r#"<p class="placeholder">{PLACEHOLDER_TEXT}</p>"#);
            }
        }
        if let Some(error) = &self.error {
            let _ = writeln!(html, r#"<p class="error" role="alert">{}</p>"#, escape_xml(error));
        }
        let _ = writeln!(html, "</section>");
    }
}

fn write_blurbs(html: &mut String, class: &str, blurbs: &[Blurb]) {
    let _ = writeln!(html, r#"<div class="{class}">"#);
    for blurb in blurbs {
        let _ = writeln!(
            html,
            "<div><h4>{}</h4><p>{}</p></div>",
            escape_xml(blurb.title),
            escape_xml(blurb.body)
        );
    }
    let _ = writeln!(html, "</div>");
}

fn write_insights(html: &mut String, data: &InsightsData, source: DataSource) {
    let _ = writeln!(html, r#"<section class="insights">"#);
    let _ = writeln!(html, "<h2>{PANEL_TITLE}</h2>");
    let _ = writeln!(html, "<p>{PANEL_SUBTITLE}</p>");
    if source == DataSource::Fallback {
        let _ = writeln!(html, "<!-- sample data -->");
    }

    let _ = writeln!(html, "<h3>Key Insights</h3>");
    write_blurbs(html, "cards", &KEY_INSIGHTS);

    let _ = writeln!(html, r#"<div class="charts">"#);
    for (text, svg) in InsightCharts::new(data).render_svg() {
        let _ = writeln!(html, r#"<div class="chart">"#);
        let _ = writeln!(html, "<h3>{}</h3>", escape_xml(text.title));
        let _ = writeln!(html, "<p>{}</p>", escape_xml(text.subtitle));
        html.push_str(&svg);
        let _ = writeln!(html, "</div>");
    }
    let _ = writeln!(html, "</div>");

    let _ = writeln!(html, "<h3>{FOUR_CS_TITLE}</h3>");
    write_blurbs(html, "four-cs", &FOUR_CS);
    let _ = writeln!(html, "</section>");
}

fn stylesheet() -> String {
    let theme = THEME_COLOR.to_hex();
    let accent = DEFAULT_COLOR.to_hex();
    format!(
        "body{{font-family:sans-serif;margin:0 auto;max-width:1360px;padding:24px;color:{theme}}}\
         h1,h2,h3,h4{{color:{theme}}}\
         .result{{border:4px solid {accent};border-radius:16px;padding:32px;text-align:center}}\
         .price{{font-weight:800;margin:8px 0}}\
         .error{{color:#b91c1c}}\
         .cards,.four-cs,.charts{{display:grid;grid-template-columns:repeat(2,1fr);gap:16px}}\
         .chart svg{{max-width:100%;height:auto}}\
         footer{{margin-top:32px;text-align:center;color:#6b7280}}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grade::{Clarity, ColorGrade, Cut};
    use crate::insights::fallback_insights;

    fn attrs() -> DiamondAttributes {
        DiamondAttributes {
            carat: 1.5,
            cut: Cut::Ideal,
            color: ColorGrade::E,
            clarity: Clarity::Vs1,
        }
    }

    #[test]
    fn test_placeholder_page() {
        let html = HtmlExporter::new().render();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Diamond Price Predictor</title>"));
        assert!(html.contains(PLACEHOLDER_TEXT));
        assert!(!html.contains("<svg"));
    }

    #[test]
    fn test_prediction_card() {
        let html = HtmlExporter::new()
            .prediction(attrs(), PredictionResult { predicted_price: 8500.0 })
            .render();
        assert!(html.contains(">$8,500</p>"));
        assert!(html.contains("font-size:72px"));
        assert!(html.contains("1.5 ct &middot; Ideal &middot; E &middot; VS1"));
        assert!(!html.contains(PLACEHOLDER_TEXT));
    }

    #[test]
    fn test_error_banner_is_escaped() {
        let html = HtmlExporter::new().error("<b>down</b>").render();
        assert!(html.contains("&lt;b&gt;down&lt;/b&gt;"));
    }

    #[test]
    fn test_insights_section_has_four_charts() {
        let html = HtmlExporter::new()
            .insights(fallback_insights(42), DataSource::Fallback)
            .render();
        assert_eq!(html.matches("<svg").count(), 4);
        assert!(html.contains("Key Insights"));
        assert!(html.contains("Carat Weight Impact"));
        assert!(html.contains(FOUR_CS_TITLE));
        assert!(html.contains("Average Price by Clarity Grade"));
        assert_eq!(html.matches("<circle").count(), 100);
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        HtmlExporter::new().write_to_file(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("</html>"));
    }
}
