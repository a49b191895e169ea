//! Output encoders (SVG charts, HTML page export).

mod html;
mod svg;

pub use html::{HtmlExporter, FOOTER_TEXT, PAGE_TITLE};
pub use svg::{escape_xml, SvgElement, SvgEncoder, TextAnchor};
