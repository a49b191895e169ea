//! Static explanatory text shown around the insight charts.

/// A heading with a short paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blurb {
    /// Heading.
    pub title: &'static str,
    /// Body text.
    pub body: &'static str,
}

/// Panel heading.
pub const PANEL_TITLE: &str = "Diamond Data Insights";
/// Panel subheading.
pub const PANEL_SUBTITLE: &str = "Understanding how different factors influence diamond pricing";

/// The four "Key Insights" cards.
pub const KEY_INSIGHTS: [Blurb; 4] = [
    Blurb {
        title: "Carat Weight Impact",
        body: "Carat weight has an exponential relationship with price. A 2-carat diamond \
               costs significantly more than twice a 1-carat diamond.",
    },
    Blurb {
        title: "Cut Quality Matters",
        body: "Premium and Ideal cuts often command higher prices due to superior brilliance \
               and light performance.",
    },
    Blurb {
        title: "Color Grading",
        body: "Colorless diamonds (D-F grades) are rarer and more valuable than near-colorless \
               or tinted diamonds.",
    },
    Blurb {
        title: "Clarity's Role",
        body: "Higher clarity grades (VVS, IF) indicate fewer inclusions, making diamonds more \
               desirable and expensive.",
    },
];

/// Heading of the 4 Cs section.
pub const FOUR_CS_TITLE: &str = "Understanding the 4 Cs of Diamonds";

/// One paragraph per C.
pub const FOUR_CS: [Blurb; 4] = [
    Blurb {
        title: "Carat",
        body: "Measures the weight of the diamond. 1 carat = 0.2 grams. Larger carats are \
               exponentially rarer.",
    },
    Blurb {
        title: "Cut",
        body: "Refers to how well the diamond is cut. Affects sparkle, brilliance, and overall \
               appearance.",
    },
    Blurb {
        title: "Color",
        body: "Grades from D (colorless) to Z (light yellow). Colorless diamonds are most valuable.",
    },
    Blurb {
        title: "Clarity",
        body: "Measures internal flaws (inclusions) and surface defects (blemishes). Fewer flaws \
               mean higher value.",
    },
];
