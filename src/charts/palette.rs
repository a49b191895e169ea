//! Fixed colors for the insight charts.

use crate::color::Rgba;
use crate::grade::{Clarity, ColorGrade, Cut, Grade};

/// Teal used for scatter points and for any label without a table entry.
pub const DEFAULT_COLOR: Rgba = Rgba::from_u32(0x2a9d8f);
/// Dark slate for axes, ticks and headings.
pub const THEME_COLOR: Rgba = Rgba::from_u32(0x264653);
/// Light grey for the dashed grid.
pub const GRID_COLOR: Rgba = Rgba::from_u32(0xe0e0e0);
/// Secondary text (chart subtitles).
pub const MUTED_COLOR: Rgba = Rgba::from_u32(0x4b5563);

/// A grade with a fixed bar color.
pub trait GradeColor: Grade {
    /// Bar color for this grade.
    fn color(self) -> Rgba;
}

impl GradeColor for Cut {
    fn color(self) -> Rgba {
        match self {
            Self::Fair => Rgba::from_u32(0xe63946),
            Self::Good => Rgba::from_u32(0xf77f00),
            Self::VeryGood => Rgba::from_u32(0xfcbf49),
            Self::Premium => Rgba::from_u32(0x06d6a0),
            Self::Ideal => Rgba::from_u32(0x2a9d8f),
        }
    }
}

impl GradeColor for ColorGrade {
    fn color(self) -> Rgba {
        match self {
            Self::J => Rgba::from_u32(0x8d99ae),
            Self::I => Rgba::from_u32(0x9ba7ba),
            Self::H => Rgba::from_u32(0xa9b5c6),
            Self::G => Rgba::from_u32(0xb7c3d3),
            Self::F => Rgba::from_u32(0xc5d1df),
            Self::E => Rgba::from_u32(0xd3dfec),
            Self::D => Rgba::from_u32(0xe1edf8),
        }
    }
}

impl GradeColor for Clarity {
    fn color(self) -> Rgba {
        match self {
            Self::I1 => Rgba::from_u32(0xe63946),
            Self::Si2 => Rgba::from_u32(0xf77f00),
            Self::Si1 => Rgba::from_u32(0xfcbf49),
            Self::Vs2 => Rgba::from_u32(0x90be6d),
            Self::Vs1 => Rgba::from_u32(0x43aa8b),
            Self::Vvs2 => Rgba::from_u32(0x4d908e),
            Self::Vvs1 => Rgba::from_u32(0x577590),
            Self::If => Rgba::from_u32(0x264653),
        }
    }
}

/// Color for a raw grade label. Unknown labels get [`DEFAULT_COLOR`].
///
/// Bars are colored through this lookup.
#[must_use]
pub fn color_for_label<G: GradeColor>(label: &str) -> Rgba {
    G::from_label(label).map_or(DEFAULT_COLOR, G::color)
}
