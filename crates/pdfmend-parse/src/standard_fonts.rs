//! Metrics for the standard Type1 faces pdfmend can register on a page.
//!
//! Widths are in 1/1000 em units, indexed by WinAnsiEncoding code, taken
//! from the Adobe AFM files. They also serve as the width fallback for any
//! simple font whose `/BaseFont` names one of these faces but which carries
//! no `/Widths` array.

use std::fmt;
use std::str::FromStr;

/// AFM metrics of one standard face.
#[derive(Debug)]
pub struct StandardFontMetrics {
    /// PostScript name written as `/BaseFont`.
    pub name: &'static str,
    /// Advance widths indexed by WinAnsi code.
    pub widths: &'static [u16; 256],
    /// `CapHeight` from the AFM header.
    pub cap_height: f64,
}

impl StandardFontMetrics {
    /// Width of the glyph at `code`, in 1/1000 em units.
    pub fn width(&self, code: u8) -> f64 {
        f64::from(self.widths[usize::from(code)])
    }
}

/// A standard face that can be added to a page without embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StandardFont {
    Courier,
    CourierBold,
    #[default]
    Helvetica,
    HelveticaBold,
    TimesRoman,
    TimesBold,
}

impl StandardFont {
    pub const ALL: [StandardFont; 6] = [
        StandardFont::Courier,
        StandardFont::CourierBold,
        StandardFont::Helvetica,
        StandardFont::HelveticaBold,
        StandardFont::TimesRoman,
        StandardFont::TimesBold,
    ];

    /// PostScript name, e.g. `Helvetica-Bold`.
    pub fn postscript_name(self) -> &'static str {
        self.metrics().name
    }

    pub fn metrics(self) -> &'static StandardFontMetrics {
        match self {
            StandardFont::Courier => &COURIER,
            StandardFont::CourierBold => &COURIER_BOLD,
            StandardFont::Helvetica => &HELVETICA,
            StandardFont::HelveticaBold => &HELVETICA_BOLD,
            StandardFont::TimesRoman => &TIMES_ROMAN,
            StandardFont::TimesBold => &TIMES_BOLD,
        }
    }
}

impl fmt::Display for StandardFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.postscript_name())
    }
}

/// Error returned for a face name that is not a supported standard font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStandardFont(pub String);

impl fmt::Display for UnknownStandardFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known: Vec<&str> = StandardFont::ALL
            .iter()
            .map(|font| font.postscript_name())
            .collect();
        write!(
            f,
            "unknown standard font '{}' (expected one of {})",
            self.0,
            known.join(", ")
        )
    }
}

impl std::error::Error for UnknownStandardFont {}

/// Parses PostScript names case-insensitively (`helvetica-bold`).
impl FromStr for StandardFont {
    type Err = UnknownStandardFont;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StandardFont::ALL
            .into_iter()
            .find(|font| font.postscript_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStandardFont(s.to_string()))
    }
}

/// Metrics for a `/BaseFont` name, including the oblique variants that
/// share widths with their upright face.
pub fn lookup(base_font: &str) -> Option<&'static StandardFontMetrics> {
    match base_font {
        "Courier" | "Courier-Oblique" => Some(&COURIER),
        "Courier-Bold" | "Courier-BoldOblique" => Some(&COURIER_BOLD),
        "Helvetica" | "Helvetica-Oblique" => Some(&HELVETICA),
        "Helvetica-Bold" | "Helvetica-BoldOblique" => Some(&HELVETICA_BOLD),
        "Times-Roman" => Some(&TIMES_ROMAN),
        "Times-Bold" => Some(&TIMES_BOLD),
        _ => None,
    }
}

static COURIER_WIDTHS: [u16; 256] = [600; 256];

static COURIER: StandardFontMetrics = StandardFontMetrics {
    name: "Courier",
    widths: &COURIER_WIDTHS,
    cap_height: 562.0,
};

static COURIER_BOLD: StandardFontMetrics = StandardFontMetrics {
    name: "Courier-Bold",
    widths: &COURIER_WIDTHS,
    cap_height: 562.0,
};

static HELVETICA: StandardFontMetrics = StandardFontMetrics {
    name: "Helvetica",
    widths: &HELVETICA_WIDTHS,
    cap_height: 718.0,
};

static HELVETICA_BOLD: StandardFontMetrics = StandardFontMetrics {
    name: "Helvetica-Bold",
    widths: &HELVETICA_BOLD_WIDTHS,
    cap_height: 718.0,
};

static TIMES_ROMAN: StandardFontMetrics = StandardFontMetrics {
    name: "Times-Roman",
    widths: &TIMES_ROMAN_WIDTHS,
    cap_height: 662.0,
};

static TIMES_BOLD: StandardFontMetrics = StandardFontMetrics {
    name: "Times-Bold",
    widths: &TIMES_BOLD_WIDTHS,
    cap_height: 676.0,
};

#[rustfmt::skip]
static HELVETICA_WIDTHS: [u16; 256] = [
    /* 0x00 */ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    /* 0x10 */ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    /* 0x20 */ 278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    /* 0x30 */ 556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    /* 0x40 */ 1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    /* 0x50 */ 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    /* 0x60 */ 333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    /* 0x70 */ 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 0,
    /* 0x80 */ 556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    /* 0x90 */ 0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667,
    /* 0xA0 */ 278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    /* 0xB0 */ 400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    /* 0xC0 */ 667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    /* 0xD0 */ 722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    /* 0xE0 */ 556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    /* 0xF0 */ 556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

#[rustfmt::skip]
static HELVETICA_BOLD_WIDTHS: [u16; 256] = [
    /* 0x00 */ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    /* 0x10 */ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    /* 0x20 */ 278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    /* 0x30 */ 556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    /* 0x40 */ 975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    /* 0x50 */ 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    /* 0x60 */ 333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    /* 0x70 */ 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, 0,
    /* 0x80 */ 556, 0, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    /* 0x90 */ 0, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 0, 500, 667,
    /* 0xA0 */ 278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    /* 0xB0 */ 400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    /* 0xC0 */ 722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    /* 0xD0 */ 722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    /* 0xE0 */ 556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    /* 0xF0 */ 611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];

#[rustfmt::skip]
static TIMES_ROMAN_WIDTHS: [u16; 256] = [
    /* 0x00 */ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    /* 0x10 */ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    /* 0x20 */ 250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    /* 0x30 */ 500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    /* 0x40 */ 921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    /* 0x50 */ 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    /* 0x60 */ 333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    /* 0x70 */ 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541, 0,
    /* 0x80 */ 500, 0, 333, 500, 444, 1000, 500, 500, 333, 1000, 556, 333, 889, 0, 611, 0,
    /* 0x90 */ 0, 333, 333, 444, 444, 350, 500, 1000, 333, 980, 389, 333, 722, 0, 444, 722,
    /* 0xA0 */ 250, 333, 500, 500, 500, 500, 200, 500, 333, 760, 276, 500, 564, 333, 760, 333,
    /* 0xB0 */ 400, 564, 300, 300, 333, 500, 453, 250, 333, 300, 310, 500, 750, 750, 750, 444,
    /* 0xC0 */ 722, 722, 722, 722, 722, 722, 889, 667, 611, 611, 611, 611, 333, 333, 333, 333,
    /* 0xD0 */ 722, 722, 722, 722, 722, 722, 722, 564, 722, 722, 722, 722, 722, 722, 556, 500,
    /* 0xE0 */ 444, 444, 444, 444, 444, 444, 667, 444, 444, 444, 444, 444, 278, 278, 278, 278,
    /* 0xF0 */ 500, 500, 500, 500, 500, 500, 500, 564, 500, 500, 500, 500, 500, 500, 500, 500,
];

#[rustfmt::skip]
static TIMES_BOLD_WIDTHS: [u16; 256] = [
    /* 0x00 */ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    /* 0x10 */ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    /* 0x20 */ 250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    /* 0x30 */ 500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    /* 0x40 */ 930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    /* 0x50 */ 611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    /* 0x60 */ 333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    /* 0x70 */ 556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520, 0,
    /* 0x80 */ 500, 0, 333, 500, 500, 1000, 500, 500, 333, 1000, 556, 333, 1000, 0, 667, 0,
    /* 0x90 */ 0, 333, 333, 500, 500, 350, 500, 1000, 333, 1000, 389, 333, 722, 0, 444, 722,
    /* 0xA0 */ 250, 333, 500, 500, 500, 500, 220, 500, 333, 747, 300, 500, 570, 333, 747, 333,
    /* 0xB0 */ 400, 570, 300, 300, 333, 556, 540, 250, 333, 300, 330, 500, 750, 750, 750, 500,
    /* 0xC0 */ 722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 389, 389, 389, 389,
    /* 0xD0 */ 722, 722, 778, 778, 778, 778, 778, 570, 778, 722, 722, 722, 722, 722, 611, 556,
    /* 0xE0 */ 500, 500, 500, 500, 500, 500, 722, 444, 444, 444, 444, 444, 278, 278, 278, 278,
    /* 0xF0 */ 500, 556, 500, 500, 500, 500, 500, 570, 500, 556, 556, 556, 556, 500, 556, 500,
];
