//! Glyph widths and cap height from PDF font dictionaries.
//!
//! Simple fonts read `/Widths`, `/FirstChar` and the descriptor's
//! `/MissingWidth`, falling back to the standard AFM tables for the
//! standard faces. CID fonts read `/W` and `/DW`. Values are in glyph space
//! (1/1000 of text space).

use std::collections::HashMap;

use crate::lopdf_backend::{object_to_f64, resolve_object};
use crate::standard_fonts::{self, StandardFontMetrics};

/// Width used when a simple font gives no usable width at all.
const DEFAULT_WIDTH: f64 = 600.0;

/// `/DW` default for CID fonts.
const DEFAULT_CID_WIDTH: f64 = 1000.0;

/// Cap height used when neither the descriptor nor the AFM data has one.
const DEFAULT_CAP_HEIGHT: f64 = 700.0;

/// Per-code advance widths.
#[derive(Debug, Clone, PartialEq)]
pub enum GlyphWidths {
    /// Single-byte codes: explicit `/Widths` or a standard face's table.
    Simple {
        widths: Vec<f64>,
        first_char: u32,
        missing_width: f64,
    },
    /// CID-keyed widths from `/W`, with `/DW` for everything else.
    Cid {
        widths: HashMap<u32, f64>,
        default_width: f64,
    },
}

/// Metrics needed to place a line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct FontMetrics {
    widths: GlyphWidths,
    cap_height: f64,
}

impl FontMetrics {
    pub fn new(widths: GlyphWidths, cap_height: f64) -> Self {
        Self { widths, cap_height }
    }

    /// Width for a character code (simple) or CID (composite).
    pub fn width(&self, code: u32) -> f64 {
        match &self.widths {
            GlyphWidths::Simple {
                widths,
                first_char,
                missing_width,
            } => code
                .checked_sub(*first_char)
                .and_then(|index| widths.get(index as usize))
                .copied()
                .unwrap_or(*missing_width),
            GlyphWidths::Cid {
                widths,
                default_width,
            } => widths.get(&code).copied().unwrap_or(*default_width),
        }
    }

    /// Width for glyphs that cannot be looked up by code.
    pub fn default_width(&self) -> f64 {
        match &self.widths {
            GlyphWidths::Simple { missing_width, .. } => *missing_width,
            GlyphWidths::Cid { default_width, .. } => *default_width,
        }
    }

    /// Cap height in glyph space.
    pub fn cap_height(&self) -> f64 {
        self.cap_height
    }

    pub fn glyph_widths(&self) -> &GlyphWidths {
        &self.widths
    }
}

/// Metrics of a simple (Type1, TrueType, Type3) font dictionary.
///
/// `base_font` is the decoded `/BaseFont`, used to find standard AFM data
/// when `/Widths` is absent.
pub fn simple_font_metrics(
    doc: &lopdf::Document,
    font_dict: &lopdf::Dictionary,
    base_font: Option<&str>,
) -> FontMetrics {
    let standard = base_font.map(strip_subset_prefix).and_then(standard_fonts::lookup);
    let descriptor = descriptor_dict(doc, font_dict);
    let missing_width = descriptor
        .and_then(|desc| number_entry(doc, desc, b"MissingWidth"))
        .unwrap_or(DEFAULT_WIDTH);

    let explicit: Vec<f64> = font_dict
        .get(b"Widths")
        .ok()
        .map(|obj| resolve_object(doc, obj))
        .and_then(|obj| obj.as_array().ok())
        .map(|arr| {
            arr.iter()
                .map(|o| object_to_f64(resolve_object(doc, o)).unwrap_or(0.0))
                .collect()
        })
        .unwrap_or_default();

    let widths = match (explicit.is_empty(), standard) {
        (true, Some(afm)) => GlyphWidths::Simple {
            widths: afm.widths.iter().map(|w| f64::from(*w)).collect(),
            first_char: 0,
            missing_width,
        },
        _ => GlyphWidths::Simple {
            widths: explicit,
            first_char: number_entry(doc, font_dict, b"FirstChar").map_or(0, |v| v as u32),
            missing_width,
        },
    };

    FontMetrics::new(widths, cap_height(doc, descriptor, standard))
}

/// Metrics of a CIDFont dictionary (the descendant of a Type0 font).
pub fn cid_font_metrics(doc: &lopdf::Document, cid_font_dict: &lopdf::Dictionary) -> FontMetrics {
    let default_width = number_entry(doc, cid_font_dict, b"DW").unwrap_or(DEFAULT_CID_WIDTH);
    let widths = cid_font_dict
        .get(b"W")
        .ok()
        .map(|obj| resolve_object(doc, obj))
        .and_then(|obj| obj.as_array().ok())
        .map(|arr| parse_w_array(arr, doc))
        .unwrap_or_default();

    let descriptor = descriptor_dict(doc, cid_font_dict);
    FontMetrics::new(
        GlyphWidths::Cid {
            widths,
            default_width,
        },
        cap_height(doc, descriptor, None),
    )
}

/// Highest CID a CIDFont can address.
const MAX_CID: u32 = 0xFFFF;

/// Parse a `/W` array: `c [w1 w2 ...]` and `c_first c_last w` groups.
///
/// CIDs above [`MAX_CID`] and reversed ranges are dropped.
pub fn parse_w_array(objects: &[lopdf::Object], doc: &lopdf::Document) -> HashMap<u32, f64> {
    let mut widths = HashMap::new();
    let mut i = 0;

    while i < objects.len() {
        let Some(cid_start) = object_to_u32(resolve_object(doc, &objects[i])) else {
            i += 1;
            continue;
        };
        i += 1;
        let Some(next) = objects.get(i).map(|o| resolve_object(doc, o)) else {
            break;
        };

        if let Ok(arr) = next.as_array() {
            for (offset, obj) in arr.iter().enumerate() {
                let cid = u32::try_from(offset)
                    .ok()
                    .and_then(|offset| cid_start.checked_add(offset))
                    .filter(|cid| *cid <= MAX_CID);
                let Some(cid) = cid else {
                    break;
                };
                if let Ok(w) = object_to_f64(resolve_object(doc, obj)) {
                    widths.insert(cid, w);
                }
            }
            i += 1;
        } else if let Some(cid_end) = object_to_u32(next) {
            i += 1;
            if let Some(Ok(w)) = objects.get(i).map(|o| object_to_f64(resolve_object(doc, o))) {
                if cid_start <= cid_end && cid_start <= MAX_CID {
                    for cid in cid_start..=cid_end.min(MAX_CID) {
                        widths.insert(cid, w);
                    }
                }
            }
            i += 1;
        } else {
            i += 1;
        }
    }

    widths
}

/// `/CapHeight`, then the AFM cap height, then `/Ascent`, then a default.
fn cap_height(
    doc: &lopdf::Document,
    descriptor: Option<&lopdf::Dictionary>,
    standard: Option<&StandardFontMetrics>,
) -> f64 {
    let positive = |v: f64| (v > 0.0).then_some(v);
    descriptor
        .and_then(|desc| number_entry(doc, desc, b"CapHeight"))
        .and_then(positive)
        .or_else(|| standard.map(|afm| afm.cap_height))
        .or_else(|| {
            descriptor
                .and_then(|desc| number_entry(doc, desc, b"Ascent"))
                .and_then(positive)
        })
        .unwrap_or(DEFAULT_CAP_HEIGHT)
}

fn descriptor_dict<'a>(
    doc: &'a lopdf::Document,
    font_dict: &'a lopdf::Dictionary,
) -> Option<&'a lopdf::Dictionary> {
    font_dict
        .get(b"FontDescriptor")
        .ok()
        .map(|obj| resolve_object(doc, obj))
        .and_then(|obj| obj.as_dict().ok())
}

fn number_entry(doc: &lopdf::Document, dict: &lopdf::Dictionary, key: &[u8]) -> Option<f64> {
    dict.get(key)
        .ok()
        .and_then(|obj| object_to_f64(resolve_object(doc, obj)).ok())
}

fn object_to_u32(obj: &lopdf::Object) -> Option<u32> {
    match obj {
        lopdf::Object::Integer(i) => u32::try_from(*i).ok(),
        lopdf::Object::Real(f) if *f >= 0.0 => Some(*f as u32),
        _ => None,
    }
}

/// Drop a six-letter subset tag such as `ABCDEF+`.
pub(crate) fn strip_subset_prefix(name: &str) -> &str {
    match name.split_once('+') {
        Some((tag, rest)) if tag.len() == 6 && tag.bytes().all(|b| b.is_ascii_uppercase()) => rest,
        _ => name,
    }
}
