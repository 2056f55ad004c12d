//! pdfmend: repair mis-encoded Japanese font names and stamp anchored text
//! onto PDF pages.
//!
//! Documents produced by tools that decoded Shift-JIS font names as
//! Windows-1252 render with substituted fonts. [`Pdf::normalize_fonts`]
//! renames such Type0 fonts back to their ASCII face names (`MS Mincho`,
//! `MS Gothic`, ...). [`Pdf::write_text`] draws one line of text at an
//! anchored position of a page.
//!
//! # Example
//!
//! ```ignore
//! use pdfmend::{Anchor, Pdf, TextFont, TextPlacement};
//!
//! let mut pdf = Pdf::open_file("scan.pdf", None)?;
//! pdf.normalize_fonts()?;
//! let placement = TextPlacement::new(9.0, Anchor::BOTTOM_RIGHT, 20.0, 20.0);
//! pdf.write_text(0, "Approved", &TextFont::default(), &placement)?;
//! pdf.save("out.pdf")?;
//! ```

mod pdf;

#[cfg(feature = "std")]
pub use pdf::{normalize_file, stamp_file};
pub use pdf::{FontId, FontInfo, OpenOptions, Pdf, TextFont};

pub use pdfmend_core::{
    Anchor, AnchorFlag, CANONICAL_FONT_NAMES, ContentOp, FontKind, FontRename, HorizontalAnchor,
    PageSize, ParseAnchorError, PdfError, Point, TextPlacement, VerticalAnchor,
    canonical_font_name, repair_name, resolve_corrupted_name, text_origin,
};
pub use pdfmend_parse::{LopdfDocument, StandardFont, UnknownStandardFont};
