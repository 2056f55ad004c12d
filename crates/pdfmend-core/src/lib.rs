//! pdfmend-core: Backend-independent font-name repair and text placement.
//!
//! This crate holds the algorithms of pdfmend and the traits through which
//! they reach a PDF document:
//!
//! - [`font_name`]: Shift-JIS recovery of Windows-1252-decoded font names
//!   and the canonical face table.
//! - [`font_repair`]: [`normalize`] / [`is_normalizable`] over a [`FontCatalog`].
//! - [`anchor`] and [`placement`]: anchored text origins and the content
//!   fragments written through a [`PageCanvas`].
//!
//! Parsing and writing PDF syntax lives in `pdfmend-parse`.

pub mod anchor;
pub mod error;
pub mod font_name;
pub mod font_repair;
pub mod geometry;
pub mod placement;

pub use anchor::{Anchor, AnchorFlag, HorizontalAnchor, ParseAnchorError, VerticalAnchor};
pub use error::PdfError;
pub use font_name::{
    CANONICAL_FONT_NAMES, CANONICAL_NAMES, C1_REMAP, c1_byte, canonical_font_name, repair_name,
    resolve_corrupted_name,
};
pub use font_repair::{
    FontCatalog, FontEntry, FontKind, FontRename, distinct_fonts, is_normalizable, normalize,
    normalize_with_report, planned_renames,
};
pub use geometry::{PageSize, Point};
pub use placement::{
    ContentOp, PageCanvas, PlacementFont, TextPlacement, place_text, text_fragment, text_origin,
};
