//! pdfmend-parse: lopdf backend for pdfmend.
//!
//! This crate binds the algorithms of pdfmend-core to real PDF files:
//!
//! - [`LopdfDocument`] implements [`FontCatalog`](pdfmend_core::FontCatalog)
//!   and renames Type0 fonts in place.
//! - [`LopdfCanvas`] implements [`PageCanvas`](pdfmend_core::PageCanvas) by
//!   adding content streams to a page.
//! - [`LopdfFont`] implements [`PlacementFont`](pdfmend_core::PlacementFont)
//!   from `/Widths`, `/W`, standard AFM metrics and the font's CMap.

pub mod canvas;
pub mod error;
pub mod font;
pub mod font_metrics;
pub mod lopdf_backend;
pub mod standard_fonts;
pub mod text_encoding;
pub mod tokenizer;

pub use canvas::{LopdfCanvas, encode_fragment};
pub use error::BackendError;
pub use font::LopdfFont;
pub use font_metrics::{FontMetrics, GlyphWidths};
pub use lopdf_backend::{LopdfDocument, decode_pdf_name};
pub use pdfmend_core;
pub use standard_fonts::{StandardFont, StandardFontMetrics, UnknownStandardFont};
pub use text_encoding::TextEncoding;
