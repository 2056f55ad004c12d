//! Fonts resolved from page resources, ready for text placement.

use lopdf::{Dictionary, Object};
use pdfmend_core::{FontKind, PlacementFont};

use crate::error::BackendError;
use crate::font_metrics::{FontMetrics, cid_font_metrics, simple_font_metrics};
use crate::lopdf_backend::{decode_pdf_name, font_kind, resolve_object};
use crate::text_encoding::TextEncoding;

/// A page font with the metrics and encoding needed to draw text with it.
#[derive(Debug, Clone)]
pub struct LopdfFont {
    resource_name: String,
    base_font: Option<String>,
    kind: FontKind,
    metrics: FontMetrics,
    encoding: TextEncoding,
    /// Codes are CIDs (simple fonts and Identity CMaps); otherwise widths
    /// fall back to the default width.
    codes_are_glyph_ids: bool,
}

impl LopdfFont {
    /// Build from a resolved font dictionary registered as `resource_name`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Font`] if a Type0 font has no descendant.
    pub fn from_dict(
        doc: &lopdf::Document,
        resource_name: &str,
        font: &Dictionary,
    ) -> Result<Self, BackendError> {
        let base_font = font.get(b"BaseFont").ok().and_then(|obj| match obj {
            Object::Name(bytes) | Object::String(bytes, _) => Some(decode_pdf_name(bytes)),
            _ => None,
        });
        let kind = font_kind(font);

        let (metrics, encoding, codes_are_glyph_ids) = match kind {
            FontKind::Simple => (
                simple_font_metrics(doc, font, base_font.as_deref()),
                TextEncoding::WinAnsi,
                true,
            ),
            FontKind::Composite => {
                let descendant = descendant_dict(doc, font).ok_or_else(|| {
                    BackendError::Font(format!("font '{resource_name}' has no descendant font"))
                })?;
                let cmap = font
                    .get(b"Encoding")
                    .ok()
                    .map(|obj| resolve_object(doc, obj))
                    .and_then(|obj| obj.as_name().ok())
                    .map(|name| String::from_utf8_lossy(name).into_owned());
                let encoding = match cmap.as_deref().and_then(TextEncoding::for_cmap) {
                    Some(encoding) => encoding,
                    None => {
                        tracing::debug!(
                            resource = resource_name,
                            cmap = ?cmap,
                            "unsupported CMap, encoding text as UTF-16BE"
                        );
                        TextEncoding::Utf16Be
                    }
                };
                let identity = cmap
                    .as_deref()
                    .is_some_and(|name| name.starts_with("Identity-"));
                (cid_font_metrics(doc, descendant), encoding, identity)
            }
        };

        Ok(Self {
            resource_name: resource_name.to_string(),
            base_font,
            kind,
            metrics,
            encoding,
            codes_are_glyph_ids,
        })
    }

    /// Declared `/BaseFont`, decoded.
    pub fn base_font(&self) -> Option<&str> {
        self.base_font.as_deref()
    }

    pub fn kind(&self) -> FontKind {
        self.kind
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    fn char_width(&self, ch: char) -> f64 {
        match self.encoding.char_codes(ch) {
            Some(codes) if self.codes_are_glyph_ids => {
                codes.into_iter().map(|code| self.metrics.width(code)).sum()
            }
            _ => self.metrics.default_width(),
        }
    }
}

impl PlacementFont for LopdfFont {
    type Error = BackendError;

    fn resource_name(&self) -> &str {
        &self.resource_name
    }

    fn string_width(&self, text: &str, font_size: f64) -> f64 {
        let glyph_space: f64 = text.chars().map(|ch| self.char_width(ch)).sum();
        glyph_space / 1000.0 * font_size
    }

    fn cap_height(&self, font_size: f64) -> f64 {
        self.metrics.cap_height() / 1000.0 * font_size
    }

    fn encode_text(&self, text: &str) -> Result<Vec<u8>, BackendError> {
        self.encoding.encode(text)
    }
}

fn descendant_dict<'a>(doc: &'a lopdf::Document, font: &'a Dictionary) -> Option<&'a Dictionary> {
    let array = resolve_object(doc, font.get(b"DescendantFonts").ok()?)
        .as_array()
        .ok()?;
    resolve_object(doc, array.first()?).as_dict().ok()
}
