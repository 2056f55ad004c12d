//! Top-level PDF document type for repairing and stamping.

use pdfmend_core::{
    FontKind, FontRename, PageSize, PdfError, Point, TextPlacement, distinct_fonts,
    is_normalizable, normalize_with_report, place_text, planned_renames, resolve_corrupted_name,
};
use pdfmend_parse::{BackendError, LopdfDocument, LopdfFont, StandardFont, TextEncoding};

/// Identity of a font object: object number and generation.
pub type FontId = (u32, u16);

/// Options applied when opening a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenOptions {
    /// Password for encrypted documents. Ignored for unencrypted ones.
    pub password: Option<Vec<u8>>,
}

impl OpenOptions {
    pub fn with_password(password: impl Into<Vec<u8>>) -> Self {
        Self {
            password: Some(password.into()),
        }
    }
}

/// The font [`Pdf::write_text`] draws with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextFont {
    /// A standard face, added to the page's resources when needed.
    Standard(StandardFont),
    /// A font already present in the page's `/Font` resources, by resource
    /// name (`F1`).
    Resource(String),
}

impl Default for TextFont {
    fn default() -> Self {
        TextFont::Standard(StandardFont::default())
    }
}

impl From<StandardFont> for TextFont {
    fn from(font: StandardFont) -> Self {
        TextFont::Standard(font)
    }
}

/// One distinct font of the document, as listed by [`Pdf::fonts`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FontInfo {
    /// Object number and generation of the font dictionary.
    pub id: FontId,
    /// 0-based index of the first page that uses the font.
    pub first_page: usize,
    pub kind: FontKind,
    /// Declared `/BaseFont`, decoded.
    pub name: Option<String>,
    /// Shift-JIS reading of a corrupted name. Only set for composite fonts.
    pub repaired: Option<String>,
    /// Canonical face name normalization would rename the font to.
    pub canonical: Option<&'static str>,
}

impl FontInfo {
    /// Whether normalization renames this font.
    pub fn will_rename(&self) -> bool {
        self.canonical.is_some()
    }
}

/// A PDF document opened for font repair and text stamping.
///
/// # Example
///
/// ```ignore
/// let mut pdf = Pdf::open(&bytes, None)?;
/// if pdf.normalize_fonts()? {
///     pdf.save("fixed.pdf")?;
/// }
/// ```
#[derive(Debug)]
pub struct Pdf {
    doc: LopdfDocument,
}

impl Pdf {
    /// Open a PDF document from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError`] if the file cannot be read or is not a valid PDF.
    #[cfg(feature = "std")]
    pub fn open_file(
        path: impl AsRef<std::path::Path>,
        options: Option<OpenOptions>,
    ) -> Result<Self, PdfError> {
        let bytes = std::fs::read(path.as_ref()).map_err(|e| PdfError::IoError(e.to_string()))?;
        Self::open(&bytes, options)
    }

    /// Open a PDF document from bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::PasswordRequired`] if the PDF is encrypted and no
    /// password was given, [`PdfError::InvalidPassword`] if the given password
    /// is wrong, and [`PdfError::ParseError`] for malformed input.
    pub fn open(bytes: &[u8], options: Option<OpenOptions>) -> Result<Self, PdfError> {
        let options = options.unwrap_or_default();
        let doc = match options.password.as_deref() {
            Some(password) => LopdfDocument::open_with_password(bytes, password),
            None => LopdfDocument::open(bytes),
        }
        .map_err(PdfError::from)?;
        tracing::debug!(pages = doc.page_count(), "opened document");
        Ok(Self { doc })
    }

    /// Open an encrypted PDF document from bytes with a password.
    ///
    /// # Errors
    ///
    /// Same as [`Pdf::open`].
    pub fn open_with_password(bytes: &[u8], password: &[u8]) -> Result<Self, PdfError> {
        Self::open(bytes, Some(OpenOptions::with_password(password)))
    }

    /// Wrap an already opened backend document.
    pub fn from_backend(doc: LopdfDocument) -> Self {
        Self { doc }
    }

    /// The lopdf backend document.
    pub fn backend(&self) -> &LopdfDocument {
        &self.doc
    }

    pub fn page_count(&self) -> usize {
        self.doc.page_count()
    }

    /// Extent of the page's MediaBox.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError`] if the page does not exist or has no MediaBox.
    pub fn page_size(&self, page_index: usize) -> Result<PageSize, PdfError> {
        self.doc.page_size(page_index).map_err(PdfError::from)
    }

    /// Distinct fonts in first-use order, with their repair status.
    ///
    /// Simple fonts are never renamed, so their `repaired` and `canonical`
    /// are always `None`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError`] if a page's resources cannot be read.
    pub fn fonts(&self) -> Result<Vec<FontInfo>, PdfError> {
        let mut infos = Vec::new();
        let mut seen = std::collections::HashSet::new();
        for page_index in 0..self.doc.page_count() {
            let entries =
                pdfmend_core::FontCatalog::page_fonts(&self.doc, page_index).map_err(PdfError::from)?;
            for entry in entries {
                if !seen.insert(entry.id) {
                    continue;
                }
                let resolved = match entry.kind {
                    FontKind::Composite => entry.name.as_deref().and_then(resolve_corrupted_name),
                    FontKind::Simple => None,
                };
                let (repaired, canonical) = match resolved {
                    Some((repaired, canonical)) => (Some(repaired), Some(canonical)),
                    None => (None, None),
                };
                infos.push(FontInfo {
                    id: entry.id,
                    first_page: page_index,
                    kind: entry.kind,
                    name: entry.name,
                    repaired,
                    canonical,
                });
            }
        }
        Ok(infos)
    }

    /// Number of distinct fonts in the document.
    ///
    /// # Errors
    ///
    /// Same as [`Pdf::fonts`].
    pub fn font_count(&self) -> Result<usize, PdfError> {
        Ok(distinct_fonts(&self.doc).map_err(PdfError::from)?.len())
    }

    /// Whether [`Pdf::normalize_fonts`] would rename any font.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError`] if a page's resources cannot be read.
    pub fn is_font_normalizable(&self) -> Result<bool, PdfError> {
        is_normalizable(&self.doc).map_err(PdfError::from)
    }

    /// The renames [`Pdf::normalize_fonts`] would apply.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError`] if a page's resources cannot be read.
    pub fn planned_font_renames(&self) -> Result<Vec<FontRename<FontId>>, PdfError> {
        planned_renames(&self.doc).map_err(PdfError::from)
    }

    /// Rename every Type0 font whose name is a corrupted Japanese face.
    ///
    /// Returns `true` if at least one font was renamed.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError`] if the fonts cannot be read or updated. Fonts
    /// renamed before the failure stay renamed.
    pub fn normalize_fonts(&mut self) -> Result<bool, PdfError> {
        Ok(!self.normalize_fonts_with_report()?.is_empty())
    }

    /// Like [`Pdf::normalize_fonts`], returning the renames that were applied.
    ///
    /// # Errors
    ///
    /// Same as [`Pdf::normalize_fonts`].
    pub fn normalize_fonts_with_report(&mut self) -> Result<Vec<FontRename<FontId>>, PdfError> {
        let renames = normalize_with_report(&mut self.doc).map_err(PdfError::from)?;
        tracing::info!(renamed = renames.len(), "normalized font names");
        Ok(renames)
    }

    /// Draw one line of text on a page and return its baseline origin.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::FontError`] if the font is missing or cannot
    /// encode the text, and [`PdfError::ContentError`] or
    /// [`PdfError::ParseError`] if the page content cannot be read or written.
    pub fn write_text(
        &mut self,
        page_index: usize,
        text: &str,
        font: &TextFont,
        placement: &TextPlacement,
    ) -> Result<Point, PdfError> {
        let font = self.resolve_font(page_index, font, text)?;
        let mut canvas = self.doc.canvas(page_index).map_err(PdfError::from)?;
        let origin = place_text::<_, _, BackendError>(&mut canvas, &font, text, placement)
            .map_err(PdfError::from)?;
        tracing::debug!(
            page = page_index,
            x = origin.x,
            y = origin.y,
            "wrote text"
        );
        Ok(origin)
    }

    fn resolve_font(
        &mut self,
        page_index: usize,
        font: &TextFont,
        text: &str,
    ) -> Result<LopdfFont, PdfError> {
        match font {
            TextFont::Standard(face) => {
                // Registering adds a resource to the page, so unencodable
                // text must fail first.
                TextEncoding::WinAnsi.encode(text)?;
                self.doc.standard_font(page_index, *face)
            }
            TextFont::Resource(name) => self.doc.page_font(page_index, name),
        }
        .map_err(PdfError::from)
    }

    /// Serialize the document into a writer.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::IoError`] if writing fails.
    pub fn save_to<W: std::io::Write>(&mut self, target: &mut W) -> Result<(), PdfError> {
        self.doc.save_to(target).map_err(PdfError::from)
    }

    /// Serialize the document into a byte vector.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::IoError`] if serialization fails.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>, PdfError> {
        self.doc.to_bytes().map_err(PdfError::from)
    }

    /// Save the document to a file, replacing it if it exists.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::IoError`] if the file cannot be written.
    #[cfg(feature = "std")]
    pub fn save(&mut self, path: impl AsRef<std::path::Path>) -> Result<(), PdfError> {
        let bytes = self.to_bytes()?;
        std::fs::write(path.as_ref(), bytes).map_err(|e| PdfError::IoError(e.to_string()))
    }
}

/// Normalize the font names of `input` and save the result to `output`.
///
/// The output is written even when nothing was renamed. Returns whether any
/// font was renamed.
///
/// # Errors
///
/// Returns [`PdfError`] if reading, normalizing or writing fails.
#[cfg(feature = "std")]
pub fn normalize_file(
    input: impl AsRef<std::path::Path>,
    output: impl AsRef<std::path::Path>,
) -> Result<bool, PdfError> {
    let mut pdf = Pdf::open_file(input, None)?;
    let renamed = pdf.normalize_fonts()?;
    pdf.save(output)?;
    Ok(renamed)
}

/// Draw `text` on every page of `input` and save the result to `output`.
///
/// Returns the number of pages stamped. Nothing is written if any page
/// fails.
///
/// # Errors
///
/// Returns [`PdfError`] if reading, drawing or writing fails.
#[cfg(feature = "std")]
pub fn stamp_file(
    input: impl AsRef<std::path::Path>,
    output: impl AsRef<std::path::Path>,
    text: &str,
    font: &TextFont,
    placement: &TextPlacement,
) -> Result<usize, PdfError> {
    let mut pdf = Pdf::open_file(input, None)?;
    let page_count = pdf.page_count();
    for page_index in 0..page_count {
        pdf.write_text(page_index, text, font, placement)?;
    }
    pdf.save(output)?;
    Ok(page_count)
}
