//! lopdf-based document backend.
//!
//! [`LopdfDocument`] wraps a [`lopdf::Document`] and implements
//! [`FontCatalog`] for font-name normalization. Pages are written through
//! [`LopdfCanvas`](crate::canvas::LopdfCanvas), and fonts for text placement
//! are resolved into [`LopdfFont`].

use std::collections::HashMap;
use std::io::Write;

use encoding_rs::WINDOWS_1252;
use lopdf::{Dictionary, Object, ObjectId, dictionary};
use pdfmend_core::{FontCatalog, FontEntry, FontKind, PageSize, PdfError};

use crate::canvas::LopdfCanvas;
use crate::error::BackendError;
use crate::font::LopdfFont;
use crate::standard_fonts::StandardFont;

/// Prefix for font resources added by [`LopdfDocument::standard_font`].
const FONT_RESOURCE_PREFIX: &str = "PMF";

/// A parsed PDF document backed by lopdf.
pub struct LopdfDocument {
    /// The underlying lopdf document.
    inner: lopdf::Document,
    /// Cached ordered list of page ObjectIds (indexed by 0-based page number).
    page_ids: Vec<ObjectId>,
    /// Font objects created for standard faces, shared by all pages.
    standard_fonts: HashMap<StandardFont, ObjectId>,
}

impl std::fmt::Debug for LopdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LopdfDocument")
            .field("page_count", &self.page_ids.len())
            .finish_non_exhaustive()
    }
}

impl LopdfDocument {
    /// Parse a document from bytes.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Parse`] for malformed input and
    /// [`PdfError::PasswordRequired`] for encrypted documents.
    pub fn open(bytes: &[u8]) -> Result<Self, BackendError> {
        let inner = lopdf::Document::load_mem(bytes)
            .map_err(|e| BackendError::Parse(format!("failed to parse PDF: {e}")))?;

        if inner.is_encrypted() {
            return Err(BackendError::Core(PdfError::PasswordRequired));
        }
        Ok(Self::from_document(inner))
    }

    /// Parse and decrypt a document. The password is ignored for
    /// unencrypted documents.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::InvalidPassword`] if decryption is refused.
    pub fn open_with_password(bytes: &[u8], password: &[u8]) -> Result<Self, BackendError> {
        let mut inner = lopdf::Document::load_mem(bytes)
            .map_err(|e| BackendError::Parse(format!("failed to parse PDF: {e}")))?;

        if inner.is_encrypted() {
            inner.decrypt_raw(password).map_err(|e| {
                let msg = e.to_string();
                if msg.contains("incorrect") || msg.contains("password") {
                    BackendError::Core(PdfError::InvalidPassword)
                } else {
                    BackendError::Parse(format!("decryption failed: {e}"))
                }
            })?;
        }
        Ok(Self::from_document(inner))
    }

    /// Wrap an already loaded lopdf document.
    pub fn from_document(inner: lopdf::Document) -> Self {
        // get_pages returns BTreeMap<u32, ObjectId> keyed by 1-based page number
        let page_ids = inner.get_pages().values().copied().collect();
        Self {
            inner,
            page_ids,
            standard_fonts: HashMap::new(),
        }
    }

    /// Access the underlying lopdf document.
    pub fn inner(&self) -> &lopdf::Document {
        &self.inner
    }

    /// Give back the underlying lopdf document.
    pub fn into_inner(self) -> lopdf::Document {
        self.inner
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Object id of the page at `index` (0-based).
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Parse`] if the index is out of range.
    pub fn page_id(&self, index: usize) -> Result<ObjectId, BackendError> {
        self.page_ids.get(index).copied().ok_or_else(|| {
            BackendError::Parse(format!(
                "page index {index} out of range (0..{})",
                self.page_ids.len()
            ))
        })
    }

    /// Extent of the page's MediaBox, which may be inherited.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Parse`] if no valid MediaBox is found.
    pub fn page_size(&self, index: usize) -> Result<PageSize, BackendError> {
        page_size(&self.inner, self.page_id(index)?)
    }

    /// Decoded content of the page, streams joined by a space.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Content`] if a content stream is missing or
    /// cannot be decompressed.
    pub fn page_content(&self, index: usize) -> Result<Vec<u8>, BackendError> {
        let page_id = self.page_id(index)?;
        get_page_content_bytes(&self.inner, dict(&self.inner, page_id)?)
    }

    /// A writable view of the page at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the page or its MediaBox cannot be resolved.
    pub fn canvas(&mut self, index: usize) -> Result<LopdfCanvas<'_>, BackendError> {
        let page_id = self.page_id(index)?;
        let size = page_size(&self.inner, page_id)?;
        Ok(LopdfCanvas::new(&mut self.inner, page_id, size))
    }

    /// A font already listed in the page's resources under `resource_name`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Font`] if no such resource exists.
    pub fn page_font(&self, index: usize, resource_name: &str) -> Result<LopdfFont, BackendError> {
        let page_id = self.page_id(index)?;
        let fonts = page_font_dict(&self.inner, page_id)?
            .ok_or_else(|| BackendError::Font(format!("page {index} has no font resources")))?;
        let font = fonts
            .get(resource_name.as_bytes())
            .map(|obj| resolve_object(&self.inner, obj))
            .and_then(Object::as_dict)
            .map_err(|_| {
                BackendError::Font(format!("page {index} has no font resource '{resource_name}'"))
            })?;
        LopdfFont::from_dict(&self.inner, resource_name, font)
    }

    /// Register a standard Type1 face on the page and return it.
    ///
    /// The font object is created once per document. A page that already
    /// references it reuses its resource name; otherwise a fresh `PMFn` name
    /// is added to the page's own resources. Inherited resources are copied
    /// onto the page first so that sibling pages are unaffected.
    ///
    /// # Errors
    ///
    /// Returns an error if the page's resources cannot be resolved.
    pub fn standard_font(
        &mut self,
        index: usize,
        font: StandardFont,
    ) -> Result<LopdfFont, BackendError> {
        let page_id = self.page_id(index)?;
        let font_id = match self.standard_fonts.get(&font) {
            Some(id) => *id,
            None => {
                let id = self.inner.add_object(dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => font.postscript_name(),
                    "Encoding" => "WinAnsiEncoding",
                });
                self.standard_fonts.insert(font, id);
                id
            }
        };
        let resource_name = register_font_resource(&mut self.inner, page_id, font_id)?;
        tracing::debug!(page = index, font = %font, resource = %resource_name, "registered standard font");

        let font_dict = dict(&self.inner, font_id)?;
        LopdfFont::from_dict(&self.inner, &resource_name, font_dict)
    }

    /// Serialize the document.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Io`] if writing fails.
    pub fn save_to<W: Write>(&mut self, target: &mut W) -> Result<(), BackendError> {
        self.inner
            .save_to(target)
            .map_err(|e| BackendError::Io(std::io::Error::other(e.to_string())))
    }

    /// Serialize the document into a byte vector.
    ///
    /// # Errors
    ///
    /// Same as [`save_to`](Self::save_to).
    pub fn to_bytes(&mut self) -> Result<Vec<u8>, BackendError> {
        let mut buf = Vec::new();
        self.save_to(&mut buf)?;
        Ok(buf)
    }
}

impl FontCatalog for LopdfDocument {
    type FontId = ObjectId;
    type Error = BackendError;

    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn page_fonts(&self, page_index: usize) -> Result<Vec<FontEntry<ObjectId>>, BackendError> {
        let page_id = self.page_id(page_index)?;
        let Some(fonts) = page_font_dict(&self.inner, page_id)? else {
            return Ok(Vec::new());
        };

        let mut entries = Vec::new();
        for (key, value) in fonts.iter() {
            let Object::Reference(id) = value else {
                tracing::debug!(
                    page = page_index,
                    resource = %String::from_utf8_lossy(key),
                    "skipping direct font dictionary"
                );
                continue;
            };
            let Ok(font) = dict(&self.inner, *id) else {
                tracing::debug!(page = page_index, object = ?id, "skipping unresolvable font");
                continue;
            };
            entries.push(FontEntry {
                id: *id,
                name: font.get(b"BaseFont").ok().and_then(decode_name_object),
                kind: font_kind(font),
            });
        }
        Ok(entries)
    }

    fn rename_composite_font(&mut self, id: &ObjectId, new_name: &str) -> Result<(), BackendError> {
        rename_composite_font(&mut self.inner, *id, new_name)
    }
}

/// Simple or composite, by `/Subtype`.
pub(crate) fn font_kind(font: &Dictionary) -> FontKind {
    match font.get(b"Subtype").and_then(Object::as_name) {
        Ok(b"Type0") => FontKind::Composite,
        _ => FontKind::Simple,
    }
}

/// Decode a name or string the way a Latin-1 oriented reader would: UTF-8
/// when the bytes are valid UTF-8, otherwise Windows-1252.
///
/// Raw Shift-JIS bytes are almost never valid UTF-8, so they come out as the
/// Windows-1252 mojibake the repair table expects.
pub fn decode_pdf_name(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => WINDOWS_1252.decode_without_bom_handling(bytes).0.into_owned(),
    }
}

fn decode_name_object(obj: &Object) -> Option<String> {
    match obj {
        Object::Name(bytes) | Object::String(bytes, _) => Some(decode_pdf_name(bytes)),
        _ => None,
    }
}

fn name_object(name: &str) -> Object {
    Object::Name(name.as_bytes().to_vec())
}

/// Write `new_name` into the four name fields of a Type0 font.
fn rename_composite_font(
    doc: &mut lopdf::Document,
    font_id: ObjectId,
    new_name: &str,
) -> Result<(), BackendError> {
    let font = dict_mut(doc, font_id)?;
    font.set("BaseFont", name_object(new_name));
    if font.has(b"Name") {
        font.set("Name", name_object(new_name));
    }

    let descriptor_id = {
        let descendant = descendant_font_mut(doc, font_id)?;
        descendant.set("BaseFont", name_object(new_name));
        match descendant.get_mut(b"FontDescriptor") {
            Ok(Object::Reference(id)) => Some(*id),
            Ok(Object::Dictionary(descriptor)) => {
                descriptor.set("FontName", name_object(new_name));
                None
            }
            _ => {
                return Err(BackendError::Font(format!(
                    "descendant of font {font_id:?} has no /FontDescriptor"
                )));
            }
        }
    };
    if let Some(id) = descriptor_id {
        dict_mut(doc, id)?.set("FontName", name_object(new_name));
    }
    Ok(())
}

/// Where the first `/DescendantFonts` entry lives.
enum DescendantSlot {
    /// An indirect CIDFont object.
    Object(ObjectId),
    /// A direct dictionary inside the Type0 font's own array.
    InFont,
    /// A direct dictionary inside an indirect array object.
    InArray(ObjectId),
}

fn descendant_font_mut(
    doc: &mut lopdf::Document,
    font_id: ObjectId,
) -> Result<&mut Dictionary, BackendError> {
    let missing = || BackendError::Font(format!("font {font_id:?} has no descendant font"));

    let slot = {
        let font = dict(doc, font_id)?;
        let (array, array_id) = match font.get(b"DescendantFonts").map_err(|_| missing())? {
            Object::Reference(id) => (doc.get_object(*id).and_then(Object::as_array), Some(*id)),
            other => (other.as_array(), None),
        };
        match array.map_err(|_| missing())?.first() {
            Some(Object::Reference(id)) => DescendantSlot::Object(*id),
            Some(Object::Dictionary(_)) => match array_id {
                Some(id) => DescendantSlot::InArray(id),
                None => DescendantSlot::InFont,
            },
            _ => return Err(missing()),
        }
    };

    match slot {
        DescendantSlot::Object(id) => dict_mut(doc, id),
        DescendantSlot::InFont => dict_mut(doc, font_id)?
            .get_mut(b"DescendantFonts")
            .and_then(Object::as_array_mut)
            .ok()
            .and_then(|array| array.first_mut())
            .and_then(|first| first.as_dict_mut().ok())
            .ok_or_else(missing),
        DescendantSlot::InArray(id) => doc
            .get_object_mut(id)
            .and_then(Object::as_array_mut)
            .ok()
            .and_then(|array| array.first_mut())
            .and_then(|first| first.as_dict_mut().ok())
            .ok_or_else(missing),
    }
}

/// Where a page's resource dictionary is written back to.
enum ResourcesSlot {
    /// A shared indirect object.
    Object(ObjectId),
    /// The page's own `/Resources` entry.
    Page,
}

/// Make `font_id` available to the page and return its resource name.
fn register_font_resource(
    doc: &mut lopdf::Document,
    page_id: ObjectId,
    font_id: ObjectId,
) -> Result<String, BackendError> {
    let (slot, mut resources) = match dict(doc, page_id)?.get(b"Resources") {
        Ok(Object::Reference(id)) => (ResourcesSlot::Object(*id), dict(doc, *id)?.clone()),
        Ok(obj) => (
            ResourcesSlot::Page,
            obj.as_dict()
                .map_err(|_| BackendError::Parse("/Resources is not a dictionary".to_string()))?
                .clone(),
        ),
        Err(_) => {
            let inherited = match resolve_inherited(doc, page_id, b"Resources")? {
                Some(obj) => resolve_object(doc, obj).as_dict().cloned().unwrap_or_default(),
                None => Dictionary::new(),
            };
            (ResourcesSlot::Page, inherited)
        }
    };

    let (font_dict_id, mut fonts) = match resources.get(b"Font") {
        Ok(Object::Reference(id)) => (Some(*id), dict(doc, *id)?.clone()),
        Ok(Object::Dictionary(fonts)) => (None, fonts.clone()),
        _ => (None, Dictionary::new()),
    };

    if let Some((key, _)) = fonts
        .iter()
        .find(|(_, value)| matches!(value, Object::Reference(id) if *id == font_id))
    {
        return Ok(String::from_utf8_lossy(key).into_owned());
    }

    let resource_name = (1..)
        .map(|n| format!("{FONT_RESOURCE_PREFIX}{n}"))
        .find(|name| !fonts.has(name.as_bytes()))
        .unwrap_or_else(|| FONT_RESOURCE_PREFIX.to_string());
    fonts.set(resource_name.as_str(), Object::Reference(font_id));

    match font_dict_id {
        Some(id) => {
            doc.objects.insert(id, Object::Dictionary(fonts));
        }
        None => resources.set("Font", Object::Dictionary(fonts)),
    }
    match slot {
        ResourcesSlot::Object(id) => {
            doc.objects.insert(id, Object::Dictionary(resources));
        }
        ResourcesSlot::Page => dict_mut(doc, page_id)?.set("Resources", resources),
    }
    Ok(resource_name)
}

/// The page's `/Font` resource dictionary, if it has one.
fn page_font_dict(
    doc: &lopdf::Document,
    page_id: ObjectId,
) -> Result<Option<&Dictionary>, BackendError> {
    let Some(resources) = resolve_inherited(doc, page_id, b"Resources")? else {
        return Ok(None);
    };
    let resources = resolve_object(doc, resources)
        .as_dict()
        .map_err(|_| BackendError::Parse("/Resources is not a dictionary".to_string()))?;
    match resources.get(b"Font") {
        Ok(obj) => resolve_object(doc, obj)
            .as_dict()
            .map(Some)
            .map_err(|_| BackendError::Parse("/Font resource is not a dictionary".to_string())),
        Err(_) => Ok(None),
    }
}

fn page_size(doc: &lopdf::Document, page_id: ObjectId) -> Result<PageSize, BackendError> {
    let obj = resolve_inherited(doc, page_id, b"MediaBox")?
        .ok_or_else(|| BackendError::Parse("MediaBox not found on page or ancestors".into()))?;
    let array = resolve_object(doc, obj)
        .as_array()
        .map_err(|e| BackendError::Parse(format!("MediaBox is not an array: {e}")))?;
    if array.len() != 4 {
        return Err(BackendError::Parse(format!(
            "expected 4-element array for MediaBox, got {}",
            array.len()
        )));
    }
    let mut corners = [0.0; 4];
    for (corner, obj) in corners.iter_mut().zip(array) {
        *corner = object_to_f64(resolve_object(doc, obj))?;
    }
    Ok(PageSize::from_box(corners[0], corners[1], corners[2], corners[3]))
}

/// Convert a lopdf numeric object (Integer or Real) to f64.
pub(crate) fn object_to_f64(obj: &Object) -> Result<f64, BackendError> {
    match obj {
        Object::Integer(i) => Ok(*i as f64),
        Object::Real(f) => Ok(f64::from(*f)),
        _ => Err(BackendError::Parse(format!("expected number, got {obj:?}"))),
    }
}

/// Follow one level of indirection; unresolvable references are returned as is.
pub(crate) fn resolve_object<'a>(doc: &'a lopdf::Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        other => other,
    }
}

fn dict(doc: &lopdf::Document, id: ObjectId) -> Result<&Dictionary, BackendError> {
    doc.get_object(id)
        .and_then(Object::as_dict)
        .map_err(|e| BackendError::Parse(format!("object {id:?} is not a dictionary: {e}")))
}

pub(crate) fn dict_mut(
    doc: &mut lopdf::Document,
    id: ObjectId,
) -> Result<&mut Dictionary, BackendError> {
    doc.get_object_mut(id)
        .and_then(Object::as_dict_mut)
        .map_err(|e| BackendError::Parse(format!("object {id:?} is not a dictionary: {e}")))
}

/// Look up a key in the page dictionary, walking up the page tree
/// (via /Parent) if the key is not found on the page itself.
///
/// Returns `None` if the key is not found anywhere in the tree.
fn resolve_inherited<'a>(
    doc: &'a lopdf::Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<&'a Object>, BackendError> {
    let mut current_id = page_id;
    loop {
        let dict = doc
            .get_object(current_id)
            .and_then(Object::as_dict)
            .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?;

        if let Ok(value) = dict.get(key) {
            return Ok(Some(value));
        }

        match dict.get(b"Parent") {
            Ok(parent_obj) => {
                current_id = parent_obj
                    .as_reference()
                    .map_err(|e| BackendError::Parse(format!("invalid /Parent reference: {e}")))?;
            }
            Err(_) => return Ok(None),
        }
    }
}

/// Get the content stream bytes from a page dictionary.
///
/// Handles both single stream references and arrays of stream references.
pub(crate) fn get_page_content_bytes(
    doc: &lopdf::Document,
    page_dict: &Dictionary,
) -> Result<Vec<u8>, BackendError> {
    let contents_obj = match page_dict.get(b"Contents") {
        Ok(obj) => resolve_object(doc, obj),
        Err(_) => return Ok(Vec::new()),
    };

    let streams: Vec<&Object> = match contents_obj {
        Object::Array(arr) => arr.iter().collect(),
        other => vec![other],
    };

    let mut content = Vec::new();
    for item in streams {
        let stream = resolve_object(doc, item)
            .as_stream()
            .map_err(|e| BackendError::Content(format!("/Contents entry is not a stream: {e}")))?;
        let bytes = decode_content_stream(stream)?;
        if !content.is_empty() {
            content.push(b' ');
        }
        content.extend_from_slice(&bytes);
    }
    Ok(content)
}

/// Decode a content stream, decompressing if needed.
fn decode_content_stream(stream: &lopdf::Stream) -> Result<Vec<u8>, BackendError> {
    if stream.dict.get(b"Filter").is_ok() {
        stream
            .decompressed_content()
            .map_err(|e| BackendError::Content(format!("failed to decompress content stream: {e}")))
    } else {
        Ok(stream.content.clone())
    }
}


#[cfg(test)]
mod tests {
    use super::test_pdf::*;
    use super::*;
    use encoding_rs::SHIFT_JIS;
    use pdfmend_core::{PlacementFont, is_normalizable, normalize, normalize_with_report};

    fn corrupt(name: &str) -> String {
        let (bytes, _, _) = SHIFT_JIS.encode(name);
        WINDOWS_1252.decode_without_bom_handling(&bytes).0.into_owned()
    }

    fn name_of(doc: &lopdf::Document, id: ObjectId, key: &[u8]) -> Vec<u8> {
        dict(doc, id)
            .unwrap()
            .get(key)
            .unwrap()
            .as_name()
            .unwrap()
            .to_vec()
    }

    fn descendant_and_descriptor(doc: &lopdf::Document, font_id: ObjectId) -> (ObjectId, ObjectId) {
        let font = dict(doc, font_id).unwrap();
        let descendant = font.get(b"DescendantFonts").unwrap().as_array().unwrap()[0]
            .as_reference()
            .unwrap();
        let descriptor = dict(doc, descendant)
            .unwrap()
            .get(b"FontDescriptor")
            .unwrap()
            .as_reference()
            .unwrap();
        (descendant, descriptor)
    }

    fn sjis_document() -> (LopdfDocument, ObjectId, ObjectId, ObjectId) {
        let mut doc = lopdf::Document::with_version("1.5");
        let mincho = add_sjis_type0_font(&mut doc, "ＭＳ明朝", true);
        let gothic = add_sjis_type0_font(&mut doc, "ＭＳ ゴシック", false);
        let helvetica = add_helvetica(&mut doc);
        build(
            &mut doc,
            &[
                (vec![mincho, helvetica], Some(b"BT ET".as_slice())),
                (vec![gothic, mincho], None),
            ],
        );
        let doc = LopdfDocument::open(&to_bytes(doc)).unwrap();
        (doc, mincho, gothic, helvetica)
    }

    #[test]
    fn open_counts_pages() {
        let (doc, ..) = sjis_document();
        assert_eq!(doc.page_count(), 2);
        assert_eq!(FontCatalog::page_count(&doc), 2);
    }

    #[test]
    fn open_rejects_garbage() {
        let err = LopdfDocument::open(b"not a pdf").unwrap_err();
        assert!(matches!(err, BackendError::Parse(_)));
    }

    #[test]
    fn page_index_out_of_range() {
        let (doc, ..) = sjis_document();
        let err = doc.page_size(5).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn page_size_from_media_box() {
        let (doc, ..) = sjis_document();
        assert_eq!(doc.page_size(0).unwrap(), PageSize::new(600.0, 800.0));
    }

    #[test]
    fn page_fonts_decode_sjis_names_as_windows_1252() {
        let (doc, mincho, _, helvetica) = sjis_document();
        let fonts = doc.page_fonts(0).unwrap();
        assert_eq!(fonts.len(), 2);
        assert_eq!(fonts[0].id, mincho);
        assert_eq!(fonts[0].kind, FontKind::Composite);
        assert_eq!(fonts[0].name, Some(corrupt("ＭＳ明朝")));
        assert_eq!(fonts[1].id, helvetica);
        assert_eq!(fonts[1].kind, FontKind::Simple);
        assert_eq!(fonts[1].name.as_deref(), Some("Helvetica"));
    }

    #[test]
    fn utf8_names_are_read_as_utf8() {
        let corrupted = corrupt("ＭＳ明朝");
        assert_eq!(decode_pdf_name(corrupted.as_bytes()), corrupted);
        assert_eq!(decode_pdf_name(b"Arial"), "Arial");
    }

    #[test]
    fn normalize_renames_all_four_fields() {
        let (mut doc, mincho, _, _) = sjis_document();
        assert!(is_normalizable(&doc).unwrap());
        assert!(normalize(&mut doc).unwrap());

        let (descendant, descriptor) = descendant_and_descriptor(doc.inner(), mincho);
        assert_eq!(name_of(doc.inner(), mincho, b"BaseFont"), b"MS Mincho");
        assert_eq!(name_of(doc.inner(), mincho, b"Name"), b"MS Mincho");
        assert_eq!(name_of(doc.inner(), descendant, b"BaseFont"), b"MS Mincho");
        assert_eq!(name_of(doc.inner(), descriptor, b"FontName"), b"MS Mincho");
    }

    #[test]
    fn normalize_does_not_add_missing_name_entry() {
        let (mut doc, _, gothic, _) = sjis_document();
        normalize(&mut doc).unwrap();
        let font = dict(doc.inner(), gothic).unwrap();
        assert!(!font.has(b"Name"));
        assert_eq!(name_of(doc.inner(), gothic, b"BaseFont"), b"MS Gothic");
    }

    #[test]
    fn normalize_leaves_simple_fonts_alone() {
        let (mut doc, _, _, helvetica) = sjis_document();
        normalize(&mut doc).unwrap();
        assert_eq!(name_of(doc.inner(), helvetica, b"BaseFont"), b"Helvetica");
    }

    #[test]
    fn normalize_reports_shared_font_once() {
        let (mut doc, mincho, gothic, _) = sjis_document();
        let report = normalize_with_report(&mut doc).unwrap();
        let ids: Vec<ObjectId> = report.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![mincho, gothic]);
    }

    #[test]
    fn normalize_survives_save_and_is_idempotent() {
        let (mut doc, ..) = sjis_document();
        assert!(normalize(&mut doc).unwrap());
        let bytes = doc.to_bytes().unwrap();

        let mut reopened = LopdfDocument::open(&bytes).unwrap();
        assert!(!is_normalizable(&reopened).unwrap());
        assert!(!normalize(&mut reopened).unwrap());
        let names: Vec<Option<String>> = reopened
            .page_fonts(1)
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(
            names,
            vec![Some("MS Gothic".to_string()), Some("MS Mincho".to_string())]
        );
    }

    #[test]
    fn rename_handles_direct_descendant_and_descriptor() {
        let mut raw = lopdf::Document::with_version("1.5");
        let (sjis, _, _) = SHIFT_JIS.encode("ＭＳ Ｐゴシック");
        let font_id = raw.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => Object::Name(sjis.to_vec()),
            "DescendantFonts" => vec![Object::Dictionary(dictionary! {
                "Type" => "Font",
                "Subtype" => "CIDFontType0",
                "BaseFont" => Object::Name(sjis.to_vec()),
                "FontDescriptor" => dictionary! {
                    "Type" => "FontDescriptor",
                    "FontName" => Object::Name(sjis.to_vec()),
                },
            })],
        });
        build(&mut raw, &[(vec![font_id], None)]);
        let mut doc = LopdfDocument::from_document(raw);

        assert!(normalize(&mut doc).unwrap());
        let font = dict(doc.inner(), font_id).unwrap();
        let descendant = font.get(b"DescendantFonts").unwrap().as_array().unwrap()[0]
            .as_dict()
            .unwrap();
        assert_eq!(descendant.get(b"BaseFont").unwrap().as_name().unwrap(), b"MS PGothic");
        let descriptor = descendant.get(b"FontDescriptor").unwrap().as_dict().unwrap();
        assert_eq!(descriptor.get(b"FontName").unwrap().as_name().unwrap(), b"MS PGothic");
    }

    #[test]
    fn rename_without_descendant_is_a_font_error() {
        let mut raw = lopdf::Document::with_version("1.5");
        let (sjis, _, _) = SHIFT_JIS.encode("ＭＳ明朝");
        let font_id = raw.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => Object::Name(sjis.to_vec()),
        });
        build(&mut raw, &[(vec![font_id], None)]);
        let mut doc = LopdfDocument::from_document(raw);

        let err = normalize(&mut doc).unwrap_err();
        assert!(matches!(err, BackendError::Font(_)));
    }

    #[test]
    fn direct_font_dictionaries_are_skipped() {
        let mut raw = lopdf::Document::with_version("1.5");
        let pages = build(&mut raw, &[(vec![], None)]);
        let page = dict_mut(&mut raw, pages[0]).unwrap();
        page.set(
            "Resources",
            dictionary! { "Font" => dictionary! { "F9" => dictionary! { "Subtype" => "Type0" } } },
        );
        let doc = LopdfDocument::from_document(raw);
        assert!(doc.page_fonts(0).unwrap().is_empty());
    }

    #[test]
    fn page_without_resources_has_no_fonts() {
        let mut raw = lopdf::Document::with_version("1.5");
        let pages = build(&mut raw, &[(vec![], None)]);
        dict_mut(&mut raw, pages[0]).unwrap().remove(b"Resources");
        let doc = LopdfDocument::from_document(raw);
        assert!(doc.page_fonts(0).unwrap().is_empty());
    }

    #[test]
    fn standard_font_is_registered_once_per_page() {
        let (mut doc, ..) = sjis_document();
        let first = doc.standard_font(0, StandardFont::Helvetica).unwrap();
        let again = doc.standard_font(0, StandardFont::Helvetica).unwrap();
        assert_eq!(first.resource_name(), "PMF1");
        assert_eq!(again.resource_name(), "PMF1");

        let other_page = doc.standard_font(1, StandardFont::Helvetica).unwrap();
        assert_eq!(other_page.resource_name(), "PMF1");
        assert_eq!(doc.page_fonts(0).unwrap().len(), 3);
        assert_eq!(doc.page_fonts(1).unwrap().len(), 3);
    }

    #[test]
    fn standard_font_copies_inherited_resources() {
        let mut raw = lopdf::Document::with_version("1.5");
        let helvetica = add_helvetica(&mut raw);
        let pages = build(&mut raw, &[(vec![], None), (vec![], None)]);
        let parent = dict(&raw, pages[0]).unwrap().get(b"Parent").unwrap().as_reference().unwrap();
        for page_id in &pages {
            dict_mut(&mut raw, *page_id).unwrap().remove(b"Resources");
        }
        dict_mut(&mut raw, parent).unwrap().set(
            "Resources",
            dictionary! { "Font" => dictionary! { "F1" => helvetica } },
        );
        let mut doc = LopdfDocument::from_document(raw);

        let font = doc.standard_font(0, StandardFont::TimesBold).unwrap();
        assert_eq!(font.resource_name(), "PMF1");
        assert_eq!(doc.page_fonts(0).unwrap().len(), 2);
        assert_eq!(doc.page_fonts(1).unwrap().len(), 1);
    }

    #[test]
    fn page_font_resolves_resource() {
        let (doc, ..) = sjis_document();
        let font = doc.page_font(0, "F2").unwrap();
        assert_eq!(font.base_font(), Some("Helvetica"));
        assert!(doc.page_font(0, "F9").is_err());
    }

    #[test]
    fn page_content_joins_streams() {
        let (doc, ..) = sjis_document();
        assert_eq!(doc.page_content(0).unwrap(), b"BT ET".to_vec());
        assert!(doc.page_content(1).unwrap().is_empty());
    }
}
