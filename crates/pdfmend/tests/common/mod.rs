//! PDF fixtures for the integration tests, built with lopdf.

#![allow(dead_code)]

use encoding_rs::{SHIFT_JIS, WINDOWS_1252};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};

/// The Windows-1252 reading of a Shift-JIS encoded name.
pub fn corrupt(name: &str) -> String {
    let (bytes, _, _) = SHIFT_JIS.encode(name);
    WINDOWS_1252.decode_without_bom_handling(&bytes).0.into_owned()
}

/// A Type0 font whose three name fields hold raw Shift-JIS bytes.
pub fn sjis_type0_font(doc: &mut Document, face: &str) -> ObjectId {
    let (raw, _, _) = SHIFT_JIS.encode(face);
    let raw = raw.into_owned();
    let descriptor = doc.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => Object::Name(raw.clone()),
        "CapHeight" => 700,
    });
    let descendant = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType2",
        "BaseFont" => Object::Name(raw.clone()),
        "FontDescriptor" => descriptor,
        "DW" => 1000,
    });
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => Object::Name(raw),
        "Encoding" => "Identity-H",
        "DescendantFonts" => vec![Object::Reference(descendant)],
    })
}

/// A TrueType font whose `/BaseFont` holds raw Shift-JIS bytes.
pub fn sjis_truetype_font(doc: &mut Document, face: &str) -> ObjectId {
    let (raw, _, _) = SHIFT_JIS.encode(face);
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "TrueType",
        "BaseFont" => Object::Name(raw.into_owned()),
    })
}

pub fn helvetica(doc: &mut Document) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    })
}

/// Serialize a document whose pages (612x792) list the given fonts as F1,
/// F2, ... and draw `content`.
pub fn build_pdf(mut doc: Document, pages: &[(Vec<ObjectId>, &[u8])]) -> Vec<u8> {
    let pages_id = doc.new_object_id();
    let mut kids = Vec::new();
    for (fonts, content) in pages {
        let mut font_dict = lopdf::Dictionary::new();
        for (i, id) in fonts.iter().enumerate() {
            font_dict.set(format!("F{}", i + 1), Object::Reference(*id));
        }
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.to_vec()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => dictionary! { "Font" => font_dict },
        });
        kids.push(Object::Reference(page_id));
    }
    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save test PDF");
    buf
}

/// Two pages: a corrupted MS Mincho and Helvetica on the first, the same
/// Mincho and a corrupted MS PGothic on the second.
pub fn japanese_report() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let mincho = sjis_type0_font(&mut doc, "ＭＳ明朝");
    let pgothic = sjis_type0_font(&mut doc, "ＭＳ Ｐゴシック");
    let helv = helvetica(&mut doc);
    build_pdf(
        doc,
        &[
            (vec![mincho, helv], b"BT /F2 12 Tf 72 720 Td (Total) Tj ET"),
            (vec![pgothic, mincho], b"q 1 0 0 1 0 0 cm Q"),
        ],
    )
}

/// One page with Helvetica only.
pub fn plain_pdf() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let helv = helvetica(&mut doc);
    build_pdf(doc, &[(vec![helv], b"BT /F1 12 Tf 72 720 Td (Hello) Tj ET")])
}

/// Operators of every content stream of page `index` (0-based).
pub fn page_operators(bytes: &[u8], index: usize) -> Vec<String> {
    let doc = Document::load_mem(bytes).expect("failed to reload PDF");
    let page_id = *doc
        .get_pages()
        .values()
        .nth(index)
        .expect("page out of range");
    let mut operators = Vec::new();
    for stream_id in doc.get_page_contents(page_id) {
        let stream = doc
            .get_object(stream_id)
            .and_then(Object::as_stream)
            .expect("content is not a stream");
        let content = lopdf::content::Content::decode(&stream.content).expect("invalid content");
        operators.extend(content.operations.into_iter().map(|op| op.operator));
    }
    operators
}

/// Keys of the `/Font` resources of page `index` (0-based).
pub fn font_resource_names(bytes: &[u8], index: usize) -> Vec<String> {
    let doc = Document::load_mem(bytes).expect("failed to reload PDF");
    let page_id = *doc
        .get_pages()
        .values()
        .nth(index)
        .expect("page out of range");
    let page = doc.get_dictionary(page_id).expect("page is not a dictionary");
    let resources = page
        .get(b"Resources")
        .and_then(Object::as_dict)
        .expect("page has no direct resources");
    let fonts = resources
        .get(b"Font")
        .and_then(Object::as_dict)
        .expect("resources have no direct font dictionary");
    fonts
        .iter()
        .map(|(key, _)| String::from_utf8_lossy(key).into_owned())
        .collect()
}

/// `/BaseFont` of every font object in the document.
pub fn base_fonts(bytes: &[u8]) -> Vec<Vec<u8>> {
    let doc = Document::load_mem(bytes).expect("failed to reload PDF");
    let mut names: Vec<Vec<u8>> = doc
        .objects
        .values()
        .filter_map(|obj| obj.as_dict().ok())
        .filter(|dict| dict.get(b"Type").and_then(Object::as_name).ok() == Some(b"Font".as_slice()))
        .filter_map(|dict| dict.get(b"BaseFont").and_then(Object::as_name).ok())
        .map(<[u8]>::to_vec)
        .collect();
    names.sort();
    names
}
