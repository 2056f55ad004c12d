//! Fixture PDFs for the CLI tests.

#![allow(dead_code)]

use std::io::Write;

use assert_cmd::Command;
use encoding_rs::SHIFT_JIS;
use lopdf::{Document, Object, ObjectId, Stream, dictionary};

pub fn cmd() -> Command {
    Command::cargo_bin("pdfmend").unwrap()
}

/// A Type0 font with its names stored as raw Shift-JIS bytes.
fn sjis_type0_font(doc: &mut Document, face: &str) -> ObjectId {
    let (raw, _, _) = SHIFT_JIS.encode(face);
    let raw = raw.into_owned();
    let descriptor = doc.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => Object::Name(raw.clone()),
    });
    let descendant = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType2",
        "BaseFont" => Object::Name(raw.clone()),
        "FontDescriptor" => descriptor,
    });
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => Object::Name(raw),
        "Encoding" => "Identity-H",
        "DescendantFonts" => vec![Object::Reference(descendant)],
    })
}

fn build(mut doc: Document, fonts: Vec<ObjectId>, page_count: usize) -> Vec<u8> {
    let mut font_dict = lopdf::Dictionary::new();
    for (i, id) in fonts.iter().enumerate() {
        font_dict.set(format!("F{}", i + 1), Object::Reference(*id));
    }
    let pages_id = doc.new_object_id();
    let mut kids = Vec::new();
    for _ in 0..page_count {
        let content = doc.add_object(Stream::new(
            dictionary! {},
            b"BT /F1 12 Tf 72 720 Td (Hello) Tj ET".to_vec(),
        ));
        let page = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content,
            "Resources" => dictionary! { "Font" => font_dict.clone() },
        });
        kids.push(Object::Reference(page));
    }
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
        }),
    );
    let catalog = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog);
    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// Helvetica only, on `page_count` pages.
pub fn plain_pdf(page_count: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let helv = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    build(doc, vec![helv], page_count)
}

/// Helvetica plus corrupted MS Gothic and MS PMincho Type0 fonts.
pub fn japanese_pdf() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let helv = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let gothic = sjis_type0_font(&mut doc, "ＭＳ ゴシック");
    let pmincho = sjis_type0_font(&mut doc, "ＭＳＰ明朝");
    build(doc, vec![helv, gothic, pmincho], 1)
}

pub fn write_temp(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

/// Number of content streams on each page of a saved PDF.
pub fn content_stream_counts(path: &std::path::Path) -> Vec<usize> {
    let doc = Document::load(path).unwrap();
    doc.get_pages()
        .values()
        .map(|id| doc.get_page_contents(*id).len())
        .collect()
}

/// `/BaseFont` names of the Type0 fonts in a saved PDF.
pub fn type0_names(path: &std::path::Path) -> Vec<Vec<u8>> {
    let doc = Document::load(path).unwrap();
    let mut names: Vec<Vec<u8>> = doc
        .objects
        .values()
        .filter_map(|obj| obj.as_dict().ok())
        .filter(|dict| {
            dict.get(b"Subtype").and_then(Object::as_name).ok() == Some(b"Type0".as_slice())
        })
        .filter_map(|dict| dict.get(b"BaseFont").and_then(Object::as_name).ok())
        .map(<[u8]>::to_vec)
        .collect();
    names.sort();
    names
}
