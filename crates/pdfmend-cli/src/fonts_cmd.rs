use std::path::Path;

use pdfmend::{FontInfo, FontKind};

use crate::cli::FontsFormat;
use crate::shared::{open_pdf, print_json};

pub fn run(file: &Path, format: &FontsFormat, password: Option<&str>) -> Result<(), i32> {
    let pdf = open_pdf(file, password)?;

    let fonts = pdf.fonts().map_err(|e| {
        eprintln!("Error: failed to read fonts: {e}");
        1
    })?;

    match format {
        FontsFormat::Text => {
            println!("id\tpage\tkind\tname\tcanonical");
            for font in &fonts {
                println!("{}", text_row(font));
            }
        }
        FontsFormat::Json => {
            let value = serde_json::to_value(&fonts).map_err(|e| {
                eprintln!("Error: failed to serialize fonts: {e}");
                1
            })?;
            print_json(&value)?;
        }
    }
    Ok(())
}

fn text_row(font: &FontInfo) -> String {
    let (num, generation) = font.id;
    let kind = match font.kind {
        FontKind::Simple => "simple",
        FontKind::Composite => "type0",
    };
    format!(
        "{num} {generation} R\t{}\t{kind}\t{}\t{}",
        font.first_page + 1,
        font.name.as_deref().unwrap_or("-"),
        font.canonical.unwrap_or("-"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_for_unnamed_simple_font() {
        let font = FontInfo {
            id: (7, 0),
            first_page: 2,
            kind: FontKind::Simple,
            name: None,
            repaired: None,
            canonical: None,
        };
        assert_eq!(text_row(&font), "7 0 R\t3\tsimple\t-\t-");
    }

    #[test]
    fn row_for_repairable_font() {
        let font = FontInfo {
            id: (12, 0),
            first_page: 0,
            kind: FontKind::Composite,
            name: Some("‚l‚r–¾’©".to_string()),
            repaired: Some("ＭＳ明朝".to_string()),
            canonical: Some("MS Mincho"),
        };
        assert_eq!(text_row(&font), "12 0 R\t1\ttype0\t‚l‚r–¾’©\tMS Mincho");
    }
}
