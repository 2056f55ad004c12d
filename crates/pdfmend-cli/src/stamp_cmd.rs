use std::path::Path;

use pdfmend::{Anchor, StandardFont, TextFont, TextPlacement};

use crate::shared::{open_pdf, resolve_pages, save_pdf};

/// Text and placement for the stamp subcommand.
pub struct StampArgs<'a> {
    pub text: &'a str,
    pub font: StandardFont,
    pub size: f64,
    pub anchor: Anchor,
    pub offset_x: f64,
    pub offset_y: f64,
    pub isolate: bool,
}

impl StampArgs<'_> {
    fn placement(&self) -> TextPlacement {
        TextPlacement::new(self.size, self.anchor, self.offset_x, self.offset_y)
            .with_isolation(self.isolate)
    }
}

pub fn run(
    input: &Path,
    output: &Path,
    args: &StampArgs<'_>,
    pages: Option<&str>,
    password: Option<&str>,
) -> Result<(), i32> {
    if !(args.size.is_finite() && args.size > 0.0) {
        eprintln!("Error: font size must be a positive number");
        return Err(1);
    }

    let mut pdf = open_pdf(input, password)?;
    let page_indices = resolve_pages(pages, pdf.page_count())?;
    let font = TextFont::Standard(args.font);
    let placement = args.placement();

    for &index in &page_indices {
        let origin = pdf
            .write_text(index, args.text, &font, &placement)
            .map_err(|e| {
                eprintln!("Error: page {}: {e}", index + 1);
                1
            })?;
        tracing::debug!(page = index + 1, x = origin.x, y = origin.y, "stamped page");
    }

    save_pdf(&mut pdf, output)?;
    println!("Stamped {} page(s)", page_indices.len());
    Ok(())
}
