use std::path::Path;

use pdfmend::{OpenOptions, Pdf};

use crate::page_range::parse_page_range;

/// Open a PDF file, printing a user-facing message on failure.
///
/// Returns `Err(1)` if the file does not exist or cannot be opened.
pub fn open_pdf(file: &Path, password: Option<&str>) -> Result<Pdf, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }

    let options = password.map(OpenOptions::with_password);
    Pdf::open_file(file, options).map_err(|e| {
        eprintln!("Error: failed to open PDF: {e}");
        1
    })
}

/// Save `pdf` to `output`, printing a user-facing message on failure.
pub fn save_pdf(pdf: &mut Pdf, output: &Path) -> Result<(), i32> {
    pdf.save(output).map_err(|e| {
        eprintln!("Error: failed to write {}: {e}", output.display());
        1
    })
}

/// Page indices selected by `pages`, or every page when `None`.
pub fn resolve_pages(pages: Option<&str>, page_count: usize) -> Result<Vec<usize>, i32> {
    match pages {
        Some(range) => parse_page_range(range, page_count).map_err(|e| {
            eprintln!("Error: {e}");
            1
        }),
        None => Ok((0..page_count).collect()),
    }
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json(value: &serde_json::Value) -> Result<(), i32> {
    let text = serde_json::to_string_pretty(value).map_err(|e| {
        eprintln!("Error: failed to serialize output: {e}");
        1
    })?;
    println!("{text}");
    Ok(())
}
