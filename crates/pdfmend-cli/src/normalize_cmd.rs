use std::path::Path;

use crate::shared::{open_pdf, save_pdf};

pub fn run(input: &Path, output: &Path, password: Option<&str>) -> Result<(), i32> {
    let mut pdf = open_pdf(input, password)?;

    let renames = pdf.normalize_fonts_with_report().map_err(|e| {
        eprintln!("Error: failed to normalize fonts: {e}");
        1
    })?;
    for rename in &renames {
        tracing::info!(
            from = %rename.repaired,
            to = rename.canonical,
            "renamed font"
        );
    }

    save_pdf(&mut pdf, output)?;
    println!("Renamed {} font(s)", renames.len());
    Ok(())
}
