use std::path::Path;

use crate::shared::open_pdf;

pub fn run(file: &Path, password: Option<&str>) -> Result<(), i32> {
    let pdf = open_pdf(file, password)?;

    let renames = pdf.planned_font_renames().map_err(|e| {
        eprintln!("Error: failed to read fonts: {e}");
        1
    })?;

    if renames.is_empty() {
        println!("No font names to normalize.");
        return Ok(());
    }

    println!("Normalizable: {} font(s)", renames.len());
    for rename in &renames {
        let (num, generation) = rename.id;
        println!(
            "  {num} {generation} R: {} -> {} ({})",
            rename.original, rename.canonical, rename.repaired
        );
    }
    Ok(())
}
