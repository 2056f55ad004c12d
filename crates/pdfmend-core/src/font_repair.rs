//! Normalization of corrupted composite font names across a document.
//!
//! The document side is abstracted by [`FontCatalog`], which lists the fonts
//! referenced from each page and renames a composite font in place. The
//! functions here collect the distinct fonts, decide which of them carry a
//! repairable name, and apply the canonical replacement.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use crate::font_name::resolve_corrupted_name;

/// Whether a font is a simple font or a Type0 composite font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FontKind {
    /// Type1, TrueType, Type3 and other single-byte fonts.
    Simple,
    /// Type0 font with a CID-keyed descendant.
    Composite,
}

/// One font resource reachable from a page.
#[derive(Debug, Clone, PartialEq)]
pub struct FontEntry<Id> {
    /// Identity of the font object; two pages sharing a font yield equal ids.
    pub id: Id,
    /// Declared name (`/BaseFont`), decoded the way the producing reader did.
    pub name: Option<String>,
    /// Simple or composite.
    pub kind: FontKind,
}

/// A rename that [`normalize`] applies to one composite font.
#[derive(Debug, Clone, PartialEq)]
pub struct FontRename<Id> {
    /// Identity of the font being renamed.
    pub id: Id,
    /// Name as currently declared.
    pub original: String,
    /// Shift-JIS reading recovered by [`repair_name`](crate::repair_name).
    pub repaired: String,
    /// ASCII face name written back to the font.
    pub canonical: &'static str,
}

/// Access to a document's fonts.
///
/// Implementations own the document; this crate only reads font entries
/// and asks for composite fonts to be renamed.
pub trait FontCatalog {
    /// Identity of a font object.
    type FontId: Clone + Eq + Hash + Debug;

    /// Error raised while reading or updating the document.
    type Error;

    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Fonts listed in the resources of the page at `page_index` (0-based).
    ///
    /// # Errors
    ///
    /// Returns an error if the page or its resources cannot be resolved.
    fn page_fonts(&self, page_index: usize) -> Result<Vec<FontEntry<Self::FontId>>, Self::Error>;

    /// Overwrite the names of a composite font.
    ///
    /// Sets the Type0 `/BaseFont`, the Type0 `/Name` when present, the
    /// descendant font's `/BaseFont` and its descriptor's `/FontName`.
    ///
    /// # Errors
    ///
    /// Returns an error if the font or one of its sub-dictionaries cannot be
    /// updated. Fields written before the failure stay written.
    fn rename_composite_font(
        &mut self,
        id: &Self::FontId,
        new_name: &str,
    ) -> Result<(), Self::Error>;
}

/// Fonts used anywhere in the document, each listed once.
///
/// Order follows first appearance in page order.
///
/// # Errors
///
/// Propagates any error from [`FontCatalog::page_fonts`].
pub fn distinct_fonts<C: FontCatalog + ?Sized>(
    catalog: &C,
) -> Result<Vec<FontEntry<C::FontId>>, C::Error> {
    let mut seen = HashSet::new();
    let mut fonts = Vec::new();
    for page_index in 0..catalog.page_count() {
        for entry in catalog.page_fonts(page_index)? {
            if seen.insert(entry.id.clone()) {
                fonts.push(entry);
            }
        }
    }
    Ok(fonts)
}

/// The renames [`normalize`] would apply, without touching the document.
///
/// Only composite fonts are considered; simple fonts are left alone even if
/// their name happens to be corrupted or canonical.
///
/// # Errors
///
/// Propagates any error from [`FontCatalog::page_fonts`].
pub fn planned_renames<C: FontCatalog + ?Sized>(
    catalog: &C,
) -> Result<Vec<FontRename<C::FontId>>, C::Error> {
    let renames = distinct_fonts(catalog)?
        .into_iter()
        .filter(|font| font.kind == FontKind::Composite)
        .filter_map(|font| {
            let name = font.name?;
            let (repaired, canonical) = resolve_corrupted_name(&name)?;
            Some(FontRename {
                id: font.id,
                original: name,
                repaired,
                canonical,
            })
        })
        .collect();
    Ok(renames)
}

/// Whether [`normalize`] would change anything.
///
/// # Errors
///
/// Propagates any error from [`FontCatalog::page_fonts`].
pub fn is_normalizable<C: FontCatalog + ?Sized>(catalog: &C) -> Result<bool, C::Error> {
    Ok(!planned_renames(catalog)?.is_empty())
}

/// Rename every composite font whose repaired name is a known Japanese face.
///
/// Returns `true` if at least one font was renamed. Running it again on the
/// same document returns `false`: canonical ASCII names are left as they are.
///
/// # Errors
///
/// Propagates errors from the catalog unchanged. Renames applied before the
/// failing font are kept.
pub fn normalize<C: FontCatalog + ?Sized>(catalog: &mut C) -> Result<bool, C::Error> {
    Ok(!normalize_with_report(catalog)?.is_empty())
}

/// Like [`normalize`], returning the renames that were applied.
///
/// # Errors
///
/// Same as [`normalize`].
pub fn normalize_with_report<C: FontCatalog + ?Sized>(
    catalog: &mut C,
) -> Result<Vec<FontRename<C::FontId>>, C::Error> {
    let renames = planned_renames(catalog)?;
    for rename in &renames {
        catalog.rename_composite_font(&rename.id, rename.canonical)?;
        tracing::debug!(
            font = ?rename.id,
            repaired = %rename.repaired,
            canonical = rename.canonical,
            "renamed composite font"
        );
    }
    Ok(renames)
}
