//! Anchored text placement and the content fragments that draw it.
//!
//! [`text_origin`] is the pure coordinate computation. [`place_text`] drives
//! a [`PageCanvas`] to write the drawing fragment, optionally isolating the
//! page's original graphics state first.
//!
//! Pages produced at a non-default resolution often leave a scaling matrix
//! active at the end of their content. With isolation on, a lone `q` is
//! prepended to the page and the appended fragment starts with `Q`, so the
//! text is drawn in the untransformed page space that [`text_origin`] assumes.

use crate::anchor::{Anchor, HorizontalAnchor, VerticalAnchor};
use crate::geometry::{PageSize, Point};

/// One content stream operation emitted by [`place_text`].
#[derive(Debug, Clone, PartialEq)]
pub enum ContentOp {
    /// `q`
    SaveState,
    /// `Q`
    RestoreState,
    /// `BT`
    BeginText,
    /// `ET`
    EndText,
    /// `/<resource> <size> Tf`
    SetFont { resource: String, size: f64 },
    /// `<dx> <dy> Td`
    MoveText { dx: f64, dy: f64 },
    /// `(<bytes>) Tj`, bytes already encoded for the font.
    ShowText(Vec<u8>),
}

impl ContentOp {
    /// The PDF operator this operation is written as.
    pub fn operator(&self) -> &'static str {
        match self {
            ContentOp::SaveState => "q",
            ContentOp::RestoreState => "Q",
            ContentOp::BeginText => "BT",
            ContentOp::EndText => "ET",
            ContentOp::SetFont { .. } => "Tf",
            ContentOp::MoveText { .. } => "Td",
            ContentOp::ShowText(_) => "Tj",
        }
    }
}

/// A font bound to a page resource, as seen by the placer.
pub trait PlacementFont {
    /// Error raised while encoding text.
    type Error;

    /// Resource name the font is registered under (`F1`, without the slash).
    fn resource_name(&self) -> &str;

    /// Advance width of `text` at `font_size`, in page units.
    fn string_width(&self, text: &str, font_size: f64) -> f64;

    /// Cap height at `font_size`, in page units.
    fn cap_height(&self, font_size: f64) -> f64;

    /// Bytes that show `text` with this font's encoding.
    ///
    /// # Errors
    ///
    /// Returns an error if the font's encoding cannot represent the text.
    fn encode_text(&self, text: &str) -> Result<Vec<u8>, Self::Error>;
}

/// A page whose content stream can be extended at either end.
pub trait PageCanvas {
    /// Error raised while reading or writing the content stream.
    type Error;

    /// Visible page extent.
    fn page_size(&self) -> PageSize;

    /// Whether the first token of the page content is the `q` operator.
    ///
    /// # Errors
    ///
    /// Returns an error if the content stream cannot be read.
    fn starts_with_save_state(&self) -> Result<bool, Self::Error>;

    /// Insert a fragment before all existing content.
    ///
    /// # Errors
    ///
    /// Returns an error if the fragment cannot be written.
    fn prepend(&mut self, ops: &[ContentOp]) -> Result<(), Self::Error>;

    /// Add a fragment after all existing content.
    ///
    /// # Errors
    ///
    /// Returns an error if the fragment cannot be written.
    fn append(&mut self, ops: &[ContentOp]) -> Result<(), Self::Error>;
}

/// Size, anchor and offsets for one text line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPlacement {
    /// Font size in page units.
    pub font_size: f64,
    /// Anchor on the page grid.
    pub anchor: Anchor,
    /// Horizontal offset; measured from the right edge for right anchors.
    pub offset_x: f64,
    /// Vertical offset; measured from the top edge for top anchors.
    pub offset_y: f64,
    /// Save the page's initial graphics state and restore it before drawing.
    pub isolate_graphics_state: bool,
}

impl TextPlacement {
    /// Placement with graphics state isolation enabled.
    pub fn new(font_size: f64, anchor: Anchor, offset_x: f64, offset_y: f64) -> Self {
        Self {
            font_size,
            anchor,
            offset_x,
            offset_y,
            isolate_graphics_state: true,
        }
    }

    /// Turn graphics state isolation on or off.
    pub fn with_isolation(mut self, isolate: bool) -> Self {
        self.isolate_graphics_state = isolate;
        self
    }
}

impl Default for TextPlacement {
    fn default() -> Self {
        Self::new(12.0, Anchor::default(), 0.0, 0.0)
    }
}

/// Origin (start of the baseline) for a text line of the given extent.
///
/// `text_height` is the cap height, so a top anchor puts the tops of capital
/// letters on the top edge.
pub fn text_origin(
    page: PageSize,
    text_width: f64,
    text_height: f64,
    anchor: Anchor,
    offset_x: f64,
    offset_y: f64,
) -> Point {
    let x = match anchor.horizontal {
        HorizontalAnchor::Center => (page.width - text_width) / 2.0 + offset_x,
        HorizontalAnchor::Left => offset_x,
        HorizontalAnchor::Right => page.width - text_width - offset_x,
    };
    let y = match anchor.vertical {
        VerticalAnchor::Middle => (page.height - text_height) / 2.0 + offset_y,
        VerticalAnchor::Bottom => offset_y,
        VerticalAnchor::Top => page.height - text_height - offset_y,
    };
    Point::new(x, y)
}

/// The `q BT Tf Td Tj ET Q` fragment that draws one line at `origin`.
pub fn text_fragment(
    resource: &str,
    font_size: f64,
    origin: Point,
    encoded: Vec<u8>,
) -> Vec<ContentOp> {
    vec![
        ContentOp::SaveState,
        ContentOp::BeginText,
        ContentOp::SetFont {
            resource: resource.to_string(),
            size: font_size,
        },
        ContentOp::MoveText {
            dx: origin.x,
            dy: origin.y,
        },
        ContentOp::ShowText(encoded),
        ContentOp::EndText,
        ContentOp::RestoreState,
    ]
}

/// Draw `text` on the page at the anchored position and return its origin.
///
/// With isolation requested and a page that does not already begin with
/// `q`, a `q` fragment is prepended and the appended fragment starts with
/// `Q`. Otherwise only the drawing fragment is appended.
///
/// # Errors
///
/// Errors from the canvas and from the font's text encoding are returned
/// unchanged. If prepending succeeded and appending failed, the prepended
/// `q` stays in place.
pub fn place_text<C, F, E>(
    canvas: &mut C,
    font: &F,
    text: &str,
    placement: &TextPlacement,
) -> Result<Point, E>
where
    C: PageCanvas + ?Sized,
    F: PlacementFont + ?Sized,
    C::Error: Into<E>,
    F::Error: Into<E>,
{
    let page = canvas.page_size();
    let text_width = font.string_width(text, placement.font_size);
    let text_height = font.cap_height(placement.font_size);
    let origin = text_origin(
        page,
        text_width,
        text_height,
        placement.anchor,
        placement.offset_x,
        placement.offset_y,
    );
    let encoded = font.encode_text(text).map_err(Into::into)?;

    let isolate = placement.isolate_graphics_state
        && !canvas.starts_with_save_state().map_err(Into::into)?;

    let mut fragment = Vec::with_capacity(8);
    if isolate {
        canvas
            .prepend(&[ContentOp::SaveState])
            .map_err(Into::into)?;
        fragment.push(ContentOp::RestoreState);
    }
    fragment.extend(text_fragment(
        font.resource_name(),
        placement.font_size,
        origin,
        encoded,
    ));
    canvas.append(&fragment).map_err(Into::into)?;

    tracing::trace!(
        x = origin.x,
        y = origin.y,
        anchor = %placement.anchor,
        isolated = isolate,
        "placed text"
    );
    Ok(origin)
}
