//! Anchor positions on the 3x3 page grid.

use std::fmt;
use std::str::FromStr;

/// Vertical anchor of a text line on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VerticalAnchor {
    /// Centered between top and bottom edges.
    Middle,
    /// Cap height touches the top edge (minus the offset).
    #[default]
    Top,
    /// Baseline sits on the bottom edge (plus the offset).
    Bottom,
}

/// Horizontal anchor of a text line on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HorizontalAnchor {
    /// Centered between left and right edges.
    Center,
    /// Text ends at the right edge (minus the offset).
    #[default]
    Right,
    /// Text starts at the left edge (plus the offset).
    Left,
}

/// A single position flag, as accepted by [`Anchor::from_flags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorFlag {
    Middle,
    Top,
    Bottom,
    Center,
    Right,
    Left,
}

/// Where on the page a text line is anchored.
///
/// The default is top-right, which is also what an empty flag set resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Anchor {
    pub vertical: VerticalAnchor,
    pub horizontal: HorizontalAnchor,
}

impl Anchor {
    pub const TOP_LEFT: Anchor = Anchor::new(VerticalAnchor::Top, HorizontalAnchor::Left);
    pub const TOP_CENTER: Anchor = Anchor::new(VerticalAnchor::Top, HorizontalAnchor::Center);
    pub const TOP_RIGHT: Anchor = Anchor::new(VerticalAnchor::Top, HorizontalAnchor::Right);
    pub const MIDDLE_LEFT: Anchor = Anchor::new(VerticalAnchor::Middle, HorizontalAnchor::Left);
    pub const MIDDLE_CENTER: Anchor =
        Anchor::new(VerticalAnchor::Middle, HorizontalAnchor::Center);
    pub const MIDDLE_RIGHT: Anchor = Anchor::new(VerticalAnchor::Middle, HorizontalAnchor::Right);
    pub const BOTTOM_LEFT: Anchor = Anchor::new(VerticalAnchor::Bottom, HorizontalAnchor::Left);
    pub const BOTTOM_CENTER: Anchor =
        Anchor::new(VerticalAnchor::Bottom, HorizontalAnchor::Center);
    pub const BOTTOM_RIGHT: Anchor = Anchor::new(VerticalAnchor::Bottom, HorizontalAnchor::Right);

    pub const fn new(vertical: VerticalAnchor, horizontal: HorizontalAnchor) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    /// Resolve a flag set into one anchor per axis.
    ///
    /// Vertical: `Middle` wins, then `Bottom`, otherwise `Top`.
    /// Horizontal: `Center` wins, then `Left`, otherwise `Right`.
    /// A missing axis therefore falls back to top / right.
    pub fn from_flags<I: IntoIterator<Item = AnchorFlag>>(flags: I) -> Self {
        let (mut middle, mut bottom, mut center, mut left) = (false, false, false, false);
        for flag in flags {
            match flag {
                AnchorFlag::Middle => middle = true,
                AnchorFlag::Bottom => bottom = true,
                AnchorFlag::Center => center = true,
                AnchorFlag::Left => left = true,
                AnchorFlag::Top | AnchorFlag::Right => {}
            }
        }

        let vertical = if middle {
            VerticalAnchor::Middle
        } else if bottom {
            VerticalAnchor::Bottom
        } else {
            VerticalAnchor::Top
        };
        let horizontal = if center {
            HorizontalAnchor::Center
        } else if left {
            HorizontalAnchor::Left
        } else {
            HorizontalAnchor::Right
        };
        Self::new(vertical, horizontal)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vertical = match self.vertical {
            VerticalAnchor::Middle => "middle",
            VerticalAnchor::Top => "top",
            VerticalAnchor::Bottom => "bottom",
        };
        let horizontal = match self.horizontal {
            HorizontalAnchor::Center => "center",
            HorizontalAnchor::Right => "right",
            HorizontalAnchor::Left => "left",
        };
        write!(f, "{vertical}-{horizontal}")
    }
}

/// Error returned when an anchor string contains an unknown word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAnchorError(String);

impl fmt::Display for ParseAnchorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown anchor position '{}' (expected middle, top, bottom, center, right or left)",
            self.0
        )
    }
}

impl std::error::Error for ParseAnchorError {}

impl FromStr for AnchorFlag {
    type Err = ParseAnchorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "middle" => Ok(AnchorFlag::Middle),
            "top" => Ok(AnchorFlag::Top),
            "bottom" => Ok(AnchorFlag::Bottom),
            "center" | "centre" => Ok(AnchorFlag::Center),
            "right" => Ok(AnchorFlag::Right),
            "left" => Ok(AnchorFlag::Left),
            _ => Err(ParseAnchorError(s.to_string())),
        }
    }
}

/// Parses words joined by `-`, `,`, `+` or spaces, e.g. `bottom-center`.
///
/// Words are resolved with [`Anchor::from_flags`], so `"left"` alone means
/// top-left and an empty string means top-right.
impl FromStr for Anchor {
    type Err = ParseAnchorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let flags = s
            .split(|c: char| c == '-' || c == ',' || c == '+' || c.is_whitespace())
            .filter(|word| !word.is_empty())
            .map(AnchorFlag::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Anchor::from_flags(flags))
    }
}
