//! Repair of Shift-JIS font names that were decoded as Windows-1252.
//!
//! Japanese report generators write font names such as `ＭＳ明朝` as raw
//! Shift-JIS bytes inside a PDF name object (`/#82l#82r#96#BE#92#A9`). A
//! reader that decodes non-UTF-8 names as Windows-1252 turns the lead bytes
//! 0x82..0x9F into "C1" punctuation code points (`‚`, `ƒ`, `–`, ...), and a
//! later save writes those code points back out, leaving a font name no
//! viewer can match.
//!
//! [`repair_name`] inverts that decoding and [`canonical_font_name`] maps the
//! recovered Japanese name to the ASCII name of the same face.

use encoding_rs::SHIFT_JIS;

/// Windows-1252 code points that stand in for bytes 0x80..0x9F.
///
/// 0x81, 0x8D, 0x8F, 0x90 and 0x9D are undefined in Windows-1252 and decode
/// to the C1 control with the same value, so the low-byte fallback in
/// [`repair_name`] already restores them.
pub const C1_REMAP: [(char, u8); 24] = [
    ('\u{201A}', 0x82),
    ('\u{0192}', 0x83),
    ('\u{201E}', 0x84),
    ('\u{2026}', 0x85),
    ('\u{2020}', 0x86),
    ('\u{2021}', 0x87),
    ('\u{02C6}', 0x88),
    ('\u{2030}', 0x89),
    ('\u{0160}', 0x8A),
    ('\u{2039}', 0x8B),
    ('\u{0152}', 0x8C),
    ('\u{2018}', 0x91),
    ('\u{2019}', 0x92),
    ('\u{201C}', 0x93),
    ('\u{201D}', 0x94),
    ('\u{2022}', 0x95),
    ('\u{2013}', 0x96),
    ('\u{2014}', 0x97),
    ('\u{02DC}', 0x98),
    ('\u{2122}', 0x99),
    ('\u{0161}', 0x9A),
    ('\u{203A}', 0x9B),
    ('\u{0153}', 0x9C),
    ('\u{0178}', 0x9F),
];

/// The four faces a repaired name can resolve to.
pub const CANONICAL_NAMES: [&str; 4] = ["MS Mincho", "MS PMincho", "MS Gothic", "MS PGothic"];

/// Japanese face names (with and without the inner space, with and without
/// the `@` vertical-writing prefix) and their ASCII equivalents.
pub const CANONICAL_FONT_NAMES: [(&str, &str); 16] = [
    ("ＭＳ明朝", "MS Mincho"),
    ("ＭＳ 明朝", "MS Mincho"),
    ("@ＭＳ明朝", "MS Mincho"),
    ("@ＭＳ 明朝", "MS Mincho"),
    ("ＭＳＰ明朝", "MS PMincho"),
    ("ＭＳ Ｐ明朝", "MS PMincho"),
    ("@ＭＳＰ明朝", "MS PMincho"),
    ("@ＭＳ Ｐ明朝", "MS PMincho"),
    ("ＭＳゴシック", "MS Gothic"),
    ("ＭＳ ゴシック", "MS Gothic"),
    ("@ＭＳゴシック", "MS Gothic"),
    ("@ＭＳ ゴシック", "MS Gothic"),
    ("ＭＳＰゴシック", "MS PGothic"),
    ("ＭＳ Ｐゴシック", "MS PGothic"),
    ("@ＭＳＰゴシック", "MS PGothic"),
    ("@ＭＳ Ｐゴシック", "MS PGothic"),
];

/// Byte that `ch` was decoded from, if it is one of the remapped C1 code points.
pub fn c1_byte(ch: char) -> Option<u8> {
    C1_REMAP
        .iter()
        .find(|(code_point, _)| *code_point == ch)
        .map(|&(_, byte)| byte)
}

/// Recover the Shift-JIS reading of a mis-decoded font name.
///
/// Each char is turned back into a single byte (remapped C1 code points to
/// their original byte, everything else truncated to its low byte) and the
/// byte string is decoded as Shift-JIS. Returns `None` when the result equals
/// the input, which is the case for plain ASCII names that never went
/// through the lossy round-trip.
///
/// Decoding cannot fail: malformed sequences become U+FFFD, which never
/// matches a key of [`CANONICAL_FONT_NAMES`].
pub fn repair_name(name: &str) -> Option<String> {
    let bytes: Vec<u8> = name
        .chars()
        .map(|ch| c1_byte(ch).unwrap_or(ch as u32 as u8))
        .collect();
    let (decoded, _had_errors) = SHIFT_JIS.decode_without_bom_handling(&bytes);
    if decoded == name {
        None
    } else {
        Some(decoded.into_owned())
    }
}

/// ASCII face name for a Japanese font name, exact and case-sensitive.
pub fn canonical_font_name(name: &str) -> Option<&'static str> {
    CANONICAL_FONT_NAMES
        .iter()
        .find(|(key, _)| *key == name)
        .map(|&(_, canonical)| canonical)
}

/// Repair `name` and resolve it to a canonical face in one step.
///
/// Returns the repaired name together with its canonical replacement.
pub fn resolve_corrupted_name(name: &str) -> Option<(String, &'static str)> {
    let repaired = repair_name(name)?;
    let canonical = canonical_font_name(&repaired)?;
    Some((repaired, canonical))
}
