//! Encoding text into the byte codes a font's `Tj` strings expect.
//!
//! Simple fonts are written with WinAnsiEncoding. Composite fonts follow
//! their predefined CMap: legacy CJK CMaps (`90ms-RKSJ-H`, `GBK-EUC-H`, ...)
//! map onto the matching `encoding_rs` codec, while `Identity-H` and the
//! Unicode CMaps (`UniJIS-UCS2-H`, `UniGB-UTF16-V`, ...) take UTF-16BE.
//! For `Identity-H` the UTF-16 code is only correct when the embedded font's
//! CIDs follow Unicode order.

use encoding_rs::{Encoding, WINDOWS_1252};

use crate::error::BackendError;

/// How a font maps characters to string bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextEncoding {
    /// One byte per character, Windows-1252 (WinAnsiEncoding).
    WinAnsi,
    /// A legacy multi-byte CJK encoding selected by the font's CMap.
    Legacy(&'static Encoding),
    /// Two bytes per UTF-16 code unit, big-endian.
    Utf16Be,
}

impl TextEncoding {
    /// Encoding for a composite font's predefined CMap name.
    ///
    /// Returns `None` for CMap names that are neither Identity, Unicode nor a
    /// known legacy CJK CMap.
    pub fn for_cmap(cmap_name: &str) -> Option<Self> {
        let base = cmap_name
            .strip_suffix("-H")
            .or_else(|| cmap_name.strip_suffix("-V"))
            .unwrap_or(cmap_name);

        if base == "Identity" {
            return Some(TextEncoding::Utf16Be);
        }
        if base.starts_with("Uni") && (base.ends_with("-UCS2") || base.ends_with("-UTF16")) {
            return Some(TextEncoding::Utf16Be);
        }

        let legacy = match base {
            "GBK-EUC" | "GB-EUC" | "GBKp-EUC" | "GBpc-EUC" => encoding_rs::GBK,
            "B5pc" | "ETen-B5" | "HKscs-B5" | "ETenms-B5" => encoding_rs::BIG5,
            "90ms-RKSJ" | "90msp-RKSJ" | "90pv-RKSJ" | "83pv-RKSJ" | "78-RKSJ" | "Add-RKSJ"
            | "Ext-RKSJ" => encoding_rs::SHIFT_JIS,
            "EUC" | "78-EUC" => encoding_rs::EUC_JP,
            "KSC-EUC" | "KSCms-UHC" | "KSCpc-EUC" => encoding_rs::EUC_KR,
            _ => return None,
        };
        Some(TextEncoding::Legacy(legacy))
    }

    /// Human-readable name for error messages.
    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::WinAnsi => "WinAnsiEncoding",
            TextEncoding::Legacy(encoding) => encoding.name(),
            TextEncoding::Utf16Be => "UTF-16BE",
        }
    }

    /// Bytes for a single character, or `None` if it cannot be represented.
    pub fn encode_char(&self, ch: char) -> Option<Vec<u8>> {
        match self {
            TextEncoding::WinAnsi => encode_strict(WINDOWS_1252, ch),
            TextEncoding::Legacy(encoding) => encode_strict(encoding, ch),
            TextEncoding::Utf16Be => {
                let mut units = [0u16; 2];
                Some(
                    ch.encode_utf16(&mut units)
                        .iter()
                        .flat_map(|unit| unit.to_be_bytes())
                        .collect(),
                )
            }
        }
    }

    /// Character codes a single character occupies, as used for width lookup.
    ///
    /// Simple and legacy encodings yield one code (one or two bytes, big-endian);
    /// UTF-16 yields one code per code unit.
    pub fn char_codes(&self, ch: char) -> Option<Vec<u32>> {
        let bytes = self.encode_char(ch)?;
        let codes = match self {
            TextEncoding::Utf16Be => bytes
                .chunks(2)
                .map(|pair| u32::from(pair[0]) << 8 | u32::from(pair[1]))
                .collect(),
            _ => vec![bytes.iter().fold(0u32, |code, b| code << 8 | u32::from(*b))],
        };
        Some(codes)
    }

    /// Encode a whole string.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Font`] naming the first character the encoding
    /// cannot represent.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>, BackendError> {
        let mut out = Vec::with_capacity(text.len() * 2);
        for ch in text.chars() {
            let bytes = self.encode_char(ch).ok_or_else(|| {
                BackendError::Font(format!(
                    "cannot encode '{ch}' (U+{:04X}) with {}",
                    u32::from(ch),
                    self.name()
                ))
            })?;
            out.extend_from_slice(&bytes);
        }
        Ok(out)
    }
}

/// `encoding_rs` substitutes numeric character references for unmappable
/// characters; treat any substitution as failure.
fn encode_strict(encoding: &'static Encoding, ch: char) -> Option<Vec<u8>> {
    let mut buf = [0u8; 4];
    let (bytes, _, had_errors) = encoding.encode(ch.encode_utf8(&mut buf));
    if had_errors {
        None
    } else {
        Some(bytes.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_and_unicode_cmaps_use_utf16() {
        assert_eq!(TextEncoding::for_cmap("Identity-H"), Some(TextEncoding::Utf16Be));
        assert_eq!(TextEncoding::for_cmap("Identity-V"), Some(TextEncoding::Utf16Be));
        assert_eq!(TextEncoding::for_cmap("UniJIS-UCS2-H"), Some(TextEncoding::Utf16Be));
        assert_eq!(TextEncoding::for_cmap("UniGB-UTF16-V"), Some(TextEncoding::Utf16Be));
    }

    #[test]
    fn legacy_cmaps() {
        assert_eq!(
            TextEncoding::for_cmap("90ms-RKSJ-H"),
            Some(TextEncoding::Legacy(encoding_rs::SHIFT_JIS))
        );
        assert_eq!(
            TextEncoding::for_cmap("GBK-EUC-V"),
            Some(TextEncoding::Legacy(encoding_rs::GBK))
        );
        assert_eq!(
            TextEncoding::for_cmap("ETen-B5-H"),
            Some(TextEncoding::Legacy(encoding_rs::BIG5))
        );
        assert_eq!(
            TextEncoding::for_cmap("KSCms-UHC-H"),
            Some(TextEncoding::Legacy(encoding_rs::EUC_KR))
        );
    }

    #[test]
    fn unknown_cmap() {
        assert_eq!(TextEncoding::for_cmap("Adobe-Japan1-6"), None);
        assert_eq!(TextEncoding::for_cmap("UniJIS-UTF8-H"), None);
    }

    #[test]
    fn winansi_encodes_latin1_and_cp1252_extras() {
        let enc = TextEncoding::WinAnsi;
        assert_eq!(enc.encode("Page 1").unwrap(), b"Page 1".to_vec());
        assert_eq!(enc.encode("é").unwrap(), vec![0xE9]);
        assert_eq!(enc.encode("€").unwrap(), vec![0x80]);
    }

    #[test]
    fn winansi_rejects_cjk() {
        let err = TextEncoding::WinAnsi.encode("No.明").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("U+660E"), "{msg}");
        assert!(msg.contains("WinAnsiEncoding"), "{msg}");
    }

    #[test]
    fn shift_jis_encodes_japanese() {
        let enc = TextEncoding::Legacy(encoding_rs::SHIFT_JIS);
        assert_eq!(enc.encode("明").unwrap(), vec![0x96, 0xBE]);
        assert_eq!(enc.encode("A").unwrap(), vec![0x41]);
        assert_eq!(enc.char_codes('明'), Some(vec![0x96BE]));
    }

    #[test]
    fn utf16_encodes_bmp_and_surrogates() {
        let enc = TextEncoding::Utf16Be;
        assert_eq!(enc.encode("A明").unwrap(), vec![0x00, 0x41, 0x66, 0x0E]);
        assert_eq!(enc.char_codes('😀'), Some(vec![0xD83D, 0xDE00]));
    }

    #[test]
    fn winansi_char_code_is_the_byte() {
        assert_eq!(TextEncoding::WinAnsi.char_codes('A'), Some(vec![65]));
        assert_eq!(TextEncoding::WinAnsi.char_codes('明'), None);
    }
}
