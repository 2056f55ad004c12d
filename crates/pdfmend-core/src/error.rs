//! Error types for pdfmend.
//!
//! Provides [`PdfError`], the unified fatal error returned by the facade crate.
//! Backends define their own error types and convert into it.

use std::fmt;

/// Fatal error types for PDF processing.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfError {
    /// Error parsing PDF structure or syntax.
    ParseError(String),
    /// I/O error reading or writing PDF data.
    IoError(String),
    /// Error resolving font dictionaries, metrics, or text encoding.
    FontError(String),
    /// Error reading or writing a page content stream.
    ContentError(String),
    /// The PDF is encrypted and requires a password to open.
    PasswordRequired,
    /// The supplied password is incorrect for this encrypted PDF.
    InvalidPassword,
    /// Any other error not covered by specific variants.
    Other(String),
}

impl fmt::Display for PdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfError::ParseError(msg) => write!(f, "parse error: {msg}"),
            PdfError::IoError(msg) => write!(f, "I/O error: {msg}"),
            PdfError::FontError(msg) => write!(f, "font error: {msg}"),
            PdfError::ContentError(msg) => write!(f, "content stream error: {msg}"),
            PdfError::PasswordRequired => write!(f, "PDF is encrypted and requires a password"),
            PdfError::InvalidPassword => write!(f, "the supplied password is incorrect"),
            PdfError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PdfError {}

impl From<std::io::Error> for PdfError {
    fn from(err: std::io::Error) -> Self {
        PdfError::IoError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_display() {
        let err = PdfError::ParseError("invalid xref".to_string());
        assert_eq!(err.to_string(), "parse error: invalid xref");
    }

    #[test]
    fn io_error_display() {
        let err = PdfError::IoError("file not found".to_string());
        assert_eq!(err.to_string(), "I/O error: file not found");
    }

    #[test]
    fn font_error_display() {
        let err = PdfError::FontError("descendant font missing".to_string());
        assert_eq!(err.to_string(), "font error: descendant font missing");
    }

    #[test]
    fn content_error_display() {
        let err = PdfError::ContentError("cannot encode operation".to_string());
        assert_eq!(
            err.to_string(),
            "content stream error: cannot encode operation"
        );
    }

    #[test]
    fn password_errors_display() {
        assert_eq!(
            PdfError::PasswordRequired.to_string(),
            "PDF is encrypted and requires a password"
        );
        assert_eq!(
            PdfError::InvalidPassword.to_string(),
            "the supplied password is incorrect"
        );
    }

    #[test]
    fn other_error_displays_message_verbatim() {
        let err = PdfError::Other("something odd".to_string());
        assert_eq!(err.to_string(), "something odd");
    }

    #[test]
    fn from_std_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.pdf");
        let err: PdfError = io_err.into();
        assert!(matches!(err, PdfError::IoError(_)));
        assert!(err.to_string().contains("missing.pdf"));
    }

    #[test]
    fn implements_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(PdfError::Other("boxed".to_string()));
        assert_eq!(err.to_string(), "boxed");
    }
}
