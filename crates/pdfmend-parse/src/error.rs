//! Error types for the lopdf backend.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides [`BackendError`]
//! that wraps lopdf failures and converts them to [`PdfError`].

use pdfmend_core::PdfError;
use thiserror::Error;

/// Error type for lopdf backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Error from PDF parsing (structure, syntax, object resolution).
    #[error("PDF parse error: {0}")]
    Parse(String),

    /// Error reading or writing PDF data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error resolving or updating a font, or encoding text for it.
    #[error("font error: {0}")]
    Font(String),

    /// Error reading or writing a page content stream.
    #[error("content stream error: {0}")]
    Content(String),

    /// A core library error.
    #[error(transparent)]
    Core(#[from] PdfError),
}

impl From<BackendError> for PdfError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Parse(msg) => PdfError::ParseError(msg),
            BackendError::Io(e) => PdfError::IoError(e.to_string()),
            BackendError::Font(msg) => PdfError::FontError(msg),
            BackendError::Content(msg) => PdfError::ContentError(msg),
            BackendError::Core(e) => e,
        }
    }
}
