//! Error types for the specread library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`ExtractError`] — **Fatal**: extraction cannot proceed at all (missing
//!   file, not a PDF, corrupt document, zero recoverable content). Returned
//!   as `Err(ExtractError)` from the top-level `extract*` functions.
//!
//! * [`PageFailure`] — **Non-fatal**: one strategy failed on one page
//!   (digital text timed out, table detection blew up, OCR errored). Stored
//!   inside [`crate::output::PageText`] and rendered as inline marker text so
//!   a partially garbled document still yields a usable result with visible
//!   gaps instead of silently lost pages.
//!
//! The separation is the whole propagation policy: only the fatal kinds
//! escape the pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the specread library.
///
/// Per-page strategy failures use [`PageFailure`] and are stored in
/// [`crate::output::PageText`] rather than propagated here.
#[derive(Debug, Error)]
pub enum ExtractError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── Document errors ───────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}\nTry repairing with: qpdf --decrypt input.pdf output.pdf")]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{path}' is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{path}'")]
    WrongPassword { path: PathBuf },

    /// The document opened but the extraction produced no text at all.
    ///
    /// Distinct from [`ExtractError::CorruptPdf`]: the file parsed fine but
    /// is effectively blank (zero pages, or pages with empty results). Pages
    /// that failed their strategies do not trigger this: their inline failure
    /// markers count as a result and the extraction succeeds partially.
    #[error("No extractable content in '{path}' ({pages} pages tried)\nThe document appears to be blank.")]
    NoContent { path: PathBuf, pages: usize },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output text file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal failure of one strategy on one page.
///
/// Recorded in [`crate::output::PageText::failures`] alongside the inline
/// marker text. The document-level extraction succeeds as long as at least
/// one page recovers content.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum PageFailure {
    /// Digital text extraction exceeded its time budget.
    #[error("Page {page}: digital text extraction timed out after {secs}s")]
    TextTimeout { page: usize, secs: u64 },

    /// Digital text extraction returned an error.
    #[error("Page {page}: digital text extraction failed: {detail}")]
    TextFailed { page: usize, detail: String },

    /// Table detection failed; the page's digital text is unaffected.
    #[error("Page {page}: table extraction failed: {detail}")]
    TableFailed { page: usize, detail: String },

    /// OCR exceeded its time budget.
    #[error("Page {page}: OCR timed out after {secs}s")]
    OcrTimeout { page: usize, secs: u64 },

    /// OCR returned an error (engine missing, rasterisation failed, ...).
    #[error("Page {page}: OCR failed: {detail}")]
    OcrFailed { page: usize, detail: String },
}
