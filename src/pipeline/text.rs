//! Digital text extraction: read one page's embedded text layer via pdfium.
//!
//! The text layer is read in character order, not layout order — pdfium's
//! layout-preserving modes pad columns with box-drawing and alignment
//! characters that the sanitiser would have to strip back out anyway, and
//! reading order is what the downstream analysis actually wants.
//!
//! Each call opens the document fresh. That sounds wasteful, but it is what
//! makes the bounded-call abandonment safe: a timed-out worker holds its own
//! document handle and drops it whenever it finally finishes, with no state
//! shared with the rest of the pipeline.
//!
//! Errors are returned as plain strings: strategy failures end up either in a
//! log line or inside an inline marker, never propagated as typed errors.

use pdfium_render::prelude::*;
use std::path::Path;

/// Extract the embedded text of one page (0-based index).
///
/// Blocking; intended to run under [`crate::pipeline::bounded::run_bounded`].
pub fn page_text(path: &Path, password: Option<&str>, page_index: u16) -> Result<String, String> {
    let pdfium = Pdfium::default();
    let document = pdfium
        .load_pdf_from_file(path, password)
        .map_err(|e| format!("{e:?}"))?;
    let pages = document.pages();
    let page = pages.get(page_index).map_err(|e| format!("{e:?}"))?;
    let text = page.text().map_err(|e| format!("{e:?}"))?;
    Ok(text.all())
}

/// Whether sanitised digital text meets the sufficiency threshold.
///
/// Below the threshold the page is treated as effectively image-only and the
/// OCR fallback runs.
pub fn is_sufficient(sanitized: &str, min_len: usize) -> bool {
    sanitized.trim().chars().count() >= min_len
}
