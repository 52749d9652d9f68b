//! Document-level extraction entry points.
//!
//! [`extract`] is the primary API: open the document, walk its pages in
//! order through the per-page fallback ladder, and assemble one sanitised,
//! page-delimited text blob. Pages run strictly sequentially; OCR holds a
//! full-page bitmap in memory and running pages in parallel would multiply
//! that footprint for little gain on the document sizes this crate targets.
//!
//! Only two failures are fatal here: the document cannot be opened, or the
//! extraction produced no text at all. Everything else, a page whose every
//! strategy failed included, is absorbed into inline markers on the page
//! where it happened.

use std::path::Path;
use std::time::Instant;

use pdfium_render::prelude::*;
use tracing::{info, warn};

use crate::config::ExtractionConfig;
use crate::error::ExtractError;
use crate::output::{DocumentMetadata, DocumentText, ExtractionStats, PageText, Strategy};
use crate::pipeline::{input, page};
use crate::sanitize::sanitize;

/// Extract the text content of a PDF file.
///
/// # Returns
/// `Ok(DocumentText)` on success, even if some pages failed (check
/// `output.stats.failed_pages` and the inline markers).
///
/// # Errors
/// Returns `Err(ExtractError)` only for fatal conditions:
/// - File not found / permission denied / not a PDF
/// - Corrupt or password-protected document
/// - A blank document (zero pages, or no text recovered on any page)
pub async fn extract(
    input_path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<DocumentText, ExtractError> {
    let total_start = Instant::now();
    let path = input::resolve_local(input_path.as_ref())?;
    info!("extracting {}", path.display());

    let metadata = read_metadata(&path, config.password.as_deref()).await?;
    let total_pages = metadata.page_count;
    info!("document has {total_pages} pages");

    if total_pages == 0 {
        return Err(ExtractError::NoContent { path, pages: 0 });
    }

    let process_count = match config.max_pages {
        Some(cap) if cap < total_pages => {
            warn!("page limit {cap} below document size {total_pages}, trailing pages skipped");
            cap
        }
        _ => total_pages,
    };

    let mut pages: Vec<PageText> = Vec::with_capacity(process_count);
    for page_num in 1..=process_count {
        pages.push(page::extract_page(&path, page_num, total_pages, config).await);
    }

    if nothing_recovered(&pages) {
        return Err(ExtractError::NoContent {
            path,
            pages: process_count,
        });
    }

    let skipped = total_pages - process_count;
    let assembled = assemble_document(&document_name(&path), &pages, total_pages, skipped);
    let (text, truncated) = apply_char_budget(sanitize(&assembled), config.max_chars);

    let stats = ExtractionStats {
        total_pages,
        processed_pages: process_count,
        ocr_pages: pages.iter().filter(|p| p.strategy == Strategy::Ocr).count(),
        failed_pages: pages
            .iter()
            .filter(|p| p.strategy == Strategy::Failed)
            .count(),
        skipped_pages: skipped,
        truncated,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };
    info!(
        "extraction complete: {}/{} pages, {} chars, {}ms",
        stats.processed_pages - stats.failed_pages,
        total_pages,
        text.chars().count(),
        stats.total_duration_ms
    );

    Ok(DocumentText {
        text,
        pages,
        metadata,
        stats,
    })
}

/// Synchronous wrapper around [`extract`].
///
/// Creates a temporary tokio runtime internally.
pub fn extract_sync(
    input_path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<DocumentText, ExtractError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ExtractError::Internal(format!("failed to create tokio runtime: {e}")))?
        .block_on(extract(input_path, config))
}

/// Extract a PDF and write the assembled text directly to a file.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn extract_to_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<ExtractionStats, ExtractError> {
    let output = extract(input_path, config).await?;
    let path = output_path.as_ref();

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| ExtractError::OutputWriteFailed {
                path: path.to_path_buf(),
                source: e,
            })?;
    }

    let tmp_path = path.with_extension("txt.tmp");
    tokio::fs::write(&tmp_path, &output.text)
        .await
        .map_err(|e| ExtractError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| ExtractError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(output.stats)
}

/// Read PDF metadata without extracting page content.
pub async fn inspect(input_path: impl AsRef<Path>) -> Result<DocumentMetadata, ExtractError> {
    let path = input::resolve_local(input_path.as_ref())?;
    read_metadata(&path, None).await
}

async fn read_metadata(
    path: &Path,
    password: Option<&str>,
) -> Result<DocumentMetadata, ExtractError> {
    let owned = path.to_path_buf();
    let pwd = password.map(str::to_string);
    tokio::task::spawn_blocking(move || read_metadata_blocking(&owned, pwd.as_deref()))
        .await
        .map_err(|e| ExtractError::Internal(format!("metadata task panicked: {e}")))?
}

fn read_metadata_blocking(
    path: &Path,
    password: Option<&str>,
) -> Result<DocumentMetadata, ExtractError> {
    let pdfium = Pdfium::default();

    let document = pdfium
        .load_pdf_from_file(path, password)
        .map_err(|e| open_error(path, password, e))?;

    let metadata = document.metadata();
    let pages = document.pages();

    let get_meta = |tag: PdfDocumentMetadataTagType| -> Option<String> {
        metadata.get(tag).and_then(|t| {
            let v = t.value().to_string();
            if v.is_empty() {
                None
            } else {
                Some(v)
            }
        })
    };

    Ok(DocumentMetadata {
        title: get_meta(PdfDocumentMetadataTagType::Title),
        author: get_meta(PdfDocumentMetadataTagType::Author),
        subject: get_meta(PdfDocumentMetadataTagType::Subject),
        creator: get_meta(PdfDocumentMetadataTagType::Creator),
        producer: get_meta(PdfDocumentMetadataTagType::Producer),
        creation_date: get_meta(PdfDocumentMetadataTagType::CreationDate),
        modification_date: get_meta(PdfDocumentMetadataTagType::ModificationDate),
        page_count: pages.len() as usize,
        pdf_version: format!("{:?}", document.version()),
    })
}

/// Map a pdfium open failure to the right fatal error.
///
/// pdfium does not expose structured error codes through this API, so the
/// password cases are recognised from the debug representation.
fn open_error(path: &Path, password: Option<&str>, e: PdfiumError) -> ExtractError {
    let err_str = format!("{e:?}");
    if err_str.contains("Password") || err_str.contains("password") {
        if password.is_some() {
            ExtractError::WrongPassword {
                path: path.to_path_buf(),
            }
        } else {
            ExtractError::PasswordRequired {
                path: path.to_path_buf(),
            }
        }
    } else {
        ExtractError::CorruptPdf {
            path: path.to_path_buf(),
            detail: err_str,
        }
    }
}

/// Whether the document yielded no text at all.
///
/// Marker text counts as a result: a page whose every strategy failed still
/// carries its failure markers, and a document made entirely of such pages is
/// a partial-success report the caller should see, not a fatal error. Only a
/// truly blank outcome (no pages, or pages with empty bodies) is fatal.
fn nothing_recovered(pages: &[PageText]) -> bool {
    pages.iter().all(|p| p.body.trim().is_empty())
}

fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Join page bodies into the final page-delimited document text.
fn assemble_document(name: &str, pages: &[PageText], total_pages: usize, skipped: usize) -> String {
    let mut parts: Vec<String> = Vec::new();
    parts.push(format!("=== DOCUMENT: {name} ({total_pages} pages) ==="));

    for page in pages {
        parts.push(format!("--- PAGE {} ---\n{}", page.page_num, page.body));
    }

    if skipped > 0 {
        parts.push(format!(
            "[ONLY THE FIRST {} OF {total_pages} PAGES WERE PROCESSED; {skipped} SKIPPED]",
            pages.len()
        ));
    }

    parts.push("=== END OF DOCUMENT ===".to_string());
    parts.join("\n\n")
}

/// Cut the text at the character budget, appending a truncation marker.
///
/// The marker carries its own leading newline, so the result is at most
/// `budget` plus the marker's length and always ends with the marker when a
/// cut happened.
fn apply_char_budget(text: String, max_chars: Option<usize>) -> (String, bool) {
    let Some(budget) = max_chars else {
        return (text, false);
    };
    if text.chars().count() <= budget {
        return (text, false);
    }

    let mut cut: String = text.chars().take(budget).collect();
    cut.push_str(&format!("\n[TRUNCATED AT {budget} CHARACTERS]"));
    (cut, true)
}
