//! Output types: the document result, per-page results, metadata, and stats.

use crate::error::PageFailure;
use serde::{Deserialize, Serialize};

/// The result of extracting one document.
///
/// `text` is the assembled, sanitised, page-delimited output — the string a
/// caller forwards to the analysis service. `pages` keeps per-page detail
/// (winning strategy, recorded failures) for callers that want to inspect
/// partial success rather than treat the document as one opaque blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentText {
    /// Assembled, ASCII-safe, page-delimited text.
    pub text: String,
    /// Per-page results in ascending page order.
    pub pages: Vec<PageText>,
    /// Document metadata read at open time.
    pub metadata: DocumentMetadata,
    /// Aggregate counters for the run.
    pub stats: ExtractionStats,
}

/// Which strategy produced a page's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// The embedded text layer (possibly supplemented by detected tables).
    Digital,
    /// The OCR fallback.
    Ocr,
    /// Nothing was recovered; the page body holds failure markers only.
    Failed,
}

/// One page's result.
///
/// `body` is never empty: it holds recovered text under section headers, or
/// failure marker text when every strategy came up dry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageText {
    /// 1-based page number.
    pub page_num: usize,
    /// Sanitised page content with section headers and/or failure markers.
    pub body: String,
    /// The strategy that produced the content (or `Failed`).
    pub strategy: Strategy,
    /// Non-fatal failures recorded while processing this page.
    pub failures: Vec<PageFailure>,
    /// Wall-clock time spent on this page.
    pub duration_ms: u64,
}

impl PageText {
    /// Whether any strategy recovered actual content for this page.
    pub fn has_content(&self) -> bool {
        self.strategy != Strategy::Failed
    }
}

/// Document metadata extracted without touching page content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<String>,
    pub modification_date: Option<String>,
    pub page_count: usize,
    pub pdf_version: String,
}

/// Aggregate statistics for one extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// True page count of the document.
    pub total_pages: usize,
    /// Pages actually iterated (≤ `total_pages` when a page cap applies).
    pub processed_pages: usize,
    /// Pages whose content came from the OCR fallback.
    pub ocr_pages: usize,
    /// Pages where no strategy recovered anything.
    pub failed_pages: usize,
    /// Pages skipped because of the page cap.
    pub skipped_pages: usize,
    /// Whether the assembled output was cut at the character budget.
    pub truncated: bool,
    /// End-to-end wall-clock time.
    pub total_duration_ms: u64,
}
