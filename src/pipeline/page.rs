//! Per-page extraction state machine.
//!
//! Each page runs the same ladder: digital text first, tables when the
//! digital layer is rich enough, OCR when it is not. Every rung is a bounded
//! blocking call, so one pathological page can stall for at most its budget
//! and the document keeps moving. Failures are recorded on the page and
//! surfaced as inline markers rather than aborting the document.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::ExtractionConfig;
use crate::error::PageFailure;
use crate::output::{PageText, Strategy};
use crate::pipeline::bounded::{run_bounded, BoundedCall};
use crate::pipeline::{ocr, tables, text};
use crate::sanitize::sanitize;

pub(crate) const DIGITAL_HEADER: &str = "[DIGITAL TEXT]";
pub(crate) const TABLES_HEADER: &str = "[TABLES]";
pub(crate) const OCR_HEADER: &str = "[OCR TEXT]";
pub(crate) const OCR_TIMED_OUT_MARKER: &str = "[OCR TIMED OUT FOR THIS PAGE]";
pub(crate) const EXTRACTION_FAILED_MARKER: &str = "[TEXT EXTRACTION FAILED FOR THIS PAGE]";

/// What the OCR rung produced, if it ran at all.
pub(crate) enum OcrOutcome {
    NotAttempted,
    Text(String),
    TimedOut,
    Failed(String),
}

/// Extract one page (1-based `page_num`) through the fallback ladder.
///
/// Never returns an error: anything that goes wrong on the page lands in
/// [`PageText::failures`] and the body markers instead.
pub async fn extract_page(
    path: &Path,
    page_num: usize,
    total_pages: usize,
    config: &ExtractionConfig,
) -> PageText {
    let started = Instant::now();
    let page_index = (page_num - 1) as u16;
    info!("page {page_num} of {total_pages}");

    let mut failures: Vec<PageFailure> = Vec::new();

    let digital = digital_rung(path, page_num, page_index, config, &mut failures).await;

    let sufficient = text::is_sufficient(&digital, config.min_text_len);

    let table_text = if sufficient {
        tables_rung(path, page_num, page_index, config, &mut failures).await
    } else {
        String::new()
    };

    let ocr_outcome = if sufficient {
        OcrOutcome::NotAttempted
    } else {
        debug!(
            "page {page_num}: digital text below {} chars, falling back to OCR",
            config.min_text_len
        );
        ocr_rung(path, page_num, page_index, config, &mut failures).await
    };

    let (body, strategy) = compose_body(&digital, &table_text, &ocr_outcome);
    if strategy == Strategy::Failed {
        warn!("page {page_num}: no text recovered");
    }

    PageText {
        page_num,
        body,
        strategy,
        failures,
        duration_ms: started.elapsed().as_millis() as u64,
    }
}

async fn digital_rung(
    path: &Path,
    page_num: usize,
    page_index: u16,
    config: &ExtractionConfig,
    failures: &mut Vec<PageFailure>,
) -> String {
    let owned: PathBuf = path.to_path_buf();
    let password = config.password.clone();
    let call = run_bounded(config.text_timeout(), move || {
        text::page_text(&owned, password.as_deref(), page_index)
    })
    .await;

    match call {
        BoundedCall::Completed(Ok(raw)) => sanitize(&raw),
        BoundedCall::Completed(Err(detail)) => {
            warn!("page {page_num}: text extraction failed: {detail}");
            failures.push(PageFailure::TextFailed {
                page: page_num,
                detail,
            });
            String::new()
        }
        BoundedCall::TimedOut => {
            let secs = config.text_timeout_secs;
            warn!("page {page_num}: text extraction timed out after {secs}s");
            failures.push(PageFailure::TextTimeout {
                page: page_num,
                secs,
            });
            String::new()
        }
        BoundedCall::Panicked(detail) => {
            warn!("page {page_num}: text extraction panicked: {detail}");
            failures.push(PageFailure::TextFailed {
                page: page_num,
                detail,
            });
            String::new()
        }
    }
}

async fn tables_rung(
    path: &Path,
    page_num: usize,
    page_index: u16,
    config: &ExtractionConfig,
    failures: &mut Vec<PageFailure>,
) -> String {
    let owned: PathBuf = path.to_path_buf();
    let password = config.password.clone();
    let call = run_bounded(config.text_timeout(), move || {
        tables::page_tables(&owned, password.as_deref(), page_index)
    })
    .await;

    match call {
        BoundedCall::Completed(Ok(found)) => {
            if !found.is_empty() {
                debug!("page {page_num}: {} table(s) detected", found.len());
            }
            tables::render_tables(&found)
        }
        BoundedCall::Completed(Err(detail)) | BoundedCall::Panicked(detail) => {
            warn!("page {page_num}: table extraction failed: {detail}");
            failures.push(PageFailure::TableFailed {
                page: page_num,
                detail,
            });
            String::new()
        }
        BoundedCall::TimedOut => {
            let detail = format!("timed out after {}s", config.text_timeout_secs);
            warn!("page {page_num}: table extraction {detail}");
            failures.push(PageFailure::TableFailed {
                page: page_num,
                detail,
            });
            String::new()
        }
    }
}

async fn ocr_rung(
    path: &Path,
    page_num: usize,
    page_index: u16,
    config: &ExtractionConfig,
    failures: &mut Vec<PageFailure>,
) -> OcrOutcome {
    let owned: PathBuf = path.to_path_buf();
    let password = config.password.clone();
    let dpi = config.ocr_dpi;
    let language = config.ocr_language.clone();
    let call = run_bounded(config.ocr_timeout(), move || {
        ocr::page_ocr(&owned, password.as_deref(), page_index, dpi, &language)
    })
    .await;

    match call {
        BoundedCall::Completed(Ok(raw)) => OcrOutcome::Text(sanitize(&raw)),
        BoundedCall::Completed(Err(detail)) | BoundedCall::Panicked(detail) => {
            warn!("page {page_num}: OCR failed: {detail}");
            failures.push(PageFailure::OcrFailed {
                page: page_num,
                detail: detail.clone(),
            });
            OcrOutcome::Failed(detail)
        }
        BoundedCall::TimedOut => {
            let secs = config.ocr_timeout_secs;
            warn!("page {page_num}: OCR timed out after {secs}s");
            failures.push(PageFailure::OcrTimeout {
                page: page_num,
                secs,
            });
            OcrOutcome::TimedOut
        }
    }
}

/// Assemble the page body from the rung results and decide the strategy.
///
/// Short digital text is kept even when OCR also ran, so a caption-only page
/// never loses what the digital layer did hold.
pub(crate) fn compose_body(digital: &str, table_text: &str, ocr: &OcrOutcome) -> (String, Strategy) {
    let mut sections: Vec<String> = Vec::new();

    if !digital.is_empty() {
        sections.push(format!("{DIGITAL_HEADER}\n{digital}"));
        if !table_text.is_empty() {
            sections.push(format!("{TABLES_HEADER}\n{table_text}"));
        }
    }

    let fallback = |sections: &[String]| {
        if sections.iter().any(|s| s.starts_with(DIGITAL_HEADER)) {
            Strategy::Digital
        } else {
            Strategy::Failed
        }
    };

    let strategy = match ocr {
        OcrOutcome::NotAttempted => fallback(&sections),
        OcrOutcome::Text(text) if !text.is_empty() => {
            sections.push(format!("{OCR_HEADER}\n{text}"));
            Strategy::Ocr
        }
        OcrOutcome::Text(_) => fallback(&sections),
        OcrOutcome::TimedOut => {
            sections.push(OCR_TIMED_OUT_MARKER.to_string());
            fallback(&sections)
        }
        OcrOutcome::Failed(reason) => {
            sections.push(format!("[OCR FAILED: {}]", one_line(reason)));
            fallback(&sections)
        }
    };

    let body = if sections.is_empty() {
        EXTRACTION_FAILED_MARKER.to_string()
    } else {
        sections.join("\n\n")
    };

    (body, strategy)
}

/// Collapse a failure reason to a single sanitized line fit for an inline
/// marker.
fn one_line(reason: &str) -> String {
    sanitize(reason).replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sufficient_digital_page_is_digital() {
        let (body, strategy) = compose_body("hello world", "", &OcrOutcome::NotAttempted);
        assert_eq!(strategy, Strategy::Digital);
        assert_eq!(body, "[DIGITAL TEXT]\nhello world");
    }

    #[test]
    fn tables_follow_digital_text() {
        let (body, _) = compose_body("prose", "Table 1:\na | b", &OcrOutcome::NotAttempted);
        assert_eq!(body, "[DIGITAL TEXT]\nprose\n\n[TABLES]\nTable 1:\na | b");
    }

    #[test]
    fn ocr_text_promotes_strategy_to_ocr() {
        let (body, strategy) = compose_body("", "", &OcrOutcome::Text("scanned words".into()));
        assert_eq!(strategy, Strategy::Ocr);
        assert_eq!(body, "[OCR TEXT]\nscanned words");
    }

    #[test]
    fn short_digital_text_survives_alongside_ocr() {
        let (body, strategy) = compose_body("Fig. 3", "", &OcrOutcome::Text("diagram labels".into()));
        assert_eq!(strategy, Strategy::Ocr);
        assert_eq!(body, "[DIGITAL TEXT]\nFig. 3\n\n[OCR TEXT]\ndiagram labels");
    }

    #[test]
    fn ocr_timeout_with_no_digital_text_fails_page() {
        let (body, strategy) = compose_body("", "", &OcrOutcome::TimedOut);
        assert_eq!(strategy, Strategy::Failed);
        assert_eq!(body, "[OCR TIMED OUT FOR THIS PAGE]");
    }

    #[test]
    fn ocr_timeout_keeps_short_digital_text() {
        let (body, strategy) = compose_body("Fig. 3", "", &OcrOutcome::TimedOut);
        assert_eq!(strategy, Strategy::Digital);
        assert_eq!(body, "[DIGITAL TEXT]\nFig. 3\n\n[OCR TIMED OUT FOR THIS PAGE]");
    }

    #[test]
    fn ocr_failure_reason_is_flattened_to_one_line() {
        let outcome = OcrOutcome::Failed("boom\nsecond line".into());
        let (body, strategy) = compose_body("", "", &outcome);
        assert_eq!(strategy, Strategy::Failed);
        assert_eq!(body, "[OCR FAILED: boom second line]");
    }

    #[test]
    fn empty_everything_yields_failure_marker() {
        let (body, strategy) = compose_body("", "", &OcrOutcome::Text(String::new()));
        assert_eq!(strategy, Strategy::Failed);
        assert_eq!(body, "[TEXT EXTRACTION FAILED FOR THIS PAGE]");
    }

    #[test]
    fn empty_ocr_with_digital_text_stays_digital() {
        let (body, strategy) = compose_body("Fig. 3", "", &OcrOutcome::Text(String::new()));
        assert_eq!(strategy, Strategy::Digital);
        assert_eq!(body, "[DIGITAL TEXT]\nFig. 3");
    }
}
