//! # specread
//!
//! Recover text from engineering PDFs for compliance review.
//!
//! ## Why this crate?
//!
//! Vendor submittals and requirements specs arrive as PDFs of every vintage:
//! clean digital exports, table-heavy spec sheets, and flatbed scans of
//! faxed datasheets. A single extraction strategy fails on at least one of
//! those. This crate runs a fallback ladder per page — digital text, then
//! table recovery, then OCR — under per-page time budgets, and normalises
//! everything to a safe ASCII subset so the output can be embedded in any
//! downstream transport without encoding surprises.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input     validate path + %PDF magic
//!  ├─ 2. Per page  digital text ──sufficient──▶ + tables
//!  │                    │
//!  │               insufficient / timed out
//!  │                    ▼
//!  │               rasterise + OCR (bounded, tesseract)
//!  ├─ 3. Sanitise  transliterate to printable ASCII, collapse whitespace
//!  └─ 4. Assemble  page-delimited blob + metadata + per-page stats
//! ```
//!
//! Failures stay local: a page that defeats every strategy contributes an
//! inline marker like `[OCR TIMED OUT FOR THIS PAGE]` instead of aborting
//! the document. Only an unopenable file or a fully empty document is fatal.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use specread::{extract, ExtractionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExtractionConfig::default();
//!     let output = extract("submittal.pdf", &config).await?;
//!     println!("{}", output.text);
//!     eprintln!("{} of {} pages via OCR",
//!         output.stats.ocr_pages,
//!         output.stats.processed_pages);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `specread` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! specread = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod sanitize;
pub mod validate;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ExtractionConfig, ExtractionConfigBuilder};
pub use error::{ExtractError, PageFailure};
pub use extract::{extract, extract_sync, extract_to_file, inspect};
pub use output::{DocumentMetadata, DocumentText, ExtractionStats, PageText, Strategy};
pub use sanitize::sanitize;
pub use validate::{looks_like_engineering_text, ContentCheck, ENGINEERING_TERMS};
