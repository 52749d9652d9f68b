//! Extraction pipeline stages.
//!
//! Stages are small and composable: [`input`] validates the source file,
//! [`text`], [`tables`] and [`ocr`] each recover one kind of content from a
//! single page, [`bounded`] wraps their blocking pdfium/tesseract calls in a
//! per-call time budget, and [`page`] sequences them into the fallback
//! ladder that [`crate::extract`] drives across the document.

pub mod bounded;
pub mod input;
pub mod ocr;
pub mod page;
pub mod tables;
pub mod text;
