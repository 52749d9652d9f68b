//! Configuration for PDF text extraction.
//!
//! All extraction behaviour is controlled through [`ExtractionConfig`], built
//! via its [`ExtractionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share configs across calls, serialise them for logging, and
//! diff two runs to understand why their outputs differ. There is no global
//! mutable state anywhere in the crate: the config is passed in explicitly.

use crate::error::ExtractError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for one document extraction.
///
/// Built via [`ExtractionConfig::builder()`] or using
/// [`ExtractionConfig::default()`].
///
/// # Example
/// ```rust
/// use specread::ExtractionConfig;
///
/// let config = ExtractionConfig::builder()
///     .ocr_dpi(300)
///     .max_pages(100)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Minimum sanitised character count for digital text to be deemed
    /// sufficient. Default: 50.
    ///
    /// Below this the page is treated as effectively image-only and OCR is
    /// attempted. The value is a heuristic carried over from production use,
    /// not a hard semantic: a page of 49 real characters merely costs one
    /// redundant OCR pass.
    pub min_text_len: usize,

    /// Rasterisation resolution for the OCR fallback, in DPI. Default: 200.
    ///
    /// 200 DPI keeps tesseract accurate on normal body text while bounding
    /// the bitmap to a few megabytes per page. Raise to 300 for small-font
    /// scans; each step up roughly doubles OCR time and memory.
    pub ocr_dpi: u32,

    /// Per-page time budget for digital text and table extraction, in
    /// seconds. Default: 15.
    ///
    /// pdfium calls are blocking and do not check for cancellation, so the
    /// budget is enforced by abandoning the worker (see
    /// [`crate::pipeline::bounded`]). A page that blows the budget falls
    /// through to OCR.
    pub text_timeout_secs: u64,

    /// Per-page OCR time budget in seconds. Default: 30.
    ///
    /// Longer than the digital budget because rasterise-plus-recognise is
    /// legitimately slow on dense pages. On expiry the page gets an inline
    /// timeout marker instead of text.
    pub ocr_timeout_secs: u64,

    /// Maximum number of pages processed per document. Default: unlimited.
    ///
    /// When hit, extraction stops and a trailing note records how many pages
    /// were skipped and the document's true total.
    pub max_pages: Option<usize>,

    /// Maximum character budget for the assembled output. Default: unlimited.
    ///
    /// When exceeded, the output is cut at the budget and a truncation marker
    /// is appended, so downstream consumers can see that data is missing.
    pub max_chars: Option<usize>,

    /// Tesseract language code for the OCR fallback. Default: "eng".
    pub ocr_language: String,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_text_len: 50,
            ocr_dpi: 200,
            text_timeout_secs: 15,
            ocr_timeout_secs: 30,
            max_pages: None,
            max_chars: None,
            ocr_language: "eng".to_string(),
            password: None,
        }
    }
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Digital text / table extraction budget as a [`Duration`].
    pub fn text_timeout(&self) -> Duration {
        Duration::from_secs(self.text_timeout_secs)
    }

    /// OCR budget as a [`Duration`].
    pub fn ocr_timeout(&self) -> Duration {
        Duration::from_secs(self.ocr_timeout_secs)
    }
}

/// Builder for [`ExtractionConfig`].
#[derive(Debug)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn min_text_len(mut self, n: usize) -> Self {
        self.config.min_text_len = n;
        self
    }

    pub fn ocr_dpi(mut self, dpi: u32) -> Self {
        self.config.ocr_dpi = dpi.clamp(72, 600);
        self
    }

    pub fn text_timeout_secs(mut self, secs: u64) -> Self {
        self.config.text_timeout_secs = secs.max(1);
        self
    }

    pub fn ocr_timeout_secs(mut self, secs: u64) -> Self {
        self.config.ocr_timeout_secs = secs.max(1);
        self
    }

    pub fn max_pages(mut self, n: usize) -> Self {
        self.config.max_pages = Some(n);
        self
    }

    pub fn max_chars(mut self, n: usize) -> Self {
        self.config.max_chars = Some(n);
        self
    }

    pub fn ocr_language(mut self, lang: impl Into<String>) -> Self {
        self.config.ocr_language = lang.into();
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, ExtractError> {
        let c = &self.config;
        if c.ocr_dpi < 72 || c.ocr_dpi > 600 {
            return Err(ExtractError::InvalidConfig(format!(
                "OCR DPI must be 72-600, got {}",
                c.ocr_dpi
            )));
        }
        if c.max_pages == Some(0) {
            return Err(ExtractError::InvalidConfig(
                "max_pages must be >= 1 when set".into(),
            ));
        }
        if c.max_chars == Some(0) {
            return Err(ExtractError::InvalidConfig(
                "max_chars must be >= 1 when set".into(),
            ));
        }
        if c.ocr_language.is_empty() {
            return Err(ExtractError::InvalidConfig(
                "ocr_language must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = ExtractionConfig::default();
        assert_eq!(c.min_text_len, 50);
        assert_eq!(c.ocr_dpi, 200);
        assert_eq!(c.text_timeout(), Duration::from_secs(15));
        assert_eq!(c.ocr_timeout(), Duration::from_secs(30));
        assert!(c.max_pages.is_none());
        assert!(c.max_chars.is_none());
        assert_eq!(c.ocr_language, "eng");
    }

    #[test]
    fn builder_clamps_dpi() {
        let c = ExtractionConfig::builder().ocr_dpi(10_000).build().unwrap();
        assert_eq!(c.ocr_dpi, 600);
        let c = ExtractionConfig::builder().ocr_dpi(10).build().unwrap();
        assert_eq!(c.ocr_dpi, 72);
    }

    #[test]
    fn builder_rejects_zero_caps() {
        assert!(ExtractionConfig::builder().max_pages(0).build().is_err());
        assert!(ExtractionConfig::builder().max_chars(0).build().is_err());
    }

    #[test]
    fn builder_sets_fields() {
        let c = ExtractionConfig::builder()
            .min_text_len(80)
            .max_pages(25)
            .max_chars(100_000)
            .ocr_language("deu")
            .password("hunter2")
            .build()
            .unwrap();
        assert_eq!(c.min_text_len, 80);
        assert_eq!(c.max_pages, Some(25));
        assert_eq!(c.max_chars, Some(100_000));
        assert_eq!(c.ocr_language, "deu");
        assert_eq!(c.password.as_deref(), Some("hunter2"));
    }

    #[test]
    fn timeout_floor_is_one_second() {
        let c = ExtractionConfig::builder()
            .text_timeout_secs(0)
            .ocr_timeout_secs(0)
            .build()
            .unwrap();
        assert_eq!(c.text_timeout_secs, 1);
        assert_eq!(c.ocr_timeout_secs, 1);
    }
}
