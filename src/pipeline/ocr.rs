//! OCR fallback: rasterize a page with pdfium and run the `tesseract` CLI.
//!
//! Shelling out to the system binary keeps the crate free of a native
//! leptonica/tesseract link-time dependency; the binary is probed lazily and
//! its absence surfaces as a page-level failure with an install hint, never
//! a crash.

use image::ImageFormat;
use pdfium_render::prelude::*;
use std::path::Path;
use std::process::Command;

/// Rasterize one page (0-based) and OCR it.
///
/// Blocking; intended to run under [`crate::pipeline::bounded::run_bounded`].
/// The raster lands in a scoped temp directory that is removed on return.
pub fn page_ocr(
    path: &Path,
    password: Option<&str>,
    page_index: u16,
    dpi: u32,
    language: &str,
) -> Result<String, String> {
    let dir = tempfile::tempdir().map_err(|e| format!("temp dir: {e}"))?;
    let image_path = dir.path().join(format!("page-{page_index}.png"));

    rasterize_page(path, password, page_index, dpi, &image_path)?;
    run_tesseract(&image_path, language)
}

/// Render the page to a PNG at the requested DPI.
fn rasterize_page(
    path: &Path,
    password: Option<&str>,
    page_index: u16,
    dpi: u32,
    out: &Path,
) -> Result<(), String> {
    let pdfium = Pdfium::default();
    let document = pdfium
        .load_pdf_from_file(path, password)
        .map_err(|e| format!("{e:?}"))?;
    let pages = document.pages();
    let page = pages.get(page_index).map_err(|e| format!("{e:?}"))?;

    let target_width = target_pixel_width(page.width().value, dpi);
    let config = PdfRenderConfig::new().set_target_width(target_width);
    let bitmap = page.render_with_config(&config).map_err(|e| format!("{e:?}"))?;

    bitmap
        .as_image()
        .save_with_format(out, ImageFormat::Png)
        .map_err(|e| format!("save raster: {e}"))?;
    Ok(())
}

/// Pixel width for a page of `width_points` rendered at `dpi`.
/// PDF user space is 72 points per inch.
pub fn target_pixel_width(width_points: f32, dpi: u32) -> i32 {
    let px = (width_points * dpi as f32 / 72.0).round();
    px.max(1.0) as i32
}

/// Run tesseract on an image, returning recognized text.
///
/// `--psm 6` assumes a uniform block of text, which fits full-page scans of
/// spec sheets better than the default page segmentation.
fn run_tesseract(image: &Path, language: &str) -> Result<String, String> {
    let output = Command::new("tesseract")
        .arg(image)
        .arg("stdout")
        .args(["-l", language])
        .args(["--psm", "6"])
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                "tesseract not found (install tesseract-ocr)".to_string()
            } else {
                format!("tesseract: {e}")
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "tesseract exited with {}: {}",
            output.status,
            stderr.trim()
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_width_at_200_dpi() {
        // US Letter is 612 points wide; 612 * 200 / 72 = 1700.
        assert_eq!(target_pixel_width(612.0, 200), 1700);
    }

    #[test]
    fn a4_width_at_72_dpi_is_identity() {
        assert_eq!(target_pixel_width(595.0, 72), 595);
    }

    #[test]
    fn degenerate_width_clamps_to_one_pixel() {
        assert_eq!(target_pixel_width(0.0, 200), 1);
    }
}
