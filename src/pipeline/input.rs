//! Input resolution: validate a user-supplied path before pdfium sees it.
//!
//! pdfium error messages for a missing or non-PDF file are opaque, so we
//! check existence, readability, and the `%PDF` magic bytes up front and
//! return a meaningful [`ExtractError`] instead of a parser crash.

use crate::error::ExtractError;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolve a local file path, validating existence and PDF magic bytes.
pub fn resolve_local(path: &Path) -> Result<PathBuf, ExtractError> {
    if !path.exists() {
        return Err(ExtractError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    match std::fs::File::open(path) {
        Ok(mut f) => {
            let mut magic = [0u8; 4];
            match f.read_exact(&mut magic) {
                Ok(()) if &magic != b"%PDF" => {
                    return Err(ExtractError::NotAPdf {
                        path: path.to_path_buf(),
                        magic,
                    });
                }
                Ok(()) => {}
                // Shorter than 4 bytes cannot be a PDF either.
                Err(_) => {
                    return Err(ExtractError::NotAPdf {
                        path: path.to_path_buf(),
                        magic: [0u8; 4],
                    });
                }
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(ExtractError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(ExtractError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
    }

    debug!("Resolved local PDF: {}", path.display());
    Ok(path.to_path_buf())
}
