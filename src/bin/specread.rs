//! CLI binary for specread.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ExtractionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use specread::{
    extract, extract_to_file, inspect, looks_like_engineering_text, ExtractionConfig,
};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic extraction (stdout)
  specread submittal.pdf

  # Extract to file
  specread submittal.pdf -o submittal.txt

  # Scanned document: higher OCR resolution, German recognition
  specread --ocr-dpi 300 --ocr-language deu scan.pdf

  # Cap work on huge documents
  specread --max-pages 50 --max-chars 200000 catalog.pdf

  # Inspect PDF metadata (no extraction)
  specread --inspect-only submittal.pdf

  # Structured JSON output with per-page detail
  specread --json submittal.pdf > submittal.json

  # Warn when the text does not look like engineering content
  specread --validate submittal.pdf -o out.txt

OCR:
  Scanned pages fall back to the system `tesseract` binary. Install it with
  your package manager (e.g. apt install tesseract-ocr) and add language
  packs for anything beyond English (e.g. tesseract-ocr-deu).

ENVIRONMENT VARIABLES:
  SPECREAD_OUTPUT        Default output path (same as -o)
  SPECREAD_PASSWORD      PDF user password
  RUST_LOG               Tracing filter (overrides -v/-q)
  PDFIUM_LIB_PATH        Path to an existing libpdfium
"#;

/// Extract ASCII-safe text from engineering PDFs.
#[derive(Parser, Debug)]
#[command(
    name = "specread",
    version,
    about = "Extract ASCII-safe text from engineering PDFs",
    long_about = "Extract text from PDF documents using a per-page fallback ladder: embedded \
digital text, table recovery, then OCR via tesseract. Output is normalised to printable \
ASCII with explicit page delimiters and inline markers wherever a page resisted recovery.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the PDF file.
    input: PathBuf,

    /// Write extracted text to this file instead of stdout.
    #[arg(short, long, env = "SPECREAD_OUTPUT")]
    output: Option<PathBuf>,

    /// Minimum digital-text length (chars) before the OCR fallback kicks in.
    #[arg(long, default_value_t = 50)]
    min_text_len: usize,

    /// OCR rasterisation resolution (72-600 DPI).
    #[arg(long, default_value_t = 200,
          value_parser = clap::value_parser!(u32).range(72..=600))]
    ocr_dpi: u32,

    /// Tesseract language code for the OCR fallback.
    #[arg(long, default_value = "eng")]
    ocr_language: String,

    /// Per-page digital text / table extraction timeout in seconds.
    #[arg(long, default_value_t = 15)]
    text_timeout: u64,

    /// Per-page OCR timeout in seconds.
    #[arg(long, default_value_t = 30)]
    ocr_timeout: u64,

    /// Maximum number of pages to process.
    #[arg(long)]
    max_pages: Option<usize>,

    /// Maximum output size in characters (truncation is marked inline).
    #[arg(long)]
    max_chars: Option<usize>,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "SPECREAD_PASSWORD")]
    password: Option<String>,

    /// Output structured JSON (DocumentText) instead of plain text.
    #[arg(long)]
    json: bool,

    /// Print PDF metadata only, no extraction.
    #[arg(long)]
    inspect_only: bool,

    /// Check the result for engineering vocabulary and warn if absent.
    #[arg(long)]
    validate: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let meta = inspect(&cli.input).await.context("Failed to inspect PDF")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&meta).context("Failed to serialise metadata")?
            );
        } else {
            println!("File:         {}", cli.input.display());
            if let Some(ref t) = meta.title {
                println!("Title:        {}", t);
            }
            if let Some(ref a) = meta.author {
                println!("Author:       {}", a);
            }
            if let Some(ref s) = meta.subject {
                println!("Subject:      {}", s);
            }
            println!("Pages:        {}", meta.page_count);
            println!("PDF Version:  {}", meta.pdf_version);
            if let Some(ref p) = meta.producer {
                println!("Producer:     {}", p);
            }
            if let Some(ref c) = meta.creator {
                println!("Creator:      {}", c);
            }
        }
        return Ok(());
    }

    let config = build_config(&cli)?;

    // ── Run extraction ───────────────────────────────────────────────────
    if cli.validate || cli.json || cli.output.is_none() {
        let output = extract(&cli.input, &config)
            .await
            .context("Extraction failed")?;

        if cli.validate && !looks_like_engineering_text(&output.text) {
            tracing::warn!(
                "extracted text does not look like engineering content \
                 (too short or too few recognised terms)"
            );
        }

        if let Some(ref output_path) = cli.output {
            // Re-running extract_to_file would extract twice; write directly.
            tokio::fs::write(output_path, &output.text)
                .await
                .with_context(|| format!("Failed to write {}", output_path.display()))?;
            print_summary(&cli, &output.stats, Some(output_path));
        } else if cli.json {
            let json =
                serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
            println!("{json}");
        } else {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(output.text.as_bytes())
                .context("Failed to write to stdout")?;
            if !output.text.ends_with('\n') {
                handle.write_all(b"\n").ok();
            }
            print_summary(&cli, &output.stats, None);
        }
    } else {
        let output_path = cli.output.as_ref().context("output path")?;
        let stats = extract_to_file(&cli.input, output_path, &config)
            .await
            .context("Extraction failed")?;
        print_summary(&cli, &stats, Some(output_path));
    }

    Ok(())
}

fn print_summary(cli: &Cli, stats: &specread::ExtractionStats, output_path: Option<&PathBuf>) {
    if cli.quiet || cli.json {
        return;
    }
    let dest = output_path
        .map(|p| format!("  ->  {}", p.display()))
        .unwrap_or_default();
    eprintln!(
        "Extracted {}/{} pages ({} via OCR, {} failed) in {}ms{}",
        stats.processed_pages - stats.failed_pages,
        stats.total_pages,
        stats.ocr_pages,
        stats.failed_pages,
        stats.total_duration_ms,
        dest,
    );
    if stats.skipped_pages > 0 {
        eprintln!("  {} pages skipped (page limit)", stats.skipped_pages);
    }
    if stats.truncated {
        eprintln!(
            "  output truncated at {} characters",
            cli.max_chars.unwrap_or_default()
        );
    }
}

/// Map CLI args to `ExtractionConfig`.
fn build_config(cli: &Cli) -> Result<ExtractionConfig> {
    let mut builder = ExtractionConfig::builder()
        .min_text_len(cli.min_text_len)
        .ocr_dpi(cli.ocr_dpi)
        .ocr_language(cli.ocr_language.clone())
        .text_timeout_secs(cli.text_timeout)
        .ocr_timeout_secs(cli.ocr_timeout);

    if let Some(n) = cli.max_pages {
        builder = builder.max_pages(n);
    }
    if let Some(n) = cli.max_chars {
        builder = builder.max_chars(n);
    }
    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd.clone());
    }

    builder.build().context("Invalid configuration")
}
