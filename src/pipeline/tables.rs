//! Table extraction: recover tabular data from text segment positions.
//!
//! Stream-mode detection: no reliance on ruled lines. Segments are grouped
//! into rows by Y position; a run of consecutive rows that each hold two or
//! more separate segments is treated as a table, and each row is rendered as
//! pipe-joined cells in X order. This recovers the common case — a spec
//! sheet's ratings grid — without attempting real layout analysis, which is
//! explicitly not this crate's job. Single-column prose never has multi-
//! segment rows, so it is left alone.

use pdfium_render::prelude::*;
use std::path::Path;

/// Vertical tolerance (PDF points) when grouping segments into rows.
/// Roughly half a line at common body-text sizes.
const ROW_Y_TOLERANCE: f32 = 5.0;

/// Minimum consecutive multi-cell rows to call the run a table.
const MIN_TABLE_ROWS: usize = 2;

/// One positioned piece of page text.
#[derive(Debug, Clone)]
pub struct Span {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

/// A detected table: rows of cell strings, top to bottom, left to right.
pub type Table = Vec<Vec<String>>;

/// Extract tables from one page (0-based index).
///
/// Blocking; intended to run under [`crate::pipeline::bounded::run_bounded`].
pub fn page_tables(path: &Path, password: Option<&str>, page_index: u16) -> Result<Vec<Table>, String> {
    let pdfium = Pdfium::default();
    let document = pdfium
        .load_pdf_from_file(path, password)
        .map_err(|e| format!("{e:?}"))?;
    let pages = document.pages();
    let page = pages.get(page_index).map_err(|e| format!("{e:?}"))?;
    let text = page.text().map_err(|e| format!("{e:?}"))?;

    let spans: Vec<Span> = text
        .segments()
        .iter()
        .map(|segment| {
            let bounds = segment.bounds();
            Span {
                text: segment.text(),
                x: bounds.left().value,
                y: bounds.top().value,
            }
        })
        .collect();

    Ok(detect_tables(spans))
}

/// Detect tables from positioned spans.
///
/// Pure geometry, separated from pdfium so the algorithm is testable with
/// synthetic spans.
pub fn detect_tables(spans: Vec<Span>) -> Vec<Table> {
    let rows = group_into_rows(spans);

    let mut tables = Vec::new();
    let mut run: Vec<Vec<String>> = Vec::new();

    for row in rows {
        if row.len() >= 2 {
            run.push(row_cells(row));
        } else {
            flush_run(&mut run, &mut tables);
        }
    }
    flush_run(&mut run, &mut tables);

    tables
}

fn flush_run(run: &mut Vec<Vec<String>>, tables: &mut Vec<Table>) {
    if run.len() >= MIN_TABLE_ROWS {
        tables.push(std::mem::take(run));
    } else {
        run.clear();
    }
}

/// Group spans into rows by Y position (descending, PDF coordinates), each
/// row sorted by X.
fn group_into_rows(mut spans: Vec<Span>) -> Vec<Vec<Span>> {
    spans.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut rows: Vec<Vec<Span>> = Vec::new();
    let mut current: Vec<Span> = Vec::new();
    let mut current_y: Option<f32> = None;

    for span in spans {
        match current_y {
            Some(y) if (span.y - y).abs() <= ROW_Y_TOLERANCE => current.push(span),
            _ => {
                if !current.is_empty() {
                    rows.push(std::mem::take(&mut current));
                }
                current_y = Some(span.y);
                current.push(span);
            }
        }
    }
    if !current.is_empty() {
        rows.push(current);
    }

    for row in &mut rows {
        row.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
    }
    rows
}

/// Render one row's spans as trimmed cell strings. Whitespace-only segments
/// become empty cells rather than disappearing, so column positions survive.
fn row_cells(row: Vec<Span>) -> Vec<String> {
    row.into_iter().map(|s| s.text.trim().to_string()).collect()
}

/// Render detected tables as numbered, pipe-joined text blocks.
pub fn render_tables(tables: &[Table]) -> String {
    let mut out = String::new();
    for (i, table) in tables.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("Table {}:\n", i + 1));
        for row in table {
            out.push_str(&row.join(" | "));
            out.push('\n');
        }
    }
    out.trim_end_matches('\n').to_string()
}
