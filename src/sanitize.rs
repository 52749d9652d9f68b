//! Text sanitisation: map arbitrary extracted text to a portable ASCII subset.
//!
//! ## Why so aggressive?
//!
//! PDF text layers and OCR output are full of typographic punctuation,
//! combining marks, zero-width controls, and box-drawing alignment characters
//! that survive extraction. Downstream the text is embedded verbatim in an
//! HTTP request body, so anything outside printable ASCII is a liability —
//! one stray U+2019 has been enough to corrupt a whole payload. Rather than
//! chase individual offenders we transliterate what has an obvious ASCII
//! rendering and drop everything else.
//!
//! ## Pass Order
//!
//! Order matters: canonical decomposition must run before the ASCII filter so
//! accented letters lose only their combining marks (é → e, not é → nothing),
//! and the symbol table must run before the filter so we transliterate rather
//! than silently delete. Whitespace normalisation runs last, over the output
//! of every earlier pass.
//!
//! The function is pure, total, and idempotent: `sanitize(sanitize(s)) ==
//! sanitize(s)` for every input, and every output byte is `\n`, `\t`, or
//! within 0x20–0x7E.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static RE_SPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());
static RE_BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Sanitise arbitrary text down to printable ASCII plus `\n` and `\t`.
///
/// Passes (in order):
/// 1. Normalise line endings (CRLF / lone CR → LF)
/// 2. Unicode canonical decomposition (NFD)
/// 3. Transliterate known punctuation, symbol, and Greek code points
/// 4. Drop zero-width controls; map line/paragraph separators to `\n`;
///    drop box-drawing characters
/// 5. Strip every remaining character outside `\n`, `\t`, 0x20–0x7E
/// 6. Collapse space/tab runs, cap consecutive blank lines, trim each line,
///    trim the whole string
pub fn sanitize(input: &str) -> String {
    let unified = input.replace("\r\n", "\n").replace('\r', "\n");

    let mut out = String::with_capacity(unified.len());
    for ch in unified.nfd() {
        match transliterate(ch) {
            Mapped::Keep => out.push(ch),
            Mapped::Replace(s) => out.push_str(s),
            Mapped::Drop => {}
        }
    }

    normalize_whitespace(&out)
}

enum Mapped {
    /// Printable ASCII (or `\n`/`\t`): passes through unchanged.
    Keep,
    Replace(&'static str),
    Drop,
}

/// Fixed transliteration table for one decomposed character.
///
/// The punctuation entries mirror what shows up in real spec sheets:
/// smart quotes, dashes, degree signs, vulgar fractions, primes used as
/// feet/inch marks. The Greek/math entries cover the symbols engineering
/// datasheets actually use; anything rarer is simply dropped by the final
/// filter.
fn transliterate(ch: char) -> Mapped {
    match ch {
        '\n' | '\t' => Mapped::Keep,
        ' '..='~' => Mapped::Keep,

        // Quotes and primes
        '\u{2018}' | '\u{2019}' | '\u{2032}' => Mapped::Replace("'"),
        '\u{201C}' | '\u{201D}' | '\u{2033}' => Mapped::Replace("\""),

        // Dashes, ellipsis, minus
        '\u{2013}' => Mapped::Replace("-"),
        '\u{2014}' => Mapped::Replace("--"),
        '\u{2026}' => Mapped::Replace("..."),
        '\u{2212}' => Mapped::Replace("-"),

        // Units and fractions
        '\u{00B0}' => Mapped::Replace(" degrees"),
        '\u{00BD}' => Mapped::Replace("1/2"),
        '\u{00BC}' => Mapped::Replace("1/4"),
        '\u{00BE}' => Mapped::Replace("3/4"),

        // Bullets
        '\u{2022}' | '\u{00B7}' | '\u{25CF}' | '\u{25A0}' => Mapped::Replace("*"),

        // Math operators and relations
        '\u{00D7}' => Mapped::Replace("x"),
        '\u{00F7}' => Mapped::Replace("/"),
        '\u{00B1}' => Mapped::Replace("+/-"),
        '\u{2264}' => Mapped::Replace("<="),
        '\u{2265}' => Mapped::Replace(">="),
        '\u{2260}' => Mapped::Replace("!="),
        '\u{2248}' => Mapped::Replace("~"),

        // Greek letters common in datasheets
        '\u{0394}' | '\u{2206}' => Mapped::Replace("delta"),
        '\u{03A9}' | '\u{2126}' => Mapped::Replace("ohms"),
        '\u{03BC}' | '\u{00B5}' => Mapped::Replace("u"),
        '\u{03C0}' => Mapped::Replace("pi"),
        '\u{03C3}' => Mapped::Replace("sigma"),
        '\u{03C6}' | '\u{03D5}' => Mapped::Replace("phi"),

        // Spacing characters
        '\u{00A0}' | '\u{2007}' | '\u{202F}' => Mapped::Replace(" "),

        // Zero-width controls and soft hyphen
        '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}' | '\u{00AD}' => Mapped::Drop,

        // Line/paragraph separators are semantically line breaks
        '\u{2028}' | '\u{2029}' | '\u{0085}' => Mapped::Replace("\n"),

        // Box drawing: alignment noise from layout-preserving extractors
        '\u{2500}'..='\u{257F}' => Mapped::Drop,

        // Everything else (combining marks included) falls to the filter
        _ => Mapped::Drop,
    }
}

/// Collapse horizontal whitespace runs, cap blank-line runs at one blank
/// line, and trim every line plus the whole string.
fn normalize_whitespace(input: &str) -> String {
    let collapsed = RE_SPACE_RUNS.replace_all(input, " ");
    let trimmed_lines: String = collapsed
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n");
    RE_BLANK_RUNS
        .replace_all(&trimmed_lines, "\n\n")
        .trim()
        .to_string()
}
