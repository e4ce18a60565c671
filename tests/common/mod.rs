#![allow(dead_code)]

use std::path::PathBuf;

use chrono::NaiveDate;
use devis_pdf::{LineItem, Quote, RenderOptions};

/// Render date used by every test, so validity notices never drift.
pub fn render_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 22).unwrap()
}

pub fn options() -> RenderOptions {
    RenderOptions::new(render_date())
}

/// The two-line quote from the editor's default data.
pub fn sample_quote() -> Quote {
    Quote::sample(render_date())
}

/// Sample quote with `n` generated line items replacing the defaults.
pub fn quote_with_rows(n: usize) -> Quote {
    let mut quote = sample_quote();
    quote.line_items = (0..n)
        .map(|i| {
            LineItem::new(
                format!("Prestation {:02}", i + 1),
                (i % 7 + 1) as f64,
                "h",
                35.0 + i as f64,
                20.0,
            )
        })
        .collect();
    quote
}

/// Fresh, empty scratch directory: tests/output/<name>/
pub fn output_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("tests/output").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("create output dir");
    dir
}

/// Count non-overlapping occurrences of `needle` in `haystack`.
pub fn count_occurrences(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}
