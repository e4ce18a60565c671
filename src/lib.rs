mod error;
mod fonts;
pub mod layout;
mod model;
mod pdf;
mod totals;
mod validate;

pub use error::Error;
pub use layout::{
    DrawOp, FooterText, LaidOutDocument, LayoutConfig, Page, RenderOptions, StampedDocument,
    TableOutcome, TableStyle, layout_quote, needs_break, stamp_footers,
};
pub use model::{
    Alignment, Client, Currency, DiscountState, FontWeight, Issuer, LegalInfo, LineItem, Quantity,
    Quote, Rgb, Terms,
};
pub use pdf::{DocumentInfo, write_pdf};
pub use totals::{Totals, compute_totals};
pub use validate::validate_quote;

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Input file shape: a quote plus its discount.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteInput {
    pub quote: Quote,
    #[serde(default)]
    pub discount: DiscountState,
}

/// Result of one render call.
#[derive(Clone, Debug)]
pub struct RenderedQuote {
    pub bytes: Vec<u8>,
    pub totals: Totals,
    pub page_count: usize,
}

/// `quote-<id>.pdf`, with path separators in the id replaced.
pub fn output_file_name(quote: &Quote) -> String {
    let id: String = quote
        .id
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect();
    format!("quote-{id}.pdf")
}

/// Validate, compute totals, lay out, stamp footers and serialize.
/// Nothing is produced unless every stage succeeds.
pub fn render_quote(
    quote: &Quote,
    discount: &DiscountState,
    options: &RenderOptions,
) -> Result<RenderedQuote, Error> {
    let t0 = Instant::now();

    validate_quote(quote, discount)?;
    let totals = compute_totals(&quote.line_items, discount);

    let laid_out = layout_quote(quote, &totals, options);
    let t_layout = t0.elapsed();

    let stamped = laid_out.stamp_footers(quote);
    let info = DocumentInfo {
        title: format!("Devis {}", quote.id),
        author: quote.issuer.name.clone(),
    };
    let bytes = write_pdf(&stamped, &info)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: layout={:.1}ms, write={:.1}ms, total={:.1}ms ({} pages, {} bytes)",
        t_layout.as_secs_f64() * 1000.0,
        (t_total - t_layout).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        stamped.page_count(),
        bytes.len(),
    );

    Ok(RenderedQuote {
        bytes,
        totals,
        page_count: stamped.page_count(),
    })
}

/// Read a [`QuoteInput`] from a JSON file.
pub fn read_quote_input(path: &Path) -> Result<QuoteInput, Error> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        Error::Io(std::io::Error::new(e.kind(), format!("{}: {}", e, path.display())))
    })?;
    Ok(serde_json::from_str(&text)?)
}

/// Render and write `quote-<id>.pdf` into `dir`. The file appears only once
/// the whole document has been written.
pub fn save_quote_pdf(
    quote: &Quote,
    discount: &DiscountState,
    options: &RenderOptions,
    dir: &Path,
) -> Result<PathBuf, Error> {
    let rendered = render_quote(quote, discount, options)?;
    let output = dir.join(output_file_name(quote));
    write_pdf_file(&output, &rendered.bytes)?;
    Ok(output)
}

/// Write PDF bytes through a temporary sibling file, so a failure never
/// leaves a truncated document at `output`.
pub fn write_pdf_file(output: &Path, bytes: &[u8]) -> Result<(), Error> {
    let tmp = output.with_extension("pdf.part");
    std::fs::write(&tmp, bytes)?;
    if let Err(e) = std::fs::rename(&tmp, output) {
        let _ = std::fs::remove_file(&tmp);
        return Err(Error::Io(e));
    }
    Ok(())
}
