use crate::model::{Alignment, Quote, Rgb};

use crate::fonts::font;

use super::text::fit_size;
use super::{DrawOp, LayoutConfig, Page, TextStyle};

const FOOTER_FILL: Rgb = Rgb(0x1e, 0x29, 0x3b);
const FOOTER_TEXT: Rgb = Rgb(0x94, 0xa3, 0xb8);
const FOOTER_SIZE: f32 = 8.0;

/// The two fixed legal lines printed at the bottom of every page.
#[derive(Clone, Debug, PartialEq)]
pub struct FooterText {
    pub line1: String,
    pub line2: String,
}

impl FooterText {
    pub fn from_quote(quote: &Quote) -> Self {
        let legal = &quote.issuer.legal;
        Self {
            line1: format!(
                "({}) - SIRET: {} - RCS/RM: {}",
                legal.legal_form, legal.siret, legal.rcs
            ),
            line2: format!(
                "APE: {} - Capital: {}{} - TVA: {}",
                legal.ape_code,
                legal.share_capital,
                quote.currency.symbol(),
                legal.vat_number
            ),
        }
    }
}

fn text_op(x: f32, y: f32, style: TextStyle, text: String) -> DrawOp {
    DrawOp::Text {
        x,
        y,
        size: style.size,
        weight: style.weight,
        color: style.color,
        align: style.align,
        text,
    }
}

/// Append the footer band, legal lines and "Page i / N" to every page.
///
/// Must run after layout, once the page count is final. Pages that already
/// carry a footer are left untouched, so a second call never duplicates text.
pub fn stamp_footers(mut pages: Vec<Page>, footer: &FooterText, config: &LayoutConfig) -> Vec<Page> {
    let total = pages.len();
    let band_top = config.page_height - config.footer_height();
    let centre = config.page_width / 2.0;
    let style = TextStyle::new(FOOTER_SIZE, FOOTER_TEXT).aligned(Alignment::Center);

    // Legal lines are centred between the margins and clear of the page label.
    let widest_label =
        font(style.weight).text_width(&format!("Page {total} / {total}"), FOOTER_SIZE);
    let line_width = config.content_width() - 2.0 * (widest_label + 2.0);
    let fitted = |text: &str| TextStyle {
        size: fit_size(text, style.weight, style.size, line_width),
        ..style
    };
    let line1_style = fitted(&footer.line1);
    let line2_style = fitted(&footer.line2);

    for (i, page) in pages.iter_mut().enumerate() {
        if page.footer_stamped {
            log::warn!("page {} already has a footer, skipping", page.index);
            continue;
        }
        let page_number = i + 1;
        debug_assert_eq!(page.index, page_number);

        page.ops.push(DrawOp::Rect {
            x: 0.0,
            y: band_top,
            width: config.page_width,
            height: config.footer_height(),
            radius: 0.0,
            fill: Some(FOOTER_FILL),
            stroke: None,
        });
        page.ops.push(text_op(centre, band_top + 4.0, line1_style, footer.line1.clone()));
        page.ops.push(text_op(centre, band_top + 8.0, line2_style, footer.line2.clone()));
        page.ops.push(text_op(
            config.right_edge() - 1.0,
            band_top + 6.0,
            style.aligned(Alignment::Right),
            format!("Page {page_number} / {total}"),
        ));
        page.footer_stamped = true;
    }

    log::debug!("stamped footers on {total} page(s)");
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Flow;

    fn footer() -> FooterText {
        FooterText {
            line1: "(SARL) - SIRET: 1 - RCS/RM: x".into(),
            line2: "APE: 1 - Capital: 1€ - TVA: FR1".into(),
        }
    }

    #[test]
    fn every_page_gets_its_number_and_the_total() {
        let config = LayoutConfig::default();
        let pages = Flow::new(&config).break_page().break_page().finish();
        let pages = stamp_footers(pages, &footer(), &config);
        for (i, page) in pages.iter().enumerate() {
            let marker = format!("Page {} / 3", i + 1);
            assert!(page.texts().any(|t| t == marker), "missing {marker}");
            assert!(page.has_footer());
        }
    }

    #[test]
    fn stamping_twice_does_not_duplicate() {
        let config = LayoutConfig::default();
        let pages = Flow::new(&config).break_page().finish();
        let once = stamp_footers(pages, &footer(), &config);
        let twice = stamp_footers(once.clone(), &footer(), &config);
        assert_eq!(once, twice);
    }

    #[test]
    fn long_legal_lines_stay_inside_the_margins() {
        let config = LayoutConfig::default();
        let footer = FooterText {
            line1: format!(
                "(Société par actions simplifiée) - SIRET: 12345678901234 - RCS/RM: {}",
                "RCS Paris ".repeat(12)
            ),
            line2: "APE: 4334Z - Capital: 10 000€ - TVA: FR12345678901".into(),
        };
        let pages = stamp_footers(Flow::new(&config).finish(), &footer, &config);
        for op in pages[0].ops() {
            if let DrawOp::Text { x, size, weight, align, text, .. } = op {
                let width = font(*weight).text_width(text, *size);
                let (left, right) = match align {
                    Alignment::Left => (*x, x + width),
                    Alignment::Center => (x - width / 2.0, x + width / 2.0),
                    Alignment::Right => (x - width, *x),
                };
                assert!(left >= config.margin_x - 1e-3, "{text}: starts at {left}");
                assert!(right <= config.right_edge() + 1e-3, "{text}: ends at {right}");
            }
        }
        let shrunk = pages[0].ops().iter().any(|op| {
            matches!(op, DrawOp::Text { size, text, .. } if text.starts_with("(Soci") && *size < FOOTER_SIZE)
        });
        assert!(shrunk);
    }
}
