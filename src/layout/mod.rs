//! Quote page layout.
//!
//! Everything here works in millimetres measured from the top-left corner of
//! an A4 page. Layout is a pure function of the quote, its totals and the
//! render options: it produces pages made of [`DrawOp`]s, which the `pdf`
//! module serializes afterwards.

mod footer;
mod table;
mod text;

use chrono::{Days, Local, NaiveDate};

use crate::model::{Alignment, Currency, FontWeight, Quote, Rgb};
use crate::totals::Totals;

pub use footer::{FooterText, stamp_footers};
pub use table::{TableOutcome, TableStyle};

use table::layout_table;

use text::{fit_size, wrap_text};

const VIOLET: Rgb = Rgb(0x63, 0x66, 0xf1);
const LIGHT_GREY: Rgb = Rgb(0xf8, 0xfa, 0xfc);
const DARK_GREY: Rgb = Rgb(0x1e, 0x29, 0x3b);
const TEXT_GREY: Rgb = Rgb(0x47, 0x55, 0x69);
const AMBER_FILL: Rgb = Rgb(0xfe, 0xf3, 0xc7);
const AMBER_STROKE: Rgb = Rgb(0xf5, 0x9e, 0x0b);
const AMBER_TEXT: Rgb = Rgb(0x92, 0x40, 0x0e);
const RED: Rgb = Rgb(0xdc, 0x26, 0x26);
const SIGNATURE_BORDER: Rgb = Rgb(0xcb, 0xd5, 0xe1);

/// Page geometry and vertical rhythm, in millimetres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    /// Left and right margin bounding all content.
    pub margin_x: f32,
    /// Content may not extend below this line; the footer band starts here.
    pub bottom_limit: f32,
    /// Cursor position at the top of every continuation page.
    pub top_offset: f32,
    pub header_band_height: f32,
    /// Vertical space left between consecutive sections.
    pub section_gap: f32,
    pub totals_box_height: f32,
    pub signature_box_width: f32,
    pub signature_box_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margin_x: 14.0,
            bottom_limit: 287.0,
            top_offset: 20.0,
            header_band_height: 30.0,
            section_gap: 6.0,
            totals_box_height: 30.0,
            signature_box_width: 85.0,
            signature_box_height: 40.0,
        }
    }
}

impl LayoutConfig {
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin_x
    }

    pub fn right_edge(&self) -> f32 {
        self.page_width - self.margin_x
    }

    pub fn footer_height(&self) -> f32 {
        self.page_height - self.bottom_limit
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderOptions {
    /// Date printed in the validity notice. Fixed by callers that need
    /// reproducible output.
    pub render_date: NaiveDate,
    pub layout: LayoutConfig,
    pub table: TableStyle,
}

impl RenderOptions {
    pub fn new(render_date: NaiveDate) -> Self {
        Self {
            render_date,
            layout: LayoutConfig::default(),
            table: TableStyle::default(),
        }
    }

    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    pub width: f32,
    /// Dash length in mm; `None` draws a solid line.
    pub dash: Option<f32>,
}

/// One drawing primitive. `y` of a text op is its baseline; `x` is the
/// anchor the alignment refers to.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        size: f32,
        weight: FontWeight,
        color: Rgb,
        align: Alignment,
        text: String,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        radius: f32,
        fill: Option<Rgb>,
        stroke: Option<Stroke>,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Rgb,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    index: usize,
    ops: Vec<DrawOp>,
    cursor: f32,
    footer_stamped: bool,
}

impl Page {
    fn new(index: usize, cursor: f32) -> Self {
        Self {
            index,
            ops: Vec::new(),
            cursor,
            footer_stamped: false,
        }
    }

    /// 1-based position in the document.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// How far down the page content reaches.
    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    pub fn has_footer(&self) -> bool {
        self.footer_stamped
    }

    /// All text drawn on the page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// True when a block of `height` starting at `cursor` would cross the bottom
/// limit.
pub fn needs_break(cursor: f32, height: f32, config: &LayoutConfig) -> bool {
    cursor + height > config.bottom_limit
}

#[derive(Clone, Copy)]
pub(crate) struct TextStyle {
    size: f32,
    weight: FontWeight,
    color: Rgb,
    align: Alignment,
}

impl TextStyle {
    fn new(size: f32, color: Rgb) -> Self {
        Self {
            size,
            weight: FontWeight::Regular,
            color,
            align: Alignment::Left,
        }
    }

    fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    fn aligned(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }
}

/// Layout state threaded through every block: finished pages, the page being
/// filled, and its cursor. Blocks take the flow by value and hand it back.
pub(crate) struct Flow<'c> {
    config: &'c LayoutConfig,
    done: Vec<Page>,
    page: Page,
    page_top: f32,
}

impl<'c> Flow<'c> {
    pub(crate) fn new(config: &'c LayoutConfig) -> Self {
        Self {
            config,
            done: Vec::new(),
            page: Page::new(1, 0.0),
            page_top: 0.0,
        }
    }

    pub(crate) fn config(&self) -> &'c LayoutConfig {
        self.config
    }

    pub(crate) fn cursor(&self) -> f32 {
        self.page.cursor
    }

    pub(crate) fn page_index(&self) -> usize {
        self.page.index
    }

    fn at_page_top(&self) -> bool {
        (self.page.cursor - self.page_top).abs() < 0.01
    }

    /// Start a new page if `height` does not fit below the cursor. A block
    /// taller than a whole page is placed on the empty page regardless.
    pub(crate) fn ensure_room(self, height: f32) -> (Self, bool) {
        if !self.at_page_top() && needs_break(self.cursor(), height, self.config) {
            (self.break_page(), true)
        } else {
            (self, false)
        }
    }

    pub(crate) fn break_page(mut self) -> Self {
        let next = Page::new(self.page.index + 1, self.config.top_offset);
        let finished = std::mem::replace(&mut self.page, next);
        log::debug!(
            "page break after page {} (cursor {:.1}mm)",
            finished.index,
            finished.cursor
        );
        self.done.push(finished);
        self.page_top = self.config.top_offset;
        self
    }

    pub(crate) fn advance(mut self, dy: f32) -> Self {
        self.page.cursor += dy;
        self
    }

    pub(crate) fn move_to(mut self, y: f32) -> Self {
        self.page.cursor = y;
        self
    }

    pub(crate) fn push(&mut self, op: DrawOp) {
        self.page.ops.push(op);
    }

    pub(crate) fn text(&mut self, x: f32, y: f32, style: TextStyle, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.push(DrawOp::Text {
            x,
            y,
            size: style.size,
            weight: style.weight,
            color: style.color,
            align: style.align,
            text,
        });
    }

    pub(crate) fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        self.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            radius: 0.0,
            fill: Some(color),
            stroke: None,
        });
    }

    pub(crate) fn finish(mut self) -> Vec<Page> {
        self.done.push(self.page);
        self.done
    }
}

/// Pages produced by the layout pass, before footers are written.
#[derive(Clone, Debug)]
pub struct LaidOutDocument {
    pages: Vec<Page>,
    config: LayoutConfig,
}

impl LaidOutDocument {
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Second pass: write the legal footer and "Page i / N" on every page.
    /// Consumes the document, so footers can only be stamped once.
    pub fn stamp_footers(self, quote: &Quote) -> StampedDocument {
        let footer = FooterText::from_quote(quote);
        let pages = stamp_footers(self.pages, &footer, &self.config);
        StampedDocument {
            pages,
            config: self.config,
        }
    }
}

/// Final pages, footers included. The only document the PDF writer accepts.
#[derive(Clone, Debug)]
pub struct StampedDocument {
    pages: Vec<Page>,
    config: LayoutConfig,
}

impl StampedDocument {
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }
}

pub fn format_money(value: f64, currency: &Currency) -> String {
    format!("{:.2} {}", value, currency.symbol())
}

pub fn format_rate(rate: f64) -> String {
    format!("{:.0} %", rate)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Lay out every section of the quote. Footers are not written here.
pub fn layout_quote(quote: &Quote, totals: &Totals, options: &RenderOptions) -> LaidOutDocument {
    let config = &options.layout;
    let mut flow = Flow::new(config);

    flow = header_band(flow, quote);
    flow = party_blocks(flow, quote);
    flow = validity_notice(flow, quote, options.render_date);

    // The section title stays with the table header and first row.
    let title_h = 11.0;
    let lead = options
        .table
        .leading_height(&quote.line_items, &quote.currency, config);
    let (f, _) = flow.ensure_room(title_h + lead);
    flow = f;
    let top = flow.cursor();
    flow.text(
        config.margin_x,
        top + 9.0,
        TextStyle::new(12.0, DARK_GREY).bold(),
        "Prestations",
    );
    flow = flow.advance(title_h);

    let (f, outcome) = layout_table(flow, &quote.line_items, &quote.currency, &options.table);
    log::debug!(
        "table ends at {:.1}mm after {} page(s)",
        outcome.final_y,
        outcome.pages_used
    );
    flow = f.move_to(outcome.final_y + 2.0);

    flow = totals_box(flow, totals, &quote.currency);
    flow = conditions_and_signatures(flow, quote);

    let pages = flow.finish();
    log::info!("laid out quote {} on {} page(s)", quote.id, pages.len());
    LaidOutDocument {
        pages,
        config: *config,
    }
}

fn header_band<'c>(mut flow: Flow<'c>, quote: &Quote) -> Flow<'c> {
    let config = flow.config();
    let band_h = config.header_band_height;
    debug_assert_eq!(flow.page_index(), 1);

    flow.fill_rect(0.0, 0.0, config.page_width, band_h, VIOLET);
    let x = config.margin_x;
    let right = config.right_edge();
    // Each half of the band holds its own text.
    let half = config.content_width() / 2.0 - PARTY_GUTTER;
    flow.text(x, 15.0, TextStyle::new(22.0, Rgb::WHITE).bold(), "DEVIS");
    let name = quote.issuer.name.as_str();
    let name_size = fit_size(name, FontWeight::Regular, 12.0, half);
    flow.text(x, 23.0, TextStyle::new(name_size, Rgb::WHITE), name);

    let meta = TextStyle::new(10.0, Rgb::WHITE).aligned(Alignment::Right);
    let number = format!("N° {}", quote.id);
    let number_style = TextStyle {
        size: fit_size(&number, meta.weight, meta.size, half),
        ..meta
    };
    flow.text(right, 15.0, number_style, number);
    flow.text(right, 21.0, meta, format!("Date : {}", format_date(quote.date)));

    flow.move_to(band_h)
}

const PARTY_GUTTER: f32 = 5.0;

/// Wrap each field to the column width. Empty fields take no line.
fn party_lines(fields: &[&str], style: TextStyle, width: f32) -> Vec<String> {
    fields
        .iter()
        .flat_map(|field| wrap_text(field, style.weight, style.size, width))
        .collect()
}

/// "Entreprise" and "Client" side by side, each wrapped inside its column.
fn party_blocks<'c>(flow: Flow<'c>, quote: &Quote) -> Flow<'c> {
    let config = flow.config();
    let left = config.margin_x;
    let mid = config.page_width / 2.0 + PARTY_GUTTER;
    let columns = [(left, mid - left - PARTY_GUTTER), (mid, config.right_edge() - mid)];

    let body = TextStyle::new(10.0, TEXT_GREY);
    let issuer = party_lines(
        &[
            quote.issuer.name.as_str(),
            quote.issuer.address.as_str(),
            quote.issuer.phone.as_str(),
            quote.issuer.email.as_str(),
        ],
        body,
        columns[0].1,
    );
    let client = party_lines(
        &[quote.client.name.as_str(), quote.client.address.as_str()],
        body,
        columns[1].1,
    );
    let pitch = 5.0;
    let rows = issuer.len().max(client.len()).max(1) as f32;
    let height = 16.0 + (rows - 1.0) * pitch + 3.0;

    let (mut flow, _) = flow.ensure_room(height);
    let top = flow.cursor();

    let heading = TextStyle::new(12.0, DARK_GREY).bold();
    flow.text(columns[0].0, top + 10.0, heading, "Entreprise");
    flow.text(columns[1].0, top + 10.0, heading, "Client");

    for ((x, width), lines) in columns.into_iter().zip([issuer, client]) {
        for (i, line) in lines.into_iter().enumerate() {
            // A single word wider than the column is shrunk instead.
            let size = fit_size(&line, body.weight, body.size, width);
            let style = TextStyle::new(size, TEXT_GREY);
            flow.text(x, top + 16.0 + i as f32 * pitch, style, line);
        }
    }
    flow.advance(height)
}

fn validity_notice<'c>(flow: Flow<'c>, quote: &Quote, render_date: NaiveDate) -> Flow<'c> {
    let gap = 2.0;
    let box_h = 10.0;
    let (mut flow, _) = flow.ensure_room(gap + box_h);
    let config = flow.config();
    let top = flow.cursor() + gap;

    flow.push(DrawOp::Rect {
        x: config.margin_x,
        y: top,
        width: config.content_width(),
        height: box_h,
        radius: 2.0,
        fill: Some(AMBER_FILL),
        stroke: Some(Stroke {
            color: AMBER_STROKE,
            width: 0.2,
            dash: None,
        }),
    });

    let days = quote.terms.validity_days;
    let mut notice = format!(
        "Ce devis est valable {} jours à compter du {}",
        days,
        format_date(render_date)
    );
    if let Some(until) = render_date.checked_add_days(Days::new(days as u64)) {
        notice.push_str(&format!(" (jusqu'au {})", format_date(until)));
    }
    flow.text(
        config.margin_x + 6.0,
        top + 7.0,
        TextStyle::new(10.0, AMBER_TEXT),
        notice,
    );
    flow.advance(gap + box_h)
}

fn totals_box<'c>(flow: Flow<'c>, totals: &Totals, currency: &Currency) -> Flow<'c> {
    let config = flow.config();
    let (mut flow, _) = flow.ensure_room(config.totals_box_height);
    let top = flow.cursor();
    let x = config.margin_x + 6.0;

    flow.push(DrawOp::Rect {
        x: config.margin_x,
        y: top,
        width: config.content_width(),
        height: config.totals_box_height,
        radius: 2.0,
        fill: Some(LIGHT_GREY),
        stroke: None,
    });

    let body = TextStyle::new(10.0, TEXT_GREY);
    let mut line = top + 7.0;
    flow.text(
        x,
        line,
        body,
        format!(
            "Sous-total HT : {}",
            format_money(totals.total_excluding_tax, currency)
        ),
    );
    line += 6.0;
    if totals.discount_applied != 0.0 {
        flow.text(
            x,
            line,
            TextStyle::new(10.0, RED),
            format!("Remise : -{}", format_money(totals.discount_applied, currency)),
        );
        line += 6.0;
    }
    flow.text(
        x,
        line,
        body,
        format!("TVA : {}", format_money(totals.total_tax, currency)),
    );
    line += 8.0;
    flow.text(
        x,
        line,
        TextStyle::new(12.0, VIOLET).bold(),
        format!(
            "TOTAL TTC : {}",
            format_money(totals.total_including_tax, currency)
        ),
    );

    flow.advance(config.totals_box_height + config.section_gap)
}

fn condition_lines(quote: &Quote) -> Vec<String> {
    let t = &quote.terms;
    let decennial = if t.decennial_policy_number.is_empty() {
        t.decennial_insurance.clone()
    } else {
        format!("{} ({})", t.decennial_insurance, t.decennial_policy_number)
    };
    [
        ("Acompte", t.payment_terms.clone()),
        ("Délais", t.execution_delay.clone()),
        ("Lieu", t.execution_location.clone()),
        ("Pénalités de retard", t.late_payment_penalty.clone()),
        ("Assurance pro", t.professional_insurance.clone()),
        ("Assurance décennale", decennial),
        ("Zone géographique", t.coverage_area.clone()),
        ("CGV", t.general_terms.clone()),
    ]
    .into_iter()
    .filter(|(_, value)| !value.trim().is_empty())
    .map(|(label, value)| format!("• {label} : {value}"))
    .collect()
}

/// Conditions list and signature boxes. They share a page whenever the pair
/// fits on one; a longer list runs on line by line, keeping the heading with
/// its first bullet and the two signature boxes together.
fn conditions_and_signatures<'c>(flow: Flow<'c>, quote: &Quote) -> Flow<'c> {
    let config = flow.config();
    let bullet = TextStyle::new(9.0, TEXT_GREY);
    let pitch = 5.0;
    let indent = 3.0;
    let heading_h = 6.0;

    // (text, x offset) per printed line; continuation lines are indented.
    let mut printed: Vec<(String, f32)> = Vec::new();
    for entry in condition_lines(quote) {
        let wrapped = wrap_text(
            &entry,
            bullet.weight,
            bullet.size,
            config.content_width() - indent,
        );
        for (i, line) in wrapped.into_iter().enumerate() {
            printed.push((line, if i == 0 { 0.0 } else { indent }));
        }
    }

    let conditions_h = heading_h + printed.len() as f32 * pitch;
    let signature_h = SIGNATURE_GAP + config.signature_box_height;
    let page_room = config.bottom_limit - config.top_offset;
    let keep = if conditions_h + signature_h <= page_room {
        conditions_h + signature_h
    } else {
        heading_h + pitch
    };
    let (mut flow, broke) = flow.ensure_room(keep);
    if broke {
        log::debug!("conditions moved to page {}", flow.page_index());
    }

    let top = flow.cursor();
    flow.text(
        config.margin_x,
        top + 4.0,
        TextStyle::new(11.0, DARK_GREY).bold(),
        "Conditions & Assurances",
    );
    flow = flow.advance(heading_h);
    for (line, dx) in printed {
        let (mut f, _) = flow.ensure_room(pitch);
        let y = f.cursor() + 4.0;
        f.text(config.margin_x + dx, y, bullet, line);
        flow = f.advance(pitch);
    }

    signatures(flow)
}

const SIGNATURE_GAP: f32 = 3.0;

fn signatures(flow: Flow<'_>) -> Flow<'_> {
    let config = flow.config();
    let (mut flow, _) = flow.ensure_room(SIGNATURE_GAP + config.signature_box_height);
    let box_top = flow.cursor() + SIGNATURE_GAP;
    let box_w = config.signature_box_width;
    let stroke = Stroke {
        color: SIGNATURE_BORDER,
        width: 0.4,
        dash: Some(2.0),
    };
    let label = TextStyle::new(10.0, VIOLET).aligned(Alignment::Center);
    for (x, text) in [
        (config.margin_x, "Signature Client"),
        (config.right_edge() - box_w, "Signature Entreprise"),
    ] {
        flow.push(DrawOp::Rect {
            x,
            y: box_top,
            width: box_w,
            height: config.signature_box_height,
            radius: 0.0,
            fill: None,
            stroke: Some(stroke),
        });
        flow.text(x + box_w / 2.0, box_top + 6.0, label, text);
    }
    flow.advance(SIGNATURE_GAP + config.signature_box_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn break_predicate_uses_bottom_limit() {
        let config = LayoutConfig::default();
        assert!(!needs_break(250.0, 37.0, &config));
        assert!(needs_break(250.0, 37.5, &config));
    }

    #[test]
    fn flow_breaks_and_resets_cursor() {
        let config = LayoutConfig::default();
        let flow = Flow::new(&config).move_to(280.0);
        let (flow, broke) = flow.ensure_room(10.0);
        assert!(broke);
        assert_eq!(flow.page_index(), 2);
        assert_eq!(flow.cursor(), config.top_offset);
        let pages = flow.finish();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].cursor(), 280.0);
    }

    #[test]
    fn oversized_block_on_empty_page_does_not_loop() {
        let config = LayoutConfig::default();
        let (flow, broke) = Flow::new(&config).break_page().ensure_room(500.0);
        assert!(!broke);
        assert_eq!(flow.page_index(), 2);
    }

    #[test]
    fn money_and_rate_formatting() {
        assert_eq!(format_money(1530.0, &Currency::eur()), "1530.00 €");
        assert_eq!(format_money(-12.5, &Currency("CHF".into())), "-12.50 CHF");
        assert_eq!(format_rate(10.0), "10 %");
        assert_eq!(format_rate(20.0), "20 %");
    }

    #[test]
    fn dates_are_day_month_year() {
        let d = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(format_date(d), "07/03/2026");
    }

    fn text_extent(op: &DrawOp) -> Option<(f32, f32, &str)> {
        match op {
            DrawOp::Text {
                x,
                size,
                weight,
                align,
                text,
                ..
            } => {
                let width = crate::fonts::font(*weight).text_width(text, *size);
                let left = match align {
                    Alignment::Left => *x,
                    Alignment::Center => x - width / 2.0,
                    Alignment::Right => x - width,
                };
                Some((left, left + width, text.as_str()))
            }
            _ => None,
        }
    }

    #[test]
    fn party_text_stays_inside_its_column() {
        let config = LayoutConfig::default();
        let mut quote = Quote::sample(NaiveDate::from_ymd_opt(2025, 6, 22).unwrap());
        quote.issuer.address =
            "Bâtiment C, 128 avenue du Général de Gaulle, Zone artisanale des Quatre Chemins, 92400 Courbevoie".into();
        quote.issuer.email = "secretariat.devis-et-facturation@entreprise-abc-renovation.fr".into();
        quote.client.address =
            "Résidence les Tilleuls, escalier B, 4e étage, 23 rue Richelieu prolongée, 75001 Paris".into();

        let flow = party_blocks(Flow::new(&config).move_to(config.header_band_height), &quote);
        let bottom = flow.cursor();
        let pages = flow.finish();
        assert_eq!(pages.len(), 1);

        let mid = config.page_width / 2.0 + PARTY_GUTTER;
        let mut client_lines = 0;
        for (left, right, text) in pages[0].ops().iter().filter_map(text_extent) {
            if left < mid {
                assert!(left >= config.margin_x - 1e-3, "{text}");
                assert!(right <= mid - PARTY_GUTTER + 1e-3, "{text}: ends at {right}");
            } else {
                client_lines += 1;
                assert!(right <= config.right_edge() + 1e-3, "{text}: ends at {right}");
            }
        }
        // Client name, two or more address lines, heading.
        assert!(client_lines >= 4, "{client_lines}");

        // The block grows with the wrapped lines.
        let plain = party_blocks(
            Flow::new(&config).move_to(config.header_band_height),
            &Quote::sample(NaiveDate::from_ymd_opt(2025, 6, 22).unwrap()),
        );
        assert!(bottom > plain.cursor());
    }

    #[test]
    fn long_issuer_name_is_shrunk_in_the_header_band() {
        let config = LayoutConfig::default();
        let mut quote = Quote::sample(NaiveDate::from_ymd_opt(2025, 6, 22).unwrap());
        quote.issuer.name = "Société Nouvelle de Rénovation et de Maçonnerie Traditionnelle".into();
        quote.id = "D-MAN-250622-002-REVISION-B-VARIANTE-3".into();
        let pages = header_band(Flow::new(&config), &quote).finish();
        let centre = config.page_width / 2.0;
        for (left, right, text) in pages[0].ops().iter().filter_map(text_extent) {
            assert!(left >= config.margin_x - 1e-3, "{text}");
            assert!(right <= config.right_edge() + 1e-3, "{text}");
            if left < centre {
                assert!(right <= centre, "{text}: ends at {right}");
            } else {
                assert!(left >= centre, "{text}: starts at {left}");
            }
        }
    }
}
