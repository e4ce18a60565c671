use crate::fonts::{PT_PER_MM, line_height};
use crate::model::{Alignment, Currency, FontWeight, LineItem, Rgb};

use super::text::wrap_text;
use super::{DrawOp, Flow, LayoutConfig, TextStyle, format_money, format_rate, needs_break};

const HEADER: [&str; 6] = ["Description", "Qté", "PU HT", "TVA (%)", "Total HT", "Total TTC"];
const COLUMN_ALIGN: [Alignment; 6] = [
    Alignment::Left,
    Alignment::Left,
    Alignment::Right,
    Alignment::Right,
    Alignment::Right,
    Alignment::Right,
];

/// Appearance of the line-item table. Column widths are in millimetres and
/// should add up to the printable width.
#[derive(Clone, Debug, PartialEq)]
pub struct TableStyle {
    pub column_widths: [f32; 6],
    pub font_size: f32,
    pub cell_padding: f32,
    pub header_fill: Rgb,
    pub header_text: Rgb,
    pub body_text: Rgb,
    pub grid_color: Rgb,
    pub grid_width: f32,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            column_widths: [62.0, 22.0, 24.0, 18.0, 28.0, 28.0],
            font_size: 10.0,
            cell_padding: 4.0,
            header_fill: Rgb(99, 102, 241),
            header_text: Rgb::WHITE,
            body_text: Rgb(0x1e, 0x29, 0x3b),
            grid_color: Rgb(200, 200, 200),
            grid_width: 0.1,
        }
    }
}

impl TableStyle {
    /// Height of the header row plus the first body row: the minimum the
    /// table needs on the page where it starts. A first row too tall for any
    /// page is split anyway, so only its first line counts.
    pub fn leading_height(
        &self,
        items: &[LineItem],
        currency: &Currency,
        config: &LayoutConfig,
    ) -> f32 {
        let header = self.measure_row(HEADER.map(String::from), FontWeight::Bold);
        let first = items
            .first()
            .map(|item| self.measure_row(row_cells(item, currency), FontWeight::Regular).height)
            .unwrap_or(0.0);
        header.height + self.kept_height(first, header.height, config)
    }

    fn kept_height(&self, row_height: f32, header_height: f32, config: &LayoutConfig) -> f32 {
        let page_room = config.bottom_limit - config.top_offset - header_height;
        if row_height <= page_room {
            row_height
        } else {
            line_height(self.font_size) + 2.0 * self.cell_padding
        }
    }

    fn measure_row(&self, cells: [String; 6], weight: FontWeight) -> RowLayout {
        let cell_lines = std::array::from_fn(|col| {
            let text_w = (self.column_widths[col] - 2.0 * self.cell_padding).max(0.0);
            wrap_text(&cells[col], weight, self.font_size, text_w)
        });
        self.row_from_lines(cell_lines, weight)
    }

    fn row_from_lines(&self, cell_lines: [Vec<String>; 6], weight: FontWeight) -> RowLayout {
        let max_lines = cell_lines.iter().map(Vec::len).max().unwrap_or(0).max(1);
        RowLayout {
            height: max_lines as f32 * line_height(self.font_size) + 2.0 * self.cell_padding,
            cell_lines,
            weight,
        }
    }

    /// Cut a row after its first `lines` wrapped lines. Both halves keep the
    /// full cell padding.
    fn split_row(&self, row: RowLayout, lines: usize) -> (RowLayout, RowLayout) {
        let mut rest: [Vec<String>; 6] = Default::default();
        let mut head = row.cell_lines;
        for (cell, tail) in head.iter_mut().zip(rest.iter_mut()) {
            if cell.len() > lines {
                *tail = cell.split_off(lines);
            }
        }
        (
            self.row_from_lines(head, row.weight),
            self.row_from_lines(rest, row.weight),
        )
    }
}

/// Where the table ended: the cursor on its last page and how many pages it
/// touched, counting the one it started on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TableOutcome {
    pub final_y: f32,
    pub pages_used: usize,
}

struct RowLayout {
    height: f32,
    cell_lines: [Vec<String>; 6],
    weight: FontWeight,
}

impl RowLayout {
    fn line_count(&self) -> usize {
        self.cell_lines.iter().map(Vec::len).max().unwrap_or(0)
    }
}

fn row_cells(item: &LineItem, currency: &Currency) -> [String; 6] {
    [
        item.description.clone(),
        format!("{} {}", item.quantity.value, item.quantity.unit)
            .trim_end()
            .to_string(),
        format_money(item.unit_price, currency),
        format_rate(item.tax_rate_percent),
        format_money(item.total_excluding_tax(), currency),
        format_money(item.total_including_tax(), currency),
    ]
}

fn draw_row<'c>(mut flow: Flow<'c>, row: &RowLayout, is_header: bool, style: &TableStyle) -> Flow<'c> {
    let config = flow.config();
    let top = flow.cursor();
    let bottom = top + row.height;
    let line_h = line_height(style.font_size);
    let ascent = style.font_size * 0.75 / PT_PER_MM;
    let color = if is_header {
        style.header_text
    } else {
        style.body_text
    };

    let mut cell_x = config.margin_x;
    for (col, lines) in row.cell_lines.iter().enumerate() {
        let col_w = style.column_widths[col];

        if is_header {
            flow.fill_rect(cell_x, top, col_w, row.height, style.header_fill);
        }

        let align = COLUMN_ALIGN[col];
        let anchor = match align {
            Alignment::Left => cell_x + style.cell_padding,
            Alignment::Center => cell_x + col_w / 2.0,
            Alignment::Right => cell_x + col_w - style.cell_padding,
        };
        let text_style = TextStyle {
            size: style.font_size,
            weight: row.weight,
            color,
            align,
        };
        for (i, line) in lines.iter().enumerate() {
            let baseline = top + style.cell_padding + ascent + i as f32 * line_h;
            flow.text(anchor, baseline, text_style, line.as_str());
        }

        for (x1, y1, x2, y2) in [
            (cell_x, top, cell_x + col_w, top),
            (cell_x, bottom, cell_x + col_w, bottom),
            (cell_x, top, cell_x, bottom),
            (cell_x + col_w, top, cell_x + col_w, bottom),
        ] {
            flow.push(DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                width: style.grid_width,
                color: style.grid_color,
            });
        }
        cell_x += col_w;
    }

    flow.advance(row.height)
}

/// Lay out the line-item table from the current cursor, continuing onto new
/// pages as needed. Every page the table occupies starts with the header row.
///
/// Rows break to the next page whole. A row taller than a full page is cut
/// between its wrapped lines instead.
pub(crate) fn layout_table<'c>(
    flow: Flow<'c>,
    items: &[LineItem],
    currency: &Currency,
    style: &TableStyle,
) -> (Flow<'c>, TableOutcome) {
    let config = flow.config();
    let header = style.measure_row(HEADER.map(String::from), FontWeight::Bold);
    let rows: Vec<RowLayout> = items
        .iter()
        .map(|item| style.measure_row(row_cells(item, currency), FontWeight::Regular))
        .collect();

    let line_h = line_height(style.font_size);
    let page_room = config.bottom_limit - config.top_offset - header.height;

    let lead = header.height
        + rows
            .first()
            .map_or(0.0, |r| style.kept_height(r.height, header.height, config));
    let (flow, _) = flow.ensure_room(lead);
    let first_page = flow.page_index();
    let mut flow = draw_row(flow, &header, true, style);
    // True while the page holds only a freshly repeated header.
    let mut fresh = false;

    for (ri, row) in rows.into_iter().enumerate() {
        log::debug!(
            "TABLE row={} row_h={:.2} cursor={:.2} page={}",
            ri,
            row.height,
            flow.cursor(),
            flow.page_index()
        );
        let mut pending = row;
        while needs_break(flow.cursor(), pending.height, config) {
            if !fresh && pending.height <= page_room {
                flow = flow.break_page();
                flow = draw_row(flow, &header, true, style);
                fresh = true;
                break;
            }
            let room = config.bottom_limit - flow.cursor() - 2.0 * style.cell_padding;
            let fit = ((room / line_h).floor().max(0.0) as usize)
                .min(pending.line_count().saturating_sub(1));
            if fit == 0 && fresh {
                // Not even one line fits under a repeated header.
                break;
            }
            if fit > 0 {
                let (head, rest) = style.split_row(pending, fit);
                log::debug!("TABLE row={} split after {} line(s)", ri, fit);
                flow = draw_row(flow, &head, false, style);
                pending = rest;
            }
            flow = flow.break_page();
            flow = draw_row(flow, &header, true, style);
            fresh = true;
        }
        flow = draw_row(flow, &pending, false, style);
        fresh = false;
    }

    let outcome = TableOutcome {
        final_y: flow.cursor(),
        pages_used: flow.page_index() - first_page + 1,
    };
    (flow, outcome)
}
