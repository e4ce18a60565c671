use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::error::Error;
use crate::fonts::{PT_PER_MM, all_fonts, font, to_winansi_bytes};
use crate::layout::{DrawOp, Page, StampedDocument, Stroke};
use crate::model::{Alignment, Rgb};

/// Bezier control distance for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

/// Metadata written to the PDF info dictionary.
#[derive(Clone, Debug)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
}

/// Converts top-left millimetre coordinates into PDF user space.
struct Mapper {
    page_height: f32,
}

impl Mapper {
    fn x(&self, mm: f32) -> f32 {
        mm * PT_PER_MM
    }

    fn y(&self, mm: f32) -> f32 {
        (self.page_height - mm) * PT_PER_MM
    }

    fn len(&self, mm: f32) -> f32 {
        mm * PT_PER_MM
    }
}

fn set_fill(content: &mut Content, color: Rgb) {
    let (r, g, b) = color.unit();
    content.set_fill_rgb(r, g, b);
}

fn set_stroke(content: &mut Content, stroke: &Stroke, map: &Mapper) {
    let (r, g, b) = stroke.color.unit();
    content.set_stroke_rgb(r, g, b);
    content.set_line_width(map.len(stroke.width));
    if let Some(dash) = stroke.dash {
        content.set_dash_pattern([map.len(dash)], 0.0);
    }
}

/// Rectangle path in PDF space, `(x, y)` being the bottom-left corner.
fn rect_path(content: &mut Content, x: f32, y: f32, w: f32, h: f32, radius: f32) {
    let r = radius.min(w / 2.0).min(h / 2.0);
    if r <= 0.0 {
        content.rect(x, y, w, h);
        return;
    }
    let c = r * KAPPA;
    content.move_to(x + r, y);
    content.line_to(x + w - r, y);
    content.cubic_to(x + w - r + c, y, x + w, y + r - c, x + w, y + r);
    content.line_to(x + w, y + h - r);
    content.cubic_to(x + w, y + h - r + c, x + w - r + c, y + h, x + w - r, y + h);
    content.line_to(x + r, y + h);
    content.cubic_to(x + r - c, y + h, x, y + h - r + c, x, y + h - r);
    content.line_to(x, y + r);
    content.cubic_to(x, y + r - c, x + r - c, y, x + r, y);
    content.close_path();
}

fn render_op(content: &mut Content, op: &DrawOp, map: &Mapper) {
    match op {
        DrawOp::Text {
            x,
            y,
            size,
            weight,
            color,
            align,
            text,
        } => {
            let entry = font(*weight);
            let width = entry.text_width(text, *size);
            let left = match align {
                Alignment::Left => *x,
                Alignment::Center => x - width / 2.0,
                Alignment::Right => x - width,
            };
            set_fill(content, *color);
            content.begin_text();
            content.set_font(Name(entry.pdf_name.as_bytes()), *size);
            content.next_line(map.x(left), map.y(*y));
            content.show(Str(&to_winansi_bytes(text)));
            content.end_text();
        }
        DrawOp::Rect {
            x,
            y,
            width,
            height,
            radius,
            fill,
            stroke,
        } => {
            content.save_state();
            if let Some(color) = fill {
                set_fill(content, *color);
            }
            if let Some(stroke) = stroke {
                set_stroke(content, stroke, map);
            }
            rect_path(
                content,
                map.x(*x),
                map.y(y + height),
                map.len(*width),
                map.len(*height),
                map.len(*radius),
            );
            match (fill.is_some(), stroke.is_some()) {
                (true, true) => content.fill_nonzero_and_stroke(),
                (true, false) => content.fill_nonzero(),
                (false, true) => content.stroke(),
                (false, false) => content.end_path(),
            };
            content.restore_state();
        }
        DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            width,
            color,
        } => {
            let (r, g, b) = color.unit();
            content.save_state();
            content.set_stroke_rgb(r, g, b);
            content.set_line_width(map.len(*width));
            content.move_to(map.x(*x1), map.y(*y1));
            content.line_to(map.x(*x2), map.y(*y2));
            content.stroke();
            content.restore_state();
        }
    }
}

fn page_content(page: &Page, map: &Mapper) -> Content {
    let mut content = Content::new();
    for op in page.ops() {
        render_op(&mut content, op, map);
    }
    content
}

/// Serialize a finished document. Output contains no timestamps, so the same
/// pages always produce the same bytes.
///
/// Serialization happens in memory and does not currently fail; the error
/// type is shared with the file-writing entry points.
pub fn write_pdf(doc: &StampedDocument, info: &DocumentInfo) -> Result<Vec<u8>, Error> {
    let t0 = std::time::Instant::now();
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let info_id = alloc();

    let mut font_pairs: Vec<(&str, Ref)> = Vec::new();
    for entry in all_fonts() {
        let font_ref = alloc();
        pdf.type1_font(font_ref)
            .base_font(Name(entry.base_font.as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        font_pairs.push((entry.pdf_name, font_ref));
    }

    let config = doc.config();
    let map = Mapper {
        page_height: config.page_height,
    };

    let n = doc.page_count();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    for (i, page) in doc.pages().iter().enumerate() {
        let raw = page_content(page, &map).finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        pdf.stream(content_ids[i], &compressed)
            .filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);

    let media_box = Rect::new(
        0.0,
        0.0,
        map.len(config.page_width),
        map.len(config.page_height),
    );
    for i in 0..n {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(media_box)
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        for (name, font_ref) in &font_pairs {
            fonts.pair(Name(name.as_bytes()), *font_ref);
        }
    }

    pdf.document_info(info_id)
        .title(TextStr(&info.title))
        .author(TextStr(&info.author))
        .producer(TextStr(concat!("devis-pdf ", env!("CARGO_PKG_VERSION"))));

    let bytes = pdf.finish();
    log::info!(
        "PDF assembly: {} page(s), {} bytes in {:.1}ms",
        n,
        bytes.len(),
        t0.elapsed().as_secs_f64() * 1000.0
    );
    Ok(bytes)
}
