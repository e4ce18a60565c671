use std::sync::OnceLock;

use crate::model::FontWeight;

/// Points per millimetre.
pub(crate) const PT_PER_MM: f32 = 72.0 / 25.4;

/// Metrics of one of the standard-14 Helvetica faces.
pub(crate) struct FontEntry {
    pub(crate) pdf_name: &'static str,
    pub(crate) base_font: &'static str,
    /// Advance widths at 1000 units/em for WinAnsi bytes 32..=255.
    widths_1000: Vec<f32>,
}

impl FontEntry {
    pub(crate) fn char_width_1000(&self, ch: char) -> f32 {
        let byte = char_to_winansi(ch);
        if byte >= 32 {
            self.widths_1000[(byte - 32) as usize]
        } else {
            0.0
        }
    }

    /// Width of `text` in millimetres at `font_size` points.
    pub(crate) fn text_width(&self, text: &str, font_size: f32) -> f32 {
        let pt: f32 = text
            .chars()
            .map(|ch| self.char_width_1000(ch) * font_size / 1000.0)
            .sum();
        pt / PT_PER_MM
    }

    pub(crate) fn space_width(&self, font_size: f32) -> f32 {
        self.text_width(" ", font_size)
    }
}

static REGULAR: OnceLock<FontEntry> = OnceLock::new();
static BOLD: OnceLock<FontEntry> = OnceLock::new();

pub(crate) fn font(weight: FontWeight) -> &'static FontEntry {
    match weight {
        FontWeight::Regular => REGULAR.get_or_init(|| FontEntry {
            pdf_name: "F1",
            base_font: "Helvetica",
            widths_1000: helvetica_widths(),
        }),
        FontWeight::Bold => BOLD.get_or_init(|| FontEntry {
            pdf_name: "F2",
            base_font: "Helvetica-Bold",
            widths_1000: helvetica_bold_widths(),
        }),
    }
}

pub(crate) fn all_fonts() -> [&'static FontEntry; 2] {
    [font(FontWeight::Regular), font(FontWeight::Bold)]
}

/// Line height in millimetres for a font size in points (1.15 leading).
pub(crate) fn line_height(font_size: f32) -> f32 {
    font_size * 1.15 / PT_PER_MM
}

/// Map a single Unicode char to its WinAnsi byte, or 0 if unmappable.
pub(crate) fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007E => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95,
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        0x202F => 0xA0, // narrow no-break space, as emitted by some number formatters
        _ => 0,
    }
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF Str encoding.
/// Characters outside the code page are dropped.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .map(char_to_winansi)
        .filter(|&b| b != 0)
        .collect()
}

/// Approximate Helvetica widths at 1000 units/em for WinAnsi chars 32..=255.
fn helvetica_widths() -> Vec<f32> {
    (32u8..=255u8)
        .map(|b| match b {
            32 => 278.0,                          // space
            33..=47 => 333.0,                     // punctuation
            48..=57 => 556.0,                     // digits
            58..=64 => 333.0,                     // more punctuation
            73 | 74 => 278.0,                     // I J (narrow uppercase)
            77 => 833.0,                          // M (wide)
            65..=90 => 667.0,                     // uppercase A-Z (average)
            91..=96 => 333.0,                     // brackets etc.
            102 | 105 | 106 | 108 | 116 => 278.0, // narrow lowercase: f i j l t
            109 | 119 => 833.0,                   // m w (wide)
            97..=122 => 556.0,                    // lowercase a-z (average)
            0x80 => 556.0,                        // euro
            0xB2 | 0xB3 | 0xB9 => 333.0,          // superscript digits
            _ => 556.0,
        })
        .collect()
}

/// Same shape as `helvetica_widths`, with the heavier bold advances.
fn helvetica_bold_widths() -> Vec<f32> {
    (32u8..=255u8)
        .map(|b| match b {
            32 => 278.0,
            33..=47 => 333.0,
            48..=57 => 556.0,
            58..=64 => 333.0,
            73 => 278.0,
            74 => 556.0,
            77 => 833.0,
            87 => 944.0,
            65..=90 => 722.0,
            91..=96 => 333.0,
            105 | 106 | 108 => 278.0,
            102 | 116 => 333.0,
            109 => 889.0,
            119 => 778.0,
            97..=122 => 611.0,
            0x80 => 556.0,
            0xB2 | 0xB3 | 0xB9 => 333.0,
            _ => 611.0,
        })
        .collect()
}
