//! Metrics and encoding for the base-14 fonts the reports are typeset in.
//!
//! Reports use the standard PDF Type1 fonts only, so no font files are read
//! or embedded. The width tables below are the single source of truth for
//! text measurement; the renderer encodes text with the same mapping, so
//! layout and drawing always agree on widths.

use serde::{Deserialize, Serialize};

/// The typefaces available to report content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Font {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    Courier,
}

impl Font {
    /// PostScript base font name, as registered in the PDF.
    pub(crate) fn base_name(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
            Font::HelveticaOblique => "Helvetica-Oblique",
            Font::Courier => "Courier",
        }
    }

    /// Resource name used in content streams (/F1 Tf etc.).
    pub(crate) fn resource_name(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
            Font::HelveticaOblique => "F3",
            Font::Courier => "F4",
        }
    }

    pub(crate) const ALL: [Font; 4] = [
        Font::Helvetica,
        Font::HelveticaBold,
        Font::HelveticaOblique,
        Font::Courier,
    ];
}

/// Approximate Helvetica widths at 1000 units/em for WinAnsi bytes.
fn helvetica_width_1000(b: u8) -> f32 {
    match b {
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
        _ => 556.0,
    }
}

/// Approximate Helvetica-Bold widths at 1000 units/em for WinAnsi bytes.
fn helvetica_bold_width_1000(b: u8) -> f32 {
    match b {
        32 => 278.0,
        33..=47 => 333.0,
        48..=57 => 556.0,
        58..=64 => 333.0,
        73 | 74 => 278.0,
        77 => 889.0,
        65..=90 => 722.0,
        91..=96 => 333.0,
        105 | 106 | 108 => 278.0,
        102 | 116 => 333.0,
        109 | 119 => 889.0,
        97..=122 => 611.0,
        _ => 611.0,
    }
}

fn width_1000(font: Font, b: u8) -> f32 {
    match font {
        Font::Helvetica | Font::HelveticaOblique => helvetica_width_1000(b),
        Font::HelveticaBold => helvetica_bold_width_1000(b),
        Font::Courier => 600.0,
    }
}

/// Width in points of `text` set in `font` at `size`.
///
/// Characters that cannot be encoded as WinAnsi contribute no width; the
/// renderer drops the same characters, so measurement and drawing agree.
pub(crate) fn text_width(text: &str, font: Font, size: f32) -> f32 {
    to_winansi_bytes(text)
        .iter()
        .filter(|&&b| b >= 32)
        .map(|&b| width_1000(font, b) * size / 1000.0)
        .sum()
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF Str encoding.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .filter_map(|c| match c as u32 {
            0x0000..=0x007F => Some(c as u8),
            0x00A0..=0x00FF => Some(c as u8), // Latin-1 supplement maps directly
            0x20AC => Some(0x80),
            0x201A => Some(0x82),
            0x0192 => Some(0x83),
            0x201E => Some(0x84),
            0x2026 => Some(0x85),
            0x2020 => Some(0x86),
            0x2021 => Some(0x87),
            0x02C6 => Some(0x88),
            0x2030 => Some(0x89),
            0x0160 => Some(0x8A),
            0x2039 => Some(0x8B),
            0x0152 => Some(0x8C),
            0x017D => Some(0x8E),
            0x2018 => Some(0x91),
            0x2019 => Some(0x92),
            0x201C => Some(0x93),
            0x201D => Some(0x94),
            0x2022 => Some(0x95), // bullet
            0x2013 => Some(0x96),
            0x2014 => Some(0x97),
            0x02DC => Some(0x98),
            0x2122 => Some(0x99),
            0x0161 => Some(0x9A),
            0x203A => Some(0x9B),
            0x0153 => Some(0x9C),
            0x017E => Some(0x9E),
            0x0178 => Some(0x9F),
            _ => None,
        })
        .collect()
}
