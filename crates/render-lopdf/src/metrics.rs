//! Metrics and encoding for the standard Helvetica faces used without embedded fonts.

/// Advance widths (1/1000 em) of Helvetica for codes 32..=126.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Advance widths (1/1000 em) of Helvetica-Bold for codes 32..=126.
#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const DEFAULT_WIDTH: u16 = 556;

/// Width of one WinAnsi code in 1/1000 em.
pub(crate) fn standard_width(code: u8, bold: bool) -> u16 {
    let table = if bold { &HELVETICA_BOLD } else { &HELVETICA };
    match code {
        32..=126 => table[(code - 32) as usize],
        0x95 => 350,
        0x96 => 556,
        0x97 => 1000,
        0x91 | 0x92 => if bold { 278 } else { 222 },
        0x93 | 0x94 => if bold { 500 } else { 333 },
        _ => DEFAULT_WIDTH,
    }
}

/// Encodes text as WinAnsi bytes. Characters the encoding lacks become `?`.
pub(crate) fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
            _ => b'?',
        })
        .collect()
}

/// Width in points of WinAnsi-encoded bytes at `size`.
pub(crate) fn standard_text_width(encoded: &[u8], bold: bool, size: f32) -> f32 {
    let units: u32 = encoded.iter().map(|&b| standard_width(b, bold) as u32).sum();
    units as f32 * size / 1000.0
}
