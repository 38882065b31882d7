//! WinAnsi encoding and Helvetica glyph widths.

/// Byte written for characters Helvetica/WinAnsi cannot show.
const REPLACEMENT: u8 = b'?';

/// Width used for glyphs outside the ASCII table.
const DEFAULT_WIDTH: u16 = 556;

/// Helvetica advance widths for ASCII 32..=126, in 1/1000 em.
const HELVETICA_ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' ' to '/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0' to '?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@' to 'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P' to '_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`' to 'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p' to '~'
];

/// Map one character to its WinAnsi code, or `?` when it has none.
fn win_ansi_byte(c: char) -> u8 {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => code as u8,
        _ => match c {
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8A,
            '‹' => 0x8B,
            'Œ' => 0x8C,
            'Ž' => 0x8E,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9A,
            '›' => 0x9B,
            'œ' => 0x9C,
            'ž' => 0x9E,
            'Ÿ' => 0x9F,
            _ => REPLACEMENT,
        },
    }
}

/// Encode a line for a WinAnsi Type1 font. Produces exactly one byte per
/// input character.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

/// Advance width of `c` in 1/1000 em, as it will be rendered.
pub fn helvetica_width(c: char) -> u16 {
    let byte = win_ansi_byte(c);
    if (0x20..=0x7E).contains(&byte) {
        HELVETICA_ASCII_WIDTHS[(byte - 0x20) as usize]
    } else {
        DEFAULT_WIDTH
    }
}

/// Width of `text` in points at `font_size`.
pub(crate) fn text_width(text: &str, font_size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| helvetica_width(c) as u32).sum();
    units as f32 * font_size / 1000.0
}
