//! Text encoding and metrics for the standard Helvetica font under WinAnsiEncoding.

/// Advance widths (1/1000 em) of Helvetica glyphs for bytes 0x20..=0x7E.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 0x70
];

/// Width used for glyphs outside printable ASCII.
const DEFAULT_WIDTH: u16 = 556;

/// Map a character to its WinAnsiEncoding byte, if it has one.
fn encode_char(c: char) -> Option<u8> {
    let code = c as u32;
    match c {
        ' '..='~' => Some(code as u8),
        '\u{A0}'..='\u{FF}' => Some(code as u8),
        '€' => Some(0x80),
        '‚' => Some(0x82),
        'ƒ' => Some(0x83),
        '„' => Some(0x84),
        '…' => Some(0x85),
        '†' => Some(0x86),
        '‡' => Some(0x87),
        'ˆ' => Some(0x88),
        '‰' => Some(0x89),
        'Š' => Some(0x8A),
        '‹' => Some(0x8B),
        'Œ' => Some(0x8C),
        'Ž' => Some(0x8E),
        '‘' => Some(0x91),
        '’' => Some(0x92),
        '“' => Some(0x93),
        '”' => Some(0x94),
        '•' => Some(0x95),
        '–' => Some(0x96),
        '—' => Some(0x97),
        '˜' => Some(0x98),
        '™' => Some(0x99),
        'š' => Some(0x9A),
        '›' => Some(0x9B),
        'œ' => Some(0x9C),
        'ž' => Some(0x9E),
        'Ÿ' => Some(0x9F),
        _ => None,
    }
}

/// True if every character of `text` can be shown with a WinAnsi font.
pub fn is_encodable(text: &str) -> bool {
    text.chars().all(|c| encode_char(c).is_some())
}

/// Encode text for a WinAnsi font. Whitespace controls become spaces and
/// anything else without a code point becomes `?`.
pub fn encode(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match encode_char(c) {
            Some(b) => b,
            None if c.is_whitespace() => b' ',
            None => b'?',
        })
        .collect()
}

/// Width in points of `text` set in Helvetica at `size`.
pub fn text_width(text: &str, size: f32) -> f32 {
    let units: u32 = encode(text)
        .into_iter()
        .map(|b| match b {
            0x20..=0x7E => u32::from(HELVETICA_WIDTHS[usize::from(b - 0x20)]),
            _ => u32::from(DEFAULT_WIDTH),
        })
        .sum();
    units as f32 * size / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(encode("Rent: $5"), b"Rent: $5".to_vec());
        assert_eq!(encode("€10"), vec![0x80, b'1', b'0']);
        assert_eq!(encode("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode("₹5"), b"?5".to_vec());
        assert_eq!(encode("a\tb"), b"a b".to_vec());
    }

    #[test]
    fn test_is_encodable() {
        assert!(is_encodable("$"));
        assert!(is_encodable("£"));
        assert!(is_encodable("€"));
        assert!(!is_encodable("₹"));
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("", 12.0), 0.0);
        // "i" is 222 units, "m" 833
        assert!((text_width("im", 10.0) - 10.55).abs() < 0.001);
        assert!(text_width("WWW", 12.0) > text_width("iii", 12.0));
    }
}
