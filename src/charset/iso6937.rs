use super::TextCodec;
use unicode_normalization::UnicodeNormalization;

/// Registry name of the legacy STL character set.
pub const ISO_6937_NAME: &str = "iso_6937-2";

/// Decoder for the ISO 6937 variant used by STL character code table `00`.
///
/// Accented letters are sent as a non-spacing diacritic byte followed by the
/// base letter. Bytes outside the tables are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct Iso6937;

/// Bytes that decode to the code point of the same value.
fn is_identical(b: u8) -> bool {
    matches!(
        b,
        0x0a | 0x20..=0x7e
            | 0xa0
            | 0xa1
            | 0xa2
            | 0xa3
            | 0xa5
            | 0xa7
            | 0xab
            | 0xb0..=0xb3
            | 0xb5..=0xb7
            | 0xbb..=0xbf
    )
}

/// Single byte to single code point mappings.
fn direct_mapping(b: u8) -> Option<char> {
    let c = match b {
        0x8a => '\n',

        0xa8 => '\u{00a4}', // ¤
        0xa9 => '\u{2018}', // ‘
        0xaa => '\u{201c}', // “
        0xac => '\u{2190}', // ←
        0xad => '\u{2191}', // ↑
        0xae => '\u{2192}', // →
        0xaf => '\u{2193}', // ↓

        0xb4 => '\u{00d7}', // ×
        0xb8 => '\u{00f7}', // ÷
        0xb9 => '\u{2019}', // ’
        0xba => '\u{201d}', // ”

        0xd0 => '\u{2015}', // ―
        0xd1 => '\u{00b9}', // ¹
        0xd2 => '\u{00ae}', // ®
        0xd3 => '\u{00a9}', // ©
        0xd4 => '\u{2122}', // ™
        0xd5 => '\u{266a}', // ♪
        0xd6 => '\u{00ac}', // ¬
        0xd7 => '\u{00a6}', // ¦
        0xdc => '\u{215b}', // ⅛
        0xdd => '\u{215c}', // ⅜
        0xde => '\u{215d}', // ⅝
        0xdf => '\u{215e}', // ⅞

        0xe0 => '\u{2126}', // Ω
        0xe1 => '\u{00c6}', // Æ
        0xe2 => '\u{0110}', // Đ
        0xe3 => '\u{00aa}', // ª
        0xe4 => '\u{0126}', // Ħ
        0xe6 => '\u{0132}', // Ĳ
        0xe7 => '\u{013f}', // Ŀ
        0xe8 => '\u{0141}', // Ł
        0xe9 => '\u{00d8}', // Ø
        0xea => '\u{0152}', // Œ
        0xeb => '\u{00ba}', // º
        0xec => '\u{00de}', // Þ
        0xed => '\u{0166}', // Ŧ
        0xee => '\u{014a}', // Ŋ
        0xef => '\u{0149}', // ŉ

        0xf0 => '\u{0138}', // ĸ
        0xf1 => '\u{00e6}', // æ
        0xf2 => '\u{0111}', // đ
        0xf3 => '\u{00f0}', // ð
        0xf4 => '\u{0127}', // ħ
        0xf5 => '\u{0131}', // ı
        0xf6 => '\u{0133}', // ĳ
        0xf7 => '\u{0140}', // ŀ
        0xf8 => '\u{0142}', // ł
        0xf9 => '\u{00f8}', // ø
        0xfa => '\u{0153}', // œ
        0xfb => '\u{00df}', // ß
        0xfc => '\u{00fe}', // þ
        0xfd => '\u{0167}', // ŧ
        0xfe => '\u{014b}', // ŋ
        0xff => '\u{00ad}', // soft hyphen
        _ => return None,
    };
    Some(c)
}

/// Non-spacing diacritic bytes and the combining mark they stand for.
fn diacritic(b: u8) -> Option<char> {
    let c = match b {
        0xc1 => '\u{0300}', // grave
        0xc2 => '\u{0301}', // acute
        0xc3 => '\u{0302}', // circumflex
        0xc4 => '\u{0303}', // tilde
        0xc5 => '\u{0304}', // macron
        0xc6 => '\u{0306}', // breve
        0xc7 => '\u{0307}', // dot
        0xc8 => '\u{0308}', // umlaut
        0xca => '\u{030a}', // ring
        0xcb => '\u{0327}', // cedilla
        0xcd => '\u{030b}', // double acute
        0xce => '\u{0328}', // ogonek
        0xcf => '\u{030c}', // caron
        _ => return None,
    };
    Some(c)
}

/// Compose a base character with a combining mark, if NFC yields one char.
fn compose(base: char, mark: char) -> Option<char> {
    let mut composed = [base, mark].into_iter().nfc();
    let first = composed.next()?;
    match composed.next() {
        None => Some(first),
        Some(_) => None,
    }
}

impl Iso6937 {
    /// Decode a byte sequence to a string.
    pub fn decode(&self, input: &[u8]) -> String {
        let mut output = String::with_capacity(input.len());
        let mut pending: Option<char> = None;

        for &b in input {
            if let Some(mark) = pending.take() {
                // the base is taken as the byte's own code point
                if let Some(c) = compose(b as char, mark) {
                    output.push(c);
                }
            } else if is_identical(b) {
                output.push(b as char);
            } else if let Some(c) = direct_mapping(b) {
                output.push(c);
            } else if let Some(mark) = diacritic(b) {
                pending = Some(mark);
            }
        }

        output
    }
}

impl TextCodec for Iso6937 {
    fn name(&self) -> &str {
        ISO_6937_NAME
    }

    fn decode(&self, bytes: &[u8]) -> String {
        Iso6937::decode(self, bytes)
    }
}
