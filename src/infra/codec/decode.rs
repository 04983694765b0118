//! Byte-level text decoding for loaded files.

pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

const NULL_SAMPLE_SIZE: usize = 1000;
const NULL_RATIO_THRESHOLD: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Utf8Bom,
    Utf16Le,
    Utf16Be,
    /// UTF-16LE guessed from the share of NUL bytes, no BOM present.
    Utf16LeGuessed,
}

pub fn detect_encoding(bytes: &[u8]) -> TextEncoding {
    if bytes.starts_with(&UTF8_BOM) {
        return TextEncoding::Utf8Bom;
    }
    if bytes.starts_with(&UTF16_LE_BOM) {
        return TextEncoding::Utf16Le;
    }
    if bytes.starts_with(&UTF16_BE_BOM) {
        return TextEncoding::Utf16Be;
    }

    let sample = &bytes[..bytes.len().min(NULL_SAMPLE_SIZE)];
    let nulls = sample.iter().filter(|byte| **byte == 0).count();
    if nulls > 0 && nulls as f64 > sample.len() as f64 * NULL_RATIO_THRESHOLD {
        return TextEncoding::Utf16LeGuessed;
    }
    TextEncoding::Utf8
}

/// Decodes file bytes into text. Never fails: malformed input is replaced
/// with U+FFFD so the parser always receives a string.
pub fn decode(bytes: &[u8]) -> String {
    decode_as(bytes, detect_encoding(bytes))
}

fn decode_as(bytes: &[u8], encoding: TextEncoding) -> String {
    match encoding {
        TextEncoding::Utf16Le => decode_utf16(&bytes[UTF16_LE_BOM.len()..], u16::from_le_bytes),
        TextEncoding::Utf16Be => decode_utf16(&bytes[UTF16_BE_BOM.len()..], u16::from_be_bytes),
        TextEncoding::Utf16LeGuessed => decode_utf16(bytes, u16::from_le_bytes),
        TextEncoding::Utf8Bom => String::from_utf8_lossy(&bytes[UTF8_BOM.len()..]).into_owned(),
        TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> String {
    let chunks = bytes.chunks_exact(2);
    let has_trailing_byte = !chunks.remainder().is_empty();
    let units: Vec<u16> = chunks.map(|pair| to_unit([pair[0], pair[1]])).collect();

    let mut text = String::from_utf16_lossy(&units);
    if has_trailing_byte {
        text.push(char::REPLACEMENT_CHARACTER);
    }
    text
}
