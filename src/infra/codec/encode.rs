use crate::infra::codec::decode::UTF8_BOM;

/// UTF-8 encodes `text`, optionally behind a byte-order mark so spreadsheet
/// tools recognise the encoding.
pub fn encode(text: &str, include_bom: bool) -> Vec<u8> {
    let prefix: &[u8] = if include_bom { &UTF8_BOM } else { &[] };
    let mut bytes = Vec::with_capacity(prefix.len() + text.len());
    bytes.extend_from_slice(prefix);
    bytes.extend_from_slice(text.as_bytes());
    bytes
}
