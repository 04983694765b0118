//! The `sep=<delimiter>` first-line convention used by spreadsheet tools.

const DIRECTIVE_PREFIX: &str = "sep=";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sniffed<'a> {
    /// Delimiter declared by the directive, if it is one the parser can use.
    pub delimiter: Option<char>,
    /// `true` when a directive line was found and stripped.
    pub had_directive: bool,
    pub text: &'a str,
}

pub fn sniff(text: &str) -> Sniffed<'_> {
    let (first_line, rest) = match text.find('\n') {
        Some(end) => (&text[..end], &text[end + 1..]),
        None => (text, ""),
    };

    let Some(declared) = first_line.trim().strip_prefix(DIRECTIVE_PREFIX) else {
        return Sniffed {
            delimiter: None,
            had_directive: false,
            text,
        };
    };

    Sniffed {
        delimiter: single_byte_delimiter(declared.trim()),
        had_directive: true,
        text: rest,
    }
}

fn single_byte_delimiter(declared: &str) -> Option<char> {
    let mut chars = declared.chars();
    match (chars.next(), chars.next()) {
        (Some(delimiter), None) if delimiter.is_ascii() => Some(delimiter),
        _ => {
            if !declared.is_empty() {
                tracing::warn!(declared, "unsupported sep= delimiter, falling back to detection");
            }
            None
        }
    }
}

pub fn directive_line(delimiter: char) -> String {
    format!("{DIRECTIVE_PREFIX}{delimiter}\n")
}
