use crate::domain::entities::document::DEFAULT_DELIMITER;

/// Delimiters offered by the save dialog, with their labels.
pub const SAVE_DELIMITERS: &[(char, &str)] = &[
    (',', "Comma (,)"),
    (';', "Semicolon (;)"),
    ('\t', "Tab"),
    ('|', "Pipe (|)"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    pub delimiter: char,
    /// Prepend a `sep=<delimiter>` line so spreadsheet tools pick the right
    /// delimiter.
    pub include_sep_directive: bool,
    pub include_bom: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self::for_delimiter(DEFAULT_DELIMITER, true)
    }
}

impl SaveOptions {
    /// Dialog defaults: non-comma files get the `sep=` line.
    pub fn for_delimiter(delimiter: char, include_bom: bool) -> Self {
        Self {
            delimiter,
            include_sep_directive: delimiter != DEFAULT_DELIMITER,
            include_bom,
        }
    }
}

pub fn delimiter_label(delimiter: char) -> String {
    SAVE_DELIMITERS
        .iter()
        .find(|(candidate, _)| *candidate == delimiter)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| format!("\"{}\"", delimiter.escape_default()))
}
