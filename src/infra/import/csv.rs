use anyhow::{bail, Context, Result};
use csv::StringRecord;

use crate::domain::entities::document::{unique_headers, RowData, DEFAULT_DELIMITER};

/// Candidates tried when the file does not declare its delimiter.
const DELIMITER_CANDIDATES: &[char] = &[',', '\t', '|', ';', '\u{1e}', '\u{1f}'];
const DETECTION_PREVIEW_RECORDS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub rows: Vec<RowData>,
    pub delimiter: char,
}

/// Parses delimited text. When `delimiter` is `None` it is guessed from the
/// first records. With `has_headers` unset, columns are named `Column 1`,
/// `Column 2`, ...
pub fn parse_delimited(text: &str, delimiter: Option<char>, has_headers: bool) -> Result<ParsedTable> {
    let delimiter = match delimiter {
        Some(delimiter) => delimiter,
        None => detect_delimiter(text),
    };
    let delimiter_byte = delimiter_byte(delimiter)?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_byte)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let mut rows = Vec::new();
    let headers = if has_headers {
        let Some(first) = records.next() else {
            bail!("file contains no header row")
        };
        let first = first.context("failed to parse csv header row")?;
        unique_headers(first.iter().map(str::to_string).collect())
    } else {
        Vec::new()
    };

    let mut width = headers.len();
    let mut raw_rows: Vec<StringRecord> = Vec::new();
    for (index, record) in records.enumerate() {
        let record = record.with_context(|| format!("failed to parse csv record {}", index + 1))?;
        if is_blank(&record) {
            continue;
        }
        width = width.max(record.len());
        raw_rows.push(record);
    }

    let headers = if has_headers {
        headers
    } else {
        (1..=width).map(|index| format!("Column {index}")).collect()
    };

    let mut truncated = 0_usize;
    for record in &raw_rows {
        if record.len() > headers.len() {
            truncated += 1;
        }
        let row: RowData = headers
            .iter()
            .enumerate()
            .map(|(col_idx, header)| {
                let value = record.get(col_idx).unwrap_or("");
                (header.clone(), value.to_string())
            })
            .collect();
        rows.push(row);
    }
    if truncated > 0 {
        tracing::warn!(truncated, "dropped fields beyond the header width");
    }

    Ok(ParsedTable {
        headers,
        rows,
        delimiter,
    })
}

/// Picks the candidate that splits the first records into the most uniform
/// field counts, provided it yields more than one field per record.
pub fn detect_delimiter(text: &str) -> char {
    let mut best: Option<(char, usize, f64)> = None;

    for &candidate in DELIMITER_CANDIDATES {
        let Ok(byte) = delimiter_byte(candidate) else {
            continue;
        };
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(byte)
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let counts: Vec<usize> = reader
            .records()
            .filter_map(|record| record.ok())
            .filter(|record| !is_blank(record))
            .take(DETECTION_PREVIEW_RECORDS)
            .map(|record| record.len())
            .collect();
        if counts.is_empty() {
            continue;
        }

        let delta: usize = counts
            .windows(2)
            .map(|pair| pair[0].abs_diff(pair[1]))
            .sum();
        let average = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
        if average <= 1.99 {
            continue;
        }

        let better = match best {
            None => true,
            Some((_, best_delta, best_average)) => {
                delta < best_delta || (delta == best_delta && average > best_average)
            }
        };
        if better {
            best = Some((candidate, delta, average));
        }
    }

    best.map(|(delimiter, _, _)| delimiter)
        .unwrap_or(DEFAULT_DELIMITER)
}

pub fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        bail!("delimiter {:?} is not a single-byte character", delimiter)
    }
    Ok(delimiter as u8)
}

fn is_blank(record: &StringRecord) -> bool {
    record.len() == 1 && record.get(0).map(str::is_empty).unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headers_and_keyed_rows() {
        let table = parse_delimited("name,city\nAlice,Paris\nBob,\"Tokyo, JP\"\n", None, true)
            .expect("parse should succeed");

        assert_eq!(table.headers, ["name", "city"]);
        assert_eq!(table.delimiter, ',');
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1]["city"], "Tokyo, JP");
    }

    #[test]
    fn skips_empty_lines_and_pads_short_records() {
        let table = parse_delimited("a,b,c\n\n1\n\n2,3\n", Some(','), true)
            .expect("parse should succeed");

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0]["b"], "");
        assert_eq!(table.rows[1]["b"], "3");
        assert_eq!(table.rows[1]["c"], "");
    }

    #[test]
    fn drops_fields_beyond_header_width() {
        let table =
            parse_delimited("a,b\n1,2,3\n", Some(','), true).expect("parse should succeed");

        assert_eq!(table.rows[0].len(), 2);
    }

    #[test]
    fn duplicate_headers_are_made_unique() {
        let table = parse_delimited("id,id,name\n1,2,x\n", Some(','), true)
            .expect("parse should succeed");

        assert_eq!(table.headers, ["id", "id_1", "name"]);
        assert_eq!(table.rows[0]["id_1"], "2");
    }

    #[test]
    fn detects_semicolon_and_tab_delimiters() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3\n4;5;6\n"), ';');
        assert_eq!(detect_delimiter("a\tb\n1\t2\n"), '\t');
        assert_eq!(detect_delimiter("a|b|c\n1|2,5|3\n"), '|');
    }

    #[test]
    fn single_column_text_defaults_to_comma() {
        assert_eq!(detect_delimiter("name\nAlice\nBob\n"), ',');
    }

    #[test]
    fn empty_text_is_a_parse_error() {
        let result = parse_delimited("", None, true);

        assert!(result.is_err());
    }

    #[test]
    fn headerless_parse_names_columns() {
        let table = parse_delimited("1,2\n3,4,5\n", Some(','), false).expect("parse should succeed");

        assert_eq!(table.headers, ["Column 1", "Column 2", "Column 3"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0]["Column 3"], "");
    }

    #[test]
    fn rejects_multibyte_delimiter() {
        assert!(parse_delimited("a§b", Some('§'), true).is_err());
    }
}
