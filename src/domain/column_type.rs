//! Display-type guessing for the grid and the row form.
//!
//! Values are always stored as text; nothing here feeds back into the
//! document model.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const SAMPLE_ROWS: usize = 5;

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%d.%m.%Y", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y",
];

const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Boolean,
    Number,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Boolean,
    Date,
    Number,
    Text,
}

pub fn classify_cell(value: &str) -> CellKind {
    let trimmed = value.trim();
    if is_boolean_literal(trimmed) {
        return CellKind::Boolean;
    }
    if is_numeric(trimmed) {
        // Zip codes, phone numbers and ids keep their leading zeros.
        if trimmed.starts_with('0') && trimmed.len() > 1 && !trimmed.starts_with("0.") {
            return CellKind::Text;
        }
        return CellKind::Number;
    }
    CellKind::Text
}

pub fn guess_column_kind<'a>(header: &str, samples: impl IntoIterator<Item = &'a str>) -> ColumnKind {
    let lower_header = header.to_lowercase();
    if ["date", "tarih", "time"]
        .iter()
        .any(|hint| lower_header.contains(hint))
    {
        return ColumnKind::Date;
    }
    if lower_header.starts_with("is")
        || lower_header.starts_with("has")
        || lower_header.contains("active")
    {
        return ColumnKind::Boolean;
    }

    for value in samples.into_iter().take(SAMPLE_ROWS) {
        if value.is_empty() {
            continue;
        }
        let lower = value.trim().to_lowercase();
        if is_boolean_literal(&lower) {
            return ColumnKind::Boolean;
        }
        if value.len() > 5
            && (value.contains('-') || value.contains('/') || value.contains('.'))
            && parse_date(value).is_some()
        {
            return ColumnKind::Date;
        }
        if is_numeric(&lower) && !lower.starts_with('0') {
            return ColumnKind::Number;
        }
    }
    ColumnKind::Text
}

/// Initial value offered by the add-row form for a column of `kind`.
pub fn default_value(kind: ColumnKind, today: NaiveDate) -> String {
    match kind {
        ColumnKind::Boolean => "false".to_string(),
        ColumnKind::Date => today.format("%Y-%m-%d").to_string(),
        ColumnKind::Number | ColumnKind::Text => String::new(),
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.date_naive());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|parsed| parsed.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        })
}

fn is_boolean_literal(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false")
}

fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_cell_detects_booleans_numbers_and_text() {
        assert_eq!(classify_cell(" TRUE "), CellKind::Boolean);
        assert_eq!(classify_cell("false"), CellKind::Boolean);
        assert_eq!(classify_cell("42"), CellKind::Number);
        assert_eq!(classify_cell("-3.5"), CellKind::Number);
        assert_eq!(classify_cell("0.75"), CellKind::Number);
        assert_eq!(classify_cell("0"), CellKind::Number);
        assert_eq!(classify_cell("00123"), CellKind::Text);
        assert_eq!(classify_cell("NaN"), CellKind::Text);
        assert_eq!(classify_cell(""), CellKind::Text);
        assert_eq!(classify_cell("Paris"), CellKind::Text);
    }

    #[test]
    fn guess_column_kind_prefers_header_hints() {
        assert_eq!(guess_column_kind("Created Date", ["abc"]), ColumnKind::Date);
        assert_eq!(guess_column_kind("updated_time", ["abc"]), ColumnKind::Date);
        assert_eq!(guess_column_kind("isActive", ["abc"]), ColumnKind::Boolean);
        assert_eq!(guess_column_kind("has_email", ["abc"]), ColumnKind::Boolean);
        assert_eq!(guess_column_kind("user_active", ["abc"]), ColumnKind::Boolean);
    }

    #[test]
    fn guess_column_kind_uses_first_non_empty_sample() {
        assert_eq!(guess_column_kind("flag", ["", "True"]), ColumnKind::Boolean);
        assert_eq!(guess_column_kind("born", ["1990-04-12"]), ColumnKind::Date);
        assert_eq!(guess_column_kind("price", ["", "12.5"]), ColumnKind::Number);
        assert_eq!(guess_column_kind("zip", ["01234"]), ColumnKind::Text);
        assert_eq!(guess_column_kind("name", ["Alice"]), ColumnKind::Text);
        assert_eq!(guess_column_kind("empty", std::iter::empty()), ColumnKind::Text);
    }

    #[test]
    fn default_value_follows_kind() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date");

        assert_eq!(default_value(ColumnKind::Boolean, today), "false");
        assert_eq!(default_value(ColumnKind::Date, today), "2024-03-09");
        assert_eq!(default_value(ColumnKind::Number, today), "");
    }

    #[test]
    fn parse_date_accepts_common_layouts() {
        assert!(parse_date("2024-01-31").is_some());
        assert!(parse_date("31.01.2024").is_some());
        assert!(parse_date("2024-01-31T10:00:00Z").is_some());
        assert!(parse_date("not a date").is_none());
    }
}
