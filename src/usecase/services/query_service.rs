use chrono::NaiveDate;

use crate::domain::column_type::{default_value, guess_column_kind, ColumnKind};
use crate::domain::entities::document::{Document, RowData};
use crate::domain::entities::filter::{
    column_values, ColumnFilters, ColumnValues, RowView, COLUMN_VALUES_LIMIT,
};

/// Read-only views over a document for the grid, filters and forms.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryService;

impl QueryService {
    pub fn new() -> Self {
        Self
    }

    pub fn column_values(&self, document: &Document, column: &str) -> ColumnValues {
        column_values(document.rows(), column, COLUMN_VALUES_LIMIT)
    }

    /// Document positions of the rows the grid shows, in display order.
    pub fn visible_rows(
        &self,
        document: &Document,
        filters: &ColumnFilters,
        view: &RowView,
    ) -> Vec<usize> {
        view.apply(document, filters.visible_rows(document))
    }

    pub fn column_kinds(&self, document: &Document) -> Vec<ColumnKind> {
        document
            .headers()
            .iter()
            .map(|header| {
                guess_column_kind(header, document.rows().iter().map(|row| row.value(header)))
            })
            .collect()
    }

    /// Initial values for a new row in the row form.
    pub fn row_defaults(&self, document: &Document, today: NaiveDate) -> RowData {
        document
            .headers()
            .iter()
            .zip(self.column_kinds(document))
            .map(|(header, kind)| (header.clone(), default_value(kind, today)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::filter::{ColumnSort, SortDirection};

    #[test]
    fn visible_rows_combine_column_filters_search_and_sort() {
        let mut document = Document::new();
        let rows = [("Oslo", "NO", "7"), ("Paris", "FR", "12"), ("Lyon", "FR", "3"), ("Nice", "FR", "5")]
            .iter()
            .map(|(city, country, score)| -> RowData {
                [("city", city), ("country", country), ("score", score)]
                    .into_iter()
                    .map(|(key, value)| (key.to_string(), value.to_string()))
                    .collect()
            })
            .collect();
        document.load(
            vec!["city".to_string(), "country".to_string(), "score".to_string()],
            rows,
            ',',
        );
        let mut filters = ColumnFilters::default();
        filters.toggle("country", "FR");
        let view = RowView {
            search: "i".to_string(),
            sort: Some(ColumnSort {
                column: "score".to_string(),
                direction: SortDirection::Descending,
            }),
        };

        let visible = QueryService::new().visible_rows(&document, &filters, &view);

        assert_eq!(visible, [1, 3]);
    }

    #[test]
    fn row_defaults_follow_guessed_column_kinds() {
        let mut document = Document::new();
        let row: RowData = [
            ("name", "Alice"),
            ("is_admin", "true"),
            ("joined_date", "2020-01-02"),
            ("score", "12"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
        document.load(
            vec![
                "name".to_string(),
                "is_admin".to_string(),
                "joined_date".to_string(),
                "score".to_string(),
            ],
            vec![row],
            ',',
        );
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");

        let defaults = QueryService::new().row_defaults(&document, today);

        assert_eq!(defaults["name"], "");
        assert_eq!(defaults["is_admin"], "false");
        assert_eq!(defaults["joined_date"], "2025-06-01");
        assert_eq!(defaults["score"], "");
    }
}
