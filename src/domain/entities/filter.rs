use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use crate::domain::entities::document::{Document, Record};

pub const COLUMN_VALUES_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnValues {
    /// Trimmed distinct values, most frequent first.
    pub unique_values: Vec<String>,
    /// Number of distinct values before truncation.
    pub total_count: usize,
}

pub fn column_values(rows: &[Arc<Record>], column: &str, limit: usize) -> ColumnValues {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for row in rows {
        let value = row.value(column).trim();
        let next_order = counts.len();
        let entry = counts.entry(value).or_insert((0, next_order));
        entry.0 += 1;
    }

    let total_count = counts.len();
    let mut ranked: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|(_, (count_a, order_a)), (_, (count_b, order_b))| {
        count_b.cmp(count_a).then(order_a.cmp(order_b))
    });

    ColumnValues {
        unique_values: ranked
            .into_iter()
            .take(limit)
            .map(|(value, _)| value.to_string())
            .collect(),
        total_count,
    }
}

pub fn matches_selection(value: &str, selected: &BTreeSet<String>) -> bool {
    selected.is_empty() || selected.contains(value.trim())
}

/// Values containing `term`, ignoring case. An empty term keeps them all.
pub fn search_values(values: &[String], term: &str) -> Vec<String> {
    let term = term.to_lowercase();
    values
        .iter()
        .filter(|value| value.to_lowercase().contains(&term))
        .cloned()
        .collect()
}

/// Whether any cell of `row` contains the already lowercased `term`.
pub fn matches_search(row: &Record, headers: &[String], term: &str) -> bool {
    term.is_empty()
        || headers
            .iter()
            .any(|header| row.value(header).to_lowercase().contains(term))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSort {
    pub column: String,
    pub direction: SortDirection,
}

impl ColumnSort {
    /// Next state after clicking `column`'s header: ascending, then
    /// descending, then unsorted. Clicking another column starts over.
    pub fn cycle(current: Option<&ColumnSort>, column: &str) -> Option<ColumnSort> {
        let direction = match current {
            Some(sort) if sort.column == column => match sort.direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => return None,
            },
            _ => SortDirection::Ascending,
        };
        Some(ColumnSort {
            column: column.to_string(),
            direction,
        })
    }

    pub fn indicator(&self) -> &'static str {
        match self.direction {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

// Numbers compare numerically; everything else by lowercase text, then raw
// text so the order is total.
fn compare_values(a: &str, b: &str) -> Ordering {
    let (a, b) = (a.trim(), b.trim());
    if let (Ok(x), Ok(y)) = (a.parse::<f64>(), b.parse::<f64>()) {
        if let Some(ordering) = x.partial_cmp(&y) {
            return ordering;
        }
    }
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

/// Grid-only view settings: the toolbar search and the header sort. Rows
/// are reordered for display only; the document keeps its order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowView {
    pub search: String,
    pub sort: Option<ColumnSort>,
}

impl RowView {
    pub fn is_default(&self) -> bool {
        self.search.is_empty() && self.sort.is_none()
    }

    /// Narrows `positions` to rows matching the search, then orders them by
    /// the sort column. A sort on a column the document lacks is ignored,
    /// and equal values keep their document order.
    pub fn apply(&self, document: &Document, positions: Vec<usize>) -> Vec<usize> {
        let rows = document.rows();
        let term = self.search.to_lowercase();
        let mut positions: Vec<usize> = positions
            .into_iter()
            .filter(|idx| {
                rows.get(*idx)
                    .map(|row| matches_search(row, document.headers(), &term))
                    .unwrap_or(false)
            })
            .collect();

        if let Some(sort) = &self.sort {
            if document.column_index(&sort.column).is_some() {
                positions.sort_by(|a, b| {
                    let ordering =
                        compare_values(rows[*a].value(&sort.column), rows[*b].value(&sort.column));
                    match sort.direction {
                        SortDirection::Ascending => ordering,
                        SortDirection::Descending => ordering.reverse(),
                    }
                });
            }
        }
        positions
    }
}

/// Multi-select value filters, one selection per column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnFilters {
    selections: BTreeMap<String, BTreeSet<String>>,
}

impl ColumnFilters {
    pub fn is_empty(&self) -> bool {
        self.selections.values().all(BTreeSet::is_empty)
    }

    pub fn selection(&self, column: &str) -> Option<&BTreeSet<String>> {
        self.selections.get(column)
    }

    pub fn is_active(&self, column: &str) -> bool {
        self.selection(column)
            .map(|selected| !selected.is_empty())
            .unwrap_or(false)
    }

    pub fn toggle(&mut self, column: &str, value: &str) {
        let selected = self.selections.entry(column.to_string()).or_default();
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        if selected.is_empty() {
            self.selections.remove(column);
        }
    }

    /// Replaces the selection for `column`. Selecting nothing, or every
    /// distinct value the column has, removes the filter.
    pub fn set_selection(&mut self, column: &str, selected: BTreeSet<String>, all: &ColumnValues) {
        let covers_everything = all.total_count == all.unique_values.len()
            && all.unique_values.iter().all(|value| selected.contains(value));
        if selected.is_empty() || covers_everything {
            self.selections.remove(column);
        } else {
            self.selections.insert(column.to_string(), selected);
        }
    }

    pub fn clear_column(&mut self, column: &str) {
        self.selections.remove(column);
    }

    pub fn clear(&mut self) {
        self.selections.clear();
    }

    pub fn rename_column(&mut self, old_name: &str, new_name: &str) {
        if let Some(selected) = self.selections.remove(old_name) {
            self.selections.insert(new_name.to_string(), selected);
        }
    }

    /// Positions of rows passing every filter. Filters for columns the
    /// document no longer has are ignored.
    pub fn visible_rows(&self, document: &Document) -> Vec<usize> {
        let active: Vec<(&String, &BTreeSet<String>)> = self
            .selections
            .iter()
            .filter(|(column, selected)| {
                !selected.is_empty() && document.column_index(column).is_some()
            })
            .collect();

        document
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                active
                    .iter()
                    .all(|(column, selected)| matches_selection(row.value(column), selected))
            })
            .map(|(index, _)| index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::document::RowData;

    fn cities() -> Document {
        let mut document = Document::new();
        let rows = ["Paris", " Rome ", "Oslo", "Rome", "Paris", "Rome"]
            .iter()
            .map(|city| -> RowData { [("city".to_string(), city.to_string())].into_iter().collect() })
            .collect();
        document.load(vec!["city".to_string()], rows, ',');
        document
    }

    #[test]
    fn column_values_orders_by_frequency_then_first_seen() {
        let document = cities();

        let values = column_values(document.rows(), "city", COLUMN_VALUES_LIMIT);

        assert_eq!(values.unique_values, ["Rome", "Paris", "Oslo"]);
        assert_eq!(values.total_count, 3);
    }

    #[test]
    fn column_values_respects_limit_but_reports_total() {
        let document = cities();

        let values = column_values(document.rows(), "city", 1);

        assert_eq!(values.unique_values, ["Rome"]);
        assert_eq!(values.total_count, 3);
    }

    #[test]
    fn visible_rows_applies_trimmed_selection() {
        let document = cities();
        let mut filters = ColumnFilters::default();
        filters.toggle("city", "Rome");

        assert_eq!(filters.visible_rows(&document), [1, 3, 5]);

        filters.toggle("city", "Rome");
        assert!(filters.is_empty());
        assert_eq!(filters.visible_rows(&document).len(), 6);
    }

    #[test]
    fn set_selection_drops_filters_that_select_nothing_or_everything() {
        let document = cities();
        let values = column_values(document.rows(), "city", COLUMN_VALUES_LIMIT);
        let mut filters = ColumnFilters::default();

        let narrowed: BTreeSet<String> = search_values(&values.unique_values, "ROM")
            .into_iter()
            .chain(search_values(&values.unique_values, "oSL"))
            .collect();
        filters.set_selection("city", narrowed, &values);
        assert_eq!(filters.visible_rows(&document), [1, 2, 3, 5]);

        let everything: BTreeSet<String> = values.unique_values.iter().cloned().collect();
        filters.set_selection("city", everything, &values);
        assert!(filters.is_empty());

        filters.toggle("city", "Oslo");
        filters.set_selection("city", BTreeSet::new(), &values);
        assert!(filters.is_empty());
    }

    #[test]
    fn set_selection_keeps_a_full_page_when_values_were_truncated() {
        let document = cities();
        let values = column_values(document.rows(), "city", 2);
        let mut filters = ColumnFilters::default();

        filters.set_selection("city", values.unique_values.iter().cloned().collect(), &values);

        assert!(filters.is_active("city"));
        assert_eq!(filters.visible_rows(&document), [0, 1, 3, 4, 5]);
    }

    #[test]
    fn search_values_ignores_case() {
        let values = vec!["Paris".to_string(), "Rome".to_string(), "Oslo".to_string()];

        assert_eq!(search_values(&values, "rOm"), ["Rome"]);
        assert_eq!(search_values(&values, "").len(), 3);
        assert!(search_values(&values, "berlin").is_empty());
    }

    fn people() -> Document {
        let mut document = Document::new();
        let rows = [("Alice", "30"), ("bob", "9"), ("Cara", "100"), ("dan", "9")]
            .iter()
            .map(|(name, age)| -> RowData {
                [
                    ("name".to_string(), name.to_string()),
                    ("age".to_string(), age.to_string()),
                ]
                .into_iter()
                .collect()
            })
            .collect();
        document.load(vec!["name".to_string(), "age".to_string()], rows, ',');
        document
    }

    #[test]
    fn row_view_search_matches_any_column_ignoring_case() {
        let document = people();
        let all: Vec<usize> = (0..document.row_count()).collect();

        let by_name = RowView {
            search: "AL".to_string(),
            sort: None,
        };
        assert_eq!(by_name.apply(&document, all.clone()), [0]);

        let by_age = RowView {
            search: "9".to_string(),
            sort: None,
        };
        assert_eq!(by_age.apply(&document, all.clone()), [1, 3]);

        assert_eq!(RowView::default().apply(&document, all.clone()), all);
    }

    #[test]
    fn row_view_sorts_numbers_numerically_and_text_ignoring_case() {
        let document = people();
        let all: Vec<usize> = (0..document.row_count()).collect();

        let by_age = RowView {
            search: String::new(),
            sort: Some(ColumnSort {
                column: "age".to_string(),
                direction: SortDirection::Ascending,
            }),
        };
        assert_eq!(by_age.apply(&document, all.clone()), [1, 3, 0, 2]);

        let by_name_desc = RowView {
            search: String::new(),
            sort: Some(ColumnSort {
                column: "name".to_string(),
                direction: SortDirection::Descending,
            }),
        };
        assert_eq!(by_name_desc.apply(&document, all.clone()), [3, 2, 1, 0]);

        let missing = RowView {
            search: String::new(),
            sort: Some(ColumnSort {
                column: "city".to_string(),
                direction: SortDirection::Ascending,
            }),
        };
        assert_eq!(missing.apply(&document, all.clone()), all);
    }

    #[test]
    fn sorting_leaves_document_order_and_row_ids_alone() {
        let document = people();
        let ids_before: Vec<_> = document.rows().iter().map(|row| row.row_id()).collect();
        let view = RowView {
            search: String::new(),
            sort: ColumnSort::cycle(None, "age"),
        };

        let order = view.apply(&document, vec![0, 1, 2, 3]);

        let ids_after: Vec<_> = document.rows().iter().map(|row| row.row_id()).collect();
        assert_eq!(ids_before, ids_after);
        assert_eq!(document.rows()[order[0]].value("name"), "bob");
    }

    #[test]
    fn header_clicks_cycle_ascending_descending_off() {
        let first = ColumnSort::cycle(None, "age");
        assert_eq!(first.as_ref().map(|sort| sort.direction), Some(SortDirection::Ascending));

        let second = ColumnSort::cycle(first.as_ref(), "age");
        assert_eq!(second.as_ref().map(|sort| sort.direction), Some(SortDirection::Descending));

        assert_eq!(ColumnSort::cycle(second.as_ref(), "age"), None);

        let other = ColumnSort::cycle(second.as_ref(), "name");
        assert_eq!(
            other,
            Some(ColumnSort {
                column: "name".to_string(),
                direction: SortDirection::Ascending,
            })
        );
    }

    #[test]
    fn filters_on_missing_columns_are_ignored() {
        let document = cities();
        let mut filters = ColumnFilters::default();
        filters.toggle("country", "FR");

        assert_eq!(filters.visible_rows(&document).len(), 6);
    }
}
