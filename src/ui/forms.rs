//! Small pure helpers behind the dialogs.

use std::path::Path;

pub const ROW_FORM_FIELDS_PER_PAGE: usize = 8;

pub fn page_count(field_count: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    field_count.div_ceil(per_page)
}

pub fn page_slice<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    let start = page.saturating_mul(per_page).min(items.len());
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

/// Parses a 1-based column position typed by the user into an index.
pub fn parse_target_position(input: &str, column_count: usize) -> Option<usize> {
    let position: usize = input.trim().parse().ok()?;
    (1..=column_count).contains(&position).then(|| position - 1)
}

pub fn file_name_label(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

pub fn default_save_name(path: Option<&Path>) -> String {
    path.and_then(|path| path.file_name())
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| "untitled.csv".to_string())
}
