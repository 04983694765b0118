use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::domain::entities::edit::{CellKey, ChangeSet};

pub const DEFAULT_DELIMITER: char = ',';

/// Field values of a single row keyed by column name.
pub type RowData = HashMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub u64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    row_id: RowId,
    values: RowData,
}

impl Record {
    fn from_data(row_id: RowId, headers: &[String], data: &RowData) -> Self {
        let values = headers
            .iter()
            .map(|header| {
                let value = data.get(header).cloned().unwrap_or_default();
                (header.clone(), value)
            })
            .collect();
        Self { row_id, values }
    }

    pub fn row_id(&self) -> RowId {
        self.row_id
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    /// Value of `column`, or an empty string for unknown columns.
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    pub fn values(&self) -> &RowData {
        &self.values
    }

    pub fn ordered_values<'a>(&'a self, headers: &[String]) -> Vec<&'a str> {
        headers.iter().map(|header| self.value(header)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    RowOutOfBounds { index: usize, len: usize },
    ColumnOutOfBounds { index: usize, len: usize },
    UnknownColumn(String),
    DuplicateColumn(String),
    EmptyColumnName,
    EmptySearch,
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::RowOutOfBounds { index, len } => {
                write!(f, "row {index} is out of range ({len} rows)")
            }
            DocumentError::ColumnOutOfBounds { index, len } => {
                write!(f, "column position {index} is out of range ({len} columns)")
            }
            DocumentError::UnknownColumn(name) => write!(f, "column \"{name}\" does not exist"),
            DocumentError::DuplicateColumn(name) => {
                write!(f, "a column named \"{name}\" already exists")
            }
            DocumentError::EmptyColumnName => write!(f, "column name cannot be empty"),
            DocumentError::EmptySearch => write!(f, "search text cannot be empty"),
        }
    }
}

impl std::error::Error for DocumentError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindScope {
    All,
    Column(String),
}

/// The loaded delimited file: ordered headers, rows keyed by header name,
/// the delimiter it was read with, and the edits made since the last save.
///
/// Rows are shared behind `Arc` and only copied when an operation actually
/// changes them, so a renderer can skip rows whose pointer did not move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    headers: Vec<String>,
    rows: Vec<Arc<Record>>,
    delimiter: char,
    changes: ChangeSet,
    next_row_id: u64,
    revision: u64,
    saved_revision: u64,
    loaded: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            headers: Vec::new(),
            rows: Vec::new(),
            delimiter: DEFAULT_DELIMITER,
            changes: ChangeSet::default(),
            next_row_id: 0,
            revision: 0,
            saved_revision: 0,
            loaded: false,
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Arc<Record>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Record> {
        self.rows.get(index).map(Arc::as_ref)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True once a file has been loaded, even if every row and column has
    /// since been deleted.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn set_delimiter(&mut self, delimiter: char) {
        if self.delimiter != delimiter {
            self.delimiter = delimiter;
            self.touch();
        }
    }

    /// Bumped by every mutation; lets observers detect reorders cheaply.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn dirty_cells(&self) -> &BTreeSet<CellKey> {
        self.changes.dirty_cells()
    }

    pub fn new_columns(&self) -> &BTreeSet<String> {
        self.changes.new_columns()
    }

    pub fn is_dirty(&self, row_id: RowId, column: &str) -> bool {
        self.changes.is_dirty(row_id, column)
    }

    pub fn is_new_column(&self, column: &str) -> bool {
        self.changes.is_new_column(column)
    }

    /// Structural edits (deleted rows or columns, reordering) leave no cell
    /// markers, so any mutation since the last load or save counts too.
    pub fn has_unsaved_changes(&self) -> bool {
        self.revision != self.saved_revision || !self.changes.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == column)
    }

    /// Current position of a row, which moves as rows are inserted or deleted.
    pub fn row_index(&self, row_id: RowId) -> Option<usize> {
        self.rows.iter().position(|row| row.row_id == row_id)
    }

    pub fn load(&mut self, headers: Vec<String>, rows: Vec<RowData>, delimiter: char) {
        let headers = unique_headers(headers);
        let mut loaded = Vec::with_capacity(rows.len());
        for data in &rows {
            let row_id = self.allocate_row_id();
            loaded.push(Arc::new(Record::from_data(row_id, &headers, data)));
        }

        self.headers = headers;
        self.rows = loaded;
        self.delimiter = delimiter;
        self.changes.clear();
        self.loaded = true;
        self.touch();
        self.saved_revision = self.revision;
    }

    /// Clears the change markers once the document has been written out.
    pub fn mark_saved(&mut self) {
        self.changes.clear();
        self.touch();
        self.saved_revision = self.revision;
    }

    /// Out-of-range rows and unknown columns are ignored; returns whether the
    /// cell was written.
    pub fn update_cell(&mut self, row_index: usize, column: &str, value: &str) -> bool {
        if !self.headers.iter().any(|header| header == column) {
            return false;
        }
        let Some(row) = self.rows.get_mut(row_index) else {
            return false;
        };

        let record = Arc::make_mut(row);
        record.values.insert(column.to_string(), value.to_string());
        let row_id = record.row_id;
        self.changes.mark_dirty(row_id, column);
        self.touch();
        true
    }

    pub fn insert_row(&mut self, at_index: usize, data: Option<RowData>) -> RowId {
        let row_id = self.allocate_row_id();
        let record = match data {
            Some(data) => Record::from_data(row_id, &self.headers, &data),
            None => Record::from_data(row_id, &self.headers, &RowData::new()),
        };

        let at_index = at_index.min(self.rows.len());
        self.rows.insert(at_index, Arc::new(record));
        for header in &self.headers {
            self.changes.mark_dirty(row_id, header);
        }
        self.touch();
        row_id
    }

    pub fn delete_row(&mut self, index: usize) -> Result<Arc<Record>, DocumentError> {
        self.check_row(index)?;

        let removed = self.rows.remove(index);
        self.changes.forget_row(removed.row_id);
        self.touch();
        Ok(removed)
    }

    /// Replaces every value of the row at `index`, keeping its row id. Only
    /// cells whose value differs are marked dirty. Returns the number of
    /// changed cells.
    pub fn update_row(&mut self, index: usize, data: &RowData) -> Result<usize, DocumentError> {
        self.check_row(index)?;

        let current = &self.rows[index];
        let changed: Vec<(String, String)> = self
            .headers
            .iter()
            .filter_map(|header| {
                let next = data.get(header).cloned().unwrap_or_default();
                (current.value(header) != next).then(|| (header.clone(), next))
            })
            .collect();
        if changed.is_empty() {
            return Ok(0);
        }

        let record = Arc::make_mut(&mut self.rows[index]);
        let row_id = record.row_id;
        for (column, value) in &changed {
            record.values.insert(column.clone(), value.clone());
            self.changes.mark_dirty(row_id, column);
        }
        self.touch();
        Ok(changed.len())
    }

    /// Removes every row whose position (before removal) is in `indices`.
    pub fn delete_rows(&mut self, indices: &[usize]) -> Result<usize, DocumentError> {
        let doomed: BTreeSet<usize> = indices.iter().copied().collect();
        if let Some(&last) = doomed.last() {
            self.check_row(last)?;
        } else {
            return Ok(0);
        }

        let mut position = 0;
        let mut removed = Vec::with_capacity(doomed.len());
        self.rows.retain(|row| {
            let keep = !doomed.contains(&position);
            if !keep {
                removed.push(row.row_id);
            }
            position += 1;
            keep
        });
        for row_id in &removed {
            self.changes.forget_row(*row_id);
        }
        self.touch();
        Ok(removed.len())
    }

    /// Literal replacement of `find` in the scoped cells. Returns how many
    /// rows changed; a row counts once however many of its cells changed.
    pub fn find_and_replace(
        &mut self,
        find: &str,
        replace: &str,
        scope: &FindScope,
        case_sensitive: bool,
    ) -> Result<usize, DocumentError> {
        if find.is_empty() {
            return Err(DocumentError::EmptySearch);
        }

        let columns: Vec<String> = match scope {
            FindScope::All => self.headers.clone(),
            FindScope::Column(name) => self
                .headers
                .iter()
                .filter(|header| *header == name)
                .cloned()
                .collect(),
        };
        let folded_find: Vec<char> = find.chars().flat_map(char::to_lowercase).collect();

        let mut affected = 0;
        for row in self.rows.iter_mut() {
            let replacements: Vec<(&String, String)> = columns
                .iter()
                .filter_map(|column| {
                    let current = row.value(column);
                    let next = if case_sensitive {
                        current.replace(find, replace)
                    } else {
                        replace_ignore_case(current, &folded_find, replace)
                    };
                    (next != current).then_some((column, next))
                })
                .collect();
            if replacements.is_empty() {
                continue;
            }

            let record = Arc::make_mut(row);
            for (column, value) in replacements {
                record.values.insert(column.clone(), value);
                self.changes.mark_dirty(record.row_id, column);
            }
            affected += 1;
        }

        if affected > 0 {
            self.touch();
        }
        Ok(affected)
    }

    pub fn move_column(&mut self, from_index: usize, to_index: usize) -> Result<(), DocumentError> {
        let len = self.headers.len();
        for index in [from_index, to_index] {
            if index >= len {
                return Err(DocumentError::ColumnOutOfBounds { index, len });
            }
        }
        if from_index == to_index {
            return Ok(());
        }

        let header = self.headers.remove(from_index);
        self.headers.insert(to_index, header);
        self.touch();
        Ok(())
    }

    /// Renames a column everywhere, carrying its change markers along.
    /// Returns `Ok(false)` when the new name is blank or unchanged.
    pub fn rename_column(&mut self, old_name: &str, new_name: &str) -> Result<bool, DocumentError> {
        if new_name.trim().is_empty() || new_name == old_name {
            return Ok(false);
        }
        let Some(position) = self.column_index(old_name) else {
            return Err(DocumentError::UnknownColumn(old_name.to_string()));
        };
        if self.column_index(new_name).is_some() {
            return Err(DocumentError::DuplicateColumn(new_name.to_string()));
        }

        self.headers[position] = new_name.to_string();
        for row in self.rows.iter_mut() {
            let record = Arc::make_mut(row);
            let value = record.values.remove(old_name).unwrap_or_default();
            record.values.insert(new_name.to_string(), value);
        }
        self.changes.rename_column(old_name, new_name);
        self.touch();
        Ok(true)
    }

    pub fn add_column(&mut self, name: &str, at_index: Option<usize>) -> Result<(), DocumentError> {
        if name.trim().is_empty() {
            return Err(DocumentError::EmptyColumnName);
        }
        if self.column_index(name).is_some() {
            return Err(DocumentError::DuplicateColumn(name.to_string()));
        }

        let position = at_index
            .unwrap_or(self.headers.len())
            .min(self.headers.len());
        self.headers.insert(position, name.to_string());
        for row in self.rows.iter_mut() {
            Arc::make_mut(row)
                .values
                .insert(name.to_string(), String::new());
        }
        self.changes.mark_new_column(name);
        self.touch();
        Ok(())
    }

    pub fn delete_column(&mut self, name: &str) -> Result<(), DocumentError> {
        let Some(position) = self.column_index(name) else {
            return Err(DocumentError::UnknownColumn(name.to_string()));
        };

        self.headers.remove(position);
        for row in self.rows.iter_mut() {
            Arc::make_mut(row).values.remove(name);
        }
        self.changes.forget_column(name);
        self.touch();
        Ok(())
    }

    fn check_row(&self, index: usize) -> Result<(), DocumentError> {
        if index < self.rows.len() {
            Ok(())
        } else {
            Err(DocumentError::RowOutOfBounds {
                index,
                len: self.rows.len(),
            })
        }
    }

    fn allocate_row_id(&mut self) -> RowId {
        let row_id = RowId(self.next_row_id);
        self.next_row_id += 1;
        row_id
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

/// Makes header names unique by suffixing repeats with `_1`, `_2`, ...
pub fn unique_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut result = Vec::with_capacity(headers.len());
    for header in headers {
        let mut candidate = header.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{header}_{suffix}");
            suffix += 1;
        }
        seen.insert(candidate.clone());
        result.push(candidate);
    }
    result
}

fn replace_ignore_case(haystack: &str, folded_find: &[char], replacement: &str) -> String {
    let mut result = String::with_capacity(haystack.len());
    let mut offset = 0;
    while offset < haystack.len() {
        let rest = &haystack[offset..];
        if let Some(len) = match_len_ignore_case(rest, folded_find) {
            result.push_str(replacement);
            offset += len;
            continue;
        }
        let Some(ch) = rest.chars().next() else {
            break;
        };
        result.push(ch);
        offset += ch.len_utf8();
    }
    result
}

// Byte length of the prefix of `text` that case-folds to `folded_find`.
fn match_len_ignore_case(text: &str, folded_find: &[char]) -> Option<usize> {
    if folded_find.is_empty() {
        return None;
    }
    let mut matched = 0;
    for (offset, ch) in text.char_indices() {
        for lower in ch.to_lowercase() {
            if folded_find.get(matched) != Some(&lower) {
                return None;
            }
            matched += 1;
        }
        if matched == folded_find.len() {
            return Some(offset + ch.len_utf8());
        }
    }
    None
}
