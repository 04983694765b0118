use std::collections::BTreeSet;

use crate::domain::entities::document::RowId;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub row_id: RowId,
    pub column: String,
}

impl CellKey {
    pub fn new(row_id: RowId, column: impl Into<String>) -> Self {
        Self {
            row_id,
            column: column.into(),
        }
    }
}

/// Edits made since the last successful save. Only used as rendering hints
/// and for the unsaved-changes prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    dirty_cells: BTreeSet<CellKey>,
    new_columns: BTreeSet<String>,
}

impl ChangeSet {
    pub fn dirty_cells(&self) -> &BTreeSet<CellKey> {
        &self.dirty_cells
    }

    pub fn new_columns(&self) -> &BTreeSet<String> {
        &self.new_columns
    }

    pub fn is_empty(&self) -> bool {
        self.dirty_cells.is_empty() && self.new_columns.is_empty()
    }

    pub fn is_dirty(&self, row_id: RowId, column: &str) -> bool {
        self.dirty_cells.contains(&CellKey::new(row_id, column))
    }

    pub fn is_new_column(&self, column: &str) -> bool {
        self.new_columns.contains(column)
    }

    pub fn mark_dirty(&mut self, row_id: RowId, column: &str) {
        self.dirty_cells.insert(CellKey::new(row_id, column));
    }

    pub fn mark_new_column(&mut self, column: &str) {
        self.new_columns.insert(column.to_string());
    }

    pub fn forget_row(&mut self, row_id: RowId) {
        self.dirty_cells.retain(|key| key.row_id != row_id);
    }

    pub fn forget_column(&mut self, column: &str) {
        self.dirty_cells.retain(|key| key.column != column);
        self.new_columns.remove(column);
    }

    pub fn rename_column(&mut self, old_name: &str, new_name: &str) {
        if self.new_columns.remove(old_name) {
            self.new_columns.insert(new_name.to_string());
        }

        let renamed: Vec<CellKey> = self
            .dirty_cells
            .iter()
            .filter(|key| key.column == old_name)
            .cloned()
            .collect();
        for key in renamed {
            self.dirty_cells.remove(&key);
            self.dirty_cells.insert(CellKey::new(key.row_id, new_name));
        }
    }

    pub fn clear(&mut self) {
        self.dirty_cells.clear();
        self.new_columns.clear();
    }
}
