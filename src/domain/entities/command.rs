use crate::domain::entities::document::{Document, DocumentError, FindScope, RowData, RowId};

/// A single user-issued mutation of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    UpdateCell {
        row_index: usize,
        column: String,
        value: String,
    },
    InsertRow {
        at_index: usize,
        data: Option<RowData>,
    },
    DeleteRow {
        index: usize,
    },
    UpdateRow {
        index: usize,
        data: RowData,
    },
    DeleteRows {
        indices: Vec<usize>,
    },
    FindAndReplace {
        find: String,
        replace: String,
        scope: FindScope,
        case_sensitive: bool,
    },
    MoveColumn {
        from_index: usize,
        to_index: usize,
    },
    RenameColumn {
        old_name: String,
        new_name: String,
    },
    AddColumn {
        name: String,
        at_index: Option<usize>,
    },
    DeleteColumn {
        name: String,
    },
}

impl EditCommand {
    pub fn name(&self) -> &'static str {
        match self {
            EditCommand::UpdateCell { .. } => "update_cell",
            EditCommand::InsertRow { .. } => "insert_row",
            EditCommand::DeleteRow { .. } => "delete_row",
            EditCommand::UpdateRow { .. } => "update_row",
            EditCommand::DeleteRows { .. } => "delete_rows",
            EditCommand::FindAndReplace { .. } => "find_and_replace",
            EditCommand::MoveColumn { .. } => "move_column",
            EditCommand::RenameColumn { .. } => "rename_column",
            EditCommand::AddColumn { .. } => "add_column",
            EditCommand::DeleteColumn { .. } => "delete_column",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Unchanged,
    CellUpdated,
    RowInserted(RowId),
    RowsDeleted(usize),
    RowUpdated { changed_cells: usize },
    Replaced { affected_rows: usize },
    ColumnsChanged,
}

impl Document {
    pub fn apply(&mut self, command: EditCommand) -> Result<EditOutcome, DocumentError> {
        let outcome = match command {
            EditCommand::UpdateCell {
                row_index,
                column,
                value,
            } => {
                if self.update_cell(row_index, &column, &value) {
                    EditOutcome::CellUpdated
                } else {
                    EditOutcome::Unchanged
                }
            }
            EditCommand::InsertRow { at_index, data } => {
                EditOutcome::RowInserted(self.insert_row(at_index, data))
            }
            EditCommand::DeleteRow { index } => {
                self.delete_row(index)?;
                EditOutcome::RowsDeleted(1)
            }
            EditCommand::UpdateRow { index, data } => EditOutcome::RowUpdated {
                changed_cells: self.update_row(index, &data)?,
            },
            EditCommand::DeleteRows { indices } => {
                EditOutcome::RowsDeleted(self.delete_rows(&indices)?)
            }
            EditCommand::FindAndReplace {
                find,
                replace,
                scope,
                case_sensitive,
            } => EditOutcome::Replaced {
                affected_rows: self.find_and_replace(&find, &replace, &scope, case_sensitive)?,
            },
            EditCommand::MoveColumn {
                from_index,
                to_index,
            } => {
                self.move_column(from_index, to_index)?;
                EditOutcome::ColumnsChanged
            }
            EditCommand::RenameColumn { old_name, new_name } => {
                if self.rename_column(&old_name, &new_name)? {
                    EditOutcome::ColumnsChanged
                } else {
                    EditOutcome::Unchanged
                }
            }
            EditCommand::AddColumn { name, at_index } => {
                self.add_column(&name, at_index)?;
                EditOutcome::ColumnsChanged
            }
            EditCommand::DeleteColumn { name } => {
                self.delete_column(&name)?;
                EditOutcome::ColumnsChanged
            }
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let mut document = Document::new();
        let row: RowData = [("a".to_string(), "1".to_string())].into_iter().collect();
        document.load(vec!["a".to_string()], vec![row], ',');
        document
    }

    #[test]
    fn apply_dispatches_to_document_operations() {
        let mut document = sample();

        let outcome = document
            .apply(EditCommand::AddColumn {
                name: "b".to_string(),
                at_index: None,
            })
            .expect("add column should apply");
        assert_eq!(outcome, EditOutcome::ColumnsChanged);

        let outcome = document
            .apply(EditCommand::UpdateCell {
                row_index: 0,
                column: "b".to_string(),
                value: "x".to_string(),
            })
            .expect("update should apply");
        assert_eq!(outcome, EditOutcome::CellUpdated);
        assert_eq!(document.rows()[0].value("b"), "x");
    }

    #[test]
    fn apply_reports_noop_rename_as_unchanged() {
        let mut document = sample();

        let outcome = document
            .apply(EditCommand::RenameColumn {
                old_name: "a".to_string(),
                new_name: String::new(),
            })
            .expect("rename should apply");

        assert_eq!(outcome, EditOutcome::Unchanged);
    }

    #[test]
    fn apply_propagates_rejections() {
        let mut document = sample();

        let result = document.apply(EditCommand::DeleteRow { index: 5 });

        assert!(matches!(result, Err(DocumentError::RowOutOfBounds { .. })));
    }
}
