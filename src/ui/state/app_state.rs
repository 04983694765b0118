use std::collections::BTreeSet;
use std::path::PathBuf;

use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::document::{Document, RowId};
use crate::domain::entities::edit::CellKey;
use crate::domain::entities::filter::{ColumnFilters, RowView};

/// Which dialog, if any, is layered over the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveDialog {
    FindReplace,
    ColumnManager,
    SaveConfig { save_as: bool },
    RowForm { editing: Option<RowId> },
    ColumnFilter { column: String },
}

pub struct AppState {
    pub document: Signal<Document>,
    pub file_path: Signal<Option<PathBuf>>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
    pub selected_rows: Signal<BTreeSet<RowId>>,
    pub editing_cell: Signal<Option<CellKey>>,
    pub editing_value: Signal<String>,
    pub column_filters: Signal<ColumnFilters>,
    pub row_view: Signal<RowView>,
    pub active_dialog: Signal<Option<ActiveDialog>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            document: use_signal(Document::new),
            file_path: use_signal(|| None::<PathBuf>),
            busy: use_signal(|| false),
            status: use_signal(|| "Ready".to_string()),
            selected_rows: use_signal(BTreeSet::<RowId>::new),
            editing_cell: use_signal(|| None::<CellKey>),
            editing_value: use_signal(String::new),
            column_filters: use_signal(ColumnFilters::default),
            row_view: use_signal(RowView::default),
            active_dialog: use_signal(|| None::<ActiveDialog>),
        }
    }
}
