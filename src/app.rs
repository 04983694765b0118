use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Local;
use dioxus::prelude::*;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use crate::config::AppConfig;
use crate::domain::column_type::{classify_cell, CellKind};
use crate::domain::entities::command::{EditCommand, EditOutcome};
use crate::domain::entities::document::{Record, RowData};
use crate::domain::entities::edit::CellKey;
use crate::domain::entities::filter::{ColumnSort, RowView};
use crate::domain::entities::save::{delimiter_label, SaveOptions};
use crate::infra::fs::local_store::LocalFileStore;
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::components::apply_edit;
use crate::ui::components::column_filter::ColumnFilterPanel;
use crate::ui::components::column_manager::ColumnManagerDialog;
use crate::ui::components::find_replace::FindReplaceDialog;
use crate::ui::components::row_form::RowFormDialog;
use crate::ui::components::save_config::SaveConfigDialog;
use crate::ui::forms::{default_save_name, file_name_label};
use crate::ui::state::app_state::{ActiveDialog, AppState};
use crate::ui::styles::{
    boolean_badge_style, cell_style, root_container_style, row_style, table_container_style,
    table_header_cell_style, toolbar_style,
};
use crate::usecase::services::document_service::DocumentService;
use crate::usecase::services::query_service::QueryService;

const CSV_EXTENSIONS: &[&str] = &["csv", "tsv", "txt"];
const ROW_NUMBER_CELL_STYLE: &str =
    "border: 1px solid #ddd; padding: 4px; text-align: right; color: #888; white-space: nowrap;";
const ACTION_CELL_STYLE: &str = "border: 1px solid #ddd; padding: 2px 4px; white-space: nowrap;";
const ACTION_BUTTON_STYLE: &str =
    "border: none; background: transparent; cursor: pointer; padding: 0 4px;";

fn confirm(title: &str, description: &str) -> bool {
    MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title(title)
        .set_description(description)
        .set_buttons(MessageButtons::YesNo)
        .show()
        == MessageDialogResult::Yes
}

#[component]
pub fn App() -> Element {
    let config = use_context::<AppConfig>();

    let AppState {
        mut document,
        mut file_path,
        mut busy,
        mut status,
        mut selected_rows,
        mut editing_cell,
        mut editing_value,
        mut column_filters,
        mut row_view,
        mut active_dialog,
    } = AppState::new();

    let document_service = use_hook(|| Arc::new(DocumentService::new(Arc::new(LocalFileStore))));
    let query_service = QueryService::new();

    let snapshot = document.read().clone();
    let visible_rows =
        query_service.visible_rows(&snapshot, &column_filters.read(), &row_view.read());
    let headers = snapshot.headers().to_vec();
    let rows = snapshot.rows();
    let delimiter = snapshot.delimiter();
    let visible: Vec<(usize, Arc<Record>)> = visible_rows
        .into_iter()
        .filter_map(|idx| rows.get(idx).cloned().map(|row| (idx, row)))
        .collect();
    let visible_ids: Vec<_> = visible.iter().map(|(_, row)| row.row_id()).collect();
    let selected_snapshot = selected_rows();
    let editing_snapshot = editing_cell();
    let filters_snapshot = column_filters();
    let view_snapshot = row_view();
    let file_path_snapshot = file_path();
    let is_busy = busy();
    let has_document = snapshot.is_loaded();
    let all_visible_selected =
        !visible_ids.is_empty() && visible_ids.iter().all(|id| selected_snapshot.contains(id));

    let file_label = file_path_snapshot
        .as_deref()
        .map(file_name_label)
        .unwrap_or_else(|| "No file".to_string());
    let edited_cells = snapshot.dirty_cells().len();
    let unsaved_marker = if edited_cells > 0 {
        format!(" (unsaved, {edited_cells} edited cells)")
    } else if snapshot.has_unsaved_changes() {
        " (unsaved)".to_string()
    } else {
        String::new()
    };
    let row_summary = if visible.len() == rows.len() {
        format!("{} rows", rows.len())
    } else {
        format!("{} of {} rows", visible.len(), rows.len())
    };

    let service_for_open = document_service.clone();
    let open_file = move |_: MouseEvent| {
        if document.read().has_unsaved_changes()
            && !confirm("Unsaved changes", "Discard unsaved changes and open another file?")
        {
            return;
        }
        let Some(path) = FileDialog::new()
            .add_filter("CSV", CSV_EXTENSIONS)
            .add_filter("All files", &["*"])
            .pick_file()
        else {
            return;
        };

        *busy.write() = true;
        let result = run_blocking("open", || {
            service_for_open.open_into(&mut document.write(), &path)
        });
        match result {
            Ok(summary) => {
                selected_rows.write().clear();
                column_filters.write().clear();
                row_view.set(RowView::default());
                *editing_cell.write() = None;
                *active_dialog.write() = None;
                let directive_note = if summary.had_sep_directive { ", sep= line" } else { "" };
                *status.write() = format!(
                    "Loaded {} rows and {} columns from {} (delimiter {}{directive_note})",
                    summary.row_count,
                    summary.column_count,
                    file_name_label(&summary.path),
                    delimiter_label(summary.delimiter)
                );
                file_path.set(Some(path));
            }
            Err(err) => {
                *status.write() = format!("Open failed: {err:#}");
            }
        }
        *busy.write() = false;
    };

    let service_for_save = document_service.clone();
    let mut save_document = move |save_as: bool, options: SaveOptions| {
        let current = file_path();
        let target = match current.clone() {
            Some(path) if !save_as => Some(path),
            _ => FileDialog::new()
                .add_filter("CSV", CSV_EXTENSIONS)
                .set_file_name(default_save_name(current.as_deref()))
                .save_file(),
        };
        let Some(path) = target else {
            return;
        };

        *busy.write() = true;
        let result = run_blocking("save", || {
            service_for_save.save(&mut document.write(), &path, &options)
        });
        match result {
            Ok(summary) => {
                *status.write() = format!(
                    "Saved {} rows to {}",
                    summary.row_count,
                    file_name_label(&summary.path)
                );
                file_path.set(Some(path));
                *active_dialog.write() = None;
            }
            Err(err) => {
                *status.write() = format!("Save failed: {err:#}");
            }
        }
        *busy.write() = false;
    };

    let delete_selected = move |_: MouseEvent| {
        let indices: Vec<usize> = {
            let snapshot = document.read();
            let selected = selected_rows.read();
            snapshot
                .rows()
                .iter()
                .enumerate()
                .filter(|(_, row)| selected.contains(&row.row_id()))
                .map(|(idx, _)| idx)
                .collect()
        };
        if indices.is_empty() {
            *status.write() = "No rows selected".to_string();
            return;
        }
        if !confirm("Delete rows", &format!("Delete {} selected rows?", indices.len())) {
            return;
        }
        if let Some(EditOutcome::RowsDeleted(count)) =
            apply_edit(document, status, EditCommand::DeleteRows { indices })
        {
            selected_rows.write().clear();
            *status.write() = format!("Deleted {count} rows");
        }
    };

    let dialog = match active_dialog() {
        Some(ActiveDialog::FindReplace) => rsx!(FindReplaceDialog {
            headers: headers.clone(),
            document,
            status,
            on_close: move |_| active_dialog.set(None),
        }),
        Some(ActiveDialog::ColumnManager) => rsx!(ColumnManagerDialog {
            document,
            status,
            column_filters,
            on_close: move |_| active_dialog.set(None),
        }),
        Some(ActiveDialog::SaveConfig { save_as }) => {
            let initial_delimiter = if file_path_snapshot.is_some() {
                delimiter
            } else {
                config.save.default_delimiter
            };
            rsx!(SaveConfigDialog {
                save_as,
                initial: SaveOptions::for_delimiter(initial_delimiter, config.save.include_bom),
                on_confirm: move |options: SaveOptions| save_document(save_as, options),
                on_cancel: move |_| active_dialog.set(None),
            })
        }
        Some(ActiveDialog::RowForm { editing }) => {
            let initial = match editing {
                Some(row_id) => snapshot
                    .row_index(row_id)
                    .and_then(|idx| snapshot.row(idx))
                    .map(|row| row.values().clone()),
                None => Some(query_service.row_defaults(&snapshot, Local::now().date_naive())),
            };
            let kinds = query_service.column_kinds(&snapshot);
            match initial {
                Some(initial) => rsx!(RowFormDialog {
                    headers: headers.clone(),
                    kinds,
                    initial,
                    editing: editing.is_some(),
                    on_save: move |data: RowData| {
                        let command = match editing {
                            Some(row_id) => {
                                let Some(index) = document.read().row_index(row_id) else {
                                    *status.write() = "The row no longer exists".to_string();
                                    active_dialog.set(None);
                                    return;
                                };
                                EditCommand::UpdateRow { index, data }
                            }
                            None => EditCommand::InsertRow {
                                at_index: document.read().row_count(),
                                data: Some(data),
                            },
                        };
                        match apply_edit(document, status, command) {
                            Some(EditOutcome::RowUpdated { changed_cells }) => {
                                *status.write() = format!("Updated {changed_cells} cells");
                                active_dialog.set(None);
                            }
                            Some(_) => {
                                *status.write() = "Row added".to_string();
                                active_dialog.set(None);
                            }
                            None => {}
                        }
                    },
                    on_cancel: move |_| active_dialog.set(None),
                }),
                None => rsx!(),
            }
        }
        Some(ActiveDialog::ColumnFilter { column }) => {
            let values = query_service.column_values(&snapshot, &column);
            let selected = filters_snapshot
                .selection(&column)
                .cloned()
                .unwrap_or_default();
            let column_for_toggle = column.clone();
            let column_for_select = column.clone();
            let column_for_clear = column.clone();
            let values_for_select = values.clone();
            rsx!(ColumnFilterPanel {
                column,
                values,
                selected,
                on_toggle: move |value: String| {
                    column_filters.write().toggle(&column_for_toggle, &value);
                },
                on_select: move |chosen: BTreeSet<String>| {
                    column_filters
                        .write()
                        .set_selection(&column_for_select, chosen, &values_for_select);
                },
                on_clear: move |_| column_filters.write().clear_column(&column_for_clear),
                on_close: move |_| active_dialog.set(None),
            })
        }
        None => rsx!(),
    };

    rsx! {
        div { style: "{root_container_style()}",
            div { style: "{toolbar_style()}",
                button { disabled: is_busy, onclick: open_file, "Open" }
                button {
                    disabled: is_busy || !has_document,
                    onclick: move |_| {
                        let save_as = file_path().is_none();
                        active_dialog.set(Some(ActiveDialog::SaveConfig { save_as }));
                    },
                    "Save"
                }
                button {
                    disabled: is_busy || !has_document,
                    onclick: move |_| active_dialog.set(Some(ActiveDialog::SaveConfig { save_as: true })),
                    "Save As"
                }
                span { style: "width: 1px; height: 20px; background: #ddd;" }
                button {
                    disabled: !has_document,
                    onclick: move |_| active_dialog.set(Some(ActiveDialog::RowForm { editing: None })),
                    "Add Row"
                }
                button {
                    disabled: selected_snapshot.is_empty(),
                    onclick: delete_selected,
                    "Delete Selected ({selected_snapshot.len()})"
                }
                button {
                    disabled: !has_document,
                    onclick: move |_| active_dialog.set(Some(ActiveDialog::FindReplace)),
                    "Find & Replace"
                }
                button {
                    disabled: !has_document,
                    onclick: move |_| active_dialog.set(Some(ActiveDialog::ColumnManager)),
                    "Columns"
                }
                input {
                    style: "margin-left: 8px; padding: 4px 8px; min-width: 200px;",
                    disabled: !has_document,
                    placeholder: "Search all columns…",
                    value: "{view_snapshot.search}",
                    oninput: move |event| row_view.write().search = event.value(),
                }
                if !filters_snapshot.is_empty() {
                    button {
                        onclick: move |_| column_filters.write().clear(),
                        "Clear Filters"
                    }
                }
                if !view_snapshot.is_default() {
                    button {
                        onclick: move |_| row_view.set(RowView::default()),
                        "Reset View"
                    }
                }
            }
            div { style: "margin-bottom: 8px; color: #444; display: flex; gap: 16px;",
                span { "{file_label}{unsaved_marker}" }
                if has_document {
                    span { "{row_summary}, {headers.len()} columns, delimiter {delimiter_label(delimiter)}" }
                }
                span { style: "margin-left: auto;",
                    if is_busy { "Working…" } else { "{status}" }
                }
            }

            if !has_document {
                div { style: "flex: 1; display: flex; align-items: center; justify-content: center; color: #888;",
                    "Open a CSV file to start editing."
                }
            } else {
                div { style: "{table_container_style()}",
                    table { style: "border-collapse: collapse; font-size: 13px;",
                        thead {
                            tr {
                                th { style: "{table_header_cell_style(false)}",
                                    input {
                                        r#type: "checkbox",
                                        checked: all_visible_selected,
                                        onclick: move |_| {
                                            let mut selected = selected_rows.write();
                                            if all_visible_selected {
                                                for id in &visible_ids {
                                                    selected.remove(id);
                                                }
                                            } else {
                                                selected.extend(visible_ids.iter().copied());
                                            }
                                        }
                                    }
                                }
                                th { style: "{table_header_cell_style(false)}", "#" }
                                th { style: "{table_header_cell_style(false)}", "" }
                                {headers.iter().map(|header| {
                                    let is_new = snapshot.is_new_column(header);
                                    let filter_active = filters_snapshot.is_active(header);
                                    let filter_color = if filter_active { "#2563eb" } else { "#888" };
                                    let column = header.clone();
                                    let column_for_sort = header.clone();
                                    let sort_indicator = view_snapshot
                                        .sort
                                        .as_ref()
                                        .filter(|sort| &sort.column == header)
                                        .map(ColumnSort::indicator)
                                        .unwrap_or("");
                                    rsx!(
                                        th { key: "{header}", style: "{table_header_cell_style(is_new)}",
                                            span {
                                                style: "cursor: pointer; user-select: none;",
                                                title: "Sort",
                                                onclick: move |_| {
                                                    let next = ColumnSort::cycle(row_view.read().sort.as_ref(), &column_for_sort);
                                                    row_view.write().sort = next;
                                                },
                                                "{header} {sort_indicator}"
                                            }
                                            button {
                                                style: "{ACTION_BUTTON_STYLE} color: {filter_color};",
                                                title: "Filter",
                                                onclick: move |_| {
                                                    active_dialog.set(Some(ActiveDialog::ColumnFilter {
                                                        column: column.clone(),
                                                    }));
                                                },
                                                "▾"
                                            }
                                        }
                                    )
                                })}
                            }
                        }
                        tbody {
                            {visible.iter().map(|(row_idx, record)| {
                                let row_idx = *row_idx;
                                let row_id = record.row_id();
                                let first_column = headers.first().cloned();
                                let is_selected = selected_snapshot.contains(&row_id);
                                rsx!(
                                    tr { key: "{row_id}", style: "{row_style(is_selected)}",
                                        td { style: "border: 1px solid #ddd; padding: 4px; text-align: center;",
                                            input {
                                                r#type: "checkbox",
                                                checked: is_selected,
                                                onclick: move |_| {
                                                    let mut selected = selected_rows.write();
                                                    if !selected.remove(&row_id) {
                                                        selected.insert(row_id);
                                                    }
                                                }
                                            }
                                        }
                                        td { style: ROW_NUMBER_CELL_STYLE, "{row_idx + 1}" }
                                        td { style: ACTION_CELL_STYLE,
                                            button {
                                                style: ACTION_BUTTON_STYLE,
                                                title: "Edit row",
                                                onclick: move |_| {
                                                    active_dialog.set(Some(ActiveDialog::RowForm { editing: Some(row_id) }));
                                                },
                                                "✎"
                                            }
                                            button {
                                                style: ACTION_BUTTON_STYLE,
                                                title: "Insert row below",
                                                onclick: move |_| {
                                                    let Some(index) = document.read().row_index(row_id) else {
                                                        return;
                                                    };
                                                    let command = EditCommand::InsertRow { at_index: index + 1, data: None };
                                                    if let Some(EditOutcome::RowInserted(new_row_id)) = apply_edit(document, status, command) {
                                                        *status.write() = format!("Inserted row {}", index + 2);
                                                        if let Some(column) = first_column.clone() {
                                                            *editing_cell.write() = Some(CellKey::new(new_row_id, column));
                                                            editing_value.set(String::new());
                                                        }
                                                    }
                                                },
                                                "+"
                                            }
                                            button {
                                                style: "{ACTION_BUTTON_STYLE} color: #b91c1c;",
                                                title: "Delete row",
                                                onclick: move |_| {
                                                    let Some(index) = document.read().row_index(row_id) else {
                                                        return;
                                                    };
                                                    if apply_edit(document, status, EditCommand::DeleteRow { index }).is_some() {
                                                        selected_rows.write().remove(&row_id);
                                                        *status.write() = format!("Deleted row {}", index + 1);
                                                    }
                                                },
                                                "×"
                                            }
                                        }
                                        {headers.iter().map(|header| {
                                            let value = record.value(header).to_string();
                                            let cell_key = CellKey::new(row_id, header.clone());
                                            let kind = classify_cell(&value);
                                            let style = cell_style(
                                                kind,
                                                snapshot.is_dirty(row_id, header),
                                                snapshot.is_new_column(header),
                                            );
                                            let is_editing = editing_snapshot.as_ref() == Some(&cell_key);
                                            if is_editing {
                                                rsx!(
                                                    td { key: "{header}", style: "{style}",
                                                        input {
                                                            value: editing_value(),
                                                            autofocus: true,
                                                            oninput: move |event| editing_value.set(event.value()),
                                                            onkeydown: move |event| {
                                                                if event.key() == Key::Enter {
                                                                    let next_value = editing_value();
                                                                    let row_index = document.read().row_index(cell_key.row_id);
                                                                    if let Some(row_index) = row_index {
                                                                        apply_edit(document, status, EditCommand::UpdateCell {
                                                                            row_index,
                                                                            column: cell_key.column.clone(),
                                                                            value: next_value,
                                                                        });
                                                                    }
                                                                    *editing_cell.write() = None;
                                                                    editing_value.set(String::new());
                                                                } else if event.key() == Key::Escape {
                                                                    *editing_cell.write() = None;
                                                                    editing_value.set(String::new());
                                                                }
                                                            }
                                                        }
                                                    }
                                                )
                                            } else {
                                                let is_boolean = kind == CellKind::Boolean;
                                                let is_true = value.trim().eq_ignore_ascii_case("true");
                                                let value_for_edit = value.clone();
                                                rsx!(
                                                    td {
                                                        key: "{header}",
                                                        style: "{style}",
                                                        title: "{value}",
                                                        ondoubleclick: move |_| {
                                                            *editing_cell.write() = Some(cell_key.clone());
                                                            editing_value.set(value_for_edit.clone());
                                                        },
                                                        if is_boolean {
                                                            span { style: boolean_badge_style(is_true), "{value}" }
                                                        } else {
                                                            "{value}"
                                                        }
                                                    }
                                                )
                                            }
                                        })}
                                    }
                                )
                            })}
                        }
                    }
                }
            }

            {dialog}
        }
    }
}
