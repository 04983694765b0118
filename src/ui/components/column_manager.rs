use dioxus::prelude::*;
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use crate::domain::entities::command::{EditCommand, EditOutcome};
use crate::domain::entities::document::Document;
use crate::domain::entities::filter::ColumnFilters;
use crate::ui::components::apply_edit;
use crate::ui::forms::parse_target_position;
use crate::ui::styles::{MODAL_BACKDROP_STYLE, MODAL_BODY_STYLE, MODAL_FOOTER_STYLE, MODAL_TITLE_STYLE};

const SMALL_BUTTON_STYLE: &str = "border: 1px solid #bbb; background: #fff; padding: 2px 8px; border-radius: 4px; cursor: pointer;";

/// Where a new column goes: `None` appends it.
fn insert_label(headers: &[String], at_index: Option<usize>) -> String {
    match at_index {
        Some(0) => "At the start".to_string(),
        Some(idx) => headers
            .get(idx - 1)
            .map(|header| format!("After \"{header}\""))
            .unwrap_or_else(|| "At the end".to_string()),
        None => "At the end".to_string(),
    }
}

#[component]
pub fn ColumnManagerDialog(
    document: Signal<Document>,
    mut status: Signal<String>,
    mut column_filters: Signal<ColumnFilters>,
    on_close: EventHandler<()>,
) -> Element {
    let mut renaming = use_signal(|| None::<String>);
    let mut rename_value = use_signal(String::new);
    let mut moving = use_signal(|| None::<usize>);
    let mut move_target = use_signal(String::new);
    let mut new_column_name = use_signal(String::new);
    let mut insert_at = use_signal(|| None::<usize>);

    let (headers, new_columns) = {
        let snapshot = document.read();
        (snapshot.headers().to_vec(), snapshot.new_columns().clone())
    };
    let column_count = headers.len();
    let renaming_snapshot = renaming();
    let moving_snapshot = moving();
    let insert_snapshot = insert_at();

    rsx! {
        div { style: MODAL_BACKDROP_STYLE,
            div { style: MODAL_BODY_STYLE,
                div { style: MODAL_TITLE_STYLE, "Manage Columns" }
                div { style: "display: flex; flex-direction: column; gap: 4px; margin-bottom: 12px;",
                    {headers.iter().enumerate().map(|(idx, header)| {
                        let header = header.clone();
                        let is_new = new_columns.contains(&header);
                        let is_renaming = renaming_snapshot.as_deref() == Some(header.as_str());
                        let is_moving = moving_snapshot == Some(idx);
                        let header_for_rename = header.clone();
                        let header_for_start_rename = header.clone();
                        let header_for_delete = header.clone();
                        rsx!(
                            div {
                                key: "{header}",
                                style: "display: flex; align-items: center; gap: 6px; padding: 4px; border-bottom: 1px solid #eee;",
                                span { style: "width: 28px; color: #888; text-align: right;", "{idx + 1}" }
                                if is_renaming {
                                    input {
                                        style: "flex: 1;",
                                        value: rename_value(),
                                        autofocus: true,
                                        oninput: move |event| rename_value.set(event.value()),
                                        onkeydown: move |event| {
                                            if event.key() == Key::Enter {
                                                let new_name = rename_value().trim().to_string();
                                                let command = EditCommand::RenameColumn {
                                                    old_name: header_for_rename.clone(),
                                                    new_name: new_name.clone(),
                                                };
                                                if let Some(outcome) = apply_edit(document, status, command) {
                                                    if outcome == EditOutcome::ColumnsChanged {
                                                        column_filters
                                                            .write()
                                                            .rename_column(&header_for_rename, &new_name);
                                                        *status.write() = format!("Renamed column to {new_name}");
                                                    }
                                                    renaming.set(None);
                                                }
                                            } else if event.key() == Key::Escape {
                                                renaming.set(None);
                                            }
                                        }
                                    }
                                } else {
                                    span { style: "flex: 1;",
                                        "{header}"
                                        if is_new {
                                            span { style: "margin-left: 6px; font-size: 10px; color: #2563eb;", "new" }
                                        }
                                    }
                                }
                                if is_moving {
                                    input {
                                        style: "width: 60px;",
                                        r#type: "number",
                                        min: "1",
                                        max: "{column_count}",
                                        value: move_target(),
                                        autofocus: true,
                                        oninput: move |event| move_target.set(event.value()),
                                        onkeydown: move |event| {
                                            if event.key() == Key::Enter {
                                                let Some(to_index) = parse_target_position(&move_target(), column_count) else {
                                                    *status.write() = format!("Enter a position between 1 and {column_count}");
                                                    return;
                                                };
                                                let command = EditCommand::MoveColumn { from_index: idx, to_index };
                                                if apply_edit(document, status, command).is_some() {
                                                    moving.set(None);
                                                }
                                            } else if event.key() == Key::Escape {
                                                moving.set(None);
                                            }
                                        }
                                    }
                                }
                                button {
                                    style: SMALL_BUTTON_STYLE,
                                    disabled: idx == 0,
                                    onclick: move |_| {
                                        apply_edit(document, status, EditCommand::MoveColumn { from_index: idx, to_index: idx.saturating_sub(1) });
                                    },
                                    "↑"
                                }
                                button {
                                    style: SMALL_BUTTON_STYLE,
                                    disabled: idx + 1 >= column_count,
                                    onclick: move |_| {
                                        apply_edit(document, status, EditCommand::MoveColumn { from_index: idx, to_index: idx + 1 });
                                    },
                                    "↓"
                                }
                                button {
                                    style: SMALL_BUTTON_STYLE,
                                    onclick: move |_| {
                                        move_target.set((idx + 1).to_string());
                                        moving.set(Some(idx));
                                    },
                                    "Move to…"
                                }
                                button {
                                    style: SMALL_BUTTON_STYLE,
                                    onclick: move |_| {
                                        rename_value.set(header_for_start_rename.clone());
                                        renaming.set(Some(header_for_start_rename.clone()));
                                    },
                                    "Rename"
                                }
                                button {
                                    style: "{SMALL_BUTTON_STYLE} color: #b91c1c;",
                                    onclick: move |_| {
                                        let confirm = MessageDialog::new()
                                            .set_level(MessageLevel::Warning)
                                            .set_title("Delete column")
                                            .set_description(format!(
                                                "Delete column \"{header_for_delete}\" and all of its values?"
                                            ))
                                            .set_buttons(MessageButtons::YesNo)
                                            .show();
                                        if confirm != MessageDialogResult::Yes {
                                            return;
                                        }
                                        let command = EditCommand::DeleteColumn { name: header_for_delete.clone() };
                                        if apply_edit(document, status, command).is_some() {
                                            column_filters.write().clear_column(&header_for_delete);
                                            if renaming().as_deref() == Some(header_for_delete.as_str()) {
                                                renaming.set(None);
                                            }
                                            moving.set(None);
                                            *status.write() = format!("Deleted column {header_for_delete}");
                                        }
                                    },
                                    "Delete"
                                }
                            }
                        )
                    })}
                }
                div { style: "display: grid; grid-template-columns: 1fr 1fr auto; gap: 8px; align-items: center;",
                    input {
                        value: new_column_name(),
                        placeholder: "New column name",
                        oninput: move |event| new_column_name.set(event.value()),
                    }
                    select {
                        onchange: move |event| {
                            insert_at.set(event.value().parse::<usize>().ok());
                        },
                        option { value: "end", selected: insert_snapshot.is_none(), "At the end" }
                        option { value: "0", selected: insert_snapshot == Some(0), "At the start" }
                        for idx in 0..column_count {
                            option {
                                key: "{idx}",
                                value: "{idx + 1}",
                                selected: insert_snapshot == Some(idx + 1),
                                "{insert_label(&headers, Some(idx + 1))}"
                            }
                        }
                    }
                    button {
                        disabled: new_column_name().trim().is_empty(),
                        onclick: move |_| {
                            let name = new_column_name().trim().to_string();
                            let at_index = insert_at().filter(|idx| *idx < column_count);
                            let command = EditCommand::AddColumn { name: name.clone(), at_index };
                            if apply_edit(document, status, command).is_some() {
                                *status.write() = format!("Added column {name}");
                                new_column_name.set(String::new());
                                insert_at.set(None);
                            }
                        },
                        "Add column"
                    }
                }
                div { style: MODAL_FOOTER_STYLE,
                    button { onclick: move |_| on_close.call(()), "Done" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_label_names_the_preceding_column() {
        let headers = vec!["id".to_string(), "name".to_string()];

        assert_eq!(insert_label(&headers, Some(0)), "At the start");
        assert_eq!(insert_label(&headers, Some(1)), "After \"id\"");
        assert_eq!(insert_label(&headers, Some(2)), "After \"name\"");
        assert_eq!(insert_label(&headers, None), "At the end");
    }
}
