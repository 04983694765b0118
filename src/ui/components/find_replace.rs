use dioxus::prelude::*;

use crate::domain::entities::command::{EditCommand, EditOutcome};
use crate::domain::entities::document::{Document, FindScope};
use crate::ui::components::apply_edit;
use crate::ui::styles::{MODAL_BACKDROP_STYLE, MODAL_BODY_STYLE, MODAL_FOOTER_STYLE, MODAL_TITLE_STYLE};

const ALL_COLUMNS_VALUE: &str = "*";

#[component]
pub fn FindReplaceDialog(
    headers: Vec<String>,
    document: Signal<Document>,
    mut status: Signal<String>,
    on_close: EventHandler<()>,
) -> Element {
    let mut find_text = use_signal(String::new);
    let mut replace_text = use_signal(String::new);
    let mut target_column = use_signal(|| None::<usize>);
    let mut case_sensitive = use_signal(|| false);

    let can_replace = !find_text().is_empty();
    let headers_for_replace = headers.clone();

    rsx! {
        div { style: MODAL_BACKDROP_STYLE,
            div { style: MODAL_BODY_STYLE,
                div { style: MODAL_TITLE_STYLE, "Find and Replace" }
                div { style: "margin-bottom: 12px; color: #555;",
                    "Search the data set for text and replace every occurrence."
                }
                div { style: "display: grid; gap: 8px;",
                    label { "Find" }
                    input {
                        value: find_text(),
                        placeholder: "e.g. New York",
                        autofocus: true,
                        oninput: move |event| find_text.set(event.value()),
                    }
                    label { "Replace with" }
                    input {
                        value: replace_text(),
                        placeholder: "e.g. NY",
                        oninput: move |event| replace_text.set(event.value()),
                    }
                    label { "Target column" }
                    select {
                        onchange: move |event| {
                            target_column.set(event.value().parse::<usize>().ok());
                        },
                        option { value: ALL_COLUMNS_VALUE, selected: target_column().is_none(), "All columns" }
                        for (idx, header) in headers.iter().enumerate() {
                            option {
                                key: "{idx}",
                                value: "{idx}",
                                selected: target_column() == Some(idx),
                                "{header}"
                            }
                        }
                    }
                    label { style: "display: flex; align-items: center; gap: 8px; cursor: pointer;",
                        input {
                            r#type: "checkbox",
                            checked: case_sensitive(),
                            onclick: move |_| case_sensitive.set(!case_sensitive()),
                        }
                        span { "Match case" }
                    }
                }
                div { style: MODAL_FOOTER_STYLE,
                    button { onclick: move |_| on_close.call(()), "Cancel" }
                    button {
                        disabled: !can_replace,
                        onclick: move |_| {
                            let find = find_text();
                            if find.is_empty() {
                                return;
                            }
                            let scope = match target_column().and_then(|idx| headers_for_replace.get(idx)) {
                                Some(column) => FindScope::Column(column.clone()),
                                None => FindScope::All,
                            };
                            let command = EditCommand::FindAndReplace {
                                find,
                                replace: replace_text(),
                                scope,
                                case_sensitive: case_sensitive(),
                            };
                            match apply_edit(document, status, command) {
                                Some(EditOutcome::Replaced { affected_rows }) if affected_rows > 0 => {
                                    status.set(format!("{affected_rows} rows updated"));
                                    on_close.call(());
                                }
                                Some(_) => status.set("Nothing to replace was found".to_string()),
                                None => {}
                            }
                        },
                        "Replace All"
                    }
                }
            }
        }
    }
}
