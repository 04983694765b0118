use dioxus::prelude::*;

use crate::domain::column_type::ColumnKind;
use crate::domain::entities::document::RowData;
use crate::ui::forms::{page_count, page_slice, ROW_FORM_FIELDS_PER_PAGE};
use crate::ui::styles::{MODAL_BACKDROP_STYLE, MODAL_BODY_STYLE, MODAL_FOOTER_STYLE, MODAL_TITLE_STYLE};

fn is_checked(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

/// Add or edit a single row. Fields are rendered by guessed column kind and
/// paged when the table is wide.
#[component]
pub fn RowFormDialog(
    headers: Vec<String>,
    kinds: Vec<ColumnKind>,
    initial: RowData,
    editing: bool,
    on_save: EventHandler<RowData>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut form_data = use_signal(|| initial.clone());
    let mut page = use_signal(|| 0_usize);

    let fields: Vec<(String, ColumnKind)> = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| (header.clone(), kinds.get(idx).copied().unwrap_or(ColumnKind::Text)))
        .collect();
    let total_pages = page_count(fields.len(), ROW_FORM_FIELDS_PER_PAGE);
    let current_page = page().min(total_pages.saturating_sub(1));
    let visible_fields = page_slice(&fields, current_page, ROW_FORM_FIELDS_PER_PAGE).to_vec();
    let values = form_data();
    let title = if editing { "Edit Row" } else { "Add Row" };

    rsx! {
        div { style: MODAL_BACKDROP_STYLE,
            div { style: MODAL_BODY_STYLE,
                div { style: MODAL_TITLE_STYLE, "{title}" }
                if fields.is_empty() {
                    div { style: "color: #555;", "This table has no columns yet." }
                }
                div { style: "display: grid; grid-template-columns: 160px 1fr; gap: 8px; align-items: center;",
                    {visible_fields.into_iter().map(|(header, kind)| {
                        let value = values.get(&header).cloned().unwrap_or_default();
                        let header_for_input = header.clone();
                        let field_input = match kind {
                            ColumnKind::Boolean => rsx!(
                                input {
                                    r#type: "checkbox",
                                    checked: is_checked(&value),
                                    onclick: move |_| {
                                        let mut data = form_data.write();
                                        let next = !is_checked(data.get(&header_for_input).map(String::as_str).unwrap_or(""));
                                        data.insert(header_for_input.clone(), next.to_string());
                                    }
                                }
                            ),
                            ColumnKind::Date => rsx!(
                                input {
                                    r#type: "date",
                                    value: "{value}",
                                    oninput: move |event| {
                                        form_data.write().insert(header_for_input.clone(), event.value());
                                    }
                                }
                            ),
                            ColumnKind::Number => rsx!(
                                input {
                                    r#type: "number",
                                    value: "{value}",
                                    oninput: move |event| {
                                        form_data.write().insert(header_for_input.clone(), event.value());
                                    }
                                }
                            ),
                            ColumnKind::Text => rsx!(
                                input {
                                    value: "{value}",
                                    oninput: move |event| {
                                        form_data.write().insert(header_for_input.clone(), event.value());
                                    }
                                }
                            ),
                        };
                        rsx!(
                            label { style: "font-weight: 500; overflow: hidden; text-overflow: ellipsis;", "{header}" }
                            {field_input}
                        )
                    })}
                }
                if total_pages > 1 {
                    div { style: "display: flex; justify-content: center; align-items: center; gap: 8px; margin-top: 12px;",
                        button {
                            disabled: current_page == 0,
                            onclick: move |_| page.set(current_page.saturating_sub(1)),
                            "Previous"
                        }
                        span { "Page {current_page + 1} of {total_pages}" }
                        button {
                            disabled: current_page + 1 >= total_pages,
                            onclick: move |_| page.set(current_page + 1),
                            "Next"
                        }
                    }
                }
                div { style: MODAL_FOOTER_STYLE,
                    button { onclick: move |_| on_cancel.call(()), "Cancel" }
                    button {
                        onclick: move |_| on_save.call(form_data()),
                        if editing { "Save Changes" } else { "Add Row" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkbox_state_reads_true_case_insensitively() {
        assert!(is_checked("TRUE"));
        assert!(is_checked(" true "));
        assert!(!is_checked("false"));
        assert!(!is_checked(""));
        assert!(!is_checked("yes"));
    }
}
