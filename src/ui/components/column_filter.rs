use std::collections::BTreeSet;

use dioxus::prelude::*;

use crate::domain::entities::filter::{search_values, ColumnValues};
use crate::ui::styles::{MODAL_BACKDROP_STYLE, MODAL_BODY_STYLE, MODAL_FOOTER_STYLE, MODAL_TITLE_STYLE};

const LINK_BUTTON_STYLE: &str =
    "border: none; background: transparent; color: #2563eb; cursor: pointer; padding: 0; font-size: 12px;";

fn value_label(value: &str) -> &str {
    if value.is_empty() {
        "(empty)"
    } else {
        value
    }
}

/// Value checklist for one column. "Select all" picks every value the search
/// currently shows; "Deselect all" drops the filter.
#[component]
pub fn ColumnFilterPanel(
    column: String,
    values: ColumnValues,
    selected: BTreeSet<String>,
    on_toggle: EventHandler<String>,
    on_select: EventHandler<BTreeSet<String>>,
    on_clear: EventHandler<()>,
    on_close: EventHandler<()>,
) -> Element {
    let mut search = use_signal(String::new);

    let hidden_count = values.total_count.saturating_sub(values.unique_values.len());
    let shown = search_values(&values.unique_values, &search());
    let shown_for_select = shown.clone();

    rsx! {
        div { style: MODAL_BACKDROP_STYLE, onclick: move |_| on_close.call(()),
            div {
                style: MODAL_BODY_STYLE,
                onclick: move |event| event.stop_propagation(),
                div { style: MODAL_TITLE_STYLE, "Filter: {column}" }
                input {
                    style: "width: 100%; box-sizing: border-box; margin-bottom: 8px;",
                    placeholder: "Search values…",
                    value: "{search}",
                    oninput: move |event| search.set(event.value()),
                }
                div { style: "display: flex; gap: 8px; align-items: center; margin-bottom: 6px;",
                    button {
                        style: LINK_BUTTON_STYLE,
                        disabled: shown.is_empty(),
                        onclick: move |_| on_select.call(shown_for_select.iter().cloned().collect()),
                        "Select all"
                    }
                    span { style: "color: #aaa;", "|" }
                    button {
                        style: LINK_BUTTON_STYLE,
                        onclick: move |_| on_clear.call(()),
                        "Deselect all"
                    }
                }
                div { style: "max-height: 360px; overflow-y: auto; display: flex; flex-direction: column; gap: 2px;",
                    if shown.is_empty() {
                        div { style: "padding: 12px; color: #888; text-align: center;", "No matching values" }
                    }
                    {shown.iter().map(|value| {
                        let checked = selected.contains(value);
                        let value = value.clone();
                        let label = value_label(&value).to_string();
                        rsx!(
                            label {
                                key: "{value}",
                                style: "display: flex; align-items: center; gap: 8px; padding: 4px; cursor: pointer;",
                                input {
                                    r#type: "checkbox",
                                    checked: checked,
                                    onclick: move |_| on_toggle.call(value.clone()),
                                }
                                span { "{label}" }
                            }
                        )
                    })}
                }
                if hidden_count > 0 {
                    div { style: "margin-top: 8px; color: #666; font-size: 12px;",
                        "Showing the {values.unique_values.len()} most frequent of {values.total_count} values"
                    }
                }
                div { style: MODAL_FOOTER_STYLE,
                    button { onclick: move |_| on_close.call(()), "Close" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_get_a_readable_label() {
        assert_eq!(value_label(""), "(empty)");
        assert_eq!(value_label("Rome"), "Rome");
    }
}
