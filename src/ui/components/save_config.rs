use dioxus::prelude::*;

use crate::domain::entities::save::{delimiter_label, SaveOptions, SAVE_DELIMITERS};
use crate::ui::styles::{MODAL_BACKDROP_STYLE, MODAL_BODY_STYLE, MODAL_FOOTER_STYLE, MODAL_TITLE_STYLE};

/// Delimiters shown in the dialog. A loaded delimiter outside the usual set
/// is kept as an extra choice.
fn delimiter_choices(current: char) -> Vec<char> {
    let mut choices: Vec<char> = SAVE_DELIMITERS.iter().map(|(delimiter, _)| *delimiter).collect();
    if !choices.contains(&current) {
        choices.push(current);
    }
    choices
}

#[component]
pub fn SaveConfigDialog(
    save_as: bool,
    initial: SaveOptions,
    on_confirm: EventHandler<SaveOptions>,
    on_cancel: EventHandler<()>,
) -> Element {
    let choices = delimiter_choices(initial.delimiter);
    let mut delimiter = use_signal(|| initial.delimiter);
    let mut include_sep_directive = use_signal(|| initial.include_sep_directive);
    let mut include_bom = use_signal(|| initial.include_bom);

    let selected = delimiter();
    let choices_for_change = choices.clone();
    let title = if save_as { "Save As" } else { "Save" };

    rsx! {
        div { style: MODAL_BACKDROP_STYLE,
            div { style: MODAL_BODY_STYLE,
                div { style: MODAL_TITLE_STYLE, "{title}" }
                div { style: "display: grid; gap: 10px;",
                    label { "Delimiter" }
                    select {
                        onchange: move |event| {
                            if let Some(choice) = event
                                .value()
                                .parse::<usize>()
                                .ok()
                                .and_then(|idx| choices_for_change.get(idx))
                            {
                                delimiter.set(*choice);
                            }
                        },
                        for (idx, choice) in choices.iter().enumerate() {
                            option {
                                key: "{idx}",
                                value: "{idx}",
                                selected: *choice == selected,
                                "{delimiter_label(*choice)}"
                            }
                        }
                    }
                    label { style: "display: flex; align-items: center; gap: 8px; cursor: pointer;",
                        input {
                            r#type: "checkbox",
                            checked: include_sep_directive(),
                            onclick: move |_| include_sep_directive.set(!include_sep_directive()),
                        }
                        span { "Write a sep= line so spreadsheet programs detect the delimiter" }
                    }
                    label { style: "display: flex; align-items: center; gap: 8px; cursor: pointer;",
                        input {
                            r#type: "checkbox",
                            checked: include_bom(),
                            onclick: move |_| include_bom.set(!include_bom()),
                        }
                        span { "Include UTF-8 byte order mark" }
                    }
                }
                div { style: MODAL_FOOTER_STYLE,
                    button { onclick: move |_| on_cancel.call(()), "Cancel" }
                    button {
                        onclick: move |_| {
                            on_confirm.call(SaveOptions {
                                delimiter: delimiter(),
                                include_sep_directive: include_sep_directive(),
                                include_bom: include_bom(),
                            });
                        },
                        "Continue"
                    }
                }
            }
        }
    }
}
