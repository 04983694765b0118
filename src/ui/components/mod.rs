pub mod column_filter;
pub mod column_manager;
pub mod find_replace;
pub mod row_form;
pub mod save_config;

use dioxus::prelude::*;

use crate::domain::entities::command::{EditCommand, EditOutcome};
use crate::domain::entities::document::Document;
use crate::usecase::services::edit_service::EditService;

/// Runs `command` against the shared document, reporting rejections in the
/// status line.
pub fn apply_edit(
    mut document: Signal<Document>,
    mut status: Signal<String>,
    command: EditCommand,
) -> Option<EditOutcome> {
    let result = EditService::new().apply(&mut document.write(), command);
    match result {
        Ok(outcome) => Some(outcome),
        Err(err) => {
            status.set(format!("Operation rejected: {err}"));
            None
        }
    }
}
