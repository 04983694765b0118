use crate::domain::entities::command::{EditCommand, EditOutcome};
use crate::domain::entities::document::{Document, DocumentError};

#[derive(Debug, Clone, Copy, Default)]
pub struct EditService;

impl EditService {
    pub fn new() -> Self {
        Self
    }

    pub fn apply(
        &self,
        document: &mut Document,
        command: EditCommand,
    ) -> Result<EditOutcome, DocumentError> {
        let name = command.name();
        match document.apply(command) {
            Ok(outcome) => {
                tracing::debug!(
                    command = name,
                    ?outcome,
                    revision = document.revision(),
                    "applied edit"
                );
                Ok(outcome)
            }
            Err(err) => {
                tracing::warn!(command = name, %err, "edit rejected");
                Err(err)
            }
        }
    }
}
