pub mod document_service;
pub mod edit_service;
pub mod query_service;
