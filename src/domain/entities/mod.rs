pub mod command;
pub mod document;
pub mod edit;
pub mod filter;
pub mod save;
