pub mod components;
pub mod forms;
pub mod state;
pub mod styles;
