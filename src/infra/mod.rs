pub mod codec;
pub mod export;
pub mod fs;
pub mod import;
