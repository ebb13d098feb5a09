pub mod file;
pub mod loader;
pub mod types;
