pub mod completions;
pub mod config;
pub mod days;
pub mod shell;
pub mod validate;
