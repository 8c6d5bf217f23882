//! Core error types for habitrack-core.
//!
//! This module defines the error hierarchy using thiserror. Store operations
//! return [`HabitError`]; configuration and I/O surface through [`CoreError`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for habitrack-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Habit store errors
    #[error(transparent)]
    Habit(#[from] HabitError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Bad user input. Shown next to the offending field; never mutates the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Title is empty after trimming
    #[error("Enter a habit title")]
    EmptyTitle { field: &'static str },

    /// Title exceeds the configured maximum length
    #[error("Title is too long ({len} characters, at most {max} allowed)")]
    TitleTooLong {
        field: &'static str,
        max: usize,
        len: usize,
    },

    /// Not a `YYYY-MM-DD` calendar date
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    /// Two seed habits share an id
    #[error("Duplicate habit id: {id}")]
    DuplicateId { id: String },

    /// No numeric id is left after the largest one in use
    #[error("No habit ids left after {after}")]
    IdSpaceExhausted { after: String },
}

impl ValidationError {
    /// Name of the form field the error belongs to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::EmptyTitle { field } | ValidationError::TitleTooLong { field, .. } => {
                Some(field)
            }
            ValidationError::InvalidDate { .. }
            | ValidationError::DuplicateId { .. }
            | ValidationError::IdSpaceExhausted { .. } => None,
        }
    }
}

/// Operation targets a habit id that is no longer in the collection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Habit not found: {id}")]
pub struct NotFoundError {
    pub id: String,
}

/// Error returned by Habit Store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HabitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

impl HabitError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, HabitError::NotFound(_))
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Could not determine or create the data directory
    #[error("Failed to prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not name a configuration value
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
