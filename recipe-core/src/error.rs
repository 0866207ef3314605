//! Recipe book errors.

use thiserror::Error;

/// Errors that can occur in recipe book operations
#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("Recipe '{0}' not found")]
    NotFound(String),

    #[error("A recipe named '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid {field}: '{input}' is not a number")]
    InvalidNumber { field: &'static str, input: String },

    #[error("Failed to read/write the console: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = RecipeError> = std::result::Result<T, E>;
