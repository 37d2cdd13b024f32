//! Error types for git-mgr.
//!
//! Uses thiserror for derive macros. Messages are shown to the user as-is,
//! prefixed with `Error: ` by the shell or by `main`.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for git-mgr operations.
#[derive(Error, Debug)]
pub enum MgrError {
    /// User provided invalid arguments or the session is in the wrong state.
    #[error("{0}")]
    UserError(String),

    /// Configuration file problem.
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Git could not be run or reported failure.
    #[error("{0}")]
    GitError(String),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MgrError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            MgrError::UserError(_) => exit_codes::USER_ERROR,
            MgrError::ConfigError(_) => exit_codes::CONFIG_ERROR,
            MgrError::GitError(_) => exit_codes::GIT_FAILURE,
            MgrError::Io(_) => exit_codes::USER_ERROR,
        }
    }
}

/// Result type alias for git-mgr operations.
pub type Result<T> = std::result::Result<T, MgrError>;
