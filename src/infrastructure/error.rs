//! Infrastructure-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;

/// Application failures plus failures of the terminal the session talks to.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Reading a menu answer or writing a response failed.
    #[error("console {action} failed")]
    Console {
        action: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl InfraError {
    pub fn console(action: &'static str, source: std::io::Error) -> Self {
        Self::Console { action, source }
    }
}

/// Result type for infrastructure layer operations.
pub type InfraResult<T> = Result<T, InfraError>;
