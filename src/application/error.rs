//! Application-level errors (wraps domain errors)

use std::path::PathBuf;

use itertools::Itertools;
use thiserror::Error;

use crate::domain::{DomainError, ValidationIssue};

/// Application errors wrap domain errors and add catalog-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("catalog file not found: {0}")]
    CatalogNotFound(PathBuf),

    #[error("catalog contains no courses: {0}")]
    EmptyCatalog(PathBuf),

    #[error("duplicate course id: {0}")]
    DuplicateCourse(String),

    #[error("course not found: {0}")]
    CourseNotFound(String),

    #[error("catalog failed validation with {} issue(s)", .issues.len())]
    InvalidCatalog { issues: Vec<ValidationIssue> },

    #[error("course {id} is invalid: {}", join_issues(.issues))]
    InvalidCourse {
        id: String,
        issues: Vec<ValidationIssue>,
    },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues.iter().join("; ")
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
