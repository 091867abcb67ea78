//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent malformed course records.
/// The index itself reports failures through its return values.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("record has {0} field(s), expected at least id and name")]
    MissingFields(usize),

    #[error("record has an empty course id")]
    EmptyId,

    #[error("course {0} has an empty name")]
    EmptyName(String),

    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<DomainError>,
    },
}
