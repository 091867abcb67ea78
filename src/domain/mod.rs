//! Domain layer: course records and the ordered course index
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod course;
pub mod error;
pub mod index;
pub mod node;
pub mod prereq_order;
pub mod tree_view;

pub use course::{
    compare_no_case, eq_no_case, fold_case, parse_catalog, Course, ValidationIssue, ValidationRules,
};
pub use error::DomainError;
pub use index::{CourseIndex, Iter};
pub use node::{Link, Node};
pub use tree_view::TreeDisplay;

/// Expand `~`, `$VAR` and `${VAR}` in a path-like string; unexpandable input is
/// returned unchanged.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
