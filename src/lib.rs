//! course-index: a case-insensitive binary search tree of courses with
//! prerequisite integrity checks, cascading deletes and rebalancing.
//!
//! Layers:
//! - [`domain`]: courses, validation rules and the [`domain::CourseIndex`] tree (no I/O)
//! - [`application`]: catalog loading and editing over a filesystem abstraction
//! - [`infrastructure`]: filesystem implementation and service wiring
//! - [`cli`]: argument parsing, commands and the interactive menu

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
