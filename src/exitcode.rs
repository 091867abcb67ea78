//! Process exit codes, following BSD `sysexits.h`
//!
//! [`crate::cli::CliError::exit_code`] maps every failure onto one of these.

pub const OK: i32 = 0;

/// Bad flags or no catalog to work on
pub const USAGE: i32 = 64;

/// Catalog parsed or validated badly, or a course id is unknown
pub const DATAERR: i32 = 65;

/// Catalog file missing
pub const NOINPUT: i32 = 66;

/// Reading the catalog or talking to the console failed
pub const IOERR: i32 = 74;

/// Unreadable or contradictory settings
pub const CONFIG: i32 = 78;
