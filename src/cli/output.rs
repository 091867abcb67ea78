//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

use crate::domain::{Course, CourseIndex};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print failure status (red X, indented)
pub fn failure(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {} {}", "✗".red(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data lines)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// One-line course summary: `ID | Name`
pub fn course_line(course: &Course) -> String {
    format!("{} | {}", course.id, course.name)
}

/// Course summary followed by its prerequisites, resolved against `index`.
///
/// Prerequisites missing from the index are skipped.
pub fn course_detail(index: &CourseIndex, course: &Course) -> Vec<String> {
    let mut lines = vec![course_line(course)];
    let prereqs: Vec<&Course> = course.prereqs.iter().filter_map(|p| index.find(p)).collect();
    if prereqs.is_empty() {
        lines.push("Prerequisites: None".to_string());
    } else {
        lines.push("Prerequisites:".to_string());
        lines.extend(prereqs.into_iter().map(|p| format!("  {}", course_line(p))));
    }
    lines
}
