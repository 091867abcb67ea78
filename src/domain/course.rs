//! Course records, case-insensitive key comparison and validation rules

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// A catalog record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    /// Business key, compared case-insensitively
    pub id: String,
    /// Display name
    pub name: String,
    /// Prerequisite identifiers in file order (duplicates allowed)
    pub prereqs: Vec<String>,
}

impl Course {
    pub fn new(id: impl Into<String>, name: impl Into<String>, prereqs: Vec<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            prereqs,
        }
    }

    /// Parse one comma-delimited record: `id,name,prereq1,prereq2,...`
    ///
    /// Fields are trimmed, empty prerequisite fields are dropped.
    pub fn parse_record(line: &str) -> Result<Self, DomainError> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < 2 {
            return Err(DomainError::MissingFields(fields.len()));
        }
        if fields[0].is_empty() {
            return Err(DomainError::EmptyId);
        }
        if fields[1].is_empty() {
            return Err(DomainError::EmptyName(fields[0].to_string()));
        }

        let prereqs = fields[2..]
            .iter()
            .filter(|p| !p.is_empty())
            .map(|p| p.to_string())
            .collect();

        Ok(Self::new(fields[0], fields[1], prereqs))
    }

    /// Whether this course lists `id` as a prerequisite.
    pub fn requires(&self, id: &str) -> bool {
        self.prereqs.iter().any(|p| eq_no_case(p, id))
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.id, self.name)
    }
}

/// Parse a whole catalog, one record per non-blank line.
pub fn parse_catalog(content: &str) -> Result<Vec<Course>, DomainError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            Course::parse_record(line).map_err(|e| DomainError::Line {
                line: i + 1,
                source: Box::new(e),
            })
        })
        .collect()
}

/// Case-insensitive ordering of identifiers.
pub fn compare_no_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

pub fn eq_no_case(a: &str, b: &str) -> bool {
    compare_no_case(a, b) == Ordering::Equal
}

/// Lookup key for an identifier, folded the same way [`compare_no_case`] compares.
///
/// Lowercases char by char, so a final sigma folds like any other sigma.
pub fn fold_case(id: &str) -> String {
    id.chars().flat_map(char::to_lowercase).collect()
}

/// Length rules applied to every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    /// Exact identifier length
    pub id_length: usize,
    /// Shortest accepted name
    pub name_min: usize,
    /// Longest accepted name
    pub name_max: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            id_length: 7,
            name_min: 3,
            name_max: 40,
        }
    }
}

impl ValidationRules {
    pub fn id_ok(&self, id: &str) -> bool {
        id.chars().count() == self.id_length
    }

    pub fn name_ok(&self, name: &str) -> bool {
        (self.name_min..=self.name_max).contains(&name.chars().count())
    }

    /// Every rule violation of `course`; `resolves` answers whether a prerequisite exists.
    pub fn issues(&self, course: &Course, resolves: impl Fn(&str) -> bool) -> Vec<ValidationIssue> {
        let mut issues = self.length_issues(&course.id, &course.name);
        issues.extend(
            course
                .prereqs
                .iter()
                .filter(|p| !resolves(p.as_str()))
                .map(|p| ValidationIssue::MissingPrerequisite {
                    id: course.id.clone(),
                    prereq: p.clone(),
                }),
        );
        issues
    }

    pub(crate) fn length_issues(&self, id: &str, name: &str) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if !self.id_ok(id) {
            issues.push(ValidationIssue::InvalidId {
                id: id.to_string(),
                expected: self.id_length,
            });
        }
        if !self.name_ok(name) {
            issues.push(ValidationIssue::InvalidName {
                id: id.to_string(),
                name: name.to_string(),
                min: self.name_min,
                max: self.name_max,
            });
        }
        issues
    }
}

/// A single failed validation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    InvalidId {
        id: String,
        expected: usize,
    },
    InvalidName {
        id: String,
        name: String,
        min: usize,
        max: usize,
    },
    MissingPrerequisite {
        id: String,
        prereq: String,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::InvalidId { id, expected } => {
                write!(f, "{id}: identifier must be exactly {expected} characters")
            }
            ValidationIssue::InvalidName { id, name, min, max } => {
                write!(f, "{id}: name '{name}' must be {min} to {max} characters")
            }
            ValidationIssue::MissingPrerequisite { id, prereq } => {
                write!(f, "{id}: prerequisite {prereq} not found")
            }
        }
    }
}
