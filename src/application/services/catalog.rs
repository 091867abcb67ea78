//! Catalog service
//!
//! Loads comma-delimited course files into a [`CourseIndex`] and wraps the index
//! operations that need caller-side policy: validated inserts and cascading deletes.

use std::path::Path;
use std::sync::Arc;

use itertools::Itertools;
use tracing::{debug, info, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{fold_case, parse_catalog, Course, CourseIndex, ValidationRules};
use crate::infrastructure::traits::FileSystem;

/// Catalog behaviour taken from [`Settings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogOptions {
    pub rules: ValidationRules,
    /// Rebalance once after a bulk load
    pub rebalance_on_load: bool,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            rules: ValidationRules::default(),
            rebalance_on_load: true,
        }
    }
}

impl From<&Settings> for CatalogOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            rules: settings.validation,
            rebalance_on_load: settings.rebalance_on_load,
        }
    }
}

/// Service for loading and editing a course catalog.
pub struct CatalogService {
    fs: Arc<dyn FileSystem>,
    options: CatalogOptions,
}

impl CatalogService {
    /// Create a new catalog service.
    pub fn new(fs: Arc<dyn FileSystem>, options: CatalogOptions) -> Self {
        Self { fs, options }
    }

    /// Empty index using the configured rules.
    pub fn new_index(&self) -> CourseIndex {
        CourseIndex::with_rules(self.options.rules)
    }

    /// Load a catalog file.
    ///
    /// The file must contain at least one record, ids must be unique and the whole
    /// catalog must validate; otherwise nothing is returned.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<CourseIndex> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::CatalogNotFound(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read catalog", path)?;

        let courses = parse_catalog(&content)?;
        if courses.is_empty() {
            return Err(ApplicationError::EmptyCatalog(path.to_path_buf()));
        }
        debug!("load: parsed {} records", courses.len());

        let mut index = self.new_index();
        for course in courses {
            let id = course.id.clone();
            if !index.insert(course) {
                return Err(ApplicationError::DuplicateCourse(id));
            }
        }

        if !index.validate_courses() {
            return Err(ApplicationError::InvalidCatalog {
                issues: index.diagnose(),
            });
        }

        if self.options.rebalance_on_load {
            index.rebalance();
        }
        info!(
            "loaded {} courses from {} (height {})",
            index.len(),
            path.display(),
            index.height()
        );
        Ok(index)
    }

    /// Insert a course after checking it against the rules and the current index.
    #[instrument(level = "debug", skip(self, index, course), fields(id = %course.id))]
    pub fn add_course(&self, index: &mut CourseIndex, course: Course) -> ApplicationResult<()> {
        if index.contains(&course.id) {
            return Err(ApplicationError::DuplicateCourse(course.id));
        }
        let issues = index.course_issues(&course);
        if !issues.is_empty() {
            return Err(ApplicationError::InvalidCourse {
                id: course.id,
                issues,
            });
        }
        index.insert(course);
        Ok(())
    }

    /// Ids removed by a cascading delete of `id`, target first, without duplicates.
    pub fn deletion_impact(&self, index: &CourseIndex, id: &str) -> ApplicationResult<Vec<String>> {
        let impacted = index.find_courses_invalid_on_delete(id);
        if impacted.is_empty() {
            return Err(ApplicationError::CourseNotFound(id.to_string()));
        }
        Ok(impacted
            .into_iter()
            .unique_by(|id| fold_case(id))
            .collect())
    }

    /// Remove `id` together with every course that depends on it.
    ///
    /// Returns the removed ids.
    #[instrument(level = "debug", skip(self, index))]
    pub fn cascade_delete(&self, index: &mut CourseIndex, id: &str) -> ApplicationResult<Vec<String>> {
        let impacted = self.deletion_impact(index, id)?;
        for course_id in &impacted {
            if !index.remove(course_id) {
                warn!("cascade delete: {} vanished before removal", course_id);
            }
        }
        info!("removed {} course(s) starting at {}", impacted.len(), id);
        Ok(impacted)
    }
}
