//! Prerequisite-respecting course order

use tracing::debug;

use crate::domain::{eq_no_case, Course, CourseIndex};

impl CourseIndex {
    /// Courses arranged so that each one follows all of its prerequisites.
    ///
    /// Courses without prerequisites come first in id order. Each further pass walks the
    /// remaining courses in id order and places every course whose prerequisites are
    /// already placed, so a course can be placed in the same pass as its prerequisite.
    /// Returns `None` when a pass places nothing, i.e. a cycle or an unresolved
    /// prerequisite.
    pub fn prerequisite_order(&self) -> Option<Vec<&Course>> {
        let (mut ordered, mut pending): (Vec<&Course>, Vec<&Course>) =
            self.iter().partition(|c| c.prereqs.is_empty());

        while !pending.is_empty() {
            let placed = ordered.len();
            pending.retain(|&course| {
                let ready = course
                    .prereqs
                    .iter()
                    .all(|p| ordered.iter().any(|o| eq_no_case(&o.id, p)));
                if ready {
                    ordered.push(course);
                }
                !ready
            });
            if ordered.len() == placed {
                debug!(
                    "no prerequisite order: {} course(s) blocked",
                    pending.len()
                );
                return None;
            }
        }
        Some(ordered)
    }
}
