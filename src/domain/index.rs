//! Ordered course index
//!
//! A binary search tree keyed by case-insensitive course id. Besides the usual
//! insert/find/remove it answers referential questions about prerequisites:
//! which courses break when one is deleted, and whether every prerequisite
//! resolves. Rebalancing is explicit; inserts never restructure the tree.

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::{debug, instrument, trace};

use crate::domain::node::{Link, Node};
use crate::domain::{
    compare_no_case, eq_no_case, fold_case, Course, ValidationIssue, ValidationRules,
};

/// Case-insensitive binary search tree of courses.
#[derive(Debug, Default)]
pub struct CourseIndex {
    root: Link,
    size: usize,
    rules: ValidationRules,
}

impl CourseIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: ValidationRules) -> Self {
        Self {
            root: None,
            size: 0,
            rules,
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    /// Insert a course, rejecting case-insensitive duplicates.
    ///
    /// Only uniqueness is checked here; use [`CourseIndex::validate_single_course`]
    /// first when the record must also satisfy the catalog rules.
    #[instrument(level = "trace", skip(self, course), fields(id = %course.id))]
    pub fn insert(&mut self, course: Course) -> bool {
        if self.contains(&course.id) {
            debug!("duplicate course id rejected: {}", course.id);
            return false;
        }

        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match compare_no_case(&course.id, &node.course().id) {
                Ordering::Less => node.left_slot(),
                _ => node.right_slot(),
            };
        }
        *slot = Some(Box::new(Node::new(course)));
        self.size += 1;
        true
    }

    /// Look up a course by id (case-insensitive).
    pub fn find(&self, id: &str) -> Option<&Course> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match compare_no_case(id, &node.course().id) {
                Ordering::Equal => return Some(node.course()),
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
            };
        }
        None
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Remove a single course. Dependents are left in place.
    ///
    /// A node with two children takes over its in-order successor's course and the
    /// successor node is unlinked instead.
    #[instrument(level = "trace", skip(self))]
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(slot) = Self::slot_of(&mut self.root, id) else {
            trace!("remove: {} not found", id);
            return false;
        };
        let Some(mut node) = slot.take() else {
            return false;
        };

        *slot = match (node.left().is_some(), node.right().is_some()) {
            (false, false) => None,
            (true, false) => node.take_left(),
            (false, true) => node.take_right(),
            (true, true) => {
                if let Some(successor) = Self::take_min(node.right_slot()) {
                    trace!("remove: promoting successor {}", successor.course().id);
                    node.replace_course(successor.into_course());
                }
                Some(node)
            }
        };
        self.size -= 1;
        true
    }

    /// Slot holding the node for `id`.
    fn slot_of<'a>(mut slot: &'a mut Link, id: &str) -> Option<&'a mut Link> {
        loop {
            let ordering = compare_no_case(id, &slot.as_deref()?.course().id);
            if ordering == Ordering::Equal {
                return Some(slot);
            }
            if let Some(node) = slot {
                slot = match ordering {
                    Ordering::Less => node.left_slot(),
                    _ => node.right_slot(),
                };
            }
        }
    }

    /// Unlink the leftmost node under `slot`; its right subtree takes its place.
    fn take_min(mut slot: &mut Link) -> Link {
        while slot.as_ref().is_some_and(|n| n.left().is_some()) {
            if let Some(node) = slot {
                slot = node.left_slot();
            }
        }
        let mut min = slot.take()?;
        *slot = min.take_right();
        Some(min)
    }

    /// Ids of every course invalidated by deleting `target`, the target first.
    ///
    /// Closure over the reverse prerequisite relation, computed by rescanning the
    /// whole tree until a pass adds nothing. Returns an empty list when `target`
    /// is unknown.
    #[instrument(level = "debug", skip(self))]
    pub fn find_courses_invalid_on_delete(&self, target: &str) -> Vec<String> {
        let Some(course) = self.find(target) else {
            return Vec::new();
        };

        let mut impacted = vec![course.id.clone()];
        let mut rounds = 0;
        loop {
            rounds += 1;
            let before = impacted.len();
            for course in self.iter() {
                if impacted.iter().any(|id| eq_no_case(id, &course.id)) {
                    continue;
                }
                if impacted.iter().any(|id| course.requires(id)) {
                    impacted.push(course.id.clone());
                }
            }
            if impacted.len() == before {
                break;
            }
        }
        debug!(rounds, impacted = impacted.len(), "deletion impact computed");
        impacted
    }

    /// Check a candidate against the rules and the current contents of the index.
    ///
    /// The candidate itself does not need to be stored.
    pub fn validate_single_course(&self, course: &Course) -> bool {
        self.course_issues(course).is_empty()
    }

    pub fn course_issues(&self, course: &Course) -> Vec<ValidationIssue> {
        self.rules.issues(course, |p| self.contains(p))
    }

    /// Whole-index integrity check: length rules on every record and prerequisite
    /// resolution for every record.
    #[instrument(level = "debug", skip(self))]
    pub fn validate_courses(&self) -> bool {
        let issues = self.diagnose();
        for issue in &issues {
            debug!("validation: {}", issue);
        }
        issues.is_empty()
    }

    /// Every validation failure in the index: length rules first, then unresolved
    /// prerequisites, each group in id order.
    pub fn diagnose(&self) -> Vec<ValidationIssue> {
        let entries: Vec<(&str, &str)> = self
            .iter()
            .map(|c| (c.id.as_str(), c.name.as_str()))
            .collect();

        let mut issues: Vec<ValidationIssue> = entries
            .iter()
            .flat_map(|(id, name)| self.rules.length_issues(id, name))
            .collect();

        let known: HashSet<String> = entries.iter().map(|(id, _)| fold_case(id)).collect();
        for course in self.iter() {
            issues.extend(
                course
                    .prereqs
                    .iter()
                    .filter(|p| !known.contains(&fold_case(p)))
                    .map(|p| ValidationIssue::MissingPrerequisite {
                        id: course.id.clone(),
                        prereq: p.clone(),
                    }),
            );
        }
        issues
    }

    /// Rebuild the tree into a height-balanced shape from its sorted contents.
    #[instrument(level = "debug", skip(self))]
    pub fn rebalance(&mut self) {
        if self.root.is_none() {
            return;
        }
        let before = self.height();
        let courses = Self::drain_in_order(self.root.take());
        let count = courses.len();
        self.root = Self::build_balanced(count, &mut courses.into_iter());
        self.size = count;
        debug!(size = count, before, after = self.height(), "rebalanced");
    }

    /// Consume a subtree into its courses in ascending id order.
    fn drain_in_order(root: Link) -> Vec<Course> {
        let mut courses = Vec::new();
        let mut stack: Vec<Box<Node>> = Vec::new();
        let mut current = root;
        loop {
            while let Some(mut node) = current {
                current = node.take_left();
                stack.push(node);
            }
            match stack.pop() {
                Some(mut node) => {
                    current = node.take_right();
                    courses.push(node.into_course());
                }
                None => break,
            }
        }
        courses
    }

    /// Build a subtree of `len` courses taken in order from `courses`, rooted at the
    /// middle element.
    fn build_balanced<I: Iterator<Item = Course>>(len: usize, courses: &mut I) -> Link {
        if len == 0 {
            return None;
        }
        let left_len = len / 2;
        let left = Self::build_balanced(left_len, courses);
        let mut node = Box::new(Node::new(courses.next()?));
        node.set_left(left);
        node.set_right(Self::build_balanced(len - left_len - 1, courses));
        Some(node)
    }

    /// Drop every node. `len()` is 0 afterwards.
    #[instrument(level = "debug", skip(self))]
    pub fn clear(&mut self) {
        let mut pending: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.take_left());
            pending.extend(node.take_right());
            self.size = self.size.saturating_sub(1);
        }
        debug_assert_eq!(self.size, 0, "size out of sync with tree");
        self.size = 0;
    }

    /// Number of levels; 0 for an empty index.
    pub fn height(&self) -> usize {
        let mut max = 0;
        let mut stack: Vec<(&Node, usize)> = self.root().map(|n| (n, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            max = max.max(depth);
            stack.extend(node.left().map(|n| (n, depth + 1)));
            stack.extend(node.right().map(|n| (n, depth + 1)));
        }
        max
    }

    /// In-order (ascending id) traversal. Each call starts a fresh walk.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.root())
    }
}

impl Drop for CourseIndex {
    fn drop(&mut self) {
        // iterative teardown keeps deep, skewed trees off the call stack
        self.clear();
    }
}

impl<'a> IntoIterator for &'a CourseIndex {
    type Item = &'a Course;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy in-order iterator over an index.
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iter<'a> {
    fn new(root: Option<&'a Node>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Course;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(node.course())
    }
}
