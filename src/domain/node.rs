//! Tree node owning one course and up to two subtrees

use crate::domain::Course;

/// Owned child slot.
pub type Link = Option<Box<Node>>;

/// Node in the course index.
///
/// Children are exclusively owned. Parent links are never stored; callers that need to
/// splice walk down from the root holding the parent's slot.
#[derive(Debug)]
pub struct Node {
    left: Link,
    right: Link,
    course: Course,
}

impl Node {
    pub fn new(course: Course) -> Self {
        Self {
            left: None,
            right: None,
            course,
        }
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn left(&self) -> Option<&Node> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node> {
        self.right.as_deref()
    }

    /// Replace the left subtree, dropping whatever was there.
    pub fn set_left(&mut self, subtree: Link) {
        self.left = subtree;
    }

    /// Replace the right subtree, dropping whatever was there.
    pub fn set_right(&mut self, subtree: Link) {
        self.right = subtree;
    }

    /// Detach the left subtree, leaving the slot empty.
    pub fn take_left(&mut self) -> Link {
        self.left.take()
    }

    /// Detach the right subtree, leaving the slot empty.
    pub fn take_right(&mut self) -> Link {
        self.right.take()
    }

    /// Swap in a new payload, returning the old one. Only deletion uses this.
    pub(crate) fn replace_course(&mut self, course: Course) -> Course {
        std::mem::replace(&mut self.course, course)
    }

    pub(crate) fn left_slot(&mut self) -> &mut Link {
        &mut self.left
    }

    pub(crate) fn right_slot(&mut self) -> &mut Link {
        &mut self.right
    }

    pub fn into_course(self) -> Course {
        self.course
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> Box<Node> {
        Box::new(Node::new(Course::new(id, "Name", vec![])))
    }

    #[test]
    fn given_new_node_when_created_then_has_no_children() {
        let n = Node::new(Course::new("CS10001", "Intro", vec![]));
        assert!(n.left().is_none());
        assert!(n.right().is_none());
        assert_eq!(n.course().id, "CS10001");
    }

    #[test]
    fn given_children_when_taking_then_slot_is_empty_and_ownership_returned() {
        let mut n = node("CS20000");
        n.set_left(Some(node("CS10000")));
        n.set_right(Some(node("CS30000")));

        let left = n.take_left().unwrap();
        assert_eq!(left.course().id, "CS10000");
        assert!(n.left().is_none());
        assert_eq!(n.right().unwrap().course().id, "CS30000");
    }

    #[test]
    fn given_existing_child_when_replacing_then_old_subtree_dropped() {
        let mut n = node("CS20000");
        n.set_right(Some(node("CS30000")));
        n.set_right(Some(node("CS40000")));
        assert_eq!(n.right().unwrap().course().id, "CS40000");
        n.set_right(None);
        assert!(n.right().is_none());
    }

    #[test]
    fn given_node_when_replacing_course_then_returns_previous() {
        let mut n = node("CS20000");
        let old = n.replace_course(Course::new("CS25000", "Other", vec![]));
        assert_eq!(old.id, "CS20000");
        assert_eq!(n.into_course().id, "CS25000");
    }
}
