/*
Render the index shape with termtree. Left and right children are labelled since a
BST node with a single child is otherwise ambiguous.
 */
use termtree::Tree;

use crate::domain::{CourseIndex, Node};

pub trait TreeDisplay {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeDisplay for Node {
    fn to_tree_string(&self) -> Tree<String> {
        labelled(self, self.course().id.clone())
    }
}

impl TreeDisplay for CourseIndex {
    fn to_tree_string(&self) -> Tree<String> {
        match self.root() {
            Some(root) => root.to_tree_string(),
            None => Tree::new("Empty tree".to_string()),
        }
    }
}

fn labelled(node: &Node, label: String) -> Tree<String> {
    let leaves: Vec<Tree<String>> = [("L", node.left()), ("R", node.right())]
        .into_iter()
        .filter_map(|(side, child)| {
            child.map(|c| labelled(c, format!("{}: {}", side, c.course().id)))
        })
        .collect();
    Tree::new(label).with_leaves(leaves)
}
