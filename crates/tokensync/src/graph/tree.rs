//! Arena tree of dotted-name segments.
//!
//! Every token name is stored as a path of segments from a shared root.
//! Nodes live in one `Vec` and refer to each other by index, so a lookup is a
//! walk over child maps instead of string parsing.

use std::collections::BTreeMap;

/// Index of a node in a [`PathTree`].
pub type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug, Clone, Default)]
struct Node {
    children: BTreeMap<String, NodeId>,
    /// Slot of the token named by the path to this node, if any.
    slot: Option<usize>,
}

/// Maps dotted paths to token slots.
#[derive(Debug, Clone)]
pub struct PathTree {
    nodes: Vec<Node>,
}

impl PathTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
        }
    }

    /// Stores `slot` at the given path, returning the slot it replaced.
    pub fn insert<'a>(
        &mut self,
        segments: impl IntoIterator<Item = &'a str>,
        slot: usize,
    ) -> Option<usize> {
        let mut current = ROOT;
        for segment in segments {
            current = match self.nodes[current].children.get(segment) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[current].children.insert(segment.to_string(), child);
                    child
                }
            };
        }
        self.nodes[current].slot.replace(slot)
    }

    /// Finds the node at the given path.
    pub fn find<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Option<NodeId> {
        let mut current = ROOT;
        for segment in segments {
            current = *self.nodes[current].children.get(segment)?;
        }
        Some(current)
    }

    /// Returns the slot stored at exactly the given path.
    pub fn get<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Option<usize> {
        self.find(segments).and_then(|node| self.nodes[node].slot)
    }

    /// Finds the longest prefix of `segments` that holds a slot.
    ///
    /// Returns the slot and the number of segments the prefix consumed.
    pub fn longest_prefix(&self, segments: &[&str]) -> Option<(usize, usize)> {
        let mut current = ROOT;
        let mut best = None;
        for (depth, segment) in segments.iter().enumerate() {
            match self.nodes[current].children.get(*segment) {
                Some(&child) => current = child,
                None => break,
            }
            if let Some(slot) = self.nodes[current].slot {
                best = Some((slot, depth + 1));
            }
        }
        best
    }

    /// Slots stored at or below `node`, in name order.
    pub fn descendants(&self, node: NodeId) -> Vec<usize> {
        let mut slots = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let current = &self.nodes[id];
            slots.extend(current.slot);
            stack.extend(current.children.values().rev());
        }
        slots
    }
}

impl Default for PathTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(path: &str) -> Vec<&str> {
        path.split('.').collect()
    }

    #[test]
    fn test_insert_and_get() {
        let mut tree = PathTree::new();
        assert_eq!(tree.insert(split("color.bg"), 0), None);
        assert_eq!(tree.insert(split("color.fg"), 1), None);

        assert_eq!(tree.get(split("color.bg")), Some(0));
        assert_eq!(tree.get(split("color.fg")), Some(1));
        assert_eq!(tree.get(split("color")), None);
        assert_eq!(tree.get(split("color.bg.x")), None);
    }

    #[test]
    fn test_insert_returns_replaced_slot() {
        let mut tree = PathTree::new();
        tree.insert(split("a.b"), 3);
        assert_eq!(tree.insert(split("a.b"), 7), Some(3));
        assert_eq!(tree.get(split("a.b")), Some(7));
    }

    #[test]
    fn test_longest_prefix() {
        let mut tree = PathTree::new();
        tree.insert(split("typography"), 0);
        tree.insert(split("typography.body"), 1);

        assert_eq!(
            tree.longest_prefix(&split("typography.body.fontSize")),
            Some((1, 2))
        );
        assert_eq!(tree.longest_prefix(&split("typography.h1")), Some((0, 1)));
        assert_eq!(tree.longest_prefix(&split("spacing.sm")), None);
    }

    #[test]
    fn test_descendants_in_name_order() {
        let mut tree = PathTree::new();
        tree.insert(split("color.fg"), 1);
        tree.insert(split("color.bg"), 0);
        tree.insert(split("spacing.sm"), 2);

        let color = tree.find(split("color")).unwrap();
        assert_eq!(tree.descendants(color), vec![0, 1]);
        assert_eq!(tree.descendants(ROOT), vec![0, 1, 2]);
    }
}
