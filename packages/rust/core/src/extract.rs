//! Depth-bounded extraction of leaf records from the nested dataset tree.
//!
//! The dataset is a mapping of mappings, uniformly deep. [`extract`] walks it
//! one mapping level per step, in insertion order, and yields the mapping found
//! at the requested depth without descending into it.

use serde_json::map::Values;
use serde_json::{Map, Value};

/// Lazy, single-pass iterator over the leaf records at a fixed depth.
///
/// Created by [`extract`].
pub struct Extract<'a> {
    target: usize,
    root: Option<&'a Value>,
    /// Child iterators still being walked, with the depth of their children.
    stack: Vec<(Values<'a>, usize)>,
}

/// Yield every mapping found exactly `depth` levels below `node`.
///
/// Non-mapping nodes contribute nothing. `extract(mapping, 0)` yields the
/// mapping itself; a depth deeper than the actual nesting yields nothing for
/// that branch.
pub fn extract(node: &Value, depth: usize) -> Extract<'_> {
    Extract {
        target: depth,
        root: Some(node),
        stack: Vec::new(),
    }
}

impl<'a> Extract<'a> {
    /// Either returns `node` as a leaf or schedules its children.
    fn visit(&mut self, node: &'a Value, depth: usize) -> Option<&'a Map<String, Value>> {
        let map = node.as_object()?;
        if depth == self.target {
            return Some(map);
        }
        self.stack.push((map.values(), depth + 1));
        None
    }
}

impl<'a> Iterator for Extract<'a> {
    type Item = &'a Map<String, Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            if let Some(leaf) = self.visit(root, 0) {
                return Some(leaf);
            }
        }

        loop {
            let (children, depth) = self.stack.last_mut()?;
            let depth = *depth;
            match children.next() {
                Some(child) => {
                    if let Some(leaf) = self.visit(child, depth) {
                        return Some(leaf);
                    }
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
