//! In-place tree surgery: splitting nodes, resolving common ancestors and
//! wrapping sibling runs.
//!
//! All operations keep the parent table current and never leave the tree
//! partially mutated on failure. After a split the original node is
//! detached; outstanding ids for it are invalid for sibling and ordering
//! purposes and callers must continue with the returned ids.

use crate::error::TreeError;
use crate::node::Properties;
use crate::tree::{NodeId, NodeKind, TokenTree};

/// Result of a split: the nodes occupying the original node's slot.
///
/// Empty partitions are omitted, so splitting at 0 or at full length
/// produces exactly one node (`right` or `left` respectively) and an
/// interior split produces both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split {
    /// Node holding the content before the split index, if any.
    pub left: Option<NodeId>,
    /// Node holding the content from the split index onward, if any.
    pub right: Option<NodeId>,
}

impl TokenTree {
    /// Split a node's content at `index` into at most two new siblings.
    ///
    /// For a text node `index` is a byte offset into the value (must lie
    /// on a character boundary); for an element it is a position in the
    /// child list. The new nodes copy the original's other attributes,
    /// take its place in the parent's child list, and have their parent
    /// links re-established. The original node is detached.
    pub fn split(&mut self, id: NodeId, index: usize) -> Result<Split, TreeError> {
        let parent = self.parent(id).ok_or(TreeError::SplitDetached)?;
        match self.kind(id) {
            NodeKind::Comment { .. } => return Err(TreeError::SplitComment),
            NodeKind::Text { value } => {
                if index > value.len() {
                    return Err(TreeError::SplitOutOfRange {
                        index,
                        len: value.len(),
                    });
                }
                if !value.is_char_boundary(index) {
                    return Err(TreeError::SplitOffBoundary { index });
                }
            }
            NodeKind::Element { children, .. } => {
                if index > children.len() {
                    return Err(TreeError::SplitOutOfRange {
                        index,
                        len: children.len(),
                    });
                }
            }
        }

        let slot = self.child_index(id).ok_or(TreeError::SplitDetached)?;

        let (left, right) = match self.take_kind(id) {
            NodeKind::Text { mut value } => {
                let tail = value.split_off(index);
                let mut left = None;
                let mut right = None;
                if !value.is_empty() {
                    left = Some(self.alloc(NodeKind::Text { value }, Some(parent)));
                }
                if !tail.is_empty() {
                    right = Some(self.alloc(NodeKind::Text { value: tail }, Some(parent)));
                }
                if left.is_none() && right.is_none() {
                    // Empty original: its slot keeps exactly one empty node.
                    right = Some(self.alloc(
                        NodeKind::Text {
                            value: String::new(),
                        },
                        Some(parent),
                    ));
                }
                (left, right)
            }
            NodeKind::Element {
                tag,
                properties,
                mut children,
            } => {
                let tail = children.split_off(index);
                let mut left = None;
                let mut right = None;
                if !children.is_empty() {
                    let part = self.alloc(
                        NodeKind::Element {
                            tag: tag.clone(),
                            properties: properties.clone(),
                            children,
                        },
                        Some(parent),
                    );
                    self.reparent_children(part);
                    left = Some(part);
                }
                if !tail.is_empty() {
                    let part = self.alloc(
                        NodeKind::Element {
                            tag: tag.clone(),
                            properties: properties.clone(),
                            children: tail,
                        },
                        Some(parent),
                    );
                    self.reparent_children(part);
                    right = Some(part);
                }
                if left.is_none() && right.is_none() {
                    right = Some(self.alloc(
                        NodeKind::Element {
                            tag,
                            properties,
                            children: Vec::new(),
                        },
                        Some(parent),
                    ));
                }
                (left, right)
            }
            NodeKind::Comment { .. } => unreachable!("rejected before taking the node"),
        };

        let replacements: Vec<NodeId> = [left, right].into_iter().flatten().collect();
        if let NodeKind::Element { children, .. } = self.kind_mut(parent) {
            children.splice(slot..=slot, replacements);
        }
        self.set_parent(id, None);
        Ok(Split { left, right })
    }

    fn reparent_children(&mut self, id: NodeId) {
        let child_ids = self.children(id).to_vec();
        for child in child_ids {
            self.set_parent(child, Some(id));
        }
    }

    /// Lowest common ancestor of `a` and `b`, including `a` or `b`
    /// themselves when one contains the other.
    ///
    /// Returns `None` only when the nodes belong to disjoint trees (for
    /// example when one of them has been detached), which is a caller
    /// invariant violation.
    #[must_use]
    pub fn common_ancestor(&self, a: NodeId, b: NodeId) -> Option<NodeId> {
        let mut candidate = Some(a);
        while let Some(ancestor) = candidate {
            let mut probe = Some(b);
            while let Some(node) = probe {
                if node == ancestor {
                    return Some(ancestor);
                }
                probe = self.parent(node);
            }
            candidate = self.parent(ancestor);
        }
        None
    }

    /// Replace a contiguous run of siblings with a fresh element holding
    /// the run as its children.
    ///
    /// The ids in `run` must be the current, contiguous, in-order child
    /// run of a single shared parent. On violation the error is returned
    /// before anything is mutated; no partial wrap happens.
    pub fn wrap(
        &mut self,
        tag: impl Into<String>,
        properties: Properties,
        run: &[NodeId],
    ) -> Result<NodeId, TreeError> {
        let (&first, rest) = run.split_first().ok_or(TreeError::WrapEmpty)?;
        let parent = self.parent(first).ok_or(TreeError::NotSiblings)?;
        for &node in rest {
            if self.parent(node) != Some(parent) {
                return Err(TreeError::NotSiblings);
            }
        }
        let siblings = self.children(parent);
        let start = siblings
            .iter()
            .position(|&c| c == first)
            .ok_or(TreeError::NotContiguous)?;
        if siblings.len() < start + run.len() || siblings[start..start + run.len()] != *run {
            return Err(TreeError::NotContiguous);
        }

        let wrapper = self.alloc(
            NodeKind::Element {
                tag: tag.into(),
                properties,
                children: run.to_vec(),
            },
            Some(parent),
        );
        if let NodeKind::Element { children, .. } = self.kind_mut(parent) {
            children.splice(start..start + run.len(), [wrapper]);
        }
        for &node in run {
            self.set_parent(node, Some(wrapper));
        }
        Ok(wrapper)
    }
}
