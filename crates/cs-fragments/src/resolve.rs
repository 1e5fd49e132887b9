//! Fragment resolution against the highlighted tree.
//!
//! The highlighter fragments the cleaned text into an arbitrarily deep
//! token tree. This module re-locates every extracted marker's boundaries
//! inside that tree and wraps the spanned nodes, one marker at a time, in
//! ascending original order. Processing order matters: each lookup runs
//! against the already-mutated tree, and every surgery step preserves the
//! concatenated leaf text, which keeps the remaining markers' offsets
//! valid.
//!
//! No failure in here is fatal. A marker that cannot be resolved is
//! skipped with a diagnostic and the rest of the code block renders
//! unchanged.

use cs_tree::{Node, NodeId, Properties, TokenTree};

use crate::extract::{Marker, extract_markers};

/// Tag of the wrapper element inserted around a marker's span.
pub const FRAGMENT_TAG: &str = "cs-fragment";

/// Property carrying the marker's order token on the wrapper.
pub const INDEX_PROPERTY: &str = "index";

/// Two-phase processor for one code block.
///
/// [`preprocess`](Self::preprocess) strips markers from the raw source
/// before it reaches the highlighter; [`apply`](Self::apply) re-locates
/// them in the highlighted tree afterwards. The marker list lives in the
/// processor between the two calls; the host pipeline invokes each phase
/// exactly once, in that order, per code block.
///
/// # Example
///
/// ```
/// use cs_fragments::{FragmentProcessor, FRAGMENT_TAG};
/// use cs_tree::Node;
///
/// let mut processor = FragmentProcessor::new();
/// let output = processor.process("{#1{fast}#} and {slow}", |clean| {
///     // Stand-in for the external highlighter.
///     Node::element("code", vec![Node::text(clean)])
/// });
/// let fragment = match &output {
///     Node::Element { children, .. } => &children[0],
///     _ => unreachable!(),
/// };
/// assert_eq!(fragment.text_content(), "fast");
/// assert_eq!(output.text_content(), "fast and {slow}");
/// ```
#[derive(Debug, Default)]
pub struct FragmentProcessor {
    markers: Vec<Marker>,
    warnings: Vec<String>,
}

impl FragmentProcessor {
    /// Create a processor with no pending markers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract markers from `source` and return the marker-free text to
    /// hand to the highlighter.
    #[must_use]
    pub fn preprocess(&mut self, source: &str) -> String {
        let extraction = extract_markers(source);
        self.markers = extraction.markers;
        extraction.text
    }

    /// Re-locate every pending marker inside the highlighted tree and
    /// wrap its span, draining the marker list.
    #[must_use]
    pub fn apply(&mut self, root: Node) -> Node {
        let mut tree = TokenTree::index(root);
        for marker in std::mem::take(&mut self.markers) {
            if let Err(reason) = resolve_marker(&mut tree, &marker) {
                tracing::debug!(offset = marker.offset, reason = %reason, "Skipping marker");
                self.warnings
                    .push(format!("marker at offset {}: {reason}", marker.offset));
            }
        }
        tree.into_node()
    }

    /// Run the whole transform: preprocess, hand the cleaned text to the
    /// external `tokenize` step, then apply the markers to its tree.
    #[must_use]
    pub fn process(&mut self, source: &str, tokenize: impl FnOnce(&str) -> Node) -> Node {
        let cleaned = self.preprocess(source);
        let tree = tokenize(&cleaned);
        self.apply(tree)
    }

    /// Recoverable diagnostics collected while processing.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/// Wrap one marker's span, mutating the tree in place.
fn resolve_marker(tree: &mut TokenTree, marker: &Marker) -> Result<(), String> {
    if marker.len == 0 {
        return Err("empty span".to_owned());
    }
    let (start_leaf, start_idx) = tree
        .locate(marker.offset)
        .ok_or("start offset past the tree's text")?;
    let (end_leaf, end_idx) = tree
        .locate(marker.offset + marker.len - 1)
        .ok_or("end offset past the tree's text")?;

    let run = if start_leaf == end_leaf {
        // Cut off the trailing remainder, then the leading one; the
        // surviving middle node is the marker's span.
        let head = tree
            .split(start_leaf, end_idx + 1)
            .map_err(|e| e.to_string())?
            .left
            .ok_or("empty span after trimming")?;
        let middle = tree
            .split(head, start_idx)
            .map_err(|e| e.to_string())?
            .right
            .ok_or("empty span after trimming")?;
        vec![middle]
    } else {
        let start = tree
            .split(start_leaf, start_idx)
            .map_err(|e| e.to_string())?
            .right
            .ok_or("start split produced no content")?;
        let end = tree
            .split(end_leaf, end_idx + 1)
            .map_err(|e| e.to_string())?
            .left
            .ok_or("end split produced no content")?;

        let ancestor = tree
            .common_ancestor(start, end)
            .ok_or("marker boundaries in disjoint trees")?;
        let start_boundary = isolate_start(tree, start, ancestor)?;
        let end_boundary = isolate_end(tree, end, ancestor)?;

        let from = tree
            .child_index(start_boundary)
            .ok_or("start boundary detached")?;
        let to = tree
            .child_index(end_boundary)
            .ok_or("end boundary detached")?;
        if from > to {
            return Err("inverted boundary run".to_owned());
        }
        tree.children(ancestor)[from..=to].to_vec()
    };

    tree.wrap(FRAGMENT_TAG, wrapper_properties(marker), &run)
        .map_err(|e| e.to_string())?;
    Ok(())
}

/// Climb from the start leaf, splitting each ancestor's child list at the
/// current node so that everything from the marker's start onward becomes
/// an isolated sibling run, until reaching the node directly under the
/// common ancestor.
fn isolate_start(tree: &mut TokenTree, mut node: NodeId, ancestor: NodeId) -> Result<NodeId, String> {
    loop {
        let parent = tree.parent(node).ok_or("climb left the tree")?;
        if parent == ancestor {
            return Ok(node);
        }
        let index = tree.child_index(node).ok_or("climb left the tree")?;
        node = tree
            .split(parent, index)
            .map_err(|e| e.to_string())?
            .right
            .ok_or("start isolation produced no content")?;
    }
}

/// Mirror image of [`isolate_start`]: everything up to and including the
/// marker's end becomes the isolated run.
fn isolate_end(tree: &mut TokenTree, mut node: NodeId, ancestor: NodeId) -> Result<NodeId, String> {
    loop {
        let parent = tree.parent(node).ok_or("climb left the tree")?;
        if parent == ancestor {
            return Ok(node);
        }
        let index = tree.child_index(node).ok_or("climb left the tree")?;
        node = tree
            .split(parent, index + 1)
            .map_err(|e| e.to_string())?
            .left
            .ok_or("end isolation produced no content")?;
    }
}

fn wrapper_properties(marker: &Marker) -> Properties {
    let mut properties = Properties::new();
    if let Some(order) = &marker.order {
        properties.insert(INDEX_PROPERTY.to_owned(), Some(order.clone()));
    }
    properties
}
