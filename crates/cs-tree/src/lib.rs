//! Token tree model and in-place surgery primitives.
//!
//! External highlighting pipelines hand over a tree of [`Node`] values
//! that exposes only downward links. This crate adopts such a tree into a
//! [`TokenTree`] arena whose side tables supply the upward navigation the
//! foreign shape lacks, and provides the editing primitives the fragment
//! resolver needs:
//!
//! - parent and next-sibling lookup derived from ordered child lists
//! - a depth-first text-leaf sequence and byte-offset location
//! - node splitting at a text or child-list index
//! - lowest-common-ancestor resolution
//! - wrapping a contiguous sibling run under a fresh element
//!
//! # Example
//!
//! ```
//! use cs_tree::{Node, Properties, TokenTree};
//!
//! let root = Node::element(
//!     "code",
//!     vec![Node::text("fast"), Node::text(" and slow")],
//! );
//! let mut tree = TokenTree::index(root);
//!
//! let (leaf, local) = tree.locate(0).unwrap();
//! let split = tree.split(leaf, local).unwrap();
//! let target = split.right.unwrap();
//! let wrapper = tree.wrap("mark", Properties::new(), &[target]).unwrap();
//!
//! assert_eq!(tree.text_content(wrapper), "fast");
//! assert_eq!(tree.text_content(tree.root()), "fast and slow");
//! ```

mod edit;
mod error;
mod node;
mod tree;

pub use edit::Split;
pub use error::TreeError;
pub use node::{Node, Properties};
pub use tree::{NodeId, TextLeaves, TokenTree};
