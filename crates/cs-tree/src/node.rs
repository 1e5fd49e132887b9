//! Node value type for tokenized code trees.
//!
//! This is the shape external highlighters hand over: downward links only,
//! no parent pointers. Upward navigation is derived by [`TokenTree::index`]
//! (see [`crate::tree`]).
//!
//! [`TokenTree::index`]: crate::TokenTree::index

use std::collections::HashMap;

/// Attribute-like properties on an element.
///
/// Values are optional: a property may be a bare flag (`Some(key, None)`)
/// or carry a value.
pub type Properties = HashMap<String, Option<String>>;

/// A node in a tokenized code tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    /// A run of literal text.
    Text {
        /// The character data.
        value: String,
    },
    /// A tagged element with properties and ordered children.
    Element {
        /// Tag identifier, e.g. `span`.
        tag: String,
        /// Unordered property map.
        properties: Properties,
        /// Ordered child list.
        children: Vec<Node>,
    },
    /// A comment. Passed through untouched by all tree surgery.
    Comment {
        /// The comment text.
        value: String,
    },
}

impl Node {
    /// Create a text node.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    /// Create an element with no properties.
    #[must_use]
    pub fn element(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Self::Element {
            tag: tag.into(),
            properties: Properties::new(),
            children,
        }
    }

    /// Create an element with properties.
    #[must_use]
    pub fn element_with(
        tag: impl Into<String>,
        properties: Properties,
        children: Vec<Node>,
    ) -> Self {
        Self::Element {
            tag: tag.into(),
            properties,
            children,
        }
    }

    /// Create a comment node.
    #[must_use]
    pub fn comment(value: impl Into<String>) -> Self {
        Self::Comment {
            value: value.into(),
        }
    }

    /// Concatenation of all text descendants, depth-first left-to-right.
    ///
    /// Comments contribute nothing. This is the coordinate system marker
    /// offsets are defined against.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text { value } => out.push_str(value),
            Self::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
            Self::Comment { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_text_content_flattens_depth_first() {
        let node = Node::element(
            "pre",
            vec![
                Node::element("span", vec![Node::text("fn "), Node::text("main")]),
                Node::comment("ignored"),
                Node::text("()"),
            ],
        );
        assert_eq!(node.text_content(), "fn main()");
    }

    #[test]
    fn test_text_content_of_leaf() {
        assert_eq!(Node::text("abc").text_content(), "abc");
        assert_eq!(Node::comment("abc").text_content(), "");
    }
}
