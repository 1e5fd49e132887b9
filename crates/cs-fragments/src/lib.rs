//! Staged-reveal fragment markers for highlighted code blocks.
//!
//! A code sample may embed directive markers, `{#1{like this}#}`, asking
//! for part of the sample to be revealed in a numbered step. The marker
//! syntax never reaches the highlighter: [`FragmentProcessor::preprocess`]
//! strips it first and remembers where each marker was. After the external
//! highlighter has fragmented the cleaned text into a token tree,
//! [`FragmentProcessor::apply`] finds each marker's boundaries inside that
//! tree — however deeply the highlighter scattered them — and wraps the
//! spanned nodes in a [`FRAGMENT_TAG`] element carrying the marker's order
//! token as its [`INDEX_PROPERTY`].
//!
//! Nested or overlapping markers are out of contract: extraction degrades
//! rather than crashes, but the result is unspecified.
//!
//! The [`parse_properties`] mini-syntax for `[name]` / `[name=value]` /
//! `.class` / `#id` annotation lists is a sibling concern hosts use to
//! decorate whole code blocks; it shares the degrade-to-empty error
//! policy.
//!
//! # Example
//!
//! ```
//! use cs_fragments::FragmentProcessor;
//! use cs_tree::Node;
//!
//! let mut processor = FragmentProcessor::new();
//! let cleaned = processor.preprocess("let x{#1{ = 1}#};");
//! assert_eq!(cleaned, "let x = 1;");
//!
//! // ... the host highlights `cleaned` into a token tree ...
//! let highlighted = Node::element("code", vec![Node::text(cleaned)]);
//!
//! let output = processor.apply(highlighted);
//! assert_eq!(output.text_content(), "let x = 1;");
//! ```

mod extract;
mod resolve;
mod selector;

pub use extract::{Extraction, Marker, extract_markers};
pub use resolve::{FRAGMENT_TAG, FragmentProcessor, INDEX_PROPERTY};
pub use selector::parse_properties;
