//! Marker extraction from raw code-sample text.
//!
//! Runs once per code block, before the text reaches the external
//! highlighter. Markers look like `{#1{content}#}`: `{#`, an optional
//! numeric order token, `{`, the content, `}#}`. The content may protect a
//! literal `}#}` with a preceding `\`.
//!
//! Extraction is pure: it returns the marker-free text plus one record per
//! marker, with each record's start offset already expressed in
//! cleaned-text coordinates. The running shift is subtracted at record
//! time, so removals that happen after a marker never adjust it.

use std::sync::LazyLock;

use regex::Regex;

/// Opening delimiter: `{#`, optional integer or decimal order token, `{`.
static MARKER_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{#(\d+(?:\.\d+)?)?\{").unwrap());

/// Closing delimiter.
const MARKER_CLOSE: &str = "}#}";

/// Character that protects a `}#}` inside marker content.
const ESCAPE: u8 = b'\\';

/// One marker found in the raw text.
///
/// Created during preprocessing, consumed once during tree resolution,
/// then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// Byte offset of the content start, in cleaned-text coordinates.
    pub offset: usize,
    /// Order token, verbatim (`1`, `2.5`, ...). `None` means no explicit
    /// ordering.
    pub order: Option<String>,
    /// The literal inner content.
    pub content: String,
    /// Byte length of the content.
    pub len: usize,
}

/// Result of scanning one code sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// The input with all marker delimiters removed, content retained
    /// verbatim.
    pub text: String,
    /// Markers in left-to-right (ascending original) order.
    pub markers: Vec<Marker>,
}

/// Scan `source` for markers and strip their delimiters.
///
/// Nested markers are not detected: the scan pairs each opening with the
/// first unescaped `}#}` after it, so nesting degrades rather than
/// crashing. An opening with no terminator is left in the text verbatim.
///
/// # Example
///
/// ```
/// use cs_fragments::extract_markers;
///
/// let extraction = extract_markers("{#1{fast}#} and {slow}");
/// assert_eq!(extraction.text, "fast and {slow}");
/// assert_eq!(extraction.markers.len(), 1);
/// assert_eq!(extraction.markers[0].offset, 0);
/// assert_eq!(extraction.markers[0].order.as_deref(), Some("1"));
/// ```
#[must_use]
pub fn extract_markers(source: &str) -> Extraction {
    let mut markers = Vec::new();
    let mut text = String::with_capacity(source.len());
    // Everything before `copied` has been emitted; `removed` counts the
    // delimiter bytes stripped so far.
    let mut copied = 0;
    let mut removed = 0;
    let mut search = 0;

    while let Some(captures) = MARKER_OPEN.captures(&source[search..]) {
        let open = captures.get(0).unwrap();
        let open_start = search + open.start();
        let content_start = search + open.end();

        let Some(close) = find_close(source, content_start) else {
            // No terminator: the opening is literal text.
            search = content_start;
            continue;
        };

        let content = &source[content_start..close];
        text.push_str(&source[copied..open_start]);
        text.push_str(content);

        markers.push(Marker {
            offset: open_start - removed,
            order: captures.get(1).map(|m| m.as_str().to_owned()),
            content: content.to_owned(),
            len: content.len(),
        });

        removed += (content_start - open_start) + MARKER_CLOSE.len();
        copied = close + MARKER_CLOSE.len();
        search = copied;
    }

    text.push_str(&source[copied..]);
    Extraction { text, markers }
}

/// First `}#}` at or after `from` that is not preceded by the escape
/// character.
fn find_close(source: &str, from: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut at = from;
    while let Some(pos) = source[at..].find(MARKER_CLOSE) {
        let abs = at + pos;
        if abs > from && bytes[abs - 1] == ESCAPE {
            at = abs + 1;
            continue;
        }
        return Some(abs);
    }
    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_single_marker_with_order() {
        let extraction = extract_markers("{#1{fast}#} and {slow}");
        assert_eq!(extraction.text, "fast and {slow}");
        assert_eq!(
            extraction.markers,
            vec![Marker {
                offset: 0,
                order: Some("1".to_owned()),
                content: "fast".to_owned(),
                len: 4,
            }]
        );
    }

    #[test]
    fn test_marker_without_order() {
        let extraction = extract_markers("{#{x}#}y");
        assert_eq!(extraction.text, "xy");
        assert_eq!(extraction.markers[0].order, None);
        assert_eq!(extraction.markers[0].content, "x");
    }

    #[test]
    fn test_decimal_order_token() {
        let extraction = extract_markers("{#1.5{a}#}");
        assert_eq!(extraction.markers[0].order.as_deref(), Some("1.5"));
    }

    #[test]
    fn test_offsets_in_cleaned_coordinates() {
        let extraction = extract_markers("ab{#1{cd}#}ef{#2{gh}#}ij");
        assert_eq!(extraction.text, "abcdefghij");
        assert_eq!(extraction.markers[0].offset, 2);
        assert_eq!(extraction.markers[1].offset, 6);
        // Each marker's recorded span points at its own content.
        for marker in &extraction.markers {
            assert_eq!(
                &extraction.text[marker.offset..marker.offset + marker.len],
                marker.content
            );
        }
    }

    #[test]
    fn test_escaped_close_is_content() {
        let extraction = extract_markers("{#{a\\}#}b}#}c");
        assert_eq!(extraction.markers[0].content, "a\\}#}b");
        assert_eq!(extraction.text, "a\\}#}bc");
    }

    #[test]
    fn test_unterminated_opening_left_verbatim() {
        let extraction = extract_markers("{#1{abc");
        assert!(extraction.markers.is_empty());
        assert_eq!(extraction.text, "{#1{abc");
    }

    #[test]
    fn test_unterminated_opening_does_not_hide_later_marker() {
        let extraction = extract_markers("{#1{abc {#2{x}#} y");
        // The first opening pairs with the only closer; degraded but sane.
        assert_eq!(extraction.markers.len(), 1);
        assert_eq!(extraction.markers[0].content, "abc {#2{x");
        assert_eq!(extraction.text, "abc {#2{x y");
    }

    #[test]
    fn test_nested_markers_degrade() {
        // Out of contract: the inner opening survives as content and the
        // outer closer is left as plain text.
        let extraction = extract_markers("{#1{out {#2{in}#} rest}#}");
        assert_eq!(extraction.markers.len(), 1);
        assert_eq!(extraction.markers[0].content, "out {#2{in");
        assert_eq!(extraction.text, "out {#2{in rest}#}");
    }

    #[test]
    fn test_empty_content_recorded() {
        let extraction = extract_markers("{#{}#}");
        assert_eq!(extraction.text, "");
        assert_eq!(extraction.markers[0].len, 0);
    }

    #[test]
    fn test_pure_and_idempotent_on_clean_text() {
        let clean = extract_markers("fn main() {}").text;
        assert_eq!(clean, "fn main() {}");
        assert_eq!(extract_markers(&clean).text, clean);
    }
}
