//! Property-list mini-syntax.
//!
//! A sibling concern to the fragment core: hosts annotate code blocks with
//! space-separated selector-like tokens that become element properties.
//!
//! Supported tokens: `[name]`, `[name=value]`, `.class`, `#id`. Classes
//! accumulate into a single space-joined `class` property; a later `#id`
//! overrides an earlier one.

use cs_tree::Properties;

/// Parse a property list into a property map.
///
/// Malformed input is rejected to an empty map with a logged diagnostic;
/// this never aborts the caller's pass.
///
/// # Example
///
/// ```
/// use cs_fragments::parse_properties;
///
/// let props = parse_properties(".keyword [data-line=3] #intro");
/// assert_eq!(props.get("class"), Some(&Some("keyword".to_string())));
/// assert_eq!(props.get("data-line"), Some(&Some("3".to_string())));
/// assert_eq!(props.get("id"), Some(&Some("intro".to_string())));
/// ```
#[must_use]
pub fn parse_properties(input: &str) -> Properties {
    let mut props = Properties::new();
    let mut classes: Vec<&str> = Vec::new();

    for token in input.split_whitespace() {
        if let Some(class) = token.strip_prefix('.') {
            if class.is_empty() {
                return reject(token);
            }
            classes.push(class);
        } else if let Some(id) = token.strip_prefix('#') {
            if id.is_empty() {
                return reject(token);
            }
            props.insert("id".to_owned(), Some(id.to_owned()));
        } else if let Some(inner) = token
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            match inner.split_once('=') {
                Some((name, value)) => {
                    if name.is_empty() {
                        return reject(token);
                    }
                    props.insert(name.to_owned(), Some(value.to_owned()));
                }
                None => {
                    if inner.is_empty() {
                        return reject(token);
                    }
                    props.insert(inner.to_owned(), None);
                }
            }
        } else {
            return reject(token);
        }
    }

    if !classes.is_empty() {
        props.insert("class".to_owned(), Some(classes.join(" ")));
    }
    props
}

fn reject(token: &str) -> Properties {
    tracing::warn!(token = %token, "Malformed property selector, ignoring the whole list");
    Properties::new()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_properties(""), Properties::new());
    }

    #[test]
    fn test_classes_accumulate() {
        let props = parse_properties(".foo .bar");
        assert_eq!(props.get("class"), Some(&Some("foo bar".to_owned())));
    }

    #[test]
    fn test_id() {
        let props = parse_properties("#intro");
        assert_eq!(props.get("id"), Some(&Some("intro".to_owned())));
    }

    #[test]
    fn test_later_id_wins() {
        let props = parse_properties("#a #b");
        assert_eq!(props.get("id"), Some(&Some("b".to_owned())));
    }

    #[test]
    fn test_bare_attribute() {
        let props = parse_properties("[data-trim]");
        assert_eq!(props.get("data-trim"), Some(&None));
    }

    #[test]
    fn test_valued_attribute() {
        let props = parse_properties("[data-line=3]");
        assert_eq!(props.get("data-line"), Some(&Some("3".to_owned())));
    }

    #[test]
    fn test_mixed_tokens() {
        let props = parse_properties(".keyword [lang=rust] #first [data-trim]");
        assert_eq!(props.len(), 4);
        assert_eq!(props.get("lang"), Some(&Some("rust".to_owned())));
    }

    #[test]
    fn test_malformed_rejected_to_empty() {
        assert_eq!(parse_properties("plain"), Properties::new());
        assert_eq!(parse_properties("."), Properties::new());
        assert_eq!(parse_properties("#"), Properties::new());
        assert_eq!(parse_properties("[]"), Properties::new());
        assert_eq!(parse_properties("[=v]"), Properties::new());
        assert_eq!(parse_properties("[unclosed"), Properties::new());
        // One bad token rejects the whole list.
        assert_eq!(parse_properties(".ok junk"), Properties::new());
    }
}
