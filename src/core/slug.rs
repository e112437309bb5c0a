//! Slug derivation for primary keys
//!
//! Companies and industries are keyed by a URL-safe slug derived from
//! their display name. The derivation is a pure function: the same name
//! always yields the same code, so repeating a create with the same name
//! collides on the primary key at the store layer.

/// Characters stripped from a name before slugging.
const STRIPPED: &[char] = &['*', '+', '~', '.', '(', ')', '\'', '"', '!', ':', '@'];

/// Derive a lowercase, URL-safe slug from a display name.
///
/// Strips the punctuation set above, lowercases the rest, and collapses
/// runs of whitespace into single `-` separators (leading and trailing
/// whitespace produces no separator).
///
/// # Example
///
/// ```
/// use biztime::core::slug::slugify;
///
/// assert_eq!(slugify("Apple Inc"), "apple-inc");
/// ```
pub fn slugify(name: &str) -> String {
    let stripped: String = name.chars().filter(|c| !STRIPPED.contains(c)).collect();

    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}
