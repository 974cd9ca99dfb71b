//! In-page links
//!
//! Anchor strings for type references, and expansion of inline
//! `{@link Name}` tags found in doc comments.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    /// Regex for {@link Name} references
    static ref LINK_REGEX: Regex = Regex::new(r"\{@link (\w*)\}").unwrap();
}

/// Anchor pointing at the box rendered for `id`
pub fn link(id: &str, name: &str) -> String {
    let name = if name.is_empty() { id } else { name };
    format!("<a href=\"#{}\">{}</a>", id, name)
}

/// Replace every `{@link Name}` with an anchor to `Name`
pub fn expand_doc_links(text: &str) -> String {
    LINK_REGEX
        .replace_all(text, |caps: &Captures| link(&caps[1], &caps[1]))
        .into_owned()
}
