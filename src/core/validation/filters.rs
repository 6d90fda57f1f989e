//! Value filters applied before persistence

use regex::Regex;
use std::sync::OnceLock;

/// Derive a company code from its name.
///
/// Lowercases the name and strips every character outside `[a-z0-9]`.
/// Deterministic: two names differing only in punctuation or case collide.
pub fn slugify(name: &str) -> String {
    static NON_ALNUM: OnceLock<Regex> = OnceLock::new();
    let regex = NON_ALNUM.get_or_init(|| Regex::new(r"[^a-z0-9]+").unwrap());
    regex.replace_all(&name.to_lowercase(), "").into_owned()
}
