//! Key Pattern Module
//!
//! Translates the glob patterns accepted by `delete_matched` into key
//! selectors the document collection can evaluate. Patterns with a single
//! trailing `*` become prefix filters so the common case never needs a
//! full-collection regex scan.

use regex::Regex;

use crate::error::{CacheError, Result};
use crate::storage::KeySelector;

/// Parses a glob pattern (`*` matches any run of characters, `?` matches a
/// single character) into a key selector.
///
/// - no wildcards: exact-match filter
/// - `literal*`: prefix filter
/// - anything else: anchored regex over the whole key
pub fn parse(pattern: &str) -> Result<KeySelector> {
    if !pattern.contains(['*', '?']) {
        return Ok(KeySelector::Eq(pattern.to_string()));
    }

    if let Some(prefix) = pattern.strip_suffix('*') {
        if !prefix.contains(['*', '?']) {
            return Ok(KeySelector::Prefix(prefix.to_string()));
        }
    }

    let regex = Regex::new(&glob_to_regex(pattern))
        .map_err(|e| CacheError::InvalidPattern(format!("{pattern:?}: {e}")))?;
    Ok(KeySelector::Regex(regex))
}

/// Builds an anchored regex source string equivalent to the glob pattern.
fn glob_to_regex(pattern: &str) -> String {
    let mut source = String::with_capacity(pattern.len() + 8);
    source.push('^');
    for ch in pattern.chars() {
        match ch {
            '*' => source.push_str(".*"),
            '?' => source.push('.'),
            other => source.push_str(&regex::escape(&other.to_string())),
        }
    }
    source.push('$');
    source
}
