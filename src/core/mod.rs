//! Core authoring-side model
//!
//! This module defines the block and pipeline types that make up a pipeline
//! definition, the thread-safe pipeline registry, and the in-memory store
//! for block output variables.

pub mod block;
pub mod pipeline;
pub mod registry;
pub mod variables;

/// Derive a block or pipeline uuid from a human-readable name.
///
/// Lowercases the name and collapses every run of non-alphanumeric
/// characters into a single underscore, so "My Loader!" becomes
/// "my_loader". Leading and trailing separators are stripped.
pub fn clean_name(name: &str) -> String {
    let mut cleaned = String::with_capacity(name.len());
    let mut pending_separator = false;

    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !cleaned.is_empty() {
                cleaned.push('_');
            }
            cleaned.push(ch.to_ascii_lowercase());
            pending_separator = false;
        } else {
            pending_separator = true;
        }
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_name_lowercases_and_slugs() {
        assert_eq!(clean_name("My Loader"), "my_loader");
        assert_eq!(clean_name("Load CSV!"), "load_csv");
    }

    #[test]
    fn test_clean_name_collapses_separator_runs() {
        assert_eq!(clean_name("a -- b"), "a_b");
        assert_eq!(clean_name("  spaced out  "), "spaced_out");
    }

    #[test]
    fn test_clean_name_strips_edge_separators() {
        assert_eq!(clean_name("!!loader!!"), "loader");
        assert_eq!(clean_name(""), "");
    }

    #[test]
    fn test_clean_name_keeps_valid_names_unchanged() {
        assert_eq!(clean_name("load_titanic_csv"), "load_titanic_csv");
    }
}
