//! Slug derivation and validation.
//!
//! Both functions are pure so they can be exercised without a content store.

/// Derive a URL-safe slug from a post title.
///
/// Non-ASCII characters are transliterated, letters are lowercased, every run
/// of other characters becomes a single hyphen, and leading/trailing hyphens
/// are dropped. A title with no letters or digits yields an empty string.
pub fn derive_slug(title: &str) -> String {
    ::slug::slugify(title)
}

/// Check that `candidate` is already in canonical slug form.
pub fn is_valid_slug(candidate: &str) -> bool {
    !candidate.is_empty()
        && !candidate.starts_with('-')
        && !candidate.ends_with('-')
        && !candidate.contains("--")
        && candidate
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}
