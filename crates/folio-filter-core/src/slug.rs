//! Label → slug mapping shared by facets, the predicate and the query stores.

/// Map a free-text label to its URL-safe slug.
///
/// The label is lower-cased, then every maximal run of characters outside
/// `[a-z0-9]` becomes a single `-`. Leading and trailing dashes are kept, so
/// `"C#"` becomes `"c-"` and `"Next.js"` becomes `"next-js"`.
///
/// The mapping is idempotent but not injective: `"C#"` and `"C +"` share a slug.
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut in_gap = false;

    for c in label.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
            in_gap = false;
        } else if !in_gap {
            slug.push('-');
            in_gap = true;
        }
    }

    slug
}
