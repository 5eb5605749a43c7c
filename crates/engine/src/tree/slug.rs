//! Slug derivation from display names

use warehaus_core::{Error, Result};

use super::path::TYPE_SEGMENT;

/// Reject slugs that a path could never resolve to: empty ones, the
/// type-object segment, and anything containing a path separator.
pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() {
        return Err(Error::bad_request("Slug may not be empty"));
    }
    if slug == TYPE_SEGMENT {
        return Err(Error::bad_request(format!(
            "Slug '{}' is reserved for type-objects",
            TYPE_SEGMENT
        )));
    }
    if slug.contains('/') {
        return Err(Error::bad_request(format!("Slug '{}' may not contain '/'", slug)));
    }
    Ok(())
}

/// Derive a URL-safe slug from `display_name`.
///
/// ASCII letters and digits are kept (lowercased); every other run of
/// characters becomes a single `-`. Leading and trailing dashes are dropped.
pub fn slugify(display_name: &str) -> Result<String> {
    let mut slug = String::with_capacity(display_name.len());
    let mut pending_dash = false;
    for c in display_name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        return Err(Error::bad_request(format!(
            "Cannot derive a slug from '{}'",
            display_name
        )));
    }
    Ok(slug)
}
