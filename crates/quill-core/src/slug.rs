//! Slug derivation for posts and author profiles.

/// Derive a URL-safe slug from a post title.
///
/// Lowercases the title, strips everything that is not a lowercase letter,
/// digit, space, or hyphen, collapses whitespace runs into single hyphens,
/// collapses hyphen runs, and trims leading/trailing hyphens. Deterministic:
/// the slug is derived from the title once at creation time and never
/// regenerated, so post URLs stay stable across edits.
///
/// A title with no alphanumeric characters yields an empty string; callers
/// must reject that as invalid.
pub fn generate_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());

    for c in title.to_lowercase().chars() {
        match c {
            'a'..='z' | '0'..='9' => slug.push(c),
            c if c.is_whitespace() || c == '-' => {
                if !slug.ends_with('-') {
                    slug.push('-');
                }
            }
            _ => {}
        }
    }

    slug.trim_matches('-').to_string()
}

/// Derive a profile slug from an email address.
///
/// Uses the lowercased local part, with every character outside `[a-z0-9]`
/// replaced by a hyphen.
pub fn user_slug(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();

    local
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '-',
        })
        .collect()
}
