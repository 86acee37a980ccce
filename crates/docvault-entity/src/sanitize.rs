//! Name normalisation applied before names are validated and stored.

/// Trim surrounding whitespace and HTML-escape the result.
///
/// Names are compared after this step, so `" docs "` and `"docs"` collide.
pub fn prepare_name(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut out = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Apply [`prepare_name`] to an optional patch value.
///
/// Blank input collapses to `None` so that it leaves the stored value alone.
pub fn prepare_optional(raw: Option<&str>) -> Option<String> {
    raw.map(prepare_name).filter(|name| !name.is_empty())
}
