// src/core/sanitize.rs

/// Collapse runs of whitespace (including `&nbsp;` once decoded) to a single
/// space and trim both ends.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Case-insensitive substring test. An empty needle never matches.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() { return false; }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// True for empty or whitespace-only text.
#[inline]
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
