//parser/parsers.rs

/// Returns the segment after the final `.`; a name without dots is its own leaf.
pub fn extract_leaf_name(qualified_name: &str) -> &str {
    match qualified_name.rfind('.') {
        Some(pos) => &qualified_name[pos + 1..],
        None => qualified_name,
    }
}

/// Parses the leading decimal digits of `token`, stopping at the first
/// non-digit. Returns `None` when there is no leading digit or the value
/// does not fit in a `u64`.
pub fn parse_leading_int(token: &str) -> Option<u64> {
    let end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    if end == 0 {
        return None;
    }
    token[..end].parse::<u64>().ok()
}
