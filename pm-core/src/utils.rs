//! Shared string utilities.

/// Check whether `s` is a valid C# identifier (ASCII subset, `@` prefix allowed).
pub fn is_identifier(s: &str) -> bool {
    let s = s.strip_prefix('@').unwrap_or(s);
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Reduce a display title to identifier characters (e.g., "My Plugin!" -> "MyPlugin").
///
/// Returns an empty string when nothing usable remains.
pub fn to_identifier(s: &str) -> String {
    let ident: String = s
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    match ident.chars().next() {
        Some(c) if c.is_ascii_digit() => format!("_{ident}"),
        _ => ident,
    }
}

/// Strip one pair of surrounding double quotes from a string literal.
///
/// Verbatim (`@"..."`) and interpolated (`$"..."`) prefixes are removed too.
/// Text that is not a quoted literal is returned trimmed but otherwise unchanged.
pub fn unquote(s: &str) -> &str {
    let s = s.trim();
    let body = s
        .strip_prefix("$@")
        .or_else(|| s.strip_prefix("@$"))
        .or_else(|| s.strip_prefix('@'))
        .or_else(|| s.strip_prefix('$'))
        .unwrap_or(s);
    match body.strip_prefix('"').and_then(|b| b.strip_suffix('"')) {
        Some(inner) => inner,
        None => s,
    }
}

/// Case-insensitive (ASCII) substring check.
pub fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    find_ignore_ascii_case(haystack, needle).is_some()
}

/// Remove every case-insensitive (ASCII) occurrence of `needle` from `haystack`.
pub fn remove_ignore_ascii_case(haystack: &str, needle: &str) -> String {
    if needle.is_empty() {
        return haystack.to_string();
    }

    let mut result = String::with_capacity(haystack.len());
    let mut rest = haystack;
    while let Some(index) = find_ignore_ascii_case(rest, needle) {
        result.push_str(&rest[..index]);
        rest = &rest[index + needle.len()..];
    }
    result.push_str(rest);
    result
}

fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    let hay = haystack.as_bytes();
    let pat = needle.as_bytes();
    if pat.len() > hay.len() {
        return None;
    }
    (0..=hay.len() - pat.len()).find(|&i| {
        haystack.is_char_boundary(i)
            && haystack.is_char_boundary(i + pat.len())
            && hay[i..i + pat.len()].eq_ignore_ascii_case(pat)
    })
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
