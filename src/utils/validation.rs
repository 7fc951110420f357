/// Emails are compared case-insensitively; store one canonical form.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Escapes `%`, `_` and `\` so user input matches literally inside `ILIKE`.
pub fn like_pattern(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len() + 2);
    escaped.push('%');
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails_are_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  A@X.Com "), "a@x.com");
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(like_pattern("Engineer"), "%Engineer%");
        assert_eq!(like_pattern("100%_"), "%100\\%\\_%");
    }
}
