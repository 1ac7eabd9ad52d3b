//! HTML escaping for user-supplied text embedded in trusted messages.

/// Escape `s` so it can be interpolated into HTML as text.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape;

    #[test]
    fn test_escapes_markup() {
        assert_eq!(
            escape("</a><script>alert('hax')</script>@hacks.tld"),
            "&lt;/a&gt;&lt;script&gt;alert(&#39;hax&#39;)&lt;/script&gt;@hacks.tld"
        );
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(escape("tim@example.com"), "tim@example.com");
    }
}
