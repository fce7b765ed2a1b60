//! Escaping for values embedded in generated Java.

use std::fmt::Write;

/// Escape `raw` for use inside a Java string literal.
pub fn escape_java_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => push_unicode_escape(&mut out, c),
            c => out.push(c),
        }
    }
    out
}

/// Escape `raw` for a single-line Javadoc comment.
///
/// Backslashes are doubled because the Java compiler translates `\uXXXX`
/// sequences even inside comments.
pub fn escape_comment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '*' if chars.peek() == Some(&'/') => {
                chars.next();
                out.push_str("*&#47;");
            }
            c if c.is_control() => push_unicode_escape(&mut out, c),
            c => out.push(c),
        }
    }
    out
}

fn push_unicode_escape(out: &mut String, c: char) {
    let mut units = [0u16; 2];
    for unit in c.encode_utf16(&mut units) {
        // Writing to a String cannot fail.
        let _ = write!(out, "\\u{:04x}", unit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn java_literal_escapes() {
        assert_eq!(escape_java_string(r#"a"b\c"#), r#"a\"b\\c"#);
        assert_eq!(escape_java_string("l1\nl2\tx\r"), r"l1\nl2\tx\r");
        assert_eq!(escape_java_string("\u{1}"), r"\u0001");
        assert_eq!(escape_java_string("héllo ✓"), "héllo ✓");
    }

    #[test]
    fn comment_cannot_be_closed_early() {
        assert_eq!(escape_comment("a*/b"), "a*&#47;b");
        assert_eq!(escape_comment(r"x\u000a"), r"x\\u000a");
        assert_eq!(escape_comment("db.url"), "db.url");
    }
}
