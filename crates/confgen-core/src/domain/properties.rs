//! Parser for the line-oriented `.properties` text format.
//!
//! Supported syntax:
//!
//! - `#` and `!` comment lines, blank lines
//! - `key=value`, `key:value` and `key value` separators
//! - logical lines continued with a trailing backslash
//! - `\t`, `\n`, `\r`, `\f`, `\uXXXX` and `\<char>` escapes in keys and values
//!
//! The result keeps keys in the order they were first read. A key repeated
//! later in the same input keeps its first position and takes the last value.

use indexmap::IndexMap;
use thiserror::Error;

/// Ordered key/value mapping of a single property file.
pub type PropertyMap = IndexMap<String, String>;

/// Syntax error in a property file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct PropertiesError {
    /// 1-based physical line where the offending logical line starts.
    pub line: usize,
    pub message: String,
}

impl PropertiesError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

const WHITESPACE: [char; 3] = [' ', '\t', '\x0c'];

fn is_whitespace(c: char) -> bool {
    WHITESPACE.contains(&c)
}

/// Parse the contents of a property file.
pub fn parse(input: &str) -> Result<PropertyMap, PropertiesError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut map = PropertyMap::new();
    let mut lines = physical_lines(input).enumerate();

    while let Some((index, raw)) = lines.next() {
        let first = raw.trim_start_matches(WHITESPACE);
        if first.is_empty() || first.starts_with('#') || first.starts_with('!') {
            continue;
        }

        let mut logical = first.to_string();
        while continues(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(WHITESPACE)),
                None => break,
            }
        }

        let (key, value) = split_entry(&logical, index + 1)?;
        map.insert(key, value);
    }

    Ok(map)
}

/// Lines ended by `\n`, `\r\n` or a lone `\r`.
fn physical_lines(input: &str) -> impl Iterator<Item = &str> {
    let mut rest = input;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some(end) = rest.find(['\n', '\r']) else {
            return Some(std::mem::take(&mut rest));
        };
        let line = &rest[..end];
        let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[end + terminator..];
        Some(line)
    })
}

/// An odd number of trailing backslashes escapes the line terminator.
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn split_entry(logical: &str, line: usize) -> Result<(String, String), PropertiesError> {
    let chars: Vec<char> = logical.chars().collect();

    let mut key_end = chars.len();
    let mut escaped = false;
    for (i, &c) in chars.iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                break;
            }
            c if is_whitespace(c) => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let mut value_start = key_end;
    while value_start < chars.len() && is_whitespace(chars[value_start]) {
        value_start += 1;
    }
    if value_start < chars.len() && matches!(chars[value_start], '=' | ':') {
        value_start += 1;
        while value_start < chars.len() && is_whitespace(chars[value_start]) {
            value_start += 1;
        }
    }

    let key = unescape(&chars[..key_end], line)?;
    let value = unescape(&chars[value_start..], line)?;
    Ok((key, value))
}

fn unescape(raw: &[char], line: usize) -> Result<String, PropertiesError> {
    let mut out = String::with_capacity(raw.len());
    // Consecutive \uXXXX escapes are UTF-16 code units and may form a
    // surrogate pair, so they are decoded together.
    let mut units: Vec<u16> = Vec::new();
    let mut iter = raw.iter().copied();

    while let Some(c) = iter.next() {
        if c != '\\' {
            flush_units(&mut units, &mut out, line)?;
            out.push(c);
            continue;
        }

        match iter.next() {
            Some('u') => {
                let hex: String = iter.by_ref().take(4).collect();
                if hex.len() != 4 || !hex.chars().all(|h| h.is_ascii_hexdigit()) {
                    return Err(PropertiesError::new(
                        line,
                        format!("malformed \\uxxxx encoding '\\u{hex}'"),
                    ));
                }
                let unit = u16::from_str_radix(&hex, 16)
                    .map_err(|e| PropertiesError::new(line, e.to_string()))?;
                units.push(unit);
            }
            Some(other) => {
                flush_units(&mut units, &mut out, line)?;
                out.push(match other {
                    't' => '\t',
                    'n' => '\n',
                    'r' => '\r',
                    'f' => '\x0c',
                    c => c,
                });
            }
            // A lone trailing backslash only occurs on the last line of the
            // input and is dropped.
            None => {}
        }
    }
    flush_units(&mut units, &mut out, line)?;

    Ok(out)
}

fn flush_units(units: &mut Vec<u16>, out: &mut String, line: usize) -> Result<(), PropertiesError> {
    if units.is_empty() {
        return Ok(());
    }
    let decoded = String::from_utf16(units)
        .map_err(|_| PropertiesError::new(line, "unpaired UTF-16 surrogate in \\u escape"))?;
    out.push_str(&decoded);
    units.clear();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(map: &PropertyMap) -> Vec<(&str, &str)> {
        map.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    #[test]
    fn parses_all_separator_styles() {
        let map = parse("a=1\nb:2\nc 3\nd = 4\ne\t:\t5\n").unwrap();
        assert_eq!(
            entries(&map),
            vec![("a", "1"), ("b", "2"), ("c", "3"), ("d", "4"), ("e", "5")]
        );
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let map = parse("# comment\n! also comment\n\n   \n  key=value\n").unwrap();
        assert_eq!(entries(&map), vec![("key", "value")]);
    }

    #[test]
    fn preserves_read_order() {
        let map = parse("zeta=1\nalpha=2\nmid=3").unwrap();
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn lone_carriage_return_ends_a_line() {
        let map = parse("a=1\rb=2").unwrap();
        assert_eq!(entries(&map), vec![("a", "1"), ("b", "2")]);
    }

    #[test]
    fn mixed_line_endings_and_continuation() {
        let map = parse("a=1\r\nb=x\\\r  y\nc=3\r").unwrap();
        assert_eq!(entries(&map), vec![("a", "1"), ("b", "xy"), ("c", "3")]);
    }

    #[test]
    fn repeated_key_keeps_position_and_last_value() {
        let map = parse("a=1\nb=2\na=3").unwrap();
        assert_eq!(entries(&map), vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn key_without_value_is_empty() {
        let map = parse("flag\nother=").unwrap();
        assert_eq!(entries(&map), vec![("flag", ""), ("other", "")]);
    }

    #[test]
    fn only_first_separator_splits() {
        let map = parse("url=jdbc:h2:mem=x\na = = b").unwrap();
        assert_eq!(map["url"], "jdbc:h2:mem=x");
        assert_eq!(map["a"], "= b");
    }

    #[test]
    fn joins_continuation_lines() {
        let map = parse("list=one,\\\n     two,\\\n     three\nnext=x").unwrap();
        assert_eq!(map["list"], "one,two,three");
        assert_eq!(map["next"], "x");
    }

    #[test]
    fn escaped_backslash_does_not_continue() {
        let map = parse("path=C:\\\\\nnext=x").unwrap();
        assert_eq!(map["path"], "C:\\");
        assert_eq!(map["next"], "x");
    }

    #[test]
    fn comment_marker_inside_continuation_is_content() {
        let map = parse("a=b\\\n#c").unwrap();
        assert_eq!(map["a"], "b#c");
    }

    #[test]
    fn unescapes_keys_and_values() {
        let map = parse("my\\ key\\=x=tab\\there\\nnew\nq=\\u00e9t\\u00E9").unwrap();
        assert_eq!(map["my key=x"], "tab\there\nnew");
        assert_eq!(map["q"], "été");
    }

    #[test]
    fn decodes_surrogate_pairs() {
        let map = parse("smile=\\uD83D\\uDE00").unwrap();
        assert_eq!(map["smile"], "\u{1F600}");
    }

    #[test]
    fn rejects_malformed_unicode_escape() {
        let err = parse("ok=1\nbad=\\u12G4").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("malformed"));
    }

    #[test]
    fn rejects_short_unicode_escape() {
        assert!(parse("bad=\\u12").is_err());
    }

    #[test]
    fn rejects_lone_surrogate() {
        assert!(parse("bad=\\uD83D").is_err());
    }

    #[test]
    fn handles_crlf_and_bom() {
        let map = parse("\u{feff}a=1\r\nb=2\r\n").unwrap();
        assert_eq!(entries(&map), vec![("a", "1"), ("b", "2")]);
    }

    #[test]
    fn empty_input_is_empty_map() {
        assert!(parse("").unwrap().is_empty());
    }
}
