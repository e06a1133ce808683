//! Escape-aware splitting shared by all grammars.
//!
//! A backslash makes the next character literal, so `\;` inside a segment is
//! never a separator. Splitting keeps escapes in place: a nested grammar
//! receives its raw text untouched and only leaf values go through
//! [`unescape`]. The inverse, [`escape`], is applied to leaf values on
//! serialization.
//!
//! ```rust
//! use easyconfig_convert::split::{escape, split, unescape};
//! use easyconfig_convert::Separators;
//!
//! let parts = split(r"a\;b ; c", ';', None).unwrap();
//! assert_eq!(parts, vec![r"a\;b", "c"]);
//! assert_eq!(unescape(parts[0]).unwrap(), "a;b");
//! assert_eq!(escape("a;b", &Separators::DEFAULT), r"a\;b");
//! ```

use crate::options::{Separators, ESCAPE};
use crate::{Error, Result};

/// Splits `input` on every unescaped `sep`, trimming each part.
///
/// With `max_splits = Some(n)` at most `n` splits are made and the remainder
/// stays in the last part. The parts are raw: escapes are preserved.
///
/// # Errors
///
/// Returns a syntax error if `input` ends with a lone escape character.
pub fn split(input: &str, sep: char, max_splits: Option<usize>) -> Result<Vec<&str>> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut chars = input.char_indices();

    while let Some((idx, ch)) = chars.next() {
        if ch == ESCAPE {
            if chars.next().is_none() {
                return Err(Error::syntax(input, "dangling escape character at end of input"));
            }
        } else if ch == sep && max_splits.map_or(true, |max| parts.len() < max) {
            parts.push(trim(&input[start..idx]));
            start = idx + ch.len_utf8();
        }
    }
    parts.push(trim(&input[start..]));

    Ok(parts)
}

/// Trims unescaped whitespace from both ends of a raw part.
///
/// Escaped whitespace (`\ `) counts as content and is kept.
#[must_use]
pub fn trim(raw: &str) -> &str {
    let raw = raw.trim_start();
    let mut end = 0;
    let mut chars = raw.char_indices();

    while let Some((idx, ch)) = chars.next() {
        if ch == ESCAPE {
            end = match chars.next() {
                Some((next_idx, next)) => next_idx + next.len_utf8(),
                None => idx + ch.len_utf8(),
            };
        } else if !ch.is_whitespace() {
            end = idx + ch.len_utf8();
        }
    }

    &raw[..end]
}

/// Resolves escapes in a raw leaf value.
///
/// # Errors
///
/// Returns a syntax error if `raw` ends with a lone escape character.
pub fn unescape(raw: &str) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(ch) = chars.next() {
        if ch == ESCAPE {
            match chars.next() {
                Some(next) => out.push(next),
                None => {
                    return Err(Error::syntax(raw, "dangling escape character at end of input"))
                }
            }
        } else {
            out.push(ch);
        }
    }

    Ok(out)
}

/// Escapes a leaf value so that no splitter of `seps` (nor of the default
/// separators an enclosing list uses) cuts it, and trimming keeps its
/// surrounding whitespace.
#[must_use]
pub fn escape(value: &str, seps: &Separators) -> String {
    let last = value.chars().count().saturating_sub(1);
    let mut out = String::with_capacity(value.len());

    for (pos, ch) in value.chars().enumerate() {
        let special = seps.is_special(ch) || Separators::DEFAULT.is_special(ch);
        if special || (ch.is_whitespace() && (pos == 0 || pos == last)) {
            out.push(ESCAPE);
        }
        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain() {
        assert_eq!(split("a,b,c", ',', None).unwrap(), vec!["a", "b", "c"]);
        assert_eq!(split("single", ',', None).unwrap(), vec!["single"]);
        assert_eq!(split("", ',', None).unwrap(), vec![""]);
    }

    #[test]
    fn test_split_trims_parts() {
        assert_eq!(split(" a ;  b;c ", ';', None).unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_respects_escapes() {
        let parts = split(r"x\,y,z", ',', None).unwrap();
        assert_eq!(parts, vec![r"x\,y", "z"]);

        let parts = split(r"a\\,b", ',', None).unwrap();
        assert_eq!(parts, vec![r"a\\", "b"]);
    }

    #[test]
    fn test_split_max() {
        let parts = split("dest:http://host/x", ':', Some(1)).unwrap();
        assert_eq!(parts, vec!["dest", "http://host/x"]);
    }

    #[test]
    fn test_split_dangling_escape() {
        let err = split(r"abc\", ',', None).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_trim_keeps_escaped_whitespace() {
        assert_eq!(trim(r"  a\  "), r"a\ ");
        assert_eq!(trim(r"\  a"), r"\  a");
        assert_eq!(trim("   "), "");
    }

    #[test]
    fn test_escape_unescape() {
        let seps = Separators::DEFAULT;
        for value in ["plain", "a;b", "c:d", "e,f", r"g\h", " lead", "trail ", " ", "mid dle"] {
            let escaped = escape(value, &seps);
            assert_eq!(trim(&escaped), escaped, "escaped form of {:?} must survive trim", value);
            assert_eq!(unescape(&escaped).unwrap(), value);
        }
        assert_eq!(escape("mid dle", &seps), "mid dle");
    }
}
