//! String literal escaping and unescaping for `data` directives.
//!
//! This module converts between:
//! - Runtime strings (e.g. "hello\n" with an actual newline character)
//! - Assembly source literals (e.g. `"hello\n"` with a backslash-n sequence)
//!
//! Recognised escapes are `\n`, `\t`, `\\` and `\"`.

use core::fmt;

/// Errors that can occur when reading a quoted string literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnescapeError {
    /// The literal does not start with `"`.
    MissingQuote,
    /// End of line reached before the closing `"`.
    Unterminated,
    /// Invalid escape sequence (e.g. `\q`). `pos` is the byte offset of the backslash.
    InvalidEscape { pos: usize, seq: String },
}

impl fmt::Display for UnescapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnescapeError::MissingQuote => write!(f, "expected a quoted string"),
            UnescapeError::Unterminated => write!(f, "unterminated string literal"),
            UnescapeError::InvalidEscape { pos, seq } => {
                write!(f, "invalid escape sequence '{}' at position {}", seq, pos)
            }
        }
    }
}

/// Escape a runtime string back into a double-quoted source literal.
///
/// # Example
///
/// ```
/// use regvm_core::syntax::string_literal::escape_string;
///
/// let mut output = String::new();
/// escape_string(&mut output, "a\tb\n").unwrap();
/// assert_eq!(output, r#""a\tb\n""#);
/// ```
pub fn escape_string(f: &mut impl fmt::Write, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for ch in s.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

/// Read a double-quoted literal from the start of `input`.
///
/// Returns the unescaped contents and the byte length consumed, closing
/// quote included, so the caller can check what follows the literal.
///
/// # Example
///
/// ```
/// use regvm_core::syntax::string_literal::parse_quoted;
///
/// let (text, len) = parse_quoted(r#""hi\n" ; greeting"#).unwrap();
/// assert_eq!(text, "hi\n");
/// assert_eq!(len, 6);
/// ```
pub fn parse_quoted(input: &str) -> Result<(String, usize), UnescapeError> {
    let mut chars = input.char_indices();
    match chars.next() {
        Some((_, '"')) => {}
        _ => return Err(UnescapeError::MissingQuote),
    }

    let mut output = String::new();
    while let Some((pos, ch)) = chars.next() {
        match ch {
            '"' => return Ok((output, pos + 1)),
            '\\' => match chars.next() {
                Some((_, 'n')) => output.push('\n'),
                Some((_, 't')) => output.push('\t'),
                Some((_, '\\')) => output.push('\\'),
                Some((_, '"')) => output.push('"'),
                Some((_, other)) => {
                    return Err(UnescapeError::InvalidEscape {
                        pos,
                        seq: format!("\\{}", other),
                    });
                }
                None => return Err(UnescapeError::Unterminated),
            },
            c => output.push(c),
        }
    }
    Err(UnescapeError::Unterminated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_plain() {
        assert_eq!(parse_quoted(r#""hello world""#), Ok(("hello world".to_string(), 13)));
    }

    #[test]
    fn test_parse_escapes() {
        let (text, len) = parse_quoted(r#""tab\there\\ \"q\"\n" rest"#).unwrap();
        assert_eq!(text, "tab\there\\ \"q\"\n");
        assert_eq!(len, 21);
    }

    #[test]
    fn test_parse_utf8() {
        assert_eq!(parse_quoted("\"café\""), Ok(("café".to_string(), 7)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_quoted("hello"), Err(UnescapeError::MissingQuote));
        assert_eq!(parse_quoted(""), Err(UnescapeError::MissingQuote));
        assert_eq!(parse_quoted(r#""open"#), Err(UnescapeError::Unterminated));
        assert_eq!(parse_quoted(r#""trailing\"#), Err(UnescapeError::Unterminated));
        assert_eq!(
            parse_quoted(r#""bad \q""#),
            Err(UnescapeError::InvalidEscape {
                pos: 5,
                seq: "\\q".to_string()
            })
        );
    }

    #[test]
    fn test_escape_inverts_parse() {
        let original = "line\n\t\"quoted\" \\ end";
        let mut escaped = String::new();
        escape_string(&mut escaped, original).unwrap();
        let (parsed, len) = parse_quoted(&escaped).unwrap();
        assert_eq!(parsed, original);
        assert_eq!(len, escaped.len());
    }
}
