//! Shell-style word splitting for curl commands
//!
//! Commands pasted from a terminal, from documentation or from a browser's
//! "Copy as cURL" menu use POSIX shell quoting. [`tokenize`] splits such a
//! line into argv-style words, respecting single quotes, double quotes,
//! backslash escapes and `$'...'` strings.

/// A shell word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// A quote opened inside this word was never closed
    pub unterminated: bool,
}

impl Token {
    fn complete(text: String) -> Self {
        Self { text, unterminated: false }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    None,
    Single,
    Double,
    AnsiC,
}

/// Collapse a possibly multi-line command into one logical line
///
/// Backslash-newline continuations and bare newlines both become a single
/// space. Surrounding whitespace is removed.
pub fn normalize(cmd: &str) -> String {
    cmd.trim()
        .replace("\\\r\n", " ")
        .replace("\\\n", " ")
        .replace("\r\n", " ")
        .replace('\n', " ")
}

/// Split a command line into shell words
///
/// Never fails. A word whose quote is still open at the end of input
/// swallows the rest of the line and is flagged as unterminated, so callers
/// can drop it instead of guessing where it should have ended.
pub fn tokenize(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote = Quote::None;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match quote {
            Quote::Single => {
                if c == '\'' {
                    quote = Quote::None;
                } else {
                    current.push(c);
                }
            }
            Quote::Double => match c {
                '"' => quote = Quote::None,
                '\\' => match chars.peek() {
                    Some(&next @ ('"' | '\\' | '$' | '`')) => {
                        current.push(next);
                        chars.next();
                    }
                    _ => current.push('\\'),
                },
                _ => current.push(c),
            },
            Quote::AnsiC => match c {
                '\'' => quote = Quote::None,
                '\\' => push_ansi_escape(&mut current, chars.next()),
                _ => current.push(c),
            },
            Quote::None => match c {
                c if c.is_whitespace() => {
                    if in_word {
                        tokens.push(Token::complete(std::mem::take(&mut current)));
                        in_word = false;
                    }
                }
                '\\' => {
                    in_word = true;
                    if let Some(next) = chars.next() {
                        current.push(next);
                    }
                }
                '\'' => {
                    in_word = true;
                    quote = Quote::Single;
                }
                '"' => {
                    in_word = true;
                    quote = Quote::Double;
                }
                '$' if chars.peek() == Some(&'\'') => {
                    chars.next();
                    in_word = true;
                    quote = Quote::AnsiC;
                }
                _ => {
                    in_word = true;
                    current.push(c);
                }
            },
        }
    }

    if in_word {
        tokens.push(Token {
            text: current,
            unterminated: quote != Quote::None,
        });
    }

    tokens
}

/// Decode one escape sequence inside `$'...'`
fn push_ansi_escape(out: &mut String, escaped: Option<char>) {
    match escaped {
        Some('n') => out.push('\n'),
        Some('t') => out.push('\t'),
        Some('r') => out.push('\r'),
        Some(c @ ('\\' | '\'' | '"' | '?')) => out.push(c),
        Some(other) => {
            out.push('\\');
            out.push(other);
        }
        None => out.push('\\'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(line: &str) -> Vec<String> {
        tokenize(line).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_tokenize_quotes() {
        assert_eq!(
            words(r#"curl -H 'Content-Type: application/json' "https://example.com""#),
            vec!["curl", "-H", "Content-Type: application/json", "https://example.com"]
        );
    }

    #[test]
    fn test_double_quote_escapes() {
        assert_eq!(words(r#"-d "{\"a\":\"\$HOME\"}""#), vec!["-d", r#"{"a":"$HOME"}"#]);
    }

    #[test]
    fn test_single_quotes_are_literal() {
        assert_eq!(words(r"'a\nb'"), vec![r"a\nb"]);
    }

    #[test]
    fn test_backslash_outside_quotes() {
        assert_eq!(words(r"hello\ world"), vec!["hello world"]);
    }

    #[test]
    fn test_adjacent_segments_join() {
        assert_eq!(words(r#"--data='x'"y"z"#), vec!["--data=xyz"]);
    }

    #[test]
    fn test_empty_quoted_word() {
        assert_eq!(words("--data-raw ''"), vec!["--data-raw", ""]);
    }

    #[test]
    fn test_ansi_c_quoting() {
        assert_eq!(words(r"$'line\none\'s'"), vec!["line\none's"]);
    }

    #[test]
    fn test_unterminated_quote_is_flagged() {
        let tokens = tokenize(r#"-H "Key: Value' https://x.com"#);
        assert_eq!(tokens.len(), 2);
        assert!(!tokens[0].unterminated);
        assert!(tokens[1].unterminated);
        assert_eq!(tokens[1].text, "Key: Value' https://x.com");
    }

    #[test]
    fn test_normalize_line_continuations() {
        let cmd = "curl https://x.com \\\n  -H 'A: 1' \\\r\n  -d 'b'\n";
        assert_eq!(normalize(cmd), "curl https://x.com    -H 'A: 1'    -d 'b'");
    }
}
