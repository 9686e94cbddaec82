//! Lexer for attribute value strings using logos
//!
//! Lexing is total: characters no rule matches degrade to [`Token::Other`]
//! instead of failing, so malformed input is only rejected later, by whichever
//! grammar trips over it.

use std::fmt;

use logos::Logos;

/// Internal logos rule table. The public [`Token`] is built from this in
/// [`tokenize`] so that numbers and whitespace can carry their original text.
#[derive(Logos, Debug, Clone, PartialEq)]
enum RawToken {
    #[regex(r"[ \t\n\r]+")]
    Whitespace,

    #[regex(r"[a-zA-Z][a-zA-Z0-9]*", |lex| lex.slice().to_string())]
    Identifier(String),

    #[regex(r"-?[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Period,
    #[token("@")]
    At,
    #[token(",")]
    Comma,
    #[token("!")]
    Exclamation,
    #[token("$")]
    Dollar,

    // Longer operators win over `=` and `!` by maximal munch
    #[token("==", |_| true)]
    #[token("!=", |_| false)]
    Equality(bool),
    #[token("=")]
    Assignment,

    #[regex(r"\{\{[a-zA-Z_][a-zA-Z_0-9]*\}\}", |lex| {
        let s = lex.slice();
        s[2..s.len() - 2].to_string()
    })]
    Argument(String),
}

/// One lexical unit of an attribute value.
///
/// Numbers keep both the parsed value and the original text so serialized
/// output can round-trip losslessly. Equality carries its polarity (`==` is
/// `true`, `!=` is `false`).
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Identifier(String),
    Number(f64, String),
    ParenOpen,
    ParenClose,
    BracketOpen,
    BracketClose,
    Colon,
    Semicolon,
    Period,
    At,
    Comma,
    Exclamation,
    Dollar,
    Equality(bool),
    Assignment,
    Whitespace(String),
    /// Interpolation placeholder `{{name}}`, with the braces stripped.
    Argument(String),
    /// A character no rule matched.
    Other(char),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier(text) => write!(f, "identifier '{}'", text),
            Token::Number(_, original) => write!(f, "number {}", original),
            Token::ParenOpen => write!(f, "'('"),
            Token::ParenClose => write!(f, "')'"),
            Token::BracketOpen => write!(f, "'['"),
            Token::BracketClose => write!(f, "']'"),
            Token::Colon => write!(f, "':'"),
            Token::Semicolon => write!(f, "';'"),
            Token::Period => write!(f, "'.'"),
            Token::At => write!(f, "'@'"),
            Token::Comma => write!(f, "','"),
            Token::Exclamation => write!(f, "'!'"),
            Token::Dollar => write!(f, "'$'"),
            Token::Equality(true) => write!(f, "'=='"),
            Token::Equality(false) => write!(f, "'!='"),
            Token::Assignment => write!(f, "'='"),
            Token::Whitespace(_) => write!(f, "whitespace"),
            Token::Argument(name) => write!(f, "argument '{{{{{}}}}}'", name),
            Token::Other(ch) => write!(f, "'{}'", ch),
        }
    }
}

/// Tokenize an attribute value, dropping whitespace.
///
/// This is the form every grammar except the font/text mini-languages
/// consumes.
pub fn tokenize(input: &str) -> Vec<Token> {
    tokenize_inner(input, false)
}

/// Tokenize an attribute value, keeping whitespace tokens.
///
/// The font and text grammars reassemble raw text from tokens and need
/// interior spacing preserved.
pub fn tokenize_with_whitespace(input: &str) -> Vec<Token> {
    tokenize_inner(input, true)
}

fn tokenize_inner(input: &str, keep_whitespace: bool) -> Vec<Token> {
    let mut tokens = Vec::new();
    for (raw, span) in RawToken::lexer(input).spanned() {
        let text = &input[span];
        match raw {
            Ok(RawToken::Whitespace) => {
                if keep_whitespace {
                    tokens.push(Token::Whitespace(text.to_string()));
                }
            }
            Ok(RawToken::Identifier(name)) => tokens.push(Token::Identifier(name)),
            Ok(RawToken::Number(value)) => tokens.push(Token::Number(value, text.to_string())),
            Ok(RawToken::ParenOpen) => tokens.push(Token::ParenOpen),
            Ok(RawToken::ParenClose) => tokens.push(Token::ParenClose),
            Ok(RawToken::BracketOpen) => tokens.push(Token::BracketOpen),
            Ok(RawToken::BracketClose) => tokens.push(Token::BracketClose),
            Ok(RawToken::Colon) => tokens.push(Token::Colon),
            Ok(RawToken::Semicolon) => tokens.push(Token::Semicolon),
            Ok(RawToken::Period) => tokens.push(Token::Period),
            Ok(RawToken::At) => tokens.push(Token::At),
            Ok(RawToken::Comma) => tokens.push(Token::Comma),
            Ok(RawToken::Exclamation) => tokens.push(Token::Exclamation),
            Ok(RawToken::Dollar) => tokens.push(Token::Dollar),
            Ok(RawToken::Equality(is_equal)) => tokens.push(Token::Equality(is_equal)),
            Ok(RawToken::Assignment) => tokens.push(Token::Assignment),
            Ok(RawToken::Argument(name)) => tokens.push(Token::Argument(name)),
            Err(()) => {
                // Degrade the first offending character and re-scan the rest
                // of the slice; a failed partial match (e.g. `{{name` without
                // the closing braces) may still contain valid tokens.
                let mut chars = text.chars();
                if let Some(ch) = chars.next() {
                    tokens.push(Token::Other(ch));
                }
                let rest = chars.as_str();
                if !rest.is_empty() {
                    tokens.extend(tokenize_inner(rest, keep_whitespace));
                }
            }
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers_and_punctuation() {
        let tokens = tokenize("super.bottom");
        assert_eq!(
            tokens,
            vec![
                Token::Identifier("super".to_string()),
                Token::Period,
                Token::Identifier("bottom".to_string()),
            ]
        );
    }

    #[test]
    fn test_numbers_keep_original_text() {
        let tokens = tokenize("2.50");
        assert_eq!(tokens, vec![Token::Number(2.5, "2.50".to_string())]);
    }

    #[test]
    fn test_negative_numbers() {
        let tokens = tokenize("-8");
        assert_eq!(tokens, vec![Token::Number(-8.0, "-8".to_string())]);
    }

    #[test]
    fn test_equality_operators() {
        let tokens = tokenize("== !=");
        assert_eq!(tokens, vec![Token::Equality(true), Token::Equality(false)]);
    }

    #[test]
    fn test_assignment_is_not_equality() {
        let tokens = tokenize("title = x == y");
        assert_eq!(
            tokens,
            vec![
                Token::Identifier("title".to_string()),
                Token::Assignment,
                Token::Identifier("x".to_string()),
                Token::Equality(true),
                Token::Identifier("y".to_string()),
            ]
        );
    }

    #[test]
    fn test_exclamation_versus_not_equal() {
        let tokens = tokenize("!pad != tv");
        assert_eq!(
            tokens,
            vec![
                Token::Exclamation,
                Token::Identifier("pad".to_string()),
                Token::Equality(false),
                Token::Identifier("tv".to_string()),
            ]
        );
    }

    #[test]
    fn test_whitespace_dropped_by_default() {
        let tokens = tokenize("a  b");
        assert_eq!(
            tokens,
            vec![
                Token::Identifier("a".to_string()),
                Token::Identifier("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_whitespace_preserved_on_request() {
        let tokens = tokenize_with_whitespace("a  b");
        assert_eq!(
            tokens,
            vec![
                Token::Identifier("a".to_string()),
                Token::Whitespace("  ".to_string()),
                Token::Identifier("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_interpolation_argument() {
        let tokens = tokenize("{{user_name}}");
        assert_eq!(tokens, vec![Token::Argument("user_name".to_string())]);
    }

    #[test]
    fn test_unmatched_characters_degrade_to_other() {
        let tokens = tokenize("a & b");
        assert_eq!(
            tokens,
            vec![
                Token::Identifier("a".to_string()),
                Token::Other('&'),
                Token::Identifier("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_unterminated_argument_degrades() {
        let tokens = tokenize("{{name");
        assert_eq!(
            tokens,
            vec![
                Token::Other('{'),
                Token::Other('{'),
                Token::Identifier("name".to_string()),
            ]
        );
    }

    #[test]
    fn test_constraint_value_example() {
        let tokens = tokenize("top: lt super.bottom offset(by: -8) @ high");
        assert_eq!(
            tokens,
            vec![
                Token::Identifier("top".to_string()),
                Token::Colon,
                Token::Identifier("lt".to_string()),
                Token::Identifier("super".to_string()),
                Token::Period,
                Token::Identifier("bottom".to_string()),
                Token::Identifier("offset".to_string()),
                Token::ParenOpen,
                Token::Identifier("by".to_string()),
                Token::Colon,
                Token::Number(-8.0, "-8".to_string()),
                Token::ParenClose,
                Token::At,
                Token::Identifier("high".to_string()),
            ]
        );
    }

    #[test]
    fn test_condition_brackets() {
        let tokens = tokenize("[ipad and landscape]");
        assert_eq!(
            tokens,
            vec![
                Token::BracketOpen,
                Token::Identifier("ipad".to_string()),
                Token::Identifier("and".to_string()),
                Token::Identifier("landscape".to_string()),
                Token::BracketClose,
            ]
        );
    }

    #[test]
    fn test_semicolon_separator() {
        let tokens = tokenize("super; 100");
        assert_eq!(
            tokens,
            vec![
                Token::Identifier("super".to_string()),
                Token::Semicolon,
                Token::Number(100.0, "100".to_string()),
            ]
        );
    }
}
