//! Grammar for text values with optional transform wrappers
//!
//! ```text
//! text := ":" transform "(" text ")"
//!       | raw text
//! ```
//!
//! A transform wrapper is only recognized when the first three tokens are
//! exactly `:`, an identifier, and `(`. The closing parenthesis is taken
//! from the unconsumed end of the stream before the interior is parsed, so
//! trailing garbage after the wrapper fails instead of being swallowed.
//! Anything that does not open a wrapper re-joins into plain text, which is
//! why this grammar keeps whitespace tokens.

use crate::error::ParseError;
use crate::lexer::Token;
use crate::parser::{token_text, Parser, TokenCursor};
use crate::property::text::{TextTransform, TransformedText};

pub struct TextParser {
    cursor: TokenCursor,
}

impl TextParser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
        }
    }
}

impl Parser for TextParser {
    type Output = TransformedText;

    fn cursor(&mut self) -> &mut TokenCursor {
        &mut self.cursor
    }

    fn parse_single(&mut self) -> Result<TransformedText, ParseError> {
        if self.cursor.peek() == Some(&Token::Colon) {
            let transform_name = match (self.cursor.peek_next(), self.cursor.peek_ahead(2)) {
                (Some(Token::Identifier(name)), Some(Token::ParenOpen)) => Some(name.clone()),
                _ => None,
            };

            if let Some(name) = transform_name {
                self.cursor.pop_n(3)?;
                let last = self.cursor.pop_last()?;
                if last != Token::ParenClose {
                    return Err(ParseError::Message(format!(
                        "expected ')' closing ':{}', found {}",
                        name, last
                    )));
                }
                let inner = self.parse_single()?;
                let transform = TextTransform::parse(&name).ok_or_else(|| {
                    ParseError::Message(format!("unknown text transform ':{}'", name))
                })?;
                return Ok(TransformedText::Transform(transform, Box::new(inner)));
            }
        }

        let mut text = String::new();
        while !self.cursor.has_ended() {
            let token = self.cursor.pop()?;
            text.push_str(&token_text(&token));
        }
        Ok(TransformedText::Text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize_with_whitespace;

    fn parse(input: &str) -> Result<TransformedText, ParseError> {
        TextParser::new(tokenize_with_whitespace(input)).parse_single()
    }

    #[test]
    fn test_plain_text_round_trips() {
        assert_eq!(
            parse("Hello, world: 2").unwrap(),
            TransformedText::Text("Hello, world: 2".to_string())
        );
    }

    #[test]
    fn test_single_transform() {
        assert_eq!(
            parse(":uppercased(hello)").unwrap(),
            TransformedText::Transform(
                TextTransform::Uppercased,
                Box::new(TransformedText::Text("hello".to_string()))
            )
        );
    }

    #[test]
    fn test_nested_transforms() {
        assert_eq!(
            parse(":uppercased(:localized(Welcome home))").unwrap(),
            TransformedText::Transform(
                TextTransform::Uppercased,
                Box::new(TransformedText::Transform(
                    TextTransform::Localized,
                    Box::new(TransformedText::Text("Welcome home".to_string()))
                ))
            )
        );
    }

    #[test]
    fn test_colon_without_wrapper_shape_is_text() {
        assert_eq!(
            parse(":hello world").unwrap(),
            TransformedText::Text(":hello world".to_string())
        );
    }

    #[test]
    fn test_interpolation_renders_as_swift_argument() {
        assert_eq!(
            parse("Hi {{user}}").unwrap(),
            TransformedText::Text("Hi \\(user)".to_string())
        );
    }

    #[test]
    fn test_unknown_transform() {
        assert_eq!(
            parse(":reversed(abc)").unwrap_err(),
            ParseError::message("unknown text transform ':reversed'")
        );
    }

    #[test]
    fn test_unclosed_transform() {
        assert_eq!(
            parse(":uppercased(hello").unwrap_err(),
            ParseError::message("expected ')' closing ':uppercased', found identifier 'hello'")
        );
    }

    #[test]
    fn test_trailing_text_after_wrapper() {
        assert!(parse(":uppercased(hello) there").is_err());
    }
}
