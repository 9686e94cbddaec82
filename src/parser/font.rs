//! Grammar for font descriptors
//!
//! Three shapes, discriminated by the first token:
//!
//! ```text
//! font := ":" weight [ "@" size ]     system font with a named weight
//!       | size                        system font, regular weight
//!       | name [ "@" size ]           font by family name
//! ```
//!
//! This grammar runs over the whitespace-keeping token stream so family
//! names such as `Helvetica Neue` survive with their internal spacing.
//! Commas in a name are dropped, which also accepts `Helvetica, Neue`.

use crate::error::ParseError;
use crate::lexer::Token;
use crate::parser::{token_text, Parser, TokenCursor};
use crate::property::font::{Font, SystemFontWeight};

pub struct FontParser {
    cursor: TokenCursor,
}

impl FontParser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
        }
    }

    fn parse_weight(&mut self) -> Result<SystemFontWeight, ParseError> {
        let name = match self.cursor.pop()? {
            Token::Identifier(name) => name,
            other => {
                return Err(ParseError::Message(format!(
                    "expected a font weight, found {}",
                    other
                )))
            }
        };
        SystemFontWeight::parse(&name)
            .ok_or_else(|| ParseError::Message(format!("unknown font weight '{}'", name)))
    }

    /// Reads the optional `@size` suffix. One token is consumed either way;
    /// only an `@` opens a size clause, anything else (or the end of the
    /// stream) falls back to the default size.
    fn parse_size(&mut self) -> Result<f64, ParseError> {
        match self.cursor.pop() {
            Ok(Token::At) => match self.cursor.pop()? {
                Token::Number(size, _) => Ok(size),
                other => Err(ParseError::Message(format!(
                    "expected a font size, found {}",
                    other
                ))),
            },
            _ => Ok(Font::DEFAULT_SIZE),
        }
    }
}

impl Parser for FontParser {
    type Output = Font;

    fn cursor(&mut self) -> &mut TokenCursor {
        &mut self.cursor
    }

    fn parse_single(&mut self) -> Result<Font, ParseError> {
        if self.cursor.peek() == Some(&Token::Colon) {
            self.cursor.pop()?;
            let weight = self.parse_weight()?;
            let size = self.parse_size()?;
            return Ok(Font::System { weight, size });
        }

        if let Some(Token::Number(size, _)) = self.cursor.peek() {
            let size = *size;
            self.cursor.pop()?;
            return Ok(Font::System {
                weight: SystemFontWeight::Regular,
                size,
            });
        }

        let mut name = String::new();
        while let Some(token) = self.cursor.peek() {
            if *token == Token::At {
                break;
            }
            let token = self.cursor.pop()?;
            if token != Token::Comma {
                name.push_str(&token_text(&token));
            }
        }
        let size = self.parse_size()?;
        Ok(Font::Named(name, size))
    }
}
