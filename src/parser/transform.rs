//! Grammar for transformation modifier lists
//!
//! ```text
//! modifier := "identity"
//!           | "rotate" "(" [ "by" ":" ] number ")"
//!           | ("scale" | "translate") "(" axes ")"
//! axes     := "x" ":" number [ "," "y" ":" number ]
//!           | "y" ":" number
//!           | number "," number
//!           | number
//!           |
//! ```
//!
//! Omitted axes fall back to the modifier's neutral value (1 for scale, 0
//! for translate). An empty axes clause leaves the closing parenthesis
//! unconsumed; the parse driver then reports it as unexpected.

use crate::error::ParseError;
use crate::lexer::Token;
use crate::parser::{Parser, TokenCursor};
use crate::property::transform::TransformationModifier;

pub struct TransformationParser {
    cursor: TokenCursor,
}

impl TransformationParser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
        }
    }

    fn parse_modifier(&mut self) -> Result<Option<TransformationModifier>, ParseError> {
        if matches!(self.cursor.peek(), Some(Token::Identifier(name)) if name == "identity") {
            self.cursor.pop()?;
            return Ok(Some(TransformationModifier::Identity));
        }

        let name = match (self.cursor.peek(), self.cursor.peek_next()) {
            (Some(Token::Identifier(name)), Some(Token::ParenOpen)) => name.clone(),
            _ => return Ok(None),
        };
        self.cursor.pop_n(2)?;

        match name.as_str() {
            "rotate" => {
                if self.at_axis_label("by") {
                    self.cursor.pop_n(2)?;
                }
                let degrees = match (self.cursor.peek(), self.cursor.peek_next()) {
                    (Some(Token::Number(value, _)), Some(Token::ParenClose)) => *value,
                    _ => return Err(malformed_modifier(&name)),
                };
                self.cursor.pop_n(2)?;
                Ok(Some(TransformationModifier::Rotate(degrees)))
            }
            "scale" | "translate" => {
                let mut x = None;
                let mut y = None;

                if self.at_axis_label("x") {
                    self.cursor.pop_n(2)?;
                    x = Some(self.parse_axis_value(&name)?);
                    if self.cursor.match_token(&Token::Comma) && self.at_axis_label("y") {
                        self.cursor.pop_n(2)?;
                        y = Some(self.parse_axis_value(&name)?);
                    }
                    if !self.cursor.match_token(&Token::ParenClose) {
                        return Err(malformed_modifier(&name));
                    }
                } else if self.at_axis_label("y") {
                    self.cursor.pop_n(2)?;
                    let value = match (self.cursor.peek(), self.cursor.peek_next()) {
                        (Some(Token::Number(value, _)), Some(Token::ParenClose)) => *value,
                        _ => return Err(malformed_modifier(&name)),
                    };
                    self.cursor.pop_n(2)?;
                    y = Some(value);
                } else if matches!(
                    (self.cursor.peek(), self.cursor.peek_next()),
                    (Some(Token::Number(_, _)), Some(Token::Comma))
                ) {
                    let first = self.parse_axis_value(&name)?;
                    self.cursor.pop()?;
                    let second = match (self.cursor.peek(), self.cursor.peek_next()) {
                        (Some(Token::Number(value, _)), Some(Token::ParenClose)) => *value,
                        _ => return Err(malformed_modifier(&name)),
                    };
                    self.cursor.pop_n(2)?;
                    x = Some(first);
                    y = Some(second);
                } else if let (Some(Token::Number(value, _)), Some(Token::ParenClose)) =
                    (self.cursor.peek(), self.cursor.peek_next())
                {
                    x = Some(*value);
                    y = Some(*value);
                    self.cursor.pop_n(2)?;
                }

                let modifier = if name == "scale" {
                    TransformationModifier::Scale {
                        x: x.unwrap_or(1.0),
                        y: y.unwrap_or(1.0),
                    }
                } else {
                    TransformationModifier::Translate {
                        x: x.unwrap_or(0.0),
                        y: y.unwrap_or(0.0),
                    }
                };
                Ok(Some(modifier))
            }
            _ => Err(ParseError::Message(format!("unknown modifier '{}'", name))),
        }
    }

    fn at_axis_label(&self, label: &str) -> bool {
        matches!(self.cursor.peek(), Some(Token::Identifier(name)) if name == label)
            && self.cursor.peek_next() == Some(&Token::Colon)
    }

    fn parse_axis_value(&mut self, name: &str) -> Result<f64, ParseError> {
        let value = match self.cursor.peek() {
            Some(Token::Number(value, _)) => *value,
            _ => return Err(malformed_modifier(name)),
        };
        self.cursor.pop()?;
        Ok(value)
    }
}

fn malformed_modifier(name: &str) -> ParseError {
    ParseError::Message(format!("modifier '{}' could not be parsed", name))
}

impl Parser for TransformationParser {
    type Output = TransformationModifier;

    fn cursor(&mut self) -> &mut TokenCursor {
        &mut self.cursor
    }

    fn parse_single(&mut self) -> Result<TransformationModifier, ParseError> {
        Ok(self.parse_modifier()?.unwrap_or(TransformationModifier::Identity))
    }
}
