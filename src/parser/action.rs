//! Grammar for action-call expressions
//!
//! ```text
//! action    := identifier [ "(" parameter { "," parameter } ")" ]
//! parameter := [ identifier ":" ] ( "..." | "@" reference | "$" state | constant )
//! reference := identifier [ "." path ]
//! state     := identifier [ "." path ]
//! constant  := identifier "(" [ identifier | number ] ")"
//! ```
//!
//! Paths are greedy: they take identifiers and periods until any other
//! token, so a trailing period stays in the path text.

use crate::error::ParseError;
use crate::lexer::Token;
use crate::parser::{Parser, TokenCursor};
use crate::property::action::{ActionParameter, ViewAction};

pub struct ActionParser {
    cursor: TokenCursor,
    event_name: String,
}

impl ActionParser {
    pub fn new(tokens: Vec<Token>, event_name: String) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            event_name,
        }
    }

    pub fn parse_action(&mut self) -> Result<ViewAction, ParseError> {
        let name = match self.cursor.pop()? {
            Token::Identifier(name) => name,
            other => {
                return Err(ParseError::Message(format!(
                    "expected an action name, found {}",
                    other
                )))
            }
        };

        let mut parameters = Vec::new();
        if self.cursor.match_token(&Token::ParenOpen) {
            loop {
                parameters.push(self.parse_labeled_parameter()?);
                if !self.cursor.match_token(&Token::Comma) {
                    break;
                }
            }
            if !self.cursor.match_token(&Token::ParenClose) {
                return Err(ParseError::ExpectedToken(Token::ParenClose));
            }
        }

        Ok(ViewAction {
            name,
            event_name: self.event_name.clone(),
            parameters,
        })
    }

    fn parse_labeled_parameter(
        &mut self,
    ) -> Result<(Option<String>, ActionParameter), ParseError> {
        let label = match (self.cursor.peek(), self.cursor.peek_next()) {
            (Some(Token::Identifier(label)), Some(Token::Colon)) => {
                let label = label.clone();
                self.cursor.pop_n(2)?;
                Some(label)
            }
            _ => None,
        };
        Ok((label, self.parse_parameter()?))
    }

    fn parse_parameter(&mut self) -> Result<ActionParameter, ParseError> {
        match self.cursor.pop()? {
            Token::Period => {
                if !self.cursor.match_token(&Token::Period)
                    || !self.cursor.match_token(&Token::Period)
                {
                    return Err(ParseError::ExpectedToken(Token::Period));
                }
                Ok(ActionParameter::Inherited)
            }
            Token::At => {
                let target_id = match self.cursor.pop()? {
                    Token::Identifier(name) => name,
                    other => {
                        return Err(ParseError::Message(format!(
                            "expected a reference target, found {}",
                            other
                        )))
                    }
                };
                let mut property = String::new();
                if self.cursor.match_token(&Token::Period) {
                    self.consume_path(&mut property)?;
                }
                Ok(ActionParameter::Reference {
                    target_id,
                    property: if property.is_empty() {
                        None
                    } else {
                        Some(property)
                    },
                })
            }
            Token::Dollar => {
                let mut name = match self.cursor.pop()? {
                    Token::Identifier(name) => name,
                    other => {
                        return Err(ParseError::Message(format!(
                            "expected a state variable name, found {}",
                            other
                        )))
                    }
                };
                self.consume_path(&mut name)?;
                Ok(ActionParameter::StateVariable { name })
            }
            Token::Identifier(type_name) => {
                if !self.cursor.match_token(&Token::ParenOpen) {
                    return Err(ParseError::ExpectedToken(Token::ParenOpen));
                }
                let value = match self.cursor.peek() {
                    Some(Token::ParenClose) => String::new(),
                    Some(Token::Identifier(text)) => {
                        let text = text.clone();
                        self.cursor.pop()?;
                        text
                    }
                    Some(Token::Number(_, original)) => {
                        let original = original.clone();
                        self.cursor.pop()?;
                        original
                    }
                    other => {
                        return Err(ParseError::Message(format!(
                            "unsupported constant value {}",
                            other.map_or_else(|| "at end of input".to_string(), Token::to_string)
                        )))
                    }
                };
                if !self.cursor.match_token(&Token::ParenClose) {
                    return Err(ParseError::ExpectedToken(Token::ParenClose));
                }
                Ok(ActionParameter::Constant { type_name, value })
            }
            other => Err(ParseError::UnexpectedToken(other)),
        }
    }

    /// Append identifiers and periods to `path` until any other token.
    fn consume_path(&mut self, path: &mut String) -> Result<(), ParseError> {
        loop {
            match self.cursor.peek() {
                Some(Token::Identifier(identifier)) => {
                    path.push_str(identifier);
                    self.cursor.pop()?;
                }
                Some(Token::Period) => {
                    path.push('.');
                    self.cursor.pop()?;
                }
                _ => return Ok(()),
            }
        }
    }
}

impl Parser for ActionParser {
    type Output = ViewAction;

    fn cursor(&mut self) -> &mut TokenCursor {
        &mut self.cursor
    }

    fn parse_single(&mut self) -> Result<ViewAction, ParseError> {
        self.parse_action()
    }
}
