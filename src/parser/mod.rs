//! Recursive-descent parsing over the shared token stream
//!
//! Every grammar is an independent struct owning a [`TokenCursor`] and
//! implementing [`Parser::parse_single`]; the provided [`Parser::parse`]
//! driver handles repetition and guards against grammars that stall.

pub mod action;
pub mod condition;
pub mod constraint;
pub mod font;
pub mod text;
pub mod transform;

pub use action::ActionParser;
pub use condition::ConditionParser;
pub use constraint::ConstraintParser;
pub use font::FontParser;
pub use text::TextParser;
pub use transform::TransformationParser;

use crate::error::ParseError;
use crate::lexer::Token;

/// Forward-only cursor over a token stream.
///
/// There is no backtracking: grammars look ahead with the `peek` family and
/// commit with the `pop` family. [`TokenCursor::pop_last`] removes from the
/// unconsumed end, which lets a grammar validate an enclosing pair (such as a
/// closing parenthesis) before descending into the interior.
#[derive(Debug, Clone)]
pub struct TokenCursor {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenCursor {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, position: 0 }
    }

    pub fn has_ended(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Number of tokens consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    pub fn peek_next(&self) -> Option<&Token> {
        self.tokens.get(self.position + 1)
    }

    pub fn peek_ahead(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.position + offset)
    }

    pub fn pop(&mut self) -> Result<Token, ParseError> {
        let token = self
            .tokens
            .get(self.position)
            .cloned()
            .ok_or_else(|| ParseError::message("no tokens left to pop"))?;
        self.position += 1;
        Ok(token)
    }

    pub fn pop_n(&mut self, count: usize) -> Result<Vec<Token>, ParseError> {
        if self.position + count > self.tokens.len() {
            return Err(ParseError::message(format!(
                "cannot pop {} tokens, only {} left",
                count,
                self.tokens.len() - self.position
            )));
        }
        let popped = self.tokens[self.position..self.position + count].to_vec();
        self.position += count;
        Ok(popped)
    }

    /// Remove and return the last unconsumed token.
    pub fn pop_last(&mut self) -> Result<Token, ParseError> {
        if self.has_ended() {
            return Err(ParseError::message("no tokens left to pop from the end"));
        }
        self.tokens
            .pop()
            .ok_or_else(|| ParseError::message("no tokens left to pop from the end"))
    }

    /// Consume the current token if it equals `token`.
    pub fn match_token(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// The unconsumed remainder of the stream.
    pub fn remaining(&self) -> &[Token] {
        &self.tokens[self.position..]
    }
}

/// Literal text a token contributes when a whitespace-keeping grammar
/// re-joins tokens into plain text. Interpolation arguments render in their
/// generated `\(name)` form, not their source form.
pub(crate) fn token_text(token: &Token) -> String {
    match token {
        Token::Identifier(text) => text.clone(),
        Token::Number(_, original) => original.clone(),
        Token::ParenOpen => "(".to_string(),
        Token::ParenClose => ")".to_string(),
        Token::BracketOpen => "[".to_string(),
        Token::BracketClose => "]".to_string(),
        Token::Colon => ":".to_string(),
        Token::Semicolon => ";".to_string(),
        Token::Period => ".".to_string(),
        Token::At => "@".to_string(),
        Token::Comma => ",".to_string(),
        Token::Exclamation => "!".to_string(),
        Token::Dollar => "$".to_string(),
        Token::Equality(true) => "==".to_string(),
        Token::Equality(false) => "!=".to_string(),
        Token::Assignment => "=".to_string(),
        Token::Whitespace(text) => text.clone(),
        Token::Argument(name) => format!("\\({})", name),
        Token::Other(character) => character.to_string(),
    }
}

/// A grammar over a [`TokenCursor`].
///
/// Implementors define [`Parser::parse_single`]; the [`Parser::parse`] driver
/// repeats it until the stream is exhausted. An iteration that consumes no
/// tokens raises [`ParseError::UnexpectedToken`] on the stuck token, so a
/// grammar bug cannot loop forever on malformed input.
pub trait Parser {
    type Output;

    fn cursor(&mut self) -> &mut TokenCursor;

    fn parse_single(&mut self) -> Result<Self::Output, ParseError>;

    fn parse(&mut self) -> Result<Vec<Self::Output>, ParseError> {
        let mut items = Vec::new();
        while !self.cursor().has_ended() {
            let start = self.cursor().position();
            let item = self.parse_single()?;
            items.push(item);
            if self.cursor().position() == start {
                let stuck = self.cursor().pop()?;
                return Err(ParseError::UnexpectedToken(stuck));
            }
        }
        Ok(items)
    }
}
