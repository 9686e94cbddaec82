//! Precedence-climbing parser for trait predicates
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! expression := term ("or" term)*
//! term       := comparison ("and" comparison)*
//! comparison := factor ((== | != | :lt | :lte | :gt | :gte) factor)*
//! factor     := "!" factor | "(" expression ")" | identifier | number
//! ```
//!
//! Identifiers resolve through the statement name table. Equality carries
//! extra rewrites: a `true`/`false` right-hand side toggles the polarity of a
//! logical left-hand side, and an axis name meeting a bare size class merges
//! into a single statement, so `vertical == compact == false` reads naturally.

use crate::error::ParseError;
use crate::layout::condition::{
    Condition, ConditionBinaryOperation, ConditionStatement,
};
use crate::lexer::Token;
use crate::parser::{Parser, TokenCursor};

pub struct ConditionParser {
    cursor: TokenCursor,
}

enum ComparisonOperator {
    Equality(bool),
    Ordering(ConditionBinaryOperation),
}

impl ConditionParser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
        }
    }

    /// Parse one expression covering the whole stream. Tokens left over after
    /// the expression are an error.
    pub fn parse_complete(&mut self) -> Result<Condition, ParseError> {
        let condition = self.parse_expression()?;
        if let Some(leftover) = self.cursor.peek() {
            return Err(ParseError::UnexpectedToken(leftover.clone()));
        }
        Ok(condition)
    }

    fn parse_expression(&mut self) -> Result<Condition, ParseError> {
        let mut condition = self.parse_term()?;
        while self.match_operator_identifier("or") {
            let rhs = self.parse_term()?;
            condition = Condition::Binary(
                ConditionBinaryOperation::Or,
                Box::new(condition),
                Box::new(rhs),
            );
        }
        Ok(condition)
    }

    fn parse_term(&mut self) -> Result<Condition, ParseError> {
        let mut condition = self.parse_comparison()?;
        while self.match_operator_identifier("and") {
            let rhs = self.parse_comparison()?;
            condition = Condition::Binary(
                ConditionBinaryOperation::And,
                Box::new(condition),
                Box::new(rhs),
            );
        }
        Ok(condition)
    }

    fn parse_comparison(&mut self) -> Result<Condition, ParseError> {
        let mut condition = self.parse_factor()?;
        while let Some(operator) = self.parse_comparison_operator()? {
            let rhs = self.parse_factor()?;
            condition = match operator {
                ComparisonOperator::Equality(is_equal) => {
                    Self::combine_equality(condition, rhs, is_equal)
                }
                ComparisonOperator::Ordering(operation) => {
                    Condition::Binary(operation, Box::new(condition), Box::new(rhs))
                }
            };
        }
        Ok(condition)
    }

    fn parse_factor(&mut self) -> Result<Condition, ParseError> {
        match self.cursor.peek() {
            Some(Token::Exclamation) => {
                self.cursor.pop()?;
                let inner = self.parse_factor()?;
                Ok(inner.negation())
            }
            Some(Token::ParenOpen) => {
                self.cursor.pop()?;
                let inner = self.parse_expression()?;
                if !self.cursor.match_token(&Token::ParenClose) {
                    return Err(ParseError::ExpectedToken(Token::ParenClose));
                }
                Ok(inner)
            }
            Some(Token::Identifier(_)) => {
                let name = match self.cursor.pop()? {
                    Token::Identifier(name) => name,
                    token => return Err(ParseError::UnexpectedToken(token)),
                };
                let statement = ConditionStatement::from_identifier(&name).ok_or_else(|| {
                    ParseError::message(format!("unknown condition identifier '{}'", name))
                })?;
                Ok(Condition::Statement(statement))
            }
            Some(Token::Number(..)) => {
                let value = match self.cursor.pop()? {
                    Token::Number(value, _) => value,
                    token => return Err(ParseError::UnexpectedToken(token)),
                };
                Ok(Condition::Statement(ConditionStatement::Number(value)))
            }
            Some(token) => Err(ParseError::UnexpectedToken(token.clone())),
            None => Err(ParseError::message("expected a condition")),
        }
    }

    fn parse_comparison_operator(&mut self) -> Result<Option<ComparisonOperator>, ParseError> {
        match (self.cursor.peek(), self.cursor.peek_next()) {
            (Some(Token::Equality(is_equal)), _) => {
                let operator = ComparisonOperator::Equality(*is_equal);
                self.cursor.pop()?;
                Ok(Some(operator))
            }
            (Some(Token::Colon), Some(Token::Identifier(_))) => {
                self.cursor.pop()?;
                let name = match self.cursor.pop()? {
                    Token::Identifier(name) => name,
                    token => return Err(ParseError::UnexpectedToken(token)),
                };
                let operation = match name.as_str() {
                    "lt" => ConditionBinaryOperation::Less,
                    "lte" => ConditionBinaryOperation::LessEqual,
                    "gt" => ConditionBinaryOperation::Greater,
                    "gte" => ConditionBinaryOperation::GreaterEqual,
                    _ => {
                        return Err(ParseError::message(format!(
                            "unknown comparison ':{}'",
                            name
                        )));
                    }
                };
                Ok(Some(ComparisonOperator::Ordering(operation)))
            }
            _ => Ok(None),
        }
    }

    /// `==`/`!=` over two conditions, with the polarity and size-class
    /// rewrites applied before falling back to a generic equality node.
    fn combine_equality(lhs: Condition, rhs: Condition, is_equal: bool) -> Condition {
        if let Condition::Statement(rhs_statement) = &rhs {
            let rhs_literal = match rhs_statement {
                ConditionStatement::True => Some(true),
                ConditionStatement::False => Some(false),
                _ => None,
            };
            if let Some(literal) = rhs_literal {
                if !lhs.is_comparable() {
                    return if literal == is_equal {
                        lhs
                    } else {
                        lhs.negation()
                    };
                }
            }
        }

        if let (Condition::Statement(lhs_statement), Condition::Statement(rhs_statement)) =
            (&lhs, &rhs)
        {
            if let Some(merged) = lhs_statement.merge_with(rhs_statement) {
                let condition = Condition::Statement(merged);
                return if is_equal {
                    condition
                } else {
                    condition.negation()
                };
            }
        }

        let condition = Condition::Binary(
            ConditionBinaryOperation::Equal,
            Box::new(lhs),
            Box::new(rhs),
        );
        if is_equal {
            condition
        } else {
            condition.negation()
        }
    }

    fn match_operator_identifier(&mut self, operator: &str) -> bool {
        if let Some(Token::Identifier(name)) = self.cursor.peek() {
            if name.eq_ignore_ascii_case(operator) {
                let _ = self.cursor.pop();
                return true;
            }
        }
        false
    }
}

impl Parser for ConditionParser {
    type Output = Condition;

    fn cursor(&mut self) -> &mut TokenCursor {
        &mut self.cursor
    }

    fn parse_single(&mut self) -> Result<Condition, ParseError> {
        self.parse_expression()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::state::{
        DimensionType, InterfaceIdiom, InterfaceSizeClass, SizeClassType, ViewOrientation,
    };
    use crate::lexer::tokenize;

    fn parse(input: &str) -> Condition {
        ConditionParser::new(tokenize(input))
            .parse_complete()
            .unwrap()
    }

    fn statement(statement: ConditionStatement) -> Condition {
        Condition::Statement(statement)
    }

    #[test]
    fn test_parse_single_statement() {
        assert_eq!(
            parse("pad"),
            statement(ConditionStatement::InterfaceIdiom(InterfaceIdiom::Pad))
        );
        assert_eq!(
            parse("landscape"),
            statement(ConditionStatement::Orientation(ViewOrientation::Landscape))
        );
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let condition = parse("phone or tv and landscape");
        assert_eq!(
            condition,
            Condition::Binary(
                ConditionBinaryOperation::Or,
                Box::new(statement(ConditionStatement::InterfaceIdiom(
                    InterfaceIdiom::Phone
                ))),
                Box::new(Condition::Binary(
                    ConditionBinaryOperation::And,
                    Box::new(statement(ConditionStatement::InterfaceIdiom(
                        InterfaceIdiom::Tv
                    ))),
                    Box::new(statement(ConditionStatement::Orientation(
                        ViewOrientation::Landscape
                    ))),
                )),
            )
        );
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let condition = parse("(phone or tv) and landscape");
        assert_eq!(
            condition,
            Condition::Binary(
                ConditionBinaryOperation::And,
                Box::new(Condition::Binary(
                    ConditionBinaryOperation::Or,
                    Box::new(statement(ConditionStatement::InterfaceIdiom(
                        InterfaceIdiom::Phone
                    ))),
                    Box::new(statement(ConditionStatement::InterfaceIdiom(
                        InterfaceIdiom::Tv
                    ))),
                )),
                Box::new(statement(ConditionStatement::Orientation(
                    ViewOrientation::Landscape
                ))),
            )
        );
    }

    #[test]
    fn test_chained_conjunction_is_left_associative() {
        let condition = parse("pad and landscape and regular");
        match condition {
            Condition::Binary(ConditionBinaryOperation::And, lhs, _) => {
                assert!(matches!(
                    *lhs,
                    Condition::Binary(ConditionBinaryOperation::And, ..)
                ));
            }
            other => panic!("expected nested conjunction, got {:?}", other),
        }
    }

    #[test]
    fn test_negation_of_statement_and_group() {
        assert_eq!(
            parse("!pad"),
            statement(ConditionStatement::InterfaceIdiom(InterfaceIdiom::Pad)).negation()
        );
        let grouped = parse("!(pad and landscape)");
        assert_eq!(
            grouped,
            Condition::Binary(
                ConditionBinaryOperation::And,
                Box::new(statement(ConditionStatement::InterfaceIdiom(
                    InterfaceIdiom::Pad
                ))),
                Box::new(statement(ConditionStatement::Orientation(
                    ViewOrientation::Landscape
                ))),
            )
            .negation()
        );
    }

    #[test]
    fn test_boolean_literal_toggles_polarity() {
        let pad = statement(ConditionStatement::InterfaceIdiom(InterfaceIdiom::Pad));
        assert_eq!(parse("pad == true"), pad.clone());
        assert_eq!(parse("pad == false"), pad.negation());
        assert_eq!(parse("pad != true"), pad.negation());
        assert_eq!(parse("pad != false"), pad);
    }

    #[test]
    fn test_size_class_merge() {
        assert_eq!(
            parse("horizontal == compact"),
            statement(ConditionStatement::SizeClass(
                SizeClassType::Horizontal,
                InterfaceSizeClass::Compact
            ))
        );
        assert_eq!(
            parse("vertical == compact == false"),
            statement(ConditionStatement::SizeClass(
                SizeClassType::Vertical,
                InterfaceSizeClass::Compact
            ))
            .negation()
        );
    }

    #[test]
    fn test_generic_equality_node() {
        assert_eq!(
            parse("pad == phone"),
            Condition::Binary(
                ConditionBinaryOperation::Equal,
                Box::new(statement(ConditionStatement::InterfaceIdiom(
                    InterfaceIdiom::Pad
                ))),
                Box::new(statement(ConditionStatement::InterfaceIdiom(
                    InterfaceIdiom::Phone
                ))),
            )
        );
    }

    #[test]
    fn test_numeric_comparisons() {
        assert_eq!(
            parse("width :gt 600"),
            Condition::Binary(
                ConditionBinaryOperation::Greater,
                Box::new(statement(ConditionStatement::DimensionType(
                    DimensionType::Width
                ))),
                Box::new(statement(ConditionStatement::Number(600.0))),
            )
        );
        assert_eq!(
            parse("height :lte 1024"),
            Condition::Binary(
                ConditionBinaryOperation::LessEqual,
                Box::new(statement(ConditionStatement::DimensionType(
                    DimensionType::Height
                ))),
                Box::new(statement(ConditionStatement::Number(1024.0))),
            )
        );
    }

    #[test]
    fn test_unknown_identifier_is_an_error() {
        let result = ConditionParser::new(tokenize("tablet")).parse_complete();
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_comparison_is_an_error() {
        let result = ConditionParser::new(tokenize("width :almost 5")).parse_complete();
        assert!(result.is_err());
    }

    #[test]
    fn test_unterminated_group_is_an_error() {
        let result = ConditionParser::new(tokenize("(pad or tv")).parse_complete();
        assert_eq!(
            result.unwrap_err(),
            ParseError::ExpectedToken(Token::ParenClose)
        );
    }

    #[test]
    fn test_leftover_tokens_are_an_error() {
        let result = ConditionParser::new(tokenize("pad )")).parse_complete();
        assert_eq!(
            result.unwrap_err(),
            ParseError::UnexpectedToken(Token::ParenClose)
        );
    }
}
