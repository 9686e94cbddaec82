//! Grammar for a single constraint attribute value
//!
//! One parser instance handles one [`LayoutAttribute`]; combined attributes
//! (`edges`, `center`, ...) run a fresh instance per expanded attribute over
//! the same token stream. A value holds one or more constraints separated by
//! semicolons:
//!
//! ```text
//! constraint := [ "[" condition "]" ] [ field "=" ] [ ":" relation ]
//!               ( number | [ target ] [ "." anchor ] modifier* ) [ "@" priority ]
//! ```

use crate::error::ParseError;
use crate::layout::attribute::{LayoutAnchor, LayoutAttribute};
use crate::layout::condition::Condition;
use crate::layout::constraint::{
    Constraint, ConstraintModifier, ConstraintPriority, ConstraintRelation, ConstraintTarget,
    ConstraintType,
};
use crate::lexer::Token;
use crate::parser::condition::ConditionParser;
use crate::parser::{Parser, TokenCursor};

pub struct ConstraintParser {
    cursor: TokenCursor,
    attribute: LayoutAttribute,
}

impl ConstraintParser {
    pub fn new(tokens: Vec<Token>, attribute: LayoutAttribute) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            attribute,
        }
    }

    fn constraint_end(&self) -> bool {
        self.cursor.has_ended() || self.cursor.peek() == Some(&Token::Semicolon)
    }

    fn parse_condition(&mut self) -> Result<Option<Condition>, ParseError> {
        if !self.cursor.match_token(&Token::BracketOpen) {
            return Ok(None);
        }

        let mut condition_tokens = Vec::new();
        while !self.cursor.match_token(&Token::BracketClose) {
            let token = self.cursor.pop()?;
            match token {
                Token::Exclamation
                | Token::ParenOpen
                | Token::ParenClose
                | Token::Equality(_)
                | Token::Identifier(_)
                | Token::Colon
                | Token::Number(..) => condition_tokens.push(token),
                other => {
                    return Err(ParseError::message(format!(
                        "unknown token {} in condition",
                        other
                    )));
                }
            }
        }

        let condition = ConditionParser::new(condition_tokens).parse_complete()?;
        condition.validate()?;
        Ok(Some(condition))
    }

    fn parse_field(&mut self) -> Result<Option<String>, ParseError> {
        let name = match (self.cursor.peek(), self.cursor.peek_next()) {
            (Some(Token::Identifier(name)), Some(Token::Assignment)) => name.clone(),
            _ => return Ok(None),
        };
        self.cursor.pop_n(2)?;
        Ok(Some(name))
    }

    fn parse_relation(&mut self) -> Result<Option<ConstraintRelation>, ParseError> {
        let name = match (self.cursor.peek(), self.cursor.peek_next()) {
            (Some(Token::Colon), Some(Token::Identifier(name))) => name.clone(),
            _ => return Ok(None),
        };
        self.cursor.pop_n(2)?;
        Ok(Some(name.parse()?))
    }

    fn parse_target(&mut self) -> Result<Option<ConstraintTarget>, ParseError> {
        // An identifier followed by `(` is a modifier call, not a target.
        let identifier = match self.cursor.peek() {
            Some(Token::Identifier(identifier))
                if self.cursor.peek_next() != Some(&Token::ParenOpen) =>
            {
                identifier.clone()
            }
            _ => return Ok(None),
        };
        self.cursor.pop()?;

        if identifier == "id" && self.cursor.match_token(&Token::Colon) {
            return match self.cursor.pop()? {
                Token::Identifier(name) => Ok(Some(ConstraintTarget::LayoutId(name))),
                token => Err(ParseError::UnexpectedToken(token)),
            };
        }

        let target = match identifier.as_str() {
            "super" => ConstraintTarget::Parent,
            "self" => ConstraintTarget::This,
            "safeAreaLayoutGuide" => ConstraintTarget::SafeAreaLayoutGuide,
            "readableContentGuide" => ConstraintTarget::ReadableContentGuide,
            _ => ConstraintTarget::Field(identifier),
        };
        Ok(Some(target))
    }

    fn parse_target_anchor(&mut self) -> Result<Option<LayoutAnchor>, ParseError> {
        let name = match (self.cursor.peek(), self.cursor.peek_next()) {
            (Some(Token::Period), Some(Token::Identifier(name))) => name.clone(),
            _ => return Ok(None),
        };
        self.cursor.pop_n(2)?;
        Ok(Some(LayoutAnchor::parse(&name)?))
    }

    fn parse_modifier(&mut self) -> Result<Option<ConstraintModifier>, ParseError> {
        let identifier = match (self.cursor.peek(), self.cursor.peek_next()) {
            (Some(Token::Identifier(identifier)), Some(Token::ParenOpen)) => identifier.clone(),
            _ => return Ok(None),
        };
        self.cursor.pop_n(2)?;

        // optional `by:` argument label
        if let (Some(Token::Identifier(label)), Some(Token::Colon)) =
            (self.cursor.peek(), self.cursor.peek_next())
        {
            if label == "by" {
                self.cursor.pop_n(2)?;
            }
        }

        let amount = match (self.cursor.peek(), self.cursor.peek_next()) {
            (Some(Token::Number(value, _)), Some(Token::ParenClose)) => *value,
            _ => {
                return Err(ParseError::message(format!(
                    "modifier '{}' could not be parsed",
                    identifier
                )));
            }
        };
        self.cursor.pop_n(2)?;

        match identifier.as_str() {
            "multiplied" => Ok(Some(ConstraintModifier::Multiplied(amount))),
            "divided" => Ok(Some(ConstraintModifier::Divided(amount))),
            "offset" => Ok(Some(ConstraintModifier::Offset(amount))),
            "inset" => Ok(Some(ConstraintModifier::Inset(amount))),
            _ => Err(ParseError::message(format!(
                "unknown modifier '{}'",
                identifier
            ))),
        }
    }

    fn parse_priority(&mut self) -> Result<Option<ConstraintPriority>, ParseError> {
        if self.cursor.peek() != Some(&Token::At) {
            return Ok(None);
        }
        match self.cursor.peek_next() {
            Some(Token::Number(value, _)) => {
                let priority = ConstraintPriority::from_numeric(*value);
                self.cursor.pop_n(2)?;
                Ok(Some(priority))
            }
            Some(Token::Identifier(name)) => {
                let name = name.clone();
                self.cursor.pop_n(2)?;
                Ok(Some(name.parse()?))
            }
            _ => Err(ParseError::message("missing priority value")),
        }
    }
}

impl Parser for ConstraintParser {
    type Output = Constraint;

    fn cursor(&mut self) -> &mut TokenCursor {
        &mut self.cursor
    }

    fn parse_single(&mut self) -> Result<Constraint, ParseError> {
        let condition = self.parse_condition()?;
        let field = self.parse_field()?;
        let relation = self.parse_relation()?.unwrap_or(ConstraintRelation::Equal);

        let kind = match self.cursor.peek() {
            Some(Token::Number(..)) => match self.cursor.pop()? {
                Token::Number(constant, _) => ConstraintType::Constant(constant),
                token => return Err(ParseError::UnexpectedToken(token)),
            },
            _ => {
                let target = self.parse_target()?;
                let target_anchor = self.parse_target_anchor()?;

                let mut multiplier = 1.0;
                let mut constant = 0.0;
                while !self.constraint_end() {
                    match self.parse_modifier()? {
                        Some(ConstraintModifier::Multiplied(by)) => multiplier *= by,
                        Some(ConstraintModifier::Divided(by)) => multiplier /= by,
                        Some(ConstraintModifier::Offset(by)) => constant += by,
                        Some(ConstraintModifier::Inset(by)) => {
                            constant += by * self.attribute.inset_direction()
                        }
                        None => break,
                    }
                }

                ConstraintType::Targeted {
                    target: target.unwrap_or(if target_anchor.is_some() {
                        ConstraintTarget::This
                    } else {
                        ConstraintTarget::Parent
                    }),
                    target_anchor: target_anchor.unwrap_or_else(|| self.attribute.target_anchor()),
                    multiplier,
                    constant,
                }
            }
        };

        let priority = if self.cursor.match_token(&Token::Semicolon) {
            ConstraintPriority::Required
        } else {
            let priority = self
                .parse_priority()?
                .unwrap_or(ConstraintPriority::Required);
            // a separator may still follow an explicit priority clause
            self.cursor.match_token(&Token::Semicolon);
            priority
        };

        Ok(Constraint {
            field,
            condition,
            attribute: self.attribute,
            kind,
            relation,
            priority,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::condition::ConditionStatement;
    use crate::layout::state::InterfaceIdiom;
    use crate::lexer::tokenize;

    fn parse(attribute: LayoutAttribute, value: &str) -> Vec<Constraint> {
        ConstraintParser::new(tokenize(value), attribute)
            .parse()
            .unwrap()
    }

    fn parse_error(attribute: LayoutAttribute, value: &str) -> ParseError {
        ConstraintParser::new(tokenize(value), attribute)
            .parse()
            .unwrap_err()
    }

    #[test]
    fn test_parse_bare_target_defaults() {
        let constraints = parse(LayoutAttribute::Top, "super");
        assert_eq!(constraints.len(), 1);
        assert_eq!(constraints[0].relation, ConstraintRelation::Equal);
        assert_eq!(constraints[0].priority, ConstraintPriority::Required);
        assert_eq!(
            constraints[0].kind,
            ConstraintType::Targeted {
                target: ConstraintTarget::Parent,
                target_anchor: LayoutAnchor::Top,
                multiplier: 1.0,
                constant: 0.0,
            }
        );
    }

    #[test]
    fn test_parse_full_value() {
        let constraints = parse(LayoutAttribute::Top, ":lt super.bottom offset(by: -8) @high");
        assert_eq!(constraints.len(), 1);
        let constraint = &constraints[0];
        assert_eq!(constraint.relation, ConstraintRelation::LessThanOrEqual);
        assert_eq!(constraint.priority, ConstraintPriority::High);
        assert_eq!(
            constraint.kind,
            ConstraintType::Targeted {
                target: ConstraintTarget::Parent,
                target_anchor: LayoutAnchor::Bottom,
                multiplier: 1.0,
                constant: -8.0,
            }
        );
    }

    #[test]
    fn test_parse_constant() {
        let constraints = parse(LayoutAttribute::Width, "100");
        assert_eq!(constraints[0].kind, ConstraintType::Constant(100.0));
    }

    #[test]
    fn test_parse_field_capture() {
        let constraints = parse(LayoutAttribute::Top, "header = super.bottom");
        assert_eq!(constraints[0].field.as_deref(), Some("header"));
    }

    #[test]
    fn test_parse_condition_prefix() {
        let constraints = parse(LayoutAttribute::Top, "[pad] super");
        assert_eq!(
            constraints[0].condition,
            Some(Condition::Statement(ConditionStatement::InterfaceIdiom(
                InterfaceIdiom::Pad
            )))
        );
    }

    #[test]
    fn test_parse_condition_rejects_foreign_tokens() {
        let error = parse_error(LayoutAttribute::Top, "[pad $ phone] super");
        assert_eq!(error, ParseError::message("unknown token '$' in condition"));
    }

    #[test]
    fn test_parse_layout_id_target() {
        let constraints = parse(LayoutAttribute::Top, "id:header.bottom");
        assert_eq!(
            constraints[0].kind,
            ConstraintType::Targeted {
                target: ConstraintTarget::LayoutId("header".to_string()),
                target_anchor: LayoutAnchor::Bottom,
                multiplier: 1.0,
                constant: 0.0,
            }
        );
    }

    #[test]
    fn test_parse_anchor_without_target_constrains_self() {
        let constraints = parse(LayoutAttribute::Height, ".width");
        assert_eq!(
            constraints[0].kind,
            ConstraintType::Targeted {
                target: ConstraintTarget::This,
                target_anchor: LayoutAnchor::Width,
                multiplier: 1.0,
                constant: 0.0,
            }
        );
    }

    #[test]
    fn test_parse_adjacency_target_anchor_defaults() {
        let constraints = parse(LayoutAttribute::Before, "label");
        assert_eq!(
            constraints[0].kind,
            ConstraintType::Targeted {
                target: ConstraintTarget::Field("label".to_string()),
                target_anchor: LayoutAnchor::Leading,
                multiplier: 1.0,
                constant: 0.0,
            }
        );
    }

    #[test]
    fn test_modifiers_fold_left_to_right() {
        let constraints = parse(
            LayoutAttribute::Width,
            "super multiplied(by: 2) divided(by: 4) offset(by: 4) offset(by: 6)",
        );
        assert_eq!(
            constraints[0].kind,
            ConstraintType::Targeted {
                target: ConstraintTarget::Parent,
                target_anchor: LayoutAnchor::Width,
                multiplier: 0.5,
                constant: 10.0,
            }
        );
    }

    #[test]
    fn test_inset_applies_attribute_direction() {
        let right = parse(LayoutAttribute::Right, "super inset(by: 8)");
        assert_eq!(
            right[0].kind,
            ConstraintType::Targeted {
                target: ConstraintTarget::Parent,
                target_anchor: LayoutAnchor::Right,
                multiplier: 1.0,
                constant: -8.0,
            }
        );

        let left = parse(LayoutAttribute::Left, "super inset(by: 8)");
        assert_eq!(
            left[0].kind,
            ConstraintType::Targeted {
                target: ConstraintTarget::Parent,
                target_anchor: LayoutAnchor::Left,
                multiplier: 1.0,
                constant: 8.0,
            }
        );
    }

    #[test]
    fn test_modifier_without_label() {
        let constraints = parse(LayoutAttribute::Top, "super offset(12)");
        assert_eq!(
            constraints[0].kind,
            ConstraintType::Targeted {
                target: ConstraintTarget::Parent,
                target_anchor: LayoutAnchor::Top,
                multiplier: 1.0,
                constant: 12.0,
            }
        );
    }

    #[test]
    fn test_malformed_modifier_errors() {
        assert_eq!(
            parse_error(LayoutAttribute::Top, "super offset(by: x)"),
            ParseError::message("modifier 'offset' could not be parsed")
        );
        assert_eq!(
            parse_error(LayoutAttribute::Top, "super shifted(by: 10)"),
            ParseError::message("unknown modifier 'shifted'")
        );
    }

    #[test]
    fn test_missing_priority_value_errors() {
        assert_eq!(
            parse_error(LayoutAttribute::Top, "super @"),
            ParseError::message("missing priority value")
        );
    }

    #[test]
    fn test_numeric_priority_collapses_to_named() {
        let constraints = parse(LayoutAttribute::Top, "super @750");
        assert_eq!(constraints[0].priority, ConstraintPriority::High);

        let constraints = parse(LayoutAttribute::Top, "super @600");
        assert_eq!(constraints[0].priority, ConstraintPriority::Custom(600.0));
    }

    #[test]
    fn test_semicolon_separates_constraints() {
        let constraints = parse(LayoutAttribute::Top, "super; 100");
        assert_eq!(constraints.len(), 2);
        assert_eq!(constraints[1].kind, ConstraintType::Constant(100.0));
    }

    #[test]
    fn test_separator_after_priority_clause() {
        let constraints = parse(LayoutAttribute::Top, "super @high; 100");
        assert_eq!(constraints.len(), 2);
        assert_eq!(constraints[0].priority, ConstraintPriority::High);
        assert_eq!(constraints[1].kind, ConstraintType::Constant(100.0));
    }

    #[test]
    fn test_unknown_relation_errors() {
        assert!(matches!(
            parse_error(LayoutAttribute::Top, ":almost super"),
            ParseError::Message(_)
        ));
    }
}
