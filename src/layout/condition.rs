//! Trait predicate tree guarding constraints
//!
//! A condition is parsed once from the bracketed prefix of a constraint (or
//! from a standalone string) and consumed two ways: the live path evaluates it
//! against an [`InterfaceState`] snapshot, the static path lowers it to a
//! boolean source expression over a trait helper. Validation keeps the two
//! operand families apart: logical statements combine with `and`/`or`/`!`,
//! numeric statements (numbers, root dimensions) combine with comparisons.

use std::fmt::Write;

use crate::error::{ConditionError, ParseError, ValidationError};
use crate::format::format_number;
use crate::layout::state::{
    DimensionType, InterfaceIdiom, InterfaceSizeClass, InterfaceState, SizeClassType,
    ViewOrientation,
};
use crate::lexer::tokenize;
use crate::parser::condition::ConditionParser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionBinaryOperation {
    And,
    Or,
    Equal,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl ConditionBinaryOperation {
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            ConditionBinaryOperation::Less
                | ConditionBinaryOperation::LessEqual
                | ConditionBinaryOperation::Greater
                | ConditionBinaryOperation::GreaterEqual
        )
    }

    /// Binding strength, loosest first. `or` < `and` < comparisons.
    fn precedence(&self) -> u8 {
        match self {
            ConditionBinaryOperation::Or => 1,
            ConditionBinaryOperation::And => 2,
            _ => 3,
        }
    }

    fn serialized(&self) -> &'static str {
        match self {
            ConditionBinaryOperation::And => "and",
            ConditionBinaryOperation::Or => "or",
            ConditionBinaryOperation::Equal => "==",
            ConditionBinaryOperation::Less => ":lt",
            ConditionBinaryOperation::LessEqual => ":lte",
            ConditionBinaryOperation::Greater => ":gt",
            ConditionBinaryOperation::GreaterEqual => ":gte",
        }
    }

    fn swift_operator(&self) -> &'static str {
        match self {
            ConditionBinaryOperation::And => "&&",
            ConditionBinaryOperation::Or => "||",
            ConditionBinaryOperation::Equal => "==",
            ConditionBinaryOperation::Less => "<",
            ConditionBinaryOperation::LessEqual => "<=",
            ConditionBinaryOperation::Greater => ">",
            ConditionBinaryOperation::GreaterEqual => ">=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionUnaryOperation {
    None,
    Negation,
}

/// Leaf predicate of a condition tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionStatement {
    True,
    False,
    Number(f64),
    InterfaceIdiom(InterfaceIdiom),
    SizeClass(SizeClassType, InterfaceSizeClass),
    /// A bare size class with no axis yet. Only exists so the grammar can
    /// accept `horizontal == compact` as two identifiers; it merges into
    /// [`ConditionStatement::SizeClass`] and never evaluates on its own.
    InterfaceSizeClass(InterfaceSizeClass),
    Orientation(ViewOrientation),
    DimensionType(DimensionType),
}

impl ConditionStatement {
    /// Look up an identifier in the statement name table. Case-insensitive;
    /// returns `None` for unknown names.
    pub fn from_identifier(identifier: &str) -> Option<ConditionStatement> {
        let statement = match identifier.to_lowercase().as_str() {
            "phone" | "iphone" => ConditionStatement::InterfaceIdiom(InterfaceIdiom::Phone),
            "pad" | "ipad" => ConditionStatement::InterfaceIdiom(InterfaceIdiom::Pad),
            "tv" | "appletv" => ConditionStatement::InterfaceIdiom(InterfaceIdiom::Tv),
            "carplay" => ConditionStatement::InterfaceIdiom(InterfaceIdiom::CarPlay),
            "horizontal" => ConditionStatement::SizeClass(
                SizeClassType::Horizontal,
                InterfaceSizeClass::Unspecified,
            ),
            "vertical" => ConditionStatement::SizeClass(
                SizeClassType::Vertical,
                InterfaceSizeClass::Unspecified,
            ),
            "landscape" => ConditionStatement::Orientation(ViewOrientation::Landscape),
            "portrait" => ConditionStatement::Orientation(ViewOrientation::Portrait),
            "compact" => ConditionStatement::InterfaceSizeClass(InterfaceSizeClass::Compact),
            "regular" => ConditionStatement::InterfaceSizeClass(InterfaceSizeClass::Regular),
            "true" => ConditionStatement::True,
            "false" => ConditionStatement::False,
            "width" => ConditionStatement::DimensionType(DimensionType::Width),
            "height" => ConditionStatement::DimensionType(DimensionType::Height),
            _ => return None,
        };
        Some(statement)
    }

    /// Numeric statements participate in comparisons, logical ones in
    /// conjunction/disjunction/negation.
    pub fn is_comparable(&self) -> bool {
        matches!(
            self,
            ConditionStatement::Number(_) | ConditionStatement::DimensionType(_)
        )
    }

    /// Combine an axis-only size class with a bare size class. Returns `None`
    /// when the shapes do not line up.
    pub fn merge_with(&self, statement: &ConditionStatement) -> Option<ConditionStatement> {
        match (self, statement) {
            (
                ConditionStatement::SizeClass(axis, _),
                ConditionStatement::InterfaceSizeClass(size_class),
            ) => Some(ConditionStatement::SizeClass(*axis, *size_class)),
            (
                ConditionStatement::InterfaceSizeClass(size_class),
                ConditionStatement::SizeClass(axis, _),
            ) => Some(ConditionStatement::SizeClass(*axis, *size_class)),
            _ => None,
        }
    }

    pub fn evaluate(&self, state: &InterfaceState) -> Result<bool, ConditionError> {
        match self {
            ConditionStatement::True => Ok(true),
            ConditionStatement::False => Ok(false),
            ConditionStatement::InterfaceIdiom(idiom) => Ok(*idiom == state.interface_idiom),
            ConditionStatement::SizeClass(axis, size_class) => {
                Ok(*size_class == state.size_class(*axis))
            }
            ConditionStatement::Orientation(orientation) => {
                Ok(*orientation == state.view_orientation())
            }
            ConditionStatement::Number(_) => Err(ConditionError::new(
                "cannot evaluate a bare number as a condition",
            )),
            ConditionStatement::InterfaceSizeClass(_) => Err(ConditionError::new(
                "cannot evaluate a size class without its axis",
            )),
            ConditionStatement::DimensionType(_) => Err(ConditionError::new(
                "cannot evaluate a bare dimension as a condition",
            )),
        }
    }

    pub fn number_value(&self, state: &InterfaceState) -> Result<f64, ConditionError> {
        match self {
            ConditionStatement::Number(value) => Ok(*value),
            ConditionStatement::DimensionType(dimension) => Ok(state.root_dimension(*dimension)),
            _ => Err(ConditionError::new(
                "requested a numeric value from a logical condition statement",
            )),
        }
    }

    pub fn serialize(&self) -> String {
        match self {
            ConditionStatement::True => "true".to_string(),
            ConditionStatement::False => "false".to_string(),
            ConditionStatement::Number(value) => format_number(*value),
            ConditionStatement::InterfaceIdiom(idiom) => idiom.to_string(),
            // An unspecified size class round-trips as the bare axis name.
            ConditionStatement::SizeClass(axis, InterfaceSizeClass::Unspecified) => {
                axis.to_string()
            }
            ConditionStatement::SizeClass(axis, size_class) => {
                format!("{} == {}", axis, size_class)
            }
            ConditionStatement::InterfaceSizeClass(size_class) => size_class.to_string(),
            ConditionStatement::Orientation(orientation) => orientation.to_string(),
            ConditionStatement::DimensionType(dimension) => dimension.to_string(),
        }
    }

    pub fn generate_swift(&self, view_name: &str) -> Result<String, ConditionError> {
        let expression = match self {
            ConditionStatement::True => "true".to_string(),
            ConditionStatement::False => "false".to_string(),
            ConditionStatement::Number(value) => format_number(*value),
            ConditionStatement::InterfaceIdiom(idiom) => {
                format!("{}.traits.device(.{})", view_name, idiom)
            }
            ConditionStatement::SizeClass(axis, size_class) => {
                format!("{}.traits.size({}: .{})", view_name, axis, size_class)
            }
            ConditionStatement::InterfaceSizeClass(_) => {
                return Err(ConditionError::new(
                    "size class condition is missing its axis",
                ));
            }
            ConditionStatement::Orientation(orientation) => {
                format!("{}.traits.orientation(.{})", view_name, orientation)
            }
            ConditionStatement::DimensionType(dimension) => {
                format!("{}.traits.viewRootSize(.{})", view_name, dimension)
            }
        };
        Ok(expression)
    }
}

/// A parsed trait predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Statement(ConditionStatement),
    Unary(ConditionUnaryOperation, Box<Condition>),
    Binary(ConditionBinaryOperation, Box<Condition>, Box<Condition>),
}

impl Condition {
    /// Parse a standalone condition string and validate it.
    pub fn parse(input: &str) -> Result<Condition, ParseError> {
        let condition = ConditionParser::new(tokenize(input)).parse_complete()?;
        condition.validate()?;
        Ok(condition)
    }

    pub fn negation(&self) -> Condition {
        match self {
            Condition::Statement(statement) => Condition::Unary(
                ConditionUnaryOperation::Negation,
                Box::new(Condition::Statement(statement.clone())),
            ),
            Condition::Unary(operation, condition) => {
                let flipped = if *operation == ConditionUnaryOperation::None {
                    ConditionUnaryOperation::Negation
                } else {
                    ConditionUnaryOperation::None
                };
                Condition::Unary(flipped, condition.clone())
            }
            Condition::Binary(..) => {
                Condition::Unary(ConditionUnaryOperation::Negation, Box::new(self.clone()))
            }
        }
    }

    /// A condition participates in comparisons only when it is a numeric
    /// leaf; every composite reduces to a boolean.
    pub fn is_comparable(&self) -> bool {
        match self {
            Condition::Statement(statement) => statement.is_comparable(),
            _ => false,
        }
    }

    /// Check the operand-family invariant over the whole tree.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Condition::Statement(_) => Ok(()),
            Condition::Unary(operation, condition) => {
                if *operation == ConditionUnaryOperation::Negation && condition.is_comparable() {
                    return Err(ValidationError::new(
                        "cannot negate a numeric condition operand",
                    ));
                }
                condition.validate()
            }
            Condition::Binary(operation, lhs, rhs) => {
                match operation {
                    ConditionBinaryOperation::And | ConditionBinaryOperation::Or => {
                        if lhs.is_comparable() || rhs.is_comparable() {
                            return Err(ValidationError::new(format!(
                                "'{}' cannot combine numeric operands",
                                operation.serialized()
                            )));
                        }
                    }
                    ConditionBinaryOperation::Equal => {
                        if lhs.is_comparable() != rhs.is_comparable() {
                            return Err(ValidationError::new(
                                "'==' operands must both be numeric or both logical",
                            ));
                        }
                    }
                    _ => {
                        if !lhs.is_comparable() || !rhs.is_comparable() {
                            return Err(ValidationError::new(format!(
                                "'{}' requires numeric operands",
                                operation.serialized()
                            )));
                        }
                    }
                }
                lhs.validate()?;
                rhs.validate()
            }
        }
    }

    /// Reduce the condition to a boolean against a trait snapshot.
    ///
    /// Asking a numeric or axis-less leaf for a boolean, or comparing a
    /// composite condition, is a contract violation reported as
    /// [`ConditionError`] rather than a panic.
    pub fn evaluate(&self, state: &InterfaceState) -> Result<bool, ConditionError> {
        match self {
            Condition::Statement(statement) => statement.evaluate(state),
            Condition::Unary(operation, condition) => {
                let value = condition.evaluate(state)?;
                Ok(value == (*operation != ConditionUnaryOperation::Negation))
            }
            Condition::Binary(operation, lhs, rhs) => match operation {
                ConditionBinaryOperation::And => Ok(lhs.evaluate(state)? && rhs.evaluate(state)?),
                ConditionBinaryOperation::Or => Ok(lhs.evaluate(state)? || rhs.evaluate(state)?),
                ConditionBinaryOperation::Equal => {
                    if lhs.is_comparable() && rhs.is_comparable() {
                        Ok(lhs.number_value(state)? == rhs.number_value(state)?)
                    } else {
                        Ok(lhs.evaluate(state)? == rhs.evaluate(state)?)
                    }
                }
                ConditionBinaryOperation::Less => {
                    Ok(lhs.number_value(state)? < rhs.number_value(state)?)
                }
                ConditionBinaryOperation::LessEqual => {
                    Ok(lhs.number_value(state)? <= rhs.number_value(state)?)
                }
                ConditionBinaryOperation::Greater => {
                    Ok(lhs.number_value(state)? > rhs.number_value(state)?)
                }
                ConditionBinaryOperation::GreaterEqual => {
                    Ok(lhs.number_value(state)? >= rhs.number_value(state)?)
                }
            },
        }
    }

    fn number_value(&self, state: &InterfaceState) -> Result<f64, ConditionError> {
        match self {
            Condition::Statement(statement) => statement.number_value(state),
            _ => Err(ConditionError::new(
                "cannot numerically evaluate a composite condition",
            )),
        }
    }

    /// Render back to condition syntax. The output re-parses to an equal tree.
    pub fn serialize(&self) -> String {
        self.render(
            &mut |statement| statement.serialize(),
            &|operation| operation.serialized().to_string(),
        )
    }

    /// Lower to a boolean source expression over `{view_name}.traits`.
    pub fn generate_swift(&self, view_name: &str) -> Result<String, ConditionError> {
        let mut error = None;
        let rendered = self.render(
            &mut |statement| match statement.generate_swift(view_name) {
                Ok(expression) => expression,
                Err(statement_error) => {
                    error = Some(statement_error);
                    String::new()
                }
            },
            &|operation| operation.swift_operator().to_string(),
        );
        match error {
            Some(error) => Err(error),
            None => Ok(rendered),
        }
    }

    fn render(
        &self,
        statement_form: &mut dyn FnMut(&ConditionStatement) -> String,
        operator_form: &dyn Fn(&ConditionBinaryOperation) -> String,
    ) -> String {
        match self {
            Condition::Statement(statement) => statement_form(statement),
            Condition::Unary(ConditionUnaryOperation::None, condition) => {
                condition.render(statement_form, operator_form)
            }
            Condition::Unary(ConditionUnaryOperation::Negation, condition) => {
                let inner = condition.render(statement_form, operator_form);
                if condition.needs_parentheses(None) {
                    format!("!({})", inner)
                } else {
                    format!("!{}", inner)
                }
            }
            Condition::Binary(operation, lhs, rhs) => {
                let mut out = String::new();
                let lhs_rendered = lhs.render(statement_form, operator_form);
                if lhs.needs_parentheses(Some(*operation)) {
                    let _ = write!(out, "({})", lhs_rendered);
                } else {
                    out.push_str(&lhs_rendered);
                }
                let _ = write!(out, " {} ", operator_form(operation));
                let rhs_rendered = rhs.render(statement_form, operator_form);
                if rhs.needs_parentheses(Some(*operation)) {
                    let _ = write!(out, "({})", rhs_rendered);
                } else {
                    out.push_str(&rhs_rendered);
                }
                out
            }
        }
    }

    /// Whether this condition must be parenthesized as an operand of
    /// `parent`, or of a negation when `parent` is `None`.
    fn needs_parentheses(&self, parent: Option<ConditionBinaryOperation>) -> bool {
        let own_precedence = match self {
            Condition::Binary(operation, ..) => operation.precedence(),
            Condition::Unary(ConditionUnaryOperation::None, inner) => {
                return inner.needs_parentheses(parent);
            }
            // The axis comparison in a specified size class binds like `==`.
            Condition::Statement(ConditionStatement::SizeClass(_, size_class))
                if *size_class != InterfaceSizeClass::Unspecified =>
            {
                3
            }
            _ => return false,
        };
        match parent {
            // Negation binds tightest of all.
            None => true,
            Some(parent_operation) => {
                let parent_precedence = parent_operation.precedence();
                // Chained comparisons do not associate; always disambiguate.
                own_precedence < parent_precedence
                    || (own_precedence == 3 && parent_precedence == 3)
            }
        }
    }
}
