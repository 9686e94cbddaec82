//! Constraint AST and its attribute-value serialization
//!
//! [`Constraint::parse`] is the deserialization entry for one attribute
//! name/value pair; [`Constraint::serialize`] is its inverse. Serialized
//! output re-parses to a structurally equal constraint, though not always to
//! the same text (offsets on parent-targeted edges prefer the `inset` form).

use std::str::FromStr;

use crate::error::ParseError;
use crate::format::{capitalize_first, format_number};
use crate::layout::attribute::{LayoutAnchor, LayoutAttribute};
use crate::layout::condition::Condition;
use crate::lexer::tokenize;
use crate::parser::constraint::ConstraintParser;
use crate::parser::Parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintRelation {
    Equal,
    LessThanOrEqual,
    GreaterThanOrEqual,
}

impl ConstraintRelation {
    /// Builder method name in generated source.
    pub fn swift_method(&self) -> &'static str {
        match self {
            ConstraintRelation::Equal => "equalTo",
            ConstraintRelation::LessThanOrEqual => "lessThanOrEqualTo",
            ConstraintRelation::GreaterThanOrEqual => "greaterThanOrEqualTo",
        }
    }

    /// Short form used in attribute values.
    pub fn serialized(&self) -> &'static str {
        match self {
            ConstraintRelation::Equal => "eq",
            ConstraintRelation::LessThanOrEqual => "lt",
            ConstraintRelation::GreaterThanOrEqual => "gt",
        }
    }
}

impl FromStr for ConstraintRelation {
    type Err = ParseError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string {
            "equal" | "eq" => Ok(ConstraintRelation::Equal),
            "lessOrEqual" | "lte" | "lt" => Ok(ConstraintRelation::LessThanOrEqual),
            "greaterOrEqual" | "gte" | "gt" => Ok(ConstraintRelation::GreaterThanOrEqual),
            _ => Err(ParseError::message(format!(
                "unknown relation '{}'",
                string
            ))),
        }
    }
}

/// Priority of a constraint. Named variants cover the standard values;
/// every construction path collapses a matching numeric value to its named
/// variant, so `@750` and `@high` parse identically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstraintPriority {
    Required,
    High,
    Medium,
    Low,
    Custom(f64),
}

impl ConstraintPriority {
    pub fn numeric(&self) -> f64 {
        match self {
            ConstraintPriority::Required => 1000.0,
            ConstraintPriority::High => 750.0,
            ConstraintPriority::Medium => 500.0,
            ConstraintPriority::Low => 250.0,
            ConstraintPriority::Custom(value) => *value,
        }
    }

    pub fn from_numeric(value: f64) -> ConstraintPriority {
        if value == ConstraintPriority::Required.numeric() {
            ConstraintPriority::Required
        } else if value == ConstraintPriority::High.numeric() {
            ConstraintPriority::High
        } else if value == ConstraintPriority::Medium.numeric() {
            ConstraintPriority::Medium
        } else if value == ConstraintPriority::Low.numeric() {
            ConstraintPriority::Low
        } else {
            ConstraintPriority::Custom(value)
        }
    }

    pub fn serialized(&self) -> String {
        match self {
            ConstraintPriority::Required => "required".to_string(),
            ConstraintPriority::High => "high".to_string(),
            ConstraintPriority::Medium => "medium".to_string(),
            ConstraintPriority::Low => "low".to_string(),
            ConstraintPriority::Custom(value) => format_number(*value),
        }
    }
}

impl FromStr for ConstraintPriority {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "required" => Ok(ConstraintPriority::Required),
            "high" => Ok(ConstraintPriority::High),
            "medium" => Ok(ConstraintPriority::Medium),
            "low" => Ok(ConstraintPriority::Low),
            _ => value
                .parse::<f64>()
                .map(ConstraintPriority::from_numeric)
                .map_err(|_| {
                    ParseError::message(format!("unknown constraint priority '{}'", value))
                }),
        }
    }
}

/// What a targeted constraint is constrained against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintTarget {
    /// Another view referenced by field name.
    Field(String),
    /// Another view referenced by its layout id, written `id:name`.
    LayoutId(String),
    /// The superview, written `super`.
    Parent,
    /// The view itself, written `self`.
    This,
    SafeAreaLayoutGuide,
    ReadableContentGuide,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintType {
    /// A bare numeric requirement, e.g. `width="100"`.
    Constant(f64),
    Targeted {
        target: ConstraintTarget,
        target_anchor: LayoutAnchor,
        multiplier: f64,
        constant: f64,
    },
}

/// One parsed value modifier. The grammar folds these left to right:
/// multipliers compose multiplicatively, offsets additively, and insets are
/// pre-multiplied by the attribute's inset direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstraintModifier {
    Multiplied(f64),
    Divided(f64),
    Offset(f64),
    Inset(f64),
}

/// A single layout constraint parsed from one attribute value.
#[derive(Debug, Clone)]
pub struct Constraint {
    /// Captured field name for runtime mutation, from a `name =` prefix.
    pub field: Option<String>,
    /// Guard deciding whether the constraint is active. Advisory for
    /// generation; not part of the constraint's identity.
    pub condition: Option<Condition>,
    pub attribute: LayoutAttribute,
    pub kind: ConstraintType,
    pub relation: ConstraintRelation,
    pub priority: ConstraintPriority,
}

impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field
            && self.attribute == other.attribute
            && self.priority == other.priority
            && self.relation == other.relation
            && self.kind == other.kind
    }
}

impl Constraint {
    pub fn anchor(&self) -> LayoutAnchor {
        self.attribute.anchor()
    }

    /// Parse one attribute name/value pair into constraints.
    ///
    /// The name may expand to several attributes (`edges`, `center`, ...);
    /// the value is then parsed once per attribute. When that expansion
    /// produces several constraints sharing a captured field, each field is
    /// renamed to `field + CapitalizedAttributeName` to keep generated
    /// properties unique.
    pub fn parse(name: &str, value: &str) -> Result<Vec<Constraint>, ParseError> {
        let layout_attributes = LayoutAttribute::deserialize(name)?;
        let tokens = tokenize(value);

        let mut constraints = Vec::new();
        for attribute in layout_attributes {
            constraints.extend(ConstraintParser::new(tokens.clone(), attribute).parse()?);
        }

        if constraints.len() > 1 {
            if let Some(field) = constraints.first().and_then(|c| c.field.clone()) {
                for constraint in &mut constraints {
                    constraint.field = Some(format!(
                        "{}{}",
                        field,
                        capitalize_first(constraint.attribute.name())
                    ));
                }
            }
        }

        Ok(constraints)
    }

    /// Serialize back to an attribute name/value pair.
    pub fn serialize(&self) -> (String, String) {
        let mut value: Vec<String> = Vec::new();

        if let Some(condition) = &self.condition {
            value.push(format!("[{}]", condition.serialize()));
        }

        if let Some(field) = &self.field {
            value.push(format!("{} =", field));
        }

        if self.relation != ConstraintRelation::Equal {
            value.push(format!(":{}", self.relation.serialized()));
        }

        match &self.kind {
            ConstraintType::Constant(constant) => value.push(format_number(*constant)),
            ConstraintType::Targeted {
                target,
                target_anchor,
                multiplier,
                constant,
            } => {
                let mut target_string = match target {
                    ConstraintTarget::Field(name) => name.clone(),
                    ConstraintTarget::LayoutId(id) => format!("id:{}", id),
                    ConstraintTarget::Parent => "super".to_string(),
                    ConstraintTarget::This => "self".to_string(),
                    ConstraintTarget::SafeAreaLayoutGuide => "safeAreaLayoutGuide".to_string(),
                    ConstraintTarget::ReadableContentGuide => "readableContentGuide".to_string(),
                };
                // `before`/`after` imply their target anchor; spelling it out
                // would not re-parse.
                if *target_anchor != self.anchor()
                    && self.attribute != LayoutAttribute::Before
                    && self.attribute != LayoutAttribute::After
                {
                    target_string.push('.');
                    target_string.push_str(target_anchor.name());
                }
                value.push(target_string);

                if *multiplier != 1.0 {
                    if *multiplier > 1.0 {
                        value.push(format!("multiplied(by: {})", format_number(*multiplier)));
                    } else {
                        value.push(format!("divided(by: {})", format_number(1.0 / multiplier)));
                    }
                }

                if *constant != 0.0 {
                    let direction = self.attribute.inset_direction();
                    if *target == ConstraintTarget::Parent && (*constant > 0.0 || direction < 0.0)
                    {
                        value.push(format!(
                            "inset(by: {})",
                            format_number(*constant * direction)
                        ));
                    } else {
                        value.push(format!("offset(by: {})", format_number(*constant)));
                    }
                }
            }
        }

        if self.priority != ConstraintPriority::Required {
            value.push(format!("@{}", self.priority.serialized()));
        }

        (self.attribute.name().to_string(), value.join(" "))
    }
}
