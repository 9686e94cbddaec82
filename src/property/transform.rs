//! Affine transformations composed from modifier lists
//!
//! `rotate(by: 45) scale(x: 2)` parses into two modifiers applied in order.
//! Rotation angles are written in degrees and converted to radians only when
//! generating source.

use crate::error::ParseError;
use crate::format::format_number;
use crate::lexer::tokenize;
use crate::parser::transform::TransformationParser;
use crate::parser::Parser;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformationModifier {
    Identity,
    Rotate(f64),
    Scale { x: f64, y: f64 },
    Translate { x: f64, y: f64 },
}

impl TransformationModifier {
    pub fn serialize(&self) -> String {
        match self {
            TransformationModifier::Identity => "identity".to_string(),
            TransformationModifier::Rotate(degrees) => {
                format!("rotate({})", format_number(*degrees))
            }
            TransformationModifier::Scale { x, y } => {
                format!("scale(x: {}, y: {})", format_number(*x), format_number(*y))
            }
            TransformationModifier::Translate { x, y } => format!(
                "translate(x: {}, y: {})",
                format_number(*x),
                format_number(*y)
            ),
        }
    }

    /// The builder call generated for this modifier. Degrees become radians
    /// here so runtime code never repeats the conversion.
    pub fn generate_swift(&self) -> String {
        match self {
            TransformationModifier::Identity => ".identity".to_string(),
            TransformationModifier::Rotate(degrees) => {
                format!("rotate({})", format_number(degrees.to_radians()))
            }
            TransformationModifier::Scale { x, y } => {
                format!("scale(x: {}, y: {})", format_number(*x), format_number(*y))
            }
            TransformationModifier::Translate { x, y } => format!(
                "translate(x: {}, y: {})",
                format_number(*x),
                format_number(*y)
            ),
        }
    }
}

/// An ordered list of transformation modifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct AffineTransformation {
    pub transformations: Vec<TransformationModifier>,
}

impl AffineTransformation {
    pub fn parse(value: &str) -> Result<AffineTransformation, ParseError> {
        let transformations = TransformationParser::new(tokenize(value)).parse()?;
        Ok(AffineTransformation { transformations })
    }

    pub fn serialize(&self) -> String {
        self.transformations
            .iter()
            .map(TransformationModifier::serialize)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn generate_swift(&self) -> String {
        if self.transformations.is_empty() {
            return TransformationModifier::Identity.generate_swift();
        }
        self.transformations
            .iter()
            .map(TransformationModifier::generate_swift)
            .collect::<Vec<_>>()
            .join(" + ")
    }
}
