//! Anchor Script - a constraint layout language for UI code generation
//!
//! This library provides the front end of an attribute-embedded layout DSL:
//! a lexer, a family of recursive-descent parsers (constraints, trait
//! conditions, fonts, text transforms, affine transformations, action
//! calls), a serializer that compresses constraint sets back into shortcut
//! attributes, a condition evaluator over live interface traits, and a
//! static generator emitting constraint-builder source.
//!
//! # Example
//!
//! ```rust
//! use anchor_script::generate;
//!
//! let source = generate(
//!     &[("top", "super inset(by: 20)"), ("left", "super")],
//!     "label",
//!     "view",
//! )
//! .unwrap();
//! assert!(source.contains("make.top.equalTo(view).offset(20)"));
//! assert!(source.contains("make.left.equalTo(view)"));
//! ```

pub mod codegen;
pub mod error;
mod format;
pub mod layout;
pub mod lexer;
pub mod parser;
pub mod property;

pub use codegen::{ConstraintGenerator, GeneratorConfig, RuntimePlatform, Statement};
pub use error::{ConditionError, ParseError, ValidationError};
pub use layout::{
    Condition, Constraint, ConstraintPriority, ConstraintRelation, ConstraintTarget,
    ConstraintType, InterfaceState, Layout, LayoutAnchor, LayoutAttribute,
};
pub use lexer::{tokenize, tokenize_with_whitespace, Token};
pub use property::{AffineTransformation, Font, TransformedText, ViewAction};

use thiserror::Error;

/// Errors that can occur during the generate pipeline
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Error while parsing layout attributes
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error while lowering a condition to source
    #[error("condition error: {0}")]
    Condition(#[from] ConditionError),
}

/// Generate constraint-builder source for one element's layout attributes
/// with default configuration
///
/// This is the main entry point for the static path. It parses the
/// attributes into a [`Layout`] and renders one builder call per constraint,
/// applied to the view `name` laid out inside `parent`.
///
/// # Example
///
/// ```rust
/// use anchor_script::generate;
///
/// let source = generate(&[("centerY", "super")], "icon", "cell").unwrap();
/// assert_eq!(source, "make.centerY.equalTo(cell)\n");
/// ```
pub fn generate(
    attributes: &[(&str, &str)],
    name: &str,
    parent: &str,
) -> Result<String, GenerateError> {
    generate_with_config(attributes, name, parent, GeneratorConfig::default())
}

/// Generate constraint-builder source with custom configuration
///
/// # Example
///
/// ```rust
/// use anchor_script::{generate_with_config, GeneratorConfig};
///
/// let config = GeneratorConfig::new().with_deployment_target(9, 0);
/// let source = generate_with_config(
///     &[("top", "safeAreaLayoutGuide")],
///     "label",
///     "view",
///     config,
/// )
/// .unwrap();
/// assert!(source.contains("#available(iOS 11.0, tvOS 11.0, *)"));
/// assert!(source.contains("view.fallback_safeAreaLayoutGuide"));
/// ```
pub fn generate_with_config(
    attributes: &[(&str, &str)],
    name: &str,
    parent: &str,
    config: GeneratorConfig,
) -> Result<String, GenerateError> {
    let layout = Layout::from_attributes(attributes)?;
    let generator = ConstraintGenerator::new(config);
    let statements = generator.layout_statements(&layout, name, parent)?;
    Ok(codegen::render_statements(&statements))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_simple_layout() {
        let source = generate(
            &[("left", "super"), ("right", "super inset(by: 16)")],
            "title",
            "contentView",
        )
        .unwrap();
        assert_eq!(
            source,
            "make.left.equalTo(contentView)\nmake.right.equalTo(contentView).offset(-16)\n"
        );
    }

    #[test]
    fn test_generate_conditional_layout() {
        let source = generate(&[("top", "[phone] super; 40")], "title", "contentView").unwrap();
        assert!(source.contains("if title.traits.device(.phone) {"));
        assert!(source.contains("    make.top.equalTo(contentView)"));
        assert!(source.contains("make.top.equalTo(40)"));
    }

    #[test]
    fn test_generate_rejects_malformed_attributes() {
        let result = generate(&[("top", "super offset(by: x)")], "title", "contentView");
        assert!(matches!(result, Err(GenerateError::Parse(_))));
    }

    #[test]
    fn test_layout_serialization_round_trips() {
        let attributes = [
            ("edges", "super inset(by: 8)"),
            ("compressionPriority.horizontal", "high"),
        ];
        let layout = Layout::from_attributes(&attributes).unwrap();
        let serialized = layout.serialize();
        let pairs: Vec<(&str, &str)> = serialized
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        assert_eq!(Layout::from_attributes(&pairs).unwrap(), layout);
    }

    #[test]
    fn test_condition_evaluation_against_state() {
        use crate::layout::{InterfaceIdiom, InterfaceSizeClass};

        let condition = Condition::parse("pad and landscape").unwrap();
        let state = InterfaceState::new(
            InterfaceIdiom::Pad,
            InterfaceSizeClass::Regular,
            InterfaceSizeClass::Regular,
            (1024.0, 768.0),
        );
        assert!(condition.evaluate(&state).unwrap());
    }
}
