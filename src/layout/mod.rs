//! Constraint model for one laid-out element
//!
//! A [`Layout`] collects everything an element's layout attributes carry: an
//! optional id other elements can target, content priorities per axis, and
//! the parsed constraints. [`Layout::from_attributes`] consumes attribute
//! name/value pairs; [`Layout::serialize`] is the inverse and reapplies
//! shortcut compression.

pub mod attribute;
pub mod condition;
pub mod constraint;
mod shortcut;
pub mod state;

pub use attribute::{LayoutAnchor, LayoutAttribute};
pub use condition::{
    Condition, ConditionBinaryOperation, ConditionStatement, ConditionUnaryOperation,
};
pub use constraint::{
    Constraint, ConstraintModifier, ConstraintPriority, ConstraintRelation, ConstraintTarget,
    ConstraintType,
};
pub use state::{
    DimensionType, InterfaceIdiom, InterfaceSizeClass, InterfaceState, SizeClassType,
    ViewOrientation,
};

use crate::error::{ConditionError, ParseError};
use shortcut::ShortcutOrConstraint;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    pub id: Option<String>,
    pub content_compression_priority_horizontal: Option<ConstraintPriority>,
    pub content_compression_priority_vertical: Option<ConstraintPriority>,
    pub content_hugging_priority_horizontal: Option<ConstraintPriority>,
    pub content_hugging_priority_vertical: Option<ConstraintPriority>,
    pub constraints: Vec<Constraint>,
}

impl Layout {
    /// Build a layout from attribute name/value pairs.
    ///
    /// `id` and the content priority names set the scalar fields; every other
    /// name goes through constraint parsing. A combined priority name sets
    /// both axes and an axis-specific name overrides it, in either order of
    /// appearance.
    pub fn from_attributes(attributes: &[(&str, &str)]) -> Result<Layout, ParseError> {
        let mut layout = Layout::default();

        for &(name, value) in attributes {
            match name {
                "compressionPriority" => {
                    let priority: ConstraintPriority = value.parse()?;
                    layout.content_compression_priority_horizontal = Some(priority);
                    layout.content_compression_priority_vertical = Some(priority);
                }
                "huggingPriority" => {
                    let priority: ConstraintPriority = value.parse()?;
                    layout.content_hugging_priority_horizontal = Some(priority);
                    layout.content_hugging_priority_vertical = Some(priority);
                }
                _ => {}
            }
        }

        for &(name, value) in attributes {
            match name {
                "id" => layout.id = Some(value.to_string()),
                "compressionPriority" | "huggingPriority" => {}
                "compressionPriority.horizontal" => {
                    layout.content_compression_priority_horizontal = Some(value.parse()?);
                }
                "compressionPriority.vertical" => {
                    layout.content_compression_priority_vertical = Some(value.parse()?);
                }
                "huggingPriority.horizontal" => {
                    layout.content_hugging_priority_horizontal = Some(value.parse()?);
                }
                "huggingPriority.vertical" => {
                    layout.content_hugging_priority_vertical = Some(value.parse()?);
                }
                name => layout.constraints.extend(Constraint::parse(name, value)?),
            }
        }

        Ok(layout)
    }

    /// Serialize back to attribute name/value pairs.
    pub fn serialize(&self) -> Vec<(String, String)> {
        let mut attributes = Vec::new();

        if let Some(id) = &self.id {
            attributes.push(("id".to_string(), id.clone()));
        }

        serialize_priorities(
            &mut attributes,
            "compressionPriority",
            self.content_compression_priority_horizontal,
            self.content_compression_priority_vertical,
        );
        serialize_priorities(
            &mut attributes,
            "huggingPriority",
            self.content_hugging_priority_horizontal,
            self.content_hugging_priority_vertical,
        );

        attributes.extend(
            ShortcutOrConstraint::detect(&self.constraints)
                .iter()
                .map(|entry| entry.serialize()),
        );

        attributes
    }

    pub fn has_conditions(&self) -> bool {
        self.constraints
            .iter()
            .any(|constraint| constraint.condition.is_some())
    }

    /// Constraints whose guard is absent or holds under `state`.
    pub fn active_constraints(
        &self,
        state: &InterfaceState,
    ) -> Result<Vec<&Constraint>, ConditionError> {
        let mut active = Vec::new();
        for constraint in &self.constraints {
            let keep = match &constraint.condition {
                Some(condition) => condition.evaluate(state)?,
                None => true,
            };
            if keep {
                active.push(constraint);
            }
        }
        Ok(active)
    }
}

fn serialize_priorities(
    attributes: &mut Vec<(String, String)>,
    name: &str,
    horizontal: Option<ConstraintPriority>,
    vertical: Option<ConstraintPriority>,
) {
    match (horizontal, vertical) {
        (Some(horizontal), Some(vertical)) if horizontal == vertical => {
            attributes.push((name.to_string(), horizontal.serialized()));
        }
        (horizontal, vertical) => {
            if let Some(horizontal) = horizontal {
                attributes.push((format!("{}.horizontal", name), horizontal.serialized()));
            }
            if let Some(vertical) = vertical {
                attributes.push((format!("{}.vertical", name), vertical.serialized()));
            }
        }
    }
}
