//! Static generation of constraint-builder source
//!
//! The generator walks parsed constraints and emits one builder call per
//! constraint as a small statement tree. Conditions become `if` guards
//! around their constraint, evaluated against the view's live traits, and
//! the safe-area guide gains an availability-guarded fallback pair when the
//! deployment target predates the native guide. Rendering the tree is the
//! last step; everything before it works on structured statements.

pub mod config;

pub use config::{ConfigError, GeneratorConfig, RuntimePlatform};

use std::fmt::Write as _;

use crate::error::ConditionError;
use crate::format::format_number;
use crate::layout::constraint::{Constraint, ConstraintTarget, ConstraintType};
use crate::layout::{ConstraintPriority, Layout};

/// A generated source statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Line(String),
    If {
        condition: String,
        then: Vec<Statement>,
        otherwise: Vec<Statement>,
    },
}

impl Statement {
    /// Render to source text, indented four spaces per nesting level. Every
    /// line ends with a newline.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        match self {
            Statement::Line(line) => {
                indent(out, depth);
                out.push_str(line);
                out.push('\n');
            }
            Statement::If {
                condition,
                then,
                otherwise,
            } => {
                indent(out, depth);
                let _ = writeln!(out, "if {} {{", condition);
                for statement in then {
                    statement.render_into(out, depth + 1);
                }
                if !otherwise.is_empty() {
                    indent(out, depth);
                    out.push_str("} else {\n");
                    for statement in otherwise {
                        statement.render_into(out, depth + 1);
                    }
                }
                indent(out, depth);
                out.push_str("}\n");
            }
        }
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("    ");
    }
}

/// Render a statement sequence into one source block.
pub fn render_statements(statements: &[Statement]) -> String {
    let mut out = String::new();
    for statement in statements {
        statement.render_into(&mut out, 0);
    }
    out
}

/// Emits constraint-builder calls for parsed layouts.
pub struct ConstraintGenerator {
    config: GeneratorConfig,
}

impl ConstraintGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Statements for `layout` applied to the view `name` inside `parent`,
    /// content priorities first, then one statement per constraint in
    /// declaration order.
    pub fn layout_statements(
        &self,
        layout: &Layout,
        name: &str,
        parent: &str,
    ) -> Result<Vec<Statement>, ConditionError> {
        let mut statements = self.priority_statements(layout, name);
        for constraint in &layout.constraints {
            statements.push(self.constraint_statement(constraint, name, parent)?);
        }
        Ok(statements)
    }

    /// Content compression and hugging priority calls for `layout`.
    pub fn priority_statements(&self, layout: &Layout, name: &str) -> Vec<Statement> {
        let calls = [
            (
                "setContentCompressionResistancePriority",
                "horizontal",
                layout.content_compression_priority_horizontal,
            ),
            (
                "setContentCompressionResistancePriority",
                "vertical",
                layout.content_compression_priority_vertical,
            ),
            (
                "setContentHuggingPriority",
                "horizontal",
                layout.content_hugging_priority_horizontal,
            ),
            (
                "setContentHuggingPriority",
                "vertical",
                layout.content_hugging_priority_vertical,
            ),
        ];
        calls
            .into_iter()
            .filter_map(|(method, axis, priority)| {
                let priority = priority?;
                Some(Statement::Line(format!(
                    "{}.{}(UILayoutPriority(rawValue: {}), for: .{})",
                    name,
                    method,
                    format_number(priority.numeric()),
                    axis
                )))
            })
            .collect()
    }

    /// The statement for one constraint on the view `name` inside `parent`.
    ///
    /// A conditional constraint wraps in an `if` over the view's traits; a
    /// safe-area target on a pre-native deployment target wraps in an
    /// availability check choosing between the native guide and the
    /// polyfilled fallback.
    pub fn constraint_statement(
        &self,
        constraint: &Constraint,
        name: &str,
        parent: &str,
    ) -> Result<Statement, ConditionError> {
        let needs_fallback =
            targets_safe_area(constraint) && !self.config.has_native_safe_area();
        let call = if needs_fallback {
            Statement::If {
                condition: "#available(iOS 11.0, tvOS 11.0, *)".to_string(),
                then: vec![Statement::Line(
                    self.builder_call(constraint, name, parent, false),
                )],
                otherwise: vec![Statement::Line(
                    self.builder_call(constraint, name, parent, true),
                )],
            }
        } else {
            Statement::Line(self.builder_call(constraint, name, parent, false))
        };

        match &constraint.condition {
            Some(condition) => Ok(Statement::If {
                condition: condition.generate_swift(name)?,
                then: vec![call],
                otherwise: Vec::new(),
            }),
            None => Ok(call),
        }
    }

    fn builder_call(
        &self,
        constraint: &Constraint,
        name: &str,
        parent: &str,
        fallback: bool,
    ) -> String {
        let mut call = format!(
            "make.{}.{}(",
            constraint.anchor(),
            constraint.relation.swift_method()
        );

        match &constraint.kind {
            ConstraintType::Constant(constant) => call.push_str(&format_number(*constant)),
            ConstraintType::Targeted {
                target,
                target_anchor,
                ..
            } => {
                let target_text = match target {
                    ConstraintTarget::Field(field) => field.clone(),
                    ConstraintTarget::LayoutId(id) => format!("named_{}", id),
                    ConstraintTarget::Parent => parent.to_string(),
                    ConstraintTarget::This => name.to_string(),
                    ConstraintTarget::SafeAreaLayoutGuide => {
                        if fallback {
                            format!("{}.fallback_safeAreaLayoutGuide", parent)
                        } else {
                            format!("{}.safeAreaLayoutGuide", parent)
                        }
                    }
                    ConstraintTarget::ReadableContentGuide => {
                        format!("{}.readableContentGuide", parent)
                    }
                };
                call.push_str(&target_text);
                if *target_anchor != constraint.anchor() {
                    let _ = write!(call, ".anchors.{}", target_anchor);
                }
            }
        }
        call.push(')');

        if let ConstraintType::Targeted {
            multiplier,
            constant,
            ..
        } = &constraint.kind
        {
            if *constant != 0.0 {
                let _ = write!(call, ".offset({})", format_number(*constant));
            }
            if *multiplier != 1.0 {
                let _ = write!(call, ".multipliedBy({})", format_number(*multiplier));
            }
        }

        if constraint.priority.numeric() != ConstraintPriority::Required.numeric() {
            let _ = write!(
                call,
                ".priority({})",
                format_number(constraint.priority.numeric())
            );
        }

        match &constraint.field {
            Some(field) => format!("layout.{} = {}.constraint", field, call),
            None => call,
        }
    }
}

fn targets_safe_area(constraint: &Constraint) -> bool {
    matches!(
        constraint.kind,
        ConstraintType::Targeted {
            target: ConstraintTarget::SafeAreaLayoutGuide,
            ..
        }
    )
}
