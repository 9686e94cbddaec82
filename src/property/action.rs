//! Action calls bound to view events
//!
//! An attribute such as `action:tap="submit(...)"` attaches the `submit`
//! action to the `tap` event. The event name lives in the attribute name,
//! not in the parsed value, so it is threaded into the parser from outside.

use crate::error::ParseError;
use crate::lexer::tokenize;
use crate::parser::action::ActionParser;

#[derive(Debug, Clone, PartialEq)]
pub enum ActionParameter {
    /// `...`, forwarding the parameters of the observed event.
    Inherited,
    /// `Type(value)`, a literal of a named type.
    Constant { type_name: String, value: String },
    /// `$name.path`, a component state variable.
    StateVariable { name: String },
    /// `@id.property.path`, a value read from another view in the layout.
    Reference {
        target_id: String,
        property: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewAction {
    pub name: String,
    pub event_name: String,
    pub parameters: Vec<(Option<String>, ActionParameter)>,
}

impl ViewAction {
    pub fn parse(event_name: &str, value: &str) -> Result<ViewAction, ParseError> {
        ActionParser::new(tokenize(value), event_name.to_string()).parse_action()
    }

    /// Reads an action from an attribute pair. Only names carrying the
    /// `action:` prefix describe actions; anything else yields `None`.
    pub fn from_attribute(name: &str, value: &str) -> Option<Result<ViewAction, ParseError>> {
        let event_name = name.strip_prefix("action:")?;
        Some(ViewAction::parse(event_name, value))
    }
}
