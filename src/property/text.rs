//! Text values with an optional transform pipeline
//!
//! `:uppercased(:localized(Welcome))` wraps the literal `Welcome` in two
//! transforms, innermost first. The inner text is free-form; interpolation
//! placeholders survive as `\(name)` in every rendered form.

use crate::error::ParseError;
use crate::lexer::tokenize_with_whitespace;
use crate::parser::text::TextParser;
use crate::parser::Parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTransform {
    Uppercased,
    Lowercased,
    Localized,
    Capitalized,
}

impl TextTransform {
    pub fn parse(name: &str) -> Option<TextTransform> {
        match name {
            "uppercased" => Some(TextTransform::Uppercased),
            "lowercased" => Some(TextTransform::Lowercased),
            "localized" => Some(TextTransform::Localized),
            "capitalized" => Some(TextTransform::Capitalized),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TextTransform::Uppercased => "uppercased",
            TextTransform::Lowercased => "lowercased",
            TextTransform::Localized => "localized",
            TextTransform::Capitalized => "capitalized",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransformedText {
    Text(String),
    Transform(TextTransform, Box<TransformedText>),
}

impl TransformedText {
    pub fn parse(value: &str) -> Result<TransformedText, ParseError> {
        TextParser::new(tokenize_with_whitespace(value)).parse_single()
    }

    pub fn serialize(&self) -> String {
        match self {
            TransformedText::Transform(transform, inner) => {
                format!(":{}({})", transform.name(), inner.serialize())
            }
            TransformedText::Text(value) => value
                .replace('"', "&quot;")
                .replace('\n', "\\n")
                .replace('\r', "\\r")
                .replace('\t', "\\t"),
        }
    }

    /// The Swift expression producing this text at runtime.
    pub fn generate_swift(&self) -> String {
        match self {
            TransformedText::Transform(TextTransform::Uppercased, inner) => {
                format!("{}.uppercased()", inner.generate_swift())
            }
            TransformedText::Transform(TextTransform::Lowercased, inner) => {
                format!("{}.lowercased()", inner.generate_swift())
            }
            TransformedText::Transform(TextTransform::Localized, inner) => format!(
                "NSLocalizedString({}, bundle: __resourceBundle, comment: \"\")",
                inner.generate_swift()
            ),
            TransformedText::Transform(TextTransform::Capitalized, inner) => {
                format!("{}.capitalized", inner.generate_swift())
            }
            TransformedText::Text(value) => {
                let escaped = value
                    .replace('"', "\\\"")
                    .replace('\n', "\\n")
                    .replace('\r', "\\r")
                    .replace('\t', "\\t");
                format!("\"{}\"", escaped)
            }
        }
    }
}
