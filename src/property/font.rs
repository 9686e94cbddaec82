//! Font values: system fonts by weight or named fonts, with a point size

use crate::error::ParseError;
use crate::format::format_number;
use crate::lexer::tokenize_with_whitespace;
use crate::parser::font::FontParser;
use crate::parser::Parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemFontWeight {
    Ultralight,
    Thin,
    Light,
    Regular,
    Medium,
    Semibold,
    Bold,
    Heavy,
    Black,
}

impl SystemFontWeight {
    pub fn parse(name: &str) -> Option<SystemFontWeight> {
        let weight = match name {
            "ultralight" => SystemFontWeight::Ultralight,
            "thin" => SystemFontWeight::Thin,
            "light" => SystemFontWeight::Light,
            "regular" => SystemFontWeight::Regular,
            "medium" => SystemFontWeight::Medium,
            "semibold" => SystemFontWeight::Semibold,
            "bold" => SystemFontWeight::Bold,
            "heavy" => SystemFontWeight::Heavy,
            "black" => SystemFontWeight::Black,
            _ => return None,
        };
        Some(weight)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SystemFontWeight::Ultralight => "ultralight",
            SystemFontWeight::Thin => "thin",
            SystemFontWeight::Light => "light",
            SystemFontWeight::Regular => "regular",
            SystemFontWeight::Medium => "medium",
            SystemFontWeight::Semibold => "semibold",
            SystemFontWeight::Bold => "bold",
            SystemFontWeight::Heavy => "heavy",
            SystemFontWeight::Black => "black",
        }
    }

    /// The UIKit constant backing this weight in generated source.
    pub fn swift_constant(&self) -> &'static str {
        match self {
            SystemFontWeight::Ultralight => "UIFont.Weight.ultraLight",
            SystemFontWeight::Thin => "UIFont.Weight.thin",
            SystemFontWeight::Light => "UIFont.Weight.light",
            SystemFontWeight::Regular => "UIFont.Weight.regular",
            SystemFontWeight::Medium => "UIFont.Weight.medium",
            SystemFontWeight::Semibold => "UIFont.Weight.semibold",
            SystemFontWeight::Bold => "UIFont.Weight.bold",
            SystemFontWeight::Heavy => "UIFont.Weight.heavy",
            SystemFontWeight::Black => "UIFont.Weight.black",
        }
    }
}

/// A font attribute value.
///
/// `:bold@20` is the system bold font at 20 points, a bare `17` the system
/// regular font at 17 points, and anything else a named font, optionally
/// sized with a trailing `@size`.
#[derive(Debug, Clone, PartialEq)]
pub enum Font {
    System { weight: SystemFontWeight, size: f64 },
    Named(String, f64),
}

impl Font {
    /// Point size applied when a descriptor omits the `@size` clause.
    pub const DEFAULT_SIZE: f64 = 15.0;

    pub fn parse(value: &str) -> Result<Font, ParseError> {
        FontParser::new(tokenize_with_whitespace(value)).parse_single()
    }

    pub fn serialize(&self) -> String {
        match self {
            Font::System { weight, size } => {
                format!(":{}@{}", weight.name(), format_number(*size))
            }
            Font::Named(name, size) => format!("{}@{}", name, format_number(*size)),
        }
    }

    pub fn generate_swift(&self) -> String {
        match self {
            Font::System { weight, size } => format!(
                "UIFont.systemFont(ofSize: {}, weight: {})",
                format_number(*size),
                weight.swift_constant()
            ),
            Font::Named(name, size) => {
                format!("UIFont(name: \"{}\", size: {})", name, format_number(*size))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_names_round_trip() {
        for weight in [
            SystemFontWeight::Ultralight,
            SystemFontWeight::Thin,
            SystemFontWeight::Light,
            SystemFontWeight::Regular,
            SystemFontWeight::Medium,
            SystemFontWeight::Semibold,
            SystemFontWeight::Bold,
            SystemFontWeight::Heavy,
            SystemFontWeight::Black,
        ] {
            assert_eq!(SystemFontWeight::parse(weight.name()), Some(weight));
        }
        assert_eq!(SystemFontWeight::parse("chunky"), None);
    }

    #[test]
    fn test_serialize_forms() {
        let system = Font::System {
            weight: SystemFontWeight::Bold,
            size: 20.0,
        };
        assert_eq!(system.serialize(), ":bold@20");

        let named = Font::Named("AvenirNext-Regular".to_string(), 17.0);
        assert_eq!(named.serialize(), "AvenirNext-Regular@17");
    }

    #[test]
    fn test_generate_swift_forms() {
        let system = Font::System {
            weight: SystemFontWeight::Ultralight,
            size: 15.0,
        };
        assert_eq!(
            system.generate_swift(),
            "UIFont.systemFont(ofSize: 15, weight: UIFont.Weight.ultraLight)"
        );

        let named = Font::Named("Menlo".to_string(), 13.0);
        assert_eq!(named.generate_swift(), "UIFont(name: \"Menlo\", size: 13)");
    }
}
