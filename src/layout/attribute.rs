//! Attribute and anchor lookup tables for the constraint language
//!
//! A layout attribute is the name a constraint is written under (`top`,
//! `before`, `centerX`). It determines three things the grammar cannot see
//! from the value alone: the anchor being constrained, the anchor assumed on
//! the target when none is written, and the sign applied to `inset(by:)`
//! amounts so insets always move inward.

use std::fmt;

use crate::error::ParseError;

/// A constrainable attribute of a view.
///
/// `before` and `after` describe horizontal adjacency: `before` constrains
/// this view's trailing edge against the target's leading edge, `after` the
/// mirror image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutAttribute {
    Top,
    Bottom,
    Leading,
    Trailing,
    Left,
    Right,
    Width,
    Height,
    Before,
    After,
    CenterX,
    CenterY,
    FirstBaseline,
    LastBaseline,
}

impl LayoutAttribute {
    /// Resolve an attribute name into the attributes it stands for.
    ///
    /// Combined names expand to several attributes; the constraint grammar
    /// then runs once per attribute over the same token stream.
    pub fn deserialize(name: &str) -> Result<Vec<LayoutAttribute>, ParseError> {
        let attributes = match name {
            "top" => vec![LayoutAttribute::Top],
            "bottom" => vec![LayoutAttribute::Bottom],
            "leading" => vec![LayoutAttribute::Leading],
            "trailing" => vec![LayoutAttribute::Trailing],
            "left" => vec![LayoutAttribute::Left],
            "right" => vec![LayoutAttribute::Right],
            "width" => vec![LayoutAttribute::Width],
            "height" => vec![LayoutAttribute::Height],
            "before" => vec![LayoutAttribute::Before],
            "after" => vec![LayoutAttribute::After],
            "centerX" => vec![LayoutAttribute::CenterX],
            "centerY" => vec![LayoutAttribute::CenterY],
            "firstBaseline" => vec![LayoutAttribute::FirstBaseline],
            "lastBaseline" => vec![LayoutAttribute::LastBaseline],
            "edges" => vec![
                LayoutAttribute::Left,
                LayoutAttribute::Right,
                LayoutAttribute::Top,
                LayoutAttribute::Bottom,
            ],
            "fillHorizontally" => vec![LayoutAttribute::Left, LayoutAttribute::Right],
            "fillVertically" => vec![LayoutAttribute::Top, LayoutAttribute::Bottom],
            "center" => vec![LayoutAttribute::CenterX, LayoutAttribute::CenterY],
            "size" => vec![LayoutAttribute::Width, LayoutAttribute::Height],
            _ => {
                return Err(ParseError::message(format!(
                    "unknown layout attribute '{}'",
                    name
                )))
            }
        };
        Ok(attributes)
    }

    /// The anchor this attribute constrains on its own view.
    pub fn anchor(&self) -> LayoutAnchor {
        match self {
            LayoutAttribute::Top => LayoutAnchor::Top,
            LayoutAttribute::Bottom => LayoutAnchor::Bottom,
            LayoutAttribute::Leading => LayoutAnchor::Leading,
            LayoutAttribute::Trailing => LayoutAnchor::Trailing,
            LayoutAttribute::Left => LayoutAnchor::Left,
            LayoutAttribute::Right => LayoutAnchor::Right,
            LayoutAttribute::Width => LayoutAnchor::Width,
            LayoutAttribute::Height => LayoutAnchor::Height,
            LayoutAttribute::Before => LayoutAnchor::Trailing,
            LayoutAttribute::After => LayoutAnchor::Leading,
            LayoutAttribute::CenterX => LayoutAnchor::CenterX,
            LayoutAttribute::CenterY => LayoutAnchor::CenterY,
            LayoutAttribute::FirstBaseline => LayoutAnchor::FirstBaseline,
            LayoutAttribute::LastBaseline => LayoutAnchor::LastBaseline,
        }
    }

    /// The anchor assumed on the target when the value does not name one.
    pub fn target_anchor(&self) -> LayoutAnchor {
        match self {
            LayoutAttribute::Before => LayoutAnchor::Leading,
            LayoutAttribute::After => LayoutAnchor::Trailing,
            attribute => attribute.anchor(),
        }
    }

    /// Sign applied to `inset(by:)` amounts for this attribute.
    pub fn inset_direction(&self) -> f64 {
        match self {
            LayoutAttribute::Trailing
            | LayoutAttribute::Right
            | LayoutAttribute::Bottom
            | LayoutAttribute::Before => -1.0,
            _ => 1.0,
        }
    }

    /// The attribute's own serialized name.
    pub fn name(&self) -> &'static str {
        match self {
            LayoutAttribute::Top => "top",
            LayoutAttribute::Bottom => "bottom",
            LayoutAttribute::Leading => "leading",
            LayoutAttribute::Trailing => "trailing",
            LayoutAttribute::Left => "left",
            LayoutAttribute::Right => "right",
            LayoutAttribute::Width => "width",
            LayoutAttribute::Height => "height",
            LayoutAttribute::Before => "before",
            LayoutAttribute::After => "after",
            LayoutAttribute::CenterX => "centerX",
            LayoutAttribute::CenterY => "centerY",
            LayoutAttribute::FirstBaseline => "firstBaseline",
            LayoutAttribute::LastBaseline => "lastBaseline",
        }
    }
}

impl fmt::Display for LayoutAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named layout anchor as it appears after a `.` in a target clause and in
/// generated builder calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutAnchor {
    Top,
    Bottom,
    Leading,
    Trailing,
    Left,
    Right,
    Width,
    Height,
    CenterX,
    CenterY,
    FirstBaseline,
    LastBaseline,
    Size,
}

impl LayoutAnchor {
    pub fn parse(name: &str) -> Result<LayoutAnchor, ParseError> {
        let anchor = match name {
            "top" => LayoutAnchor::Top,
            "bottom" => LayoutAnchor::Bottom,
            "leading" => LayoutAnchor::Leading,
            "trailing" => LayoutAnchor::Trailing,
            "left" => LayoutAnchor::Left,
            "right" => LayoutAnchor::Right,
            "width" => LayoutAnchor::Width,
            "height" => LayoutAnchor::Height,
            "centerX" => LayoutAnchor::CenterX,
            "centerY" => LayoutAnchor::CenterY,
            "firstBaseline" => LayoutAnchor::FirstBaseline,
            "lastBaseline" => LayoutAnchor::LastBaseline,
            "size" => LayoutAnchor::Size,
            _ => {
                return Err(ParseError::message(format!("unknown anchor '{}'", name)));
            }
        };
        Ok(anchor)
    }

    pub fn name(&self) -> &'static str {
        match self {
            LayoutAnchor::Top => "top",
            LayoutAnchor::Bottom => "bottom",
            LayoutAnchor::Leading => "leading",
            LayoutAnchor::Trailing => "trailing",
            LayoutAnchor::Left => "left",
            LayoutAnchor::Right => "right",
            LayoutAnchor::Width => "width",
            LayoutAnchor::Height => "height",
            LayoutAnchor::CenterX => "centerX",
            LayoutAnchor::CenterY => "centerY",
            LayoutAnchor::FirstBaseline => "firstBaseline",
            LayoutAnchor::LastBaseline => "lastBaseline",
            LayoutAnchor::Size => "size",
        }
    }
}

impl fmt::Display for LayoutAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_single_attribute() {
        assert_eq!(
            LayoutAttribute::deserialize("top").unwrap(),
            vec![LayoutAttribute::Top]
        );
        assert_eq!(
            LayoutAttribute::deserialize("centerX").unwrap(),
            vec![LayoutAttribute::CenterX]
        );
    }

    #[test]
    fn test_deserialize_combined_attributes() {
        assert_eq!(
            LayoutAttribute::deserialize("edges").unwrap(),
            vec![
                LayoutAttribute::Left,
                LayoutAttribute::Right,
                LayoutAttribute::Top,
                LayoutAttribute::Bottom,
            ]
        );
        assert_eq!(
            LayoutAttribute::deserialize("center").unwrap(),
            vec![LayoutAttribute::CenterX, LayoutAttribute::CenterY]
        );
        assert_eq!(
            LayoutAttribute::deserialize("size").unwrap(),
            vec![LayoutAttribute::Width, LayoutAttribute::Height]
        );
    }

    #[test]
    fn test_deserialize_unknown_attribute() {
        assert!(LayoutAttribute::deserialize("middle").is_err());
    }

    #[test]
    fn test_adjacency_anchors() {
        assert_eq!(LayoutAttribute::Before.anchor(), LayoutAnchor::Trailing);
        assert_eq!(
            LayoutAttribute::Before.target_anchor(),
            LayoutAnchor::Leading
        );
        assert_eq!(LayoutAttribute::After.anchor(), LayoutAnchor::Leading);
        assert_eq!(
            LayoutAttribute::After.target_anchor(),
            LayoutAnchor::Trailing
        );
    }

    #[test]
    fn test_inset_direction_signs() {
        assert_eq!(LayoutAttribute::Top.inset_direction(), 1.0);
        assert_eq!(LayoutAttribute::Left.inset_direction(), 1.0);
        assert_eq!(LayoutAttribute::Leading.inset_direction(), 1.0);
        assert_eq!(LayoutAttribute::Bottom.inset_direction(), -1.0);
        assert_eq!(LayoutAttribute::Right.inset_direction(), -1.0);
        assert_eq!(LayoutAttribute::Trailing.inset_direction(), -1.0);
        assert_eq!(LayoutAttribute::Before.inset_direction(), -1.0);
        assert_eq!(LayoutAttribute::After.inset_direction(), 1.0);
    }

    #[test]
    fn test_anchor_parse() {
        assert_eq!(
            LayoutAnchor::parse("bottom").unwrap(),
            LayoutAnchor::Bottom
        );
        assert_eq!(
            LayoutAnchor::parse("centerY").unwrap(),
            LayoutAnchor::CenterY
        );
        assert!(LayoutAnchor::parse("middle").is_err());
    }
}
