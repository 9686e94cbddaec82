//! Shortcut compression for serialized constraints
//!
//! Serialization prefers combined attribute names: four edge constraints
//! sharing a value become one `edges` attribute. A shortcut claims its
//! attribute set as soon as every member is present; claimed constraints
//! either collapse into the shortcut or serialize individually, so a set
//! claimed by `edges` never feeds the fill shortcuts.

use crate::layout::attribute::LayoutAttribute;
use crate::layout::constraint::Constraint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConstraintShortcut {
    Edges,
    FillHorizontally,
    FillVertically,
    Center,
    Before,
    After,
}

impl ConstraintShortcut {
    /// Detection order. Larger sets come first so `edges` outranks the fills.
    const ALL: [ConstraintShortcut; 6] = [
        ConstraintShortcut::Edges,
        ConstraintShortcut::FillHorizontally,
        ConstraintShortcut::FillVertically,
        ConstraintShortcut::Center,
        ConstraintShortcut::Before,
        ConstraintShortcut::After,
    ];

    fn attributes(&self) -> &'static [LayoutAttribute] {
        match self {
            ConstraintShortcut::Edges => &[
                LayoutAttribute::Left,
                LayoutAttribute::Right,
                LayoutAttribute::Top,
                LayoutAttribute::Bottom,
            ],
            ConstraintShortcut::FillHorizontally => {
                &[LayoutAttribute::Left, LayoutAttribute::Right]
            }
            ConstraintShortcut::FillVertically => {
                &[LayoutAttribute::Top, LayoutAttribute::Bottom]
            }
            ConstraintShortcut::Center => &[LayoutAttribute::CenterX, LayoutAttribute::CenterY],
            ConstraintShortcut::Before => &[LayoutAttribute::Before],
            ConstraintShortcut::After => &[LayoutAttribute::After],
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ConstraintShortcut::Edges => "edges",
            ConstraintShortcut::FillHorizontally => "fillHorizontally",
            ConstraintShortcut::FillVertically => "fillVertically",
            ConstraintShortcut::Center => "center",
            ConstraintShortcut::Before => "before",
            ConstraintShortcut::After => "after",
        }
    }
}

/// One serialized attribute: a collapsed shortcut or a lone constraint.
#[derive(Debug, Clone)]
pub(crate) enum ShortcutOrConstraint {
    Shortcut(ConstraintShortcut, Constraint),
    Constraint(Constraint),
}

impl ShortcutOrConstraint {
    pub(crate) fn detect(constraints: &[Constraint]) -> Vec<ShortcutOrConstraint> {
        let mut remaining: Vec<Constraint> = constraints.to_vec();
        let mut result = Vec::new();

        for shortcut in ConstraintShortcut::ALL {
            let attributes = shortcut.attributes();
            let count = remaining
                .iter()
                .filter(|constraint| attributes.contains(&constraint.attribute))
                .count();
            if count != attributes.len() {
                continue;
            }

            let mut candidates = Vec::with_capacity(count);
            let mut kept = Vec::with_capacity(remaining.len() - count);
            for constraint in remaining {
                if attributes.contains(&constraint.attribute) {
                    candidates.push(constraint);
                } else {
                    kept.push(constraint);
                }
            }
            remaining = kept;

            for (_, group) in group_by_value(candidates) {
                if covers(attributes, &group) {
                    if let Some(first) = group.into_iter().next() {
                        result.push(ShortcutOrConstraint::Shortcut(shortcut, first));
                    }
                } else {
                    result.extend(group.into_iter().map(ShortcutOrConstraint::Constraint));
                }
            }
        }

        result.extend(remaining.into_iter().map(ShortcutOrConstraint::Constraint));
        result
    }

    pub(crate) fn serialize(&self) -> (String, String) {
        match self {
            ShortcutOrConstraint::Shortcut(shortcut, constraint) => {
                let (_, value) = constraint.serialize();
                (shortcut.name().to_string(), value)
            }
            ShortcutOrConstraint::Constraint(constraint) => constraint.serialize(),
        }
    }
}

/// Group by serialized value, keeping first-seen order.
fn group_by_value(constraints: Vec<Constraint>) -> Vec<(String, Vec<Constraint>)> {
    let mut groups: Vec<(String, Vec<Constraint>)> = Vec::new();
    for constraint in constraints {
        let (_, value) = constraint.serialize();
        match groups.iter().position(|(existing, _)| *existing == value) {
            Some(index) => groups[index].1.push(constraint),
            None => groups.push((value, vec![constraint])),
        }
    }
    groups
}

fn covers(attributes: &[LayoutAttribute], group: &[Constraint]) -> bool {
    attributes
        .iter()
        .all(|attribute| group.iter().any(|constraint| constraint.attribute == *attribute))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constraints(pairs: &[(&str, &str)]) -> Vec<Constraint> {
        pairs
            .iter()
            .flat_map(|(name, value)| Constraint::parse(name, value).unwrap())
            .collect()
    }

    fn serialized(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        ShortcutOrConstraint::detect(&constraints(pairs))
            .iter()
            .map(|entry| entry.serialize())
            .collect()
    }

    fn owned(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_equal_edges_collapse() {
        assert_eq!(
            serialized(&[
                ("left", "super"),
                ("right", "super"),
                ("top", "super"),
                ("bottom", "super"),
            ]),
            owned(&[("edges", "super")])
        );
    }

    #[test]
    fn test_edges_with_one_deviation_stay_individual() {
        assert_eq!(
            serialized(&[
                ("left", "super"),
                ("right", "super"),
                ("top", "super"),
                ("bottom", "header"),
            ]),
            owned(&[
                ("left", "super"),
                ("right", "super"),
                ("top", "super"),
                ("bottom", "header"),
            ])
        );
    }

    #[test]
    fn test_claimed_edges_do_not_feed_fill_shortcuts() {
        assert_eq!(
            serialized(&[
                ("left", "super"),
                ("right", "super"),
                ("top", "super offset(by: 10)"),
                ("bottom", "super offset(by: 10)"),
            ]),
            owned(&[
                ("left", "super"),
                ("right", "super"),
                ("top", "super offset(by: 10)"),
                ("bottom", "super offset(by: 10)"),
            ])
        );
    }

    #[test]
    fn test_fill_horizontally_collapses_without_full_edges() {
        assert_eq!(
            serialized(&[("left", "super"), ("right", "super"), ("width", "100")]),
            owned(&[("fillHorizontally", "super"), ("width", "100")])
        );
    }

    #[test]
    fn test_center_collapses() {
        assert_eq!(
            serialized(&[("centerX", "super"), ("centerY", "super")]),
            owned(&[("center", "super")])
        );
    }

    #[test]
    fn test_adjacency_shortcuts_keep_their_names() {
        assert_eq!(
            serialized(&[("before", "label"), ("after", "icon")]),
            owned(&[("before", "label"), ("after", "icon")])
        );
    }

    #[test]
    fn test_duplicate_attribute_defeats_the_claim() {
        assert_eq!(
            serialized(&[("top", "super"), ("top", "100"), ("bottom", "super")]),
            owned(&[("top", "super"), ("top", "100"), ("bottom", "super")])
        );
    }
}
