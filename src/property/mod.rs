//! Attribute value types beyond constraints
//!
//! Fonts, text transform pipelines, affine transformations, and action calls
//! share the constraint language's token stream but carry their own little
//! grammars. Each type pairs a `parse` entry with its serialized and
//! generated forms.

pub mod action;
pub mod font;
pub mod text;
pub mod transform;

pub use action::{ActionParameter, ViewAction};
pub use font::{Font, SystemFontWeight};
pub use text::{TextTransform, TransformedText};
pub use transform::{AffineTransformation, TransformationModifier};
