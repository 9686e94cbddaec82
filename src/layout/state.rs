//! Trait snapshot queried by the condition evaluator
//!
//! A snapshot is immutable; the live layer builds a fresh one per trait
//! change notification and re-evaluates the affected conditions.

use std::fmt;

/// Device idiom bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceIdiom {
    Pad,
    Phone,
    Tv,
    CarPlay,
    Unspecified,
}

impl fmt::Display for InterfaceIdiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InterfaceIdiom::Pad => "pad",
            InterfaceIdiom::Phone => "phone",
            InterfaceIdiom::Tv => "tv",
            InterfaceIdiom::CarPlay => "carPlay",
            InterfaceIdiom::Unspecified => "unspecified",
        };
        f.write_str(name)
    }
}

/// Coarse description of the space available along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceSizeClass {
    Compact,
    Regular,
    Unspecified,
}

impl fmt::Display for InterfaceSizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InterfaceSizeClass::Compact => "compact",
            InterfaceSizeClass::Regular => "regular",
            InterfaceSizeClass::Unspecified => "unspecified",
        };
        f.write_str(name)
    }
}

/// Axis a size class applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeClassType {
    Horizontal,
    Vertical,
}

impl fmt::Display for SizeClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SizeClassType::Horizontal => "horizontal",
            SizeClassType::Vertical => "vertical",
        };
        f.write_str(name)
    }
}

/// Root-view dimension selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionType {
    Width,
    Height,
}

impl fmt::Display for DimensionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DimensionType::Width => "width",
            DimensionType::Height => "height",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewOrientation {
    Landscape,
    Portrait,
}

impl ViewOrientation {
    /// A view wider than tall is landscape, everything else portrait.
    pub fn from_dimensions(width: f64, height: f64) -> ViewOrientation {
        if width > height {
            ViewOrientation::Landscape
        } else {
            ViewOrientation::Portrait
        }
    }
}

impl fmt::Display for ViewOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewOrientation::Landscape => "landscape",
            ViewOrientation::Portrait => "portrait",
        };
        f.write_str(name)
    }
}

/// Read-only view of the traits a condition can observe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterfaceState {
    pub interface_idiom: InterfaceIdiom,
    pub horizontal_size_class: InterfaceSizeClass,
    pub vertical_size_class: InterfaceSizeClass,
    /// Root view width and height in points.
    pub root_dimensions: (f64, f64),
}

impl InterfaceState {
    pub fn new(
        interface_idiom: InterfaceIdiom,
        horizontal_size_class: InterfaceSizeClass,
        vertical_size_class: InterfaceSizeClass,
        root_dimensions: (f64, f64),
    ) -> InterfaceState {
        InterfaceState {
            interface_idiom,
            horizontal_size_class,
            vertical_size_class,
            root_dimensions,
        }
    }

    pub fn view_orientation(&self) -> ViewOrientation {
        ViewOrientation::from_dimensions(self.root_dimensions.0, self.root_dimensions.1)
    }

    pub fn size_class(&self, axis: SizeClassType) -> InterfaceSizeClass {
        match axis {
            SizeClassType::Horizontal => self.horizontal_size_class,
            SizeClassType::Vertical => self.vertical_size_class,
        }
    }

    pub fn root_dimension(&self, dimension: DimensionType) -> f64 {
        match dimension {
            DimensionType::Width => self.root_dimensions.0,
            DimensionType::Height => self.root_dimensions.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_from_dimensions() {
        assert_eq!(
            ViewOrientation::from_dimensions(1024.0, 768.0),
            ViewOrientation::Landscape
        );
        assert_eq!(
            ViewOrientation::from_dimensions(375.0, 667.0),
            ViewOrientation::Portrait
        );
        // A square view counts as portrait.
        assert_eq!(
            ViewOrientation::from_dimensions(500.0, 500.0),
            ViewOrientation::Portrait
        );
    }

    #[test]
    fn test_state_accessors() {
        let state = InterfaceState::new(
            InterfaceIdiom::Pad,
            InterfaceSizeClass::Regular,
            InterfaceSizeClass::Compact,
            (1024.0, 768.0),
        );
        assert_eq!(state.view_orientation(), ViewOrientation::Landscape);
        assert_eq!(
            state.size_class(SizeClassType::Horizontal),
            InterfaceSizeClass::Regular
        );
        assert_eq!(
            state.size_class(SizeClassType::Vertical),
            InterfaceSizeClass::Compact
        );
        assert_eq!(state.root_dimension(DimensionType::Width), 1024.0);
        assert_eq!(state.root_dimension(DimensionType::Height), 768.0);
    }
}
