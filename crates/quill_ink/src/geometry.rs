//! Renderable stroke geometry

use quill_core::{Path, Rect};

use crate::ribbon::Ribbon;

/// Geometry handed to the renderer after each stroke update
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Geometry {
    /// Nothing to draw (also used to erase a cancelled preview)
    #[default]
    Empty,
    /// Filled, variable-width ink; fill with the nonzero rule
    Ribbon(Ribbon),
    /// Constant-width centerline; stroke it
    Centerline(Path),
}

impl Geometry {
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Empty => true,
            Geometry::Ribbon(ribbon) => ribbon.is_empty(),
            Geometry::Centerline(path) => path.is_empty(),
        }
    }

    /// Whether the geometry should be filled rather than stroked
    pub fn is_filled(&self) -> bool {
        matches!(self, Geometry::Ribbon(_))
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Geometry::Empty => Rect::ZERO,
            Geometry::Ribbon(ribbon) => ribbon.bounds(),
            Geometry::Centerline(path) => path.bounds(),
        }
    }

    /// The geometry as a single path
    pub fn to_path(&self) -> Path {
        match self {
            Geometry::Empty => Path::new(),
            Geometry::Ribbon(ribbon) => ribbon.to_path(),
            Geometry::Centerline(path) => path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ribbon::RibbonPrimitive;
    use quill_core::{Circle, Point};

    #[test]
    fn test_empty() {
        assert!(Geometry::Empty.is_empty());
        assert!(Geometry::Ribbon(Ribbon::new()).is_empty());
        assert!(Geometry::Centerline(Path::new()).is_empty());
        assert_eq!(Geometry::Empty.bounds(), Rect::ZERO);
        assert!(Geometry::Empty.to_path().is_empty());
    }

    #[test]
    fn test_ribbon_to_path() {
        let mut ribbon = Ribbon::new();
        ribbon.push(RibbonPrimitive::Cap(Circle::new(Point::new(0.0, 0.0), 1.0)));
        ribbon.push(RibbonPrimitive::quad([
            Point::new(0.0, 1.0),
            Point::new(4.0, 1.0),
            Point::new(4.0, -1.0),
            Point::new(0.0, -1.0),
        ]));
        let geometry = Geometry::Ribbon(ribbon);

        assert!(geometry.is_filled());
        // circle: move + 4 cubics + close, quad: move + 3 lines + close
        assert_eq!(geometry.to_path().len(), 11);
        assert_eq!(geometry.bounds(), Rect::new(-1.0, -1.0, 5.0, 2.0));
    }

    #[test]
    fn test_centerline() {
        let path = Path::line(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        let geometry = Geometry::Centerline(path.clone());

        assert!(!geometry.is_filled());
        assert_eq!(geometry.to_path(), path);
    }
}
