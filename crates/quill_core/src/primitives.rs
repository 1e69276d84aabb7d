//! Geometric primitives

use crate::geometry::Point;
use crate::path::Path;

/// A circle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub const fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Closed, counter-clockwise circle path
    pub fn to_path(&self) -> Path {
        Path::circle(self.center, self.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_to_path() {
        let c = Circle::new(Point::new(1.0, 1.0), 1.0);
        let path = c.to_path();
        assert_eq!(path.len(), 6); // move + 4 cubics + close
        assert_eq!(path.bounds().max, Point::new(2.0, 2.0));
    }
}
