//! Vector paths
//!
//! A `Path` is an ordered list of `PathCommand`s. Paths are the output
//! currency of the ink engine: ribbons become closed polygon and circle
//! subpaths, centerline strokes become open line/quadratic/cubic runs.

use crate::geometry::{Point, Rect};

/// Magic number for cubic Bézier circle approximation
const CIRCLE_KAPPA: f64 = 0.5522847498;

/// Path command for building vector paths
#[derive(Clone, Debug, PartialEq)]
pub enum PathCommand {
    /// Move to a point
    MoveTo(Point),
    /// Line to a point
    LineTo(Point),
    /// Quadratic Bézier curve
    QuadTo { control: Point, end: Point },
    /// Cubic Bézier curve
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    /// Close the current subpath
    Close,
}

impl PathCommand {
    /// End point of the command, if it has one
    pub fn end_point(&self) -> Option<Point> {
        match self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(*p),
            PathCommand::QuadTo { end, .. } | PathCommand::CubicTo { end, .. } => Some(*end),
            PathCommand::Close => None,
        }
    }
}

/// A vector path
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    /// Create a new empty path
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Move to a point
    pub fn move_to(mut self, p: Point) -> Self {
        self.push(PathCommand::MoveTo(p));
        self
    }

    /// Line to a point
    pub fn line_to(mut self, p: Point) -> Self {
        self.push(PathCommand::LineTo(p));
        self
    }

    /// Quadratic Bézier curve
    pub fn quad_to(mut self, control: Point, end: Point) -> Self {
        self.push(PathCommand::QuadTo { control, end });
        self
    }

    /// Cubic Bézier curve
    pub fn cubic_to(mut self, control1: Point, control2: Point, end: Point) -> Self {
        self.push(PathCommand::CubicTo {
            control1,
            control2,
            end,
        });
        self
    }

    /// Close the path
    pub fn close(mut self) -> Self {
        self.push(PathCommand::Close);
        self
    }

    /// Append a single command in place
    pub fn push(&mut self, command: PathCommand) {
        self.commands.push(command);
    }

    /// Append every command of `other` in place
    pub fn extend_from(&mut self, other: &Path) {
        self.commands.extend_from_slice(&other.commands);
    }

    /// Create a closed polygon through `points`
    ///
    /// Returns an empty path for an empty slice.
    pub fn polygon(points: &[Point]) -> Self {
        let Some((first, rest)) = points.split_first() else {
            return Self::new();
        };
        let mut path = Self::new().move_to(*first);
        for p in rest {
            path = path.line_to(*p);
        }
        path.close()
    }

    /// Create a circle path
    ///
    /// The circle is traced counter-clockwise in y-up orientation
    /// (+x, then +y), i.e. with positive signed area.
    pub fn circle(center: Point, radius: f64) -> Self {
        let k = CIRCLE_KAPPA;
        let r = radius;
        let cx = center.x;
        let cy = center.y;

        Self::new()
            .move_to(Point::new(cx + r, cy))
            .cubic_to(
                Point::new(cx + r, cy + r * k),
                Point::new(cx + r * k, cy + r),
                Point::new(cx, cy + r),
            )
            .cubic_to(
                Point::new(cx - r * k, cy + r),
                Point::new(cx - r, cy + r * k),
                Point::new(cx - r, cy),
            )
            .cubic_to(
                Point::new(cx - r, cy - r * k),
                Point::new(cx - r * k, cy - r),
                Point::new(cx, cy - r),
            )
            .cubic_to(
                Point::new(cx + r * k, cy - r),
                Point::new(cx + r, cy - r * k),
                Point::new(cx + r, cy),
            )
            .close()
    }

    /// Create a line path
    pub fn line(from: Point, to: Point) -> Self {
        Self::new().move_to(from).line_to(to)
    }

    /// Get the path commands
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Number of commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the path is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Last point the path moved, lined or curved to
    pub fn current_point(&self) -> Option<Point> {
        self.commands.iter().rev().find_map(PathCommand::end_point)
    }

    /// Calculate the bounding rectangle of this path
    ///
    /// Control points are included, so curved segments yield a conservative
    /// box.
    pub fn bounds(&self) -> Rect {
        let mut points = self.commands.iter().flat_map(|cmd| match cmd {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => vec![*p],
            PathCommand::QuadTo { control, end } => vec![*control, *end],
            PathCommand::CubicTo {
                control1,
                control2,
                end,
            } => vec![*control1, *control2, *end],
            PathCommand::Close => Vec::new(),
        });

        let Some(first) = points.next() else {
            return Rect::ZERO;
        };
        points.fold(Rect::from_points(first, first), |rect, p| {
            rect.expand_to_include(p)
        })
    }
}
