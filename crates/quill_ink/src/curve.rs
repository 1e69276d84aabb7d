//! Centerline builders
//!
//! `CurveBuilder` smooths noisy input into a chain of cubic Béziers for the
//! interpolated style. It keeps a tiny rolling buffer of points: whenever
//! more than four are buffered, the fourth is replaced by the midpoint of
//! its neighbours and a cubic through the buffered controls is committed.
//! Replacing the joint with a midpoint keeps consecutive cubics tangent
//! continuous. The curve passes near, not through, the input points, except
//! for the first and the last one.
//!
//! `PolylineBuilder` is the basic style: straight lines through every
//! accepted point.

use quill_core::{Path, PathCommand, Point};
use smallvec::SmallVec;
use tracing::trace;

/// Rolling cubic smoother for one stroke
#[derive(Clone, Debug, Default)]
pub struct CurveBuilder {
    points: SmallVec<[Point; 5]>,
    committed: Path,
    /// Tail from the last committed point through the buffered points
    preview: Option<PathCommand>,
    finished: bool,
}

impl CurveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next accepted point
    pub fn push(&mut self, point: Point) {
        if self.committed.is_empty() {
            self.committed.push(PathCommand::MoveTo(point));
        }
        self.points.push(point);

        while self.points.len() > 4 {
            self.points[3] = self.points[2].midpoint(self.points[4]);
            self.committed.push(PathCommand::CubicTo {
                control1: self.points[1],
                control2: self.points[2],
                end: self.points[3],
            });
            self.points.drain(..3);
            self.preview = None;
            trace!(commands = self.committed.len(), "committed curve segment");
        }

        // points[0] is always the committed path's current point
        self.preview = match self.points.as_slice() {
            [_, end] => Some(PathCommand::LineTo(*end)),
            [_, control, end] => Some(PathCommand::QuadTo {
                control: *control,
                end: *end,
            }),
            [_, control1, control2, end] => Some(PathCommand::CubicTo {
                control1: *control1,
                control2: *control2,
                end: *end,
            }),
            _ => None,
        };
    }

    /// Flush the preview tail into the committed curve
    pub fn finish(&mut self) {
        if self.finished {
            return;
        }
        if let Some(tail) = self.preview.take() {
            self.committed.push(tail);
        }
        self.finished = true;
    }

    /// Committed curve only
    pub fn committed(&self) -> &Path {
        &self.committed
    }

    pub fn preview(&self) -> Option<&PathCommand> {
        self.preview.as_ref()
    }

    /// Committed curve followed by the preview tail
    pub fn path(&self) -> Path {
        let mut path = self.committed.clone();
        if let Some(tail) = &self.preview {
            path.push(tail.clone());
        }
        path
    }
}

/// Straight polyline through every point
#[derive(Clone, Debug, Default)]
pub struct PolylineBuilder {
    path: Path,
}

impl PolylineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: Point) {
        let command = if self.path.is_empty() {
            PathCommand::MoveTo(point)
        } else {
            PathCommand::LineTo(point)
        };
        self.path.push(command);
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyon::geom::{point, CubicBezierSegment};

    fn feed(points: &[(f64, f64)]) -> CurveBuilder {
        let mut builder = CurveBuilder::new();
        for &(x, y) in points {
            builder.push(Point::new(x, y));
        }
        builder
    }

    fn as_cubic(start: Point, command: &PathCommand) -> CubicBezierSegment<f64> {
        let PathCommand::CubicTo {
            control1,
            control2,
            end,
        } = command
        else {
            panic!("expected a cubic, got {command:?}");
        };
        CubicBezierSegment {
            from: point(start.x, start.y),
            ctrl1: point(control1.x, control1.y),
            ctrl2: point(control2.x, control2.y),
            to: point(end.x, end.y),
        }
    }

    #[test]
    fn test_preview_grows_with_buffer() {
        let mut builder = feed(&[(0.0, 0.0)]);
        assert!(builder.preview().is_none());
        assert_eq!(builder.path().len(), 1);

        builder.push(Point::new(1.0, 1.0));
        assert!(matches!(builder.preview(), Some(PathCommand::LineTo(_))));

        builder.push(Point::new(2.0, 0.0));
        assert!(matches!(builder.preview(), Some(PathCommand::QuadTo { .. })));

        builder.push(Point::new(3.0, 1.0));
        assert!(matches!(builder.preview(), Some(PathCommand::CubicTo { .. })));

        // nothing committed beyond the initial move yet
        assert_eq!(builder.committed().len(), 1);
    }

    #[test]
    fn test_fifth_point_commits_cubic_to_midpoint() {
        let builder = feed(&[(0.0, 0.0), (1.0, 2.0), (2.0, 2.0), (3.0, 0.0), (5.0, 0.0)]);
        let committed = builder.committed().commands();

        assert_eq!(committed.len(), 2);
        assert_eq!(
            committed[1],
            PathCommand::CubicTo {
                control1: Point::new(1.0, 2.0),
                control2: Point::new(2.0, 2.0),
                // midpoint of (2,2) and (5,0)
                end: Point::new(3.5, 1.0),
            }
        );
        assert_eq!(builder.preview(), Some(&PathCommand::LineTo(Point::new(5.0, 0.0))));
    }

    #[test]
    fn test_collinear_input_reduces_to_straight_line() {
        let mut builder = feed(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (4.0, 0.0)]);
        builder.finish();

        let commands = builder.committed().commands();
        assert_eq!(commands[0], PathCommand::MoveTo(Point::new(0.0, 0.0)));
        assert_eq!(commands.last(), Some(&PathCommand::LineTo(Point::new(4.0, 0.0))));
        assert!(builder.committed().bounds().height() == 0.0);

        // evenly spaced controls: x(t) = 3t, so the curve is a uniformly
        // parameterized segment of the line y = 0
        let cubic = as_cubic(Point::ZERO, &commands[1]);
        let mid = cubic.sample(0.5);
        assert_eq!((mid.x, mid.y), (1.5, 0.0));

        // arc-length midpoint of the whole finished path, cubic then line
        assert_eq!(commands.len(), 3);
        let PathCommand::LineTo(end) = commands[2] else {
            panic!("expected the closing line, got {:?}", commands[2]);
        };
        let mut points: Vec<Point> = (0..=1000)
            .map(|i| {
                let p = cubic.sample(i as f64 / 1000.0);
                Point::new(p.x, p.y)
            })
            .collect();
        points.push(end);
        let total: f64 = points.windows(2).map(|w| w[0].distance(w[1])).sum();
        assert!((total - 4.0).abs() < 1e-9);

        let mut remaining = total / 2.0;
        let mut mid = Point::ZERO;
        for w in points.windows(2) {
            let length = w[0].distance(w[1]);
            if remaining <= length {
                mid = w[0] + (w[1] - w[0]) * (remaining / length);
                break;
            }
            remaining -= length;
        }
        assert!(mid.distance(Point::new(2.0, 0.0)) < 1e-9, "midpoint {mid:?}");
    }

    #[test]
    fn test_endpoints_are_exact() {
        let input = [
            (0.0, 0.0),
            (2.0, 3.0),
            (4.0, -1.0),
            (6.0, 2.0),
            (8.0, 0.5),
            (9.0, 4.0),
            (11.0, 1.0),
        ];
        let mut builder = feed(&input);
        builder.finish();

        let path = builder.path();
        assert_eq!(path.commands()[0], PathCommand::MoveTo(Point::new(0.0, 0.0)));
        assert_eq!(path.current_point(), Some(Point::new(11.0, 1.0)));
        assert!(builder.preview().is_none());
    }

    #[test]
    fn test_finish_is_idempotent() {
        let mut builder = feed(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        builder.finish();
        let once = builder.path();
        builder.finish();

        assert_eq!(builder.path(), once);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn test_polyline() {
        let mut builder = PolylineBuilder::new();
        assert!(builder.path().is_empty());

        builder.push(Point::new(0.0, 0.0));
        builder.push(Point::new(1.0, 0.0));
        builder.push(Point::new(1.0, 1.0));

        assert_eq!(
            builder.path().commands(),
            &[
                PathCommand::MoveTo(Point::new(0.0, 0.0)),
                PathCommand::LineTo(Point::new(1.0, 0.0)),
                PathCommand::LineTo(Point::new(1.0, 1.0)),
            ]
        );
    }
}
