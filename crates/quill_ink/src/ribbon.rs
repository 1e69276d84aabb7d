//! Variable-width ribbon construction
//!
//! Fountain and Calligraphy strokes are rendered as filled ribbons: one
//! quadrilateral per segment whose side walls are offset from the samples by
//! a scaled unit vector. The two styles differ only in where that vector
//! comes from:
//!
//! - **Fountain** uses the path normal (averaged with the neighbouring
//!   segments) and adds round caps, so the ribbon follows the pen like a
//!   felt tip.
//! - **Calligraphy** uses the pen azimuth rotated by 90°, so the nib keeps
//!   its orientation relative to the hand regardless of stroke direction.
//!
//! The primitives are not merged into a single outline. Every primitive is
//! emitted as a simple closed subpath with positive winding, so a nonzero
//! fill of the overlapping primitives paints exactly their union. Side walls
//! that cross themselves (the pen doubling back) are cut at the crossing into
//! two triangles; a bow-tie quad would keep one lobe at winding -1 and punch
//! a hole into whatever it overlaps.
//!
//! # Incremental building
//!
//! The builder is fed one sample at a time. A segment is *committed* once
//! nothing that arrives later can change it; the trailing, still-open
//! segment is recomputed as a *preview* on demand. Committed geometry is
//! append-only, so reading the ribbon never mutates the builder.

use quill_core::{Circle, Path, Point, Rect, Vec2};
use smallvec::SmallVec;
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2};
use tracing::{trace, warn};

use crate::sample::Sample;
use crate::segment::{StrokeSegment, DEGENERATE_NORMAL};
use crate::width::WidthTransform;

// ─────────────────────────────────────────────────────────────────────────────
// Primitives
// ─────────────────────────────────────────────────────────────────────────────

/// One filled piece of a ribbon
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RibbonPrimitive {
    /// Side walls of one segment: `from+n, to+n, to-n, from-n`
    Quad([Point; 4]),
    /// One lobe of self-crossing side walls
    Triangle([Point; 3]),
    /// Round stroke end
    Cap(Circle),
}

/// Pieces of one segment's side walls
pub type Walls = SmallVec<[RibbonPrimitive; 2]>;

impl RibbonPrimitive {
    /// Quad with positive signed area (vertex order reversed if needed).
    ///
    /// Only valid for simple quads; use [`RibbonPrimitive::walls`] when the
    /// edges may cross.
    pub fn quad(vertices: [Point; 4]) -> Self {
        if signed_area(&vertices) < 0.0 {
            let [a, b, c, d] = vertices;
            RibbonPrimitive::Quad([d, c, b, a])
        } else {
            RibbonPrimitive::Quad(vertices)
        }
    }

    /// Triangle with positive signed area
    pub fn triangle(vertices: [Point; 3]) -> Self {
        if signed_area(&vertices) < 0.0 {
            let [a, b, c] = vertices;
            RibbonPrimitive::Triangle([c, b, a])
        } else {
            RibbonPrimitive::Triangle(vertices)
        }
    }

    /// Side walls `a, b, c, d` as simple positively wound pieces.
    ///
    /// A quad whose opposite edges cross is split at the crossing point into
    /// its two lobes.
    pub fn walls(vertices: [Point; 4]) -> Walls {
        let [a, b, c, d] = vertices;
        let mut walls = Walls::new();
        if let Some(x) = edge_crossing(a, b, c, d) {
            walls.push(Self::triangle([a, x, d]));
            walls.push(Self::triangle([x, b, c]));
        } else if let Some(x) = edge_crossing(b, c, d, a) {
            walls.push(Self::triangle([a, b, x]));
            walls.push(Self::triangle([x, c, d]));
        } else {
            walls.push(Self::quad(vertices));
        }
        walls
    }

    pub fn to_path(&self) -> Path {
        match self {
            RibbonPrimitive::Quad(vertices) => Path::polygon(vertices),
            RibbonPrimitive::Triangle(vertices) => Path::polygon(vertices),
            RibbonPrimitive::Cap(circle) => circle.to_path(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            RibbonPrimitive::Quad(vertices) => polygon_bounds(vertices),
            RibbonPrimitive::Triangle(vertices) => polygon_bounds(vertices),
            RibbonPrimitive::Cap(circle) => {
                let r = Vec2::new(circle.radius, circle.radius);
                Rect::from_points(circle.center - r, circle.center + r)
            }
        }
    }
}

fn polygon_bounds(vertices: &[Point]) -> Rect {
    let Some((first, rest)) = vertices.split_first() else {
        return Rect::ZERO;
    };
    rest.iter()
        .fold(Rect::from_points(*first, *first), |r, p| r.expand_to_include(*p))
}

/// Interior crossing point of segments `p1-p2` and `q1-q2`.
///
/// Touching endpoints and parallel (including collinear) segments do not
/// count.
fn edge_crossing(p1: Point, p2: Point, q1: Point, q2: Point) -> Option<Point> {
    let r = p2 - p1;
    let s = q2 - q1;
    let denom = r.cross(s);
    if denom.abs() <= f64::EPSILON * r.length() * s.length() {
        return None;
    }
    let qp = q1 - p1;
    let t = qp.cross(s) / denom;
    let u = qp.cross(r) / denom;
    (t > 0.0 && t < 1.0 && u > 0.0 && u < 1.0).then(|| p1 + r * t)
}

/// Shoelace signed area, positive for counter-clockwise in y-up orientation
fn signed_area(vertices: &[Point]) -> f64 {
    let n = vertices.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice / 2.0
}

/// Ordered union of ribbon primitives
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ribbon {
    primitives: Vec<RibbonPrimitive>,
}

impl Ribbon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, primitive: RibbonPrimitive) {
        self.primitives.push(primitive);
    }

    pub fn extend(&mut self, primitives: impl IntoIterator<Item = RibbonPrimitive>) {
        self.primitives.extend(primitives);
    }

    pub fn primitives(&self) -> &[RibbonPrimitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Number of round caps
    pub fn cap_count(&self) -> usize {
        self.primitives
            .iter()
            .filter(|p| matches!(p, RibbonPrimitive::Cap(_)))
            .count()
    }

    pub fn bounds(&self) -> Rect {
        let mut iter = self.primitives.iter().map(RibbonPrimitive::bounds);
        match iter.next() {
            Some(first) => iter.fold(first, |acc, r| acc.union(&r)),
            None => Rect::ZERO,
        }
    }

    /// Every primitive as a closed subpath, for nonzero filling
    pub fn to_path(&self) -> Path {
        let mut path = Path::new();
        for primitive in &self.primitives {
            path.extend_from(&primitive.to_path());
        }
        path
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Azimuth lock
// ─────────────────────────────────────────────────────────────────────────────

/// Tilt-direction hysteresis for the calligraphy nib.
///
/// Near-vertical pens report unreliable azimuths, so at or above the
/// altitude threshold the last trustworthy direction is reused.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AzimuthLock {
    locked: Option<Vec2>,
}

impl AzimuthLock {
    /// 80% of vertical
    pub const ALTITUDE_THRESHOLD: f64 = FRAC_PI_2 * 0.8;

    /// Nib direction for input without any azimuth data
    pub const FALLBACK: Vec2 = Vec2::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2);

    pub fn new() -> Self {
        Self::default()
    }

    pub fn locked(&self) -> Option<Vec2> {
        self.locked
    }

    /// Azimuth unit vector to use for `sample`, updating the lock
    pub fn resolve(&mut self, sample: &Sample) -> Vec2 {
        if sample.azimuth.is_none() {
            return self.locked.unwrap_or(Self::FALLBACK);
        }

        let own = sample.azimuth_unit_vector();
        let steep = sample
            .altitude
            .is_some_and(|altitude| altitude >= Self::ALTITUDE_THRESHOLD);

        if steep {
            *self.locked.get_or_insert(own)
        } else {
            self.locked = Some(own);
            own
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Where a ribbon's cross direction comes from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nib {
    /// Path normal, round caps
    Round,
    /// Pen azimuth rotated 90°, flat ends
    Flat,
}

impl Nib {
    pub fn width(&self) -> WidthTransform {
        match self {
            Nib::Round => WidthTransform::FOUNTAIN,
            Nib::Flat => WidthTransform::CALLIGRAPHY,
        }
    }
}

type SegmentPrimitives = SmallVec<[RibbonPrimitive; 4]>;

/// Incremental ribbon builder for one stroke
#[derive(Clone, Debug)]
pub struct RibbonBuilder {
    nib: Nib,
    width: WidthTransform,
    window: StrokeSegment,
    /// Resolved nib direction of the newest sample (flat nib only)
    last_direction: Option<Vec2>,
    committed: Ribbon,
    finished: bool,
    degenerate_count: usize,
}

impl RibbonBuilder {
    pub fn new(nib: Nib) -> Self {
        Self {
            nib,
            width: nib.width(),
            window: StrokeSegment::new(),
            last_direction: None,
            committed: Ribbon::new(),
            finished: false,
            degenerate_count: 0,
        }
    }

    pub fn nib(&self) -> Nib {
        self.nib
    }

    /// Normal computations that fell back to the safety vector
    pub fn degenerate_count(&self) -> usize {
        self.degenerate_count
    }

    /// Feed the next accepted sample
    pub fn push(&mut self, sample: &Sample, lock: &mut AzimuthLock) {
        self.window.advance(Some(*sample));

        match self.nib {
            Nib::Round => {
                // the segment before the new sample now knows its `after`
                if self.window.is_complete() {
                    let (primitives, degenerate) = self.round_segment(&self.window, false);
                    self.commit(primitives, degenerate);
                }
            }
            Nib::Flat => {
                let direction = lock.resolve(sample);
                if let (Some(from), Some(from_direction)) =
                    (self.window.to().copied(), self.last_direction)
                {
                    let walls = self.flat_segment(&from, from_direction, sample, direction);
                    self.commit(walls, false);
                }
                self.last_direction = Some(direction);
            }
        }
    }

    /// Commit the trailing segment as the end of the stroke
    pub fn finish(&mut self) {
        if self.finished {
            return;
        }
        if let Some(trailing) = self.trailing_segment() {
            let (primitives, degenerate) = self.round_segment(&trailing, true);
            self.commit(primitives, degenerate);
        }
        self.finished = true;
    }

    /// Committed primitives only
    pub fn committed(&self) -> &Ribbon {
        &self.committed
    }

    /// Committed primitives plus the preview of the trailing segment
    pub fn ribbon(&self) -> Ribbon {
        let mut ribbon = self.committed.clone();
        if self.finished {
            return ribbon;
        }
        if let Some(trailing) = self.trailing_segment() {
            let end_cap = trailing.to().is_some_and(|s| s.is_final);
            let (primitives, _) = self.round_segment(&trailing, end_cap);
            ribbon.extend(primitives);
        }
        ribbon
    }

    /// The newest segment, whose `after` neighbour is still unknown.
    ///
    /// Flat nibs commit every segment immediately, so they never have one.
    fn trailing_segment(&self) -> Option<StrokeSegment> {
        if self.nib == Nib::Flat {
            return None;
        }
        let mut trailing = self.window.clone();
        trailing.advance(None);
        trailing.is_complete().then_some(trailing)
    }

    fn commit(&mut self, primitives: impl IntoIterator<Item = RibbonPrimitive>, degenerate: bool) {
        if degenerate {
            self.degenerate_count += 1;
        }
        let before = self.committed.len();
        self.committed.extend(primitives);
        trace!(
            primitives = self.committed.len() - before,
            total = self.committed.len(),
            "committed ribbon segment"
        );
    }

    /// Quad plus caps for a round-nib segment; the flag reports whether a
    /// normal fell back to the safety vector.
    fn round_segment(&self, segment: &StrokeSegment, end_cap: bool) -> (SegmentPrimitives, bool) {
        let mut primitives = SegmentPrimitives::new();
        let (Some(from), Some(to)) = (segment.from(), segment.to()) else {
            return (primitives, false);
        };

        let mut degenerate = false;
        let mut resolve = |normal: Result<Vec2, _>| {
            normal.unwrap_or_else(|err| {
                warn!(%err, at = ?from.location, "using safety normal");
                degenerate = true;
                DEGENERATE_NORMAL
            })
        };
        let from_offset = resolve(segment.from_unit_normal()) * self.width.apply(from);
        let to_offset = resolve(segment.to_unit_normal()) * self.width.apply(to);

        primitives.extend(RibbonPrimitive::walls([
            from.location + from_offset,
            to.location + to_offset,
            to.location - to_offset,
            from.location - from_offset,
        ]));
        primitives.push(RibbonPrimitive::Cap(Circle::new(
            from.location,
            from_offset.length(),
        )));
        if end_cap {
            primitives.push(RibbonPrimitive::Cap(Circle::new(
                to.location,
                to_offset.length(),
            )));
        }

        (primitives, degenerate)
    }

    fn flat_segment(
        &self,
        from: &Sample,
        from_direction: Vec2,
        to: &Sample,
        to_direction: Vec2,
    ) -> Walls {
        let from_offset = from_direction.perpendicular() * self.width.apply(from);
        let to_offset = to_direction.perpendicular() * self.width.apply(to);

        RibbonPrimitive::walls([
            from.location + from_offset,
            to.location + to_offset,
            to.location - to_offset,
            from.location - from_offset,
        ])
    }
}
