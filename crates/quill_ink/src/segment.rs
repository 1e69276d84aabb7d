//! Four-sample segment window
//!
//! Ribbon geometry is built one segment (`from` → `to`) at a time, but the
//! normal at each end is averaged with the neighbouring segment so that
//! direction changes get smooth miters. `StrokeSegment` is the sliding
//! `before / from / to / after` window that makes those neighbours
//! available. It is owned by a single builder and advanced one slot per
//! sample.

use quill_core::Vec2;

use crate::error::InkError;
use crate::sample::Sample;

const BEFORE: usize = 0;
const FROM: usize = 1;
const TO: usize = 2;
const AFTER: usize = 3;

/// Sliding window over consecutive samples
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StrokeSegment {
    slots: [Option<Sample>; 4],
}

impl StrokeSegment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the window for a fixed set of neighbours
    pub fn from_parts(
        before: Option<Sample>,
        from: Option<Sample>,
        to: Option<Sample>,
        after: Option<Sample>,
    ) -> Self {
        Self {
            slots: [before, from, to, after],
        }
    }

    /// Shift every slot one step towards `before` and put `incoming` in
    /// the `after` slot.
    pub fn advance(&mut self, incoming: Option<Sample>) {
        self.slots.rotate_left(1);
        self.slots[AFTER] = incoming;
    }

    pub fn before(&self) -> Option<&Sample> {
        self.slots[BEFORE].as_ref()
    }

    pub fn from(&self) -> Option<&Sample> {
        self.slots[FROM].as_ref()
    }

    pub fn to(&self) -> Option<&Sample> {
        self.slots[TO].as_ref()
    }

    pub fn after(&self) -> Option<&Sample> {
        self.slots[AFTER].as_ref()
    }

    /// Whether both ends of the segment are present
    pub fn is_complete(&self) -> bool {
        self.from().is_some() && self.to().is_some()
    }

    /// `to - from`, zero when either end is missing
    pub fn stroke_vector(&self) -> Vec2 {
        match (self.from(), self.to()) {
            (Some(from), Some(to)) => to.location - from.location,
            _ => Vec2::ZERO,
        }
    }

    /// `from - before`, or the segment's own vector at the start of a stroke
    pub fn previous_stroke_vector(&self) -> Vec2 {
        match (self.before(), self.from()) {
            (Some(before), Some(from)) => from.location - before.location,
            _ => self.stroke_vector(),
        }
    }

    /// `after - to`, or the segment's own vector at the end of a stroke
    pub fn next_stroke_vector(&self) -> Vec2 {
        match (self.to(), self.after()) {
            (Some(to), Some(after)) => after.location - to.location,
            _ => self.stroke_vector(),
        }
    }

    /// Unit normal at the `from` end
    pub fn from_unit_normal(&self) -> Result<Vec2, InkError> {
        interpolated_unit_normal(self.previous_stroke_vector(), self.stroke_vector())
    }

    /// Unit normal at the `to` end
    pub fn to_unit_normal(&self) -> Result<Vec2, InkError> {
        interpolated_unit_normal(self.stroke_vector(), self.next_stroke_vector())
    }
}

/// Average of the normals of two consecutive direction vectors.
///
/// When the normals cancel out (a full reversal) either input's own normal
/// is used instead. Only when every candidate has zero length does this
/// fail with [`InkError::DegenerateGeometry`]; callers substitute
/// [`DEGENERATE_NORMAL`].
pub fn interpolated_unit_normal(a: Vec2, b: Vec2) -> Result<Vec2, InkError> {
    (a.perpendicular() + b.perpendicular())
        .normalized()
        .or_else(|| a.perpendicular().normalized())
        .or_else(|| b.perpendicular().normalized())
        .ok_or(InkError::DegenerateGeometry)
}

/// Safety vector used when no normal direction exists
pub const DEGENERATE_NORMAL: Vec2 = Vec2::X;

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::Point;

    fn at(x: f64, y: f64) -> Option<Sample> {
        Some(Sample::new(0.0, Point::new(x, y)))
    }

    fn assert_vec_eq(actual: Vec2, expected: Vec2) {
        assert!(
            (actual - expected).length() < 1e-12,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_advance_shifts_slots() {
        let mut segment = StrokeSegment::new();
        segment.advance(at(0.0, 0.0));
        assert!(!segment.is_complete());

        segment.advance(at(1.0, 0.0));
        segment.advance(None);
        assert!(segment.is_complete());
        assert_eq!(segment.from().unwrap().location, Point::new(0.0, 0.0));
        assert_eq!(segment.to().unwrap().location, Point::new(1.0, 0.0));
        assert!(segment.before().is_none());
        assert!(segment.after().is_none());
    }

    #[test]
    fn test_straight_segment_normals() {
        let segment = StrokeSegment::from_parts(None, at(0.0, 0.0), at(10.0, 0.0), None);

        assert_vec_eq(segment.from_unit_normal().unwrap(), Vec2::new(0.0, 1.0));
        assert_vec_eq(segment.to_unit_normal().unwrap(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_neighbour_averaging() {
        // right, then up: the corner normal bisects (0,1) and (-1,0)
        let segment = StrokeSegment::from_parts(None, at(0.0, 0.0), at(1.0, 0.0), at(1.0, 1.0));
        let expected = Vec2::new(-1.0, 1.0).normalized().unwrap();

        assert_vec_eq(segment.to_unit_normal().unwrap(), expected);
        assert_vec_eq(segment.from_unit_normal().unwrap(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_reversal_falls_back_to_previous_vector() {
        // previous segment goes right, this one goes straight back
        let segment = StrokeSegment::from_parts(at(0.0, 0.0), at(1.0, 0.0), at(0.0, 0.0), None);

        assert_vec_eq(segment.from_unit_normal().unwrap(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_all_zero_is_degenerate() {
        let segment = StrokeSegment::from_parts(None, at(2.0, 2.0), at(2.0, 2.0), None);

        assert_eq!(segment.from_unit_normal(), Err(InkError::DegenerateGeometry));
        assert_eq!(
            interpolated_unit_normal(Vec2::ZERO, Vec2::ZERO),
            Err(InkError::DegenerateGeometry)
        );
    }

    #[test]
    fn test_zero_previous_uses_current() {
        let n = interpolated_unit_normal(Vec2::ZERO, Vec2::new(0.0, 2.0)).unwrap();
        assert_vec_eq(n, Vec2::new(-1.0, 0.0));
    }
}
