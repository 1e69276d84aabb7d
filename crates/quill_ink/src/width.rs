//! Force/tilt to half-width transform
//!
//! Pressure-sensitive styles turn each sample into a half-width through a
//! fixed three-stage pipeline: base amount, floor, linear rescale. Each
//! stage is a plain function so the order is explicit and testable.

use crate::sample::Sample;
use crate::style::Style;

/// Which sample quantity feeds the pipeline
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BaseAmount {
    /// Force corrected for pen tilt
    PerpendicularForce,
    /// Raw force, 1.0 when absent
    Force,
}

impl BaseAmount {
    pub fn read(&self, sample: &Sample) -> f64 {
        match self {
            BaseAmount::PerpendicularForce => sample.perpendicular_force(),
            BaseAmount::Force => sample.force_or_default(),
        }
    }
}

/// Half-width pipeline for one style
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WidthTransform {
    pub base: BaseAmount,
    /// Lower bound applied to the base amount
    pub floor: Option<f64>,
    pub multiplier: f64,
    pub offset: f64,
}

impl WidthTransform {
    pub const FOUNTAIN: WidthTransform = WidthTransform {
        base: BaseAmount::PerpendicularForce,
        floor: None,
        multiplier: 2.0,
        offset: 0.1,
    };

    /// Calligraphy dampens pressure: the nib never shrinks below force 1.0
    /// and a large offset dominates the result.
    pub const CALLIGRAPHY: WidthTransform = WidthTransform {
        base: BaseAmount::Force,
        floor: Some(1.0),
        multiplier: 1.0,
        offset: 10.0,
    };

    /// Transform for `style`, `None` for constant-width centerline styles
    pub fn for_style(style: Style) -> Option<WidthTransform> {
        match style {
            Style::Fountain => Some(Self::FOUNTAIN),
            Style::Calligraphy => Some(Self::CALLIGRAPHY),
            Style::Basic | Style::Interpolated => None,
        }
    }

    /// Stage 2: clamp the base amount from below
    pub fn floored(&self, amount: f64) -> f64 {
        match self.floor {
            Some(floor) => amount.max(floor),
            None => amount,
        }
    }

    /// Stage 3: linear rescale
    pub fn rescaled(&self, amount: f64) -> f64 {
        amount * self.multiplier + self.offset
    }

    /// Half-width for `sample`
    pub fn apply(&self, sample: &Sample) -> f64 {
        self.rescaled(self.floored(self.base.read(sample)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::Point;
    use std::f64::consts::FRAC_PI_6;

    fn sample() -> Sample {
        Sample::new(0.0, Point::ZERO)
    }

    #[test]
    fn test_centerline_styles_have_no_transform() {
        assert_eq!(WidthTransform::for_style(Style::Basic), None);
        assert_eq!(WidthTransform::for_style(Style::Interpolated), None);
    }

    #[test]
    fn test_fountain() {
        let t = WidthTransform::for_style(Style::Fountain).unwrap();

        assert!((t.apply(&sample()) - 2.1).abs() < 1e-12);
        assert!((t.apply(&sample().with_force(0.5)) - 1.1).abs() < 1e-12);
        // zero force still leaves visible ink
        assert_eq!(t.apply(&sample().with_force(0.0)), 0.1);
        // a pen at 30° doubles the perpendicular force
        let tilted = sample().with_force(1.0).with_altitude(FRAC_PI_6);
        assert!((t.apply(&tilted) - 4.1).abs() < 1e-9);
    }

    #[test]
    fn test_calligraphy_floor_and_rescale() {
        let t = WidthTransform::for_style(Style::Calligraphy).unwrap();

        assert_eq!(t.apply(&sample()), 11.0);
        assert_eq!(t.apply(&sample().with_force(0.2)), 11.0);
        assert_eq!(t.apply(&sample().with_force(3.0)), 13.0);
        // tilt is ignored
        assert_eq!(t.apply(&sample().with_force(3.0).with_altitude(FRAC_PI_6)), 13.0);
    }

    #[test]
    fn test_stage_order() {
        let t = WidthTransform::CALLIGRAPHY;

        // floor before rescale: 0.5 -> 1.0 -> 11.0, not 0.5 -> 10.5 -> 10.5
        assert_eq!(t.rescaled(t.floored(0.5)), 11.0);
        assert_eq!(t.floored(t.rescaled(0.5)), 10.5);
    }

    #[test]
    fn test_result_never_below_offset() {
        for style in [Style::Fountain, Style::Calligraphy] {
            let t = WidthTransform::for_style(style).unwrap();
            for force in [0.0, 0.01, 0.5, 1.0, 4.0] {
                assert!(t.apply(&sample().with_force(force)) >= t.offset);
            }
        }
    }
}
