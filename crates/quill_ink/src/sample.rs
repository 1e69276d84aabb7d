//! Pointer samples
//!
//! A `Sample` is one timestamped reading from the input device: where the
//! contact was, how hard it pressed, and (for a stylus) how the pen was
//! tilted. Samples are immutable once created; every derived quantity is
//! computed on demand.

use quill_core::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// One input reading
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Seconds, monotonic within a stroke
    pub timestamp: f64,
    pub location: Point,
    /// Sensor force, `None` for devices without pressure
    #[serde(default)]
    pub force: Option<f64>,
    /// Angle between pen and surface in radians (π/2 = vertical)
    #[serde(default)]
    pub altitude: Option<f64>,
    /// Compass direction of the pen tilt in radians
    #[serde(default)]
    pub azimuth: Option<f64>,
    #[serde(default)]
    pub is_coalesced: bool,
    #[serde(default)]
    pub is_predicted: bool,
    /// Set on the last sample of a normally completed stroke
    #[serde(default)]
    pub is_final: bool,
}

impl Sample {
    /// Create a sample with no pressure or tilt data
    pub fn new(timestamp: f64, location: Point) -> Self {
        Self {
            timestamp,
            location,
            force: None,
            altitude: None,
            azimuth: None,
            is_coalesced: false,
            is_predicted: false,
            is_final: false,
        }
    }

    pub fn with_force(mut self, force: f64) -> Self {
        self.force = Some(force);
        self
    }

    /// Attach stylus tilt (altitude and azimuth, both radians)
    pub fn with_tilt(mut self, altitude: f64, azimuth: f64) -> Self {
        self.altitude = Some(altitude);
        self.azimuth = Some(azimuth);
        self
    }

    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    /// Mark as the terminal sample of its stroke
    pub fn finished(mut self) -> Self {
        self.is_final = true;
        self
    }

    /// Unit vector pointing along the azimuth, `(1, 0)` when absent
    pub fn azimuth_unit_vector(&self) -> Vec2 {
        match self.azimuth {
            Some(azimuth) => Vec2::X.rotated(azimuth),
            None => Vec2::X,
        }
    }

    /// Force, defaulting to 1.0 for devices without pressure
    pub fn force_or_default(&self) -> f64 {
        self.force.unwrap_or(1.0)
    }

    /// Force component perpendicular to the surface.
    ///
    /// A tilted pen reports the same sensor force for less perpendicular
    /// pressure, so the force is divided by `sin(altitude)`. Missing or
    /// near-flat altitudes leave the force unchanged.
    pub fn perpendicular_force(&self) -> f64 {
        let force = self.force_or_default();
        match self.altitude.map(f64::sin) {
            Some(sin) if sin.is_finite() && sin > f64::EPSILON => force / sin,
            _ => force,
        }
    }
}
