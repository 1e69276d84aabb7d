//! Pen styles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InkError;

/// How a stroke's samples turn into geometry.
///
/// The style is fixed when the stroke is created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Raw polyline through every accepted sample
    Basic,
    /// Smoothed centerline curve
    Interpolated,
    /// Pressure-sensitive ribbon with round ends
    #[default]
    Fountain,
    /// Tilt-driven flat-nib ribbon
    Calligraphy,
}

impl Style {
    pub const ALL: [Style; 4] = [
        Style::Basic,
        Style::Interpolated,
        Style::Fountain,
        Style::Calligraphy,
    ];

    /// Whether force/tilt shape the stroke width
    pub fn is_pressure_sensitive(&self) -> bool {
        matches!(self, Style::Fountain | Style::Calligraphy)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Style::Basic => "basic",
            Style::Interpolated => "interpolated",
            Style::Fountain => "fountain",
            Style::Calligraphy => "calligraphy",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Style {
    type Err = InkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Style::ALL
            .into_iter()
            .find(|style| style.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| InkError::Config(format!("unknown style '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressure_sensitivity() {
        assert!(Style::Fountain.is_pressure_sensitive());
        assert!(Style::Calligraphy.is_pressure_sensitive());
        assert!(!Style::Basic.is_pressure_sensitive());
        assert!(!Style::Interpolated.is_pressure_sensitive());
    }

    #[test]
    fn test_parse() {
        assert_eq!("Calligraphy".parse::<Style>(), Ok(Style::Calligraphy));
        assert_eq!("basic".parse::<Style>(), Ok(Style::Basic));
        assert!("pencil".parse::<Style>().is_err());
        assert_eq!(Style::default(), Style::Fountain);
    }
}
