//! Ink configuration
//!
//! Tunables for the engine, stored as TOML (`quill.toml`). Every field has a
//! default so a partial file (or an empty one) is valid.
//!
//! ```toml
//! jitter_quadrance = 0.003
//! default_style = "fountain"
//! line_width = 5.0
//! tolerance = 0.1
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{InkError, Result};
use crate::filter::{SampleFilter, DEFAULT_JITTER_QUADRANCE};
use crate::style::Style;

/// Engine and renderer tunables
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct InkConfig {
    /// Squared distance below which samples are dropped as jitter
    #[serde(default = "default_jitter_quadrance")]
    pub jitter_quadrance: f64,
    /// Style for new strokes
    #[serde(default)]
    pub default_style: Style,
    /// Stroke width for centerline styles
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    /// Curve flattening tolerance for tessellation
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_jitter_quadrance() -> f64 {
    DEFAULT_JITTER_QUADRANCE
}

fn default_line_width() -> f64 {
    5.0
}

fn default_tolerance() -> f64 {
    0.1
}

impl Default for InkConfig {
    fn default() -> Self {
        Self {
            jitter_quadrance: default_jitter_quadrance(),
            default_style: Style::default(),
            line_width: default_line_width(),
            tolerance: default_tolerance(),
        }
    }
}

impl InkConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).map_err(|e| InkError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| InkError::Config(e.to_string()))
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        if !self.jitter_quadrance.is_finite() || self.jitter_quadrance < 0.0 {
            return Err(InkError::Config(format!(
                "jitter_quadrance must be a non-negative number, got {}",
                self.jitter_quadrance
            )));
        }
        for (name, value) in [("line_width", self.line_width), ("tolerance", self.tolerance)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(InkError::Config(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn sample_filter(&self) -> SampleFilter {
        SampleFilter::with_epsilon(self.jitter_quadrance)
    }
}
