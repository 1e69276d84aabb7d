//! Recorded pen input
//!
//! A recording is a JSON document listing strokes in the order they were
//! drawn:
//!
//! ```json
//! {
//!   "strokes": [
//!     {
//!       "style": "fountain",
//!       "cancelled": false,
//!       "samples": [
//!         { "timestamp": 0.0, "location": { "x": 0.0, "y": 0.0 }, "force": 0.5 },
//!         { "timestamp": 0.016, "location": { "x": 4.0, "y": 1.0 }, "is_final": true }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! `style` defaults to the configured style, `cancelled` to `false`.

use anyhow::{Context, Result};
use quill_ink::{Geometry, Sample, Stroke, Style, Surface};
use quill_tess::{tessellate_geometry, TessOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Recording {
    #[serde(default)]
    pub strokes: Vec<RecordedStroke>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RecordedStroke {
    #[serde(default)]
    pub style: Option<Style>,
    #[serde(default)]
    pub cancelled: bool,
    pub samples: Vec<Sample>,
}

impl Recording {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_json(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }
}

/// What happened to one recorded stroke
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeReport {
    pub style: Style,
    pub accepted: usize,
    pub rejected: usize,
    pub primitives: usize,
    pub triangles: usize,
    pub cancelled: bool,
}

impl StrokeReport {
    fn new(stroke: &Stroke, options: &TessOptions) -> Self {
        let geometry = stroke.geometry();
        let primitives = match &geometry {
            Geometry::Empty => 0,
            Geometry::Ribbon(ribbon) => ribbon.len(),
            Geometry::Centerline(path) => path.len(),
        };
        Self {
            style: stroke.style(),
            accepted: stroke.samples().len(),
            rejected: stroke.rejected_count(),
            primitives,
            triangles: tessellate_geometry(&geometry, options).triangle_count(),
            cancelled: false,
        }
    }
}

/// Feed every recorded stroke through `surface`
pub fn replay(
    recording: &Recording,
    surface: &mut Surface,
    options: &TessOptions,
) -> Result<Vec<StrokeReport>> {
    let default_style = surface.config().default_style;
    let mut reports = Vec::with_capacity(recording.strokes.len());

    for (index, recorded) in recording.strokes.iter().enumerate() {
        surface.set_style(recorded.style.unwrap_or(default_style));
        surface
            .begin_stroke()
            .with_context(|| format!("Stroke {} could not start", index))?;

        let mut ended = false;
        for (n, sample) in recorded.samples.iter().enumerate() {
            if ended {
                warn!(
                    "Stroke {}: ignoring {} samples after the final one",
                    index,
                    recorded.samples.len() - n
                );
                break;
            }
            surface
                .push_sample(*sample)
                .with_context(|| format!("Stroke {}, sample {}", index, n))?;
            ended = sample.is_final;
        }

        let report = if recorded.cancelled && !ended {
            let mut report = match surface.active_stroke() {
                Some(stroke) => StrokeReport::new(stroke, options),
                None => anyhow::bail!("Stroke {} has no active stroke to cancel", index),
            };
            surface.cancel_stroke()?;
            report.primitives = 0;
            report.triangles = 0;
            report.cancelled = true;
            report
        } else {
            if !ended {
                surface.end_stroke()?;
            }
            let stroke = surface
                .strokes()
                .last()
                .context("Finished stroke missing from surface")?;
            StrokeReport::new(stroke, options)
        };

        info!(
            "Stroke {} ({}): {} samples accepted, {} rejected, {} primitives, {} triangles{}",
            index,
            report.style,
            report.accepted,
            report.rejected,
            report.primitives,
            report.triangles,
            if report.cancelled { ", cancelled" } else { "" }
        );
        reports.push(report);
    }

    Ok(reports)
}
