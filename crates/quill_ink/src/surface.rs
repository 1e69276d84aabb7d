//! Drawing surface
//!
//! The `Surface` is what a host view talks to. It owns the finished strokes,
//! at most one stroke in progress and the style for the next stroke, and it
//! queues a [`SurfaceUpdate`] for every change the renderer has to reflect.
//!
//! Hosts that render on a different thread than they receive input on wrap
//! the surface in a [`SharedSurface`].

use std::mem;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::config::InkConfig;
use crate::error::{InkError, Result};
use crate::geometry::Geometry;
use crate::sample::Sample;
use crate::stroke::{AppendOutcome, Stroke};
use crate::style::Style;

/// Surface shared between an input thread and a render thread
pub type SharedSurface = Arc<Mutex<Surface>>;

/// Change the renderer has to apply
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceUpdate {
    /// New live geometry for the stroke in progress
    Active(Geometry),
    /// The stroke in progress finished and is now `strokes()[index]`
    Committed { index: usize, geometry: Geometry },
    /// The stroke in progress was cancelled; drop its live geometry
    Erased,
    /// Every stroke was discarded
    Cleared,
}

/// Strokes drawn on one canvas
#[derive(Debug, Default)]
pub struct Surface {
    config: InkConfig,
    style: Style,
    strokes: Vec<Stroke>,
    active: Option<Stroke>,
    updates: Vec<SurfaceUpdate>,
}

impl Surface {
    pub fn new() -> Self {
        Self::with_config(InkConfig::default())
    }

    pub fn with_config(config: InkConfig) -> Self {
        Self {
            style: config.default_style,
            config,
            strokes: Vec::new(),
            active: None,
            updates: Vec::new(),
        }
    }

    /// Wrap in a [`SharedSurface`]
    pub fn shared(self) -> SharedSurface {
        Arc::new(Mutex::new(self))
    }

    pub fn config(&self) -> &InkConfig {
        &self.config
    }

    /// Style the next stroke will use
    pub fn style(&self) -> Style {
        self.style
    }

    /// Takes effect from the next stroke; a stroke in progress keeps its own
    pub fn set_style(&mut self, style: Style) {
        debug!(%style, "surface style changed");
        self.style = style;
    }

    /// Start a stroke with the current style
    pub fn begin_stroke(&mut self) -> Result<()> {
        if self.active.is_some() {
            return Err(InkError::StrokeInProgress);
        }
        self.active = Some(Stroke::with_filter(self.style, self.config.sample_filter()));
        debug!(style = %self.style, "stroke began");
        Ok(())
    }

    /// Feed one sample to the stroke in progress, starting one if needed.
    ///
    /// A sample flagged `is_final` ends the stroke even if the sample itself
    /// is dropped as jitter.
    pub fn push_sample(&mut self, sample: Sample) -> Result<AppendOutcome> {
        if self.active.is_none() {
            self.begin_stroke()?;
        }
        let stroke = self.active.as_mut().ok_or(InkError::NoActiveStroke)?;

        let outcome = stroke.append(sample)?;
        if outcome == AppendOutcome::Accepted {
            self.updates.push(SurfaceUpdate::Active(stroke.geometry()));
        }
        if sample.is_final {
            self.end_stroke()?;
        }
        Ok(outcome)
    }

    /// Finish the stroke in progress; returns its index in `strokes()`
    pub fn end_stroke(&mut self) -> Result<usize> {
        let mut stroke = self.active.take().ok_or(InkError::NoActiveStroke)?;
        stroke.finalize()?;

        let index = self.strokes.len();
        self.updates.push(SurfaceUpdate::Committed {
            index,
            geometry: stroke.geometry(),
        });
        self.strokes.push(stroke);
        Ok(index)
    }

    /// Abort the stroke in progress and erase its live geometry
    pub fn cancel_stroke(&mut self) -> Result<()> {
        let mut stroke = self.active.take().ok_or(InkError::NoActiveStroke)?;
        stroke.cancel()?;
        self.updates.push(SurfaceUpdate::Erased);
        Ok(())
    }

    /// Discard every stroke, including the one in progress
    pub fn clear(&mut self) {
        let discarded = self.strokes.len() + usize::from(self.active.is_some());
        if discarded == 0 {
            return;
        }
        self.strokes.clear();
        self.active = None;
        self.updates.push(SurfaceUpdate::Cleared);
        debug!(discarded, "surface cleared");
    }

    /// Drain queued updates in the order they happened
    pub fn take_updates(&mut self) -> Vec<SurfaceUpdate> {
        mem::take(&mut self.updates)
    }

    /// Finished strokes, oldest first
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn active_stroke(&self) -> Option<&Stroke> {
        self.active.as_ref()
    }

    /// Everything to draw: finished strokes, then the stroke in progress
    pub fn geometry(&self) -> Vec<Geometry> {
        self.strokes
            .iter()
            .chain(self.active.as_ref())
            .map(Stroke::geometry)
            .filter(|geometry| !geometry.is_empty())
            .collect()
    }
}
