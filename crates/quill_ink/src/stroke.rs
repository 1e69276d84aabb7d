//! Strokes
//!
//! A `Stroke` is the façade over one continuous contact: it filters incoming
//! samples, records the accepted ones, drives the builder that matches its
//! style, and tracks the lifecycle
//!
//! ```text
//! Active ──append──▶ Active
//! Active ──finalize─▶ Done
//! Active ──cancel───▶ Cancelled
//! ```
//!
//! `Done` and `Cancelled` are terminal: the sample history is frozen and
//! every further mutation fails with [`InkError::InvalidState`].

use quill_core::Vec2;
use tracing::{debug, trace};

use crate::curve::{CurveBuilder, PolylineBuilder};
use crate::error::{InkError, Result};
use crate::filter::SampleFilter;
use crate::geometry::Geometry;
use crate::ribbon::{AzimuthLock, Nib, RibbonBuilder};
use crate::sample::Sample;
use crate::style::Style;

/// Lifecycle of a stroke
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StrokeState {
    /// Accepting samples
    #[default]
    Active,
    /// Completed normally
    Done,
    /// Aborted; renders as nothing
    Cancelled,
}

impl StrokeState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StrokeState::Active)
    }
}

/// Result of offering a sample to a stroke
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The sample was recorded and the geometry updated
    Accepted,
    /// The sample was jitter and has been dropped
    Rejected,
}

/// Per-style geometry state
#[derive(Clone, Debug)]
enum Builder {
    Ribbon(RibbonBuilder),
    Curve(CurveBuilder),
    Polyline(PolylineBuilder),
}

impl Builder {
    fn for_style(style: Style) -> Self {
        match style {
            Style::Basic => Builder::Polyline(PolylineBuilder::new()),
            Style::Interpolated => Builder::Curve(CurveBuilder::new()),
            Style::Fountain => Builder::Ribbon(RibbonBuilder::new(Nib::Round)),
            Style::Calligraphy => Builder::Ribbon(RibbonBuilder::new(Nib::Flat)),
        }
    }
}

/// One continuous contact and the ink it produces
#[derive(Clone, Debug)]
pub struct Stroke {
    style: Style,
    state: StrokeState,
    samples: Vec<Sample>,
    filter: SampleFilter,
    builder: Builder,
    azimuth_lock: AzimuthLock,
    rejected: usize,
}

impl Stroke {
    pub fn new(style: Style) -> Self {
        Self::with_filter(style, SampleFilter::default())
    }

    pub fn with_filter(style: Style, filter: SampleFilter) -> Self {
        Self {
            style,
            state: StrokeState::Active,
            samples: Vec::new(),
            filter,
            builder: Builder::for_style(style),
            azimuth_lock: AzimuthLock::new(),
            rejected: 0,
        }
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    /// Accepted samples in arrival order
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Samples dropped by the jitter filter
    pub fn rejected_count(&self) -> usize {
        self.rejected
    }

    /// Ribbon normals that fell back to the safety vector
    pub fn degenerate_count(&self) -> usize {
        match &self.builder {
            Builder::Ribbon(builder) => builder.degenerate_count(),
            _ => 0,
        }
    }

    /// Current calligraphy nib direction memory
    pub fn locked_azimuth(&self) -> Option<Vec2> {
        self.azimuth_lock.locked()
    }

    /// Offer the next sample.
    ///
    /// Jitter is dropped silently (`Ok(Rejected)`). Never changes the
    /// stroke state.
    pub fn append(&mut self, sample: Sample) -> Result<AppendOutcome> {
        self.ensure_active()?;

        let previous = self.samples.last();
        if let Some(previous) = previous {
            if sample.timestamp < previous.timestamp {
                return Err(InkError::OutOfOrder {
                    previous: previous.timestamp,
                    timestamp: sample.timestamp,
                });
            }
        }

        if !self.filter.admit(&sample, previous) {
            self.rejected += 1;
            trace!(at = ?sample.location, rejected = self.rejected, "sample rejected as jitter");
            return Ok(AppendOutcome::Rejected);
        }

        self.samples.push(sample);
        match &mut self.builder {
            Builder::Ribbon(builder) => builder.push(&sample, &mut self.azimuth_lock),
            Builder::Curve(builder) => builder.push(sample.location),
            Builder::Polyline(builder) => builder.push(sample.location),
        }

        Ok(AppendOutcome::Accepted)
    }

    /// Re-assert the stroke style; any actual change is rejected
    pub fn set_style(&mut self, style: Style) -> Result<()> {
        if style == self.style {
            Ok(())
        } else {
            Err(InkError::InvalidStyleChange {
                from: self.style,
                to: style,
            })
        }
    }

    /// Complete the stroke and commit its trailing geometry
    pub fn finalize(&mut self) -> Result<()> {
        self.ensure_active()?;
        match &mut self.builder {
            Builder::Ribbon(builder) => builder.finish(),
            Builder::Curve(builder) => builder.finish(),
            Builder::Polyline(_) => {}
        }
        self.state = StrokeState::Done;
        debug!(style = %self.style, samples = self.samples.len(), "stroke done");
        Ok(())
    }

    /// Abort the stroke; its geometry becomes empty
    pub fn cancel(&mut self) -> Result<()> {
        self.ensure_active()?;
        self.state = StrokeState::Cancelled;
        debug!(style = %self.style, samples = self.samples.len(), "stroke cancelled");
        Ok(())
    }

    /// Geometry to render right now
    pub fn geometry(&self) -> Geometry {
        if self.state == StrokeState::Cancelled {
            return Geometry::Empty;
        }
        let geometry = match &self.builder {
            Builder::Ribbon(builder) => Geometry::Ribbon(builder.ribbon()),
            Builder::Curve(builder) => Geometry::Centerline(builder.path()),
            Builder::Polyline(builder) => Geometry::Centerline(builder.path().clone()),
        };
        if geometry.is_empty() {
            Geometry::Empty
        } else {
            geometry
        }
    }

    fn ensure_active(&self) -> Result<()> {
        if self.state.is_terminal() {
            Err(InkError::InvalidState { state: self.state })
        } else {
            Ok(())
        }
    }
}
