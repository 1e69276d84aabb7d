//! Quill Ink
//!
//! Turns a stream of pointer samples into renderable ink:
//!
//! - **Samples**: `Sample` readings with optional force and stylus tilt,
//!   screened by a `SampleFilter` that drops jitter
//! - **Styles**: `Basic` and `Interpolated` produce a centerline path,
//!   `Fountain` and `Calligraphy` produce a filled variable-width `Ribbon`
//! - **Strokes**: `Stroke` owns one contact's samples and lifecycle
//!   (`Active` → `Done` / `Cancelled`)
//! - **Surface**: `Surface` owns every stroke on a canvas and queues
//!   `SurfaceUpdate`s for the renderer
//!
//! # Example
//!
//! ```rust
//! use quill_core::Point;
//! use quill_ink::{Geometry, Sample, Stroke, Style};
//!
//! let mut stroke = Stroke::new(Style::Fountain);
//! stroke.append(Sample::new(0.0, Point::new(0.0, 0.0)).with_force(1.0)).unwrap();
//! stroke.append(Sample::new(0.1, Point::new(10.0, 0.0)).with_force(1.0)).unwrap();
//! stroke.finalize().unwrap();
//!
//! let Geometry::Ribbon(ribbon) = stroke.geometry() else { unreachable!() };
//! // one quad plus a round cap at each end
//! assert_eq!(ribbon.len(), 3);
//! assert!((ribbon.bounds().height() - 4.2).abs() < 1e-9);
//! ```

pub mod config;
pub mod curve;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod ribbon;
pub mod sample;
pub mod segment;
pub mod stroke;
pub mod style;
pub mod surface;
pub mod width;

pub use config::InkConfig;
pub use curve::{CurveBuilder, PolylineBuilder};
pub use error::{InkError, Result};
pub use filter::{SampleFilter, DEFAULT_JITTER_QUADRANCE};
pub use geometry::Geometry;
pub use ribbon::{AzimuthLock, Nib, Ribbon, RibbonBuilder, RibbonPrimitive, Walls};
pub use sample::Sample;
pub use segment::StrokeSegment;
pub use stroke::{AppendOutcome, Stroke, StrokeState};
pub use style::Style;
pub use surface::{SharedSurface, Surface, SurfaceUpdate};
pub use width::{BaseAmount, WidthTransform};
