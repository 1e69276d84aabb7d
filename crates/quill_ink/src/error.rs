//! Ink engine error types

use thiserror::Error;

use crate::stroke::StrokeState;
use crate::style::Style;

/// Errors produced by strokes, surfaces and configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InkError {
    /// Mutation attempted on a stroke that is no longer active
    #[error("stroke is {state:?}; only active strokes accept changes")]
    InvalidState { state: StrokeState },

    /// Style altered after the stroke was created
    #[error("cannot change stroke style from {from:?} to {to:?}")]
    InvalidStyleChange { from: Style, to: Style },

    /// A normal computation found no usable direction and fell back to (1, 0)
    #[error("degenerate geometry: no usable normal direction")]
    DegenerateGeometry,

    /// Sample timestamp earlier than the previously accepted one
    #[error("sample at t={timestamp} is earlier than previous sample at t={previous}")]
    OutOfOrder { previous: f64, timestamp: f64 },

    /// A stroke is already in progress on the surface
    #[error("a stroke is already in progress")]
    StrokeInProgress,

    /// The surface has no active stroke
    #[error("no active stroke")]
    NoActiveStroke,

    /// Invalid configuration value
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for ink operations
pub type Result<T> = std::result::Result<T, InkError>;
