//! Quill Core
//!
//! Foundational value types for the Quill ink engine:
//!
//! - **Geometry**: `Point`, `Vec2` and `Rect` in `f64` drawing units
//! - **Paths**: `Path` / `PathCommand` vector paths (lines, quadratic and
//!   cubic Béziers, closed subpaths)
//! - **Primitives**: `Circle`
//!
//! # Example
//!
//! ```rust
//! use quill_core::{Path, Point};
//!
//! let path = Path::new()
//!     .move_to(Point::new(0.0, 0.0))
//!     .cubic_to(Point::new(1.0, 0.0), Point::new(2.0, 0.0), Point::new(3.0, 0.0));
//!
//! assert_eq!(path.bounds().width(), 3.0);
//! ```

pub mod geometry;
pub mod path;
pub mod primitives;

pub use geometry::{Point, Rect, Vec2};
pub use path::{Path, PathCommand};
pub use primitives::Circle;
