//! SVG export
//!
//! Ribbons become filled paths (`fill-rule="nonzero"`), centerlines become
//! round-capped stroked paths. The view box covers every stroke plus the
//! line width.

use quill_core::{Path, PathCommand, Rect};
use quill_ink::Geometry;
use std::fmt::Write;

const INK: &str = "#000000";

/// SVG path data for a quill path
pub fn path_data(path: &Path) -> String {
    let mut d = String::new();
    for cmd in path.commands() {
        if !d.is_empty() {
            d.push(' ');
        }
        // writing to a String cannot fail
        let _ = match cmd {
            PathCommand::MoveTo(p) => write!(d, "M{} {}", p.x, p.y),
            PathCommand::LineTo(p) => write!(d, "L{} {}", p.x, p.y),
            PathCommand::QuadTo { control, end } => {
                write!(d, "Q{} {} {} {}", control.x, control.y, end.x, end.y)
            }
            PathCommand::CubicTo {
                control1,
                control2,
                end,
            } => write!(
                d,
                "C{} {} {} {} {} {}",
                control1.x, control1.y, control2.x, control2.y, end.x, end.y
            ),
            PathCommand::Close => write!(d, "Z"),
        };
    }
    d
}

/// A standalone SVG document drawing `geometries` in order
pub fn document<'a>(geometries: impl IntoIterator<Item = &'a Geometry>, line_width: f64) -> String {
    let mut body = String::new();
    let mut bounds: Option<Rect> = None;

    for geometry in geometries {
        if geometry.is_empty() {
            continue;
        }
        let b = geometry.bounds();
        bounds = Some(match bounds {
            Some(acc) => acc.union(&b),
            None => b,
        });

        let d = path_data(&geometry.to_path());
        let _ = if geometry.is_filled() {
            writeln!(
                body,
                r#"  <path d="{}" fill="{}" fill-rule="nonzero"/>"#,
                d, INK
            )
        } else {
            writeln!(
                body,
                r#"  <path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round"/>"#,
                d, INK, line_width
            )
        };
    }

    let pad = line_width / 2.0;
    let view = bounds.unwrap_or(Rect::ZERO);
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {} {}\">\n{}</svg>\n",
        view.x() - pad,
        view.y() - pad,
        view.width() + 2.0 * pad,
        view.height() + 2.0 * pad,
        body
    )
}
