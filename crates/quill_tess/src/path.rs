//! Path tessellation
//!
//! Converts quill paths into triangle meshes using lyon. Ink coordinates are
//! `f64`; meshes are `f32`, ready for upload.

use lyon::lyon_tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, LineCap, LineJoin,
    StrokeOptions, StrokeTessellator, StrokeVertex, VertexBuffers,
};
use lyon::math::{point, Point as LyonPoint};
use lyon::path::PathEvent;
use quill_core::{Path, PathCommand, Point};

/// A vertex of an ink mesh
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InkVertex {
    pub position: [f32; 2],
}

/// Tessellation parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TessOptions {
    /// Stroke width for centerline geometry
    pub line_width: f64,
    /// Maximum distance between a curve and its flattened approximation
    pub tolerance: f64,
}

impl Default for TessOptions {
    fn default() -> Self {
        Self {
            line_width: 5.0,
            tolerance: 0.1,
        }
    }
}

/// Indexed triangle list
#[derive(Clone, Debug, Default)]
pub struct TessellatedPath {
    pub vertices: Vec<InkVertex>,
    pub indices: Vec<u32>,
}

impl TessellatedPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Append another mesh, rebasing its indices
    pub fn append(&mut self, other: &TessellatedPath) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    /// Raw vertex data for a GPU vertex buffer
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

fn to_lyon(p: Point) -> LyonPoint {
    point(p.x as f32, p.y as f32)
}

/// Accumulates lyon events, tracking the open subpath
struct EventWriter {
    events: Vec<PathEvent>,
    first: Option<LyonPoint>,
    current: LyonPoint,
}

impl EventWriter {
    fn new() -> Self {
        Self {
            events: Vec::new(),
            first: None,
            current: point(0.0, 0.0),
        }
    }

    fn begin(&mut self, at: LyonPoint) {
        self.end(false);
        self.events.push(PathEvent::Begin { at });
        self.first = Some(at);
        self.current = at;
    }

    /// Drawing without a move starts a subpath at the current point
    fn ensure_begun(&mut self) {
        if self.first.is_none() {
            let at = self.current;
            self.begin(at);
        }
    }

    fn end(&mut self, close: bool) {
        if let Some(first) = self.first.take() {
            self.events.push(PathEvent::End {
                last: self.current,
                first,
                close,
            });
            if close {
                self.current = first;
            }
        }
    }

    fn finish(mut self) -> Vec<PathEvent> {
        self.end(false);
        self.events
    }
}

/// Convert a quill path to lyon path events
fn path_to_lyon_events(path: &Path) -> Vec<PathEvent> {
    let mut writer = EventWriter::new();

    for cmd in path.commands() {
        match cmd {
            PathCommand::MoveTo(p) => writer.begin(to_lyon(*p)),
            PathCommand::LineTo(p) => {
                writer.ensure_begun();
                let to = to_lyon(*p);
                writer.events.push(PathEvent::Line {
                    from: writer.current,
                    to,
                });
                writer.current = to;
            }
            PathCommand::QuadTo { control, end } => {
                writer.ensure_begun();
                let to = to_lyon(*end);
                writer.events.push(PathEvent::Quadratic {
                    from: writer.current,
                    ctrl: to_lyon(*control),
                    to,
                });
                writer.current = to;
            }
            PathCommand::CubicTo {
                control1,
                control2,
                end,
            } => {
                writer.ensure_begun();
                let to = to_lyon(*end);
                writer.events.push(PathEvent::Cubic {
                    from: writer.current,
                    ctrl1: to_lyon(*control1),
                    ctrl2: to_lyon(*control2),
                    to,
                });
                writer.current = to;
            }
            PathCommand::Close => writer.end(true),
        }
    }

    writer.finish()
}

/// Tessellate a path for filling with the nonzero rule
pub fn tessellate_fill(path: &Path, options: &TessOptions) -> TessellatedPath {
    let events = path_to_lyon_events(path);

    if events.is_empty() {
        return TessellatedPath::new();
    }

    let mut geometry: VertexBuffers<InkVertex, u32> = VertexBuffers::new();
    let mut tessellator = FillTessellator::new();

    let fill_options = FillOptions::default()
        .with_tolerance(options.tolerance as f32)
        .with_fill_rule(FillRule::NonZero);

    let result = tessellator.tessellate(
        events.iter().cloned(),
        &fill_options,
        &mut BuffersBuilder::new(&mut geometry, |vertex: FillVertex| InkVertex {
            position: vertex.position().to_array(),
        }),
    );

    if let Err(err) = result {
        tracing::warn!("Ink fill tessellation failed: {:?}", err);
        return TessellatedPath::new();
    }

    TessellatedPath {
        vertices: geometry.vertices,
        indices: geometry.indices,
    }
}

/// Tessellate a path as a round-capped, round-joined line of `width`
pub fn tessellate_stroke(path: &Path, width: f64, options: &TessOptions) -> TessellatedPath {
    let events = path_to_lyon_events(path);

    if events.is_empty() {
        return TessellatedPath::new();
    }

    let mut geometry: VertexBuffers<InkVertex, u32> = VertexBuffers::new();
    let mut tessellator = StrokeTessellator::new();

    let stroke_options = StrokeOptions::default()
        .with_line_width(width as f32)
        .with_tolerance(options.tolerance as f32)
        .with_line_cap(LineCap::Round)
        .with_line_join(LineJoin::Round);

    let result = tessellator.tessellate(
        events.iter().cloned(),
        &stroke_options,
        &mut BuffersBuilder::new(&mut geometry, |vertex: StrokeVertex| InkVertex {
            position: vertex.position().to_array(),
        }),
    );

    if let Err(err) = result {
        tracing::warn!("Ink stroke tessellation failed: {:?}", err);
        return TessellatedPath::new();
    }

    TessellatedPath {
        vertices: geometry.vertices,
        indices: geometry.indices,
    }
}
