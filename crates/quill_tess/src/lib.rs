//! Quill Tessellation
//!
//! Turns ink [`Geometry`] into indexed triangle meshes for a GPU renderer:
//! ribbons are filled with the nonzero rule (so overlapping quads and caps
//! paint their union), centerlines are stroked with round caps and joins.

pub mod path;

pub use path::{tessellate_fill, tessellate_stroke, InkVertex, TessOptions, TessellatedPath};

use quill_ink::Geometry;

/// Mesh for one stroke's geometry
pub fn tessellate_geometry(geometry: &Geometry, options: &TessOptions) -> TessellatedPath {
    match geometry {
        Geometry::Empty => TessellatedPath::new(),
        Geometry::Ribbon(ribbon) => tessellate_fill(&ribbon.to_path(), options),
        Geometry::Centerline(path) => tessellate_stroke(path, options.line_width, options),
    }
}

/// One mesh for every geometry, in order
pub fn tessellate_all<'a>(
    geometries: impl IntoIterator<Item = &'a Geometry>,
    options: &TessOptions,
) -> TessellatedPath {
    let mut mesh = TessellatedPath::new();
    for geometry in geometries {
        mesh.append(&tessellate_geometry(geometry, options));
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::{Point, Vec2};
    use quill_ink::{Sample, Stroke, Style};
    use std::f64::consts::FRAC_PI_4;

    fn stroke(style: Style, points: &[(f64, f64)]) -> Stroke {
        let mut stroke = Stroke::new(style);
        for (i, &(x, y)) in points.iter().enumerate() {
            stroke.append(Sample::new(i as f64, Point::new(x, y))).unwrap();
        }
        stroke.finalize().unwrap();
        stroke
    }

    #[test]
    fn test_empty_geometry() {
        let mesh = tessellate_geometry(&Geometry::Empty, &TessOptions::default());
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_fountain_capsule_mesh() {
        let geometry = stroke(Style::Fountain, &[(0.0, 0.0), (10.0, 0.0)]).geometry();
        let mesh = tessellate_geometry(&geometry, &TessOptions::default());

        assert!(!mesh.is_empty());
        for v in &mesh.vertices {
            let [x, y] = v.position;
            assert!((-2.11..=12.11).contains(&x), "x = {x}");
            assert!((-2.11..=2.11).contains(&y), "y = {y}");
        }
    }

    #[test]
    fn test_centerline_uses_line_width() {
        let geometry = stroke(Style::Basic, &[(0.0, 0.0), (10.0, 0.0)]).geometry();
        let options = TessOptions {
            line_width: 2.0,
            ..TessOptions::default()
        };
        let mesh = tessellate_geometry(&geometry, &options);

        assert!(!mesh.is_empty());
        let max_y = mesh
            .vertices
            .iter()
            .map(|v| v.position[1])
            .fold(f32::MIN, f32::max);
        assert!((max_y - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_tessellate_all_concatenates() {
        let a = stroke(Style::Interpolated, &[(0.0, 0.0), (5.0, 5.0), (10.0, 0.0)]).geometry();
        let b = stroke(Style::Calligraphy, &[(0.0, 20.0), (10.0, 20.0)]).geometry();
        let options = TessOptions::default();

        let single_a = tessellate_geometry(&a, &options);
        let single_b = tessellate_geometry(&b, &options);
        let all = tessellate_all([&a, &Geometry::Empty, &b], &options);

        assert_eq!(
            all.vertices.len(),
            single_a.vertices.len() + single_b.vertices.len()
        );
        assert_eq!(
            all.triangle_count(),
            single_a.triangle_count() + single_b.triangle_count()
        );
    }

    fn covers(mesh: &TessellatedPath, p: Point) -> bool {
        let at = |i: u32| {
            let [x, y] = mesh.vertices[i as usize].position;
            Point::new(x as f64, y as f64)
        };
        let side = |a: Point, b: Point| (b - a).cross(p - a);
        mesh.indices.chunks_exact(3).any(|tri| {
            let [a, b, c] = [at(tri[0]), at(tri[1]), at(tri[2])];
            let s = [side(a, b), side(b, c), side(c, a)];
            s.iter().all(|&d| d >= -1e-4) || s.iter().all(|&d| d <= 1e-4)
        })
    }

    #[test]
    fn test_reversal_covers_every_sample() {
        // doubling back with falling pressure crosses the last segment's
        // side walls over the small end cap
        let samples = [
            Sample::new(0.0, Point::new(0.0, 0.0)).with_force(1.0),
            Sample::new(1.0, Point::new(10.0, 0.0)).with_force(0.5),
            Sample::new(2.0, Point::new(8.0, 2.0)).with_force(0.2),
        ];
        let mut stroke = Stroke::new(Style::Fountain);
        for sample in samples {
            stroke.append(sample).unwrap();
        }
        stroke.finalize().unwrap();
        let mesh = tessellate_geometry(&stroke.geometry(), &TessOptions::default());

        for sample in &samples {
            // half the cap radius stays inside the flattened circle
            let reach = 0.5 * (2.0 * sample.force_or_default() + 0.1);
            assert!(covers(&mesh, sample.location), "hole at {:?}", sample.location);
            for k in 0..8 {
                let angle = k as f64 * FRAC_PI_4;
                let p = sample.location + Vec2::new(angle.cos(), angle.sin()) * reach;
                assert!(covers(&mesh, p), "hole at {p:?}");
            }
        }
    }
}
