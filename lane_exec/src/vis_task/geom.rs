//! Homogeneous coordinate geometry helpers
//!
//! Points and lines are represented as nalgebra `Vector3` values in
//! homogeneous form (x, y, 1), which makes line construction a cross product
//! and point/line incidence a dot product.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::{Point2, Vector3};

// Internal
use super::VisTaskError;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Polygons with twice-area below this are treated as degenerate.
const MIN_POLYGON_AREA2: f64 = 1e-9;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Lift a pixel point into homogeneous coordinates.
pub fn hom(point: &Point2<f64>) -> Vector3<f64> {
    Vector3::new(point.x, point.y, 1.0)
}

/// Homogeneous line through two homogeneous points.
pub fn line_through(p: &Vector3<f64>, q: &Vector3<f64>) -> Vector3<f64> {
    p.cross(q)
}

/// Signed incidence measure between a homogeneous point and line, divided by
/// the given empirical scale.
pub fn point_line_dist_scaled(
    point: &Vector3<f64>,
    line: &Vector3<f64>,
    scale: f64
) -> f64 {
    point.dot(line) / scale
}

/// Area weighted centroid of the closed polygon formed by `boundary_a`
/// followed by `boundary_b` reversed.
///
/// For a real lane pair the two boundaries are roughly parallel and
/// non-crossing, so the polygon is simple. Polygons with fewer than three
/// vertices or with (near) zero area fail with `DegenerateGeometry` rather
/// than producing a non-finite centroid.
pub fn polygon_centroid(
    boundary_a: &[Point2<f64>],
    boundary_b: &[Point2<f64>]
) -> Result<Point2<f64>, VisTaskError> {

    let verts: Vec<Point2<f64>> = boundary_a
        .iter()
        .chain(boundary_b.iter().rev())
        .copied()
        .collect();

    if verts.len() < 3 {
        return Err(VisTaskError::DegenerateGeometry(
            "lane polygon has fewer than 3 vertices".into()
        ));
    }

    // Shoelace accumulation over the closed ring
    let mut area2 = 0f64;
    let mut cx = 0f64;
    let mut cy = 0f64;

    for i in 0..verts.len() {
        let p = verts[i];
        let q = verts[(i + 1) % verts.len()];

        let w = p.x * q.y - q.x * p.y;
        area2 += w;
        cx += (p.x + q.x) * w;
        cy += (p.y + q.y) * w;
    }

    if area2.abs() < MIN_POLYGON_AREA2 {
        return Err(VisTaskError::DegenerateGeometry(
            "lane polygon has zero area".into()
        ));
    }

    Ok(Point2::new(cx / (3.0 * area2), cy / (3.0 * area2)))
}

/// Sign of a value, with an exactly zero input giving zero.
///
/// Used for the parallel lines law, where a zero y component means the lines
/// are parallel and the error must be zero rather than taking either sign.
pub fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    }
    else if value < 0.0 {
        -1.0
    }
    else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn points(coords: &[(f64, f64)]) -> Vec<Point2<f64>> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    #[test]
    fn test_line_through_contains_both_points() {
        let p = Vector3::new(100.0, 600.0, 1.0);
        let q = Vector3::new(120.0, 200.0, 1.0);

        let line = line_through(&p, &q);

        assert!(p.dot(&line).abs() < 1e-9);
        assert!(q.dot(&line).abs() < 1e-9);
    }

    #[test]
    fn test_point_line_dist_sign() {
        // Vertical line at x = 320 running upwards (near y 500 to far y 0)
        let line = line_through(
            &Vector3::new(320.0, 500.0, 1.0),
            &Vector3::new(320.0, 0.0, 1.0)
        );

        // Points left of the line give negative values, right positive
        assert!(point_line_dist_scaled(&Vector3::new(200.0, 450.0, 1.0), &line, 1000.0) < 0.0);
        assert!(point_line_dist_scaled(&Vector3::new(400.0, 450.0, 1.0), &line, 1000.0) > 0.0);
        assert_eq!(
            point_line_dist_scaled(&Vector3::new(320.0, 123.0, 1.0), &line, 1000.0),
            0.0
        );
    }

    #[test]
    fn test_polygon_centroid_rectangle() {
        // Left and right edges of a 200 x 400 rectangle
        let left = points(&[(100.0, 600.0), (100.0, 200.0)]);
        let right = points(&[(300.0, 600.0), (300.0, 200.0)]);

        let cent = polygon_centroid(&left, &right).unwrap();

        assert!((cent.x - 200.0).abs() < 1e-9);
        assert!((cent.y - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_polygon_centroid_degenerate() {
        // Two vertices cannot form a polygon
        let left = points(&[(100.0, 600.0)]);
        let right = points(&[(300.0, 600.0)]);
        assert!(polygon_centroid(&left, &right).is_err());

        // Collinear boundaries give a zero area polygon
        let left = points(&[(100.0, 600.0), (100.0, 400.0)]);
        let right = points(&[(100.0, 200.0), (100.0, 100.0)]);
        assert!(polygon_centroid(&left, &right).is_err());
    }

    #[test]
    fn test_sign() {
        assert_eq!(sign(3.2), 1.0);
        assert_eq!(sign(-0.1), -1.0);
        assert_eq!(sign(0.0), 0.0);
    }
}
