use super::{Point2, TOLERANCE};

/// Even-odd point-in-polygon test.
///
/// Polygons with fewer than 3 vertices contain nothing.
#[must_use]
pub fn contains_point(points: &[Point2], p: &Point2) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (&points[i], &points[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Returns `true` if the two points coincide within [`TOLERANCE`].
#[must_use]
pub fn points_coincide(a: &Point2, b: &Point2) -> bool {
    (a.x - b.x).abs() < TOLERANCE && (a.y - b.y).abs() < TOLERANCE
}

/// Finds the ring edge whose endpoints are exactly `start` and `end`, in
/// either direction, and returns the index of its first vertex.
#[must_use]
pub fn find_ring_edge(points: &[Point2], start: &Point2, end: &Point2) -> Option<usize> {
    let n = points.len();
    if n < 2 {
        return None;
    }
    (0..n).find(|&i| {
        let a = &points[i];
        let b = &points[(i + 1) % n];
        (points_coincide(a, start) && points_coincide(b, end))
            || (points_coincide(a, end) && points_coincide(b, start))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn contains_interior_and_rejects_exterior() {
        let sq = square();
        assert!(contains_point(&sq, &Point2::new(0.5, 0.5)));
        assert!(!contains_point(&sq, &Point2::new(1.5, 0.5)));
        assert!(!contains_point(&sq, &Point2::new(0.5, -0.1)));
    }

    #[test]
    fn contains_concave_notch() {
        // L-shape: the notch at (1.5, 1.5) is outside.
        let l = vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        assert!(contains_point(&l, &Point2::new(0.5, 1.5)));
        assert!(!contains_point(&l, &Point2::new(1.5, 1.5)));
    }

    #[test]
    fn ring_edge_lookup_including_closing_edge() {
        let sq = square();
        assert_eq!(
            find_ring_edge(&sq, &Point2::new(1.0, 0.0), &Point2::new(1.0, 1.0)),
            Some(1)
        );
        assert_eq!(
            find_ring_edge(&sq, &Point2::new(0.0, 0.0), &Point2::new(0.0, 1.0)),
            Some(3)
        );
        assert_eq!(
            find_ring_edge(&sq, &Point2::new(0.0, 0.0), &Point2::new(1.0, 1.0)),
            None
        );
    }
}
