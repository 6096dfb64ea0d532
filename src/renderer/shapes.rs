//! Path geometry for the shapes the game draws
//!
//! Kept free of canvas types so the vertex math has plain unit tests.

/// Vertices of an n-pointed star, alternating outer and inner radius,
/// starting from the top point and winding clockwise
pub fn star_vertices(
    cx: f64,
    cy: f64,
    points: u32,
    outer_radius: f64,
    inner_radius: f64,
) -> Vec<(f64, f64)> {
    let step = std::f64::consts::PI / points as f64;
    (0..2 * points)
        .map(|i| {
            let r = if i % 2 == 1 {
                inner_radius
            } else {
                outer_radius
            };
            let a = i as f64 * step;
            (cx + r * a.sin(), cy - r * a.cos())
        })
        .collect()
}

/// Apex-up triangle inscribed in the enemy's bounding square
pub fn triangle_vertices(cx: f64, cy: f64, size: f64) -> [(f64, f64); 3] {
    [
        (cx, cy - size),
        (cx - size, cy + size),
        (cx + size, cy + size),
    ]
}

/// Top-left corner and side length of the enemy square
pub fn square_rect(cx: f64, cy: f64, size: f64) -> (f64, f64, f64) {
    (cx - size, cy - size, size * 2.0)
}

/// A heart outline as four cubic bezier segments
pub struct HeartPath {
    pub start: (f64, f64),
    /// Each segment: control 1, control 2, end point
    pub curves: [[(f64, f64); 3]; 4],
}

/// Heart anchored at its top notch `(x, y)`, roughly `3 * size` tall
pub fn heart_path(x: f64, y: f64, size: f64) -> HeartPath {
    HeartPath {
        start: (x, y),
        curves: [
            [(x, y - size), (x - size, y - size), (x - size, y)],
            [(x - size, y + size), (x, y + size * 2.0), (x, y + size * 3.0)],
            [(x, y + size * 2.0), (x + size, y + size), (x + size, y)],
            [(x + size, y - size), (x, y - size), (x, y)],
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_vertex_count() {
        assert_eq!(star_vertices(0.0, 0.0, 5, 10.0, 5.0).len(), 10);
    }

    #[test]
    fn test_star_starts_at_top() {
        let verts = star_vertices(100.0, 100.0, 5, 10.0, 5.0);
        assert!((verts[0].0 - 100.0).abs() < 1e-9);
        assert!((verts[0].1 - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_star_alternates_radii() {
        let verts = star_vertices(0.0, 0.0, 5, 10.0, 5.0);
        for (i, (x, y)) in verts.iter().enumerate() {
            let r = (x * x + y * y).sqrt();
            let expected = if i % 2 == 1 { 5.0 } else { 10.0 };
            assert!((r - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_triangle_apex_up() {
        let [apex, left, right] = triangle_vertices(50.0, 50.0, 20.0);
        assert_eq!(apex, (50.0, 30.0));
        assert_eq!(left, (50.0 - 20.0, 70.0));
        assert_eq!(right, (70.0, 70.0));
    }

    #[test]
    fn test_square_rect_centered() {
        let (x, y, side) = square_rect(50.0, 60.0, 25.0);
        assert_eq!((x, y), (25.0, 35.0));
        assert_eq!(side, 50.0);
    }

    #[test]
    fn test_heart_closes() {
        let heart = heart_path(40.0, 40.0, 15.0);
        let last = heart.curves[3][2];
        assert_eq!(heart.start, last);
    }
}
