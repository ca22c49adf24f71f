//! Segment and point queries against axis-aligned hazard rectangles

use geo::{Contains, Coord, Distance, Euclidean, Intersects, Line, Point, Rect};

/// Checks whether the segment `p1`-`p2` enters `rect`.
///
/// An endpoint strictly inside the rectangle counts, as does any contact with
/// one of the four boundary sides (touching a corner included). Zero-length
/// segments degrade to a point test.
pub fn segment_intersects_rect(p1: Coord<f64>, p2: Coord<f64>, rect: &Rect<f64>) -> bool {
    if rect.contains(&p1) || rect.contains(&p2) {
        return true;
    }

    let segment = Line::new(p1, p2);
    rect.to_lines().iter().any(|side| segment.intersects(side))
}

/// Euclidean distance from `p` to the closest point of `rect`, zero when inside
pub fn point_to_rect_distance(p: Coord<f64>, rect: &Rect<f64>) -> f64 {
    let (min, max) = (rect.min(), rect.max());
    // max/min instead of clamp: no panic on NaN bounds
    let nearest = Coord {
        x: p.x.max(min.x).min(max.x),
        y: p.y.max(min.y).min(max.y),
    };
    distance(p, nearest)
}

/// Straight-line distance between two floor positions
pub fn distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    Euclidean.distance(Point::from(a), Point::from(b))
}

pub fn midpoint(a: Coord<f64>, b: Coord<f64>) -> Coord<f64> {
    Coord {
        x: (a.x + b.x) / 2.0,
        y: (a.y + b.y) / 2.0,
    }
}
