//! Danger zones on a floor plan

use geo::{Coord, Rect};
use serde::{Deserialize, Serialize};

/// Axis-aligned danger region.
///
/// A `hard` zone makes every passage crossing it impassable. A soft zone only
/// makes such passages expensive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardZone {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub hard: bool,
}

impl HazardZone {
    pub fn new(id: impl Into<String>, x: f64, y: f64, width: f64, height: f64, hard: bool) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            width,
            height,
            hard,
        }
    }

    /// Zone extent. Negative sizes are normalized by `Rect`.
    pub fn rect(&self) -> Rect<f64> {
        Rect::new(
            Coord {
                x: self.x,
                y: self.y,
            },
            Coord {
                x: self.x + self.width,
                y: self.y + self.height,
            },
        )
    }

    pub(crate) fn is_finite(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
    }
}
