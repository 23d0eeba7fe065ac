//! Inkshape - freehand stroke recognition
//!
//! Classifies a raw sequence of 2D points captured from pointer/touch
//! movement into a rectangle, circle or triangle, or keeps it as a free-form
//! polygon when nothing fits well enough.
//!
//! The pipeline runs one direction: raw points are topologically closed,
//! simplified with Ramer-Douglas-Peucker, measured (corners, circle fit,
//! angular coverage), scored by one classifier per shape family, and the most
//! confident candidate wins. Everything is a pure function of the input
//! stroke; there is no state across calls.

mod features;
mod geometry;
mod path;
mod shapes;

pub use features::{angular_coverage, corner_count, fit_circle, CircleFit};
pub use geometry::{bounding_box, centroid, perimeter, polygon_area, BoundingBox};
pub use path::{close_path, is_closed, simplify};
pub use shapes::{recognize, recognize_with, RecognizedShape, RecognizerParams};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single point in a stroke
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub pressure: Option<f64>,
    pub timestamp: u64,
}

impl Point {
    /// Create a point without sampling metadata.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            pressure: None,
            timestamp: 0,
        }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Rendering attributes carried along with a stroke.
///
/// The recognizer never interprets these; they are copied verbatim into the
/// resulting shape so the caller can draw it in the same style.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: String,
    pub width: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: "#000000".to_string(),
            width: 2.0,
        }
    }
}

/// A stroke consisting of multiple points, sampled during one gesture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stroke {
    pub id: Uuid,
    pub points: Vec<Point>,
    pub style: StrokeStyle,
}

impl Stroke {
    /// Start an empty stroke (gesture down).
    pub fn new(style: StrokeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: Vec::new(),
            style,
        }
    }

    /// Append a sampled point (gesture move).
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Finalize the stroke (gesture up) and classify it.
    pub fn recognize(&self) -> RecognizedShape {
        shapes::recognize(&self.points, self.style.clone())
    }
}
