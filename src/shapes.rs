//! Shape classification and arbitration.
//!
//! Runs one classifier per shape family (rectangle, circle, triangle) over a
//! simplified stroke, scores each candidate, and selects the most confident
//! one - or falls back to a free-form polygon when nothing scores above the
//! confidence floor.

use crate::features::{angular_coverage, corner_count, fit_circle};
use crate::geometry::{bounding_box, non_zero, perimeter, polygon_area, ring, BoundingBox};
use crate::path::{close_path, is_closed, simplify};
use crate::{Point, StrokeStyle};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// A recognized shape carrying the original stroke's style
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RecognizedShape {
    /// Axis-aligned rectangle, top-left anchored.
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        style: StrokeStyle,
    },
    /// Circle from the least-squares fit, or the bounding-box fallback.
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
        style: StrokeStyle,
    },
    /// Triangle spanned by the three most spread-out simplified vertices.
    Triangle {
        vertices: [Point; 3],
        style: StrokeStyle,
    },
    /// Unclassified stroke kept as a closed polygon.
    Freeform {
        points: Vec<Point>,
        style: StrokeStyle,
    },
}

impl RecognizedShape {
    /// The stroke style carried through from the input.
    pub fn style(&self) -> &StrokeStyle {
        match self {
            RecognizedShape::Rectangle { style, .. } => style,
            RecognizedShape::Circle { style, .. } => style,
            RecognizedShape::Triangle { style, .. } => style,
            RecognizedShape::Freeform { style, .. } => style,
        }
    }

    /// Variant name, for logging and quick dispatch.
    pub fn kind(&self) -> &'static str {
        match self {
            RecognizedShape::Rectangle { .. } => "rectangle",
            RecognizedShape::Circle { .. } => "circle",
            RecognizedShape::Triangle { .. } => "triangle",
            RecognizedShape::Freeform { .. } => "freeform",
        }
    }
}

/// Tuning parameters for stroke recognition
#[derive(Debug, Clone)]
pub struct RecognizerParams {
    /// Endpoint gap below which `close_path` leaves the stroke untouched.
    pub min_close_distance: f64,
    /// Absolute floor of the closure-test threshold.
    pub close_abs_floor: f64,
    /// Closure-test threshold as a fraction of the traversed length.
    pub close_perimeter_ratio: f64,
    /// Smallest simplification tolerance.
    pub epsilon_floor: f64,
    /// Simplification tolerance as a fraction of the bounding-box diagonal.
    pub epsilon_diag_ratio: f64,
    /// Interior-angle deviation (degrees) for a vertex to count as a corner.
    pub corner_angle_deg: f64,
    /// Smallest bounding-box dimension a circle candidate may have.
    pub min_circle_extent: f64,
    /// Fraction of a full turn the stroke must sweep around the circle center.
    pub min_turn_fraction: f64,
    /// Circularity below which the circle classifier rejects.
    pub circle_min_circularity: f64,
    /// Relative radius spread at which a circle fit scores zero quality.
    pub roundness_tolerance: f64,
    /// Area over bounding-box area below which the rectangle classifier rejects.
    pub rect_min_rectangularity: f64,
    /// Circularity above which a stroke is too round to be a rectangle.
    pub rect_max_circularity: f64,
    /// Aspect-ratio deviation from 1 within which a rectangle snaps to a square.
    pub square_aspect_tolerance: f64,
    /// Largest corner count the triangle classifier tolerates.
    pub triangle_max_corners: usize,
    /// Candidates scoring below this never win arbitration.
    pub confidence_floor: f64,
}

impl Default for RecognizerParams {
    fn default() -> Self {
        Self {
            min_close_distance: 8.0,
            close_abs_floor: 10.0,
            close_perimeter_ratio: 0.05,
            epsilon_floor: 3.0,
            epsilon_diag_ratio: 0.01,
            corner_angle_deg: 35.0,
            min_circle_extent: 20.0,
            min_turn_fraction: 0.75,
            circle_min_circularity: 0.82,
            roundness_tolerance: 0.2,
            rect_min_rectangularity: 0.65,
            rect_max_circularity: 0.88,
            square_aspect_tolerance: 0.12,
            triangle_max_corners: 5,
            confidence_floor: 0.4,
        }
    }
}

/// Measurements shared by every classifier, computed once per stroke.
struct StrokeMetrics<'a> {
    /// Whether the raw stroke's endpoints coincide within tolerance.
    closed: bool,
    bounds: BoundingBox,
    /// Shoelace area of the simplified polygon.
    area: f64,
    /// Isoperimetric quotient 4*pi*A/P^2 of the simplified polygon.
    circularity: f64,
    simplified: &'a [Point],
    /// The topologically closed original samples.
    raw: &'a [Point],
}

/// Classify a stroke with the default parameters.
pub fn recognize(points: &[Point], style: StrokeStyle) -> RecognizedShape {
    recognize_with(points, style, &RecognizerParams::default())
}

/// Classify a stroke into the best-fitting shape.
///
/// Total over any input: degenerate or unclassifiable strokes come back as
/// `Freeform` carrying the (simplified, closed) path. The input is never
/// mutated and the style is passed through verbatim.
pub fn recognize_with(
    points: &[Point],
    style: StrokeStyle,
    params: &RecognizerParams,
) -> RecognizedShape {
    let closed_path = close_path(points, params.min_close_distance);
    if closed_path.len() < 3 {
        log::trace!("stroke too short to classify ({} points)", closed_path.len());
        return RecognizedShape::Freeform {
            points: closed_path,
            style,
        };
    }

    let closed = is_closed(points, params.close_abs_floor, params.close_perimeter_ratio);
    let bounds = bounding_box(&closed_path);
    let epsilon = params
        .epsilon_floor
        .max(bounds.diagonal() * params.epsilon_diag_ratio);
    let simplified = simplify(&closed_path, epsilon);

    let perim = non_zero(perimeter(&simplified));
    let area = polygon_area(&simplified);
    let circularity = 4.0 * PI * area / (perim * perim);

    let metrics = StrokeMetrics {
        closed,
        bounds,
        area,
        circularity,
        simplified: &simplified,
        raw: &closed_path,
    };

    let candidates = [
        classify_circle(&metrics, &style, params),
        classify_rectangle(&metrics, &style, params),
        classify_triangle(&metrics, &style, params),
    ];

    // highest confidence wins; earlier candidates win ties
    let mut best: Option<(RecognizedShape, f64)> = None;
    for (shape, confidence) in candidates.into_iter().flatten() {
        log::debug!("candidate {} scored {:.3}", shape.kind(), confidence);
        if confidence < params.confidence_floor {
            continue;
        }
        if best.as_ref().map_or(true, |(_, c)| confidence > *c) {
            best = Some((shape, confidence));
        }
    }

    match best {
        Some((shape, confidence)) => {
            log::debug!("classified stroke as {} ({:.3})", shape.kind(), confidence);
            shape
        }
        None => {
            log::trace!("no candidate above the confidence floor, keeping freeform");
            RecognizedShape::Freeform {
                points: simplified,
                style,
            }
        }
    }
}

/// Score the stroke as an axis-aligned rectangle.
fn classify_rectangle(
    metrics: &StrokeMetrics,
    style: &StrokeStyle,
    params: &RecognizerParams,
) -> Option<(RecognizedShape, f64)> {
    if !metrics.closed {
        return None;
    }

    let rectangularity = metrics.area / non_zero(metrics.bounds.area());
    if rectangularity < params.rect_min_rectangularity {
        return None;
    }
    if metrics.circularity > params.rect_max_circularity {
        return None;
    }

    let confidence = 0.6 * rectangularity + 0.4 * (1.0 - metrics.circularity);

    let b = metrics.bounds;
    let aspect = b.width / non_zero(b.height);
    let (x, y, width, height) = if (aspect - 1.0).abs() <= params.square_aspect_tolerance {
        // snap near-squares to an exact square around the same center
        let side = (b.width + b.height) / 2.0;
        let (cx, cy) = b.center();
        (cx - side / 2.0, cy - side / 2.0, side, side)
    } else {
        (b.x, b.y, b.width, b.height)
    };

    Some((
        RecognizedShape::Rectangle {
            x,
            y,
            width,
            height,
            style: style.clone(),
        },
        confidence,
    ))
}

/// Score the stroke as a circle.
fn classify_circle(
    metrics: &StrokeMetrics,
    style: &StrokeStyle,
    params: &RecognizerParams,
) -> Option<(RecognizedShape, f64)> {
    if !metrics.closed {
        return None;
    }
    if metrics.bounds.min_extent() < params.min_circle_extent {
        return None;
    }
    if metrics.circularity < params.circle_min_circularity {
        return None;
    }

    let circ_score = ((metrics.circularity - params.circle_min_circularity)
        / (1.0 - params.circle_min_circularity))
        .clamp(0.0, 1.0);
    let min_coverage = params.min_turn_fraction * TAU;

    if let Some(fit) = fit_circle(metrics.raw) {
        // a numerically fine fit can still be an arc; require a real loop
        if angular_coverage(metrics.raw, fit.cx, fit.cy) < min_coverage {
            return None;
        }
        let quality = 1.0 - (fit.std_rel / params.roundness_tolerance).min(1.0);
        let confidence = 0.5 * circ_score + 0.5 * quality;
        return Some((
            RecognizedShape::Circle {
                cx: fit.cx,
                cy: fit.cy,
                radius: fit.radius,
                style: style.clone(),
            },
            confidence,
        ));
    }

    // no usable fit: bounding-box estimate at reduced confidence
    let (cx, cy) = metrics.bounds.center();
    if angular_coverage(metrics.raw, cx, cy) < min_coverage {
        return None;
    }
    Some((
        RecognizedShape::Circle {
            cx,
            cy,
            radius: metrics.bounds.min_extent() / 2.0,
            style: style.clone(),
        },
        0.6 * circ_score,
    ))
}

/// Score the stroke as a triangle.
fn classify_triangle(
    metrics: &StrokeMetrics,
    style: &StrokeStyle,
    params: &RecognizerParams,
) -> Option<(RecognizedShape, f64)> {
    if !metrics.closed {
        return None;
    }

    let corners = corner_count(metrics.simplified, params.corner_angle_deg);
    if corners < 3 || corners > params.triangle_max_corners {
        return None;
    }

    let vertices = spread_triple(metrics.simplified)?;
    let corner_score = 1.0 - 0.25 * (corners - 3) as f64;
    let confidence = 0.5 * corner_score + 0.5 * (1.0 - metrics.circularity).clamp(0.0, 1.0);

    Some((
        RecognizedShape::Triangle {
            vertices,
            style: style.clone(),
        },
        confidence,
    ))
}

/// Pick the three vertices with the largest pairwise-distance sum.
///
/// Brute force over all triples; the polygon has already been simplified and
/// corner-gated, so the candidate set is small. Guards against choosing three
/// clustered or nearly-collinear vertices when the polygon has more than
/// three of them.
fn spread_triple(polygon: &[Point]) -> Option<[Point; 3]> {
    let verts = ring(polygon);
    if verts.len() < 3 {
        return None;
    }

    let mut best: Option<([usize; 3], f64)> = None;
    for i in 0..verts.len() {
        for j in (i + 1)..verts.len() {
            for k in (j + 1)..verts.len() {
                let span = verts[i].distance_to(&verts[j])
                    + verts[j].distance_to(&verts[k])
                    + verts[k].distance_to(&verts[i]);
                if best.map_or(true, |(_, s)| span > s) {
                    best = Some(([i, j, k], span));
                }
            }
        }
    }

    best.map(|([i, j, k], _)| [verts[i].clone(), verts[j].clone(), verts[k].clone()])
}
