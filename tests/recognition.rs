//! End-to-end recognition properties.
//!
//! Exercises the full pipeline (closing, simplification, feature extraction,
//! classification) through the public `recognize` entry point.

use inkshape::{recognize, Point, RecognizedShape, StrokeStyle};
use std::f64::consts::TAU;

fn style() -> StrokeStyle {
    StrokeStyle::default()
}

fn circle_points(cx: f64, cy: f64, radius: f64, count: usize) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let angle = TAU * i as f64 / count as f64;
            Point::new(cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect()
}

/// Sample `per_edge` points along each edge of a closed polygon outline,
/// starting at the first vertex and ending back on it.
fn sample_outline(corners: &[(f64, f64)], per_edge: usize) -> Vec<Point> {
    let mut points = Vec::new();
    for i in 0..corners.len() {
        let (x0, y0) = corners[i];
        let (x1, y1) = corners[(i + 1) % corners.len()];
        for step in 0..per_edge {
            let t = step as f64 / per_edge as f64;
            points.push(Point::new(x0 + t * (x1 - x0), y0 + t * (y1 - y0)));
        }
    }
    points.push(Point::new(corners[0].0, corners[0].1));
    points
}

fn scale(points: &[Point], factor: f64) -> Vec<Point> {
    points
        .iter()
        .map(|p| Point::new(p.x * factor, p.y * factor))
        .collect()
}

#[test]
fn square_outline_is_a_rectangle() {
    let points = sample_outline(
        &[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)],
        10,
    );
    match recognize(&points, style()) {
        RecognizedShape::Rectangle {
            width, height, x, y, ..
        } => {
            assert!((width - 100.0).abs() < 2.0);
            assert!((height - 100.0).abs() < 2.0);
            assert!(x.abs() < 2.0 && y.abs() < 2.0);
        }
        other => panic!("expected rectangle, got {:?}", other),
    }
}

#[test]
fn dense_circle_samples_are_a_circle() {
    let points = circle_points(200.0, 150.0, 50.0, 36);
    match recognize(&points, style()) {
        RecognizedShape::Circle { cx, cy, radius, .. } => {
            assert!((cx - 200.0).abs() < 3.0);
            assert!((cy - 150.0).abs() < 3.0);
            assert!((radius - 50.0).abs() < 5.0);
        }
        other => panic!("expected circle, got {:?}", other),
    }
}

#[test]
fn closed_triangle_is_a_triangle() {
    let points = sample_outline(&[(0.0, 0.0), (100.0, 0.0), (50.0, 90.0)], 12);
    match recognize(&points, style()) {
        RecognizedShape::Triangle { vertices, .. } => {
            for expected in [(0.0, 0.0), (100.0, 0.0), (50.0, 90.0)] {
                assert!(
                    vertices
                        .iter()
                        .any(|v| (v.x - expected.0).abs() < 2.0 && (v.y - expected.1).abs() < 2.0),
                    "missing vertex near {:?}",
                    expected
                );
            }
        }
        other => panic!("expected triangle, got {:?}", other),
    }
}

#[test]
fn open_scribble_never_becomes_a_closed_shape() {
    let points: Vec<Point> = (0..60)
        .map(|i| Point::new(i as f64 * 8.0, if i % 2 == 0 { 0.0 } else { 35.0 }))
        .collect();
    assert_eq!(recognize(&points, style()).kind(), "freeform");
}

#[test]
fn degenerate_strokes_degrade_gracefully() {
    // single point
    match recognize(&[Point::new(7.0, 7.0)], style()) {
        RecognizedShape::Freeform { points, .. } => {
            assert_eq!(points.len(), 1);
            assert!(points[0].x.is_finite() && points[0].y.is_finite());
        }
        other => panic!("expected freeform, got {:?}", other),
    }

    // two identical points
    let twin = vec![Point::new(7.0, 7.0), Point::new(7.0, 7.0)];
    match recognize(&twin, style()) {
        RecognizedShape::Freeform { points, .. } => {
            assert!(points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        }
        other => panic!("expected freeform, got {:?}", other),
    }

    // collinear points cannot crash the circle fit
    let line: Vec<Point> = (0..30).map(|i| Point::new(i as f64 * 5.0, i as f64 * 5.0)).collect();
    assert_eq!(recognize(&line, style()).kind(), "freeform");
}

#[test]
fn classification_is_scale_invariant() {
    let square = sample_outline(
        &[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)],
        10,
    );
    let circle = circle_points(0.0, 0.0, 50.0, 36);

    for factor in [1.0, 3.0] {
        match recognize(&scale(&square, factor), style()) {
            RecognizedShape::Rectangle { width, height, .. } => {
                assert!((width - 100.0 * factor).abs() < 2.0 * factor);
                assert!((height - 100.0 * factor).abs() < 2.0 * factor);
            }
            other => panic!("expected rectangle at scale {factor}, got {:?}", other),
        }
        match recognize(&scale(&circle, factor), style()) {
            RecognizedShape::Circle { radius, .. } => {
                assert!((radius - 50.0 * factor).abs() < 5.0 * factor);
            }
            other => panic!("expected circle at scale {factor}, got {:?}", other),
        }
    }
}

#[test]
fn nearly_closed_and_explicitly_closed_strokes_agree() {
    // the raw sampling leaves a small endpoint gap (inside the closure
    // tolerance); appending the first point explicitly must not change the
    // classification
    let gap = circle_points(0.0, 0.0, 50.0, 36);
    let mut explicit = gap.clone();
    explicit.push(explicit[0].clone());

    let (a, b) = (recognize(&explicit, style()), recognize(&gap, style()));
    match (&a, &b) {
        (
            RecognizedShape::Circle { cx: ax, cy: ay, radius: ar, .. },
            RecognizedShape::Circle { cx: bx, cy: by, radius: br, .. },
        ) => {
            assert!((ax - bx).abs() < 1.0);
            assert!((ay - by).abs() < 1.0);
            assert!((ar - br).abs() < 1.0);
        }
        _ => panic!("expected circles, got {:?} and {:?}", a, b),
    }
}

#[test]
fn recognized_shapes_are_idempotent() {
    // resample each produced descriptor's boundary and classify again
    let square = sample_outline(
        &[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)],
        10,
    );
    if let RecognizedShape::Rectangle {
        x,
        y,
        width,
        height,
        ..
    } = recognize(&square, style())
    {
        let resampled = sample_outline(
            &[
                (x, y),
                (x + width, y),
                (x + width, y + height),
                (x, y + height),
            ],
            10,
        );
        assert_eq!(recognize(&resampled, style()).kind(), "rectangle");
    } else {
        panic!("expected rectangle");
    }

    let circle = circle_points(40.0, -20.0, 60.0, 36);
    if let RecognizedShape::Circle { cx, cy, radius, .. } = recognize(&circle, style()) {
        let resampled = circle_points(cx, cy, radius, 36);
        assert_eq!(recognize(&resampled, style()).kind(), "circle");
    } else {
        panic!("expected circle");
    }

    let triangle = sample_outline(&[(0.0, 0.0), (100.0, 0.0), (50.0, 90.0)], 12);
    if let RecognizedShape::Triangle { vertices, .. } = recognize(&triangle, style()) {
        let corners: Vec<(f64, f64)> = vertices.iter().map(|v| (v.x, v.y)).collect();
        let resampled = sample_outline(&corners, 12);
        assert_eq!(recognize(&resampled, style()).kind(), "triangle");
    } else {
        panic!("expected triangle");
    }
}
