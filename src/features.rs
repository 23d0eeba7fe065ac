//! Feature extraction over stroke polygons.
//!
//! The measurements the classifiers score against: corner counting on the
//! simplified polygon, an algebraic least-squares circle fit (Kasa method)
//! on the raw samples, and angular coverage around a candidate center.

use crate::geometry::{centroid, non_zero, ring};
use crate::Point;
use nalgebra::{Matrix3, Vector3};
use std::f64::consts::TAU;

/// Minimum number of samples for a meaningful circle fit.
const MIN_FIT_POINTS: usize = 6;

/// Determinant magnitude below which the normal equations are degenerate.
const DEGENERATE_DET: f64 = 1e-6;

/// Result of the least-squares circle fit
#[derive(Debug, Clone, Copy)]
pub struct CircleFit {
    pub cx: f64,
    pub cy: f64,
    /// Mean distance of the samples to the fitted center.
    pub radius: f64,
    /// Standard deviation of per-point radii over the mean radius;
    /// lower is rounder.
    pub std_rel: f64,
}

/// Count the corners of a closed polygon.
///
/// At each vertex the angle between the vectors to its neighbours is taken
/// via the dot product; a vertex counts as a corner when that angle deviates
/// from straight by more than `angle_threshold_deg`, i.e. lies strictly
/// inside `(threshold, 180 - threshold)` degrees. Near-straight vertices and
/// hairpin reversals do not count.
pub fn corner_count(polygon: &[Point], angle_threshold_deg: f64) -> usize {
    let verts = ring(polygon);
    let n = verts.len();
    if n < 3 {
        return 0;
    }

    let mut corners = 0;
    for i in 0..n {
        let prev = &verts[(i + n - 1) % n];
        let cur = &verts[i];
        let next = &verts[(i + 1) % n];

        let (ax, ay) = (prev.x - cur.x, prev.y - cur.y);
        let (bx, by) = (next.x - cur.x, next.y - cur.y);

        let denom = non_zero(ax.hypot(ay) * bx.hypot(by));
        let cos = ((ax * bx + ay * by) / denom).clamp(-1.0, 1.0);
        let degrees = cos.acos().to_degrees();

        if degrees > angle_threshold_deg && degrees < 180.0 - angle_threshold_deg {
            corners += 1;
        }
    }
    corners
}

/// Fit a circle to the samples with the Kasa algebraic least-squares method.
///
/// Coordinates are centered on the centroid before the solve to keep the
/// normal equations well conditioned. Returns `None` for too few samples or
/// degenerate (collinear) input.
pub fn fit_circle(points: &[Point]) -> Option<CircleFit> {
    if points.len() < MIN_FIT_POINTS {
        return None;
    }

    let (mx, my) = centroid(points);
    let n = points.len() as f64;

    let (mut sx, mut sy) = (0.0, 0.0);
    let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
    let (mut sxz, mut syz, mut sz) = (0.0, 0.0, 0.0);
    for p in points {
        let u = p.x - mx;
        let v = p.y - my;
        let z = u * u + v * v;
        sx += u;
        sy += v;
        sxx += u * u;
        sxy += u * v;
        syy += v * v;
        sxz += u * z;
        syz += v * z;
        sz += z;
    }

    // normal equations of u^2 + v^2 = a*u + b*v + c
    let m = Matrix3::new(sxx, sxy, sx, sxy, syy, sy, sx, sy, n);
    if m.determinant().abs() < DEGENERATE_DET {
        return None;
    }
    let solution = m.lu().solve(&Vector3::new(sxz, syz, sz))?;

    let cx = solution[0] / 2.0 + mx;
    let cy = solution[1] / 2.0 + my;

    let radii: Vec<f64> = points
        .iter()
        .map(|p| (p.x - cx).hypot(p.y - cy))
        .collect();
    let radius = radii.iter().sum::<f64>() / n;
    let variance = radii.iter().map(|r| (r - radius).powi(2)).sum::<f64>() / n;
    let std_rel = variance.sqrt() / non_zero(radius);

    Some(CircleFit {
        cx,
        cy,
        radius,
        std_rel,
    })
}

/// Total angle the points sweep around a candidate center.
///
/// Sorts the bearings of all points and subtracts the largest angular gap
/// (including the wrap-around from last back to first) from a full turn.
/// A stroke that encircles the center approaches 2*pi; an arc or a
/// back-and-forth scribble leaves a large gap.
pub fn angular_coverage(points: &[Point], cx: f64, cy: f64) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    let mut bearings: Vec<f64> = points
        .iter()
        .map(|p| (p.y - cy).atan2(p.x - cx))
        .collect();
    bearings.sort_by(f64::total_cmp);

    let mut max_gap = bearings[0] + TAU - bearings[bearings.len() - 1];
    for w in bearings.windows(2) {
        max_gap = max_gap.max(w[1] - w[0]);
    }

    (TAU - max_gap).max(0.0)
}
