//! Non-uniform rational B-spline.

use cckit_core::{Result, SplineError};
use cckit_math::interpolate::map;
use cckit_math::Point3;
use serde::{Deserialize, Serialize};

use crate::base::{SplineBase, SplineData, SplineKind};

/// Smallest spacing enforced between neighbouring knots during repair.
const KNOT_MINIMUM_DELTA: f64 = 1e-4;

/// A weighted rational basis spline over a non-decreasing knot vector.
///
/// Control points carry a parallel weight each, and the knot vector has
/// length `points + degree`. A strictly decreasing knot pair is rejected at
/// construction; repeated knots (as in clamped vectors) are repaired by
/// nudging each offender upward with a growing epsilon ladder, since
/// zero-width spans would divide by zero in the basis recurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NurbsSpline {
    data: SplineData,
    weights: Vec<f64>,
    knots: Vec<f64>,
    degree: usize,
}

/// Nudge non-increasing knots upward so every span has positive width.
///
/// The delta grows while consecutive knots stay level and resets on the
/// first genuinely increasing knot.
fn repair_knots(knots: &mut [f64]) {
    let mut delta = KNOT_MINIMUM_DELTA;
    let mut prev = knots[0];
    for knot in knots.iter_mut().skip(1) {
        if *knot <= prev {
            *knot = prev + delta;
            delta += KNOT_MINIMUM_DELTA;
        } else {
            delta = KNOT_MINIMUM_DELTA;
        }
        prev = *knot;
    }
}

impl NurbsSpline {
    /// Create a NURBS spline from control points, parallel weights, and a
    /// knot vector of length `points.len() + degree`.
    pub fn new(points: Vec<Point3>, weights: Vec<f64>, mut knots: Vec<f64>) -> Result<Self> {
        if weights.len() != points.len() {
            return Err(SplineError::Geometry(format!(
                "{} weights for {} control points",
                weights.len(),
                points.len()
            )));
        }
        if knots.len() <= points.len() {
            return Err(SplineError::InvalidKnotVector(format!(
                "knot vector of length {} needs more than {} entries",
                knots.len(),
                points.len()
            )));
        }
        for i in 0..knots.len() - 1 {
            if knots[i] > knots[i + 1] {
                return Err(SplineError::InvalidKnotVector(format!(
                    "knot values cannot decrease: {} > {} at index {}",
                    knots[i],
                    knots[i + 1],
                    i
                )));
            }
        }
        repair_knots(&mut knots);

        let degree = knots.len() - points.len();
        let mut data = SplineData::new(false);
        data.raw = points.clone();
        data.eval = points;

        Ok(Self {
            data,
            weights,
            knots,
            degree,
        })
    }

    /// Create from `(point, weight)` pairs.
    pub fn from_weighted_points<I: IntoIterator<Item = (Point3, f64)>>(
        points: I,
        knots: Vec<f64>,
    ) -> Result<Self> {
        let (points, weights): (Vec<Point3>, Vec<f64>) = points.into_iter().unzip();
        Self::new(points, weights, knots)
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Lower end of the evaluable knot domain.
    pub fn min_knot(&self) -> f64 {
        self.knots[self.degree - 1]
    }

    /// Upper end of the evaluable knot domain.
    pub fn max_knot(&self) -> f64 {
        self.knots[self.weights.len()]
    }

    /// All basis function values of the full degree at parameter `t`,
    /// one per control point.
    ///
    /// Bottom-up triangular Cox-de-Boor table: the order-1 row is the span
    /// indicator, and each pass lifts the row one degree in place.
    fn basis_values(&self, t: f64) -> Vec<f64> {
        let knots = &self.knots;
        let mut n = vec![0.0; knots.len() - 1];
        for (i, value) in n.iter_mut().enumerate() {
            *value = if knots[i] <= t && t < knots[i + 1] {
                1.0
            } else {
                0.0
            };
        }

        for k in 2..=self.degree {
            for i in 0..knots.len() - k {
                let left = (t - knots[i]) / (knots[i + k - 1] - knots[i]);
                let right = (knots[i + k] - t) / (knots[i + k] - knots[i + 1]);
                n[i] = left * n[i] + right * n[i + 1];
            }
        }

        n.truncate(self.data.raw.len());
        n
    }

    /// Rational evaluation at a knot-domain parameter.
    pub fn evaluate_at(&self, t: f64) -> Point3 {
        let points = &self.data.raw;
        if points.is_empty() {
            return Point3::ZERO;
        }

        let basis = self.basis_values(t);
        let mut sum = Point3::ZERO;
        let mut denominator = 0.0;
        for (i, &point) in points.iter().enumerate() {
            let weighted = self.weights[i] * basis[i];
            sum += point * weighted;
            denominator += weighted;
        }

        if denominator.abs() < 1e-12 {
            sum
        } else {
            sum / denominator
        }
    }
}

impl SplineBase for NurbsSpline {
    fn data(&self) -> &SplineData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut SplineData {
        &mut self.data
    }

    fn kind(&self) -> SplineKind {
        SplineKind::Nurbs
    }

    fn build_eval_points(&self, raw: &[Point3], _closed: bool) -> Vec<Point3> {
        raw.to_vec()
    }

    /// Arc lengths are never cached for the rational basis; global blends
    /// map over the knot domain instead of a length table.
    fn compute_total_length_impl(&mut self) {}

    fn interpolate_segment(&self, local: f64, _index: usize) -> Point3 {
        self.evaluate_at(local)
    }

    fn interpolate(&self, blend: f64) -> Point3 {
        let points = &self.data.raw;
        if points.is_empty() {
            return Point3::ZERO;
        }
        if blend <= 0.0 {
            return points[0];
        }
        if blend >= 1.0 {
            return points[points.len() - 1];
        }
        let t = map(blend, 0.0, 1.0, self.min_knot(), self.max_knot());
        self.evaluate_at(t)
    }

    /// Appends with weight 1 and a uniform knot extension so the parallel
    /// arrays stay consistent with the degree.
    fn add_point(&mut self, point: Point3) {
        let auto = !self.data.editing;
        self.begin_edit();
        self.data.raw.push(point);
        self.weights.push(1.0);
        let last = self.knots.last().copied().unwrap_or(0.0);
        self.knots.push(last + 1.0);
        if auto {
            self.end_edit();
        }
    }

    fn remove_point(&mut self, point: Point3) {
        let auto = !self.data.editing;
        self.begin_edit();
        if let Some(index) = self.data.raw.iter().position(|&p| p == point) {
            self.data.raw.remove(index);
            self.weights.remove(index);
            self.knots.pop();
        }
        if auto {
            self.end_edit();
        }
    }

    fn clear(&mut self) {
        self.data.raw.clear();
        self.data.eval.clear();
        self.data.reset_lengths();
        self.weights.clear();
        self.knots.clear();
    }
}
