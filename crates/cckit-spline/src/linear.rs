//! Straight-segment spline.

use cckit_math::{Point3, Segment3};
use serde::{Deserialize, Serialize};

use crate::base::{SplineBase, SplineData, SplineKind};

/// A polyline spline: consecutive control points form straight segments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinearSpline {
    data: SplineData,
    segments: Vec<Segment3>,
}

impl LinearSpline {
    pub fn new(closed: bool) -> Self {
        Self {
            data: SplineData::new(closed),
            segments: Vec::new(),
        }
    }

    pub fn from_points<I: IntoIterator<Item = Point3>>(points: I, closed: bool) -> Self {
        let mut spline = Self::new(closed);
        spline.add_points(points);
        spline
    }

    /// Projects `point` onto the segments with indices in `[start, end)`,
    /// wrapping past the segment count, and returns the nearest projection.
    pub fn closest_point_in_range(&self, point: Point3, start: usize, mut end: usize) -> Point3 {
        if self.segments.is_empty() {
            return Point3::ZERO;
        }
        if end < start {
            end += self.segments.len();
        }
        let mut best = Point3::ZERO;
        let mut best_dist_sq = f64::MAX;
        for i in start..end {
            let segment = &self.segments[i % self.segments.len()];
            let candidate = segment.closest_point(point);
            let dist_sq = candidate.distance_squared(point);
            if dist_sq < best_dist_sq {
                best_dist_sq = dist_sq;
                best = candidate;
            }
        }
        best
    }
}

impl SplineBase for LinearSpline {
    fn data(&self) -> &SplineData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut SplineData {
        &mut self.data
    }

    fn kind(&self) -> SplineKind {
        SplineKind::Linear
    }

    fn build_eval_points(&self, raw: &[Point3], closed: bool) -> Vec<Point3> {
        let mut eval = raw.to_vec();
        if closed && raw.len() >= 2 {
            eval.push(raw[0]);
        }
        eval
    }

    fn compute_total_length_impl(&mut self) {
        self.segments.clear();
        let mut lengths = Vec::with_capacity(self.data.eval.len().saturating_sub(1));
        for window in self.data.eval.windows(2) {
            let segment = Segment3::new(window[0], window[1]);
            lengths.push(segment.length());
            self.segments.push(segment);
        }
        self.data.set_lengths(lengths);
    }

    fn interpolate_segment(&self, local: f64, index: usize) -> Point3 {
        let eval = &self.data.eval;
        if eval.is_empty() {
            return Point3::ZERO;
        }
        if index + 1 >= eval.len() {
            return eval[index.min(eval.len() - 1)];
        }
        eval[index].lerp(eval[index + 1], local)
    }

    /// Exact nearest point on the polyline via clamped segment projection.
    fn closest_point(&self, point: Point3) -> Point3 {
        self.closest_point_in_range(point, 0, self.segments.len())
    }

    fn clear(&mut self) {
        self.data.raw.clear();
        self.data.eval.clear();
        self.data.reset_lengths();
        self.segments.clear();
    }
}
