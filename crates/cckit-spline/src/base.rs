//! Shared spline storage and the arc-length-parameterized evaluation contract.

use cckit_core::Tolerance;
use cckit_math::interpolate::map;
use cckit_math::Point3;
use serde::{Deserialize, Serialize};

/// The basis family of a spline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplineKind {
    Linear,
    Bezier,
    CatmullRom,
    Nurbs,
    Blend,
}

/// Control-point storage and length caches shared by every basis.
///
/// Authored points and evaluation points are kept as two separate views:
/// editing APIs mutate `raw` only, and `end_edit` derives `eval` (with the
/// closing duplicate or phantom padding the basis requires) before the
/// segment-length cache is rebuilt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SplineData {
    pub(crate) raw: Vec<Point3>,
    pub(crate) eval: Vec<Point3>,
    pub(crate) closed: bool,
    pub(crate) editing: bool,
    pub(crate) segment_lengths: Vec<f64>,
    pub(crate) total_length: f64,
    pub(crate) tolerance: Tolerance,
}

impl SplineData {
    pub(crate) fn new(closed: bool) -> Self {
        Self {
            closed,
            ..Self::default()
        }
    }

    /// Map a global blend in `[0, 1]` to `(segment index, local blend)` by
    /// walking the cached segment-length table. Linear in the number of
    /// segments.
    pub fn interpolation_values(&self, blend: f64) -> (usize, f64) {
        if self.segment_lengths.is_empty() {
            return (0, 0.0);
        }
        let target = self.total_length * blend.clamp(0.0, 1.0);
        let mut reached = 0.0;
        let mut index = 0;
        while index < self.segment_lengths.len() - 1
            && reached + self.segment_lengths[index] < target
        {
            reached += self.segment_lengths[index];
            index += 1;
        }
        let segment = self.segment_lengths[index];
        let local = if segment > f64::EPSILON {
            ((target - reached) / segment).clamp(0.0, 1.0)
        } else {
            0.0
        };
        (index, local)
    }

    pub(crate) fn reset_lengths(&mut self) {
        self.segment_lengths.clear();
        self.total_length = 0.0;
    }

    pub(crate) fn set_lengths(&mut self, lengths: Vec<f64>) {
        self.total_length = lengths.iter().sum();
        self.segment_lengths = lengths;
    }
}

/// The evaluation/editing contract every basis fulfills.
///
/// All query inputs are clamped or guarded; out-of-range blends or empty
/// point lists degrade to the nearest valid point and never panic. Mutation
/// and queries share unsynchronized state, so concurrent use from multiple
/// threads must be serialized by the caller.
pub trait SplineBase {
    fn data(&self) -> &SplineData;
    fn data_mut(&mut self) -> &mut SplineData;

    fn kind(&self) -> SplineKind;

    /// Evaluation points consumed per segment step (3 for the stride-3
    /// Bezier layout, 1 otherwise).
    fn stride(&self) -> usize {
        1
    }

    /// Derive the padded evaluation list from the authored points.
    fn build_eval_points(&self, raw: &[Point3], closed: bool) -> Vec<Point3>;

    /// Rebuild the segment-length cache from the evaluation points.
    fn compute_total_length_impl(&mut self);

    /// Basis-specific evaluation within one segment, `index` addressing the
    /// segment's first evaluation point.
    fn interpolate_segment(&self, local: f64, index: usize) -> Point3;

    /// Open an edit session. Idempotent. While a session is open, queries
    /// evaluate the last finalized state.
    fn begin_edit(&mut self) {
        self.data_mut().editing = true;
    }

    /// Close an edit session: re-derive the evaluation points for the
    /// current `closed` flag and recompute the length cache. Idempotent.
    fn end_edit(&mut self) {
        if !self.data().editing {
            return;
        }
        self.data_mut().editing = false;
        let raw = self.data().raw.clone();
        let closed = self.data().closed;
        let eval = self.build_eval_points(&raw, closed);
        self.data_mut().eval = eval;
        self.compute_total_length();
    }

    /// Clear and rebuild the segment-length cache.
    fn compute_total_length(&mut self) {
        self.data_mut().reset_lengths();
        if self.data().eval.len() > 1 {
            self.compute_total_length_impl();
        }
    }

    /// Append one authored point. Brackets itself in an edit session if the
    /// caller has not opened one.
    fn add_point(&mut self, point: Point3) {
        let auto = !self.data().editing;
        self.begin_edit();
        self.data_mut().raw.push(point);
        if auto {
            self.end_edit();
        }
    }

    /// Append several authored points in one edit session.
    fn add_points<I: IntoIterator<Item = Point3>>(&mut self, points: I)
    where
        Self: Sized,
    {
        let auto = !self.data().editing;
        self.begin_edit();
        for point in points {
            self.add_point(point);
        }
        if auto {
            self.end_edit();
        }
    }

    /// Remove the first authored point equal to `point`. No-op when absent.
    fn remove_point(&mut self, point: Point3) {
        let auto = !self.data().editing;
        self.begin_edit();
        let raw = &mut self.data_mut().raw;
        if let Some(index) = raw.iter().position(|&p| p == point) {
            raw.remove(index);
        }
        if auto {
            self.end_edit();
        }
    }

    /// Reverse the authored point order.
    fn invert(&mut self) {
        let auto = !self.data().editing;
        self.begin_edit();
        self.data_mut().raw.reverse();
        if auto {
            self.end_edit();
        }
    }

    /// Remove all points and drop the caches.
    fn clear(&mut self) {
        let data = self.data_mut();
        data.raw.clear();
        data.eval.clear();
        data.reset_lengths();
    }

    fn tolerance(&self) -> Tolerance {
        self.data().tolerance
    }

    /// Replace the tolerance and rebuild the length cache under it.
    fn set_tolerance(&mut self, tolerance: Tolerance) {
        self.data_mut().tolerance = tolerance;
        self.compute_total_length();
    }

    fn closed(&self) -> bool {
        self.data().closed
    }

    /// Toggle the closed flag, re-padding the evaluation points and
    /// recomputing lengths. No-op when the value is unchanged.
    fn set_closed(&mut self, closed: bool) {
        if closed == self.data().closed {
            return;
        }
        let auto = !self.data().editing;
        self.begin_edit();
        self.data_mut().closed = closed;
        if auto {
            self.end_edit();
        }
    }

    /// The authored control points.
    fn points(&self) -> &[Point3] {
        &self.data().raw
    }

    /// The padded evaluation points actually used for interpolation.
    fn curve_points(&self) -> &[Point3] {
        &self.data().eval
    }

    /// The last evaluation point, or the origin for an empty spline.
    fn last_point(&self) -> Point3 {
        self.data().eval.last().copied().unwrap_or(Point3::ZERO)
    }

    fn total_length(&self) -> f64 {
        self.data().total_length
    }

    fn number_of_segments(&self) -> usize {
        self.data().segment_lengths.len()
    }

    fn segment_lengths(&self) -> &[f64] {
        &self.data().segment_lengths
    }

    /// Interpolate a position on the spline at a global blend in `[0, 1]`,
    /// arc-length parameterized over the segment-length cache.
    fn interpolate(&self, blend: f64) -> Point3 {
        let data = self.data();
        if data.eval.is_empty() {
            return Point3::ZERO;
        }
        if data.segment_lengths.is_empty() {
            return data.eval[0];
        }
        if blend >= 1.0 {
            return self.last_point();
        }
        // blend <= 0 resolves to segment 0 at local 0, the first on-curve point
        let (index, local) = data.interpolation_values(blend);
        self.interpolate_segment(local, index * self.stride())
    }

    /// Sample `count` points at uniform blend steps. The first sample equals
    /// `interpolate(0)` and the last equals `interpolate(1)`.
    fn discretize(&self, count: usize) -> Vec<Point3> {
        (0..count)
            .map(|i| {
                let t = map(i as f64, 0.0, count.saturating_sub(1) as f64, 0.0, 1.0);
                self.interpolate(t)
            })
            .collect()
    }

    /// Nearest authored control point to `point`. Bases with exact segment
    /// geometry override this with a projection or a denser scan.
    fn closest_point(&self, point: Point3) -> Point3 {
        let mut best = Point3::ZERO;
        let mut best_dist_sq = f64::MAX;
        for &candidate in &self.data().raw {
            let dist_sq = candidate.distance_squared(point);
            if dist_sq < best_dist_sq {
                best_dist_sq = dist_sq;
                best = candidate;
            }
        }
        best
    }
}
