//! Catmull-Rom interpolating spline.

use cckit_math::arclen::adaptive_length;
use cckit_math::interpolate::catmull_rom_point;
use cckit_math::Point3;
use serde::{Deserialize, Serialize};

use crate::base::{SplineBase, SplineData, SplineKind};

/// Number of samples per segment for the dense closest-point scan.
const CLOSEST_POINT_STEPS: usize = 60;

/// An interpolating spline that passes through every authored point.
///
/// The four-point evaluation window needs one point before the first and one
/// after the last authored point, so `end_edit` pads the evaluation list
/// with phantom points: cyclic duplicates when closed, repeated end points
/// when open. The authoring API only ever sees the authored set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatmullRomSpline {
    data: SplineData,
    tension: f64,
}

impl Default for CatmullRomSpline {
    fn default() -> Self {
        Self::new(0.5, false)
    }
}

impl CatmullRomSpline {
    pub fn new(tension: f64, closed: bool) -> Self {
        Self {
            data: SplineData::new(closed),
            tension,
        }
    }

    pub fn from_points<I: IntoIterator<Item = Point3>>(
        points: I,
        tension: f64,
        closed: bool,
    ) -> Self {
        let mut spline = Self::new(tension, closed);
        spline.add_points(points);
        spline
    }

    /// How tightly the curve is pulled toward its control points.
    pub fn tension(&self) -> f64 {
        self.tension
    }

    /// Changing the tension reshapes every segment, so the length cache is
    /// recomputed immediately.
    pub fn set_tension(&mut self, tension: f64) {
        self.tension = tension;
        self.compute_total_length();
    }

    /// Densely samples the segments with indices in `[start, end)` and
    /// returns the nearest sample. The curve deviates from its control
    /// polygon, so vertex scans are not good enough here.
    pub fn closest_point_in_range(
        &self,
        point: Point3,
        mut start: usize,
        mut end: usize,
    ) -> Point3 {
        if self.data.eval.len() < 4 {
            return Point3::ZERO;
        }
        if start > end {
            std::mem::swap(&mut start, &mut end);
        }

        let mut best = Point3::ZERO;
        let mut best_dist = f64::MAX;
        for i in start..end {
            for j in 0..CLOSEST_POINT_STEPS {
                let t = j as f64 / CLOSEST_POINT_STEPS as f64;
                let candidate = self.interpolate_segment(t, i);
                let dist = candidate.distance(point);
                if dist < best_dist {
                    best_dist = dist;
                    best = candidate;
                }
            }
        }
        best
    }
}

impl SplineBase for CatmullRomSpline {
    fn data(&self) -> &SplineData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut SplineData {
        &mut self.data
    }

    fn kind(&self) -> SplineKind {
        SplineKind::CatmullRom
    }

    fn build_eval_points(&self, raw: &[Point3], closed: bool) -> Vec<Point3> {
        if raw.len() < 2 {
            return raw.to_vec();
        }
        let mut eval = Vec::with_capacity(raw.len() + 3);
        if closed {
            eval.push(raw[raw.len() - 1]);
            eval.extend_from_slice(raw);
            eval.push(raw[0]);
            eval.push(raw[1]);
        } else {
            eval.push(raw[0]);
            eval.extend_from_slice(raw);
            eval.push(raw[raw.len() - 1]);
        }
        eval
    }

    fn compute_total_length_impl(&mut self) {
        let eval = &self.data.eval;
        let epsilon = self.data.tolerance.arc_length;
        let tension = self.tension;
        let mut lengths = Vec::with_capacity(eval.len().saturating_sub(3));
        for window in eval.windows(4) {
            let (p0, p1, p2, p3) = (window[0], window[1], window[2], window[3]);
            let segment = |t: f64| catmull_rom_point(p0, p1, p2, p3, t, tension);
            lengths.push(adaptive_length(&segment, 0.0, 1.0, epsilon));
        }
        self.data.set_lengths(lengths);
    }

    fn interpolate_segment(&self, local: f64, index: usize) -> Point3 {
        let eval = &self.data.eval;
        if eval.is_empty() {
            return Point3::ZERO;
        }
        if index + 3 >= eval.len() {
            return eval[index.min(eval.len() - 1)];
        }
        catmull_rom_point(
            eval[index],
            eval[index + 1],
            eval[index + 2],
            eval[index + 3],
            local,
            self.tension,
        )
    }

    fn closest_point(&self, point: Point3) -> Point3 {
        self.closest_point_in_range(point, 0, self.data.eval.len().saturating_sub(3))
    }
}
