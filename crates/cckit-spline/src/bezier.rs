//! Cubic Bezier spline with stride-3 control point storage.

use cckit_math::arclen::adaptive_length;
use cckit_math::interpolate::{bezier_point, bezier_velocity};
use cckit_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::base::{SplineBase, SplineData, SplineKind};

/// A chain of cubic Bezier segments sharing anchors.
///
/// Control points are stored at stride 3: anchor, handle-out, handle-in,
/// next anchor. `add_point` synthesizes the two handles of the new segment
/// at 25%/75% along the chord, yielding a straight default segment;
/// [`BezierSpline::add_point_with_tension`] produces tangent-continuous
/// chains instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BezierSpline {
    data: SplineData,
}

/// De Casteljau split of one cubic segment at `t`: returns the incoming
/// boundary handle, the on-curve split anchor, and the outgoing handle.
fn split_segment(
    a: Point3,
    b: Point3,
    c: Point3,
    d: Point3,
    t: f64,
) -> (Point3, Point3, Point3) {
    let ab = a.lerp(b, t);
    let bc = b.lerp(c, t);
    let cd = c.lerp(d, t);

    let handle_in = ab.lerp(bc, t);
    let handle_out = bc.lerp(cd, t);
    let anchor = handle_in.lerp(handle_out, t);
    (handle_in, anchor, handle_out)
}

impl BezierSpline {
    pub fn new(closed: bool) -> Self {
        Self {
            data: SplineData::new(closed),
        }
    }

    /// Build a spline by adding anchor points one by one; handles are
    /// synthesized for straight default segments.
    pub fn from_points<I: IntoIterator<Item = Point3>>(points: I, closed: bool) -> Self {
        let mut spline = Self::new(closed);
        spline.add_points(points);
        spline
    }

    /// Build a spline from an explicit stride-3 control list
    /// (`anchor, handle, handle, anchor, ...`) taken verbatim.
    pub fn from_control_points<I: IntoIterator<Item = Point3>>(points: I, closed: bool) -> Self {
        let mut spline = Self::new(closed);
        spline.begin_edit();
        spline.data.raw.extend(points);
        spline.end_edit();
        spline
    }

    /// Adds an anchor whose incoming segment stays tangent-continuous with
    /// the previous one: the outgoing handle reflects the previous incoming
    /// handle through the shared anchor scaled by `tension_a`, while the new
    /// incoming handle sits at `tension_b` along the chord to the new anchor.
    pub fn add_point_with_tension(&mut self, point: Point3, tension_a: f64, tension_b: f64) {
        if self.data.raw.len() < 2 {
            // no previous handle to reflect yet
            self.add_point(point);
            return;
        }
        let auto = !self.data.editing;
        self.begin_edit();

        let last = self.data.raw[self.data.raw.len() - 1];
        let last_handle = self.data.raw[self.data.raw.len() - 2];
        // glam's lerp is unclamped, so 1 + tension_a reflects past the anchor
        self.data.raw.push(last_handle.lerp(last, 1.0 + tension_a));
        self.data.raw.push(last.lerp(point, tension_b.clamp(0.0, 1.0)));
        self.data.raw.push(point);

        if auto {
            self.end_edit();
        }
    }

    /// Analytic first derivative at a global blend, resolved through the
    /// arc-length parameterization.
    pub fn velocity(&self, blend: f64) -> Vector3 {
        let eval = &self.data.eval;
        if self.data.segment_lengths.is_empty() {
            return Vector3::ZERO;
        }
        let (index, local) = self.data.interpolation_values(blend);
        let i = index * 3;
        if i + 3 >= eval.len() {
            return Vector3::ZERO;
        }
        bezier_velocity(eval[i], eval[i + 1], eval[i + 2], eval[i + 3], local)
    }

    /// Extract the portion of the curve between two global blends as a
    /// standalone spline with its own length cache.
    ///
    /// The two boundary segments are re-derived by de Casteljau splits;
    /// fully interior segments are copied unmodified. Returns `None` for an
    /// empty spline or an empty length cache.
    pub fn sub_spline(&self, blend_a: f64, blend_b: f64) -> Option<BezierSpline> {
        let eval = &self.data.eval;
        if eval.is_empty() || self.data.segment_lengths.is_empty() {
            return None;
        }

        let (segment_a, local_a) = self.data.interpolation_values(blend_a);
        let (segment_b, local_b) = self.data.interpolation_values(blend_b);
        let index_a = segment_a * 3;
        let index_b = segment_b * 3;
        if index_a + 3 >= eval.len() || index_b + 3 >= eval.len() {
            return None;
        }

        let (_, anchor_a, out_a) = split_segment(
            eval[index_a],
            eval[index_a + 1],
            eval[index_a + 2],
            eval[index_a + 3],
            local_a,
        );

        let mut points = vec![anchor_a];
        if index_a == index_b {
            points.push(anchor_a.lerp(out_a, local_b));
        } else {
            points.push(out_a);
        }

        if index_b > index_a + 3 {
            points.push(eval[index_a + 2].lerp(eval[index_a + 3], local_a));
            points.push(eval[index_a + 3]);
            points.push(eval[index_a + 4]);

            let mut i = index_a + 6;
            while i < index_b {
                points.push(eval[i - 1]);
                points.push(eval[i]);
                points.push(eval[i + 1]);
                i += 3;
            }

            points.push(eval[index_b - 1]);
            points.push(eval[index_b]);
            points.push(eval[index_b].lerp(eval[index_b + 1], local_b));
        } else if index_b == index_a + 3 {
            points.push(eval[index_a + 2].lerp(eval[index_a + 3], local_a));
            points.push(eval[index_a + 3]);
            points.push(eval[index_a + 3].lerp(eval[index_a + 4], local_b));
        }

        let (in_b, anchor_b, _) = split_segment(
            eval[index_b],
            eval[index_b + 1],
            eval[index_b + 2],
            eval[index_b + 3],
            local_b,
        );
        if index_a == index_b {
            points.push(in_b.lerp(anchor_b, local_a));
        } else {
            points.push(in_b);
        }
        points.push(anchor_b);

        Some(BezierSpline::from_control_points(points, false))
    }
}

impl SplineBase for BezierSpline {
    fn data(&self) -> &SplineData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut SplineData {
        &mut self.data
    }

    fn kind(&self) -> SplineKind {
        SplineKind::Bezier
    }

    fn stride(&self) -> usize {
        3
    }

    fn build_eval_points(&self, raw: &[Point3], closed: bool) -> Vec<Point3> {
        let mut eval = raw.to_vec();
        if closed && raw.len() >= 2 {
            eval.push(raw[0]);
        }
        eval
    }

    /// Appending an anchor to a non-empty spline also synthesizes the two
    /// handle points of the new segment at 25%/75% along the chord.
    fn add_point(&mut self, point: Point3) {
        let auto = !self.data.editing;
        self.begin_edit();

        if self.data.raw.is_empty() {
            self.data.raw.push(point);
        } else {
            let last = self.data.raw[self.data.raw.len() - 1];
            self.data.raw.push(last.lerp(point, 0.25));
            self.data.raw.push(last.lerp(point, 0.75));
            self.data.raw.push(point);
        }

        if auto {
            self.end_edit();
        }
    }

    fn compute_total_length_impl(&mut self) {
        let eval = &self.data.eval;
        let epsilon = self.data.tolerance.arc_length;
        let mut lengths = Vec::new();
        let mut i = 0;
        while i + 3 < eval.len() {
            let (p0, p1, p2, p3) = (eval[i], eval[i + 1], eval[i + 2], eval[i + 3]);
            let segment = |t: f64| bezier_point(p0, p1, p2, p3, t);
            lengths.push(adaptive_length(&segment, 0.0, 1.0, epsilon));
            i += 3;
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
        bezier_point(
            eval[index],
            eval[index + 1],
            eval[index + 2],
            eval[index + 3],
            local,
        )
    }
}
