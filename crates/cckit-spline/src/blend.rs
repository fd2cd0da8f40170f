//! Composite spline interpolating between two child splines.

use cckit_math::Point3;
use serde::{Deserialize, Serialize};

use crate::base::{SplineBase, SplineData, SplineKind};
use crate::Spline;

/// A virtual spline blending two children.
///
/// Owns no control points; every query is derived from the children and the
/// blend scalar, so there is nothing to cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlendSpline {
    data: SplineData,
    spline_a: Box<Spline>,
    spline_b: Box<Spline>,
    blend: f64,
}

impl BlendSpline {
    pub fn new(spline_a: Spline, spline_b: Spline) -> Self {
        Self {
            data: SplineData::new(false),
            spline_a: Box::new(spline_a),
            spline_b: Box::new(spline_b),
            blend: 0.0,
        }
    }

    /// Mix factor between the children: 0 is the first child, 1 the second.
    pub fn blend(&self) -> f64 {
        self.blend
    }

    pub fn set_blend(&mut self, blend: f64) {
        self.blend = blend;
    }

    pub fn spline_a(&self) -> &Spline {
        &self.spline_a
    }

    pub fn spline_b(&self) -> &Spline {
        &self.spline_b
    }

    /// Interpolate with an explicit mix factor instead of the stored one.
    pub fn interpolate_between(&self, spline_blend: f64, point_blend: f64) -> Point3 {
        self.spline_a
            .interpolate(point_blend)
            .lerp(self.spline_b.interpolate(point_blend), spline_blend)
    }
}

impl SplineBase for BlendSpline {
    fn data(&self) -> &SplineData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut SplineData {
        &mut self.data
    }

    fn kind(&self) -> SplineKind {
        SplineKind::Blend
    }

    fn build_eval_points(&self, _raw: &[Point3], _closed: bool) -> Vec<Point3> {
        Vec::new()
    }

    fn compute_total_length_impl(&mut self) {}

    fn interpolate_segment(&self, _local: f64, _index: usize) -> Point3 {
        Point3::ZERO
    }

    fn interpolate(&self, blend: f64) -> Point3 {
        self.interpolate_between(self.blend, blend)
    }

    /// Linear blend of the children's lengths; never cached independently.
    fn total_length(&self) -> f64 {
        let a = self.spline_a.total_length();
        let b = self.spline_b.total_length();
        a + (b - a) * self.blend
    }

    fn number_of_segments(&self) -> usize {
        self.spline_a
            .number_of_segments()
            .max(self.spline_b.number_of_segments())
    }
}
