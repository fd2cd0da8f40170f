//! CCKit splines: arc-length-parameterized curves for motion paths,
//! procedural geometry, and parameter baking.
//!
//! Five bases share one evaluation/editing contract ([`SplineBase`]):
//! [`LinearSpline`], [`BezierSpline`], [`CatmullRomSpline`], [`NurbsSpline`],
//! and the composite [`BlendSpline`]. The [`Spline`] sum type dispatches the
//! whole contract over the closed basis set.

pub mod base;
mod bezier;
mod blend;
mod catmull_rom;
mod linear;
mod nurbs;

use cckit_core::Tolerance;
use cckit_math::Point3;
use serde::{Deserialize, Serialize};

pub use base::{SplineBase, SplineData, SplineKind};
pub use bezier::BezierSpline;
pub use blend::BlendSpline;
pub use catmull_rom::CatmullRomSpline;
pub use linear::LinearSpline;
pub use nurbs::NurbsSpline;

/// A spline of any basis, dispatched by exhaustive matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Spline {
    Linear(LinearSpline),
    Bezier(BezierSpline),
    CatmullRom(CatmullRomSpline),
    Nurbs(NurbsSpline),
    Blend(BlendSpline),
}

impl Spline {
    pub fn kind(&self) -> SplineKind {
        match self {
            Spline::Linear(s) => s.kind(),
            Spline::Bezier(s) => s.kind(),
            Spline::CatmullRom(s) => s.kind(),
            Spline::Nurbs(s) => s.kind(),
            Spline::Blend(s) => s.kind(),
        }
    }

    /// The authored control points.
    pub fn points(&self) -> &[Point3] {
        match self {
            Spline::Linear(s) => s.points(),
            Spline::Bezier(s) => s.points(),
            Spline::CatmullRom(s) => s.points(),
            Spline::Nurbs(s) => s.points(),
            Spline::Blend(s) => s.points(),
        }
    }

    /// The padded evaluation points.
    pub fn curve_points(&self) -> &[Point3] {
        match self {
            Spline::Linear(s) => s.curve_points(),
            Spline::Bezier(s) => s.curve_points(),
            Spline::CatmullRom(s) => s.curve_points(),
            Spline::Nurbs(s) => s.curve_points(),
            Spline::Blend(s) => s.curve_points(),
        }
    }

    pub fn closed(&self) -> bool {
        match self {
            Spline::Linear(s) => s.closed(),
            Spline::Bezier(s) => s.closed(),
            Spline::CatmullRom(s) => s.closed(),
            Spline::Nurbs(s) => s.closed(),
            Spline::Blend(s) => s.closed(),
        }
    }

    pub fn set_closed(&mut self, closed: bool) {
        match self {
            Spline::Linear(s) => s.set_closed(closed),
            Spline::Bezier(s) => s.set_closed(closed),
            Spline::CatmullRom(s) => s.set_closed(closed),
            Spline::Nurbs(s) => s.set_closed(closed),
            Spline::Blend(s) => s.set_closed(closed),
        }
    }

    pub fn tolerance(&self) -> Tolerance {
        match self {
            Spline::Linear(s) => s.tolerance(),
            Spline::Bezier(s) => s.tolerance(),
            Spline::CatmullRom(s) => s.tolerance(),
            Spline::Nurbs(s) => s.tolerance(),
            Spline::Blend(s) => s.tolerance(),
        }
    }

    pub fn set_tolerance(&mut self, tolerance: Tolerance) {
        match self {
            Spline::Linear(s) => s.set_tolerance(tolerance),
            Spline::Bezier(s) => s.set_tolerance(tolerance),
            Spline::CatmullRom(s) => s.set_tolerance(tolerance),
            Spline::Nurbs(s) => s.set_tolerance(tolerance),
            Spline::Blend(s) => s.set_tolerance(tolerance),
        }
    }

    pub fn begin_edit(&mut self) {
        match self {
            Spline::Linear(s) => s.begin_edit(),
            Spline::Bezier(s) => s.begin_edit(),
            Spline::CatmullRom(s) => s.begin_edit(),
            Spline::Nurbs(s) => s.begin_edit(),
            Spline::Blend(s) => s.begin_edit(),
        }
    }

    pub fn end_edit(&mut self) {
        match self {
            Spline::Linear(s) => s.end_edit(),
            Spline::Bezier(s) => s.end_edit(),
            Spline::CatmullRom(s) => s.end_edit(),
            Spline::Nurbs(s) => s.end_edit(),
            Spline::Blend(s) => s.end_edit(),
        }
    }

    pub fn add_point(&mut self, point: Point3) {
        match self {
            Spline::Linear(s) => s.add_point(point),
            Spline::Bezier(s) => s.add_point(point),
            Spline::CatmullRom(s) => s.add_point(point),
            Spline::Nurbs(s) => s.add_point(point),
            Spline::Blend(s) => s.add_point(point),
        }
    }

    pub fn add_points<I: IntoIterator<Item = Point3>>(&mut self, points: I) {
        match self {
            Spline::Linear(s) => s.add_points(points),
            Spline::Bezier(s) => s.add_points(points),
            Spline::CatmullRom(s) => s.add_points(points),
            Spline::Nurbs(s) => s.add_points(points),
            Spline::Blend(s) => s.add_points(points),
        }
    }

    pub fn remove_point(&mut self, point: Point3) {
        match self {
            Spline::Linear(s) => s.remove_point(point),
            Spline::Bezier(s) => s.remove_point(point),
            Spline::CatmullRom(s) => s.remove_point(point),
            Spline::Nurbs(s) => s.remove_point(point),
            Spline::Blend(s) => s.remove_point(point),
        }
    }

    pub fn invert(&mut self) {
        match self {
            Spline::Linear(s) => s.invert(),
            Spline::Bezier(s) => s.invert(),
            Spline::CatmullRom(s) => s.invert(),
            Spline::Nurbs(s) => s.invert(),
            Spline::Blend(s) => s.invert(),
        }
    }

    pub fn clear(&mut self) {
        match self {
            Spline::Linear(s) => s.clear(),
            Spline::Bezier(s) => s.clear(),
            Spline::CatmullRom(s) => s.clear(),
            Spline::Nurbs(s) => s.clear(),
            Spline::Blend(s) => s.clear(),
        }
    }

    pub fn compute_total_length(&mut self) {
        match self {
            Spline::Linear(s) => s.compute_total_length(),
            Spline::Bezier(s) => s.compute_total_length(),
            Spline::CatmullRom(s) => s.compute_total_length(),
            Spline::Nurbs(s) => s.compute_total_length(),
            Spline::Blend(s) => s.compute_total_length(),
        }
    }

    pub fn total_length(&self) -> f64 {
        match self {
            Spline::Linear(s) => s.total_length(),
            Spline::Bezier(s) => s.total_length(),
            Spline::CatmullRom(s) => s.total_length(),
            Spline::Nurbs(s) => s.total_length(),
            Spline::Blend(s) => s.total_length(),
        }
    }

    pub fn number_of_segments(&self) -> usize {
        match self {
            Spline::Linear(s) => s.number_of_segments(),
            Spline::Bezier(s) => s.number_of_segments(),
            Spline::CatmullRom(s) => s.number_of_segments(),
            Spline::Nurbs(s) => s.number_of_segments(),
            Spline::Blend(s) => s.number_of_segments(),
        }
    }

    pub fn segment_lengths(&self) -> &[f64] {
        match self {
            Spline::Linear(s) => s.segment_lengths(),
            Spline::Bezier(s) => s.segment_lengths(),
            Spline::CatmullRom(s) => s.segment_lengths(),
            Spline::Nurbs(s) => s.segment_lengths(),
            Spline::Blend(s) => s.segment_lengths(),
        }
    }

    /// Interpolate a position at a global blend in `[0, 1]`.
    pub fn interpolate(&self, blend: f64) -> Point3 {
        match self {
            Spline::Linear(s) => s.interpolate(blend),
            Spline::Bezier(s) => s.interpolate(blend),
            Spline::CatmullRom(s) => s.interpolate(blend),
            Spline::Nurbs(s) => s.interpolate(blend),
            Spline::Blend(s) => s.interpolate(blend),
        }
    }

    /// Basis-specific evaluation within one segment.
    pub fn interpolate_segment(&self, local: f64, index: usize) -> Point3 {
        match self {
            Spline::Linear(s) => s.interpolate_segment(local, index),
            Spline::Bezier(s) => s.interpolate_segment(local, index),
            Spline::CatmullRom(s) => s.interpolate_segment(local, index),
            Spline::Nurbs(s) => s.interpolate_segment(local, index),
            Spline::Blend(s) => s.interpolate_segment(local, index),
        }
    }

    /// Sample `count` points at uniform blend steps.
    pub fn discretize(&self, count: usize) -> Vec<Point3> {
        match self {
            Spline::Linear(s) => s.discretize(count),
            Spline::Bezier(s) => s.discretize(count),
            Spline::CatmullRom(s) => s.discretize(count),
            Spline::Nurbs(s) => s.discretize(count),
            Spline::Blend(s) => s.discretize(count),
        }
    }

    pub fn closest_point(&self, point: Point3) -> Point3 {
        match self {
            Spline::Linear(s) => s.closest_point(point),
            Spline::Bezier(s) => s.closest_point(point),
            Spline::CatmullRom(s) => s.closest_point(point),
            Spline::Nurbs(s) => s.closest_point(point),
            Spline::Blend(s) => s.closest_point(point),
        }
    }

    pub fn last_point(&self) -> Point3 {
        match self {
            Spline::Linear(s) => s.last_point(),
            Spline::Bezier(s) => s.last_point(),
            Spline::CatmullRom(s) => s.last_point(),
            Spline::Nurbs(s) => s.last_point(),
            Spline::Blend(s) => s.last_point(),
        }
    }
}

impl From<LinearSpline> for Spline {
    fn from(spline: LinearSpline) -> Self {
        Spline::Linear(spline)
    }
}

impl From<BezierSpline> for Spline {
    fn from(spline: BezierSpline) -> Self {
        Spline::Bezier(spline)
    }
}

impl From<CatmullRomSpline> for Spline {
    fn from(spline: CatmullRomSpline) -> Self {
        Spline::CatmullRom(spline)
    }
}

impl From<NurbsSpline> for Spline {
    fn from(spline: NurbsSpline) -> Self {
        Spline::Nurbs(spline)
    }
}

impl From<BlendSpline> for Spline {
    fn from(spline: BlendSpline) -> Self {
        Spline::Blend(spline)
    }
}
