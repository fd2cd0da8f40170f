//! Line segment utility.

use serde::{Deserialize, Serialize};

use crate::{Point3, Vector3};

/// A line segment from `start` to `end`, parameterized over `[0, 1]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Segment3 {
    pub start: Point3,
    pub end: Point3,
}

impl Segment3 {
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    pub fn point_at(&self, t: f64) -> Point3 {
        self.start.lerp(self.end, t)
    }

    /// Clamped parametric position of the projection of `point` onto the segment.
    pub fn closest_point_blend(&self, point: Point3) -> f64 {
        let dir: Vector3 = self.end - self.start;
        let len_sq = dir.length_squared();
        if len_sq < f64::EPSILON {
            return 0.0;
        }
        ((point - self.start).dot(dir) / len_sq).clamp(0.0, 1.0)
    }

    /// Returns the point on the segment that is closest to the given point.
    pub fn closest_point(&self, point: Point3) -> Point3 {
        self.point_at(self.closest_point_blend(point))
    }

    /// Distance of a point to the segment.
    pub fn distance_to(&self, point: Point3) -> f64 {
        self.closest_point(point).distance(point)
    }

    /// Shortest connecting segment between two (infinite) lines through the
    /// segments' endpoints. Returns `None` when either line is degenerate or
    /// the lines are parallel.
    pub fn closest_segment_between(&self, other: &Segment3) -> Option<Segment3> {
        let p13 = self.start - other.start;
        let p43 = other.end - other.start;
        if p43.length_squared() < f64::EPSILON {
            return None;
        }

        let p21 = self.end - self.start;
        if p21.length_squared() < f64::EPSILON {
            return None;
        }

        let d4321 = p43.dot(p21);
        let d4343 = p43.dot(p43);
        let d2121 = p21.dot(p21);

        let denom = d2121 * d4343 - d4321 * d4321;
        if denom.abs() < f64::EPSILON {
            return None;
        }

        let d1343 = p13.dot(p43);
        let d1321 = p13.dot(p21);

        let mua = (d1343 * d4321 - d1321 * d4343) / denom;
        let mub = (d1343 + d4321 * mua) / d4343;

        Some(Segment3::new(self.start + mua * p21, other.start + mub * p43))
    }
}
