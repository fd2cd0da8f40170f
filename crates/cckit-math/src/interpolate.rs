//! Closed-form blend evaluation for cubic curve segments.

use crate::{Point3, Vector3};

/// Linearly remap `value` from `[min_src, max_src]` to `[min_dst, max_dst]`.
pub fn map(value: f64, min_src: f64, max_src: f64, min_dst: f64, max_dst: f64) -> f64 {
    if (max_src - min_src).abs() < f64::EPSILON {
        return min_dst;
    }
    min_dst + (max_dst - min_dst) * ((value - min_src) / (max_src - min_src))
}

/// Evaluate a cubic Bezier segment at `t` in `[0, 1]`.
///
/// `p0` and `p3` are the on-curve anchors, `p1` and `p2` the off-curve
/// handles.
pub fn bezier_point(p0: Point3, p1: Point3, p2: Point3, p3: Point3, t: f64) -> Point3 {
    let t1 = 1.0 - t;
    p0 * (t1 * t1 * t1) + p1 * (3.0 * t * t1 * t1) + p2 * (3.0 * t * t * t1) + p3 * (t * t * t)
}

/// Analytic first derivative of a cubic Bezier segment at `t`.
pub fn bezier_velocity(p0: Point3, p1: Point3, p2: Point3, p3: Point3, t: f64) -> Vector3 {
    let t1 = 1.0 - t;
    (p1 - p0) * (3.0 * t1 * t1) + (p2 - p1) * (6.0 * t1 * t) + (p3 - p2) * (3.0 * t * t)
}

/// Evaluate a Catmull-Rom segment between `p1` and `p2` at `u` in `[0, 1]`.
///
/// Uses the tension-parameterized interpolation matrix
/// ```text
/// [  0    1     0     0  ]
/// [ -T    0     T     0  ]
/// [ 2T  T-3  3-2T    -T  ]
/// [ -T  2-T   T-2     T  ]
/// ```
/// so `u = 0` yields `p1` and `u = 1` yields `p2`.
pub fn catmull_rom_point(
    p0: Point3,
    p1: Point3,
    p2: Point3,
    p3: Point3,
    u: f64,
    tension: f64,
) -> Point3 {
    let t = tension;
    let c1 = p1;
    let c2 = (p2 - p0) * t;
    let c3 = p0 * (2.0 * t) + p1 * (t - 3.0) + p2 * (3.0 - 2.0 * t) - p3 * t;
    let c4 = p0 * -t + p1 * (2.0 - t) + p2 * (t - 2.0) + p3 * t;

    ((c4 * u + c3) * u + c2) * u + c1
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::DVec3;

    #[test]
    fn test_map() {
        assert_relative_eq!(map(5.0, 0.0, 10.0, 0.0, 1.0), 0.5);
        assert_relative_eq!(map(0.0, 0.0, 10.0, -1.0, 1.0), -1.0);
        // degenerate source range falls back to the destination minimum
        assert_relative_eq!(map(3.0, 2.0, 2.0, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_bezier_endpoints() {
        let (p0, p1, p2, p3) = (
            DVec3::ZERO,
            DVec3::new(1.0, 2.0, 0.0),
            DVec3::new(3.0, 2.0, 0.0),
            DVec3::new(4.0, 0.0, 0.0),
        );
        assert!((bezier_point(p0, p1, p2, p3, 0.0) - p0).length() < 1e-12);
        assert!((bezier_point(p0, p1, p2, p3, 1.0) - p3).length() < 1e-12);
    }

    #[test]
    fn test_bezier_straight_segment() {
        // Handles on the chord keep the curve on the chord.
        let p0 = DVec3::ZERO;
        let p3 = DVec3::new(10.0, 0.0, 0.0);
        let p1 = p0.lerp(p3, 0.25);
        let p2 = p0.lerp(p3, 0.75);
        let mid = bezier_point(p0, p1, p2, p3, 0.5);
        assert!((mid - DVec3::new(5.0, 0.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_bezier_velocity_straight() {
        let p0 = DVec3::ZERO;
        let p3 = DVec3::new(10.0, 0.0, 0.0);
        let p1 = p0.lerp(p3, 0.25);
        let p2 = p0.lerp(p3, 0.75);
        let v = bezier_velocity(p0, p1, p2, p3, 0.5);
        assert!(v.x > 0.0);
        assert!(v.y.abs() < 1e-12);
    }

    #[test]
    fn test_catmull_rom_endpoints() {
        let p0 = DVec3::new(-1.0, 0.0, 0.0);
        let p1 = DVec3::ZERO;
        let p2 = DVec3::new(1.0, 1.0, 0.0);
        let p3 = DVec3::new(2.0, 1.0, 0.0);
        let start = catmull_rom_point(p0, p1, p2, p3, 0.0, 0.5);
        let end = catmull_rom_point(p0, p1, p2, p3, 1.0, 0.5);
        assert!((start - p1).length() < 1e-12);
        assert!((end - p2).length() < 1e-12);
    }
}
