//! Adaptive arc-length integration for parametric curve segments.

use crate::Point3;

/// Maximum recursion depth for adaptive bisection.
const MAX_DEPTH: u32 = 16;

/// Approximate the arc length of `eval` over `[t0, t1]` by recursive chord
/// bisection.
///
/// The chord between the range endpoints is compared against the sum of the
/// two half-range chords through the midpoint; where they disagree by more
/// than `epsilon` the halves are refined recursively. Tightens automatically
/// on sharply curved ranges while straight ranges terminate immediately.
pub fn adaptive_length<F>(eval: &F, t0: f64, t1: f64, epsilon: f64) -> f64
where
    F: Fn(f64) -> Point3,
{
    bisect(eval, t0, t1, eval(t0), eval(t1), epsilon, 0)
}

fn bisect<F>(eval: &F, t0: f64, t1: f64, p0: Point3, p1: Point3, epsilon: f64, depth: u32) -> f64
where
    F: Fn(f64) -> Point3,
{
    let t_mid = (t0 + t1) * 0.5;
    let p_mid = eval(t_mid);

    let chord = p0.distance(p1);
    let l1 = p0.distance(p_mid);
    let l2 = p_mid.distance(p1);

    if chord + epsilon < l1 + l2 && depth < MAX_DEPTH {
        bisect(eval, t0, t_mid, p0, p_mid, epsilon, depth + 1)
            + bisect(eval, t_mid, t1, p_mid, p1, epsilon, depth + 1)
    } else {
        l1 + l2
    }
}
