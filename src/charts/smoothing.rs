//! Tension-smoothed line geometry.
//!
//! Each segment between two data points becomes a cubic Bézier whose control
//! points are taken from the neighbouring points and scaled by `tension`
//! (0 gives straight segments). The curve always passes through every input
//! point.

fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    (b[0] - a[0]).hypot(b[1] - a[1])
}

/// Control points (before, after) for `current`.
fn control_points(
    previous: [f64; 2],
    current: [f64; 2],
    next: [f64; 2],
    tension: f64,
) -> ([f64; 2], [f64; 2]) {
    let d01 = distance(previous, current);
    let d12 = distance(current, next);
    let total = d01 + d12;

    let (s01, s12) = if total > 0.0 {
        (d01 / total, d12 / total)
    } else {
        (0.0, 0.0)
    };

    let fa = tension * s01;
    let fb = tension * s12;
    let dx = next[0] - previous[0];
    let dy = next[1] - previous[1];

    (
        [current[0] - fa * dx, current[1] - fa * dy],
        [current[0] + fb * dx, current[1] + fb * dy],
    )
}

fn cubic(p0: [f64; 2], c0: [f64; 2], c1: [f64; 2], p1: [f64; 2], t: f64) -> [f64; 2] {
    let u = 1.0 - t;
    let a = u * u * u;
    let b = 3.0 * u * u * t;
    let c = 3.0 * u * t * t;
    let d = t * t * t;
    [
        a * p0[0] + b * c0[0] + c * c1[0] + d * p1[0],
        a * p0[1] + b * c0[1] + c * c1[1] + d * p1[1],
    ]
}

/// Densify `points` into a smoothed polyline with `steps` samples per segment.
///
/// Fewer than three points, `tension == 0` or `steps < 2` return the input
/// unchanged.
pub fn smooth(points: &[[f64; 2]], tension: f64, steps: usize) -> Vec<[f64; 2]> {
    if points.len() < 3 || tension == 0.0 || steps < 2 {
        return points.to_vec();
    }

    let n = points.len();
    let controls: Vec<([f64; 2], [f64; 2])> = (0..n)
        .map(|i| {
            let previous = points[i.saturating_sub(1)];
            let next = points[(i + 1).min(n - 1)];
            control_points(previous, points[i], next, tension)
        })
        .collect();

    let mut out = Vec::with_capacity((n - 1) * steps + 1);
    for i in 0..n - 1 {
        let (_, after) = controls[i];
        let (before, _) = controls[i + 1];
        for step in 0..steps {
            let t = step as f64 / steps as f64;
            out.push(cubic(points[i], after, before, points[i + 1], t));
        }
    }
    out.push(points[n - 1]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f64; 2], b: [f64; 2]) -> bool {
        (a[0] - b[0]).abs() < 1e-9 && (a[1] - b[1]).abs() < 1e-9
    }

    #[test]
    fn short_input_is_untouched() {
        let pts = vec![[0.0, 1.0], [1.0, 3.0]];
        assert_eq!(smooth(&pts, 0.1, 8), pts);
        assert!(smooth(&[], 0.1, 8).is_empty());
    }

    #[test]
    fn zero_tension_is_untouched() {
        let pts = vec![[0.0, 1.0], [1.0, 3.0], [2.0, 0.0]];
        assert_eq!(smooth(&pts, 0.0, 8), pts);
    }

    #[test]
    fn passes_through_every_point() {
        let pts = vec![[0.0, 1.0], [1.0, 5.0], [2.0, 2.0], [3.0, 8.0]];
        let steps = 6;
        let out = smooth(&pts, 0.1, steps);
        assert_eq!(out.len(), (pts.len() - 1) * steps + 1);
        for (i, p) in pts.iter().enumerate() {
            assert!(close(out[i * steps], *p), "point {} not on curve", i);
        }
    }

    #[test]
    fn collinear_points_stay_on_the_line() {
        let pts = vec![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]];
        for p in smooth(&pts, 0.4, 5) {
            assert!((p[0] - p[1]).abs() < 1e-9);
        }
    }
}
