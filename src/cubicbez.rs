// Copyright 2026 the Bezchain Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bézier segments as plain values.

use core::ops::Mul;

use arrayvec::ArrayVec;

use crate::common::solve_quadratic;
use crate::{Affine, Bounds, Point, Vec2};

/// The maximum number of extrema a cubic segment can report.
pub const MAX_EXTREMA: usize = 4;

/// A single cubic Bézier segment.
///
/// `p0` is the start point, `p1` the start control point, `p2` the end
/// control point and `p3` the end point. This is the pure-math core used
/// by both [`CubicBezierCurve`](crate::CubicBezierCurve) and the curves
/// of a [`BezierPath`](crate::BezierPath); it carries no cached state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBez {
    /// The start point.
    pub p0: Point,
    /// The start control point.
    pub p1: Point,
    /// The end control point.
    pub p2: Point,
    /// The end point.
    pub p3: Point,
}

impl CubicBez {
    /// Create a new cubic Bézier segment.
    #[inline]
    pub fn new<P: Into<Point>>(p0: P, p1: P, p2: P, p3: P) -> CubicBez {
        CubicBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
            p3: p3.into(),
        }
    }

    /// Evaluate the curve at parameter `t`.
    ///
    /// Values outside `[0, 1]` extrapolate the polynomial.
    #[inline]
    pub fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let v = self.p0.to_vec2() * (mt * mt * mt)
            + (self.p1.to_vec2() * (mt * mt * 3.0)
                + (self.p2.to_vec2() * (mt * 3.0) + self.p3.to_vec2() * t) * t)
                * t;
        v.to_point()
    }

    /// Evaluate the curve at `t` by repeated interpolation.
    ///
    /// Slower than [`eval`](Self::eval), but a run of coincident points
    /// yields that point exactly, so a curve collapsed to a single point
    /// samples to zero length.
    pub fn eval_de_casteljau(&self, t: f64) -> Point {
        let p01 = self.p0.lerp(self.p1, t);
        let p12 = self.p1.lerp(self.p2, t);
        let p23 = self.p2.lerp(self.p3, t);
        let p012 = p01.lerp(p12, t);
        let p123 = p12.lerp(p23, t);
        p012.lerp(p123, t)
    }

    /// The derivative with respect to `t`, in closed form.
    ///
    /// The result is a vector, not normalized.
    #[inline]
    pub fn deriv_at(&self, t: f64) -> Vec2 {
        let mt = 1.0 - t;
        let d0 = self.p1 - self.p0;
        let d1 = self.p2 - self.p1;
        let d2 = self.p3 - self.p2;
        (d0 * (mt * mt) + d1 * (2.0 * mt * t) + d2 * (t * t)) * 3.0
    }

    /// The portion of the curve between `t0` and `t1`.
    ///
    /// The control points are the tangents at both parameters, scaled by
    /// `(t1 - t0) / 3`. `t0 > t1` yields a reversed segment.
    pub fn subsegment(&self, t0: f64, t1: f64) -> CubicBez {
        let p0 = self.eval(t0);
        let p3 = self.eval(t1);
        let scale = (t1 - t0) * (1.0 / 3.0);
        let p1 = p0 + scale * self.deriv_at(t0);
        let p2 = p3 - scale * self.deriv_at(t1);
        CubicBez { p0, p1, p2, p3 }
    }

    /// The same curve traversed from end to start.
    #[inline]
    #[must_use]
    pub fn reversed(&self) -> CubicBez {
        CubicBez {
            p0: self.p3,
            p1: self.p2,
            p2: self.p1,
            p3: self.p0,
        }
    }

    /// Parameters in `(0, 1)` where the x or y derivative vanishes, sorted.
    pub fn extrema(&self) -> ArrayVec<f64, MAX_EXTREMA> {
        fn one_coord(result: &mut ArrayVec<f64, MAX_EXTREMA>, d0: f64, d1: f64, d2: f64) {
            let a = d0 - 2.0 * d1 + d2;
            let b = 2.0 * (d1 - d0);
            let c = d0;
            let roots = solve_quadratic(c, b, a);
            for &t in &roots {
                if t > 0.0 && t < 1.0 {
                    result.push(t);
                }
            }
        }
        let mut result = ArrayVec::new();
        let d0 = self.p1 - self.p0;
        let d1 = self.p2 - self.p1;
        let d2 = self.p3 - self.p2;
        one_coord(&mut result, d0.x, d1.x, d2.x);
        one_coord(&mut result, d0.y, d1.y, d2.y);
        result.sort_by(|a, b| a.total_cmp(b));
        result
    }

    /// The exact bounding box, from the end points and the extrema.
    pub fn tight_bounds(&self) -> Bounds {
        self.extrema()
            .iter()
            .fold(Bounds::from_points(self.p0, self.p3), |b, &t| {
                b.union_pt(self.eval(t))
            })
    }

    /// Whether all four points are approximately equal pairwise.
    pub fn approx_eq(&self, other: &CubicBez) -> bool {
        self.p0.approx_eq(other.p0)
            && self.p1.approx_eq(other.p1)
            && self.p2.approx_eq(other.p2)
            && self.p3.approx_eq(other.p3)
    }

    /// Is this curve finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.p0.is_finite() && self.p1.is_finite() && self.p2.is_finite() && self.p3.is_finite()
    }
}

impl Mul<CubicBez> for Affine {
    type Output = CubicBez;

    #[inline]
    fn mul(self, c: CubicBez) -> CubicBez {
        CubicBez {
            p0: self * c.p0,
            p1: self * c.p1,
            p2: self * c.p2,
            p3: self * c.p3,
        }
    }
}
