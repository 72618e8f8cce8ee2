// Copyright 2026 the Bezchain Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Numeric helpers shared by the curve code.

use arrayvec::ArrayVec;

/// Find real roots of `c0 + c1 x + c2 x² = 0`.
///
/// A nearly linear equation yields the linear root only. When all
/// coefficients are zero a single `0.0` is returned.
pub(crate) fn solve_quadratic(c0: f64, c1: f64, c2: f64) -> ArrayVec<f64, 2> {
    let mut result = ArrayVec::new();
    let sc0 = c0 * c2.recip();
    let sc1 = c1 * c2.recip();
    if !sc0.is_finite() || !sc1.is_finite() {
        // c2 is zero or very small, treat as linear eqn
        let root = -c0 / c1;
        if root.is_finite() {
            result.push(root);
        } else if c0 == 0.0 && c1 == 0.0 {
            result.push(0.0);
        }
        return result;
    }
    let arg = sc1 * sc1 - 4. * sc0;
    let root1 = if !arg.is_finite() {
        // sc1 * sc1 overflowed; solve sc1 x + x² = 0 for one root.
        -sc1
    } else {
        if arg < 0.0 {
            return result;
        } else if arg == 0.0 {
            result.push(-0.5 * sc1);
            return result;
        }
        // See https://math.stackexchange.com/questions/866331
        -0.5 * (sc1 + arg.sqrt().copysign(sc1))
    };
    let root2 = sc0 / root1;
    if root2.is_finite() {
        result.push(root1.min(root2));
        result.push(root1.max(root2));
    } else {
        result.push(root1);
    }
    result
}

/// Clamp to the unit interval. `NaN` becomes `0.0`.
#[inline]
pub(crate) fn clamp_unit(t: f64) -> f64 {
    t.max(0.0).min(1.0)
}
