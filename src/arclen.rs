// Copyright 2026 the Bezchain Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sampled arc-length tables.

use smallvec::SmallVec;

use crate::{Bounds, CubicBez, Point};

/// Inline capacity of the sample buffer; fits the default 30 intervals.
const INLINE_SAMPLES: usize = 31;

/// A polyline approximation of a cubic curve.
///
/// The curve is sampled at `intervals` uniform steps of `t`, which gives
/// `intervals + 1` points. The arc length is the length of that polyline;
/// its error shrinks as the interval count grows, and it does not adapt
/// to curvature.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArcLengthTable {
    samples: SmallVec<[Point; INLINE_SAMPLES]>,
    segment_lengths: SmallVec<[f64; INLINE_SAMPLES]>,
    length: f64,
}

impl ArcLengthTable {
    /// Sample `bez` at `intervals` steps.
    ///
    /// An interval count of zero is treated as one.
    pub fn compute(bez: &CubicBez, intervals: usize) -> ArcLengthTable {
        let intervals = intervals.max(1);
        let step = (intervals as f64).recip();
        let mut samples = SmallVec::with_capacity(intervals + 1);
        let mut segment_lengths = SmallVec::with_capacity(intervals);
        let mut length = 0.0;
        let mut last = bez.p0;
        samples.push(last);
        for i in 1..=intervals {
            let p = if i == intervals {
                bez.p3
            } else {
                bez.eval_de_casteljau(i as f64 * step)
            };
            let d = p.distance(last);
            segment_lengths.push(d);
            length += d;
            samples.push(p);
            last = p;
        }
        ArcLengthTable {
            samples,
            segment_lengths,
            length,
        }
    }

    /// The polyline length.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// The sampled points, start and end included.
    #[inline]
    pub fn samples(&self) -> &[Point] {
        &self.samples
    }

    /// Distances between consecutive samples.
    #[inline]
    pub fn segment_lengths(&self) -> &[f64] {
        &self.segment_lengths
    }

    /// The number of sampled intervals.
    #[inline]
    pub fn intervals(&self) -> usize {
        self.segment_lengths.len()
    }

    /// The parameter `t` at which the polyline reaches length `u`.
    ///
    /// The position is interpolated inside the sample interval that
    /// contains `u`, so unlike `u / length` it follows the curve's actual
    /// speed. `u` outside `[0, length]` maps to `0` or `1`.
    pub fn t_at_length(&self, u: f64) -> f64 {
        let n = self.segment_lengths.len();
        if n == 0 || u <= 0.0 {
            return 0.0;
        }
        let mut acc = 0.0;
        for (i, &d) in self.segment_lengths.iter().enumerate() {
            if acc + d >= u {
                let frac = if d > 0.0 { (u - acc) / d } else { 0.0 };
                return (i as f64 + frac) / n as f64;
            }
            acc += d;
        }
        1.0
    }

    /// The bounding box of the samples.
    ///
    /// This is cheap but can undershoot the true extent of strongly bent
    /// curves at low interval counts.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::compute_from_points(self.samples.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::ArcLengthTable;
    use crate::{CubicBez, Point};
    use approx::assert_relative_eq;

    #[test]
    fn straight_line_is_exact() {
        let c = CubicBez::new((0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0));
        let table = ArcLengthTable::compute(&c, 30);
        assert_eq!(table.samples().len(), 31);
        assert_eq!(table.segment_lengths().len(), 30);
        assert_relative_eq!(table.length(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn lengths_sum_to_total() {
        let c = CubicBez::new((0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0));
        let table = ArcLengthTable::compute(&c, 12);
        let sum: f64 = table.segment_lengths().iter().sum();
        assert_relative_eq!(sum, table.length(), epsilon = 1e-12);
        assert_eq!(table.samples()[0], Point::new(0.0, 0.0));
        assert_eq!(*table.samples().last().unwrap(), Point::new(10.0, 0.0));
    }

    #[test]
    fn finer_sampling_is_longer() {
        // The chord polyline always undershoots a convex arc.
        let c = CubicBez::new((0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0));
        let coarse = ArcLengthTable::compute(&c, 4).length();
        let fine = ArcLengthTable::compute(&c, 200).length();
        assert!(fine > coarse);
    }

    #[test]
    fn zero_intervals_are_clamped() {
        let c = CubicBez::new((0.0, 0.0), (1.0, 1.0), (2.0, 1.0), (3.0, 0.0));
        let table = ArcLengthTable::compute(&c, 0);
        assert_eq!(table.intervals(), 1);
        assert_relative_eq!(table.length(), 3.0);
    }

    #[test]
    fn inverse_lookup() {
        let c = CubicBez::new((0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0));
        let table = ArcLengthTable::compute(&c, 30);
        assert_eq!(table.t_at_length(-1.0), 0.0);
        assert_eq!(table.t_at_length(10.0), 1.0);
        assert_relative_eq!(table.t_at_length(1.5), 0.5, epsilon = 1e-9);

        // Control points bunched at the start make the curve slow there.
        let c = CubicBez::new((0.0, 0.0), (0.0, 0.0), (0.0, 0.0), (9.0, 0.0));
        let table = ArcLengthTable::compute(&c, 60);
        let t = table.t_at_length(table.length() * 0.5);
        assert!((c.eval(t).x - 4.5).abs() < 0.05);
        assert!(t > 0.7);
    }

    #[test]
    fn degenerate_curve_has_zero_length() {
        for p in [(4.0, 4.0), (1.0, 1.0), (0.1, 0.7), (-1e6 + 0.3, 17.25)] {
            let c = CubicBez::new(p, p, p, p);
            let table = ArcLengthTable::compute(&c, 30);
            assert_eq!(table.length(), 0.0);
            assert!(table.samples().iter().all(|&s| s == Point::from(p)));
        }
    }

    #[test]
    fn sample_bounds() {
        let c = CubicBez::new((0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0));
        let b = ArcLengthTable::compute(&c, 30).bounds().unwrap();
        assert!(b.max.y <= 0.75 + 1e-12);
        assert!(b.max.y > 0.74);
    }
}
