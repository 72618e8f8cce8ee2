// Copyright 2026 the Bezchain Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunable parameters of the curve engine.

/// Tunables shared by curves and paths.
///
/// The defaults reproduce the classic behaviour: 30 sample intervals per
/// curve, a closest-point search of at most 4 refinement rounds that
/// stops once its bracket spans no more than 1.0 units, and a 0.1 unit
/// minimum handle length for control point realignment.
///
/// The closest-point threshold is absolute, so curves spanning millions
/// of units want a larger value and tiny curves a smaller one.
#[derive(Clone, Copy, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CurveOptions {
    /// Number of uniform `t` steps used for the arc-length table and for
    /// each round of the closest-point search.
    pub curve_intervals: usize,
    /// Maximum refinement rounds of the closest-point search.
    pub closest_max_iterations: usize,
    /// The closest-point search stops once its bracket end points are
    /// this close.
    pub closest_epsilon: f64,
    /// Dragged handles at most this long are not mirrored.
    pub handle_epsilon: f64,
}

impl Default for CurveOptions {
    fn default() -> Self {
        CurveOptions {
            curve_intervals: 30,
            closest_max_iterations: 4,
            closest_epsilon: 1.0,
            handle_epsilon: 0.1,
        }
    }
}

impl CurveOptions {
    /// Set the number of sample intervals per curve.
    pub fn with_curve_intervals(mut self, intervals: usize) -> Self {
        self.curve_intervals = intervals;
        self
    }

    /// Set the iteration cap of the closest-point search.
    pub fn with_closest_max_iterations(mut self, iterations: usize) -> Self {
        self.closest_max_iterations = iterations;
        self
    }

    /// Set the bracket convergence distance of the closest-point search.
    pub fn with_closest_epsilon(mut self, epsilon: f64) -> Self {
        self.closest_epsilon = epsilon;
        self
    }

    /// Set the minimum handle length for control point realignment.
    pub fn with_handle_epsilon(mut self, epsilon: f64) -> Self {
        self.handle_epsilon = epsilon;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::CurveOptions;

    #[test]
    fn builder() {
        let opts = CurveOptions::default()
            .with_curve_intervals(64)
            .with_closest_max_iterations(10)
            .with_closest_epsilon(1e-3)
            .with_handle_epsilon(0.5);
        assert_eq!(opts.curve_intervals, 64);
        assert_eq!(opts.closest_max_iterations, 10);
        assert_eq!(opts.closest_epsilon, 1e-3);
        assert_eq!(opts.handle_epsilon, 0.5);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let opts: CurveOptions = serde_json::from_str(r#"{"curveIntervals": 50}"#).unwrap();
        assert_eq!(opts.curve_intervals, 50);
        assert_eq!(opts.closest_max_iterations, 4);
        assert_eq!(opts.closest_epsilon, 1.0);
    }
}
