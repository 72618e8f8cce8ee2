// Copyright 2026 the Bezchain Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bézier curves with a cached arc-length table.

use crate::common::clamp_unit;
use crate::{
    Affine, ArcLengthTable, BezierError, Bounds, CubicBez, CurveOptions, Point, Vec2,
};

/// Names one of the four points of a cubic curve.
///
/// The integer values `0..=3` are the wire representation; use
/// [`TryFrom<u8>`] to decode them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CurvePoint {
    /// The curve's start point.
    Start = 0,
    /// The control point attached to the start point.
    StartControl = 1,
    /// The control point attached to the end point.
    EndControl = 2,
    /// The curve's end point.
    End = 3,
}

impl CurvePoint {
    /// All four roles, in wire order.
    pub const ALL: [CurvePoint; 4] = [
        CurvePoint::Start,
        CurvePoint::StartControl,
        CurvePoint::EndControl,
        CurvePoint::End,
    ];

    /// Whether this is one of the two control points.
    #[inline]
    pub fn is_control(self) -> bool {
        matches!(self, CurvePoint::StartControl | CurvePoint::EndControl)
    }
}

impl TryFrom<u8> for CurvePoint {
    type Error = BezierError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(CurvePoint::Start),
            1 => Ok(CurvePoint::StartControl),
            2 => Ok(CurvePoint::EndControl),
            3 => Ok(CurvePoint::End),
            _ => Err(BezierError::InvalidPointId(id)),
        }
    }
}

impl From<CurvePoint> for u8 {
    #[inline]
    fn from(id: CurvePoint) -> u8 {
        id as u8
    }
}

/// A cubic Bézier curve that caches a sampled arc-length table.
///
/// The table is built on construction and refreshed by every mutating
/// method of the curve. Position queries by arc length (`point(u)`,
/// `tangent(u)`, ...) read the cached length, so they map `u` to `t`
/// linearly: `t = u / length`.
#[derive(Clone, Debug)]
pub struct CubicBezierCurve {
    bez: CubicBez,
    options: CurveOptions,
    table: ArcLengthTable,
}

impl CubicBezierCurve {
    /// Create a curve from its start point, end point, start control point
    /// and end control point, in that order.
    pub fn new(
        start: impl Into<Point>,
        end: impl Into<Point>,
        start_control: impl Into<Point>,
        end_control: impl Into<Point>,
    ) -> CubicBezierCurve {
        let bez = CubicBez {
            p0: start.into(),
            p1: start_control.into(),
            p2: end_control.into(),
            p3: end.into(),
        };
        CubicBezierCurve::from_bez(bez, CurveOptions::default())
    }

    /// Create a curve from a plain segment and explicit options.
    pub fn from_bez(bez: CubicBez, options: CurveOptions) -> CubicBezierCurve {
        let table = ArcLengthTable::compute(&bez, options.curve_intervals);
        CubicBezierCurve {
            bez,
            options,
            table,
        }
    }

    /// Assemble a curve from an already computed table.
    pub(crate) fn from_parts(
        bez: CubicBez,
        options: CurveOptions,
        table: ArcLengthTable,
    ) -> CubicBezierCurve {
        CubicBezierCurve {
            bez,
            options,
            table,
        }
    }

    /// Replace the options, refreshing the table.
    #[must_use]
    pub fn with_options(mut self, options: CurveOptions) -> CubicBezierCurve {
        self.options = options;
        self.update_arc_lengths();
        self
    }

    /// The plain segment.
    #[inline]
    pub fn bez(&self) -> CubicBez {
        self.bez
    }

    /// The options this curve was built with.
    #[inline]
    pub fn options(&self) -> &CurveOptions {
        &self.options
    }

    /// The start point.
    #[inline]
    pub fn start_point(&self) -> Point {
        self.bez.p0
    }

    /// The start control point.
    #[inline]
    pub fn start_control_point(&self) -> Point {
        self.bez.p1
    }

    /// The end control point.
    #[inline]
    pub fn end_control_point(&self) -> Point {
        self.bez.p2
    }

    /// The end point.
    #[inline]
    pub fn end_point(&self) -> Point {
        self.bez.p3
    }

    /// The point with the given role.
    pub fn point_by_id(&self, id: CurvePoint) -> Point {
        match id {
            CurvePoint::Start => self.bez.p0,
            CurvePoint::StartControl => self.bez.p1,
            CurvePoint::EndControl => self.bez.p2,
            CurvePoint::End => self.bez.p3,
        }
    }

    fn point_by_id_mut(&mut self, id: CurvePoint) -> &mut Point {
        match id {
            CurvePoint::Start => &mut self.bez.p0,
            CurvePoint::StartControl => &mut self.bez.p1,
            CurvePoint::EndControl => &mut self.bez.p2,
            CurvePoint::End => &mut self.bez.p3,
        }
    }

    /// Replace the point with the given role and refresh the table.
    pub fn set_point(&mut self, id: CurvePoint, p: Point) -> &mut Self {
        *self.point_by_id_mut(id) = p;
        self.update_arc_lengths();
        self
    }

    /// Move the point with the given role by `amount`.
    ///
    /// When `move_control` is set, moving the start or end point also
    /// moves its own control point. With `update` unset the arc-length
    /// table is left stale for the caller to refresh.
    pub fn move_curve_point(
        &mut self,
        id: CurvePoint,
        amount: Vec2,
        move_control: bool,
        update: bool,
    ) -> &mut Self {
        *self.point_by_id_mut(id) += amount;
        if move_control {
            match id {
                CurvePoint::Start => self.bez.p1 += amount,
                CurvePoint::End => self.bez.p2 += amount,
                CurvePoint::StartControl | CurvePoint::EndControl => {}
            }
        }
        if update {
            self.update_arc_lengths();
        }
        self
    }

    /// The number of sample intervals of the arc-length table.
    #[inline]
    pub fn curve_intervals(&self) -> usize {
        self.options.curve_intervals
    }

    /// Change the number of sample intervals and refresh the table.
    pub fn set_curve_intervals(&mut self, intervals: usize) -> &mut Self {
        self.options.curve_intervals = intervals;
        self.update_arc_lengths();
        self
    }

    /// Resample the curve and recompute its arc length.
    pub fn update_arc_lengths(&mut self) {
        self.table = ArcLengthTable::compute(&self.bez, self.options.curve_intervals);
    }

    /// The cached arc length.
    #[inline]
    pub fn length(&self) -> f64 {
        self.table.length()
    }

    /// The cached arc-length table.
    #[inline]
    pub fn arc_length_table(&self) -> &ArcLengthTable {
        &self.table
    }

    /// The point at parameter `t`.
    ///
    /// `t` is not clamped; values outside `[0, 1]` extrapolate.
    #[inline]
    pub fn point_at(&self, t: f64) -> Point {
        self.bez.eval(t)
    }

    /// The point at arc-length position `u`.
    ///
    /// A curve of zero length yields `NaN` coordinates; see
    /// [`try_point`](Self::try_point).
    #[inline]
    pub fn point(&self, u: f64) -> Point {
        self.point_at(u / self.length())
    }

    /// Like [`point`](Self::point), but a zero-length curve is an error.
    pub fn try_point(&self, u: f64) -> Result<Point, BezierError> {
        if self.length() == 0.0 {
            return Err(BezierError::DegenerateCurve);
        }
        Ok(self.point(u))
    }

    /// The tangent (first derivative) at parameter `t`.
    #[inline]
    pub fn tangent_at(&self, t: f64) -> Vec2 {
        self.bez.deriv_at(t)
    }

    /// The tangent at arc-length position `u`.
    #[inline]
    pub fn tangent(&self, u: f64) -> Vec2 {
        self.tangent_at(u / self.length())
    }

    /// The perpendicular at parameter `t`; see [`Vec2::perpendicular`].
    #[inline]
    pub fn perpendicular_at(&self, t: f64) -> Vec2 {
        self.tangent_at(t).perpendicular()
    }

    /// The perpendicular at arc-length position `u`.
    #[inline]
    pub fn perpendicular(&self, u: f64) -> Vec2 {
        self.tangent(u).perpendicular()
    }

    /// Convert an arc-length position to a parameter in `[0, 1]`.
    #[inline]
    pub fn convert_u_to_t(&self, u: f64) -> f64 {
        clamp_unit(u / self.length())
    }

    /// The parameter of the curve point closest to `p`.
    ///
    /// This is a bracketing search without derivatives; see
    /// [`CurveOptions`] for its iteration cap and threshold.
    pub fn closest_t(&self, p: Point) -> f64 {
        closest_t(&self.bez, p, &self.options)
    }

    /// The curve point closest to `p`.
    pub fn closest_point(&self, p: Point) -> Point {
        self.point_at(self.closest_t(p))
    }

    /// A new, independent curve covering `t_start..t_end`.
    ///
    /// `t_start > t_end` gives a reversed sub-curve.
    pub fn sub_curve_at(&self, t_start: f64, t_end: f64) -> CubicBezierCurve {
        CubicBezierCurve::from_bez(self.bez.subsegment(t_start, t_end), self.options)
    }

    /// Like [`sub_curve_at`](Self::sub_curve_at) with arc-length positions.
    pub fn sub_curve(&self, u_start: f64, u_end: f64) -> CubicBezierCurve {
        self.sub_curve_at(self.convert_u_to_t(u_start), self.convert_u_to_t(u_end))
    }

    /// Cut away everything before parameter `t`.
    pub fn trim_start_at(&mut self, t: f64) -> &mut Self {
        self.replace_bez(self.bez.subsegment(t, 1.0))
    }

    /// Cut away everything before arc-length position `u`.
    pub fn trim_start(&mut self, u: f64) -> &mut Self {
        self.trim_start_at(self.convert_u_to_t(u))
    }

    /// Cut away everything after parameter `t`.
    pub fn trim_end_at(&mut self, t: f64) -> &mut Self {
        self.replace_bez(self.bez.subsegment(0.0, t))
    }

    /// Cut away everything after arc-length position `u`.
    pub fn trim_end(&mut self, u: f64) -> &mut Self {
        self.trim_end_at(self.convert_u_to_t(u))
    }

    /// Swap start with end and the two control points.
    pub fn reverse(&mut self) -> &mut Self {
        self.replace_bez(self.bez.reversed())
    }

    /// Move all four points by `amount`.
    pub fn translate(&mut self, amount: Vec2) -> &mut Self {
        self.apply_affine(Affine::translate(amount))
    }

    /// Transform all four points.
    pub fn apply_affine(&mut self, affine: Affine) -> &mut Self {
        self.replace_bez(affine * self.bez)
    }

    fn replace_bez(&mut self, bez: CubicBez) -> &mut Self {
        self.bez = bez;
        self.update_arc_lengths();
        self
    }

    /// Whether all four points are approximately equal to `other`'s.
    pub fn equals(&self, other: &CubicBezierCurve) -> bool {
        self.bez.approx_eq(&other.bez)
    }

    /// Bounds of the sampled polyline.
    ///
    /// The polyline always has at least the start and end point.
    pub fn bounds(&self) -> Bounds {
        self.table
            .bounds()
            .unwrap_or_else(|| Bounds::from_points(self.bez.p0, self.bez.p3))
    }

    /// Exact bounds from the curve's extrema.
    pub fn tight_bounds(&self) -> Bounds {
        self.bez.tight_bounds()
    }
}

/// Coarse-to-fine search for the parameter closest to `p`.
///
/// Every round samples `curve_intervals + 1` parameters across the
/// current bracket and narrows the bracket to the neighbours of the best
/// sample. At least one round always runs.
pub(crate) fn closest_t(bez: &CubicBez, p: Point, options: &CurveOptions) -> f64 {
    let steps = options.curve_intervals.max(1);
    let (mut t0, mut t1) = (0.0, 1.0);
    let mut best_t = 0.0;
    let mut iteration = 0;
    loop {
        let span = t1 - t0;
        let step = span / steps as f64;
        let mut best_d = f64::INFINITY;
        for i in 0..=steps {
            let t = t0 + span * (i as f64 / steps as f64);
            let d = bez.eval(t).distance_squared(p);
            if d < best_d {
                best_d = d;
                best_t = t;
            }
        }
        t0 = (best_t - step).max(0.0);
        t1 = (best_t + step).min(1.0);
        iteration += 1;
        if iteration >= options.closest_max_iterations
            || bez.eval(t0).distance(bez.eval(t1)) <= options.closest_epsilon
        {
            return best_t;
        }
    }
}
