// Copyright 2026 the Bezchain Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chained cubic Bézier paths.

use std::sync::Arc;

use crate::common::clamp_unit;
use crate::curve::closest_t;
use crate::vertex::Vertices;
use crate::{
    Affine, ArcLengthTable, BezierError, Bounds, CubicBez, CubicBezierCurve, CurveOptions,
    CurvePoint, Diagnostics, LogDiagnostics, Point, PointId, Vec2, Vertex,
};

/// Local parameter distance under which a sub-path boundary sits on a joint.
const JOINT_EPSILON: f64 = 1e-9;

/// The four point ids of one curve of a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CurveIds {
    /// The start point; shared with the previous curve's end point.
    pub start: PointId,
    /// The start control point.
    pub start_control: PointId,
    /// The end control point.
    pub end_control: PointId,
    /// The end point; shared with the next curve's start point.
    pub end: PointId,
}

impl CurveIds {
    /// The id with the given role.
    #[inline]
    pub fn get(&self, id: CurvePoint) -> PointId {
        match id {
            CurvePoint::Start => self.start,
            CurvePoint::StartControl => self.start_control,
            CurvePoint::EndControl => self.end_control,
            CurvePoint::End => self.end,
        }
    }

    #[inline]
    fn reversed(self) -> CurveIds {
        CurveIds {
            start: self.end,
            start_control: self.end_control,
            end_control: self.start_control,
            end: self.start,
        }
    }

    #[inline]
    pub(crate) fn bez(&self, points: &Vertices) -> CubicBez {
        CubicBez {
            p0: points.point(self.start),
            p1: points.point(self.start_control),
            p2: points.point(self.end_control),
            p3: points.point(self.end),
        }
    }
}

/// Result of [`BezierPath::locate_u`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Located {
    /// Index of the curve containing the position.
    pub curve_index: usize,
    /// Total length of the curves before it.
    pub length_before: f64,
    /// Total length up to and including it.
    pub length_through: f64,
}

#[derive(Clone, Debug)]
pub(crate) struct PathCurve {
    pub(crate) ids: CurveIds,
    pub(crate) table: ArcLengthTable,
}

/// An ordered chain of cubic Bézier curves.
///
/// Points live in an arena owned by the path. Adjacent curves share their
/// joint: `curve_ids(i).end == curve_ids(i + 1).start`, so moving a joint
/// once moves it for both curves. Every constructor and structural method
/// keeps this chain invariant.
///
/// Arc lengths are cached per curve. Methods of the path that change
/// geometry refresh them; after editing points directly with
/// [`set_point`](Self::set_point) or [`move_point`](Self::move_point),
/// call [`update_arc_lengths`](Self::update_arc_lengths) before reading
/// lengths. [`needs_update`](Self::needs_update) reports whether that is
/// still pending.
#[derive(Debug)]
pub struct BezierPath {
    points: Vertices,
    curves: Vec<PathCurve>,
    total_arc_length: f64,
    adjust_circular: bool,
    options: CurveOptions,
    diagnostics: Arc<dyn Diagnostics + Send + Sync>,
    updated_at: u64,
    destroyed: bool,
}

impl Default for BezierPath {
    fn default() -> Self {
        BezierPath {
            points: Vertices::default(),
            curves: Vec::new(),
            total_arc_length: 0.0,
            adjust_circular: false,
            options: CurveOptions::default(),
            diagnostics: Arc::new(LogDiagnostics),
            updated_at: 0,
            destroyed: false,
        }
    }
}

impl BezierPath {
    /// Create an empty path.
    pub fn new() -> BezierPath {
        BezierPath::default()
    }

    /// Use `options` for every curve of this path.
    #[must_use]
    pub fn with_options(mut self, options: CurveOptions) -> BezierPath {
        self.options = options;
        self.update_arc_lengths();
        self
    }

    /// Send warnings to `diagnostics` instead of the `log` facade.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics + Send + Sync>) -> BezierPath {
        self.diagnostics = diagnostics;
        self
    }

    /// Build a path from curves, aliasing each curve's start to the
    /// previous end.
    ///
    /// Unlike [`add_curve`](Self::add_curve), no control point is
    /// realigned, so imported geometry is kept as given (apart from the
    /// replaced start points).
    pub fn from_curves<I>(curves: I) -> BezierPath
    where
        I: IntoIterator<Item = CubicBezierCurve>,
    {
        let mut path = BezierPath::new();
        for curve in curves {
            path.push_curve(curve.bez());
        }
        path.update_arc_lengths();
        path
    }

    /// An empty path sharing this path's options and diagnostics.
    pub(crate) fn empty_like(&self) -> BezierPath {
        BezierPath {
            options: self.options,
            diagnostics: Arc::clone(&self.diagnostics),
            ..BezierPath::default()
        }
    }

    /// Append a curve without realignment.
    pub(crate) fn push_curve(&mut self, bez: CubicBez) {
        let start = match self.curves.last() {
            Some(prev) => prev.ids.end,
            None => self.points.alloc(bez.p0),
        };
        let ids = CurveIds {
            start,
            start_control: self.points.alloc(bez.p1),
            end_control: self.points.alloc(bez.p2),
            end: self.points.alloc(bez.p3),
        };
        self.push_ids(ids);
    }

    /// Append a curve whose points are already in the arena.
    pub(crate) fn push_ids(&mut self, ids: CurveIds) {
        let table = ArcLengthTable::compute(&ids.bez(&self.points), self.options.curve_intervals);
        self.curves.push(PathCurve { ids, table });
    }

    pub(crate) fn alloc_point(&mut self, point: Point) -> PointId {
        self.points.alloc(point)
    }

    /// Append a curve to the end of the path.
    ///
    /// On a non-empty path the curve's start point is dropped in favour of
    /// the current end point, and the new curve's start control point is
    /// then realigned to continue the previous curve smoothly.
    pub fn add_curve(&mut self, curve: CubicBezierCurve) {
        self.push_curve(curve.bez());
        let n = self.curves.len();
        if n > 1 {
            self.adjust_successor_control_point(n - 2, true, false);
        }
        self.update_arc_lengths();
    }

    /// [`add_curve`](Self::add_curve) for callers holding an optional curve.
    pub fn try_add_curve(&mut self, curve: Option<CubicBezierCurve>) -> Result<(), BezierError> {
        let curve = curve.ok_or(BezierError::NullCurve)?;
        self.add_curve(curve);
        Ok(())
    }

    /// The options shared by the curves of this path.
    #[inline]
    pub fn options(&self) -> &CurveOptions {
        &self.options
    }

    /// Whether the path is treated as a closed loop.
    #[inline]
    pub fn is_adjust_circular(&self) -> bool {
        self.adjust_circular
    }

    /// Treat the path as a closed loop for continuity adjustment.
    ///
    /// This does not join the end points; see
    /// [`from_reduced_list`](Self::from_reduced_list) for structural closing.
    pub fn set_adjust_circular(&mut self, circular: bool) {
        self.adjust_circular = circular;
    }

    /// Whether the last end point is the first start point.
    pub fn is_closed(&self) -> bool {
        match (self.curves.first(), self.curves.last()) {
            (Some(first), Some(last)) => first.ids.start == last.ids.end,
            _ => false,
        }
    }

    /// The number of curves.
    #[inline]
    pub fn curve_count(&self) -> usize {
        self.curves.len()
    }

    /// Whether the path has no curves.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// The point ids of curve `index`.
    pub fn curve_ids(&self, index: usize) -> Option<CurveIds> {
        self.curves.get(index).map(|c| c.ids)
    }

    /// The plain segment of curve `index`.
    pub fn bez(&self, index: usize) -> Option<CubicBez> {
        self.curves.get(index).map(|c| c.ids.bez(&self.points))
    }

    /// A detached copy of curve `index`, including its cached table.
    pub fn curve_at(&self, index: usize) -> Option<CubicBezierCurve> {
        self.curves.get(index).map(|c| self.snapshot(c))
    }

    /// Detached copies of every curve, in path order.
    pub fn curves(&self) -> impl Iterator<Item = CubicBezierCurve> + '_ {
        self.curves.iter().map(|c| self.snapshot(c))
    }

    fn snapshot(&self, c: &PathCurve) -> CubicBezierCurve {
        CubicBezierCurve::from_parts(c.ids.bez(&self.points), self.options, c.table.clone())
    }

    pub(crate) fn curve_length(&self, index: usize) -> f64 {
        self.curves[index].table.length()
    }

    /// The position of a point of this path.
    #[inline]
    pub fn point(&self, id: PointId) -> Point {
        self.points.point(id)
    }

    /// The stored vertex, with its `auto_adjust` flag.
    #[inline]
    pub fn vertex(&self, id: PointId) -> &Vertex {
        self.points.get(id)
    }

    /// The position of a point addressed by curve and role.
    pub fn curve_point(&self, curve_index: usize, id: CurvePoint) -> Option<Point> {
        self.curve_ids(curve_index).map(|ids| self.points.point(ids.get(id)))
    }

    /// Move a point to `p`.
    ///
    /// Shared joints move for both curves. Arc lengths become stale.
    pub fn set_point(&mut self, id: PointId, p: Point) {
        self.points.set(id, p);
    }

    /// Move a point by `amount`. Arc lengths become stale.
    pub fn move_point(&mut self, id: PointId, amount: Vec2) {
        self.points.get_mut(id).point += amount;
    }

    /// Whether dragging this point should keep its handles aligned.
    #[inline]
    pub fn auto_adjust(&self, id: PointId) -> bool {
        self.points.get(id).auto_adjust
    }

    /// Set the `auto_adjust` flag of a point.
    pub fn set_auto_adjust(&mut self, id: PointId, auto_adjust: bool) {
        self.points.set_auto_adjust(id, auto_adjust);
    }

    /// The first start point.
    pub fn start_point(&self) -> Option<Point> {
        self.curves.first().map(|c| self.points.point(c.ids.start))
    }

    /// The last end point.
    pub fn end_point(&self) -> Option<Point> {
        self.curves.last().map(|c| self.points.point(c.ids.end))
    }

    /// The cached total arc length.
    #[inline]
    pub fn length(&self) -> f64 {
        self.total_arc_length
    }

    /// Resample every curve and recompute the total arc length.
    pub fn update_arc_lengths(&mut self) {
        let points = &self.points;
        let intervals = self.options.curve_intervals;
        let mut total = 0.0;
        for c in &mut self.curves {
            c.table = ArcLengthTable::compute(&c.ids.bez(points), intervals);
            total += c.table.length();
        }
        self.total_arc_length = total;
        self.updated_at = self.points.generation();
        log::trace!(target: "bezchain", "{} curves resampled, length {total}", self.curves.len());
    }

    /// Resample one curve, leaving the total untouched.
    pub(crate) fn refresh_curve(&mut self, index: usize) {
        let c = &mut self.curves[index];
        c.table = ArcLengthTable::compute(&c.ids.bez(&self.points), self.options.curve_intervals);
    }

    /// Whether points changed since the last [`update_arc_lengths`](Self::update_arc_lengths).
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.points.generation() != self.updated_at
    }

    /// Find the curve containing arc-length position `u`.
    ///
    /// Positions past the end land in the last curve. Returns `None` for an
    /// empty path.
    pub fn locate_u(&self, u: f64) -> Option<Located> {
        let last = self.curves.len().checked_sub(1)?;
        let mut before = 0.0;
        for (i, c) in self.curves.iter().enumerate() {
            let through = before + c.table.length();
            if through >= u || i == last {
                return Some(Located {
                    curve_index: i,
                    length_before: before,
                    length_through: through,
                });
            }
            before = through;
        }
        None
    }

    fn clamp_u(&self, u: f64, query: &str) -> f64 {
        if u < 0.0 || u > self.total_arc_length {
            self.diagnostics.warn(&format!(
                "{query}: position {u} outside [0, {}], clamping",
                self.total_arc_length
            ));
            u.max(0.0).min(self.total_arc_length)
        } else {
            u
        }
    }

    /// Curve index and local parameter for path position `u`.
    fn locate_t(&self, u: f64, query: &str) -> Option<(usize, f64)> {
        if self.curves.is_empty() {
            self.diagnostics.warn(&format!("{query}: path is empty"));
            return None;
        }
        let u = self.clamp_u(u, query);
        let loc = self.locate_u(u)?;
        let len = self.curve_length(loc.curve_index);
        Some((loc.curve_index, (u - loc.length_before) / len))
    }

    fn nan_point() -> Point {
        Point::new(f64::NAN, f64::NAN)
    }

    /// The point at arc-length position `u` of the whole path.
    ///
    /// `u` outside `[0, length]` is clamped and reported to diagnostics.
    /// An empty path yields `NaN` coordinates.
    pub fn point_at_u(&self, u: f64) -> Point {
        match self.locate_t(u, "point_at_u") {
            Some((i, t)) => self.curves[i].ids.bez(&self.points).eval(t),
            None => BezierPath::nan_point(),
        }
    }

    /// The point at fraction `t` of the path length.
    pub fn point_at(&self, t: f64) -> Point {
        self.point_at_u(t * self.total_arc_length)
    }

    /// The tangent at arc-length position `u`.
    pub fn tangent_at_u(&self, u: f64) -> Vec2 {
        match self.locate_t(u, "tangent_at_u") {
            Some((i, t)) => self.curves[i].ids.bez(&self.points).deriv_at(t),
            None => BezierPath::nan_point().to_vec2(),
        }
    }

    /// The tangent at fraction `t` of the path length.
    pub fn tangent_at(&self, t: f64) -> Vec2 {
        self.tangent_at_u(t * self.total_arc_length)
    }

    /// The perpendicular at arc-length position `u`.
    pub fn perpendicular_at_u(&self, u: f64) -> Vec2 {
        self.tangent_at_u(u).perpendicular()
    }

    /// The perpendicular at fraction `t` of the path length.
    pub fn perpendicular_at(&self, t: f64) -> Vec2 {
        self.tangent_at(t).perpendicular()
    }

    /// The path fraction in `[0, 1]` closest to `p`.
    ///
    /// Every curve is searched; the winner's local parameter is mapped to
    /// arc length by `t * curve_length`. An empty path yields `0`.
    pub fn closest_t(&self, p: Point) -> f64 {
        let mut best: Option<(f64, f64)> = None;
        let mut before = 0.0;
        for c in &self.curves {
            let bez = c.ids.bez(&self.points);
            let len = c.table.length();
            let t = closest_t(&bez, p, &self.options);
            let d = bez.eval(t).distance(p);
            if best.map_or(true, |(best_d, _)| d < best_d) {
                best = Some((d, before + t * len));
            }
            before += len;
        }
        best.map_or(0.0, |(_, u)| clamp_unit(u / self.total_arc_length))
    }

    /// The part of the path between fractions `start_t` and `end_t`.
    ///
    /// Both are clamped to `[0, 1]`; `start_t > end_t` yields the part in
    /// reverse direction. The result is independent of this path.
    pub fn sub_path_at(&self, start_t: f64, end_t: f64) -> Result<BezierPath, BezierError> {
        let start_u = clamp_unit(start_t) * self.total_arc_length;
        let end_u = clamp_unit(end_t) * self.total_arc_length;
        let (Some(start), Some(end)) = (self.locate_u(start_u), self.locate_u(end_u)) else {
            return Err(BezierError::EmptyPath);
        };
        let mut result = self.empty_like();
        let (mut si, mut ei) = (start.curve_index, end.curve_index);
        let mut first_t = (start_u - start.length_before) / self.curve_length(si);
        let mut last_t = (end_u - end.length_before) / self.curve_length(ei);
        // A boundary on a joint belongs to the curve inside the range.
        if si < ei {
            if first_t >= 1.0 - JOINT_EPSILON {
                (si, first_t) = (si + 1, 0.0);
            }
            if si < ei && last_t <= JOINT_EPSILON {
                (ei, last_t) = (ei - 1, 1.0);
            }
        } else if ei < si {
            if first_t <= JOINT_EPSILON {
                (si, first_t) = (si - 1, 1.0);
            }
            if ei < si && last_t >= 1.0 - JOINT_EPSILON {
                (ei, last_t) = (ei + 1, 0.0);
            }
        }
        let bez = |i: usize| self.curves[i].ids.bez(&self.points);
        if si == ei {
            result.push_curve(bez(si).subsegment(first_t, last_t));
        } else if si < ei {
            result.push_curve(bez(si).subsegment(first_t, 1.0));
            for i in si + 1..ei {
                result.push_curve(bez(i));
            }
            result.push_curve(bez(ei).subsegment(0.0, last_t));
        } else {
            result.push_curve(bez(si).subsegment(first_t, 0.0));
            for i in (ei + 1..si).rev() {
                result.push_curve(bez(i).reversed());
            }
            result.push_curve(bez(ei).subsegment(1.0, last_t));
        }
        result.update_arc_lengths();
        Ok(result)
    }

    fn locate_curve_by(&self, id: CurvePoint, p: Point) -> Option<usize> {
        self.curves
            .iter()
            .position(|c| self.points.point(c.ids.get(id)).approx_eq(p))
    }

    /// Index of the first curve whose start point equals `p` (approximately).
    pub fn locate_curve_by_start_point(&self, p: Point) -> Option<usize> {
        self.locate_curve_by(CurvePoint::Start, p)
    }

    /// Index of the first curve whose end point equals `p` (approximately).
    pub fn locate_curve_by_end_point(&self, p: Point) -> Option<usize> {
        self.locate_curve_by(CurvePoint::End, p)
    }

    /// Index of the first curve whose start control point equals `p`.
    pub fn locate_curve_by_start_control_point(&self, p: Point) -> Option<usize> {
        self.locate_curve_by(CurvePoint::StartControl, p)
    }

    /// Index of the first curve whose end control point equals `p`.
    pub fn locate_curve_by_end_control_point(&self, p: Point) -> Option<usize> {
        self.locate_curve_by(CurvePoint::EndControl, p)
    }

    /// Every distinct point id of the path, in path order.
    ///
    /// Interior end points are left out because they are the next curve's
    /// start point, and so is the last end point of a closed path.
    pub fn point_ids(&self) -> Vec<PointId> {
        let mut ids = Vec::with_capacity(self.curves.len() * 3 + 1);
        let closed = self.is_closed();
        let n = self.curves.len();
        for (i, c) in self.curves.iter().enumerate() {
            if i == 0 {
                ids.push(c.ids.start);
            }
            ids.push(c.ids.start_control);
            ids.push(c.ids.end_control);
            if i + 1 < n || !closed {
                ids.push(c.ids.end);
            }
        }
        ids
    }

    /// Apply `affine` once to every distinct point.
    pub fn apply_affine(&mut self, affine: Affine) {
        for id in self.point_ids() {
            let v = self.points.get_mut(id);
            v.point = affine * v.point;
        }
        self.update_arc_lengths();
    }

    /// Move the whole path by `amount`.
    pub fn translate(&mut self, amount: Vec2) {
        self.apply_affine(Affine::translate(amount));
    }

    /// Scale the whole path by `factor` about `anchor`.
    pub fn scale(&mut self, anchor: Point, factor: f64) {
        self.apply_affine(Affine::scale_about(factor, anchor));
    }

    /// Scale the whole path about `anchor`, per axis.
    pub fn scale_xy(&mut self, factors: Vec2, anchor: Point) {
        self.apply_affine(Affine::scale_xy_about(factors, anchor));
    }

    /// Rotate the whole path by `angle` radians about `center`.
    pub fn rotate(&mut self, angle: f64, center: Point) {
        self.apply_affine(Affine::rotate_about(angle, center));
    }

    /// `count` points spaced evenly along the path by arc length.
    ///
    /// The first and last point are exactly the path's start and end
    /// point. Inside a curve the position is read from its sampled table,
    /// so spacing is uniform in length rather than in parameter.
    pub fn even_distribution_vertices(&self, count: usize) -> Result<Vec<Point>, BezierError> {
        if count < 2 {
            return Err(BezierError::InvalidPointCount(count));
        }
        let (Some(first), Some(last)) = (self.curves.first(), self.curves.last()) else {
            return Ok(Vec::new());
        };
        let mut result = Vec::with_capacity(count);
        result.push(self.points.point(first.ids.start));
        let step = self.total_arc_length / (count - 1) as f64;
        let mut index = 0;
        let mut before = 0.0;
        for k in 1..count - 1 {
            let u = step * k as f64;
            while index + 1 < self.curves.len() && before + self.curves[index].table.length() < u {
                before += self.curves[index].table.length();
                index += 1;
            }
            let c = &self.curves[index];
            let t = c.table.t_at_length(u - before);
            result.push(c.ids.bez(&self.points).eval(t));
        }
        result.push(self.points.point(last.ids.end));
        Ok(result)
    }

    /// The control polygon: start, then each curve's two control points
    /// and end point.
    pub fn to_path_points(&self) -> Vec<Point> {
        let mut result = Vec::with_capacity(self.curves.len() * 3 + 1);
        if let Some(first) = self.curves.first() {
            result.push(self.points.point(first.ids.start));
        }
        for c in &self.curves {
            result.push(self.points.point(c.ids.start_control));
            result.push(self.points.point(c.ids.end_control));
            result.push(self.points.point(c.ids.end));
        }
        result
    }

    /// Reverse the direction of the path.
    pub fn reverse(&mut self) {
        self.curves.reverse();
        for c in &mut self.curves {
            c.ids = c.ids.reversed();
        }
        self.update_arc_lengths();
    }

    /// Remove the first curve. Returns whether a curve was removed.
    ///
    /// Points only the removed curve used are dropped from the arena, and
    /// the remaining points get new ids.
    pub fn remove_start_point(&mut self) -> bool {
        if self.curves.is_empty() {
            return false;
        }
        self.curves.remove(0);
        self.compact();
        self.update_arc_lengths();
        true
    }

    /// Remove the last curve. Returns whether a curve was removed.
    ///
    /// Points only the removed curve used are dropped from the arena, and
    /// the remaining points get new ids.
    pub fn remove_end_point(&mut self) -> bool {
        if self.curves.pop().is_none() {
            return false;
        }
        self.compact();
        self.update_arc_lengths();
        true
    }

    /// The union of the curves' sampled bounds.
    pub fn bounds(&self) -> Option<Bounds> {
        self.curves
            .iter()
            .filter_map(|c| c.table.bounds())
            .reduce(|a, b| a.union(b))
    }

    /// Same number of curves and pairwise approximately equal points.
    pub fn equals(&self, other: &BezierPath) -> bool {
        self.curves.len() == other.curves.len()
            && self
                .curves
                .iter()
                .zip(&other.curves)
                .all(|(a, b)| a.ids.bez(&self.points).approx_eq(&b.ids.bez(&other.points)))
    }

    /// Release every curve and point.
    pub fn destroy(&mut self) {
        self.curves.clear();
        self.points.clear();
        self.total_arc_length = 0.0;
        self.updated_at = self.points.generation();
        self.destroyed = true;
    }

    /// Whether [`destroy`](Self::destroy) was called.
    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Check `curve_index` against the curve count.
    pub(crate) fn check_index(&self, curve_index: usize) -> Result<(), BezierError> {
        if curve_index < self.curves.len() {
            Ok(())
        } else {
            Err(BezierError::CurveIndexOutOfRange {
                index: curve_index,
                count: self.curves.len(),
            })
        }
    }

    pub(crate) fn ids_at(&self, curve_index: usize) -> CurveIds {
        self.curves[curve_index].ids
    }

    /// A fresh arena holding only the points still referenced by a curve,
    /// with the curves' ids rewritten to it. Shared ids stay shared.
    fn compacted_parts(&self) -> (Vertices, Vec<PathCurve>) {
        let mut points = Vertices::default();
        let mut remap: Vec<Option<PointId>> = vec![None; self.points.len()];
        let mut copy = |id: PointId, points: &mut Vertices| -> PointId {
            *remap[id.index()].get_or_insert_with(|| points.push(*self.points.get(id)))
        };
        let curves = self
            .curves
            .iter()
            .map(|c| PathCurve {
                ids: CurveIds {
                    start: copy(c.ids.start, &mut points),
                    start_control: copy(c.ids.start_control, &mut points),
                    end_control: copy(c.ids.end_control, &mut points),
                    end: copy(c.ids.end, &mut points),
                },
                table: c.table.clone(),
            })
            .collect();
        (points, curves)
    }

    /// Drop points no curve references any more.
    fn compact(&mut self) {
        let (points, curves) = self.compacted_parts();
        self.points = points;
        self.curves = curves;
    }
}

impl Clone for BezierPath {
    /// A deep copy: the clone has its own points, only the ones still in
    /// use, with the chain (and closure) re-established.
    fn clone(&self) -> Self {
        let (points, curves) = self.compacted_parts();
        let updated_at = if self.needs_update() {
            points.generation().wrapping_sub(1)
        } else {
            points.generation()
        };
        BezierPath {
            points,
            curves,
            total_arc_length: self.total_arc_length,
            adjust_circular: self.adjust_circular,
            options: self.options,
            diagnostics: Arc::clone(&self.diagnostics),
            updated_at,
            destroyed: self.destroyed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::testing::Recorder;
    use approx::assert_relative_eq;
    use core::f64::consts::FRAC_PI_2;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn two_curves() -> BezierPath {
        BezierPath::from_curves([
            CubicBezierCurve::new((0.0, 0.0), (10.0, 0.0), (2.0, 4.0), (8.0, 4.0)),
            CubicBezierCurve::new((10.0, 0.0), (20.0, 0.0), (12.0, -4.0), (18.0, -4.0)),
        ])
    }

    fn line(from: (f64, f64), to: (f64, f64)) -> CubicBezierCurve {
        let a = Point::from(from);
        let b = Point::from(to);
        CubicBezierCurve::new(a, b, a.lerp(b, 1.0 / 3.0), a.lerp(b, 2.0 / 3.0))
    }

    fn random_path(rng: &mut StdRng, n: usize) -> BezierPath {
        let mut p = || Point::new(rng.random_range(-50.0..50.0), rng.random_range(-50.0..50.0));
        let mut last = p();
        let mut curves = Vec::new();
        for _ in 0..n {
            let end = p();
            curves.push(CubicBezierCurve::new(last, end, p(), p()));
            last = end;
        }
        BezierPath::from_curves(curves)
    }

    #[test]
    fn from_curves_shares_joints() {
        let mut path = two_curves();
        assert_eq!(path.curve_count(), 2);
        let a = path.curve_ids(0).unwrap();
        let b = path.curve_ids(1).unwrap();
        assert_eq!(a.end, b.start);

        path.set_point(a.end, Point::new(10.0, 5.0));
        assert_eq!(path.curve_point(1, CurvePoint::Start), Some(Point::new(10.0, 5.0)));
        assert_eq!(path.curve_point(0, CurvePoint::End), Some(Point::new(10.0, 5.0)));
    }

    #[test]
    fn add_curve_replaces_start_and_realigns() {
        let mut path = BezierPath::new();
        path.add_curve(CubicBezierCurve::new((0.0, 0.0), (10.0, 0.0), (2.0, 2.0), (8.0, 2.0)));
        assert_relative_eq!(path.length(), path.curve_at(0).unwrap().length());

        // The start point (99, 99) is discarded.
        path.add_curve(CubicBezierCurve::new((99.0, 99.0), (20.0, 0.0), (12.0, 5.0), (18.0, 0.0)));
        let a = path.curve_ids(0).unwrap();
        let b = path.curve_ids(1).unwrap();
        assert_eq!(a.end, b.start);
        // Mirrors (8, 2) through (10, 0), keeping the length sqrt(29).
        let sc = path.point(b.start_control);
        let expected = Point::new(10.0, 0.0) + Vec2::new(2.0, -2.0).normalize() * 29f64.sqrt();
        assert!(sc.distance(expected) < 1e-9, "{sc:?}");

        let sum: f64 = path.curves().map(|c| c.length()).sum();
        assert_relative_eq!(path.length(), sum, epsilon = 1e-9);
        assert!(!path.needs_update());
    }

    #[test]
    fn try_add_missing_curve() {
        let mut path = BezierPath::new();
        assert!(matches!(path.try_add_curve(None), Err(BezierError::NullCurve)));
        assert!(path.try_add_curve(Some(line((0.0, 0.0), (1.0, 0.0)))).is_ok());
        assert_eq!(path.curve_count(), 1);
    }

    #[test]
    fn total_length_is_sum_of_curves() {
        let mut rng = StdRng::seed_from_u64(3);
        let path = random_path(&mut rng, 6);
        let sum: f64 = path.curves().map(|c| c.length()).sum();
        assert_relative_eq!(path.length(), sum, epsilon = 1e-9);
        assert!(path.length() >= 0.0);
    }

    #[test]
    fn staleness_tracking() {
        let mut path = two_curves();
        assert!(!path.needs_update());
        let id = path.curve_ids(1).unwrap().end;
        path.set_auto_adjust(id, false);
        assert!(!path.needs_update());
        assert!(!path.auto_adjust(id));
        path.move_point(id, Vec2::new(10.0, 0.0));
        assert!(path.needs_update());
        let stale = path.length();
        path.update_arc_lengths();
        assert!(!path.needs_update());
        assert!(path.length() > stale);
    }

    #[test]
    fn locate_u_walks_curves() {
        let path = BezierPath::from_curves([line((0.0, 0.0), (10.0, 0.0)), line((10.0, 0.0), (30.0, 0.0))]);
        assert!(BezierPath::new().locate_u(1.0).is_none());
        let loc = path.locate_u(5.0).unwrap();
        assert_eq!(loc.curve_index, 0);
        let loc = path.locate_u(15.0).unwrap();
        assert_eq!(loc.curve_index, 1);
        assert_relative_eq!(loc.length_before, 10.0, epsilon = 1e-9);
        assert_relative_eq!(loc.length_through, 30.0, epsilon = 1e-9);
        assert_eq!(path.locate_u(100.0).unwrap().curve_index, 1);
    }

    #[test]
    fn point_queries() {
        let path = BezierPath::from_curves([line((0.0, 0.0), (10.0, 0.0)), line((10.0, 0.0), (10.0, 10.0))]);
        assert_relative_eq!(path.length(), 20.0, epsilon = 1e-9);
        assert!(path.point_at(0.0).approx_eq(Point::new(0.0, 0.0)));
        assert!(path.point_at(1.0).approx_eq(Point::new(10.0, 10.0)));
        assert!(path.point_at_u(15.0).distance(Point::new(10.0, 5.0)) < 1e-9);
        let tan = path.tangent_at_u(5.0).normalize();
        assert!((tan - Vec2::new(1.0, 0.0)).hypot() < 1e-9);
        let perp = path.perpendicular_at(0.75).normalize();
        assert!((perp - Vec2::new(1.0, 0.0)).hypot() < 1e-9);
    }

    #[test]
    fn out_of_range_positions_are_clamped_and_reported() {
        let recorder = Arc::new(Recorder::default());
        let path = BezierPath::from_curves([line((0.0, 0.0), (10.0, 0.0))])
            .with_diagnostics(recorder.clone());
        assert!(path.point_at_u(-5.0).approx_eq(Point::new(0.0, 0.0)));
        assert!(path.point_at_u(500.0).approx_eq(Point::new(10.0, 0.0)));
        assert!(path.tangent_at(2.0).is_finite());
        assert_eq!(recorder.count(), 3);
        path.point_at(0.5);
        assert_eq!(recorder.count(), 3);

        let empty = BezierPath::new().with_diagnostics(recorder.clone());
        assert!(empty.point_at(0.5).is_nan());
        assert_eq!(recorder.count(), 4);
    }

    #[test]
    fn closest_t_finds_the_right_curve() {
        let path = BezierPath::from_curves([line((0.0, 0.0), (100.0, 0.0)), line((100.0, 0.0), (100.0, 100.0))]);
        let t = path.closest_t(Point::new(120.0, 75.0));
        assert!((t - 0.875).abs() < 0.01, "t = {t}");
        assert_eq!(path.closest_t(Point::new(-10.0, -10.0)), 0.0);
        assert_eq!(BezierPath::new().closest_t(Point::ZERO), 0.0);
    }

    #[test]
    fn sub_path_within_one_curve() {
        let path = BezierPath::from_curves([line((0.0, 0.0), (10.0, 0.0)), line((10.0, 0.0), (20.0, 0.0))]);
        let sub = path.sub_path_at(0.1, 0.4).unwrap();
        assert_eq!(sub.curve_count(), 1);
        assert!(sub.start_point().unwrap().distance(Point::new(2.0, 0.0)) < 1e-9);
        assert!(sub.end_point().unwrap().distance(Point::new(8.0, 0.0)) < 1e-9);
    }

    #[test]
    fn sub_path_boundary_on_a_joint() {
        let path = BezierPath::from_curves([line((0.0, 0.0), (10.0, 0.0)), line((10.0, 0.0), (20.0, 0.0))]);
        let forward = path.sub_path_at(0.5, 1.0).unwrap();
        assert_eq!(forward.curve_count(), 1);
        assert!(forward.start_point().unwrap().distance(Point::new(10.0, 0.0)) < 1e-9);
        assert!(forward.end_point().unwrap().distance(Point::new(20.0, 0.0)) < 1e-9);
        assert_relative_eq!(forward.length(), 10.0, epsilon = 1e-9);

        let backward = path.sub_path_at(1.0, 0.5).unwrap();
        assert_eq!(backward.curve_count(), 1);
        assert!(backward.start_point().unwrap().distance(Point::new(20.0, 0.0)) < 1e-9);
        assert!(backward.end_point().unwrap().distance(Point::new(10.0, 0.0)) < 1e-9);

        assert_eq!(path.sub_path_at(0.0, 0.5).unwrap().curve_count(), 1);
        assert_eq!(path.sub_path_at(0.5, 0.0).unwrap().curve_count(), 1);

        let path = BezierPath::from_curves([
            line((0.0, 0.0), (10.0, 0.0)),
            line((10.0, 0.0), (20.0, 0.0)),
            line((20.0, 0.0), (30.0, 0.0)),
        ]);
        let sub = path.sub_path_at(1.0 / 3.0, 2.0 / 3.0).unwrap();
        assert_eq!(sub.curve_count(), 1);
        assert!(sub.start_point().unwrap().distance(Point::new(10.0, 0.0)) < 1e-9);
        assert!(sub.end_point().unwrap().distance(Point::new(20.0, 0.0)) < 1e-9);
        let sub = path.sub_path_at(1.0 / 3.0, 1.0).unwrap();
        assert_eq!(sub.curve_count(), 2);
        for i in 0..sub.curve_count() {
            assert!(sub.curve_at(i).unwrap().length() > 9.0);
        }
    }

    #[test]
    fn sub_path_forward_and_backward() {
        let path = BezierPath::from_curves([
            line((0.0, 0.0), (10.0, 0.0)),
            line((10.0, 0.0), (20.0, 0.0)),
            line((20.0, 0.0), (30.0, 0.0)),
        ]);
        let forward = path.sub_path_at(0.1, 0.9).unwrap();
        assert_eq!(forward.curve_count(), 3);
        assert!(forward.start_point().unwrap().distance(Point::new(3.0, 0.0)) < 1e-9);
        assert!(forward.end_point().unwrap().distance(Point::new(27.0, 0.0)) < 1e-9);
        assert_relative_eq!(forward.length(), 24.0, epsilon = 1e-9);
        let ids: Vec<_> = (0..3).map(|i| forward.curve_ids(i).unwrap()).collect();
        assert_eq!(ids[0].end, ids[1].start);
        assert_eq!(ids[1].end, ids[2].start);

        let backward = path.sub_path_at(0.9, 0.1).unwrap();
        assert_eq!(backward.curve_count(), 3);
        assert!(backward.start_point().unwrap().distance(Point::new(27.0, 0.0)) < 1e-9);
        assert!(backward.end_point().unwrap().distance(Point::new(3.0, 0.0)) < 1e-9);
        assert!(backward.point_at(0.5).distance(Point::new(15.0, 0.0)) < 1e-9);

        let clamped = path.sub_path_at(-1.0, 2.0).unwrap();
        assert!(clamped.equals(&path));

        assert!(matches!(
            BezierPath::new().sub_path_at(0.0, 1.0),
            Err(BezierError::EmptyPath)
        ));
    }

    #[test]
    fn split_curve_as_path_matches_curve() {
        let c = CubicBezierCurve::new((0.0, 0.0), (10.0, 0.0), (0.0, 10.0), (10.0, 10.0));
        let t = 0.35;
        let path = BezierPath::from_curves([c.sub_curve_at(0.0, t), c.sub_curve_at(t, 1.0)]);
        for i in 0..=10 {
            let s = i as f64 / 10.0;
            assert!(path.bez(0).unwrap().eval(s).distance(c.point_at(s * t)) < 1e-9);
            assert!(path.bez(1).unwrap().eval(s).distance(c.point_at(t + s * (1.0 - t))) < 1e-9);
        }
        assert_relative_eq!(path.length(), c.length(), max_relative = 0.01);
    }

    #[test]
    fn locate_by_points() {
        let path = two_curves();
        assert_eq!(path.locate_curve_by_start_point(Point::new(10.0, 0.0)), Some(1));
        assert_eq!(path.locate_curve_by_end_point(Point::new(10.0, 0.0)), Some(0));
        assert_eq!(path.locate_curve_by_start_control_point(Point::new(12.0, -4.0)), Some(1));
        assert_eq!(path.locate_curve_by_end_control_point(Point::new(8.0, 4.0)), Some(0));
        assert_eq!(path.locate_curve_by_start_point(Point::new(1.0, 1.0)), None);
    }

    #[test]
    fn translate_moves_each_point_once() {
        let mut rng = StdRng::seed_from_u64(5);
        let path = random_path(&mut rng, 4);
        let mut moved = path.clone();
        let amount = Vec2::new(3.5, -7.25);
        moved.translate(amount);
        for (before, after) in path.to_path_points().iter().zip(moved.to_path_points()) {
            assert!((*before + amount).approx_eq(after), "{before:?} -> {after:?}");
        }
    }

    #[test]
    fn translate_closed_path_once() {
        let mut path = BezierPath::from_reduced_list(
            &[0.0, 0.0, 1.0, 1.0, 2.0, 1.0, 3.0, 0.0, 2.0, -1.0, 1.0, -1.0, 0.0, 0.0],
            true,
        )
        .unwrap();
        assert!(path.is_closed());
        assert_eq!(path.point_ids().len(), 6);
        path.translate(Vec2::new(1.0, 0.0));
        assert_eq!(path.start_point(), Some(Point::new(1.0, 0.0)));
        assert_eq!(path.end_point(), Some(Point::new(1.0, 0.0)));
    }

    #[test]
    fn scale_and_rotate() {
        let mut path = BezierPath::from_curves([line((0.0, 0.0), (10.0, 0.0)), line((10.0, 0.0), (10.0, 10.0))]);
        path.scale(Point::ZERO, 2.0);
        assert!(path.end_point().unwrap().approx_eq(Point::new(20.0, 20.0)));
        assert_relative_eq!(path.length(), 40.0, epsilon = 1e-9);
        path.scale_xy(Vec2::new(0.5, 1.0), Point::ZERO);
        assert!(path.end_point().unwrap().approx_eq(Point::new(10.0, 20.0)));
        path.rotate(FRAC_PI_2, Point::ZERO);
        assert!(path.end_point().unwrap().approx_eq(Point::new(-20.0, 10.0)));
        assert!(path.curve_point(1, CurvePoint::Start).unwrap().approx_eq(Point::new(0.0, 10.0)));
    }

    #[test]
    fn even_distribution() {
        let path = BezierPath::from_curves([line((0.0, 0.0), (10.0, 0.0)), line((10.0, 0.0), (10.0, 30.0))]);
        let pts = path.even_distribution_vertices(5).unwrap();
        assert_eq!(pts.len(), 5);
        assert_eq!(pts[0], Point::new(0.0, 0.0));
        assert_eq!(pts[4], Point::new(10.0, 30.0));
        assert!(pts[1].distance(Point::new(10.0, 0.0)) < 1e-6);
        assert!(pts[2].distance(Point::new(10.0, 10.0)) < 1e-6);
        assert!(pts[3].distance(Point::new(10.0, 20.0)) < 1e-6);

        let two = path.even_distribution_vertices(2).unwrap();
        assert_eq!(two, vec![path.start_point().unwrap(), path.end_point().unwrap()]);

        assert!(matches!(
            path.even_distribution_vertices(1),
            Err(BezierError::InvalidPointCount(1))
        ));
        assert!(BezierPath::new().even_distribution_vertices(3).unwrap().is_empty());
    }

    #[test]
    fn even_distribution_endpoints_on_random_paths() {
        let mut rng = StdRng::seed_from_u64(17);
        for n in 1..5 {
            let path = random_path(&mut rng, n);
            let count = rng.random_range(2..40);
            let pts = path.even_distribution_vertices(count).unwrap();
            assert_eq!(pts.len(), count);
            assert_eq!(pts[0], path.start_point().unwrap());
            assert_eq!(pts[count - 1], path.end_point().unwrap());
        }
    }

    #[test]
    fn path_points_deduplicate_joints() {
        let pts = two_curves().to_path_points();
        assert_eq!(pts.len(), 7);
        assert_eq!(pts[0], Point::new(0.0, 0.0));
        assert_eq!(pts[3], Point::new(10.0, 0.0));
        assert_eq!(pts[6], Point::new(20.0, 0.0));
    }

    #[test]
    fn reverse_keeps_chain() {
        let mut path = two_curves();
        let original = path.clone();
        path.reverse();
        assert_eq!(path.start_point(), Some(Point::new(20.0, 0.0)));
        assert_eq!(path.end_point(), Some(Point::new(0.0, 0.0)));
        assert_eq!(path.curve_ids(0).unwrap().end, path.curve_ids(1).unwrap().start);
        assert_relative_eq!(path.length(), original.length(), epsilon = 1e-9);
        path.reverse();
        assert!(path.equals(&original));
    }

    #[test]
    fn remove_curves() {
        let mut path = two_curves();
        assert!(path.remove_start_point());
        assert_eq!(path.curve_count(), 1);
        assert_eq!(path.start_point(), Some(Point::new(10.0, 0.0)));
        assert!(path.remove_end_point());
        assert!(path.is_empty());
        assert_eq!(path.length(), 0.0);
        assert!(!path.remove_end_point());
        assert!(!path.remove_start_point());
    }

    #[test]
    fn removing_curves_shrinks_the_arena() {
        let mut path = two_curves();
        assert_eq!(path.points.len(), 7);
        path.remove_start_point();
        assert_eq!(path.points.len(), 4);
        assert!(path.curve_at(0).unwrap().equals(&two_curves().curve_at(1).unwrap()));
        assert!(!path.needs_update());

        let mut path = two_curves();
        path.add_curve(line((20.0, 0.0), (30.0, 0.0)));
        path.remove_end_point();
        assert_eq!(path.points.len(), 7);
        let ids = (path.curve_ids(0).unwrap(), path.curve_ids(1).unwrap());
        assert_eq!(ids.0.end, ids.1.start);
        path.remove_end_point();
        path.remove_end_point();
        assert_eq!(path.points.len(), 0);
    }

    #[test]
    fn bounds_cover_all_curves() {
        let b = two_curves().bounds().unwrap();
        assert_eq!(b.min.x, 0.0);
        assert_eq!(b.max.x, 20.0);
        assert!(b.max.y > 2.9 && b.min.y < -2.9);
        assert!(BezierPath::new().bounds().is_none());
    }

    #[test]
    fn clone_is_deep_and_compact() {
        let mut path = two_curves();
        path.remove_start_point();
        let copy = path.clone();
        assert!(copy.equals(&path));
        assert_eq!(copy.points.len(), 4);

        let mut path = two_curves();
        let copy = path.clone();
        let joint = path.curve_ids(0).unwrap().end;
        path.move_point(joint, Vec2::new(0.0, 1.0));
        assert!(!copy.equals(&path));
        let ids = (copy.curve_ids(0).unwrap(), copy.curve_ids(1).unwrap());
        assert_eq!(ids.0.end, ids.1.start);
        assert!(!copy.needs_update());
        assert!(path.needs_update());
        assert!(path.clone().needs_update());
    }

    #[test]
    fn destroy_releases_everything() {
        let mut path = two_curves();
        path.destroy();
        assert!(path.is_destroyed());
        assert!(path.is_empty());
        assert_eq!(path.length(), 0.0);
        assert_eq!(path.points.len(), 0);
    }
}
