// Copyright 2026 the Bezchain Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keeping handles aligned across the joints of a path.
//!
//! At a joint shared by two curves, the path is smooth when the two
//! control points on either side point in opposite directions. The
//! routines here restore that after one side was edited, by mirroring the
//! edited handle onto the neighbour.

use crate::{BezierError, BezierPath, CurvePoint, Point, PointId, Vec2};

/// The neighbour control point that mirrors a handle through a joint.
///
/// The handle runs from `main_point` to `main_control`. The result points
/// the other way from `neighbour_point`. With `obtain_handle_length` it
/// keeps the neighbour handle's current length, otherwise it copies the
/// main handle's length.
///
/// Returns `None` when the main handle is not longer than `epsilon`, since
/// its direction is then meaningless.
pub fn mirrored_handle(
    main_point: Point,
    main_control: Point,
    neighbour_point: Point,
    neighbour_control: Point,
    obtain_handle_length: bool,
    epsilon: f64,
) -> Option<Point> {
    let main = main_control - main_point;
    let main_len = main.hypot();
    if main_len <= epsilon {
        return None;
    }
    if obtain_handle_length {
        let neighbour_len = (neighbour_control - neighbour_point).hypot();
        Some(neighbour_point - main * (neighbour_len / main_len))
    } else {
        Some(neighbour_point - main)
    }
}

impl BezierPath {
    /// Realign `neighbour_control` against the handle from `main_point` to
    /// `main_control`. See [`mirrored_handle`].
    ///
    /// Returns whether the neighbour control point moved. Arc lengths are
    /// not refreshed.
    pub fn adjust_neighbour_control_point(
        &mut self,
        main_point: PointId,
        main_control: PointId,
        neighbour_point: PointId,
        neighbour_control: PointId,
        obtain_handle_length: bool,
    ) -> bool {
        let mirrored = mirrored_handle(
            self.point(main_point),
            self.point(main_control),
            self.point(neighbour_point),
            self.point(neighbour_control),
            obtain_handle_length,
            self.options().handle_epsilon,
        );
        match mirrored {
            Some(p) => {
                self.set_point(neighbour_control, p);
                true
            }
            None => false,
        }
    }

    fn predecessor(&self, index: usize) -> Option<usize> {
        let n = self.curve_count();
        if index >= n || (index == 0 && !self.is_adjust_circular()) {
            return None;
        }
        Some((index + n - 1) % n)
    }

    fn successor(&self, index: usize) -> Option<usize> {
        let n = self.curve_count();
        if index >= n || (index + 1 >= n && !self.is_adjust_circular()) {
            return None;
        }
        Some((index + 1) % n)
    }

    /// Mirror the start handle of curve `index` onto the end handle of the
    /// curve before it (the last curve, if the path is circular).
    ///
    /// Returns `false` when there is no such curve. The neighbour's
    /// arc-length table is always refreshed; with `update` the path total
    /// is as well.
    pub fn adjust_predecessor_control_point(
        &mut self,
        index: usize,
        obtain_handle_length: bool,
        update: bool,
    ) -> bool {
        let Some(prev) = self.predecessor(index) else {
            return false;
        };
        let main = self.ids_at(index);
        let nb = self.ids_at(prev);
        self.adjust_neighbour_control_point(
            main.start,
            main.start_control,
            nb.end,
            nb.end_control,
            obtain_handle_length,
        );
        self.finish_adjust(prev, update);
        true
    }

    /// Mirror the end handle of curve `index` onto the start handle of the
    /// curve after it (the first curve, if the path is circular).
    ///
    /// Returns `false` when there is no such curve.
    pub fn adjust_successor_control_point(
        &mut self,
        index: usize,
        obtain_handle_length: bool,
        update: bool,
    ) -> bool {
        let Some(next) = self.successor(index) else {
            return false;
        };
        let main = self.ids_at(index);
        let nb = self.ids_at(next);
        self.adjust_neighbour_control_point(
            main.end,
            main.end_control,
            nb.start,
            nb.start_control,
            obtain_handle_length,
        );
        self.finish_adjust(next, update);
        true
    }

    fn finish_adjust(&mut self, neighbour: usize, update: bool) {
        if update {
            self.update_arc_lengths();
        } else {
            self.refresh_curve(neighbour);
        }
    }

    /// Drag one point of curve `curve_index` by `amount`, the way an editor
    /// does.
    ///
    /// * Dragging a joint drags both handles attached to it.
    /// * Dragging a control point swings the handle on the far side of the
    ///   joint to stay opposite, keeping that handle's length.
    ///
    /// Across the first and last curve this only happens for circular
    /// paths. Arc lengths are refreshed afterwards.
    pub fn move_curve_point(
        &mut self,
        curve_index: usize,
        id: CurvePoint,
        amount: Vec2,
    ) -> Result<(), BezierError> {
        self.check_index(curve_index)?;
        let ids = self.ids_at(curve_index);
        self.move_point(ids.get(id), amount);
        match id {
            CurvePoint::Start => {
                self.move_point(ids.start_control, amount);
                if let Some(prev) = self.predecessor(curve_index) {
                    let pred = self.ids_at(prev);
                    self.move_point(pred.end_control, amount);
                }
            }
            CurvePoint::End => {
                self.move_point(ids.end_control, amount);
                if let Some(next) = self.successor(curve_index) {
                    let succ = self.ids_at(next);
                    self.move_point(succ.start_control, amount);
                }
            }
            CurvePoint::StartControl => {
                self.adjust_predecessor_control_point(curve_index, true, false);
            }
            CurvePoint::EndControl => {
                self.adjust_successor_control_point(curve_index, true, false);
            }
        }
        self.update_arc_lengths();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::mirrored_handle;
    use crate::{BezierError, BezierPath, CubicBezierCurve, CurvePoint, Point, Vec2};

    fn three_curves() -> BezierPath {
        BezierPath::from_curves([
            CubicBezierCurve::new((0.0, 0.0), (10.0, 0.0), (0.0, 5.0), (7.0, 3.0)),
            CubicBezierCurve::new((10.0, 0.0), (20.0, 0.0), (13.0, -3.0), (20.0, -5.0)),
            CubicBezierCurve::new((20.0, 0.0), (30.0, 0.0), (22.0, 2.0), (30.0, 5.0)),
        ])
    }

    fn assert_opposite(path: &BezierPath, before: usize, after: usize) {
        let a = path.curve_ids(before).unwrap();
        let b = path.curve_ids(after).unwrap();
        let joint = path.point(a.end);
        let h0 = (path.point(a.end_control) - joint).normalize();
        let h1 = (path.point(b.start_control) - joint).normalize();
        assert!((h0 + h1).hypot() < 1e-9, "{h0:?} vs {h1:?}");
    }

    #[test]
    fn mirror_keeps_or_copies_length() {
        let joint = Point::new(0.0, 0.0);
        let kept = mirrored_handle(
            joint,
            Point::new(-3.0, 0.0),
            joint,
            Point::new(0.0, 2.0),
            true,
            0.1,
        )
        .unwrap();
        assert!(kept.approx_eq(Point::new(2.0, 0.0)));

        let copied = mirrored_handle(
            joint,
            Point::new(-3.0, 0.0),
            joint,
            Point::new(0.0, 2.0),
            false,
            0.1,
        )
        .unwrap();
        assert!(copied.approx_eq(Point::new(3.0, 0.0)));
    }

    #[test]
    fn short_handles_are_ignored() {
        let p = Point::new(1.0, 1.0);
        assert!(mirrored_handle(p, Point::new(1.05, 1.0), p, Point::new(2.0, 2.0), true, 0.1).is_none());
        assert!(mirrored_handle(p, p, p, Point::new(2.0, 2.0), false, 0.1).is_none());
    }

    #[test]
    fn successor_and_predecessor() {
        let mut path = three_curves();
        assert!(path.adjust_successor_control_point(0, true, true));
        assert_opposite(&path, 0, 1);
        assert!(path.adjust_predecessor_control_point(2, false, true));
        assert_opposite(&path, 1, 2);
        let b = path.curve_ids(1).unwrap();
        let c = path.curve_ids(2).unwrap();
        let joint = path.point(c.start);
        let len = (path.point(b.end_control) - joint).hypot();
        assert!((len - (path.point(c.start_control) - joint).hypot()).abs() < 1e-9);
        assert!(!path.needs_update());

        assert!(!path.adjust_predecessor_control_point(0, true, true));
        assert!(!path.adjust_successor_control_point(2, true, true));
        assert!(!path.adjust_successor_control_point(7, true, true));
    }

    #[test]
    fn circular_paths_wrap() {
        let mut path = three_curves();
        path.set_adjust_circular(true);
        assert!(path.adjust_predecessor_control_point(0, true, true));
        let first = path.curve_ids(0).unwrap();
        let last = path.curve_ids(2).unwrap();
        let h = path.point(last.end_control) - path.point(last.end);
        let main = path.point(first.start_control) - path.point(first.start);
        assert!(h.normalize().cross(main.normalize()).abs() < 1e-9);
        assert!(h.dot(main) < 0.0);
        assert!(path.adjust_successor_control_point(2, true, true));
    }

    #[test]
    fn dragging_across_the_closing_joint() {
        let closed = || {
            BezierPath::from_reduced_list(&[0.0, 0.0, 1.0, 1.0, 2.0, 1.0, 3.0, 0.0, 2.0, -1.0, 1.0, -1.0, 0.0, 0.0], true)
                .unwrap()
        };
        let amount = Vec2::new(0.5, 0.5);
        let before = closed().to_path_points();

        let mut path = closed();
        path.move_curve_point(0, CurvePoint::Start, amount).unwrap();
        let after = path.to_path_points();
        assert_eq!(after[0], Point::new(0.5, 0.5));
        assert_eq!(after[1], Point::new(1.5, 1.5));
        assert_eq!(after[5], Point::new(1.5, -0.5));
        assert_eq!(after[6], Point::new(0.5, 0.5));
        for i in 2..=4 {
            assert_eq!(after[i], before[i]);
        }

        let mut other = closed();
        other.move_curve_point(1, CurvePoint::End, amount).unwrap();
        assert_eq!(other.to_path_points(), after);

        let mut path = closed();
        path.move_curve_point(0, CurvePoint::StartControl, Vec2::new(0.0, 0.5))
            .unwrap();
        assert_opposite(&path, 1, 0);
        assert!(!path.needs_update());
    }

    #[test]
    fn dragging_a_joint_drags_both_handles() {
        let mut path = three_curves();
        let before = path.to_path_points();
        let amount = Vec2::new(1.0, 2.0);
        path.move_curve_point(0, CurvePoint::End, amount).unwrap();
        let after = path.to_path_points();
        // End control, joint and next start control of curve 0/1.
        for i in 2..=4 {
            assert!(after[i].approx_eq(before[i] + amount));
        }
        for i in (0..2).chain(5..after.len()) {
            assert_eq!(after[i], before[i]);
        }
        assert!(!path.needs_update());

        let mut path = three_curves();
        path.move_curve_point(1, CurvePoint::Start, amount).unwrap();
        assert_eq!(path.to_path_points(), after);
    }

    #[test]
    fn open_path_ends_stay_local() {
        let mut path = three_curves();
        let before = path.to_path_points();
        path.move_curve_point(0, CurvePoint::Start, Vec2::new(0.0, 1.0)).unwrap();
        let after = path.to_path_points();
        assert!(after[0].approx_eq(Point::new(0.0, 1.0)));
        assert!(after[1].approx_eq(Point::new(0.0, 6.0)));
        assert_eq!(after[8], before[8]);
    }

    #[test]
    fn dragging_a_control_swings_the_opposite_handle() {
        let mut path = three_curves();
        let b = path.curve_ids(1).unwrap();
        let joint = path.point(b.end);
        let next = path.curve_ids(2).unwrap();
        let len = (path.point(next.start_control) - joint).hypot();
        path.move_curve_point(1, CurvePoint::EndControl, Vec2::new(3.0, 0.0)).unwrap();
        assert!(path.point(b.end_control).approx_eq(Point::new(23.0, -5.0)));
        assert_opposite(&path, 1, 2);
        let new_len = (path.point(next.start_control) - joint).hypot();
        assert!((new_len - len).abs() < 1e-9);

        path.move_curve_point(1, CurvePoint::StartControl, Vec2::new(0.0, -1.0)).unwrap();
        assert_opposite(&path, 0, 1);
    }

    #[test]
    fn dragging_an_end_control_updates_the_next_curve() {
        let mut path = BezierPath::from_curves([
            CubicBezierCurve::new((0.0, 0.0), (10.0, 0.0), (2.0, 4.0), (8.0, 4.0)),
            CubicBezierCurve::new((10.0, 0.0), (20.0, 0.0), (12.0, -4.0), (18.0, -4.0)),
        ]);
        let before = path.curve_point(1, CurvePoint::StartControl).unwrap();
        let length = path.length();
        path.move_curve_point(0, CurvePoint::EndControl, Vec2::new(5.0, 0.0)).unwrap();
        let after = path.curve_point(1, CurvePoint::StartControl).unwrap();
        assert!(!after.approx_eq(before));
        assert_opposite(&path, 0, 1);
        assert!(!path.needs_update());
        let sum: f64 = path.curves().map(|c| c.length()).sum();
        assert!((path.length() - sum).abs() < 1e-9);
        assert!(path.length() != length);
    }

    #[test]
    fn bad_index_is_an_error() {
        let mut path = three_curves();
        assert!(matches!(
            path.move_curve_point(3, CurvePoint::End, Vec2::ZERO),
            Err(BezierError::CurveIndexOutOfRange { index: 3, count: 3 })
        ));
    }
}
