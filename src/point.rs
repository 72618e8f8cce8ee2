// Copyright 2026 the Bezchain Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A 2D point.

use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use crate::Vec2;

/// A 2D point.
///
/// Points are plain values. When two curves of a [`BezierPath`] share a
/// joint, the sharing is expressed through the path's point arena (see
/// [`PointId`]), not through the `Point` itself.
///
/// [`BezierPath`]: crate::BezierPath
/// [`PointId`]: crate::PointId
#[derive(Clone, Copy, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Point {
    /// The x coordinate.
    pub x: f64,
    /// The y coordinate.
    pub y: f64,
}

impl Point {
    /// The point (0, 0).
    pub const ZERO: Point = Point::new(0., 0.);

    /// Default tolerance for [`Point::approx_eq`].
    pub const EPSILON: f64 = 1e-6;

    /// Create a new `Point` with the provided `x` and `y` coordinates.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Convert this point into a `Vec2`.
    #[inline]
    pub const fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Linearly interpolate between two points.
    #[inline]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        self.to_vec2().lerp(other.to_vec2(), t).to_point()
    }

    /// Determine the midpoint of two points.
    #[inline]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new(0.5 * (self.x + other.x), 0.5 * (self.y + other.y))
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self - other).hypot()
    }

    /// Squared Euclidean distance.
    #[inline]
    pub fn distance_squared(self, other: Point) -> f64 {
        (self - other).hypot2()
    }

    /// Rotate this point by `angle` radians around `center`.
    #[inline]
    pub fn rotate_around(self, angle: f64, center: Point) -> Point {
        center + (self - center).rotate(angle)
    }

    /// Scale the distance from `anchor` by `factor`.
    #[inline]
    pub fn scale_from(self, anchor: Point, factor: f64) -> Point {
        anchor + (self - anchor) * factor
    }

    /// Scale the distance from `anchor` separately along each axis.
    #[inline]
    pub fn scale_xy_from(self, anchor: Point, factors: Vec2) -> Point {
        let d = self - anchor;
        Point::new(anchor.x + d.x * factors.x, anchor.y + d.y * factors.y)
    }

    /// Round both coordinates to `digits` fractional decimal digits.
    pub fn round_to(self, digits: u32) -> Point {
        let scale = 10f64.powi(digits as i32);
        Point::new(
            (self.x * scale).round() / scale,
            (self.y * scale).round() / scale,
        )
    }

    /// Is this point finite?
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Is this point NaN?
    #[inline]
    pub fn is_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    /// Compare if two points are within `accuracy` of each other on both axes.
    pub fn is_near(self, other: Point, accuracy: f64) -> bool {
        if !self.is_finite() || !other.is_finite() {
            return self == other;
        }
        (self.x - other.x).abs() <= accuracy && (self.y - other.y).abs() <= accuracy
    }

    /// Approximate equality with [`Point::EPSILON`].
    #[inline]
    pub fn approx_eq(self, other: Point) -> bool {
        self.is_near(other, Point::EPSILON)
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from(v: (f64, f64)) -> Point {
        Point { x: v.0, y: v.1 }
    }
}

impl From<[f64; 2]> for Point {
    #[inline]
    fn from(v: [f64; 2]) -> Point {
        Point { x: v[0], y: v[1] }
    }
}

impl From<Point> for (f64, f64) {
    #[inline]
    fn from(v: Point) -> (f64, f64) {
        (v.x, v.y)
    }
}

impl From<Point> for [f64; 2] {
    #[inline]
    fn from(v: Point) -> [f64; 2] {
        [v.x, v.y]
    }
}

impl Add<Vec2> for Point {
    type Output = Point;

    #[inline]
    fn add(self, other: Vec2) -> Self {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign<Vec2> for Point {
    #[inline]
    fn add_assign(&mut self, other: Vec2) {
        *self = *self + other;
    }
}

impl Sub<Vec2> for Point {
    type Output = Point;

    #[inline]
    fn sub(self, other: Vec2) -> Self {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl SubAssign<Vec2> for Point {
    #[inline]
    fn sub_assign(&mut self, other: Vec2) {
        *self = *self - other;
    }
}

impl Sub<Point> for Point {
    type Output = Vec2;

    #[inline]
    fn sub(self, other: Point) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "(")?;
        fmt::Display::fmt(&self.x, formatter)?;
        write!(formatter, ", ")?;
        fmt::Display::fmt(&self.y, formatter)?;
        write!(formatter, ")")
    }
}

#[cfg(feature = "mint")]
impl From<Point> for mint::Point2<f64> {
    #[inline]
    fn from(p: Point) -> mint::Point2<f64> {
        mint::Point2 { x: p.x, y: p.y }
    }
}

#[cfg(feature = "mint")]
impl From<mint::Point2<f64>> for Point {
    #[inline]
    fn from(p: mint::Point2<f64>) -> Point {
        Point { x: p.x, y: p.y }
    }
}
