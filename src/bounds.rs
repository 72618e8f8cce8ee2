// Copyright 2026 the Bezchain Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned bounding boxes.

use crate::{Point, Vec2};

/// An axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    /// The minimum corner.
    pub min: Point,
    /// The maximum corner.
    pub max: Point,
}

impl Bounds {
    /// A new box from minimum and maximum corners.
    #[inline]
    pub fn new(min: impl Into<Point>, max: impl Into<Point>) -> Bounds {
        Bounds {
            min: min.into(),
            max: max.into(),
        }
    }

    /// A new box spanning two points, in any order.
    ///
    /// The result has non-negative width and height.
    #[inline]
    pub fn from_points(p0: impl Into<Point>, p1: impl Into<Point>) -> Bounds {
        let p0 = p0.into();
        let p1 = p1.into();
        Bounds {
            min: Point::new(p0.x.min(p1.x), p0.y.min(p1.y)),
            max: Point::new(p0.x.max(p1.x), p0.y.max(p1.y)),
        }
    }

    /// The smallest box containing every point of the iterator.
    ///
    /// Returns `None` for an empty iterator.
    pub fn compute_from_points<I>(points: I) -> Option<Bounds>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Bounds::new(first, first), |acc, p| acc.union_pt(p)))
    }

    /// The width of the box.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// The height of the box.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// The size of the box, as a vector.
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// The center point of the box.
    #[inline]
    pub fn center(&self) -> Point {
        self.min.midpoint(self.max)
    }

    /// The smallest box enclosing two boxes.
    #[inline]
    pub fn union(&self, other: Bounds) -> Bounds {
        self.union_pt(other.min).union_pt(other.max)
    }

    /// Compute the union with one point.
    #[inline]
    pub fn union_pt(&self, pt: Point) -> Bounds {
        Bounds {
            min: Point::new(self.min.x.min(pt.x), self.min.y.min(pt.y)),
            max: Point::new(self.max.x.max(pt.x), self.max.y.max(pt.y)),
        }
    }

    /// Whether `pt` lies inside the box (edges included).
    #[inline]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.min.x && pt.x <= self.max.x && pt.y >= self.min.y && pt.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use crate::{Bounds, Point};

    #[test]
    fn from_points_normalizes() {
        let b = Bounds::from_points((10.0, 0.0), (0.0, 5.0));
        assert_eq!(b.min, Point::new(0.0, 0.0));
        assert_eq!(b.max, Point::new(10.0, 5.0));
        assert_eq!(b.width(), 10.0);
        assert_eq!(b.height(), 5.0);
        assert_eq!(b.center(), Point::new(5.0, 2.5));
    }

    #[test]
    fn compute_from_points() {
        assert!(Bounds::compute_from_points(Vec::new()).is_none());
        let pts = [
            Point::new(1.0, -1.0),
            Point::new(-3.0, 2.0),
            Point::new(0.5, 7.0),
        ];
        let b = Bounds::compute_from_points(pts).unwrap();
        assert_eq!(b, Bounds::new((-3.0, -1.0), (1.0, 7.0)));
        assert!(pts.iter().all(|&p| b.contains(p)));
    }

    #[test]
    fn union() {
        let a = Bounds::new((0.0, 0.0), (1.0, 1.0));
        let b = Bounds::new((2.0, -1.0), (3.0, 0.5));
        assert_eq!(a.union(b), Bounds::new((0.0, -1.0), (3.0, 1.0)));
    }
}
