// Copyright 2026 the Bezchain Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena storage for the points of a path.

use crate::Point;

/// Identifies a point in a path's arena.
///
/// Two curves that hold the same `PointId` share the point: moving it
/// through one curve moves it for the other. Ids are only meaningful for
/// the path that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointId(u32);

impl PointId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A point stored in a path, with its editor flag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    /// The position.
    pub point: Point,
    /// Whether dragging this joint should keep the neighbouring handles
    /// aligned. Editors consult this before calling the continuity
    /// routines; the path itself never reads it.
    pub auto_adjust: bool,
}

impl Vertex {
    /// A vertex with auto adjustment enabled.
    #[inline]
    pub fn new(point: Point) -> Vertex {
        Vertex {
            point,
            auto_adjust: true,
        }
    }
}

/// Backing store of a path's points.
#[derive(Clone, Debug, Default)]
pub(crate) struct Vertices {
    slots: Vec<Vertex>,
    generation: u64,
}

impl Vertices {
    pub(crate) fn alloc(&mut self, point: Point) -> PointId {
        self.push(Vertex::new(point))
    }

    pub(crate) fn push(&mut self, vertex: Vertex) -> PointId {
        let id = PointId(self.slots.len() as u32);
        self.slots.push(vertex);
        self.generation += 1;
        id
    }

    #[inline]
    pub(crate) fn get(&self, id: PointId) -> &Vertex {
        &self.slots[id.index()]
    }

    #[inline]
    pub(crate) fn point(&self, id: PointId) -> Point {
        self.slots[id.index()].point
    }

    /// Mutable access to a vertex; counts as a geometry change.
    #[inline]
    pub(crate) fn get_mut(&mut self, id: PointId) -> &mut Vertex {
        self.generation += 1;
        &mut self.slots[id.index()]
    }

    #[inline]
    pub(crate) fn set(&mut self, id: PointId, point: Point) {
        self.get_mut(id).point = point;
    }

    /// Flags are not geometry, so this leaves the generation alone.
    #[inline]
    pub(crate) fn set_auto_adjust(&mut self, id: PointId, auto_adjust: bool) {
        self.slots[id.index()].auto_adjust = auto_adjust;
    }

    #[inline]
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::Vertices;
    use crate::Point;

    #[test]
    fn ids_address_their_slot() {
        let mut v = Vertices::default();
        let a = v.alloc(Point::new(1.0, 2.0));
        let b = v.alloc(Point::new(3.0, 4.0));
        assert_ne!(a, b);
        v.set(a, Point::new(9.0, 9.0));
        assert_eq!(v.point(a), Point::new(9.0, 9.0));
        assert_eq!(v.point(b), Point::new(3.0, 4.0));
        assert!(v.get(b).auto_adjust);
        assert_eq!(v.len(), 2);
    }

    #[test]
    fn mutation_bumps_generation() {
        let mut v = Vertices::default();
        let a = v.alloc(Point::ZERO);
        let g = v.generation();
        v.set_auto_adjust(a, false);
        assert_eq!(v.generation(), g);
        assert!(!v.get(a).auto_adjust);
        v.get_mut(a).point = Point::new(1.0, 1.0);
        assert!(v.generation() > g);
    }
}
