// Copyright 2026 the Bezchain Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chained cubic Bézier paths for interactive editors.
//!
//! The bezchain library models a path as an ordered chain of cubic Bézier
//! curves whose joints are shared: the end point of one curve is the very
//! same point as the start point of the next. On top of that it provides
//! arc-length parametrization, closest-point search, sub-paths, even
//! distribution of points along the path, and a continuity controller that
//! keeps handles aligned while a user drags points around.
//!
//! # Examples
//!
//! ```
//! use bezchain::{BezierPath, CubicBezierCurve, Point};
//!
//! let mut path = BezierPath::new();
//! path.add_curve(CubicBezierCurve::new((0.0, 0.0), (10.0, 0.0), (3.0, 4.0), (7.0, 4.0)));
//! path.add_curve(CubicBezierCurve::new((10.0, 0.0), (20.0, 0.0), (13.0, -4.0), (17.0, -4.0)));
//! assert_eq!(path.curve_count(), 2);
//!
//! // Halfway along the path by arc length.
//! let mid = path.point_at(0.5);
//! assert!(mid.distance(Point::new(10.0, 0.0)) < 1e-9);
//!
//! // Dragging the shared joint moves it for both curves.
//! let joint = path.curve_ids(0).unwrap().end;
//! path.set_point(joint, Point::new(10.0, 2.0));
//! path.update_arc_lengths();
//! assert_eq!(path.start_point(), Some(Point::new(0.0, 0.0)));
//! assert_eq!(path.curve_at(1).unwrap().start_point(), Point::new(10.0, 2.0));
//! ```
//!
//! # Arc length
//!
//! Lengths come from a polyline of `curve_intervals` samples per curve
//! (see [`CurveOptions`]). Caches are refreshed by the path's own
//! operations; after editing points directly, call
//! [`BezierPath::update_arc_lengths`].
//!
//! # Features
//!
//! The `mint` feature adds conversions between [`Point`], [`Vec2`] and the
//! [`mint`](https://docs.rs/mint) interoperability types.

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![allow(clippy::many_single_char_names)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod affine;
mod arclen;
mod bezpath;
mod bounds;
mod common;
mod continuity;
mod cubicbez;
mod curve;
mod diagnostics;
mod error;
mod options;
mod point;
mod serial;
mod vec2;
mod vertex;

pub use crate::affine::*;
pub use crate::arclen::*;
pub use crate::bezpath::*;
pub use crate::bounds::*;
pub use crate::continuity::*;
pub use crate::cubicbez::*;
pub use crate::curve::*;
pub use crate::diagnostics::*;
pub use crate::error::*;
pub use crate::options::*;
pub use crate::point::*;
pub use crate::serial::*;
pub use crate::vec2::*;
pub use crate::vertex::*;
