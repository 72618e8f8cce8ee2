// Copyright 2026 the Bezchain Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON and reduced-list forms of curves and paths.
//!
//! The verbose form is an array of curve objects:
//!
//! ```json
//! [{"startPoint": [0, 0], "endPoint": [10, 0],
//!   "startControlPoint": [2, 2], "endControlPoint": [8, 8]}]
//! ```
//!
//! Points are written as `[x, y]` and read from either `[x, y]` or
//! `{"x": .., "y": ..}`.
//!
//! The reduced list is the flat sequence of path points
//! `[x0, y0, sc0x, sc0y, ec0x, ec0y, x1, y1, ...]`: the first point, then
//! six numbers per curve. Its length is `6n + 2` for `n` curves.

use serde::{Deserialize, Serialize};

use crate::{BezierError, BezierPath, CubicBez, CubicBezierCurve, CurveIds, Point};

/// A point as it appears in JSON.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointRecord {
    /// `[x, y]`
    Pair([f64; 2]),
    /// `{"x": .., "y": ..}`
    Object {
        /// The x coordinate.
        x: f64,
        /// The y coordinate.
        y: f64,
    },
}

impl From<PointRecord> for Point {
    fn from(record: PointRecord) -> Point {
        match record {
            PointRecord::Pair([x, y]) | PointRecord::Object { x, y } => Point::new(x, y),
        }
    }
}

impl From<Point> for PointRecord {
    fn from(p: Point) -> PointRecord {
        PointRecord::Pair([p.x, p.y])
    }
}

/// A curve as it appears in JSON.
///
/// All fields are optional so that absent and `null` points can be
/// reported by name instead of as a generic parse error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveRecord {
    /// The start point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_point: Option<PointRecord>,
    /// The end point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_point: Option<PointRecord>,
    /// The start control point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_control_point: Option<PointRecord>,
    /// The end control point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_control_point: Option<PointRecord>,
}

fn required(field: Option<PointRecord>, name: &'static str) -> Result<Point, BezierError> {
    field.map(Point::from).ok_or(BezierError::MissingField(name))
}

impl CurveRecord {
    /// Check that all four points are present.
    pub fn to_bez(&self) -> Result<CubicBez, BezierError> {
        Ok(CubicBez {
            p0: required(self.start_point, "startPoint")?,
            p1: required(self.start_control_point, "startControlPoint")?,
            p2: required(self.end_control_point, "endControlPoint")?,
            p3: required(self.end_point, "endPoint")?,
        })
    }
}

impl From<CubicBez> for CurveRecord {
    fn from(bez: CubicBez) -> CurveRecord {
        CurveRecord {
            start_point: Some(bez.p0.into()),
            end_point: Some(bez.p3.into()),
            start_control_point: Some(bez.p1.into()),
            end_control_point: Some(bez.p2.into()),
        }
    }
}

fn to_json_string<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String, BezierError> {
    let s = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(s)
}

impl CubicBezierCurve {
    /// Build a curve from `[start, end, start_control, end_control]`.
    ///
    /// Any other number of points is an error.
    pub fn from_array(points: &[[f64; 2]]) -> Result<CubicBezierCurve, BezierError> {
        match points {
            [start, end, start_control, end_control] => Ok(CubicBezierCurve::new(
                *start,
                *end,
                *start_control,
                *end_control,
            )),
            _ => Err(BezierError::Malformed(format!(
                "a curve needs 4 points, got {}",
                points.len()
            ))),
        }
    }

    /// The points in [`from_array`](Self::from_array) order.
    pub fn to_array(&self) -> [[f64; 2]; 4] {
        [
            self.start_point().into(),
            self.end_point().into(),
            self.start_control_point().into(),
            self.end_control_point().into(),
        ]
    }

    /// Build a curve from a parsed JSON object.
    pub fn from_object(value: &serde_json::Value) -> Result<CubicBezierCurve, BezierError> {
        let record = CurveRecord::deserialize(value)?;
        Ok(CubicBezierCurve::from_bez(record.to_bez()?, Default::default()))
    }

    /// Parse a curve from a JSON object string.
    pub fn from_json(json: &str) -> Result<CubicBezierCurve, BezierError> {
        let record: CurveRecord = serde_json::from_str(json)?;
        Ok(CubicBezierCurve::from_bez(record.to_bez()?, Default::default()))
    }

    /// The curve as a JSON object.
    pub fn to_json(&self, pretty: bool) -> Result<String, BezierError> {
        to_json_string(&CurveRecord::from(self.bez()), pretty)
    }
}

impl BezierPath {
    /// Build a path from curves given as point arrays, see
    /// [`CubicBezierCurve::from_array`]. Like
    /// [`from_curves`](Self::from_curves), nothing is realigned.
    pub fn from_array<C: AsRef<[[f64; 2]]>>(curves: &[C]) -> Result<BezierPath, BezierError> {
        let curves = curves
            .iter()
            .map(|c| CubicBezierCurve::from_array(c.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(BezierPath::from_curves(curves))
    }

    /// Parse a path from a JSON array of curve objects.
    pub fn from_json(json: &str) -> Result<BezierPath, BezierError> {
        let records: Vec<CurveRecord> = serde_json::from_str(json)?;
        let mut path = BezierPath::new();
        for record in &records {
            path.push_curve(record.to_bez()?);
        }
        path.update_arc_lengths();
        Ok(path)
    }

    /// The path as a JSON array of curve objects.
    pub fn to_json(&self, pretty: bool) -> Result<String, BezierError> {
        let records: Vec<CurveRecord> = (0..self.curve_count())
            .filter_map(|i| self.bez(i))
            .map(CurveRecord::from)
            .collect();
        to_json_string(&records, pretty)
    }

    /// The path points as a flat list of coordinates.
    pub fn to_reduced_list(&self) -> Vec<f64> {
        self.to_path_points()
            .into_iter()
            .flat_map(|p| [p.x, p.y])
            .collect()
    }

    /// The reduced list as a JSON array with `digits` fractional digits.
    ///
    /// Fails with [`BezierError::NonFinite`] if a coordinate is NaN or
    /// infinite, since JSON cannot represent it.
    pub fn to_reduced_list_representation(&self, digits: u32) -> Result<String, BezierError> {
        let digits = digits as usize;
        let numbers = self
            .to_reduced_list()
            .into_iter()
            .map(|v| {
                if v.is_finite() {
                    Ok(format!("{v:.digits$}"))
                } else {
                    Err(BezierError::NonFinite(v))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("[{}]", numbers.join(",")))
    }

    /// Parse a reduced list from its JSON array form.
    pub fn from_reduced_list_representation(
        json: &str,
        adjust_circular: bool,
    ) -> Result<BezierPath, BezierError> {
        let list: Vec<f64> = serde_json::from_str(json)?;
        BezierPath::from_reduced_list(&list, adjust_circular)
    }

    /// Build a path from a reduced list.
    ///
    /// With `adjust_circular` the path is closed: the last end point is the
    /// first start point, and the coordinates given for it are ignored.
    /// The path is also marked circular for continuity adjustment.
    pub fn from_reduced_list(list: &[f64], adjust_circular: bool) -> Result<BezierPath, BezierError> {
        if list.len() < 8 {
            return Err(BezierError::ReducedListTooShort(list.len()));
        }
        if (list.len() - 2) % 6 != 0 {
            return Err(BezierError::ReducedListLength(list.len()));
        }
        let mut path = BezierPath::new();
        path.set_adjust_circular(adjust_circular);
        let first = path.alloc_point(Point::new(list[0], list[1]));
        let mut start = first;
        let chunks = list[2..].chunks_exact(6);
        let last = chunks.len() - 1;
        for (i, c) in chunks.enumerate() {
            let start_control = path.alloc_point(Point::new(c[0], c[1]));
            let end_control = path.alloc_point(Point::new(c[2], c[3]));
            let end = if adjust_circular && i == last {
                first
            } else {
                path.alloc_point(Point::new(c[4], c[5]))
            };
            path.push_ids(CurveIds {
                start,
                start_control,
                end_control,
                end,
            });
            start = end;
        }
        path.update_arc_lengths();
        Ok(path)
    }
}
