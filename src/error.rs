// Copyright 2026 the Bezchain Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised by constructors, deserializers and structural operations.

use thiserror::Error;

/// Errors that can occur when building or restructuring curves and paths.
///
/// Geometric queries never return these; out-of-range parameters are
/// clamped and reported through [`Diagnostics`](crate::Diagnostics).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BezierError {
    /// A curve was required but none was given.
    #[error("cannot add a missing curve to a bezier path")]
    NullCurve,

    /// A required field was absent from serialized input.
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// Serialized input had the right syntax but unusable content, such as
    /// the wrong number of points for a curve.
    #[error("malformed curve data: {0}")]
    Malformed(String),

    /// Serialized input was not valid JSON or had the wrong shape.
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    /// A reduced list needs at least one curve (8 numbers).
    #[error("reduced list needs at least 8 numbers, got {0}")]
    ReducedListTooShort(usize),

    /// A reduced list must have `6n + 2` entries.
    #[error("reduced list length must be 6n + 2, got {0}")]
    ReducedListLength(usize),

    /// A curve point id outside `0..=3`.
    #[error("unknown curve point id {0}")]
    InvalidPointId(u8),

    /// Too few points requested from an even distribution.
    #[error("point count must be at least 2, got {0}")]
    InvalidPointCount(usize),

    /// A structural operation needs at least one curve.
    #[error("operation needs a path with at least one curve")]
    EmptyPath,

    /// A curve index past the end of the path.
    #[error("curve index {index} out of range for a path of {count} curves")]
    CurveIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of curves in the path.
        count: usize,
    },

    /// A coordinate JSON has no number for, such as NaN or infinity.
    #[error("coordinate {0} cannot be written as json")]
    NonFinite(f64),

    /// A length-based query on a curve of zero arc length.
    #[error("curve has zero arc length")]
    DegenerateCurve,
}
