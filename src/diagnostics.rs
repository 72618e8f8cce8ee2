// Copyright 2026 the Bezchain Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Warning sink for recoverable conditions.

use core::fmt;

/// Receives warnings about conditions the engine recovers from locally,
/// such as a path position outside `[0, length]` being clamped.
///
/// Paths hold their sink behind an `Arc`; see
/// [`BezierPath::with_diagnostics`](crate::BezierPath::with_diagnostics).
pub trait Diagnostics: fmt::Debug {
    /// Report a warning. The operation continues afterwards.
    fn warn(&self, message: &str);
}

/// Forwards warnings to the [`log`] facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn warn(&self, message: &str) {
        log::warn!(target: "bezchain", "{message}");
    }
}
