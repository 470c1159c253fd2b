// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanwerk detection pipeline — locate a document outline in camera frames,
// smooth it over time, decide when to auto-capture, and rectify the result.
//
// The per-frame flow is: preprocess (grayscale, denoise, edges) → extract
// candidate quadrilaterals (contour approximation, rotated rectangle, Hough
// fallback) → validate geometry → smooth and track stability → capture and
// rectify. `ScanSession` drives one frame at a time; `FrameAnalyzer` adds
// the streaming event surface on top.

mod analyzer;
mod extract;
mod overlay;
mod preprocess;
mod rectify;
mod session;
mod tracker;
mod validate;

#[cfg(test)]
mod test_support;

pub use analyzer::{AnalyzerOutcome, FrameAnalyzer, ScanEvent};
pub use overlay::draw_polygon_overlay;
pub use rectify::crop_document;
pub use session::{FrameAnalysis, ScanSession};
pub use tracker::{CaptureReason, QuadTracker, TrackerPhase, TrackerUpdate};
