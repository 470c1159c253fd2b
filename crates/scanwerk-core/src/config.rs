// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Detection and auto-capture configuration.

use serde::{Deserialize, Serialize};

/// Detection algorithm selector.
///
/// Reserved for future detection strategies; only the document pipeline is
/// defined today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DetectionMode {
    /// Contour/rectangle/Hough document pipeline.
    #[default]
    Document,
}

/// Tuning parameters for document detection and auto-capture.
///
/// A config value is immutable while a frame is being processed; the session
/// reads it once at frame entry. Swapping the config between frames resets
/// tracking state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Minimum pixel area for a contour to be considered a candidate.
    pub min_contour_area: f64,
    /// A detected quad must cover at least this fraction of the frame area.
    pub min_frame_area_percent: f64,
    /// EMA weight on the newest observation when smoothing corners.
    pub smoothing_alpha: f32,
    /// Consecutive stable frames required before auto-capture fires.
    pub required_stable_frames: u32,
    /// Minimum wall time between two auto-captures, in milliseconds.
    pub post_capture_cooldown_ms: u64,
    /// Maximum per-corner displacement (pixels) still counted as stable.
    pub min_polygon_distance: f32,
    /// Whether captures fire automatically once the document is steady.
    pub auto_capture: bool,
    /// Detection strategy selector (reserved).
    pub detection_mode: DetectionMode,
    /// How many consecutive detection dropouts to ride out before tracking
    /// state is discarded.
    pub dropout_tolerance_frames: u32,
    /// Overlay stroke colour (RGBA), consumed only by the overlay helper.
    pub stroke_color: [u8; 4],
    /// Overlay fill opacity in [0, 1], consumed only by the overlay helper.
    pub fill_alpha: f32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_contour_area: 3000.0,
            min_frame_area_percent: 0.12,
            smoothing_alpha: 0.15,
            required_stable_frames: 20,
            post_capture_cooldown_ms: 2500,
            min_polygon_distance: 50.0,
            auto_capture: true,
            detection_mode: DetectionMode::Document,
            dropout_tolerance_frames: 1,
            stroke_color: [76, 175, 80, 255],
            fill_alpha: 0.25,
        }
    }
}

impl DetectionConfig {
    /// Clamped fill opacity, safe to hand to the renderer.
    pub fn fill_alpha_clamped(&self) -> f32 {
        self.fill_alpha.clamp(0.0, 1.0)
    }

    /// Clamped EMA weight.
    pub fn smoothing_alpha_clamped(&self) -> f32 {
        self.smoothing_alpha.clamp(0.0, 1.0)
    }
}
