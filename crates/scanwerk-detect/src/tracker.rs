// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Temporal smoothing, stability detection, and the capture decision.

use scanwerk_core::config::DetectionConfig;
use scanwerk_core::types::Quad;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Why a capture fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureReason {
    /// The document was held steady long enough.
    Auto,
    /// The user pressed the shutter.
    Manual,
}

/// Coarse tracking state, exposed for UI hinting ("looking for a
/// document…" vs "hold still…").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackerPhase {
    /// No document is being tracked.
    Seeking,
    /// A document is tracked but not yet steady for long enough.
    Tracking,
    /// Enough consecutive stable frames — capture fires as soon as the
    /// cooldown allows.
    Armed,
}

/// Outcome of feeding one frame's observation to the tracker.
#[derive(Debug, Clone, Copy)]
pub struct TrackerUpdate {
    /// The smoothed outline after this frame, if any is being tracked.
    pub smoothed: Option<Quad>,
    /// A capture decision for this frame.
    pub capture: Option<CaptureReason>,
}

/// Per-session tracking state.
///
/// Holds the previous smoothed outline, the run length of stable frames,
/// and the capture clock. Lives for the lifetime of one scanner session and
/// is reset on configuration swaps and after sustained detection loss.
#[derive(Debug, Default)]
pub struct QuadTracker {
    last_smoothed: Option<Quad>,
    stable_frame_count: u32,
    consecutive_dropouts: u32,
    last_capture_time_ms: Option<u64>,
}

impl QuadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's observation (or lack of one) into the tracker.
    ///
    /// Smoothing: the new outline is blended into the previous smoothed one
    /// with weight `smoothing_alpha`; the first observation is taken as-is.
    ///
    /// Stability: counted only when a smoothed outline already existed
    /// before this frame, and only when every corner of the new observation
    /// is within `min_polygon_distance` of it. Any larger jump resets the
    /// run to zero.
    ///
    /// Detection loss zeroes the stable run immediately but keeps the
    /// smoothed outline for `dropout_tolerance_frames` frames so a single
    /// missed frame does not restart tracking from scratch.
    ///
    /// Captures: a manual request fires whenever an outline is available,
    /// ignoring stability and cooldown. Auto-capture fires when the stable
    /// run reaches `required_stable_frames` and the cooldown has elapsed.
    /// Either kind restarts the stable run and stamps the capture clock.
    pub fn observe(
        &mut self,
        observation: Option<Quad>,
        now_ms: u64,
        manual_requested: bool,
        config: &DetectionConfig,
    ) -> TrackerUpdate {
        match observation {
            Some(new) => {
                self.consecutive_dropouts = 0;
                match self.last_smoothed {
                    Some(prev) => {
                        let displacement = new.max_corner_distance(&prev);
                        if displacement <= f64::from(config.min_polygon_distance) {
                            self.stable_frame_count += 1;
                        } else {
                            debug!(displacement, "document moved, stability reset");
                            self.stable_frame_count = 0;
                        }
                        self.last_smoothed =
                            Some(prev.blend(&new, config.smoothing_alpha_clamped()));
                    }
                    None => {
                        self.last_smoothed = Some(new);
                        self.stable_frame_count = 0;
                    }
                }
            }
            None => {
                self.stable_frame_count = 0;
                self.consecutive_dropouts += 1;
                if self.consecutive_dropouts > config.dropout_tolerance_frames
                    && self.last_smoothed.take().is_some()
                {
                    debug!("detection lost, tracking state cleared");
                }
            }
        }

        let capture = self.decide_capture(now_ms, manual_requested, config);
        if let Some(reason) = capture {
            info!(?reason, now_ms, "capture fired");
            self.last_capture_time_ms = Some(now_ms);
            self.stable_frame_count = 0;
        }

        TrackerUpdate {
            smoothed: self.last_smoothed,
            capture,
        }
    }

    fn decide_capture(
        &self,
        now_ms: u64,
        manual_requested: bool,
        config: &DetectionConfig,
    ) -> Option<CaptureReason> {
        // Nothing to crop without an outline; a pending manual request is
        // left for the next frame that has one.
        self.last_smoothed.as_ref()?;

        if manual_requested {
            return Some(CaptureReason::Manual);
        }
        if config.auto_capture
            && self.stable_frame_count >= config.required_stable_frames
            && self.cooldown_elapsed(now_ms, config)
        {
            return Some(CaptureReason::Auto);
        }
        None
    }

    fn cooldown_elapsed(&self, now_ms: u64, config: &DetectionConfig) -> bool {
        match self.last_capture_time_ms {
            None => true,
            Some(t) => now_ms.saturating_sub(t) >= config.post_capture_cooldown_ms,
        }
    }

    /// Drop all state, as on a configuration swap.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The current smoothed outline, if one is tracked.
    pub fn last_smoothed(&self) -> Option<Quad> {
        self.last_smoothed
    }

    /// Length of the current stable-frame run.
    pub fn stable_frame_count(&self) -> u32 {
        self.stable_frame_count
    }

    /// Session-clock time of the last capture, or 0 if none fired yet.
    pub fn last_capture_time_ms(&self) -> u64 {
        self.last_capture_time_ms.unwrap_or(0)
    }

    /// Coarse phase for UI hinting.
    pub fn phase(&self, config: &DetectionConfig) -> TrackerPhase {
        if self.last_smoothed.is_none() {
            TrackerPhase::Seeking
        } else if self.stable_frame_count >= config.required_stable_frames {
            TrackerPhase::Armed
        } else {
            TrackerPhase::Tracking
        }
    }
}
