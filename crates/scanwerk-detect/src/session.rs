// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanner session — owns tracking state and runs the per-frame pipeline.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, TryLockError};
use std::time::Instant;

use scanwerk_core::config::DetectionConfig;
use scanwerk_core::error::{Result, ScanwerkError};
use scanwerk_core::types::{DetectedDocument, FrameView, Quad};
use tracing::{debug, instrument};

use crate::extract;
use crate::preprocess;
use crate::tracker::{CaptureReason, QuadTracker, TrackerPhase};

/// Everything the tracker concluded about one frame.
#[derive(Debug, Clone)]
pub struct FrameAnalysis {
    /// The smoothed outline after this frame, if one is tracked.
    pub document: Option<DetectedDocument>,
    /// Capture decision for this frame. The caller rectifies and delivers
    /// the crop; see [`crate::crop_document`].
    pub capture: Option<CaptureReason>,
}

/// One scanner session: configuration, tracking state, and a monotonic
/// frame clock.
///
/// Frame processing is synchronous and strictly serialized — each call runs
/// the whole pipeline to completion on the calling thread before the next
/// frame is admitted. The session itself holds no frame queue. The manual
/// shutter flag and the configuration may be touched from other threads;
/// both are read exactly once at frame entry, so a frame never observes a
/// half-applied change.
pub struct ScanSession {
    config: Mutex<Arc<DetectionConfig>>,
    manual_trigger: AtomicBool,
    tracker: Mutex<QuadTracker>,
    epoch: Instant,
}

impl ScanSession {
    pub fn new(config: DetectionConfig) -> Self {
        Self {
            config: Mutex::new(Arc::new(config)),
            manual_trigger: AtomicBool::new(false),
            tracker: Mutex::new(QuadTracker::new()),
            epoch: Instant::now(),
        }
    }

    /// Snapshot of the active configuration.
    pub fn config(&self) -> Arc<DetectionConfig> {
        self.config.lock().expect("config lock poisoned").clone()
    }

    /// Swap the configuration. Takes effect at the next frame; tracking
    /// state is discarded because thresholds may have changed under it.
    pub fn update_config(&self, config: DetectionConfig) {
        *self.config.lock().expect("config lock poisoned") = Arc::new(config);
        self.tracker.lock().expect("tracker lock poisoned").reset();
        debug!("configuration swapped, tracking state reset");
    }

    /// Request a capture on the next frame that has a document outline,
    /// regardless of stability or cooldown. Safe to call from any thread.
    pub fn trigger_manual_capture(&self) {
        self.manual_trigger.store(true, Ordering::SeqCst);
    }

    /// Coarse tracking phase for UI hinting.
    pub fn phase(&self) -> TrackerPhase {
        let config = self.config();
        self.tracker
            .lock()
            .expect("tracker lock poisoned")
            .phase(&config)
    }

    /// Milliseconds since the session started. The timestamps stamped onto
    /// detections use this clock unless the host supplies its own.
    pub fn session_time_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    /// Run the detection pipeline on one frame and return the current
    /// smoothed outline, if any. Fires no callbacks — streaming hosts use
    /// [`crate::FrameAnalyzer`].
    pub fn process_frame(&self, frame: &FrameView<'_>) -> Result<Option<DetectedDocument>> {
        self.process_frame_at(frame, self.session_time_ms())
    }

    /// Like [`Self::process_frame`], spelled out for hosts that want to be
    /// explicit that the returned outline is the temporally smoothed one
    /// rather than the raw per-frame detection.
    pub fn process_frame_smooth(&self, frame: &FrameView<'_>) -> Result<Option<DetectedDocument>> {
        self.process_frame(frame)
    }

    /// [`Self::process_frame`] with a caller-supplied timestamp, for hosts
    /// whose camera stack stamps frames itself.
    pub fn process_frame_at(
        &self,
        frame: &FrameView<'_>,
        timestamp_ms: u64,
    ) -> Result<Option<DetectedDocument>> {
        self.analyze_at(frame, timestamp_ms)
            .map(|analysis| analysis.document)
    }

    /// Full per-frame analysis including the capture decision. Blocks if a
    /// frame is already in flight on another thread.
    pub fn analyze_at(&self, frame: &FrameView<'_>, timestamp_ms: u64) -> Result<FrameAnalysis> {
        let mut tracker = self.tracker.lock().expect("tracker lock poisoned");
        self.analyze_with(&mut tracker, frame, timestamp_ms)
    }

    /// Keep-only-latest entry point: returns `Ok(None)` without touching
    /// the frame when a previous frame is still being processed.
    pub fn try_analyze_at(
        &self,
        frame: &FrameView<'_>,
        timestamp_ms: u64,
    ) -> Result<Option<FrameAnalysis>> {
        match self.tracker.try_lock() {
            Ok(mut tracker) => self
                .analyze_with(&mut tracker, frame, timestamp_ms)
                .map(Some),
            Err(TryLockError::WouldBlock) => {
                debug!("frame dropped, previous frame still processing");
                Ok(None)
            }
            Err(TryLockError::Poisoned(_)) => panic!("tracker lock poisoned"),
        }
    }

    fn analyze_with(
        &self,
        tracker: &mut QuadTracker,
        frame: &FrameView<'_>,
        timestamp_ms: u64,
    ) -> Result<FrameAnalysis> {
        let config = self.config();
        let manual_requested = self.manual_trigger.load(Ordering::SeqCst);

        let observation = match run_pipeline(frame, &config) {
            Ok(quad) => quad,
            Err(err @ ScanwerkError::InvalidFrame(_)) => return Err(err),
            Err(err) => {
                // One bad frame must not break the session: treat it as a
                // detection loss and keep tracking.
                debug!(error = %err, "imaging failure treated as detection loss");
                None
            }
        };

        let update = tracker.observe(observation, timestamp_ms, manual_requested, &config);
        if update.capture == Some(CaptureReason::Manual) {
            self.manual_trigger.store(false, Ordering::SeqCst);
        }

        let document = update.smoothed.map(|quad| DetectedDocument {
            quad,
            frame_width: frame.width(),
            frame_height: frame.height(),
            confidence: 1.0,
            timestamp_ms,
        });

        Ok(FrameAnalysis {
            document,
            capture: update.capture,
        })
    }
}

/// The stateless per-frame half: preprocessing plus candidate extraction.
/// All working buffers are dropped before returning.
#[instrument(skip(frame, config), fields(width = frame.width(), height = frame.height()))]
pub(crate) fn run_pipeline(
    frame: &FrameView<'_>,
    config: &DetectionConfig,
) -> Result<Option<Quad>> {
    let gray = frame.to_luma();
    let edges = preprocess::edge_map(&gray)?;
    Ok(extract::extract_quad(
        &edges,
        frame.width(),
        frame.height(),
        config,
    ))
}
