// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Streaming frame analyzer — runs the session per frame and publishes
// typed events to subscribers.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

use image::RgbaImage;
use scanwerk_core::config::DetectionConfig;
use scanwerk_core::error::Result;
use scanwerk_core::types::{DetectedDocument, FrameView};
use tracing::{debug, warn};

use crate::rectify;
use crate::session::ScanSession;
use crate::tracker::CaptureReason;

/// Events published by the analyzer.
///
/// For every analyzed frame a [`ScanEvent::DocumentDetected`] is emitted
/// first; when that frame also fired a capture, a
/// [`ScanEvent::DocumentCaptured`] follows immediately after. Events are
/// delivered synchronously on the processing thread.
#[derive(Debug, Clone)]
pub enum ScanEvent {
    /// A frame was analyzed. `document` is `None` while no document is
    /// tracked; `preview` is the frame as an RGBA bitmap for overlay
    /// rendering.
    DocumentDetected {
        document: Option<DetectedDocument>,
        preview: Arc<RgbaImage>,
    },
    /// A capture fired and rectification succeeded.
    DocumentCaptured {
        image: Arc<RgbaImage>,
        reason: CaptureReason,
    },
}

/// What happened to a frame handed to [`FrameAnalyzer::analyze`].
#[derive(Debug, Clone)]
pub enum AnalyzerOutcome {
    /// The frame was processed; the current outline (if any) is attached.
    Processed(Option<DetectedDocument>),
    /// A previous frame was still in flight — keep-only-latest policy, the
    /// frame was discarded unprocessed.
    FrameDropped,
}

/// Thin streaming adapter over a [`ScanSession`].
///
/// The analyzer owns no detection logic: it runs the session, rectifies on
/// capture, and fans events out to subscribers. Frame producers call
/// [`Self::analyze`] from their delivery thread; if frames arrive faster
/// than they are processed, the excess frames are dropped, never queued.
pub struct FrameAnalyzer {
    session: ScanSession,
    listeners: Mutex<Vec<Sender<ScanEvent>>>,
}

impl FrameAnalyzer {
    pub fn new(config: DetectionConfig) -> Self {
        Self {
            session: ScanSession::new(config),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// The underlying session, for direct (non-streaming) calls.
    pub fn session(&self) -> &ScanSession {
        &self.session
    }

    /// Subscribe to scan events. Each subscriber gets every event; a
    /// subscriber whose receiver is dropped is pruned on the next emit.
    pub fn subscribe(&self) -> Receiver<ScanEvent> {
        let (tx, rx) = channel();
        self.listeners
            .lock()
            .expect("listener lock poisoned")
            .push(tx);
        rx
    }

    /// Request a capture on the next frame with a document outline.
    pub fn trigger_manual_capture(&self) {
        self.session.trigger_manual_capture();
    }

    /// Swap the detection configuration atomically between frames.
    pub fn update_config(&self, config: DetectionConfig) {
        self.session.update_config(config);
    }

    /// Analyze one frame with the session clock.
    pub fn analyze(&self, frame: &FrameView<'_>) -> Result<AnalyzerOutcome> {
        self.analyze_at(frame, self.session.session_time_ms())
    }

    /// Analyze one frame with a caller-supplied timestamp.
    ///
    /// Emits `DocumentDetected` for every processed frame, then
    /// `DocumentCaptured` when a capture fired and rectification succeeded.
    /// A failed rectification only suppresses the capture event — detection
    /// reporting and tracking state are unaffected.
    pub fn analyze_at(&self, frame: &FrameView<'_>, timestamp_ms: u64) -> Result<AnalyzerOutcome> {
        let Some(analysis) = self.session.try_analyze_at(frame, timestamp_ms)? else {
            debug!("frame dropped by keep-only-latest policy");
            return Ok(AnalyzerOutcome::FrameDropped);
        };

        let preview = Arc::new(frame.to_rgba());
        self.emit(ScanEvent::DocumentDetected {
            document: analysis.document.clone(),
            preview,
        });

        if let Some(reason) = analysis.capture {
            if let Some(document) = &analysis.document {
                match rectify::crop_document(frame, &document.quad) {
                    Ok(image) => self.emit(ScanEvent::DocumentCaptured {
                        image: Arc::new(image),
                        reason,
                    }),
                    Err(err) => {
                        warn!(error = %err, "capture discarded, rectification failed");
                    }
                }
            }
        }

        Ok(AnalyzerOutcome::Processed(analysis.document))
    }

    fn emit(&self, event: ScanEvent) {
        self.listeners
            .lock()
            .expect("listener lock poisoned")
            .retain(|tx| tx.send(event.clone()).is_ok());
    }
}
