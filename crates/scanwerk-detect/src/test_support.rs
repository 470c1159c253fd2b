// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared fixtures for the detection tests.

use image::{GrayImage, Luma};
use scanwerk_core::config::DetectionConfig;

/// A synthetic camera frame: dark background with a bright axis-aligned
/// rectangle from (x0, y0) to (x1, y1) exclusive. An empty rectangle gives
/// a blank frame.
pub(crate) fn document_frame(w: u32, h: u32, x0: u32, y0: u32, x1: u32, y1: u32) -> GrayImage {
    let mut img = GrayImage::from_pixel(w, h, Luma([25u8]));
    for y in y0..y1 {
        for x in x0..x1 {
            img.put_pixel(x, y, Luma([235u8]));
        }
    }
    img
}

/// Default config with a short stability run so end-to-end tests finish in
/// a handful of frames.
pub(crate) fn fast_config() -> DetectionConfig {
    DetectionConfig {
        required_stable_frames: 5,
        ..DetectionConfig::default()
    }
}
