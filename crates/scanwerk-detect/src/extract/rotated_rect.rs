// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Strategy B — minimum-area rotated rectangle around the largest contour.
//
// Recovers documents whose border curls or is partially occluded: the
// contour then fails the exact four-corner simplification, but a tight
// rotated rectangle around it is still a faithful outline.

use imageproc::geometry::min_area_rect;
use scanwerk_core::config::DetectionConfig;
use scanwerk_core::types::{Point, Quad};
use tracing::debug;

use super::OuterContour;
use crate::validate;

/// Fit a minimum-area rotated rectangle to the largest contour and validate
/// its four corners.
pub(crate) fn from_largest_contour(
    contours: &[OuterContour],
    frame_width: u32,
    frame_height: u32,
    config: &DetectionConfig,
) -> Option<Quad> {
    let largest = contours.first()?;
    if largest.area <= config.min_contour_area || largest.points.len() < 3 {
        return None;
    }

    let rect = min_area_rect(&largest.points);
    let candidate: Vec<Point> = rect
        .iter()
        .map(|p| Point::new(f64::from(p.x), f64::from(p.y)))
        .collect();
    match validate::validate(&candidate, frame_width, frame_height, config) {
        Ok(quad) => Some(quad),
        Err(reason) => {
            debug!(%reason, "rotated rectangle rejected");
            None
        }
    }
}
