// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Strategy A — polygon approximation of external contours.

use imageproc::geometry::{approximate_polygon_dp, arc_length};
use scanwerk_core::config::DetectionConfig;
use scanwerk_core::types::{Point, Quad};
use tracing::debug;

use super::OuterContour;
use crate::validate;

/// Douglas–Peucker epsilon as a fraction of the contour perimeter.
const DP_EPSILON_PERIMETER_FRACTION: f64 = 0.02;

/// Approximate each sufficiently large external contour down to a polygon;
/// the first one that simplifies to exactly four corners and survives
/// validation is the document.
///
/// Contours arrive sorted by area descending, so the largest plausible
/// shape wins ties.
pub(crate) fn from_polygon_approximation(
    contours: &[OuterContour],
    frame_width: u32,
    frame_height: u32,
    config: &DetectionConfig,
) -> Option<Quad> {
    for contour in contours {
        if contour.area < config.min_contour_area {
            // Sorted descending — everything after this is smaller still.
            break;
        }

        let perimeter = arc_length(&contour.points, true);
        let epsilon = perimeter * DP_EPSILON_PERIMETER_FRACTION;
        let approx = approximate_polygon_dp(&contour.points, epsilon, true);
        if approx.len() != 4 {
            debug!(
                vertices = approx.len(),
                area = contour.area,
                "contour did not simplify to a quadrilateral"
            );
            continue;
        }

        let candidate: Vec<Point> = approx
            .iter()
            .map(|p| Point::new(f64::from(p.x), f64::from(p.y)))
            .collect();
        match validate::validate(&candidate, frame_width, frame_height, config) {
            Ok(quad) => return Some(quad),
            Err(reason) => {
                debug!(%reason, area = contour.area, "contour candidate rejected");
            }
        }
    }
    None
}
