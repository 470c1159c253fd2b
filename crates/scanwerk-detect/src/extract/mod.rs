// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Candidate quadrilateral extraction from an edge map.
//
// Three strategies run in strict order; the first whose candidate passes
// geometric validation wins. Failure to find any candidate is not an error.

mod contour;
mod hough;
mod rotated_rect;

use image::GrayImage;
use imageproc::contours::{find_contours, BorderType, Contour};
use scanwerk_core::config::DetectionConfig;
use scanwerk_core::types::Quad;
use tracing::debug;

/// A traced external contour with its precomputed area.
pub(crate) struct OuterContour {
    pub(crate) points: Vec<imageproc::point::Point<i32>>,
    pub(crate) area: f64,
}

/// Extract the best document candidate from an edge map, or `None`.
///
/// Order of attempts: polygon approximation of external contours, then a
/// minimum-area rotated rectangle around the largest contour, then Hough
/// line intersection. Strict ordering — a later strategy only runs when
/// every earlier one failed to produce an accepted quad.
pub(crate) fn extract_quad(
    edges: &GrayImage,
    frame_width: u32,
    frame_height: u32,
    config: &DetectionConfig,
) -> Option<Quad> {
    let outer = external_contours(edges);

    if let Some(quad) = contour::from_polygon_approximation(&outer, frame_width, frame_height, config)
    {
        debug!(strategy = "contour", "candidate accepted");
        return Some(quad);
    }

    if let Some(quad) = rotated_rect::from_largest_contour(&outer, frame_width, frame_height, config)
    {
        debug!(strategy = "rotated_rect", "candidate accepted");
        return Some(quad);
    }

    if let Some(quad) = hough::from_line_intersections(edges, frame_width, frame_height, config) {
        debug!(strategy = "hough", "candidate accepted");
        return Some(quad);
    }

    debug!("no candidate from any strategy");
    None
}

/// Trace external contours and sort them by enclosed area, descending.
fn external_contours(edges: &GrayImage) -> Vec<OuterContour> {
    let contours: Vec<Contour<i32>> = find_contours(edges);
    let mut outer: Vec<OuterContour> = contours
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer)
        .map(|c| {
            let area = shoelace_area(&c.points);
            OuterContour {
                points: c.points,
                area,
            }
        })
        .collect();
    outer.sort_by(|a, b| b.area.total_cmp(&a.area));
    outer
}

/// Absolute shoelace area of an integer polyline treated as a closed polygon.
pub(crate) fn shoelace_area(points: &[imageproc::point::Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 0..points.len() {
        let j = (i + 1) % points.len();
        acc += f64::from(points[i].x) * f64::from(points[j].y);
        acc -= f64::from(points[j].x) * f64::from(points[i].y);
    }
    acc.abs() / 2.0
}
