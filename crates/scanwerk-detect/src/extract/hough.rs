// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Strategy C — Hough line intersection.
//
// Last resort when no contour yields a clean quadrilateral: find the
// dominant straight edges, split them into horizontal and vertical
// families, take the outermost line of each family, and intersect.

use image::GrayImage;
use imageproc::hough::{detect_lines, LineDetectionOptions, PolarLine};
use scanwerk_core::config::DetectionConfig;
use scanwerk_core::types::{Point, Quad};
use tracing::debug;

use crate::validate;

/// Vote threshold as a fraction of the image diagonal, so detection scales
/// with resolution.
const VOTE_DIAGONAL_FRACTION: f64 = 0.25;

/// Floor for the vote threshold on small frames.
const MIN_VOTE_THRESHOLD: f64 = 80.0;

/// Suppression radius merging near-duplicate lines in (r, θ) space.
const SUPPRESSION_RADIUS: u32 = 8;

/// Intersect the outermost horizontal and vertical Hough lines into a
/// document candidate.
pub(crate) fn from_line_intersections(
    edges: &GrayImage,
    frame_width: u32,
    frame_height: u32,
    config: &DetectionConfig,
) -> Option<Quad> {
    let w = f64::from(frame_width);
    let h = f64::from(frame_height);

    let diagonal = (w * w + h * h).sqrt();
    let vote_threshold = (diagonal * VOTE_DIAGONAL_FRACTION).max(MIN_VOTE_THRESHOLD) as u32;
    let lines = detect_lines(
        edges,
        LineDetectionOptions {
            vote_threshold,
            suppression_radius: SUPPRESSION_RADIUS,
        },
    );
    debug!(line_count = lines.len(), vote_threshold, "hough lines detected");
    if lines.len() < 4 {
        return None;
    }

    let (horizontal, vertical) = classify_lines(&lines);
    if horizontal.len() < 2 || vertical.len() < 2 {
        debug!(
            horizontal = horizontal.len(),
            vertical = vertical.len(),
            "insufficient line families"
        );
        return None;
    }

    // Outermost line of each family, by the line's mean coordinate across
    // the frame — which for a straight line is its value at the frame
    // midline.
    let top = extreme_line(&horizontal, |l| y_at(l, w / 2.0), false)?;
    let bottom = extreme_line(&horizontal, |l| y_at(l, w / 2.0), true)?;
    let left = extreme_line(&vertical, |l| x_at(l, h / 2.0), false)?;
    let right = extreme_line(&vertical, |l| x_at(l, h / 2.0), true)?;

    let corners = [
        intersect_polar_lines(&top, &left)?,
        intersect_polar_lines(&top, &right)?,
        intersect_polar_lines(&bottom, &right)?,
        intersect_polar_lines(&bottom, &left)?,
    ];

    // Intersections of near-parallel edges can fly far outside the image;
    // more than one frame dimension away means the line families were junk.
    for p in &corners {
        if p.x < -w || p.x > 2.0 * w || p.y < -h || p.y > 2.0 * h {
            debug!(x = p.x, y = p.y, "intersection too far outside the frame");
            return None;
        }
    }

    match validate::validate(&corners, frame_width, frame_height, config) {
        Ok(quad) => Some(quad),
        Err(reason) => {
            debug!(%reason, "hough candidate rejected");
            None
        }
    }
}

/// Split lines into roughly horizontal and roughly vertical families.
///
/// `angle_in_degrees` is the angle of the line's normal in [0, 180): a
/// horizontal line has a vertical normal, so directions within 45° of
/// horizontal map to normals in [45°, 135°]. Every line lands in exactly
/// one family.
fn classify_lines(lines: &[PolarLine]) -> (Vec<PolarLine>, Vec<PolarLine>) {
    let mut horizontal = Vec::new();
    let mut vertical = Vec::new();
    for line in lines {
        if (45..=135).contains(&line.angle_in_degrees) {
            horizontal.push(*line);
        } else {
            vertical.push(*line);
        }
    }
    (horizontal, vertical)
}

/// The y coordinate of a (non-vertical) polar line at the given x.
fn y_at(line: &PolarLine, x: f64) -> f64 {
    let theta = f64::from(line.angle_in_degrees).to_radians();
    (f64::from(line.r) - x * theta.cos()) / theta.sin()
}

/// The x coordinate of a (non-horizontal) polar line at the given y.
fn x_at(line: &PolarLine, y: f64) -> f64 {
    let theta = f64::from(line.angle_in_degrees).to_radians();
    (f64::from(line.r) - y * theta.sin()) / theta.cos()
}

/// Line with the smallest (or largest) value of `key` over its family.
fn extreme_line<F>(lines: &[PolarLine], key: F, largest: bool) -> Option<PolarLine>
where
    F: Fn(&PolarLine) -> f64,
{
    let ordering = |a: &&PolarLine, b: &&PolarLine| key(a).total_cmp(&key(b));
    let found = if largest {
        lines.iter().max_by(ordering)
    } else {
        lines.iter().min_by(ordering)
    };
    found.copied()
}

/// Intersection of two lines in polar (Hough) form.
///
/// A `PolarLine` `(r, θ)` is the line `x·cos θ + y·sin θ = r`. Returns
/// `None` for (nearly) parallel lines.
fn intersect_polar_lines(a: &PolarLine, b: &PolarLine) -> Option<Point> {
    let theta_a = f64::from(a.angle_in_degrees).to_radians();
    let theta_b = f64::from(b.angle_in_degrees).to_radians();

    let (sin_a, cos_a) = theta_a.sin_cos();
    let (sin_b, cos_b) = theta_b.sin_cos();

    let denom = cos_a * sin_b - sin_a * cos_b;
    if denom.abs() < 1e-6 {
        return None;
    }

    let r_a = f64::from(a.r);
    let r_b = f64::from(b.r);
    let x = (r_a * sin_b - r_b * sin_a) / denom;
    let y = (r_b * cos_a - r_a * cos_b) / denom;
    Some(Point::new(x, y))
}
