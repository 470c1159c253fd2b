// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Geometric validation of candidate quadrilaterals.

use scanwerk_core::config::DetectionConfig;
use scanwerk_core::types::{Point, Quad};

/// Accepted aspect ratio range (width / height) for a document outline.
/// Covers everything from receipts in landscape to tall till rolls.
const MIN_ASPECT_RATIO: f64 = 0.25;
const MAX_ASPECT_RATIO: f64 = 4.0;

/// Accepted interior corner angle range in degrees. A sheet viewed at a
/// plausible angle keeps its corners near 90°; values outside this band are
/// shadows, folds, or unrelated shapes.
const MIN_CORNER_ANGLE_DEG: f64 = 50.0;
const MAX_CORNER_ANGLE_DEG: f64 = 130.0;

/// Why a candidate was rejected. Internal signal only — the extractor moves
/// on to its next strategy and the caller never sees this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RejectReason {
    WrongPointCount,
    NonFinite,
    AspectRatio,
    TooSmall,
    CornerAngle,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::WrongPointCount => "wrong point count",
            Self::NonFinite => "non-finite coordinate",
            Self::AspectRatio => "aspect ratio out of range",
            Self::TooSmall => "area below frame threshold",
            Self::CornerAngle => "corner angle out of range",
        };
        f.write_str(label)
    }
}

/// Validate a raw candidate against shape, area, and angle gates and return
/// it canonicalized and clamped into the frame.
///
/// All gates must pass:
/// 1. exactly four points, all finite;
/// 2. aspect ratio (longer-edge width over longer-edge height) within
///    [0.25, 4.0];
/// 3. shoelace area at least `min_frame_area_percent` of the frame;
/// 4. every interior corner angle within [50°, 130°].
pub(crate) fn validate(
    points: &[Point],
    frame_width: u32,
    frame_height: u32,
    config: &DetectionConfig,
) -> Result<Quad, RejectReason> {
    let corners: [Point; 4] = points
        .try_into()
        .map_err(|_| RejectReason::WrongPointCount)?;
    if corners.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(RejectReason::NonFinite);
    }

    let quad = Quad::from_unordered(corners);

    let width = quad.max_edge_width();
    let height = quad.max_edge_height();
    if height < f64::EPSILON {
        return Err(RejectReason::AspectRatio);
    }
    let aspect = width / height;
    if !(MIN_ASPECT_RATIO..=MAX_ASPECT_RATIO).contains(&aspect) {
        return Err(RejectReason::AspectRatio);
    }

    let min_area = config.min_frame_area_percent * f64::from(frame_width) * f64::from(frame_height);
    if quad.area() < min_area {
        return Err(RejectReason::TooSmall);
    }

    let angles = quad.interior_angles();
    if angles
        .iter()
        .any(|a| !(MIN_CORNER_ANGLE_DEG..=MAX_CORNER_ANGLE_DEG).contains(a))
    {
        return Err(RejectReason::CornerAngle);
    }

    Ok(quad.clamp_to(frame_width, frame_height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DetectionConfig {
        DetectionConfig::default()
    }

    fn rect_points() -> Vec<Point> {
        vec![
            Point::new(200.0, 100.0),
            Point::new(800.0, 100.0),
            Point::new(800.0, 900.0),
            Point::new(200.0, 900.0),
        ]
    }

    #[test]
    fn clean_rectangle_is_accepted_in_canonical_order() {
        let quad = validate(&rect_points(), 1000, 1000, &config()).expect("accepted");
        assert_eq!(quad.top_left(), Point::new(200.0, 100.0));
        assert_eq!(quad.bottom_right(), Point::new(800.0, 900.0));
        assert!((quad.area() - 480_000.0).abs() < 1e-9);
    }

    #[test]
    fn shuffled_input_yields_same_quad() {
        let mut pts = rect_points();
        pts.swap(0, 2);
        pts.swap(1, 3);
        let quad = validate(&pts, 1000, 1000, &config()).expect("accepted");
        assert_eq!(quad.top_left(), Point::new(200.0, 100.0));
        assert_eq!(quad.bottom_left(), Point::new(200.0, 900.0));
    }

    #[test]
    fn wrong_point_count_is_rejected() {
        let pts = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)];
        assert_eq!(
            validate(&pts, 1000, 1000, &config()).unwrap_err(),
            RejectReason::WrongPointCount
        );
    }

    #[test]
    fn elongated_sliver_fails_aspect_gate() {
        let pts = vec![
            Point::new(0.0, 450.0),
            Point::new(1000.0, 450.0),
            Point::new(1000.0, 620.0),
            Point::new(0.0, 620.0),
        ];
        // 1000 x 170 is flatter than 4:1.
        assert_eq!(
            validate(&pts, 1000, 1000, &config()).unwrap_err(),
            RejectReason::AspectRatio
        );
    }

    #[test]
    fn small_quad_fails_area_gate() {
        let pts = vec![
            Point::new(100.0, 100.0),
            Point::new(300.0, 100.0),
            Point::new(300.0, 300.0),
            Point::new(100.0, 300.0),
        ];
        // 200x200 = 4% of a 1000x1000 frame, below the 12% default.
        assert_eq!(
            validate(&pts, 1000, 1000, &config()).unwrap_err(),
            RejectReason::TooSmall
        );
    }

    #[test]
    fn skewed_quad_with_sharp_corner_fails_angle_gate() {
        // A trapezoid whose top edge rises so steeply that the top-left
        // corner closes below 50° and the top-right opens beyond 130°.
        let pts = vec![
            Point::new(100.0, 100.0),
            Point::new(900.0, 780.0),
            Point::new(900.0, 800.0),
            Point::new(100.0, 800.0),
        ];
        assert_eq!(
            validate(&pts, 1000, 1000, &config()).unwrap_err(),
            RejectReason::CornerAngle
        );
    }

    #[test]
    fn heavily_rotated_square_is_rejected() {
        // At 45° the corner roles are ambiguous; the canonicalization
        // collapses and one of the gates must throw the shape out.
        let pts = vec![
            Point::new(500.0, 100.0),
            Point::new(900.0, 500.0),
            Point::new(500.0, 900.0),
            Point::new(100.0, 500.0),
        ];
        assert!(validate(&pts, 1000, 1000, &config()).is_err());
    }

    #[test]
    fn accepted_quad_is_clamped_into_frame() {
        let pts = vec![
            Point::new(-20.0, -10.0),
            Point::new(980.0, -10.0),
            Point::new(980.0, 890.0),
            Point::new(-20.0, 890.0),
        ];
        let quad = validate(&pts, 1000, 900, &config()).expect("accepted");
        assert_eq!(quad.top_left(), Point::new(0.0, 0.0));
        assert!(quad.corners.iter().all(|p| p.x >= 0.0 && p.y >= 0.0));
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let mut pts = rect_points();
        pts[2] = Point::new(f64::NAN, 900.0);
        assert_eq!(
            validate(&pts, 1000, 1000, &config()).unwrap_err(),
            RejectReason::NonFinite
        );
    }
}
