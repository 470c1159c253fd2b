// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Overlay rendering — translucent fill plus stroke for the detected outline.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut, Blend};
use imageproc::point::Point as IPoint;
use scanwerk_core::config::DetectionConfig;
use scanwerk_core::types::Quad;

/// Render the detected outline onto a copy of `image`.
///
/// Pure presentation: a translucent fill (`fill_alpha`) under an opaque
/// stroke (`stroke_color`), both taken from the config's rendering hints.
/// No detection semantics; hosts that render their own overlay ignore this.
pub fn draw_polygon_overlay(image: &RgbaImage, quad: &Quad, config: &DetectionConfig) -> RgbaImage {
    let [r, g, b, _] = config.stroke_color;
    let stroke = Rgba([r, g, b, 255]);
    let fill_alpha = (config.fill_alpha_clamped() * 255.0).round() as u8;
    let fill = Rgba([r, g, b, fill_alpha]);

    let mut canvas = Blend(image.clone());

    let poly: Vec<IPoint<i32>> = quad
        .corners
        .iter()
        .map(|p| IPoint::new(p.x.round() as i32, p.y.round() as i32))
        .collect();

    // The polygon fill needs an open ring of distinct vertices; a collapsed
    // outline is stroked only.
    let distinct = poly.windows(2).all(|w| w[0] != w[1]) && poly[0] != poly[3];
    if distinct && fill_alpha > 0 {
        draw_polygon_mut(&mut canvas, &poly, fill);
    }

    for i in 0..4 {
        let a = quad.corners[i];
        let b2 = quad.corners[(i + 1) % 4];
        draw_line_segment_mut(
            &mut canvas,
            (a.x as f32, a.y as f32),
            (b2.x as f32, b2.y as f32),
            stroke,
        );
    }

    canvas.0
}
