// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Perspective rectification — warp a detected outline to an axis-aligned crop.

use image::{Rgba, RgbaImage};
use imageproc::geometric_transformations::{warp_into, Interpolation, Projection};
use scanwerk_core::error::{Result, ScanwerkError};
use scanwerk_core::types::{FrameView, Quad};
use tracing::{debug, instrument};

/// Rectify the region under `quad` into an axis-aligned image.
///
/// The output is sized from the outline itself: width is the longer of the
/// top and bottom edges, height the longer of the left and right edges,
/// both rounded and clamped to at least one pixel. Bilinear sampling.
///
/// Stateless — callable independently of any session. A degenerate outline
/// (collinear or non-finite corners) fails with
/// [`ScanwerkError::Rectification`] and leaves no side effects.
#[instrument(skip(frame, quad), fields(width = frame.width(), height = frame.height()))]
pub fn crop_document(frame: &FrameView<'_>, quad: &Quad) -> Result<RgbaImage> {
    if !quad.is_finite() {
        return Err(ScanwerkError::Rectification(
            "outline has non-finite corners".into(),
        ));
    }

    let out_width = quad.max_edge_width().round().max(1.0) as u32;
    let out_height = quad.max_edge_height().round().max(1.0) as u32;

    let src = [
        (quad.top_left().x as f32, quad.top_left().y as f32),
        (quad.top_right().x as f32, quad.top_right().y as f32),
        (quad.bottom_right().x as f32, quad.bottom_right().y as f32),
        (quad.bottom_left().x as f32, quad.bottom_left().y as f32),
    ];
    let dst = [
        (0.0, 0.0),
        (out_width as f32, 0.0),
        (out_width as f32, out_height as f32),
        (0.0, out_height as f32),
    ];

    let projection = Projection::from_control_points(src, dst).ok_or_else(|| {
        ScanwerkError::Rectification("degenerate outline, no projective transform".into())
    })?;

    let source = frame.to_rgba();
    let mut output = RgbaImage::new(out_width, out_height);
    warp_into(
        &source,
        &projection,
        Interpolation::Bilinear,
        Rgba([0u8, 0, 0, 255]),
        &mut output,
    );

    debug!(out_width, out_height, "document rectified");
    Ok(output)
}
