// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Frame preprocessing — denoise, blur, edge extraction, edge bridging.

use image::GrayImage;
use imageproc::distance_transform::Norm;
use imageproc::edges::canny;
use imageproc::filter::{bilateral_filter, gaussian_blur_f32};
use imageproc::morphology::dilate;
use scanwerk_core::error::{Result, ScanwerkError};
use tracing::debug;

/// Bilateral filter window diameter.
const BILATERAL_WINDOW: u32 = 9;

/// Bilateral filter range and spatial sigma. One value serves both: paper
/// edges survive well above it while sensor noise sits well below.
const BILATERAL_SIGMA: f32 = 75.0;

/// Gaussian sigma matching a 5x5 kernel (0.3 * ((5 - 1) * 0.5 - 1) + 0.8).
const GAUSSIAN_SIGMA: f32 = 1.1;

/// Canny hysteresis thresholds. Deliberately low so soft edges on
/// low-contrast paper still register.
const CANNY_LOW: f32 = 30.0;
const CANNY_HIGH: f32 = 100.0;

/// Dilation radius bridging fragmented edges — an L2 ball of radius 2 is
/// the 5x5 elliptical structuring element.
const DILATE_RADIUS: u8 = 2;

/// Produce a binary edge map of the same dimensions as the input.
///
/// Pipeline, in fixed order: bilateral filter (denoise while keeping edges),
/// Gaussian blur (smooth gradients), Canny, dilation (close gaps so the
/// document border forms an unbroken contour). All intermediate buffers are
/// dropped on return.
pub(crate) fn edge_map(gray: &GrayImage) -> Result<GrayImage> {
    if gray.width() < BILATERAL_WINDOW || gray.height() < BILATERAL_WINDOW {
        return Err(ScanwerkError::Imaging(format!(
            "frame {}x{} smaller than the {BILATERAL_WINDOW}px filter window",
            gray.width(),
            gray.height()
        )));
    }

    let denoised = bilateral_filter(gray, BILATERAL_WINDOW, BILATERAL_SIGMA, BILATERAL_SIGMA);
    let blurred = gaussian_blur_f32(&denoised, GAUSSIAN_SIGMA);
    let edges = canny(&blurred, CANNY_LOW, CANNY_HIGH);
    let bridged = dilate(&edges, Norm::L2, DILATE_RADIUS);

    debug!(
        width = bridged.width(),
        height = bridged.height(),
        "edge map computed"
    );
    Ok(bridged)
}
