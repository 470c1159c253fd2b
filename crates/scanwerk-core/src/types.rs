// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Scanwerk document scanner.

use image::{GrayImage, Luma, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanwerkError};

/// A 2-D coordinate in frame pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// A document outline: four corners in canonical order.
///
/// The canonical order is top-left, top-right, bottom-right, bottom-left —
/// clockwise starting from the top-left in image coordinates (y grows
/// downward). Every quad handed out by the detection pipeline is in this
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    /// Corners as `[top-left, top-right, bottom-right, bottom-left]`.
    pub corners: [Point; 4],
}

impl Quad {
    /// Wrap four corners that are already in canonical order.
    pub fn new(corners: [Point; 4]) -> Self {
        Self { corners }
    }

    /// Order four arbitrary corners canonically.
    ///
    /// Top-left is the corner with the smallest coordinate sum, bottom-right
    /// the largest; top-right has the largest `x − y`, bottom-left the
    /// smallest. Robust for rotations up to ±45°; beyond that the corner
    /// roles become ambiguous and downstream angle checks reject the shape.
    pub fn from_unordered(points: [Point; 4]) -> Self {
        let mut by_sum = points;
        by_sum.sort_by(|a, b| (a.x + a.y).total_cmp(&(b.x + b.y)));
        let top_left = by_sum[0];
        let bottom_right = by_sum[3];

        let mut by_diff = points;
        by_diff.sort_by(|a, b| (a.x - a.y).total_cmp(&(b.x - b.y)));
        let bottom_left = by_diff[0];
        let top_right = by_diff[3];

        Self {
            corners: [top_left, top_right, bottom_right, bottom_left],
        }
    }

    pub fn top_left(&self) -> Point {
        self.corners[0]
    }

    pub fn top_right(&self) -> Point {
        self.corners[1]
    }

    pub fn bottom_right(&self) -> Point {
        self.corners[2]
    }

    pub fn bottom_left(&self) -> Point {
        self.corners[3]
    }

    /// Absolute area by the shoelace formula.
    pub fn area(&self) -> f64 {
        let c = &self.corners;
        let mut acc = 0.0;
        for i in 0..4 {
            let j = (i + 1) % 4;
            acc += c[i].x * c[j].y;
            acc -= c[j].x * c[i].y;
        }
        acc.abs() / 2.0
    }

    /// Width of the quad: the longer of the top and bottom edges.
    pub fn max_edge_width(&self) -> f64 {
        let top = self.top_left().distance(&self.top_right());
        let bottom = self.bottom_left().distance(&self.bottom_right());
        top.max(bottom)
    }

    /// Height of the quad: the longer of the left and right edges.
    pub fn max_edge_height(&self) -> f64 {
        let right = self.top_right().distance(&self.bottom_right());
        let left = self.top_left().distance(&self.bottom_left());
        right.max(left)
    }

    /// Largest per-corner distance to another quad's corresponding corner.
    pub fn max_corner_distance(&self, other: &Quad) -> f64 {
        self.corners
            .iter()
            .zip(other.corners.iter())
            .map(|(a, b)| a.distance(b))
            .fold(0.0, f64::max)
    }

    /// Per-corner exponential blend toward a new observation.
    ///
    /// `alpha` is the weight on `toward`; `alpha = 1` returns `toward`
    /// unchanged, `alpha = 0` returns `self`.
    pub fn blend(&self, toward: &Quad, alpha: f32) -> Quad {
        let a = f64::from(alpha.clamp(0.0, 1.0));
        let mut corners = [Point::default(); 4];
        for (i, c) in corners.iter_mut().enumerate() {
            c.x = a * toward.corners[i].x + (1.0 - a) * self.corners[i].x;
            c.y = a * toward.corners[i].y + (1.0 - a) * self.corners[i].y;
        }
        Quad { corners }
    }

    /// Clamp every corner into `[0, width] × [0, height]`.
    pub fn clamp_to(&self, width: u32, height: u32) -> Quad {
        let (w, h) = (f64::from(width), f64::from(height));
        let mut corners = self.corners;
        for c in &mut corners {
            c.x = c.x.clamp(0.0, w);
            c.y = c.y.clamp(0.0, h);
        }
        Quad { corners }
    }

    /// Interior angle at each corner, in degrees, in canonical corner order.
    ///
    /// Degenerate corners (a zero-length adjacent edge) report 0°.
    pub fn interior_angles(&self) -> [f64; 4] {
        let c = &self.corners;
        let mut angles = [0.0; 4];
        for i in 0..4 {
            let prev = c[(i + 3) % 4];
            let next = c[(i + 1) % 4];
            let cur = c[i];
            let v1 = (prev.x - cur.x, prev.y - cur.y);
            let v2 = (next.x - cur.x, next.y - cur.y);
            let n1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
            let n2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();
            if n1 < f64::EPSILON || n2 < f64::EPSILON {
                continue;
            }
            let cos = ((v1.0 * v2.0 + v1.1 * v2.1) / (n1 * n2)).clamp(-1.0, 1.0);
            angles[i] = cos.acos().to_degrees();
        }
        angles
    }

    /// Whether every coordinate is a finite number.
    pub fn is_finite(&self) -> bool {
        self.corners
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite())
    }
}

/// A document located in a frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedDocument {
    /// Smoothed outline in canonical corner order.
    pub quad: Quad,
    /// Width of the frame the quad was detected in.
    pub frame_width: u32,
    /// Height of the frame the quad was detected in.
    pub frame_height: u32,
    /// Detection confidence in [0, 1]. Always 1.0 today; reserved for
    /// future classifiers so downstream consumers need not change.
    pub confidence: f32,
    /// Timestamp of the frame, in milliseconds of the session clock.
    pub timestamp_ms: u64,
}

/// Channel layout of a frame's pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelLayout {
    /// One byte per pixel, luminance.
    Gray8,
    /// Three bytes per pixel: R, G, B.
    Rgb8,
    /// Four bytes per pixel: R, G, B, A.
    Rgba8,
}

impl PixelLayout {
    /// Bytes per pixel.
    pub fn channels(self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }
}

/// Borrowed view of one camera frame as a dense pixel matrix.
///
/// This is the neutral boundary type between the host's camera stack and the
/// detection core: width, height, row stride in bytes, channel layout, and a
/// borrowed pixel slice. The core never sees platform frame types; host
/// adapters (see `scanwerk-bridge`) produce buffers in one of these layouts.
///
/// A view is immutable for the duration of frame processing.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    stride_bytes: usize,
    layout: PixelLayout,
}

impl<'a> FrameView<'a> {
    /// Build a view over a pixel buffer with an explicit row stride.
    ///
    /// Fails with [`ScanwerkError::InvalidFrame`] on zero dimensions, a
    /// stride shorter than a row, or a buffer too small for the declared
    /// geometry.
    pub fn new(
        data: &'a [u8],
        width: u32,
        height: u32,
        stride_bytes: usize,
        layout: PixelLayout,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ScanwerkError::InvalidFrame(format!(
                "zero dimension: {width}x{height}"
            )));
        }
        let row_bytes = width as usize * layout.channels();
        if stride_bytes < row_bytes {
            return Err(ScanwerkError::InvalidFrame(format!(
                "stride {stride_bytes} shorter than row of {row_bytes} bytes"
            )));
        }
        let needed = (height as usize - 1) * stride_bytes + row_bytes;
        if data.len() < needed {
            return Err(ScanwerkError::InvalidFrame(format!(
                "buffer of {} bytes too small, need {needed}",
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
            stride_bytes,
            layout,
        })
    }

    /// Build a view over a tightly packed buffer (stride = width × channels).
    pub fn packed(data: &'a [u8], width: u32, height: u32, layout: PixelLayout) -> Result<Self> {
        Self::new(data, width, height, width as usize * layout.channels(), layout)
    }

    /// View an `image` grayscale buffer without copying.
    pub fn from_gray(img: &'a GrayImage) -> Self {
        Self {
            data: img.as_raw(),
            width: img.width(),
            height: img.height(),
            stride_bytes: img.width() as usize,
            layout: PixelLayout::Gray8,
        }
    }

    /// View an `image` RGBA buffer without copying.
    pub fn from_rgba(img: &'a RgbaImage) -> Self {
        Self {
            data: img.as_raw(),
            width: img.width(),
            height: img.height(),
            stride_bytes: img.width() as usize * 4,
            layout: PixelLayout::Rgba8,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub fn stride_bytes(&self) -> usize {
        self.stride_bytes
    }

    fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride_bytes;
        let row_bytes = self.width as usize * self.layout.channels();
        &self.data[start..start + row_bytes]
    }

    /// Copy the frame into an owned grayscale working buffer.
    ///
    /// Colour frames are converted with BT.601 luma weights.
    pub fn to_luma(&self) -> GrayImage {
        let mut out = GrayImage::new(self.width, self.height);
        for y in 0..self.height {
            let row = self.row(y);
            match self.layout {
                PixelLayout::Gray8 => {
                    for (x, v) in row.iter().enumerate() {
                        out.put_pixel(x as u32, y, Luma([*v]));
                    }
                }
                PixelLayout::Rgb8 | PixelLayout::Rgba8 => {
                    let step = self.layout.channels();
                    for x in 0..self.width as usize {
                        let px = &row[x * step..x * step + 3];
                        let luma = (77 * u32::from(px[0])
                            + 150 * u32::from(px[1])
                            + 29 * u32::from(px[2]))
                            >> 8;
                        out.put_pixel(x as u32, y, Luma([luma as u8]));
                    }
                }
            }
        }
        out
    }

    /// Copy the frame into an owned RGBA working buffer.
    pub fn to_rgba(&self) -> RgbaImage {
        let mut out = RgbaImage::new(self.width, self.height);
        for y in 0..self.height {
            let row = self.row(y);
            for x in 0..self.width as usize {
                let px = match self.layout {
                    PixelLayout::Gray8 => {
                        let v = row[x];
                        Rgba([v, v, v, 255])
                    }
                    PixelLayout::Rgb8 => {
                        let p = &row[x * 3..x * 3 + 3];
                        Rgba([p[0], p[1], p[2], 255])
                    }
                    PixelLayout::Rgba8 => {
                        let p = &row[x * 4..x * 4 + 4];
                        Rgba([p[0], p[1], p[2], p[3]])
                    }
                };
                out.put_pixel(x as u32, y, px);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis_quad() -> [Point; 4] {
        [
            Point::new(200.0, 100.0),
            Point::new(800.0, 100.0),
            Point::new(800.0, 900.0),
            Point::new(200.0, 900.0),
        ]
    }

    #[test]
    fn from_unordered_recovers_canonical_order() {
        let [tl, tr, br, bl] = axis_quad();
        // Feed the corners in a scrambled order.
        let quad = Quad::from_unordered([br, tl, bl, tr]);
        assert_eq!(quad.top_left(), tl);
        assert_eq!(quad.top_right(), tr);
        assert_eq!(quad.bottom_right(), br);
        assert_eq!(quad.bottom_left(), bl);
    }

    #[test]
    fn canonical_order_is_clockwise_in_image_coordinates() {
        let quad = Quad::from_unordered(axis_quad());
        let tl = quad.top_left();
        let tr = quad.top_right();
        let bl = quad.bottom_left();
        // (TR − TL) × (BL − TL) must point into the screen (positive z with
        // y growing downward).
        let cross = (tr.x - tl.x) * (bl.y - tl.y) - (tr.y - tl.y) * (bl.x - tl.x);
        assert!(cross > 0.0, "expected clockwise order, cross = {cross}");
        assert!(tl.x + tl.y <= tr.x + tr.y);
        assert!(tr.x + tr.y <= quad.bottom_right().x + quad.bottom_right().y);
    }

    #[test]
    fn canonicalization_preserves_shoelace_area() {
        let [tl, tr, br, bl] = axis_quad();
        let raw = Quad::new([bl, tr, tl, br]);
        let canonical = Quad::from_unordered([bl, tr, tl, br]);
        assert!((canonical.area() - raw.area()).abs() < 1e-9);
        assert!((canonical.area() - 600.0 * 800.0).abs() < 1e-9);
    }

    #[test]
    fn canonicalization_survives_moderate_rotation() {
        // A square rotated by 30° around its centre.
        let cx = 500.0;
        let cy = 500.0;
        let half = 200.0;
        let angle = 30.0_f64.to_radians();
        let rotate = |x: f64, y: f64| {
            Point::new(
                cx + (x - cx) * angle.cos() - (y - cy) * angle.sin(),
                cy + (x - cx) * angle.sin() + (y - cy) * angle.cos(),
            )
        };
        let tl = rotate(cx - half, cy - half);
        let tr = rotate(cx + half, cy - half);
        let br = rotate(cx + half, cy + half);
        let bl = rotate(cx - half, cy + half);
        let quad = Quad::from_unordered([br, bl, tr, tl]);
        assert!(quad.top_left().distance(&tl) < 1e-9);
        assert!(quad.bottom_right().distance(&br) < 1e-9);
    }

    #[test]
    fn interior_angles_of_rectangle_are_right() {
        let quad = Quad::from_unordered(axis_quad());
        for angle in quad.interior_angles() {
            assert!((angle - 90.0).abs() < 1e-6, "angle was {angle}");
        }
    }

    #[test]
    fn blend_moves_corners_toward_observation() {
        let a = Quad::from_unordered(axis_quad());
        let mut shifted = axis_quad();
        for p in &mut shifted {
            p.x += 100.0;
        }
        let b = Quad::from_unordered(shifted);
        let mid = a.blend(&b, 0.5);
        assert!((mid.top_left().x - 250.0).abs() < 1e-9);
        assert!((mid.top_left().y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn clamp_to_bounds_corners() {
        let quad = Quad::new([
            Point::new(-10.0, -5.0),
            Point::new(1100.0, 0.0),
            Point::new(1100.0, 1100.0),
            Point::new(-10.0, 1100.0),
        ]);
        let clamped = quad.clamp_to(1000, 1000);
        assert_eq!(clamped.top_left(), Point::new(0.0, 0.0));
        assert_eq!(clamped.bottom_right(), Point::new(1000.0, 1000.0));
    }

    #[test]
    fn frame_view_rejects_zero_dimensions() {
        let buf = [0u8; 16];
        assert!(FrameView::new(&buf, 0, 4, 4, PixelLayout::Gray8).is_err());
        assert!(FrameView::new(&buf, 4, 0, 4, PixelLayout::Gray8).is_err());
    }

    #[test]
    fn frame_view_rejects_short_buffer() {
        let buf = [0u8; 10];
        assert!(FrameView::packed(&buf, 4, 4, PixelLayout::Gray8).is_err());
    }

    #[test]
    fn frame_view_rejects_undersized_stride() {
        let buf = [0u8; 64];
        assert!(FrameView::new(&buf, 8, 4, 4, PixelLayout::Gray8).is_err());
    }

    #[test]
    fn strided_gray_view_reads_correct_pixels() {
        // 2x2 image with a 4-byte stride: row payload then 2 bytes padding.
        let buf = [10u8, 20, 99, 99, 30, 40, 99, 99];
        let view = FrameView::new(&buf, 2, 2, 4, PixelLayout::Gray8).expect("valid view");
        let gray = view.to_luma();
        assert_eq!(gray.get_pixel(0, 0).0[0], 10);
        assert_eq!(gray.get_pixel(1, 0).0[0], 20);
        assert_eq!(gray.get_pixel(0, 1).0[0], 30);
        assert_eq!(gray.get_pixel(1, 1).0[0], 40);
    }

    #[test]
    fn rgba_luma_conversion_uses_bt601_weights() {
        let mut img = RgbaImage::new(1, 1);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        let view = FrameView::from_rgba(&img);
        let gray = view.to_luma();
        // 77/256 of full red.
        assert_eq!(gray.get_pixel(0, 0).0[0], 76);
    }

    #[test]
    fn gray_to_rgba_replicates_luminance() {
        let mut img = GrayImage::new(1, 1);
        img.put_pixel(0, 0, Luma([42]));
        let view = FrameView::from_gray(&img);
        let rgba = view.to_rgba();
        assert_eq!(rgba.get_pixel(0, 0).0, [42, 42, 42, 255]);
    }
}
