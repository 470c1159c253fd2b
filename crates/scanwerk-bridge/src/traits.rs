// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native capabilities.
//
// The detection core never touches camera-library types; these traits are
// the boundary where platform frames become dense pixel matrices and where
// finished captures leave the Rust side.

use scanwerk_core::error::Result;
use scanwerk_core::types::PixelLayout;

/// Unified bridge that groups all native capabilities.
pub trait PlatformBridge:
    NativeCameraStream + NativeFrameDecoder + NativeGallerySink + NativeShare
{
    /// Human-readable platform name (e.g. "iOS 17", "Android 14").
    fn platform_name(&self) -> &str;
}

/// Drive the device camera preview stream.
///
/// The platform delivers frames on its own thread and is expected to apply
/// a keep-only-latest policy: a frame arriving while the previous one is
/// still being analyzed is discarded at the source, never queued.
pub trait NativeCameraStream {
    /// Start the preview stream. Frame delivery is platform-specific
    /// (CameraX analyzer on Android, AVCaptureVideoDataOutput on iOS).
    fn start_preview(&self) -> Result<()>;

    /// Stop the preview stream. Pending frames are discarded.
    fn stop_preview(&self) -> Result<()>;
}

/// Raw preview frame formats the platforms hand us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewFormat {
    /// Android camera NV21 (Y plane + interleaved VU).
    Nv21,
    /// Android YUV_420_888 with separate planes.
    Yuv420Planar,
    /// iOS kCVPixelFormatType_32BGRA.
    Bgra8888,
    /// A JPEG-compressed still (some legacy camera paths).
    Jpeg,
}

/// An owned dense pixel matrix produced from a platform frame.
///
/// Matches the geometry contract of `scanwerk_core::types::FrameView`:
/// `data` holds `height` rows of `stride_bytes` bytes each, in `layout`.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub stride_bytes: usize,
    pub layout: PixelLayout,
}

/// Convert platform preview frames into dense pixel matrices.
///
/// Colour-space conversion (YUV → RGB and friends) is platform work —
/// implementations typically lean on hardware-accelerated converters.
pub trait NativeFrameDecoder {
    /// Decode one preview frame into a dense matrix the detection core can
    /// view.
    fn decode_preview_frame(&self, data: &[u8], format: PreviewFormat) -> Result<DecodedFrame>;
}

/// Persist finished captures to the platform photo library.
pub trait NativeGallerySink {
    /// Save an encoded image (PNG or JPEG bytes) to the user's gallery.
    /// Returns a platform-specific identifier or path for the saved asset.
    fn save_capture(&self, encoded: &[u8], mime_type: &str) -> Result<String>;
}

/// Share content via the OS share sheet.
pub trait NativeShare {
    /// Share a saved file with other apps via the native share sheet.
    fn share_file(&self, path: &str, mime_type: &str) -> Result<()>;
}
