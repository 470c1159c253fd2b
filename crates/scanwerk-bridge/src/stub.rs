// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where native mobile APIs are unavailable.

use scanwerk_core::error::{Result, ScanwerkError};

use crate::traits::*;

/// No-op bridge returned on non-mobile platforms.
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

impl NativeCameraStream for StubBridge {
    fn start_preview(&self) -> Result<()> {
        tracing::warn!("NativeCameraStream::start_preview called on stub bridge");
        Err(ScanwerkError::PlatformUnavailable)
    }

    fn stop_preview(&self) -> Result<()> {
        Err(ScanwerkError::PlatformUnavailable)
    }
}

impl NativeFrameDecoder for StubBridge {
    fn decode_preview_frame(&self, _data: &[u8], _format: PreviewFormat) -> Result<DecodedFrame> {
        tracing::warn!("NativeFrameDecoder::decode_preview_frame called on stub bridge");
        Err(ScanwerkError::PlatformUnavailable)
    }
}

impl NativeGallerySink for StubBridge {
    fn save_capture(&self, _encoded: &[u8], _mime_type: &str) -> Result<String> {
        tracing::warn!("NativeGallerySink::save_capture called on stub bridge");
        Err(ScanwerkError::PlatformUnavailable)
    }
}

impl NativeShare for StubBridge {
    fn share_file(&self, _path: &str, _mime_type: &str) -> Result<()> {
        tracing::warn!("NativeShare::share_file called on stub bridge");
        Err(ScanwerkError::PlatformUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_refuses_every_capability() {
        let bridge = StubBridge;
        assert!(bridge.start_preview().is_err());
        assert!(bridge
            .decode_preview_frame(&[], PreviewFormat::Nv21)
            .is_err());
        assert!(bridge.save_capture(&[], "image/png").is_err());
        assert!(bridge.share_file("/tmp/scan.png", "image/png").is_err());
        assert_eq!(bridge.platform_name(), "Desktop (stub)");
    }
}
