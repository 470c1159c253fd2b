// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanwerk — Native platform bridge abstractions.
//
// Defines the trait boundary between the detection core and the host
// platform: camera preview streaming, preview-frame decoding, gallery
// persistence, and sharing. Mobile implementations live with the host
// apps (CameraX/JNI on Android, AVFoundation/objc2 on iOS); this crate
// ships the traits and a stub so the core builds and tests everywhere.

pub mod stub;
pub mod traits;

/// The bridge implementation for the current build target.
///
/// Desktop and CI builds get the stub, which refuses every capability with
/// `ScanwerkError::PlatformUnavailable`.
pub fn platform_bridge() -> Box<dyn traits::PlatformBridge> {
    Box::new(stub::StubBridge)
}
