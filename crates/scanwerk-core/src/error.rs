// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Scanwerk.

use thiserror::Error;

/// Top-level error type for all Scanwerk operations.
///
/// A missing document is never an error — detection entry points return
/// `Ok(None)` for that. Errors are reserved for frames that cannot be
/// processed at all and for failures of the capture path.
#[derive(Debug, Error)]
pub enum ScanwerkError {
    // -- Frame errors --
    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    // -- Capture errors --
    #[error("rectification failed: {0}")]
    Rectification(String),

    // -- Pipeline errors --
    #[error("imaging operation failed: {0}")]
    Imaging(String),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ScanwerkError>;
