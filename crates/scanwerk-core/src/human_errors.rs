// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for scanner hosts.
//
// Every technical error is mapped to plain English with a clear suggestion.
// The severity levels drive UI presentation (toast vs. inline hint vs. hard
// failure screen).

use crate::error::ScanwerkError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// One bad frame — the next frame will likely be fine.
    Transient,
    /// The user must do something (better light, hold the phone steadier).
    ActionRequired,
    /// Cannot be fixed by retrying — wrong platform, broken integration.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether the scanner should simply keep going.
    pub retriable: bool,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

/// Convert a `ScanwerkError` into a `HumanError` a non-technical user can act on.
pub fn humanize_error(err: &ScanwerkError) -> HumanError {
    match err {
        ScanwerkError::InvalidFrame(_) => HumanError {
            message: "The camera sent a picture we couldn't read.".into(),
            suggestion: "This usually clears up on its own. If it keeps happening, close and reopen the scanner.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        ScanwerkError::Rectification(_) => HumanError {
            message: "We couldn't straighten that capture.".into(),
            suggestion: "Hold the phone more squarely above the document and try capturing again.".into(),
            retriable: true,
            severity: Severity::ActionRequired,
        },

        ScanwerkError::Imaging(_) => HumanError {
            message: "Document detection stumbled on one frame.".into(),
            suggestion: "Keep the document in view — scanning continues automatically.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        ScanwerkError::Bridge(detail) => HumanError {
            message: "The camera connection had a problem.".into(),
            suggestion: format!("Try closing and reopening the scanner. ({detail})"),
            retriable: true,
            severity: Severity::Transient,
        },

        ScanwerkError::PlatformUnavailable => HumanError {
            message: "Scanning isn't available on this device.".into(),
            suggestion: "This feature needs a device with a camera.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_errors_are_retriable() {
        let human = humanize_error(&ScanwerkError::InvalidFrame("bad stride".into()));
        assert!(human.retriable);
        assert_eq!(human.severity, Severity::Transient);
        assert!(!human.message.is_empty());
    }

    #[test]
    fn platform_unavailable_is_permanent() {
        let human = humanize_error(&ScanwerkError::PlatformUnavailable);
        assert!(!human.retriable);
        assert_eq!(human.severity, Severity::Permanent);
    }

    #[test]
    fn bridge_detail_is_preserved_in_suggestion() {
        let human = humanize_error(&ScanwerkError::Bridge("preview session lost".into()));
        assert!(human.suggestion.contains("preview session lost"));
    }
}
