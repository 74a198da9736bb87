//! Common types used by the flow and its hosts.
//!
//! # Categories
//!
//! - **Selection Types** - The chosen image
//! - **Result Types** - The endpoint's classification
//! - **Notice Types** - User-facing toast messages

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::DEFECT_STATUS;

// =============================================================================
// Selection Types
// =============================================================================

/// The image currently chosen by the operator.
///
/// `B` is the payload: a browser `File` handle in the frontend, the raw
/// bytes in the CLI.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedFile<B> {
    /// Display name (original filename)
    pub name: String,
    /// Declared media type, e.g. `image/png`
    pub media_type: String,
    /// Size in bytes
    pub size: u64,
    /// Binary content
    pub content: B,
}

impl<B> SelectedFile<B> {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, size: u64, content: B) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size,
            content,
        }
    }
}

impl SelectedFile<Vec<u8>> {
    /// Build a selection from in-memory bytes.
    pub fn from_bytes(name: impl Into<String>, media_type: impl Into<String>, content: Vec<u8>) -> Self {
        let size = content.len() as u64;
        Self::new(name, media_type, size, content)
    }
}

// =============================================================================
// Result Types
// =============================================================================

/// Classification returned by the inference endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// `"defect detected"` or any other status string
    pub status: String,
    /// Endpoint certainty in [0, 1]
    pub confidence: f64,
}

impl AnalysisResult {
    pub fn verdict(&self) -> Verdict {
        if self.status == DEFECT_STATUS {
            Verdict::Defect
        } else {
            Verdict::NoDefect
        }
    }

    /// Confidence as a percentage with one decimal, e.g. `"87.0%"`.
    ///
    /// Halves round up, so `0.5625` reads `"56.3%"`.
    pub fn confidence_percent(&self) -> String {
        let tenths = (self.confidence * 1000.0).round() / 10.0;
        format!("{:.1}%", tenths)
    }

    /// Width of the confidence bar, in percent.
    pub fn bar_width_percent(&self) -> f64 {
        let width = self.confidence * 100.0;
        if width.is_nan() {
            0.0
        } else {
            width.clamp(0.0, 100.0)
        }
    }
}

/// Which branch of the result card to render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Defect,
    NoDefect,
}

impl Verdict {
    pub fn title(&self) -> &'static str {
        match self {
            Verdict::Defect => "Defective Pipe Detected",
            Verdict::NoDefect => "No Defect Detected",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Verdict::Defect => {
                "The AI model has detected potential defects in the pipe. Further inspection is recommended."
            }
            Verdict::NoDefect => {
                "The pipe appears to be in good condition with no significant defects detected."
            }
        }
    }

    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            Verdict::Defect => "verdict-defect",
            Verdict::NoDefect => "verdict-ok",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Verdict::Defect => "⚠️",
            Verdict::NoDefect => "✅",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

// =============================================================================
// Notice Types
// =============================================================================

/// Severity of a notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeSeverity {
    Normal,
    Destructive,
}

/// A transient, toast-style message for the operator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: NoticeSeverity,
}

impl Notice {
    pub fn normal(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into(), severity: NoticeSeverity::Normal }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into(), severity: NoticeSeverity::Destructive }
    }

    pub fn is_destructive(&self) -> bool {
        self.severity == NoticeSeverity::Destructive
    }
}
