//! Shared types for the letter classification pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Category ────────────────────────────────────────────────────────

/// Letter category. Serialized as its human-readable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "NHS Appointment")]
    NhsAppointment,
    #[serde(rename = "Electoral Register")]
    ElectoralRegister,
    #[serde(rename = "Council Tax")]
    CouncilTax,
    #[serde(rename = "HMRC")]
    Hmrc,
    #[serde(rename = "DVLA")]
    Dvla,
    #[serde(rename = "UKVI")]
    Ukvi,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl Category {
    /// Every category, in rule priority order. `Unknown` is the fallback.
    pub const ALL: [Category; 7] = [
        Self::NhsAppointment,
        Self::ElectoralRegister,
        Self::CouncilTax,
        Self::Hmrc,
        Self::Dvla,
        Self::Ukvi,
        Self::Unknown,
    ];

    /// Label shown to users and sent over the wire.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NhsAppointment => "NHS Appointment",
            Self::ElectoralRegister => "Electoral Register",
            Self::CouncilTax => "Council Tax",
            Self::Hmrc => "HMRC",
            Self::Dvla => "DVLA",
            Self::Ukvi => "UKVI",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Request / result ────────────────────────────────────────────────

/// One letter to classify: the OCR text plus an optional user hint.
///
/// `text` is required by the wire format but may be empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationRequest {
    pub text: String,
    #[serde(default)]
    pub hint: Option<String>,
}

/// Static explanation attached to a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    pub summary: String,
    pub actions: Vec<String>,
    pub citations: Vec<String>,
}

/// Everything the engine returns for one letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(rename = "type")]
    pub category: Category,
    /// Always serialized; `null` when the letter has no usable date.
    pub deadline: Option<String>,
    pub summary: String,
    pub actions: Vec<String>,
    pub citations: Vec<String>,
}
