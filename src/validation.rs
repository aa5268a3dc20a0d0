//! Entry validation for write paths.
//!
//! The classifier only classifies; whether a flagged entry is rejected is a
//! caller policy. This module packages that policy for server-side handlers:
//! flagged entries become a structured error carrying the classifier's exact
//! message and suggestion list, so callers never re-derive either.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::category::{Classification, FidelityCategory};
use crate::rules::FidelityClassifier;

/// A rejected entry, one variant per flagged category.
///
/// Serializes as a structured error body with a stable `code` tag.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case", tag = "code")]
pub enum EntryViolation {
    /// Entry reads as content analysis.
    #[error("entry reads as content analysis: {message}")]
    ContentAnalysis {
        message: String,
        suggestions: Vec<String>,
    },

    /// Entry reads as reassurance seeking.
    #[error("entry reads as reassurance seeking: {message}")]
    ReassuranceSeeking {
        message: String,
        suggestions: Vec<String>,
    },
}

impl EntryViolation {
    /// Returns the violated category.
    pub fn category(&self) -> FidelityCategory {
        match self {
            EntryViolation::ContentAnalysis { .. } => FidelityCategory::Content,
            EntryViolation::ReassuranceSeeking { .. } => FidelityCategory::Reassurance,
        }
    }

    /// Returns the stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            EntryViolation::ContentAnalysis { .. } => "content_analysis",
            EntryViolation::ReassuranceSeeking { .. } => "reassurance_seeking",
        }
    }

    /// Returns the user-facing message.
    pub fn message(&self) -> &str {
        match self {
            EntryViolation::ContentAnalysis { message, .. }
            | EntryViolation::ReassuranceSeeking { message, .. } => message,
        }
    }

    /// Returns the suggested replacement entries.
    pub fn suggestions(&self) -> &[String] {
        match self {
            EntryViolation::ContentAnalysis { suggestions, .. }
            | EntryViolation::ReassuranceSeeking { suggestions, .. } => suggestions,
        }
    }
}

/// Classifies `text` and rejects it if a corrective flag is raised.
///
/// `NoSignal` and `ProcessAffirmation` pass through so the caller can still
/// surface positive feedback alongside the accepted write.
pub fn validate_entry(
    classifier: &FidelityClassifier,
    text: &str,
) -> Result<Classification, EntryViolation> {
    match classifier.classify(text) {
        Classification::ContentFlag {
            message,
            suggestions,
        } => {
            info!(code = "content_analysis", "Entry rejected");
            Err(EntryViolation::ContentAnalysis {
                message,
                suggestions,
            })
        }
        Classification::ReassuranceFlag {
            message,
            suggestions,
        } => {
            info!(code = "reassurance_seeking", "Entry rejected");
            Err(EntryViolation::ReassuranceSeeking {
                message,
                suggestions,
            })
        }
        accepted => {
            debug!(len = text.len(), "Entry accepted");
            Ok(accepted)
        }
    }
}
