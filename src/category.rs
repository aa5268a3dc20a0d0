//! Fidelity categories and classification results.

use serde::{Deserialize, Serialize};

/// Categories that free-text entries can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FidelityCategory {
    /// Text analyzing or elaborating the content of a worry.
    Content,
    /// Text soliciting validation or certainty about a feared outcome.
    Reassurance,
    /// Text describing measurable practice behavior.
    Process,
}

impl FidelityCategory {
    /// Returns all available categories.
    pub fn all() -> &'static [FidelityCategory] {
        &[
            FidelityCategory::Content,
            FidelityCategory::Reassurance,
            FidelityCategory::Process,
        ]
    }

    /// Returns a human-readable name for this category.
    pub fn name(&self) -> &'static str {
        match self {
            FidelityCategory::Content => "Content Analysis",
            FidelityCategory::Reassurance => "Reassurance Seeking",
            FidelityCategory::Process => "Process Focus",
        }
    }

    /// Returns a description of what this category indicates.
    pub fn description(&self) -> &'static str {
        match self {
            FidelityCategory::Content => {
                "Entry works through the substance of a worry instead of how it was handled"
            }
            FidelityCategory::Reassurance => {
                "Entry asks for validation or certainty about a feared outcome"
            }
            FidelityCategory::Process => {
                "Entry records practice behavior such as duration, counts, or technique"
            }
        }
    }
}

/// Result of classifying a free-text entry.
///
/// Exactly one variant is produced per call. Flag variants carry a fixed
/// explanatory message and a fixed, ordered suggestion list; the lists are
/// static per category and never derived from which phrase matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Classification {
    /// No rule matched: input too short, or no keyword or pattern present.
    NoSignal,
    /// Entry reads as content analysis.
    ContentFlag {
        message: String,
        suggestions: Vec<String>,
    },
    /// Entry reads as reassurance seeking.
    ReassuranceFlag {
        message: String,
        suggestions: Vec<String>,
    },
    /// Entry is process-focused; positive feedback only, no suggestions.
    ProcessAffirmation { message: String },
}

impl Classification {
    /// Returns the category this result falls under, if any.
    pub fn category(&self) -> Option<FidelityCategory> {
        match self {
            Classification::NoSignal => None,
            Classification::ContentFlag { .. } => Some(FidelityCategory::Content),
            Classification::ReassuranceFlag { .. } => Some(FidelityCategory::Reassurance),
            Classification::ProcessAffirmation { .. } => Some(FidelityCategory::Process),
        }
    }

    /// Returns the user-facing message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Classification::NoSignal => None,
            Classification::ContentFlag { message, .. }
            | Classification::ReassuranceFlag { message, .. }
            | Classification::ProcessAffirmation { message } => Some(message),
        }
    }

    /// Returns the suggestion list; empty for non-flag results.
    pub fn suggestions(&self) -> &[String] {
        match self {
            Classification::ContentFlag { suggestions, .. }
            | Classification::ReassuranceFlag { suggestions, .. } => suggestions,
            _ => &[],
        }
    }

    /// Returns true for the corrective flag variants.
    pub fn is_flag(&self) -> bool {
        matches!(
            self,
            Classification::ContentFlag { .. } | Classification::ReassuranceFlag { .. }
        )
    }

    /// Returns true if no rule matched.
    pub fn is_no_signal(&self) -> bool {
        matches!(self, Classification::NoSignal)
    }
}
