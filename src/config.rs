//! Keyword configuration for the fidelity classifier.
//!
//! The phrase tables are static, versionable configuration: bundled defaults
//! compiled into the crate, overridable by loading a JSON asset at startup.
//! Configuration is an explicit value passed to the classifier, never hidden
//! global state, so tests and future localizations can swap tables freely.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Errors that can occur while loading configuration.
///
/// Thin phrase tables are not errors: an empty list simply matches nothing.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the config JSON.
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

// --- Default phrase tables ---

const CONTENT_PHRASES: &[&str] = &[
    "what if",
    "probably",
    "might happen",
    "could be",
    "realistic",
    "likely",
    "chance of",
    "possibility",
    "scenario",
    "outcome",
    "analyze",
    "think through",
    "figure out",
    "solve",
    "plan for",
];

const REASSURANCE_PHRASES: &[&str] = &[
    "is this normal",
    "should i worry",
    "am i being",
    "is it okay",
    "what do you think",
    "does this mean",
    "is this bad",
    "help me understand",
    "reassure",
    "tell me",
    "confirm",
    "validate",
];

const PROCESS_PHRASES: &[&str] = &[
    "noticed",
    "observed",
    "postponed",
    "refocused",
    "minutes",
    "times",
    "practiced",
    "detached mindfulness",
    "attention",
    "urge rating",
];

const CONTENT_MESSAGE: &str = "This note looks like it analyzes the worry itself. \
     The program works on how you relate to thoughts, not on what the thoughts are about.";

// Suggestion wording is chosen so that a suggestion inserted verbatim into the
// field re-classifies as a process affirmation, not another flag.
const CONTENT_SUGGESTIONS: &[&str] = &[
    "I noticed the worry and postponed it to my worry period",
    "I practiced detached mindfulness when the thought showed up",
    "I completed an attention training session for 12 minutes",
    "I refocused on what I was doing without engaging the thought",
];

const REASSURANCE_MESSAGE: &str = "This reads like asking for reassurance. \
     Seeking certainty keeps the worry process running; record what you practiced instead.";

const REASSURANCE_SUGGESTIONS: &[&str] = &[
    "I let the uncertainty be there and refocused my attention",
    "I noticed the urge to check and rated it 7/10",
    "I postponed the question to my worry period",
    "I moved my attention back to the task in front of me",
];

const NARRATIVE_MESSAGE: &str = "Long descriptions usually carry the content of a worry. \
     A brief note about what you practiced is enough.";

const NARRATIVE_SUGGESTIONS: &[&str] = &[
    "I noticed the story starting and stepped back from it",
    "I postponed the worry and got on with my day",
    "I practiced watching the thought without following it",
    "I refocused my attention each time the story pulled at me",
];

const PROCESS_MESSAGE: &str = "That's a process-focused note. You logged what you practiced \
     rather than what the worry was about. Keep going.";

/// Minimum input length in characters below which no analysis runs.
const DEFAULT_MIN_INPUT_LEN: usize = 10;

/// Narrative heuristic: total text length that must be exceeded.
const DEFAULT_NARRATIVE_MIN_TOTAL_LEN: usize = 150;

/// Narrative heuristic: sentence-like fragments required.
const DEFAULT_NARRATIVE_MIN_SENTENCES: usize = 3;

/// Narrative heuristic: trimmed fragments shorter than this are discarded.
const DEFAULT_NARRATIVE_MIN_FRAGMENT_LEN: usize = 10;

/// A keyword-triggered flag rule: phrases to match, and the fixed message
/// plus suggestion list returned on any match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagRule {
    /// Lowercase phrase literals tested by substring containment.
    #[serde(default)]
    pub phrases: Vec<String>,
    /// Explanatory message shown to the user.
    #[serde(default)]
    pub message: String,
    /// Ordered alternative process-focused prompts.
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// The narrative-length heuristic: catches prose that evades the keyword
/// lists by sheer length and sentence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeRule {
    /// Total character count the text must exceed.
    #[serde(default = "default_narrative_min_total_len")]
    pub min_total_len: usize,
    /// Minimum number of surviving sentence-like fragments.
    #[serde(default = "default_narrative_min_sentences")]
    pub min_sentences: usize,
    /// Trimmed fragments shorter than this are discarded before counting.
    #[serde(default = "default_narrative_min_fragment_len")]
    pub min_fragment_len: usize,
    /// Message for the narrative path, distinct from the keyword path.
    #[serde(default)]
    pub message: String,
    /// Suggestion list for the narrative path.
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// A positive keyword rule: affirmation only, no suggestions by contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffirmationRule {
    /// Lowercase phrase literals tested by substring containment.
    #[serde(default)]
    pub phrases: Vec<String>,
    /// Encouraging message shown to the user.
    #[serde(default)]
    pub message: String,
}

/// Full configuration for the fidelity classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FidelityConfig {
    /// Inputs with fewer trimmed characters than this are not analyzed.
    #[serde(default = "default_min_input_len")]
    pub min_input_len: usize,
    /// Content-analysis detection.
    #[serde(default = "default_content_rule")]
    pub content: FlagRule,
    /// Reassurance-seeking detection.
    #[serde(default = "default_reassurance_rule")]
    pub reassurance: FlagRule,
    /// Narrative-length heuristic.
    #[serde(default = "default_narrative_rule")]
    pub narrative: NarrativeRule,
    /// Process-affirmation detection.
    #[serde(default = "default_process_rule")]
    pub process: AffirmationRule,
}

fn default_min_input_len() -> usize {
    DEFAULT_MIN_INPUT_LEN
}

fn default_narrative_min_total_len() -> usize {
    DEFAULT_NARRATIVE_MIN_TOTAL_LEN
}

fn default_narrative_min_sentences() -> usize {
    DEFAULT_NARRATIVE_MIN_SENTENCES
}

fn default_narrative_min_fragment_len() -> usize {
    DEFAULT_NARRATIVE_MIN_FRAGMENT_LEN
}

fn to_strings(table: &[&str]) -> Vec<String> {
    table.iter().map(|s| s.to_string()).collect()
}

fn default_content_rule() -> FlagRule {
    FlagRule {
        phrases: to_strings(CONTENT_PHRASES),
        message: CONTENT_MESSAGE.to_string(),
        suggestions: to_strings(CONTENT_SUGGESTIONS),
    }
}

fn default_reassurance_rule() -> FlagRule {
    FlagRule {
        phrases: to_strings(REASSURANCE_PHRASES),
        message: REASSURANCE_MESSAGE.to_string(),
        suggestions: to_strings(REASSURANCE_SUGGESTIONS),
    }
}

fn default_narrative_rule() -> NarrativeRule {
    NarrativeRule {
        min_total_len: DEFAULT_NARRATIVE_MIN_TOTAL_LEN,
        min_sentences: DEFAULT_NARRATIVE_MIN_SENTENCES,
        min_fragment_len: DEFAULT_NARRATIVE_MIN_FRAGMENT_LEN,
        message: NARRATIVE_MESSAGE.to_string(),
        suggestions: to_strings(NARRATIVE_SUGGESTIONS),
    }
}

fn default_process_rule() -> AffirmationRule {
    AffirmationRule {
        phrases: to_strings(PROCESS_PHRASES),
        message: PROCESS_MESSAGE.to_string(),
    }
}

impl Default for FidelityConfig {
    fn default() -> Self {
        Self {
            min_input_len: DEFAULT_MIN_INPUT_LEN,
            content: default_content_rule(),
            reassurance: default_reassurance_rule(),
            narrative: default_narrative_rule(),
            process: default_process_rule(),
        }
    }
}

impl FidelityConfig {
    /// Parses a configuration from a JSON string.
    ///
    /// Missing fields fall back to the bundled defaults, so a config asset
    /// only needs to carry what it overrides.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        info!("Loaded fidelity config from {:?}", path);
        Ok(config)
    }
}
