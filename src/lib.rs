//! Recenter Fidelity - process-focus classification for free-text entries.
//!
//! Recenter's exercise logs ask for *process* notes (what was practiced, for
//! how long), not the *content* of a worry. This crate inspects a free-text
//! entry and classifies it as content analysis, reassurance seeking, or
//! acceptable process-focused language, supplying corrective suggestions for
//! the flagged cases. It handles:
//!
//! - Rule-based classification with a fixed, documented precedence
//! - Configurable keyword tables (bundled defaults, JSON overrides)
//! - A validation adapter for server-side write rejection
//! - A caller-owned debounce wrapper for live text fields (feature
//!   `debounce`, on by default)
//!
//! # Example
//!
//! ```
//! use recenter_fidelity::{Classification, FidelityClassifier};
//!
//! let classifier = FidelityClassifier::with_defaults();
//!
//! let result = classifier.classify("I noticed the thought and postponed it for 20 minutes");
//! assert!(matches!(result, Classification::ProcessAffirmation { .. }));
//!
//! let result = classifier.classify("What if this is dangerous and it all goes wrong?");
//! assert!(result.is_flag());
//! assert_eq!(result.suggestions().len(), 4);
//! ```

mod category;
mod config;
#[cfg(feature = "debounce")]
mod debounce;
mod rules;
mod validation;

pub use category::{Classification, FidelityCategory};
pub use config::{AffirmationRule, ConfigError, FidelityConfig, FlagRule, NarrativeRule};
#[cfg(feature = "debounce")]
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use rules::FidelityClassifier;
pub use validation::{validate_entry, EntryViolation};
