//! Ordered rule evaluators for fidelity classification.
//!
//! ## Evaluation order
//!
//! Rules run first-match-wins in a fixed order that is part of the contract,
//! not an implementation detail, since the phrase sets may overlap:
//!
//! 1. Minimum-length gate (short input is never analyzed)
//! 2. Content-analysis keywords
//! 3. Reassurance-seeking keywords
//! 4. Narrative-length heuristic
//! 5. Process-affirmation keywords
//!
//! A text matching both a content and a reassurance phrase always flags as
//! content; a keyword match always wins over the narrative-length heuristic.
//!
//! Matching is substring containment over a single lowercased copy of the
//! input: no word boundaries, no stemming. A phrase embedded inside a longer
//! word still counts. This trades some false positives for zero
//! natural-language-processing dependencies.

use crate::category::Classification;
use crate::config::FidelityConfig;

/// A single rule in the evaluation chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    LengthGate,
    ContentKeywords,
    ReassuranceKeywords,
    NarrativeLength,
    ProcessKeywords,
}

impl Rule {
    /// The fixed evaluation order. First match wins.
    const ORDER: [Rule; 5] = [
        Rule::LengthGate,
        Rule::ContentKeywords,
        Rule::ReassuranceKeywords,
        Rule::NarrativeLength,
        Rule::ProcessKeywords,
    ];
}

/// Classifies free-text entries as content-focused, reassurance-seeking, or
/// process-focused.
///
/// A pure function over its input and configuration: no I/O, no mutable
/// state, deterministic, never panics on any string input. Safe to share
/// across threads and call concurrently.
pub struct FidelityClassifier {
    config: FidelityConfig,
}

impl FidelityClassifier {
    /// Creates a classifier from a configuration.
    ///
    /// Phrase tables are normalized once here (lowercased, blank entries
    /// dropped) so `classify` performs a single lowercase pass on the input
    /// and nothing else.
    pub fn new(mut config: FidelityConfig) -> Self {
        normalize_phrases(&mut config.content.phrases);
        normalize_phrases(&mut config.reassurance.phrases);
        normalize_phrases(&mut config.process.phrases);
        Self { config }
    }

    /// Creates a classifier with the bundled default tables.
    pub fn with_defaults() -> Self {
        Self::new(FidelityConfig::default())
    }

    /// Returns the (normalized) configuration in use.
    pub fn config(&self) -> &FidelityConfig {
        &self.config
    }

    /// Classifies the given text.
    ///
    /// Returns exactly one [`Classification`]; `NoSignal` is the normal
    /// result for unremarkable input, not a failure.
    pub fn classify(&self, text: &str) -> Classification {
        let lowered = text.to_lowercase();

        for rule in Rule::ORDER {
            if let Some(classification) = self.evaluate(rule, &lowered) {
                return classification;
            }
        }

        Classification::NoSignal
    }

    /// Evaluates one rule against the lowercased text.
    ///
    /// `Some` short-circuits the chain; `None` passes to the next rule.
    fn evaluate(&self, rule: Rule, text: &str) -> Option<Classification> {
        match rule {
            Rule::LengthGate => {
                let len = text.trim().chars().count();
                (len < self.config.min_input_len).then_some(Classification::NoSignal)
            }
            Rule::ContentKeywords => contains_any(text, &self.config.content.phrases).then(|| {
                Classification::ContentFlag {
                    message: self.config.content.message.clone(),
                    suggestions: self.config.content.suggestions.clone(),
                }
            }),
            Rule::ReassuranceKeywords => contains_any(text, &self.config.reassurance.phrases)
                .then(|| Classification::ReassuranceFlag {
                    message: self.config.reassurance.message.clone(),
                    suggestions: self.config.reassurance.suggestions.clone(),
                }),
            Rule::NarrativeLength => {
                let narrative = &self.config.narrative;
                let total_len = text.chars().count();
                let fragments = text
                    .split(['.', '!', '?'])
                    .map(str::trim)
                    .filter(|fragment| fragment.chars().count() >= narrative.min_fragment_len)
                    .count();
                (fragments >= narrative.min_sentences && total_len > narrative.min_total_len).then(
                    || Classification::ContentFlag {
                        message: narrative.message.clone(),
                        suggestions: narrative.suggestions.clone(),
                    },
                )
            }
            Rule::ProcessKeywords => contains_any(text, &self.config.process.phrases).then(|| {
                Classification::ProcessAffirmation {
                    message: self.config.process.message.clone(),
                }
            }),
        }
    }
}

impl Default for FidelityClassifier {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn contains_any(text: &str, phrases: &[String]) -> bool {
    phrases.iter().any(|phrase| text.contains(phrase.as_str()))
}

fn normalize_phrases(phrases: &mut Vec<String>) {
    for phrase in phrases.iter_mut() {
        *phrase = phrase.to_lowercase();
    }
    phrases.retain(|phrase| !phrase.trim().is_empty());
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::category::FidelityCategory;
    use crate::config::{AffirmationRule, FlagRule};

    fn classifier() -> FidelityClassifier {
        FidelityClassifier::with_defaults()
    }

    // Four sentences, ~230 chars, free of every default phrase.
    const NARRATIVE_TEXT: &str = "The morning train was delayed again and the carriage felt \
         crowded. My manager moved our meeting to the afternoon without warning. Dinner ran late \
         because the oven kept cutting out. The neighbours were loud until well after midnight.";

    // === Length gate ===

    #[test]
    fn short_input_is_no_signal() {
        assert_eq!(classifier().classify("ok"), Classification::NoSignal);
        assert_eq!(classifier().classify("done"), Classification::NoSignal);
    }

    #[test]
    fn empty_and_whitespace_are_no_signal() {
        assert_eq!(classifier().classify(""), Classification::NoSignal);
        assert_eq!(classifier().classify("   \t\n  "), Classification::NoSignal);
    }

    #[test]
    fn short_input_skips_keyword_analysis() {
        // "what if?" would flag as content if the gate did not run first.
        assert_eq!(classifier().classify("what if?"), Classification::NoSignal);
    }

    #[test]
    fn gate_admits_exactly_minimum_length() {
        // 10 trimmed chars, contains "analyze".
        let result = classifier().classify("analyze it");
        assert_eq!(result.category(), Some(FidelityCategory::Content));
    }

    // === Content keywords ===

    #[test]
    fn detects_content_what_if() {
        let result = classifier().classify("What if this is dangerous and it all goes wrong");
        assert!(matches!(result, Classification::ContentFlag { .. }));
    }

    #[test]
    fn content_flag_carries_four_suggestions() {
        let result = classifier().classify("I keep trying to figure out the worst outcome");
        assert_eq!(result.suggestions().len(), 4);
        assert!(!result.suggestions()[0].is_empty());
    }

    #[test]
    fn substring_match_has_no_word_boundary() {
        // "unlikely" contains "likely"; the documented trade-off.
        let result = classifier().classify("It is unlikely I suppose");
        assert_eq!(result.category(), Some(FidelityCategory::Content));
    }

    #[test]
    fn multiple_content_hits_return_one_flag() {
        let single = classifier().classify("what if this happens to me");
        let double = classifier().classify("what if the outcome happens to me");
        assert_eq!(single, double);
    }

    // === Reassurance keywords ===

    #[test]
    fn detects_reassurance_is_this_normal() {
        let result = classifier().classify("Is this normal for me to feel?");
        assert!(matches!(result, Classification::ReassuranceFlag { .. }));
    }

    #[test]
    fn reassurance_wording_differs_from_content() {
        let content = classifier().classify("what if this happens to me");
        let reassurance = classifier().classify("please tell me it will be fine");
        assert!(matches!(reassurance, Classification::ReassuranceFlag { .. }));
        assert_ne!(content.message(), reassurance.message());
        assert_ne!(content.suggestions(), reassurance.suggestions());
    }

    // === Precedence ===

    #[test]
    fn content_dominates_reassurance() {
        // "what if" (content) and "tell me" (reassurance) both present.
        let result = classifier().classify("What if I fail, please tell me it will be fine");
        assert!(matches!(result, Classification::ContentFlag { .. }));
    }

    #[test]
    fn keyword_path_dominates_narrative_path() {
        let text = format!("What if it goes wrong tomorrow. {NARRATIVE_TEXT}");
        let result = classifier().classify(&text);
        let keyword_message = classifier().config().content.message.clone();
        assert_eq!(result.message(), Some(keyword_message.as_str()));
    }

    #[test]
    fn narrative_path_dominates_process_keywords() {
        // Long multi-sentence prose that also mentions a process word still
        // flags as narrative content.
        let text = format!("{NARRATIVE_TEXT} I noticed all of it happening around me again.");
        let result = classifier().classify(&text);
        assert_eq!(result.category(), Some(FidelityCategory::Content));
    }

    // === Narrative length ===

    #[test]
    fn long_keyword_free_prose_flags_as_content() {
        let result = classifier().classify(NARRATIVE_TEXT);
        assert!(matches!(result, Classification::ContentFlag { .. }));
    }

    #[test]
    fn narrative_message_is_distinct_from_keyword_message() {
        let narrative = classifier().classify(NARRATIVE_TEXT);
        let keyword = classifier().classify("what if this happens to me");
        assert_ne!(narrative.message(), keyword.message());
    }

    #[test]
    fn short_fragments_do_not_count_as_sentences() {
        // Plenty of terminators but only two fragments survive the
        // 10-char minimum, so the rule does not fire.
        let text = "No. Ha! So? Eh. The afternoon walk around the park went on much longer \
             than usual today. Yes. The evening was spent tidying the kitchen and the \
             hallway cupboard again. Ok.";
        assert_eq!(classifier().classify(text), Classification::NoSignal);
    }

    #[test]
    fn short_total_length_does_not_fire_narrative() {
        // Three qualifying fragments but under 150 chars total.
        let text = "The bus was late today. The office felt empty. The evening was quiet.";
        assert_eq!(classifier().classify(text), Classification::NoSignal);
    }

    // === Process affirmation ===

    #[test]
    fn detects_process_affirmation() {
        let result = classifier().classify("I noticed the thought and postponed it for 20 minutes");
        assert!(matches!(result, Classification::ProcessAffirmation { .. }));
        assert!(result.suggestions().is_empty());
    }

    #[test]
    fn detects_process_detached_mindfulness() {
        let result = classifier().classify("practiced detached mindfulness on the commute");
        assert_eq!(result.category(), Some(FidelityCategory::Process));
    }

    // === No signal ===

    #[test]
    fn neutral_text_is_no_signal() {
        assert_eq!(
            classifier().classify("The weather is pleasant today"),
            Classification::NoSignal
        );
    }

    // === Case insensitivity ===

    #[test]
    fn case_insensitive_uppercase() {
        let upper = classifier().classify("WHAT IF THIS HAPPENS TO ME");
        let lower = classifier().classify("what if this happens to me");
        assert_eq!(upper, lower);
    }

    #[test]
    fn case_insensitive_mixed() {
        let result = classifier().classify("Is This Normal for me to feel?");
        assert!(matches!(result, Classification::ReassuranceFlag { .. }));
    }

    #[test]
    fn mixed_case_config_phrases_are_normalized() {
        let config = FidelityConfig {
            content: FlagRule {
                phrases: vec!["Rumination Spiral".to_string()],
                message: "m".to_string(),
                suggestions: vec!["s".to_string()],
            },
            ..Default::default()
        };
        let result = FidelityClassifier::new(config).classify("caught in a rumination spiral");
        assert_eq!(result.category(), Some(FidelityCategory::Content));
    }

    // === Purity ===

    #[test]
    fn classify_is_idempotent() {
        let classifier = classifier();
        let text = "I keep wondering what if it all falls apart next week";
        assert_eq!(classifier.classify(text), classifier.classify(text));
    }

    // === Degraded configuration ===

    fn empty_flag_rule() -> FlagRule {
        FlagRule {
            phrases: vec![],
            message: String::new(),
            suggestions: vec![],
        }
    }

    #[test]
    fn empty_phrase_tables_match_nothing() {
        let config = FidelityConfig {
            content: empty_flag_rule(),
            reassurance: empty_flag_rule(),
            process: AffirmationRule {
                phrases: vec![],
                message: String::new(),
            },
            ..Default::default()
        };
        let classifier = FidelityClassifier::new(config);
        assert_eq!(
            classifier.classify("I noticed the thought and postponed it for 20 minutes"),
            Classification::NoSignal
        );
        // The narrative heuristic is threshold-based and still applies.
        assert!(matches!(
            classifier.classify(NARRATIVE_TEXT),
            Classification::ContentFlag { .. }
        ));
    }

    #[test]
    fn blank_phrases_are_dropped_not_matched() {
        let config = FidelityConfig {
            content: FlagRule {
                phrases: vec![String::new(), "   ".to_string()],
                message: "m".to_string(),
                suggestions: vec![],
            },
            ..Default::default()
        };
        // An empty phrase would otherwise match every string.
        let result = FidelityClassifier::new(config).classify("The weather is pleasant today");
        assert_eq!(result, Classification::NoSignal);
    }

    // === Suggestion hygiene ===

    #[test]
    fn default_suggestions_reclassify_as_process() {
        // The UI inserts a chosen suggestion verbatim; it must not re-flag.
        let classifier = classifier();
        let config = classifier.config().clone();
        for suggestion in config
            .content
            .suggestions
            .iter()
            .chain(&config.reassurance.suggestions)
            .chain(&config.narrative.suggestions)
        {
            assert!(
                matches!(
                    classifier.classify(suggestion),
                    Classification::ProcessAffirmation { .. }
                ),
                "suggestion re-flagged: {suggestion}"
            );
        }
    }
}
