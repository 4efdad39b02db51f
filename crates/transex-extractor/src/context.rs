//! Finds transition occurrences and the sentences around them

use crate::config::ExtractorConfig;
use crate::types::{MatchOccurrence, Triplet};
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

/// Sentence-final punctuation run followed by whitespace
static SENTENCE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+\s+").unwrap());

/// First complete sentence: one terminal mark, then whitespace or end of text
static FIRST_SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^.!?]+[.!?])(?:\s|$)").unwrap());

const TERMINAL_PUNCTUATION: &[char] = &['.', '!', '?'];

/// Extracts sentence triplets around transition occurrences
pub struct ContextExtractor<'a> {
    config: &'a ExtractorConfig,
}

impl<'a> ContextExtractor<'a> {
    /// Create a new context extractor
    pub fn new(config: &'a ExtractorConfig) -> Self {
        Self { config }
    }

    /// Extract the triplets of one transition inside one article body.
    ///
    /// Triplets come back in document order, without exact duplicates.
    pub fn extract(&self, body: &str, phrase: &str, variants: &[String]) -> Vec<Triplet> {
        let occurrences = self.find_occurrences(body, phrase, variants);

        let mut seen = HashSet::new();
        let mut triplets = Vec::new();
        let mut too_short = 0;

        for occurrence in &occurrences {
            let paragraph_a = self.sentence_before(&body[..occurrence.start]);
            let paragraph_b = self.sentence_after(&body[occurrence.end..]);

            if paragraph_a.chars().count() < self.config.min_context_chars
                || paragraph_b.chars().count() < self.config.min_context_chars
            {
                too_short += 1;
                continue;
            }

            let triplet = Triplet {
                paragraph_a,
                transition: phrase.to_string(),
                paragraph_b,
            };
            if seen.insert(triplet.clone()) {
                triplets.push(triplet);
            }
        }

        if self.config.is_traced(phrase) {
            info!(
                phrase,
                variants = ?variants,
                occurrences = occurrences.len(),
                discarded_short = too_short,
                kept = triplets.len(),
                "traced transition"
            );
        } else {
            debug!(
                "Transition '{}': {} occurrence(s), {} triplet(s)",
                phrase,
                occurrences.len(),
                triplets.len()
            );
        }

        triplets
    }

    /// Every occurrence of any variant, near-duplicates collapsed, sorted by position.
    ///
    /// Matching is case-insensitive and overlapping: the search resumes one
    /// character after each hit. Two occurrences whose starts lie closer
    /// than `duplicate_window_chars` are one occurrence; the first found
    /// is kept.
    pub fn find_occurrences(
        &self,
        body: &str,
        phrase: &str,
        variants: &[String],
    ) -> Vec<MatchOccurrence> {
        let mut retained: Vec<MatchOccurrence> = Vec::new();

        for variant in variants.iter().filter(|v| !v.is_empty()) {
            let pattern = match RegexBuilder::new(&regex::escape(variant))
                .case_insensitive(true)
                .build()
            {
                Ok(pattern) => pattern,
                Err(e) => {
                    warn!("Skipping variant '{}': {}", variant, e);
                    continue;
                }
            };

            let mut from = 0;
            while let Some(m) = pattern.find_at(body, from) {
                if !retained.iter().any(|kept| self.is_duplicate(body, kept.start, m.start())) {
                    retained.push(MatchOccurrence {
                        start: m.start(),
                        end: m.end(),
                        matched_text: m.as_str().to_string(),
                        source_phrase: phrase.to_string(),
                    });
                }
                from = m.start() + body[m.start()..].chars().next().map_or(1, char::len_utf8);
            }
        }

        retained.sort_by_key(|occurrence| occurrence.start);
        retained
    }

    /// Whether two byte positions are within the duplicate window (in characters)
    fn is_duplicate(&self, body: &str, a: usize, b: usize) -> bool {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        body[lo..hi].chars().count() < self.config.duplicate_window_chars
    }

    /// Last sentence of the text preceding an occurrence
    fn sentence_before(&self, preceding: &str) -> String {
        let last = SENTENCE_BREAK
            .split(preceding)
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty())
            .last()
            .unwrap_or("");
        with_terminal(last)
    }

    /// First sentence of the text following an occurrence
    fn sentence_after(&self, following: &str) -> String {
        let following = following.trim_start_matches(|c: char| c == ',' || c.is_whitespace());

        if let Some(caps) = FIRST_SENTENCE.captures(following) {
            return caps[1].trim().to_string();
        }

        let line = following.lines().next().unwrap_or("").trim();
        if line.chars().count() > self.config.fallback_line_chars {
            let mut truncated: String =
                line.chars().take(self.config.fallback_line_chars).collect();
            truncated.push('.');
            truncated
        } else {
            with_terminal(line)
        }
    }
}

/// Append a period unless the text already ends a sentence
fn with_terminal(text: &str) -> String {
    if text.ends_with(TERMINAL_PUNCTUATION) {
        text.to_string()
    } else {
        format!("{}.", text)
    }
}
