//! Configuration for the transition extractor

use serde::{Deserialize, Serialize};

/// Marker that opens the main body of every article
pub const DEFAULT_MARKER: &str = "À savoir également dans votre département";

/// Literal that introduces an article's transitions block
pub const DEFAULT_TRANSITIONS_LABEL: &str = "Transitions :";

/// Instruction placed in the system turn of every fine-tuning record
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that continues text based on the given context.";

/// Configuration for the transition extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Marker string delimiting articles inside a document
    pub marker: String,

    /// Literal introducing the transitions block of an article
    pub transitions_label: String,

    /// Occurrences whose starts are closer than this many characters
    /// are the same occurrence found through different variants
    pub duplicate_window_chars: usize,

    /// Minimum length (characters) of both context sentences
    pub min_context_chars: usize,

    /// Truncation length for the after-context line fallback
    pub fallback_line_chars: usize,

    /// Maximum number of triplets kept per transition in the exports
    pub max_examples_per_transition: usize,

    /// System instruction of the chat-format export
    pub system_prompt: String,

    /// Transitions containing any of these substrings (case-insensitive)
    /// emit detailed trace events
    pub trace_phrases: Vec<String>,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.marker.is_empty() {
            return Err("marker must not be empty".to_string());
        }
        if self.transitions_label.is_empty() {
            return Err("transitions_label must not be empty".to_string());
        }
        if self.duplicate_window_chars == 0 {
            return Err("duplicate_window_chars must be greater than 0".to_string());
        }
        if self.fallback_line_chars == 0 {
            return Err("fallback_line_chars must be greater than 0".to_string());
        }
        if self.max_examples_per_transition == 0 {
            return Err("max_examples_per_transition must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Whether per-transition trace events are enabled for `phrase`
    pub fn is_traced(&self, phrase: &str) -> bool {
        if self.trace_phrases.is_empty() {
            return false;
        }
        let phrase = phrase.to_lowercase();
        self.trace_phrases
            .iter()
            .filter(|p| !p.trim().is_empty())
            .any(|p| phrase.contains(&p.to_lowercase()))
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            transitions_label: DEFAULT_TRANSITIONS_LABEL.to_string(),
            duplicate_window_chars: 5,
            min_context_chars: 10,
            fallback_line_chars: 100,
            max_examples_per_transition: 3,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            trace_phrases: Vec::new(),
        }
    }
}
