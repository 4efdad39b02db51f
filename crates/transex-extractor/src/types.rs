//! Data types flowing through the extraction pipeline

use serde::{Deserialize, Serialize};

/// One marker-delimited article of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSection {
    /// Text between the marker and the transitions label, trimmed
    pub main_body: String,

    /// Raw transitions block, footer removed
    pub transitions_block: String,
}

/// An occurrence of a transition variant inside an article body
///
/// `start` and `end` are byte offsets into the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOccurrence {
    /// Byte offset of the first matched character
    pub start: usize,

    /// Byte offset one past the last matched character
    pub end: usize,

    /// Surface form found in the body
    pub matched_text: String,

    /// Canonical transition phrase the variant was generated from
    pub source_phrase: String,
}

/// A labeled training example: sentence, transition, sentence
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triplet {
    /// Sentence preceding the transition
    pub paragraph_a: String,

    /// Canonical transition phrase (never the matched surface form)
    pub transition: String,

    /// Sentence following the transition
    pub paragraph_b: String,
}

/// Raw text of one input document
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Display name, usually the file name
    pub name: String,

    /// Newline-joined document text
    pub text: String,
}

impl SourceDocument {
    /// Create a new source document
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Diagnostics collected while processing one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDiagnostics {
    /// Length of the document text in characters
    pub text_length: usize,

    /// Whether at least one marker was found
    pub has_marker: bool,

    /// Number of marker positions found
    pub marker_count: usize,

    /// Number of articles that produced a section
    pub articles_processed: usize,

    /// Every transition phrase extracted, in order
    pub found_transitions: Vec<String>,

    /// Total number of transition lines extracted
    pub transition_lines_found: usize,
}

impl DocumentDiagnostics {
    /// First `limit` transitions plus the number left out
    pub fn display_transitions(&self, limit: usize) -> (&[String], usize) {
        let shown = self.found_transitions.len().min(limit);
        (
            &self.found_transitions[..shown],
            self.found_transitions.len() - shown,
        )
    }
}

/// Successful extraction from one document
#[derive(Debug, Clone)]
pub struct DocumentExtraction {
    /// Document name
    pub name: String,

    /// Triplets in document order
    pub triplets: Vec<Triplet>,

    /// Every transition phrase of every processed article
    pub transitions: Vec<String>,

    /// Diagnostics for display
    pub diagnostics: DocumentDiagnostics,
}

/// A document that could not be processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFailure {
    /// Document name
    pub name: String,

    /// Human-readable failure cause
    pub reason: String,
}

/// Per-document counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// Document name
    pub name: String,

    /// Number of triplets extracted
    pub triplet_count: usize,

    /// Number of transition phrases extracted
    pub transition_count: usize,
}
