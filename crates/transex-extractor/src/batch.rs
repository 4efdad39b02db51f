//! Batch processing and accumulation across documents

use crate::extractor::TransitionExtractor;
use crate::types::{
    DocumentDiagnostics, DocumentExtraction, DocumentFailure, DocumentSummary, SourceDocument,
    Triplet,
};
use std::collections::HashSet;
use tracing::{info, warn};

/// Receives advisory progress notifications during a batch
pub trait ProgressObserver {
    /// A document (1-based `index` out of `total`) has been handled
    fn on_document_finished(&self, _index: usize, _total: usize, _name: &str) {}

    /// A transition of `document` (1-based `index` out of `total` in its article) has been searched
    fn on_transition_finished(&self, _document: &str, _index: usize, _total: usize) {}
}

/// Observer that ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {}

/// Everything extracted from a batch of documents
#[derive(Debug, Clone, Default)]
pub struct AggregateResult {
    /// Triplets of every document, in processing order
    pub triplets: Vec<Triplet>,

    /// Raw transition phrases of every document, in processing order
    pub transitions: Vec<String>,

    /// Per-document counters
    pub documents: Vec<DocumentSummary>,

    /// Per-document diagnostics, keyed by document name
    pub diagnostics: Vec<(String, DocumentDiagnostics)>,

    /// Documents that could not be read
    pub failures: Vec<DocumentFailure>,
}

impl AggregateResult {
    /// Create an empty aggregate
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the result of one successfully processed document
    pub fn record_extraction(&mut self, extraction: DocumentExtraction) {
        self.documents.push(DocumentSummary {
            name: extraction.name.clone(),
            triplet_count: extraction.triplets.len(),
            transition_count: extraction.transitions.len(),
        });
        self.diagnostics.push((extraction.name, extraction.diagnostics));
        self.triplets.extend(extraction.triplets);
        self.transitions.extend(extraction.transitions);
    }

    /// Record a document that failed to load; it contributes empty results
    pub fn record_failure(&mut self, failure: DocumentFailure) {
        self.documents.push(DocumentSummary {
            name: failure.name.clone(),
            triplet_count: 0,
            transition_count: 0,
        });
        self.failures.push(failure);
    }

    /// Number of distinct raw transition phrases
    pub fn unique_transition_count(&self) -> usize {
        self.transitions.iter().collect::<HashSet<_>>().len()
    }

    /// Whether nothing was extracted
    pub fn is_empty(&self) -> bool {
        self.triplets.is_empty() && self.transitions.is_empty()
    }

    /// Discard all accumulated data
    pub fn reset(&mut self) {
        self.triplets.clear();
        self.transitions.clear();
        self.documents.clear();
        self.diagnostics.clear();
        self.failures.clear();
    }
}

/// Process documents strictly in order.
///
/// A document that failed to load is recorded and the batch moves on.
pub fn process_batch<I, O>(
    documents: I,
    extractor: &TransitionExtractor,
    observer: &O,
) -> AggregateResult
where
    I: IntoIterator<Item = Result<SourceDocument, DocumentFailure>>,
    I::IntoIter: ExactSizeIterator,
    O: ProgressObserver + ?Sized,
{
    let documents = documents.into_iter();
    let total = documents.len();
    let mut aggregate = AggregateResult::new();

    for (idx, document) in documents.enumerate() {
        let name = match document {
            Ok(document) => {
                let extraction = extractor.process_document_with(&document, observer);
                aggregate.record_extraction(extraction);
                document.name
            }
            Err(failure) => {
                warn!("Failed to read '{}': {}", failure.name, failure.reason);
                let name = failure.name.clone();
                aggregate.record_failure(failure);
                name
            }
        };
        observer.on_document_finished(idx + 1, total, &name);
    }

    info!(
        "Batch complete: {} document(s), {} triplet(s), {} transition(s), {} failure(s)",
        total,
        aggregate.triplets.len(),
        aggregate.transitions.len(),
        aggregate.failures.len()
    );

    aggregate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MARKER;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingObserver {
        documents: RefCell<Vec<(usize, usize, String)>>,
        transitions: RefCell<usize>,
    }

    impl ProgressObserver for RecordingObserver {
        fn on_document_finished(&self, index: usize, total: usize, name: &str) {
            self.documents.borrow_mut().push((index, total, name.to_string()));
        }

        fn on_transition_finished(&self, _document: &str, _index: usize, _total: usize) {
            *self.transitions.borrow_mut() += 1;
        }
    }

    fn sample_document(name: &str) -> SourceDocument {
        SourceDocument::new(
            name,
            format!(
                "{}\nLe port accueille un nouveau ferry. Ensuite, la gare maritime sera rénovée.\n\
                 Transitions :\nEnsuite,\nEn outre\n",
                DEFAULT_MARKER
            ),
        )
    }

    #[test]
    fn test_failure_does_not_stop_batch() {
        let extractor = TransitionExtractor::default_config();
        let documents = vec![
            Ok(sample_document("un.docx")),
            Err(DocumentFailure {
                name: "casse.docx".to_string(),
                reason: "not a zip archive".to_string(),
            }),
            Ok(sample_document("deux.docx")),
        ];
        let observer = RecordingObserver::default();
        let aggregate = process_batch(documents, &extractor, &observer);

        assert_eq!(aggregate.documents.len(), 3);
        assert_eq!(aggregate.failures.len(), 1);
        assert_eq!(aggregate.failures[0].name, "casse.docx");
        assert_eq!(aggregate.documents[1].triplet_count, 0);
        assert_eq!(aggregate.triplets.len(), 2);
        assert_eq!(aggregate.transitions, vec!["Ensuite", "En outre", "Ensuite", "En outre"]);
        assert_eq!(aggregate.unique_transition_count(), 2);
        assert_eq!(aggregate.diagnostics.len(), 2);

        let documents = observer.documents.borrow();
        assert_eq!(documents.len(), 3);
        assert_eq!(documents[2], (3, 3, "deux.docx".to_string()));
        assert_eq!(*observer.transitions.borrow(), 4);
    }

    #[test]
    fn test_reset_clears_everything() {
        let extractor = TransitionExtractor::default_config();
        let mut aggregate =
            process_batch(vec![Ok(sample_document("un.docx"))], &extractor, &NoopObserver);
        assert!(!aggregate.is_empty());

        aggregate.reset();
        assert!(aggregate.is_empty());
        assert!(aggregate.documents.is_empty());
        assert!(aggregate.diagnostics.is_empty());
    }

    #[test]
    fn test_empty_batch() {
        let extractor = TransitionExtractor::default_config();
        let documents: Vec<Result<SourceDocument, DocumentFailure>> = Vec::new();
        let aggregate = process_batch(documents, &extractor, &NoopObserver);
        assert!(aggregate.is_empty());
        assert_eq!(aggregate.unique_transition_count(), 0);
    }
}
