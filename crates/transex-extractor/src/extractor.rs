//! Per-document extraction pipeline

use crate::batch::{NoopObserver, ProgressObserver};
use crate::config::ExtractorConfig;
use crate::context::ContextExtractor;
use crate::error::ExtractorError;
use crate::segmenter::ArticleSegmenter;
use crate::transitions::extract_transitions;
use crate::types::{DocumentDiagnostics, DocumentExtraction, SourceDocument};
use crate::variants::generate_variants;
use tracing::{debug, info};

/// Turns document text into triplets and transition lists
pub struct TransitionExtractor {
    config: ExtractorConfig,
}

impl TransitionExtractor {
    /// Create a new extractor, validating the configuration
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self { config })
    }

    /// Create an extractor with the default configuration
    pub fn default_config() -> Self {
        Self {
            config: ExtractorConfig::default(),
        }
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Process one document
    pub fn process_document(&self, document: &SourceDocument) -> DocumentExtraction {
        self.process_document_with(document, &NoopObserver)
    }

    /// Process one document, reporting per-transition progress to `observer`
    pub fn process_document_with<O>(
        &self,
        document: &SourceDocument,
        observer: &O,
    ) -> DocumentExtraction
    where
        O: ProgressObserver + ?Sized,
    {
        let text = document.text.as_str();
        let segmenter = ArticleSegmenter::new(&self.config.marker, &self.config.transitions_label);
        let segmentation = segmenter.segment(text);

        let mut diagnostics = DocumentDiagnostics {
            text_length: text.chars().count(),
            has_marker: segmentation.marker_count > 0,
            marker_count: segmentation.marker_count,
            ..Default::default()
        };

        let mut triplets = Vec::new();
        let mut transitions = Vec::new();

        if !diagnostics.has_marker {
            info!("No marker found in '{}'", document.name);
            return DocumentExtraction {
                name: document.name.clone(),
                triplets,
                transitions,
                diagnostics,
            };
        }

        let context = ContextExtractor::new(&self.config);

        for (article_idx, section) in segmentation.sections.iter().enumerate() {
            let article_transitions =
                extract_transitions(&section.transitions_block, &self.config.transitions_label);

            debug!(
                "Article {} of '{}': body {} chars, {} transition(s)",
                article_idx + 1,
                document.name,
                section.main_body.chars().count(),
                article_transitions.len()
            );

            for (idx, phrase) in article_transitions.iter().enumerate() {
                let variants = generate_variants(phrase);
                triplets.extend(context.extract(&section.main_body, phrase, &variants));
                observer.on_transition_finished(&document.name, idx + 1, article_transitions.len());
            }

            diagnostics
                .found_transitions
                .extend(article_transitions.iter().cloned());
            transitions.extend(article_transitions);
            diagnostics.articles_processed += 1;
        }

        diagnostics.transition_lines_found = transitions.len();

        info!(
            "Processed '{}': {} marker(s), {} article(s), {} transition(s), {} triplet(s)",
            document.name,
            diagnostics.marker_count,
            diagnostics.articles_processed,
            transitions.len(),
            triplets.len()
        );

        DocumentExtraction {
            name: document.name.clone(),
            triplets,
            transitions,
            diagnostics,
        }
    }
}
