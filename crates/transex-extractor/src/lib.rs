//! Transex Extractor
//!
//! Extracts transition phrases and their surrounding sentences from French
//! news articles, producing `(sentence before, transition, sentence after)`
//! triplets for fine-tuning datasets.
//!
//! # Architecture
//!
//! ```text
//! text → ArticleSegmenter → (body, transitions block)
//!      → extract_transitions → phrases
//!      → generate_variants → surface forms
//!      → ContextExtractor → triplets
//!      → AggregateResult → generate_outputs → artifacts / ZIP
//! ```
//!
//! Every stage is a pure function of its input; the batch driver owns the
//! accumulated results and a document that fails to load never stops the
//! batch.
//!
//! # Example Usage
//!
//! ```no_run
//! use transex_extractor::{
//!     generate_outputs, process_batch, NoopObserver, SourceDocument, TransitionExtractor,
//! };
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = TransitionExtractor::default_config();
//! let documents = vec![Ok(SourceDocument::new("article.docx", "..."))];
//!
//! let aggregate = process_batch(documents, &extractor, &NoopObserver);
//! let outputs =
//!     generate_outputs(&aggregate.triplets, &aggregate.transitions, extractor.config())?;
//!
//! println!("{} valid examples", outputs.valid_example_count);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod archive;
mod batch;
mod config;
mod context;
mod error;
mod extractor;
mod output;
mod segmenter;
mod transitions;
mod types;
mod variants;


pub use archive::{create_download_zip, write_artifacts, DEFAULT_ARCHIVE_NAME};
pub use batch::{process_batch, AggregateResult, NoopObserver, ProgressObserver};
pub use config::{ExtractorConfig, DEFAULT_MARKER, DEFAULT_SYSTEM_PROMPT, DEFAULT_TRANSITIONS_LABEL};
pub use context::ContextExtractor;
pub use error::ExtractorError;
pub use extractor::TransitionExtractor;
pub use output::{
    cap_triplets, generate_outputs, transition_frequencies, ChatMessage, ChatRecord, OutputBundle,
    FEWSHOTS_REJECTED_TXT, FEWSHOT_JSON, FEWSHOT_JSONL, FINETUNING_REJECTED_TXT,
    TRANSITIONS_REJECTED_TXT, TRANSITIONS_TXT,
};
pub use segmenter::{ArticleSegmenter, Segmentation};
pub use transitions::extract_transitions;
pub use types::{
    ArticleSection, DocumentDiagnostics, DocumentExtraction, DocumentFailure, DocumentSummary,
    MatchOccurrence, SourceDocument, Triplet,
};
pub use variants::generate_variants;
