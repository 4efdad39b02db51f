//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::commands::StderrProgress;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::loader::load_for_batch;
use crate::output::Formatter;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use transex_extractor::{
    create_download_zip, generate_outputs, process_batch, write_artifacts, ExtractorConfig,
    TransitionExtractor, DEFAULT_ARCHIVE_NAME,
};

/// Execute the extract command.
pub fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let extractor = TransitionExtractor::new(extractor_config(&args, config))?;
    let progress = StderrProgress::new(!formatter.is_json());

    let documents = args.files.iter().map(|path| load_for_batch(path));
    let aggregate = process_batch(documents, &extractor, &progress);
    let outputs =
        generate_outputs(&aggregate.triplets, &aggregate.transitions, extractor.config())?;

    let output_dir = args
        .output
        .clone()
        .or_else(|| config.settings.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    if output_dir.exists() && !output_dir.is_dir() {
        return Err(CliError::InvalidInput(format!(
            "{} is not a directory",
            output_dir.display()
        )));
    }
    let write_files = !args.no_files && config.settings.write_files;
    let write_zip = args.write_zip(config.settings.write_zip);

    let mut written = Vec::new();
    if write_files {
        written.extend(write_artifacts(&outputs, &output_dir)?);
    }
    if write_zip {
        let bytes = create_download_zip(&outputs)?;
        fs::create_dir_all(&output_dir)?;
        let zip_path = output_dir.join(DEFAULT_ARCHIVE_NAME);
        fs::write(&zip_path, bytes)?;
        written.push(zip_path);
    }
    info!("Wrote {} artifact(s) to {}", written.len(), output_dir.display());

    println!("{}", formatter.format_summary(&aggregate, outputs.valid_example_count)?);
    if formatter.is_json() {
        return Ok(());
    }

    if aggregate.triplets.is_empty() {
        println!("{}", formatter.warning("No triplets found in the documents."));
    } else {
        println!("{}", formatter.format_samples(&aggregate.triplets, args.samples)?);
    }
    for path in &written {
        println!("{}", formatter.success(&format!("Wrote {}", path.display())));
    }

    Ok(())
}

/// Effective extraction settings: the configured ones plus `--trace` phrases.
fn extractor_config(args: &ExtractArgs, config: &Config) -> ExtractorConfig {
    let mut extractor = config.extractor.clone();
    for phrase in &args.trace {
        if !extractor.trace_phrases.contains(phrase) {
            extractor.trace_phrases.push(phrase.clone());
        }
    }
    extractor
}
