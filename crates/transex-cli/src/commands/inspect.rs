//! Inspect command implementation.

use crate::cli::InspectArgs;
use crate::config::Config;
use crate::error::Result;
use crate::loader::load_for_batch;
use crate::output::Formatter;
use transex_extractor::{process_batch, NoopObserver, TransitionExtractor};

/// Execute the inspect command.
pub fn execute_inspect(args: InspectArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let extractor = TransitionExtractor::new(config.extractor.clone())?;
    let documents = args.files.iter().map(|path| load_for_batch(path));
    let aggregate = process_batch(documents, &extractor, &NoopObserver);

    println!("{}", formatter.format_diagnostics(&aggregate.diagnostics, args.show)?);
    for failure in &aggregate.failures {
        eprintln!("{}", formatter.error(&format!("{}: {}", failure.name, failure.reason)));
    }

    Ok(())
}
