//! Packaging of generated artifacts

use crate::error::ExtractorError;
use crate::output::OutputBundle;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Default file name of the bundled archive
pub const DEFAULT_ARCHIVE_NAME: &str = "transition_extraction_results.zip";

/// Bundle the six artifacts into an in-memory ZIP archive
pub fn create_download_zip(bundle: &OutputBundle) -> Result<Vec<u8>, ExtractorError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for (name, contents) in bundle.artifacts() {
        zip.start_file(name, options)?;
        zip.write_all(contents.as_bytes())?;
    }

    let cursor = zip.finish()?;
    let bytes = cursor.into_inner();
    debug!("Created archive of {} bytes", bytes.len());
    Ok(bytes)
}

/// Write the six artifacts as loose files into `dir`, creating it if needed
pub fn write_artifacts(bundle: &OutputBundle, dir: &Path) -> Result<Vec<PathBuf>, ExtractorError> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    for (name, contents) in bundle.artifacts() {
        let path = dir.join(name);
        fs::write(&path, contents)?;
        written.push(path);
    }
    Ok(written)
}
