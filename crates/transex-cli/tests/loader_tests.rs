//! Loader tests against real files on disk

use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use transex_cli::loader::{load_document, load_for_batch, LoadError};
use transex_extractor::{process_batch, NoopObserver, TransitionExtractor, DEFAULT_MARKER};
use zip::write::SimpleFileOptions;

fn write_docx(path: &Path, paragraphs: &[&str]) {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>", p))
        .collect();
    let xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{}</w:body></w:document>",
        body
    );

    let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
    let options = SimpleFileOptions::default();
    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(b"<Types/>").unwrap();
    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap();
}

#[test]
fn test_load_docx_paragraphs() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("page.docx");
    write_docx(&path, &["Premier paragraphe.", "L&apos;été arrive."]);

    let document = load_document(&path).unwrap();
    assert_eq!(document.name, "page.docx");
    assert_eq!(document.text, "Premier paragraphe.\nL'été arrive.");
}

#[test]
fn test_load_txt_verbatim() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("page.txt");
    std::fs::write(&path, "  Ligne un\nLigne deux\n").unwrap();

    assert_eq!(load_document(&path).unwrap().text, "  Ligne un\nLigne deux\n");
}

#[test]
fn test_unsupported_extension() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("page.pdf");
    std::fs::write(&path, "%PDF").unwrap();

    assert!(matches!(load_document(&path), Err(LoadError::UnsupportedFormat(_))));
}

#[test]
fn test_docx_without_document_part() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("vide.docx");
    let mut zip = zip::ZipWriter::new(File::create(&path).unwrap());
    zip.start_file("autre.xml", SimpleFileOptions::default()).unwrap();
    zip.write_all(b"<x/>").unwrap();
    zip.finish().unwrap();

    assert!(matches!(load_document(&path), Err(LoadError::MissingPart(_))));
}

#[test]
fn test_corrupt_file_does_not_stop_batch() {
    let temp_dir = TempDir::new().unwrap();
    let broken = temp_dir.path().join("casse.docx");
    std::fs::write(&broken, b"not a zip").unwrap();
    let good = temp_dir.path().join("page.docx");
    write_docx(
        &good,
        &[
            DEFAULT_MARKER,
            "La piscine rouvre lundi après travaux. Par ailleurs, les tarifs restent inchangés.",
            "Transitions :",
            "Par ailleurs,",
        ],
    );

    let paths = [broken, good];
    let documents = paths.iter().map(|p| load_for_batch(p));
    let aggregate = process_batch(documents, &TransitionExtractor::default_config(), &NoopObserver);

    assert_eq!(aggregate.failures.len(), 1);
    assert_eq!(aggregate.failures[0].name, "casse.docx");
    assert_eq!(aggregate.triplets.len(), 1);
    assert_eq!(aggregate.triplets[0].paragraph_b, "les tarifs restent inchangés.");
}
