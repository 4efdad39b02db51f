//! Document text loading.
//!
//! DOCX files are ZIP archives; the body lives in `word/document.xml` as
//! WordprocessingML. Paragraph text is rebuilt from its `<w:t>` runs, with
//! `<w:tab/>` and `<w:br/>` mapped to a tab and a newline. Paragraphs found
//! inside tables are appended after the body paragraphs.

use regex::{Captures, Regex};
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;
use transex_extractor::{DocumentFailure, SourceDocument};

const DOCUMENT_PART: &str = "word/document.xml";

static XML_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#x[0-9A-Fa-f]+|#[0-9]+|lt|gt|amp|apos|quot);").unwrap());

/// Errors raised while reading a document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File is not a readable DOCX container
    #[error("Not a DOCX document: {0}")]
    NotADocument(String),

    /// A required part is missing from the container
    #[error("Missing document part: {0}")]
    MissingPart(String),

    /// Extension not handled
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

/// Load a document as newline-joined text.
pub fn load_document(path: &Path) -> Result<SourceDocument, LoadError> {
    let name = document_name(path);
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let text = match extension.as_str() {
        "docx" => docx_text(&fs::read(path)?)?,
        "txt" => fs::read_to_string(path)?,
        other => {
            return Err(LoadError::UnsupportedFormat(if other.is_empty() {
                name
            } else {
                format!(".{}", other)
            }))
        }
    };

    Ok(SourceDocument::new(name, text))
}

/// Load a document for batch processing, turning a read failure into a
/// per-document failure record.
pub fn load_for_batch(path: &Path) -> Result<SourceDocument, DocumentFailure> {
    load_document(path).map_err(|e| DocumentFailure {
        name: document_name(path),
        reason: e.to_string(),
    })
}

/// Extract the text of a DOCX file held in memory.
pub fn docx_text(bytes: &[u8]) -> Result<String, LoadError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| LoadError::NotADocument(e.to_string()))?;

    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|_| LoadError::MissingPart(DOCUMENT_PART.to_string()))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)?;

    let paragraphs = parse_paragraphs(&xml);
    Ok(paragraphs.body.into_iter().chain(paragraphs.cells).collect::<Vec<_>>().join("\n"))
}

fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Non-empty, trimmed paragraphs of a document body
#[derive(Debug, Default, PartialEq)]
struct Paragraphs {
    body: Vec<String>,
    cells: Vec<String>,
}

fn parse_paragraphs(xml: &str) -> Paragraphs {
    let mut paragraphs = Paragraphs::default();
    let mut current = String::new();
    let mut in_text = false;
    let mut table_depth = 0usize;
    let mut pos = 0;

    while let Some(offset) = xml[pos..].find('<') {
        let tag_start = pos + offset;
        if in_text {
            current.push_str(&decode_entities(&xml[pos..tag_start]));
        }

        let Some(tag_len) = xml[tag_start..].find('>') else {
            break;
        };
        let tag = &xml[tag_start + 1..tag_start + tag_len];
        pos = tag_start + tag_len + 1;

        let closing = tag.starts_with('/');
        let self_closing = tag.ends_with('/');
        let name = tag
            .trim_start_matches('/')
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or("");

        match (name, closing) {
            ("w:p", false) => {
                current.clear();
                in_text = false;
            }
            ("w:p", true) => {
                let text = current.trim();
                if !text.is_empty() {
                    if table_depth > 0 {
                        paragraphs.cells.push(text.to_string());
                    } else {
                        paragraphs.body.push(text.to_string());
                    }
                }
                current.clear();
            }
            ("w:t", false) => in_text = !self_closing,
            ("w:t", true) => in_text = false,
            ("w:tab", false) => current.push('\t'),
            ("w:br", false) | ("w:cr", false) => current.push('\n'),
            ("w:tbl", false) => table_depth += 1,
            ("w:tbl", true) => table_depth = table_depth.saturating_sub(1),
            _ => {}
        }
    }

    paragraphs
}

fn decode_entities(text: &str) -> String {
    XML_ENTITY
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "lt" => Some('<'),
                "gt" => Some('>'),
                "amp" => Some('&'),
                "apos" => Some('\''),
                "quot" => Some('"'),
                _ if entity.starts_with("#x") => {
                    u32::from_str_radix(&entity[2..], 16).ok().and_then(char::from_u32)
                }
                _ => entity[1..].parse::<u32>().ok().and_then(char::from_u32),
            };
            decoded.map_or_else(|| caps[0].to_string(), |c| c.to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(text: &str) -> String {
        format!(
            r#"<w:p><w:pPr><w:pStyle w:val="Normal"/></w:pPr><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
            text
        )
    }

    #[test]
    fn test_parse_simple_paragraphs() {
        let xml = format!(
            "<w:document><w:body>{}{}</w:body></w:document>",
            paragraph("Bonjour"),
            paragraph("Au revoir")
        );
        let parsed = parse_paragraphs(&xml);
        assert_eq!(parsed.body, vec!["Bonjour", "Au revoir"]);
        assert!(parsed.cells.is_empty());
    }

    #[test]
    fn test_runs_are_concatenated() {
        let xml = "<w:p><w:r><w:t>Par </w:t></w:r><w:proofErr w:type=\"spellStart\"/><w:r><w:t>ailleurs,</w:t></w:r></w:p>";
        assert_eq!(parse_paragraphs(xml).body, vec!["Par ailleurs,"]);
    }

    #[test]
    fn test_empty_paragraphs_are_dropped() {
        let xml = format!("<w:p/><w:p><w:r><w:t>  </w:t></w:r></w:p>{}", paragraph("Texte"));
        assert_eq!(parse_paragraphs(&xml).body, vec!["Texte"]);
    }

    #[test]
    fn test_tabs_and_breaks() {
        let xml = "<w:p><w:r><w:t>A</w:t><w:tab/><w:t>B</w:t><w:br/><w:t>C</w:t></w:r></w:p>";
        assert_eq!(parse_paragraphs(xml).body, vec!["A\tB\nC"]);
    }

    #[test]
    fn test_table_cells_come_after_body() {
        let xml = format!(
            "<w:body>{}<w:tbl><w:tr><w:tc>{}</w:tc></w:tr></w:tbl>{}</w:body>",
            paragraph("Avant"),
            paragraph("Cellule"),
            paragraph("Après")
        );
        let parsed = parse_paragraphs(&xml);
        assert_eq!(parsed.body, vec!["Avant", "Après"]);
        assert_eq!(parsed.cells, vec!["Cellule"]);
    }

    #[test]
    fn test_entities_are_decoded() {
        assert_eq!(decode_entities("a &lt; b &amp;&amp; c"), "a < b && c");
        assert_eq!(decode_entities("l&apos;été &#233;t&#xE9;"), "l'été été");
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
        assert_eq!(decode_entities("&#xFFFFFFF;"), "&#xFFFFFFF;");
    }

    #[test]
    fn test_text_outside_runs_is_ignored() {
        let xml = "<w:p><w:instrText>PAGE</w:instrText><w:r><w:t>Visible</w:t></w:r></w:p>";
        assert_eq!(parse_paragraphs(xml).body, vec!["Visible"]);
    }

    #[test]
    fn test_not_a_zip() {
        assert!(matches!(docx_text(b"plain text"), Err(LoadError::NotADocument(_))));
    }
}
