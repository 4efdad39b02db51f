//! Splits document text into marker-delimited articles

use crate::types::ArticleSection;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Article index footer such as "\n 3 du 12/05"
pub(crate) static ARTICLE_FOOTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\d+\s+du\s+\d+/\d+").unwrap());

/// Result of segmenting one document
#[derive(Debug, Clone, Default)]
pub struct Segmentation {
    /// Sections in document order
    pub sections: Vec<ArticleSection>,

    /// Number of marker positions found
    pub marker_count: usize,
}

/// Locates articles inside a document using a fixed marker
pub struct ArticleSegmenter<'a> {
    marker: &'a str,
    transitions_label: &'a str,
}

impl<'a> ArticleSegmenter<'a> {
    /// Create a new segmenter
    pub fn new(marker: &'a str, transitions_label: &'a str) -> Self {
        Self {
            marker,
            transitions_label,
        }
    }

    /// Byte positions of every marker occurrence.
    ///
    /// The scan resumes one character after each hit, so a marker that
    /// reoccurs inside its own span is reported more than once.
    pub fn marker_positions(&self, text: &str) -> Vec<usize> {
        let mut positions = Vec::new();
        if self.marker.is_empty() {
            return positions;
        }

        let mut from = 0;
        while let Some(found) = text[from..].find(self.marker) {
            let pos = from + found;
            positions.push(pos);
            from = pos + text[pos..].chars().next().map_or(1, char::len_utf8);
        }
        positions
    }

    /// Split `text` into article sections
    pub fn segment(&self, text: &str) -> Segmentation {
        let positions = self.marker_positions(text);
        let mut sections = Vec::new();

        for (i, &pos) in positions.iter().enumerate() {
            let body_start = pos + self.marker.len();

            let Some(offset) = text[body_start..].find(self.transitions_label) else {
                debug!("Marker at {} has no transitions label, skipping", pos);
                continue;
            };
            let label_pos = body_start + offset;

            let next_marker = positions.get(i + 1).copied().unwrap_or(text.len());
            if label_pos > next_marker {
                warn!(
                    "Transitions label at {} lies past the next marker at {}, skipping article",
                    label_pos, next_marker
                );
                continue;
            }

            let block_start = label_pos + self.transitions_label.len();
            let block_end = next_marker.max(block_start);
            let mut block = &text[block_start..block_end];
            if let Some(footer) = ARTICLE_FOOTER.find(block) {
                block = block[..footer.start()].trim();
            }

            sections.push(ArticleSection {
                main_body: text[body_start..label_pos].trim().to_string(),
                transitions_block: block.to_string(),
            });
        }

        Segmentation {
            sections,
            marker_count: positions.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_MARKER, DEFAULT_TRANSITIONS_LABEL};

    fn segmenter() -> ArticleSegmenter<'static> {
        ArticleSegmenter::new(DEFAULT_MARKER, DEFAULT_TRANSITIONS_LABEL)
    }

    #[test]
    fn test_no_marker_yields_nothing() {
        let result = segmenter().segment("Un texte sans article.");
        assert_eq!(result.marker_count, 0);
        assert!(result.sections.is_empty());
    }

    #[test]
    fn test_single_article() {
        let text = format!(
            "En-tête\n{}\nLe maire a parlé. Ensuite, il est parti.\nTransitions :\nEnsuite,\nPar ailleurs",
            DEFAULT_MARKER
        );
        let result = segmenter().segment(&text);

        assert_eq!(result.marker_count, 1);
        assert_eq!(result.sections.len(), 1);
        assert_eq!(
            result.sections[0].main_body,
            "Le maire a parlé. Ensuite, il est parti."
        );
        assert_eq!(result.sections[0].transitions_block, "\nEnsuite,\nPar ailleurs");
    }

    #[test]
    fn test_footer_truncates_transitions_block() {
        let text = format!(
            "{}\nCorps.\nTransitions :\nEnfin,\n2 du 14/03\nTexte parasite",
            DEFAULT_MARKER
        );
        let result = segmenter().segment(&text);

        assert_eq!(result.sections.len(), 1);
        assert_eq!(result.sections[0].transitions_block, "Enfin,");
    }

    #[test]
    fn test_missing_label_skips_article() {
        let text = format!("{}\nCorps sans liste.", DEFAULT_MARKER);
        let result = segmenter().segment(&text);

        assert_eq!(result.marker_count, 1);
        assert!(result.sections.is_empty());
    }

    #[test]
    fn test_out_of_order_label_skips_first_article() {
        let text = format!(
            "{m}\nPremier corps sans liste.\n{m}\nSecond corps.\nTransitions :\nPuis",
            m = DEFAULT_MARKER
        );
        let result = segmenter().segment(&text);

        assert_eq!(result.marker_count, 2);
        assert_eq!(result.sections.len(), 1);
        assert_eq!(result.sections[0].main_body, "Second corps.");
        assert_eq!(result.sections[0].transitions_block, "\nPuis");
    }

    #[test]
    fn test_two_articles_keep_their_own_blocks() {
        let text = format!(
            "{m}\nCorps un.\nTransitions :\nEnfin\n{m}\nCorps deux.\nTransitions :\nPuis",
            m = DEFAULT_MARKER
        );
        let result = segmenter().segment(&text);

        assert_eq!(result.sections.len(), 2);
        assert_eq!(result.sections[0].transitions_block, "\nEnfin\n");
        assert_eq!(result.sections[1].main_body, "Corps deux.");
    }

    #[test]
    fn test_self_overlapping_marker_is_counted_twice() {
        // Scanning resumes one character after each hit.
        let segmenter = ArticleSegmenter::new("abab", "Transitions :");
        assert_eq!(segmenter.marker_positions("xababab"), vec![1, 3]);

        let result = segmenter.segment("ababab corps\nTransitions :\nEnfin");
        assert_eq!(result.marker_count, 2);
        // The first hit's label lies past the overlapping second hit.
        assert_eq!(result.sections.len(), 1);
        assert_eq!(result.sections[0].main_body, "corps");
    }

    #[test]
    fn test_marker_positions_with_multibyte_text() {
        let text = format!("é{m}é{m}", m = DEFAULT_MARKER);
        let positions = segmenter().marker_positions(&text);
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0], 'é'.len_utf8());
    }
}
