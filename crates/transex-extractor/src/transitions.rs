//! Parses a transitions block into candidate phrases

use regex::Regex;
use std::sync::LazyLock;

static FOOTER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\s+du\s+\d+/\d+").unwrap());

static LEADING_BULLETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s\-–—•·*\d.,;:)]+").unwrap());

static TRAILING_COMMAS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,\s]+$").unwrap());

/// Extract transition phrases from a transitions block.
///
/// Order is preserved and repeated lines are kept.
pub fn extract_transitions(block: &str, transitions_label: &str) -> Vec<String> {
    block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| *line != transitions_label)
        .filter(|line| !FOOTER_LINE.is_match(line))
        .filter_map(clean_line)
        .collect()
}

/// Strip bullets and trailing commas; reject phrases of two characters or fewer
fn clean_line(line: &str) -> Option<String> {
    let line = LEADING_BULLETS.replace(line, "");
    let line = TRAILING_COMMAS.replace(&line, "");
    let line = line.trim();

    if line.chars().count() > 2 {
        Some(line.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABEL: &str = "Transitions :";

    #[test]
    fn test_numbered_line_is_cleaned() {
        assert_eq!(extract_transitions("1. Cependant,", LABEL), vec!["Cependant"]);
    }

    #[test]
    fn test_bullets_and_dashes_are_stripped() {
        let block = "- Par ailleurs,\n• Ensuite\n– Dans le même temps, ";
        assert_eq!(
            extract_transitions(block, LABEL),
            vec!["Par ailleurs", "Ensuite", "Dans le même temps"]
        );
    }

    #[test]
    fn test_label_and_footer_lines_are_skipped() {
        let block = "Transitions :\nEnfin\n12 du 03/04\n";
        assert_eq!(extract_transitions(block, LABEL), vec!["Enfin"]);
    }

    #[test]
    fn test_short_junk_is_discarded() {
        let block = "1.\nEt\n, ,\nOr,\nAinsi";
        assert_eq!(extract_transitions(block, LABEL), vec!["Ainsi"]);
    }

    #[test]
    fn test_duplicates_are_preserved_in_order() {
        let block = "Enfin\nPuis\nEnfin";
        assert_eq!(extract_transitions(block, LABEL), vec!["Enfin", "Puis", "Enfin"]);
    }

    #[test]
    fn test_inner_punctuation_is_kept() {
        let block = "3) Alors qu'il pleuvait,";
        assert_eq!(extract_transitions(block, LABEL), vec!["Alors qu'il pleuvait"]);
    }
}
