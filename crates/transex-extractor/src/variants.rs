//! Lexical variants of a transition phrase
//!
//! Documents render the same transition with or without elision and with
//! varying trailing punctuation. Every phrase is widened into a small,
//! ordered set of surface forms before searching the article body.

use regex::Regex;
use std::sync::LazyLock;

static WHOLE_QUE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bque\b").unwrap());

static ELIDED_QU: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bqu'").unwrap());

const TRAILING_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':'];

/// Generate the ordered, deduplicated variants of `phrase`.
///
/// The first element is always `phrase` itself.
pub fn generate_variants(phrase: &str) -> Vec<String> {
    let mut variants = VariantSet::default();

    variants.push(phrase.to_string());
    variants.push(phrase.to_lowercase());
    variants.push(capitalize(phrase));

    if WHOLE_QUE.is_match(phrase) {
        let elided = WHOLE_QUE.replace_all(phrase, "qu'").into_owned();
        let lower = elided.to_lowercase();
        let capitalized = capitalize(&elided);
        variants.push(elided);
        variants.push(lower);
        variants.push(capitalized);
    }

    if phrase.to_lowercase().contains("qu'") {
        let expanded = ELIDED_QU.replace_all(phrase, "que ").into_owned();
        let lower = expanded.to_lowercase();
        variants.push(expanded);
        variants.push(lower);
    }

    let stripped = phrase.trim_end_matches(TRAILING_PUNCTUATION);
    variants.push(stripped.to_string());
    variants.push(stripped.to_lowercase());

    if !phrase.ends_with(',') {
        let with_comma = format!("{},", phrase);
        let lower = with_comma.to_lowercase();
        variants.push(with_comma);
        variants.push(lower);
    }

    if !phrase.ends_with('.') {
        let with_period = format!("{}.", phrase);
        let lower = with_period.to_lowercase();
        variants.push(with_period);
        variants.push(lower);
    }

    variants.into_vec()
}

/// First letter upper-cased, the rest lower-cased
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Insertion-ordered set that drops blank entries
#[derive(Default)]
struct VariantSet {
    items: Vec<String>,
}

impl VariantSet {
    fn push(&mut self, variant: String) {
        if variant.trim().is_empty() || self.items.contains(&variant) {
            return;
        }
        self.items.push(variant);
    }

    fn into_vec(self) -> Vec<String> {
        self.items
    }
}
