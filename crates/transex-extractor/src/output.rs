//! Dataset artifacts generated from aggregated triplets

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::types::Triplet;
use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;
use std::collections::{BTreeSet, HashMap};
use std::io;

/// Capped triplets as a pretty-printed JSON array
pub const FEWSHOT_JSON: &str = "fewshot_examples.json";
/// Sorted, deduplicated raw transitions
pub const TRANSITIONS_TXT: &str = "transitions_only.txt";
/// Capped triplets in chat fine-tuning format
pub const FEWSHOT_JSONL: &str = "fewshot_examples.jsonl";
/// Transitions with more triplets than the cap
pub const FEWSHOTS_REJECTED_TXT: &str = "fewshots_rejected.txt";
/// Raw transitions listed more than once
pub const TRANSITIONS_REJECTED_TXT: &str = "transitions_only_rejected.txt";
/// Transitions over the cap, as reported for the fine-tuning set
pub const FINETUNING_REJECTED_TXT: &str = "fewshots-fineTuning_rejected.txt";

/// One message of a chat fine-tuning record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "system", "user" or "assistant"
    pub role: String,
    /// Message text
    pub content: String,
}

/// One line of the JSON-Lines export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRecord {
    /// System, user and assistant turns
    pub messages: Vec<ChatMessage>,
}

impl ChatRecord {
    /// Build the record for one triplet
    pub fn from_triplet(triplet: &Triplet, system_prompt: &str) -> Self {
        Self {
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: format!("{} {}", triplet.paragraph_a, triplet.transition),
                },
                ChatMessage {
                    role: "assistant".to_string(),
                    content: triplet.paragraph_b.clone(),
                },
            ],
        }
    }
}

/// The six textual artifacts of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputBundle {
    /// `fewshot_examples.json`
    pub fewshot_json: String,
    /// `transitions_only.txt`
    pub transitions_txt: String,
    /// `fewshot_examples.jsonl`
    pub fewshot_jsonl: String,
    /// `fewshots_rejected.txt`
    pub fewshots_rejected_txt: String,
    /// `transitions_only_rejected.txt`
    pub transitions_rejected_txt: String,
    /// `fewshots-fineTuning_rejected.txt`
    pub finetuning_rejected_txt: String,
    /// Number of triplets kept after capping
    pub valid_example_count: usize,
}

impl OutputBundle {
    /// Artifacts as `(file name, contents)` in their fixed order
    pub fn artifacts(&self) -> [(&'static str, &str); 6] {
        [
            (FEWSHOT_JSON, self.fewshot_json.as_str()),
            (TRANSITIONS_TXT, self.transitions_txt.as_str()),
            (FEWSHOT_JSONL, self.fewshot_jsonl.as_str()),
            (FEWSHOTS_REJECTED_TXT, self.fewshots_rejected_txt.as_str()),
            (TRANSITIONS_REJECTED_TXT, self.transitions_rejected_txt.as_str()),
            (FINETUNING_REJECTED_TXT, self.finetuning_rejected_txt.as_str()),
        ]
    }
}

/// Generate every artifact from the aggregated triplets and raw transitions.
///
/// Pure: the same input always yields byte-identical output.
pub fn generate_outputs(
    triplets: &[Triplet],
    transitions: &[String],
    config: &ExtractorConfig,
) -> Result<OutputBundle, ExtractorError> {
    let cap = config.max_examples_per_transition;
    let frequencies = transition_frequencies(triplets);
    let capped = cap_triplets(triplets, cap);

    let fewshot_json = serde_json::to_string_pretty(&capped)?;

    let fewshot_jsonl = capped
        .iter()
        .map(|t| to_spaced_json(&ChatRecord::from_triplet(t, &config.system_prompt)))
        .collect::<Result<Vec<_>, _>>()?
        .join("\n");

    let over_cap = report_lines(&frequencies, cap);

    let transitions_txt = transitions
        .iter()
        .map(String::as_str)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>()
        .join("\n");

    let raw_frequencies = count_in_order(transitions.iter().map(String::as_str));

    Ok(OutputBundle {
        fewshot_json,
        transitions_txt,
        fewshot_jsonl,
        fewshots_rejected_txt: over_cap.clone(),
        transitions_rejected_txt: report_lines(&raw_frequencies, 1),
        finetuning_rejected_txt: over_cap,
        valid_example_count: capped.len(),
    })
}

/// Single-line JSON with `", "` and `": "` separators
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

fn to_spaced_json<T: Serialize>(value: &T) -> Result<String, ExtractorError> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| ExtractorError::Serialization(e.to_string()))
}

/// Triplet count per transition, in first-seen order
pub fn transition_frequencies(triplets: &[Triplet]) -> Vec<(&str, usize)> {
    count_in_order(triplets.iter().map(|t| t.transition.as_str()))
}

/// Keep at most `cap` triplets per transition, first seen first kept
pub fn cap_triplets(triplets: &[Triplet], cap: usize) -> Vec<Triplet> {
    let mut usage: HashMap<&str, usize> = HashMap::new();
    triplets
        .iter()
        .filter(|t| {
            let used = usage.entry(t.transition.as_str()).or_insert(0);
            if *used < cap {
                *used += 1;
                true
            } else {
                false
            }
        })
        .cloned()
        .collect()
}

/// `"<phrase>: <count>"` lines for every phrase counted more than `threshold` times
fn report_lines(counts: &[(&str, usize)], threshold: usize) -> String {
    counts
        .iter()
        .filter(|(_, count)| *count > threshold)
        .map(|(phrase, count)| format!("{}: {}", phrase, count))
        .collect::<Vec<_>>()
        .join("\n")
}

fn count_in_order<'a>(items: impl IntoIterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for item in items {
        match index.get(item) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(item, counts.len());
                counts.push((item, 1));
            }
        }
    }
    counts
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: each transition keeps exactly min(cap, raw count) triplets
        #[test]
        fn prop_cap_is_min_of_cap_and_count(picks in prop::collection::vec(0usize..4, 0..40)) {
            let names = ["Enfin", "Puis", "Ainsi", "Toutefois"];
            let triplets: Vec<Triplet> = picks
                .iter()
                .enumerate()
                .map(|(i, &p)| Triplet {
                    paragraph_a: format!("Phrase avant {}.", i),
                    transition: names[p].to_string(),
                    paragraph_b: format!("phrase après {}.", i),
                })
                .collect();

            let capped = cap_triplets(&triplets, 3);
            for name in names {
                let raw = triplets.iter().filter(|t| t.transition == name).count();
                let kept = capped.iter().filter(|t| t.transition == name).count();
                prop_assert_eq!(kept, raw.min(3));
            }
        }
    }
}
