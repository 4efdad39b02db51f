//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use transex_extractor::{AggregateResult, DocumentDiagnostics, Triplet};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the batch summary: totals, then one row per document.
    pub fn format_summary(
        &self,
        aggregate: &AggregateResult,
        valid_examples: usize,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let summary = serde_json::json!({
                    "total_triplets": aggregate.triplets.len(),
                    "unique_transitions": aggregate.unique_transition_count(),
                    "files_processed": aggregate.documents.len(),
                    "valid_examples": valid_examples,
                    "documents": aggregate.documents,
                    "failures": aggregate.failures,
                });
                Ok(serde_json::to_string_pretty(&summary)?)
            }
            OutputFormat::Table => Ok(self.format_summary_table(aggregate, valid_examples)),
        }
    }

    fn format_summary_table(&self, aggregate: &AggregateResult, valid_examples: usize) -> String {
        let mut lines = vec![
            self.colorize("Extraction summary", "cyan"),
            format!("  Total triplets:     {}", aggregate.triplets.len()),
            format!("  Unique transitions: {}", aggregate.unique_transition_count()),
            format!("  Files processed:    {}", aggregate.documents.len()),
            format!("  Valid examples:     {}", valid_examples),
        ];

        if !aggregate.documents.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["File", "Triplets", "Transitions"]);
            for document in &aggregate.documents {
                builder.push_record([
                    document.name.clone(),
                    document.triplet_count.to_string(),
                    document.transition_count.to_string(),
                ]);
            }

            let mut table = builder.build();
            table
                .with(Style::rounded())
                .with(Modify::new(Rows::first()).with(Alignment::center()));
            lines.push(table.to_string());
        }

        for failure in &aggregate.failures {
            lines.push(self.error(&format!("{}: {}", failure.name, failure.reason)));
        }

        lines.join("\n")
    }

    /// Format per-document diagnostics, listing at most `show` transitions each.
    pub fn format_diagnostics(
        &self,
        diagnostics: &[(String, DocumentDiagnostics)],
        show: usize,
    ) -> Result<String> {
        if let OutputFormat::Json = self.format {
            let entries: Vec<serde_json::Value> = diagnostics
                .iter()
                .map(|(name, d)| serde_json::json!({ "name": name, "diagnostics": d }))
                .collect();
            return Ok(serde_json::to_string_pretty(&entries)?);
        }

        if diagnostics.is_empty() {
            return Ok(self.colorize("No documents inspected.", "yellow"));
        }

        let mut blocks = Vec::with_capacity(diagnostics.len());
        for (name, d) in diagnostics {
            let mut lines = vec![
                self.colorize(name, "cyan"),
                format!("  Text length:      {}", d.text_length),
                format!("  Marker found:     {}", if d.has_marker { "yes" } else { "no" }),
                format!("  Marker count:     {}", d.marker_count),
                format!("  Articles:         {}", d.articles_processed),
                format!("  Transition lines: {}", d.transition_lines_found),
            ];

            let (shown, hidden) = d.display_transitions(show);
            for transition in shown {
                lines.push(format!("    - {}", transition));
            }
            if hidden > 0 {
                lines.push(format!("    ... and {} more", hidden));
            }
            blocks.push(lines.join("\n"));
        }

        Ok(blocks.join("\n\n"))
    }

    /// Format the first `count` triplets.
    pub fn format_samples(&self, triplets: &[Triplet], count: usize) -> Result<String> {
        let samples = &triplets[..triplets.len().min(count)];
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(samples)?),
            OutputFormat::Table => {
                if samples.is_empty() {
                    return Ok(self.colorize("No triplets extracted.", "yellow"));
                }

                let blocks: Vec<String> = samples
                    .iter()
                    .enumerate()
                    .map(|(i, t)| {
                        format!(
                            "{} {}\n  A: {}\n  B: {}",
                            self.colorize(&format!("#{}", i + 1), "magenta"),
                            t.transition,
                            t.paragraph_a,
                            t.paragraph_b
                        )
                    })
                    .collect();
                Ok(blocks.join("\n"))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Whether summaries are rendered as JSON.
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}
