use std::fmt::Write;

use serde_json::Value;

use crate::summary::{SummaryContext, SummaryError, SummaryRenderer};

/// Built-in CommonMark summary
#[derive(Debug, Clone, Default)]
pub struct MarkdownSummary;

impl MarkdownSummary {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SummaryRenderer for MarkdownSummary {
    fn render(&self, ctx: &SummaryContext<'_>) -> Result<String, SummaryError> {
        let mut out = String::new();
        let results = ctx.results;

        writeln!(
            out,
            "Hello Genomics is a minimal calculation app: it reads a gene matrix, \
             counts its genes and gene types and writes the counts as JSON."
        )?;

        writeln!(out, "\n### Results\n")?;
        writeln!(out, "The gene matrix contains **{}** genes.", results.num_genes)?;
        if !results.gene_types.is_empty() {
            writeln!(
                out,
                "\nThey fall into {} gene types:\n",
                results.distinct_types()
            )?;
            for (gene_type, fraction) in results.type_fractions() {
                writeln!(
                    out,
                    "- {}: {} ({:.1}%)",
                    escape(gene_type),
                    results.count_for(gene_type),
                    fraction * 100.0
                )?;
            }
        }
        if results.skipped_rows > 0 {
            writeln!(
                out,
                "\n{} malformed rows were skipped.",
                results.skipped_rows
            )?;
        }

        writeln!(out, "\n### Methods\n")?;
        writeln!(
            out,
            "Each row after the header is one gene. Genes are grouped by the value \
             of the `type` column; type annotations (`name*type`) are removed from \
             header names before the column is looked up."
        )?;
        writeln!(
            out,
            "\nThe answer to everything is {}.",
            ctx.the_answer_to_everything
        )?;

        writeln!(out, "\n### Parameters\n")?;
        for (key, value) in ctx.parameters.iter() {
            writeln!(out, "- **{}**: `{}`", escape(key), display_value(value))?;
        }

        Ok(out)
    }
}

/// Strings without quotes, everything else as JSON
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.escape_default().to_string(),
        other => other.to_string(),
    }
}

/// Escape characters with inline meaning in CommonMark
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '#' | '|') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
