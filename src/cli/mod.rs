//! Command-line interface for hello-genomics.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **run**: Count a gene matrix, write the JSON result and the summary
//! - **count**: Count a gene matrix and print the result
//!
//! ## Usage
//!
//! ```text
//! # Full calculation run
//! hello-genomics run --input genes.csv --output results.json --summary summary.md
//!
//! # Parameters from a JSON file
//! hello-genomics run -i genes.tsv -o results.json -s summary.md --parameters parameters.json
//!
//! # Quick look at a matrix
//! hello-genomics count genes.csv.gz --format json
//! zcat genes.csv.gz | hello-genomics count -
//! ```

use clap::{Parser, Subcommand};

use crate::parsing::matrix::MalformedRowPolicy;

pub mod count;
pub mod run;

#[derive(Parser)]
#[command(name = "hello-genomics")]
#[command(author = "FASTGenomics")]
#[command(version)]
#[command(about = "Count genes and gene types in a gene matrix")]
#[command(
    long_about = "hello-genomics is a minimal calculation app.\n\nIt reads a gene matrix with an annotated header, counts genes and gene types, writes the counts as JSON and renders a CommonMark summary of the run."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count a gene matrix and write the result and summary files
    Run(run::RunArgs),

    /// Count a gene matrix and print the result
    Count(count::CountArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Malformed row policy selected by `--skip-malformed`
#[must_use]
pub fn malformed_row_policy(skip_malformed: bool) -> MalformedRowPolicy {
    if skip_malformed {
        MalformedRowPolicy::Skip
    } else {
        MalformedRowPolicy::Fail
    }
}
