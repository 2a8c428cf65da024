use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::{debug, info};

use crate::cli::{malformed_row_policy, OutputFormat};
use crate::config::parameters::DELIMITER_KEY;
use crate::config::{Parameters, RANDOM_SEED};
use crate::output::{persist_all, result_json, stage};
use crate::parsing::matrix::GeneCounter;
use crate::summary::{MarkdownSummary, SummaryContext, SummaryRenderer};

#[derive(Args)]
pub struct RunArgs {
    /// Gene matrix (plain or .gz), or '-' for stdin
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path of the JSON result file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Path of the CommonMark summary file
    #[arg(short, long)]
    pub summary: PathBuf,

    /// JSON object file with run parameters
    #[arg(short, long)]
    pub parameters: Option<PathBuf>,

    /// Field separator, overrides the 'delimiter' parameter
    #[arg(short, long)]
    pub delimiter: Option<char>,

    /// Skip rows that are too short instead of failing
    #[arg(long)]
    pub skip_malformed: bool,
}

/// Execute run subcommand
///
/// Nothing is written unless counting, rendering and staging all succeed.
///
/// # Errors
///
/// Returns an error if parameters cannot be loaded, the gene matrix cannot be
/// counted, or an output file cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: RunArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    info!("Loading parameters");
    let mut parameters = match &args.parameters {
        Some(path) => Parameters::load_from_file(path)
            .with_context(|| format!("Failed to load parameters from {}", path.display()))?,
        None => Parameters::default(),
    };
    if let Some(delimiter) = args.delimiter {
        parameters.set(DELIMITER_KEY, delimiter.to_string());
    }
    let parameters = parameters.with_seed(RANDOM_SEED);
    let delimiter = parameters.delimiter()?;

    info!("Loading genes matrix");
    let counter =
        GeneCounter::new(delimiter).with_policy(malformed_row_policy(args.skip_malformed));
    let results = counter
        .count_file(&args.input)
        .with_context(|| format!("Failed to count genes in {}", args.input.display()))?;
    debug!("found {} genes", results.num_genes);

    debug!("Rendering summary");
    let summary = MarkdownSummary::new().render(&SummaryContext::new(&results, &parameters))?;

    // Both artifacts are staged before either becomes visible
    info!("Storing results");
    let staged_results = stage(&args.output, &result_json(&results)?)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!("Writing summary");
    let staged_summary = stage(&args.summary, summary.as_bytes())
        .with_context(|| format!("Failed to write {}", args.summary.display()))?;

    persist_all(vec![staged_results, staged_summary])
        .context("Failed to move run outputs into place")?;

    if verbose {
        eprintln!(
            "Wrote {} and {}",
            args.output.display(),
            args.summary.display()
        );
    }

    match format {
        OutputFormat::Text => {
            println!(
                "{} genes, {} gene types",
                results.num_genes,
                results.distinct_types()
            );
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
        OutputFormat::Tsv => println!("num_genes\t{}", results.num_genes),
    }

    info!("Done.");
    Ok(())
}
