use std::path::PathBuf;

use clap::Args;

use crate::cli::{malformed_row_policy, OutputFormat};
use crate::core::result::RunResult;
use crate::parsing::matrix::GeneCounter;
use crate::utils::validation::DEFAULT_DELIMITER;

#[derive(Args)]
pub struct CountArgs {
    /// Gene matrix (plain or .gz), or '-' for stdin
    #[arg(required = true)]
    pub input: PathBuf,

    /// Field separator
    #[arg(short, long, default_value_t = DEFAULT_DELIMITER)]
    pub delimiter: char,

    /// Skip rows that are too short instead of failing
    #[arg(long)]
    pub skip_malformed: bool,
}

/// Execute count subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be read or counted.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CountArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let counter = GeneCounter::new(args.delimiter)
        .with_policy(malformed_row_policy(args.skip_malformed));
    let result = counter.count_file(&args.input)?;

    if verbose {
        eprintln!(
            "Counted {} genes in {} (delimiter {:?})",
            result.num_genes,
            args.input.display(),
            counter.delimiter()
        );
    }

    match format {
        OutputFormat::Text => print_text_result(&result),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Tsv => print_tsv_result(&result),
    }

    Ok(())
}

fn print_text_result(result: &RunResult) {
    println!("Gene Counts");
    println!("{}", "=".repeat(60));
    println!("\nGenes: {}", result.num_genes);
    println!("Gene types: {}", result.distinct_types());
    if result.skipped_rows > 0 {
        println!("Skipped rows: {}", result.skipped_rows);
    }

    if !result.gene_types.is_empty() {
        println!();
        for (gene_type, fraction) in result.type_fractions() {
            println!(
                "  {gene_type:<30} {:>10} {:>6.1}%",
                result.count_for(gene_type),
                fraction * 100.0
            );
        }
    }
}

fn print_tsv_result(result: &RunResult) {
    println!("gene_type\tcount");
    for (gene_type, count) in &result.gene_types {
        println!("{gene_type}\t{count}");
    }
}
