//! # hello-genomics
//!
//! A minimal calculation app for gene expression matrices.
//!
//! A run reads a gene matrix, counts its genes and gene types in a single
//! streaming pass, writes the counts as JSON and renders a CommonMark summary
//! of results, methods and parameters.
//!
//! ## Example
//!
//! ```rust
//! use hello_genomics::{GeneCounter, Parameters, RANDOM_SEED};
//! use hello_genomics::summary::{MarkdownSummary, SummaryContext, SummaryRenderer};
//!
//! let text = "id*string,type*string\nA,protein\nB,protein\nC,rna\n";
//! let results = GeneCounter::new(',').count_text(text).unwrap();
//! assert_eq!(results.num_genes, 3);
//!
//! let parameters = Parameters::default().with_seed(RANDOM_SEED);
//! let summary = MarkdownSummary::new()
//!     .render(&SummaryContext::new(&results, &parameters))
//!     .unwrap();
//! assert!(summary.contains("### Results"));
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Header and result types
//! - [`parsing`]: Streaming gene counter and input handling
//! - [`config`]: Run parameters
//! - [`summary`]: Summary rendering
//! - [`output`]: Atomic artifact writing
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod config;
pub mod core;
pub mod output;
pub mod parsing;
pub mod summary;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{Parameters, RANDOM_SEED};
pub use core::header::MatrixHeader;
pub use core::result::{GeneTypeCounts, RunResult};
pub use parsing::matrix::{count, CountError, GeneCounter, MalformedRowPolicy};
