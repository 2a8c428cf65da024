//! Core data types for gene matrix counting.
//!
//! - [`MatrixHeader`]: normalized column names of a gene matrix
//! - [`RunResult`]: total gene count and per-type counts of a run
//! - [`GeneTally`]: the mutable accumulator a run freezes into a [`RunResult`]
//!
//! ## Header Annotations
//!
//! Gene matrix headers annotate each column with its data type:
//!
//! | Raw field        | Column name |
//! |------------------|-------------|
//! | `gene_id*string` | `gene_id`   |
//! | `Type*string`    | `type`      |
//! | `count`          | `count`     |

pub mod header;
pub mod result;

pub use header::MatrixHeader;
pub use result::{GeneTally, GeneTypeCounts, RunResult};
