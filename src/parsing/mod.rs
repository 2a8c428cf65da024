//! Gene matrix parsing.
//!
//! - [`matrix`]: the streaming [`GeneCounter`](matrix::GeneCounter)
//! - [`input`]: opening plain, gzipped or stdin inputs
//!
//! ## Example
//!
//! ```rust
//! use hello_genomics::parsing::matrix::GeneCounter;
//!
//! let text = "id*string,type*string\nA,protein\nB,protein\nC,rna\n";
//! let result = GeneCounter::new(',').count_text(text).unwrap();
//!
//! assert_eq!(result.num_genes, 3);
//! assert_eq!(result.gene_types["protein"], 2);
//! ```
//!
//! ## Input Format
//!
//! The first record is a header of `name*annotation` fields. The column
//! named `type` (case-insensitive) holds each gene's type label:
//!
//! ```text
//! gene_id*string,type*string,expression*float
//! ENSG00000141510,protein_coding,12.5
//! ENSG00000228630,lncRNA,0.3
//! ```

pub mod input;
pub mod matrix;
