//! Summary documents for a run.
//!
//! A summary is a CommonMark document with:
//!
//! - an abstract about the app (no heading)
//! - a `### Results` section
//! - a `### Methods` section
//! - a `### Parameters` section listing every parameter used
//!
//! Renderers implement [`SummaryRenderer`]; [`MarkdownSummary`] is the
//! built-in one.

use thiserror::Error;

use crate::config::Parameters;
use crate::core::result::RunResult;

pub mod markdown;

pub use markdown::MarkdownSummary;

/// Auxiliary constant handed to every summary
pub const THE_ANSWER_TO_EVERYTHING: u32 = 42;

#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("Failed to format summary: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Everything a renderer may put into a summary
#[derive(Debug, Clone, Copy)]
pub struct SummaryContext<'a> {
    pub results: &'a RunResult,
    pub parameters: &'a Parameters,
    pub the_answer_to_everything: u32,
}

impl<'a> SummaryContext<'a> {
    #[must_use]
    pub fn new(results: &'a RunResult, parameters: &'a Parameters) -> Self {
        Self {
            results,
            parameters,
            the_answer_to_everything: THE_ANSWER_TO_EVERYTHING,
        }
    }
}

/// Renders a run into a summary document
pub trait SummaryRenderer {
    /// # Errors
    ///
    /// Returns `SummaryError` if the document cannot be produced.
    fn render(&self, ctx: &SummaryContext<'_>) -> Result<String, SummaryError>;
}
