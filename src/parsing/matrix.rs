//! Streaming gene counter over a delimited gene matrix.

use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::core::header::{MatrixHeader, TYPE_COLUMN};
use crate::core::result::{GeneTally, RunResult};
use crate::parsing::input::open_input;
use crate::utils::validation::{strip_bom, trim_line_ending, DEFAULT_DELIMITER};

#[derive(Error, Debug)]
pub enum CountError {
    #[error("Missing required column '{0}' in gene matrix header")]
    MissingColumn(String),

    #[error("Malformed row {row}: too few fields in '{record}'")]
    MalformedRow { row: u64, record: String },

    #[error("Row {0} is not valid UTF-8")]
    InvalidEncoding(u64),

    #[error("Input unavailable: {0}")]
    ResourceUnavailable(#[from] std::io::Error),
}

/// What to do with a data row that is too short to hold the type column
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MalformedRowPolicy {
    /// Abort the run on the first malformed row
    #[default]
    Fail,
    /// Log a warning, count the row as skipped and keep going
    Skip,
}

/// Counts genes and gene types in a single pass over a gene matrix
#[derive(Debug, Clone, Copy)]
pub struct GeneCounter {
    delimiter: char,
    policy: MalformedRowPolicy,
}

impl Default for GeneCounter {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

impl GeneCounter {
    #[must_use]
    pub fn new(delimiter: char) -> Self {
        Self {
            delimiter,
            policy: MalformedRowPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: MalformedRowPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Count genes read from `input`.
    ///
    /// Every line is one record: the first is the header, every following
    /// line is one gene, blank lines included. Lines are read one at a time
    /// into a reused buffer, so memory grows with the number of distinct gene
    /// types only.
    ///
    /// # Errors
    ///
    /// Returns `CountError::MissingColumn` if the header has no `type` column,
    /// `CountError::MalformedRow` for a row too short to hold it (under
    /// [`MalformedRowPolicy::Fail`]), `CountError::InvalidEncoding` for a
    /// line that is not UTF-8, or `CountError::ResourceUnavailable` if
    /// reading fails.
    pub fn count<R: Read>(&self, input: R) -> Result<RunResult, CountError> {
        let mut reader = BufReader::new(input);
        let mut line = String::new();

        if !read_record(&mut reader, &mut line, 0)? {
            return Err(CountError::MissingColumn(TYPE_COLUMN.to_string()));
        }
        let header = MatrixHeader::from_fields(strip_bom(&line).split(self.delimiter));
        debug!("Gene matrix columns: {:?}", header.columns);

        let type_idx = header
            .type_column()
            .ok_or_else(|| CountError::MissingColumn(TYPE_COLUMN.to_string()))?;

        let mut tally = GeneTally::new();

        // Row numbers are 1-based; the header is row 0
        let mut row = 0u64;
        loop {
            row += 1;
            if !read_record(&mut reader, &mut line, row)? {
                break;
            }

            if let Some(gene_type) = line.split(self.delimiter).nth(type_idx) {
                tally.record(gene_type);
                continue;
            }

            match self.policy {
                MalformedRowPolicy::Fail => {
                    return Err(CountError::MalformedRow { row, record: line });
                }
                MalformedRowPolicy::Skip => {
                    warn!(
                        "Skipping malformed row {row}: {} fields, need {}: '{line}'",
                        line.split(self.delimiter).count(),
                        type_idx + 1
                    );
                    tally.skip();
                }
            }
        }

        let result = tally.finish();
        debug!(
            "Counted {} genes across {} gene types",
            result.num_genes,
            result.distinct_types()
        );
        Ok(result)
    }

    /// Count genes in a file; `.gz` files are decompressed and `-` reads stdin.
    ///
    /// # Errors
    ///
    /// Returns `CountError::ResourceUnavailable` if the file cannot be opened,
    /// otherwise the same errors as [`GeneCounter::count`].
    pub fn count_file(&self, path: &Path) -> Result<RunResult, CountError> {
        let input = open_input(path)?;
        self.count(input)
    }

    /// Count genes in in-memory text
    ///
    /// # Errors
    ///
    /// Same as [`GeneCounter::count`].
    pub fn count_text(&self, text: &str) -> Result<RunResult, CountError> {
        self.count(text.as_bytes())
    }
}

/// Count genes in `input` with the default fail-fast policy
///
/// # Errors
///
/// Same as [`GeneCounter::count`].
pub fn count<R: Read>(input: R, delimiter: char) -> Result<RunResult, CountError> {
    GeneCounter::new(delimiter).count(input)
}

/// Read the next line into `line` without its line ending.
///
/// Returns `false` at end of input. A final line ending does not start an
/// extra record.
fn read_record<R: BufRead>(
    reader: &mut R,
    line: &mut String,
    row: u64,
) -> Result<bool, CountError> {
    line.clear();
    match reader.read_line(line) {
        Ok(0) => Ok(false),
        Ok(_) => {
            let len = trim_line_ending(line).len();
            line.truncate(len);
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::InvalidData => Err(CountError::InvalidEncoding(row)),
        Err(e) => Err(CountError::ResourceUnavailable(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_gene_types() {
        let text = "id*string,type*string\nA,protein\nB,protein\nC,rna\n";
        let result = count(text.as_bytes(), ',').unwrap();

        assert_eq!(result.num_genes, 3);
        assert_eq!(result.gene_types.len(), 2);
        assert_eq!(result.gene_types["protein"], 2);
        assert_eq!(result.gene_types["rna"], 1);
    }

    #[test]
    fn test_header_only() {
        let result = count("id;type\n".as_bytes(), ';').unwrap();
        assert_eq!(result.num_genes, 0);
        assert!(result.gene_types.is_empty());
    }

    #[test]
    fn test_missing_type_column() {
        let err = count("id,kind\nA,protein\n".as_bytes(), ',').unwrap_err();
        assert!(matches!(err, CountError::MissingColumn(ref c) if c == "type"));
    }

    #[test]
    fn test_empty_input_is_missing_column() {
        let err = count("".as_bytes(), ',').unwrap_err();
        assert!(matches!(err, CountError::MissingColumn(_)));
    }

    #[test]
    fn test_total_equals_sum_of_type_counts() {
        let mut text = String::from("gene_id*string\tType*string\tvalue*float\n");
        for i in 0..250 {
            let gene_type = ["protein_coding", "lncRNA", "miRNA", "pseudogene"][i % 4];
            text.push_str(&format!("ENSG{i:011}\t{gene_type}\t{i}.5\n"));
        }

        let result = GeneCounter::new('\t').count_text(&text).unwrap();
        assert_eq!(result.num_genes, 250);
        assert_eq!(result.gene_types.values().sum::<u64>(), result.num_genes);
    }

    #[test]
    fn test_type_values_are_case_sensitive() {
        let text = "id,TYPE\nA,Protein\nB,protein\nC,protein\n";
        let result = count(text.as_bytes(), ',').unwrap();

        assert_eq!(result.gene_types["Protein"], 1);
        assert_eq!(result.gene_types["protein"], 2);
    }

    #[test]
    fn test_type_column_not_first() {
        let text = "type,id\nrna,A\nrna,B\n";
        let result = count(text.as_bytes(), ',').unwrap();
        assert_eq!(result.gene_types["rna"], 2);
    }

    #[test]
    fn test_malformed_row_fails_fast() {
        let text = "id,value,type\nA,1,protein\nB,2\nC,3,rna\n";
        let err = count(text.as_bytes(), ',').unwrap_err();

        match err {
            CountError::MalformedRow { row, record } => {
                assert_eq!(row, 2);
                assert_eq!(record, "B,2");
            }
            other => panic!("Expected MalformedRow, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_row_skipped() {
        let text = "id,value,type\nA,1,protein\nB,2\nC,3,rna\n";
        let result = GeneCounter::new(',')
            .with_policy(MalformedRowPolicy::Skip)
            .count_text(text)
            .unwrap();

        assert_eq!(result.num_genes, 2);
        assert_eq!(result.skipped_rows, 1);
        assert_eq!(result.gene_types.values().sum::<u64>(), 2);
    }

    #[test]
    fn test_extra_fields_are_counted() {
        let text = "id,type\nA,protein,extra\n";
        let result = count(text.as_bytes(), ',').unwrap();
        assert_eq!(result.num_genes, 1);
    }

    #[test]
    fn test_blank_row_with_type_second_is_malformed() {
        let text = "id,type\nA,rna\n\nB,rna\n";
        let err = count(text.as_bytes(), ',').unwrap_err();

        match err {
            CountError::MalformedRow { row, record } => {
                assert_eq!(row, 2);
                assert_eq!(record, "");
            }
            other => panic!("Expected MalformedRow, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_row_with_type_first_is_empty_label() {
        let text = "type,id\nrna,A\n\nrna,B\n";
        let result = count(text.as_bytes(), ',').unwrap();

        assert_eq!(result.num_genes, 3);
        assert_eq!(result.gene_types["rna"], 2);
        assert_eq!(result.gene_types[""], 1);
    }

    #[test]
    fn test_blank_rows_skipped_keep_line_numbers() {
        let text = "id,type\n\nA,rna\nB\n";
        let err = GeneCounter::new(',')
            .with_policy(MalformedRowPolicy::Fail)
            .count_text(text)
            .unwrap_err();
        assert!(matches!(err, CountError::MalformedRow { row: 1, .. }));

        let result = GeneCounter::new(',')
            .with_policy(MalformedRowPolicy::Skip)
            .count_text(text)
            .unwrap();
        assert_eq!(result.num_genes, 1);
        assert_eq!(result.skipped_rows, 2);
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "id,type\r\nA,rna\r\nB,protein\r\n";
        let result = count(text.as_bytes(), ',').unwrap();
        assert_eq!(result.gene_types["rna"], 1);
        assert_eq!(result.gene_types["protein"], 1);
    }

    #[test]
    fn test_missing_final_newline() {
        let result = count("id,type\nA,rna".as_bytes(), ',').unwrap();
        assert_eq!(result.num_genes, 1);
    }

    #[test]
    fn test_bom_in_header() {
        let text = "\u{feff}type,id\nrna,A\n";
        let result = count(text.as_bytes(), ',').unwrap();
        assert_eq!(result.num_genes, 1);
    }

    #[test]
    fn test_non_ascii_delimiter() {
        let result = count("id§type\nA§rna\n".as_bytes(), '§').unwrap();
        assert_eq!(result.gene_types["rna"], 1);
    }

    #[test]
    fn test_invalid_utf8_row() {
        let bytes: &[u8] = b"id,type\nA,rna\nB,\xff\n";
        let err = count(bytes, ',').unwrap_err();
        assert!(matches!(err, CountError::InvalidEncoding(2)));
    }

    #[test]
    fn test_deterministic_across_runs() {
        let text = "id,type\nA,z\nB,a\nC,m\nD,a\n";
        let counter = GeneCounter::new(',');
        let first = counter.count_text(text).unwrap();
        let second = counter.count_text(text).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_read_error_is_resource_unavailable() {
        struct FailingReader;
        impl Read for FailingReader {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk gone"))
            }
        }

        let err = count(FailingReader, ',').unwrap_err();
        assert!(matches!(err, CountError::ResourceUnavailable(_)));
    }
}
