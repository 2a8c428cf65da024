use serde::Serialize;
use std::collections::BTreeMap;

/// Occurrences per gene type label, ordered by label
pub type GeneTypeCounts = BTreeMap<String, u64>;

/// Outcome of one counting run over a gene matrix
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunResult {
    /// Number of data rows counted as genes
    pub num_genes: u64,

    /// Gene count per type label (labels are case-sensitive)
    pub gene_types: GeneTypeCounts,

    /// Malformed rows dropped under the skip policy
    #[serde(skip_serializing_if = "is_zero")]
    pub skipped_rows: u64,
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde skip_serializing_if signature
fn is_zero(n: &u64) -> bool {
    *n == 0
}

impl RunResult {
    /// Number of distinct gene types
    #[must_use]
    pub fn distinct_types(&self) -> usize {
        self.gene_types.len()
    }

    /// Count for one gene type label, 0 if never seen
    #[must_use]
    pub fn count_for(&self, gene_type: &str) -> u64 {
        self.gene_types.get(gene_type).copied().unwrap_or(0)
    }

    /// Gene types with their fraction of all genes, in label order
    #[must_use]
    pub fn type_fractions(&self) -> Vec<(&str, f64)> {
        if self.num_genes == 0 {
            return Vec::new();
        }
        #[allow(clippy::cast_precision_loss)]
        let total = self.num_genes as f64;
        self.gene_types
            .iter()
            .map(|(label, &count)| {
                #[allow(clippy::cast_precision_loss)]
                let fraction = count as f64 / total;
                (label.as_str(), fraction)
            })
            .collect()
    }
}

/// Accumulates counts row by row and is frozen into a [`RunResult`]
#[derive(Debug, Default)]
pub struct GeneTally {
    result: RunResult,
}

impl GeneTally {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one gene of the given type
    pub fn record(&mut self, gene_type: &str) {
        // Avoid allocating a new key for labels already seen
        if let Some(count) = self.result.gene_types.get_mut(gene_type) {
            *count += 1;
        } else {
            self.result.gene_types.insert(gene_type.to_string(), 1);
        }
        self.result.num_genes += 1;
    }

    /// Note a malformed row that was dropped
    pub fn skip(&mut self) {
        self.result.skipped_rows += 1;
    }

    #[must_use]
    pub fn finish(self) -> RunResult {
        self.result
    }
}
