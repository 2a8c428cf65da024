//! Library-level tests of a full run: count, serialize, summarize.

use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;
use hello_genomics::output::{write_atomic, write_result_json};
use hello_genomics::summary::{MarkdownSummary, SummaryContext, SummaryRenderer};
use hello_genomics::{CountError, GeneCounter, Parameters, RANDOM_SEED};

#[test]
fn test_gzipped_matrix_matches_plain() {
    let text = "gene_id*string,type*string\nG1,protein_coding\nG2,lncRNA\nG3,protein_coding\n";
    let dir = tempfile::tempdir().unwrap();

    let plain = dir.path().join("genes.csv");
    std::fs::write(&plain, text).unwrap();

    let gzipped = dir.path().join("genes.csv.gz");
    let mut encoder = GzEncoder::new(
        std::fs::File::create(&gzipped).unwrap(),
        Compression::default(),
    );
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap();

    let counter = GeneCounter::new(',');
    let from_plain = counter.count_file(&plain).unwrap();
    let from_gzip = counter.count_file(&gzipped).unwrap();

    assert_eq!(from_plain, from_gzip);
    assert_eq!(from_plain.gene_types["protein_coding"], 2);
}

#[test]
fn test_large_matrix_streams() {
    // Many rows, few types: the result only holds the distinct labels
    let mut text = String::from("id*string,type*string\n");
    for i in 0..100_000 {
        text.push_str(&format!("G{i},{}\n", if i % 3 == 0 { "rna" } else { "protein" }));
    }

    let result = GeneCounter::new(',').count(text.as_bytes()).unwrap();
    assert_eq!(result.num_genes, 100_000);
    assert_eq!(result.gene_types["rna"], 33_334);
    assert_eq!(result.gene_types["protein"], 66_666);
}

#[test]
fn test_full_run_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let parameters = Parameters::from_json(r#"{"delimiter": "\t"}"#)
        .unwrap()
        .with_seed(RANDOM_SEED);

    let results = GeneCounter::new(parameters.delimiter().unwrap())
        .count_text("id\ttype\nA\tsnRNA\n")
        .unwrap();

    let output = dir.path().join("results.json");
    write_result_json(&output, &results).unwrap();

    let summary = MarkdownSummary::new()
        .render(&SummaryContext::new(&results, &parameters))
        .unwrap();
    let summary_path = dir.path().join("summary.md");
    write_atomic(&summary_path, summary.as_bytes()).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json, serde_json::json!({"num_genes": 1, "gene_types": {"snRNA": 1}}));
    assert_eq!(std::fs::read_to_string(&summary_path).unwrap(), summary);
}

#[test]
fn test_missing_file_is_resource_unavailable() {
    let err = GeneCounter::default()
        .count_file(std::path::Path::new("/nonexistent/genes.csv"))
        .unwrap_err();
    assert!(matches!(err, CountError::ResourceUnavailable(_)));
}
