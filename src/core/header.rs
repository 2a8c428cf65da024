use serde::Serialize;

/// Separator between a column name and its type annotation (`gene_id*string`)
pub const TYPE_ANNOTATION_SEPARATOR: char = '*';

/// Name of the column that holds the gene type label
pub const TYPE_COLUMN: &str = "type";

/// Normalize a raw header field: drop the type annotation and lowercase.
///
/// # Examples
///
/// ```
/// use hello_genomics::core::header::normalize_column_name;
///
/// assert_eq!(normalize_column_name("gene_id*string"), "gene_id");
/// assert_eq!(normalize_column_name("Type"), "type");
/// ```
#[must_use]
pub fn normalize_column_name(field: &str) -> String {
    field
        .split_once(TYPE_ANNOTATION_SEPARATOR)
        .map_or(field, |(name, _annotation)| name)
        .to_lowercase()
}

/// Column names of a gene matrix, in file order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixHeader {
    pub columns: Vec<String>,
}

impl MatrixHeader {
    /// Build a header from the raw fields of the first record
    pub fn from_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let columns = fields.into_iter().map(normalize_column_name).collect();
        Self { columns }
    }

    /// Zero-based position of a column, matched exactly against the normalized names
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Position of the gene type column
    #[must_use]
    pub fn type_column(&self) -> Option<usize> {
        self.position(TYPE_COLUMN)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_type_annotation() {
        let header = MatrixHeader::from_fields(["gene_id*string", "type*string", "value*float"]);
        assert_eq!(header.columns, vec!["gene_id", "type", "value"]);
    }

    #[test]
    fn test_only_first_separator_splits() {
        assert_eq!(normalize_column_name("name*str*extra"), "name");
        assert_eq!(normalize_column_name("*string"), "");
    }

    #[test]
    fn test_type_column_is_case_insensitive_on_header() {
        let header = MatrixHeader::from_fields(["ID", "TYPE*String"]);
        assert_eq!(header.type_column(), Some(1));
    }

    #[test]
    fn test_type_column_missing() {
        let header = MatrixHeader::from_fields(["id", "gene_type", "types"]);
        assert_eq!(header.type_column(), None);
        assert_eq!(header.len(), 3);
    }

    #[test]
    fn test_untrimmed_names_do_not_match() {
        // Whitespace is part of the column name
        let header = MatrixHeader::from_fields(["id", " type"]);
        assert_eq!(header.type_column(), None);
    }
}
