//! Table column metadata for validating search fields.

use std::collections::BTreeSet;

use crate::error::{ValidationError, ValidationResult};

/// The columns a table exposes for searching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    name: String,
    columns: BTreeSet<String>,
}

impl TableSchema {
    /// Creates a schema from a table name and its column names.
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if the table has the column.
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains(column)
    }

    /// Fails on the first field that is not a column of this table.
    pub fn check_fields<'a>(
        &self,
        fields: impl IntoIterator<Item = &'a str>,
    ) -> ValidationResult<()> {
        for field in fields {
            if !self.has_column(field) {
                return Err(ValidationError::UnknownField {
                    field: field.to_string(),
                    table: self.name.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_fields() {
        let schema = TableSchema::new("notes", ["id", "contents", "author"]);
        assert!(schema.check_fields(["contents", "author"]).is_ok());

        let err = schema.check_fields(["contents", "title"]).unwrap_err();
        assert_eq!(err.to_string(), "unknown field 'title' for table 'notes'");
    }
}
