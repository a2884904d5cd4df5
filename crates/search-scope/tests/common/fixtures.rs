//! Fixture records and rows.

#![allow(dead_code)]

use helios_search_scope::{SearchRecord, SearchTerms, TableSchema};
use serde::Serialize;

/// A row of the `notes` table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Note {
    pub id: i64,
    pub contents: String,
    pub author: String,
}

impl SearchRecord for Note {}

impl Note {
    /// An example record with only the given contents set.
    pub fn with_contents(contents: &str) -> Self {
        Self {
            contents: contents.to_string(),
            ..Default::default()
        }
    }
}

/// The two rows every search test runs against.
pub const NOTE_ROWS: [(&str, &str); 2] = [
    ("The quick brown fox jumped over the green dog.", "Luke"),
    ("The grass is always green on the other side.", "Leah"),
];

/// DDL for the `notes` table.
pub const NOTES_DDL: &str = "CREATE TABLE IF NOT EXISTS notes (
    id BIGSERIAL PRIMARY KEY,
    contents TEXT NOT NULL,
    author TEXT NOT NULL
)";

/// Column metadata for the `notes` table.
pub fn notes_schema() -> TableSchema {
    TableSchema::new("notes", ["id", "contents", "author"])
}

/// `contents = green`, `author = Luke`.
pub fn green_luke_terms() -> SearchTerms {
    SearchTerms::new()
        .with("contents", "green")
        .with("author", "Luke")
}
