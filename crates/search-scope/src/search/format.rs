//! Rank and condition formats.
//!
//! A [`SearchFormat`] decides how one quoted column becomes a ranking
//! expression and a boolean condition. The composer never looks inside the
//! generated text beyond counting placeholders, so new kinds of search only
//! need a new format.

use crate::types::SearchOptions;

/// Produces the SQL for ranking and filtering on a single column.
///
/// `field` is already quoted. Each returned fragment must contain zero or
/// one `?` placeholder; when present it is bound to the search value for
/// the column. Fragments with more placeholders are rejected when the scope
/// is composed, and a literal `?` that is not meant as a parameter slot is
/// not supported.
pub trait SearchFormat: Send + Sync {
    /// Returns a numeric expression scoring how well `field` matches.
    fn rank(&self, field: &str, options: &SearchOptions) -> String;

    /// Returns a boolean expression selecting rows where `field` matches.
    fn condition(&self, field: &str, options: &SearchOptions) -> String;
}

/// PostgreSQL full-text search using `to_tsvector`/`to_tsquery`.
///
/// Reads `language` from the options to pick the text search configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullTextFormat;

impl SearchFormat for FullTextFormat {
    fn rank(&self, field: &str, options: &SearchOptions) -> String {
        let language = options.language_literal();
        format!(
            "COALESCE(ts_rank(to_tsvector({}, {}), to_tsquery({}, ?)), 0)",
            language, field, language
        )
    }

    fn condition(&self, field: &str, options: &SearchOptions) -> String {
        let language = options.language_literal();
        format!(
            "to_tsvector({}, {}) @@ to_tsquery({}, ?)",
            language, field, language
        )
    }
}

/// Trigram similarity search from the `pg_trgm` extension.
///
/// Matching is governed by the server's similarity threshold, see
/// [`set_fuzzy_search_limit`](crate::backends::postgres::set_fuzzy_search_limit).
#[derive(Debug, Clone, Copy, Default)]
pub struct TrigramFormat;

impl SearchFormat for TrigramFormat {
    fn rank(&self, field: &str, _options: &SearchOptions) -> String {
        format!("similarity({}, ?)", field)
    }

    fn condition(&self, field: &str, _options: &SearchOptions) -> String {
        format!("({} % ?)", field)
    }
}
