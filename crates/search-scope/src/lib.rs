//! Helios Search Scope
//!
//! This crate builds ranked search clauses for PostgreSQL queries. A search
//! names one or more columns and a value for each; the crate turns that into
//! a rank expression, exposed as a `rank` column, and a matching predicate,
//! then applies both to a base query ordered by rank, highest first.
//!
//! # Features
//!
//! - **Full-text search**: `ts_rank` over `to_tsvector`/`to_tsquery` with a configurable language
//! - **Trigram search**: `similarity` and the `%` operator from `pg_trgm`
//! - **Custom formats**: any rank/condition pair via [`SearchFormat`]
//! - **Search by example**: non-blank fields of a [`SearchRecord`] become search terms
//! - **Composable scopes**: search scopes chain with other filters, pagination and closures
//!
//! Enable the PostgreSQL helpers (on by default) with:
//!
//! ```toml
//! [dependencies]
//! helios-search-scope = { version = "0.1", features = ["postgres"] }
//! ```
//!
//! # Architecture
//!
//! - [`types`] - bound parameter values and search options
//! - [`error`] - error types for all operations
//! - [`search`] - term extraction, formats, composition and scopes
//! - [`query`] - the SELECT builder scopes are applied to
//! - [`backends`] - PostgreSQL binding and `pg_trgm` setup
//!
//! # Quick Start
//!
//! ```
//! use helios_search_scope::{SearchOptions, SearchScope, SearchTerms, SelectQuery, SqlParam};
//!
//! let scope = SearchScope::full_text(
//!     SearchTerms::new().with("contents", "brown"),
//!     SearchOptions::new().with_language("english"),
//! )
//! .unwrap();
//!
//! let built = SelectQuery::new("notes").scope(&scope).build().unwrap();
//! assert!(built.sql.contains("AS \"rank\""));
//! assert!(built.sql.ends_with("ORDER BY \"rank\" DESC"));
//! assert_eq!(built.params, vec![SqlParam::text("brown"), SqlParam::text("brown")]);
//! ```
//!
//! # Search by example
//!
//! ```
//! use helios_search_scope::{SearchOptions, SearchRecord, SearchRequest, SearchScope, SelectQuery};
//! use serde::Serialize;
//!
//! #[derive(Serialize, Default)]
//! struct Note {
//!     id: i64,
//!     contents: String,
//!     author: String,
//! }
//!
//! impl SearchRecord for Note {}
//!
//! let example = Note { author: "Luk".to_string(), ..Default::default() };
//! let scope = SearchScope::fuzzy(
//!     SearchRequest::from_record(&example).unwrap(),
//!     SearchOptions::default(),
//! )
//! .unwrap();
//!
//! // Only the non-blank field is searched, against the record's table.
//! assert_eq!(scope.fields(), ["author".to_string()]);
//! let built = SelectQuery::default().scope(&scope).build().unwrap();
//! assert!(built.sql.contains("FROM \"notes\""));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod error;
pub mod query;
pub mod search;
pub mod types;

pub use error::{ScopeError, ScopeResult};
pub use query::{BuiltQuery, SelectQuery, SortDirection};
pub use search::{
    FullTextFormat, RANK_ALIAS, Scope, SearchFormat, SearchRecord, SearchRequest, SearchScope,
    SearchTerms, SqlFragment, TableSchema, TrigramFormat,
};
pub use types::{SearchOptions, SqlParam};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
