//! Ranked search scope generation.
//!
//! This module contains the pieces that turn a search request into SQL:
//!
//! - [`terms`] - normalizes maps and example records into search terms
//! - [`format`] - rank/condition formats (full-text, trigram, custom)
//! - [`composer`] - builds per-column fragments and combines them
//! - [`scope`] - applies composed fragments to a query
//! - [`schema`] - optional column checks for search fields

pub mod composer;
pub mod format;
pub mod fragment;
pub mod schema;
pub mod scope;
pub mod terms;

pub use composer::{ComposedFragments, RANK_ALIAS, compose, quote_identifier};
pub use format::{FullTextFormat, SearchFormat, TrigramFormat};
pub use fragment::SqlFragment;
pub use schema::TableSchema;
pub use scope::{Scope, SearchScope};
pub use terms::{ExtractedTerms, SearchRecord, SearchRequest, SearchTerms};
