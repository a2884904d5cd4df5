//! Search term extraction.
//!
//! A search request is either an explicit column → value mapping or an
//! example record. Records are inspected through their `Serialize`
//! implementation; only fields with a non-blank value become search terms
//! (see [`SqlParam::is_blank`]).

use std::collections::BTreeMap;
use std::collections::HashMap;

use heck::ToSnakeCase;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ValidationError, ValidationResult};
use crate::types::SqlParam;

/// Column → value pairs to search on.
///
/// Terms are kept sorted by column name, which fixes the order fragments
/// are generated in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchTerms {
    terms: BTreeMap<String, SqlParam>,
}

impl SearchTerms {
    /// Creates an empty set of terms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a term, replacing any previous value for the column.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<SqlParam>) -> Self {
        self.insert(field, value);
        self
    }

    /// Adds a term, replacing any previous value for the column.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<SqlParam>) {
        self.terms.insert(field.into(), value.into());
    }

    /// Returns the value for a column.
    pub fn get(&self, field: &str) -> Option<&SqlParam> {
        self.terms.get(field)
    }

    /// Returns the number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if there are no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterates terms in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlParam)> {
        self.terms.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates the column names in order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<SqlParam>> FromIterator<(K, V)> for SearchTerms {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut terms = SearchTerms::new();
        for (field, value) in iter {
            terms.insert(field, value);
        }
        terms
    }
}

/// A record type that can be searched by example.
///
/// The serialized field names are used as column names, so serde renames
/// apply.
pub trait SearchRecord: Serialize {
    /// Returns the table holding records of this type.
    ///
    /// Defaults to the pluralized snake_case type name (`BlogPost` becomes
    /// `blog_posts`).
    fn table_name() -> String {
        default_table_name(std::any::type_name::<Self>())
    }
}

/// What to search for.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchRequest {
    /// Explicit column → value pairs, used as-is.
    Terms(SearchTerms),
    /// A serialized example record and the table it belongs to.
    Example {
        /// Table hint derived from the record type.
        table: String,
        /// The record serialized to JSON.
        record: Value,
    },
}

/// Terms extracted from a request.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedTerms {
    /// Normalized search terms.
    pub terms: SearchTerms,
    /// Table to target, when the request names one.
    pub table: Option<String>,
}

impl SearchRequest {
    /// Builds a request from an example record.
    pub fn from_record<R: SearchRecord>(record: &R) -> ValidationResult<Self> {
        Ok(SearchRequest::Example {
            table: R::table_name(),
            record: serde_json::to_value(record)?,
        })
    }

    /// Normalizes the request into search terms.
    pub fn extract(self) -> ValidationResult<ExtractedTerms> {
        match self {
            SearchRequest::Terms(terms) => Ok(ExtractedTerms { terms, table: None }),
            SearchRequest::Example { table, record } => {
                let Value::Object(fields) = record else {
                    return Err(ValidationError::InvalidRecord {
                        message: format!("record for table '{}' is not a struct", table),
                    });
                };

                let mut terms = SearchTerms::new();
                for (field, value) in &fields {
                    let param = SqlParam::from_json(field, value)?;
                    if !param.is_blank() {
                        terms.insert(field.as_str(), param);
                    }
                }

                if terms.is_empty() && !fields.is_empty() {
                    tracing::warn!(
                        table = %table,
                        fields = fields.len(),
                        "search record has no non-blank fields"
                    );
                }

                Ok(ExtractedTerms {
                    terms,
                    table: Some(table),
                })
            }
        }
    }
}

impl From<SearchTerms> for SearchRequest {
    fn from(terms: SearchTerms) -> Self {
        SearchRequest::Terms(terms)
    }
}

impl<K: Into<String>, V: Into<SqlParam>> From<HashMap<K, V>> for SearchRequest {
    fn from(map: HashMap<K, V>) -> Self {
        SearchRequest::Terms(map.into_iter().collect())
    }
}

impl<K: Into<String>, V: Into<SqlParam>> From<BTreeMap<K, V>> for SearchRequest {
    fn from(map: BTreeMap<K, V>) -> Self {
        SearchRequest::Terms(map.into_iter().collect())
    }
}

/// Derives a table name from a Rust type name.
fn default_table_name(type_name: &str) -> String {
    let base = type_name.split('<').next().unwrap_or(type_name);
    let base = base.rsplit("::").next().unwrap_or(base);

    pluralize(&base.to_snake_case())
}

fn pluralize(word: &str) -> String {
    if word.ends_with('s') || word.ends_with('x') || word.ends_with("ch") || word.ends_with("sh")
    {
        format!("{}es", word)
    } else if let Some(stem) = word.strip_suffix('y') {
        match stem.chars().last() {
            Some('a' | 'e' | 'i' | 'o' | 'u') | None => format!("{}s", word),
            Some(_) => format!("{}ies", stem),
        }
    } else {
        format!("{}s", word)
    }
}
