//! SQL fragments and placeholder handling.
//!
//! Fragments carry `?` placeholders. They are only turned into PostgreSQL
//! `$N` placeholders when a full statement is rendered, so fragments can be
//! combined freely without tracking parameter offsets.

use crate::error::FragmentError;
use crate::types::SqlParam;

/// The positional placeholder used inside fragments.
pub const PLACEHOLDER: char = '?';

/// A SQL fragment with associated parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlFragment {
    /// The SQL string with `?` placeholders.
    pub sql: String,
    /// The parameter values, one per placeholder, in order.
    pub params: Vec<SqlParam>,
}

impl SqlFragment {
    /// Creates a new fragment with no parameters.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Creates a fragment with parameters.
    pub fn with_params(sql: impl Into<String>, params: Vec<SqlParam>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Pairs strategy output with a search value.
    ///
    /// The value is attached only when the text carries a placeholder.
    /// Text with more than one placeholder is rejected.
    pub fn bind(sql: impl Into<String>, value: &SqlParam) -> Result<Self, FragmentError> {
        let sql = sql.into();
        match placeholder_count(&sql) {
            0 => Ok(Self::new(sql)),
            1 => Ok(Self::with_params(sql, vec![value.clone()])),
            count => Err(FragmentError::TooManyPlaceholders {
                fragment: sql,
                count,
            }),
        }
    }

    /// Combines two fragments with AND.
    pub fn and(self, other: SqlFragment) -> SqlFragment {
        SqlFragment {
            sql: format!("({}) AND ({})", self.sql, other.sql),
            params: [self.params, other.params].concat(),
        }
    }

    /// Combines two fragments with OR.
    pub fn or(self, other: SqlFragment) -> SqlFragment {
        SqlFragment {
            sql: format!("({}) OR ({})", self.sql, other.sql),
            params: [self.params, other.params].concat(),
        }
    }

    /// Joins fragments with a separator, keeping parameters in order.
    pub fn join(fragments: &[SqlFragment], separator: &str) -> SqlFragment {
        SqlFragment {
            sql: fragments
                .iter()
                .map(|f| f.sql.as_str())
                .collect::<Vec<_>>()
                .join(separator),
            params: fragments.iter().flat_map(|f| f.params.clone()).collect(),
        }
    }

    /// Returns true if the number of placeholders matches the parameters.
    pub fn is_consistent(&self) -> bool {
        placeholder_count(&self.sql) == self.params.len()
    }
}

/// Counts placeholders in fragment text.
pub fn placeholder_count(sql: &str) -> usize {
    sql.matches(PLACEHOLDER).count()
}

/// Rewrites `?` placeholders as `$N`, numbering from `next`.
///
/// `next` is advanced past the last number used.
pub fn number_placeholders(sql: &str, next: &mut usize) -> String {
    let mut out = String::with_capacity(sql.len() + 8);
    for c in sql.chars() {
        if c == PLACEHOLDER {
            out.push('$');
            out.push_str(&next.to_string());
            *next += 1;
        } else {
            out.push(c);
        }
    }
    out
}
