//! Fragment composition.
//!
//! Turns search terms into one condition and one rank fragment per column
//! using a [`SearchFormat`], then combines the conditions into a single
//! predicate and the ranks into a single additive expression.

use crate::error::{ScopeResult, ValidationError, ValidationResult};
use crate::search::format::SearchFormat;
use crate::search::fragment::{PLACEHOLDER, SqlFragment};
use crate::search::terms::SearchTerms;
use crate::types::{SearchOptions, SqlParam};

/// The column alias given to the combined rank expression.
pub const RANK_ALIAS: &str = "rank";

/// Fragments generated for one search.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedFragments {
    /// One condition per column, in column order.
    pub conditions: Vec<SqlFragment>,
    /// One rank expression per column, in column order.
    pub ranks: Vec<SqlFragment>,
    /// AND the conditions when true, OR them when false.
    pub exclusive: bool,
}

impl ComposedFragments {
    /// Returns true if there is nothing to search on.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.ranks.is_empty()
    }

    /// Combines the conditions under the configured policy.
    pub fn predicate(&self) -> Option<SqlFragment> {
        let mut conditions = self.conditions.iter().cloned();
        let first = conditions.next()?;
        Some(conditions.fold(first, |combined, cond| {
            if self.exclusive {
                combined.and(cond)
            } else {
                combined.or(cond)
            }
        }))
    }

    /// Sums the rank fragments into one expression.
    pub fn rank_expression(&self) -> Option<SqlFragment> {
        if self.ranks.is_empty() {
            return None;
        }
        Some(SqlFragment::join(&self.ranks, "+"))
    }

    /// Returns the rank expression aliased as [`RANK_ALIAS`].
    pub fn rank_column(&self) -> Option<SqlFragment> {
        let expr = self.rank_expression()?;
        Some(SqlFragment::with_params(
            format!("{} AS {}", expr.sql, quote_name(RANK_ALIAS)),
            expr.params,
        ))
    }

    /// Returns the values bound by the rank fragments, in order.
    pub fn rank_params(&self) -> Vec<SqlParam> {
        self.ranks.iter().flat_map(|r| r.params.clone()).collect()
    }
}

/// Generates the fragments for every term.
///
/// Terms are visited in column order. A fragment that carries a placeholder
/// is bound to the term's value; one without a placeholder binds nothing.
pub fn compose(
    format: &dyn SearchFormat,
    terms: &SearchTerms,
    options: &SearchOptions,
) -> ScopeResult<ComposedFragments> {
    let mut conditions = Vec::with_capacity(terms.len());
    let mut ranks = Vec::with_capacity(terms.len());

    for (field, value) in terms.iter() {
        let quoted = quote_identifier(field)?;

        let rank = SqlFragment::bind(format.rank(&quoted, options), value)?;
        let condition = SqlFragment::bind(format.condition(&quoted, options), value)?;

        tracing::trace!(
            field,
            rank = %rank.sql,
            condition = %condition.sql,
            "generated search fragments"
        );

        ranks.push(rank);
        conditions.push(condition);
    }

    tracing::debug!(
        fields = terms.len(),
        exclusive = options.exclusive,
        "composed search fragments"
    );

    Ok(ComposedFragments {
        conditions,
        ranks,
        exclusive: options.exclusive,
    })
}

/// Quotes a column or table name for PostgreSQL.
///
/// Dotted names are quoted per segment (`notes.contents` becomes
/// `"notes"."contents"`) and embedded double quotes are doubled.
pub fn quote_identifier(name: &str) -> ValidationResult<String> {
    let invalid = |message: &str| ValidationError::InvalidIdentifier {
        identifier: name.to_string(),
        message: message.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("identifier is empty"));
    }
    if name.contains('\0') {
        return Err(invalid("identifier contains a NUL byte"));
    }
    if name.contains(PLACEHOLDER) {
        return Err(invalid("identifier contains the placeholder character"));
    }

    let mut segments = Vec::new();
    for segment in name.split('.') {
        if segment.is_empty() {
            return Err(invalid("identifier has an empty segment"));
        }
        segments.push(quote_name(segment));
    }
    Ok(segments.join("."))
}

/// Returns [`RANK_ALIAS`] quoted for use in ORDER BY.
pub fn quoted_rank_alias() -> String {
    quote_name(RANK_ALIAS)
}

fn quote_name(segment: &str) -> String {
    format!("\"{}\"", segment.replace('"', "\"\""))
}
