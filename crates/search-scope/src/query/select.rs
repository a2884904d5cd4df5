//! SELECT statement builder.

use crate::error::{FragmentError, ScopeResult, ValidationError};
use crate::search::composer::quote_identifier;
use crate::search::fragment::{SqlFragment, number_placeholders, placeholder_count};
use crate::search::scope::Scope;
use crate::types::SqlParam;

/// Sort direction for ORDER BY terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// A SELECT against a single table.
///
/// Filters added with [`filter`](Self::filter) are ANDed together; filters
/// added with [`or_filter`](Self::or_filter) are ORed onto that result.
/// Projection and filter fragments use `?` placeholders; [`build`](Self::build)
/// renders them as `$N` in statement order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectQuery {
    table: String,
    columns: Vec<SqlFragment>,
    filters: Vec<SqlFragment>,
    or_filters: Vec<SqlFragment>,
    order_by: Vec<(String, SortDirection)>,
    limit: Option<u64>,
    offset: Option<u64>,
}

/// A rendered statement with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    /// SQL with `$N` placeholders.
    pub sql: String,
    /// Parameters in placeholder order.
    pub params: Vec<SqlParam>,
}

impl SelectQuery {
    /// Creates a `SELECT *` from the given table.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Default::default()
        }
    }

    /// Returns the target table.
    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Retargets the query at another table.
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Returns the projection; empty means `*`.
    pub fn columns(&self) -> &[SqlFragment] {
        &self.columns
    }

    /// Adds a projected column or expression.
    pub fn select(mut self, column: SqlFragment) -> Self {
        self.columns.push(column);
        self
    }

    /// Adds a condition combined with AND.
    pub fn filter(mut self, condition: SqlFragment) -> Self {
        self.filters.push(condition);
        self
    }

    /// Adds a condition combined with OR.
    pub fn or_filter(mut self, condition: SqlFragment) -> Self {
        self.or_filters.push(condition);
        self
    }

    /// Adds an ORDER BY term. The expression is used verbatim.
    pub fn order_by(mut self, expr: impl Into<String>, direction: SortDirection) -> Self {
        self.order_by.push((expr.into(), direction));
        self
    }

    /// Sets LIMIT.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets OFFSET.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Applies a scope.
    pub fn scope(self, scope: &dyn Scope) -> Self {
        scope.apply(self)
    }

    /// Applies scopes in order.
    pub fn scopes(self, scopes: &[&dyn Scope]) -> Self {
        scopes.iter().fold(self, |query, scope| scope.apply(query))
    }

    /// Renders the statement with placeholders numbered from `$1`.
    pub fn build(&self) -> ScopeResult<BuiltQuery> {
        self.build_with_offset(0)
    }

    /// Renders the statement with placeholders numbered after `param_offset`.
    ///
    /// Use this when the statement is embedded after other bound values.
    pub fn build_with_offset(&self, param_offset: usize) -> ScopeResult<BuiltQuery> {
        if self.table.is_empty() {
            return Err(ValidationError::InvalidIdentifier {
                identifier: String::new(),
                message: "query has no target table".to_string(),
            }
            .into());
        }

        let mut next = param_offset + 1;
        let mut params = Vec::new();

        let mut sql = String::from("SELECT ");
        if self.columns.is_empty() {
            sql.push('*');
        } else {
            let columns = SqlFragment::join(&self.columns, ", ");
            sql.push_str(&number_placeholders(&columns.sql, &mut next));
            params.extend(columns.params);
        }

        sql.push_str(" FROM ");
        sql.push_str(&quote_identifier(&self.table)?);

        if let Some(predicate) = self.predicate() {
            sql.push_str(" WHERE ");
            sql.push_str(&number_placeholders(&predicate.sql, &mut next));
            params.extend(predicate.params);
        }

        if !self.order_by.is_empty() {
            let terms: Vec<String> = self
                .order_by
                .iter()
                .map(|(expr, dir)| format!("{} {}", expr, dir.as_sql()))
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&terms.join(", "));
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }
        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {}", offset));
        }

        let placeholders = next - param_offset - 1;
        if placeholders != params.len() {
            return Err(FragmentError::ParameterMismatch {
                placeholders,
                params: params.len(),
            }
            .into());
        }

        Ok(BuiltQuery { sql, params })
    }

    /// Combines the AND filters, then ORs the OR filters onto the result.
    fn predicate(&self) -> Option<SqlFragment> {
        let and_part = if self.filters.is_empty() {
            None
        } else {
            Some(Self::wrap_join(&self.filters, " AND "))
        };
        if self.or_filters.is_empty() {
            return and_part;
        }

        let or_part = Self::wrap_join(&self.or_filters, " OR ");
        Some(match and_part {
            Some(and_part) => SqlFragment::join(&[and_part, or_part], " OR "),
            None => or_part,
        })
    }

    fn wrap_join(fragments: &[SqlFragment], separator: &str) -> SqlFragment {
        let wrapped: Vec<SqlFragment> = fragments
            .iter()
            .map(|f| SqlFragment::with_params(format!("({})", f.sql), f.params.clone()))
            .collect();
        SqlFragment::join(&wrapped, separator)
    }
}

impl BuiltQuery {
    /// Returns true if no `?` placeholder survived rendering.
    pub fn is_fully_numbered(&self) -> bool {
        placeholder_count(&self.sql) == 0
    }
}
