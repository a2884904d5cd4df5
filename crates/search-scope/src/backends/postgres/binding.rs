//! Parameter binding and execution.

use tokio_postgres::types::ToSql;
use tokio_postgres::{GenericClient, Row};

use super::pg_error;
use crate::error::ScopeResult;
use crate::query::SelectQuery;
use crate::types::SqlParam;

/// Converts parameters into values `tokio-postgres` can bind.
pub fn to_sql_params(params: &[SqlParam]) -> Vec<Box<dyn ToSql + Sync + Send>> {
    let mut values: Vec<Box<dyn ToSql + Sync + Send>> = Vec::with_capacity(params.len());
    for param in params {
        match param {
            SqlParam::Text(s) => values.push(Box::new(s.clone())),
            SqlParam::Float(f) => values.push(Box::new(*f)),
            SqlParam::Integer(i) => values.push(Box::new(*i)),
            SqlParam::Bool(b) => values.push(Box::new(*b)),
            SqlParam::Timestamp(dt) => values.push(Box::new(*dt)),
            SqlParam::Null => values.push(Box::new(Option::<String>::None)),
        }
    }
    values
}

/// Renders the query and returns all matching rows.
///
/// Store errors are returned as
/// [`BackendError::Internal`](crate::error::BackendError::Internal) with the
/// driver error as the source.
pub async fn fetch_all<C: GenericClient>(client: &C, query: &SelectQuery) -> ScopeResult<Vec<Row>> {
    let built = query.build()?;
    tracing::debug!(sql = %built.sql, params = built.params.len(), "executing search query");

    let params = to_sql_params(&built.params);
    let param_refs: Vec<&(dyn ToSql + Sync)> = params
        .iter()
        .map(|p| p.as_ref() as &(dyn ToSql + Sync))
        .collect();

    client
        .query(built.sql.as_str(), &param_refs)
        .await
        .map_err(|e| pg_error(format!("Failed to execute search: {}", e), e))
}
