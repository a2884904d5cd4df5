//! One-time `pg_trgm` setup.
//!
//! `set_limit` is session scoped in PostgreSQL: call it on the same
//! connection that runs the trigram search.

use tokio_postgres::GenericClient;

use super::pg_error;
use crate::error::ScopeResult;
use crate::types::SearchOptions;

/// Installs the `pg_trgm` extension if it is not installed yet.
///
/// Requires a role allowed to create extensions; a privilege failure is
/// returned as a backend error and not retried.
pub async fn enable_fuzzy_search<C: GenericClient>(client: &C) -> ScopeResult<()> {
    client
        .execute("CREATE EXTENSION IF NOT EXISTS pg_trgm", &[])
        .await
        .map_err(|e| pg_error(format!("Failed to enable pg_trgm: {}", e), e))?;

    tracing::info!("pg_trgm extension enabled");
    Ok(())
}

/// Sets the similarity threshold used by the `%` operator.
///
/// Returns the threshold reported back by the server.
pub async fn set_fuzzy_search_limit<C: GenericClient>(client: &C, limit: f64) -> ScopeResult<f64> {
    SearchOptions::new().with_limit(limit).validate()?;

    // set_limit takes a real
    let threshold = limit as f32;
    let row = client
        .query_one("SELECT set_limit($1)", &[&threshold])
        .await
        .map_err(|e| pg_error(format!("Failed to set similarity limit: {}", e), e))?;
    let applied: f32 = row
        .try_get(0)
        .map_err(|e| pg_error(format!("Failed to read similarity limit: {}", e), e))?;

    tracing::info!(limit = f64::from(applied), "trigram similarity threshold set");
    Ok(f64::from(applied))
}

/// Applies `options.limit` when it is set.
pub async fn apply_similarity_limit<C: GenericClient>(
    client: &C,
    options: &SearchOptions,
) -> ScopeResult<Option<f64>> {
    match options.limit {
        Some(limit) => set_fuzzy_search_limit(client, limit).await.map(Some),
        None => Ok(None),
    }
}
