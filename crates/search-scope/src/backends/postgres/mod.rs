//! PostgreSQL integration.
//!
//! Binds [`SqlParam`](crate::types::SqlParam) values for `tokio-postgres`,
//! runs scoped queries, and performs the `pg_trgm` setup that trigram
//! search depends on.
//!
//! Connections are owned by the caller. Every function takes any
//! [`tokio_postgres::GenericClient`], so a plain client, a pooled client or a
//! transaction can be passed in.
//!
//! # Example
//!
//! ```no_run
//! use helios_search_scope::backends::postgres::{enable_fuzzy_search, fetch_all, set_fuzzy_search_limit};
//! use helios_search_scope::{SearchOptions, SearchScope, SearchTerms, SelectQuery};
//! use tokio_postgres::NoTls;
//!
//! # async fn main_example() -> Result<(), Box<dyn std::error::Error>> {
//! let (client, connection) =
//!     tokio_postgres::connect("host=localhost user=postgres dbname=notes", NoTls).await?;
//! tokio::spawn(connection);
//!
//! enable_fuzzy_search(&client).await?;
//! set_fuzzy_search_limit(&client, 0.1).await?;
//!
//! let scope = SearchScope::fuzzy(
//!     SearchTerms::new().with("contents", "gre"),
//!     SearchOptions::default(),
//! )?;
//! let rows = fetch_all(&client, &SelectQuery::new("notes").scope(&scope)).await?;
//! println!("{} matches", rows.len());
//! # Ok(())
//! # }
//! ```

mod binding;
mod bootstrap;

pub use binding::{fetch_all, to_sql_params};
pub use bootstrap::{apply_similarity_limit, enable_fuzzy_search, set_fuzzy_search_limit};

use crate::error::{BackendError, ScopeError};

fn pg_error(message: String, err: tokio_postgres::Error) -> ScopeError {
    ScopeError::Backend(BackendError::Internal {
        backend_name: "postgres".to_string(),
        message,
        source: Some(Box::new(err)),
    })
}
