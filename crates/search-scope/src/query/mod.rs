//! Query building.
//!
//! [`SelectQuery`] is the statement search scopes are applied to. It renders
//! to PostgreSQL SQL with `$N` placeholders and an ordered parameter list.

mod select;

pub use select::{BuiltQuery, SelectQuery, SortDirection};
