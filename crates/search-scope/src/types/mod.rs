//! Core types shared by the search modules.
//!
//! - [`SqlParam`] - a bound parameter value
//! - [`SearchOptions`] - language, combination policy and similarity limit

mod options;
mod value;

pub use options::SearchOptions;
pub use value::SqlParam;
