//! Search options.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};

/// Text search configuration names: a plain or schema-qualified identifier.
static LANGUAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$")
        .unwrap_or_else(|e| panic!("invalid language pattern: {e}"))
});

/// Options controlling how a search scope is composed.
///
/// Unknown keys are ignored when deserializing, and missing keys fall back
/// to their defaults, so a loose JSON options bag can be passed straight to
/// [`SearchOptions::from_value`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Text search configuration (dictionary) used by full-text formats.
    #[serde(default = "default_language")]
    pub language: String,

    /// AND the per-field conditions when true, OR them when false.
    #[serde(default = "default_exclusive")]
    pub exclusive: bool,

    /// Trigram similarity threshold.
    ///
    /// Only read by the bootstrap helpers; composing a scope ignores it.
    #[serde(default)]
    pub limit: Option<f64>,
}

fn default_language() -> String {
    "simple".to_string()
}

fn default_exclusive() -> bool {
    true
}

fn parse_env<T: std::str::FromStr>(var: &str, value: &str) -> ValidationResult<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ValidationError::InvalidOption {
            option: var.to_string(),
            message: format!("'{}' does not parse: {}", value, e),
        })
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            language: default_language(),
            exclusive: default_exclusive(),
            limit: None,
        }
    }
}

impl SearchOptions {
    /// Creates options with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the text search configuration.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the combination policy across fields.
    pub fn with_exclusive(mut self, exclusive: bool) -> Self {
        self.exclusive = exclusive;
        self
    }

    /// Sets the trigram similarity threshold.
    pub fn with_limit(mut self, limit: f64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Parses and validates a loose options bag.
    pub fn from_value(value: serde_json::Value) -> ValidationResult<Self> {
        let options: SearchOptions = serde_json::from_value(value)?;
        options.validate()?;
        Ok(options)
    }

    /// Creates options from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `SEARCH_LANGUAGE` (default: "simple")
    /// - `SEARCH_EXCLUSIVE` (default: true)
    /// - `SEARCH_SIMILARITY_LIMIT` (default: unset)
    ///
    /// A variable that is set but does not parse is an error.
    pub fn from_env() -> ValidationResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ValidationResult<Self> {
        let options = SearchOptions {
            language: lookup("SEARCH_LANGUAGE").unwrap_or_else(default_language),
            exclusive: match lookup("SEARCH_EXCLUSIVE") {
                Some(v) => parse_env("SEARCH_EXCLUSIVE", &v)?,
                None => default_exclusive(),
            },
            limit: match lookup("SEARCH_SIMILARITY_LIMIT") {
                Some(v) => Some(parse_env("SEARCH_SIMILARITY_LIMIT", &v)?),
                None => None,
            },
        };
        options.validate()?;
        Ok(options)
    }

    /// Checks that the options can be embedded in generated SQL.
    pub fn validate(&self) -> ValidationResult<()> {
        if !LANGUAGE_PATTERN.is_match(&self.language) {
            return Err(ValidationError::InvalidOption {
                option: "language".to_string(),
                message: format!("'{}' is not a text search configuration name", self.language),
            });
        }

        if let Some(limit) = self.limit {
            if !limit.is_finite() || !(0.0..=1.0).contains(&limit) {
                return Err(ValidationError::InvalidOption {
                    option: "limit".to_string(),
                    message: format!("{} is not between 0 and 1", limit),
                });
            }
        }

        Ok(())
    }

    /// Returns the language as a quoted SQL string literal.
    pub fn language_literal(&self) -> String {
        format!("'{}'", self.language.replace('\'', "''"))
    }
}
