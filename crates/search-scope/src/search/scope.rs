//! Search scopes.
//!
//! A [`Scope`] is a reusable query transformation. [`SearchScope`] is the
//! scope produced for a search: applied to a base query it adds the rank
//! column to the projection, the search predicate to the WHERE clause, and
//! orders by rank, highest first.

use crate::error::{ScopeResult, ValidationResult};
use crate::query::{SelectQuery, SortDirection};
use crate::search::composer::{self, ComposedFragments};
use crate::search::format::{FullTextFormat, SearchFormat, TrigramFormat};
use crate::search::fragment::SqlFragment;
use crate::search::schema::TableSchema;
use crate::search::terms::SearchRequest;
use crate::types::SearchOptions;

/// A transformation applied to a query.
pub trait Scope: Send + Sync {
    /// Returns the transformed query.
    fn apply(&self, query: SelectQuery) -> SelectQuery;
}

impl<F> Scope for F
where
    F: Fn(SelectQuery) -> SelectQuery + Send + Sync,
{
    fn apply(&self, query: SelectQuery) -> SelectQuery {
        self(query)
    }
}

/// A ranked search over one or more columns.
///
/// Fragments are generated when the scope is created, so invalid field names
/// and malformed format output are reported before any query runs. The scope
/// is immutable and can be applied any number of times.
///
/// The combined search predicate is added as a single AND filter. With
/// `exclusive = false` the per-column conditions are ORed inside that group,
/// so an inclusive search only narrows the base query's own filters and never
/// matches rows they exclude. Use [`SelectQuery::or_filter`] for a top-level
/// OR.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchScope {
    fragments: ComposedFragments,
    table: Option<String>,
    fields: Vec<String>,
}

impl SearchScope {
    /// Composes a scope with the given format.
    pub fn new(
        format: &dyn SearchFormat,
        request: impl Into<SearchRequest>,
        options: SearchOptions,
    ) -> ScopeResult<Self> {
        options.validate()?;
        let extracted = request.into().extract()?;
        let fragments = composer::compose(format, &extracted.terms, &options)?;

        Ok(Self {
            fragments,
            table: extracted.table,
            fields: extracted.terms.fields().map(str::to_string).collect(),
        })
    }

    /// Full-text search ranked with `ts_rank`.
    pub fn full_text(
        request: impl Into<SearchRequest>,
        options: SearchOptions,
    ) -> ScopeResult<Self> {
        Self::new(&FullTextFormat, request, options)
    }

    /// Trigram similarity search.
    pub fn fuzzy(request: impl Into<SearchRequest>, options: SearchOptions) -> ScopeResult<Self> {
        Self::new(&TrigramFormat, request, options)
    }

    /// Search with a caller-supplied format.
    pub fn custom<F: SearchFormat>(
        format: F,
        request: impl Into<SearchRequest>,
        options: SearchOptions,
    ) -> ScopeResult<Self> {
        Self::new(&format, request, options)
    }

    /// Fails if any searched field is not a column of `schema`.
    pub fn validate_against(self, schema: &TableSchema) -> ValidationResult<Self> {
        schema.check_fields(self.fields.iter().map(String::as_str))?;
        Ok(self)
    }

    /// Returns the generated fragments.
    pub fn fragments(&self) -> &ComposedFragments {
        &self.fragments
    }

    /// Returns the table named by an example record, if any.
    pub fn table_hint(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// Returns the searched fields in the order fragments were generated.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns true if applying the scope leaves queries unchanged.
    pub fn is_noop(&self) -> bool {
        self.fragments.is_empty()
    }
}

impl Scope for SearchScope {
    fn apply(&self, query: SelectQuery) -> SelectQuery {
        let (Some(rank), Some(predicate)) =
            (self.fragments.rank_column(), self.fragments.predicate())
        else {
            return query;
        };

        let mut query = match &self.table {
            Some(table) => query.table(table.as_str()),
            None => query,
        };
        if query.columns().is_empty() {
            query = query.select(SqlFragment::new("*"));
        }

        query
            .select(rank)
            .filter(predicate)
            .order_by(composer::quoted_rank_alias(), SortDirection::Desc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::terms::{SearchRecord, SearchTerms};
    use crate::types::SqlParam;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Note {
        id: i64,
        contents: String,
        author: String,
    }

    impl SearchRecord for Note {}

    fn terms() -> SearchTerms {
        SearchTerms::new()
            .with("contents", "green")
            .with("author", "Luke")
    }

    #[test]
    fn test_full_text_scope_sql() {
        let scope = SearchScope::full_text(
            SearchTerms::new().with("contents", "brown"),
            SearchOptions::new().with_language("english"),
        )
        .unwrap();

        let built = SelectQuery::new("notes").scope(&scope).build().unwrap();
        assert_eq!(
            built.sql,
            "SELECT *, COALESCE(ts_rank(to_tsvector('english', \"contents\"), to_tsquery('english', $1)), 0) AS \"rank\" \
             FROM \"notes\" \
             WHERE (to_tsvector('english', \"contents\") @@ to_tsquery('english', $2)) \
             ORDER BY \"rank\" DESC"
        );
        assert_eq!(
            built.params,
            vec![SqlParam::text("brown"), SqlParam::text("brown")]
        );
    }

    #[test]
    fn test_fuzzy_scope_inclusive() {
        let scope =
            SearchScope::fuzzy(terms(), SearchOptions::new().with_exclusive(false)).unwrap();

        let built = SelectQuery::new("notes").scope(&scope).build().unwrap();
        assert_eq!(
            built.sql,
            "SELECT *, similarity(\"author\", $1)+similarity(\"contents\", $2) AS \"rank\" \
             FROM \"notes\" \
             WHERE (((\"author\" % $3)) OR ((\"contents\" % $4))) \
             ORDER BY \"rank\" DESC"
        );
        assert_eq!(
            built.params,
            vec![
                SqlParam::text("Luke"),
                SqlParam::text("green"),
                SqlParam::text("Luke"),
                SqlParam::text("green"),
            ]
        );
    }

    #[test]
    fn test_empty_scope_is_identity() {
        let scope = SearchScope::full_text(SearchTerms::new(), SearchOptions::default()).unwrap();
        assert!(scope.is_noop());

        let base = SelectQuery::new("notes")
            .filter(SqlFragment::with_params("id > ?", vec![SqlParam::Integer(1)]))
            .limit(3);
        let scoped = base.clone().scope(&scope);

        assert_eq!(scoped, base);
        assert_eq!(scoped.build().unwrap(), base.build().unwrap());
    }

    #[test]
    fn test_apply_twice_is_identical() {
        let scope = SearchScope::full_text(terms(), SearchOptions::default()).unwrap();

        let first = SelectQuery::new("notes").scope(&scope).build().unwrap();
        let second = SelectQuery::new("notes").scope(&scope).build().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_existing_columns_and_filters_are_kept() {
        let scope = SearchScope::fuzzy(
            SearchTerms::new().with("author", "Luk"),
            SearchOptions::default(),
        )
        .unwrap();

        let built = SelectQuery::new("notes")
            .select(SqlFragment::new("id"))
            .filter(SqlFragment::new("id > 0"))
            .scope(&scope)
            .build()
            .unwrap();

        assert_eq!(
            built.sql,
            "SELECT id, similarity(\"author\", $1) AS \"rank\" \
             FROM \"notes\" \
             WHERE (id > 0) AND ((\"author\" % $2)) \
             ORDER BY \"rank\" DESC"
        );
    }

    #[test]
    fn test_inclusive_search_is_grouped_under_base_filters() {
        let scope =
            SearchScope::fuzzy(terms(), SearchOptions::new().with_exclusive(false)).unwrap();

        let built = SelectQuery::new("notes")
            .filter(SqlFragment::with_params("author = ?", vec![SqlParam::text("Leah")]))
            .scope(&scope)
            .build()
            .unwrap();

        assert!(built.sql.contains(
            "WHERE (author = $3) AND (((\"author\" % $4)) OR ((\"contents\" % $5)))"
        ));
        assert_eq!(built.params[2], SqlParam::text("Leah"));
    }

    #[test]
    fn test_record_retargets_table() {
        let note = Note {
            id: 0,
            contents: "brown".to_string(),
            author: String::new(),
        };
        let request = SearchRequest::from_record(&note).unwrap();
        let scope = SearchScope::full_text(request, SearchOptions::default()).unwrap();
        assert_eq!(scope.table_hint(), Some("notes"));
        assert_eq!(scope.fields(), ["contents".to_string()]);

        let built = SelectQuery::default().scope(&scope).build().unwrap();
        assert!(built.sql.contains("FROM \"notes\""));
        assert_eq!(built.params.len(), 2);
    }

    #[test]
    fn test_composes_with_pagination() {
        let scope = SearchScope::full_text(terms(), SearchOptions::default()).unwrap();
        let paginate = |query: SelectQuery| query.limit(20).offset(40);

        let built = SelectQuery::new("notes")
            .scopes(&[&scope, &paginate])
            .build()
            .unwrap();
        assert!(built.sql.ends_with("ORDER BY \"rank\" DESC LIMIT 20 OFFSET 40"));
        assert_eq!(built.params.len(), 4);
    }

    #[test]
    fn test_validate_against_schema() {
        let schema = TableSchema::new("notes", ["id", "contents", "author"]);

        let scope = SearchScope::full_text(terms(), SearchOptions::default()).unwrap();
        assert!(scope.validate_against(&schema).is_ok());

        let scope = SearchScope::full_text(
            SearchTerms::new().with("title", "Spring"),
            SearchOptions::default(),
        )
        .unwrap();
        let err = scope.validate_against(&schema).unwrap_err();
        assert!(err.to_string().contains("'title'"));
    }

    #[test]
    fn test_invalid_options_rejected() {
        let err = SearchScope::full_text(terms(), SearchOptions::new().with_language("en glish"))
            .unwrap_err();
        assert!(err.to_string().contains("language"));
    }

    #[test]
    fn test_custom_scope_without_condition_placeholder() {
        struct LikeGreen;

        impl SearchFormat for LikeGreen {
            fn rank(&self, field: &str, _options: &SearchOptions) -> String {
                format!("similarity({}, ?)", field)
            }

            fn condition(&self, field: &str, _options: &SearchOptions) -> String {
                format!("{} LIKE '%green%'", field)
            }
        }

        let scope = SearchScope::custom(
            LikeGreen,
            SearchTerms::new().with("contents", "green"),
            SearchOptions::default(),
        )
        .unwrap();

        let built = SelectQuery::new("notes").scope(&scope).build().unwrap();
        assert_eq!(
            built.sql,
            "SELECT *, similarity(\"contents\", $1) AS \"rank\" \
             FROM \"notes\" \
             WHERE (\"contents\" LIKE '%green%') \
             ORDER BY \"rank\" DESC"
        );
        assert_eq!(built.params, vec![SqlParam::text("green")]);
    }
}
