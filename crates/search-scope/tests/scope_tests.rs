//! Search scope tests that only inspect generated SQL.
//!
//! No database is required; see `postgres_tests.rs` for tests that run the
//! generated statements.

mod common;

use common::*;
use helios_search_scope::search::compose;
use helios_search_scope::{
    FullTextFormat, SearchFormat, SearchOptions, SearchRequest, SearchScope, SearchTerms,
    SelectQuery, SqlFragment, SqlParam, TrigramFormat,
};

// ============================================================================
// Term Extraction
// ============================================================================

#[test]
fn test_record_searches_only_non_blank_fields() {
    let request = SearchRequest::from_record(&Note::with_contents("brown")).unwrap();
    let extracted = request.extract().unwrap();

    assert_eq!(extracted.table.as_deref(), Some("notes"));
    assert_eq!(extracted.terms.len(), 1);
    assert_eq!(
        extracted.terms.get("contents"),
        Some(&SqlParam::text("brown"))
    );
}

#[test]
fn test_map_terms_are_used_as_given() {
    let request: SearchRequest = green_luke_terms().into();
    let extracted = request.extract().unwrap();

    assert!(extracted.table.is_none());
    assert_eq!(
        extracted.terms.fields().collect::<Vec<_>>(),
        vec!["author", "contents"]
    );
}

// ============================================================================
// Composition
// ============================================================================

#[test]
fn test_rank_fragment_count_matches_fields() {
    for format in [&FullTextFormat as &dyn SearchFormat, &TrigramFormat] {
        let composed = compose(format, &green_luke_terms(), &SearchOptions::default()).unwrap();
        assert_eq!(composed.ranks.len(), 2);
        assert_eq!(composed.rank_params().len(), 2);
    }
}

#[test]
fn test_mixed_placeholders_in_one_statement() {
    struct LikeGreen;

    impl SearchFormat for LikeGreen {
        fn rank(&self, field: &str, _options: &SearchOptions) -> String {
            format!("similarity({}, ?)", field)
        }

        fn condition(&self, field: &str, _options: &SearchOptions) -> String {
            format!("{} LIKE '%green%'", field)
        }
    }

    let scope =
        SearchScope::custom(LikeGreen, green_luke_terms(), SearchOptions::default()).unwrap();
    let built = SelectQuery::new("notes")
        .filter(SqlFragment::with_params("id > ?", vec![SqlParam::Integer(0)]))
        .scope(&scope)
        .build()
        .unwrap();

    assert_eq!(
        built.sql,
        "SELECT *, similarity(\"author\", $1)+similarity(\"contents\", $2) AS \"rank\" \
         FROM \"notes\" \
         WHERE (id > $3) AND ((\"author\" LIKE '%green%') AND (\"contents\" LIKE '%green%')) \
         ORDER BY \"rank\" DESC"
    );
    assert_eq!(
        built.params,
        vec![
            SqlParam::text("Luke"),
            SqlParam::text("green"),
            SqlParam::Integer(0),
        ]
    );
    assert!(built.is_fully_numbered());
}

#[test]
fn test_per_field_placeholders_in_one_statement() {
    struct LengthOrTrigram;

    impl SearchFormat for LengthOrTrigram {
        fn rank(&self, field: &str, _options: &SearchOptions) -> String {
            if field == "\"author\"" {
                format!("char_length({})", field)
            } else {
                format!("similarity({}, ?)", field)
            }
        }

        fn condition(&self, field: &str, _options: &SearchOptions) -> String {
            if field == "\"author\"" {
                format!("char_length({}) > 3", field)
            } else {
                format!("({} % ?)", field)
            }
        }
    }

    let composed =
        compose(&LengthOrTrigram, &green_luke_terms(), &SearchOptions::default()).unwrap();
    assert_eq!(composed.ranks.len(), 2);
    assert_eq!(composed.rank_params().len(), 1);

    let scope =
        SearchScope::custom(LengthOrTrigram, green_luke_terms(), SearchOptions::default()).unwrap();
    let built = SelectQuery::new("notes").scope(&scope).build().unwrap();

    assert_eq!(
        built.sql,
        "SELECT *, char_length(\"author\")+similarity(\"contents\", $1) AS \"rank\" \
         FROM \"notes\" \
         WHERE ((char_length(\"author\") > 3) AND ((\"contents\" % $2))) \
         ORDER BY \"rank\" DESC"
    );
    assert_eq!(
        built.params,
        vec![SqlParam::text("green"), SqlParam::text("green")]
    );
}

// ============================================================================
// Scope Application
// ============================================================================

#[test]
fn test_empty_terms_leave_query_unchanged() {
    let base = SelectQuery::new("notes").limit(10);
    let scope = SearchScope::fuzzy(SearchTerms::new(), SearchOptions::default()).unwrap();

    assert_eq!(
        base.clone().scope(&scope).build().unwrap(),
        base.build().unwrap()
    );
}

#[test]
fn test_blank_record_is_a_no_op() {
    let scope = SearchScope::full_text(
        SearchRequest::from_record(&Note::default()).unwrap(),
        SearchOptions::default(),
    )
    .unwrap();
    assert!(scope.is_noop());
}

#[test]
fn test_same_scope_same_statement() {
    let scope = SearchScope::full_text(
        green_luke_terms(),
        SearchOptions::new().with_language("english"),
    )
    .unwrap();

    let first = SelectQuery::new("notes").scope(&scope).build().unwrap();
    let second = SelectQuery::new("notes").scope(&scope).build().unwrap();
    assert_eq!(first.sql, second.sql);
    assert_eq!(first.params, second.params);
}

#[test]
fn test_unknown_column_fails_before_execution() {
    let scope = SearchScope::full_text(
        SearchTerms::new().with("title", "Spring"),
        SearchOptions::default(),
    )
    .unwrap();

    let err = scope.validate_against(&notes_schema()).unwrap_err();
    assert_eq!(err.to_string(), "unknown field 'title' for table 'notes'");
}

#[test]
fn test_options_from_loose_bag() {
    let options = SearchOptions::from_value(serde_json::json!({
        "language": "english",
        "exclusive": false,
        "color": "blue"
    }))
    .unwrap();

    let scope = SearchScope::full_text(green_luke_terms(), options).unwrap();
    let built = SelectQuery::new("notes").scope(&scope).build().unwrap();
    assert!(built.sql.contains(" OR "));
    assert!(built.sql.contains("to_tsquery('english', $1)"));
}
