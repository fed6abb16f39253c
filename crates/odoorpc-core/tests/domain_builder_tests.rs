//! Domain builder tests
//!
//! Clause order, projections and limits for every fetch intent, the author
//! exclusion rule for live-chat polls and the merged request context.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use odoorpc_core::domain::{
    Direction, Domain, DomainBuilder, FilterClause, MessageSearch, Operator, QueryIntent,
    CONTEXT_KEY, SEARCH_METHOD,
};
use odoorpc_core::{build, FilterConstructionError, RequestContext, RequestParams};
use serde_json::{json, Value};

fn ctx() -> RequestContext {
    RequestContext::new("en_US", "Europe/Brussels", 2)
}

fn incremental(direction: Direction, is_live_chat: bool, excluded: Option<i64>) -> QueryIntent {
    QueryIntent::FetchIncremental {
        target_id: 1,
        limit: 30,
        cursor_id: 500,
        direction,
        excluded_author_id: excluded,
        is_live_chat,
    }
}

fn wire(params: &RequestParams) -> Value {
    serde_json::to_value(params).unwrap()
}

// ---------------------------------------------------------------------------
// Clause order per intent
// ---------------------------------------------------------------------------

#[test]
fn test_fetch_initial_params() {
    let params = build(&QueryIntent::FetchInitial { target_id: 1, limit: 30 }, &ctx());
    assert_eq!(
        wire(&params),
        json!({
            "model": "mail.message",
            "limit": 30,
            "domain": [
                ["model", "=", "mail.channel"],
                ["res_id", "=", 1],
                ["message_type", "in", ["email", "comment"]],
                ["message_type", "!=", "notification"]
            ],
            "fields": ["id", "attachment_ids", "author_display", "body"],
            "context": { "lang": "en_US", "tz": "Europe/Brussels", "uid": 2 }
        })
    );
}

#[test]
fn test_fetch_incremental_after_live_chat_hides_own_messages() {
    let params = build(&incremental(Direction::After, true, Some(7)), &ctx());
    let value = wire(&params);
    assert_eq!(
        value["domain"],
        json!([
            ["model", "=", "mail.channel"],
            ["res_id", "=", 1],
            ["message_type", "in", ["email", "comment"]],
            ["message_type", "!=", "notification"],
            ["id", ">", 500],
            ["author_id", "!=", 7]
        ])
    );
    assert_eq!(
        value["fields"],
        json!(["id", "body", "attachment_ids", "author_display"])
    );
    assert_eq!(value["limit"], json!(30));
}

#[test]
fn test_fetch_incremental_after_without_live_chat_keeps_author() {
    let params = build(&incremental(Direction::After, false, Some(7)), &ctx());
    assert!(!params.domain.has_clause("author_id", Operator::Ne));
    assert!(params.domain.has_clause("id", Operator::Gt));
    assert_eq!(params.domain.len(), 5);
}

#[test]
fn test_fetch_incremental_before_never_excludes_author() {
    let params = build(&incremental(Direction::Before, true, Some(7)), &ctx());
    assert!(!params.domain.has_clause("author_id", Operator::Ne));
    assert_eq!(
        wire(&params)["domain"][4],
        json!(["id", "<", 500])
    );
}

#[test]
fn test_fetch_incremental_without_excluded_author() {
    let params = build(&incremental(Direction::After, true, None), &ctx());
    assert!(!params.domain.has_clause("author_id", Operator::Ne));
}

#[test]
fn test_fetch_selective_params() {
    let intent = QueryIntent::FetchSelective {
        target_id: 1,
        explicit_ids: vec![10, 11, 12],
    };
    let value = wire(&build(&intent, &ctx()));
    assert_eq!(
        value["domain"],
        json!([
            ["id", "in", [10, 11, 12]],
            ["res_id", "=", 1],
            ["message_type", "in", ["email", "comment"]],
            ["message_type", "!=", "notification"]
        ])
    );
    assert_eq!(value["fields"], json!(["id", "attachment_ids"]));
    assert!(value.get("limit").is_none());
}

#[test]
fn test_fetch_selective_with_no_ids_is_still_valid() {
    let intent = QueryIntent::FetchSelective {
        target_id: 1,
        explicit_ids: vec![],
    };
    let params = build(&intent, &ctx());
    assert_eq!(wire(&params)["domain"][0], json!(["id", "in", []]));
    assert!(params.validate().is_ok());
}

#[test]
fn test_builder_is_deterministic() {
    let intent = incremental(Direction::After, true, Some(7));
    assert_eq!(build(&intent, &ctx()), build(&intent, &ctx()));
}

#[test]
fn test_custom_models() {
    let builder = DomainBuilder::new("mail.message", "discuss.channel");
    let params = builder.build(&QueryIntent::FetchInitial { target_id: 3, limit: 5 }, &ctx());
    assert_eq!(wire(&params)["domain"][0], json!(["model", "=", "discuss.channel"]));
    assert_eq!(params.model, "mail.message");
}

// ---------------------------------------------------------------------------
// Context merge
// ---------------------------------------------------------------------------

#[test]
fn test_context_is_merged_under_reserved_key() {
    let context = ctx().with_extra("allowed_company_ids", json!([1]));
    let value = wire(&build(&QueryIntent::FetchInitial { target_id: 1, limit: 30 }, &context));
    assert_eq!(
        value[CONTEXT_KEY],
        json!({ "lang": "en_US", "tz": "Europe/Brussels", "uid": 2, "allowed_company_ids": [1] })
    );
}

#[test]
fn test_context_never_becomes_a_filter() {
    let params = build(&QueryIntent::FetchInitial { target_id: 1, limit: 30 }, &ctx());
    for clause in &params.domain {
        assert!(!["lang", "tz", "uid", "context"].contains(&clause.field.as_str()));
    }
}

#[test]
fn test_fixed_context_keys_win_over_extras() {
    let context = ctx().with_extra("uid", json!(99));
    let params = build(&QueryIntent::FetchInitial { target_id: 1, limit: 30 }, &context);
    assert_eq!(params.context.get("uid"), Some(&json!(2)));
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn test_every_intent_builds_valid_params() {
    let intents = [
        QueryIntent::FetchInitial { target_id: 1, limit: 30 },
        incremental(Direction::After, true, Some(7)),
        incremental(Direction::Before, false, None),
        QueryIntent::FetchSelective {
            target_id: 1,
            explicit_ids: vec![4],
        },
    ];
    for intent in &intents {
        assert!(build(intent, &ctx()).validate().is_ok(), "{}", intent.name());
    }
}

#[test]
fn test_validate_rejects_empty_domain() {
    let mut params = build(&QueryIntent::FetchInitial { target_id: 1, limit: 30 }, &ctx());
    params.domain = Domain::new();
    assert_eq!(
        params.validate(),
        Err(FilterConstructionError::EmptyDomain {
            model: "mail.message".to_string()
        })
    );
}

#[test]
fn test_validate_rejects_empty_projection() {
    let mut params = build(&QueryIntent::FetchInitial { target_id: 1, limit: 30 }, &ctx());
    params.fields.clear();
    assert!(matches!(
        params.validate(),
        Err(FilterConstructionError::EmptyProjection { .. })
    ));
}

#[test]
fn test_validate_rejects_blank_clause_field() {
    let mut params = build(&QueryIntent::FetchInitial { target_id: 1, limit: 30 }, &ctx());
    params.domain.push(FilterClause::new("", Operator::Eq, 1_i64));
    assert_eq!(
        params.validate(),
        Err(FilterConstructionError::EmptyClauseField { position: 4 })
    );
}

// ---------------------------------------------------------------------------
// Free-form search
// ---------------------------------------------------------------------------

#[test]
fn test_build_search_call_kw_params() {
    let search = MessageSearch::new(
        Domain::new().and(FilterClause::new("body", Operator::ILike, "invoice")),
        &["id", "body", "author_id"],
    )
    .with_limit(20)
    .with_order("id desc");

    let params = DomainBuilder::default().build_search(&search, &ctx());
    assert_eq!(params.method, SEARCH_METHOD);
    assert!(params.validate().is_ok());
    assert_eq!(
        serde_json::to_value(&params).unwrap(),
        json!({
            "model": "mail.message",
            "method": "web_search_read",
            "args": [],
            "kwargs": {
                "domain": [["body", "ilike", "invoice"]],
                "fields": ["id", "body", "author_id"],
                "limit": 20,
                "order": "id desc",
                "context": { "lang": "en_US", "tz": "Europe/Brussels", "uid": 2 }
            }
        })
    );
}

#[test]
fn test_build_search_allows_empty_domain() {
    let search = MessageSearch::new(Domain::new(), &["id"]);
    let params = DomainBuilder::default().build_search(&search, &ctx());
    assert!(params.validate().is_ok());
}

#[test]
fn test_build_search_rejects_empty_projection() {
    let search = MessageSearch::new(Domain::new(), &[]);
    let params = DomainBuilder::default().build_search(&search, &ctx());
    assert!(matches!(
        params.validate(),
        Err(FilterConstructionError::EmptyProjection { .. })
    ));
}
