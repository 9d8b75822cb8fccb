use serde_json::json;
use trellis_access::{ParentRows, Predicate};
use trellis_types::{Row, RowId};

fn row(data: serde_json::Value) -> Row {
    Row {
        id: RowId::new(),
        entity_type: "routine".to_string(),
        data,
        created_at: 1_000,
        updated_at: 2_000,
    }
}

// ── Combinators ──────────────────────────────────────────────────

#[test]
fn and_absorbs_all() {
    let pred = Predicate::All.and(Predicate::eq("/x", 1));
    assert_eq!(pred, Predicate::eq("/x", 1));
    let pred = Predicate::eq("/x", 1).and(Predicate::All);
    assert_eq!(pred, Predicate::eq("/x", 1));
}

#[test]
fn or_absorbs_never() {
    let pred = Predicate::Never.or(Predicate::eq("/x", 1));
    assert_eq!(pred, Predicate::eq("/x", 1));
}

#[test]
fn chained_ands_flatten() {
    let pred = Predicate::eq("/a", 1)
        .and(Predicate::eq("/b", 2))
        .and(Predicate::eq("/c", 3));
    match pred {
        Predicate::And { all } => assert_eq!(all.len(), 3),
        other => panic!("expected flat conjunction, got {other:?}"),
    }
}

// ── Field fragments ──────────────────────────────────────────────

#[test]
fn eq_treats_missing_fields_as_null() {
    let pred = Predicate::Eq {
        field: "/gone".to_string(),
        value: serde_json::Value::Null,
    };
    assert!(pred.matches(&row(json!({})), &ParentRows::new()));
}

#[test]
fn numeric_bounds() {
    let r = row(json!({"complexity": 5}));
    let parents = ParentRows::new();
    assert!(Predicate::Gte { field: "/complexity".into(), value: 5.0 }.matches(&r, &parents));
    assert!(!Predicate::Gte { field: "/complexity".into(), value: 6.0 }.matches(&r, &parents));
    assert!(Predicate::Lte { field: "/complexity".into(), value: 5.0 }.matches(&r, &parents));
    assert!(!Predicate::Lte { field: "/missing".into(), value: 5.0 }.matches(&r, &parents));
}

#[test]
fn text_contains_is_case_insensitive() {
    let r = row(json!({"search_text": "Morning Routine"}));
    let parents = ParentRows::new();
    let pred = Predicate::TextContains {
        field: "/search_text".to_string(),
        term: "ROUTINE".to_string(),
    };
    assert!(pred.matches(&r, &parents));
}

#[test]
fn array_contains_matches_string_members() {
    let r = row(json!({"tags": ["Fitness", "morning"]}));
    let parents = ParentRows::new();
    let pred = Predicate::ArrayContains {
        field: "/tags".to_string(),
        value: json!("fitness"),
    };
    assert!(pred.matches(&r, &parents));

    let miss = Predicate::ArrayContains {
        field: "/tags".to_string(),
        value: json!("evening"),
    };
    assert!(!miss.matches(&r, &parents));
}

#[test]
fn time_window_bounds_are_inclusive() {
    let r = row(json!({}));
    let parents = ParentRows::new();
    // created_at = 1_000, updated_at = 2_000; rows on the bound match.
    assert!(Predicate::CreatedWithin { after: Some(1_000), before: None }.matches(&r, &parents));
    assert!(Predicate::CreatedWithin { after: Some(500), before: None }.matches(&r, &parents));
    assert!(!Predicate::CreatedWithin { after: Some(1_500), before: None }.matches(&r, &parents));
    assert!(Predicate::UpdatedWithin { after: None, before: Some(2_000) }.matches(&r, &parents));
    assert!(!Predicate::UpdatedWithin { after: None, before: Some(1_999) }.matches(&r, &parents));
}

#[test]
fn unresolvable_parent_matches_nothing() {
    let r = row(json!({"run_id": RowId::new().to_string()}));
    let pred = Predicate::Parent {
        field: "/run_id".to_string(),
        of: trellis_schema::EntityType::Run,
        inner: Box::new(Predicate::All),
    };
    assert!(!pred.matches(&r, &ParentRows::new()));
}
