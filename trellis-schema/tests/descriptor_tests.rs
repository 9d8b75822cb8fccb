use trellis_schema::{EntityType, RelationOp, RelationOps};

// ── Entity type names ────────────────────────────────────────────

#[test]
fn entity_type_names_roundtrip() {
    for ty in EntityType::ALL {
        assert_eq!(EntityType::parse(ty.as_str()), Some(*ty));
    }
}

#[test]
fn parse_is_exact_match_only() {
    assert_eq!(EntityType::parse("Routine"), None);
    assert_eq!(EntityType::parse("routine "), None);
    assert_eq!(EntityType::parse(""), None);
}

#[test]
fn display_matches_wire_name() {
    assert_eq!(EntityType::RoutineVersionTranslation.to_string(), "routine_version_translation");
}

// ── Operation sets ───────────────────────────────────────────────

#[test]
fn empty_set_allows_nothing() {
    for op in RelationOp::ALL {
        assert!(!RelationOps::NONE.allows(*op));
        assert!(RelationOps::ALL.allows(*op));
    }
}

#[test]
fn with_is_additive() {
    let ops = RelationOps::NONE
        .with(RelationOp::Connect)
        .with(RelationOp::Delete);
    assert!(ops.allows(RelationOp::Connect));
    assert!(ops.allows(RelationOp::Delete));
    assert!(!ops.allows(RelationOp::Create));
    assert!(!ops.allows(RelationOp::Update));
    assert!(!ops.allows(RelationOp::Disconnect));
}

#[test]
fn iter_yields_payload_key_order() {
    let ops = RelationOps::NONE
        .with(RelationOp::Disconnect)
        .with(RelationOp::Connect)
        .with(RelationOp::Update);
    let keys: Vec<&str> = ops.iter().map(|op| op.as_str()).collect();
    assert_eq!(keys, vec!["connect", "update", "disconnect"]);
}
