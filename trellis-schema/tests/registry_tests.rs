use trellis_schema::{Cardinality, EntityType, RelationOp, Registry, SchemaError};

// ── Bootstrap & lookup ───────────────────────────────────────────

#[test]
fn bootstrap_registers_every_type() {
    let registry = Registry::bootstrap();
    for ty in EntityType::ALL {
        // describe() is total over the closed enum.
        assert_eq!(registry.describe(*ty).entity_type, *ty);
    }
    assert_eq!(registry.iter().count(), EntityType::ALL.len());
}

#[test]
fn describe_name_resolves_wire_names() {
    let registry = Registry::bootstrap();
    let desc = registry.describe_name("routine_version").unwrap();
    assert_eq!(desc.entity_type, EntityType::RoutineVersion);
}

#[test]
fn describe_name_rejects_unknown_types() {
    let registry = Registry::bootstrap();
    let err = registry.describe_name("widget").unwrap_err();
    assert!(matches!(err, SchemaError::UnknownEntityType(name) if name == "widget"));
}

#[test]
fn descriptors_serialize_for_diagnostics() {
    // Descriptors are built in code only; they serialize (for logs and
    // debug dumps) but are never read back in.
    let registry = Registry::bootstrap();
    let json = serde_json::to_value(registry.describe(EntityType::RoutineVersion)).unwrap();
    assert_eq!(json["entity_type"], "routine_version");
    assert_eq!(json["relations"][0]["name"], "root");
    assert_eq!(json["delegates_to"]["parent"], "routine");
}

// ── Structural catalogue rules ───────────────────────────────────

#[test]
fn back_references_point_at_real_relations() {
    let registry = Registry::bootstrap();
    for desc in registry.iter() {
        for rel in &desc.relations {
            if let Some(back) = rel.parent_back_reference {
                let target = registry.describe(rel.target);
                let inverse = target
                    .relation(back)
                    .unwrap_or_else(|| panic!("{}.{} back-reference missing", desc.entity_type, rel.name));
                assert_eq!(inverse.target, desc.entity_type);
            }
        }
    }
}

#[test]
fn delegation_chains_terminate_at_owning_types() {
    let registry = Registry::bootstrap();
    for desc in registry.iter() {
        let mut cursor = desc.delegates_to;
        let mut hops = 0;
        while let Some(delegation) = cursor {
            cursor = registry.describe(delegation.parent).delegates_to;
            hops += 1;
            assert!(hops <= EntityType::ALL.len(), "cycle at {}", desc.entity_type);
        }
    }
}

#[test]
fn versioned_types_carry_weight_scalars() {
    let registry = Registry::bootstrap();
    let version = registry.describe(EntityType::RoutineVersion);
    assert!(version.is_versioned);
    assert!(version.scalar("simplicity").is_some());
    assert!(version.scalar("complexity").is_some());
}

// ── Catalogue spot checks ────────────────────────────────────────

#[test]
fn routine_version_delegates_through_root() {
    let registry = Registry::bootstrap();
    let version = registry.describe(EntityType::RoutineVersion);

    let delegation = version.delegates_to.expect("versions delegate ownership");
    assert_eq!(delegation.parent, EntityType::Routine);
    assert_eq!(delegation.parent_field, "/root_id");

    let root = version.relation("root").unwrap();
    assert!(root.required);
    assert_eq!(root.cardinality, Cardinality::OneToOne);
    assert_eq!(root.parent_back_reference, Some("versions"));
    assert!(root.allowed_ops.allows(RelationOp::Connect));
    assert!(root.allowed_ops.allows(RelationOp::Create));
    assert!(!root.allowed_ops.allows(RelationOp::Delete));
}

#[test]
fn subroutine_relation_has_no_back_reference() {
    let registry = Registry::bootstrap();
    let step = registry.describe(EntityType::RoutineStep);
    let sub = step.relation("subroutine").unwrap();
    assert_eq!(sub.target, EntityType::RoutineVersion);
    assert_eq!(sub.parent_back_reference, None);
    assert!(sub.allowed_ops.allows(RelationOp::Connect));
    assert!(sub.allowed_ops.allows(RelationOp::Disconnect));
    assert!(!sub.allowed_ops.allows(RelationOp::Create));
}

#[test]
fn run_steps_cannot_be_deleted() {
    let registry = Registry::bootstrap();
    let run = registry.describe(EntityType::Run);
    let steps = run.relation("steps").unwrap();
    assert!(steps.allowed_ops.allows(RelationOp::Create));
    assert!(steps.allowed_ops.allows(RelationOp::Update));
    assert!(!steps.allowed_ops.allows(RelationOp::Delete));
}

#[test]
fn system_minted_types_have_zero_quota() {
    let registry = Registry::bootstrap();
    for ty in [EntityType::User, EntityType::Payment, EntityType::SiteStats] {
        assert_eq!(registry.describe(ty).max_objects, 0, "{ty} must not be creatable");
    }
}

#[test]
fn only_routines_are_transferable() {
    let registry = Registry::bootstrap();
    for desc in registry.iter() {
        assert_eq!(
            desc.is_transferable,
            desc.entity_type == EntityType::Routine,
            "{}",
            desc.entity_type,
        );
    }
}
