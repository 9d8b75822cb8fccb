use serde_json::json;
use trellis_access::{ensure_owner, resolve_owner, AccessError, ParentRows};
use trellis_schema::{EntityType, Registry};
use trellis_types::{Caller, OrgId, OwnerRef, Row, RowId, UserId};

fn row(entity_type: EntityType, data: serde_json::Value) -> Row {
    Row {
        id: RowId::new(),
        entity_type: entity_type.as_str().to_string(),
        data,
        created_at: 0,
        updated_at: 0,
    }
}

// ── Direct ownership ─────────────────────────────────────────────

#[test]
fn owner_columns_resolve_directly() {
    let registry = Registry::bootstrap();
    let user = UserId::new();
    let run = row(EntityType::Run, json!({"owned_by_user": user.to_string()}));
    let owner = resolve_owner(&registry, EntityType::Run, &run, &ParentRows::new());
    assert_eq!(owner, OwnerRef::User(user));
}

#[test]
fn organization_column_resolves_when_no_user_owns() {
    let registry = Registry::bootstrap();
    let org = OrgId::new();
    let list = row(
        EntityType::BookmarkList,
        json!({"owned_by_organization": org.to_string()}),
    );
    let owner = resolve_owner(&registry, EntityType::BookmarkList, &list, &ParentRows::new());
    assert_eq!(owner, OwnerRef::Organization(org));
}

#[test]
fn principals_own_themselves() {
    let registry = Registry::bootstrap();
    let user_row = row(EntityType::User, json!({"handle": "ada"}));
    let owner = resolve_owner(&registry, EntityType::User, &user_row, &ParentRows::new());
    assert_eq!(owner, OwnerRef::User(UserId::from_uuid(user_row.id.as_uuid())));
}

#[test]
fn unowned_rows_resolve_to_none() {
    let registry = Registry::bootstrap();
    let tag = row(EntityType::Tag, json!({"tag": "fitness"}));
    assert!(resolve_owner(&registry, EntityType::Tag, &tag, &ParentRows::new()).is_none());
}

// ── Delegation ───────────────────────────────────────────────────

#[test]
fn run_step_owner_equals_its_runs_owner() {
    let registry = Registry::bootstrap();
    let user = UserId::new();
    let run = row(EntityType::Run, json!({"owned_by_user": user.to_string()}));
    let step = row(EntityType::RunStep, json!({"run_id": run.id.to_string()}));

    let parents: ParentRows = [run.clone()].into_iter().collect();
    let step_owner = resolve_owner(&registry, EntityType::RunStep, &step, &parents);
    let run_owner = resolve_owner(&registry, EntityType::Run, &run, &parents);
    assert_eq!(step_owner, run_owner);
    assert_eq!(step_owner, OwnerRef::User(user));
}

#[test]
fn delegation_walks_two_levels() {
    // translation -> routine version -> routine, which carries the owner.
    let registry = Registry::bootstrap();
    let user = UserId::new();
    let routine = row(EntityType::Routine, json!({"owned_by_user": user.to_string()}));
    let version = row(
        EntityType::RoutineVersion,
        json!({"root_id": routine.id.to_string()}),
    );
    let translation = row(
        EntityType::RoutineVersionTranslation,
        json!({"parent_id": version.id.to_string(), "language": "en"}),
    );

    let parents: ParentRows = [routine, version].into_iter().collect();
    let owner = resolve_owner(
        &registry,
        EntityType::RoutineVersionTranslation,
        &translation,
        &parents,
    );
    assert_eq!(owner, OwnerRef::User(user));
}

#[test]
fn missing_parent_resolves_to_none() {
    let registry = Registry::bootstrap();
    let step = row(EntityType::RunStep, json!({"run_id": RowId::new().to_string()}));
    let owner = resolve_owner(&registry, EntityType::RunStep, &step, &ParentRows::new());
    assert!(owner.is_none());
}

// ── Owner gate ───────────────────────────────────────────────────

#[test]
fn ensure_owner_accepts_the_owning_caller() {
    let user = UserId::new();
    let caller = Caller::new(user, "en");
    assert!(ensure_owner(EntityType::Run, OwnerRef::User(user), &caller).is_ok());
}

#[test]
fn ensure_owner_rejects_everyone_else() {
    let caller = Caller::new(UserId::new(), "en");
    for owner in [
        OwnerRef::None,
        OwnerRef::User(UserId::new()),
        OwnerRef::Organization(OrgId::new()),
    ] {
        let err = ensure_owner(EntityType::Routine, owner, &caller).unwrap_err();
        assert!(matches!(
            err,
            AccessError::PermissionDenied {
                entity_type: EntityType::Routine,
            }
        ));
    }
}
