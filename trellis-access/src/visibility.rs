use crate::{AccessError, AccessResult, Predicate};
use trellis_schema::{EntityType, Registry};
use trellis_types::{Caller, OwnerRef, Row, UserId};

/// The three named visibility scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Private,
    Public,
    Owner(UserId),
}

/// Builds the visibility predicate for an entity type and scope.
///
/// Delegating types produce a parent fragment wrapping the parent type's
/// predicate — the delegation is structural, so a run step's owner
/// predicate is by construction its run's owner predicate.
#[must_use]
pub fn visibility(registry: &Registry, entity_type: EntityType, scope: Scope) -> Predicate {
    let descriptor = registry.describe(entity_type);
    if let Some(delegation) = descriptor.delegates_to {
        return Predicate::Parent {
            field: delegation.parent_field.to_string(),
            of: delegation.parent,
            inner: Box::new(visibility(registry, delegation.parent, scope)),
        };
    }
    match scope {
        Scope::Private => Predicate::eq("/is_private", true),
        Scope::Public => Predicate::eq("/is_private", false).and(not_deleted()),
        Scope::Owner(user_id) => owner_predicate(entity_type, user_id),
    }
}

fn not_deleted() -> Predicate {
    // Rows never touched by a delete carry no flag at all.
    Predicate::eq("/is_deleted", false).or(Predicate::Eq {
        field: "/is_deleted".to_string(),
        value: serde_json::Value::Null,
    })
}

fn owner_predicate(entity_type: EntityType, user_id: UserId) -> Predicate {
    match entity_type {
        EntityType::User => Predicate::IdIs {
            id: trellis_types::RowId::from_uuid(user_id.as_uuid()),
        },
        // An organization's owner is the organization itself, never a user.
        EntityType::Organization => Predicate::Never,
        // No principal owns global vocabulary or stats.
        EntityType::Tag | EntityType::SiteStats => Predicate::Never,
        _ => Predicate::eq("/owned_by_user", user_id.to_string()),
    }
}

/// Pure predicate over already-fetched fields: is the row publicly visible?
#[must_use]
pub fn is_public(row: &Row) -> bool {
    row.get_bool("/is_private") == Some(false) && !is_deleted(row)
}

/// Pure predicate over already-fetched fields: is the row soft-deleted?
#[must_use]
pub fn is_deleted(row: &Row) -> bool {
    row.get_bool("/is_deleted").unwrap_or(false)
}

/// Fails with `PermissionDenied` unless the resolved owner is the caller.
pub fn ensure_owner(
    entity_type: EntityType,
    owner: OwnerRef,
    caller: &Caller,
) -> AccessResult<()> {
    if owner.is_user(caller.user_id) {
        Ok(())
    } else {
        Err(AccessError::PermissionDenied { entity_type })
    }
}
