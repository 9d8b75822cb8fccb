use std::collections::BTreeMap;
use trellis_schema::{EntityType, Registry};
use trellis_types::{OrgId, OwnerRef, Row, RowId, UserId};

/// Rows already fetched by the storage collaborator, keyed by id.
///
/// Ownership resolution for delegating types walks parent references
/// through this map and never fetches anything itself.
#[derive(Debug, Clone, Default)]
pub struct ParentRows(BTreeMap<RowId, Row>);

impl ParentRows {
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, row: Row) {
        self.0.insert(row.id, row);
    }

    #[must_use]
    pub fn get(&self, id: &RowId) -> Option<&Row> {
        self.0.get(id)
    }
}

impl FromIterator<Row> for ParentRows {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self(iter.into_iter().map(|r| (r.id, r)).collect())
    }
}

/// Resolves the owning principal of a stored row.
///
/// Types declaring `delegates_to` resolve through their parent row,
/// verbatim: the dependent type's owner *is* the parent type's owner. A
/// parent row missing from `parents` resolves to [`OwnerRef::None`] rather
/// than guessing.
#[must_use]
pub fn resolve_owner(
    registry: &Registry,
    entity_type: EntityType,
    row: &Row,
    parents: &ParentRows,
) -> OwnerRef {
    let descriptor = registry.describe(entity_type);
    if let Some(delegation) = descriptor.delegates_to {
        return match row.get_id(delegation.parent_field).and_then(|id| parents.get(&id)) {
            Some(parent) => resolve_owner(registry, delegation.parent, parent, parents),
            None => OwnerRef::None,
        };
    }
    match entity_type {
        // Principals own themselves.
        EntityType::User => OwnerRef::User(UserId::from_uuid(row.id.as_uuid())),
        EntityType::Organization => OwnerRef::Organization(OrgId::from_uuid(row.id.as_uuid())),
        _ => direct_owner(row),
    }
}

/// Reads the owner columns off a non-delegating, non-principal row.
fn direct_owner(row: &Row) -> OwnerRef {
    if let Some(user) = row.get_str("/owned_by_user").and_then(|s| UserId::parse(s).ok()) {
        return OwnerRef::User(user);
    }
    if let Some(org) = row
        .get_str("/owned_by_organization")
        .and_then(|s| OrgId::parse(s).ok())
    {
        return OwnerRef::Organization(org);
    }
    OwnerRef::None
}
