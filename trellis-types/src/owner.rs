use crate::{OrgId, UserId};
use serde::{Deserialize, Serialize};

/// A discriminated reference to the principal owning a stored row.
///
/// Entities with no owner at all (global stats, the public tag vocabulary)
/// resolve to [`OwnerRef::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum OwnerRef {
    None,
    User(UserId),
    Organization(OrgId),
}

impl OwnerRef {
    /// True when the row is owned by exactly this user.
    #[must_use]
    pub fn is_user(&self, user_id: UserId) -> bool {
        matches!(self, OwnerRef::User(id) if *id == user_id)
    }

    /// True when no principal owns the row.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, OwnerRef::None)
    }
}
