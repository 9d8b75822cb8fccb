use crate::EntityType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five nested write operations a relation payload may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationOp {
    Connect,
    Create,
    Update,
    Delete,
    Disconnect,
}

impl RelationOp {
    /// Every operation, in payload-key order.
    pub const ALL: &'static [RelationOp] = &[
        RelationOp::Connect,
        RelationOp::Create,
        RelationOp::Update,
        RelationOp::Delete,
        RelationOp::Disconnect,
    ];

    /// The payload key carrying this operation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            RelationOp::Connect => "connect",
            RelationOp::Create => "create",
            RelationOp::Update => "update",
            RelationOp::Delete => "delete",
            RelationOp::Disconnect => "disconnect",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            RelationOp::Connect => 1 << 0,
            RelationOp::Create => 1 << 1,
            RelationOp::Update => 1 << 2,
            RelationOp::Delete => 1 << 3,
            RelationOp::Disconnect => 1 << 4,
        }
    }
}

impl fmt::Display for RelationOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of operations a relation allows, declared on its [`RelationSpec`].
///
/// Built in const context: `RelationOps::NONE.with(Connect).with(Create)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationOps(u8);

impl RelationOps {
    /// No operations allowed.
    pub const NONE: RelationOps = RelationOps(0);

    /// The full operation set.
    pub const ALL: RelationOps = RelationOps(0b1_1111);

    /// Adds one operation to the set.
    #[must_use]
    pub const fn with(self, op: RelationOp) -> Self {
        RelationOps(self.0 | op.bit())
    }

    /// True when the set contains `op`.
    #[must_use]
    pub const fn allows(&self, op: RelationOp) -> bool {
        self.0 & op.bit() != 0
    }

    /// Iterates the operations in the set, in payload-key order.
    pub fn iter(&self) -> impl Iterator<Item = RelationOp> + '_ {
        RelationOp::ALL.iter().copied().filter(|op| self.allows(*op))
    }
}

/// Whether a relation points at one row or an ordered sequence of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    OneToOne,
    OneToMany,
}

/// A named edge from one entity type to another.
#[derive(Debug, Clone, Serialize)]
pub struct RelationSpec {
    /// The relation name as it appears in payloads and plans.
    pub name: &'static str,
    pub target: EntityType,
    pub cardinality: Cardinality,
    pub allowed_ops: RelationOps,
    /// A required relation must resolve to a target (connect or create)
    /// when the parent entity is created.
    pub required: bool,
    /// The inverse relation name on the target type. When the compiler
    /// recurses into the target it skips this relation, so a child never
    /// re-shapes the parent it was reached from.
    pub parent_back_reference: Option<&'static str>,
}

impl RelationSpec {
    #[must_use]
    pub const fn new(
        name: &'static str,
        target: EntityType,
        cardinality: Cardinality,
        allowed_ops: RelationOps,
    ) -> Self {
        Self {
            name,
            target,
            cardinality,
            allowed_ops,
            required: false,
            parent_back_reference: None,
        }
    }

    /// Marks the relation as required on create.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Names the inverse relation on the target type.
    #[must_use]
    pub const fn back_reference(mut self, name: &'static str) -> Self {
        self.parent_back_reference = Some(name);
        self
    }
}

/// A scalar field on an entity type.
#[derive(Debug, Clone, Serialize)]
pub struct ScalarField {
    pub name: &'static str,
    /// Applies the named `empty_string_to_null` normalizer during shaping.
    /// Every other scalar is copied verbatim.
    pub empty_to_null: bool,
}

impl ScalarField {
    /// A scalar copied verbatim.
    #[must_use]
    pub const fn plain(name: &'static str) -> Self {
        Self {
            name,
            empty_to_null: false,
        }
    }

    /// A text scalar where an empty string is normalized to null.
    #[must_use]
    pub const fn nullable_text(name: &'static str) -> Self {
        Self {
            name,
            empty_to_null: true,
        }
    }
}

/// Ownership delegation: this type carries no owner of its own and resolves
/// ownership through the parent row referenced by `parent_field`.
///
/// The typed replacement for re-deriving ownership at each call site:
/// dependent types delegate verbatim to their parent's resolver.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Delegation {
    pub parent: EntityType,
    /// JSON pointer into the row's data holding the parent row id.
    pub parent_field: &'static str,
}

/// Everything the engine knows about one entity type.
///
/// Created once at bootstrap; immutable for the process lifetime.
#[derive(Debug, Clone, Serialize)]
pub struct EntityDescriptor {
    pub entity_type: EntityType,
    pub relations: Vec<RelationSpec>,
    pub scalar_fields: Vec<ScalarField>,
    /// Versioned types take part in the weight pre-pass.
    pub is_versioned: bool,
    /// Transferable types may move between owning principals.
    pub is_transferable: bool,
    /// Static quota; 0 means the type is never creatable directly.
    pub max_objects: u32,
    pub delegates_to: Option<Delegation>,
}

impl EntityDescriptor {
    /// Finds a relation by name.
    #[must_use]
    pub fn relation(&self, name: &str) -> Option<&RelationSpec> {
        self.relations.iter().find(|r| r.name == name)
    }

    /// Finds a scalar field by name.
    #[must_use]
    pub fn scalar(&self, name: &str) -> Option<&ScalarField> {
        self.scalar_fields.iter().find(|f| f.name == name)
    }
}
