use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use trellis_schema::{EntityType, RelationOp};
use trellis_types::RowId;

/// Whether a plan node creates a new row or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanOp {
    Create,
    Update,
}

/// A validated nested write plan for one entity, mirroring the payload
/// shape. The storage driver executes the whole tree as one transaction;
/// the plan itself performs no I/O and is immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritePlan {
    /// New id for creates, the existing id for updates.
    pub id: RowId,
    pub entity_type: EntityType,
    pub op: PlanOp,
    /// Scalar fields to write, already normalized.
    pub scalars: Map<String, Value>,
    pub relations: Vec<RelationWrite>,
    /// Set when any translation text changed; consumed by the external
    /// search-indexing collaborator.
    pub refresh_search_index: bool,
}

impl WritePlan {
    /// Finds a relation write by name.
    #[must_use]
    pub fn relation(&self, name: &str) -> Option<&RelationWrite> {
        self.relations.iter().find(|r| r.relation == name)
    }

    /// Total number of plan nodes in the tree, this node included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self
            .relations
            .iter()
            .map(|r| {
                r.creates.iter().map(WritePlan::node_count).sum::<usize>()
                    + r.updates.iter().map(WritePlan::node_count).sum::<usize>()
            })
            .sum::<usize>()
    }
}

/// The shaped form of one relation inside a [`WritePlan`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationWrite {
    pub relation: String,
    pub target: EntityType,
    pub connect: Vec<RowId>,
    pub creates: Vec<WritePlan>,
    pub updates: Vec<WritePlan>,
    pub deletes: Vec<RowId>,
    pub disconnects: Vec<RowId>,
}

impl RelationWrite {
    #[must_use]
    pub fn empty(relation: &str, target: EntityType) -> Self {
        Self {
            relation: relation.to_string(),
            target,
            connect: Vec::new(),
            creates: Vec::new(),
            updates: Vec::new(),
            deletes: Vec::new(),
            disconnects: Vec::new(),
        }
    }

    /// The operations actually present in this write, in payload-key order.
    /// Always a subset of the relation's allowed operation set.
    #[must_use]
    pub fn ops_present(&self) -> Vec<RelationOp> {
        let mut ops = Vec::new();
        if !self.connect.is_empty() {
            ops.push(RelationOp::Connect);
        }
        if !self.creates.is_empty() {
            ops.push(RelationOp::Create);
        }
        if !self.updates.is_empty() {
            ops.push(RelationOp::Update);
        }
        if !self.deletes.is_empty() {
            ops.push(RelationOp::Delete);
        }
        if !self.disconnects.is_empty() {
            ops.push(RelationOp::Disconnect);
        }
        ops
    }

    /// True when the write carries no operation at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops_present().is_empty()
    }
}
