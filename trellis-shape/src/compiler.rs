//! The relation shape compiler.
//!
//! One entry point per write kind ([`shape_create`], [`shape_update`]) plus
//! the per-relation contract ([`shape_relation`]). Every rule is checked
//! during construction: an error at any depth aborts the whole call and no
//! plan is produced.

use crate::translations;
use crate::{PlanOp, RelationWrite, ShapeContext, ShapeError, ShapePayload, ShapeResult, WritePlan};
use serde_json::{Map, Value};
use tracing::debug;
use trellis_schema::{Cardinality, RelationOp, RelationSpec, Registry};
use trellis_schema::EntityType;
use trellis_types::RowId;

/// Relation name reserved for language-tagged text sub-records; payloads
/// under this name go through the translation shaper.
const TRANSLATIONS: &str = "translations";

/// Shapes a top-level create payload into a write plan.
pub fn shape_create(
    registry: &Registry,
    entity_type: EntityType,
    payload: &Value,
    ctx: &ShapeContext,
) -> ShapeResult<WritePlan> {
    let obj = entity_object(payload)?;
    let id = payload_id(obj)?.unwrap_or_default();
    let plan = shape_entity(registry, entity_type, id, PlanOp::Create, obj, None, ctx)?;
    debug!(entity = %entity_type, nodes = plan.node_count(), "shaped create plan");
    Ok(plan)
}

/// Shapes a top-level update payload for an existing row into a write plan.
pub fn shape_update(
    registry: &Registry,
    entity_type: EntityType,
    id: RowId,
    payload: &Value,
    ctx: &ShapeContext,
) -> ShapeResult<WritePlan> {
    let obj = entity_object(payload)?;
    let plan = shape_entity(registry, entity_type, id, PlanOp::Update, obj, None, ctx)?;
    debug!(entity = %entity_type, %id, nodes = plan.node_count(), "shaped update plan");
    Ok(plan)
}

/// Shapes one relation's payload into a [`RelationWrite`].
///
/// `parent_type` is the type carrying the relation, used for error context.
/// Checks, in order: the operation whitelist, one-to-one target ambiguity,
/// required-target resolution; then recurses into nested creates and
/// updates, excluding the relation named by `spec.parent_back_reference`.
pub fn shape_relation(
    registry: &Registry,
    parent_type: EntityType,
    spec: &RelationSpec,
    payload: &ShapePayload,
    ctx: &ShapeContext,
) -> ShapeResult<RelationWrite> {
    check_allowed_ops(parent_type, spec, payload)?;

    if spec.cardinality == Cardinality::OneToOne {
        // A single target only: multiple connects, or a connect combined
        // with a create, both leave the target ambiguous.
        if payload.connect.len() + payload.create.len() > 1 {
            return Err(ShapeError::AmbiguousRelationTarget {
                entity_type: parent_type,
                relation: spec.name.to_string(),
            });
        }
    }

    if spec.required
        && payload.connect.is_empty()
        && payload.create.is_empty()
        && payload.update.is_empty()
    {
        // Only delete/disconnect were supplied, which would leave a
        // required relation without a target.
        return Err(ShapeError::RequiredRelationMissing {
            entity_type: parent_type,
            relation: spec.name.to_string(),
        });
    }

    let mut write = RelationWrite::empty(spec.name, spec.target);
    write.connect = payload.connect.clone();
    write.deletes = payload.delete.clone();
    write.disconnects = payload.disconnect.clone();

    for create in &payload.create {
        // Creates may carry a client-generated id; this is how weight-map
        // entries line up with the versions being created in the batch.
        let id = payload_id(create)?.unwrap_or_default();
        write.creates.push(shape_entity(
            registry,
            spec.target,
            id,
            PlanOp::Create,
            create,
            spec.parent_back_reference,
            ctx,
        )?);
    }
    for (id, data) in &payload.update {
        write.updates.push(shape_entity(
            registry,
            spec.target,
            *id,
            PlanOp::Update,
            data,
            spec.parent_back_reference,
            ctx,
        )?);
    }
    Ok(write)
}

/// Shapes one entity level: scalars verbatim (modulo the named
/// empty-string-to-null normalizer), relations recursively.
///
/// `exclude` names the relation this entity was reached from; it is never
/// descended into and never counted as missing.
pub(crate) fn shape_entity(
    registry: &Registry,
    entity_type: EntityType,
    id: RowId,
    op: PlanOp,
    payload: &Map<String, Value>,
    exclude: Option<&str>,
    ctx: &ShapeContext,
) -> ShapeResult<WritePlan> {
    let descriptor = registry.describe(entity_type);
    let mut plan = WritePlan {
        id,
        entity_type,
        op,
        scalars: Map::new(),
        relations: Vec::new(),
        refresh_search_index: false,
    };

    for (key, value) in payload {
        if key == "id" {
            // Already consumed when the plan node's id was chosen.
            continue;
        }
        if Some(key.as_str()) == exclude {
            // The parent supplied this edge implicitly; re-shaping it here
            // would re-traverse the graph upward.
            continue;
        }
        if let Some(rel) = descriptor.relation(key) {
            let rel_payload = ShapePayload::from_value(value)?;
            if rel_payload.is_empty() {
                continue;
            }
            if rel.name == TRANSLATIONS {
                let (write, refresh) =
                    translations::shape(registry, entity_type, rel, &rel_payload, ctx)?;
                plan.refresh_search_index |= refresh;
                plan.relations.push(write);
            } else {
                plan.relations
                    .push(shape_relation(registry, entity_type, rel, &rel_payload, ctx)?);
            }
        } else if let Some(scalar) = descriptor.scalar(key) {
            let value = if scalar.empty_to_null && value.as_str() == Some("") {
                Value::Null
            } else {
                value.clone()
            };
            plan.scalars.insert(key.clone(), value);
        } else {
            return Err(ShapeError::UnknownField {
                entity_type,
                field: key.clone(),
            });
        }
    }

    if op == PlanOp::Create {
        for rel in &descriptor.relations {
            if !rel.required || Some(rel.name) == exclude {
                continue;
            }
            let resolved = plan
                .relation(rel.name)
                .is_some_and(|w| !w.connect.is_empty() || !w.creates.is_empty());
            if !resolved {
                return Err(ShapeError::RequiredRelationMissing {
                    entity_type,
                    relation: rel.name.to_string(),
                });
            }
        }
    }

    if descriptor.is_versioned {
        // Weight scalars come from the frozen batch pre-pass, never from
        // the caller payload. Absent entries default to zero.
        let weights = ctx.weights().get_or_default(&id);
        plan.scalars
            .insert("simplicity".into(), weights.simplicity.into());
        plan.scalars
            .insert("complexity".into(), weights.complexity.into());
    }

    Ok(plan)
}

pub(crate) fn check_allowed_ops(
    parent_type: EntityType,
    spec: &RelationSpec,
    payload: &ShapePayload,
) -> ShapeResult<()> {
    let present = [
        (RelationOp::Connect, !payload.connect.is_empty()),
        (RelationOp::Create, !payload.create.is_empty()),
        (RelationOp::Update, !payload.update.is_empty()),
        (RelationOp::Delete, !payload.delete.is_empty()),
        (RelationOp::Disconnect, !payload.disconnect.is_empty()),
    ];
    for (op, used) in present {
        if used && !spec.allowed_ops.allows(op) {
            return Err(ShapeError::InvalidRelationOperation {
                entity_type: parent_type,
                relation: spec.name.to_string(),
                op,
            });
        }
    }
    Ok(())
}

/// Reads an optional client-generated id off an entity payload.
fn payload_id(payload: &Map<String, Value>) -> ShapeResult<Option<RowId>> {
    match payload.get("id") {
        None | Some(Value::Null) => Ok(None),
        Some(value) => {
            let id = value
                .as_str()
                .and_then(|s| RowId::parse(s).ok())
                .ok_or_else(|| ShapeError::MalformedPayload("id must be a row id".into()))?;
            Ok(Some(id))
        }
    }
}

fn entity_object(payload: &Value) -> ShapeResult<&Map<String, Value>> {
    payload
        .as_object()
        .ok_or_else(|| ShapeError::MalformedPayload("entity payload must be an object".into()))
}
