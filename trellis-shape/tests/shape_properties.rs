use proptest::prelude::*;
use serde_json::{json, Map, Value};
use trellis_shape::{shape_create, shape_relation, ShapeContext, ShapeError, ShapePayload};
use trellis_schema::{EntityType, Registry};
use trellis_types::{Caller, RowId, UserId};

fn ctx() -> ShapeContext {
    ShapeContext::new(Caller::new(UserId::new(), "en"))
}

fn ids(n: usize) -> Vec<RowId> {
    (0..n).map(|_| RowId::new()).collect()
}

fn step_create(index: usize) -> Map<String, Value> {
    json!({"index": index, "status": "pending"})
        .as_object()
        .cloned()
        .unwrap()
}

proptest! {
    // Every operation present in a shaped relation write is allowed by the
    // relation's declared operation set; a disallowed one always errors.
    #[test]
    fn shaped_ops_stay_within_the_allowed_set(
        connect in 0usize..3,
        create in 0usize..3,
        update in 0usize..3,
        delete in 0usize..3,
        disconnect in 0usize..3,
    ) {
        let registry = Registry::bootstrap();
        let spec = registry
            .describe(EntityType::Run)
            .relation("steps")
            .unwrap()
            .clone();
        let payload = ShapePayload {
            connect: ids(connect),
            create: (0..create).map(step_create).collect(),
            update: ids(update).into_iter().map(|id| (id, step_create(0))).collect(),
            delete: ids(delete),
            disconnect: ids(disconnect),
        };

        match shape_relation(&registry, EntityType::Run, &spec, &payload, &ctx()) {
            Ok(write) => {
                for op in write.ops_present() {
                    prop_assert!(spec.allowed_ops.allows(op));
                }
            }
            Err(ShapeError::InvalidRelationOperation { op, .. }) => {
                prop_assert!(!spec.allowed_ops.allows(op));
            }
            Err(ShapeError::AmbiguousRelationTarget { .. }) => {
                prop_assert!(connect + create > 1);
            }
            Err(e) => prop_assert!(false, "unexpected error: {e}"),
        }
    }

    // A required relation never shapes to a write with no resolved target.
    #[test]
    fn required_relations_never_shape_empty(
        connect in 0usize..2,
        delete in 0usize..3,
        disconnect in 0usize..3,
    ) {
        let registry = Registry::bootstrap();
        let spec = registry
            .describe(EntityType::Bookmark)
            .relation("list")
            .unwrap()
            .clone();
        let payload = ShapePayload {
            connect: ids(connect),
            delete: ids(delete),
            disconnect: ids(disconnect),
            ..ShapePayload::default()
        };
        prop_assume!(!payload.is_empty());

        match shape_relation(&registry, EntityType::Bookmark, &spec, &payload, &ctx()) {
            Ok(write) => prop_assert!(!write.connect.is_empty()),
            Err(ShapeError::RequiredRelationMissing { .. }) => prop_assert!(connect == 0),
            Err(ShapeError::InvalidRelationOperation { op, .. }) => {
                prop_assert!(!spec.allowed_ops.allows(op));
            }
            Err(e) => prop_assert!(false, "unexpected error: {e}"),
        }
    }

    // Plain scalars pass through untouched; nullable text collapses the
    // empty string to null and nothing else.
    #[test]
    fn scalar_normalization_roundtrip(label in ".{0,32}", color in ".{0,32}") {
        let registry = Registry::bootstrap();
        let payload = json!({"label": label.clone(), "color": color.clone()});
        let plan = shape_create(&registry, EntityType::Label, &payload, &ctx()).unwrap();

        prop_assert_eq!(&plan.scalars["label"], &Value::String(label));
        if color.is_empty() {
            prop_assert_eq!(&plan.scalars["color"], &Value::Null);
        } else {
            prop_assert_eq!(&plan.scalars["color"], &Value::String(color));
        }
    }
}
