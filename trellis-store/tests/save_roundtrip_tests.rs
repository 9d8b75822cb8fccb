//! End-to-end save path: weigh, shape, execute, fetch, resolve, format.

use pretty_assertions::assert_eq;
use serde_json::json;
use trellis_access::{check_quota, resolve_owner, ParentRows};
use trellis_projection::{format_row, projection};
use trellis_shape::{shape_create, ShapeContext};
use trellis_schema::{EntityType, Registry};
use trellis_store::EntityStore;
use trellis_types::{Caller, OwnerRef, RowId, UserId, WeightMap};
use trellis_weights::{compute_weights, StepDraft, VersionDraft};

#[test]
fn routine_save_call_roundtrips() {
    let registry = Registry::bootstrap();
    let store = EntityStore::open_in_memory().unwrap();
    let user = UserId::new();
    let caller = Caller::new(user, "en");

    // Quota gate before any plan construction.
    let desc = registry.describe(EntityType::Routine);
    check_quota(desc, store.count(EntityType::Routine).unwrap()).unwrap();

    // Weight pre-pass over the versions in the batch, frozen into the
    // context before shaping begins.
    let version_id = RowId::new();
    let draft = VersionDraft::new(
        version_id,
        vec![StepDraft::plain(), StepDraft::plain().optional()],
    );
    let weights = compute_weights(&[draft], &[], &[], &WeightMap::new(), &caller.languages)
        .unwrap();
    let ctx = ShapeContext::with_weights(caller, weights);

    let plan = shape_create(
        &registry,
        EntityType::Routine,
        &json!({
            "is_private": true,
            "owned_by_user": user.to_string(),
            "versions": {
                "create": [{
                    "id": version_id.to_string(),
                    "version_label": "v1",
                    "steps": {
                        "create": [
                            {"index": 0, "is_optional": false},
                            {"index": 1, "is_optional": true},
                        ],
                    },
                }],
            },
        }),
        &ctx,
    )
    .unwrap();
    let routine_id = store.execute(&registry, &plan).unwrap();

    // The stored version carries the batch-computed weights.
    let version = store.fetch(&version_id).unwrap();
    assert_eq!(version.get_number("/simplicity"), Some(2.0));
    assert_eq!(version.get_number("/complexity"), Some(3.0));

    // Ownership resolves through the delegation chain the store filled in.
    let routine = store.fetch(&routine_id).unwrap();
    let parents: ParentRows = [routine.clone()].into_iter().collect();
    let owner = resolve_owner(&registry, EntityType::RoutineVersion, &version, &parents);
    assert_eq!(owner, OwnerRef::User(user));

    // Formatting strips nothing the caller sent for this type.
    let out = format_row(projection(EntityType::Routine), &routine);
    assert_eq!(out["is_private"], json!(true));
    assert_eq!(out["owned_by_user"], json!(user.to_string()));
    assert_eq!(out["id"], json!(routine_id.to_string()));
}

#[test]
fn translated_list_save_marks_the_index_and_formats_clean() {
    let registry = Registry::bootstrap();
    let store = EntityStore::open_in_memory().unwrap();
    let user = UserId::new();
    let ctx = ShapeContext::new(Caller::new(user, "en"));

    let plan = shape_create(
        &registry,
        EntityType::BookmarkList,
        &json!({
            "is_private": false,
            "owned_by_user": user.to_string(),
            "translations": {
                "create": [
                    {"language": "en", "name": "Reading list"},
                    {"language": "de", "name": "Leseliste"},
                ],
            },
        }),
        &ctx,
    )
    .unwrap();
    assert!(plan.refresh_search_index);

    let list_id = store.execute(&registry, &plan).unwrap();
    let translations = store.children(&list_id, "translations").unwrap();
    assert_eq!(translations.len(), 2);
    assert_eq!(translations[0].get_str("/language"), Some("en"));
    assert_eq!(translations[0].get_id("/parent_id"), Some(list_id));

    // The denormalized search document never surfaces in API output.
    let mut list = store.fetch(&list_id).unwrap();
    list.data["search_text"] = json!("reading list leseliste");
    let out = format_row(projection(EntityType::BookmarkList), &list);
    assert!(out.get("search_text").is_none());
    assert_eq!(out["is_private"], json!(false));
}
