use pretty_assertions::assert_eq;
use trellis_types::{LanguageTag, RowId, WeightMap, Weights};
use trellis_weights::{compute_weights, StepDraft, TranslationDraft, VersionDraft, WeightError};

const EN: &[LanguageTag] = &[];

fn langs(tags: &[&str]) -> Vec<LanguageTag> {
    tags.iter().map(|t| LanguageTag::new(t)).collect()
}

// ── Base cases ───────────────────────────────────────────────────

#[test]
fn empty_version_weighs_one() {
    let draft = VersionDraft::new(RowId::new(), vec![]);
    let map = compute_weights(&[draft.clone()], &[], &[], &WeightMap::new(), EN).unwrap();
    assert_eq!(map.get_or_default(&draft.id), Weights::new(1, 1));
}

#[test]
fn plain_steps_cost_one_each() {
    let draft = VersionDraft::new(RowId::new(), vec![StepDraft::plain(), StepDraft::plain()]);
    let map = compute_weights(&[draft.clone()], &[], &[], &WeightMap::new(), EN).unwrap();
    assert_eq!(map.get_or_default(&draft.id), Weights::new(3, 3));
}

#[test]
fn optional_steps_count_toward_complexity_only() {
    let draft = VersionDraft::new(
        RowId::new(),
        vec![StepDraft::plain(), StepDraft::plain().optional()],
    );
    let map = compute_weights(&[draft.clone()], &[], &[], &WeightMap::new(), EN).unwrap();
    assert_eq!(map.get_or_default(&draft.id), Weights::new(2, 3));
}

// ── Subroutine references ────────────────────────────────────────

#[test]
fn in_batch_subroutines_price_recursively() {
    let inner = VersionDraft::new(RowId::new(), vec![StepDraft::plain(), StepDraft::plain()]);
    let outer = VersionDraft::new(RowId::new(), vec![StepDraft::calling(inner.id)]);

    let map = compute_weights(
        &[outer.clone(), inner.clone()],
        &[],
        &[],
        &WeightMap::new(),
        EN,
    )
    .unwrap();
    assert_eq!(map.get_or_default(&inner.id), Weights::new(3, 3));
    // One step costing 1 + inner's weight.
    assert_eq!(map.get_or_default(&outer.id), Weights::new(5, 5));
}

#[test]
fn updates_take_part_in_the_batch() {
    let updated = VersionDraft::new(RowId::new(), vec![StepDraft::plain()]);
    let creating = VersionDraft::new(RowId::new(), vec![StepDraft::calling(updated.id)]);

    let map = compute_weights(
        &[creating.clone()],
        &[updated.clone()],
        &[],
        &WeightMap::new(),
        EN,
    )
    .unwrap();
    assert_eq!(map.get_or_default(&updated.id), Weights::new(2, 2));
    assert_eq!(map.get_or_default(&creating.id), Weights::new(4, 4));
}

#[test]
fn out_of_batch_subroutines_read_stored_weights() {
    let stored_id = RowId::new();
    let existing: WeightMap = [(stored_id, Weights::new(4, 9))].into_iter().collect();
    let draft = VersionDraft::new(RowId::new(), vec![StepDraft::calling(stored_id)]);

    let map = compute_weights(&[draft.clone()], &[], &[], &existing, EN).unwrap();
    assert_eq!(map.get_or_default(&draft.id), Weights::new(6, 11));
    // The stored version itself is not part of the result.
    assert_eq!(map.get(&stored_id), None);
}

#[test]
fn unresolvable_subroutines_contribute_zero() {
    let draft = VersionDraft::new(RowId::new(), vec![StepDraft::calling(RowId::new())]);
    let map = compute_weights(&[draft.clone()], &[], &[], &WeightMap::new(), EN).unwrap();
    assert_eq!(map.get_or_default(&draft.id), Weights::new(2, 2));
}

// ── Deletion hazards ─────────────────────────────────────────────

#[test]
fn referencing_a_version_deleted_in_the_same_call_is_fatal() {
    let doomed = RowId::new();
    let mut draft = VersionDraft::new(RowId::new(), vec![StepDraft::calling(doomed)]);
    draft.translations.push(TranslationDraft {
        language: LanguageTag::new("en"),
        name: "Leg day".to_string(),
    });
    draft.translations.push(TranslationDraft {
        language: LanguageTag::new("de"),
        name: "Beintag".to_string(),
    });

    let err = compute_weights(
        &[draft],
        &[],
        &[doomed],
        &WeightMap::new(),
        &langs(&["de", "en"]),
    )
    .unwrap_err();
    match err {
        WeightError::DeletedEntityReferenced { id, referenced_by } => {
            assert_eq!(id, doomed);
            // Named in the caller's preferred language.
            assert_eq!(referenced_by, "Beintag");
        }
    }
}

#[test]
fn display_name_falls_back_to_first_translation_then_id() {
    let mut draft = VersionDraft::new(RowId::new(), vec![]);
    assert_eq!(draft.display_name(&langs(&["fr"])), draft.id.to_string());

    draft.translations.push(TranslationDraft {
        language: LanguageTag::new("en"),
        name: "Stretching".to_string(),
    });
    assert_eq!(draft.display_name(&langs(&["fr"])), "Stretching");
    assert_eq!(draft.display_name(&langs(&["en"])), "Stretching");
}

#[test]
fn versions_deleted_in_the_call_are_not_weighed() {
    let doomed = VersionDraft::new(RowId::new(), vec![StepDraft::plain()]);
    let kept = VersionDraft::new(RowId::new(), vec![StepDraft::plain()]);
    let map = compute_weights(
        &[],
        &[doomed.clone(), kept.clone()],
        &[doomed.id],
        &WeightMap::new(),
        EN,
    )
    .unwrap();
    assert_eq!(map.get(&doomed.id), None);
    assert_eq!(map.get(&kept.id), Some(Weights::new(2, 2)));
}

// ── Cycles ───────────────────────────────────────────────────────

#[test]
fn mutual_recursion_terminates() {
    let a_id = RowId::new();
    let b_id = RowId::new();
    let a = VersionDraft::new(a_id, vec![StepDraft::calling(b_id)]);
    let b = VersionDraft::new(b_id, vec![StepDraft::calling(a_id)]);

    let map = compute_weights(&[a, b], &[], &[], &WeightMap::new(), EN).unwrap();
    // The forward edge is priced; the back edge contributes nothing. One of
    // the two is weighed first and sees the other as a plain step.
    let wa = map.get_or_default(&a_id);
    let wb = map.get_or_default(&b_id);
    assert!(wa.complexity >= 2 && wb.complexity >= 2);
    assert!(wa.complexity.max(wb.complexity) <= 4);
}

#[test]
fn self_reference_contributes_zero() {
    let id = RowId::new();
    let draft = VersionDraft::new(id, vec![StepDraft::plain(), StepDraft::calling(id)]);
    let map = compute_weights(&[draft], &[], &[], &WeightMap::new(), EN).unwrap();
    assert_eq!(map.get_or_default(&id), Weights::new(3, 3));
}
