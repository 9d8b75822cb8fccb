use crate::{VersionDraft, WeightError, WeightResult};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;
use trellis_types::{LanguageTag, RowId, WeightMap, Weights};

/// Computes weights for every versioned entity in one save call.
///
/// `creates` and `updates` are the drafts being written; `delete_ids` the
/// versions being deleted in the same call; `existing` the weights of
/// already-stored versions the storage collaborator fetched for any
/// out-of-batch references. Runs before shaping; the returned map is frozen
/// into the shape context and never mutated afterwards.
///
/// A step costs 1 plus the complexity of the subroutine it calls, if any.
/// `complexity` prices every step; `simplicity` skips optional steps. A
/// reference into `delete_ids` is fatal. A reference that resolves neither
/// in the batch nor in `existing` contributes 0.
pub fn compute_weights(
    creates: &[VersionDraft],
    updates: &[VersionDraft],
    delete_ids: &[RowId],
    existing: &WeightMap,
    caller_languages: &[LanguageTag],
) -> WeightResult<WeightMap> {
    let deleting: BTreeSet<RowId> = delete_ids.iter().copied().collect();
    let batch: BTreeMap<RowId, &VersionDraft> = creates
        .iter()
        .chain(updates.iter())
        .map(|d| (d.id, d))
        .collect();

    let mut memo: BTreeMap<RowId, Weights> = BTreeMap::new();
    for draft in batch.values() {
        // Skip drafts that are themselves being deleted in this call; they
        // get no weight entry and referencing them is caught below.
        if deleting.contains(&draft.id) {
            continue;
        }
        let mut visiting = BTreeSet::new();
        weigh(
            draft,
            &batch,
            &deleting,
            existing,
            caller_languages,
            &mut memo,
            &mut visiting,
        )?;
    }

    let map: WeightMap = memo.into_iter().collect();
    debug!(versions = map.len(), "computed batch weights");
    Ok(map)
}

fn weigh(
    draft: &VersionDraft,
    batch: &BTreeMap<RowId, &VersionDraft>,
    deleting: &BTreeSet<RowId>,
    existing: &WeightMap,
    caller_languages: &[LanguageTag],
    memo: &mut BTreeMap<RowId, Weights>,
    visiting: &mut BTreeSet<RowId>,
) -> WeightResult<Weights> {
    if let Some(done) = memo.get(&draft.id) {
        return Ok(*done);
    }
    visiting.insert(draft.id);

    let mut complexity: u64 = 1;
    let mut simplicity: u64 = 1;
    for step in &draft.steps {
        let sub = match step.subroutine {
            Some(id) => {
                if deleting.contains(&id) {
                    return Err(WeightError::DeletedEntityReferenced {
                        id,
                        referenced_by: draft.display_name(caller_languages),
                    });
                }
                match batch.get(&id) {
                    // A back-edge inside the batch contributes nothing; the
                    // cycle is otherwise priced by its forward edges.
                    Some(_) if visiting.contains(&id) => Weights::default(),
                    Some(nested) => weigh(
                        nested,
                        batch,
                        deleting,
                        existing,
                        caller_languages,
                        memo,
                        visiting,
                    )?,
                    None => existing.get_or_default(&id),
                }
            }
            None => Weights::default(),
        };
        complexity += 1 + sub.complexity;
        if !step.optional {
            simplicity += 1 + sub.simplicity;
        }
    }

    visiting.remove(&draft.id);
    let weights = Weights::new(simplicity, complexity);
    memo.insert(draft.id, weights);
    Ok(weights)
}
