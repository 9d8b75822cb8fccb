use crate::{AccessError, AccessResult};
use trellis_schema::EntityDescriptor;

/// Checks the per-type object quota before any plan construction begins.
///
/// A quota of 0 means the type is never creatable directly (payments are
/// minted by billing, stats by aggregation), so the check fails regardless
/// of the current count.
pub fn check_quota(descriptor: &EntityDescriptor, current_count: u64) -> AccessResult<()> {
    if descriptor.max_objects == 0 || current_count >= u64::from(descriptor.max_objects) {
        return Err(AccessError::MaxObjectsExceeded {
            entity_type: descriptor.entity_type,
            max: descriptor.max_objects,
        });
    }
    Ok(())
}
