//! Shaper for language-tagged text sub-records.
//!
//! A specialization of the relation compiler with cardinality fixed to
//! one-to-many and entries keyed by language tag. Also computes the
//! search-index-invalidation flag for the parent plan: any created, deleted,
//! or textually-updated translation means the parent's search document is
//! stale.

use crate::compiler;
use crate::{RelationWrite, ShapeContext, ShapeError, ShapePayload, ShapeResult};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use trellis_schema::{EntityType, RelationSpec, Registry};
use trellis_types::LanguageTag;

/// Shapes a parent's `translations` relation payload.
///
/// Returns the relation write and whether the parent's search index needs a
/// refresh. Language tags must be unique within one payload; a duplicate is
/// a contract error.
pub fn shape_translations(
    registry: &Registry,
    parent_type: EntityType,
    payload: &ShapePayload,
    ctx: &ShapeContext,
) -> ShapeResult<(RelationWrite, bool)> {
    let descriptor = registry.describe(parent_type);
    let spec = descriptor.relation("translations").ok_or_else(|| {
        ShapeError::MalformedPayload(format!("{parent_type} has no translations relation"))
    })?;
    shape(registry, parent_type, spec, payload, ctx)
}

pub(crate) fn shape(
    registry: &Registry,
    parent_type: EntityType,
    spec: &RelationSpec,
    payload: &ShapePayload,
    ctx: &ShapeContext,
) -> ShapeResult<(RelationWrite, bool)> {
    compiler::check_allowed_ops(parent_type, spec, payload)?;

    let mut seen = BTreeSet::new();
    for create in &payload.create {
        let tag = create_language(spec.target, create)?;
        if !seen.insert(tag.clone()) {
            return Err(ShapeError::DuplicateTranslationLanguage {
                entity_type: parent_type,
                language: tag.as_str().to_string(),
            });
        }
    }
    for (_, data) in &payload.update {
        if let Some(tag) = update_language(data) {
            if !seen.insert(tag.clone()) {
                return Err(ShapeError::DuplicateTranslationLanguage {
                    entity_type: parent_type,
                    language: tag.as_str().to_string(),
                });
            }
        }
    }

    // Deletes and creates always invalidate; updates only when a text field
    // changes (any field other than the language key itself).
    let refresh = !payload.create.is_empty()
        || !payload.delete.is_empty()
        || payload
            .update
            .iter()
            .any(|(_, data)| data.keys().any(|k| k != "language" && k != "id"));

    let write = compiler::shape_relation(registry, parent_type, spec, payload, ctx)?;
    Ok((write, refresh))
}

fn create_language(target: EntityType, create: &Map<String, Value>) -> ShapeResult<LanguageTag> {
    create
        .get("language")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(LanguageTag::new)
        .ok_or_else(|| {
            ShapeError::MalformedPayload(format!("{target} create entry missing language"))
        })
}

fn update_language(data: &Map<String, Value>) -> Option<LanguageTag> {
    data.get("language")
        .and_then(Value::as_str)
        .map(LanguageTag::new)
}
