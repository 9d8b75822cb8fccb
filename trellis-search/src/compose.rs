use crate::{FilterKey, SearchError, SearchResult, SearchSpec};
use serde_json::{Map, Value};
use trellis_access::Predicate;

/// Composes structured filters and an optional free-text term into one
/// predicate for the storage collaborator.
///
/// Filter keys are validated against the spec's declared set first; an
/// undeclared key fails the whole call.
pub fn compose(
    spec: &SearchSpec,
    filters: &Map<String, Value>,
    term: Option<&str>,
) -> SearchResult<Predicate> {
    let mut predicate = Predicate::All;
    for (key, value) in filters {
        let filter = spec
            .filter_keys
            .iter()
            .copied()
            .find(|f| f.as_str() == key)
            .ok_or_else(|| SearchError::UnknownFilterKey {
                entity_type: spec.entity_type,
                key: key.clone(),
            })?;
        predicate = predicate.and(filter_fragment(filter, key, value)?);
    }
    if let Some(term) = term {
        let term = term.trim();
        if !term.is_empty() {
            predicate = predicate.and(search_string(spec, term));
        }
    }
    Ok(predicate)
}

/// OR-combines the free-text term over the spec's declared text targets
/// and, where declared, the root entity's tags.
#[must_use]
pub fn search_string(spec: &SearchSpec, term: &str) -> Predicate {
    let mut fragment = Predicate::Never;
    for target in spec.text_targets {
        fragment = fragment.or(Predicate::TextContains {
            field: (*target).to_string(),
            term: term.to_string(),
        });
    }
    if let Some((root_field, root_type)) = spec.root_tags {
        fragment = fragment.or(Predicate::Parent {
            field: root_field.to_string(),
            of: root_type,
            inner: Box::new(Predicate::ArrayContains {
                field: "/tags".to_string(),
                value: Value::String(term.to_string()),
            }),
        });
    }
    fragment
}

fn filter_fragment(filter: FilterKey, key: &str, value: &Value) -> SearchResult<Predicate> {
    match filter {
        FilterKey::CreatedTimeFrame => {
            let (after, before) = time_frame(key, value)?;
            Ok(Predicate::CreatedWithin { after, before })
        }
        FilterKey::UpdatedTimeFrame => {
            let (after, before) = time_frame(key, value)?;
            Ok(Predicate::UpdatedWithin { after, before })
        }
        FilterKey::IsComplete => {
            let flag = value.as_bool().ok_or_else(|| invalid(key, "expected a boolean"))?;
            Ok(Predicate::eq("/is_complete", flag))
        }
        FilterKey::Status => {
            let status = value.as_str().ok_or_else(|| invalid(key, "expected a string"))?;
            Ok(Predicate::eq("/status", status))
        }
        FilterKey::MinComplexity => {
            let bound = value.as_f64().ok_or_else(|| invalid(key, "expected a number"))?;
            Ok(Predicate::Gte {
                field: "/complexity".to_string(),
                value: bound,
            })
        }
        FilterKey::MaxComplexity => {
            let bound = value.as_f64().ok_or_else(|| invalid(key, "expected a number"))?;
            Ok(Predicate::Lte {
                field: "/complexity".to_string(),
                value: bound,
            })
        }
        FilterKey::Tags => {
            let labels = value
                .as_array()
                .ok_or_else(|| invalid(key, "expected an array of labels"))?;
            let mut fragment = Predicate::Never;
            for label in labels {
                let label = label
                    .as_str()
                    .ok_or_else(|| invalid(key, "labels must be strings"))?;
                fragment = fragment.or(Predicate::ArrayContains {
                    field: "/tags".to_string(),
                    value: Value::String(label.to_string()),
                });
            }
            Ok(fragment)
        }
    }
}

fn time_frame(key: &str, value: &Value) -> SearchResult<(Option<i64>, Option<i64>)> {
    let obj = value
        .as_object()
        .ok_or_else(|| invalid(key, "expected { after?, before? }"))?;
    let bound = |name: &str| -> SearchResult<Option<i64>> {
        match obj.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => v
                .as_i64()
                .map(Some)
                .ok_or_else(|| invalid(key, "bounds must be unix timestamps")),
        }
    };
    Ok((bound("after")?, bound("before")?))
}

fn invalid(key: &str, reason: &str) -> SearchError {
    SearchError::InvalidFilterValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
