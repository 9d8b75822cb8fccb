use crate::ParentRows;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use trellis_schema::EntityType;
use trellis_types::{Row, RowId};

/// A composable boolean fragment over a row's already-fetched fields.
///
/// Predicates are immutable values; callers combine them with
/// [`Predicate::and`] / [`Predicate::or`]. Field names are JSON pointers
/// into the row's data (e.g. `/is_private`). Evaluation never triggers a
/// storage fetch: parent predicates are resolved against rows the caller
/// already fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    /// Matches every row.
    All,
    /// Matches no row.
    Never,
    /// The row id itself equals the given id.
    IdIs { id: RowId },
    /// Field equals the given JSON value (a missing field reads as null).
    Eq { field: String, value: Value },
    /// Numeric field is at least `value`.
    Gte { field: String, value: f64 },
    /// Numeric field is at most `value`.
    Lte { field: String, value: f64 },
    /// Text field contains `term`, case-insensitively.
    TextContains { field: String, term: String },
    /// Array field contains the given value (case-insensitive for strings).
    ArrayContains { field: String, value: Value },
    /// Row creation time falls inside the interval; both bounds are
    /// inclusive, and either may be absent.
    CreatedWithin {
        after: Option<i64>,
        before: Option<i64>,
    },
    /// Row update time falls inside the interval; both bounds are
    /// inclusive, and either may be absent.
    UpdatedWithin {
        after: Option<i64>,
        before: Option<i64>,
    },
    /// Delegates to a predicate over the parent row referenced by `field`.
    Parent {
        field: String,
        of: EntityType,
        inner: Box<Predicate>,
    },
    And { all: Vec<Predicate> },
    Or { any: Vec<Predicate> },
}

impl Predicate {
    /// Field-equals shorthand.
    #[must_use]
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Predicate::Eq {
            field: field.to_string(),
            value: value.into(),
        }
    }

    /// Conjunction with another predicate.
    #[must_use]
    pub fn and(self, other: Predicate) -> Self {
        match (self, other) {
            (Predicate::All, p) | (p, Predicate::All) => p,
            (Predicate::And { mut all }, p) => {
                all.push(p);
                Predicate::And { all }
            }
            (a, b) => Predicate::And { all: vec![a, b] },
        }
    }

    /// Disjunction with another predicate.
    #[must_use]
    pub fn or(self, other: Predicate) -> Self {
        match (self, other) {
            (Predicate::Never, p) | (p, Predicate::Never) => p,
            (Predicate::Or { mut any }, p) => {
                any.push(p);
                Predicate::Or { any }
            }
            (a, b) => Predicate::Or { any: vec![a, b] },
        }
    }

    /// Evaluates the predicate against a fetched row. Parent fragments look
    /// up the referenced row in `parents`; an unresolvable parent matches
    /// nothing.
    #[must_use]
    pub fn matches(&self, row: &Row, parents: &ParentRows) -> bool {
        match self {
            Predicate::All => true,
            Predicate::Never => false,
            Predicate::IdIs { id } => row.id == *id,
            Predicate::Eq { field, value } => {
                row.data.pointer(field).unwrap_or(&Value::Null) == value
            }
            Predicate::Gte { field, value } => {
                row.get_number(field).is_some_and(|n| n >= *value)
            }
            Predicate::Lte { field, value } => {
                row.get_number(field).is_some_and(|n| n <= *value)
            }
            Predicate::TextContains { field, term } => row
                .get_str(field)
                .is_some_and(|s| s.to_lowercase().contains(&term.to_lowercase())),
            Predicate::ArrayContains { field, value } => row
                .data
                .pointer(field)
                .and_then(Value::as_array)
                .is_some_and(|items| {
                    items.iter().any(|item| match (item.as_str(), value.as_str()) {
                        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
                        _ => item == value,
                    })
                }),
            Predicate::CreatedWithin { after, before } => {
                after.is_none_or(|a| row.created_at >= a)
                    && before.is_none_or(|b| row.created_at <= b)
            }
            Predicate::UpdatedWithin { after, before } => {
                after.is_none_or(|a| row.updated_at >= a)
                    && before.is_none_or(|b| row.updated_at <= b)
            }
            Predicate::Parent { field, inner, .. } => row
                .get_id(field)
                .and_then(|id| parents.get(&id))
                .is_some_and(|parent| inner.matches(parent, parents)),
            Predicate::And { all } => all.iter().all(|p| p.matches(row, parents)),
            Predicate::Or { any } => any.iter().any(|p| p.matches(row, parents)),
        }
    }
}
