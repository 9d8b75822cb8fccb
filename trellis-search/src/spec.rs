use serde::{Deserialize, Serialize};
use trellis_schema::EntityType;

/// A valid sort order for a search result page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    CreatedAsc,
    CreatedDesc,
    UpdatedAsc,
    UpdatedDesc,
    IndexAsc,
    IndexDesc,
    ScoreAsc,
    ScoreDesc,
    ComplexityAsc,
    ComplexityDesc,
    SimplicityAsc,
    SimplicityDesc,
}

impl SortKey {
    /// The wire name of the sort key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            SortKey::CreatedAsc => "created_asc",
            SortKey::CreatedDesc => "created_desc",
            SortKey::UpdatedAsc => "updated_asc",
            SortKey::UpdatedDesc => "updated_desc",
            SortKey::IndexAsc => "index_asc",
            SortKey::IndexDesc => "index_desc",
            SortKey::ScoreAsc => "score_asc",
            SortKey::ScoreDesc => "score_desc",
            SortKey::ComplexityAsc => "complexity_asc",
            SortKey::ComplexityDesc => "complexity_desc",
            SortKey::SimplicityAsc => "simplicity_asc",
            SortKey::SimplicityDesc => "simplicity_desc",
        }
    }
}

/// A structured filter key with a named semantic effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKey {
    /// Restricts by creation interval (`{ "after": ts, "before": ts }`).
    CreatedTimeFrame,
    /// Restricts by last-update interval.
    UpdatedTimeFrame,
    /// Restricts by the completion flag.
    IsComplete,
    /// Restricts by exact status value.
    Status,
    /// Lower bound on the complexity weight.
    MinComplexity,
    /// Upper bound on the complexity weight.
    MaxComplexity,
    /// Restricts to rows tagged with any of the given labels.
    Tags,
}

impl FilterKey {
    /// The wire name of the filter key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            FilterKey::CreatedTimeFrame => "created_time_frame",
            FilterKey::UpdatedTimeFrame => "updated_time_frame",
            FilterKey::IsComplete => "is_complete",
            FilterKey::Status => "status",
            FilterKey::MinComplexity => "min_complexity",
            FilterKey::MaxComplexity => "max_complexity",
            FilterKey::Tags => "tags",
        }
    }
}

/// The declared search surface of one entity type.
#[derive(Debug, Clone)]
pub struct SearchSpec {
    pub entity_type: EntityType,
    pub default_sort: SortKey,
    pub sort_keys: &'static [SortKey],
    pub filter_keys: &'static [FilterKey],
    /// JSON pointers into the row's denormalized search document, OR-combined
    /// by a free-text term.
    pub text_targets: &'static [&'static str],
    /// Where declared, a parent reference whose tags also match the term.
    pub root_tags: Option<(&'static str, EntityType)>,
}

impl SearchSpec {
    /// Validates a caller-supplied sort key against the declared set.
    pub fn sort_by(&self, key: &str) -> Result<SortKey, crate::SearchError> {
        self.sort_keys
            .iter()
            .copied()
            .find(|k| k.as_str() == key)
            .ok_or_else(|| crate::SearchError::UnknownSortKey {
                entity_type: self.entity_type,
                key: key.to_string(),
            })
    }

    /// True when the filter key is declared for this type.
    #[must_use]
    pub fn declares(&self, key: FilterKey) -> bool {
        self.filter_keys.contains(&key)
    }
}

const CREATED_UPDATED: &[SortKey] = &[
    SortKey::CreatedAsc,
    SortKey::CreatedDesc,
    SortKey::UpdatedAsc,
    SortKey::UpdatedDesc,
];

/// The search surface for an entity type, or `None` when the type is not
/// searchable (join records, translations, stats).
#[must_use]
pub fn search_spec(entity_type: EntityType) -> Option<&'static SearchSpec> {
    match entity_type {
        EntityType::Routine => Some(&ROUTINE),
        EntityType::RoutineVersion => Some(&ROUTINE_VERSION),
        EntityType::BookmarkList => Some(&BOOKMARK_LIST),
        EntityType::Chat => Some(&CHAT),
        EntityType::ChatMessage => Some(&CHAT_MESSAGE),
        EntityType::Run => Some(&RUN),
        EntityType::Reminder => Some(&REMINDER),
        EntityType::Tag => Some(&TAG),
        _ => None,
    }
}

static ROUTINE: SearchSpec = SearchSpec {
    entity_type: EntityType::Routine,
    default_sort: SortKey::UpdatedDesc,
    sort_keys: CREATED_UPDATED,
    filter_keys: &[FilterKey::CreatedTimeFrame, FilterKey::UpdatedTimeFrame, FilterKey::Tags],
    text_targets: &["/search_text"],
    root_tags: None,
};

static ROUTINE_VERSION: SearchSpec = SearchSpec {
    entity_type: EntityType::RoutineVersion,
    default_sort: SortKey::UpdatedDesc,
    sort_keys: &[
        SortKey::CreatedAsc,
        SortKey::CreatedDesc,
        SortKey::UpdatedAsc,
        SortKey::UpdatedDesc,
        SortKey::ComplexityAsc,
        SortKey::ComplexityDesc,
        SortKey::SimplicityAsc,
        SortKey::SimplicityDesc,
    ],
    filter_keys: &[
        FilterKey::CreatedTimeFrame,
        FilterKey::UpdatedTimeFrame,
        FilterKey::IsComplete,
        FilterKey::MinComplexity,
        FilterKey::MaxComplexity,
    ],
    text_targets: &["/search_text"],
    root_tags: Some(("/root_id", EntityType::Routine)),
};

static BOOKMARK_LIST: SearchSpec = SearchSpec {
    entity_type: EntityType::BookmarkList,
    default_sort: SortKey::UpdatedDesc,
    sort_keys: CREATED_UPDATED,
    filter_keys: &[FilterKey::CreatedTimeFrame, FilterKey::UpdatedTimeFrame],
    text_targets: &["/search_text"],
    root_tags: None,
};

static CHAT: SearchSpec = SearchSpec {
    entity_type: EntityType::Chat,
    default_sort: SortKey::UpdatedDesc,
    sort_keys: CREATED_UPDATED,
    filter_keys: &[FilterKey::CreatedTimeFrame, FilterKey::UpdatedTimeFrame],
    text_targets: &["/name"],
    root_tags: None,
};

static CHAT_MESSAGE: SearchSpec = SearchSpec {
    entity_type: EntityType::ChatMessage,
    default_sort: SortKey::CreatedDesc,
    sort_keys: &[
        SortKey::CreatedAsc,
        SortKey::CreatedDesc,
        SortKey::ScoreAsc,
        SortKey::ScoreDesc,
    ],
    filter_keys: &[FilterKey::CreatedTimeFrame],
    text_targets: &["/text"],
    root_tags: None,
};

static RUN: SearchSpec = SearchSpec {
    entity_type: EntityType::Run,
    default_sort: SortKey::UpdatedDesc,
    sort_keys: CREATED_UPDATED,
    filter_keys: &[
        FilterKey::CreatedTimeFrame,
        FilterKey::UpdatedTimeFrame,
        FilterKey::Status,
    ],
    text_targets: &[],
    root_tags: None,
};

static REMINDER: SearchSpec = SearchSpec {
    entity_type: EntityType::Reminder,
    default_sort: SortKey::IndexAsc,
    sort_keys: &[
        SortKey::CreatedAsc,
        SortKey::CreatedDesc,
        SortKey::IndexAsc,
        SortKey::IndexDesc,
    ],
    filter_keys: &[FilterKey::CreatedTimeFrame, FilterKey::IsComplete],
    text_targets: &["/name", "/description"],
    root_tags: None,
};

static TAG: SearchSpec = SearchSpec {
    entity_type: EntityType::Tag,
    default_sort: SortKey::CreatedDesc,
    sort_keys: CREATED_UPDATED,
    filter_keys: &[FilterKey::CreatedTimeFrame],
    text_targets: &["/tag"],
    root_tags: None,
};
