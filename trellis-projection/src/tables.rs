use trellis_schema::EntityType;

/// An API-facing relation and the concrete types it may resolve to.
/// More than one target means a polymorphic (union-typed) relation.
#[derive(Debug, Clone)]
pub struct ApiRelation {
    pub name: &'static str,
    pub targets: &'static [EntityType],
}

/// The read-side shape of one entity type.
#[derive(Debug, Clone)]
pub struct Projection {
    pub entity_type: EntityType,
    /// API-facing relation names and their target types.
    pub api_relations: &'static [ApiRelation],
    /// Storage-facing relations, including back-references the API never
    /// surfaces directly.
    pub storage_relations: &'static [(&'static str, EntityType)],
    /// Relations exposed only as a cardinality count:
    /// `(api field, storage relation)`.
    pub count_fields: &'static [(&'static str, &'static str)],
    /// Relations reached through an intermediate join record:
    /// `(api relation, join relation, field to traverse on the join row)`.
    pub join_map: &'static [(&'static str, &'static str, &'static str)],
    /// Data fields always stripped from formatted rows, regardless of caller.
    pub hidden_fields: &'static [&'static str],
}

impl Projection {
    /// True when the API surfaces the storage relation under its own name.
    /// Relations absent here are either back-references or reachable only
    /// through a count field or the join map.
    #[must_use]
    pub fn surfaces(&self, relation: &str) -> bool {
        self.api_relations.iter().any(|r| r.name == relation)
    }

    /// True when the field is stripped from every formatted row.
    #[must_use]
    pub fn hides(&self, field: &str) -> bool {
        self.hidden_fields.contains(&field)
    }
}

/// The projection table for an entity type.
#[must_use]
pub fn projection(entity_type: EntityType) -> &'static Projection {
    match entity_type {
        EntityType::User => &USER,
        EntityType::Organization => &ORGANIZATION,
        EntityType::Member => &MEMBER,
        EntityType::Bookmark => &BOOKMARK,
        EntityType::BookmarkList => &BOOKMARK_LIST,
        EntityType::BookmarkListTranslation => &BOOKMARK_LIST_TRANSLATION,
        EntityType::Routine => &ROUTINE,
        EntityType::RoutineVersion => &ROUTINE_VERSION,
        EntityType::RoutineVersionTranslation => &ROUTINE_VERSION_TRANSLATION,
        EntityType::RoutineStep => &ROUTINE_STEP,
        EntityType::Run => &RUN,
        EntityType::RunStep => &RUN_STEP,
        EntityType::Chat => &CHAT,
        EntityType::ChatMessage => &CHAT_MESSAGE,
        EntityType::Reminder => &REMINDER,
        EntityType::ReminderList => &REMINDER_LIST,
        EntityType::Tag => &TAG,
        EntityType::Label => &LABEL,
        EntityType::Payment => &PAYMENT,
        EntityType::SiteStats => &SITE_STATS,
    }
}

const NO_RELATIONS: &[ApiRelation] = &[];
const NO_STORAGE: &[(&str, EntityType)] = &[];
const NO_COUNTS: &[(&str, &str)] = &[];
const NO_JOINS: &[(&str, &str, &str)] = &[];
const NO_HIDDEN: &[&str] = &[];

/// The polymorphic owner fan-out shared by directly-owned types.
const OWNER: ApiRelation = ApiRelation {
    name: "owner",
    targets: &[EntityType::User, EntityType::Organization],
};

static USER: Projection = Projection {
    entity_type: EntityType::User,
    api_relations: NO_RELATIONS,
    storage_relations: &[("memberships", EntityType::Member)],
    count_fields: NO_COUNTS,
    join_map: NO_JOINS,
    hidden_fields: &["is_deleted"],
};

static ORGANIZATION: Projection = Projection {
    entity_type: EntityType::Organization,
    api_relations: &[ApiRelation {
        name: "tags",
        targets: &[EntityType::Tag],
    }],
    storage_relations: &[
        ("members", EntityType::Member),
        ("tags", EntityType::Tag),
    ],
    count_fields: &[("members_count", "members")],
    // The API exposes member users directly, traversed through the join row.
    join_map: &[("users", "members", "user")],
    hidden_fields: &["is_deleted"],
};

static MEMBER: Projection = Projection {
    entity_type: EntityType::Member,
    api_relations: &[
        ApiRelation {
            name: "organization",
            targets: &[EntityType::Organization],
        },
        ApiRelation {
            name: "user",
            targets: &[EntityType::User],
        },
    ],
    storage_relations: &[
        ("organization", EntityType::Organization),
        ("user", EntityType::User),
    ],
    count_fields: NO_COUNTS,
    join_map: NO_JOINS,
    hidden_fields: NO_HIDDEN,
};

static BOOKMARK: Projection = Projection {
    entity_type: EntityType::Bookmark,
    api_relations: &[ApiRelation {
        name: "list",
        targets: &[EntityType::BookmarkList],
    }],
    storage_relations: &[("list", EntityType::BookmarkList)],
    count_fields: NO_COUNTS,
    join_map: NO_JOINS,
    hidden_fields: NO_HIDDEN,
};

static BOOKMARK_LIST: Projection = Projection {
    entity_type: EntityType::BookmarkList,
    api_relations: &[
        OWNER,
        ApiRelation {
            name: "translations",
            targets: &[EntityType::BookmarkListTranslation],
        },
    ],
    storage_relations: &[
        ("bookmarks", EntityType::Bookmark),
        ("translations", EntityType::BookmarkListTranslation),
    ],
    count_fields: &[("bookmarks_count", "bookmarks")],
    join_map: NO_JOINS,
    hidden_fields: &["search_text"],
};

static BOOKMARK_LIST_TRANSLATION: Projection = Projection {
    entity_type: EntityType::BookmarkListTranslation,
    api_relations: NO_RELATIONS,
    storage_relations: &[("parent", EntityType::BookmarkList)],
    count_fields: NO_COUNTS,
    join_map: NO_JOINS,
    hidden_fields: NO_HIDDEN,
};

static ROUTINE: Projection = Projection {
    entity_type: EntityType::Routine,
    api_relations: &[
        OWNER,
        ApiRelation {
            name: "versions",
            targets: &[EntityType::RoutineVersion],
        },
        ApiRelation {
            name: "tags",
            targets: &[EntityType::Tag],
        },
        ApiRelation {
            name: "labels",
            targets: &[EntityType::Label],
        },
    ],
    storage_relations: &[
        ("versions", EntityType::RoutineVersion),
        ("tags", EntityType::Tag),
        ("labels", EntityType::Label),
    ],
    count_fields: &[("versions_count", "versions")],
    join_map: NO_JOINS,
    hidden_fields: &["search_text"],
};

static ROUTINE_VERSION: Projection = Projection {
    entity_type: EntityType::RoutineVersion,
    api_relations: &[
        ApiRelation {
            name: "root",
            targets: &[EntityType::Routine],
        },
        ApiRelation {
            name: "steps",
            targets: &[EntityType::RoutineStep],
        },
        ApiRelation {
            name: "translations",
            targets: &[EntityType::RoutineVersionTranslation],
        },
    ],
    storage_relations: &[
        ("root", EntityType::Routine),
        ("steps", EntityType::RoutineStep),
        ("translations", EntityType::RoutineVersionTranslation),
    ],
    count_fields: &[("steps_count", "steps")],
    join_map: NO_JOINS,
    hidden_fields: &["search_text"],
};

static ROUTINE_VERSION_TRANSLATION: Projection = Projection {
    entity_type: EntityType::RoutineVersionTranslation,
    api_relations: NO_RELATIONS,
    storage_relations: &[("parent", EntityType::RoutineVersion)],
    count_fields: NO_COUNTS,
    join_map: NO_JOINS,
    hidden_fields: NO_HIDDEN,
};

static ROUTINE_STEP: Projection = Projection {
    entity_type: EntityType::RoutineStep,
    api_relations: &[ApiRelation {
        name: "subroutine",
        targets: &[EntityType::RoutineVersion],
    }],
    storage_relations: &[
        ("version", EntityType::RoutineVersion),
        ("subroutine", EntityType::RoutineVersion),
    ],
    count_fields: NO_COUNTS,
    join_map: NO_JOINS,
    hidden_fields: NO_HIDDEN,
};

static RUN: Projection = Projection {
    entity_type: EntityType::Run,
    api_relations: &[
        ApiRelation {
            name: "routine_version",
            targets: &[EntityType::RoutineVersion],
        },
        ApiRelation {
            name: "steps",
            targets: &[EntityType::RunStep],
        },
    ],
    storage_relations: &[
        ("routine_version", EntityType::RoutineVersion),
        ("steps", EntityType::RunStep),
    ],
    count_fields: &[("steps_count", "steps")],
    join_map: NO_JOINS,
    hidden_fields: NO_HIDDEN,
};

static RUN_STEP: Projection = Projection {
    entity_type: EntityType::RunStep,
    api_relations: &[ApiRelation {
        name: "step",
        targets: &[EntityType::RoutineStep],
    }],
    storage_relations: &[
        ("run", EntityType::Run),
        ("step", EntityType::RoutineStep),
    ],
    count_fields: NO_COUNTS,
    join_map: NO_JOINS,
    hidden_fields: NO_HIDDEN,
};

static CHAT: Projection = Projection {
    entity_type: EntityType::Chat,
    api_relations: &[ApiRelation {
        name: "participants",
        targets: &[EntityType::User],
    }],
    storage_relations: &[
        ("messages", EntityType::ChatMessage),
        ("participants", EntityType::User),
    ],
    count_fields: &[
        ("messages_count", "messages"),
        ("participants_count", "participants"),
    ],
    join_map: NO_JOINS,
    hidden_fields: NO_HIDDEN,
};

static CHAT_MESSAGE: Projection = Projection {
    entity_type: EntityType::ChatMessage,
    api_relations: &[ApiRelation {
        name: "chat",
        targets: &[EntityType::Chat],
    }],
    storage_relations: &[("chat", EntityType::Chat)],
    count_fields: NO_COUNTS,
    join_map: NO_JOINS,
    hidden_fields: NO_HIDDEN,
};

static REMINDER: Projection = Projection {
    entity_type: EntityType::Reminder,
    api_relations: &[ApiRelation {
        name: "list",
        targets: &[EntityType::ReminderList],
    }],
    storage_relations: &[("list", EntityType::ReminderList)],
    count_fields: NO_COUNTS,
    join_map: NO_JOINS,
    hidden_fields: NO_HIDDEN,
};

static REMINDER_LIST: Projection = Projection {
    entity_type: EntityType::ReminderList,
    api_relations: &[ApiRelation {
        name: "reminders",
        targets: &[EntityType::Reminder],
    }],
    storage_relations: &[("reminders", EntityType::Reminder)],
    count_fields: &[("reminders_count", "reminders")],
    join_map: NO_JOINS,
    hidden_fields: NO_HIDDEN,
};

static TAG: Projection = Projection {
    entity_type: EntityType::Tag,
    api_relations: NO_RELATIONS,
    storage_relations: NO_STORAGE,
    count_fields: NO_COUNTS,
    join_map: NO_JOINS,
    hidden_fields: NO_HIDDEN,
};

static LABEL: Projection = Projection {
    entity_type: EntityType::Label,
    api_relations: NO_RELATIONS,
    storage_relations: NO_STORAGE,
    count_fields: NO_COUNTS,
    join_map: NO_JOINS,
    hidden_fields: NO_HIDDEN,
};

static PAYMENT: Projection = Projection {
    entity_type: EntityType::Payment,
    api_relations: &[OWNER],
    storage_relations: NO_STORAGE,
    count_fields: NO_COUNTS,
    join_map: NO_JOINS,
    // Processor references never leave the storage layer.
    hidden_fields: &["processor_reference"],
};

static SITE_STATS: Projection = Projection {
    entity_type: EntityType::SiteStats,
    api_relations: NO_RELATIONS,
    storage_relations: NO_STORAGE,
    count_fields: NO_COUNTS,
    join_map: NO_JOINS,
    hidden_fields: NO_HIDDEN,
};
