//! The entity catalogue: one descriptor per platform entity type.
//!
//! Declarative only. Relation names match the storage link table; scalar
//! field names match the row's JSON data. Ownership delegation chains are
//! declared here and enforced structurally by the registry validation.

use crate::{
    Cardinality, Delegation, EntityDescriptor, EntityType, RelationOp, RelationOps, RelationSpec,
    ScalarField,
};

const CONNECT: RelationOps = RelationOps::NONE.with(RelationOp::Connect);
const CONNECT_DISCONNECT: RelationOps = CONNECT.with(RelationOp::Disconnect);
const CONNECT_CREATE_DISCONNECT: RelationOps = CONNECT_DISCONNECT.with(RelationOp::Create);
const CREATE_UPDATE_DELETE: RelationOps = RelationOps::NONE
    .with(RelationOp::Create)
    .with(RelationOp::Update)
    .with(RelationOp::Delete);
const CREATE_UPDATE: RelationOps = RelationOps::NONE
    .with(RelationOp::Create)
    .with(RelationOp::Update);
const CREATE_DELETE: RelationOps = RelationOps::NONE
    .with(RelationOp::Create)
    .with(RelationOp::Delete);

pub(super) fn describe(entity_type: EntityType) -> EntityDescriptor {
    match entity_type {
        EntityType::User => user(),
        EntityType::Organization => organization(),
        EntityType::Member => member(),
        EntityType::Bookmark => bookmark(),
        EntityType::BookmarkList => bookmark_list(),
        EntityType::BookmarkListTranslation => bookmark_list_translation(),
        EntityType::Routine => routine(),
        EntityType::RoutineVersion => routine_version(),
        EntityType::RoutineVersionTranslation => routine_version_translation(),
        EntityType::RoutineStep => routine_step(),
        EntityType::Run => run(),
        EntityType::RunStep => run_step(),
        EntityType::Chat => chat(),
        EntityType::ChatMessage => chat_message(),
        EntityType::Reminder => reminder(),
        EntityType::ReminderList => reminder_list(),
        EntityType::Tag => tag(),
        EntityType::Label => label(),
        EntityType::Payment => payment(),
        EntityType::SiteStats => site_stats(),
    }
}

fn descriptor(entity_type: EntityType) -> EntityDescriptor {
    EntityDescriptor {
        entity_type,
        relations: Vec::new(),
        scalar_fields: Vec::new(),
        is_versioned: false,
        is_transferable: false,
        max_objects: 0,
        delegates_to: None,
    }
}

// ── Principals ───────────────────────────────────────────────────

fn user() -> EntityDescriptor {
    EntityDescriptor {
        scalar_fields: vec![
            ScalarField::plain("handle"),
            ScalarField::nullable_text("name"),
            ScalarField::plain("is_private"),
            ScalarField::plain("is_deleted"),
        ],
        // Users are minted by the auth system, never through shaping.
        max_objects: 0,
        ..descriptor(EntityType::User)
    }
}

fn organization() -> EntityDescriptor {
    EntityDescriptor {
        relations: vec![
            RelationSpec::new(
                "members",
                EntityType::Member,
                Cardinality::OneToMany,
                CREATE_UPDATE_DELETE,
            )
            .back_reference("organization"),
            RelationSpec::new(
                "tags",
                EntityType::Tag,
                Cardinality::OneToMany,
                CONNECT_CREATE_DISCONNECT,
            ),
        ],
        scalar_fields: vec![
            ScalarField::plain("handle"),
            ScalarField::nullable_text("name"),
            ScalarField::plain("is_private"),
            ScalarField::plain("is_deleted"),
        ],
        max_objects: 10,
        ..descriptor(EntityType::Organization)
    }
}

fn member() -> EntityDescriptor {
    EntityDescriptor {
        relations: vec![
            RelationSpec::new(
                "organization",
                EntityType::Organization,
                Cardinality::OneToOne,
                CONNECT,
            )
            .required()
            .back_reference("members"),
            RelationSpec::new("user", EntityType::User, Cardinality::OneToOne, CONNECT)
                .required(),
        ],
        scalar_fields: vec![ScalarField::plain("role"), ScalarField::plain("is_admin")],
        max_objects: 5_000,
        delegates_to: Some(Delegation {
            parent: EntityType::Organization,
            parent_field: "/organization_id",
        }),
        ..descriptor(EntityType::Member)
    }
}

// ── Bookmarks ────────────────────────────────────────────────────

fn bookmark() -> EntityDescriptor {
    EntityDescriptor {
        relations: vec![
            RelationSpec::new(
                "list",
                EntityType::BookmarkList,
                Cardinality::OneToOne,
                CONNECT,
            )
            .required()
            .back_reference("bookmarks"),
        ],
        scalar_fields: vec![
            ScalarField::plain("link"),
            ScalarField::plain("index"),
            ScalarField::nullable_text("note"),
        ],
        max_objects: 50_000,
        delegates_to: Some(Delegation {
            parent: EntityType::BookmarkList,
            parent_field: "/list_id",
        }),
        ..descriptor(EntityType::Bookmark)
    }
}

fn bookmark_list() -> EntityDescriptor {
    EntityDescriptor {
        relations: vec![
            RelationSpec::new(
                "bookmarks",
                EntityType::Bookmark,
                Cardinality::OneToMany,
                CREATE_UPDATE_DELETE,
            )
            .back_reference("list"),
            RelationSpec::new(
                "translations",
                EntityType::BookmarkListTranslation,
                Cardinality::OneToMany,
                CREATE_UPDATE_DELETE,
            )
            .back_reference("parent"),
        ],
        scalar_fields: vec![
            ScalarField::plain("is_private"),
            ScalarField::plain("is_deleted"),
            ScalarField::plain("owned_by_user"),
            ScalarField::plain("owned_by_organization"),
        ],
        max_objects: 100,
        ..descriptor(EntityType::BookmarkList)
    }
}

fn bookmark_list_translation() -> EntityDescriptor {
    EntityDescriptor {
        relations: vec![
            RelationSpec::new(
                "parent",
                EntityType::BookmarkList,
                Cardinality::OneToOne,
                CONNECT,
            )
            .back_reference("translations"),
        ],
        scalar_fields: vec![
            ScalarField::plain("language"),
            ScalarField::nullable_text("name"),
            ScalarField::nullable_text("description"),
        ],
        // Only reachable through the parent's translations relation.
        max_objects: 0,
        delegates_to: Some(Delegation {
            parent: EntityType::BookmarkList,
            parent_field: "/parent_id",
        }),
        ..descriptor(EntityType::BookmarkListTranslation)
    }
}

// ── Routines ─────────────────────────────────────────────────────

fn routine() -> EntityDescriptor {
    EntityDescriptor {
        relations: vec![
            RelationSpec::new(
                "versions",
                EntityType::RoutineVersion,
                Cardinality::OneToMany,
                CREATE_UPDATE_DELETE,
            )
            .back_reference("root"),
            RelationSpec::new(
                "tags",
                EntityType::Tag,
                Cardinality::OneToMany,
                CONNECT_CREATE_DISCONNECT,
            ),
            RelationSpec::new(
                "labels",
                EntityType::Label,
                Cardinality::OneToMany,
                CONNECT_DISCONNECT,
            ),
        ],
        scalar_fields: vec![
            ScalarField::plain("is_private"),
            ScalarField::plain("is_internal"),
            ScalarField::plain("is_deleted"),
            ScalarField::plain("owned_by_user"),
            ScalarField::plain("owned_by_organization"),
        ],
        is_transferable: true,
        max_objects: 2_500,
        ..descriptor(EntityType::Routine)
    }
}

fn routine_version() -> EntityDescriptor {
    EntityDescriptor {
        relations: vec![
            RelationSpec::new(
                "root",
                EntityType::Routine,
                Cardinality::OneToOne,
                CONNECT.with(RelationOp::Create),
            )
            .required()
            .back_reference("versions"),
            RelationSpec::new(
                "steps",
                EntityType::RoutineStep,
                Cardinality::OneToMany,
                CREATE_UPDATE_DELETE,
            )
            .back_reference("version"),
            RelationSpec::new(
                "translations",
                EntityType::RoutineVersionTranslation,
                Cardinality::OneToMany,
                CREATE_UPDATE_DELETE,
            )
            .back_reference("parent"),
        ],
        scalar_fields: vec![
            ScalarField::plain("version_label"),
            ScalarField::plain("is_complete"),
            ScalarField::plain("is_automatable"),
            ScalarField::plain("is_private"),
            ScalarField::plain("is_deleted"),
            ScalarField::plain("simplicity"),
            ScalarField::plain("complexity"),
        ],
        is_versioned: true,
        max_objects: 10_000,
        delegates_to: Some(Delegation {
            parent: EntityType::Routine,
            parent_field: "/root_id",
        }),
        ..descriptor(EntityType::RoutineVersion)
    }
}

fn routine_version_translation() -> EntityDescriptor {
    EntityDescriptor {
        relations: vec![
            RelationSpec::new(
                "parent",
                EntityType::RoutineVersion,
                Cardinality::OneToOne,
                CONNECT,
            )
            .back_reference("translations"),
        ],
        scalar_fields: vec![
            ScalarField::plain("language"),
            ScalarField::nullable_text("name"),
            ScalarField::nullable_text("description"),
            ScalarField::nullable_text("instructions"),
        ],
        max_objects: 0,
        delegates_to: Some(Delegation {
            parent: EntityType::RoutineVersion,
            parent_field: "/parent_id",
        }),
        ..descriptor(EntityType::RoutineVersionTranslation)
    }
}

fn routine_step() -> EntityDescriptor {
    EntityDescriptor {
        relations: vec![
            RelationSpec::new(
                "version",
                EntityType::RoutineVersion,
                Cardinality::OneToOne,
                CONNECT,
            )
            .required()
            .back_reference("steps"),
            // An optional call into another routine version. No back
            // reference: the subroutine does not know its callers.
            RelationSpec::new(
                "subroutine",
                EntityType::RoutineVersion,
                Cardinality::OneToOne,
                CONNECT_DISCONNECT,
            ),
        ],
        scalar_fields: vec![
            ScalarField::plain("index"),
            ScalarField::plain("is_optional"),
            ScalarField::nullable_text("note"),
        ],
        max_objects: 0,
        delegates_to: Some(Delegation {
            parent: EntityType::RoutineVersion,
            parent_field: "/version_id",
        }),
        ..descriptor(EntityType::RoutineStep)
    }
}

// ── Runs ─────────────────────────────────────────────────────────

fn run() -> EntityDescriptor {
    EntityDescriptor {
        relations: vec![
            RelationSpec::new(
                "routine_version",
                EntityType::RoutineVersion,
                Cardinality::OneToOne,
                CONNECT,
            )
            .required(),
            RelationSpec::new(
                "steps",
                EntityType::RunStep,
                Cardinality::OneToMany,
                CREATE_UPDATE,
            )
            .back_reference("run"),
        ],
        scalar_fields: vec![
            ScalarField::plain("status"),
            ScalarField::plain("started_at"),
            ScalarField::plain("completed_at"),
            ScalarField::plain("is_private"),
            ScalarField::plain("is_deleted"),
            ScalarField::plain("owned_by_user"),
        ],
        max_objects: 5_000,
        ..descriptor(EntityType::Run)
    }
}

fn run_step() -> EntityDescriptor {
    EntityDescriptor {
        relations: vec![
            RelationSpec::new("run", EntityType::Run, Cardinality::OneToOne, CONNECT)
                .required()
                .back_reference("steps"),
            RelationSpec::new(
                "step",
                EntityType::RoutineStep,
                Cardinality::OneToOne,
                CONNECT,
            ),
        ],
        scalar_fields: vec![
            ScalarField::plain("index"),
            ScalarField::plain("status"),
            ScalarField::plain("time_elapsed"),
        ],
        max_objects: 0,
        delegates_to: Some(Delegation {
            parent: EntityType::Run,
            parent_field: "/run_id",
        }),
        ..descriptor(EntityType::RunStep)
    }
}

// ── Chats ────────────────────────────────────────────────────────

fn chat() -> EntityDescriptor {
    EntityDescriptor {
        relations: vec![
            RelationSpec::new(
                "messages",
                EntityType::ChatMessage,
                Cardinality::OneToMany,
                CREATE_DELETE,
            )
            .back_reference("chat"),
            RelationSpec::new(
                "participants",
                EntityType::User,
                Cardinality::OneToMany,
                CONNECT_DISCONNECT,
            ),
        ],
        scalar_fields: vec![
            ScalarField::nullable_text("name"),
            ScalarField::plain("open_to_anyone_with_invite"),
            ScalarField::plain("is_private"),
            ScalarField::plain("is_deleted"),
            ScalarField::plain("owned_by_user"),
        ],
        max_objects: 1_000,
        ..descriptor(EntityType::Chat)
    }
}

fn chat_message() -> EntityDescriptor {
    EntityDescriptor {
        relations: vec![
            RelationSpec::new("chat", EntityType::Chat, Cardinality::OneToOne, CONNECT)
                .required()
                .back_reference("messages"),
        ],
        scalar_fields: vec![
            ScalarField::plain("text"),
            ScalarField::plain("score"),
            ScalarField::plain("owned_by_user"),
        ],
        max_objects: 50_000,
        ..descriptor(EntityType::ChatMessage)
    }
}

// ── Reminders ────────────────────────────────────────────────────

fn reminder() -> EntityDescriptor {
    EntityDescriptor {
        relations: vec![
            RelationSpec::new(
                "list",
                EntityType::ReminderList,
                Cardinality::OneToOne,
                CONNECT.with(RelationOp::Create),
            )
            .required()
            .back_reference("reminders"),
        ],
        scalar_fields: vec![
            ScalarField::nullable_text("name"),
            ScalarField::nullable_text("description"),
            ScalarField::plain("due_date"),
            ScalarField::plain("is_complete"),
            ScalarField::plain("index"),
        ],
        max_objects: 10_000,
        delegates_to: Some(Delegation {
            parent: EntityType::ReminderList,
            parent_field: "/list_id",
        }),
        ..descriptor(EntityType::Reminder)
    }
}

fn reminder_list() -> EntityDescriptor {
    EntityDescriptor {
        relations: vec![
            RelationSpec::new(
                "reminders",
                EntityType::Reminder,
                Cardinality::OneToMany,
                CREATE_UPDATE_DELETE,
            )
            .back_reference("list"),
        ],
        scalar_fields: vec![ScalarField::plain("owned_by_user")],
        max_objects: 100,
        ..descriptor(EntityType::ReminderList)
    }
}

// ── Vocabulary ───────────────────────────────────────────────────

fn tag() -> EntityDescriptor {
    EntityDescriptor {
        scalar_fields: vec![ScalarField::plain("tag")],
        // Public vocabulary: no owner, but anyone may mint new tags.
        max_objects: 10_000,
        ..descriptor(EntityType::Tag)
    }
}

fn label() -> EntityDescriptor {
    EntityDescriptor {
        scalar_fields: vec![
            ScalarField::plain("label"),
            ScalarField::nullable_text("color"),
            ScalarField::plain("owned_by_user"),
        ],
        max_objects: 100,
        ..descriptor(EntityType::Label)
    }
}

// ── Billing & stats ──────────────────────────────────────────────

fn payment() -> EntityDescriptor {
    EntityDescriptor {
        scalar_fields: vec![
            ScalarField::plain("amount"),
            ScalarField::plain("currency"),
            ScalarField::plain("status"),
            ScalarField::nullable_text("description"),
            ScalarField::plain("owned_by_user"),
            ScalarField::plain("owned_by_organization"),
        ],
        // Payments are minted by billing, never through shaping.
        max_objects: 0,
        ..descriptor(EntityType::Payment)
    }
}

fn site_stats() -> EntityDescriptor {
    EntityDescriptor {
        scalar_fields: vec![
            ScalarField::plain("period_start"),
            ScalarField::plain("period_end"),
            ScalarField::plain("active_users"),
            ScalarField::plain("routines_created"),
            ScalarField::plain("runs_completed"),
        ],
        max_objects: 0,
        ..descriptor(EntityType::SiteStats)
    }
}
