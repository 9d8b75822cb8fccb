use serde::{Deserialize, Serialize};
use std::fmt;

/// Every entity type known to the platform.
///
/// The source of truth for dispatch across the engine: shaping, ownership,
/// search, and projections all match exhaustively on this enum, so adding a
/// type forces every component to say what it does with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    User,
    Organization,
    Member,
    Bookmark,
    BookmarkList,
    BookmarkListTranslation,
    Routine,
    RoutineVersion,
    RoutineVersionTranslation,
    RoutineStep,
    Run,
    RunStep,
    Chat,
    ChatMessage,
    Reminder,
    ReminderList,
    Tag,
    Label,
    Payment,
    SiteStats,
}

impl EntityType {
    /// Every variant, in registry order.
    pub const ALL: &'static [EntityType] = &[
        EntityType::User,
        EntityType::Organization,
        EntityType::Member,
        EntityType::Bookmark,
        EntityType::BookmarkList,
        EntityType::BookmarkListTranslation,
        EntityType::Routine,
        EntityType::RoutineVersion,
        EntityType::RoutineVersionTranslation,
        EntityType::RoutineStep,
        EntityType::Run,
        EntityType::RunStep,
        EntityType::Chat,
        EntityType::ChatMessage,
        EntityType::Reminder,
        EntityType::ReminderList,
        EntityType::Tag,
        EntityType::Label,
        EntityType::Payment,
        EntityType::SiteStats,
    ];

    /// The wire/storage name of the type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            EntityType::User => "user",
            EntityType::Organization => "organization",
            EntityType::Member => "member",
            EntityType::Bookmark => "bookmark",
            EntityType::BookmarkList => "bookmark_list",
            EntityType::BookmarkListTranslation => "bookmark_list_translation",
            EntityType::Routine => "routine",
            EntityType::RoutineVersion => "routine_version",
            EntityType::RoutineVersionTranslation => "routine_version_translation",
            EntityType::RoutineStep => "routine_step",
            EntityType::Run => "run",
            EntityType::RunStep => "run_step",
            EntityType::Chat => "chat",
            EntityType::ChatMessage => "chat_message",
            EntityType::Reminder => "reminder",
            EntityType::ReminderList => "reminder_list",
            EntityType::Tag => "tag",
            EntityType::Label => "label",
            EntityType::Payment => "payment",
            EntityType::SiteStats => "site_stats",
        }
    }

    /// Parses a wire/storage name back into a variant.
    #[must_use]
    pub fn parse(name: &str) -> Option<EntityType> {
        EntityType::ALL.iter().copied().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
