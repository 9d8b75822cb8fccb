use crate::{LanguageTag, UserId};
use serde::{Deserialize, Serialize};

/// The already-authenticated principal driving one save or read call.
///
/// Trellis never issues or checks authentication tokens; resolvers hand
/// the engine a `Caller` that has already been verified upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Caller {
    pub user_id: UserId,
    /// Preferred languages, most preferred first. Used to pick display
    /// names for error messages and translation fallbacks.
    pub languages: Vec<LanguageTag>,
}

impl Caller {
    /// Creates a caller with a single preferred language.
    #[must_use]
    pub fn new(user_id: UserId, language: &str) -> Self {
        Self {
            user_id,
            languages: vec![LanguageTag::new(language)],
        }
    }

    /// Creates a caller with an ordered preference list.
    #[must_use]
    pub fn with_languages(user_id: UserId, languages: Vec<LanguageTag>) -> Self {
        Self { user_id, languages }
    }

    /// The most preferred language, defaulting to `en` when none was sent.
    #[must_use]
    pub fn preferred_language(&self) -> LanguageTag {
        self.languages
            .first()
            .cloned()
            .unwrap_or_else(|| LanguageTag::new("en"))
    }
}
