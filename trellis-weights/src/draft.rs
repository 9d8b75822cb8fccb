use serde::{Deserialize, Serialize};
use trellis_types::{LanguageTag, RowId};

/// One step of a version draft, as far as weighing is concerned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepDraft {
    /// Optional steps count toward complexity but not simplicity.
    pub optional: bool,
    /// A call into another routine version, if any.
    pub subroutine: Option<RowId>,
}

impl StepDraft {
    /// A mandatory step with no subroutine call.
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            optional: false,
            subroutine: None,
        }
    }

    /// A mandatory step calling the given subroutine version.
    #[must_use]
    pub const fn calling(subroutine: RowId) -> Self {
        Self {
            optional: false,
            subroutine: Some(subroutine),
        }
    }

    /// Marks the step optional.
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// A translation of a version draft, carried for display names in errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationDraft {
    pub language: LanguageTag,
    pub name: String,
}

/// The weight-relevant slice of one versioned entity being created or
/// updated in a save call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionDraft {
    pub id: RowId,
    pub steps: Vec<StepDraft>,
    pub translations: Vec<TranslationDraft>,
}

impl VersionDraft {
    #[must_use]
    pub fn new(id: RowId, steps: Vec<StepDraft>) -> Self {
        Self {
            id,
            steps,
            translations: Vec::new(),
        }
    }

    /// Picks a display name by the caller's language preference, falling
    /// back to the first translation, then to the id.
    #[must_use]
    pub fn display_name(&self, languages: &[LanguageTag]) -> String {
        for lang in languages {
            if let Some(t) = self.translations.iter().find(|t| &t.language == lang) {
                return t.name.clone();
            }
        }
        self.translations
            .first()
            .map(|t| t.name.clone())
            .unwrap_or_else(|| self.id.to_string())
    }
}
